// Descriptive corpus statistics — word frequencies and TF-IDF rankings.

pub mod frequency;
pub mod tfidf;
