// TF-IDF term ranking over the cleaned corpus.
//
// Uses the `keyword_extraction` crate with each cleaned document as a
// separate TF-IDF document — terms that appear in every paper get
// downweighted, terms distinctive to a few papers get boosted. The ranked
// list feeds the word-cloud rendering.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use tracing::info;

use crate::corpus::stopwords::Stopwords;
use crate::corpus::Document;

/// How many top terms the word cloud draws by default.
pub const DEFAULT_TOP_N: usize = 100;

/// Rank corpus terms by TF-IDF weight, highest first.
///
/// Fails when the ranking comes out empty — a corpus where no term carries
/// any weight is not worth visualizing.
pub fn ranked_terms(
    documents: &[Document],
    stopwords: &Stopwords,
    top_n: usize,
) -> Result<Vec<(String, f32)>> {
    if documents.is_empty() {
        anyhow::bail!("no documents to rank — the cleaned corpus is empty");
    }

    let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
    let stop_words = stopwords.as_vec();

    // The library handles tokenization and scoring; documents are already
    // cleaned, so the extra stop word pass only catches file-level additions.
    let params = TfIdfParams::UnprocessedDocuments(texts.as_slice(), stop_words.as_slice(), None);
    let tfidf = TfIdf::new(params);
    let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(top_n);

    if ranked.is_empty() {
        anyhow::bail!(
            "TF-IDF produced no terms from {} documents — the corpus has no usable vocabulary",
            documents.len()
        );
    }

    info!(
        terms = ranked.len(),
        top_term = %ranked[0].0,
        top_score = ranked[0].1,
        "Ranked TF-IDF terms"
    );

    Ok(ranked)
}
