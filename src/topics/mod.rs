// Topic modeling — DTM construction, seeded LDA, coherence-driven
// topic-count selection, and the exported visualization artifact.

pub mod coherence;
pub mod dtm;
pub mod export;
pub mod lda;
pub mod search;
