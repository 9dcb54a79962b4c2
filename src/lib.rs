// Papermine: exploratory text mining for a research-paper corpus.
//
// This is the library root. Each module corresponds to a stage of the
// mining pipeline: corpus preparation, descriptive statistics, chart
// rendering, and the coherence-driven topic model.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod plot;
pub mod topics;
