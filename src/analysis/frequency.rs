// Word-frequency analysis over the cleaned corpus.
//
// Counting is an explicit reduction: per-document token lists fold into one
// term → count map. The raw texts are never concatenated into a monolithic
// string, so per-document provenance stays recoverable.

use counter::Counter;

use crate::corpus::Document;

/// Fold the corpus (or a subset of it) into a single frequency map.
pub fn term_frequencies(documents: &[Document]) -> Counter<String> {
    documents.iter().fold(Counter::new(), |mut counts, doc| {
        counts.update(doc.text.split_whitespace().map(str::to_string));
        counts
    })
}

/// Select the subset of documents whose identifier contains `filter`.
/// An empty filter keeps the whole corpus.
pub fn subset(documents: &[Document], filter: &str) -> Vec<Document> {
    documents
        .iter()
        .filter(|doc| filter.is_empty() || doc.id.contains(filter))
        .cloned()
        .collect()
}

/// The `n` most frequent terms, sorted by count descending and then term
/// ascending so repeated runs over the same corpus agree on order.
pub fn top_terms(counts: &Counter<String>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(term, count)| (term.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
