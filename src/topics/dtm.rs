// Document-term matrix construction.
//
// Rows are surviving documents, columns are vocabulary terms in
// first-occurrence order. Identifiers, texts, and matrix rows are filtered
// together through one predicate at each step — index alignment between
// doc_ids and counts is an invariant, not a hope.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

use crate::corpus::Document;

/// Dense document-term count matrix with its aligned labels.
///
/// Corpora here are tens of papers with a few thousand terms; dense rows
/// keep the row/column cleanup and the sampler's access pattern trivial.
#[derive(Debug, Clone)]
pub struct DocTermMatrix {
    /// Source filename of each surviving document, row-aligned with `counts`.
    pub doc_ids: Vec<String>,
    /// Vocabulary term per column, in first-occurrence order.
    pub vocab: Vec<String>,
    /// counts[row][col] = occurrences of vocab[col] in doc_ids[row].
    pub counts: Vec<Vec<u32>>,
}

impl DocTermMatrix {
    /// Build the matrix from cleaned documents.
    ///
    /// Documents with empty cleaned text are excluded before construction;
    /// zero-sum rows and zero-sum columns are dropped afterwards, with
    /// doc_ids and vocab filtered in lockstep. Fails with a "no usable
    /// corpus" error when nothing survives.
    pub fn build(documents: &[Document]) -> Result<Self> {
        // One predicate over the paired record — id and text stay together.
        let active: Vec<&Document> = documents
            .iter()
            .filter(|doc| !doc.text.trim().is_empty())
            .collect();

        if active.is_empty() {
            anyhow::bail!("no usable corpus: every document has empty cleaned text");
        }

        let mut vocab: Vec<String> = Vec::new();
        let mut term_to_col: HashMap<String, usize> = HashMap::new();
        let tokenized: Vec<Vec<&str>> = active
            .iter()
            .map(|doc| doc.text.split_whitespace().collect())
            .collect();

        for tokens in &tokenized {
            for &token in tokens {
                if !term_to_col.contains_key(token) {
                    term_to_col.insert(token.to_string(), vocab.len());
                    vocab.push(token.to_string());
                }
            }
        }

        let mut counts = vec![vec![0u32; vocab.len()]; active.len()];
        for (row, tokens) in tokenized.iter().enumerate() {
            for &token in tokens {
                counts[row][term_to_col[token]] += 1;
            }
        }

        let mut dtm = Self {
            doc_ids: active.iter().map(|doc| doc.id.clone()).collect(),
            vocab,
            counts,
        };
        dtm.drop_zero_rows();
        dtm.drop_zero_columns();

        if dtm.doc_ids.is_empty() || dtm.vocab.is_empty() {
            anyhow::bail!(
                "no usable corpus: the document-term matrix collapsed to {} rows x {} columns",
                dtm.doc_ids.len(),
                dtm.vocab.len()
            );
        }

        debug!(
            docs = dtm.doc_ids.len(),
            terms = dtm.vocab.len(),
            tokens = dtm.total_tokens(),
            "Document-term matrix built"
        );
        Ok(dtm)
    }

    /// Remove documents whose row sums to zero. Guards against texts that
    /// pass the non-empty check but tokenize to nothing under the vocabulary.
    fn drop_zero_rows(&mut self) {
        let keep: Vec<bool> = self
            .counts
            .iter()
            .map(|row| row.iter().any(|&c| c > 0))
            .collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        let dropped: Vec<&String> = self
            .doc_ids
            .iter()
            .zip(&keep)
            .filter(|(_, &k)| !k)
            .map(|(id, _)| id)
            .collect();
        warn!(?dropped, "Dropping zero-sum documents from the matrix");

        retain_by_mask(&mut self.doc_ids, &keep);
        retain_by_mask(&mut self.counts, &keep);
    }

    /// Remove terms whose column sums to zero (possible once rows have been
    /// dropped), keeping vocab aligned with the remaining columns.
    fn drop_zero_columns(&mut self) {
        let keep: Vec<bool> = (0..self.vocab.len())
            .map(|col| self.counts.iter().any(|row| row[col] > 0))
            .collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        retain_by_mask(&mut self.vocab, &keep);
        for row in &mut self.counts {
            retain_by_mask(row, &keep);
        }
    }

    /// Total token count per document, row-aligned.
    pub fn doc_lengths(&self) -> Vec<usize> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| c as usize).sum())
            .collect()
    }

    /// Corpus-wide occurrence total per term, column-aligned with `vocab`.
    pub fn term_frequencies(&self) -> Vec<u64> {
        (0..self.vocab.len())
            .map(|col| self.counts.iter().map(|row| row[col] as u64).sum())
            .collect()
    }

    /// Number of documents containing each term at least once.
    pub fn doc_frequencies(&self) -> Vec<usize> {
        (0..self.vocab.len())
            .map(|col| self.counts.iter().filter(|row| row[col] > 0).count())
            .collect()
    }

    /// Number of documents containing both terms at least once.
    pub fn co_doc_frequency(&self, col_a: usize, col_b: usize) -> usize {
        self.counts
            .iter()
            .filter(|row| row[col_a] > 0 && row[col_b] > 0)
            .count()
    }

    pub fn total_tokens(&self) -> usize {
        self.doc_lengths().iter().sum()
    }
}

/// Keep `items[i]` exactly where `keep[i]` is true; both must be equal length.
fn retain_by_mask<T>(items: &mut Vec<T>, keep: &[bool]) {
    let mut flags = keep.iter().copied();
    items.retain(|_| flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> Document {
        Document {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn builds_aligned_matrix() {
        let docs = vec![
            doc("a.txt", "alpha beta alpha"),
            doc("b.txt", "beta gamma"),
        ];
        let dtm = DocTermMatrix::build(&docs).unwrap();

        assert_eq!(dtm.doc_ids, vec!["a.txt", "b.txt"]);
        assert_eq!(dtm.vocab, vec!["alpha", "beta", "gamma"]);
        assert_eq!(dtm.counts, vec![vec![2, 1, 0], vec![0, 1, 1]]);
        assert_eq!(dtm.doc_lengths(), vec![3, 2]);
        assert_eq!(dtm.term_frequencies(), vec![2, 2, 1]);
        assert_eq!(dtm.doc_frequencies(), vec![1, 2, 1]);
    }

    #[test]
    fn empty_text_excluded_with_its_identifier() {
        let docs = vec![
            doc("a.txt", "alpha beta"),
            doc("empty.txt", "   "),
            doc("c.txt", "gamma"),
        ];
        let dtm = DocTermMatrix::build(&docs).unwrap();
        assert_eq!(dtm.doc_ids, vec!["a.txt", "c.txt"]);
        assert_eq!(dtm.counts.len(), 2);
    }

    #[test]
    fn all_empty_is_no_usable_corpus() {
        let docs = vec![doc("a.txt", ""), doc("b.txt", "  ")];
        let err = DocTermMatrix::build(&docs).unwrap_err().to_string();
        assert!(err.contains("no usable corpus"), "got: {err}");
    }

    #[test]
    fn co_doc_frequency_counts_shared_documents() {
        let docs = vec![
            doc("a.txt", "alpha beta"),
            doc("b.txt", "alpha gamma"),
            doc("c.txt", "beta gamma"),
        ];
        let dtm = DocTermMatrix::build(&docs).unwrap();
        let alpha = dtm.vocab.iter().position(|t| t == "alpha").unwrap();
        let beta = dtm.vocab.iter().position(|t| t == "beta").unwrap();
        assert_eq!(dtm.co_doc_frequency(alpha, beta), 1);
    }
}
