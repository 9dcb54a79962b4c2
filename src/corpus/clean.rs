// Text cleanup and normalization.
//
// Lowercase, strip noise patterns (URLs, citation brackets, digits and
// symbols), drop stopwords, stem to a canonical base form, and drop tokens
// shorter than three characters. The output of `clean_text` is a
// space-joined token string — the form every downstream stage consumes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use tracing::{debug, info};

use super::stopwords::Stopwords;
use super::Document;

/// Minimum surviving token length. Shorter fragments are almost always
/// stemming residue or extraction artifacts.
pub const MIN_TOKEN_LEN: usize = 3;

/// Compiled noise patterns, built once per run.
pub struct Cleaner {
    url: Regex,
    citation: Regex,
    non_alpha: Regex,
    stemmer: Stemmer,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner {
    pub fn new() -> Self {
        Self {
            // The patterns are static literals; new() cannot fail on them.
            url: Regex::new(r"https?://\S+|www\.\S+").unwrap(),
            citation: Regex::new(r"\[[0-9,\s\-]+\]").unwrap(),
            non_alpha: Regex::new(r"[^a-z\s]").unwrap(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Normalize one raw document body into a cleaned token string.
    /// Returns an empty string when nothing survives — the caller decides
    /// whether that removes the document from the active set.
    pub fn clean_text(&self, raw: &str, stopwords: &Stopwords) -> String {
        let lowered = raw.to_lowercase();
        let no_urls = self.url.replace_all(&lowered, " ");
        let no_citations = self.citation.replace_all(&no_urls, " ");
        let letters_only = self.non_alpha.replace_all(&no_citations, " ");

        let tokens: Vec<String> = letters_only
            .split_whitespace()
            .filter(|t| !stopwords.contains(t))
            .map(|t| self.stemmer.stem(t).into_owned())
            .filter(|t| t.len() >= MIN_TOKEN_LEN && !stopwords.contains(t))
            .collect();

        tokens.join(" ")
    }
}

/// Clean every raw text document under `raw_dir` into `out_dir`.
///
/// Documents whose cleaned body comes out empty are dropped from the active
/// set — identifier and text are filtered together as one record, so the
/// surviving files can never fall out of alignment. Returns the number of
/// documents written.
pub fn clean_corpus(raw_dir: &Path, out_dir: &Path, stopword_file: Option<&Path>) -> Result<usize> {
    let documents = super::load_documents(raw_dir)?;
    let stopwords = Stopwords::load(stopword_file);
    let cleaner = Cleaner::new();

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    // Clear output from earlier runs. A document dropped this run must not
    // survive as a stale file and re-enter the corpus downstream.
    for entry in fs::read_dir(out_dir)
        .with_context(|| format!("read output directory {}", out_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            fs::remove_file(&path)
                .with_context(|| format!("remove stale document {}", path.display()))?;
        }
    }

    let cleaned: Vec<Document> = documents
        .iter()
        .map(|doc| Document {
            id: doc.id.clone(),
            text: cleaner.clean_text(&doc.text, &stopwords),
        })
        .filter(|doc| !doc.text.is_empty())
        .collect();

    for doc in &cleaned {
        let target = out_dir.join(&doc.id);
        fs::write(&target, &doc.text)
            .with_context(|| format!("write cleaned document {}", target.display()))?;
        debug!(id = %doc.id, tokens = doc.text.split_whitespace().count(), "Cleaned document");
    }

    if cleaned.is_empty() {
        anyhow::bail!(
            "cleaning removed every document in {} — the corpus has no usable text",
            raw_dir.display()
        );
    }

    info!(
        kept = cleaned.len(),
        dropped = documents.len() - cleaned.len(),
        "Corpus cleaned"
    );
    Ok(cleaned.len())
}
