// Stopword handling — three sources merged into one set.
//
// 1. The stop-words crate's English list (the baseline).
// 2. An inline list of academic boilerplate that survives generic English
//    filtering but carries no topical signal in research papers.
// 3. An optional user-supplied file. Its absence is a degraded
//    configuration, not an error: we warn and continue.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use stop_words::{get, LANGUAGE};
use tracing::{info, warn};

/// Boilerplate tokens common to most research papers regardless of field.
/// These dominate raw frequency counts and drown out actual topics.
const ACADEMIC_STOPWORDS: &[&str] = &[
    "abstract",
    "introduction",
    "conclusion",
    "references",
    "acknowledgments",
    "figure",
    "fig",
    "table",
    "section",
    "appendix",
    "et",
    "al",
    "etc",
    "ie",
    "eg",
    "paper",
    "study",
    "research",
    "result",
    "results",
    "method",
    "methods",
    "approach",
    "proposed",
    "based",
    "using",
    "used",
    "show",
    "shown",
    "however",
    "therefore",
    "thus",
    "also",
    "may",
    "can",
    "one",
    "two",
    "doi",
    "vol",
    "pp",
    "university",
    "journal",
    "conference",
    "proceedings",
];

/// The merged stopword set used by the cleaning stage.
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Build the set from the built-in English list, the inline academic
    /// list, and (when present) an external file of newline- or
    /// whitespace-separated tokens.
    pub fn load(extra_file: Option<&Path>) -> Self {
        let mut words: HashSet<String> = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        for w in ACADEMIC_STOPWORDS {
            words.insert((*w).to_string());
        }

        if let Some(path) = extra_file {
            match fs::read_to_string(path) {
                Ok(contents) => {
                    let before = words.len();
                    for token in contents.split_whitespace() {
                        words.insert(token.to_lowercase());
                    }
                    info!(
                        file = %path.display(),
                        added = words.len() - before,
                        "Loaded extra stopwords"
                    );
                }
                Err(e) => {
                    warn!(
                        file = %path.display(),
                        error = %e,
                        "Stopword file not readable, continuing with built-in lists only"
                    );
                }
            }
        }

        Self { words }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Flat view for callers that need a Vec (the keyword_extraction API).
    pub fn as_vec(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
