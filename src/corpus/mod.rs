// Corpus preparation — PDF extraction, text cleanup, stopword handling.

pub mod clean;
pub mod extract;
pub mod stopwords;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// One paper in the corpus: its source filename (unique key throughout the
/// pipeline) paired with its text body. Identifier and body travel together
/// in a single record so filtering one can never desynchronize the other.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Load all `.txt` documents from a directory, in sorted filename order so
/// downstream vocabulary construction is deterministic.
///
/// Fails if the directory is missing or contains no usable text files —
/// there is nothing to mine and every later stage would produce noise.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        anyhow::bail!("corpus directory not found: {}", dir.display());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("read corpus directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("read document {}", path.display()))?;
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        documents.push(Document { id, text });
    }

    if documents.is_empty() {
        anyhow::bail!(
            "no .txt documents found in {} — run the extract and clean stages first",
            dir.display()
        );
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_documents_missing_dir_fails() {
        let result = load_documents(Path::new("/nonexistent/papermine-corpus"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("/nonexistent/papermine-corpus"), "got: {err}");
    }

    #[test]
    fn load_documents_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_documents(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn load_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "beta").unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("ignored.pdf"), "binary").unwrap();

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a.txt");
        assert_eq!(docs[1].id, "b.txt");
        assert_eq!(docs[0].text, "alpha");
    }
}
