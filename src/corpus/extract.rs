// PDF → text extraction stage.
//
// Each input PDF becomes one .txt file named after its stem. A PDF that
// pdf-extract cannot parse (scanned images, broken xref tables) is skipped
// with a warning rather than aborting the whole corpus — one bad paper
// should not block the run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Extract text from every `*.pdf` in `pdf_dir` into `out_dir`, one
/// `<stem>.txt` per input. Returns the number of files written.
///
/// Fatal when the input directory is missing or when not a single PDF
/// yields text — downstream stages would have an empty corpus.
pub fn extract_corpus(pdf_dir: &Path, out_dir: &Path) -> Result<usize> {
    if !pdf_dir.is_dir() {
        anyhow::bail!("PDF input directory not found: {}", pdf_dir.display());
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let mut paths: Vec<_> = fs::read_dir(pdf_dir)
        .with_context(|| format!("read PDF directory {}", pdf_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        anyhow::bail!("no PDF files found in {}", pdf_dir.display());
    }

    let mut written = 0usize;
    for path in &paths {
        match pdf_extract::extract_text(path) {
            Ok(text) if !text.trim().is_empty() => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let target = out_dir.join(format!("{stem}.txt"));
                fs::write(&target, &text)
                    .with_context(|| format!("write extracted text to {}", target.display()))?;
                info!(source = %path.display(), chars = text.len(), "Extracted PDF");
                written += 1;
            }
            Ok(_) => {
                warn!(source = %path.display(), "PDF yielded no text, skipping");
            }
            Err(e) => {
                warn!(source = %path.display(), error = %e, "PDF extraction failed, skipping");
            }
        }
    }

    if written == 0 {
        anyhow::bail!(
            "none of the {} PDFs in {} produced any text",
            paths.len(),
            pdf_dir.display()
        );
    }

    Ok(written)
}
