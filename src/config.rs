use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Every path and numeric parameter of the pipeline lives here; the CLI
/// only selects which stage runs. The .env file is loaded automatically
/// at startup via dotenvy.
pub struct Config {
    /// Directory of input PDFs consumed by `extract`.
    pub pdf_dir: PathBuf,
    /// Directory of raw extracted text, one .txt per paper.
    pub raw_dir: PathBuf,
    /// Directory of cleaned text, one .txt per surviving paper.
    pub clean_dir: PathBuf,
    /// Output directory for charts and the exported model artifact.
    pub out_dir: PathBuf,
    /// Optional extra stopword file (newline/whitespace separated).
    /// A missing file is a warning, not an error.
    pub stopword_file: Option<PathBuf>,
    /// Seed for the Gibbs sampler. One constant for the whole run so the
    /// sweep and the final fit are reproducible end to end.
    pub seed: u64,
    /// Inclusive candidate topic-count range and step for the sweep.
    pub k_min: usize,
    pub k_max: usize,
    pub k_step: usize,
    /// Gibbs iterations per sweep candidate (cheap scoring fits).
    pub sweep_iterations: usize,
    /// Gibbs iterations for the authoritative final fit.
    pub final_iterations: usize,
    /// Relevance neighborhood size R carried into the exported artifact.
    pub relevance_r: usize,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} is set but not a valid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults documented in the README for anything unset.
    pub fn load() -> Result<Self> {
        let config = Self {
            pdf_dir: env::var("PAPERMINE_PDF_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./papers")),
            raw_dir: env::var("PAPERMINE_RAW_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./corpus/raw")),
            clean_dir: env::var("PAPERMINE_CLEAN_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./corpus/clean")),
            out_dir: env::var("PAPERMINE_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./out")),
            stopword_file: env::var("PAPERMINE_STOPWORDS").ok().map(PathBuf::from),
            seed: env_parse("PAPERMINE_SEED", 42)?,
            k_min: env_parse("PAPERMINE_K_MIN", 2)?,
            k_max: env_parse("PAPERMINE_K_MAX", 15)?,
            k_step: env_parse("PAPERMINE_K_STEP", 1)?,
            sweep_iterations: env_parse("PAPERMINE_SWEEP_ITERS", 50)?,
            final_iterations: env_parse("PAPERMINE_FINAL_ITERS", 200)?,
            relevance_r: env_parse("PAPERMINE_RELEVANCE_R", 30)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations that would make the sweep meaningless
    /// before any corpus work starts.
    fn validate(&self) -> Result<()> {
        if self.k_min < 2 {
            anyhow::bail!(
                "PAPERMINE_K_MIN must be at least 2 (a one-topic model has nothing to select)"
            );
        }
        if self.k_max < self.k_min {
            anyhow::bail!(
                "PAPERMINE_K_MAX ({}) must not be below PAPERMINE_K_MIN ({})",
                self.k_max,
                self.k_min
            );
        }
        if self.k_step == 0 {
            anyhow::bail!("PAPERMINE_K_STEP must be at least 1");
        }
        Ok(())
    }

    /// Check that the PDF input directory exists.
    /// Call this before the extract stage.
    pub fn require_pdf_dir(&self) -> Result<()> {
        if !self.pdf_dir.is_dir() {
            anyhow::bail!(
                "PDF input directory not found: {}\n\
                 Set PAPERMINE_PDF_DIR in your .env file or place PDFs under ./papers",
                self.pdf_dir.display()
            );
        }
        Ok(())
    }
}
