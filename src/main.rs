use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use papermine::analysis::{frequency, tfidf};
use papermine::config::Config;
use papermine::corpus::{self, clean, extract, stopwords::Stopwords};
use papermine::plot;
use papermine::topics::dtm::DocTermMatrix;
use papermine::topics::lda::LdaParams;
use papermine::topics::export;
use papermine::topics::search::{self, select_k, SweepConfig};

/// Papermine: exploratory text mining for a research-paper corpus.
///
/// Extracts text from PDFs, cleans and normalizes it, renders frequency
/// and TF-IDF visualizations, and fits a topic model with an
/// automatically selected topic count.
#[derive(Parser)]
#[command(name = "papermine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from the PDF corpus into per-paper .txt files
    Extract,

    /// Clean and normalize the extracted text
    Clean,

    /// Render a bar chart of the most frequent terms
    Frequency {
        /// How many top terms to chart
        #[arg(long, default_value = "25")]
        top: usize,

        /// Only count documents whose filename contains this substring
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Render a word cloud of the top TF-IDF terms
    Cloud {
        /// How many top terms to include
        #[arg(long, default_value = "100")]
        top: usize,
    },

    /// Sweep topic counts, select the best by coherence, fit and export
    Topics,

    /// Run the whole pipeline: extract, clean, frequency, cloud, topics
    Run,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("papermine=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Extract => run_extract(&config)?,
        Commands::Clean => run_clean(&config)?,
        Commands::Frequency { top, filter } => run_frequency(&config, top, &filter)?,
        Commands::Cloud { top } => run_cloud(&config, top)?,
        Commands::Topics => run_topics(&config)?,
        Commands::Run => {
            run_extract(&config)?;
            run_clean(&config)?;
            run_frequency(&config, 25, "")?;
            run_cloud(&config, tfidf::DEFAULT_TOP_N)?;
            run_topics(&config)?;
        }
    }

    Ok(())
}

fn run_extract(config: &Config) -> Result<()> {
    config.require_pdf_dir()?;
    println!("Extracting PDFs from {}...", config.pdf_dir.display());
    let written = extract::extract_corpus(&config.pdf_dir, &config.raw_dir)?;
    println!(
        "{}",
        format!("Extracted {written} papers into {}", config.raw_dir.display()).bold()
    );
    Ok(())
}

fn run_clean(config: &Config) -> Result<()> {
    println!("Cleaning corpus from {}...", config.raw_dir.display());
    let kept = clean::clean_corpus(
        &config.raw_dir,
        &config.clean_dir,
        config.stopword_file.as_deref(),
    )?;
    println!(
        "{}",
        format!("Cleaned corpus: {kept} papers in {}", config.clean_dir.display()).bold()
    );
    Ok(())
}

fn run_frequency(config: &Config, top: usize, filter: &str) -> Result<()> {
    let documents = corpus::load_documents(&config.clean_dir)?;
    let selected = frequency::subset(&documents, filter);
    if selected.is_empty() {
        anyhow::bail!("no documents match the filter {filter:?}");
    }

    let counts = frequency::term_frequencies(&selected);
    let ranked = frequency::top_terms(&counts, top);

    std::fs::create_dir_all(&config.out_dir)?;
    let path = config.out_dir.join("frequency.png");
    let title = if filter.is_empty() {
        format!("Top {top} terms across {} papers", selected.len())
    } else {
        format!("Top {top} terms ({filter}, {} papers)", selected.len())
    };
    plot::bar_chart(&ranked, &title, &path)?;

    println!("{}", format!("Frequency chart: {}", path.display()).bold());
    for (i, (term, count)) in ranked.iter().take(10).enumerate() {
        println!("  {:>2}. {:<24} {}", i + 1, term, count);
    }
    Ok(())
}

fn run_cloud(config: &Config, top: usize) -> Result<()> {
    let documents = corpus::load_documents(&config.clean_dir)?;
    let stopword_set = Stopwords::load(config.stopword_file.as_deref());
    let ranked = tfidf::ranked_terms(&documents, &stopword_set, top)?;

    std::fs::create_dir_all(&config.out_dir)?;
    let path = config.out_dir.join("wordcloud.png");
    plot::word_cloud(&ranked, &path)?;
    println!("{}", format!("Word cloud: {}", path.display()).bold());
    Ok(())
}

fn run_topics(config: &Config) -> Result<()> {
    let documents = corpus::load_documents(&config.clean_dir)?;
    let dtm = DocTermMatrix::build(&documents)?;
    info!(
        docs = dtm.doc_ids.len(),
        terms = dtm.vocab.len(),
        "Corpus ready for topic modeling"
    );

    let sweep_config = SweepConfig {
        k_min: config.k_min,
        k_max: config.k_max,
        k_step: config.k_step,
        iterations: config.sweep_iterations,
        seed: config.seed,
        params: LdaParams::default(),
    };

    println!(
        "Sweeping topic counts {}..={} (step {})...",
        config.k_min, config.k_max, config.k_step
    );
    let scores = search::sweep(&dtm, &sweep_config);
    let selected = select_k(&scores)?;

    std::fs::create_dir_all(&config.out_dir)?;
    let chart_path = config.out_dir.join("coherence.png");
    plot::coherence_plot(&scores, &chart_path)?;

    println!("{}", format!("Selected k = {selected}").bold());
    for score in &scores {
        match score.coherence {
            Some(c) => {
                let marker = if score.k == selected { "*" } else { " " };
                println!("  {} k={:<3} coherence {:>9.4}", marker, score.k, c);
            }
            None => println!("    k={:<3} (no score)", score.k),
        }
    }

    println!("Fitting final model at k = {selected}...");
    let payload = export::final_model(
        &dtm,
        selected,
        config.final_iterations,
        LdaParams::default(),
        config.seed,
        config.relevance_r,
    )?;

    let artifact_dir = config.out_dir.join("topic-model");
    export::write_artifact(&payload, &artifact_dir)?;

    println!(
        "{}",
        format!(
            "Topic model exported: open {} in a browser",
            artifact_dir.join("index.html").display()
        )
        .bold()
    );
    Ok(())
}
