// Composition tests: the pipeline stages chained over real files, from raw
// text through cleaning, the document-term matrix, the coherence sweep,
// and the exported artifact. PDF extraction is exercised only for its
// error paths — fixture PDFs are not worth vendoring.

use std::fs;
use std::path::Path;

use papermine::corpus::{self, clean};
use papermine::topics::dtm::DocTermMatrix;
use papermine::topics::export;
use papermine::topics::lda::LdaParams;
use papermine::topics::search::{select_k, sweep, SweepConfig};

fn write_raw_corpus(dir: &Path) {
    // Two loose "domains" with boilerplate the cleaner should strip.
    let papers = [
        (
            "neuro_01.txt",
            "Abstract. The neurons and synapses of the cortex were measured \
             in 42 trials (see https://example.org/data and [3, 4]). Neurons \
             fired; synapses strengthened across the cortex.",
        ),
        (
            "neuro_02.txt",
            "Introduction: cortical neurons form synapses. The dendrites of \
             these neurons reach the cortex. Figure 2 shows dendrites.",
        ),
        (
            "ml_01.txt",
            "We trained the tensors with gradient descent, 100 epochs. The \
             optimizer reduced gradients; tensors converged (Table 1).",
        ),
        (
            "ml_02.txt",
            "Each epoch, the optimizer updates tensors using gradients. \
             Gradient noise shrank per epoch; the optimizer converged.",
        ),
        ("junk.txt", "12 34 56 !!! ??? 2021 2022"),
    ];
    for (name, body) in papers {
        fs::write(dir.join(name), body).unwrap();
    }
}

#[test]
fn clean_stage_drops_noise_only_documents() {
    let raw = tempfile::tempdir().unwrap();
    let cleaned = tempfile::tempdir().unwrap();
    write_raw_corpus(raw.path());

    let kept = clean::clean_corpus(raw.path(), cleaned.path(), None).unwrap();
    assert_eq!(kept, 4, "junk.txt should clean to nothing and be dropped");
    assert!(!cleaned.path().join("junk.txt").exists());
    assert!(cleaned.path().join("neuro_01.txt").exists());

    // Cleaned bodies are lowercase token strings with no digits
    let body = fs::read_to_string(cleaned.path().join("ml_01.txt")).unwrap();
    assert!(!body.chars().any(|c| c.is_ascii_digit()), "got: {body}");
    assert!(!body.chars().any(|c| c.is_uppercase()), "got: {body}");
}

#[test]
fn missing_stopword_file_degrades_instead_of_failing() {
    let raw = tempfile::tempdir().unwrap();
    let cleaned = tempfile::tempdir().unwrap();
    write_raw_corpus(raw.path());

    let kept = clean::clean_corpus(
        raw.path(),
        cleaned.path(),
        Some(Path::new("/nonexistent/extra-stopwords.txt")),
    )
    .unwrap();
    assert_eq!(kept, 4);
}

#[test]
fn extra_stopword_file_removes_its_tokens() {
    let raw = tempfile::tempdir().unwrap();
    let cleaned = tempfile::tempdir().unwrap();
    write_raw_corpus(raw.path());

    let extra = raw.path().join("extra.stopwords");
    // Stemmed forms: the cleaner checks the stopword set after stemming too.
    fs::write(&extra, "neuron neurons").unwrap();

    clean::clean_corpus(raw.path(), cleaned.path(), Some(&extra)).unwrap();
    let body = fs::read_to_string(cleaned.path().join("neuro_01.txt")).unwrap();
    assert!(!body.contains("neuron"), "got: {body}");
}

#[test]
fn empty_corpus_directory_is_fatal_before_any_matrix_work() {
    let empty = tempfile::tempdir().unwrap();
    let err = corpus::load_documents(empty.path()).unwrap_err().to_string();
    assert!(
        err.contains(&empty.path().display().to_string()),
        "error should name the directory, got: {err}"
    );
}

#[test]
fn full_chain_from_raw_text_to_exported_artifact() {
    let raw = tempfile::tempdir().unwrap();
    let cleaned = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_raw_corpus(raw.path());

    clean::clean_corpus(raw.path(), cleaned.path(), None).unwrap();
    let documents = corpus::load_documents(cleaned.path()).unwrap();
    let dtm = DocTermMatrix::build(&documents).unwrap();

    let config = SweepConfig {
        k_min: 2,
        k_max: 4,
        iterations: 20,
        seed: 42,
        ..SweepConfig::default()
    };
    let scores = sweep(&dtm, &config);
    assert_eq!(scores.len(), 3);
    let selected = select_k(&scores).unwrap();
    assert!((2..=4).contains(&selected));

    let payload = export::final_model(&dtm, selected, 50, LdaParams::default(), 42, 30).unwrap();
    let artifact = out.path().join("topic-model");
    export::write_artifact(&payload, &artifact).unwrap();

    assert!(artifact.join("topics.json").is_file());
    assert!(artifact.join("index.html").is_file());

    // The exported doc set matches the DTM's surviving documents
    assert_eq!(payload.theta.len(), dtm.doc_ids.len());
}
