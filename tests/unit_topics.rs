// Unit tests for the topic-count sweep, selection, and export payload —
// the testable properties of the coherence-driven selection routine.

use papermine::corpus::Document;
use papermine::topics::dtm::DocTermMatrix;
use papermine::topics::export;
use papermine::topics::lda::LdaParams;
use papermine::topics::search::{select_k, sweep, CandidateScore, SweepConfig};

fn doc(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        text: text.to_string(),
    }
}

/// Two clearly separated term groups — enough structure for the sampler to
/// produce defined coherence scores at small k.
fn structured_corpus() -> Vec<Document> {
    vec![
        doc("neuro1.txt", "neuron synapse cortex neuron dendrite synapse"),
        doc("neuro2.txt", "cortex neuron dendrite cortex synapse"),
        doc("neuro3.txt", "dendrite neuron cortex synapse neuron"),
        doc("ml1.txt", "tensor gradient optimizer tensor epoch gradient"),
        doc("ml2.txt", "optimizer tensor epoch gradient optimizer"),
        doc("ml3.txt", "epoch gradient tensor optimizer epoch"),
    ]
}

// ============================================================
// Sweep sequence shape
// ============================================================

#[test]
fn sweep_returns_every_candidate_in_ascending_order() {
    let dtm = DocTermMatrix::build(&structured_corpus()).unwrap();
    let config = SweepConfig {
        k_min: 2,
        k_max: 7,
        iterations: 15,
        ..SweepConfig::default()
    };

    let scores = sweep(&dtm, &config);
    assert_eq!(scores.len(), 6);
    for (i, score) in scores.iter().enumerate() {
        assert_eq!(score.k, 2 + i);
    }
}

#[test]
fn selection_is_reproducible_across_reruns() {
    let dtm = DocTermMatrix::build(&structured_corpus()).unwrap();
    let config = SweepConfig {
        k_min: 2,
        k_max: 8,
        iterations: 20,
        seed: 1234,
        ..SweepConfig::default()
    };

    let first = select_k(&sweep(&dtm, &config)).unwrap();
    let second = select_k(&sweep(&dtm, &config)).unwrap();
    assert_eq!(first, second);
}

// ============================================================
// Selection semantics on synthetic score sequences
// ============================================================

#[test]
fn tie_break_selects_k4_over_k7() {
    // Identical maxima at k=4 and k=7; the first must win.
    let scores: Vec<CandidateScore> = (2..=8)
        .map(|k| CandidateScore {
            k,
            coherence: Some(if k == 4 || k == 7 { -1.0 } else { -5.0 }),
        })
        .collect();
    assert_eq!(select_k(&scores).unwrap(), 4);
}

#[test]
fn gaps_never_win_selection() {
    let scores = vec![
        CandidateScore {
            k: 2,
            coherence: None,
        },
        CandidateScore {
            k: 3,
            coherence: Some(-20.0),
        },
    ];
    assert_eq!(select_k(&scores).unwrap(), 3);
}

#[test]
fn all_failed_candidates_is_no_valid_topic_count() {
    let scores: Vec<CandidateScore> = (2..=5)
        .map(|k| CandidateScore {
            k,
            coherence: None,
        })
        .collect();
    let err = select_k(&scores).unwrap_err().to_string();
    assert!(err.contains("no valid topic count"), "got: {err}");
}

// ============================================================
// Tiny-vocabulary corpus
// ============================================================

#[test]
fn three_term_corpus_sweeps_past_vocabulary_size() {
    // Five documents of only "alpha beta gamma" with varying repetition.
    let docs = vec![
        doc("p1.txt", "alpha beta gamma"),
        doc("p2.txt", "alpha alpha beta gamma gamma"),
        doc("p3.txt", "alpha beta beta gamma"),
        doc("p4.txt", "alpha alpha alpha beta gamma"),
        doc("p5.txt", "alpha beta gamma gamma gamma"),
    ];
    let dtm = DocTermMatrix::build(&docs).unwrap();
    assert!(dtm.vocab.len() <= 3);

    let config = SweepConfig {
        k_min: 2,
        k_max: 4,
        iterations: 20,
        ..SweepConfig::default()
    };

    // k=4 exceeds the 3-term vocabulary; the sweep must complete anyway.
    let scores = sweep(&dtm, &config);
    assert_eq!(scores.len(), 3);
    select_k(&scores).unwrap();
}

// ============================================================
// Exported payload contract
// ============================================================

#[test]
fn exported_model_satisfies_the_viewer_contract() {
    let dtm = DocTermMatrix::build(&structured_corpus()).unwrap();
    let payload = export::final_model(&dtm, 2, 50, LdaParams::default(), 42, 30).unwrap();

    // Row-stochastic phi and theta
    for row in &payload.phi {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "phi row sums to {sum}");
    }
    for row in &payload.theta {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "theta row sums to {sum}");
    }

    // Mutual alignment
    assert_eq!(payload.doc_lengths.len(), payload.theta.len());
    assert_eq!(payload.vocab.len(), payload.term_frequency.len());
    assert_eq!(payload.vocab.len(), payload.phi[0].len());
    assert_eq!(payload.r, 30);
}

#[test]
fn final_fit_is_independent_of_the_sweep() {
    // Running (or skipping) the sweep must not change the final model:
    // the export refits with a fresh generator from the configured seed.
    let dtm = DocTermMatrix::build(&structured_corpus()).unwrap();

    let direct = export::final_model(&dtm, 3, 30, LdaParams::default(), 7, 30).unwrap();

    let config = SweepConfig {
        k_min: 2,
        k_max: 5,
        iterations: 10,
        seed: 7,
        ..SweepConfig::default()
    };
    let _scores = sweep(&dtm, &config);
    let after_sweep = export::final_model(&dtm, 3, 30, LdaParams::default(), 7, 30).unwrap();

    assert_eq!(direct.phi, after_sweep.phi);
    assert_eq!(direct.theta, after_sweep.theta);
}
