// Coherence-driven topic-count search.
//
// A strictly sequential sweep over candidate topic counts: fit, score,
// record, next. One RNG is seeded at the start and threaded through every
// candidate fit — re-seeding per candidate would change which k wins, and
// the single-seed behavior is the reproducibility contract of the sweep.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::coherence::model_coherence;
use super::dtm::DocTermMatrix;
use super::lda::{LdaModel, LdaParams};

/// Sweep parameters. Defaults mirror the pipeline configuration surface.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Inclusive candidate range and step.
    pub k_min: usize,
    pub k_max: usize,
    pub k_step: usize,
    /// Gibbs iterations per candidate fit — cheap scoring fits, not the
    /// authoritative final training run.
    pub iterations: usize,
    pub seed: u64,
    pub params: LdaParams,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            k_min: 2,
            k_max: 15,
            k_step: 1,
            iterations: 50,
            seed: 42,
            params: LdaParams::default(),
        }
    }
}

/// One sweep entry. A failed or information-free candidate keeps its slot
/// in the sequence as an explicit gap — never a numeric sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub k: usize,
    pub coherence: Option<f64>,
}

/// Candidate ks in ascending order.
pub fn candidate_range(config: &SweepConfig) -> Vec<usize> {
    (config.k_min..=config.k_max)
        .step_by(config.k_step)
        .collect()
}

/// Fit and score every candidate topic count, in ascending order.
///
/// A candidate whose fit fails is recorded as a gap and the sweep moves on;
/// the returned sequence always has one entry per candidate k.
pub fn sweep(dtm: &DocTermMatrix, config: &SweepConfig) -> Vec<CandidateScore> {
    let candidates = candidate_range(config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut scores = Vec::with_capacity(candidates.len());

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Sweep [{bar:30}] {pos}/{len} k={msg}")
            .unwrap(),
    );

    for k in candidates {
        pb.set_message(k.to_string());
        let coherence = match LdaModel::fit(dtm, k, config.iterations, config.params, &mut rng) {
            Ok(model) => {
                let score = model_coherence(&model, dtm);
                if score.is_none() {
                    warn!(k, "All topics undefined at this count, recording a gap");
                }
                score
                // The candidate model drops here; only its score survives.
            }
            Err(e) => {
                warn!(k, error = %e, "Candidate fit failed, recording a gap");
                None
            }
        };
        scores.push(CandidateScore { k, coherence });
        pb.inc(1);
    }
    pb.finish_and_clear();

    scores
}

/// Select the candidate with the strictly maximum coherence; ties resolve
/// to the smallest such k. Fails when no candidate produced a score.
pub fn select_k(scores: &[CandidateScore]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for candidate in scores {
        if let Some(score) = candidate.coherence {
            let improves = match best {
                None => true,
                // Strict comparison keeps the first (smallest) k on ties.
                Some((_, best_score)) => score > best_score,
            };
            if improves {
                best = Some((candidate.k, score));
            }
        }
    }

    match best {
        Some((k, score)) => {
            info!(k, score, "Selected topic count");
            Ok(k)
        }
        None => anyhow::bail!(
            "no valid topic count found: all {} sweep candidates failed to produce a score",
            scores.len()
        ),
    }
}
