// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// The sampler consumes the document-term matrix as per-document token
// streams and keeps the three count tables the update rule needs:
//
//   ndk[d][t]  tokens of document d assigned to topic t
//   nkw[t][w]  occurrences of term w assigned to topic t
//   nk[t]      total tokens assigned to topic t
//
// The RNG is supplied by the caller: the coherence sweep threads one seeded
// generator through every candidate fit, while the final fit gets a fresh
// generator from the configured seed.

use anyhow::Result;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::dtm::DocTermMatrix;

/// Dirichlet concentration priors.
#[derive(Debug, Clone, Copy)]
pub struct LdaParams {
    /// Document-topic concentration.
    pub alpha: f64,
    /// Topic-word concentration.
    pub beta: f64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 0.01,
        }
    }
}

/// A fitted topic model at a fixed topic count.
pub struct LdaModel {
    pub k: usize,
    params: LdaParams,
    vocab_size: usize,
    /// Per-document token streams as column indices into the DTM vocab.
    docs: Vec<Vec<usize>>,
    /// Current topic assignment per token position.
    z: Vec<Vec<usize>>,
    ndk: Vec<Vec<usize>>,
    nkw: Vec<Vec<usize>>,
    nk: Vec<usize>,
    doc_lengths: Vec<usize>,
}

impl LdaModel {
    /// Fit a model with `k` topics over `iterations` Gibbs sweeps.
    ///
    /// `k` may exceed the vocabulary size: surplus topics simply end up
    /// with no tokens assigned and carry no information. Fails on a
    /// degenerate request (zero topics, empty token stream).
    pub fn fit(
        dtm: &DocTermMatrix,
        k: usize,
        iterations: usize,
        params: LdaParams,
        rng: &mut StdRng,
    ) -> Result<Self> {
        if k == 0 {
            anyhow::bail!("cannot fit a topic model with zero topics");
        }
        let total_tokens = dtm.total_tokens();
        if total_tokens == 0 {
            anyhow::bail!("cannot fit a topic model over an empty token stream");
        }

        // Expand count rows into token streams; repetition order within a
        // document is irrelevant to the collapsed sampler.
        let docs: Vec<Vec<usize>> = dtm
            .counts
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .flat_map(|(col, &count)| std::iter::repeat(col).take(count as usize))
                    .collect()
            })
            .collect();

        let v = dtm.vocab.len();
        let d = docs.len();
        let mut ndk = vec![vec![0usize; k]; d];
        let mut nkw = vec![vec![0usize; v]; k];
        let mut nk = vec![0usize; k];
        let mut z: Vec<Vec<usize>> = Vec::with_capacity(d);
        let doc_lengths: Vec<usize> = docs.iter().map(|doc| doc.len()).collect();

        // Random initialization of topic assignments.
        for (di, doc) in docs.iter().enumerate() {
            let mut assignments = vec![0usize; doc.len()];
            for (pi, &w) in doc.iter().enumerate() {
                let topic = rng.gen_range(0..k);
                assignments[pi] = topic;
                ndk[di][topic] += 1;
                nkw[topic][w] += 1;
                nk[topic] += 1;
            }
            z.push(assignments);
        }

        let mut model = Self {
            k,
            params,
            vocab_size: v,
            docs,
            z,
            ndk,
            nkw,
            nk,
            doc_lengths,
        };
        model.gibbs(iterations, rng);
        Ok(model)
    }

    /// Run `iterations` full passes of collapsed Gibbs sampling.
    fn gibbs(&mut self, iterations: usize, rng: &mut StdRng) {
        let vb = self.vocab_size as f64 * self.params.beta;
        let mut weights = vec![0.0f64; self.k];

        for it in 0..iterations {
            for di in 0..self.docs.len() {
                for pi in 0..self.docs[di].len() {
                    let w = self.docs[di][pi];
                    let old_t = self.z[di][pi];

                    self.ndk[di][old_t] -= 1;
                    self.nkw[old_t][w] -= 1;
                    self.nk[old_t] -= 1;

                    // p(t) ∝ (ndk[d][t] + α) · (nkw[t][w] + β) / (nk[t] + Vβ)
                    for t in 0..self.k {
                        let left = self.ndk[di][t] as f64 + self.params.alpha;
                        let right =
                            (self.nkw[t][w] as f64 + self.params.beta) / (self.nk[t] as f64 + vb);
                        weights[t] = left * right;
                    }

                    let sum: f64 = weights.iter().sum();
                    let new_t = if sum <= f64::EPSILON {
                        // All-zero weights cannot happen with positive priors,
                        // but a uniform draw is the safe fallback.
                        rng.gen_range(0..self.k)
                    } else {
                        match WeightedIndex::new(&weights) {
                            Ok(wi) => wi.sample(rng),
                            Err(_) => rng.gen_range(0..self.k),
                        }
                    };

                    self.z[di][pi] = new_t;
                    self.ndk[di][new_t] += 1;
                    self.nkw[new_t][w] += 1;
                    self.nk[new_t] += 1;
                }
            }

            if (it + 1) % 50 == 0 {
                debug!(iteration = it + 1, total = iterations, k = self.k, "Gibbs sweep");
            }
        }
    }

    /// Term-by-topic distribution φ: one row per topic, each a probability
    /// distribution over the vocabulary.
    /// φ[t][w] = (nkw[t][w] + β) / (nk[t] + Vβ)
    pub fn phi(&self) -> Vec<Vec<f64>> {
        let vb = self.vocab_size as f64 * self.params.beta;
        (0..self.k)
            .map(|t| {
                let denom = self.nk[t] as f64 + vb;
                (0..self.vocab_size)
                    .map(|w| (self.nkw[t][w] as f64 + self.params.beta) / denom)
                    .collect()
            })
            .collect()
    }

    /// Document-by-topic distribution θ: one row per document, each a
    /// probability distribution over topics.
    /// θ[d][t] = (ndk[d][t] + α) / (N_d + Kα)
    pub fn theta(&self) -> Vec<Vec<f64>> {
        let ka = self.k as f64 * self.params.alpha;
        (0..self.docs.len())
            .map(|d| {
                let denom = self.doc_lengths[d] as f64 + ka;
                (0..self.k)
                    .map(|t| (self.ndk[d][t] as f64 + self.params.alpha) / denom)
                    .collect()
            })
            .collect()
    }

    /// Top `n` vocabulary column indices for a topic, ranked by φ,
    /// restricted to terms with at least one assigned token.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<usize> {
        let phi = self.phi();
        let mut ranked: Vec<usize> = (0..self.vocab_size)
            .filter(|&w| self.nkw[topic][w] > 0)
            .collect();
        ranked.sort_by(|&a, &b| phi[topic][b].total_cmp(&phi[topic][a]));
        ranked.truncate(n);
        ranked
    }
}
