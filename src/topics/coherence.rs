// UMass topic coherence.
//
// For a topic's ranked top terms w_1..w_M (most probable first), the UMass
// score sums ln((D(w_i, w_j) + 1) / D(w_j)) over all pairs i > j, where D
// counts documents containing a term (or both). Higher means the topic's
// top terms actually co-occur; with the +1 smoothing a pair that always
// co-occurs contributes ln((D(w_j) + 1) / D(w_j)) > 0, so fully coherent
// topics score slightly above zero.
//
// A topic with fewer than two qualifying top terms (terms with at least one
// assigned token) has no pairs to score and is undefined — it contributes
// nothing to the model average rather than dragging it toward a fake zero.

use super::dtm::DocTermMatrix;
use super::lda::LdaModel;

/// How many top terms per topic enter the coherence computation.
pub const TOP_TERMS_PER_TOPIC: usize = 10;

/// UMass coherence of a single topic, or `None` when the topic has fewer
/// than two qualifying top terms. `doc_freq` is the matrix's document
/// frequencies, computed once by the caller and shared across topics.
pub fn topic_coherence(
    model: &LdaModel,
    dtm: &DocTermMatrix,
    doc_freq: &[usize],
    topic: usize,
) -> Option<f64> {
    let top = model.top_terms(topic, TOP_TERMS_PER_TOPIC);
    if top.len() < 2 {
        return None;
    }

    let mut score = 0.0;
    for i in 1..top.len() {
        for j in 0..i {
            let d_j = doc_freq[top[j]];
            if d_j == 0 {
                continue;
            }
            let d_ij = dtm.co_doc_frequency(top[i], top[j]);
            score += ((d_ij as f64 + 1.0) / d_j as f64).ln();
        }
    }
    Some(score)
}

/// Model-level coherence: the mean over topics with a defined score.
/// `None` when every topic is undefined — a candidate that carries no
/// information and must not be eligible for selection.
pub fn model_coherence(model: &LdaModel, dtm: &DocTermMatrix) -> Option<f64> {
    let doc_freq = dtm.doc_frequencies();
    let scores: Vec<f64> = (0..model.k)
        .filter_map(|t| topic_coherence(model, dtm, &doc_freq, t))
        .collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
