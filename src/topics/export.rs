// Final model fit and artifact export.
//
// The sweep's models are throwaway scoring fits; the exported model is
// refit from scratch at the selected k with the authoritative iteration
// count and a fresh generator from the configured seed. The artifact is a
// browser-ready directory: topics.json carrying the five aligned arrays
// (plus the relevance parameter R) and a self-contained index.html that
// embeds the payload and renders it from file:// with no server.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::dtm::DocTermMatrix;
use super::lda::{LdaModel, LdaParams};

/// The payload consumed by the interactive topic viewer. All five arrays
/// are mutually index-aligned on vocabulary order and document order.
#[derive(Debug, Serialize, Deserialize)]
pub struct VisPayload {
    /// Selected topic count, for display.
    pub k: usize,
    /// Term-by-topic distribution: k rows, each summing to 1 over vocab.
    pub phi: Vec<Vec<f64>>,
    /// Document-by-topic distribution: one row per document, summing to 1.
    pub theta: Vec<Vec<f64>>,
    /// Total token count per document, row-aligned with theta.
    pub doc_lengths: Vec<usize>,
    /// Vocabulary, column-aligned with phi.
    pub vocab: Vec<String>,
    /// Corpus-wide occurrence totals, aligned with vocab.
    pub term_frequency: Vec<u64>,
    /// Relevance neighborhood size for term ranking in the viewer.
    #[serde(rename = "R")]
    pub r: usize,
}

/// Refit at the selected k and assemble the aligned export payload.
pub fn final_model(
    dtm: &DocTermMatrix,
    k: usize,
    iterations: usize,
    params: LdaParams,
    seed: u64,
    relevance_r: usize,
) -> Result<VisPayload> {
    let mut rng = StdRng::seed_from_u64(seed);
    let model = LdaModel::fit(dtm, k, iterations, params, &mut rng)?;

    let payload = VisPayload {
        k,
        phi: model.phi(),
        theta: model.theta(),
        doc_lengths: dtm.doc_lengths(),
        vocab: dtm.vocab.clone(),
        term_frequency: dtm.term_frequencies(),
        r: relevance_r,
    };
    info!(
        k,
        docs = payload.theta.len(),
        terms = payload.vocab.len(),
        "Final topic model fitted"
    );
    Ok(payload)
}

/// Write `topics.json` and the static viewer page into `dir`.
pub fn write_artifact(payload: &VisPayload, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create artifact directory {}", dir.display()))?;

    let json = serde_json::to_string(payload)
        .context("serialize topic model payload")?;

    let json_path = dir.join("topics.json");
    fs::write(&json_path, &json)
        .with_context(|| format!("write model payload to {}", json_path.display()))?;

    let html_path = dir.join("index.html");
    let page = VIEWER_TEMPLATE.replace("__PAYLOAD__", &json);
    fs::write(&html_path, page)
        .with_context(|| format!("write viewer page to {}", html_path.display()))?;

    info!(dir = %dir.display(), "Model artifact exported; open index.html in a browser");
    Ok(())
}

/// Minimal static viewer: per-topic term bars from phi, document mixture
/// table from theta. The placeholder is replaced with the payload JSON so
/// the page works from file:// without a server.
const VIEWER_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>papermine topic model</title>
<style>
  body { font-family: sans-serif; margin: 2rem; color: #222; }
  h2 { margin-top: 2rem; }
  .term { display: flex; align-items: center; margin: 2px 0; }
  .term span.label { width: 12rem; font-size: 0.9rem; }
  .term div.bar { background: #4a7fb5; height: 12px; }
  table { border-collapse: collapse; margin-top: 1rem; }
  td, th { border: 1px solid #ccc; padding: 4px 8px; font-size: 0.85rem; }
</style>
</head>
<body>
<h1>Topic model</h1>
<div id="topics"></div>
<h2>Document mixtures</h2>
<div id="docs"></div>
<script>
const data = __PAYLOAD__;
const topics = document.getElementById("topics");
data.phi.forEach((row, t) => {
  const ranked = row
    .map((p, w) => [p, w])
    .sort((a, b) => b[0] - a[0])
    .slice(0, Math.min(data.R, row.length));
  const h = document.createElement("h2");
  h.textContent = "Topic " + (t + 1) + " of " + data.k;
  topics.appendChild(h);
  const max = ranked[0][0];
  ranked.forEach(([p, w]) => {
    const div = document.createElement("div");
    div.className = "term";
    const label = document.createElement("span");
    label.className = "label";
    label.textContent = data.vocab[w] + " (" + data.term_frequency[w] + ")";
    const bar = document.createElement("div");
    bar.className = "bar";
    bar.style.width = (p / max * 400) + "px";
    div.appendChild(label);
    div.appendChild(bar);
    topics.appendChild(div);
  });
});
const docs = document.getElementById("docs");
const table = document.createElement("table");
const head = table.insertRow();
head.insertCell().textContent = "doc";
head.insertCell().textContent = "tokens";
for (let t = 0; t < data.k; t++) head.insertCell().textContent = "t" + (t + 1);
data.theta.forEach((row, d) => {
  const tr = table.insertRow();
  tr.insertCell().textContent = "#" + (d + 1);
  tr.insertCell().textContent = data.doc_lengths[d];
  row.forEach(p => { tr.insertCell().textContent = p.toFixed(3); });
});
docs.appendChild(table);
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn doc(id: &str, text: &str) -> Document {
        Document {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    fn fitted_payload() -> (VisPayload, DocTermMatrix) {
        let docs = vec![
            doc("a.txt", "alpha beta alpha gamma"),
            doc("b.txt", "beta gamma delta"),
            doc("c.txt", "delta alpha gamma gamma"),
        ];
        let dtm = DocTermMatrix::build(&docs).unwrap();
        let payload = final_model(&dtm, 2, 30, LdaParams::default(), 42, 30).unwrap();
        (payload, dtm)
    }

    #[test]
    fn payload_arrays_are_mutually_aligned() {
        let (payload, dtm) = fitted_payload();
        assert_eq!(payload.phi.len(), payload.k);
        assert_eq!(payload.theta.len(), dtm.doc_ids.len());
        assert_eq!(payload.doc_lengths.len(), payload.theta.len());
        assert_eq!(payload.vocab.len(), payload.term_frequency.len());
        for row in &payload.phi {
            assert_eq!(row.len(), payload.vocab.len());
        }
        for row in &payload.theta {
            assert_eq!(row.len(), payload.k);
        }
    }

    #[test]
    fn payload_rows_sum_to_one() {
        let (payload, _) = fitted_payload();
        for row in payload.phi.iter().chain(payload.theta.iter()) {
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "row sums to {sum}");
        }
    }

    #[test]
    fn relevance_parameter_serializes_as_capital_r() {
        let (payload, _) = fitted_payload();
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"R\":30"), "got: {json}");
    }

    #[test]
    fn artifact_writes_json_and_viewer() {
        let (payload, _) = fitted_payload();
        let dir = tempfile::tempdir().unwrap();
        write_artifact(&payload, dir.path()).unwrap();

        let json = std::fs::read_to_string(dir.path().join("topics.json")).unwrap();
        let parsed: VisPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.k, payload.k);

        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("\"R\":30"));
        assert!(!html.contains("__PAYLOAD__"));
    }
}
