// Chart rendering — raster outputs at a fixed 1000x800 canvas.
//
// Three renderers: the coherence-vs-k line chart for the topic sweep, the
// top-N frequency bar chart, and a deterministic row-layout word cloud for
// the TF-IDF ranking. Failed sweep candidates appear on the coherence
// chart as gaps (no point, broken line), never as a numeric sentinel.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::topics::search::CandidateScore;

/// Canvas dimensions for every rendered chart (px).
pub const PLOT_WIDTH: u32 = 1000;
pub const PLOT_HEIGHT: u32 = 800;

/// Render the (k, coherence) sequence as a line+point chart.
///
/// Points are drawn only for defined scores; line segments connect
/// consecutive defined candidates, so a failed candidate breaks the line.
pub fn coherence_plot(scores: &[CandidateScore], path: &Path) -> Result<()> {
    let defined: Vec<(i32, f64)> = scores
        .iter()
        .filter_map(|s| s.coherence.map(|c| (s.k as i32, c)))
        .collect();
    if defined.is_empty() {
        anyhow::bail!("nothing to plot: no sweep candidate produced a coherence score");
    }

    let k_lo = scores.first().map(|s| s.k as i32).unwrap_or(0) - 1;
    let k_hi = scores.last().map(|s| s.k as i32).unwrap_or(0) + 1;
    let y_lo = defined.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min);
    let y_hi = defined
        .iter()
        .map(|(_, c)| *c)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_hi - y_lo) * 0.1).max(0.5);

    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Topic coherence by topic count", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(k_lo..k_hi, (y_lo - pad)..(y_hi + pad))?;

    chart
        .configure_mesh()
        .x_desc("topic count k")
        .y_desc("mean UMass coherence")
        .draw()?;

    // Contiguous runs of defined candidates become line segments.
    let mut run: Vec<(i32, f64)> = Vec::new();
    let mut runs: Vec<Vec<(i32, f64)>> = Vec::new();
    for score in scores {
        match score.coherence {
            Some(c) => run.push((score.k as i32, c)),
            None => {
                if run.len() > 1 {
                    runs.push(std::mem::take(&mut run));
                } else {
                    run.clear();
                }
            }
        }
    }
    if run.len() > 1 {
        runs.push(run);
    }
    for segment in runs {
        chart.draw_series(LineSeries::new(segment, &BLUE))?;
    }
    chart.draw_series(
        defined
            .iter()
            .map(|&(k, c)| Circle::new((k, c), 4, BLUE.filled())),
    )?;

    root.present()?;
    info!(chart = %path.display(), "Coherence chart written");
    Ok(())
}

/// Render the top-N most frequent terms as a vertical bar chart.
pub fn bar_chart(terms: &[(String, usize)], title: &str, path: &Path) -> Result<()> {
    if terms.is_empty() {
        anyhow::bail!("nothing to plot: the frequency ranking is empty");
    }

    let max_count = terms.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;
    let n = terms.len();

    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..n as f64, 0f64..max_count * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            terms
                .get(x.floor() as usize)
                .map(|(term, _)| term.clone())
                .unwrap_or_default()
        })
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .y_desc("occurrences")
        .draw()?;

    chart.draw_series(terms.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new(
            [(i as f64 + 0.1, 0.0), (i as f64 + 0.9, *count as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    info!(chart = %path.display(), "Frequency chart written");
    Ok(())
}

/// Render a ranked term list as a word-cloud image.
///
/// Deterministic row layout: terms in rank order, font size scaled by
/// weight, flowing left to right and wrapping. Plainer than a spiral cloud
/// but reproducible across runs, which matters more here.
pub fn word_cloud(ranked: &[(String, f32)], path: &Path) -> Result<()> {
    if ranked.is_empty() {
        anyhow::bail!("nothing to plot: the TF-IDF ranking is empty");
    }

    const MIN_FONT: f64 = 16.0;
    const MAX_FONT: f64 = 58.0;
    const MARGIN: i32 = 20;

    let w_lo = ranked.iter().map(|(_, w)| *w as f64).fold(f64::INFINITY, f64::min);
    let w_hi = ranked
        .iter()
        .map(|(_, w)| *w as f64)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = (w_hi - w_lo).max(f64::EPSILON);

    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut x = MARGIN;
    let mut y = MARGIN;
    let mut row_height = 0i32;

    for (i, (term, weight)) in ranked.iter().enumerate() {
        let size = MIN_FONT + (MAX_FONT - MIN_FONT) * ((*weight as f64 - w_lo) / span);
        // Rough glyph-box estimate; exact metrics are not worth a text
        // measurement pass for an exploratory image.
        let est_width = (size * 0.55 * term.len() as f64) as i32 + 12;
        let est_height = (size * 1.25) as i32;

        if x + est_width > PLOT_WIDTH as i32 - MARGIN {
            x = MARGIN;
            y += row_height;
            row_height = 0;
        }
        if y + est_height > PLOT_HEIGHT as i32 - MARGIN {
            // Canvas full — lower-ranked terms are the dispensable ones.
            info!(drawn = i, total = ranked.len(), "Word cloud canvas full");
            break;
        }

        let color = Palette99::pick(i);
        root.draw(&Text::new(
            term.clone(),
            (x, y),
            ("sans-serif", size).into_font().color(&color),
        ))?;

        x += est_width;
        row_height = row_height.max(est_height);
    }

    root.present()?;
    info!(chart = %path.display(), "Word cloud written");
    Ok(())
}
