//! Renderer bindings for resolved charts.
//!
//! The pipeline hands out [`ChartSpec`] values that do not depend on how they
//! are drawn. A [`ChartRenderer`] takes them fire-and-forget: nothing it
//! returns flows back into the pipeline. Two renderers are bound here, a
//! Vega-Lite document builder and a plain-text fallback; the desktop app
//! draws the same specs with `egui_plot`.

use crate::analyser::logic::types::{ChartOutcome, ChartSpec, PipelineOutput};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

mod text;
mod vega;

pub use text::{TextRenderer, write_aggregate, write_notices, write_statistics};
pub use vega::VegaLiteRenderer;

pub trait ChartRenderer {
    /// Short name used in logs and settings.
    fn name(&self) -> &'static str;

    fn render(&mut self, chart: &ChartSpec) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Text,
    Vega,
}

/// Writes the statistics, aggregate and notices of `output` to `out` as text,
/// then hands every ready chart to `renderer`.
pub fn render_report(
    out: &mut dyn Write,
    output: &PipelineOutput,
    renderer: &mut dyn ChartRenderer,
    decimals: u32,
) -> Result<()> {
    write_notices(out, &output.notices)?;

    if output.selection.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "\nSelected columns: {} ({} rows kept, {} dropped)",
        output.selection.names().join(", "),
        output.filtered.as_ref().map_or(0, |t| t.height()),
        output.rows_dropped
    )?;
    write_statistics(out, &output.statistics, decimals)?;

    if let Some(aggregate) = &output.aggregate {
        write_aggregate(out, aggregate, decimals)?;
    }

    for chart in output.charts.iter().filter_map(ChartOutcome::spec) {
        tracing::debug!(renderer = renderer.name(), chart = %chart.kind, "Rendering chart");
        renderer.render(chart)?;
    }
    Ok(())
}
