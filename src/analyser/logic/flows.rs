use super::aggregation::row_means;
use super::charts::{Dimensions, resolve_charts};
use super::classification::classify;
use super::cleaning::drop_all_null_rows;
use super::io::{export_csv, ingest};
use super::profiling::describe;
use super::types::{ChartOutcome, PipelineOutput, PipelineRequest, Upload};
use crate::error::Result;

/// Runs classification through export for one interaction.
///
/// Only a dataframe failure returns `Err`; every user-facing condition ends up
/// in [`PipelineOutput::notices`] or as a skipped chart. An empty selection
/// stops the run before statistics, charts and export.
pub fn compute_pipeline(upload: &Upload, request: &PipelineRequest) -> Result<PipelineOutput> {
    let classified = classify(upload.table.clone(), request.selection.as_deref())?;
    let mut notices = classified.notices;

    if classified.selection.is_empty() {
        tracing::info!(file_name = %upload.file_name, "No columns selected, stopping");
        return Ok(PipelineOutput::halted(classified.numeric_columns, notices));
    }
    let selection = classified.selection;

    let (filtered, rows_dropped) = drop_all_null_rows(&classified.table, &selection)?;

    let (statistics, stat_notices) = describe(&filtered, &selection)?;
    notices.extend(stat_notices);

    let aggregate = row_means(&filtered, &selection)?;

    let dims = Dimensions {
        width: request.chart_width,
        height: request.chart_height,
    };
    let charts = resolve_charts(&filtered, &selection, &request.charts, dims)?;
    notices.extend(charts.iter().filter_map(|outcome| match outcome {
        ChartOutcome::Skipped { notice, .. } => Some(notice.clone()),
        ChartOutcome::Ready(_) => None,
    }));

    let export = export_csv(&filtered, &selection, request.export_scope, &upload.file_name)?;

    tracing::info!(
        file_name = %upload.file_name,
        selected = selection.len(),
        rows = filtered.height(),
        rows_dropped,
        charts_ready = charts.iter().filter(|c| c.is_ready()).count(),
        "Pipeline finished"
    );

    Ok(PipelineOutput {
        numeric_columns: classified.numeric_columns,
        selection,
        filtered: Some(filtered),
        rows_dropped,
        statistics,
        aggregate,
        charts,
        export: Some(export),
        notices,
    })
}

/// Ingests an uploaded buffer and runs the pipeline on it.
pub fn run_upload(bytes: &[u8], file_name: &str, request: &PipelineRequest) -> Result<PipelineOutput> {
    let upload = ingest(bytes, file_name)?;
    compute_pipeline(&upload, request)
}
