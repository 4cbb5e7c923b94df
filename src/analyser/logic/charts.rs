//! Chart parameter resolution.
//!
//! Each request is resolved on its own: its columns are checked against the
//! selection, nulls are dropped for its inputs only, and the plotted subset is
//! computed. A request that ends up with nothing to draw is reported as a
//! skipped outcome and never affects the others.

use super::aggregation::detect_identifier_column;
use super::cleaning::drop_rows_with_nulls;
use super::profiling::{float_values, quantile};
use super::types::{
    AggregationMode, BarValue, BoxSummary, Channel, ChartKind, ChartOutcome, ChartRequest,
    ChartSpec, ChartValues, ColumnSelection, Encoding, HistogramBin, Mark, Notice, ScatterPoint,
};
use crate::error::{Result, StatboardError};
use polars::prelude::*;

const GROUP: &str = "__group";
const VALUE: &str = "__value";

/// Chart dimensions handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Resolves every request; one outcome per request, in request order.
pub fn resolve_charts(
    table: &DataFrame,
    selection: &ColumnSelection,
    requests: &[ChartRequest],
    dims: Dimensions,
) -> Result<Vec<ChartOutcome>> {
    requests
        .iter()
        .map(|request| resolve_chart(table, selection, request, dims))
        .collect()
}

/// Resolves one request. `Err` is reserved for failures of the dataframe
/// library itself; anything about the data or the request is an outcome.
pub fn resolve_chart(
    table: &DataFrame,
    selection: &ColumnSelection,
    request: &ChartRequest,
    dims: Dimensions,
) -> Result<ChartOutcome> {
    let kind = request.kind();

    for column in request.columns() {
        if !selection.contains(column) {
            tracing::warn!(chart = %kind, column, "Chart column is not selected");
            return Ok(skipped(
                kind,
                Notice::MissingChartColumn {
                    chart: kind,
                    column: column.to_owned(),
                },
            ));
        }
    }

    let resolved = match request {
        ChartRequest::Histogram { column, bins } => histogram(table, column, *bins),
        ChartRequest::Bar {
            column,
            mode,
            group_by,
        } => bar(table, column, *mode, group_by.as_deref()),
        ChartRequest::Scatter { x, y } => scatter(table, x, y),
        ChartRequest::Box { column } => box_plot(table, column),
    };

    let (encoding, values) = match resolved {
        Ok((encoding, values)) => (encoding, values.filter(|v| !v.is_empty())),
        Err(StatboardError::InvalidRequest(reason)) => {
            tracing::warn!(chart = %kind, %reason, "Invalid chart request");
            return Ok(skipped(kind, Notice::InvalidChartRequest { chart: kind, reason }));
        }
        Err(e) => return Err(e),
    };

    let column = request.columns().first().map(|c| (*c).to_owned()).unwrap_or_default();
    let Some(values) = values else {
        tracing::warn!(chart = %kind, column = %column, "No valid data for chart");
        return Ok(skipped(kind, Notice::EmptyChartData { chart: kind, column }));
    };

    tracing::debug!(chart = %kind, column = %column, points = values.len(), "Resolved chart");
    Ok(ChartOutcome::Ready(ChartSpec {
        kind,
        title: request.title(),
        column,
        encoding,
        values,
        width: dims.width,
        height: dims.height,
    }))
}

fn skipped(kind: ChartKind, notice: Notice) -> ChartOutcome {
    ChartOutcome::Skipped { kind, notice }
}

/// Encoding plus the plotted subset; `None` when no row survived.
type Resolved = (Encoding, Option<ChartValues>);

/// Non-null values of `column` as `f64`.
fn non_null_values(table: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let series = float_values(table, column)?;
    Ok(series.f64()?.into_iter().flatten().collect())
}

fn histogram(table: &DataFrame, column: &str, bins: usize) -> Result<Resolved> {
    if bins == 0 {
        return Err(StatboardError::InvalidRequest(
            "the bin count must be at least 1".to_owned(),
        ));
    }
    let values = non_null_values(table, column)?;
    let encoding = Encoding {
        mark: Mark::Bar,
        x: Channel::quantitative("start", column),
        y: Some(Channel::quantitative("count", "Count")),
        tooltip: vec!["start".to_owned(), "end".to_owned(), "count".to_owned()],
    };
    Ok((encoding, Some(ChartValues::Histogram(bin_values(&values, bins)))))
}

/// Equal-width bins over `[min, max]`; `max` falls in the last bin.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite = || values.iter().copied().filter(|v| v.is_finite());
    let (Some(min_v), Some(max_v)) = (finite().reduce(f64::min), finite().reduce(f64::max)) else {
        return Vec::new();
    };

    if (max_v - min_v).abs() < f64::EPSILON {
        // Constant column: one bin of width 1 centred on the value.
        return vec![HistogramBin {
            start: min_v - 0.5,
            end: min_v + 0.5,
            count: finite().count(),
        }];
    }

    let bins = bins.max(1);
    let bin_width = (max_v - min_v) / bins as f64;
    let mut counts = vec![0usize; bins];
    for val in finite() {
        let idx = (((val - min_v) / bin_width).floor() as usize).min(bins - 1);
        if let Some(count) = counts.get_mut(idx) {
            *count += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min_v + i as f64 * bin_width,
            end: min_v + (i + 1) as f64 * bin_width,
            count,
        })
        .collect()
}

fn bar(
    table: &DataFrame,
    column: &str,
    mode: AggregationMode,
    group_by: Option<&str>,
) -> Result<Resolved> {
    let group = match group_by {
        Some(name) if table.column(name).is_err() => {
            return Err(StatboardError::InvalidRequest(format!(
                "no grouping column named '{name}'"
            )));
        }
        Some(name) => Some(name),
        None => detect_identifier_column(table),
    };

    let encoding = Encoding {
        mark: Mark::Bar,
        x: Channel::nominal("label", group.unwrap_or(column)),
        y: Some(Channel::quantitative("value", format!("{column} ({mode})"))),
        tooltip: vec!["label".to_owned(), "value".to_owned()],
    };

    // A sum over zero rows is 0, which must not pass for data.
    if non_null_values(table, column)?.is_empty() {
        return Ok((encoding, None));
    }

    let value = aggregate_expr(col(column).cast(DataType::Float64), mode).alias(VALUE);
    let aggregated = match group {
        Some(group) => table
            .clone()
            .lazy()
            .filter(col(column).is_not_null())
            .group_by_stable([col(group).cast(DataType::String).alias(GROUP)])
            .agg([value])
            .collect()?,
        None => table
            .clone()
            .lazy()
            .filter(col(column).is_not_null())
            .select([lit(column).alias(GROUP), value])
            .collect()?,
    };

    let labels = aggregated.column(GROUP)?.as_materialized_series();
    let values = aggregated.column(VALUE)?.as_materialized_series();
    let bars = labels
        .str()?
        .into_iter()
        .zip(values.f64()?)
        .filter_map(|(label, value)| {
            value.map(|value| BarValue {
                label: label.unwrap_or("(missing)").to_owned(),
                value,
            })
        })
        .collect();

    Ok((encoding, Some(ChartValues::Bar(bars))))
}

fn aggregate_expr(expr: Expr, mode: AggregationMode) -> Expr {
    match mode {
        AggregationMode::Mean => expr.mean(),
        AggregationMode::Sum => expr.sum(),
        AggregationMode::Max => expr.max(),
        AggregationMode::Min => expr.min(),
    }
}

fn scatter(table: &DataFrame, x: &str, y: &str) -> Result<Resolved> {
    let rows = drop_rows_with_nulls(table, &[x, y])?;
    let identifier = detect_identifier_column(&rows);

    let xs = float_values(&rows, x)?;
    let ys = float_values(&rows, y)?;
    let labels: Vec<Option<String>> = match identifier {
        Some(id) => {
            let ids = rows
                .column(id)?
                .as_materialized_series()
                .cast(&DataType::String)?;
            ids.str()?.into_iter().map(|s| s.map(str::to_owned)).collect()
        }
        None => vec![None; rows.height()],
    };

    let points = xs
        .f64()?
        .into_iter()
        .zip(ys.f64()?)
        .zip(labels)
        .filter_map(|((x, y), label)| Some(ScatterPoint { x: x?, y: y?, label }))
        .collect();

    let mut tooltip = vec!["x".to_owned(), "y".to_owned()];
    if identifier.is_some() {
        tooltip.insert(0, "label".to_owned());
    }
    let encoding = Encoding {
        mark: Mark::Point,
        x: Channel::quantitative("x", x),
        y: Some(Channel::quantitative("y", y)),
        tooltip,
    };
    Ok((encoding, Some(ChartValues::Scatter(points))))
}

fn box_plot(table: &DataFrame, column: &str) -> Result<Resolved> {
    let encoding = Encoding {
        mark: Mark::BoxPlot,
        x: Channel::nominal("column", "Column"),
        y: Some(Channel::quantitative("value", column)),
        tooltip: vec!["min".into(), "q1".into(), "median".into(), "q3".into(), "max".into()],
    };

    let series = float_values(table, column)?;
    let ca = series.f64()?;
    let (Some(min), Some(q1), Some(median), Some(q3), Some(max)) = (
        ca.min(),
        quantile(ca, 0.25)?,
        quantile(ca, 0.5)?,
        quantile(ca, 0.75)?,
        ca.max(),
    ) else {
        return Ok((encoding, None));
    };

    let values: Vec<f64> = ca.into_iter().flatten().collect();
    let summary = box_summary(&values, min, q1, median, q3, max);
    Ok((encoding, Some(ChartValues::Box(summary))))
}

/// Whiskers reach the furthest values within 1.5 IQR of the box; anything
/// beyond is an outlier.
pub fn box_summary(values: &[f64], min: f64, q1: f64, median: f64, q3: f64, max: f64) -> BoxSummary {
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside = || values.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside().reduce(f64::min).unwrap_or(min);
    let upper_whisker = inside().reduce(f64::max).unwrap_or(max);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    BoxSummary {
        min,
        q1,
        median,
        q3,
        max,
        lower_whisker,
        upper_whisker,
        outliers,
    }
}
