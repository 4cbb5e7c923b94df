//! Descriptive statistics for the selected columns.
//!
//! Every column is profiled on its own non-null values, independently of the
//! other selected columns: a row missing `math` still contributes its
//! `science` value. Quantiles use linear interpolation between the closest
//! ranks and the standard deviation is the sample one (ddof = 1).

use super::types::{ColumnSelection, Notice, StatisticsRow};
use crate::error::Result;
use polars::prelude::*;

/// Statistics rows in selection order, plus a notice per empty column.
pub fn describe(
    table: &DataFrame,
    selection: &ColumnSelection,
) -> Result<(Vec<StatisticsRow>, Vec<Notice>)> {
    let mut rows = Vec::with_capacity(selection.len());
    let mut notices = Vec::new();
    for name in selection {
        let row = describe_column(table, name)?;
        if row.count == 0 {
            notices.push(Notice::EmptyColumn {
                column: name.clone(),
            });
        }
        rows.push(row);
    }
    Ok((rows, notices))
}

pub fn describe_column(table: &DataFrame, name: &str) -> Result<StatisticsRow> {
    let values = float_values(table, name)?;
    let ca = values.f64()?;

    let count = ca.len() - ca.null_count();
    if count == 0 {
        return Ok(StatisticsRow::empty(name));
    }

    let std_dev = if count > 1 {
        ca.std(1).filter(|s| s.is_finite())
    } else {
        None
    };

    Ok(StatisticsRow {
        column: name.to_owned(),
        count,
        mean: ca.mean(),
        std_dev,
        min: ca.min(),
        p25: quantile(ca, 0.25)?,
        p50: quantile(ca, 0.5)?,
        p75: quantile(ca, 0.75)?,
        max: ca.max(),
    })
}

/// The column cast to `Float64`; integer columns come out unchanged in value.
pub fn float_values(table: &DataFrame, name: &str) -> Result<Series> {
    Ok(table
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?)
}

pub fn quantile(ca: &Float64Chunked, q: f64) -> Result<Option<f64>> {
    Ok(ca.quantile(q, QuantileMethod::Linear)?)
}
