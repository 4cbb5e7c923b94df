use super::types::{Aggregate, AggregateRow, ColumnSelection};
use crate::error::Result;
use polars::prelude::*;

/// Column names that identify a row, in priority order. Matching is exact
/// and case-sensitive.
pub const IDENTIFIER_COLUMNS: [&str; 7] = [
    "name",
    "Name",
    "NAME",
    "student",
    "Student",
    "student_name",
    "이름",
];

const ROW_MEAN: &str = "__row_mean";

/// First entry of [`IDENTIFIER_COLUMNS`] present in the table.
pub fn detect_identifier_column(table: &DataFrame) -> Option<&'static str> {
    IDENTIFIER_COLUMNS
        .iter()
        .copied()
        .find(|name| table.column(name).is_ok())
}

/// Per-row mean of the selected cells, keyed by the identifier column.
///
/// Returns `None` when the table has no identifier column. Nulls are skipped
/// in each row; a row with no selected value gets a `None` mean and is still
/// listed.
pub fn row_means(table: &DataFrame, selection: &ColumnSelection) -> Result<Option<Aggregate>> {
    let Some(identifier) = detect_identifier_column(table) else {
        return Ok(None);
    };
    if selection.is_empty() {
        return Ok(None);
    }

    let computed = table
        .clone()
        .lazy()
        .select([
            col(identifier).cast(DataType::String),
            row_mean_expr(selection).alias(ROW_MEAN),
        ])
        .collect()?;

    let ids = computed.column(identifier)?.as_materialized_series();
    let means = computed.column(ROW_MEAN)?.as_materialized_series();
    let rows = ids
        .str()?
        .into_iter()
        .zip(means.f64()?)
        .map(|(id, mean)| AggregateRow {
            identifier: id.map(str::to_owned),
            mean,
        })
        .collect();

    Ok(Some(Aggregate {
        identifier_column: identifier.to_owned(),
        rows,
    }))
}

/// Sum of the non-null cells over their count, null when the count is zero.
fn row_mean_expr(selection: &ColumnSelection) -> Expr {
    let mut sum = lit(0.0);
    let mut present = lit(0.0);
    for name in selection {
        let value = col(name.as_str()).cast(DataType::Float64);
        sum = sum + value.clone().fill_null(lit(0.0));
        present = present + value.is_not_null().cast(DataType::Float64);
    }
    when(present.clone().gt(lit(0.0)))
        .then(sum / present)
        .otherwise(lit(NULL))
}
