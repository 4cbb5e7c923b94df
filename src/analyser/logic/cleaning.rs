use super::types::ColumnSelection;
use crate::error::Result;
use polars::prelude::*;

/// Drops the rows where every selected column is null.
///
/// A row with at least one selected value is always kept, however many of
/// the other selected cells are missing. Returns the filtered table and the
/// number of rows dropped.
pub fn drop_all_null_rows(
    table: &DataFrame,
    selection: &ColumnSelection,
) -> Result<(DataFrame, usize)> {
    let Some(any_present) = any_not_null(selection) else {
        return Ok((table.clone(), 0));
    };

    let filtered = table.clone().lazy().filter(any_present).collect()?;
    let dropped = table.height() - filtered.height();
    if dropped > 0 {
        tracing::info!(dropped, kept = filtered.height(), "Dropped all-null rows");
    }
    Ok((filtered, dropped))
}

/// `true` for rows holding a value in at least one selected column.
fn any_not_null(selection: &ColumnSelection) -> Option<Expr> {
    selection
        .iter()
        .map(|name| col(name.as_str()).is_not_null())
        .reduce(|acc, e| acc.or(e))
}

/// Keeps the rows where every one of `columns` has a value.
pub fn drop_rows_with_nulls(table: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let all_present = columns
        .iter()
        .map(|&name| col(name).is_not_null())
        .reduce(|acc, e| acc.and(e));
    match all_present {
        Some(predicate) => Ok(table.clone().lazy().filter(predicate).collect()?),
        None => Ok(table.clone()),
    }
}
