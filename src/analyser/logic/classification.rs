//! Column classification and numeric coercion.
//!
//! A column counts as numeric when the CSV reader inferred a numeric dtype for
//! it, i.e. every non-null cell parsed as a number. When a table has no such
//! column the caller names the columns to convert instead, and each of them is
//! coerced cell by cell: unparsable cells become null rather than failing the
//! column.

use super::types::{ColumnSelection, Notice};
use crate::error::Result;
use polars::prelude::*;

/// Classified table: the (possibly coerced) table and what to analyse in it.
#[derive(Debug)]
pub struct Classification {
    pub table: DataFrame,
    /// Numeric columns as uploaded, before any coercion.
    pub numeric_columns: Vec<String>,
    pub selection: ColumnSelection,
    pub notices: Vec<Notice>,
}

/// Names of the numeric columns in table order.
pub fn numeric_columns(table: &DataFrame) -> Vec<String> {
    table
        .get_columns()
        .iter()
        .filter(|c| c.dtype().is_primitive_numeric())
        .map(|c| c.name().to_string())
        .collect()
}

/// Resolves the caller's column choice against the table.
///
/// With numeric columns present, `requested` is narrowed to them (`None` keeps
/// them all). Without any, `requested` is the manual list to coerce.
pub fn classify(table: DataFrame, requested: Option<&[String]>) -> Result<Classification> {
    let numeric = numeric_columns(&table);
    let mut notices = Vec::new();

    if numeric.is_empty() {
        notices.push(Notice::NoNumericColumns);
        let requested = requested.unwrap_or_default();
        let (table, selection, coerce_notices) = coerce_columns(table, requested)?;
        notices.extend(coerce_notices);
        if selection.is_empty() {
            notices.push(Notice::EmptySelection);
        }
        return Ok(Classification {
            table,
            numeric_columns: numeric,
            selection,
            notices,
        });
    }

    let selection = match requested {
        None => ColumnSelection::new(numeric.iter().cloned()),
        Some(names) => {
            let mut selection = ColumnSelection::default();
            for name in names {
                if numeric.contains(name) {
                    selection.push(name.clone());
                } else {
                    let reason = if table.column(name).is_ok() {
                        "it is not numeric"
                    } else {
                        "no such column"
                    };
                    tracing::warn!(column = %name, reason, "Excluding column from selection");
                    notices.push(Notice::ColumnExcluded {
                        column: name.clone(),
                        reason: reason.to_owned(),
                    });
                }
            }
            selection
        }
    };

    if selection.is_empty() {
        notices.push(Notice::EmptySelection);
    }

    Ok(Classification {
        table,
        numeric_columns: numeric,
        selection,
        notices,
    })
}

/// Converts each requested column to `Float64`, nulling cells that do not
/// parse. Columns where no cell converts are left out of the selection.
pub fn coerce_columns(
    table: DataFrame,
    requested: &[String],
) -> Result<(DataFrame, ColumnSelection, Vec<Notice>)> {
    let mut notices = Vec::new();
    let mut present = Vec::new();
    for name in requested {
        if table.column(name).is_ok() {
            if !present.contains(name) {
                present.push(name.clone());
            }
        } else {
            notices.push(Notice::ColumnExcluded {
                column: name.clone(),
                reason: "no such column".to_owned(),
            });
        }
    }

    if present.is_empty() {
        return Ok((table, ColumnSelection::default(), notices));
    }

    let converted = table
        .clone()
        .lazy()
        .select(present.iter().map(|name| coerce_expr(name)).collect::<Vec<_>>())
        .collect()?;

    // Columns that fail entirely keep their original cells.
    let mut table = table;
    let mut selection = ColumnSelection::default();
    for name in present {
        let column = converted.column(&name)?;
        if column.len() == column.null_count() {
            tracing::warn!(column = %name, "No cell could be converted to a number");
            notices.push(Notice::ColumnExcluded {
                column: name,
                reason: "no value could be converted to a number".to_owned(),
            });
        } else {
            tracing::debug!(
                column = %name,
                converted = column.len() - column.null_count(),
                "Coerced column to numbers"
            );
            table.with_column(column.clone())?;
            selection.push(name);
        }
    }

    Ok((table, selection, notices))
}

fn coerce_expr(name: &str) -> Expr {
    col(name)
        .cast(DataType::String)
        .str()
        .strip_chars(lit(NULL))
        .cast(DataType::Float64)
        .alias(name)
}
