use super::*;
use anyhow::Result;

fn text_table() -> DataFrame {
    df!(
        "name" => ["Alice", "Bob", "Cara"],
        "math" => [" 90", "abc", "70 "],
        "notes" => ["x", "y", "z"]
    )
    .unwrap()
}

#[test]
fn test_numeric_columns_default_to_all() -> Result<()> {
    let classified = classify(scores().table, None)?;
    assert_eq!(classified.selection.names(), ["math", "science"]);
    assert!(classified.notices.is_empty());
    Ok(())
}

#[test]
fn test_selection_is_narrowed_to_numeric_columns() -> Result<()> {
    let requested = ["science".to_owned(), "name".to_owned(), "art".to_owned()];
    let classified = classify(scores().table, Some(requested.as_slice()))?;

    assert_eq!(classified.selection.names(), ["science"]);
    assert_eq!(
        classified.notices,
        vec![
            Notice::ColumnExcluded {
                column: "name".to_owned(),
                reason: "it is not numeric".to_owned(),
            },
            Notice::ColumnExcluded {
                column: "art".to_owned(),
                reason: "no such column".to_owned(),
            },
        ]
    );
    Ok(())
}

#[test]
fn test_no_numeric_columns_starts_manual_selection() -> Result<()> {
    let classified = classify(text_table(), None)?;
    assert!(classified.numeric_columns.is_empty());
    assert!(classified.selection.is_empty());
    assert_eq!(
        classified.notices,
        vec![Notice::NoNumericColumns, Notice::EmptySelection]
    );
    Ok(())
}

#[test]
fn test_coercion_nulls_unparsable_cells() -> Result<()> {
    let requested = ["math".to_owned()];
    let classified = classify(text_table(), Some(requested.as_slice()))?;

    assert_eq!(classified.selection.names(), ["math"]);
    assert_eq!(classified.notices, vec![Notice::NoNumericColumns]);
    let math: Vec<Option<f64>> = classified
        .table
        .column("math")?
        .f64()?
        .into_iter()
        .collect();
    assert_eq!(math, [Some(90.0), None, Some(70.0)]);
    // Untouched columns keep their text.
    assert_eq!(classified.table.column("notes")?.dtype(), &DataType::String);
    Ok(())
}

#[test]
fn test_all_null_coerced_column_is_excluded() -> Result<()> {
    let requested = ["notes".to_owned(), "math".to_owned()];
    let classified = classify(text_table(), Some(requested.as_slice()))?;

    assert_eq!(classified.selection.names(), ["math"]);
    assert!(classified.notices.contains(&Notice::ColumnExcluded {
        column: "notes".to_owned(),
        reason: "no value could be converted to a number".to_owned(),
    }));
    assert_eq!(classified.table.column("notes")?.dtype(), &DataType::String);
    Ok(())
}
