use super::*;
use crate::error::StatboardError;
use anyhow::Result;

#[test]
fn test_ingest_parses_header_and_rows() -> Result<()> {
    let upload = ingest(b"a,b\n1,x\n2,y\n", "data.csv")?;
    assert_eq!(upload.file_name, "data.csv");
    assert_eq!(upload.table.get_column_names_str(), ["a", "b"]);
    assert_eq!(upload.table.height(), 2);
    Ok(())
}

#[test]
fn test_ingest_rejects_empty_and_binary_buffers() {
    let cases: [&[u8]; 3] = [b"", b"  \n\n", &[0xff, 0xfe, 0x00, 0x41]];
    for bytes in cases {
        match ingest(bytes, "bad.csv") {
            Err(StatboardError::Parse { file_name, .. }) => assert_eq!(file_name, "bad.csv"),
            other => panic!("expected a parse failure, got {other:?}"),
        }
    }
}

#[test]
fn test_ingest_reports_ragged_rows() {
    let result = ingest(b"a,b\n1,2,3,4\n", "ragged.csv");
    assert!(matches!(result, Err(StatboardError::Parse { .. })));
}

#[test]
fn test_late_text_cell_keeps_column_as_text() -> Result<()> {
    let mut csv = String::from("v\n");
    for i in 0..500 {
        csv.push_str(&format!("{i}\n"));
    }
    csv.push_str("n/a\n");
    let upload = ingest(csv.as_bytes(), "late.csv")?;
    assert_eq!(upload.table.height(), 501);
    assert!(numeric_columns(&upload.table).is_empty());
    Ok(())
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name("scores.csv"), "processed_scores.csv");
}

#[test]
fn test_export_all_columns_in_stored_order() -> Result<()> {
    let upload = scores();
    let sel = selection(&["science", "math"]);
    let export = export_csv(&upload.table, &sel, ExportScope::All, &upload.file_name)?;

    assert_eq!(export.file_name, "processed_scores.csv");
    assert_eq!(export.mime, "text/csv");
    let text = String::from_utf8(export.bytes)?;
    assert_eq!(text.lines().next(), Some("name,math,science"));
    assert_eq!(text.lines().count(), 4);
    Ok(())
}

#[test]
fn test_export_selection_scope_uses_selection_order() -> Result<()> {
    let upload = scores();
    let sel = selection(&["science", "math"]);
    let export = export_csv(&upload.table, &sel, ExportScope::Selection, "scores.csv")?;
    let text = String::from_utf8(export.bytes)?;
    assert_eq!(text.lines().next(), Some("science,math"));
    assert_eq!(text.lines().nth(1), Some("80,90"));
    Ok(())
}

#[test]
fn test_export_is_idempotent_and_round_trips() -> Result<()> {
    let upload = scores();
    let sel = selection(&["math", "science"]);
    let first = export_csv(&upload.table, &sel, ExportScope::All, "scores.csv")?;
    let second = export_csv(&upload.table, &sel, ExportScope::All, "scores.csv")?;
    assert_eq!(first.bytes, second.bytes);

    let reparsed = ingest(&first.bytes, "processed_scores.csv")?;
    assert_eq!(reparsed.table.get_column_names(), upload.table.get_column_names());
    assert!(reparsed.table.equals_missing(&upload.table));
    Ok(())
}

#[test]
fn test_export_buffer_writes_to_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let upload = scores();
    let export = export_csv(&upload.table, &selection(&["math"]), ExportScope::All, "scores.csv")?;
    let path = export.write_to(dir.path())?;
    assert_eq!(path, dir.path().join("processed_scores.csv"));
    assert_eq!(std::fs::read(path)?, export.bytes);
    Ok(())
}
