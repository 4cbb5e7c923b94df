use super::types::{ColumnSelection, EXPORT_MIME, EXPORT_PREFIX, ExportBuffer, ExportScope, Upload};
use crate::error::{Result, ResultExt as _, StatboardError};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Parses an uploaded CSV buffer into a table.
///
/// Either the whole buffer parses or nothing is returned: invalid UTF-8, an
/// empty buffer and any reader error all come back as
/// [`StatboardError::Parse`] naming `file_name`.
pub fn ingest(bytes: &[u8], file_name: &str) -> Result<Upload> {
    if let Err(e) = std::str::from_utf8(bytes) {
        return Err(StatboardError::parse(file_name, format!("not valid UTF-8 ({e})")));
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(StatboardError::parse(file_name, "the file is empty"));
    }

    // Scan every row for the schema so a late text cell cannot fail the read
    // after part of the table was built.
    let table = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| StatboardError::parse(file_name, e))?;

    if table.width() == 0 {
        return Err(StatboardError::parse(file_name, "no columns found"));
    }

    tracing::info!(
        file_name,
        rows = table.height(),
        columns = table.width(),
        "Ingested upload"
    );

    Ok(Upload {
        file_name: file_name.to_owned(),
        table,
    })
}

/// Reads `path` from disk and ingests it under its file name.
pub fn ingest_file(path: &Path) -> Result<Upload> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.csv")
        .to_owned();
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    ingest(&bytes, &file_name)
}

/// Name of the processed download for an uploaded file.
pub fn export_file_name(original: &str) -> String {
    format!("{EXPORT_PREFIX}{original}")
}

/// Serializes `table` to CSV: header row, data rows, no index column.
///
/// Output only depends on the table, so exporting the same table twice
/// gives identical bytes.
pub fn export_csv(
    table: &DataFrame,
    selection: &ColumnSelection,
    scope: ExportScope,
    original_name: &str,
) -> Result<ExportBuffer> {
    let mut out = match scope {
        ExportScope::All => table.clone(),
        ExportScope::Selection => table
            .clone()
            .lazy()
            .select(selection.iter().map(|name| col(name.as_str())).collect::<Vec<_>>())
            .collect()?,
    };

    let mut bytes = Vec::new();
    CsvWriter::new(&mut bytes)
        .include_header(true)
        .finish(&mut out)
        .map_err(|e| StatboardError::DataProcessing(format!("Failed to write CSV: {e}")))?;

    Ok(ExportBuffer {
        file_name: export_file_name(original_name),
        mime: EXPORT_MIME,
        bytes,
    })
}
