pub mod aggregation;
pub mod charts;
pub mod classification;
pub mod cleaning;
pub mod flows;
pub mod io;
pub mod profiling;
pub mod types;

pub use aggregation::{IDENTIFIER_COLUMNS, detect_identifier_column, row_means};
pub use charts::{Dimensions, resolve_chart, resolve_charts};
pub use classification::{Classification, classify, coerce_columns, numeric_columns};
pub use cleaning::drop_all_null_rows;
pub use flows::{compute_pipeline, run_upload};
pub use io::{export_csv, export_file_name, ingest, ingest_file};
pub use profiling::{describe, describe_column};
pub use types::{
    Aggregate, AggregateRow, AggregationMode, ChartKind, ChartOutcome, ChartRequest, ChartSpec,
    ChartValues, ColumnSelection, ExportBuffer, ExportScope, Notice, PipelineOutput,
    PipelineRequest, StatisticsRow, Upload,
};
