use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type of every processed download.
pub const EXPORT_MIME: &str = "text/csv";

/// Prefix put in front of the uploaded file name for the processed download.
pub const EXPORT_PREFIX: &str = "processed_";

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// A parsed upload: the table plus the name it was declared under.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub table: DataFrame,
}

/// Ordered set of numeric column names chosen for analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection(Vec<String>);

impl ColumnSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::default();
        for name in names {
            selection.push(name.into());
        }
        selection
    }

    /// Appends `name` unless it is already selected.
    pub fn push(&mut self, name: String) {
        if !self.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColumnSelection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Descriptive statistics of one selected column.
///
/// `count` is the number of non-null values; every other field is `None`
/// when `count == 0`. The standard deviation is the sample one and is also
/// `None` for a single value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl StatisticsRow {
    pub fn empty(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }

    /// Copy with every value rounded to `decimals` digits, for display.
    pub fn rounded(&self, decimals: u32) -> Self {
        let round = |v: Option<f64>| v.map(|x| crate::utils::round_to(x, decimals));
        Self {
            column: self.column.clone(),
            count: self.count,
            mean: round(self.mean),
            std_dev: round(self.std_dev),
            min: round(self.min),
            p25: round(self.p25),
            p50: round(self.p50),
            p75: round(self.p75),
            max: round(self.max),
        }
    }

    /// Values in display order, paired with their column header.
    pub fn fields(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("mean", self.mean),
            ("std", self.std_dev),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Per-row mean of the selected cells, keyed by the identifier column value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub identifier: Option<String>,
    pub mean: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Name of the identifier column the rows are keyed by.
    pub identifier_column: String,
    pub rows: Vec<AggregateRow>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    #[default]
    Mean,
    Sum,
    Max,
    Min,
}

impl AggregationMode {
    pub const ALL: [Self; 4] = [Self::Mean, Self::Sum, Self::Max, Self::Min];

    /// Maps the user-facing label to a mode. Labels are a closed set, so
    /// `None` means the caller passed something it never offered.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "average" => Some(Self::Mean),
            "total" => Some(Self::Sum),
            "maximum" => Some(Self::Max),
            "minimum" => Some(Self::Min),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mean => "average",
            Self::Sum => "total",
            Self::Max => "maximum",
            Self::Min => "minimum",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Histogram,
    Bar,
    Scatter,
    Box,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Box => "box",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller wants plotted, independent of any renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRequest {
    Histogram {
        column: String,
        bins: usize,
    },
    Bar {
        column: String,
        mode: AggregationMode,
        /// Grouping column; falls back to the detected identifier column.
        group_by: Option<String>,
    },
    Scatter {
        x: String,
        y: String,
    },
    Box {
        column: String,
    },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Histogram { .. } => ChartKind::Histogram,
            Self::Bar { .. } => ChartKind::Bar,
            Self::Scatter { .. } => ChartKind::Scatter,
            Self::Box { .. } => ChartKind::Box,
        }
    }

    /// Numeric columns the chart reads from.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Histogram { column, .. } | Self::Bar { column, .. } | Self::Box { column } => {
                vec![column.as_str()]
            }
            Self::Scatter { x, y } => vec![x.as_str(), y.as_str()],
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Histogram { column, .. } => format!("Distribution of {column}"),
            Self::Bar { column, mode, .. } => format!("{column} ({mode})"),
            Self::Scatter { x, y } => format!("{y} vs {x}"),
            Self::Box { column } => format!("Spread of {column}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Bar,
    Point,
    BoxPlot,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Point => "point",
            Self::BoxPlot => "boxplot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Quantitative,
    Nominal,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantitative => "quantitative",
            Self::Nominal => "nominal",
        }
    }
}

/// One axis of an encoding: which field of the chart data it shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub field: String,
    pub title: String,
    pub kind: FieldType,
}

impl Channel {
    pub fn quantitative(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            kind: FieldType::Quantitative,
        }
    }

    pub fn nominal(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            kind: FieldType::Nominal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub mark: Mark,
    pub x: Channel,
    pub y: Option<Channel>,
    pub tooltip: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// The tabular subset a chart plots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChartValues {
    Histogram(Vec<HistogramBin>),
    Bar(Vec<BarValue>),
    Scatter(Vec<ScatterPoint>),
    Box(BoxSummary),
}

impl ChartValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Histogram(bins) => bins.len(),
            Self::Bar(bars) => bars.len(),
            Self::Scatter(points) => points.len(),
            Self::Box(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully resolved chart, ready for any [`ChartRenderer`](crate::analyser::render::ChartRenderer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Column the chart was requested for (x column for scatter plots).
    pub column: String,
    pub encoding: Encoding,
    pub values: ChartValues,
    pub width: u32,
    pub height: u32,
}

/// Result of resolving one chart request. Never blocks the other charts.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartOutcome {
    Ready(ChartSpec),
    Skipped { kind: ChartKind, notice: Notice },
}

impl ChartOutcome {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Ready(spec) => spec.kind,
            Self::Skipped { kind, .. } => *kind,
        }
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            Self::Ready(spec) => Some(spec),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Informational, non-fatal pipeline outcomes shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// No column parsed as numeric; the caller has to pick columns to coerce.
    NoNumericColumns,
    /// Nothing left to analyse after classification.
    EmptySelection,
    ColumnExcluded { column: String, reason: String },
    /// A selected column without a single non-null value.
    EmptyColumn { column: String },
    MissingChartColumn { chart: ChartKind, column: String },
    EmptyChartData { chart: ChartKind, column: String },
    InvalidChartRequest { chart: ChartKind, reason: String },
}

impl Notice {
    /// Warnings are shown highlighted; the rest is plain information.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::ColumnExcluded { .. } | Self::InvalidChartRequest { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNumericColumns => write!(
                f,
                "No numeric columns found. Choose columns to convert to numbers."
            ),
            Self::EmptySelection => write!(f, "No columns selected."),
            Self::ColumnExcluded { column, reason } => {
                write!(f, "Column '{column}' was excluded: {reason}.")
            }
            Self::EmptyColumn { column } => {
                write!(f, "Column '{column}' has no numeric values.")
            }
            Self::MissingChartColumn { chart, column } => {
                write!(f, "The {chart} chart needs a selected column ('{column}' is not).")
            }
            Self::EmptyChartData { chart, column } => {
                write!(f, "No valid data to draw the {chart} chart of '{column}'.")
            }
            Self::InvalidChartRequest { chart, reason } => {
                write!(f, "The {chart} chart request is invalid: {reason}.")
            }
        }
    }
}

/// Which columns go into the processed download.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Every column in its stored order.
    #[default]
    All,
    /// Only the selected columns, in selection order.
    Selection,
}

/// The processed download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBuffer {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportBuffer {
    /// Writes the buffer into `dir` under its file name and returns the path.
    pub fn write_to(&self, dir: &std::path::Path) -> crate::error::Result<std::path::PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Everything the caller chose for one pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineRequest {
    /// Explicit column choice. `None` selects every numeric column; when there
    /// are no numeric columns it is the list to coerce.
    pub selection: Option<Vec<String>>,
    pub charts: Vec<ChartRequest>,
    pub export_scope: ExportScope,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for PipelineRequest {
    fn default() -> Self {
        Self {
            selection: None,
            charts: Vec::new(),
            export_scope: ExportScope::All,
            chart_width: 600,
            chart_height: 400,
        }
    }
}

impl PipelineRequest {
    pub fn with_selection<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_chart(mut self, chart: ChartRequest) -> Self {
        self.charts.push(chart);
        self
    }
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub numeric_columns: Vec<String>,
    pub selection: ColumnSelection,
    /// The selected rows after dropping all-null rows; `None` on an empty selection.
    pub filtered: Option<DataFrame>,
    pub rows_dropped: usize,
    pub statistics: Vec<StatisticsRow>,
    pub aggregate: Option<Aggregate>,
    pub charts: Vec<ChartOutcome>,
    pub export: Option<ExportBuffer>,
    pub notices: Vec<Notice>,
}

impl PipelineOutput {
    /// Output of a run that stopped after classification.
    pub fn halted(numeric_columns: Vec<String>, notices: Vec<Notice>) -> Self {
        Self {
            numeric_columns,
            selection: ColumnSelection::default(),
            filtered: None,
            rows_dropped: 0,
            statistics: Vec::new(),
            aggregate: None,
            charts: Vec::new(),
            export: None,
            notices,
        }
    }

    pub fn has_notice(&self, notice: &Notice) -> bool {
        self.notices.contains(notice)
    }
}
