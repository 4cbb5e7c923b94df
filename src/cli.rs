use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use statboard::analyser::logic::types::{
    AggregationMode, ChartRequest, ExportScope, PipelineOutput, PipelineRequest,
};
use statboard::analyser::logic::{compute_pipeline, ingest_file};
use statboard::analyser::render::{
    ChartRenderer as _, RendererKind, TextRenderer, VegaLiteRenderer, render_report,
    write_notices,
};
use statboard::config::{AppSettings, load_app_config};
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "statboard",
    about = "Upload a CSV, get descriptive statistics and charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe the numeric columns of a CSV file and draw charts
    Analyse(AnalyseArgs),
    /// Write the processed CSV without analysing it further
    Export(ExportArgs),
}

#[derive(Args)]
pub struct AnalyseArgs {
    /// CSV file to analyse
    pub file: PathBuf,

    /// Columns to analyse. Defaults to every numeric column; when the file has
    /// none, these are converted to numbers.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Histogram of COLUMN, optionally with a bin count (COLUMN[:BINS])
    #[arg(long = "hist", value_name = "COLUMN[:BINS]", value_parser = parse_histogram)]
    pub histograms: Vec<HistogramArg>,

    /// Bar chart of COLUMN aggregated per group (COLUMN[:average|total|maximum|minimum[:GROUP]])
    #[arg(long = "bar", value_name = "COLUMN[:MODE[:GROUP]]", value_parser = parse_bar)]
    pub bars: Vec<ChartRequest>,

    /// Scatter plot of two columns (X:Y)
    #[arg(long = "scatter", value_name = "X:Y", value_parser = parse_scatter)]
    pub scatters: Vec<ChartRequest>,

    /// Box plot of COLUMN
    #[arg(long = "box", value_name = "COLUMN")]
    pub boxes: Vec<String>,

    /// Chart renderer. Defaults to the configured one.
    #[arg(long, value_enum)]
    pub renderer: Option<RendererKind>,

    /// Directory for Vega-Lite documents and the processed CSV
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write the processed CSV
    #[arg(long)]
    pub export: bool,

    /// Columns written to the processed CSV. Defaults to the configured scope.
    #[arg(long, value_enum)]
    pub scope: Option<ExportScope>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// CSV file to process
    pub file: PathBuf,

    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Output directory. Defaults to the current directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub scope: Option<ExportScope>,
}

/// `--hist` value; the bin count falls back to the configured default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramArg {
    pub column: String,
    pub bins: Option<usize>,
}

impl HistogramArg {
    fn into_request(self, default_bins: usize) -> ChartRequest {
        ChartRequest::Histogram {
            column: self.column,
            bins: self.bins.unwrap_or(default_bins),
        }
    }
}

fn non_empty(part: &str, what: &str) -> Result<String, String> {
    let part = part.trim();
    if part.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(part.to_owned())
    }
}

fn parse_histogram(value: &str) -> Result<HistogramArg, String> {
    let (column, bins) = match value.split_once(':') {
        Some((column, bins)) => {
            let bins = bins
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid bin count '{bins}': {e}"))?;
            (column, Some(bins))
        }
        None => (value, None),
    };
    Ok(HistogramArg {
        column: non_empty(column, "column name")?,
        bins,
    })
}

fn parse_bar(value: &str) -> Result<ChartRequest, String> {
    let mut parts = value.splitn(3, ':');
    let column = non_empty(parts.next().unwrap_or_default(), "column name")?;
    let mode = match parts.next().map(str::trim) {
        None | Some("") => AggregationMode::default(),
        Some(label) => AggregationMode::from_label(label).ok_or_else(|| {
            let known: Vec<_> = AggregationMode::ALL.iter().map(|m| m.label()).collect();
            format!("unknown aggregation '{label}', expected one of {}", known.join(", "))
        })?,
    };
    let group_by = parts
        .next()
        .map(|g| non_empty(g, "group column"))
        .transpose()?;
    Ok(ChartRequest::Bar {
        column,
        mode,
        group_by,
    })
}

fn parse_scatter(value: &str) -> Result<ChartRequest, String> {
    let (x, y) = value
        .split_once(':')
        .ok_or_else(|| format!("expected X:Y, got '{value}'"))?;
    Ok(ChartRequest::Scatter {
        x: non_empty(x, "x column")?,
        y: non_empty(y, "y column")?,
    })
}

pub fn run_command(command: Commands) -> Result<()> {
    let settings = load_app_config();
    match command {
        Commands::Analyse(args) => handle_analyse(args, &settings),
        Commands::Export(args) => handle_export(args, &settings),
    }
}

fn build_request(
    settings: &AppSettings,
    columns: Vec<String>,
    scope: Option<ExportScope>,
) -> PipelineRequest {
    let mut request = settings.to_request();
    if !columns.is_empty() {
        request.selection = Some(columns);
    }
    if let Some(scope) = scope {
        request.export_scope = scope;
    }
    request
}

fn run_file(file: &Path, request: &PipelineRequest) -> Result<PipelineOutput> {
    let upload = ingest_file(file).with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(compute_pipeline(&upload, request)?)
}

fn handle_analyse(args: AnalyseArgs, settings: &AppSettings) -> Result<()> {
    let AnalyseArgs {
        file,
        columns,
        histograms,
        bars,
        scatters,
        boxes,
        renderer,
        out,
        export,
        scope,
    } = args;

    let mut request = build_request(settings, columns, scope);
    request.charts = histograms
        .into_iter()
        .map(|h| h.into_request(settings.histogram_bins))
        .chain(bars)
        .chain(scatters)
        .chain(boxes.into_iter().map(|column| ChartRequest::Box { column }))
        .collect();

    let output = run_file(&file, &request)?;
    let decimals = settings.display_decimals;
    let mut stdout = std::io::stdout();

    match renderer.unwrap_or(settings.renderer) {
        RendererKind::Text => {
            let mut text = TextRenderer::new(std::io::stdout(), decimals);
            render_report(&mut stdout, &output, &mut text, decimals)?;
        }
        RendererKind::Vega => {
            let mut vega = match &out {
                Some(dir) => VegaLiteRenderer::writing_to(dir),
                None => VegaLiteRenderer::new(),
            };
            render_report(&mut stdout, &output, &mut vega, decimals)?;
            if out.is_none() {
                for (_, doc) in vega.documents() {
                    writeln!(stdout, "{}", serde_json::to_string_pretty(doc)?)?;
                }
            } else {
                println!("\nWrote {} {} chart(s).", vega.documents().len(), vega.name());
            }
        }
    }

    if export {
        write_export(&output, out.as_deref())?;
    }
    Ok(())
}

fn handle_export(args: ExportArgs, settings: &AppSettings) -> Result<()> {
    let request = build_request(settings, args.columns, args.scope);
    let output = run_file(&args.file, &request)?;
    write_notices(&mut std::io::stdout(), &output.notices)?;
    write_export(&output, args.out.as_deref())
}

fn write_export(output: &PipelineOutput, dir: Option<&Path>) -> Result<()> {
    let Some(export) = &output.export else {
        anyhow::bail!("Nothing to export: no columns were selected.");
    };
    let path = export.write_to(dir.unwrap_or_else(|| Path::new(".")))?;
    println!(
        "Saved {} ({} bytes, {}) to {}",
        export.file_name,
        export.bytes.len(),
        export.mime,
        path.display()
    );
    Ok(())
}
