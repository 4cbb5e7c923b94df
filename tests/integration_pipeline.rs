//! End-to-end runs of the analysis pipeline over the fixture files.

use statboard::analyser::logic::{
    AggregationMode, ChartKind, ChartOutcome, ChartRequest, ExportScope, Notice,
    PipelineRequest, compute_pipeline, ingest_file,
};
use statboard::analyser::render::{TextRenderer, VegaLiteRenderer, render_report};
use std::path::Path;

fn fixture(name: &str) -> anyhow::Result<statboard::analyser::logic::Upload> {
    Ok(ingest_file(&Path::new("testdata").join(name))?)
}

#[test]
fn test_scores_fixture_end_to_end() -> anyhow::Result<()> {
    let upload = fixture("scores.csv")?;
    let request = PipelineRequest::default()
        .with_chart(ChartRequest::Histogram {
            column: "math".to_owned(),
            bins: 5,
        })
        .with_chart(ChartRequest::Bar {
            column: "english".to_owned(),
            mode: AggregationMode::Max,
            group_by: None,
        })
        .with_chart(ChartRequest::Scatter {
            x: "math".to_owned(),
            y: "science".to_owned(),
        })
        .with_chart(ChartRequest::Box {
            column: "science".to_owned(),
        });
    let output = compute_pipeline(&upload, &request)?;

    assert_eq!(output.selection.names(), ["math", "science", "english"]);
    assert_eq!(output.rows_dropped, 1, "Cara has no scores");
    let counts: Vec<_> = output.statistics.iter().map(|s| s.count).collect();
    assert_eq!(counts, [3, 4, 3]);

    let aggregate = output.aggregate.as_ref().map(|a| a.rows.len());
    assert_eq!(aggregate, Some(4));

    let kinds: Vec<_> = output.charts.iter().map(ChartOutcome::kind).collect();
    assert_eq!(
        kinds,
        [ChartKind::Histogram, ChartKind::Bar, ChartKind::Scatter, ChartKind::Box]
    );
    assert!(output.charts.iter().all(ChartOutcome::is_ready));

    let export = output.export.as_ref().map(|e| e.file_name.as_str());
    assert_eq!(export, Some("processed_scores.csv"));
    Ok(())
}

#[test]
fn test_text_fixture_with_manual_columns() -> anyhow::Result<()> {
    let upload = fixture("text_only.csv")?;

    let untouched = compute_pipeline(&upload, &PipelineRequest::default())?;
    assert!(untouched.has_notice(&Notice::NoNumericColumns));
    assert!(untouched.has_notice(&Notice::EmptySelection));

    let request = PipelineRequest {
        export_scope: ExportScope::Selection,
        ..PipelineRequest::default()
    }
    .with_selection(["grade", "comment"]);
    let output = compute_pipeline(&upload, &request)?;

    assert_eq!(output.selection.names(), ["grade"]);
    assert!(output.has_notice(&Notice::ColumnExcluded {
        column: "comment".to_owned(),
        reason: "no value could be converted to a number".to_owned(),
    }));
    assert_eq!(output.statistics.first().map(|s| s.count), Some(1));
    let bytes = output.export.map(|e| e.bytes).unwrap_or_default();
    assert_eq!(String::from_utf8(bytes)?, "grade\n70.0\n");
    Ok(())
}

#[test]
fn test_text_report_without_identifier() -> anyhow::Result<()> {
    let upload = fixture("no_identifier.csv")?;
    let request = PipelineRequest::default()
        .with_selection(["reading"])
        .with_chart(ChartRequest::Box {
            column: "reading".to_owned(),
        });
    let output = compute_pipeline(&upload, &request)?;
    assert!(output.aggregate.is_none());

    let mut report = Vec::new();
    let mut charts = Vec::new();
    let mut renderer = TextRenderer::new(&mut charts, 2);
    render_report(&mut report, &output, &mut renderer, 2)?;

    let report = String::from_utf8(report)?;
    assert!(report.contains("reading"), "{report}");
    let charts = String::from_utf8(charts)?;
    assert!(charts.contains("== Spread of reading =="), "{charts}");
    Ok(())
}

#[test]
fn test_vega_documents_for_fixture() -> anyhow::Result<()> {
    let upload = fixture("scores.csv")?;
    let request = PipelineRequest::default().with_chart(ChartRequest::Scatter {
        x: "math".to_owned(),
        y: "english".to_owned(),
    });
    let output = compute_pipeline(&upload, &request)?;

    let mut renderer = VegaLiteRenderer::new();
    render_report(&mut std::io::sink(), &output, &mut renderer, 2)?;
    let [(slug, doc)] = renderer.documents() else {
        anyhow::bail!("expected one document, got {}", renderer.documents().len());
    };
    assert_eq!(slug, "scatter-english-vs-math");
    assert_eq!(doc.pointer("/mark/type").and_then(|m| m.as_str()), Some("point"));
    let points = doc
        .pointer("/data/values")
        .and_then(|v| v.as_array())
        .map(Vec::len);
    assert_eq!(points, Some(2));
    Ok(())
}
