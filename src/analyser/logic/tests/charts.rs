use super::*;
use crate::analyser::logic::charts::{bin_values, box_summary};
use crate::analyser::logic::types::{BarValue, ChartValues};
use anyhow::Result;

const DIMS: Dimensions = Dimensions {
    width: 600,
    height: 400,
};

fn ready(outcome: ChartOutcome) -> ChartSpec {
    match outcome {
        ChartOutcome::Ready(spec) => spec,
        ChartOutcome::Skipped { notice, .. } => panic!("chart skipped: {notice}"),
    }
}

fn marks() -> DataFrame {
    df!(
        "class" => ["a", "b", "a", "b"],
        "math" => [Some(10.0), Some(20.0), Some(30.0), None],
        "science" => [Some(1.0), None, Some(3.0), Some(4.0)]
    )
    .unwrap()
}

#[test]
fn test_bins_cover_range_and_count_everything() {
    let bins = bin_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
    assert_eq!(bins.len(), 4);
    assert_eq!(bins[0].start, 0.0);
    assert_eq!(bins[3].end, 4.0);
    // The maximum lands in the last bin.
    assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), [1, 1, 1, 2]);
}

#[test]
fn test_constant_values_get_one_bin() {
    let bins = bin_values(&[5.0, 5.0, 5.0], 10);
    assert_eq!(bins.len(), 1);
    assert_eq!((bins[0].start, bins[0].end, bins[0].count), (4.5, 5.5, 3));
    assert!(bin_values(&[], 10).is_empty());
}

#[test]
fn test_zero_bins_is_invalid() -> Result<()> {
    let request = ChartRequest::Histogram {
        column: "math".to_owned(),
        bins: 0,
    };
    let outcome = resolve_chart(&marks(), &selection(&["math"]), &request, DIMS)?;
    assert!(matches!(
        outcome,
        ChartOutcome::Skipped {
            kind: ChartKind::Histogram,
            notice: Notice::InvalidChartRequest { .. }
        }
    ));
    Ok(())
}

#[test]
fn test_unselected_column_is_skipped() -> Result<()> {
    let request = ChartRequest::Scatter {
        x: "math".to_owned(),
        y: "science".to_owned(),
    };
    let outcome = resolve_chart(&marks(), &selection(&["math"]), &request, DIMS)?;
    assert_eq!(
        outcome,
        ChartOutcome::Skipped {
            kind: ChartKind::Scatter,
            notice: Notice::MissingChartColumn {
                chart: ChartKind::Scatter,
                column: "science".to_owned(),
            },
        }
    );
    Ok(())
}

#[test]
fn test_bar_modes_group_by_column() -> Result<()> {
    let sel = selection(&["math"]);
    let expected = [
        (AggregationMode::Mean, 20.0, 20.0),
        (AggregationMode::Sum, 40.0, 20.0),
        (AggregationMode::Max, 30.0, 20.0),
        (AggregationMode::Min, 10.0, 20.0),
    ];
    for (mode, a, b) in expected {
        let request = ChartRequest::Bar {
            column: "math".to_owned(),
            mode,
            group_by: Some("class".to_owned()),
        };
        let spec = ready(resolve_chart(&marks(), &sel, &request, DIMS)?);
        assert_eq!(
            spec.values,
            ChartValues::Bar(vec![
                BarValue {
                    label: "a".to_owned(),
                    value: a
                },
                BarValue {
                    label: "b".to_owned(),
                    value: b
                },
            ]),
            "{mode}"
        );
        assert_eq!(spec.encoding.x.title, "class");
    }
    Ok(())
}

#[test]
fn test_bar_without_grouping_is_one_bar() -> Result<()> {
    let request = ChartRequest::Bar {
        column: "science".to_owned(),
        mode: AggregationMode::Sum,
        group_by: None,
    };
    let spec = ready(resolve_chart(&marks(), &selection(&["science"]), &request, DIMS)?);
    assert_eq!(
        spec.values,
        ChartValues::Bar(vec![BarValue {
            label: "science".to_owned(),
            value: 8.0
        }])
    );
    assert_eq!(spec.title, "science (total)");
    Ok(())
}

#[test]
fn test_bar_with_unknown_group_is_invalid() -> Result<()> {
    let request = ChartRequest::Bar {
        column: "math".to_owned(),
        mode: AggregationMode::Mean,
        group_by: Some("house".to_owned()),
    };
    let outcome = resolve_chart(&marks(), &selection(&["math"]), &request, DIMS)?;
    assert!(matches!(
        outcome,
        ChartOutcome::Skipped {
            notice: Notice::InvalidChartRequest { .. },
            ..
        }
    ));
    Ok(())
}

#[test]
fn test_scatter_drops_rows_missing_either_axis() -> Result<()> {
    let request = ChartRequest::Scatter {
        x: "math".to_owned(),
        y: "science".to_owned(),
    };
    let spec = ready(resolve_chart(&marks(), &selection(&["math", "science"]), &request, DIMS)?);
    let ChartValues::Scatter(points) = &spec.values else {
        panic!("expected scatter values, got {:?}", spec.values);
    };
    let pairs: Vec<_> = points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(pairs, [(10.0, 1.0), (30.0, 3.0)]);
    assert!(points.iter().all(|p| p.label.is_none()));
    assert_eq!(spec.encoding.tooltip, ["x", "y"]);
    assert_eq!((spec.width, spec.height), (600, 400));
    Ok(())
}

#[test]
fn test_scatter_points_carry_identifier() -> Result<()> {
    let upload = scores();
    let request = ChartRequest::Scatter {
        x: "math".to_owned(),
        y: "science".to_owned(),
    };
    let spec = ready(resolve_chart(
        &upload.table,
        &selection(&["math", "science"]),
        &request,
        DIMS,
    )?);
    let ChartValues::Scatter(points) = &spec.values else {
        panic!("expected scatter values, got {:?}", spec.values);
    };
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].label.as_deref(), Some("Alice"));
    assert_eq!(spec.encoding.tooltip, ["label", "x", "y"]);
    Ok(())
}

#[test]
fn test_box_summary_flags_outliers() {
    let values = [1.0, 2.0, 3.0, 4.0, 100.0];
    let summary = box_summary(&values, 1.0, 2.0, 3.0, 4.0, 100.0);
    assert_eq!(summary.outliers, [100.0]);
    assert_eq!(summary.lower_whisker, 1.0);
    assert_eq!(summary.upper_whisker, 4.0);
    assert_eq!(summary.max, 100.0);
}

#[test]
fn test_empty_column_skips_every_chart_kind() -> Result<()> {
    let df = df!("empty" => [None::<f64>, None], "full" => [1.0, 2.0])?;
    let sel = selection(&["empty", "full"]);
    let requests = [
        ChartRequest::Histogram {
            column: "empty".to_owned(),
            bins: 5,
        },
        ChartRequest::Bar {
            column: "empty".to_owned(),
            mode: AggregationMode::Sum,
            group_by: None,
        },
        ChartRequest::Scatter {
            x: "empty".to_owned(),
            y: "full".to_owned(),
        },
        ChartRequest::Box {
            column: "empty".to_owned(),
        },
    ];
    let outcomes = resolve_charts(&df, &sel, &requests, DIMS)?;
    assert_eq!(outcomes.len(), 4);
    for (outcome, request) in outcomes.iter().zip(&requests) {
        assert_eq!(
            outcome,
            &ChartOutcome::Skipped {
                kind: request.kind(),
                notice: Notice::EmptyChartData {
                    chart: request.kind(),
                    column: "empty".to_owned(),
                },
            }
        );
    }
    Ok(())
}
