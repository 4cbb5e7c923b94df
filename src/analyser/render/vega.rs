use super::ChartRenderer;
use crate::analyser::logic::types::{Channel, ChartSpec, ChartValues, Encoding};
use crate::error::{Result, ResultExt as _};
use crate::utils::slugify;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Builds one Vega-Lite document per chart.
///
/// Documents are kept in memory and, when an output directory is set, also
/// written as `<dir>/<title-slug>.vl.json`.
#[derive(Default)]
pub struct VegaLiteRenderer {
    out_dir: Option<PathBuf>,
    documents: Vec<(String, Value)>,
}

impl VegaLiteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writing_to(dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: Some(dir.into()),
            documents: Vec::new(),
        }
    }

    /// Rendered documents keyed by their file-name slug.
    pub fn documents(&self) -> &[(String, Value)] {
        &self.documents
    }

    fn write(&self, dir: &Path, slug: &str, doc: &Value) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{slug}.vl.json"));
        std::fs::write(&path, serde_json::to_string_pretty(doc)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl ChartRenderer for VegaLiteRenderer {
    fn name(&self) -> &'static str {
        "vega"
    }

    fn render(&mut self, chart: &ChartSpec) -> Result<()> {
        let doc = document(chart);
        let slug = format!("{}-{}", chart.kind, slugify(&chart.title));
        if let Some(dir) = &self.out_dir {
            let path = self.write(dir, &slug, &doc)?;
            tracing::info!(path = %path.display(), "Wrote Vega-Lite chart");
        }
        self.documents.push((slug, doc));
        Ok(())
    }
}

/// The Vega-Lite document for one chart.
pub fn document(chart: &ChartSpec) -> Value {
    let mut doc = match &chart.values {
        ChartValues::Histogram(bins) => json!({
            "data": { "values": bins },
            "mark": { "type": chart.encoding.mark.as_str(), "tooltip": true },
            "encoding": {
                "x": {
                    "field": "start",
                    "bin": { "binned": true },
                    "type": "quantitative",
                    "title": chart.encoding.x.title,
                },
                "x2": { "field": "end" },
                "y": y_channel(&chart.encoding),
                "tooltip": tooltip(&chart.encoding),
            },
        }),
        ChartValues::Bar(bars) => json!({
            "data": { "values": bars },
            "mark": { "type": chart.encoding.mark.as_str(), "tooltip": true },
            "encoding": {
                "x": unsorted(channel(&chart.encoding.x)),
                "y": y_channel(&chart.encoding),
                "tooltip": tooltip(&chart.encoding),
            },
        }),
        ChartValues::Scatter(points) => json!({
            "data": { "values": points },
            "mark": { "type": chart.encoding.mark.as_str(), "tooltip": true },
            "encoding": {
                "x": channel(&chart.encoding.x),
                "y": y_channel(&chart.encoding),
                "tooltip": tooltip(&chart.encoding),
            },
        }),
        ChartValues::Box(summary) => {
            let x = json!({ "field": "column", "type": "nominal", "title": null });
            let y_title = chart
                .encoding
                .y
                .as_ref()
                .map_or(chart.column.as_str(), |c| c.title.as_str());
            let outliers: Vec<Value> = summary
                .outliers
                .iter()
                .map(|v| json!({ "column": chart.column, "value": v }))
                .collect();
            json!({
                "data": { "values": [{
                    "column": chart.column,
                    "min": summary.min,
                    "q1": summary.q1,
                    "median": summary.median,
                    "q3": summary.q3,
                    "max": summary.max,
                    "lower_whisker": summary.lower_whisker,
                    "upper_whisker": summary.upper_whisker,
                }] },
                "layer": [
                    {
                        "mark": { "type": "rule" },
                        "encoding": {
                            "x": x,
                            "y": { "field": "lower_whisker", "type": "quantitative", "title": y_title },
                            "y2": { "field": "upper_whisker" },
                        },
                    },
                    {
                        "mark": { "type": "bar", "size": 40, "tooltip": true },
                        "encoding": {
                            "x": x,
                            "y": { "field": "q1", "type": "quantitative" },
                            "y2": { "field": "q3" },
                        },
                    },
                    {
                        "mark": { "type": "tick", "color": "white", "size": 40 },
                        "encoding": {
                            "x": x,
                            "y": { "field": "median", "type": "quantitative" },
                        },
                    },
                    {
                        "data": { "values": outliers },
                        "mark": { "type": "point" },
                        "encoding": {
                            "x": x,
                            "y": { "field": "value", "type": "quantitative" },
                        },
                    },
                ],
            })
        }
    };

    if let Value::Object(map) = &mut doc {
        map.insert("$schema".to_owned(), json!(SCHEMA));
        map.insert("title".to_owned(), json!(chart.title));
        map.insert("width".to_owned(), json!(chart.width));
        map.insert("height".to_owned(), json!(chart.height));
    }
    doc
}

fn channel(c: &Channel) -> Value {
    json!({ "field": c.field, "type": c.kind.as_str(), "title": c.title })
}

/// Keeps categories in data order instead of sorting them.
fn unsorted(mut channel: Value) -> Value {
    if let Value::Object(map) = &mut channel {
        map.insert("sort".to_owned(), Value::Null);
    }
    channel
}

fn y_channel(encoding: &Encoding) -> Value {
    encoding.y.as_ref().map_or(Value::Null, channel)
}

fn tooltip(encoding: &Encoding) -> Value {
    encoding
        .tooltip
        .iter()
        .map(|field| json!({ "field": field }))
        .collect()
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;
    use crate::analyser::logic::charts::box_summary;
    use crate::analyser::logic::types::{BarValue, ChartKind, Mark};

    fn bar_chart() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: "math (average)".to_owned(),
            column: "math".to_owned(),
            encoding: Encoding {
                mark: Mark::Bar,
                x: Channel::nominal("label", "name"),
                y: Some(Channel::quantitative("value", "math (average)")),
                tooltip: vec!["label".to_owned(), "value".to_owned()],
            },
            values: ChartValues::Bar(vec![
                BarValue {
                    label: "Bob".to_owned(),
                    value: 70.0,
                },
                BarValue {
                    label: "Alice".to_owned(),
                    value: 90.0,
                },
            ]),
            width: 600,
            height: 400,
        }
    }

    #[test]
    fn test_bar_document_keeps_data_order_and_size() {
        let doc = document(&bar_chart());
        assert_eq!(doc["$schema"], SCHEMA);
        assert_eq!(doc["width"], 600);
        assert_eq!(doc["height"], 400);
        assert_eq!(doc["mark"]["type"], "bar");
        assert_eq!(doc["encoding"]["x"]["field"], "label");
        assert!(doc["encoding"]["x"]["sort"].is_null());
        assert_eq!(doc["data"]["values"][0]["label"], "Bob");
        assert_eq!(doc["encoding"]["tooltip"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_box_document_is_layered() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let mut chart = bar_chart();
        chart.kind = ChartKind::Box;
        chart.encoding.mark = Mark::BoxPlot;
        chart.values = ChartValues::Box(box_summary(&values, 1.0, 2.0, 3.0, 4.0, 100.0));

        let doc = document(&chart);
        let layers = doc["layer"].as_array().unwrap();
        assert_eq!(layers.len(), 4);
        assert_eq!(doc["data"]["values"][0]["median"], 3.0);
        assert_eq!(layers[3]["data"]["values"][0]["value"], 100.0);
    }

    #[test]
    fn test_renderer_writes_one_file_per_chart() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut renderer = VegaLiteRenderer::writing_to(dir.path());
        renderer.render(&bar_chart())?;

        assert_eq!(renderer.documents().len(), 1);
        assert_eq!(renderer.documents()[0].0, "bar-math-average");
        assert!(dir.path().join("bar-math-average.vl.json").exists());
        Ok(())
    }
}
