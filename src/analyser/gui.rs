//! The statistics dashboard.
//!
//! Every interaction re-runs [`compute_pipeline`] synchronously against the
//! ingested table; the dashboard only keeps the user's choices and the last
//! output.

use super::logic::types::{AggregationMode, ChartRequest, PipelineOutput, Upload};
use super::logic::{compute_pipeline, ingest, numeric_columns};
use crate::config::AppSettings;
use eframe::egui;
use rfd::FileDialog;
use std::path::Path;

mod controls;
mod plots;
mod summary_table;

use controls::{render_chart_controls, render_column_picker, render_notices, render_upload_bar};
use plots::render_chart;
use summary_table::{render_aggregate_table, render_statistics_table};

/// Columns and options chosen for the four chart panels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartChoices {
    pub histogram_column: Option<String>,
    pub bins: usize,
    pub bar_column: Option<String>,
    pub bar_mode: AggregationMode,
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,
    pub box_column: Option<String>,
}

impl ChartChoices {
    pub fn new(bins: usize) -> Self {
        Self {
            histogram_column: None,
            bins,
            bar_column: None,
            bar_mode: AggregationMode::default(),
            scatter_x: None,
            scatter_y: None,
            box_column: None,
        }
    }

    /// Points every chart at a selected column, keeping choices that are
    /// still selected.
    pub fn fit(&mut self, selected: &[String]) {
        let first = selected.first();
        let second = selected.get(1).or(first);
        let keep = |choice: &mut Option<String>, fallback: Option<&String>| {
            if !choice.as_ref().is_some_and(|c| selected.contains(c)) {
                *choice = fallback.cloned();
            }
        };
        keep(&mut self.histogram_column, first);
        keep(&mut self.bar_column, first);
        keep(&mut self.scatter_x, first);
        keep(&mut self.scatter_y, second);
        keep(&mut self.box_column, first);
    }

    /// One request per chart panel that has a column.
    pub fn requests(&self) -> Vec<ChartRequest> {
        let mut requests = Vec::new();
        if let Some(column) = &self.histogram_column {
            requests.push(ChartRequest::Histogram {
                column: column.clone(),
                bins: self.bins,
            });
        }
        if let Some(column) = &self.bar_column {
            requests.push(ChartRequest::Bar {
                column: column.clone(),
                mode: self.bar_mode,
                group_by: None,
            });
        }
        if let (Some(x), Some(y)) = (&self.scatter_x, &self.scatter_y) {
            requests.push(ChartRequest::Scatter {
                x: x.clone(),
                y: y.clone(),
            });
        }
        if let Some(column) = &self.box_column {
            requests.push(ChartRequest::Box {
                column: column.clone(),
            });
        }
        requests
    }
}

pub struct Dashboard {
    pub settings: AppSettings,
    pub upload: Option<Upload>,
    /// Every column of the upload, offered for conversion when none is numeric.
    pub all_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub selected: Vec<String>,
    pub charts: ChartChoices,
    pub output: Option<PipelineOutput>,
    pub status: String,
}

impl Dashboard {
    pub fn new(settings: AppSettings) -> Self {
        let charts = ChartChoices::new(settings.histogram_bins);
        Self {
            settings,
            upload: None,
            all_columns: Vec::new(),
            numeric_columns: Vec::new(),
            selected: Vec::new(),
            charts,
            output: None,
            status: String::new(),
        }
    }

    /// Columns offered in the picker.
    pub fn candidate_columns(&self) -> &[String] {
        if self.numeric_columns.is_empty() {
            &self.all_columns
        } else {
            &self.numeric_columns
        }
    }

    pub fn pick_file(&mut self) {
        if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
            self.load_file(&path);
        }
    }

    pub fn load_file(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map_or_else(|| "upload.csv".to_owned(), |n| n.to_string_lossy().into_owned());
        match std::fs::read(path) {
            Ok(bytes) => self.load_bytes(&bytes, &file_name),
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to read upload: {e}");
                self.status = format!("Could not read {file_name}: {e}");
            }
        }
    }

    /// Replaces the current upload. A parse failure clears everything and
    /// shows the error instead.
    pub fn load_bytes(&mut self, bytes: &[u8], file_name: &str) {
        self.output = None;
        match ingest(bytes, file_name) {
            Ok(upload) => {
                self.all_columns = upload
                    .table
                    .get_column_names()
                    .into_iter()
                    .map(|name| name.to_string())
                    .collect();
                self.numeric_columns = numeric_columns(&upload.table);
                self.selected = self.numeric_columns.clone();
                self.charts = ChartChoices::new(self.settings.histogram_bins);
                self.status = format!(
                    "Loaded {file_name}: {} rows, {} columns",
                    upload.table.height(),
                    upload.table.width()
                );
                self.upload = Some(upload);
                self.rerun();
            }
            Err(e) => {
                tracing::error!("{e}");
                self.upload = None;
                self.all_columns.clear();
                self.numeric_columns.clear();
                self.selected.clear();
                self.status = e.to_string();
            }
        }
    }

    /// Runs the pipeline with the current choices.
    pub fn rerun(&mut self) {
        let Some(upload) = &self.upload else {
            return;
        };
        self.charts.fit(&self.selected);

        let mut request = self.settings.to_request();
        request.selection = Some(self.selected.clone());
        request.charts = self.charts.requests();

        match compute_pipeline(upload, &request) {
            Ok(output) => self.output = Some(output),
            Err(e) => {
                tracing::error!(file_name = %upload.file_name, "Pipeline failed: {e}");
                self.status = format!("Analysis failed: {e}");
                self.output = None;
            }
        }
    }

    pub fn save_export(&mut self) {
        let Some(export) = self.output.as_ref().and_then(|o| o.export.as_ref()) else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name(&export.file_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, &export.bytes) {
            Ok(()) => {
                tracing::info!(path = %path.display(), bytes = export.bytes.len(), "Saved export");
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to save export: {e}");
                self.status = format!("Could not save {}: {e}", path.display());
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Statistics dashboard");
        ui.add_space(crate::theme::SPACING_SMALL);
        render_upload_bar(self, ui);

        if self.upload.is_none() {
            ui.add_space(crate::theme::SPACING_LARGE);
            ui.label(egui::RichText::new("Open a CSV file to get started.").weak());
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            let mut changed = render_column_picker(self, ui);
            if let Some(output) = &self.output {
                render_notices(ui, &output.notices);
            }

            let decimals = self.settings.display_decimals;
            if let Some(output) = self.output.as_ref().filter(|o| !o.selection.is_empty()) {
                ui.add_space(crate::theme::SPACING_MEDIUM);
                ui.strong("Descriptive statistics");
                render_statistics_table(ui, &output.statistics, decimals);

                if let Some(aggregate) = &output.aggregate {
                    ui.add_space(crate::theme::SPACING_MEDIUM);
                    ui.strong(format!("Mean per {}", aggregate.identifier_column));
                    render_aggregate_table(ui, aggregate, decimals);
                }
            }

            if !self.selected.is_empty() {
                ui.add_space(crate::theme::SPACING_MEDIUM);
                ui.strong("Charts");
                changed |= render_chart_controls(self, ui);
                if let Some(output) = &self.output {
                    ui.columns(2, |columns| {
                        for (i, outcome) in output.charts.iter().enumerate() {
                            if let Some(column) = columns.get_mut(i % 2) {
                                crate::theme::card_frame(column).show(column, |ui| {
                                    render_chart(ui, outcome, decimals);
                                });
                            }
                        }
                    });
                }
            }

            if changed {
                self.rerun();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::logic::types::{ChartKind, Notice};

    const SCORES: &str = "name,math,science\nAlice,90,80\nBob,70,\nCara,,\n";

    fn dashboard() -> Dashboard {
        Dashboard::new(AppSettings::default())
    }

    #[test]
    fn test_loading_selects_numeric_columns_and_draws_charts() {
        let mut dash = dashboard();
        dash.load_bytes(SCORES.as_bytes(), "scores.csv");

        assert_eq!(dash.selected, ["math", "science"]);
        assert_eq!(dash.all_columns, ["name", "math", "science"]);
        let Some(output) = &dash.output else {
            panic!("no output after loading");
        };
        assert_eq!(output.charts.len(), 4);
        assert_eq!(dash.charts.scatter_y.as_deref(), Some("science"));
        assert!(output.export.is_some());
    }

    #[test]
    fn test_parse_failure_clears_state() {
        let mut dash = dashboard();
        dash.load_bytes(SCORES.as_bytes(), "scores.csv");
        dash.load_bytes(b"", "empty.csv");

        assert!(dash.upload.is_none());
        assert!(dash.output.is_none());
        assert!(dash.status.contains("empty.csv"));
    }

    #[test]
    fn test_deselecting_everything_halts() {
        let mut dash = dashboard();
        dash.load_bytes(SCORES.as_bytes(), "scores.csv");
        dash.selected.clear();
        dash.rerun();

        let output = dash.output.as_ref();
        assert!(output.is_some_and(|o| o.has_notice(&Notice::EmptySelection)));
        assert!(output.is_some_and(|o| o.charts.is_empty() && o.export.is_none()));
    }

    #[test]
    fn test_text_only_upload_offers_every_column() {
        let mut dash = dashboard();
        dash.load_bytes(b"a,b\nx,y\n", "text.csv");
        assert!(dash.numeric_columns.is_empty());
        assert_eq!(dash.candidate_columns(), ["a", "b"]);
        assert!(
            dash.output
                .as_ref()
                .is_some_and(|o| o.has_notice(&Notice::NoNumericColumns))
        );
    }

    #[test]
    fn test_chart_choices_follow_selection() {
        let mut charts = ChartChoices::new(10);
        charts.fit(&["math".to_owned()]);
        assert_eq!(charts.scatter_x.as_deref(), Some("math"));
        assert_eq!(charts.scatter_y.as_deref(), Some("math"));

        charts.histogram_column = Some("science".to_owned());
        charts.fit(&["math".to_owned(), "science".to_owned()]);
        assert_eq!(charts.histogram_column.as_deref(), Some("science"));

        let kinds: Vec<_> = charts.requests().iter().map(ChartRequest::kind).collect();
        assert_eq!(
            kinds,
            [ChartKind::Histogram, ChartKind::Bar, ChartKind::Scatter, ChartKind::Box]
        );

        charts.fit(&[]);
        assert!(charts.requests().is_empty());
    }
}
