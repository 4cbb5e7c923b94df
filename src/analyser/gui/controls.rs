use crate::analyser::gui::Dashboard;
use crate::analyser::logic::types::{AggregationMode, Notice};
use eframe::egui;

pub fn render_upload_bar(dash: &mut Dashboard, ui: &mut egui::Ui) {
    crate::theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            if ui.button("Open CSV…").clicked() {
                dash.pick_file();
            }

            let can_save = dash
                .output
                .as_ref()
                .is_some_and(|o| o.export.is_some());
            let label = dash
                .output
                .as_ref()
                .and_then(|o| o.export.as_ref())
                .map_or_else(|| "Save processed CSV".to_owned(), |e| format!("Save {}", e.file_name));
            if ui.add_enabled(can_save, egui::Button::new(label)).clicked() {
                dash.save_export();
            }

            ui.separator();
            if let Some(upload) = &dash.upload {
                ui.label(egui::RichText::new(&upload.file_name).strong());
            }
            if !dash.status.is_empty() {
                ui.label(egui::RichText::new(&dash.status).weak());
            }
        });
    });
}

/// Checkboxes over the candidate columns. Returns true when the selection
/// changed.
pub fn render_column_picker(dash: &mut Dashboard, ui: &mut egui::Ui) -> bool {
    let mut changed = false;
    ui.add_space(crate::theme::SPACING_SMALL);

    let heading = if dash.numeric_columns.is_empty() {
        "Columns to convert to numbers"
    } else {
        "Numeric columns"
    };
    ui.strong(heading);

    let candidates = dash.candidate_columns().to_vec();
    ui.horizontal_wrapped(|ui| {
        for name in &candidates {
            let mut checked = dash.selected.contains(name);
            if ui.checkbox(&mut checked, name.as_str()).changed() {
                if checked {
                    dash.selected.push(name.clone());
                } else {
                    dash.selected.retain(|s| s != name);
                }
                changed = true;
            }
        }
    });

    ui.horizontal(|ui| {
        if ui.small_button("Select all").clicked() {
            dash.selected = candidates.clone();
            changed = true;
        }
        if ui.small_button("Clear").clicked() {
            dash.selected.clear();
            changed = true;
        }
    });

    changed
}

pub fn render_notices(ui: &mut egui::Ui, notices: &[Notice]) {
    for notice in notices {
        let text = egui::RichText::new(notice.to_string());
        if notice.is_warning() {
            ui.colored_label(crate::theme::WARNING_COLOR, text);
        } else {
            ui.label(text.weak());
        }
    }
}

fn column_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut Option<String>,
    options: &[String],
) -> bool {
    let mut changed = false;
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_deref().unwrap_or("—"))
        .show_ui(ui, |ui| {
            for option in options {
                changed |= ui
                    .selectable_value(value, Some(option.clone()), option.as_str())
                    .changed();
            }
        });
    changed
}

/// Column and option pickers for the four charts. Returns true on any change.
pub fn render_chart_controls(dash: &mut Dashboard, ui: &mut egui::Ui) -> bool {
    let mut changed = false;
    let options = dash.selected.clone();
    let charts = &mut dash.charts;

    egui::Grid::new("chart_controls")
        .num_columns(2)
        .spacing([crate::theme::SPACING_MEDIUM, crate::theme::SPACING_SMALL])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                changed |= column_combo(ui, "hist_column", "Histogram", &mut charts.histogram_column, &options);
                changed |= ui
                    .add(egui::Slider::new(&mut charts.bins, 1..=100).text("bins"))
                    .changed();
            });
            ui.horizontal(|ui| {
                changed |= column_combo(ui, "bar_column", "Bar", &mut charts.bar_column, &options);
                egui::ComboBox::from_id_salt("bar_mode")
                    .selected_text(charts.bar_mode.label())
                    .show_ui(ui, |ui| {
                        for mode in AggregationMode::ALL {
                            changed |= ui
                                .selectable_value(&mut charts.bar_mode, mode, mode.label())
                                .changed();
                        }
                    });
            });
            ui.end_row();

            ui.horizontal(|ui| {
                changed |= column_combo(ui, "scatter_x", "Scatter x", &mut charts.scatter_x, &options);
                changed |= column_combo(ui, "scatter_y", "y", &mut charts.scatter_y, &options);
            });
            ui.horizontal(|ui| {
                changed |= column_combo(ui, "box_column", "Box", &mut charts.box_column, &options);
            });
            ui.end_row();
        });

    changed
}
