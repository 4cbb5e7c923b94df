use crate::analyser::logic::types::{Aggregate, StatisticsRow};
use crate::utils::fmt_opt;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 20.0;

/// One row per selected column: count, mean, std, min, quartiles and max.
pub fn render_statistics_table(ui: &mut egui::Ui, rows: &[StatisticsRow], decimals: u32) {
    let d = decimals as usize;
    let headers = StatisticsRow::default().fields().map(|(header, _)| header);

    ui.push_id("statistics_table", |ui| {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(140.0).at_least(80.0)) // Column
                .column(Column::auto().at_least(50.0)) // Count
                .columns(Column::auto().at_least(70.0), headers.len())
                .column(Column::remainder())
                .min_scrolled_height(0.0)
                .header(ROW_HEIGHT + 5.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Column");
                    });
                    header.col(|ui| {
                        ui.strong("count");
                    });
                    for title in headers {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                    header.col(|_| {});
                })
                .body(|mut body| {
                    for stats in rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(&stats.column);
                            });
                            row.col(|ui| {
                                ui.monospace(stats.count.to_string());
                            });
                            for (_, value) in stats.fields() {
                                row.col(|ui| {
                                    ui.monospace(fmt_opt(value, d));
                                });
                            }
                            row.col(|_| {}); // Spacer
                        });
                    }
                });
        });
    });
}

/// Identifier and per-row mean.
pub fn render_aggregate_table(ui: &mut egui::Ui, aggregate: &Aggregate, decimals: u32) {
    let d = decimals as usize;
    ui.push_id("aggregate_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::initial(160.0).at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .max_scroll_height(240.0)
            .header(ROW_HEIGHT + 5.0, |mut header| {
                header.col(|ui| {
                    ui.strong(&aggregate.identifier_column);
                });
                header.col(|ui| {
                    ui.strong("mean");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, aggregate.rows.len(), |mut row| {
                    let Some(entry) = aggregate.rows.get(row.index()) else {
                        return;
                    };
                    row.col(|ui| {
                        ui.label(entry.identifier.as_deref().unwrap_or("—"));
                    });
                    row.col(|ui| {
                        ui.monospace(fmt_opt(entry.mean, d));
                    });
                });
            });
    });
}
