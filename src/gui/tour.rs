//! A walk through the basic widgets, each tagged with a footnote.

use crate::analyser::logic::{ColumnSelection, StatisticsRow, describe};
use crate::error::Result;
use crate::utils::fmt_opt;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot};
use polars::prelude::DataFrame;
use rand::Rng as _;
use rand_distr::StandardNormal;

const SAMPLE_COLUMNS: [&str; 3] = ["a", "b", "c"];
const SAMPLE_ROWS: usize = 10;
const SAMPLE_IMAGE_URL: &str = "https://static.streamlit.io/examples/dice.jpg";
const OPTIONS: [&str; 3] = ["Option A", "Option B", "Option C"];
const FRUITS: [&str; 3] = ["Apple", "Banana", "Cherry"];

const SAMPLE_CODE: &str = "fn hello() {\n    println!(\"hello\");\n}\n";

const FOOTNOTES: [&str; 12] = [
    "Plain text: a simple sentence",
    "Markdown-style formatting: bold text, links, lists",
    "Caption: secondary, smaller text",
    "Text input: user input reflected on screen",
    "Slider: picking a number from a range",
    "Data frame / table: tabular data",
    "Line chart: continuous or time-series data",
    "Bar chart: categorical data",
    "File picker: handling a file chosen by the user",
    "Image: local or remote picture",
    "Collapsing header: fold and unfold content",
    "Code: a highlighted code block",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Choice {
    #[default]
    First,
    Second,
}

pub struct Tour {
    name: String,
    agree: bool,
    option: usize,
    age: u32,
    choice: Choice,
    fruits: [bool; 3],
    sample: Vec<[f64; 3]>,
    sample_stats: Vec<StatisticsRow>,
    picked_file: Option<String>,
    progress: f32,
}

impl Default for Tour {
    fn default() -> Self {
        let sample = random_sample(SAMPLE_ROWS);
        let sample_stats = describe_sample(&sample).unwrap_or_else(|e| {
            tracing::warn!("Could not describe the sample table: {e}");
            Vec::new()
        });
        Self {
            name: "User".to_owned(),
            agree: false,
            option: 0,
            age: 30,
            choice: Choice::default(),
            fruits: [true, false, false],
            sample,
            sample_stats,
            picked_file: None,
            progress: 0.0,
        }
    }
}

/// `rows` × 3 draws from the standard normal distribution.
fn random_sample(rows: usize) -> Vec<[f64; 3]> {
    let mut rng = rand::thread_rng();
    (0..rows)
        .map(|_| {
            [
                rng.sample(StandardNormal),
                rng.sample(StandardNormal),
                rng.sample(StandardNormal),
            ]
        })
        .collect()
}

fn describe_sample(sample: &[[f64; 3]]) -> Result<Vec<StatisticsRow>> {
    let columns = SAMPLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<f64> = sample.iter().filter_map(|row| row.get(i).copied()).collect();
            polars::prelude::Column::new((*name).into(), values)
        })
        .collect();
    let table = DataFrame::new(columns)?;
    let (rows, _) = describe(&table, &ColumnSelection::new(SAMPLE_COLUMNS))?;
    Ok(rows)
}

fn footnote(n: usize) -> &'static str {
    const MARKS: [&str; 12] = ["¹", "²", "³", "⁴", "⁵", "⁶", "⁷", "⁸", "⁹", "¹⁰", "¹¹", "¹²"];
    MARKS.get(n.saturating_sub(1)).copied().unwrap_or("")
}

impl Tour {
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(egui::RichText::new("My new app").size(26.0).strong());
            ui.horizontal_wrapped(|ui| {
                ui.label("Let's start building! For help and inspiration, head over to");
                ui.hyperlink_to("docs.rs/egui", "https://docs.rs/egui");
            });

            self.text_section(ui);
            self.layout_section(ui);
            self.widgets_section(ui);
            self.data_section(ui);
            self.charts_section(ui);
            self.media_section(ui);
            self.extras_section(ui);
            Self::footnotes(ui);
        });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(crate::theme::SPACING_LARGE);
        ui.heading(title);
        ui.separator();
    }

    fn text_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "1. Basic text elements");
        ui.label(format!("Is this plain text? {}", footnote(1)));
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Markdown").strong());
            ui.label(format!("example: bold text and links are available. {}", footnote(2)));
        });
        ui.label(
            egui::RichText::new(format!("A caption example. {}", footnote(3)))
                .small()
                .weak(),
        );
    }

    fn layout_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "2. Layout & widgets");
        ui.columns(2, |columns| {
            if let [left, right] = columns {
                left.horizontal(|ui| {
                    ui.label("Enter your name");
                    ui.text_edit_singleline(&mut self.name);
                });
                left.label(format!("Hello, {}! {}", self.name, footnote(4)));
                left.checkbox(&mut self.agree, "I agree");

                egui::ComboBox::from_label("Pick an option")
                    .selected_text(OPTIONS.get(self.option).copied().unwrap_or_default())
                    .show_ui(right, |ui| {
                        for (i, option) in OPTIONS.iter().enumerate() {
                            ui.selectable_value(&mut self.option, i, *option);
                        }
                    });
                right.add_space(crate::theme::SPACING_SMALL);
                metric(right, "Temperature", "20 °C", "+1.2 °C");
            }
        });
    }

    fn widgets_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "3. Interactive widgets");
        ui.add(egui::Slider::new(&mut self.age, 0..=100).text("Age"));
        ui.label(format!("Selected age: {} {}", self.age, footnote(5)));

        ui.horizontal(|ui| {
            ui.label("Pick one");
            ui.radio_value(&mut self.choice, Choice::First, "First");
            ui.radio_value(&mut self.choice, Choice::Second, "Second");
        });
        ui.horizontal(|ui| {
            ui.label("Pick several");
            for (checked, fruit) in self.fruits.iter_mut().zip(FRUITS) {
                ui.checkbox(checked, fruit);
            }
        });

        let picked: Vec<&str> = FRUITS
            .iter()
            .zip(self.fruits)
            .filter_map(|(fruit, checked)| checked.then_some(*fruit))
            .collect();
        ui.label(format!("Result: {:?}, {:?}", self.choice, picked));
    }

    fn data_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "4. Data display");
        ui.push_id("sample_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(70.0), 4)
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for name in SAMPLE_COLUMNS {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for (i, row) in self.sample.iter().enumerate() {
                        body.row(18.0, |mut table_row| {
                            table_row.col(|ui| {
                                ui.label(i.to_string());
                            });
                            for value in row {
                                table_row.col(|ui| {
                                    ui.monospace(format!("{value:.4}"));
                                });
                            }
                        });
                    }
                });
        });

        ui.add_space(crate::theme::SPACING_MEDIUM);
        ui.label(egui::RichText::new(format!("describe() {}", footnote(6))).strong());
        ui.push_id("sample_describe", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(70.0), 4)
                .header(20.0, |mut header| {
                    header.col(|_| {});
                    for stat in &self.sample_stats {
                        header.col(|ui| {
                            ui.strong(&stat.column);
                        });
                    }
                })
                .body(|mut body| {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label("count");
                        });
                        for stat in &self.sample_stats {
                            row.col(|ui| {
                                ui.monospace(stat.count.to_string());
                            });
                        }
                    });
                    for field in 0..7 {
                        body.row(18.0, |mut row| {
                            let label = StatisticsRow::default()
                                .fields()
                                .get(field)
                                .map_or("", |(label, _)| *label);
                            row.col(|ui| {
                                ui.label(label);
                            });
                            for stat in &self.sample_stats {
                                let value = stat.fields().get(field).and_then(|(_, v)| *v);
                                row.col(|ui| {
                                    ui.monospace(fmt_opt(value, 4));
                                });
                            }
                        });
                    }
                });
        });
    }

    fn charts_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "5. Charts");
        ui.label(format!("Line chart {}", footnote(7)));
        Plot::new("tour_line_chart")
            .legend(Legend::default())
            .height(200.0)
            .show(ui, |plot_ui| {
                for (i, name) in SAMPLE_COLUMNS.iter().enumerate() {
                    let points: Vec<[f64; 2]> = self
                        .sample
                        .iter()
                        .enumerate()
                        .filter_map(|(x, row)| row.get(i).map(|y| [x as f64, *y]))
                        .collect();
                    plot_ui.line(Line::new(*name, points).width(2.0));
                }
            });

        ui.label(format!("Bar chart of |a| {}", footnote(8)));
        let bars = self
            .sample
            .iter()
            .enumerate()
            .map(|(x, &[a, _, _])| Bar::new(x as f64, a.abs()).width(0.8))
            .collect();
        Plot::new("tour_bar_chart").height(200.0).show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("|a|", bars).color(crate::theme::ACCENT_COLOR));
        });
    }

    fn media_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "6. Media & file upload");
        ui.horizontal(|ui| {
            if ui.button("Choose a file…").clicked()
                && let Some(path) = rfd::FileDialog::new().pick_file()
            {
                self.picked_file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
            }
            ui.label(footnote(9));
        });
        if let Some(name) = &self.picked_file {
            ui.label(format!("Uploaded file: {name}"));
        }
        ui.horizontal(|ui| {
            ui.hyperlink_to("Sample image (external URL)", SAMPLE_IMAGE_URL);
            ui.label(footnote(10));
        });
    }

    fn extras_section(&mut self, ui: &mut egui::Ui) {
        Self::section(ui, "7. Extras");
        egui::CollapsingHeader::new("Expand me").show(ui, |ui| {
            ui.label(format!("Hidden content example. {}", footnote(11)));
        });
        ui.add_space(crate::theme::SPACING_SMALL);
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.monospace(SAMPLE_CODE);
            });
        ui.add_space(crate::theme::SPACING_SMALL);

        if self.progress < 1.0 {
            self.progress = (self.progress + 0.01).min(1.0);
            ui.ctx().request_repaint();
        }
        ui.add(egui::ProgressBar::new(self.progress).show_percentage());
    }

    fn footnotes(ui: &mut egui::Ui) {
        ui.add_space(crate::theme::SPACING_LARGE);
        ui.separator();
        for (i, note) in FOOTNOTES.iter().enumerate() {
            ui.label(
                egui::RichText::new(format!("{} {note}", footnote(i + 1)))
                    .small()
                    .weak(),
            );
        }
    }
}

/// Label, big value and a coloured delta, like a dashboard tile.
fn metric(ui: &mut egui::Ui, label: &str, value: &str, delta: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(label).weak());
        ui.label(egui::RichText::new(value).size(28.0).strong());
        let color = if delta.starts_with('-') {
            egui::Color32::from_rgb(220, 80, 80)
        } else {
            egui::Color32::from_rgb(80, 190, 110)
        };
        ui.colored_label(color, format!("↑ {delta}"));
    });
}
