//! Desktop application shell: a sidebar switching between the widget tour and
//! the statistics dashboard.

use crate::analyser::Dashboard;
use crate::config::{AppSettings, load_app_config};
use eframe::egui;

mod tour;

pub use tour::Tour;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    Tour,
    #[default]
    Dashboard,
}

pub struct StatboardApp {
    page: Page,
    tour: Tour,
    dashboard: Dashboard,
}

impl StatboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        crate::theme::apply_statboard_theme(&cc.egui_ctx);
        Self::with_settings(load_app_config())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            page: Page::default(),
            tour: Tour::default(),
            dashboard: Dashboard::new(settings),
        }
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("STATBOARD")
                    .strong()
                    .size(20.0)
                    .color(crate::theme::ACCENT_COLOR),
            );
            ui.add_space(20.0);
        });

        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = 8.0;
            for (page, label) in [(Page::Dashboard, "Dashboard"), (Page::Tour, "Widget tour")] {
                if Self::sidebar_button(ui, label, self.page == page).clicked() {
                    self.page = page;
                }
            }
        });
    }

    fn sidebar_button(ui: &mut egui::Ui, text: &str, active: bool) -> egui::Response {
        let (rect, response) =
            ui.allocate_at_least(egui::vec2(ui.available_width(), 36.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_fill = if active {
                crate::theme::ACCENT_COLOR
            } else if response.hovered() {
                ui.visuals().faint_bg_color
            } else {
                egui::Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 6.0, bg_fill);

            let text_color = if active {
                egui::Color32::WHITE
            } else if response.hovered() {
                ui.visuals().strong_text_color()
            } else {
                ui.visuals().weak_text_color()
            };
            ui.painter().text(
                rect.left_center() + egui::vec2(15.0, 0.0),
                egui::Align2::LEFT_CENTER,
                text,
                egui::FontId::proportional(14.0),
                text_color,
            );
        }

        response
    }

    fn render_footer(ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Statboard").small().weak());
                ui.label(egui::RichText::new(" • ").small().weak());
                ui.label(
                    egui::RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .small()
                        .weak(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    powered_by_egui_and_eframe(ui);
                });
            });
        });
    }
}

impl eframe::App for StatboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("main_sidebar")
            .frame(crate::theme::sidebar_frame())
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.render_sidebar(ui);
            });

        Self::render_footer(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Tour => self.tour.ui(ui),
            Page::Dashboard => self.dashboard.ui(ui),
        });
    }
}

fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(egui::RichText::new("Powered by ").small().weak());
        ui.add(egui::Hyperlink::from_label_and_url(
            egui::RichText::new("egui").small(),
            "https://github.com/emilk/egui",
        ));
        ui.label(egui::RichText::new(" and ").small().weak());
        ui.add(egui::Hyperlink::from_label_and_url(
            egui::RichText::new("polars").small(),
            "https://pola.rs",
        ));
        ui.label(egui::RichText::new(".").small().weak());
    });
}
