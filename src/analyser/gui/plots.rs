use crate::analyser::logic::types::{
    BarValue, BoxSummary, ChartOutcome, ChartSpec, ChartValues, HistogramBin, ScatterPoint,
};
use eframe::egui;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, Points};

const PLOT_HEIGHT: f32 = 240.0;

/// Draws a resolved chart, or the reason it was skipped.
pub fn render_chart(ui: &mut egui::Ui, outcome: &ChartOutcome, decimals: u32) {
    ui.set_width(ui.available_width());
    match outcome {
        ChartOutcome::Ready(spec) => {
            ui.label(egui::RichText::new(&spec.title).strong());
            match &spec.values {
                ChartValues::Histogram(bins) => render_histogram(ui, spec, bins),
                ChartValues::Bar(bars) => render_bars(ui, spec, bars, decimals),
                ChartValues::Scatter(points) => render_scatter(ui, spec, points),
                ChartValues::Box(summary) => render_box(ui, spec, summary),
            }
        }
        ChartOutcome::Skipped { kind, notice } => {
            ui.label(egui::RichText::new(format!("{kind} chart")).strong());
            ui.add_space(crate::theme::SPACING_SMALL);
            ui.label(egui::RichText::new(notice.to_string()).weak());
        }
    }
}

fn plot(spec: &ChartSpec) -> Plot<'static> {
    let y_title = spec
        .encoding
        .y
        .as_ref()
        .map_or_else(String::new, |c| c.title.clone());
    Plot::new(format!("plot_{}", spec.kind))
        .height(PLOT_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(spec.encoding.x.title.clone())
        .y_axis_label(y_title)
}

fn render_histogram(ui: &mut egui::Ui, spec: &ChartSpec, bins: &[HistogramBin]) {
    let bars = bins
        .iter()
        .map(|bin| {
            Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                .width(bin.end - bin.start)
                .stroke(egui::Stroke::new(0.5, crate::theme::ACCENT_COLOR))
        })
        .collect();
    let chart = BarChart::new("Count", bars)
        .color(crate::theme::ACCENT_COLOR.linear_multiply(0.5))
        .element_formatter(Box::new(|bar, _| {
            format!("Around {:.4}\nCount: {}", bar.argument, bar.value)
        }));

    plot(spec).show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
    });
}

fn render_bars(ui: &mut egui::Ui, spec: &ChartSpec, values: &[BarValue], decimals: u32) {
    let d = decimals as usize;
    let bars = values
        .iter()
        .enumerate()
        .map(|(i, v)| Bar::new(i as f64, v.value).name(&v.label).width(0.7))
        .collect();
    let chart = BarChart::new(spec.title.clone(), bars)
        .color(crate::theme::ACCENT_COLOR)
        .element_formatter(Box::new(move |bar, _| format!("{}\n{:.d$}", bar.name, bar.value)));

    plot(spec).show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
    });

    // Category names under the plot; the x axis only carries positions.
    ui.horizontal_wrapped(|ui| {
        for (i, v) in values.iter().enumerate() {
            ui.label(egui::RichText::new(format!("{i}: {}", v.label)).small().weak());
        }
    });
}

fn render_scatter(ui: &mut egui::Ui, spec: &ChartSpec, points: &[ScatterPoint]) {
    let series: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    let markers = Points::new(spec.title.clone(), series)
        .radius(3.5)
        .color(crate::theme::ACCENT_COLOR);

    plot(spec).show(ui, |plot_ui| {
        plot_ui.points(markers);
    });
}

fn render_box(ui: &mut egui::Ui, spec: &ChartSpec, s: &BoxSummary) {
    let spread = BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker);
    let element = BoxElem::new(0.0, spread)
        .name(&spec.column)
        .box_width(0.5)
        .whisker_width(0.3);
    let boxes = BoxPlot::new(spec.column.clone(), vec![element])
        .color(crate::theme::ACCENT_COLOR);
    let outliers: Vec<[f64; 2]> = s.outliers.iter().map(|v| [0.0, *v]).collect();
    let has_outliers = !outliers.is_empty();
    let outlier_points = Points::new("Outliers", outliers).radius(3.0);

    plot(spec).show(ui, |plot_ui| {
        plot_ui.box_plot(boxes);
        if has_outliers {
            plot_ui.points(outlier_points);
        }
    });
}
