use super::ChartRenderer;
use crate::analyser::logic::types::{
    Aggregate, BarValue, BoxSummary, ChartSpec, ChartValues, HistogramBin, Notice, ScatterPoint,
    StatisticsRow,
};
use crate::error::Result;
use crate::utils::fmt_opt;
use std::io::Write;

const BAR_WIDTH: usize = 40;
const GRID_WIDTH: usize = 60;
const GRID_HEIGHT: usize = 16;

/// Plain-text fallback renderer: bar rows, a character grid for scatter plots
/// and a one-line box diagram.
pub struct TextRenderer<W: Write> {
    out: W,
    decimals: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, decimals: u32) -> Self {
        Self {
            out,
            decimals: decimals as usize,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn histogram(&mut self, bins: &[HistogramBin]) -> Result<()> {
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let d = self.decimals;
        for bin in bins {
            writeln!(
                self.out,
                "  [{:>10.d$}, {:>10.d$})  {:<BAR_WIDTH$}  {}",
                bin.start,
                bin.end,
                bar(bin.count as f64, max as f64),
                bin.count
            )?;
        }
        Ok(())
    }

    fn bars(&mut self, bars: &[BarValue]) -> Result<()> {
        let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
        let max = bars.iter().map(|b| b.value.abs()).fold(0.0, f64::max);
        let d = self.decimals;
        for b in bars {
            writeln!(
                self.out,
                "  {:<label_width$}  {:<BAR_WIDTH$}  {:.d$}",
                b.label,
                bar(b.value.abs(), max),
                b.value
            )?;
        }
        Ok(())
    }

    fn scatter(&mut self, points: &[ScatterPoint], x_title: &str, y_title: &str) -> Result<()> {
        let (x_min, x_max) = bounds(points.iter().map(|p| p.x));
        let (y_min, y_max) = bounds(points.iter().map(|p| p.y));
        let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];
        for p in points {
            let col = scale(p.x, x_min, x_max, GRID_WIDTH);
            let row = GRID_HEIGHT - 1 - scale(p.y, y_min, y_max, GRID_HEIGHT);
            if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = if *cell == ' ' { '*' } else { '#' };
            }
        }

        let d = self.decimals;
        writeln!(self.out, "  {y_title} {y_max:.d$}")?;
        for row in grid {
            writeln!(self.out, "  |{}", row.into_iter().collect::<String>())?;
        }
        writeln!(self.out, "  +{}", "-".repeat(GRID_WIDTH))?;
        writeln!(
            self.out,
            "  {y_min:.d$} / {x_title} {x_min:.d$} .. {x_max:.d$} ({} points)",
            points.len()
        )?;
        Ok(())
    }

    fn box_plot(&mut self, s: &BoxSummary) -> Result<()> {
        let d = self.decimals;
        let pos = |v: f64| scale(v, s.min, s.max, GRID_WIDTH);
        let mut line = vec![' '; GRID_WIDTH];
        for (i, cell) in line.iter_mut().enumerate() {
            if i >= pos(s.lower_whisker) && i <= pos(s.upper_whisker) {
                *cell = '-';
            }
            if i >= pos(s.q1) && i <= pos(s.q3) {
                *cell = '=';
            }
        }
        for v in [s.lower_whisker, s.upper_whisker] {
            if let Some(cell) = line.get_mut(pos(v)) {
                *cell = '|';
            }
        }
        for &v in &s.outliers {
            if let Some(cell) = line.get_mut(pos(v)) {
                *cell = 'o';
            }
        }
        if let Some(cell) = line.get_mut(pos(s.median)) {
            *cell = 'M';
        }

        writeln!(self.out, "  {}", line.into_iter().collect::<String>())?;
        writeln!(
            self.out,
            "  min {:.d$}  q1 {:.d$}  median {:.d$}  q3 {:.d$}  max {:.d$}  outliers {}",
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max,
            s.outliers.len()
        )?;
        Ok(())
    }
}

impl<W: Write> ChartRenderer for TextRenderer<W> {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&mut self, chart: &ChartSpec) -> Result<()> {
        writeln!(self.out, "\n== {} ==", chart.title)?;
        match &chart.values {
            ChartValues::Histogram(bins) => self.histogram(bins)?,
            ChartValues::Bar(bars) => self.bars(bars)?,
            ChartValues::Scatter(points) => {
                let y_title = chart
                    .encoding
                    .y
                    .as_ref()
                    .map_or("y", |c| c.title.as_str());
                self.scatter(points, &chart.encoding.x.title, y_title)?;
            }
            ChartValues::Box(summary) => self.box_plot(summary)?,
        }
        self.out.flush()?;
        Ok(())
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Position of `v` on a `cells`-wide axis spanning `[lo, hi]`.
fn scale(v: f64, lo: f64, hi: f64, cells: usize) -> usize {
    if hi <= lo {
        return cells / 2;
    }
    let pos = ((v - lo) / (hi - lo) * (cells - 1) as f64).round();
    (pos.max(0.0) as usize).min(cells - 1)
}

/// Statistics as a fixed-width table, one row per column.
pub fn write_statistics(out: &mut dyn Write, rows: &[StatisticsRow], decimals: u32) -> Result<()> {
    let d = decimals as usize;
    let name_width = rows
        .iter()
        .map(|r| r.column.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    write!(out, "\n{:<name_width$} {:>7}", "column", "count")?;
    for (header, _) in StatisticsRow::default().fields() {
        write!(out, " {header:>12}")?;
    }
    writeln!(out)?;

    for row in rows {
        write!(out, "{:<name_width$} {:>7}", row.column, row.count)?;
        for (_, value) in row.fields() {
            write!(out, " {:>12}", fmt_opt(value, d))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_aggregate(out: &mut dyn Write, aggregate: &Aggregate, decimals: u32) -> Result<()> {
    let d = decimals as usize;
    let width = aggregate
        .rows
        .iter()
        .filter_map(|r| r.identifier.as_ref().map(|s| s.chars().count()))
        .max()
        .unwrap_or(0)
        .max(aggregate.identifier_column.chars().count());

    writeln!(out, "\n{:<width$}  {:>12}", aggregate.identifier_column, "mean")?;
    for row in &aggregate.rows {
        writeln!(
            out,
            "{:<width$}  {:>12}",
            row.identifier.as_deref().unwrap_or("—"),
            fmt_opt(row.mean, d)
        )?;
    }
    Ok(())
}

pub fn write_notices(out: &mut dyn Write, notices: &[Notice]) -> Result<()> {
    for notice in notices {
        let prefix = if notice.is_warning() { "warning" } else { "note" };
        writeln!(out, "{prefix}: {notice}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::logic::types::{Channel, ChartKind, Encoding, Mark};

    fn spec(values: ChartValues) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: "math (average)".to_owned(),
            column: "math".to_owned(),
            encoding: Encoding {
                mark: Mark::Bar,
                x: Channel::nominal("label", "name"),
                y: Some(Channel::quantitative("value", "math (average)")),
                tooltip: Vec::new(),
            },
            values,
            width: 600,
            height: 400,
        }
    }

    #[test]
    fn test_bar_rows_scale_to_the_largest_value() -> anyhow::Result<()> {
        let mut renderer = TextRenderer::new(Vec::new(), 2);
        renderer.render(&spec(ChartValues::Bar(vec![
            BarValue {
                label: "Alice".to_owned(),
                value: 90.0,
            },
            BarValue {
                label: "Bob".to_owned(),
                value: 45.0,
            },
        ])))?;
        let text = String::from_utf8(renderer.into_inner())?;

        assert!(text.contains("== math (average) =="));
        let hashes = |who: &str| {
            text.lines()
                .find(|l| l.contains(who))
                .map_or(0, |l| l.matches('#').count())
        };
        assert_eq!(hashes("Alice"), BAR_WIDTH);
        assert_eq!(hashes("Bob"), BAR_WIDTH / 2);
        assert!(text.contains("90.00"));
        Ok(())
    }

    #[test]
    fn test_statistics_table_shows_dash_for_missing_values() -> anyhow::Result<()> {
        let mut out = Vec::new();
        write_statistics(
            &mut out,
            &[StatisticsRow::empty("physics")],
            2,
        )?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("physics"));
        assert!(text.contains('—'));
        assert!(text.contains("25%"));
        Ok(())
    }

    #[test]
    fn test_scale_clamps_to_axis() {
        assert_eq!(scale(0.0, 0.0, 10.0, 11), 0);
        assert_eq!(scale(10.0, 0.0, 10.0, 11), 10);
        assert_eq!(scale(5.0, 5.0, 5.0, 11), 5);
    }
}
