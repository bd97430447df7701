//! Plotters-powered multi-series time chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One labeled line on the chart. The x value is days since the chart's base
/// date; the y value is in the indicator's own unit.
#[derive(Debug, Clone)]
pub struct SeriesLine {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// it easy to test/benchmark the data prep separately.
pub struct MultiLineChart<'a> {
    /// One line per sub-series (tenor, indicator, or derived spread).
    pub series: &'a [SeriesLine],
    /// X bounds in days since `base_date`.
    pub x_bounds: [f64; 2],
    /// Y bounds in the indicator's unit.
    pub y_bounds: [f64; 2],
    /// The calendar date corresponding to x = 0.
    pub base_date: NaiveDate,
    /// Y axis description.
    pub y_label: String,
}

/// Series styling: keep the palette high-contrast for terminal readability.
/// Twelve entries cover the eleven curve tenors plus a derived line.
const SERIES_PALETTE: &[(u8, u8, u8)] = &[
    (0, 255, 255),
    (255, 165, 0),
    (0, 255, 0),
    (255, 0, 255),
    (255, 255, 0),
    (99, 147, 255),
    (255, 99, 99),
    (0, 200, 140),
    (200, 120, 255),
    (255, 255, 255),
    (150, 150, 150),
    (255, 0, 0),
];

/// The RGB color used for series `index`, shared with the legend so the two
/// always agree.
pub fn series_rgb(index: usize) -> (u8, u8, u8) {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Format an x tick (an offset in days from the base date) as a calendar
/// label, coarser for wider windows.
pub fn fmt_date_tick(base: NaiveDate, offset_days: f64, span_days: f64) -> String {
    let days = offset_days.round().max(0.0) as u64;
    let date = base.checked_add_days(Days::new(days)).unwrap_or(base);
    if span_days > 400.0 {
        date.format("%Y-%m").to_string()
    } else {
        date.format("%m-%d").to_string()
    }
}

impl Widget for MultiLineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let base = self.base_date;
        let span = x1 - x0;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in low-resolution
            // terminal rendering; the axes + labels are usually enough here.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_date_tick(base, *v, span))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (i, line) in self.series.iter().enumerate() {
                let (r, g, b) = series_rgb(i);
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &color))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_without_panicking() {
        assert_eq!(series_rgb(0), series_rgb(SERIES_PALETTE.len()));
        for i in 0..40 {
            let _ = series_rgb(i);
        }
    }

    #[test]
    fn date_ticks_follow_window_span() {
        let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(fmt_date_tick(base, 0.0, 100.0), "01-01");
        assert_eq!(fmt_date_tick(base, 31.0, 100.0), "02-01");
        assert_eq!(fmt_date_tick(base, 0.0, 800.0), "2023-01");
    }
}
