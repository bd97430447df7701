//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing the date range and the
//! indicator selection, then renders one chart per indicator view, cycling
//! with Tab. It shares the view pipeline with `mdash show` and only adds
//! presentation on top.

use std::io;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, ViewSet};
use crate::catalog::{self, Indicator};
use crate::data::FredClient;
use crate::domain::{DateRange, DuplicatePolicy, IndicatorView, ViewConfig, ViewData};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{MultiLineChart, SeriesLine, series_rgb};

/// The two date rows at the top of the settings list; indicator toggles
/// follow below them.
const DATE_FIELDS: usize = 2;

/// Start the TUI.
pub fn run(config: ViewConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::Terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    client: FredClient,
    start: NaiveDate,
    end: NaiveDate,
    enabled: Vec<bool>,
    duplicates: DuplicatePolicy,
    max_rows: usize,
    views: Option<ViewSet>,
    current_view: usize,
    selected_field: usize,
    editing_date: bool,
    date_input: String,
    status: String,
}

impl App {
    fn new(config: ViewConfig) -> Result<Self, AppError> {
        let client = FredClient::from_env()?;

        let mut enabled = vec![false; Indicator::ALL.len()];
        let mut skipped = Vec::new();
        for name in &config.indicators {
            match catalog::resolve(name) {
                Ok(indicator) => enabled[indicator_index(indicator)] = true,
                Err(err) => skipped.push(err.to_string()),
            }
        }

        let mut app = Self {
            client,
            start: config.range.start(),
            end: config.range.end(),
            enabled,
            duplicates: config.duplicates,
            max_rows: config.max_rows,
            views: None,
            current_view: 0,
            selected_field: 0,
            editing_date: false,
            date_input: String::new(),
            status: "Fetching FRED data...".to_string(),
        };
        app.refresh();
        if !skipped.is_empty() {
            app.status = skipped.join(" ");
        }
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::Terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < self.field_count() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field < DATE_FIELDS {
                    self.date_input = self.selected_date().to_string();
                    self.editing_date = true;
                    self.status =
                        "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
                } else {
                    self.toggle_selected_indicator();
                }
            }
            KeyCode::Char(' ') => {
                if self.selected_field >= DATE_FIELDS {
                    self.toggle_selected_indicator();
                }
            }
            KeyCode::Tab => self.cycle_view(1),
            KeyCode::BackTab => self.cycle_view(-1),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }

        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Left/Right: shift the selected date by a month-ish step, or toggle the
    /// selected indicator.
    fn adjust_field(&mut self, delta: i64) {
        if self.selected_field < DATE_FIELDS {
            let days = 30u64;
            let current = self.selected_date();
            let shifted = if delta >= 0 {
                current.checked_add_days(Days::new(days))
            } else {
                current.checked_sub_days(Days::new(days))
            };
            if let Some(date) = shifted {
                self.set_selected_date(date);
                self.refresh();
            }
        } else {
            self.toggle_selected_indicator();
        }
    }

    fn selected_date(&self) -> NaiveDate {
        if self.selected_field == 0 { self.start } else { self.end }
    }

    fn set_selected_date(&mut self, date: NaiveDate) {
        if self.selected_field == 0 {
            self.start = date;
        } else {
            self.end = date;
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };
        self.set_selected_date(date);
        self.refresh();
    }

    fn toggle_selected_indicator(&mut self) {
        let idx = self.selected_field - DATE_FIELDS;
        self.enabled[idx] = !self.enabled[idx];
        self.refresh();
    }

    fn cycle_view(&mut self, delta: i64) {
        let count = self.view_count();
        if count == 0 {
            return;
        }
        let cur = self.current_view as i64;
        self.current_view = (cur + delta).rem_euclid(count as i64) as usize;
    }

    fn field_count(&self) -> usize {
        DATE_FIELDS + Indicator::ALL.len()
    }

    fn view_count(&self) -> usize {
        self.views.as_ref().map(|s| s.views.len()).unwrap_or(0)
    }

    fn selected_names(&self) -> Vec<String> {
        Indicator::ALL
            .iter()
            .zip(&self.enabled)
            .filter(|(_, on)| **on)
            .map(|(i, _)| i.display_name().to_string())
            .collect()
    }

    /// Re-run the pipeline with the current settings.
    ///
    /// An inverted range never reaches the fetch layer: it is reported on the
    /// status line and the previous views stay on screen.
    fn refresh(&mut self) {
        let range = match DateRange::new(self.start, self.end) {
            Ok(range) => range,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        let config = ViewConfig {
            range,
            indicators: self.selected_names(),
            duplicates: self.duplicates,
            max_rows: self.max_rows,
        };

        let set = pipeline::run_views(&self.client, &config);
        let warnings = set.all_warnings();
        self.status = if warnings.is_empty() {
            format!("Loaded {} views for {range}.", set.views.len())
        } else {
            format!(
                "Loaded {} views for {range}; {} warning(s): {}",
                set.views.len(),
                warnings.len(),
                warnings[0]
            )
        };
        self.views = Some(set);
        if self.current_view >= self.view_count() {
            self.current_view = 0;
        }
    }

    fn current(&self) -> Option<&IndicatorView> {
        self.views.as_ref().and_then(|s| s.views.get(self.current_view))
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let settings_height = (self.field_count() + 2) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(settings_height),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_settings(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("mdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — U.S. macro indicators (FRED)"),
        ]));

        let view_name = self
            .current()
            .map(|v| v.indicator.display_name().to_string())
            .unwrap_or_else(|| "-".to_string());
        let warnings = self
            .views
            .as_ref()
            .map(|s| s.all_warnings().len())
            .unwrap_or(0);

        lines.push(Line::from(Span::styled(
            format!(
                "range: {}..{} | view: {}/{} {view_name} | warnings: {warnings}",
                self.start,
                self.end,
                if self.view_count() == 0 { 0 } else { self.current_view + 1 },
                self.view_count(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self
            .current()
            .map(|v| format!("{} [{}]", v.indicator.display_name(), v.indicator.unit_label()))
            .unwrap_or_else(|| "Chart".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = self.current() else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let Some(chart) = chart_data(view) else {
            let msg = Paragraph::new("No data available for this view.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = MultiLineChart {
            series: &chart.series,
            x_bounds: chart.x_bounds,
            y_bounds: chart.y_bounds,
            base_date: chart.base_date,
            y_label: view.indicator.unit_label().to_string(),
        };
        frame.render_widget(widget, inner);

        draw_legend(frame, inner, &chart.series);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        items.push(ListItem::new(format!("Start date: {}", self.start)));
        items.push(ListItem::new(format!("End date:   {}", self.end)));
        for (indicator, on) in Indicator::ALL.iter().zip(&self.enabled) {
            let mark = if *on { "[x]" } else { "[ ]" };
            items.push(ListItem::new(format!("{mark} {}", indicator.display_name())));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_date {
            let hint = Paragraph::new(format!("date: {}_", self.date_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit/toggle  Tab view  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn indicator_index(indicator: Indicator) -> usize {
    Indicator::ALL
        .iter()
        .position(|&i| i == indicator)
        .unwrap_or(0)
}

/// Chart-ready view data: labeled lines plus shared bounds.
struct ChartData {
    series: Vec<SeriesLine>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    base_date: NaiveDate,
}

/// Build chart series for Plotters: one line per sub-series, x in days since
/// the earliest plotted date. Returns None when the view has nothing to draw.
fn chart_data(view: &IndicatorView) -> Option<ChartData> {
    let labeled: Vec<(String, Vec<(NaiveDate, f64)>)> = match &view.data {
        ViewData::Series(table) => vec![(
            view.indicator.display_name().to_string(),
            table.points.iter().map(|p| (p.date, p.value)).collect(),
        )],
        ViewData::Curve(table) => table
            .columns
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), table.column_points(i)))
            .collect(),
        ViewData::Breakeven { table, spread } => {
            let mut lines: Vec<(String, Vec<(NaiveDate, f64)>)> = table
                .columns
                .iter()
                .enumerate()
                .map(|(i, label)| (label.clone(), table.column_points(i)))
                .collect();
            if !spread.is_empty() {
                lines.push(("10Y-5Y".to_string(), spread.clone()));
            }
            lines
        }
        ViewData::Empty => return None,
    };

    let base_date = labeled
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|&(date, _)| date))
        .min()?;

    let mut x_max = 1.0_f64;
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut series = Vec::with_capacity(labeled.len());
    for (label, points) in labeled {
        let line: Vec<(f64, f64)> = points
            .into_iter()
            .map(|(date, value)| {
                let x = (date - base_date).num_days() as f64;
                x_max = x_max.max(x);
                y_min = y_min.min(value);
                y_max = y_max.max(value);
                (x, value)
            })
            .collect();
        if !line.is_empty() {
            series.push(SeriesLine { label, points: line });
        }
    }

    if series.is_empty() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }
    if y_max <= y_min {
        // A flat series still deserves a visible band.
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    Some(ChartData {
        series,
        x_bounds: [0.0, x_max],
        y_bounds: [y_min - pad, y_max + pad],
        base_date,
    })
}

/// Draw a small color-keyed legend in the top-right corner of the chart area.
fn draw_legend(frame: &mut ratatui::Frame<'_>, inner: Rect, series: &[SeriesLine]) {
    if series.len() < 2 || inner.width < 24 {
        return;
    }

    let width = series
        .iter()
        .map(|s| s.label.len() as u16 + 2)
        .max()
        .unwrap_or(8)
        .min(inner.width / 3);
    let height = (series.len() as u16).min(inner.height.saturating_sub(2));
    let rect = Rect {
        x: inner.x + inner.width - width - 1,
        y: inner.y + 1,
        width,
        height,
    };

    let lines: Vec<Line> = series
        .iter()
        .take(height as usize)
        .enumerate()
        .map(|(i, s)| {
            let (r, g, b) = series_rgb(i);
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(s.label.clone()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(Text::from(lines)), rect);
}
