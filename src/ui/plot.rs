use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame, Terminal,
};
use rust_decimal::prelude::ToPrimitive;
use std::io;

use crate::store::RangeReport;
use crate::ui::theme;
use crate::ui::util::format_money;

/// Points for the chart: x is days since the report start, y the day's
/// total. Returns `(income, expense)`.
pub(crate) fn chart_series(report: &RangeReport) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut income = Vec::new();
    let mut expense = Vec::new();
    for day in report.daily_totals() {
        let x = (day.date - report.start).num_days() as f64;
        income.push((x, day.income.to_f64().unwrap_or(0.0)));
        expense.push((x, day.expense.to_f64().unwrap_or(0.0)));
    }
    (income, expense)
}

pub(crate) fn render(f: &mut Frame, area: Rect, report: &RangeReport, date_format: &str) {
    let (income, expense) = chart_series(report);

    let span_days = ((report.end - report.start).num_days() as f64).max(1.0);
    let peak = report
        .daily_totals()
        .iter()
        .flat_map(|d| [d.income, d.expense])
        .max()
        .unwrap_or_default();
    let y_max = peak.to_f64().unwrap_or(0.0).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::income_style())
            .data(&income),
        Dataset::default()
            .name("expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::expense_style())
            .data(&expense),
    ];

    let mid = report.start + chrono::Duration::days((span_days / 2.0) as i64);
    let x_labels = vec![
        report.start.format(date_format).to_string(),
        mid.format(date_format).to_string(),
        report.end.format(date_format).to_string(),
    ];
    let y_labels = vec![
        format_money(rust_decimal::Decimal::ZERO),
        format_money(peak / rust_decimal::Decimal::TWO),
        format_money(peak),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style())
                .title(Span::styled(
                    " Income and Expenses Over Time (any key to close) ",
                    theme::title_style(),
                )),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(theme::axis_style())
                .bounds([0.0, span_days])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(theme::axis_style())
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Draw the chart on the alternate screen until a key is pressed.
pub(crate) fn show(report: &RangeReport, date_format: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = wait_for_key(&mut terminal, report, date_format);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn wait_for_key(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    report: &RangeReport,
    date_format: &str,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            render(f, area, report, date_format);
        })?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[path = "plot_tests.rs"]
mod tests;
