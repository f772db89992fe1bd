#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use rust_decimal_macros::dec;

use super::*;
use crate::config::LedgerConfig;
use crate::models::{Category, Transaction};
use crate::store::LedgerStore;

const FMT: &str = "%d-%m-%Y";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, FMT).unwrap()
}

fn report(dir: &tempfile::TempDir) -> RangeReport {
    let store = LedgerStore::new(LedgerConfig::at(dir.path().join("ledger.csv")));
    for (d, amount, category) in [
        ("01-01-2024", dec!(100), Category::Income),
        ("01-01-2024", dec!(15), Category::Expense),
        ("04-01-2024", dec!(40), Category::Expense),
    ] {
        store
            .append(&Transaction::new(date(d), amount, category, String::new()).unwrap())
            .unwrap();
    }
    store
        .find_range(date("01-01-2024"), date("10-01-2024"))
        .unwrap()
}

#[test]
fn test_chart_series_offsets_from_start() {
    let dir = tempfile::tempdir().unwrap();
    let (income, expense) = chart_series(&report(&dir));
    assert_eq!(income, vec![(0.0, 100.0), (3.0, 0.0)]);
    assert_eq!(expense, vec![(0.0, 15.0), (3.0, 40.0)]);
}

#[test]
fn test_render_draws_title_and_axis_labels() {
    let dir = tempfile::tempdir().unwrap();
    let report = report(&dir);
    let mut terminal = ratatui::Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            render(f, area, &report, FMT);
        })
        .unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Income and Expenses Over Time"));
    assert!(screen.contains("01-01-2024"));
    assert!(screen.contains("10-01-2024"));
    assert!(screen.contains("$100.00"));
}
