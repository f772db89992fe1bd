#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::config::LedgerConfig;
use crate::models::Category;

static PLOTS: AtomicUsize = AtomicUsize::new(0);

fn no_plot(_: &RangeReport, _: &str) -> Result<()> {
    Ok(())
}

fn counting_plot(report: &RangeReport, _: &str) -> Result<()> {
    assert!(!report.results.is_empty());
    PLOTS.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

fn setup() -> (tempfile::TempDir, LedgerStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(LedgerConfig::at(dir.path().join("finance_data.csv")));
    store.initialize().unwrap();
    for (d, amount, category, description) in [
        ("01-01-2024", dec!(100), Category::Income, "salary"),
        ("02-01-2024", dec!(40), Category::Expense, "food"),
    ] {
        let date = NaiveDate::parse_from_str(d, "%d-%m-%Y").unwrap();
        store
            .append(&Transaction::new(date, amount, category, description.into()).unwrap())
            .unwrap();
    }
    (dir, store)
}

fn run_script_with(store: &LedgerStore, script: &str, plot: Plotter) -> String {
    let prompt = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let mut menu = Menu::new(store, prompt, plot);
    menu.run().unwrap();
    String::from_utf8(menu.prompt.into_output()).unwrap()
}

fn run_script(store: &LedgerStore, script: &str) -> String {
    run_script_with(store, script, no_plot)
}

fn ledger(store: &LedgerStore) -> String {
    std::fs::read_to_string(store.path()).unwrap()
}

const HEADER: &str = "date,amount,category,description\n";
const SEEDED: &str =
    "date,amount,category,description\n01-01-2024,100,income,salary\n02-01-2024,40,expense,food\n";

// ── Main loop ─────────────────────────────────────────────────

#[test]
fn test_exit() {
    let (_dir, store) = setup();
    let out = run_script(&store, "5\n");
    assert!(out.contains("1. Add a new transaction"));
    assert!(out.ends_with("Exiting...\n"));
}

#[test]
fn test_end_of_input_exits() {
    let (_dir, store) = setup();
    let out = run_script(&store, "");
    assert!(out.contains("Exiting..."));
}

#[test]
fn test_invalid_choice_reprompts() {
    let (_dir, store) = setup();
    let out = run_script(&store, "9\n5\n");
    assert!(out.contains("Invalid choice. Enter a number between 1 and 5."));
    assert_eq!(out.matches("Enter your choice (1-5): ").count(), 2);
}

// ── Add ───────────────────────────────────────────────────────

#[test]
fn test_add() {
    let (_dir, store) = setup();
    let out = run_script(&store, "1\n15-01-2024\n$1,200.50\nIncome\nbonus, q4\n5\n");
    assert!(out.contains("Entry added successfully."));
    assert_eq!(
        ledger(&store),
        format!("{SEEDED}15-01-2024,1200.50,income,\"bonus, q4\"\n")
    );
}

#[test]
fn test_add_defaults_to_today() {
    let (_dir, store) = setup();
    run_script(&store, "1\n\n3\ne\nbus\n5\n");
    let today = chrono::Local::now().date_naive().format("%d-%m-%Y").to_string();
    assert!(ledger(&store).ends_with(&format!("{today},3,expense,bus\n")));
}

#[test]
fn test_add_gives_up_after_bad_amounts() {
    let (_dir, store) = setup();
    let out = run_script(&store, "1\n\nx\ny\nz\n5\n");
    assert!(out.contains("Too many invalid attempts"));
    assert!(out.contains("Exiting..."));
    assert_eq!(ledger(&store), SEEDED);
}

// ── Search ────────────────────────────────────────────────────

#[test]
fn test_range_summary_and_plot() {
    let (_dir, store) = setup();
    let before = PLOTS.load(Ordering::SeqCst);
    let out = run_script_with(
        &store,
        "2\n1\n01-01-2024\n02-01-2024\n1\n5\n",
        counting_plot,
    );
    assert!(out.contains("Transactions from 01-01-2024 to 02-01-2024"));
    assert!(out.contains("Total Income:  $100.00"));
    assert!(out.contains("Total Expense: $40.00"));
    assert!(out.contains("Net Savings:   $60.00"));
    assert_eq!(PLOTS.load(Ordering::SeqCst), before + 1);
}

#[test]
fn test_range_without_matches() {
    let (_dir, store) = setup();
    let out = run_script(&store, "2\n1\n01-06-2024\n30-06-2024\n5\n");
    assert!(out.contains("No transactions found in the given date range."));
}

#[test]
fn test_range_reversed_is_reported() {
    let (_dir, store) = setup();
    let out = run_script(&store, "2\n1\n02-01-2024\n01-01-2024\n5\n");
    assert!(out.contains("is after end date"));
    assert!(out.contains("Exiting..."));
}

#[test]
fn test_search_then_edit() {
    let (_dir, store) = setup();
    let out = run_script(&store, "2\n2\ncategory\nincome\n1\n1\ndescription\nbonus\n5\n");
    assert!(out.contains("Transaction(s) found with category = income:"));
    assert!(out.contains("Transaction updated."));
    assert_eq!(
        ledger(&store),
        format!("{HEADER}01-01-2024,100,income,bonus\n02-01-2024,40,expense,food\n")
    );
}

#[test]
fn test_search_then_delete() {
    let (_dir, store) = setup();
    run_script(&store, "2\n2\namount\n40\n2\n1\n5\n");
    assert_eq!(
        ledger(&store),
        format!("{HEADER}01-01-2024,100,income,salary\n")
    );
}

// ── Edit ──────────────────────────────────────────────────────

#[test]
fn test_edit() {
    let (_dir, store) = setup();
    run_script(&store, "3\ndescription\nfood\ny\n1\namount\n45.10\n5\n");
    assert_eq!(
        ledger(&store),
        format!("{HEADER}01-01-2024,100,income,salary\n02-01-2024,45.10,expense,food\n")
    );
}

#[test]
fn test_edit_declined() {
    let (_dir, store) = setup();
    run_script(&store, "3\ndescription\nfood\nn\n5\n");
    assert_eq!(ledger(&store), SEEDED);
}

#[test]
fn test_edit_invalid_row_aborts() {
    let (_dir, store) = setup();
    let out = run_script(&store, "3\ndescription\nfood\ny\n7\nall\n0\n5\n");
    assert!(out.contains("choose a row between 1-1"));
    assert!(out.contains("Too many invalid attempts"));
    assert_eq!(ledger(&store), SEEDED);
}

#[test]
fn test_edit_rejects_bad_value_then_accepts() {
    let (_dir, store) = setup();
    let out = run_script(&store, "3\ndate\n01-01-2024\ny\n1\ncategory\nsavings\nexpense\n5\n");
    assert!(out.contains("not one of income, expense"));
    assert!(ledger(&store).contains("01-01-2024,100,expense,salary"));
}

#[test]
fn test_edit_unknown_column_reprompts() {
    let (_dir, store) = setup();
    let out = run_script(&store, "3\nnotes\ndescription\nsalary\ny\n1\nnotes\ndate\n05-01-2024\n5\n");
    assert!(out.contains("unknown column 'notes'"));
    assert!(ledger(&store).contains("05-01-2024,100,income,salary"));
}

#[test]
fn test_lookup_not_found() {
    let (_dir, store) = setup();
    let out = run_script(&store, "3\ndescription\nnothing\n5\n");
    assert!(out.contains("no transactions found with description = \"nothing\""));
    assert_eq!(ledger(&store), SEEDED);
}

// ── Delete ────────────────────────────────────────────────────

#[test]
fn test_delete_single() {
    let (_dir, store) = setup();
    let out = run_script(&store, "4\ndescription\nfood\ny\n1\n5\n");
    assert!(out.contains("Selected transaction deleted. (1 removed)"));
    assert_eq!(
        ledger(&store),
        format!("{HEADER}01-01-2024,100,income,salary\n")
    );
}

#[test]
fn test_delete_all() {
    let (_dir, store) = setup();
    let out = run_script(&store, "4\ndate\n1-1-2024\ny\nall\n5\n");
    assert!(out.contains("All matching transactions deleted. (1 removed)"));
    assert_eq!(
        ledger(&store),
        format!("{HEADER}02-01-2024,40,expense,food\n")
    );
}

#[test]
fn test_delete_bad_search_value_is_reported() {
    let (_dir, store) = setup();
    let out = run_script(&store, "4\ndate\nyesterday\n5\n");
    assert!(out.contains("invalid date"));
    assert_eq!(ledger(&store), SEEDED);
}

// ── Storage failures ──────────────────────────────────────────

#[test]
fn test_storage_error_aborts_operation_only() {
    let (_dir, store) = setup();
    std::fs::write(store.path(), "date,amount,category,description\nbroken,1,income,x\n").unwrap();
    let out = run_script(&store, "2\n1\n01-01-2024\n02-01-2024\n5\n");
    assert!(out.contains("Operation aborted."));
    assert!(out.contains("Exiting..."));
}
