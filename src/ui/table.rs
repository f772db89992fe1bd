use crate::store::{RangeReport, ResultSet};
use crate::ui::util::{format_money, truncate};

const DESCRIPTION_WIDTH: usize = 40;

/// Plain-text listing of a result set. `#` is the 1-based index the user
/// picks from; `Row` is the ledger row the entry lives on.
pub(crate) fn render_rows(results: &ResultSet, date_format: &str) -> String {
    let mut lines = vec![
        format!(
            "{:>4}  {:>5}  {:<10}  {:>12}  {:<8}  Description",
            "#", "Row", "Date", "Amount", "Category"
        ),
        "─".repeat(58 + "Description".len()),
    ];
    for (i, m) in results.iter().enumerate() {
        let txn = m.transaction();
        lines.push(format!(
            "{:>4}  {:>5}  {:<10}  {:>12}  {:<8}  {}",
            i + 1,
            m.position() + 1,
            txn.date.format(date_format).to_string(),
            format_money(txn.amount),
            txn.category.as_str(),
            truncate(&txn.description, DESCRIPTION_WIDTH),
        ));
    }
    with_trailing_newline(&lines)
}

pub(crate) fn render_summary(report: &RangeReport) -> String {
    with_trailing_newline(&[
        "Summary:".to_string(),
        format!("Total Income:  {}", format_money(report.total_income)),
        format!("Total Expense: {}", format_money(report.total_expense)),
        format!("Net Savings:   {}", format_money(report.net_savings())),
    ])
}

fn with_trailing_newline(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
