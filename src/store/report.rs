use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::ResultSet;
use crate::error::{LedgerError, Result};
use crate::models::{Category, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DailyTotals {
    pub(crate) date: NaiveDate,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

/// Rows in a date range plus their income/expense totals.
#[derive(Debug, Clone)]
pub(crate) struct RangeReport {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) results: ResultSet,
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
}

impl RangeReport {
    /// Fails when a total does not fit in a `Decimal`.
    pub(super) fn new(start: NaiveDate, end: NaiveDate, results: ResultSet) -> Result<Self> {
        let total_income =
            checked_total(results.transactions().filter(|t| t.is_income()), "income")?;
        let total_expense =
            checked_total(results.transactions().filter(|t| t.is_expense()), "expense")?;
        Ok(Self {
            start,
            end,
            results,
            total_income,
            total_expense,
        })
    }

    pub(crate) fn net_savings(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    /// Income and expense summed per day, oldest first. Days without any
    /// transaction are left out.
    pub(crate) fn daily_totals(&self) -> Vec<DailyTotals> {
        let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for txn in self.results.transactions() {
            let entry = by_day.entry(txn.date).or_default();
            match txn.category {
                // Amounts are non-negative, so a day never exceeds the range
                // totals checked in `new`.
                Category::Income => entry.0 = entry.0.saturating_add(txn.amount),
                Category::Expense => entry.1 = entry.1.saturating_add(txn.amount),
            }
        }
        by_day
            .into_iter()
            .map(|(date, (income, expense))| DailyTotals {
                date,
                income,
                expense,
            })
            .collect()
    }
}

fn checked_total<'a>(
    mut txns: impl Iterator<Item = &'a Transaction>,
    kind: &str,
) -> Result<Decimal> {
    txns.try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.amount))
        .ok_or_else(|| {
            LedgerError::validation("amount", format!("total {kind} is too large to add up"))
        })
}
