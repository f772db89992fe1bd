use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Category, Field};
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) description: String,
}

impl Transaction {
    pub(crate) fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: String,
    ) -> Result<Self> {
        let txn = Self {
            date,
            amount,
            category,
            description,
        };
        txn.validate()?;
        Ok(txn)
    }

    /// Field rules that typing alone does not enforce. Fields are public, so
    /// anything writing a transaction checks again before it goes to disk.
    pub(crate) fn validate(&self) -> Result<()> {
        check_amount(self.amount)
    }

    /// Build a transaction from one ledger row, in column order.
    pub(crate) fn from_fields<S: AsRef<str>>(fields: &[S], date_format: &str) -> Result<Self> {
        if fields.len() != Field::ALL.len() {
            return Err(LedgerError::validation(
                "row",
                format!(
                    "expected {} fields, found {}",
                    Field::ALL.len(),
                    fields.len()
                ),
            ));
        }
        Ok(Self {
            date: parse_date(fields[Field::Date.index()].as_ref(), date_format)?,
            amount: parse_amount(fields[Field::Amount.index()].as_ref())?,
            category: Category::parse(fields[Field::Category.index()].as_ref())?,
            description: fields[Field::Description.index()].as_ref().to_string(),
        })
    }

    pub(crate) fn to_fields(&self, date_format: &str) -> [String; 4] {
        [
            self.date.format(date_format).to_string(),
            self.amount.to_string(),
            self.category.as_str().to_string(),
            self.description.clone(),
        ]
    }

    /// Overwrite a single field from user text, validated like a new row.
    pub(crate) fn set_field(&mut self, field: Field, raw: &str, date_format: &str) -> Result<()> {
        match field {
            Field::Date => self.date = parse_date(raw, date_format)?,
            Field::Amount => self.amount = parse_amount(raw)?,
            Field::Category => self.category = Category::parse(raw)?,
            Field::Description => self.description = raw.to_string(),
        }
        Ok(())
    }

    pub(crate) fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

pub(crate) fn parse_date(s: &str, format: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, format).map_err(|e| {
        LedgerError::validation("date", format!("'{trimmed}' does not match {format} ({e})"))
    })
}

/// Parse a non-negative amount. Currency symbols and thousands separators
/// are accepted on input; the stored value keeps the typed precision.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(LedgerError::validation("amount", "amount is required"));
    }
    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| LedgerError::validation("amount", format!("'{}' is not a number", s.trim())))?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::validation(
            "amount",
            format!("{amount} is negative"),
        ));
    }
    Ok(())
}
