use csv::StringRecord;

use super::StoredRow;
use crate::error::{LedgerError, Result};
use crate::models::Transaction;

/// One row of a search result. `position` is the 0-based row index in the
/// full ledger (header excluded) at the time of the search.
#[derive(Debug, Clone)]
pub(crate) struct Match {
    position: usize,
    row: StoredRow,
}

impl Match {
    pub(super) fn new(position: usize, row: StoredRow) -> Self {
        Self { position, row }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn transaction(&self) -> &Transaction {
        &self.row.transaction
    }

    pub(super) fn record(&self) -> &StringRecord {
        &self.row.record
    }
}

/// An ordered subsequence of the ledger. Display indices are 1-based and map
/// to ledger positions; the mapping is only valid until the ledger changes.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResultSet {
    matches: Vec<Match>,
}

impl ResultSet {
    pub(super) fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub(crate) fn len(&self) -> usize {
        self.matches.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub(crate) fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.matches.iter().map(Match::transaction)
    }

    pub(crate) fn get(&self, index: usize) -> Result<&Match> {
        if self.matches.is_empty() {
            return Err(LedgerError::InvalidSelection(
                "there are no rows to choose from".into(),
            ));
        }
        index
            .checked_sub(1)
            .and_then(|i| self.matches.get(i))
            .ok_or_else(|| {
                LedgerError::InvalidSelection(format!(
                    "choose a row between 1-{}, got {index}",
                    self.matches.len()
                ))
            })
    }

    pub(crate) fn select(&self, selection: Selection) -> Result<Vec<&Match>> {
        match selection {
            Selection::Row(index) => Ok(vec![self.get(index)?]),
            Selection::All if self.matches.is_empty() => Err(LedgerError::InvalidSelection(
                "there are no rows to choose from".into(),
            )),
            Selection::All => Ok(self.matches.iter().collect()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    /// 1-based display index.
    Row(usize),
    All,
}

impl Selection {
    pub(crate) fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse::<usize>().map(Self::Row).map_err(|_| {
            LedgerError::InvalidSelection(format!("'{trimmed}' is not a row number or 'all'"))
        })
    }
}
