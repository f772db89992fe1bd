use crate::error::{LedgerError, Result};

/// A ledger column. The declaration order is the on-disk column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Date,
    Amount,
    Category,
    Description,
}

impl Field {
    pub(crate) const ALL: [Field; 4] = [
        Self::Date,
        Self::Amount,
        Self::Category,
        Self::Description,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Description => "description",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Date => 0,
            Self::Amount => 1,
            Self::Category => 2,
            Self::Description => 3,
        }
    }

    /// Unknown column names are a selection mistake, not bad field data.
    pub(crate) fn parse(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|f| f.as_str() == lower)
            .copied()
            .ok_or_else(|| {
                LedgerError::InvalidSelection(format!(
                    "unknown column '{}', expected one of {}",
                    s.trim(),
                    Self::names().join(", ")
                ))
            })
    }

    pub(crate) fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
