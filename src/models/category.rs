use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Income,
    Expense,
}

impl Category {
    /// Lowercase label as written to the ledger file.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "i" => Ok(Self::Income),
            "expense" | "e" => Ok(Self::Expense),
            other => {
                let labels: Vec<&str> = Self::all().iter().map(Category::as_str).collect();
                Err(LedgerError::validation(
                    "category",
                    format!("'{other}' is not one of {}", labels.join(", ")),
                ))
            }
        }
    }

    pub(crate) fn all() -> &'static [Category] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
