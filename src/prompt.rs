use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::models::{parse_amount, parse_date, Category};

/// How many times a prompt is repeated on invalid input before giving up
/// and returning to the menu.
pub(crate) const MAX_ATTEMPTS: usize = 3;

/// Line-based prompts over any reader/writer pair, so the menu can be driven
/// from stdin or from a script.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    /// Print `message` and read one line. `None` means end of input.
    pub(crate) fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until `parse` accepts the answer, at most [`MAX_ATTEMPTS`] times.
    /// Each rejection is printed. `None` means the user ran out of attempts
    /// or input.
    pub(crate) fn ask_with<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> crate::error::Result<T>,
    ) -> Result<Option<T>> {
        for attempt in 1..=MAX_ATTEMPTS {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!(attempt, error = %e, "rejected input");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
        writeln!(self.output, "Too many invalid attempts, returning to menu.")?;
        Ok(None)
    }

    pub(crate) fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.ask(&format!("{message} (y/n): "))?;
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    // ── Transaction fields ────────────────────────────────────

    /// With `allow_default`, an empty answer means today.
    pub(crate) fn get_date(
        &mut self,
        message: &str,
        config: &LedgerConfig,
        allow_default: bool,
    ) -> Result<Option<NaiveDate>> {
        let format = config.date_format.clone();
        self.ask_with(message, move |answer| {
            if allow_default && answer.trim().is_empty() {
                Ok(chrono::Local::now().date_naive())
            } else {
                parse_date(answer, &format)
            }
        })
    }

    pub(crate) fn get_amount(&mut self) -> Result<Option<Decimal>> {
        self.ask_with("Enter the amount: ", parse_amount)
    }

    pub(crate) fn get_category(&mut self) -> Result<Option<Category>> {
        self.ask_with(
            "Enter the category ('I' for Income or 'E' for Expense): ",
            Category::parse,
        )
    }

    pub(crate) fn get_description(&mut self) -> Result<Option<String>> {
        self.ask("Enter a description (optional): ")
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
