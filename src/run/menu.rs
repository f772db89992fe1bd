use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::error;

use crate::error::LedgerError;
use crate::models::{Field, Transaction};
use crate::prompt::Prompter;
use crate::store::{LedgerStore, RangeReport, ResultSet, Selection};
use crate::ui::{plot, table};

/// Draws a range report. The real one takes over the terminal; tests pass a
/// stand-in.
pub(crate) type Plotter = fn(&RangeReport, &str) -> Result<()>;

pub(crate) fn as_menu(store: &LedgerStore) -> Result<()> {
    let stdin = io::stdin();
    let prompt = Prompter::new(stdin.lock(), io::stdout());
    Menu::new(store, prompt, plot::show).run()
}

pub(crate) struct Menu<'a, R, W> {
    store: &'a LedgerStore,
    prompt: Prompter<R, W>,
    plot: Plotter,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(crate) fn new(store: &'a LedgerStore, prompt: Prompter<R, W>, plot: Plotter) -> Self {
        Self {
            store,
            prompt,
            plot,
        }
    }

    /// Main loop. Returns when the user picks Exit or input runs out.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.prompt.output())?;
            writeln!(self.prompt.output(), "1. Add a new transaction")?;
            writeln!(self.prompt.output(), "2. Search transaction(s)")?;
            writeln!(self.prompt.output(), "3. Edit a transaction")?;
            writeln!(self.prompt.output(), "4. Delete a transaction")?;
            writeln!(self.prompt.output(), "5. Exit")?;
            let Some(choice) = self.prompt.ask("Enter your choice (1-5): ")? else {
                break;
            };
            let outcome = match choice.trim() {
                "1" => self.add(),
                "2" => self.search(),
                "3" => self.edit(),
                "4" => self.delete(),
                "5" => break,
                _ => {
                    writeln!(
                        self.prompt.output(),
                        "Invalid choice. Enter a number between 1 and 5."
                    )?;
                    continue;
                }
            };
            self.report(outcome)?;
        }
        writeln!(self.prompt.output(), "Exiting...")?;
        Ok(())
    }

    /// Print ledger errors and carry on. Anything else (a broken terminal)
    /// ends the loop.
    fn report(&mut self, outcome: Result<()>) -> Result<()> {
        let Err(err) = outcome else {
            return Ok(());
        };
        let Some(ledger_err) = err.downcast_ref::<LedgerError>() else {
            return Err(err);
        };
        if ledger_err.is_recoverable() {
            writeln!(self.prompt.output(), "{ledger_err}")?;
        } else {
            error!(error = %ledger_err, "ledger operation failed");
            writeln!(
                self.prompt.output(),
                "Error: {ledger_err}. Operation aborted."
            )?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let config = self.store.config();
        let message = format!(
            "Enter the date of the transaction ({}) or press enter for today's date: ",
            config.date_hint()
        );
        let Some(date) = self.prompt.get_date(&message, config, true)? else {
            return Ok(());
        };
        let Some(amount) = self.prompt.get_amount()? else {
            return Ok(());
        };
        let Some(category) = self.prompt.get_category()? else {
            return Ok(());
        };
        let Some(description) = self.prompt.get_description()? else {
            return Ok(());
        };

        let txn = Transaction::new(date, amount, category, description)?;
        self.store.append(&txn)?;
        writeln!(self.prompt.output(), "Entry added successfully.")?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        writeln!(
            self.prompt.output(),
            "1. View transactions and summary within a date range"
        )?;
        writeln!(self.prompt.output(), "2. Search transaction")?;
        writeln!(self.prompt.output(), "3. Main Menu")?;
        let Some(choice) = self.prompt.ask("Enter your choice (1-3): ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => self.range_view(),
            "2" => self.search_and_follow_up(),
            "3" => Ok(()),
            _ => {
                writeln!(self.prompt.output(), "Invalid choice.")?;
                Ok(())
            }
        }
    }

    fn range_view(&mut self) -> Result<()> {
        let config = self.store.config();
        let hint = config.date_hint();
        let Some(start) =
            self.prompt
                .get_date(&format!("Enter the start date ({hint}): "), config, false)?
        else {
            return Ok(());
        };
        let Some(end) =
            self.prompt
                .get_date(&format!("Enter the end date ({hint}): "), config, false)?
        else {
            return Ok(());
        };

        let report = self.store.find_range(start, end)?;
        if report.results.is_empty() {
            writeln!(
                self.prompt.output(),
                "No transactions found in the given date range."
            )?;
            return Ok(());
        }

        let out = self.prompt.output();
        writeln!(
            out,
            "Transactions from {} to {}",
            start.format(&config.date_format),
            end.format(&config.date_format)
        )?;
        write!(out, "{}", table::render_rows(&report.results, &config.date_format))?;
        writeln!(out)?;
        write!(out, "{}", table::render_summary(&report))?;

        let choice = self
            .prompt
            .ask("(1) Plot transactions or go back to (2) Main Menu: ")?;
        if choice.as_deref().map(str::trim) == Some("1") {
            (self.plot)(&report, &config.date_format)?;
        }
        Ok(())
    }

    fn search_and_follow_up(&mut self) -> Result<()> {
        let Some(results) = self.lookup("search")? else {
            return Ok(());
        };
        writeln!(self.prompt.output())?;
        writeln!(self.prompt.output(), "1. Edit transaction(s)")?;
        writeln!(self.prompt.output(), "2. Delete transaction(s)")?;
        writeln!(self.prompt.output(), "3. Main Menu")?;
        let choice = self.prompt.ask("Enter choice (1-3): ")?;
        match choice.as_deref().map(str::trim) {
            Some("1") => self.edit_selected(&results),
            Some("2") => self.delete_selected(&results),
            _ => Ok(()),
        }
    }

    fn edit(&mut self) -> Result<()> {
        let Some(results) = self.lookup("search")? else {
            return Ok(());
        };
        if self.prompt.confirm("Edit transaction/s?")? {
            self.edit_selected(&results)?;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(results) = self.lookup("delete")? else {
            return Ok(());
        };
        if self.prompt.confirm("Delete transaction/s?")? {
            self.delete_selected(&results)?;
        }
        Ok(())
    }

    /// Ask for a column and value and list the matching rows. The returned
    /// set is only good until the next change to the ledger.
    fn lookup(&mut self, verb: &str) -> Result<Option<ResultSet>> {
        let columns = Field::names().join(", ");
        let Some(field) = self.prompt.ask_with(
            &format!("Enter the column to {verb} by ({columns}): "),
            Field::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(value) = self
            .prompt
            .ask(&format!("Enter the value to search for in {field}: "))?
        else {
            return Ok(None);
        };

        let results = self.store.find(field.as_str(), &value)?;
        if results.is_empty() {
            return Err(LedgerError::NotFound {
                column: field.to_string(),
                value,
            }
            .into());
        }

        let date_format = &self.store.config().date_format;
        writeln!(
            self.prompt.output(),
            "Transaction(s) found with {field} = {value}:"
        )?;
        write!(
            self.prompt.output(),
            "{}",
            table::render_rows(&results, date_format)
        )?;
        Ok(Some(results))
    }

    fn edit_selected(&mut self, results: &ResultSet) -> Result<()> {
        let Some(index) = self.prompt.ask_with(
            &format!("Choose the row number to edit (1-{}): ", results.len()),
            |answer| match Selection::parse(answer)? {
                Selection::Row(i) => results.get(i).map(|_| i),
                Selection::All => Err(LedgerError::InvalidSelection(
                    "edit one row at a time".into(),
                )),
            },
        )?
        else {
            return Ok(());
        };
        let Some(field) = self.prompt.ask_with(
            &format!(
                "Select column to edit ({}): ",
                Field::names().join(", ")
            ),
            Field::parse,
        )?
        else {
            return Ok(());
        };

        let current = results.get(index)?.transaction().clone();
        let date_format = self.store.config().date_format.clone();
        let Some(value) = self.prompt.ask_with("Enter value: ", |answer| {
            let mut probe = current.clone();
            probe.set_field(field, answer, &date_format)?;
            Ok(answer.to_string())
        })?
        else {
            return Ok(());
        };

        self.store.edit(results, index, field, &value)?;
        writeln!(self.prompt.output(), "Transaction updated.")?;
        Ok(())
    }

    fn delete_selected(&mut self, results: &ResultSet) -> Result<()> {
        let Some(selection) = self.prompt.ask_with(
            "Choose the row number to delete or type 'all' to delete all matches: ",
            |answer| {
                let selection = Selection::parse(answer)?;
                results.select(selection)?;
                Ok(selection)
            },
        )?
        else {
            return Ok(());
        };

        let removed = self.store.delete(results, selection)?;
        let message = match selection {
            Selection::All => "All matching transactions deleted.",
            Selection::Row(_) => "Selected transaction deleted.",
        };
        writeln!(self.prompt.output(), "{message} ({removed} removed)")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
