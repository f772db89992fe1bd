use anyhow::Result;
use chrono::NaiveDate;

use crate::config::LedgerConfig;
use crate::models::{parse_amount, parse_date, Category, Transaction};
use crate::store::LedgerStore;
use crate::ui::{plot, table};

pub(crate) fn as_cli(args: &[String], store: &LedgerStore) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store),
        "find" | "f" => cli_find(&args[2..], store),
        "range" | "r" => cli_range(&args[2..], store, false),
        "plot" | "p" => cli_range(&args[2..], store, true),
        "list" | "ls" => cli_list(store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("fintrack: personal income and expense ledger");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Interactive menu");
    println!("  add <amount> <category> [desc]  Append a transaction");
    println!("    --date <dd-mm-yyyy>           Transaction date (default: today)");
    println!("  find <column> <value>           List rows where column equals value");
    println!("  range <start> <end>             List rows in a date range with totals");
    println!("  plot <start> <end>              Chart income vs expense for a date range");
    println!("  list                            List every row");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Environment:");
    println!("  FINTRACK_FILE                   Ledger file (default: data dir/finance_data.csv)");
    println!("  FINTRACK_LOG                    Log filter, e.g. debug (default: warn)");
}

/// Turn `add` arguments into a transaction. `--date` may appear anywhere;
/// everything after the category is the description.
pub(crate) fn parse_add_args(args: &[String], config: &LedgerConfig) -> Result<Transaction> {
    let date = match args.windows(2).find(|w| w[0] == "--date") {
        Some(w) => parse_date(&w[1], &config.date_format)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut positional = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if arg == "--date" {
            skip_next = true;
        } else {
            positional.push(arg.as_str());
        }
    }

    let [amount, category, description @ ..] = positional.as_slice() else {
        anyhow::bail!("Usage: fintrack add <amount> <category> [description] [--date <date>]");
    };
    let txn = Transaction::new(
        date,
        parse_amount(amount)?,
        Category::parse(category)?,
        description.join(" "),
    )?;
    Ok(txn)
}

fn cli_add(args: &[String], store: &LedgerStore) -> Result<()> {
    let txn = parse_add_args(args, store.config())?;
    store.append(&txn)?;
    println!(
        "Added {} of {} on {}",
        txn.category.label(),
        txn.amount,
        txn.date.format(&store.config().date_format)
    );
    Ok(())
}

fn cli_find(args: &[String], store: &LedgerStore) -> Result<()> {
    let [column, value] = args else {
        anyhow::bail!("Usage: fintrack find <column> <value>");
    };
    let results = store.find(column, value)?;
    if results.is_empty() {
        println!("No transactions found with {column} = \"{value}\".");
        return Ok(());
    }
    print!(
        "{}",
        table::render_rows(&results, &store.config().date_format)
    );
    Ok(())
}

fn cli_range(args: &[String], store: &LedgerStore, with_plot: bool) -> Result<()> {
    let (start, end) = parse_range_args(args, store.config())?;
    let report = store.find_range(start, end)?;
    if report.results.is_empty() {
        println!("No transactions found in the given date range.");
        return Ok(());
    }

    let date_format = &store.config().date_format;
    if with_plot {
        return plot::show(&report, date_format);
    }
    print!("{}", table::render_rows(&report.results, date_format));
    println!();
    print!("{}", table::render_summary(&report));
    Ok(())
}

fn parse_range_args(args: &[String], config: &LedgerConfig) -> Result<(NaiveDate, NaiveDate)> {
    let [start, end] = args else {
        anyhow::bail!("Usage: fintrack range <start> <end>");
    };
    Ok((
        parse_date(start, &config.date_format)?,
        parse_date(end, &config.date_format)?,
    ))
}

fn cli_list(store: &LedgerStore) -> Result<()> {
    let all = store.all()?;
    if all.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    print!("{}", table::render_rows(&all, &store.config().date_format));
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
