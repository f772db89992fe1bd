mod report;
mod results;

pub(crate) use report::RangeReport;
use results::Match;
pub(crate) use results::{ResultSet, Selection};

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::models::{parse_amount, parse_date, Category, Field, Transaction};

/// One row as read from disk. The raw record is what gets written back, so
/// rows nobody touched keep their exact field text.
#[derive(Debug, Clone)]
struct StoredRow {
    record: StringRecord,
    transaction: Transaction,
}

/// Parsed search value for a single column.
#[derive(Debug)]
enum Query {
    Date(NaiveDate),
    Amount(Decimal),
    Category(Category),
    Description(String),
}

impl Query {
    fn parse(field: Field, value: &str, date_format: &str) -> Result<Self> {
        Ok(match field {
            Field::Date => Self::Date(parse_date(value, date_format)?),
            Field::Amount => Self::Amount(parse_amount(value)?),
            Field::Category => Self::Category(Category::parse(value)?),
            Field::Description => Self::Description(value.to_string()),
        })
    }

    fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::Date(d) => txn.date == *d,
            Self::Amount(a) => txn.amount == *a,
            Self::Category(c) => txn.category == *c,
            Self::Description(s) => txn.description == *s,
        }
    }
}

/// The ledger file and every operation on it. Each call opens, fully reads
/// or writes, and closes the file; nothing is cached between calls.
pub(crate) struct LedgerStore {
    config: LedgerConfig,
}

impl LedgerStore {
    pub(crate) fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    pub(crate) fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub(crate) fn path(&self) -> &Path {
        &self.config.path
    }

    /// Create the ledger with a header row if it does not exist yet. An
    /// existing file must carry the expected header.
    pub(crate) fn initialize(&self) -> Result<()> {
        let path = self.path();
        if path.exists() && std::fs::metadata(path)?.len() > 0 {
            let mut rdr = self.reader()?;
            return self.check_header(rdr.headers()?);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.write_rows(&[])?;
        info!(path = %path.display(), "created ledger");
        Ok(())
    }

    /// Append one row at the end of the file. Existing rows are never
    /// rewritten.
    pub(crate) fn append(&self, txn: &Transaction) -> Result<()> {
        txn.validate()?;
        self.initialize()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(self.path())?;
        let fields = txn.to_fields(&self.config.date_format);
        write_or_truncate(&mut file, |file| {
            if !ends_with_newline(file)? {
                file.write_all(b"\n")?;
            }
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(self.config.delimiter)
                .has_headers(false)
                .from_writer(&mut *file);
            wtr.write_record(&fields)?;
            wtr.flush()?;
            Ok(())
        })?;

        info!(
            date = %txn.date,
            amount = %txn.amount,
            category = %txn.category,
            "appended transaction"
        );
        Ok(())
    }

    /// Every row, in file order.
    pub(crate) fn all(&self) -> Result<ResultSet> {
        let matches = self
            .read_rows()?
            .into_iter()
            .enumerate()
            .map(|(position, row)| Match::new(position, row))
            .collect();
        Ok(ResultSet::new(matches))
    }

    /// Rows whose `column` equals `value`, in file order. Dates compare as
    /// calendar dates and amounts numerically.
    pub(crate) fn find(&self, column: &str, value: &str) -> Result<ResultSet> {
        let field = Field::parse(column)?;
        let query = Query::parse(field, value, &self.config.date_format)?;

        let matches: Vec<Match> = self
            .read_rows()?
            .into_iter()
            .enumerate()
            .filter(|(_, row)| query.matches(&row.transaction))
            .map(|(position, row)| Match::new(position, row))
            .collect();

        debug!(column = %field, value, found = matches.len(), "search");
        Ok(ResultSet::new(matches))
    }

    /// Rows dated within `[start, end]`, oldest first, with income and
    /// expense totals.
    pub(crate) fn find_range(&self, start: NaiveDate, end: NaiveDate) -> Result<RangeReport> {
        if start > end {
            return Err(LedgerError::validation(
                "date",
                format!(
                    "start date {} is after end date {}",
                    start.format(&self.config.date_format),
                    end.format(&self.config.date_format)
                ),
            ));
        }

        let mut matches: Vec<Match> = self
            .read_rows()?
            .into_iter()
            .enumerate()
            .filter(|(_, row)| row.transaction.date >= start && row.transaction.date <= end)
            .map(|(position, row)| Match::new(position, row))
            .collect();
        // Stable, so rows sharing a date keep file order.
        matches.sort_by_key(|m| m.transaction().date);

        debug!(%start, %end, found = matches.len(), "range search");
        RangeReport::new(start, end, ResultSet::new(matches))
    }

    /// Overwrite one field of the row at 1-based `index` in `results`.
    /// Returns the updated transaction.
    pub(crate) fn edit(
        &self,
        results: &ResultSet,
        index: usize,
        field: Field,
        value: &str,
    ) -> Result<Transaction> {
        let target = results.get(index)?;
        let mut updated = target.transaction().clone();
        updated.set_field(field, value, &self.config.date_format)?;

        let mut rows = self.read_rows()?;
        self.verify(&rows, target)?;

        let new_text = updated.to_fields(&self.config.date_format)[field.index()].clone();
        let record: StringRecord = target
            .record()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i == field.index() {
                    new_text.as_str()
                } else {
                    text
                }
            })
            .collect();
        rows[target.position()] = StoredRow {
            record,
            transaction: updated.clone(),
        };
        self.write_rows(&rows)?;

        info!(row = target.position() + 1, field = %field, "edited transaction");
        Ok(updated)
    }

    /// Remove the selected rows of `results` from the ledger. Returns how
    /// many rows were removed.
    pub(crate) fn delete(&self, results: &ResultSet, selection: Selection) -> Result<usize> {
        let targets = results.select(selection)?;

        let rows = self.read_rows()?;
        for target in &targets {
            self.verify(&rows, target)?;
        }

        let doomed: HashSet<usize> = targets.iter().map(|m| m.position()).collect();
        let before = rows.len();
        let kept: Vec<StoredRow> = rows
            .into_iter()
            .enumerate()
            .filter(|(position, _)| !doomed.contains(position))
            .map(|(_, row)| row)
            .collect();
        let removed = before - kept.len();
        self.write_rows(&kept)?;

        info!(removed, remaining = kept.len(), "deleted transactions");
        Ok(removed)
    }

    // ── File access ───────────────────────────────────────────

    fn reader(&self) -> Result<csv::Reader<File>> {
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(self.path())?)
    }

    fn check_header(&self, header: &StringRecord) -> Result<()> {
        if header.iter().map(str::trim).eq(Field::names()) {
            Ok(())
        } else {
            Err(self.corrupt(
                1,
                format!(
                    "expected header '{}', found '{}'",
                    Field::names().join(","),
                    header.iter().collect::<Vec<_>>().join(",")
                ),
            ))
        }
    }

    fn read_rows(&self) -> Result<Vec<StoredRow>> {
        if !self.path().exists() {
            return Ok(Vec::new());
        }
        let mut rdr = self.reader()?;
        if rdr.headers()?.is_empty() {
            return Ok(Vec::new());
        }
        self.check_header(rdr.headers()?)?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<&str> = record.iter().collect();
            let transaction = Transaction::from_fields(&fields, &self.config.date_format)
                .map_err(|e| self.corrupt(line, e.to_string()))?;
            rows.push(StoredRow {
                record,
                transaction,
            });
        }
        Ok(rows)
    }

    /// Replace the whole file. The rows go to a temporary file next to the
    /// ledger which is then renamed over it, so a failed write leaves the
    /// old table intact.
    fn write_rows(&self, rows: &[StoredRow]) -> Result<()> {
        let dir = match self.path().parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(self.config.delimiter)
                .from_writer(tmp.as_file());
            wtr.write_record(Field::names())?;
            for row in rows {
                wtr.write_record(&row.record)?;
            }
            wtr.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(self.path())?;
        debug!(rows = rows.len(), path = %self.path().display(), "wrote ledger");
        Ok(())
    }

    /// A reference is only usable while the row it points at is unchanged.
    fn verify(&self, rows: &[StoredRow], target: &Match) -> Result<()> {
        match rows.get(target.position()) {
            Some(row) if row.record.iter().eq(target.record().iter()) => Ok(()),
            _ => {
                warn!(row = target.position() + 1, "ledger changed since search");
                Err(LedgerError::StaleReference {
                    position: target.position() + 1,
                })
            }
        }
    }

    fn corrupt(&self, line: u64, reason: String) -> LedgerError {
        LedgerError::Corrupt {
            path: self.path().to_path_buf(),
            line,
            reason,
        }
    }
}

/// Run `write` against the end of `file`. If it fails, the file is cut back
/// to its previous length so no partial row is left behind.
fn write_or_truncate(
    file: &mut File,
    write: impl FnOnce(&mut File) -> Result<()>,
) -> Result<()> {
    let original_len = file.metadata()?.len();
    let result = write(file);
    if let Err(e) = &result {
        warn!(error = %e, len = original_len, "append failed, truncating");
        file.set_len(original_len)?;
    }
    result
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
