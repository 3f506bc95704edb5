use std::io::Read;

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use tracing::info;

use crate::{
    domain::record::SalesRecord,
    error::{Error, Result},
    fetch::{fetch, FetchOptions},
};

const FIELDS_PER_RECORD: usize = 4;

/// Fetch the sales file at `location` and parse every row of it.
pub fn load(location: &str, options: &FetchOptions) -> Result<Vec<SalesRecord>> {
    let bytes = fetch(location, options)?;
    let text = std::str::from_utf8(&bytes).map_err(|err| {
        let valid = &bytes[..err.valid_up_to()];
        Error::MalformedRecord {
            line: valid.iter().filter(|&&b| b == b'\n').count() as u64 + 1,
            reason: err.to_string(),
        }
    })?;

    let records = read(text.as_bytes())?;
    info!(location, records = records.len(), "loaded sales records");
    Ok(records)
}

/// Parse [`SalesRecord`]s from a reader.
///
/// There is no header row: every non-empty line is a record of exactly four
/// columns. Blank lines are skipped. Text columns are kept exactly as written;
/// only the numeric columns are trimmed before coercion. The first row that
/// doesn't fit aborts the whole read, so callers never see a partial result.
pub fn read(reader: impl Read) -> Result<Vec<SalesRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|row| row.map_err(malformed).and_then(|row| parse_row(&row)))
        .collect()
}

fn parse_row(row: &StringRecord) -> Result<SalesRecord> {
    let line = row.position().map_or(0, |pos| pos.line());

    if row.len() != FIELDS_PER_RECORD {
        return Err(Error::MalformedRecord {
            line,
            reason: format!("expected {FIELDS_PER_RECORD} fields, found {}", row.len()),
        });
    }

    let record: SalesRecord = row.deserialize(None).map_err(|err| Error::MalformedRecord {
        line,
        reason: match err.kind() {
            ErrorKind::Deserialize { err, .. } => err.to_string(),
            _ => err.to_string(),
        },
    })?;

    if record.line_total().is_none() {
        return Err(Error::MalformedRecord {
            line,
            reason: format!(
                "line total of {} x {} is too large to represent",
                record.quantity, record.unit_price
            ),
        });
    }

    Ok(record)
}

fn malformed(err: csv::Error) -> Error {
    Error::MalformedRecord {
        line: err.position().map_or(0, |pos| pos.line()),
        reason: err.to_string(),
    }
}
