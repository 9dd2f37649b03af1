use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Error;

pub(crate) fn open_csv(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

/// Reads every record of a CSV table, failing on the first malformed row.
///
/// `required` columns are checked against the header before any row is
/// parsed, so a missing column is reported by name.
pub(crate) fn deserialize_csv<T, R>(reader: R, required: &[&str]) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
    R: Read,
{
    deserialize_csv_checked(reader, |headers| require_columns(headers, required))
}

/// Like [`deserialize_csv`], with an arbitrary header check.
pub(crate) fn deserialize_csv_checked<T, R, F>(reader: R, check_headers: F) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
    R: Read,
    F: FnOnce(&csv::StringRecord) -> Result<(), Error>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    check_headers(reader.headers()?)?;

    reader
        .deserialize()
        .map(|record| record.map_err(row_error))
        .collect()
}

pub(crate) fn require_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<(), Error> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !has_column(headers, column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::DataFormat(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

pub(crate) fn has_column(headers: &csv::StringRecord, column: &str) -> bool {
    headers.iter().any(|header| header == column)
}

fn row_error(err: csv::Error) -> Error {
    let line = err.position().map(csv::Position::line);
    match line {
        Some(line) => Error::DataFormat(format!("line {line}: {err}")),
        None => Error::DataFormat(err.to_string()),
    }
}
