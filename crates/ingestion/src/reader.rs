//! CSV reading into an untyped [`Table`].

use std::io::Read;
use std::path::Path;
use weather_core::{Error, Result, Table};

/// Read a station CSV file from disk.
///
/// A missing path is reported as [`Error::NotFound`]; anything that goes
/// wrong while reading an existing file is a validation failure.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| Error::validation(format!("could not read CSV: {e}")))?;
    read_csv(file)
}

/// Read CSV text with a header row.
///
/// Short rows are kept (their missing cells read as empty); a row with more
/// cells than the header is a tokenizing failure.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::validation(format!("could not read CSV: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| Error::validation(format!("could not read CSV: {e}")))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(Error::validation(format!(
                "could not read CSV: expected {} fields, saw {} at line {line}",
                headers.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(Error::validation("CSV is empty"));
    }

    Ok(Table::new(headers, rows))
}
