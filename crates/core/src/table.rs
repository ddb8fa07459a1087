//! Raw tabular data as read from a station log.
//!
//! Cells are kept as text; typing happens in the loader and the feature
//! builder, each with its own tolerance for malformed values.

use std::fmt;

/// A header row plus untyped data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from a header and its rows.
    ///
    /// Rows shorter than the header are allowed; missing cells read as absent.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Names from `required` that are not present, in the order given.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect()
    }

    /// Borrowed view of row `i`.
    pub fn record(&self, i: usize) -> Option<Record<'_>> {
        self.rows.get(i).map(|values| Record {
            headers: &self.headers,
            values,
        })
    }

    /// All rows in table order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(move |values| Record {
            headers: &self.headers,
            values,
        })
    }

    /// Cell values of one column; absent cells read as the empty string.
    pub fn column_values(&self, index: usize) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// One row of a [`Table`], with access to its header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    /// Cell under the named column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Raw cell values in header order.
    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// Header of the owning table.
    pub fn headers(&self) -> &'a [String] {
        self.headers
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}
