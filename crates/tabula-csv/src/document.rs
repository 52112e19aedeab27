//! Whole-document parsing and formatting.

use crate::codec::RowCodec;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::raw::{serialize_document, tokenize};
use crate::row::Row;
use std::fmt;

/// A fully materialized CSV document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Header row, present when parsed with a header dialect
    headers: Option<Row>,
    /// Data rows
    rows: Vec<Row>,
    /// Dialect used by [`Display`](fmt::Display)
    dialect: Dialect,
}

impl Document {
    /// Create a document without a header
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            headers: None,
            rows,
            dialect: Dialect::default(),
        }
    }

    /// Create a document with a header row
    #[must_use]
    pub fn with_headers(headers: Row, rows: Vec<Row>) -> Self {
        Self {
            headers: Some(headers),
            rows,
            dialect: Dialect::default(),
        }
    }

    /// Parse CSV text, stopping at the first structural error.
    ///
    /// When the dialect has a header, the first row becomes
    /// [`headers`](Self::headers) and is not counted as data. The dialect is
    /// kept for formatting.
    pub fn parse(text: &str, dialect: Dialect) -> Result<Self> {
        let mut rows = tokenize(text, dialect);
        let headers = if dialect.has_header() {
            rows.next().transpose()?
        } else {
            None
        };
        let rows = rows.collect::<Result<Vec<_>>>()?;
        Ok(Self {
            headers,
            rows,
            dialect,
        })
    }

    /// Use `dialect` when formatting with [`Display`](fmt::Display)
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Dialect the document was parsed with, or the default
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Header row, if any
    #[must_use]
    pub fn headers(&self) -> Option<&Row> {
        self.headers.as_ref()
    }

    /// Position of the column named `name` in the header
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    /// Data rows
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Data row at `index`
    #[must_use]
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a data row
    pub fn push_row(&mut self, row: impl Into<Row>) {
        self.rows.push(row.into());
    }

    /// Iterate over data rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Decode every data row, failing on the first row that does not decode
    pub fn decode_all<C: RowCodec>(&self, codec: &C) -> Result<Vec<C::Value>> {
        self.rows
            .iter()
            .zip(1u64..)
            .map(|(row, record)| {
                codec
                    .decode(row.fields())
                    .map_err(|source| Error::Decode { record, source })
            })
            .collect()
    }

    /// Format as CSV text, header first, every row terminated
    #[must_use]
    pub fn to_csv(&self, dialect: &Dialect) -> String {
        let all: Vec<&Row> = self.headers.iter().chain(&self.rows).collect();
        serialize_document(&all, dialect)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv(&self.dialect))
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
