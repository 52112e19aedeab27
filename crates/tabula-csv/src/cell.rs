//! The three syntactic forms of a CSV field.
//!
//! A cell is classified purely from the characters in its logical value:
//!
//! | Form | Value contains | Encoded as |
//! |---|---|---|
//! | `Empty` | nothing | nothing |
//! | `NonEscaped` | no separator, quote, CR or LF | the value |
//! | `Escaped` | at least one of them | quoted, inner quotes doubled |
//!
//! Under [`QuotingPolicy::Always`] every form is written quoted; the
//! classification itself does not change.

use crate::dialect::{Dialect, QuotingPolicy};
use crate::error::Error;
use crate::raw::tokenize;

/// One CSV field in its syntactic form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Zero-length field
    Empty,
    /// Field that can be written as-is
    NonEscaped(String),
    /// Field that must be quoted
    Escaped(String),
}

impl Cell {
    /// Classify `value` under the default dialect
    pub fn new(value: impl Into<String>) -> Self {
        Self::classify(value, &Dialect::default())
    }

    /// Classify `value` under `dialect`
    pub fn classify(value: impl Into<String>, dialect: &Dialect) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else if dialect.requires_quoting(&value) {
            Self::Escaped(value)
        } else {
            Self::NonEscaped(value)
        }
    }

    /// Logical content of the cell
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::NonEscaped(value) | Self::Escaped(value) => value,
        }
    }

    /// Take the logical content out of the cell
    #[must_use]
    pub fn into_value(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::NonEscaped(value) | Self::Escaped(value) => value,
        }
    }

    /// Whether the cell must be quoted regardless of quoting policy
    #[must_use]
    pub fn is_escaped(&self) -> bool {
        matches!(self, Self::Escaped(_))
    }

    /// Literal CSV text for this cell under `dialect`
    #[must_use]
    pub fn encoded(&self, dialect: &Dialect) -> String {
        let value = self.value();
        let mut out = String::with_capacity(value.len() + 2);
        if self.is_escaped() || dialect.quoting() == QuotingPolicy::Always {
            push_quoted(&mut out, value, dialect.quote());
        } else {
            out.push_str(value);
        }
        out
    }

    /// Read a cell back from its literal CSV text.
    ///
    /// The text must hold exactly one field. Quoting errors surface as
    /// [`Error::Parse`]; text spanning several fields or rows is
    /// [`Error::NotSingleField`].
    pub fn decode(encoded: &str, dialect: &Dialect) -> Result<Self, Error> {
        let mut rows = tokenize(encoded, *dialect);
        let Some(row) = rows.next() else {
            return Ok(Self::Empty);
        };
        let mut fields = row?.into_fields();

        let extra_rows = rows.count();
        if fields.len() != 1 || extra_rows > 0 {
            return Err(Error::NotSingleField(fields.len() + extra_rows));
        }

        Ok(fields
            .pop()
            .map_or(Self::Empty, |value| Self::classify(value, dialect)))
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.into_value()
    }
}

/// Append the encoding of `value` to `out`, quoting as the dialect requires
pub(crate) fn encode_into(out: &mut String, value: &str, dialect: &Dialect) {
    if dialect.quoting() == QuotingPolicy::Always || dialect.requires_quoting(value) {
        push_quoted(out, value, dialect.quote());
    } else {
        out.push_str(value);
    }
}

fn push_quoted(out: &mut String, value: &str, quote: char) {
    out.push(quote);
    for c in value.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
}
