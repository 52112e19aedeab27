//! Error types for CSV tokenizing, decoding and dialect configuration.
//!
//! Errors are split by layer:
//! - [`ParseError`]: structural problems found by the tokenizer (bad quoting)
//! - [`DecodeError`]: a well-formed row whose cells do not fit the codec
//! - [`DialectError`]: an inconsistent dialect rejected at construction
//!
//! [`Error`] wraps all of them together with I/O failures and is what the
//! streaming reader and writer report.

use std::fmt;
use thiserror::Error;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result of decoding a cell or a row
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Location of a character in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 0-based character offset from the start of the input
    pub offset: u64,
    /// 1-based line number
    pub line: u64,
    /// 1-based column, counted in characters
    pub column: u64,
}

impl Position {
    /// Position of the first character of an input
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Structural error found while tokenizing.
///
/// A parse error invalidates the row it occurs in; the tokenizer resumes at
/// the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended inside a quoted field
    #[error("Unterminated quoted field starting at {position}")]
    UnterminatedQuote {
        /// Position of the opening quote
        position: Position,
    },

    /// A closing quote was followed by something other than a quote,
    /// separator or line terminator
    #[error("Unexpected character {found:?} after closing quote at {position}")]
    UnexpectedCharAfterQuote {
        /// Position of the offending character
        position: Position,
        /// The offending character
        found: char,
    },

    /// Quote character inside an unquoted field (strict dialects only)
    #[error("Bare quote in unquoted field at {position}")]
    BareQuote {
        /// Position of the quote character
        position: Position,
    },
}

impl ParseError {
    /// Position the error was detected at
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnterminatedQuote { position }
            | Self::UnexpectedCharAfterQuote { position, .. }
            | Self::BareQuote { position } => *position,
        }
    }
}

/// Semantic error raised when a row does not fit a codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The cell is present but cannot be read as the target type
    #[error("Cannot decode {raw:?} as {target}")]
    TypeError {
        /// Raw cell text
        raw: String,
        /// Name of the target type
        target: String,
    },

    /// The row has fewer cells than the codec requires
    #[error("Index {index} out of bounds for row of length {row_length}")]
    OutOfBounds {
        /// Highest index the codec needed
        index: usize,
        /// Number of cells in the row
        row_length: usize,
    },
}

impl DecodeError {
    /// Build a type error for `raw` against the named target type
    pub fn type_error(raw: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TypeError {
            raw: raw.into(),
            target: target.into(),
        }
    }
}

/// Invalid dialect configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// Separator and quote are the same character
    #[error("Separator and quote must differ, both are {0:?}")]
    SeparatorIsQuote(char),

    /// A line break character was configured as separator or quote
    #[error("{role} cannot be a line break character, got {ch:?}")]
    LineBreak {
        /// Which option carried the line break
        role: &'static str,
        /// The rejected character
        ch: char,
    },
}

/// Errors reported by readers, writers and whole-document helpers
#[derive(Debug, Error)]
pub enum Error {
    /// Structural CSV error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A record could not be decoded
    #[error("Record {record}: {source}")]
    Decode {
        /// 1-based index of the data record (header excluded)
        record: u64,
        /// Underlying decode failure
        #[source]
        source: DecodeError,
    },

    /// Invalid dialect
    #[error("Invalid dialect: {0}")]
    Dialect(#[from] DialectError),

    /// Text that should hold one encoded cell held several fields or rows
    #[error("Expected a single field, found {0}")]
    NotSingleField(usize),

    /// I/O error from the underlying source or sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The decode error carried by this error, if any
    #[must_use]
    pub const fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The parse error carried by this error, if any
    #[must_use]
    pub const fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}
