//! Dialect configuration: separator, quote, header and quoting conventions.
//!
//! A [`Dialect`] is always valid once constructed. Invalid combinations are
//! rejected by [`DialectBuilder::build`] so the tokenizer never has to cope
//! with an ambiguous configuration.
//!
//! # Example
//!
//! ```
//! use tabula_csv::{Dialect, QuotingPolicy};
//!
//! let dialect = Dialect::builder()
//!     .separator(';')
//!     .has_header(true)
//!     .quoting(QuotingPolicy::Always)
//!     .build()
//!     .expect("valid dialect");
//! assert_eq!(dialect.separator(), ';');
//!
//! assert!(Dialect::builder().separator('"').build().is_err());
//! ```

use crate::error::DialectError;

/// When the writer wraps fields in quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum QuotingPolicy {
    /// Quote only fields containing the separator, quote, CR or LF
    #[default]
    Minimal,
    /// Quote every field
    Always,
}

/// Line terminator emitted after each written row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineTerminator {
    /// Literal terminator text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

/// Handling of a quote character inside an unquoted field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BareQuotes {
    /// Keep the quote as a literal character (`a"b` reads as `a"b`)
    #[default]
    Lenient,
    /// Reject the row with [`ParseError::BareQuote`](crate::ParseError::BareQuote)
    Strict,
}

/// Parsing and writing conventions for one CSV session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DialectBuilder", into = "DialectBuilder")
)]
pub struct Dialect {
    separator: char,
    quote: char,
    has_header: bool,
    quoting: QuotingPolicy,
    line_terminator: LineTerminator,
    bare_quotes: BareQuotes,
}

impl Dialect {
    /// Default field separator
    pub const DEFAULT_SEPARATOR: char = ',';
    /// Default quote character
    pub const DEFAULT_QUOTE: char = '"';

    /// Start building a dialect from the defaults
    #[must_use]
    pub fn builder() -> DialectBuilder {
        DialectBuilder::new()
    }

    /// Tab-separated values with `"` quoting
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            separator: '\t',
            ..Self::DEFAULT
        }
    }

    /// RFC 4180: CRLF row terminator, bare quotes rejected
    #[must_use]
    pub const fn rfc4180() -> Self {
        Self {
            line_terminator: LineTerminator::CrLf,
            bare_quotes: BareQuotes::Strict,
            ..Self::DEFAULT
        }
    }

    const DEFAULT: Self = Self {
        separator: Self::DEFAULT_SEPARATOR,
        quote: Self::DEFAULT_QUOTE,
        has_header: false,
        quoting: QuotingPolicy::Minimal,
        line_terminator: LineTerminator::Lf,
        bare_quotes: BareQuotes::Lenient,
    };

    /// Field separator
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Quote character
    #[must_use]
    pub const fn quote(&self) -> char {
        self.quote
    }

    /// Whether the first row is a header
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.has_header
    }

    /// Writer quoting policy
    #[must_use]
    pub const fn quoting(&self) -> QuotingPolicy {
        self.quoting
    }

    /// Writer line terminator
    #[must_use]
    pub const fn line_terminator(&self) -> LineTerminator {
        self.line_terminator
    }

    /// Bare quote handling in unquoted fields
    #[must_use]
    pub const fn bare_quotes(&self) -> BareQuotes {
        self.bare_quotes
    }

    /// Copy of this dialect with the header flag changed
    #[must_use]
    pub const fn with_header(self, has_header: bool) -> Self {
        Self { has_header, ..self }
    }

    /// Whether `value` must be quoted to survive a round trip
    #[must_use]
    pub fn requires_quoting(&self, value: &str) -> bool {
        value
            .chars()
            .any(|c| c == self.separator || c == self.quote || c == '\r' || c == '\n')
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builder for [`Dialect`] that validates on [`build`](Self::build)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DialectBuilder {
    separator: char,
    quote: char,
    has_header: bool,
    quoting: QuotingPolicy,
    line_terminator: LineTerminator,
    bare_quotes: BareQuotes,
}

impl DialectBuilder {
    /// Create a builder holding the default dialect
    #[must_use]
    pub fn new() -> Self {
        Dialect::DEFAULT.into()
    }

    /// Set the field separator
    pub fn separator(&mut self, separator: char) -> &mut Self {
        self.separator = separator;
        self
    }

    /// Set the quote character
    pub fn quote(&mut self, quote: char) -> &mut Self {
        self.quote = quote;
        self
    }

    /// Treat the first row as a header
    pub fn has_header(&mut self, has_header: bool) -> &mut Self {
        self.has_header = has_header;
        self
    }

    /// Set the writer quoting policy
    pub fn quoting(&mut self, quoting: QuotingPolicy) -> &mut Self {
        self.quoting = quoting;
        self
    }

    /// Set the writer line terminator
    pub fn line_terminator(&mut self, line_terminator: LineTerminator) -> &mut Self {
        self.line_terminator = line_terminator;
        self
    }

    /// Set bare quote handling
    pub fn bare_quotes(&mut self, bare_quotes: BareQuotes) -> &mut Self {
        self.bare_quotes = bare_quotes;
        self
    }

    /// Validate and build the dialect
    pub fn build(&self) -> Result<Dialect, DialectError> {
        for (role, ch) in [("Separator", self.separator), ("Quote", self.quote)] {
            if ch == '\r' || ch == '\n' {
                return Err(DialectError::LineBreak { role, ch });
            }
        }
        if self.separator == self.quote {
            return Err(DialectError::SeparatorIsQuote(self.separator));
        }

        Ok(Dialect {
            separator: self.separator,
            quote: self.quote,
            has_header: self.has_header,
            quoting: self.quoting,
            line_terminator: self.line_terminator,
            bare_quotes: self.bare_quotes,
        })
    }
}

impl Default for DialectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Dialect> for DialectBuilder {
    fn from(dialect: Dialect) -> Self {
        Self {
            separator: dialect.separator,
            quote: dialect.quote,
            has_header: dialect.has_header,
            quoting: dialect.quoting,
            line_terminator: dialect.line_terminator,
            bare_quotes: dialect.bare_quotes,
        }
    }
}

impl TryFrom<DialectBuilder> for Dialect {
    type Error = DialectError;

    fn try_from(builder: DialectBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
