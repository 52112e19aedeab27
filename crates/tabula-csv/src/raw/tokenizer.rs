//! Character-level CSV tokenizer.
//!
//! The tokenizer is a state machine pulled one row at a time. Each call to
//! [`Iterator::next`] consumes characters until a row is complete and yields
//! it, or yields the structural error that ended the row. After a structural
//! error the rest of the row is skipped up to the next line terminator
//! outside quotes, and tokenizing resumes on the following line.

use crate::dialect::{BareQuotes, Dialect};
use crate::error::{Error, ParseError, Position};
use crate::raw::source::CharSource;
use crate::row::Row;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    InUnquotedField,
    InQuotedField,
    AfterQuoteInQuotedField,
}

/// Lazy stream of rows read from a [`CharSource`]
#[derive(Debug)]
pub struct Tokenizer<S> {
    source: S,
    dialect: Dialect,
    /// Position of the next character to be read
    position: Position,
    peeked: Option<char>,
    previous_was_cr: bool,
    resync: bool,
    finished: bool,
}

impl<S: CharSource> Tokenizer<S> {
    /// Create a tokenizer reading `source` under `dialect`
    pub fn new(source: S, dialect: Dialect) -> Self {
        Self {
            source,
            dialect,
            position: Position::start(),
            peeked: None,
            previous_was_cr: false,
            resync: false,
            finished: false,
        }
    }

    /// Dialect in use
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Position of the next unread character
    pub fn position(&self) -> Position {
        self.position
    }

    /// Borrow the character source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Return the character source
    pub fn into_inner(self) -> S {
        self.source
    }

    fn peek(&mut self) -> Result<Option<char>, Error> {
        if self.peeked.is_none() {
            self.peeked = self.source.next_char()?;
        }
        Ok(self.peeked)
    }

    /// Consume the next character along with its position
    fn bump(&mut self) -> Result<Option<(char, Position)>, Error> {
        let next = match self.peeked.take() {
            Some(c) => Some(c),
            None => self.source.next_char()?,
        };
        let Some(c) = next else {
            return Ok(None);
        };

        let at = self.position;
        self.position.offset += 1;
        match c {
            '\n' if self.previous_was_cr => {}
            '\n' | '\r' => {
                self.position.line += 1;
                self.position.column = 1;
            }
            _ => self.position.column += 1,
        }
        self.previous_was_cr = c == '\r';
        Ok(Some((c, at)))
    }

    /// Consume the `\n` of a `\r\n` pair after `c` ended a row
    fn finish_terminator(&mut self, c: char) -> Result<(), Error> {
        if c == '\r' && self.peek()? == Some('\n') {
            self.bump()?;
        }
        Ok(())
    }

    /// Skip the remainder of a malformed row.
    ///
    /// Stops after the next line terminator outside quotes. Called mid-field,
    /// so a quote only opens a quoted field after a separator.
    fn skip_line(&mut self) -> Result<(), Error> {
        let separator = self.dialect.separator();
        let quote = self.dialect.quote();
        let mut in_quotes = false;
        let mut after_quote = false;
        let mut field_start = false;

        while let Some((c, _)) = self.bump()? {
            if in_quotes {
                if c == quote {
                    in_quotes = false;
                    after_quote = true;
                }
                continue;
            }
            if after_quote && c == quote {
                // Escaped quote, still inside the field
                in_quotes = true;
                after_quote = false;
                continue;
            }
            after_quote = false;

            if c == '\n' || c == '\r' {
                return self.finish_terminator(c);
            }
            if c == separator {
                field_start = true;
                continue;
            }
            if c == quote && field_start {
                in_quotes = true;
            }
            field_start = false;
        }
        Ok(())
    }

    fn read_row(&mut self) -> Result<Option<Row>, Error> {
        let separator = self.dialect.separator();
        let quote = self.dialect.quote();

        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = State::FieldStart;
        let mut quote_start = self.position;

        loop {
            let Some((c, at)) = self.bump()? else {
                return match state {
                    State::FieldStart if fields.is_empty() => Ok(None),
                    State::InQuotedField => Err(ParseError::UnterminatedQuote {
                        position: quote_start,
                    }
                    .into()),
                    _ => {
                        fields.push(field);
                        Ok(Some(Row::new(fields)))
                    }
                };
            };
            let is_terminator = c == '\n' || c == '\r';

            match state {
                State::FieldStart => {
                    if c == quote {
                        quote_start = at;
                        state = State::InQuotedField;
                    } else if c == separator {
                        fields.push(String::new());
                    } else if is_terminator {
                        self.finish_terminator(c)?;
                        fields.push(String::new());
                        return Ok(Some(Row::new(fields)));
                    } else {
                        field.push(c);
                        state = State::InUnquotedField;
                    }
                }
                State::InUnquotedField => {
                    if c == separator {
                        fields.push(std::mem::take(&mut field));
                        state = State::FieldStart;
                    } else if is_terminator {
                        self.finish_terminator(c)?;
                        fields.push(field);
                        return Ok(Some(Row::new(fields)));
                    } else if c == quote && self.dialect.bare_quotes() == BareQuotes::Strict {
                        self.resync = true;
                        return Err(ParseError::BareQuote { position: at }.into());
                    } else {
                        field.push(c);
                    }
                }
                State::InQuotedField => {
                    if c == quote {
                        state = State::AfterQuoteInQuotedField;
                    } else {
                        field.push(c);
                    }
                }
                State::AfterQuoteInQuotedField => {
                    if c == quote {
                        field.push(quote);
                        state = State::InQuotedField;
                    } else if c == separator {
                        fields.push(std::mem::take(&mut field));
                        state = State::FieldStart;
                    } else if is_terminator {
                        self.finish_terminator(c)?;
                        fields.push(field);
                        return Ok(Some(Row::new(fields)));
                    } else {
                        self.resync = true;
                        return Err(ParseError::UnexpectedCharAfterQuote {
                            position: at,
                            found: c,
                        }
                        .into());
                    }
                }
            }
        }
    }
}

impl<S: CharSource> Iterator for Tokenizer<S> {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.resync {
            self.resync = false;
            if let Err(e) = self.skip_line() {
                self.finished = true;
                return Some(Err(e));
            }
        }

        match self.read_row() {
            Ok(Some(row)) => {
                trace!(fields = row.len(), line = self.position.line, "tokenized row");
                Some(Ok(row))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                match &e {
                    Error::Parse(parse) => {
                        warn!(error = %parse, "malformed row, skipping to next line");
                        // Nothing left to resync against
                        if matches!(parse, ParseError::UnterminatedQuote { .. }) {
                            self.finished = true;
                        }
                    }
                    _ => self.finished = true,
                }
                Some(Err(e))
            }
        }
    }
}

/// Tokenize a string under `dialect`
pub fn tokenize(input: &str, dialect: Dialect) -> Tokenizer<std::str::Chars<'_>> {
    Tokenizer::new(input.chars(), dialect)
}
