//! Typed CSV codec
//!
#![allow(clippy::doc_markdown)] // CSV, RFC and dialect terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::float_cmp)] // Exact round-trip assertions
#![allow(clippy::needless_pass_by_value)] // Dialect is passed by value like configuration
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::redundant_closure_for_method_calls)] // Iterator chains
#![allow(clippy::missing_errors_doc)] // Error enums document their variants
//! This crate turns character streams into rows of raw fields and typed
//! records, and back again.
//!
//! # Layers
//!
//! - **Raw**: [`raw::Tokenizer`] splits characters into [`Row`]s following
//!   RFC 4180-style quoting; [`raw::serialize_row`] writes them back.
//! - **Cells**: [`Cell`] classifies a single field as empty, plain or quoted.
//! - **Codecs**: [`codec::CellCodec`] converts one field to a value;
//!   [`codec::RowCodec`] converts a row, usually as a tuple of cell codecs.
//! - **Streams**: [`CsvReader`] and [`CsvWriter`] own an I/O handle and move
//!   rows or records through it lazily.
//!
//! Structural problems are [`ParseError`]s and affect only their own row.
//! Conversion problems are [`DecodeError`]s and are reported per record.
//!
//! # Example
//!
//! ```
//! use tabula_csv::{Dialect, Document};
//! use tabula_csv::codec::{BoolCodec, IntCodec, RowCodec, StringCodec};
//! use tabula_csv::outcome::sequence;
//!
//! let text = "1,Nicolas,true\n2,Kazuma,28\n3,John,false\n";
//! let document = Document::parse(text, Dialect::default()).expect("valid CSV");
//!
//! let codec = (IntCodec::<i32>::new(), StringCodec, BoolCodec::default());
//! let results: Vec<_> = document.iter().map(|row| codec.decode(row.fields())).collect();
//!
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! assert!(results[2].is_ok());
//! assert!(sequence(results).is_err());
//! ```

#![warn(missing_docs)]

pub mod cell;
pub mod codec;
pub mod dialect;
pub mod document;
pub mod error;
pub mod outcome;
pub mod raw;
/// Raw rows of field strings
pub mod row;
pub mod stream;

pub use cell::Cell;
pub use dialect::{BareQuotes, Dialect, DialectBuilder, LineTerminator, QuotingPolicy};
pub use document::Document;
pub use error::{DecodeError, DecodeResult, DialectError, Error, ParseError, Position, Result};
pub use row::Row;
pub use stream::{CsvReader, CsvWriter, RecordWriter};
