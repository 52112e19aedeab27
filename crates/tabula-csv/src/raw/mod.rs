//! Raw CSV layer: characters to rows of strings and back.
//!
//! Nothing here knows about types. The [`Tokenizer`] splits a character
//! stream into [`Row`](crate::Row)s following RFC 4180-style quoting, and the
//! serializer functions turn rows back into text using the same rules.

mod serializer;
mod source;
mod tokenizer;

pub use serializer::{serialize_document, serialize_field, serialize_row, write_field, write_row};
pub use source::{CharSource, IterSource, Utf8Source};
pub use tokenizer::{Tokenizer, tokenize};
