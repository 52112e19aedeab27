//! Serialization of raw rows to CSV text.

use crate::cell::encode_into;
use crate::dialect::Dialect;

/// Append one encoded field to `out`
pub fn write_field(out: &mut String, field: &str, dialect: &Dialect) {
    encode_into(out, field, dialect);
}

/// Encode one field
#[must_use]
pub fn serialize_field(field: &str, dialect: &Dialect) -> String {
    let mut out = String::with_capacity(field.len() + 2);
    write_field(&mut out, field, dialect);
    out
}

/// Append one row to `out`, fields joined by the separator.
///
/// No line terminator is written.
pub fn write_row<S: AsRef<str>>(out: &mut String, fields: &[S], dialect: &Dialect) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(dialect.separator());
        }
        write_field(out, field.as_ref(), dialect);
    }
}

/// Encode one row without a line terminator
#[must_use]
pub fn serialize_row<S: AsRef<str>>(fields: &[S], dialect: &Dialect) -> String {
    let mut out = String::new();
    write_row(&mut out, fields, dialect);
    out
}

/// Encode rows, each followed by the dialect's line terminator
#[must_use]
pub fn serialize_document<R, S>(rows: &[R], dialect: &Dialect) -> String
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let terminator = dialect.line_terminator().as_str();
    let mut out = String::new();
    for row in rows {
        write_row(&mut out, row.as_ref(), dialect);
        out.push_str(terminator);
    }
    out
}
