//! Typed codecs over raw CSV fields.
//!
//! Codecs are plain values passed explicitly at call sites. A [`CellCodec`]
//! converts one field; a [`RowCodec`] converts a whole row and is usually a
//! tuple of cell codecs, optionally mapped to a record type with
//! [`RecordCodec`].
//!
//! # Example
//!
//! ```
//! use tabula_csv::codec::{CellCodec, RowCodec, defaults};
//!
//! assert_eq!(defaults::INT.decode("-42"), Ok(-42));
//! assert!(defaults::BOOLEAN.decode("yes").is_err());
//!
//! let pair = (defaults::STRING, defaults::DOUBLE.optional());
//! let row = vec!["pi".to_string(), String::new()];
//! assert_eq!(pair.decode(&row), Ok(("pi".to_string(), None)));
//! ```

mod cell;
mod row;

pub use cell::{
    BoolCase, BoolCodec, CellCodec, CharCodec, Float, FloatCodec, IntCodec, Integer, MapCodec,
    OptionCodec, StringCodec,
};
pub use row::{RawRowCodec, RecordCodec, RowCodec};

/// Ready-made codec values for the primitive types
pub mod defaults {
    use super::{BoolCodec, BoolCase, CharCodec, FloatCodec, IntCodec, StringCodec};

    /// `i8`
    pub const BYTE: IntCodec<i8> = IntCodec::new();
    /// `i16`
    pub const SHORT: IntCodec<i16> = IntCodec::new();
    /// `i32`
    pub const INT: IntCodec<i32> = IntCodec::new();
    /// `i64`
    pub const LONG: IntCodec<i64> = IntCodec::new();
    /// `i128`
    pub const BIG_INT: IntCodec<i128> = IntCodec::new();
    /// `isize`
    pub const SIZE: IntCodec<isize> = IntCodec::new();
    /// `u8`
    pub const UNSIGNED_BYTE: IntCodec<u8> = IntCodec::new();
    /// `u16`
    pub const UNSIGNED_SHORT: IntCodec<u16> = IntCodec::new();
    /// `u32`
    pub const UNSIGNED_INT: IntCodec<u32> = IntCodec::new();
    /// `u64`
    pub const UNSIGNED_LONG: IntCodec<u64> = IntCodec::new();
    /// `u128`
    pub const UNSIGNED_BIG_INT: IntCodec<u128> = IntCodec::new();
    /// `usize`
    pub const UNSIGNED_SIZE: IntCodec<usize> = IntCodec::new();
    /// `f32`
    pub const FLOAT: FloatCodec<f32> = FloatCodec::new();
    /// `f64`
    pub const DOUBLE: FloatCodec<f64> = FloatCodec::new();
    /// `bool`, exact case
    pub const BOOLEAN: BoolCodec = BoolCodec::new(BoolCase::Exact);
    /// `char`
    pub const CHAR: CharCodec = CharCodec;
    /// `String`
    pub const STRING: StringCodec = StringCodec;
}
