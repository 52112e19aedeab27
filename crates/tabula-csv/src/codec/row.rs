//! Row-level codecs composed from cell codecs.
//!
//! A tuple of [`CellCodec`]s is itself a [`RowCodec`] whose value is the
//! tuple of decoded values. [`RecordCodec`] maps that tuple to and from a
//! record type:
//!
//! ```
//! use tabula_csv::codec::{BoolCodec, IntCodec, RecordCodec, RowCodec, StringCodec};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: i32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let codec = RecordCodec::new(
//!     (IntCodec::<i32>::new(), StringCodec, BoolCodec::default()),
//!     |(id, name, active)| User { id, name, active },
//!     |u: &User| (u.id, u.name.clone(), u.active),
//! );
//!
//! let row = vec!["1".to_string(), "Nicolas".to_string(), "true".to_string()];
//! let user = codec.decode(&row).expect("valid row");
//! assert_eq!(user.name, "Nicolas");
//! assert_eq!(codec.encode(&user), row);
//! ```

use crate::codec::cell::CellCodec;
use crate::error::{DecodeError, DecodeResult};
use crate::row::Row;
use std::fmt;
use std::marker::PhantomData;

/// Bidirectional conversion between a row of raw fields and a typed value
pub trait RowCodec {
    /// Decoded value type
    type Value;

    /// Number of leading fields the codec reads and writes
    fn arity(&self) -> usize;

    /// Decode a row.
    ///
    /// Rows shorter than [`arity`](Self::arity) fail with
    /// [`DecodeError::OutOfBounds`] before any cell is decoded. Cells are
    /// decoded left to right and the first failure is returned. Fields past
    /// the arity are ignored.
    fn decode(&self, row: &[String]) -> DecodeResult<Self::Value>;

    /// Encode a value as exactly [`arity`](Self::arity) fields
    fn encode(&self, value: &Self::Value) -> Vec<String>;
}

impl<C: RowCodec + ?Sized> RowCodec for &C {
    type Value = C::Value;

    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn decode(&self, row: &[String]) -> DecodeResult<Self::Value> {
        (**self).decode(row)
    }

    fn encode(&self, value: &Self::Value) -> Vec<String> {
        (**self).encode(value)
    }
}

fn check_arity(row: &[String], arity: usize) -> DecodeResult<()> {
    if row.len() < arity {
        return Err(DecodeError::OutOfBounds {
            index: arity - 1,
            row_length: row.len(),
        });
    }
    Ok(())
}

macro_rules! impl_tuple_codec {
    ($arity:literal => $($codec:ident $idx:tt),+) => {
        impl<$($codec: CellCodec),+> RowCodec for ($($codec,)+) {
            type Value = ($($codec::Value,)+);

            fn arity(&self) -> usize {
                $arity
            }

            fn decode(&self, row: &[String]) -> DecodeResult<Self::Value> {
                check_arity(row, $arity)?;
                Ok(($(self.$idx.decode(&row[$idx])?,)+))
            }

            fn encode(&self, value: &Self::Value) -> Vec<String> {
                vec![$(self.$idx.encode(&value.$idx)),+]
            }
        }
    };
}

impl_tuple_codec!(1 => A 0);
impl_tuple_codec!(2 => A 0, B 1);
impl_tuple_codec!(3 => A 0, B 1, C 2);
impl_tuple_codec!(4 => A 0, B 1, C 2, D 3);
impl_tuple_codec!(5 => A 0, B 1, C 2, D 3, E 4);
impl_tuple_codec!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple_codec!(7 => A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple_codec!(8 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple_codec!(9 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple_codec!(10 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_tuple_codec!(11 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_tuple_codec!(12 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

/// Row codec mapping the value of an inner codec to a record type
pub struct RecordCodec<C, T, F, G> {
    cells: C,
    from_cells: F,
    to_cells: G,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T, F, G> RecordCodec<C, T, F, G>
where
    C: RowCodec,
    F: Fn(C::Value) -> T,
    G: Fn(&T) -> C::Value,
{
    /// Compose `cells` with the record constructor `from_cells` and the
    /// projection `to_cells`
    pub fn new(cells: C, from_cells: F, to_cells: G) -> Self {
        Self {
            cells,
            from_cells,
            to_cells,
            _marker: PhantomData,
        }
    }

    /// The composed cell codecs
    pub fn cells(&self) -> &C {
        &self.cells
    }
}

impl<C, T, F, G> RowCodec for RecordCodec<C, T, F, G>
where
    C: RowCodec,
    F: Fn(C::Value) -> T,
    G: Fn(&T) -> C::Value,
{
    type Value = T;

    fn arity(&self) -> usize {
        self.cells.arity()
    }

    fn decode(&self, row: &[String]) -> DecodeResult<T> {
        self.cells.decode(row).map(&self.from_cells)
    }

    fn encode(&self, value: &T) -> Vec<String> {
        self.cells.encode(&(self.to_cells)(value))
    }
}

impl<C: fmt::Debug, T, F, G> fmt::Debug for RecordCodec<C, T, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCodec")
            .field("cells", &self.cells)
            .finish_non_exhaustive()
    }
}

/// Untyped codec passing raw fields through as a [`Row`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawRowCodec;

impl RowCodec for RawRowCodec {
    type Value = Row;

    fn arity(&self) -> usize {
        0
    }

    fn decode(&self, row: &[String]) -> DecodeResult<Row> {
        Ok(Row::new(row.to_vec()))
    }

    fn encode(&self, value: &Row) -> Vec<String> {
        value.fields().to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::cell::{BoolCodec, FloatCodec, IntCodec, StringCodec};
    use crate::outcome::sequence;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: i32,
        name: String,
        active: bool,
    }

    fn user_codec() -> impl RowCodec<Value = User> {
        RecordCodec::new(
            (IntCodec::<i32>::new(), StringCodec, BoolCodec::default()),
            |(id, name, active)| User { id, name, active },
            |u: &User| (u.id, u.name.clone(), u.active),
        )
    }

    fn raw(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_string()).collect()
    }

    #[test]
    fn test_decode_rows_independently() {
        let codec = user_codec();
        let rows = [
            raw(&["1", "Nicolas", "true"]),
            raw(&["2", "Kazuma", "28"]),
            raw(&["3", "John", "false"]),
        ];

        let results: Vec<_> = rows.iter().map(|r| codec.decode(r)).collect();
        assert_eq!(
            results[0],
            Ok(User {
                id: 1,
                name: "Nicolas".to_string(),
                active: true
            })
        );
        assert_eq!(results[1], Err(DecodeError::type_error("28", "Boolean")));
        assert_eq!(
            results[2],
            Ok(User {
                id: 3,
                name: "John".to_string(),
                active: false
            })
        );

        assert_eq!(
            sequence(results),
            Err(DecodeError::type_error("28", "Boolean"))
        );
    }

    #[test]
    fn test_short_row_out_of_bounds() {
        let codec = user_codec();
        assert_eq!(
            codec.decode(&raw(&["1", "Nicolas"])),
            Err(DecodeError::OutOfBounds {
                index: 2,
                row_length: 2
            })
        );
        // Arity is checked before any cell is decoded
        assert_eq!(
            codec.decode(&raw(&["not a number"])),
            Err(DecodeError::OutOfBounds {
                index: 2,
                row_length: 1
            })
        );
    }

    #[test]
    fn test_first_cell_failure_wins() {
        let codec = user_codec();
        assert_eq!(
            codec.decode(&raw(&["x", "Nicolas", "y"])),
            Err(DecodeError::type_error("x", "Int"))
        );
    }

    #[test]
    fn test_extra_cells_ignored() {
        let codec = user_codec();
        let user = codec
            .decode(&raw(&["7", "Ann", "true", "extra", "more"]))
            .expect("Test operation should succeed");
        assert_eq!(user.id, 7);
    }

    #[test]
    fn test_encode_produces_arity_fields() {
        let codec = user_codec();
        let user = User {
            id: 2,
            name: "Kazuma, the 2nd".to_string(),
            active: false,
        };
        let fields = codec.encode(&user);
        assert_eq!(fields.len(), codec.arity());
        assert_eq!(fields, raw(&["2", "Kazuma, the 2nd", "false"]));
        assert_eq!(codec.decode(&fields), Ok(user));
    }

    #[test]
    fn test_plain_tuple_codec() {
        let codec = (StringCodec, FloatCodec::<f64>::new());
        assert_eq!(codec.arity(), 2);
        assert_eq!(
            codec.decode(&raw(&["pi", "3.14"])),
            Ok(("pi".to_string(), 3.14))
        );
        assert_eq!(codec.encode(&("e".to_string(), 2.5)), raw(&["e", "2.5"]));
    }

    #[test]
    fn test_wide_tuple_codec() {
        let int = IntCodec::<u8>::new();
        let codec = (int, int, int, int, int, int, int, int, int, int, int, int);
        assert_eq!(codec.arity(), 12);

        let fields = raw(&["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"]);
        let decoded = codec.decode(&fields).expect("Test operation should succeed");
        assert_eq!(decoded.11, 11);
        assert_eq!(codec.encode(&decoded), fields);

        assert_eq!(
            codec.decode(&fields[..5]),
            Err(DecodeError::OutOfBounds {
                index: 11,
                row_length: 5
            })
        );
    }

    #[test]
    fn test_raw_row_codec() {
        let fields = raw(&["a", "", "c"]);
        let row = RawRowCodec.decode(&fields).expect("Test operation should succeed");
        assert_eq!(row.fields(), &fields[..]);
        assert_eq!(RawRowCodec.encode(&row), fields);
        assert_eq!(RawRowCodec.decode(&[]), Ok(Row::default()));
    }

    #[test]
    fn test_codec_shared_across_threads() {
        let codec = std::sync::Arc::new(user_codec_send());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let codec = std::sync::Arc::clone(&codec);
                std::thread::spawn(move || {
                    codec
                        .decode(&[i.to_string(), format!("user{i}"), "true".to_string()])
                        .map(|u| u.id)
                })
            })
            .collect();

        let mut ids: Vec<i32> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    fn user_codec_send() -> impl RowCodec<Value = User> + Send + Sync {
        RecordCodec::new(
            (IntCodec::<i32>::new(), StringCodec, BoolCodec::default()),
            |(id, name, active)| User { id, name, active },
            |u: &User| (u.id, u.name.clone(), u.active),
        )
    }
}
