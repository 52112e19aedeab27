//! Cell-level codecs between raw field text and primitive values.

use crate::error::{DecodeError, DecodeResult};
use std::fmt;
use std::marker::PhantomData;

/// Bidirectional conversion between one raw field and a typed value.
///
/// `decode` is total: malformed text is reported as a [`DecodeError`], never
/// a panic. `encode` is the left inverse of `decode` for every value `decode`
/// can produce.
pub trait CellCodec {
    /// Decoded value type
    type Value;

    /// Decode raw field text
    fn decode(&self, raw: &str) -> DecodeResult<Self::Value>;

    /// Encode a value as raw field text
    fn encode(&self, value: &Self::Value) -> String;

    /// Adapt this codec to another type with a fallible mapping
    fn try_map<T, F, G>(self, from: F, to: G) -> MapCodec<Self, T, F, G>
    where
        Self: Sized,
        F: Fn(Self::Value) -> DecodeResult<T>,
        G: Fn(&T) -> Self::Value,
    {
        MapCodec::new(self, from, to)
    }

    /// Treat an empty field as `None`
    fn optional(self) -> OptionCodec<Self>
    where
        Self: Sized,
    {
        OptionCodec::new(self)
    }
}

impl<C: CellCodec + ?Sized> CellCodec for &C {
    type Value = C::Value;

    fn decode(&self, raw: &str) -> DecodeResult<Self::Value> {
        (**self).decode(raw)
    }

    fn encode(&self, value: &Self::Value) -> String {
        (**self).encode(value)
    }
}

/// Integer types supported by [`IntCodec`]
pub trait Integer: std::str::FromStr + fmt::Display {
    /// Name reported in [`DecodeError::TypeError`]
    const NAME: &'static str;
}

/// Floating point types supported by [`FloatCodec`]
pub trait Float: std::str::FromStr + fmt::Display {
    /// Name reported in [`DecodeError::TypeError`]
    const NAME: &'static str;
}

macro_rules! impl_integer {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Integer for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

impl_integer! {
    i8 => "Byte",
    i16 => "Short",
    i32 => "Int",
    i64 => "Long",
    i128 => "BigInt",
    isize => "Size",
    u8 => "UnsignedByte",
    u16 => "UnsignedShort",
    u32 => "UnsignedInt",
    u64 => "UnsignedLong",
    u128 => "UnsignedBigInt",
    usize => "UnsignedSize",
}

impl Float for f32 {
    const NAME: &'static str = "Float";
}

impl Float for f64 {
    const NAME: &'static str = "Double";
}

/// Strict decimal integer codec.
///
/// Accepts an optional leading `+` or `-` followed by ASCII digits. No
/// whitespace, digit grouping or radix prefixes.
pub struct IntCodec<T>(PhantomData<fn() -> T>);

impl<T: Integer> IntCodec<T> {
    /// Create the codec
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Integer> CellCodec for IntCodec<T> {
    type Value = T;

    fn decode(&self, raw: &str) -> DecodeResult<T> {
        raw.parse::<T>()
            .map_err(|_| DecodeError::type_error(raw, T::NAME))
    }

    fn encode(&self, value: &T) -> String {
        value.to_string()
    }
}

/// Strict floating point codec.
///
/// Accepts `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?` and the
/// exact tokens `NaN`, `inf`, `+inf` and `-inf`, which are the forms
/// [`encode`](CellCodec::encode) produces for non-finite values.
pub struct FloatCodec<T>(PhantomData<fn() -> T>);

impl<T: Float> FloatCodec<T> {
    /// Create the codec
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Float> CellCodec for FloatCodec<T> {
    type Value = T;

    fn decode(&self, raw: &str) -> DecodeResult<T> {
        if !is_float_literal(raw) {
            return Err(DecodeError::type_error(raw, T::NAME));
        }
        raw.parse::<T>()
            .map_err(|_| DecodeError::type_error(raw, T::NAME))
    }

    fn encode(&self, value: &T) -> String {
        value.to_string()
    }
}

fn is_float_literal(raw: &str) -> bool {
    if matches!(raw, "NaN" | "inf" | "+inf" | "-inf") {
        return true;
    }

    let bytes = raw.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Letter case accepted by [`BoolCodec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolCase {
    /// Only `true` and `false`
    #[default]
    Exact,
    /// `true` and `false` in any letter case
    Insensitive,
}

/// Boolean codec over the tokens `true` and `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoolCodec {
    case: BoolCase,
}

impl BoolCodec {
    /// Name reported in [`DecodeError::TypeError`]
    pub const NAME: &'static str = "Boolean";

    /// Create a codec with the given case rule
    #[must_use]
    pub const fn new(case: BoolCase) -> Self {
        Self { case }
    }

    /// Codec accepting `TRUE`, `False` and other case variants
    #[must_use]
    pub const fn ignore_case() -> Self {
        Self::new(BoolCase::Insensitive)
    }
}

impl CellCodec for BoolCodec {
    type Value = bool;

    fn decode(&self, raw: &str) -> DecodeResult<bool> {
        let accepts = |token: &str| match self.case {
            BoolCase::Exact => raw == token,
            BoolCase::Insensitive => raw.eq_ignore_ascii_case(token),
        };
        if accepts("true") {
            Ok(true)
        } else if accepts("false") {
            Ok(false)
        } else {
            Err(DecodeError::type_error(raw, Self::NAME))
        }
    }

    fn encode(&self, value: &bool) -> String {
        value.to_string()
    }
}

/// Identity codec; never fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringCodec;

impl CellCodec for StringCodec {
    type Value = String;

    fn decode(&self, raw: &str) -> DecodeResult<String> {
        Ok(raw.to_string())
    }

    fn encode(&self, value: &String) -> String {
        value.clone()
    }
}

/// Single character codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharCodec;

impl CharCodec {
    /// Name reported in [`DecodeError::TypeError`]
    pub const NAME: &'static str = "Char";
}

impl CellCodec for CharCodec {
    type Value = char;

    fn decode(&self, raw: &str) -> DecodeResult<char> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(DecodeError::type_error(raw, Self::NAME)),
        }
    }

    fn encode(&self, value: &char) -> String {
        value.to_string()
    }
}

/// Codec mapping an empty field to `None`.
///
/// `Some` of a value whose encoding is empty (such as `Some(String::new())`)
/// is written as an empty field and therefore reads back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionCodec<C> {
    inner: C,
}

impl<C: CellCodec> OptionCodec<C> {
    /// Wrap `inner`
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: CellCodec> CellCodec for OptionCodec<C> {
    type Value = Option<C::Value>;

    fn decode(&self, raw: &str) -> DecodeResult<Self::Value> {
        if raw.is_empty() {
            return Ok(None);
        }
        self.inner.decode(raw).map(Some)
    }

    fn encode(&self, value: &Self::Value) -> String {
        value
            .as_ref()
            .map_or_else(String::new, |v| self.inner.encode(v))
    }
}

/// Codec adapting an inner codec to a domain type.
///
/// Built with [`CellCodec::try_map`].
pub struct MapCodec<C, T, F, G> {
    inner: C,
    from: F,
    to: G,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T, F, G> MapCodec<C, T, F, G>
where
    C: CellCodec,
    F: Fn(C::Value) -> DecodeResult<T>,
    G: Fn(&T) -> C::Value,
{
    /// Wrap `inner` with a decode mapping `from` and encode projection `to`
    pub fn new(inner: C, from: F, to: G) -> Self {
        Self {
            inner,
            from,
            to,
            _marker: PhantomData,
        }
    }
}

impl<C, T, F, G> CellCodec for MapCodec<C, T, F, G>
where
    C: CellCodec,
    F: Fn(C::Value) -> DecodeResult<T>,
    G: Fn(&T) -> C::Value,
{
    type Value = T;

    fn decode(&self, raw: &str) -> DecodeResult<T> {
        self.inner.decode(raw).and_then(&self.from)
    }

    fn encode(&self, value: &T) -> String {
        self.inner.encode(&(self.to)(value))
    }
}

// Manual impls: derives would put bounds on the phantom type parameter.

impl<T> Clone for IntCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IntCodec<T> {}

impl<T: Integer> Default for IntCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Integer> fmt::Debug for IntCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntCodec<{}>", T::NAME)
    }
}

impl<T> Clone for FloatCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FloatCodec<T> {}

impl<T: Float> Default for FloatCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> fmt::Debug for FloatCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatCodec<{}>", T::NAME)
    }
}

impl<C: fmt::Debug, T, F, G> fmt::Debug for MapCodec<C, T, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCodec")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
