//! Pull-based character supply for the tokenizer.

use std::io::{self, BufRead};

const BOM: char = '\u{feff}';

/// Anything the tokenizer can pull characters from, one at a time
pub trait CharSource {
    /// Next character, `Ok(None)` at end of input
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl CharSource for std::str::Chars<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

/// Adapter for any infallible character iterator
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    chars: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Wrap a character iterator
    pub fn new(chars: I) -> Self {
        Self { chars }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Incremental UTF-8 decoder over a buffered byte reader.
///
/// A byte-order mark at the very start of the input is skipped. Invalid
/// UTF-8 is reported as an [`io::ErrorKind::InvalidData`] error carrying the
/// byte offset.
#[derive(Debug)]
pub struct Utf8Source<R> {
    reader: R,
    byte_offset: u64,
    started: bool,
}

impl<R: BufRead> Utf8Source<R> {
    /// Decode characters from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            byte_offset: 0,
            started: false,
        }
    }

    /// Borrow the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Return the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()? {
            [] => return Ok(None),
            [first, ..] => *first,
        };
        self.reader.consume(1);
        self.byte_offset += 1;
        Ok(Some(byte))
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let start = self.byte_offset;
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = match lead {
            0x00..=0x7f => return Ok(Some(char::from(lead))),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid_utf8(start)),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_byte()? {
                Some(byte) => *slot = byte,
                None => return Err(invalid_utf8(start)),
            }
        }

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| invalid_utf8(start))
    }
}

impl<R: BufRead> CharSource for Utf8Source<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let c = self.decode_char()?;
        if !self.started {
            self.started = true;
            if c == Some(BOM) {
                return self.decode_char();
            }
        }
        Ok(c)
    }
}

fn invalid_utf8(offset: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence at byte {offset}"),
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn drain<S: CharSource>(mut source: S) -> io::Result<String> {
        let mut out = String::new();
        while let Some(c) = source.next_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn test_utf8_source_multibyte() {
        let text = "naïve,日本,🦀\n";
        let decoded = drain(Utf8Source::new(text.as_bytes())).expect("Test operation should succeed");
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_utf8_source_skips_leading_bom() {
        let bytes = "\u{feff}a,b".as_bytes();
        let decoded = drain(Utf8Source::new(bytes)).expect("Test operation should succeed");
        assert_eq!(decoded, "a,b");

        // Only a leading BOM is dropped
        let decoded = drain(Utf8Source::new("a\u{feff}".as_bytes()))
            .expect("Test operation should succeed");
        assert_eq!(decoded, "a\u{feff}");
    }

    #[test]
    fn test_utf8_source_across_small_buffers() {
        let text = "ééé🦀🦀";
        let reader = io::BufReader::with_capacity(1, text.as_bytes());
        let decoded = drain(Utf8Source::new(reader)).expect("Test operation should succeed");
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_utf8_source_invalid_bytes() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let err = drain(Utf8Source::new(bytes)).expect_err("invalid UTF-8 should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("byte 1"));

        // Truncated multi-byte sequence
        let bytes: &[u8] = &[0xe6, 0x97];
        let err = drain(Utf8Source::new(bytes)).expect_err("truncated UTF-8 should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_iter_source() {
        let decoded = drain(IterSource::new("xyz".chars().rev())).expect("Test operation should succeed");
        assert_eq!(decoded, "zyx");
    }
}
