use crate::codec::RowCodec;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::raw::{Tokenizer, Utf8Source};
use crate::row::Row;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Lazy CSV reader over any byte source.
///
/// The reader owns its source and releases it when dropped, whether
/// iteration ran to the end, stopped early or hit an error.
pub struct CsvReader<R: Read> {
    tokenizer: Tokenizer<Utf8Source<BufReader<R>>>,
    headers: Option<Row>,
    header_read: bool,
    records: u64,
}

impl<R: Read> CsvReader<R> {
    /// Create a reader over `reader`
    pub fn new(reader: R, dialect: Dialect) -> Self {
        debug!(
            separator = %dialect.separator(),
            has_header = dialect.has_header(),
            "Opening CSV reader"
        );
        Self {
            tokenizer: Tokenizer::new(Utf8Source::new(BufReader::new(reader)), dialect),
            headers: None,
            header_read: !dialect.has_header(),
            records: 0,
        }
    }

    /// Dialect the reader parses with
    pub fn dialect(&self) -> &Dialect {
        self.tokenizer.dialect()
    }

    /// Header row, read on first use.
    ///
    /// Returns `Ok(None)` when the dialect has no header or the input is
    /// empty. A header that fails to parse is reported once and skipped.
    pub fn headers(&mut self) -> Result<Option<&Row>> {
        self.ensure_header()?;
        Ok(self.headers.as_ref())
    }

    /// Number of data records read so far
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records
    }

    /// Iterate over the remaining data rows
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows { reader: self }
    }

    /// Consume the reader, iterating over its data rows
    pub fn into_rows(self) -> IntoRows<R> {
        IntoRows { reader: self }
    }

    /// Iterate over the remaining data rows decoded with `codec`.
    ///
    /// A row that fails to decode is yielded as [`Error::Decode`] and
    /// iteration continues with the next row.
    pub fn records<C: RowCodec>(&mut self, codec: C) -> Records<'_, R, C> {
        Records {
            reader: self,
            codec,
        }
    }

    /// Consume the reader, iterating over decoded records
    pub fn into_records<C: RowCodec>(self, codec: C) -> IntoRecords<R, C> {
        IntoRecords {
            reader: self,
            codec,
        }
    }

    fn ensure_header(&mut self) -> Result<()> {
        if self.header_read {
            return Ok(());
        }
        self.header_read = true;
        match self.tokenizer.next().transpose()? {
            Some(headers) => {
                debug!("Read header with {} columns", headers.len());
                self.headers = Some(headers);
            }
            None => debug!("No header row, input is empty"),
        }
        Ok(())
    }

    fn next_row(&mut self) -> Option<Result<Row>> {
        if let Err(e) = self.ensure_header() {
            return Some(Err(e));
        }
        let row = self.tokenizer.next()?;
        self.records += 1;
        Some(row)
    }

    fn next_record<C: RowCodec>(&mut self, codec: &C) -> Option<Result<C::Value>> {
        let row = self.next_row()?;
        let record = self.records;
        Some(row.and_then(|row| {
            codec
                .decode(row.fields())
                .map_err(|source| Error::Decode { record, source })
        }))
    }
}

impl<'a> CsvReader<&'a [u8]> {
    /// Create a reader over an in-memory buffer
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8], dialect: Dialect) -> Self {
        Self::new(bytes, dialect)
    }
}

impl CsvReader<File> {
    /// Open the file at `path`
    pub fn from_path<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening {} for reading", path.display());
        let file = File::open(path)?;
        Ok(Self::new(file, dialect))
    }
}

impl<R: Read> Drop for CsvReader<R> {
    fn drop(&mut self) {
        debug!(records = self.records, "Closing CSV reader");
    }
}

/// Borrowing iterator over data rows
pub struct Rows<'r, R: Read> {
    reader: &'r mut CsvReader<R>,
}

impl<R: Read> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_row()
    }
}

/// Owning iterator over data rows
pub struct IntoRows<R: Read> {
    reader: CsvReader<R>,
}

impl<R: Read> IntoRows<R> {
    /// The underlying reader
    pub fn reader(&self) -> &CsvReader<R> {
        &self.reader
    }
}

impl<R: Read> Iterator for IntoRows<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_row()
    }
}

/// Borrowing iterator over decoded records
pub struct Records<'r, R: Read, C> {
    reader: &'r mut CsvReader<R>,
    codec: C,
}

impl<R: Read, C: RowCodec> Iterator for Records<'_, R, C> {
    type Item = Result<C::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record(&self.codec)
    }
}

/// Owning iterator over decoded records
pub struct IntoRecords<R: Read, C> {
    reader: CsvReader<R>,
    codec: C,
}

impl<R: Read, C> IntoRecords<R, C> {
    /// The underlying reader
    pub fn reader(&self) -> &CsvReader<R> {
        &self.reader
    }
}

impl<R: Read, C: RowCodec> Iterator for IntoRecords<R, C> {
    type Item = Result<C::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record(&self.codec)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::codec::{BoolCodec, IntCodec, RecordCodec, StringCodec};
    use crate::error::{DecodeError, ParseError};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::io;
    use std::io::Write;
    use std::rc::Rc;

    const USERS: &str = "id,name,active\n1,Nicolas,true\n2,Kazuma,28\n3,John,false\n";

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

    /// Source that records how many times it is dropped and can fail after
    /// a number of bytes
    struct TrackedSource {
        data: io::Cursor<Vec<u8>>,
        fail_after: Option<u64>,
        drops: Rc<Cell<usize>>,
    }

    impl TrackedSource {
        fn new(data: &str, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                data: io::Cursor::new(data.as_bytes().to_vec()),
                fail_after: None,
                drops: Rc::clone(drops),
            }
        }

        fn failing_after(mut self, bytes: u64) -> Self {
            self.fail_after = Some(bytes);
            self
        }
    }

    impl Read for TrackedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(limit) = self.fail_after {
                let pos = self.data.position();
                if pos >= limit {
                    return Err(io::Error::other("connection reset"));
                }
                let allowed = usize::try_from(limit - pos).unwrap().min(buf.len());
                return self.data.read(&mut buf[..allowed]);
            }
            self.data.read(buf)
        }
    }

    impl Drop for TrackedSource {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn test_rows_without_header() {
        let mut reader = CsvReader::from_bytes(b"a,b\nc,d", Dialect::default());
        assert_eq!(reader.headers().unwrap(), None);
        let rows: Vec<Row> = reader.rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows, vec![Row::from(["a", "b"]), Row::from(["c", "d"])]);
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn test_header_excluded_from_rows() {
        let mut reader = CsvReader::from_bytes(USERS.as_bytes(), Dialect::default().with_header(true));
        assert_eq!(
            reader.headers().unwrap(),
            Some(&Row::from(["id", "name", "active"]))
        );
        let first = reader.rows().next().unwrap().unwrap();
        assert_eq!(first, Row::from(["1", "Nicolas", "true"]));
    }

    #[test]
    fn test_header_read_lazily_by_iteration() {
        let reader = CsvReader::from_bytes(USERS.as_bytes(), Dialect::default().with_header(true));
        let rows: Vec<Row> = reader.into_rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get(1), Some("Nicolas"));
    }

    #[test]
    fn test_records_continue_after_decode_error() {
        let mut reader = CsvReader::from_bytes(USERS.as_bytes(), Dialect::default().with_header(true));
        let codec = user_codec();
        let results: Vec<Result<User>> = reader.records(&codec).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "Nicolas");
        match &results[1] {
            Err(Error::Decode { record, source }) => {
                assert_eq!(*record, 2);
                assert_eq!(source, &DecodeError::type_error("28", "Boolean"));
            }
            other => panic!("Expected decode error, got {other:?}"),
        }
        assert_eq!(results[2].as_ref().unwrap().id, 3);
    }

    #[test]
    fn test_records_continue_after_parse_error() {
        let input = "1,ok,true\n2,\"bad\"x,true\n3,fine,false\n";
        let results: Vec<Result<User>> = CsvReader::from_bytes(input.as_bytes(), Dialect::default())
            .into_records(user_codec())
            .collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[1],
            Err(Error::Parse(ParseError::UnexpectedCharAfterQuote { found: 'x', .. }))
        ));
        assert_eq!(results[2].as_ref().unwrap().name, "fine");
    }

    #[test]
    fn test_short_row_reports_out_of_bounds() {
        let results: Vec<Result<User>> = CsvReader::from_bytes(b"1,Nicolas\n", Dialect::default())
            .into_records(user_codec())
            .collect();
        assert_eq!(
            results[0].as_ref().unwrap_err().as_decode(),
            Some(&DecodeError::OutOfBounds {
                index: 2,
                row_length: 2
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let mut reader = CsvReader::from_bytes(b"", Dialect::default().with_header(true));
        assert_eq!(reader.headers().unwrap(), None);
        assert!(reader.rows().next().is_none());
    }

    #[test]
    fn test_source_released_on_completion() {
        let drops = Rc::new(Cell::new(0));
        {
            let reader = CsvReader::new(TrackedSource::new("a\nb\n", &drops), Dialect::default());
            assert_eq!(reader.into_rows().count(), 2);
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_source_released_on_early_termination() {
        let drops = Rc::new(Cell::new(0));
        let mut reader = CsvReader::new(TrackedSource::new("a\nb\nc\n", &drops), Dialect::default());
        let first = reader.rows().next();
        assert!(first.is_some());
        assert_eq!(drops.get(), 0);
        drop(reader);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_source_released_on_failure() {
        let drops = Rc::new(Cell::new(0));
        let source = TrackedSource::new("1,a,true\n2,b,false\n3,c,true\n", &drops).failing_after(12);
        let results: Vec<Result<User>> = CsvReader::new(source, Dialect::default())
            .into_records(user_codec())
            .collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::Io(_))));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes = b"ok\n\xff\xfe\n";
        let results: Vec<Result<Row>> = CsvReader::from_bytes(bytes, Dialect::default())
            .into_rows()
            .collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("Expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("Test operation should succeed");
        file.write_all("\u{feff}name,score\nada,1.5\n".as_bytes())
            .expect("Test operation should succeed");

        let mut reader = CsvReader::from_path(file.path(), Dialect::default().with_header(true))
            .expect("Test operation should succeed");
        assert_eq!(
            reader.headers().unwrap(),
            Some(&Row::from(["name", "score"]))
        );
        let rows: Vec<Row> = reader.rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows, vec![Row::from(["ada", "1.5"])]);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().expect("Test operation should succeed");
        let result = CsvReader::from_path(dir.path().join("missing.csv"), Dialect::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
