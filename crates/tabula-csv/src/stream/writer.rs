use crate::codec::RowCodec;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::raw::write_row;
use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, IntoInnerError, Write};
use std::path::Path;
use tracing::debug;

/// Buffered CSV writer over any byte sink.
///
/// Every row is written with the dialect's line terminator. Buffered output
/// is flushed when the writer is dropped; use [`finish`](Self::finish) to
/// observe flush errors.
pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
    dialect: Dialect,
    line: String,
    rows: u64,
}

impl<W: Write> CsvWriter<W> {
    /// Create a writer over `writer`
    pub fn new(writer: W, dialect: Dialect) -> Self {
        Self {
            writer: BufWriter::new(writer),
            dialect,
            line: String::new(),
            rows: 0,
        }
    }

    /// Dialect the writer formats with
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Number of rows written so far, header included
    #[must_use]
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Write one row of raw fields.
    ///
    /// An empty slice writes a blank line, which reads back as a single
    /// empty field.
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        self.line.clear();
        write_row(&mut self.line, fields, &self.dialect);
        self.line.push_str(self.dialect.line_terminator().as_str());
        self.writer.write_all(self.line.as_bytes())?;
        self.rows += 1;
        Ok(())
    }

    /// Write a header row
    pub fn write_header<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        debug!("Writing header with {} columns", names.len());
        self.write_row(names)
    }

    /// Encode `value` with `codec` and write it
    pub fn write_record<C: RowCodec>(&mut self, codec: &C, value: &C::Value) -> Result<()> {
        self.write_row(&codec.encode(value))
    }

    /// Encode and write every value, stopping at the first I/O error
    pub fn write_records<C, I>(&mut self, codec: &C, values: I) -> Result<()>
    where
        C: RowCodec,
        I: IntoIterator,
        I::Item: Borrow<C::Value>,
    {
        for value in values {
            self.write_record(codec, value.borrow())?;
        }
        Ok(())
    }

    /// Flush buffered output to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the sink
    pub fn finish(self) -> Result<W> {
        debug!(rows = self.rows, "Finishing CSV writer");
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(IntoInnerError::into_error(e)))
    }

    /// Bind a codec, giving a writer of typed records
    pub fn into_typed<C: RowCodec>(self, codec: C) -> RecordWriter<W, C> {
        RecordWriter {
            writer: self,
            codec,
        }
    }
}

impl CsvWriter<File> {
    /// Create or truncate the file at `path`
    pub fn from_path<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening {} for writing", path.display());
        let file = File::create(path)?;
        Ok(Self::new(file, dialect))
    }
}

/// Writer of records through a fixed codec
pub struct RecordWriter<W: Write, C> {
    writer: CsvWriter<W>,
    codec: C,
}

impl<W: Write, C: RowCodec> RecordWriter<W, C> {
    /// Write a header row
    pub fn write_header<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.writer.write_header(names)
    }

    /// Encode and write one record
    pub fn write(&mut self, value: &C::Value) -> Result<()> {
        self.writer.write_record(&self.codec, value)
    }

    /// Encode and write every record
    pub fn write_all<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Value>,
    {
        self.writer.write_records(&self.codec, values)
    }

    /// Flush buffered output to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Flush and return the sink
    pub fn finish(self) -> Result<W> {
        self.writer.finish()
    }

    /// The untyped writer
    pub fn into_inner(self) -> CsvWriter<W> {
        self.writer
    }
}
