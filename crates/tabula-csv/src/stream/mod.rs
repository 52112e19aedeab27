//! Streaming readers and writers over byte sources and sinks.
//!
//! Readers pull rows lazily; nothing past the current row is buffered beyond
//! the underlying `BufReader`. Writers buffer output and flush on
//! [`CsvWriter::finish`] or drop.
//!
//! ```
//! use tabula_csv::{CsvReader, CsvWriter, Dialect};
//! use tabula_csv::codec::{IntCodec, StringCodec};
//!
//! let codec = (StringCodec, IntCodec::<u32>::new());
//!
//! let mut writer = CsvWriter::new(Vec::new(), Dialect::default().with_header(true));
//! writer.write_header(&["name", "age"])?;
//! writer.write_record(&codec, &("Ada, Countess".to_string(), 36))?;
//! let bytes = writer.finish()?;
//!
//! let mut reader = CsvReader::from_bytes(&bytes, Dialect::default().with_header(true));
//! assert_eq!(reader.headers()?.map(|h| h.len()), Some(2));
//! let people = reader.records(&codec).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(people, vec![("Ada, Countess".to_string(), 36)]);
//! # Ok::<(), tabula_csv::Error>(())
//! ```

mod reader;
mod writer;

pub use reader::{CsvReader, IntoRecords, IntoRows, Records, Rows};
pub use writer::{CsvWriter, RecordWriter};
