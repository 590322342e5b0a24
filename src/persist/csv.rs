//! CSV export: header row plus one row per record.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::info;

use crate::student::StudentRecord;

use super::{PersistResult, RecordSink};

/// Column names written as the first row.
pub const CSV_HEADER: [&str; 3] = ["rollNumber", "name", "gpa"];

/// Writes records as CSV to any byte sink.
pub struct CsvSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `out`; nothing is written until records arrive.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer without flushing it.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row(&mut self, fields: &[&str]) -> PersistResult<()> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            self.out.write_all(escape_field(field).as_bytes())?;
        }
        self.out.write_all(b"\r\n")?;
        Ok(())
    }
}

impl CsvSink<BufWriter<File>> {
    /// Creates or truncates `path`.
    pub fn create(path: impl AsRef<Path>) -> PersistResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_records(&mut self, records: &[StudentRecord]) -> PersistResult<usize> {
        self.write_row(&CSV_HEADER)?;
        for rec in records {
            let gpa = rec.gpa.to_string();
            self.write_row(&[rec.roll.as_str(), rec.name.as_str(), gpa.as_str()])?;
        }
        Ok(records.len())
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Exports `records` to a CSV file at `path`.
pub fn export_csv(path: impl AsRef<Path>, records: &[StudentRecord]) -> PersistResult<usize> {
    let path = path.as_ref();
    let mut sink = CsvSink::create(path)?;
    let n = sink.write_records(records)?;
    sink.flush()?;
    info!(path = %path.display(), records = n, "exported csv");
    Ok(n)
}

/// Quotes a field when it holds a delimiter, quote or line break.
fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}
