use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::TranslationRecord;

/// Writes translation records as `virtual,physical,value` lines.
///
/// All three columns are decimal and the value is signed. No header is written.
///
/// # Examples
///
/// ```
/// use mmusim::io::RecordWriter;
/// use mmusim::mem::{Outcome, TranslationRecord};
/// use mmusim::types::{PhysicalAddress, VirtualAddress};
///
/// let mut writer = RecordWriter::new(vec![]);
/// writer
///     .write(&TranslationRecord {
///         virt_addr: VirtualAddress::from(16916_u16),
///         phys_addr: PhysicalAddress::with_frame(0, 20),
///         value: 0,
///         outcome: Outcome::PageFault,
///     })
///     .unwrap();
///
/// assert_eq!(writer.into_inner().unwrap(), b"16916,20,0\n");
/// ```
pub struct RecordWriter<W: Write> {
    writer: W,
    written: usize,
}

impl RecordWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|err| {
            Error(ErrorOrigin::RecordWriter, ErrorKind::UnableToOpenFile).log_error(format!(
                "unable to create {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write(&mut self, record: &TranslationRecord) -> Result<()> {
        writeln!(
            self.writer,
            "{},{},{}",
            record.virt_addr, record.phys_addr, record.value
        )
        .map_err(|err| {
            Error(ErrorOrigin::RecordWriter, ErrorKind::UnableToWriteFile).log_error(err)
        })?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|err| {
            Error(ErrorOrigin::RecordWriter, ErrorKind::UnableToWriteFile).log_error(err)
        })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
