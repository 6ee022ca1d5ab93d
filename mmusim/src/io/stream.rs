use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::VirtualAddress;

/// Iterator over the virtual addresses of a reference file.
///
/// Every line holds a single decimal address. Surrounding whitespace is ignored and blank
/// lines are skipped. Malformed lines and values wider than 16 bits are yielded as errors,
/// the stream can still be advanced past them.
///
/// # Examples
///
/// ```
/// use mmusim::io::ReferenceStream;
///
/// let input = "16916\n\n  62493 \n";
/// let addrs = ReferenceStream::new(input.as_bytes())
///     .map(|addr| addr.map(|addr| addr.to_u16()))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// assert_eq!(addrs, vec![16916, 62493]);
/// ```
pub struct ReferenceStream<R> {
    reader: R,
    line: String,
    line_number: usize,
}

impl ReferenceStream<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|err| {
            Error(ErrorOrigin::ReferenceStream, ErrorKind::UnableToOpenFile).log_error(format!(
                "unable to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReferenceStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn parse_line(&self) -> Result<VirtualAddress> {
        let text = self.line.trim();
        let value = text.parse::<u64>().map_err(|err| {
            Error(ErrorOrigin::ReferenceStream, ErrorKind::Encoding).log_error(format!(
                "line {}: {:?} is not an address ({})",
                self.line_number, text, err
            ))
        })?;
        VirtualAddress::try_from(value).map_err(|err| {
            err.log_error(format!(
                "line {}: {} does not fit into 16 bits",
                self.line_number, value
            ))
        })
    }
}

impl<R: BufRead> Iterator for ReferenceStream<R> {
    type Item = Result<VirtualAddress>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(err) => {
                    self.line_number += 1;
                    let kind = match err.kind() {
                        io::ErrorKind::InvalidData => ErrorKind::Encoding,
                        _ => ErrorKind::UnableToReadFile,
                    };
                    return Some(Err(Error(ErrorOrigin::ReferenceStream, kind)
                        .log_error(format!("line {}: {}", self.line_number, err))));
                }
            }

            if !self.line.trim().is_empty() {
                return Some(self.parse_line());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Result<u16>> {
        ReferenceStream::new(input.as_bytes())
            .map(|addr| addr.map(VirtualAddress::to_u16))
            .collect()
    }

    #[test]
    fn test_parses_lines() {
        assert_eq!(
            collect("1\n256\n65535\n0"),
            vec![Ok(1), Ok(256), Ok(65535), Ok(0)]
        );
    }

    #[test]
    fn test_skips_blank_lines_and_whitespace() {
        assert_eq!(collect("\n  \t\n 42 \r\n\n7\n"), vec![Ok(42), Ok(7)]);
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            collect("12\nabc\n-3\n13"),
            vec![
                Ok(12),
                Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::Encoding)),
                Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::Encoding)),
                Ok(13)
            ]
        );
    }

    #[test]
    fn test_rejects_wide_values() {
        assert_eq!(
            collect("65536\n4294967296"),
            vec![
                Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::InvalidAddress)),
                Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::InvalidAddress))
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let mut stream = ReferenceStream::new("1\n\n\nx\n".as_bytes());
        assert!(stream.next().unwrap().is_ok());
        assert_eq!(stream.line_number(), 1);
        assert!(stream.next().unwrap().is_err());
        assert_eq!(stream.line_number(), 4);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_invalid_utf8() {
        let input: &[u8] = &[b'1', b'\n', 0xff, 0xfe, b'\n'];
        let res = ReferenceStream::new(input).collect::<Vec<_>>();
        assert_eq!(
            res[1],
            Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::Encoding))
        );
    }
}
