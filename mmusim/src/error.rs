/*!
Specialized `Error` and `Result` types for mmusim.
*/

use std::{error, fmt, result};

use log::{debug, error, info, trace, warn};

/// An error is the pair of the component that raised it and what went wrong.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Error(pub ErrorOrigin, pub ErrorKind);

impl Error {
    /// Returns a static string representing the type of error.
    pub fn as_str(&self) -> &'static str {
        self.1.to_str()
    }

    /// Returns a static string representing the type of error.
    pub fn into_str(self) -> &'static str {
        self.as_str()
    }

    pub fn log_error(self, err: impl fmt::Display) -> Self {
        error!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_warn(self, err: impl fmt::Display) -> Self {
        warn!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_info(self, err: impl fmt::Display) -> Self {
        info!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_debug(self, err: impl fmt::Display) -> Self {
        debug!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }

    pub fn log_trace(self, err: impl fmt::Display) -> Self {
        trace!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.0.to_str(), self.1.to_str())
    }
}

impl error::Error for Error {}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorOrigin {
    BackingStore,
    PageTable,
    FrameAllocator,

    ReferenceStream,
    RecordWriter,
    Config,

    Other,
}

impl ErrorOrigin {
    /// Returns a static string representing the origin of the error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorOrigin::BackingStore => "backing store",
            ErrorOrigin::PageTable => "page table",
            ErrorOrigin::FrameAllocator => "frame allocator",

            ErrorOrigin::ReferenceStream => "reference stream",
            ErrorOrigin::RecordWriter => "record writer",
            ErrorOrigin::Config => "config",

            ErrorOrigin::Other => "other",
        }
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Configuration,

    NotFound,
    OutOfBounds,
    InvalidAddress,
    Encoding,

    UnableToOpenFile,
    UnableToReadFile,
    UnableToSeekFile,
    UnableToWriteFile,

    Unknown,
}

impl ErrorKind {
    /// Returns a static string representing the type of error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration error",

            ErrorKind::NotFound => "not found",
            ErrorKind::OutOfBounds => "out of bounds",
            ErrorKind::InvalidAddress => "invalid virtual address",
            ErrorKind::Encoding => "encoding error",

            ErrorKind::UnableToOpenFile => "unable to open file",
            ErrorKind::UnableToReadFile => "unable to read file",
            ErrorKind::UnableToSeekFile => "unable to seek file",
            ErrorKind::UnableToWriteFile => "unable to write file",

            ErrorKind::Unknown => "unknown error",
        }
    }
}

/// Specialized `Result` type for mmusim results.
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_origin_and_kind() {
        let err = Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile);
        assert_eq!(err.to_string(), "backing store: unable to read file");
        assert_eq!(err.as_str(), "unable to read file");
    }

    #[test]
    fn test_origin_names() {
        let origins = [
            ErrorOrigin::BackingStore,
            ErrorOrigin::PageTable,
            ErrorOrigin::FrameAllocator,
            ErrorOrigin::ReferenceStream,
            ErrorOrigin::RecordWriter,
            ErrorOrigin::Config,
            ErrorOrigin::Other,
        ];
        assert_eq!(
            origins.iter().map(|o| o.to_str()).collect::<Vec<_>>(),
            vec![
                "backing store",
                "page table",
                "frame allocator",
                "reference stream",
                "record writer",
                "config",
                "other"
            ]
        );
    }

    #[test]
    fn test_log_helpers_return_self() {
        let err = Error(ErrorOrigin::Config, ErrorKind::Configuration);
        assert_eq!(err.log_warn("tlb_entries must not be zero"), err);
        assert_eq!(err.log_trace(0), err);
    }
}
