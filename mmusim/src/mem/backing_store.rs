/*!
Access to the authoritative page contents.

The [`BackingStore`] trait is implemented by everything that can hand out raw bytes at a
byte position. Page faults and tlb refills go through [`BackingStore::read_page`].
*/

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{Page, VirtualAddress};

/// The [`BackingStore`] trait provides the page contents to the translator.
///
/// Only `read_raw_into` has to be implemented by the provider of this trait.
///
/// # Examples
///
/// Implementing [`BackingStore`] for an in-memory buffer:
/// ```
/// use mmusim::error::{Error, ErrorKind, ErrorOrigin, Result};
/// use mmusim::mem::BackingStore;
/// use mmusim::types::VirtualAddress;
///
/// pub struct ZeroStore;
///
/// impl BackingStore for ZeroStore {
///     fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()> {
///         if pos + out.len() as u64 > 0x10000 {
///             return Err(Error(ErrorOrigin::BackingStore, ErrorKind::OutOfBounds));
///         }
///         out.iter_mut().for_each(|b| *b = 0);
///         Ok(())
///     }
/// }
///
/// let page = ZeroStore.read_page(VirtualAddress::from(0x1234_u16)).unwrap();
/// assert_eq!(page.byte(0x34), 0);
/// ```
pub trait BackingStore {
    /// Fills `out` with the bytes starting at `pos`.
    ///
    /// Implementations must either fill the entire buffer or fail.
    fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()>;

    /// Returns the size of the store in bytes if it is known.
    fn size(&self) -> Option<u64> {
        None
    }

    /// Reads the whole page containing `addr`.
    ///
    /// The page starts at `addr - offset` in the store.
    fn read_page(&mut self, addr: VirtualAddress) -> Result<Page> {
        let mut page = Page::zeroed();
        self.read_raw_into(
            addr.as_page_aligned().to_u16() as u64,
            page.as_bytes_mut(),
        )?;
        Ok(page)
    }
}

impl<T: BackingStore + ?Sized> BackingStore for &mut T {
    fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()> {
        (**self).read_raw_into(pos, out)
    }

    fn size(&self) -> Option<u64> {
        (**self).size()
    }
}

impl<T: BackingStore + ?Sized> BackingStore for Box<T> {
    fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()> {
        (**self).read_raw_into(pos, out)
    }

    fn size(&self) -> Option<u64> {
        (**self).size()
    }
}

/// Reads pages via file i/o (`Seek`, `Read`).
///
/// # Examples
/// ```
/// use mmusim::mem::{BackingStore, FileIoBackingStore};
/// use mmusim::types::VirtualAddress;
///
/// use std::io::Cursor;
///
/// let bytes = (0..=255_u8).cycle().take(0x200).collect::<Vec<_>>();
/// let mut store = FileIoBackingStore::try_with_reader(Cursor::new(bytes)).unwrap();
///
/// let page = store.read_page(VirtualAddress::from(0x0105_u16)).unwrap();
/// assert_eq!(page.byte(0x05), 5);
/// ```
pub struct FileIoBackingStore<T> {
    reader: T,
    size: Option<u64>,
}

impl FileIoBackingStore<File> {
    /// Opens the file at `path` as a backing store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToOpenFile)
                .log_error(format!("{}: {}", path.display(), err))
        })?;
        Self::try_with_reader(file)
    }
}

impl<T: Read + Seek> FileIoBackingStore<T> {
    pub fn try_with_reader(mut reader: T) -> Result<Self> {
        let size = reader.seek(SeekFrom::End(0)).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToSeekFile).log_error(err)
        })?;
        reader.seek(SeekFrom::Start(0)).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToSeekFile).log_error(err)
        })?;
        debug!("backing store opened with {:#x} bytes", size);
        Ok(Self {
            reader,
            size: Some(size),
        })
    }

    /// Consumes self and returns the containing reader.
    pub fn into_inner(self) -> T {
        self.reader
    }
}

impl<T: Read + Seek> BackingStore for FileIoBackingStore<T> {
    fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()> {
        self.reader.seek(SeekFrom::Start(pos)).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToSeekFile).log_error(err)
        })?;
        self.reader.read_exact(out).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile)
                .log_error(format!("{:#x}+{:#x}: {}", pos, out.len(), err))
        })
    }

    fn size(&self) -> Option<u64> {
        self.size
    }
}
