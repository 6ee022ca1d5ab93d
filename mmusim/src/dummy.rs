/*!
In-memory backing store used by tests and benchmarks.
*/

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::BackingStore;
use crate::types::{PAGE_COUNT, PAGE_SIZE};

/// A backing store held entirely in memory.
///
/// It also counts how many reads went through it which makes refills observable in tests.
#[derive(Clone)]
pub struct DummyBackingStore {
    buf: Box<[u8]>,
    reads: usize,
}

impl DummyBackingStore {
    /// Creates a store covering all 256 pages where every byte is recognizable:
    /// byte `o` of page `p` holds `p ^ o`.
    pub fn new() -> Self {
        Self::with_pages(PAGE_COUNT)
    }

    /// Creates a store covering only the first `pages` pages.
    pub fn with_pages(pages: usize) -> Self {
        let buf = (0..pages * PAGE_SIZE)
            .map(|i| Self::pattern_byte((i / PAGE_SIZE) as u8, (i % PAGE_SIZE) as u8))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { buf, reads: 0 }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buf: bytes.into_boxed_slice(),
            reads: 0,
        }
    }

    /// Returns the byte the default pattern places at `offset` of page `page_number`.
    pub const fn pattern_byte(page_number: u8, offset: u8) -> u8 {
        page_number ^ offset
    }

    /// Number of successful reads served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Default for DummyBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BackingStore for DummyBackingStore {
    fn read_raw_into(&mut self, pos: u64, out: &mut [u8]) -> Result<()> {
        let start = pos as usize;
        let end = start
            .checked_add(out.len())
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                Error(ErrorOrigin::BackingStore, ErrorKind::OutOfBounds).log_debug(format!(
                    "{:#x}+{:#x} exceeds {:#x}",
                    pos,
                    out.len(),
                    self.buf.len()
                ))
            })?;
        out.copy_from_slice(&self.buf[start..end]);
        self.reads += 1;
        Ok(())
    }

    fn size(&self) -> Option<u64> {
        Some(self.buf.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VirtualAddress;

    #[test]
    fn test_pattern() {
        let mut store = DummyBackingStore::new();
        let page = store.read_page(VirtualAddress::from(0x4214_u16)).unwrap();
        assert_eq!(page.byte(0x14), (0x42_u8 ^ 0x14) as i8);
        assert_eq!(store.reads(), 1);
        assert_eq!(store.size(), Some(0x10000));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut store = DummyBackingStore::with_pages(1);
        assert_eq!(
            store.read_page(VirtualAddress::from(0x0100_u16)),
            Err(Error(ErrorOrigin::BackingStore, ErrorKind::OutOfBounds))
        );
        assert_eq!(store.reads(), 0);
    }
}
