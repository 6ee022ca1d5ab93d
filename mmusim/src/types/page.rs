/*!
This module contains the page geometry and the page contents type.
*/

use std::fmt;

/// Number of bits used for the page relative offset.
pub const PAGE_SHIFT: u32 = 8;

/// Size of a single page in bytes.
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Mask extracting the page relative offset of a virtual address.
pub const OFFSET_MASK: u16 = (1 << PAGE_SHIFT) - 1;

/// Number of distinct page numbers a 16-bit address can select.
pub const PAGE_COUNT: usize = 1 << (16 - PAGE_SHIFT);

/// The raw contents of a single, heap allocated page.
#[derive(Clone, PartialEq, Eq)]
pub struct Page(Box<[u8; PAGE_SIZE]>);

impl Page {
    /// Creates a zero filled page.
    pub fn zeroed() -> Self {
        Self(Box::new([0_u8; PAGE_SIZE]))
    }

    /// Returns the byte at `offset` reinterpreted as a signed value.
    #[inline]
    pub fn byte(&self, offset: u8) -> i8 {
        self.0[offset as usize] as i8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0[..]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<[u8; PAGE_SIZE]> for Page {
    fn from(item: [u8; PAGE_SIZE]) -> Self {
        Self(Box::new(item))
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Page({:02x?}..)", &self.0[..8])
    }
}
