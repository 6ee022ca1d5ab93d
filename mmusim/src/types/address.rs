/*!
Abstraction over the 16-bit virtual addresses of the reference stream and the
physical addresses they resolve to.
*/

use std::convert::TryFrom;
use std::fmt;

use super::page::{OFFSET_MASK, PAGE_SHIFT};
use crate::error::{Error, ErrorKind, ErrorOrigin};

/// A 16-bit virtual address.
///
/// The upper 8 bits select the page, the lower 8 bits the byte inside of it.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct VirtualAddress(u16);

impl VirtualAddress {
    /// A virtual address with the value of zero.
    pub const NULL: VirtualAddress = VirtualAddress(0);

    /// Returns the page number of this address.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::types::VirtualAddress;
    ///
    /// let addr = VirtualAddress::from(0x1234_u16);
    /// assert_eq!(addr.page_number(), 0x12);
    /// ```
    #[inline]
    pub const fn page_number(self) -> u8 {
        ((self.0 >> PAGE_SHIFT) & 0xFF) as u8
    }

    /// Returns the page relative offset of this address.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::types::VirtualAddress;
    ///
    /// let addr = VirtualAddress::from(0x1234_u16);
    /// assert_eq!(addr.offset(), 0x34);
    /// ```
    #[inline]
    pub const fn offset(self) -> u8 {
        (self.0 & OFFSET_MASK) as u8
    }

    /// Splits the address into `(page_number, offset)`.
    #[inline]
    pub const fn decompose(self) -> (u8, u8) {
        (self.page_number(), self.offset())
    }

    /// Recombines a page number and an offset into an address.
    #[inline]
    pub const fn compose(page_number: u8, offset: u8) -> Self {
        Self(((page_number as u16) << PAGE_SHIFT) | offset as u16)
    }

    /// Returns the base address of the containing page, i.e. `address - offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::types::VirtualAddress;
    ///
    /// let addr = VirtualAddress::from(0x1234_u16);
    /// assert_eq!(addr.as_page_aligned(), VirtualAddress::from(0x1200_u16));
    /// ```
    #[inline]
    pub const fn as_page_aligned(self) -> Self {
        Self(self.0 - self.offset() as u16)
    }

    #[inline]
    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for VirtualAddress {
    fn from(item: u16) -> Self {
        Self(item)
    }
}

impl From<VirtualAddress> for u16 {
    fn from(item: VirtualAddress) -> Self {
        item.0
    }
}

/// Converts a wider integer, rejecting anything that does not fit the 16-bit decomposition.
impl TryFrom<u32> for VirtualAddress {
    type Error = Error;

    fn try_from(item: u32) -> Result<Self, Self::Error> {
        u16::try_from(item)
            .map(Self)
            .map_err(|_| Error(ErrorOrigin::ReferenceStream, ErrorKind::InvalidAddress))
    }
}

impl TryFrom<u64> for VirtualAddress {
    type Error = Error;

    fn try_from(item: u64) -> Result<Self, Self::Error> {
        u16::try_from(item)
            .map(Self)
            .map_err(|_| Error(ErrorOrigin::ReferenceStream, ErrorKind::InvalidAddress))
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// A physical address, `(frame << 8) | offset`.
///
/// Frame numbers are never recycled so this is wider than a virtual address:
/// a run that touches more pages than the frame budget keeps producing larger frames.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PhysicalAddress(u32);

impl PhysicalAddress {
    /// Builds the physical address of `offset` inside of `frame`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::types::PhysicalAddress;
    ///
    /// let addr = PhysicalAddress::with_frame(3, 0x10);
    /// assert_eq!(addr.to_u32(), 0x310);
    /// assert_eq!(addr.frame(), 3);
    /// ```
    #[inline]
    pub const fn with_frame(frame: u32, offset: u8) -> Self {
        Self((frame << PAGE_SHIFT) | offset as u32)
    }

    #[inline]
    pub const fn frame(self) -> u32 {
        self.0 >> PAGE_SHIFT
    }

    #[inline]
    pub const fn offset(self) -> u8 {
        (self.0 & OFFSET_MASK as u32) as u8
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<PhysicalAddress> for u32 {
    fn from(item: PhysicalAddress) -> Self {
        item.0
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_all() {
        for raw in 0..=u16::MAX {
            let addr = VirtualAddress::from(raw);
            assert_eq!(addr.page_number() as u16, (raw >> 8) & 0xFF);
            assert_eq!(addr.offset() as u16, raw & 0xFF);

            let (page, offset) = addr.decompose();
            assert_eq!(VirtualAddress::compose(page, offset), addr);
        }
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            VirtualAddress::from(0xFFFF_u16).as_page_aligned(),
            VirtualAddress::from(0xFF00_u16)
        );
        assert_eq!(
            VirtualAddress::from(0x00FF_u16).as_page_aligned(),
            VirtualAddress::NULL
        );
    }

    #[test]
    fn test_try_from_wide() {
        assert_eq!(
            VirtualAddress::try_from(16916_u32).unwrap().decompose(),
            (66, 20)
        );
        assert_eq!(
            VirtualAddress::try_from(0x1_0000_u32),
            Err(Error(ErrorOrigin::ReferenceStream, ErrorKind::InvalidAddress))
        );
        assert!(VirtualAddress::try_from(u64::MAX).is_err());
    }

    #[test]
    fn test_physical_recompose() {
        let addr = PhysicalAddress::with_frame(300, 0xAB);
        assert_eq!(addr.frame(), 300);
        assert_eq!(addr.offset(), 0xAB);
        assert_eq!(addr.to_u32(), (300 << 8) | 0xAB);
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(VirtualAddress::from(16916_u16).to_string(), "16916");
        assert_eq!(PhysicalAddress::with_frame(0, 20).to_string(), "20");
        assert_eq!(format!("{:x}", VirtualAddress::from(0x4214_u16)), "4214");
    }
}
