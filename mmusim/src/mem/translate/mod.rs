/*!
The per-reference translation pipeline.

Every virtual address is resolved by probing the tlb, then the page table and finally
falling back to the backing store:

```text
  tlb hit         -> byte from the tlb copy, touch the page table recency
  page table hit  -> byte from the page table copy, refill the tlb from the backing store
  page fault      -> load from the backing store into tlb and page table, bind a frame
```

The physical address is always `(frame << 8) | offset` with the frame permanently bound to
the page by the [`FrameAllocator`].
*/

mod stats;
#[doc(hidden)]
pub use stats::TranslationStats;


use log::trace;

use super::backing_store::BackingStore;
use super::cache::{PageTable, Tlb};
use super::frame_alloc::FrameAllocator;
use crate::error::Result;
use crate::types::{PhysicalAddress, SimConfig, VirtualAddress};

/// How a reference was resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum Outcome {
    TlbHit,
    PageTableHit,
    PageFault,
}

impl Outcome {
    pub fn to_str(self) -> &'static str {
        match self {
            Outcome::TlbHit => "tlb hit",
            Outcome::PageTableHit => "page table hit",
            Outcome::PageFault => "page fault",
        }
    }
}

/// The result of translating a single reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TranslationRecord {
    pub virt_addr: VirtualAddress,
    pub phys_addr: PhysicalAddress,
    /// The byte stored at the physical address, read as a signed value.
    pub value: i8,
    pub outcome: Outcome,
}

/// Resolves virtual addresses against a tlb, a page table and a backing store.
///
/// The translator exclusively owns all of its state for the duration of a run.
///
/// # Examples
/// ```
/// use mmusim::mem::{FileIoBackingStore, Outcome, Translator};
/// use mmusim::types::VirtualAddress;
///
/// use std::io::Cursor;
///
/// let store = FileIoBackingStore::try_with_reader(Cursor::new(vec![7_u8; 0x10000])).unwrap();
/// let mut translator = Translator::builder(store).build().unwrap();
///
/// let first = translator.translate(VirtualAddress::from(0x0110_u16)).unwrap();
/// assert_eq!(first.outcome, Outcome::PageFault);
/// assert_eq!(first.phys_addr.to_u32(), 0x0010);
/// assert_eq!(first.value, 7);
///
/// let second = translator.translate(VirtualAddress::from(0x0120_u16)).unwrap();
/// assert_eq!(second.outcome, Outcome::TlbHit);
/// assert_eq!(translator.stats().references, 2);
/// ```
pub struct Translator<B> {
    store: B,
    tlb: Tlb,
    page_table: PageTable,
    frames: FrameAllocator,
    config: SimConfig,
    stats: TranslationStats,
}

impl<B: BackingStore> Translator<B> {
    pub fn builder(store: B) -> TranslatorBuilder<B> {
        TranslatorBuilder::new(store)
    }

    /// Creates a translator with the given capacities.
    pub fn with_config(store: B, config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            tlb: Tlb::new(config.tlb_entries),
            page_table: PageTable::new(config.page_table_entries),
            frames: FrameAllocator::new(config.frame_budget),
            config,
            stats: TranslationStats::default(),
        })
    }

    /// Translates a single reference.
    ///
    /// A failing backing store read aborts the reference without producing a record.
    pub fn translate(&mut self, addr: VirtualAddress) -> Result<TranslationRecord> {
        let (page_number, offset) = addr.decompose();

        let (frame, value, outcome) = if let Some(entry) = self.tlb.probe(page_number) {
            let value = entry.page.byte(offset);
            let frame = self.frames.get(page_number)?;

            // a tlb hit counts as a use of the page table copy as well
            self.page_table.touch(page_number);
            self.stats.tlb_hits += 1;

            (frame, value, Outcome::TlbHit)
        } else if let Some(page) = self.page_table.peek(page_number) {
            let value = page.byte(offset);
            let frame = self.frames.get(page_number)?;

            let page = self.store.read_page(addr)?;
            self.tlb.push(page_number, page);

            // only a completed reference updates the replacement order
            self.page_table.touch(page_number);
            self.stats.page_table_hits += 1;

            (frame, value, Outcome::PageTableHit)
        } else {
            let page = self.store.read_page(addr)?;
            let value = page.byte(offset);

            self.tlb.push(page_number, page.clone());
            self.page_table.insert(page_number, page)?;
            let frame = self.frames.assign_or_get(page_number);
            self.stats.page_faults += 1;

            (frame, value, Outcome::PageFault)
        };

        self.stats.references += 1;

        let record = TranslationRecord {
            virt_addr: addr,
            phys_addr: PhysicalAddress::with_frame(frame, offset),
            value,
            outcome,
        };
        trace!(
            "{:#06x} (page={:#04x}, offset={:#04x}) -> {:#x} = {} [{}]",
            addr,
            page_number,
            offset,
            record.phys_addr,
            value,
            outcome.to_str()
        );

        Ok(record)
    }

    /// Translates every address of `addrs` in order and extends `out` with the records.
    ///
    /// Stops at the first error, records of the references before it are already in `out`.
    pub fn translate_iter<VI, VO>(&mut self, addrs: VI, out: &mut VO) -> Result<()>
    where
        VI: IntoIterator<Item = VirtualAddress>,
        VO: Extend<TranslationRecord>,
    {
        for addr in addrs {
            let record = self.translate(addr)?;
            out.extend(Some(record));
        }
        Ok(())
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames(&self) -> &FrameAllocator {
        &self.frames
    }

    /// Consumes self and returns the backing store.
    pub fn into_inner(self) -> B {
        self.store
    }
}

pub struct TranslatorBuilder<B> {
    store: B,
    config: SimConfig,
}

impl<B: BackingStore> TranslatorBuilder<B> {
    fn new(store: B) -> Self {
        Self {
            store,
            config: SimConfig::default(),
        }
    }

    pub fn build(self) -> Result<Translator<B>> {
        Translator::with_config(self.store, self.config)
    }

    /// Replaces all capacities at once.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tlb_entries(mut self, entries: usize) -> Self {
        self.config.tlb_entries = entries;
        self
    }

    pub fn page_table_entries(mut self, entries: usize) -> Self {
        self.config.page_table_entries = entries;
        self
    }

    pub fn frame_budget(mut self, frames: usize) -> Self {
        self.config.frame_budget = frames;
        self
    }
}
