use crate::types::Page;

/// A resident tlb slot: the page it holds and that page's contents.
#[derive(Clone, Debug)]
pub struct TlbEntry {
    pub page_number: u8,
    pub page: Page,
}

/// Small fully associative translation cache, refilled in FIFO order.
///
/// The fill cursor runs round-robin over the slots independently of what they hold,
/// a page that is still in use gets overwritten when the cursor reaches it.
#[derive(Clone)]
pub struct Tlb {
    entries: Box<[Option<TlbEntry>]>,
    cursor: usize,
}

impl Tlb {
    /// Creates a tlb with `size` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. [`SimConfig::validate`](crate::types::SimConfig::validate)
    /// rejects such a configuration before a translator gets built.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "tlb needs at least one slot");
        Self {
            entries: vec![None; size].into_boxed_slice(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Slot index the next fill will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Looks up `page_number` across all slots.
    ///
    /// Should more than one slot carry the page the last one scanned wins.
    pub fn probe(&self, page_number: u8) -> Option<&TlbEntry> {
        self.entries
            .iter()
            .rev()
            .flatten()
            .find(|entry| entry.page_number == page_number)
    }

    /// Unconditionally overwrites slot `idx`.
    pub fn fill(&mut self, idx: usize, page_number: u8, page: Page) {
        self.entries[idx] = Some(TlbEntry { page_number, page });
    }

    /// Fills the slot under the cursor and advances the cursor, returning the filled slot.
    pub fn push(&mut self, page_number: u8, page: Page) -> usize {
        let idx = self.cursor;
        self.fill(idx, page_number, page);
        self.cursor = (self.cursor + 1) % self.entries.len();
        idx
    }

    /// Page numbers of all occupied slots in slot order.
    pub fn resident_pages(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .flatten()
            .map(|entry| entry.page_number)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
