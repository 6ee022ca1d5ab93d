use hashbrown::HashMap;
use log::debug;

use super::recency::RecencyList;
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::Page;

#[derive(Clone, Debug)]
pub struct PageTableEntry {
    pub page_number: u8,
    pub page: Page,
}

/// Describes the page that had to make room for a new one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Eviction {
    pub page_number: u8,
    pub slot: usize,
}

/// Fixed capacity page cache with least-recently-touched replacement.
///
/// Slots are handed out in index order until the table is full. From then on every
/// insert replaces the slot of the page at the front of the recency list.
/// The set of resident pages and the set of pages tracked by the recency list are always equal.
#[derive(Clone)]
pub struct PageTable {
    slots: Box<[Option<PageTableEntry>]>,
    slot_of: HashMap<u8, usize>,
    used: usize,
    recency: RecencyList,
}

impl PageTable {
    /// Creates a page table with `size` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. [`SimConfig::validate`](crate::types::SimConfig::validate)
    /// rejects such a configuration before a translator gets built.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "page table needs at least one slot");
        Self {
            slots: vec![None; size].into_boxed_slice(),
            slot_of: HashMap::with_capacity(size),
            used: 0,
            recency: RecencyList::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        self.slot_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.used == self.slots.len()
    }

    pub fn contains(&self, page_number: u8) -> bool {
        self.slot_of.contains_key(&page_number)
    }

    pub fn slot_of(&self, page_number: u8) -> Option<usize> {
        self.slot_of.get(&page_number).copied()
    }

    /// Looks up `page_number` and marks it as most recently touched on a hit.
    pub fn probe(&mut self, page_number: u8) -> Option<&Page> {
        let slot = *self.slot_of.get(&page_number)?;
        self.recency.touch(page_number);
        self.slots[slot].as_ref().map(|entry| &entry.page)
    }

    /// Looks up `page_number` without affecting the replacement order.
    pub fn peek(&self, page_number: u8) -> Option<&Page> {
        let slot = *self.slot_of.get(&page_number)?;
        self.slots[slot].as_ref().map(|entry| &entry.page)
    }

    /// Marks `page_number` as most recently touched without reading it.
    ///
    /// Pages that are not resident are ignored, the return value tells whether it was.
    pub fn touch(&mut self, page_number: u8) -> bool {
        self.recency.touch(page_number)
    }

    /// Places a freshly loaded page, evicting the least recently touched one if the table is full.
    ///
    /// Inserting a page that is already resident refreshes its contents and touches it.
    pub fn insert(&mut self, page_number: u8, page: Page) -> Result<Option<Eviction>> {
        if let Some(&slot) = self.slot_of.get(&page_number) {
            self.slots[slot] = Some(PageTableEntry { page_number, page });
            self.recency.touch(page_number);
            return Ok(None);
        }

        if self.used < self.slots.len() {
            let slot = self.used;
            self.used += 1;
            self.place(slot, page_number, page);
            return Ok(None);
        }

        let victim = self.recency.pop_front().ok_or_else(|| {
            Error(ErrorOrigin::PageTable, ErrorKind::NotFound)
                .log_error("page table is full but no page is tracked for eviction")
        })?;
        let slot = self.slot_of.remove(&victim).ok_or_else(|| {
            Error(ErrorOrigin::PageTable, ErrorKind::NotFound)
                .log_error(format!("eviction victim {:#04x} has no slot", victim))
        })?;

        debug!(
            "evicting page {:#04x} from slot {} for page {:#04x}",
            victim, slot, page_number
        );
        self.place(slot, page_number, page);

        Ok(Some(Eviction {
            page_number: victim,
            slot,
        }))
    }

    fn place(&mut self, slot: usize, page_number: u8, page: Page) {
        self.slots[slot] = Some(PageTableEntry { page_number, page });
        self.slot_of.insert(page_number, slot);
        self.recency.push_back(page_number);
    }

    /// Page numbers of all occupied slots in slot order.
    pub fn resident_pages(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .flatten()
            .map(|entry| entry.page_number)
    }

    /// The replacement order, next victim first.
    pub fn recency(&self) -> &RecencyList {
        &self.recency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PAGE_SIZE;

    fn page_of(value: u8) -> Page {
        Page::from([value; PAGE_SIZE])
    }

    fn assert_consistent(pt: &PageTable) {
        let mut resident = pt.resident_pages().collect::<Vec<_>>();
        let mut tracked = pt.recency().iter().collect::<Vec<_>>();
        resident.sort_unstable();
        tracked.sort_unstable();
        assert_eq!(resident, tracked);
        assert!(pt.len() <= pt.capacity());
    }

    #[test]
    fn test_fills_slots_in_order() {
        let mut pt = PageTable::new(4);
        for page in [8_u8, 6, 4] {
            assert_eq!(pt.insert(page, page_of(page)), Ok(None));
        }
        assert_eq!(pt.slot_of(8), Some(0));
        assert_eq!(pt.slot_of(6), Some(1));
        assert_eq!(pt.slot_of(4), Some(2));
        assert!(!pt.is_full());
        assert_consistent(&pt);
    }

    #[test]
    #[should_panic]
    fn test_zero_slots_panics() {
        PageTable::new(0);
    }

    #[test]
    fn test_probe_hit_and_miss() {
        let mut pt = PageTable::new(2);
        pt.insert(1, page_of(0x11)).unwrap();
        assert_eq!(pt.probe(1).map(|p| p.byte(0)), Some(0x11));
        assert!(pt.probe(2).is_none());
    }

    #[test]
    fn test_evicts_recency_head() {
        let mut pt = PageTable::new(2);
        pt.insert(0xA, page_of(0xA)).unwrap();
        pt.insert(0xB, page_of(0xB)).unwrap();
        assert!(pt.probe(0xA).is_some());

        let eviction = pt.insert(0xC, page_of(0xC)).unwrap();
        assert_eq!(
            eviction,
            Some(Eviction {
                page_number: 0xB,
                slot: 1
            })
        );
        assert!(!pt.contains(0xB));
        assert_eq!(pt.peek(0xC).map(|p| p.byte(0)), Some(0xC));
        assert_eq!(pt.slot_of(0xC), Some(1));
        assert_eq!(pt.recency().iter().collect::<Vec<_>>(), vec![0xA, 0xC]);
        assert_consistent(&pt);
    }

    #[test]
    fn test_touch_without_probe() {
        let mut pt = PageTable::new(2);
        pt.insert(1, page_of(1)).unwrap();
        pt.insert(2, page_of(2)).unwrap();
        assert!(pt.touch(1));
        assert!(!pt.touch(3));

        let eviction = pt.insert(3, page_of(3)).unwrap().unwrap();
        assert_eq!(eviction.page_number, 2);
        assert_consistent(&pt);
    }

    #[test]
    fn test_reinsert_resident_page() {
        let mut pt = PageTable::new(2);
        pt.insert(1, page_of(1)).unwrap();
        pt.insert(2, page_of(2)).unwrap();
        assert_eq!(pt.insert(1, page_of(0x10)), Ok(None));
        assert_eq!(pt.len(), 2);
        assert_eq!(pt.peek(1).map(|p| p.byte(0)), Some(0x10));
        assert_eq!(pt.recency().front(), Some(2));
        assert_consistent(&pt);
    }

    #[test]
    fn test_capacity_is_respected() {
        let mut pt = PageTable::new(128);
        for page in 0..=255_u8 {
            pt.insert(page, page_of(page)).unwrap();
            assert_consistent(&pt);
        }
        assert_eq!(pt.len(), 128);
        assert!(pt.is_full());
        assert!((128..=255_u8).all(|page| pt.contains(page)));
    }
}
