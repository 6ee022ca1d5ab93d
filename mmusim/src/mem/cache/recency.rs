/*!
Least-recently-touched ordering of the resident page table pages.

The list is an index based doubly linked list keyed by page number, so moving an entry
to the tail and removing the head are both constant time.
*/

use crate::types::PAGE_COUNT;

#[derive(Copy, Clone, Default)]
struct Link {
    prev: Option<u8>,
    next: Option<u8>,
    linked: bool,
}

/// Page numbers ordered from least recently touched (front) to most recently touched (back).
#[derive(Clone)]
pub struct RecencyList {
    links: Box<[Link]>,
    head: Option<u8>,
    tail: Option<u8>,
    len: usize,
}

impl RecencyList {
    pub fn new() -> Self {
        Self {
            links: vec![Link::default(); PAGE_COUNT].into_boxed_slice(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, page_number: u8) -> bool {
        self.links[page_number as usize].linked
    }

    /// The least recently touched page, i.e. the next eviction victim.
    pub fn front(&self) -> Option<u8> {
        self.head
    }

    /// The most recently touched page.
    pub fn back(&self) -> Option<u8> {
        self.tail
    }

    /// Appends `page_number` at the tail. A page that is already tracked is moved there instead.
    pub fn push_back(&mut self, page_number: u8) {
        if self.contains(page_number) {
            self.unlink(page_number);
        }
        self.link_back(page_number);
    }

    /// Moves a tracked page to the tail.
    ///
    /// Returns false and leaves the list untouched if the page is not tracked.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::mem::RecencyList;
    ///
    /// let mut list = RecencyList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert!(list.touch(1));
    /// assert_eq!(list.iter().collect::<Vec<_>>(), vec![2, 1]);
    ///
    /// assert!(!list.touch(3));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn touch(&mut self, page_number: u8) -> bool {
        if !self.contains(page_number) {
            return false;
        }
        if self.tail != Some(page_number) {
            self.unlink(page_number);
            self.link_back(page_number);
        }
        true
    }

    /// Removes and returns the least recently touched page.
    pub fn pop_front(&mut self) -> Option<u8> {
        let head = self.head?;
        self.unlink(head);
        Some(head)
    }

    pub fn remove(&mut self, page_number: u8) -> bool {
        if !self.contains(page_number) {
            return false;
        }
        self.unlink(page_number);
        true
    }

    /// Iterates from the least to the most recently touched page.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn link_back(&mut self, page_number: u8) {
        let idx = page_number as usize;
        debug_assert!(!self.links[idx].linked);

        self.links[idx] = Link {
            prev: self.tail,
            next: None,
            linked: true,
        };

        match self.tail {
            Some(tail) => self.links[tail as usize].next = Some(page_number),
            None => self.head = Some(page_number),
        }
        self.tail = Some(page_number);
        self.len += 1;
    }

    fn unlink(&mut self, page_number: u8) {
        let Link { prev, next, linked } = self.links[page_number as usize];
        debug_assert!(linked);

        match prev {
            Some(prev) => self.links[prev as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.links[next as usize].prev = prev,
            None => self.tail = prev,
        }

        self.links[page_number as usize] = Link::default();
        self.len -= 1;
    }
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<u8>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.cursor?;
        self.cursor = self.list.links[current as usize].next;
        Some(current)
    }
}

impl<'a> IntoIterator for &'a RecencyList {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &RecencyList) -> Vec<u8> {
        list.iter().collect()
    }

    #[test]
    fn test_push_and_pop() {
        let mut list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);

        for page in [5, 3, 9] {
            list.push_back(page);
        }
        assert_eq!(order(&list), vec![5, 3, 9]);
        assert_eq!(list.front(), Some(5));
        assert_eq!(list.back(), Some(9));

        assert_eq!(list.pop_front(), Some(5));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_front(), Some(9));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_touch_moves_to_tail() {
        let mut list = RecencyList::new();
        for page in 0..5 {
            list.push_back(page);
        }

        assert!(list.touch(0));
        assert!(list.touch(3));
        assert!(list.touch(3));
        assert_eq!(order(&list), vec![1, 2, 4, 0, 3]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_push_existing_moves() {
        let mut list = RecencyList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(1);
        assert_eq!(order(&list), vec![2, 1]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_middle_and_ends() {
        let mut list = RecencyList::new();
        for page in [10, 20, 30, 40] {
            list.push_back(page);
        }
        assert!(list.remove(20));
        assert!(!list.remove(20));
        assert!(list.remove(40));
        assert!(list.remove(10));
        assert_eq!(order(&list), vec![30]);
        assert_eq!(list.front(), list.back());
    }

    #[test]
    fn test_full_key_space() {
        let mut list = RecencyList::new();
        for page in 0..=255_u8 {
            list.push_back(page);
        }
        assert_eq!(list.len(), 256);
        assert!(list.touch(0));
        assert_eq!(list.front(), Some(1));
        assert_eq!(list.back(), Some(0));
        assert_eq!((&list).into_iter().count(), 256);
    }
}
