/*!
Permanent page number to physical frame assignment.

A frame number is handed out the first time a page is faulted in and it stays bound to
that page for the rest of the run, even after the page leaves the tlb and the page table.
Frame numbers are never reclaimed.
*/

use hashbrown::HashMap;
use log::{debug, warn};

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};

#[derive(Clone, Debug)]
pub struct FrameAllocator {
    frames: HashMap<u8, u32>,
    next_frame: u32,
    budget: usize,
}

impl FrameAllocator {
    /// Creates an allocator for a physical memory of `budget` frames.
    ///
    /// The budget is only used for diagnostics, assignment continues past it.
    pub fn new(budget: usize) -> Self {
        Self {
            frames: HashMap::new(),
            next_frame: 0,
            budget,
        }
    }

    /// Returns the frame of `page_number`, assigning the next unused one if there is none yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::mem::FrameAllocator;
    ///
    /// let mut frames = FrameAllocator::new(256);
    /// assert_eq!(frames.assign_or_get(7), 0);
    /// assert_eq!(frames.assign_or_get(3), 1);
    /// assert_eq!(frames.assign_or_get(7), 0);
    /// ```
    pub fn assign_or_get(&mut self, page_number: u8) -> u32 {
        if let Some(&frame) = self.frames.get(&page_number) {
            return frame;
        }

        let frame = self.next_frame;
        self.next_frame += 1;
        self.frames.insert(page_number, frame);
        debug!("page {:#04x} bound to frame {}", page_number, frame);

        if frame as usize == self.budget {
            warn!(
                "frame budget of {} exceeded by page {:#04x}, frame numbers now lie outside of physical memory",
                self.budget, page_number
            );
        }

        frame
    }

    /// Returns the frame of a page that must already have been faulted in.
    pub fn get(&self, page_number: u8) -> Result<u32> {
        self.frames.get(&page_number).copied().ok_or_else(|| {
            Error(ErrorOrigin::FrameAllocator, ErrorKind::NotFound)
                .log_error(format!("page {:#04x} has no frame", page_number))
        })
    }

    pub fn frame_of(&self, page_number: u8) -> Option<u32> {
        self.frames.get(&page_number).copied()
    }

    /// Number of frames handed out so far.
    pub fn assigned(&self) -> usize {
        self.frames.len()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// True once more distinct pages were referenced than physical memory has frames.
    pub fn is_overcommitted(&self) -> bool {
        self.assigned() > self.budget
    }
}
