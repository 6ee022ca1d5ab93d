/*!
This module covers everything involved in resolving a virtual address.

The [backing store](backing_store/index.html) provides page contents, the
[cache](cache/index.html) module contains the tlb and the page table, the
[frame allocator](frame_alloc/index.html) binds pages to physical frames and the
[translator](translate/index.html) drives all of them for each reference.
*/

pub mod backing_store;
pub mod cache;
pub mod frame_alloc;
pub mod translate;

#[doc(hidden)]
pub use backing_store::{BackingStore, FileIoBackingStore};
#[doc(hidden)]
pub use cache::*;
#[doc(hidden)]
pub use frame_alloc::FrameAllocator;
#[doc(hidden)]
pub use translate::{Outcome, TranslationRecord, TranslationStats, Translator, TranslatorBuilder};
