/*!
The two translation caches sitting in front of the backing store.

The [`Tlb`] is probed first and refilled in FIFO order, the [`PageTable`] behind it
evicts the least recently touched page as tracked by its [`RecencyList`].
*/

pub mod page_table;
pub mod recency;
pub mod tlb;

#[doc(hidden)]
pub use page_table::{Eviction, PageTable, PageTableEntry};
#[doc(hidden)]
pub use recency::RecencyList;
#[doc(hidden)]
pub use tlb::{Tlb, TlbEntry};
