//!
//! # mmusim
//!
//! Virtual memory translation simulator
//!
//! ## Introduction
//!
//! mmusim replays a stream of 16-bit virtual addresses through a small memory management unit
//! and reports, for every reference, the physical address it resolves to and the byte stored
//! there. Pages are 256 bytes wide and are demand loaded from a backing store file.
//!
//! ```text
//!  virtual address        +-----+  miss  +------------+  miss  +---------------+
//!  (page, offset)  -----> | tlb | -----> | page table | -----> | backing store |
//!                         +-----+        +------------+        +---------------+
//!                            |                 |                       |
//!                            +-----------------+-----------------------+
//!                                              |
//!                                     frame allocator -> (frame << 8) | offset
//! ```
//!
//! The tlb holds 16 pages and is refilled in FIFO order, the page table holds 128 pages
//! and evicts the least recently touched one. Physical frames are bound to a page on its
//! first fault and never change afterwards.
//!
//! # Structure
//!
//! [types](crate::types) holds the address, page and configuration types,
//! [mem](crate::mem) the backing store abstraction, the caches and the [`Translator`](crate::mem::Translator)
//! itself, while [io](crate::io) reads reference files and writes result files.
//!
//! ## Getting started
//!
//! ```
//! use mmusim::prelude::v1::*;
//!
//! use std::io::Cursor;
//!
//! # fn main() -> Result<()> {
//! let store = FileIoBackingStore::try_with_reader(Cursor::new(vec![0_u8; 0x10000]))?;
//! let mut translator = Translator::builder(store)
//!     .tlb_entries(16)
//!     .page_table_entries(128)
//!     .build()?;
//!
//! let mut records = vec![];
//! translator.translate_iter(
//!     ReferenceStream::new("1\n257\n2\n".as_bytes()).collect::<Result<Vec<_>>>()?,
//!     &mut records,
//! )?;
//!
//! assert_eq!(records[2].outcome, Outcome::TlbHit);
//! println!("{}", translator.stats());
//! # Ok(())
//! # }
//! ```

pub mod error;

pub mod types;

pub mod mem;

pub mod io;

#[doc(hidden)]
#[cfg(any(feature = "dummy_mem", test))]
pub mod dummy;

#[doc(hidden)]
pub mod prelude {
    pub mod v1 {
        #[cfg(any(feature = "dummy_mem", test))]
        pub use crate::dummy::*;
        pub use crate::error::*;
        pub use crate::io::*;
        pub use crate::mem::*;
        pub use crate::types::*;
    }
    pub use v1::*;
}
