/*!
Module with basic types used in mmusim.

This module contains types for handling virtual and physical addresses,
the page geometry and the simulation configuration.
*/

pub mod address;
#[doc(hidden)]
pub use address::{PhysicalAddress, VirtualAddress};

pub mod page;
#[doc(hidden)]
pub use page::{Page, OFFSET_MASK, PAGE_COUNT, PAGE_SHIFT, PAGE_SIZE};

pub mod config;
#[doc(hidden)]
pub use config::SimConfig;
