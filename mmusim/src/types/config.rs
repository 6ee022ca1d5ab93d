/*!
Sizing of the simulated translation hardware.
*/

use super::page::PAGE_COUNT;
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};

/// Number of tlb slots used when nothing else is configured.
pub const DEFAULT_TLB_ENTRIES: usize = 16;

/// Number of page table slots used when nothing else is configured.
pub const DEFAULT_PAGE_TABLE_ENTRIES: usize = 128;

/// Number of physical frames used when nothing else is configured.
pub const DEFAULT_FRAME_BUDGET: usize = 256;

/// Capacities of the tlb, the page table and physical memory.
///
/// Page size and offset width are fixed and can not be configured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub tlb_entries: usize,
    pub page_table_entries: usize,
    pub frame_budget: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tlb_entries: DEFAULT_TLB_ENTRIES,
            page_table_entries: DEFAULT_PAGE_TABLE_ENTRIES,
            frame_budget: DEFAULT_FRAME_BUDGET,
        }
    }
}

impl SimConfig {
    /// Checks that every capacity can actually be simulated.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmusim::types::SimConfig;
    ///
    /// assert!(SimConfig::default().validate().is_ok());
    ///
    /// let cfg = SimConfig { tlb_entries: 0, ..SimConfig::default() };
    /// assert!(cfg.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.tlb_entries == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::Configuration)
                .log_error("tlb_entries must not be zero"));
        }
        if self.page_table_entries == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::Configuration)
                .log_error("page_table_entries must not be zero"));
        }
        if self.page_table_entries > PAGE_COUNT {
            return Err(
                Error(ErrorOrigin::Config, ErrorKind::Configuration).log_error(format!(
                    "page_table_entries ({}) exceeds the number of pages ({})",
                    self.page_table_entries, PAGE_COUNT
                )),
            );
        }
        if self.frame_budget == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::Configuration)
                .log_error("frame_budget must not be zero"));
        }
        Ok(())
    }
}
