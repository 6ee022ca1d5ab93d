use std::fmt;

/// Counters collected over a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TranslationStats {
    /// Total references processed.
    pub references: usize,
    /// References that missed both the tlb and the page table.
    pub page_faults: usize,
    pub tlb_hits: usize,
    pub page_table_hits: usize,
}

impl TranslationStats {
    /// Page faults as a percentage of all references, `0.0` for an empty run.
    pub fn page_fault_rate(&self) -> f64 {
        Self::rate(self.page_faults, self.references)
    }

    /// Tlb hits as a percentage of all references, `0.0` for an empty run.
    pub fn tlb_hit_rate(&self) -> f64 {
        Self::rate(self.tlb_hits, self.references)
    }

    fn rate(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Page Faults = {}", self.page_faults)?;
        writeln!(f, "TLB Hits = {}", self.tlb_hits)?;
        writeln!(f, "Page Fault Rate = {:.2}%", self.page_fault_rate())?;
        write!(f, "TLB Hit Rate = {:.2}%", self.tlb_hit_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let stats = TranslationStats {
            references: 1000,
            page_faults: 244,
            tlb_hits: 54,
            page_table_hits: 702,
        };
        assert!((stats.page_fault_rate() - 24.4).abs() < f64::EPSILON * 100.0);
        assert!((stats.tlb_hit_rate() - 5.4).abs() < f64::EPSILON * 100.0);
    }

    #[test]
    fn test_empty_run_has_zero_rates() {
        let stats = TranslationStats::default();
        assert_eq!(stats.page_fault_rate(), 0.0);
        assert_eq!(stats.tlb_hit_rate(), 0.0);
    }

    #[test]
    fn test_summary_format() {
        let stats = TranslationStats {
            references: 3,
            page_faults: 2,
            tlb_hits: 1,
            page_table_hits: 0,
        };
        assert_eq!(
            stats.to_string(),
            "Page Faults = 2\nTLB Hits = 1\nPage Fault Rate = 66.67%\nTLB Hit Rate = 33.33%"
        );
    }
}
