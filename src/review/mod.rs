//! Value logic behind the processed-invoice review surface.
//!
//! Filtering, summary statistics, and per-session view state. Everything
//! here is pure over `ProcessedRecord` slices; fetching, mutation, and
//! rendering belong to the external surface.

pub mod filter;
pub mod stats;

pub use filter::{DatePreset, DateRange, ReviewFilters, StatusFilter, ValidationFilter};
pub use stats::ReviewStats;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::invoice::types::ProcessedRecord;

/// Sort records newest-first by processing time, the review table's order.
pub fn sort_newest_first(records: &mut [ProcessedRecord]) {
    records.sort_by(|a, b| b.processed_at.cmp(&a.processed_at));
}

/// Session-scoped set of expanded row ids, updated copy-on-write so a
/// snapshot handed to a renderer never changes underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRows(BTreeSet<String>);

impl ExpandedRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// A new value with the given row's expansion flipped.
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        Self(next)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
