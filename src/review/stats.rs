//! Summary statistics over a (filtered) set of review records.

use serde::{Deserialize, Serialize};

use crate::invoice::normalize::{invoice_record, invoice_summary, parse_amount};
use crate::invoice::reconcile::reconcile;
use crate::invoice::types::{ApprovalStatus, ProcessedRecord};

/// Counts and totals shown above the review table. Recomputed from the
/// current filtered set on every change; never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Sum of declared totals, with unparseable amounts contributing zero.
    pub total_value: f64,
}

impl ReviewStats {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProcessedRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            match record.status {
                ApprovalStatus::Approved => stats.approved += 1,
                ApprovalStatus::Rejected => stats.rejected += 1,
                ApprovalStatus::Pending => stats.pending += 1,
            }

            if reconcile(&invoice_record(&record.data)).is_valid {
                stats.valid += 1;
            } else {
                stats.invalid += 1;
            }

            stats.total_value += parse_amount(&invoice_summary(&record.data).total_amount);
        }
        stats
    }
}
