//! Review-table filters: status, reconciliation validity, free-text search,
//! and an inclusive date range with quick presets.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::invoice::normalize::{invoice_record, invoice_summary};
use crate::invoice::reconcile::reconcile;
use crate::invoice::types::{ApprovalStatus, ProcessedRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationFilter {
    #[default]
    All,
    Valid,
    Invalid,
}

/// Inclusive day range. An open bound matches everything on that side; `to`
/// covers the whole day (a record at 23:59 on the `to` date matches).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Quick-pick ranges offered next to the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
}

impl DatePreset {
    /// Resolve the preset against the given current date.
    pub fn range(self, today: NaiveDate) -> DateRange {
        let first_of_month = today.with_day(1).unwrap_or(today);
        match self {
            Self::Today => DateRange {
                from: Some(today),
                to: Some(today),
            },
            Self::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange {
                    from: Some(yesterday),
                    to: Some(yesterday),
                }
            }
            Self::Last7Days => DateRange {
                from: Some(today - Duration::days(7)),
                to: Some(today),
            },
            Self::Last30Days => DateRange {
                from: Some(today - Duration::days(30)),
                to: Some(today),
            },
            Self::ThisMonth => DateRange {
                from: Some(first_of_month),
                to: Some(today),
            },
            Self::LastMonth => {
                let last_of_prev = first_of_month.pred_opt().unwrap_or(first_of_month);
                let first_of_prev = last_of_prev.with_day(1).unwrap_or(last_of_prev);
                DateRange {
                    from: Some(first_of_prev),
                    to: Some(last_of_prev),
                }
            }
        }
    }
}

/// The complete filter state of the review table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewFilters {
    pub status: StatusFilter,
    pub validation: ValidationFilter,
    /// Case-insensitive substring over invoice number, vendor, and file name.
    pub search: String,
    pub date_range: DateRange,
}

impl ReviewFilters {
    pub fn matches(&self, record: &ProcessedRecord) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Pending => record.status == ApprovalStatus::Pending,
            StatusFilter::Approved => record.status == ApprovalStatus::Approved,
            StatusFilter::Rejected => record.status == ApprovalStatus::Rejected,
        };
        if !status_ok {
            return false;
        }

        if self.validation != ValidationFilter::All {
            // Derived on demand — reconciliation is never cached on the record.
            let valid = reconcile(&invoice_record(&record.data)).is_valid;
            let want_valid = self.validation == ValidationFilter::Valid;
            if valid != want_valid {
                return false;
            }
        }

        if !self.date_range.contains(record.processed_at) {
            return false;
        }

        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            let summary = invoice_summary(&record.data);
            let hit = summary.invoice_number.to_lowercase().contains(&term)
                || summary.vendor_name.to_lowercase().contains(&term)
                || record.file_name.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        true
    }

    /// Filter a record slice, preserving order.
    pub fn apply<'a>(&self, records: &'a [ProcessedRecord]) -> Vec<&'a ProcessedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
