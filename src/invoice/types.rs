use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One extracted invoice line item.
///
/// Numeric fields stay loosely typed (`Value`): upstream extraction emits
/// them as JSON numbers, numeric strings, or not at all. `parse_amount`
/// resolves them to numbers on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub unit_price: Value,
    #[serde(default)]
    pub total: Value,
}

/// A parsed invoice as the reconciliation checker sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub declared_total: Value,
    #[serde(default)]
    pub declared_tax: Value,
}

/// Operator-assigned lifecycle tag on a processed record. Orthogonal to
/// reconciliation validity; mutated only by explicit operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Map a raw upstream status string. The extraction function writes
    /// `"processed"` when it finishes; the review surface treats that (and
    /// anything unrecognized) as awaiting review.
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One row of the review surface: a processed document plus the raw
/// extraction payload it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub id: String,
    pub file_name: String,
    pub processed_at: DateTime<Utc>,
    pub status: ApprovalStatus,
    /// Raw extraction document, kept for detail display and re-derivation.
    pub data: Value,
}

/// Display fields resolved from a raw extraction document, with `"N/A"`
/// fallbacks where nothing was extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub invoice_number: String,
    pub vendor_name: String,
    pub invoice_date: String,
    /// Raw declared total, left untyped for display formatting and stats.
    pub total_amount: Value,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_maps_to_pending() {
        assert_eq!(ApprovalStatus::from_raw("processed"), ApprovalStatus::Pending);
        assert_eq!(ApprovalStatus::from_raw("pending"), ApprovalStatus::Pending);
        assert_eq!(ApprovalStatus::from_raw("something-new"), ApprovalStatus::Pending);
    }

    #[test]
    fn status_mapping_is_case_insensitive() {
        assert_eq!(ApprovalStatus::from_raw("Approved"), ApprovalStatus::Approved);
        assert_eq!(ApprovalStatus::from_raw("REJECTED"), ApprovalStatus::Rejected);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ApprovalStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }

    #[test]
    fn line_item_defaults_missing_fields_to_null() {
        let item: LineItem = serde_json::from_str(r#"{"description": "Paper"}"#).unwrap();
        assert!(item.total.is_null());
        assert!(item.quantity.is_null());
    }
}
