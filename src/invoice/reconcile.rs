//! Arithmetic cross-check of an invoice's declared total.
//!
//! The declared grand total must equal the sum of line-item totals plus the
//! declared tax, within floating-point tolerance. Pure and recomputed on
//! every call — records are edited between reads, so nothing is cached.

use serde::{Deserialize, Serialize};

use super::normalize::parse_amount;
use super::types::InvoiceRecord;

/// Absolute difference below this counts as a match. Covers floating-point
/// drift in the extracted amounts, not real rounding discrepancies.
pub const RECONCILE_TOLERANCE: f64 = 0.01;

/// Derived reconciliation verdict. `is_valid` holds iff
/// `absolute_difference < RECONCILE_TOLERANCE`, except for the no-items
/// sentinel where the record is unconditionally invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub is_valid: bool,
    pub items_subtotal: f64,
    pub tax_amount: f64,
    pub calculated_total: f64,
    pub declared_total: f64,
    pub absolute_difference: f64,
}

impl ReconciliationResult {
    /// Short human-readable verdict for the review table.
    pub fn summary(&self) -> String {
        if self.is_valid {
            "Valid".to_string()
        } else if self.absolute_difference == 0.0 {
            // Only the no-items sentinel is invalid at zero difference.
            "No items found".to_string()
        } else {
            format!("Mismatch: {:.2}", self.absolute_difference)
        }
    }
}

/// Cross-validate a record's declared total against its line items.
pub fn reconcile(record: &InvoiceRecord) -> ReconciliationResult {
    let tax_amount = parse_amount(&record.declared_tax);
    let declared_total = parse_amount(&record.declared_total);

    // An invoice with no parsed items cannot be reconciled: reported as
    // invalid with zero difference, not compared arithmetically.
    if record.line_items.is_empty() {
        return ReconciliationResult {
            is_valid: false,
            items_subtotal: 0.0,
            tax_amount,
            calculated_total: 0.0,
            declared_total,
            absolute_difference: 0.0,
        };
    }

    let items_subtotal: f64 = record
        .line_items
        .iter()
        .map(|item| parse_amount(&item.total))
        .sum();
    let calculated_total = items_subtotal + tax_amount;
    let absolute_difference = (calculated_total - declared_total).abs();

    ReconciliationResult {
        is_valid: absolute_difference < RECONCILE_TOLERANCE,
        items_subtotal,
        tax_amount,
        calculated_total,
        declared_total,
        absolute_difference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::normalize::invoice_record;
    use serde_json::json;

    fn record(items: serde_json::Value, total: serde_json::Value, tax: serde_json::Value) -> InvoiceRecord {
        invoice_record(&json!({ "items": items, "totalAmount": total, "gstAmount": tax }))
    }

    #[test]
    fn matching_total_is_valid() {
        let rec = record(
            json!([{ "total": "60.00" }, { "total": "40.00" }]),
            json!("118.00"),
            json!("18.00"),
        );
        let result = reconcile(&rec);
        assert!(result.is_valid);
        assert_eq!(result.items_subtotal, 100.0);
        assert_eq!(result.tax_amount, 18.0);
        assert_eq!(result.calculated_total, 118.0);
        assert_eq!(result.absolute_difference, 0.0);
        assert_eq!(result.summary(), "Valid");
    }

    #[test]
    fn mismatched_total_reports_difference() {
        let rec = record(
            json!([{ "total": "100.00" }]),
            json!("120.00"),
            json!("18.00"),
        );
        let result = reconcile(&rec);
        assert!(!result.is_valid);
        assert_eq!(result.absolute_difference, 2.0);
        assert_eq!(result.summary(), "Mismatch: 2.00");
    }

    #[test]
    fn empty_line_items_are_always_invalid() {
        let rec = record(json!([]), json!("500"), json!(null));
        let result = reconcile(&rec);
        assert!(!result.is_valid);
        assert_eq!(result.items_subtotal, 0.0);
        assert_eq!(result.calculated_total, 0.0);
        assert_eq!(result.declared_total, 500.0);
        assert_eq!(result.absolute_difference, 0.0);
        assert_eq!(result.summary(), "No items found");
    }

    #[test]
    fn non_numeric_item_total_contributes_zero() {
        let rec = record(
            json!([{ "total": "N/A" }, { "total": 118 }]),
            json!(118),
            json!(null),
        );
        let result = reconcile(&rec);
        assert!(result.is_valid);
        assert_eq!(result.items_subtotal, 118.0);
    }

    #[test]
    fn missing_declared_fields_default_to_zero() {
        let rec = record(json!([{ "total": 50 }]), json!(null), json!(null));
        let result = reconcile(&rec);
        assert_eq!(result.declared_total, 0.0);
        assert_eq!(result.tax_amount, 0.0);
        assert!(!result.is_valid);
        assert_eq!(result.absolute_difference, 50.0);
    }

    #[test]
    fn difference_within_tolerance_is_valid() {
        let rec = record(json!([{ "total": 100.004 }]), json!(100.0), json!(0));
        assert!(reconcile(&rec).is_valid);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let rec = record(
            json!([{ "total": "33.33" }, { "total": "66.67" }]),
            json!("118.00"),
            json!("18.00"),
        );
        let first = reconcile(&rec);
        let second = reconcile(&rec);
        assert_eq!(first, second);
    }
}
