//! Field-alias normalization between the extraction service's loose schema
//! and this crate's typed records.
//!
//! The upstream AI extraction does not guarantee consistent field names, so
//! each canonical field maps to an ordered list of accepted source keys,
//! resolved once at ingestion. The reconciliation checker itself never sees
//! raw documents.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::types::{ApprovalStatus, InvoiceRecord, InvoiceSummary, LineItem, ProcessedRecord};

pub const INVOICE_NUMBER_KEYS: &[&str] = &["invoiceNumber", "invoice_number", "number", "invoiceNo"];
pub const VENDOR_NAME_KEYS: &[&str] = &["vendorName", "vendor_name", "vendor", "supplier", "company"];
pub const INVOICE_DATE_KEYS: &[&str] = &["invoiceDate", "invoice_date", "date", "issueDate"];
pub const TOTAL_AMOUNT_KEYS: &[&str] = &["totalAmount", "total_amount", "total", "amount", "grandTotal"];
pub const TAX_AMOUNT_KEYS: &[&str] = &["gstAmount", "gst_amount", "gst", "tax", "taxAmount"];
pub const LINE_ITEMS_KEYS: &[&str] = &["items", "lineItems", "line_items"];
pub const FILE_NAME_KEYS: &[&str] = &["fileName", "name", "originalName"];
pub const STATUS_KEYS: &[&str] = &["status", "state", "processing_status"];

const ITEM_DESCRIPTION_KEYS: &[&str] = &["description", "name", "item"];
const ITEM_QUANTITY_KEYS: &[&str] = &["quantity", "qty"];
const ITEM_UNIT_PRICE_KEYS: &[&str] = &["unitPrice", "unit_price", "price", "rate"];
const ITEM_TOTAL_KEYS: &[&str] = &["total", "amount"];

const PROCESSED_AT_KEYS: &[&str] = &["processedAt", "uploadedAt", "createdAt"];

/// First non-null value among the accepted source keys.
pub fn resolve<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| data.get(*k).filter(|v| !v.is_null()))
}

/// Build the typed reconciliation input from a raw extraction document.
pub fn invoice_record(data: &Value) -> InvoiceRecord {
    let line_items = resolve(data, LINE_ITEMS_KEYS)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(line_item).collect())
        .unwrap_or_default();

    InvoiceRecord {
        line_items,
        declared_total: resolve(data, TOTAL_AMOUNT_KEYS).cloned().unwrap_or(Value::Null),
        declared_tax: resolve(data, TAX_AMOUNT_KEYS).cloned().unwrap_or(Value::Null),
    }
}

fn line_item(raw: &Value) -> LineItem {
    LineItem {
        description: resolve(raw, ITEM_DESCRIPTION_KEYS)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        quantity: resolve(raw, ITEM_QUANTITY_KEYS).cloned().unwrap_or(Value::Null),
        unit_price: resolve(raw, ITEM_UNIT_PRICE_KEYS).cloned().unwrap_or(Value::Null),
        total: resolve(raw, ITEM_TOTAL_KEYS).cloned().unwrap_or(Value::Null),
    }
}

/// Resolve the display fields for a review row.
pub fn invoice_summary(data: &Value) -> InvoiceSummary {
    let text = |keys: &[&str]| -> String {
        resolve(data, keys)
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string()
    };

    InvoiceSummary {
        invoice_number: text(INVOICE_NUMBER_KEYS),
        vendor_name: text(VENDOR_NAME_KEYS),
        invoice_date: text(INVOICE_DATE_KEYS),
        total_amount: resolve(data, TOTAL_AMOUNT_KEYS).cloned().unwrap_or(Value::Null),
        status: resolve(data, STATUS_KEYS)
            .and_then(Value::as_str)
            .unwrap_or("processed")
            .to_string(),
    }
}

/// Build a review row from a fetched document.
///
/// `fetched_at` is the fallback timestamp when the document carries none of
/// the accepted time fields.
pub fn processed_record(id: &str, data: &Value, fetched_at: DateTime<Utc>) -> ProcessedRecord {
    let file_name = resolve(data, FILE_NAME_KEYS)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Document {}", id.chars().take(8).collect::<String>()));

    let processed_at = resolve(data, PROCESSED_AT_KEYS)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .unwrap_or(fetched_at);

    let status_raw = resolve(data, STATUS_KEYS)
        .and_then(Value::as_str)
        .unwrap_or("processed");

    ProcessedRecord {
        id: id.to_string(),
        file_name,
        processed_at,
        status: ApprovalStatus::from_raw(status_raw),
        data: data.clone(),
    }
}

/// Lenient numeric parsing shared by reconciliation and statistics.
///
/// JSON numbers pass through; strings parse their leading decimal prefix
/// (so `"118.00 INR"` reads as 118.0); anything else is 0. The silent
/// default is deliberate — upstream extraction may omit or garble fields,
/// and a missing amount must not abort the check.
pub fn parse_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_decimal(s),
        _ => 0.0,
    }
}

fn leading_decimal(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }
    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn aliases_resolve_in_declared_order() {
        let data = json!({ "total_amount": "200", "total": "300" });
        let record = invoice_record(&data);
        assert_eq!(record.declared_total, json!("200"));
    }

    #[test]
    fn null_aliases_fall_through() {
        let data = json!({ "totalAmount": null, "amount": 42 });
        let record = invoice_record(&data);
        assert_eq!(record.declared_total, json!(42));
    }

    #[test]
    fn items_resolve_totals_and_amounts() {
        let data = json!({
            "items": [
                { "description": "Paper", "total": "10.50" },
                { "name": "Toner", "amount": 99 }
            ]
        });
        let record = invoice_record(&data);
        assert_eq!(record.line_items.len(), 2);
        assert_eq!(record.line_items[0].total, json!("10.50"));
        assert_eq!(record.line_items[1].description, "Toner");
        assert_eq!(record.line_items[1].total, json!(99));
    }

    #[test]
    fn summary_falls_back_to_na() {
        let summary = invoice_summary(&json!({}));
        assert_eq!(summary.invoice_number, "N/A");
        assert_eq!(summary.vendor_name, "N/A");
        assert_eq!(summary.status, "processed");
        assert!(summary.total_amount.is_null());
    }

    #[test]
    fn record_file_name_falls_back_to_id_prefix() {
        let fetched = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let record = processed_record("a1b2c3d4e5f6", &json!({}), fetched);
        assert_eq!(record.file_name, "Document a1b2c3d4");
        assert_eq!(record.processed_at, fetched);
        assert_eq!(record.status, ApprovalStatus::Pending);
    }

    #[test]
    fn record_prefers_processed_at_timestamp() {
        let fetched = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let data = json!({
            "fileName": "inv-042.jpg",
            "processedAt": "2025-03-01T08:30:00Z",
            "status": "approved"
        });
        let record = processed_record("doc1", &data, fetched);
        assert_eq!(record.file_name, "inv-042.jpg");
        assert_eq!(
            record.processed_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap()
        );
        assert_eq!(record.status, ApprovalStatus::Approved);
    }

    #[test]
    fn parse_amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(118.5)), 118.5);
        assert_eq!(parse_amount(&json!("118.5")), 118.5);
        assert_eq!(parse_amount(&json!("  -3.25")), -3.25);
    }

    #[test]
    fn parse_amount_reads_leading_decimal_prefix() {
        assert_eq!(parse_amount(&json!("118.00 INR")), 118.0);
        assert_eq!(parse_amount(&json!("12.5.7")), 12.5);
    }

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(&json!("N/A")), 0.0);
        assert_eq!(parse_amount(&json!(null)), 0.0);
        assert_eq!(parse_amount(&json!({ "nested": true })), 0.0);
        assert_eq!(parse_amount(&json!("")), 0.0);
    }
}
