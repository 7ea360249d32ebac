//! Invoice data model and total reconciliation.
//!
//! Records originate from an external extraction service with inconsistent
//! field naming; `normalize` maps the loose schema onto typed records once
//! at ingestion, and `reconcile` cross-checks the declared grand total
//! against the parsed line items.

pub mod normalize;
pub mod reconcile;
pub mod types;

pub use normalize::{invoice_record, invoice_summary, parse_amount, processed_record};
pub use reconcile::{reconcile, ReconciliationResult, RECONCILE_TOLERANCE};
pub use types::{ApprovalStatus, InvoiceRecord, InvoiceSummary, LineItem, ProcessedRecord};
