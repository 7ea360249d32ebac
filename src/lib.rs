//! Core validation logic for an invoice-intake console.
//!
//! Operators photograph or scan invoices and upload them for AI field
//! extraction; this crate holds the two checks that gate and grade that
//! flow, plus the value logic behind the review table:
//!
//! - [`quality`] — pre-upload image quality heuristics (resolution, blur,
//!   glare, darkness) over decoded pixel data.
//! - [`invoice`] — typed records for loosely-named extraction output and
//!   the declared-total reconciliation check.
//! - [`review`] — filters, summary statistics, and session view state for
//!   the processed-record table.
//!
//! Everything is synchronous and pure: no I/O, no shared mutable state, no
//! caching. Upload orchestration, storage, and rendering live in the
//! surrounding application.

pub mod invoice;
pub mod quality;
pub mod review;

pub use invoice::{reconcile, ApprovalStatus, InvoiceRecord, ReconciliationResult};
pub use quality::{validate, validate_image_bytes, IssueKind, PixelBuffer, ValidationIssue};
