//! Pre-upload image quality gate.
//!
//! Runs blur, glare, darkness and resolution heuristics over decoded pixel
//! data before a file is accepted into an upload batch. Pure analysis — no
//! I/O, no mutation. A non-empty issue list blocks automatic inclusion of
//! the file; the operator may discard it or explicitly override, and an
//! override is trusted as-is with no re-validation.

pub mod pixels;
pub mod validator;

pub use pixels::PixelBuffer;
pub use validator::{
    decode_pixels, validate, validate_image_bytes, validate_with, IssueKind, QualityThresholds,
    ValidationIssue,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("image data too small to be a valid image file")]
    InputTooSmall,

    #[error("image data exceeds the {limit_mb}MB upload limit")]
    InputTooLarge { limit_mb: usize },

    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("pixel buffer length {actual} does not match {width}x{height} RGBA dimensions")]
    BufferShape { width: u32, height: u32, actual: usize },
}
