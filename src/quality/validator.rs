//! Quality heuristics over a decoded pixel buffer.
//!
//! All checks run on every call and accumulate independently — none
//! short-circuits another. An empty issue list means the image is accepted.
//! Thresholds were tuned empirically against sample invoice photos and are
//! deliberately lenient; they live in `QualityThresholds` so callers can
//! recalibrate without a code change.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pixels::{luminance, PixelBuffer};
use super::QualityError;

/// Maximum accepted input size, matching the upload form's file limit.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Smallest valid image file is a ~67-byte PNG.
const MIN_IMAGE_BYTES: usize = 67;

/// Category of a detected quality problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    LowResolution,
    Blurry,
    Glare,
    TooDark,
    /// The image could not be decoded at all. Treated like any other quality
    /// failure: surfaced to the operator, who may override.
    Unreadable,
}

/// One detected quality problem with the measurement that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
    pub measurement: Option<f64>,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: impl Into<String>, measurement: Option<f64>) -> Self {
        Self {
            kind,
            message: message.into(),
            measurement,
        }
    }
}

/// Tunable limits for the quality checks.
#[derive(Debug, Clone)]
pub struct QualityThresholds {
    /// Minimum acceptable dimensions. Extraction quality degrades sharply
    /// below 100px; kept low to avoid false rejects.
    pub min_width: u32,
    pub min_height: u32,
    /// Mean sampled edge strength below this flags blur. Lenient — only
    /// extreme blur is flagged.
    pub blur_edge_strength: f64,
    /// Overexposed share of content pixels (percent) above this flags glare.
    pub glare_overexposed_pct: f64,
    /// Mean content luminance below this flags a too-dark image.
    pub dark_brightness: f64,
    /// Luminance at or above this is blank page background, not content.
    pub background_luminance: f64,
    /// A pixel with every channel at or above this is overexposed.
    pub overexposed_channel: u8,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_width: 100,
            min_height: 100,
            blur_edge_strength: 3.0,
            glare_overexposed_pct: 60.0,
            dark_brightness: 15.0,
            background_luminance: 245.0,
            overexposed_channel: 253,
        }
    }
}

/// Run all quality checks with default thresholds.
pub fn validate(pixels: &PixelBuffer) -> Vec<ValidationIssue> {
    validate_with(pixels, &QualityThresholds::default())
}

/// Run all quality checks. Deterministic and pure; issue order is fixed:
/// resolution, blur, glare, darkness.
pub fn validate_with(pixels: &PixelBuffer, t: &QualityThresholds) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let (w, h) = (pixels.width(), pixels.height());
    if w < t.min_width || h < t.min_height {
        issues.push(ValidationIssue::new(
            IssueKind::LowResolution,
            format!(
                "Image resolution {w}x{h} is below the {}x{} minimum",
                t.min_width, t.min_height
            ),
            Some(w.min(h) as f64),
        ));
    }

    if let Some(edge) = mean_edge_strength(pixels) {
        if edge < t.blur_edge_strength {
            issues.push(ValidationIssue::new(
                IssueKind::Blurry,
                "Image appears to be blurry or out of focus",
                Some(edge),
            ));
        }
    }

    let exposure = exposure_profile(pixels, t);
    // A fully near-white frame is a blank page, not glare or darkness.
    if exposure.content > 0 {
        let overexposed_pct = exposure.overexposed as f64 / exposure.content as f64 * 100.0;
        if overexposed_pct > t.glare_overexposed_pct {
            issues.push(ValidationIssue::new(
                IssueKind::Glare,
                "Image has excessive glare or overexposure",
                Some(overexposed_pct),
            ));
        }

        let brightness = exposure.brightness_sum / exposure.content as f64;
        if brightness < t.dark_brightness {
            issues.push(ValidationIssue::new(
                IssueKind::TooDark,
                "Image is too dark to read reliably",
                Some(brightness),
            ));
        }
    }

    debug!(
        width = w,
        height = h,
        issues = issues.len(),
        "image quality checks complete"
    );

    issues
}

/// Front door for raw file bytes: size bounds + decode + `validate`.
///
/// Never fails — an undecodable input produces a single `Unreadable` issue,
/// which callers treat identically to a detected quality problem.
pub fn validate_image_bytes(bytes: &[u8]) -> Vec<ValidationIssue> {
    match decode_pixels(bytes) {
        Ok(pixels) => validate(&pixels),
        Err(err) => vec![ValidationIssue::new(
            IssueKind::Unreadable,
            format!("Unable to process image: {err}"),
            None,
        )],
    }
}

/// Decode image bytes into a pixel buffer, enforcing the upload size bounds.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, QualityError> {
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(QualityError::InputTooSmall);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(QualityError::InputTooLarge {
            limit_mb: MAX_IMAGE_BYTES / (1024 * 1024),
        });
    }

    let img =
        image::load_from_memory(bytes).map_err(|e| QualityError::Decode(e.to_string()))?;
    Ok(PixelBuffer::from(img.to_rgba8()))
}

/// Mean local gradient magnitude over a bounded sample grid.
///
/// The stride keeps cost at roughly 50 samples per axis regardless of image
/// size. Each sampled point contributes the luminance difference to its
/// right and bottom neighbors at the stride distance. Returns `None` when
/// the image is too small to yield any sample (such images are already
/// flagged by the resolution check).
fn mean_edge_strength(pixels: &PixelBuffer) -> Option<f64> {
    let (w, h) = (pixels.width(), pixels.height());
    let step = (w.min(h) / 50).max(1);

    let mut sum = 0.0f64;
    let mut count = 0u64;

    let mut y = 0;
    while y + step < h {
        let mut x = 0;
        while x + step < w {
            let center = pixels.luminance_at(x, y);
            let right = pixels.luminance_at(x + step, y);
            let below = pixels.luminance_at(x, y + step);
            sum += (center - right).abs() + (center - below).abs();
            count += 1;
            x += step;
        }
        y += step;
    }

    (count > 0).then(|| sum / count as f64)
}

struct ExposureProfile {
    content: u64,
    overexposed: u64,
    brightness_sum: f64,
}

/// Classify a subsample of pixels into background / content / overexposed.
///
/// Samples every 16th pixel (stride 64 over the flat RGBA buffer). A pixel
/// is tested for overexposure before the background cut so that glare
/// highlights count as content; everything else at near-white luminance is
/// blank page background and excluded from the statistics.
fn exposure_profile(pixels: &PixelBuffer, t: &QualityThresholds) -> ExposureProfile {
    let data = pixels.data();
    let mut profile = ExposureProfile {
        content: 0,
        overexposed: 0,
        brightness_sum: 0.0,
    };

    let mut i = 0;
    while i + 3 < data.len() {
        let (r, g, b) = (data[i], data[i + 1], data[i + 2]);
        let lum = luminance(r, g, b);

        if r >= t.overexposed_channel && g >= t.overexposed_channel && b >= t.overexposed_channel
        {
            profile.overexposed += 1;
            profile.content += 1;
            profile.brightness_sum += lum;
        } else if lum < t.background_luminance {
            profile.content += 1;
            profile.brightness_sum += lum;
        }

        i += 64;
    }

    profile
}
