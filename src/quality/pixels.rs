//! Decoded pixel data as seen by the quality checks.

use image::RgbaImage;

use super::QualityError;

/// A rectangular grid of RGBA pixels in row-major order, one byte per
/// channel. Scoped to a single validation call; never persisted.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, QualityError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(QualityError::BufferShape {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat RGBA byte view, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Luminance of the pixel at (x, y). Coordinates must be in bounds.
    pub fn luminance_at(&self, x: u32, y: u32) -> f64 {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        luminance(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// ITU-R BT.601 luminance.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_shape_is_validated() {
        let err = PixelBuffer::new(10, 10, vec![0; 12]).unwrap_err();
        assert!(matches!(
            err,
            QualityError::BufferShape { actual: 12, .. }
        ));
    }

    #[test]
    fn luminance_weights_sum_to_full_scale() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn luminance_at_reads_row_major() {
        // 2x1 buffer: black then white
        let buf = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        assert_eq!(buf.luminance_at(0, 0), 0.0);
        assert!((buf.luminance_at(1, 0) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn from_rgba_image_preserves_dimensions() {
        let img = RgbaImage::from_pixel(7, 3, image::Rgba([10, 20, 30, 255]));
        let buf = PixelBuffer::from(img);
        assert_eq!(buf.width(), 7);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.data().len(), 7 * 3 * 4);
    }
}
