//! In-memory RGB24 frame buffer.

use crate::constants::encoding::RAW_BYTES_PER_PIXEL;
use crate::constants::palette::Rgb;
use crate::error::{Error, Result};

use super::TextBitmap;

/// A packed RGB24 video frame, row-major with no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw RGB24 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSize`] if `data` is not exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if Some(data.len()) != Self::byte_len(width, height) {
            return Err(Error::FrameSize {
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

    /// Create a frame of a single colour.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let pixels = width as usize * height as usize;
        let data = color.repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of bytes in a frame of the given size, `None` on overflow.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(RAW_BYTES_PER_PIXEL)
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB24 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let idx = self.index(i64::from(x), i64::from(y))?;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Fill the rectangle with corners `(x0, y0)` and `(x1, y1)`, both inclusive.
    ///
    /// Parts outside the frame are clipped.
    pub(crate) fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        let (left, right) = (x0.min(x1).max(0), x0.max(x1).min(i64::from(self.width) - 1));
        let (top, bottom) = (y0.min(y1).max(0), y0.max(y1).min(i64::from(self.height) - 1));

        for y in top..=bottom {
            for x in left..=right {
                if let Some(idx) = self.index(x, y) {
                    self.data[idx..idx + RAW_BYTES_PER_PIXEL].copy_from_slice(&color);
                }
            }
        }
    }

    /// Blend rasterised text onto the frame with its baseline origin at `(x, baseline_y)`.
    pub(crate) fn blend_text(&mut self, x: i64, baseline_y: i64, text: &TextBitmap, color: Rgb) {
        let top = baseline_y - i64::from(text.ascent());

        for row in 0..text.rows() {
            for col in 0..text.width() {
                let coverage = text.coverage_at(col, row);
                if coverage == 0 {
                    continue;
                }
                if let Some(idx) = self.index(x + i64::from(col), top + i64::from(row)) {
                    blend_pixel(&mut self.data[idx..idx + RAW_BYTES_PER_PIXEL], color, coverage);
                }
            }
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let idx = (y as usize * self.width as usize + x as usize) * RAW_BYTES_PER_PIXEL;
        Some(idx)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn blend_pixel(dst: &mut [u8], src: Rgb, alpha: u8) {
    let alpha = u16::from(alpha);
    let inv_alpha = 255 - alpha;
    for (channel, &src_c) in dst.iter_mut().zip(src.iter()) {
        let blended = (u16::from(src_c) * alpha + u16::from(*channel) * inv_alpha + 127) / 255;
        *channel = blended as u8;
    }
}
