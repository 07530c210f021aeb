//! Text rasterisation with `fontdue`.

use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::constants::overlay::FONT_CANDIDATES;
use crate::error::{Error, Result};

/// A rasterised line of text.
///
/// Coverage is stored row-major for `ascent + descent` rows; the baseline
/// sits `ascent` rows below the top edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBitmap {
    width: u32,
    ascent: u32,
    descent: u32,
    coverage: Vec<u8>,
}

impl TextBitmap {
    /// Build a bitmap from raw coverage values.
    ///
    /// # Errors
    ///
    /// Returns an error if `coverage` does not hold `width * (ascent + descent)` values.
    pub fn new(width: u32, ascent: u32, descent: u32, coverage: Vec<u8>) -> Result<Self> {
        let expected = width as usize * (ascent as usize + descent as usize);
        if coverage.len() != expected {
            return Err(Error::Internal {
                message: format!(
                    "text bitmap expects {expected} coverage values, got {}",
                    coverage.len()
                ),
            });
        }
        Ok(Self {
            width,
            ascent,
            descent,
            coverage,
        })
    }

    /// Advance width of the text in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height above the baseline; this is the text height used for layout.
    pub fn ascent(&self) -> u32 {
        self.ascent
    }

    /// Depth below the baseline.
    pub fn descent(&self) -> u32 {
        self.descent
    }

    /// Total number of coverage rows.
    pub fn rows(&self) -> u32 {
        self.ascent + self.descent
    }

    /// Coverage (0-255) at column `x`, row `y`.
    pub(crate) fn coverage_at(&self, x: u32, y: u32) -> u8 {
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

/// Rasterises captions from a TrueType/OpenType font.
pub struct TextPainter {
    font: Font,
    font_size: f32,
    path: PathBuf,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .field("path", &self.path)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

impl TextPainter {
    /// Load a font file at the given pixel size.
    pub fn load(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| {
            Error::FontLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        debug!("Loaded overlay font {} at {font_size}px", path.display());

        Ok(Self {
            font,
            font_size,
            path: path.to_path_buf(),
        })
    }

    /// Load the explicitly configured font, or the first installed fallback font.
    pub fn discover(explicit: Option<&Path>, font_size: f32) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path, font_size);
        }

        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.is_file())
            .ok_or(Error::FontNotFound)
            .and_then(|path| Self::load(path, font_size))
    }

    /// Path of the loaded font.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rasterise a single line of text.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn render(&self, text: &str) -> TextBitmap {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen_x = 0.0_f32;
        let mut ascent = 0_i32;
        let mut descent = 0_i32;
        let mut right_edge = 0_i32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let left = pen_x.round() as i32 + metrics.xmin;
            ascent = ascent.max(metrics.ymin + metrics.height as i32);
            descent = descent.max(-metrics.ymin);
            right_edge = right_edge.max(left + metrics.width as i32);
            glyphs.push((left, metrics, bitmap));
            pen_x += metrics.advance_width;
        }

        let width = right_edge.max(pen_x.ceil() as i32).max(0) as u32;
        let ascent = ascent.max(0) as u32;
        let descent = descent.max(0) as u32;
        let rows = ascent + descent;
        let mut coverage = vec![0_u8; width as usize * rows as usize];

        for (left, metrics, bitmap) in glyphs {
            let top = ascent as i32 - (metrics.ymin + metrics.height as i32);
            for row in 0..metrics.height {
                let y = top + row as i32;
                if y < 0 || y >= rows as i32 {
                    continue;
                }
                for col in 0..metrics.width {
                    let x = left + col as i32;
                    if x < 0 || x >= width as i32 {
                        continue;
                    }
                    let idx = y as usize * width as usize + x as usize;
                    coverage[idx] = coverage[idx].max(bitmap[row * metrics.width + col]);
                }
            }
        }

        TextBitmap {
            width,
            ascent,
            descent,
            coverage,
        }
    }
}
