//! Side-by-side preview rendering for image/mask pairs.
//!
//! Loading and summarizing stay headless; anything that wants to show a
//! pair goes through [`PairRenderer`]. The bundled implementation composes
//! image and mask next to each other on one canvas and writes a PNG.

use std::path::PathBuf;

use image::{imageops, GrayImage, Luma};
use tracing::info;

use busi_core::{ClassLabel, Error, Result};

use crate::loader::ImagePair;

/// Renders one image/mask pair for a human to look at
pub trait PairRenderer {
    /// Renders the pair, labelled with its class
    fn render(&self, label: &ClassLabel, pair: &ImagePair) -> Result<()>;
}

/// Writes the pair to disk as one PNG with image and mask side by side,
/// separated by a black divider.
pub struct SideBySidePng {
    output: PathBuf,
    gap: u32,
}

impl SideBySidePng {
    /// Default width of the divider between image and mask, in pixels
    pub const DEFAULT_GAP: u32 = 8;

    /// Creates a renderer writing to the given path
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            gap: Self::DEFAULT_GAP,
        }
    }

    /// Overrides the divider width
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Composes the two grids onto one canvas; when heights differ, the
    /// shorter side is padded with black at the bottom.
    fn compose(&self, pair: &ImagePair) -> GrayImage {
        let (image_w, image_h) = pair.image.dimensions();
        let (mask_w, mask_h) = pair.mask.dimensions();
        let width = image_w + self.gap + mask_w;
        let height = image_h.max(mask_h);

        let mut canvas = GrayImage::from_pixel(width, height, Luma([0u8]));
        imageops::replace(&mut canvas, &pair.image, 0, 0);
        imageops::replace(&mut canvas, &pair.mask, (image_w + self.gap) as i64, 0);
        canvas
    }
}

impl PairRenderer for SideBySidePng {
    fn render(&self, label: &ClassLabel, pair: &ImagePair) -> Result<()> {
        let canvas = self.compose(pair);
        canvas.save(&self.output).map_err(|e| {
            Error::Image(format!(
                "Failed to save preview {}: {e}",
                self.output.display()
            ))
        })?;
        info!(
            "Preview of {label} pair '{}' written to {}",
            pair.stem,
            self.output.display()
        );
        Ok(())
    }
}
