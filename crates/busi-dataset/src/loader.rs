//! Image/mask pair discovery and decoding.
//!
//! A BUSI-style class folder holds source images next to their segmentation
//! masks, related purely by filename: `scan (3).png` goes with
//! `scan (3)_mask.png`. This module finds those pairs in one folder and
//! decodes both sides into 8-bit grayscale pixel grids.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{debug, warn};

use busi_core::{DatasetConfig, Error, ImageShape, Result};

/// One source image and its segmentation mask, decoded as 8-bit grayscale.
#[derive(Clone)]
pub struct ImagePair {
    /// Base name shared by the two files, without extension
    pub stem: String,
    /// Source image pixels
    pub image: GrayImage,
    /// Mask pixels
    pub mask: GrayImage,
}

impl ImagePair {
    /// Shape of the source image
    pub fn image_shape(&self) -> ImageShape {
        let (width, height) = self.image.dimensions();
        ImageShape::new(width, height)
    }

    /// Shape of the mask
    pub fn mask_shape(&self) -> ImageShape {
        let (width, height) = self.mask.dimensions();
        ImageShape::new(width, height)
    }

    /// Whether image and mask dimensions agree
    pub fn shapes_match(&self) -> bool {
        self.image.dimensions() == self.mask.dimensions()
    }
}

// Custom Debug that reports shapes instead of dumping pixel data
impl fmt::Debug for ImagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePair")
            .field("stem", &self.stem)
            .field("image", &format!("{}", self.image_shape()))
            .field("mask", &format!("{}", self.mask_shape()))
            .finish()
    }
}

/// Result of scanning one class folder
#[derive(Debug)]
pub struct FolderScan {
    /// Pairs that decoded successfully, in discovery order
    pub pairs: Vec<ImagePair>,
    /// Candidates dropped because one side failed to decode
    pub skipped: usize,
}

impl FolderScan {
    /// Number of loaded pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pair was loaded
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Decodes an image file as a single-channel grayscale grid.
///
/// Color sources are converted to luma; already-grayscale sources keep
/// their pixel values unchanged.
pub fn decode_grayscale(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)
        .map_err(|e| Error::Image(format!("Failed to decode {}: {e}", path.display())))?;
    Ok(img.to_luma8())
}

/// Paths of a discovered pair, before decoding
struct PairPaths {
    stem: String,
    image: PathBuf,
    mask: PathBuf,
}

/// Discovers and loads image/mask pairs from class folders.
pub struct PairLoader {
    image_extension: String,
    mask_suffix: String,
    sort_entries: bool,
}

impl PairLoader {
    /// Creates a loader with the given filename convention
    pub fn new(
        image_extension: impl Into<String>,
        mask_suffix: impl Into<String>,
        sort_entries: bool,
    ) -> Self {
        Self {
            image_extension: image_extension.into(),
            mask_suffix: mask_suffix.into(),
            sort_entries,
        }
    }

    /// Creates a loader following a dataset configuration
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(
            config.image_extension.clone(),
            config.mask_suffix.clone(),
            config.sort_entries,
        )
    }

    /// True for file names that qualify as source images: they carry the
    /// image extension and are not themselves masks.
    fn is_candidate(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.image_extension) && !file_name.contains(&self.mask_suffix)
    }

    /// Mask file name expected next to the given source image name
    fn mask_name(&self, file_name: &str) -> String {
        let stem = self.stem(file_name);
        format!("{stem}{}{}", self.mask_suffix, self.image_extension)
    }

    /// Base name of a candidate, without the image extension
    fn stem<'a>(&self, file_name: &'a str) -> &'a str {
        file_name
            .strip_suffix(&self.image_extension)
            .unwrap_or(file_name)
    }

    /// Lists one folder and returns the complete image/mask path pairs.
    ///
    /// Source images without a mask next to them are excluded here, before
    /// any decoding happens; they are not counted as skipped.
    fn discover(&self, folder: &Path) -> Result<Vec<PairPaths>> {
        if !folder.exists() {
            return Err(Error::DirectoryNotFound(folder.display().to_string()));
        }
        if !folder.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "Not a directory: {}",
                folder.display()
            )));
        }

        let mut candidates = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.is_candidate(name) {
                    candidates.push(name.to_string());
                }
            }
        }

        if self.sort_entries {
            candidates.sort_unstable();
        }

        let mut pairs = Vec::with_capacity(candidates.len());
        for name in candidates {
            let mask_path = folder.join(self.mask_name(&name));
            if !mask_path.exists() {
                debug!("No mask next to {name}, excluding it");
                continue;
            }
            pairs.push(PairPaths {
                stem: self.stem(&name).to_string(),
                image: folder.join(&name),
                mask: mask_path,
            });
        }

        Ok(pairs)
    }

    /// Scans one class folder and decodes every discovered pair.
    ///
    /// A pair whose image or mask fails to decode is dropped with a warning
    /// and counted in [`FolderScan::skipped`]; the scan always runs to the
    /// end of the folder. Only the folder itself being missing or unreadable
    /// is an error.
    pub fn load_pairs(&self, folder: &Path) -> Result<FolderScan> {
        let discovered = self.discover(folder)?;

        let mut pairs = Vec::with_capacity(discovered.len());
        let mut skipped = 0;

        for paths in discovered {
            let image = match decode_grayscale(&paths.image) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Could not read image for {}: {e}", paths.stem);
                    skipped += 1;
                    continue;
                }
            };
            let mask = match decode_grayscale(&paths.mask) {
                Ok(mask) => mask,
                Err(e) => {
                    warn!("Could not read mask for {}: {e}", paths.stem);
                    skipped += 1;
                    continue;
                }
            };
            pairs.push(ImagePair {
                stem: paths.stem,
                image,
                mask,
            });
        }

        Ok(FolderScan { pairs, skipped })
    }
}
