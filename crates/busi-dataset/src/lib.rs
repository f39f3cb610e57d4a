//! Loading and summarizing BUSI-style image/mask datasets.
//!
//! The BUSI breast-ultrasound dataset ships as one folder per class
//! (benign, malignant, normal), each holding source images next to their
//! segmentation masks, related by filename convention. This crate pairs
//! and decodes those files, assembles them into an in-memory [`Dataset`]
//! and computes a [`LoadSummary`] over the result.

pub mod dataset;
pub mod loader;
pub mod preview;
pub mod summary;

pub use dataset::{build_dataset, ClassPairs, Dataset};
pub use loader::{decode_grayscale, FolderScan, ImagePair, PairLoader};
pub use preview::{PairRenderer, SideBySidePng};
pub use summary::{ClassSummary, LoadSummary};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::dataset::*;
    pub use crate::loader::*;
    pub use crate::preview::*;
    pub use crate::summary::*;
}
