//! Configuration structures for the BUSI dataset tools

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ClassLabel, ShapeMismatchPolicy};

/// Dataset layout and loading configuration.
///
/// Everything the loader needs to know about a dataset lives here, so the
/// same binary can point at different dataset roots or label sets without
/// recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Root directory holding one subdirectory per class label
    pub data_dir: PathBuf,
    /// Class labels, in the order folders are scanned and reported
    pub labels: Vec<ClassLabel>,
    /// Filename extension shared by source images and masks
    pub image_extension: String,
    /// Marker appended to a base name to form its mask filename
    pub mask_suffix: String,
    /// Sort candidate filenames lexicographically before pairing
    pub sort_entries: bool,
    /// What to do with pairs whose image and mask dimensions disagree
    pub shape_mismatch: ShapeMismatchPolicy,
    /// Label whose first pair the preview renders, if any
    pub preview_label: Option<ClassLabel>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/Dataset_BUSI_with_GT"),
            labels: vec![
                ClassLabel::from("benign"),
                ClassLabel::from("malignant"),
                ClassLabel::from("normal"),
            ],
            image_extension: ".png".to_string(),
            mask_suffix: "_mask".to_string(),
            sort_entries: true,
            shape_mismatch: ShapeMismatchPolicy::default(),
            preview_label: Some(ClassLabel::from("benign")),
        }
    }
}

impl DatasetConfig {
    /// Validates the label set and filename convention
    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(Error::Config(
                "Label set must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for label in &self.labels {
            if label.as_str().is_empty() {
                return Err(Error::Config(
                    "Class labels must not be empty".to_string(),
                ));
            }
            if label.as_str().contains(['/', '\\']) {
                return Err(Error::Config(format!(
                    "Class label '{label}' must not contain path separators"
                )));
            }
            if !seen.insert(label) {
                return Err(Error::Config(format!(
                    "Duplicate class label '{label}'"
                )));
            }
        }

        if self.image_extension.len() < 2 || !self.image_extension.starts_with('.') {
            return Err(Error::Config(format!(
                "Image extension '{}' must start with '.'",
                self.image_extension
            )));
        }

        if self.mask_suffix.is_empty() {
            return Err(Error::Config(
                "Mask suffix must not be empty".to_string(),
            ));
        }

        if let Some(preview) = &self.preview_label {
            if !self.labels.contains(preview) {
                return Err(Error::Config(format!(
                    "Preview label '{preview}' is not in the label set"
                )));
            }
        }

        Ok(())
    }

    /// Folder scanned for the given label
    pub fn class_dir(&self, label: &ClassLabel) -> PathBuf {
        self.data_dir.join(label.as_str())
    }

    /// Replaces the dataset root, keeping everything else
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }
}
