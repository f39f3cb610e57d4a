//! Core type definitions for the BUSI dataset tools

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dataset category, mapped to one folder under the dataset root.
///
/// Labels are free-form so the same loader covers BUSI's
/// benign/malignant/normal split and any other folder-per-class layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassLabel(String);

impl ClassLabel {
    /// Creates a new class label
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label text, which is also the folder name it maps to
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassLabel {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ClassLabel {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Width and height of one decoded grayscale grid, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    /// Grid width in pixels
    pub width: u32,
    /// Grid height in pixels
    pub height: u32,
}

impl ImageShape {
    /// Creates a new shape
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels in the grid
    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What the dataset builder does with a pair whose image and mask
/// dimensions disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMismatchPolicy {
    /// Keep the pair as-is
    Keep,
    /// Drop the pair with a warning and count it as skipped
    Skip,
    /// Abort the dataset build
    Fail,
}

impl Default for ShapeMismatchPolicy {
    fn default() -> Self {
        ShapeMismatchPolicy::Keep
    }
}

impl fmt::Display for ShapeMismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatchPolicy::Keep => write!(f, "keep"),
            ShapeMismatchPolicy::Skip => write!(f, "skip"),
            ShapeMismatchPolicy::Fail => write!(f, "fail"),
        }
    }
}
