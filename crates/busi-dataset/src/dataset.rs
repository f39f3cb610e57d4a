//! Dataset assembly across class folders.
//!
//! One call walks every configured class folder, loads the pairs it finds
//! and applies the shape mismatch policy. Class order in the result always
//! follows the configured label order, so two runs over the same tree
//! report identically.

use tracing::{info, warn};

use busi_core::{ClassLabel, DatasetConfig, Error, Result, ShapeMismatchPolicy};

use crate::loader::{FolderScan, ImagePair, PairLoader};
use crate::summary::LoadSummary;

/// All pairs loaded for one class label
#[derive(Debug)]
pub struct ClassPairs {
    /// The label these pairs belong to
    pub label: ClassLabel,
    /// Decoded pairs, in discovery order
    pub pairs: Vec<ImagePair>,
    /// Candidates dropped while loading this class
    pub skipped: usize,
}

/// An in-memory dataset: one entry per configured class label, in
/// configured order.
#[derive(Debug)]
pub struct Dataset {
    classes: Vec<ClassPairs>,
}

impl Dataset {
    /// Assembles a dataset from already-loaded per-class entries
    pub fn new(classes: Vec<ClassPairs>) -> Self {
        Self { classes }
    }

    /// Per-class entries, in configured label order
    pub fn classes(&self) -> &[ClassPairs] {
        &self.classes
    }

    /// Pairs loaded for the given label, if the label was configured
    pub fn pairs(&self, label: &ClassLabel) -> Option<&[ImagePair]> {
        self.classes
            .iter()
            .find(|class| &class.label == label)
            .map(|class| class.pairs.as_slice())
    }

    /// First pair loaded for the given label
    pub fn first_pair(&self, label: &ClassLabel) -> Option<&ImagePair> {
        self.pairs(label).and_then(|pairs| pairs.first())
    }

    /// Total number of pairs across all classes
    pub fn len(&self) -> usize {
        self.classes.iter().map(|class| class.pairs.len()).sum()
    }

    /// True when no class holds any pair
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes the read-only summary view of this dataset
    pub fn summarize(&self) -> LoadSummary {
        LoadSummary::from_dataset(self)
    }
}

/// Loads every configured class folder into one dataset.
///
/// Folders are visited in configured label order. A missing or unreadable
/// class folder fails the whole build; decode failures inside a folder are
/// absorbed as per-class skips.
pub fn build_dataset(config: &DatasetConfig) -> Result<Dataset> {
    config.validate()?;

    let loader = PairLoader::from_config(config);
    let mut classes = Vec::with_capacity(config.labels.len());

    for label in &config.labels {
        let class_dir = config.class_dir(label);
        let FolderScan { pairs, skipped } = loader.load_pairs(&class_dir)?;
        let (pairs, mismatched) = apply_shape_policy(label, pairs, config.shape_mismatch)?;
        let skipped = skipped + mismatched;

        info!(
            "Class {label}: {} pairs loaded, {skipped} skipped",
            pairs.len()
        );
        classes.push(ClassPairs {
            label: label.clone(),
            pairs,
            skipped,
        });
    }

    Ok(Dataset::new(classes))
}

/// Applies the configured mismatch policy to one class worth of pairs,
/// returning the surviving pairs and the number dropped.
fn apply_shape_policy(
    label: &ClassLabel,
    pairs: Vec<ImagePair>,
    policy: ShapeMismatchPolicy,
) -> Result<(Vec<ImagePair>, usize)> {
    let mut kept = Vec::with_capacity(pairs.len());
    let mut dropped = 0;

    for pair in pairs {
        if pair.shapes_match() {
            kept.push(pair);
            continue;
        }
        match policy {
            ShapeMismatchPolicy::Keep => kept.push(pair),
            ShapeMismatchPolicy::Skip => {
                warn!(
                    "Shape mismatch for {} in class {label}: image {} vs mask {}",
                    pair.stem,
                    pair.image_shape(),
                    pair.mask_shape()
                );
                dropped += 1;
            }
            ShapeMismatchPolicy::Fail => {
                return Err(Error::Dataset(format!(
                    "Shape mismatch for {} in class {}: image {} vs mask {}",
                    pair.stem,
                    label,
                    pair.image_shape(),
                    pair.mask_shape()
                )));
            }
        }
    }

    Ok((kept, dropped))
}
