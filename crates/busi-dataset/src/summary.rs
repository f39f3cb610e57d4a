//! Summary statistics over a loaded dataset.
//!
//! The summary is a plain value computed after loading finishes; it holds
//! counts and shapes only, never pixel data, so it can be serialized and
//! compared cheaply.

use serde::{Deserialize, Serialize};

use busi_core::{ClassLabel, ImageShape, Result};

use crate::dataset::Dataset;

/// Per-class slice of a [`LoadSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Class label
    pub label: ClassLabel,
    /// Number of pairs loaded
    pub pairs: usize,
    /// Candidates skipped while loading
    pub skipped: usize,
    /// Shape of the first pair's image, when at least one pair loaded
    pub image_shape: Option<ImageShape>,
    /// Shape of the first pair's mask, when at least one pair loaded
    pub mask_shape: Option<ImageShape>,
}

/// Read-only statistics computed over a fully built [`Dataset`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// One entry per configured class, in configured order
    pub classes: Vec<ClassSummary>,
    /// Total pairs across all classes
    pub total_pairs: usize,
    /// Total skipped candidates across all classes
    pub total_skipped: usize,
}

impl LoadSummary {
    /// Computes the summary for a dataset. Pure; performs no I/O.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let classes: Vec<ClassSummary> = dataset
            .classes()
            .iter()
            .map(|class| {
                let first = class.pairs.first();
                ClassSummary {
                    label: class.label.clone(),
                    pairs: class.pairs.len(),
                    skipped: class.skipped,
                    image_shape: first.map(|pair| pair.image_shape()),
                    mask_shape: first.map(|pair| pair.mask_shape()),
                }
            })
            .collect();

        let total_pairs = classes.iter().map(|class| class.pairs).sum();
        let total_skipped = classes.iter().map(|class| class.skipped).sum();

        Self {
            classes,
            total_pairs,
            total_skipped,
        }
    }

    /// Summary entry for the given label, if it was configured
    pub fn class(&self, label: &ClassLabel) -> Option<&ClassSummary> {
        self.classes.iter().find(|class| &class.label == label)
    }

    /// Serializes the summary as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ClassPairs;
    use crate::loader::ImagePair;
    use image::{ImageBuffer, Luma};

    fn pair(stem: &str, iw: u32, ih: u32, mw: u32, mh: u32) -> ImagePair {
        ImagePair {
            stem: stem.to_string(),
            image: ImageBuffer::from_pixel(iw, ih, Luma([0u8])),
            mask: ImageBuffer::from_pixel(mw, mh, Luma([0u8])),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            ClassPairs {
                label: ClassLabel::from("benign"),
                pairs: vec![pair("benign (1)", 4, 4, 4, 4), pair("benign (2)", 6, 4, 6, 4)],
                skipped: 1,
            },
            ClassPairs {
                label: ClassLabel::from("malignant"),
                pairs: vec![pair("malignant (1)", 8, 2, 8, 3)],
                skipped: 0,
            },
            ClassPairs {
                label: ClassLabel::from("normal"),
                pairs: vec![],
                skipped: 0,
            },
        ])
    }

    #[test]
    fn test_totals_sum_across_classes() {
        let summary = sample_dataset().summarize();

        assert_eq!(summary.classes.len(), 3);
        assert_eq!(summary.total_pairs, 3);
        assert_eq!(summary.total_skipped, 1);
    }

    #[test]
    fn test_first_pair_shapes_reported() {
        let summary = sample_dataset().summarize();

        let benign = summary.class(&ClassLabel::from("benign")).unwrap();
        assert_eq!(benign.pairs, 2);
        assert_eq!(benign.image_shape, Some(ImageShape::new(4, 4)));

        // Mask shape comes from the same first pair, even when it differs
        let malignant = summary.class(&ClassLabel::from("malignant")).unwrap();
        assert_eq!(malignant.image_shape, Some(ImageShape::new(8, 2)));
        assert_eq!(malignant.mask_shape, Some(ImageShape::new(8, 3)));
    }

    #[test]
    fn test_empty_class_has_no_shapes() {
        let summary = sample_dataset().summarize();

        let normal = summary.class(&ClassLabel::from("normal")).unwrap();
        assert_eq!(normal.pairs, 0);
        assert!(normal.image_shape.is_none());
        assert!(normal.mask_shape.is_none());
    }

    #[test]
    fn test_class_order_preserved() {
        let summary = sample_dataset().summarize();

        let order: Vec<&str> = summary
            .classes
            .iter()
            .map(|class| class.label.as_str())
            .collect();
        assert_eq!(order, vec!["benign", "malignant", "normal"]);
    }

    #[test]
    fn test_unknown_label_lookup() {
        let summary = sample_dataset().summarize();
        assert!(summary.class(&ClassLabel::from("cyst")).is_none());
    }

    #[test]
    fn test_json_export_roundtrip() {
        let summary = sample_dataset().summarize();

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"total_pairs\": 3"));
        assert!(json.contains("\"benign\""));

        let back: LoadSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
