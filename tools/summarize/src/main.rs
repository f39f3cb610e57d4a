//! Dataset summary tool.
//!
//! Scans the class folders of a BUSI-style dataset, pairs source images
//! with their segmentation masks by filename convention, and reports
//! per-class pair counts and sample shapes. Optionally renders the first
//! pair of one class side by side and exports the summary as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use busi_core::cli::{load_toml_config, setup_cli_logging};
use busi_core::{ClassLabel, DatasetConfig, ShapeMismatchPolicy};
use busi_dataset::{build_dataset, Dataset, LoadSummary, PairRenderer, SideBySidePng};

/// BUSI dataset summary tool
#[derive(Parser, Debug)]
#[command(
    name = "summarize",
    about = "Summarize a BUSI-style image/mask dataset",
    long_about = "Scans one folder per class label, pairs every source image with its \
                  segmentation mask by filename convention, and reports per-class pair \
                  counts and sample shapes. Unreadable files are skipped with a warning."
)]
struct Args {
    /// Path to dataset configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the dataset root directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override the class labels (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "LABEL")]
    labels: Vec<String>,

    /// What to do with pairs whose image and mask shapes disagree
    #[arg(long, value_name = "keep|skip|fail")]
    shape_mismatch: Option<String>,

    /// Keep raw directory order instead of sorting candidates
    #[arg(long)]
    no_sort: bool,

    /// Render the first pair of the preview label side by side
    #[arg(short, long)]
    preview: bool,

    /// Where to write the preview image
    #[arg(long, value_name = "FILE", default_value = "preview.png")]
    preview_out: PathBuf,

    /// Override the label used for the preview
    #[arg(long, value_name = "LABEL")]
    preview_label: Option<String>,

    /// Export the summary as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_cli_logging(args.verbose)?;

    info!("BUSI Dataset Summary Tool");
    info!("=========================");

    let config = resolve_config(&args)?;
    info!("Data dir: {}", config.data_dir.display());
    info!(
        "Labels: {}",
        config
            .labels
            .iter()
            .map(|label| label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let dataset = build_dataset(&config).context("Failed to build dataset")?;
    let summary = dataset.summarize();

    print_summary(&summary);

    if let Some(output) = &args.output {
        let json = summary.to_json()?;
        fs::write(output, json)
            .with_context(|| format!("Failed to write summary to {}", output.display()))?;
        info!("Summary exported to: {}", output.display());
    }

    if args.preview {
        render_preview(&config, &dataset, &args.preview_out)?;
    }

    Ok(())
}

/// Loads the TOML config when given, then applies command-line overrides
fn resolve_config(args: &Args) -> Result<DatasetConfig> {
    let mut config = match &args.config {
        Some(path) => load_toml_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => DatasetConfig::default(),
    };

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if !args.labels.is_empty() {
        config.labels = args
            .labels
            .iter()
            .map(|label| ClassLabel::from(label.as_str()))
            .collect();
        // A preview label that fell out of the new label set is stale
        if let Some(preview) = &config.preview_label {
            if !config.labels.contains(preview) {
                config.preview_label = None;
            }
        }
    }
    if let Some(policy) = &args.shape_mismatch {
        config.shape_mismatch = parse_policy(policy)?;
    }
    if args.no_sort {
        config.sort_entries = false;
    }
    if let Some(label) = &args.preview_label {
        config.preview_label = Some(ClassLabel::from(label.as_str()));
    }

    config
        .validate()
        .context("Invalid dataset configuration")?;

    Ok(config)
}

/// Parses a `--shape-mismatch` value
fn parse_policy(name: &str) -> Result<ShapeMismatchPolicy> {
    match name.to_lowercase().as_str() {
        "keep" => Ok(ShapeMismatchPolicy::Keep),
        "skip" => Ok(ShapeMismatchPolicy::Skip),
        "fail" => Ok(ShapeMismatchPolicy::Fail),
        _ => anyhow::bail!("Unknown shape mismatch policy: {name}. Use 'keep', 'skip' or 'fail'"),
    }
}

/// Prints the human-readable summary block
fn print_summary(summary: &LoadSummary) {
    println!();
    println!("Dataset Summary");
    println!("---------------");

    for class in &summary.classes {
        if class.pairs == 0 {
            if class.skipped > 0 {
                println!(
                    "Class: {} - No images loaded ({} skipped).",
                    class.label, class.skipped
                );
            } else {
                println!("Class: {} - No images found.", class.label);
            }
            continue;
        }

        println!("Class: {}", class.label);
        println!("  Number of samples: {}", class.pairs);
        if let Some(shape) = class.image_shape {
            println!("  Sample image shape: {shape}");
        }
        if let Some(shape) = class.mask_shape {
            println!("  Sample mask shape:  {shape}");
        }
        if class.skipped > 0 {
            println!("  Skipped: {}", class.skipped);
        }
    }

    println!("---------------");
    println!("Total images loaded: {}", summary.total_pairs);
    if summary.total_skipped > 0 {
        println!("Total skipped: {}", summary.total_skipped);
    }
    println!();
}

/// Renders the first pair of the configured preview label, when present
fn render_preview(config: &DatasetConfig, dataset: &Dataset, output: &Path) -> Result<()> {
    let label = match &config.preview_label {
        Some(label) => label,
        None => {
            warn!("No preview label configured, skipping preview");
            return Ok(());
        }
    };

    match dataset.first_pair(label) {
        Some(pair) => {
            let renderer = SideBySidePng::new(output);
            renderer
                .render(label, pair)
                .context("Failed to render preview")?;
        }
        None => warn!("No pairs loaded for preview label '{label}', skipping preview"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            config: None,
            data_dir: None,
            labels: vec![],
            shape_mismatch: None,
            no_sort: false,
            preview: false,
            preview_out: PathBuf::from("preview.png"),
            preview_label: None,
            output: None,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy("keep").unwrap(), ShapeMismatchPolicy::Keep);
        assert_eq!(parse_policy("SKIP").unwrap(), ShapeMismatchPolicy::Skip);
        assert_eq!(parse_policy("fail").unwrap(), ShapeMismatchPolicy::Fail);
        assert!(parse_policy("explode").is_err());
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&default_args()).unwrap();
        assert_eq!(config.labels.len(), 3);
        assert!(config.sort_entries);
        assert_eq!(config.shape_mismatch, ShapeMismatchPolicy::Keep);
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let mut args = default_args();
        args.data_dir = Some(PathBuf::from("/data/busi"));
        args.labels = vec!["benign".to_string(), "normal".to_string()];
        args.shape_mismatch = Some("skip".to_string());
        args.no_sort = true;

        let config = resolve_config(&args).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data/busi"));
        assert_eq!(config.labels.len(), 2);
        assert_eq!(config.shape_mismatch, ShapeMismatchPolicy::Skip);
        assert!(!config.sort_entries);
    }

    #[test]
    fn test_label_override_clears_stale_preview() {
        let mut args = default_args();
        args.labels = vec!["malignant".to_string(), "normal".to_string()];

        let config = resolve_config(&args).unwrap();
        assert!(config.preview_label.is_none());
    }

    #[test]
    fn test_explicit_unknown_preview_label_rejected() {
        let mut args = default_args();
        args.preview_label = Some("cyst".to_string());

        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_resolve_config_preview_label_override() {
        let mut args = default_args();
        args.labels = vec!["malignant".to_string(), "normal".to_string()];
        args.preview_label = Some("normal".to_string());

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.preview_label, Some(ClassLabel::from("normal")));
    }

    #[test]
    fn test_args_parse_from_command_line() {
        let args = Args::parse_from([
            "summarize",
            "--data-dir",
            "/data/busi",
            "--labels",
            "benign,normal",
            "--shape-mismatch",
            "fail",
            "--no-sort",
        ]);

        assert_eq!(args.data_dir, Some(PathBuf::from("/data/busi")));
        assert_eq!(args.labels, vec!["benign", "normal"]);
        assert_eq!(args.shape_mismatch, Some("fail".to_string()));
        assert!(args.no_sort);
    }
}
