//! Shared helpers for workspace command-line tools

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Initializes tracing for a workspace binary.
///
/// `verbose` lowers the default level to `debug`; directives in `RUST_LOG`
/// still take precedence over the default.
pub fn setup_cli_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logger: {e}")))?;

    Ok(())
}

/// Reads and parses a TOML configuration file
pub fn load_toml_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("busi.toml");
        fs::write(
            &path,
            r#"
data_dir = "/data/busi"
labels = ["benign", "normal"]
image_extension = ".png"
mask_suffix = "_mask"
sort_entries = false
shape_mismatch = "skip"
"#,
        )
        .unwrap();

        let config: DatasetConfig = load_toml_config(&path).unwrap();
        assert_eq!(config.labels.len(), 2);
        assert!(!config.sort_entries);
        assert!(config.preview_label.is_none());
    }

    #[test]
    fn test_load_toml_config_missing_file() {
        let result: Result<DatasetConfig> = load_toml_config(Path::new("/no/such/config.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_sample_config_parses() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../configs/busi.toml"
        ));
        let config: DatasetConfig = load_toml_config(path).unwrap();
        assert!(config.validate().is_ok());
    }
}
