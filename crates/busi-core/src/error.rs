//! Error types for the BUSI dataset tools

use thiserror::Error;

/// Main error type for the BUSI dataset tools
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A class folder is missing from the dataset root
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// A path that should name a directory names something else
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Dataset assembly error
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for BUSI dataset operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DirectoryNotFound("data/benign".to_string());
        assert_eq!(err.to_string(), "Directory not found: data/benign");

        let err = Error::Config("labels must not be empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: labels must not be empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_image_error_conversion() {
        let img_err = image::ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::GenericFeature("test".to_string()),
            ),
        );
        let err: Error = img_err.into();
        assert!(matches!(err, Error::Image(_)));
    }
}
