//! Core types and utilities shared by the BUSI dataset tools.
//!
//! This crate holds the error type, the dataset configuration and the small
//! value types the rest of the workspace builds on.

pub mod cli;
pub mod config;
pub mod error;
pub mod types;

pub use config::DatasetConfig;
pub use error::{Error, Result};
pub use types::{ClassLabel, ImageShape, ShapeMismatchPolicy};
