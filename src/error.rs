use std::fmt::Display;
use thiserror::Error;

/// Errors raised by the cleanup engine
///
/// Every variant is detected at call entry, before any pixel is written.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Raster is not 8-bit RGBA (missing alpha, wrong channel count or sample type)
    #[error("Invalid raster format: {0}")]
    InvalidFormat(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Segmentation failed: {0}")]
    Segmentation(#[source] anyhow::Error),
}

impl CleanupError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn dimension_mismatch(
        context: &'static str,
        expected: impl Display,
        actual: impl Display,
    ) -> Self {
        Self::DimensionMismatch {
            context,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanupError>;
