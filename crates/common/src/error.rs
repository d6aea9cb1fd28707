//! Error types shared across Bannerkit crates.

use std::path::PathBuf;

/// Top-level error type for Bannerkit operations.
#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    /// The file could not be read before decoding started.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The bytes are not an image the decoder understands.
    #[error("Failed to decode image: {message}")]
    Decode { message: String },

    #[error("Failed to encode image: {message}")]
    Encode { message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Font unavailable: {path}")]
    FontUnavailable { path: PathBuf },

    #[error("Nothing to export: no image has been loaded")]
    NothingToExport,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BannerError.
pub type BannerResult<T> = Result<T, BannerError>;

impl BannerError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error came from acquiring an input image.
    ///
    /// Acquisition failures are reported to the user and leave the
    /// current session untouched.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = BannerError::read(
            "/missing/photo.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/missing/photo.png"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_acquisition_failure_classification() {
        assert!(BannerError::decode("bad header").is_acquisition_failure());
        assert!(BannerError::read(
            "x.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
        )
        .is_acquisition_failure());
        assert!(!BannerError::encode("boom").is_acquisition_failure());
        assert!(!BannerError::NothingToExport.is_acquisition_failure());
    }
}
