//! Error types for pipeline construction, execution and the I/O adapters

use std::fmt;
use std::path::PathBuf;

/// Main error type for all land value operations
#[derive(Debug)]
pub enum LandValueError {
    /// Input bytes could not be decoded as an image
    ImageDecode {
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Decoded image is too small to analyze
    DegenerateImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Two buffers in the same pipeline run disagree on their dimensions
    DimensionMismatch {
        /// Pipeline stage that detected the mismatch
        stage: &'static str,
        /// Expected dimensions (rows, cols)
        expected: (usize, usize),
        /// Dimensions actually received (rows, cols)
        found: (usize, usize),
    },

    /// Pipeline configuration failed validation
    InvalidConfiguration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode the overlay image
    ImageEncode {
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for LandValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode { source } => write!(f, "Failed to decode image: {source}"),
            Self::DegenerateImage { width, height } => {
                write!(f, "Image of size {width}x{height} is too small to analyze")
            }
            Self::DimensionMismatch {
                stage,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {stage}: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::ImageEncode { source } => write!(f, "Failed to encode image: {source}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LandValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source } | Self::ImageEncode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for land value results
pub type Result<T> = std::result::Result<T, LandValueError>;

impl From<image::ImageError> for LandValueError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode { source: err }
    }
}

impl From<std::io::Error> for LandValueError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LandValueError {
    LandValueError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error for the given stage
pub const fn dimension_mismatch(
    stage: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> LandValueError {
    LandValueError::DimensionMismatch {
        stage,
        expected,
        found,
    }
}

/// Fail with a dimension mismatch unless both shapes agree
///
/// # Errors
///
/// Returns `DimensionMismatch` when `found` differs from `expected`
pub fn ensure_dimensions(
    stage: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(dimension_mismatch(stage, expected, found))
    }
}
