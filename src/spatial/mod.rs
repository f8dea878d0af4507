//! Spatial data structures
//!
//! This module contains:
//! - Scalar and grayscale field aliases with small helpers
//! - Bit-packed binary masks with thresholding and erosion

/// Scalar field aliases and helpers
pub mod field;
/// Bit-packed binary masks
pub mod mask;

pub use field::{GrayField, ScalarField};
pub use mask::Mask;
