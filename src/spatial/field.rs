//! Scalar field aliases and small helpers shared by the metrics

use ndarray::Array2;

/// Single-channel floating point grid indexed as (row, col)
pub type ScalarField = Array2<f32>;

/// 8-bit grayscale grid indexed as (row, col)
pub type GrayField = Array2<u8>;

/// Scale 8-bit intensities into [0, 1]
pub fn unit_from_gray(gray: &GrayField) -> ScalarField {
    gray.mapv(|level| f32::from(level) / 255.0)
}

/// Raw 8-bit intensities as floats in [0, 255]
pub fn float_from_gray(gray: &GrayField) -> ScalarField {
    gray.mapv(f32::from)
}

/// True when every value is finite and inside `[low, high]`
pub fn all_within(field: &ScalarField, low: f32, high: f32) -> bool {
    field
        .iter()
        .all(|&value| value.is_finite() && value >= low && value <= high)
}

/// Position (row, col) and value of the largest entry
///
/// Ties resolve to the first position in row-major order. Returns `None` for an
/// empty field.
pub fn peak(field: &ScalarField) -> Option<((usize, usize), f32)> {
    field
        .indexed_iter()
        .fold(None, |best: Option<((usize, usize), f32)>, (position, &value)| {
            match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((position, value)),
            }
        })
}

/// Arithmetic mean of all entries, 0.0 for an empty field
pub fn mean(field: &ScalarField) -> f32 {
    field.mean().unwrap_or(0.0)
}
