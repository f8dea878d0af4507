//! Weighted fusion of the metric fields into one score field

use crate::io::configuration::Weights;
use crate::io::error::{Result, ensure_dimensions};
use crate::math::convolution::gaussian_blur;
use crate::math::normalize::{Normalization, normalize_in_place};
use crate::metrics::MetricField;
use crate::spatial::ScalarField;
use ndarray::Zip;

/// Upper end of the score range
pub const SCORE_MAX: f32 = 255.0;

/// Fused land value score
#[derive(Clone, Debug)]
pub struct FusedScore {
    /// Score per pixel in [0, 255]
    pub values: ScalarField,
    /// Outcome of the final normalization
    pub normalization: Normalization,
}

/// Weighted sum of the three metric fields, without smoothing
///
/// # Errors
///
/// Returns `DimensionMismatch` if any field differs from `expected`
pub fn weighted_sum(
    expected: (usize, usize),
    arterial: &MetricField,
    junction: &MetricField,
    zoning: &MetricField,
    weights: &Weights,
) -> Result<ScalarField> {
    for field in [arterial, junction, zoning] {
        ensure_dimensions("fusion", expected, field.dim())?;
    }

    let mut combined = ScalarField::zeros(expected);
    Zip::from(&mut combined)
        .and(&arterial.values)
        .and(&junction.values)
        .and(&zoning.values)
        .for_each(|out, &a, &j, &z| {
            *out = weights.arterial * a + weights.junction * j + weights.zoning * z;
        });
    Ok(combined)
}

/// Fuse, smooth with a `blur_size` Gaussian and rescale to [0, 255]
///
/// The single post-fusion blur evens out seams left by the different
/// per-metric smoothing radii. A flat result becomes all zeros.
///
/// # Errors
///
/// Returns `DimensionMismatch` if any field differs from `expected`
pub fn fuse(
    expected: (usize, usize),
    arterial: &MetricField,
    junction: &MetricField,
    zoning: &MetricField,
    weights: &Weights,
    blur_size: usize,
) -> Result<FusedScore> {
    let combined = weighted_sum(expected, arterial, junction, zoning, weights)?;
    let mut values = gaussian_blur(&combined, blur_size);
    let normalization = normalize_in_place(&mut values, 0.0, SCORE_MAX);
    Ok(FusedScore {
        values,
        normalization,
    })
}
