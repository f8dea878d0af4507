//! Texture heterogeneity from local standard deviation

use crate::io::configuration::ZoningConfig;
use crate::math::convolution::{box_blur, gaussian_blur};
use crate::math::normalize::normalize_in_place;
use crate::metrics::{MetricField, MetricKind};
use crate::spatial::ScalarField;
use ndarray::Zip;
use tracing::debug;

/// Standard deviation of `gray_unit` over a `window`×`window` box
///
/// Computed as `sqrt(E[x^2] - E[x]^2)` with the variance clamped at zero,
/// since rounding can push it slightly negative on flat regions.
pub fn local_standard_deviation(gray_unit: &ScalarField, window: usize) -> ScalarField {
    let mean = box_blur(gray_unit, window);
    let mean_of_squares = box_blur(&gray_unit.mapv(|value| value * value), window);

    let mut deviation = ScalarField::zeros(gray_unit.dim());
    Zip::from(&mut deviation)
        .and(&mean)
        .and(&mean_of_squares)
        .for_each(|out, &mu, &mu2| {
            *out = mu.mul_add(-mu, mu2).max(0.0).sqrt();
        });
    deviation
}

/// Normalized and smoothed local texture field
///
/// A texture-free image gives an all-zero field marked degenerate.
pub fn zoning_field(gray_unit: &ScalarField, config: &ZoningConfig) -> MetricField {
    let mut deviation = local_standard_deviation(gray_unit, config.window_size);
    if normalize_in_place(&mut deviation, 0.0, 1.0).is_degenerate() {
        debug!("zoning: no local texture variation");
        return MetricField::zeros(MetricKind::Zoning, gray_unit.dim());
    }

    let mut smoothed = gaussian_blur(&deviation, config.blur_size);
    smoothed.mapv_inplace(|value| value.clamp(0.0, 1.0));

    MetricField::new(MetricKind::Zoning, smoothed, false)
}
