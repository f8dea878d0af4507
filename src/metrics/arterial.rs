//! Road proximity from dark linework
//!
//! Dark strokes are thresholded into road candidates, thinned by erosion so
//! that text and hairlines drop out, and turned into a distance-to-road field.
//! The inverted distance is blurred heavily so values fall off smoothly instead
//! of forming rings around each road.

use crate::io::configuration::ArterialConfig;
use crate::math::convolution::gaussian_blur;
use crate::math::distance::euclidean_distance_transform;
use crate::math::normalize::normalize_in_place;
use crate::metrics::{MetricField, MetricKind};
use crate::spatial::{GrayField, Mask};
use tracing::debug;

/// Eroded road candidate mask
pub fn road_mask(gray: &GrayField, config: &ArterialConfig) -> Mask {
    Mask::at_or_below(gray, config.threshold).eroded(config.erosion_size, config.erosion_iterations)
}

/// Normalized, inverted and smoothed distance-to-road field
///
/// Without any road pixels the field is all zeros and marked degenerate.
pub fn arterial_field(gray: &GrayField, config: &ArterialConfig) -> MetricField {
    let roads = road_mask(gray, config);

    let Some(mut proximity) = euclidean_distance_transform(&roads) else {
        debug!("arterial: no road pixels below threshold {}", config.threshold);
        return MetricField::zeros(MetricKind::Arterial, gray.dim());
    };

    // An all-road image has zero range here; it stays zero and inverts to one.
    normalize_in_place(&mut proximity, 0.0, 1.0);
    proximity.mapv_inplace(|distance| 1.0 - distance);

    let mut smoothed = gaussian_blur(&proximity, config.blur_size);
    let outcome = normalize_in_place(&mut smoothed, 0.0, 1.0);
    if outcome.is_degenerate() {
        debug!("arterial: smoothed field is flat ({} road pixels)", roads.count());
    }

    MetricField::new(MetricKind::Arterial, smoothed, outcome.is_degenerate())
}
