//! Intersection density from Harris corner responses
//!
//! The corner threshold is relative to each image's strongest response, so two
//! images of very different contrast are not judged on the same absolute scale.

use crate::io::configuration::JunctionConfig;
use crate::math::convolution::{box_sum, gaussian_blur, sobel};
use crate::math::normalize::{normalize_in_place, value_range};
use crate::metrics::{MetricField, MetricKind};
use crate::spatial::field::float_from_gray;
use crate::spatial::{GrayField, Mask, ScalarField};
use ndarray::Zip;
use tracing::debug;

/// Harris corner response `det(M) - k * trace(M)^2`
///
/// `M` is the structure tensor of Sobel derivatives summed over a
/// `block_size`×`block_size` window. Derivatives are scaled by
/// `1 / (2^(aperture-1) * block_size * 255)` so responses stay small. Returns
/// `None` for an unsupported aperture.
pub fn harris_response(
    gray: &GrayField,
    block_size: usize,
    aperture: usize,
    sensitivity: f32,
) -> Option<ScalarField> {
    let intensities = float_from_gray(gray);
    let (mut dx, mut dy) = sobel(&intensities, aperture)?;

    let scale = 1.0 / ((1_usize << (aperture - 1)) * block_size * 255) as f32;
    dx.mapv_inplace(|value| value * scale);
    dy.mapv_inplace(|value| value * scale);

    let xx = box_sum(&(&dx * &dx), block_size);
    let xy = box_sum(&(&dx * &dy), block_size);
    let yy = box_sum(&(&dy * &dy), block_size);

    let mut response = ScalarField::zeros(gray.dim());
    Zip::from(&mut response)
        .and(&xx)
        .and(&xy)
        .and(&yy)
        .for_each(|r, &a, &b, &c| {
            let trace = a + c;
            *r = a.mul_add(c, -(b * b)) - sensitivity * trace * trace;
        });

    Some(response)
}

/// Pixels whose response exceeds `fraction` of the image maximum
///
/// A non-positive maximum (flat or edge-free image) yields an empty mask.
pub fn corner_mask(response: &ScalarField, fraction: f32) -> Mask {
    let (rows, cols) = response.dim();
    let Some((_, max)) = value_range(response).filter(|&(_, max)| max > 0.0) else {
        return Mask::new(rows, cols);
    };

    let threshold = fraction * max;
    Mask::from_fn(rows, cols, |row, col| {
        response.get((row, col)).is_some_and(|&value| value > threshold)
    })
}

/// Blurred and normalized corner density field
///
/// Zero detected corners give an all-zero field marked degenerate.
pub fn junction_field(gray: &GrayField, config: &JunctionConfig) -> MetricField {
    let Some(response) = harris_response(
        gray,
        config.block_size,
        config.aperture,
        config.sensitivity,
    ) else {
        debug!("junction: unsupported Sobel aperture {}", config.aperture);
        return MetricField::zeros(MetricKind::Junction, gray.dim());
    };

    let corners = corner_mask(&response, config.response_fraction);
    if corners.is_empty() {
        debug!("junction: no corners detected");
        return MetricField::zeros(MetricKind::Junction, gray.dim());
    }
    debug!("junction: {} corner pixels", corners.count());

    let mut density = gaussian_blur(&corners.to_field(), config.blur_size);
    let outcome = normalize_in_place(&mut density, 0.0, 1.0);

    MetricField::new(MetricKind::Junction, density, outcome.is_degenerate())
}
