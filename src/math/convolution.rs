//! Separable correlation with reflect-101 borders
//!
//! Every smoothing step in the pipeline (Gaussian, box and Sobel filters) is a
//! separable kernel applied first along rows, then along columns. Borders mirror
//! the field without repeating the edge sample (`dcb|abcd|cba`), so a constant
//! field stays exactly constant after filtering.

use ndarray::{Array2, Axis};

/// Map an out-of-range index into `0..len` by mirroring without edge repetition
///
/// Works for offsets larger than the lane itself, which happens when a wide
/// kernel runs over a small image.
pub const fn reflect_101(index: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped < len as isize {
        wrapped as usize
    } else {
        (period - wrapped) as usize
    }
}

/// Standard deviation implied by a Gaussian kernel size
pub fn gaussian_sigma(size: usize) -> f64 {
    0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian kernel of the given odd size
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0];
    }

    let sigma = gaussian_sigma(size);
    let radius = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - radius;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();

    weights.iter().map(|w| (w / total) as f32).collect()
}

/// Flat kernel, either averaging (`normalized`) or summing
pub fn box_kernel(size: usize, normalized: bool) -> Vec<f32> {
    let weight = if normalized { 1.0 / size as f32 } else { 1.0 };
    vec![weight; size]
}

/// Derivative and smoothing halves of a Sobel operator
///
/// Returns `None` for apertures other than 3 and 5.
pub fn sobel_kernels(aperture: usize) -> Option<(Vec<f32>, Vec<f32>)> {
    match aperture {
        3 => Some((vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0])),
        5 => Some((
            vec![-1.0, -2.0, 0.0, 2.0, 1.0],
            vec![1.0, 4.0, 6.0, 4.0, 1.0],
        )),
        _ => None,
    }
}

/// Correlate every lane along `axis` with `kernel`
///
/// The kernel is centred at `len / 2`, so even-length kernels cover one more
/// sample before the centre than after it.
pub fn correlate_axis(field: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    if kernel.is_empty() {
        return field.clone();
    }

    let radius = kernel.len() / 2;
    let mut output = Array2::zeros(field.raw_dim());
    let mut padded: Vec<f32> = Vec::new();

    for (lane_in, mut lane_out) in field.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let len = lane_in.len();
        padded.clear();
        padded.extend((0..len + kernel.len() - 1).map(|i| {
            let source = reflect_101(i as isize - radius as isize, len);
            lane_in.get(source).copied().unwrap_or(0.0)
        }));

        for (position, out) in lane_out.iter_mut().enumerate() {
            *out = padded
                .get(position..position + kernel.len())
                .map_or(0.0, |window| {
                    window
                        .iter()
                        .zip(kernel)
                        .map(|(value, weight)| value * weight)
                        .sum::<f32>()
                });
        }
    }

    output
}

/// Apply `row_kernel` along each row, then `col_kernel` along each column
pub fn correlate_separable(
    field: &Array2<f32>,
    row_kernel: &[f32],
    col_kernel: &[f32],
) -> Array2<f32> {
    let horizontal = correlate_axis(field, row_kernel, Axis(1));
    correlate_axis(&horizontal, col_kernel, Axis(0))
}

/// Gaussian smoothing with a square kernel of odd `size`
pub fn gaussian_blur(field: &Array2<f32>, size: usize) -> Array2<f32> {
    let kernel = gaussian_kernel(size);
    correlate_separable(field, &kernel, &kernel)
}

/// Mean over a `size`×`size` window
pub fn box_blur(field: &Array2<f32>, size: usize) -> Array2<f32> {
    let kernel = box_kernel(size, true);
    correlate_separable(field, &kernel, &kernel)
}

/// Sum over a `size`×`size` window
pub fn box_sum(field: &Array2<f32>, size: usize) -> Array2<f32> {
    let kernel = box_kernel(size, false);
    correlate_separable(field, &kernel, &kernel)
}

/// Horizontal and vertical Sobel derivatives
///
/// Returns `None` for unsupported apertures.
pub fn sobel(field: &Array2<f32>, aperture: usize) -> Option<(Array2<f32>, Array2<f32>)> {
    let (derivative, smoothing) = sobel_kernels(aperture)?;
    let dx = correlate_separable(field, &derivative, &smoothing);
    let dy = correlate_separable(field, &smoothing, &derivative);
    Some((dx, dy))
}
