//! Exact Euclidean distance transform
//!
//! Two separable passes: a linear scan per column gives the vertical distance
//! to the nearest feature, then a lower envelope of parabolas per row combines
//! those into exact Euclidean distances (Felzenszwalb & Huttenlocher).

use crate::spatial::mask::Mask;
use ndarray::{Array2, Axis};

/// Distance from every cell to the nearest set cell of `features`
///
/// Set cells have distance 0. Returns `None` when the mask has no set cells,
/// since no finite distance exists anywhere.
pub fn euclidean_distance_transform(features: &Mask) -> Option<Array2<f32>> {
    if features.is_empty() {
        return None;
    }

    let vertical = vertical_distances(features);
    let mut output = Array2::zeros(vertical.raw_dim());
    let mut sites: Vec<(f64, f64)> = Vec::new();
    let mut squared: Vec<f64> = Vec::new();

    for (row_in, mut row_out) in vertical
        .lanes(Axis(1))
        .into_iter()
        .zip(output.lanes_mut(Axis(1)))
    {
        sites.clear();
        sites.extend(
            row_in
                .iter()
                .enumerate()
                .filter(|(_, height)| height.is_finite())
                .map(|(col, &height)| (col as f64, height * height)),
        );

        squared.clear();
        squared.resize(row_in.len(), f64::INFINITY);
        lower_envelope(&sites, &mut squared);

        for (out, &distance_sq) in row_out.iter_mut().zip(&squared) {
            *out = distance_sq.sqrt() as f32;
        }
    }

    Some(output)
}

// Per column: distance to the closest set cell above or below, infinite if none
fn vertical_distances(features: &Mask) -> Array2<f64> {
    let mut vertical = Array2::from_elem((features.rows(), features.cols()), f64::INFINITY);

    for (col, mut lane) in vertical.lanes_mut(Axis(0)).into_iter().enumerate() {
        let mut last_seen: Option<usize> = None;
        for (row, cell) in lane.iter_mut().enumerate() {
            if features.contains(row, col) {
                last_seen = Some(row);
            }
            if let Some(seen) = last_seen {
                *cell = (row - seen) as f64;
            }
        }

        let mut next_seen: Option<usize> = None;
        for (row, cell) in lane.iter_mut().enumerate().rev() {
            if features.contains(row, col) {
                next_seen = Some(row);
            }
            if let Some(seen) = next_seen {
                *cell = cell.min((seen - row) as f64);
            }
        }
    }

    vertical
}

// Minimum over sites of (x - position)^2 + height_sq, evaluated at every x
fn lower_envelope(sites: &[(f64, f64)], output: &mut [f64]) {
    let mut hull: Vec<(f64, f64)> = Vec::with_capacity(sites.len());
    let mut starts: Vec<f64> = Vec::with_capacity(sites.len());

    for &(position, height_sq) in sites {
        let mut start = f64::NEG_INFINITY;
        while let Some(&(previous, previous_sq)) = hull.last() {
            let crossing = ((height_sq + position * position)
                - (previous_sq + previous * previous))
                / (2.0 * (position - previous));
            if starts.last().is_some_and(|&boundary| crossing <= boundary) {
                hull.pop();
                starts.pop();
            } else {
                start = crossing;
                break;
            }
        }
        hull.push((position, height_sq));
        starts.push(start);
    }

    let mut segment = 0;
    for (x, out) in output.iter_mut().enumerate() {
        let x = x as f64;
        while starts.get(segment + 1).is_some_and(|&boundary| boundary < x) {
            segment += 1;
        }
        if let Some(&(position, height_sq)) = hull.get(segment) {
            let offset = x - position;
            *out = offset.mul_add(offset, height_sq);
        }
    }
}
