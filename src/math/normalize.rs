//! Min-max normalization with a defined result for flat fields

use ndarray::Array2;
use num_traits::Float;

/// Outcome of a normalization pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// The field had a usable range and now spans the target interval
    Scaled,
    /// The field was flat (or empty) and has been filled with the lower bound
    Degenerate,
}

impl Normalization {
    /// True when the input had no dynamic range
    pub const fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

/// Smallest and largest finite values of a field
///
/// Returns `None` for an empty field or one without finite values.
pub fn value_range<T: Float>(field: &Array2<T>) -> Option<(T, T)> {
    let (min, max) = field
        .iter()
        .filter(|value| value.is_finite())
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &value| {
            (lo.min(value), hi.max(value))
        });
    (min <= max).then_some((min, max))
}

/// Rescale a field in place so its values span `[low, high]`
///
/// A field whose range is zero, or lost in rounding noise relative to its
/// magnitude, is degenerate: every value becomes `low` and no division happens.
/// Non-finite values also map to `low`.
pub fn normalize_in_place<T: Float>(field: &mut Array2<T>, low: T, high: T) -> Normalization {
    let Some((min, max)) = value_range(field) else {
        field.fill(low);
        return Normalization::Degenerate;
    };

    let range = max - min;
    let magnitude = min.abs().max(max.abs());
    let noise_floor = magnitude * T::epsilon() * (T::one() + T::one() + T::one() + T::one());
    if range <= noise_floor {
        field.fill(low);
        return Normalization::Degenerate;
    }

    let scale = (high - low) / range;
    field.mapv_inplace(|value| {
        if value.is_finite() {
            ((value - min) * scale + low).max(low).min(high)
        } else {
            low
        }
    });
    Normalization::Scaled
}

/// Normalized copy of a field, see [`normalize_in_place`]
pub fn normalized<T: Float>(field: &Array2<T>, low: T, high: T) -> (Array2<T>, Normalization) {
    let mut copy = field.clone();
    let outcome = normalize_in_place(&mut copy, low, high);
    (copy, outcome)
}
