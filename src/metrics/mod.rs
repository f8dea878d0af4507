//! The three independent land value metrics
//!
//! Each metric is a pure function of the grayscale image and its configuration
//! and yields a [0,1] scalar field of the same dimensions.

use crate::spatial::ScalarField;
use std::fmt;

/// Road proximity metric
pub mod arterial;
/// Corner density metric
pub mod junction;
/// Texture variance metric
pub mod zoning;

pub use arterial::arterial_field;
pub use junction::junction_field;
pub use zoning::zoning_field;

/// Identifies one of the three metrics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Proximity to dark road linework
    Arterial,
    /// Density of corner responses
    Junction,
    /// Local intensity variation
    Zoning,
}

impl MetricKind {
    /// All metrics in fusion order
    pub const ALL: [Self; 3] = [Self::Arterial, Self::Junction, Self::Zoning];

    /// Lowercase name used in logs and output filenames
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arterial => "arterial",
            Self::Junction => "junction",
            Self::Zoning => "zoning",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A metric's normalized field
#[derive(Clone, Debug)]
pub struct MetricField {
    /// Which metric produced the field
    pub kind: MetricKind,
    /// Values in [0, 1]
    pub values: ScalarField,
    /// The field had no dynamic range and fell back to all zeros
    pub degenerate: bool,
}

impl MetricField {
    /// Field with values in [0, 1]
    pub const fn new(kind: MetricKind, values: ScalarField, degenerate: bool) -> Self {
        Self {
            kind,
            values,
            degenerate,
        }
    }

    /// All-zero fallback for a field without dynamic range
    pub fn zeros(kind: MetricKind, dim: (usize, usize)) -> Self {
        Self::new(kind, ScalarField::zeros(dim), true)
    }

    /// Field dimensions (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }
}
