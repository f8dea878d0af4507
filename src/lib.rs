//! Visual land value estimation for map and site plan images
//!
//! Three independent image metrics (arterial road proximity, junction density and
//! zoning texture) are normalized, fused into a single score field and rendered as
//! a translucent heat overlay on top of the source image.

#![forbid(unsafe_code)]

/// Input/output adapters, configuration and error handling
pub mod io;
/// Numerical kernels: convolution, normalization and distance transforms
pub mod math;
/// The three land value metrics computed from the grayscale image
pub mod metrics;
/// Preprocessing, fusion, overlay rendering and pipeline orchestration
pub mod pipeline;
/// Scalar field and binary mask data structures
pub mod spatial;

pub use io::configuration::{ExecutionMode, OverlayConfig, PipelineConfig, Weights};
pub use io::error::{LandValueError, Result};
pub use pipeline::executor::{LandValueAnalysis, LandValuePipeline};
