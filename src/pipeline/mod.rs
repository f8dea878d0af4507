//! Pipeline stages from the decoded image to the composited overlay

/// Jet colour map
pub mod colormap;
/// Pipeline orchestration and results
pub mod executor;
/// Weighted fusion of metric fields
pub mod fusion;
/// Heat map rendering and alpha compositing
pub mod overlay;
/// Grayscale conversion and input checks
pub mod preprocess;

pub use executor::{LandValueAnalysis, LandValuePipeline, MetricFields, Stage};
