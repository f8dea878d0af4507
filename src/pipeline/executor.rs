//! Pipeline orchestration: preprocessing, metrics, fusion and overlay
//!
//! A [`LandValuePipeline`] holds only its validated configuration. Every call
//! builds its fields from scratch, so one pipeline may serve many images, from
//! many threads, without interference.

use crate::io::configuration::{ExecutionMode, PipelineConfig};
use crate::io::error::Result;
use crate::io::image::{decode_image, encode_data_url};
use crate::metrics::{MetricField, MetricKind, arterial_field, junction_field, zoning_field};
use crate::pipeline::fusion::fuse;
use crate::pipeline::overlay::render_overlay;
use crate::pipeline::preprocess::{Grayscale, preprocess};
use crate::spatial::ScalarField;
use crate::spatial::field::{mean, peak};
use image::RgbImage;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Pipeline stages in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Grayscale conversion
    Preprocess,
    /// Arterial, junction and zoning metrics
    Metrics,
    /// Weighted fusion and final smoothing
    Fusion,
    /// Colour mapping and compositing
    Overlay,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Self; 4] = [Self::Preprocess, Self::Metrics, Self::Fusion, Self::Overlay];

    /// Short human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preprocess => "preprocess",
            Self::Metrics => "metrics",
            Self::Fusion => "fusion",
            Self::Overlay => "overlay",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three normalized metric fields of one image
#[derive(Clone, Debug)]
pub struct MetricFields {
    /// Road proximity
    pub arterial: MetricField,
    /// Corner density
    pub junction: MetricField,
    /// Texture variance
    pub zoning: MetricField,
}

impl MetricFields {
    /// Fields in fusion order
    pub const fn iter(&self) -> [&MetricField; 3] {
        [&self.arterial, &self.junction, &self.zoning]
    }

    /// Metrics that fell back to all zeros
    pub fn degenerate(&self) -> Vec<MetricKind> {
        self.iter()
            .into_iter()
            .filter(|field| field.degenerate)
            .map(|field| field.kind)
            .collect()
    }
}

/// Everything produced by one pipeline run
#[derive(Clone, Debug)]
pub struct LandValueAnalysis {
    /// Per-metric fields in [0, 1]
    pub metrics: MetricFields,
    /// Fused score in [0, 255]
    pub score: ScalarField,
    /// Heat overlay composited on the source image
    pub overlay: RgbImage,
    /// Metrics whose field had no dynamic range
    pub degenerate_metrics: Vec<MetricKind>,
    /// The fused score had no dynamic range and is all zeros
    pub degenerate_score: bool,
}

/// Land value estimator with a validated configuration
#[derive(Clone, Debug)]
pub struct LandValuePipeline {
    config: PipelineConfig,
}

impl LandValuePipeline {
    /// Create a pipeline after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any parameter fails validation
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Compute the three metric fields according to the execution mode
    pub fn compute_metrics(&self, gray: &Grayscale) -> MetricFields {
        match self.config.execution {
            ExecutionMode::Sequential => self.compute_sequential(gray),
            ExecutionMode::Parallel => self.compute_parallel(gray),
        }
    }

    fn compute_sequential(&self, gray: &Grayscale) -> MetricFields {
        MetricFields {
            arterial: arterial_field(&gray.levels, &self.config.arterial),
            junction: junction_field(&gray.levels, &self.config.junction),
            zoning: zoning_field(&gray.unit, &self.config.zoning),
        }
    }

    #[cfg(feature = "parallel")]
    fn compute_parallel(&self, gray: &Grayscale) -> MetricFields {
        let (arterial, (junction, zoning)) = rayon::join(
            || arterial_field(&gray.levels, &self.config.arterial),
            || {
                rayon::join(
                    || junction_field(&gray.levels, &self.config.junction),
                    || zoning_field(&gray.unit, &self.config.zoning),
                )
            },
        );
        MetricFields {
            arterial,
            junction,
            zoning,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_parallel(&self, gray: &Grayscale) -> MetricFields {
        self.compute_sequential(gray)
    }

    /// Run the full pipeline on a decoded image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image is smaller than 2×2
    /// - Intermediate fields disagree on their dimensions
    pub fn analyze(&self, image: &RgbImage) -> Result<LandValueAnalysis> {
        self.analyze_with_progress(image, |_| {})
    }

    /// Run the full pipeline, reporting each stage before it starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image is smaller than 2×2
    /// - Intermediate fields disagree on their dimensions
    pub fn analyze_with_progress(
        &self,
        image: &RgbImage,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<LandValueAnalysis> {
        let started = Instant::now();

        on_stage(Stage::Preprocess);
        let gray = preprocess(image)?;
        let dim = gray.dim();
        debug!("preprocess: {}x{} grayscale", dim.1, dim.0);

        on_stage(Stage::Metrics);
        let metrics_started = Instant::now();
        let metrics = self.compute_metrics(&gray);
        debug!(
            "metrics: computed in {:?} ({:?})",
            metrics_started.elapsed(),
            self.config.execution
        );

        on_stage(Stage::Fusion);
        let fused = fuse(
            dim,
            &metrics.arterial,
            &metrics.junction,
            &metrics.zoning,
            &self.config.weights,
            self.config.fusion_blur_size,
        )?;

        on_stage(Stage::Overlay);
        let overlay = render_overlay(image, &fused.values, &self.config.overlay)?;

        let degenerate_metrics = metrics.degenerate();
        if let Some(((row, col), _)) = peak(&fused.values) {
            info!(
                "land value: mean score {:.1}, peak at ({col}, {row}), flat metrics {:?}, {:?} total",
                mean(&fused.values),
                degenerate_metrics,
                started.elapsed()
            );
        }

        Ok(LandValueAnalysis {
            metrics,
            score: fused.values,
            overlay,
            degenerate_metrics,
            degenerate_score: fused.normalization.is_degenerate(),
        })
    }

    /// Decode image bytes and run the full pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The bytes are not a decodable image
    /// - The image is smaller than 2×2
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<LandValueAnalysis> {
        let image = decode_image(bytes)?;
        self.analyze(&image)
    }

    /// Decode, analyze and return the overlay as a PNG data URL
    ///
    /// This is the whole contract of the web upload handler.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The bytes are not a decodable image
    /// - The image is smaller than 2×2
    /// - PNG encoding of the overlay fails
    pub fn analyze_bytes_to_data_url(&self, bytes: &[u8]) -> Result<String> {
        let analysis = self.analyze_bytes(bytes)?;
        encode_data_url(&analysis.overlay)
    }
}
