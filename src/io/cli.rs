//! Command-line interface rendering a land value overlay for one image file

use crate::io::configuration::{
    ArterialConfig, DEFAULT_ARTERIAL_BLUR, DEFAULT_ARTERIAL_WEIGHT, DEFAULT_FUSION_BLUR,
    DEFAULT_JUNCTION_BLUR, DEFAULT_JUNCTION_WEIGHT, DEFAULT_ROAD_THRESHOLD, DEFAULT_ZONING_BLUR,
    DEFAULT_ZONING_WEIGHT, DEFAULT_ZONING_WINDOW, ExecutionMode, JunctionConfig, OUTPUT_SUFFIX,
    PipelineConfig, Weights, ZoningConfig,
};
use crate::io::error::{LandValueError, Result, invalid_configuration};
use crate::io::image::{decode_image, field_to_gray, save_png};
use crate::io::progress::StageProgress;
use crate::metrics::MetricField;
use crate::pipeline::fusion::SCORE_MAX;
use crate::pipeline::{LandValueAnalysis, LandValuePipeline};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "landheat")]
#[command(
    author,
    version,
    about = "Render a visual land value heat overlay for a map or site plan image"
)]
/// Command-line arguments for the overlay tool
// Independent on/off switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file (any format the decoder understands)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG path (defaults to <input>_land_value.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Arterial, junction and zoning weights, comma separated, summing to 1
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = [DEFAULT_ARTERIAL_WEIGHT, DEFAULT_JUNCTION_WEIGHT, DEFAULT_ZONING_WEIGHT]
    )]
    pub weights: Vec<f32>,

    /// Intensities at or below this value count as road linework
    #[arg(short, long, default_value_t = DEFAULT_ROAD_THRESHOLD)]
    pub threshold: u8,

    /// Gaussian kernel size for the arterial field (odd)
    #[arg(long, default_value_t = DEFAULT_ARTERIAL_BLUR)]
    pub arterial_blur: usize,

    /// Gaussian kernel size for the junction field (odd)
    #[arg(long, default_value_t = DEFAULT_JUNCTION_BLUR)]
    pub junction_blur: usize,

    /// Box window for local texture statistics (odd)
    #[arg(long, default_value_t = DEFAULT_ZONING_WINDOW)]
    pub zoning_window: usize,

    /// Gaussian kernel size for the zoning field (odd)
    #[arg(long, default_value_t = DEFAULT_ZONING_BLUR)]
    pub zoning_blur: usize,

    /// Gaussian kernel size applied after fusion (odd)
    #[arg(long, default_value_t = DEFAULT_FUSION_BLUR)]
    pub fusion_blur: usize,

    /// Compute the metrics one after another instead of concurrently
    #[arg(short, long)]
    pub sequential: bool,

    /// Also write each metric field and the score as grayscale PNGs
    #[arg(short, long)]
    pub export_fields: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the pipeline configuration from the parsed flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the weights are not exactly three
    /// values or any parameter fails validation
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let [arterial, junction, zoning] = self.weights.as_slice() else {
            return Err(invalid_configuration(
                "weights",
                &format!("{:?}", self.weights),
                &"expected three comma separated values",
            ));
        };

        let config = PipelineConfig {
            weights: Weights::new(*arterial, *junction, *zoning)?,
            arterial: ArterialConfig {
                threshold: self.threshold,
                blur_size: self.arterial_blur,
                ..ArterialConfig::default()
            },
            junction: JunctionConfig {
                blur_size: self.junction_blur,
                ..JunctionConfig::default()
            },
            zoning: ZoningConfig {
                window_size: self.zoning_window,
                blur_size: self.zoning_blur,
            },
            fusion_blur_size: self.fusion_blur,
            execution: if self.sequential {
                ExecutionMode::Sequential
            } else {
                ExecutionMode::Parallel
            },
            ..PipelineConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Path the overlay is written to
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.input, OUTPUT_SUFFIX))
    }
}

/// Runs the pipeline for the file named on the command line
pub struct FileProcessor {
    cli: Cli,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Read, analyze and write the overlay, returning the written path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The flags describe an invalid configuration
    /// - The input is not a regular file or cannot be read
    /// - The image cannot be decoded or is too small
    /// - Any output file cannot be written
    pub fn process(&self) -> Result<PathBuf> {
        let pipeline = LandValuePipeline::new(self.cli.pipeline_config()?)?;
        let input = &self.cli.input;

        if !input.is_file() {
            return Err(invalid_configuration(
                "input",
                &input.display(),
                &"must be an existing image file",
            ));
        }

        let bytes = std::fs::read(input).map_err(|e| LandValueError::FileSystem {
            path: input.clone(),
            operation: "read image",
            source: e,
        })?;

        let mut progress = self
            .cli
            .should_show_progress()
            .then(|| StageProgress::new(input));

        let image = match decode_image(&bytes) {
            Ok(image) => image,
            Err(error) => {
                if let Some(ref bar) = progress {
                    bar.abandon();
                }
                return Err(error);
            }
        };

        let result = pipeline.analyze_with_progress(&image, |stage| {
            if let Some(ref mut bar) = progress {
                bar.start_stage(stage);
            }
        });
        let analysis = match result {
            Ok(analysis) => analysis,
            Err(error) => {
                if let Some(ref bar) = progress {
                    bar.abandon();
                }
                return Err(error);
            }
        };

        let output = self.cli.output_path();
        save_png(analysis.overlay.clone(), &output)?;
        info!("wrote overlay to {}", output.display());

        if self.cli.export_fields {
            Self::export_fields(input, &analysis)?;
        }

        if let Some(ref bar) = progress {
            bar.finish(&output);
        }

        Ok(output)
    }

    fn export_fields(input: &Path, analysis: &LandValueAnalysis) -> Result<()> {
        for field in analysis.metrics.iter() {
            Self::export_metric(input, field)?;
        }

        let score_path = Self::field_path(input, "score");
        save_png(field_to_gray(&analysis.score, SCORE_MAX), &score_path)?;
        info!("wrote score field to {}", score_path.display());
        Ok(())
    }

    fn export_metric(input: &Path, field: &MetricField) -> Result<()> {
        let path = Self::field_path(input, field.kind.name());
        save_png(field_to_gray(&field.values, 1.0), &path)?;
        info!("wrote {} field to {}", field.kind, path.display());
        Ok(())
    }

    /// Path of an exported field image: `<stem>_<name>.png` next to the input
    pub fn field_path(input: &Path, name: &str) -> PathBuf {
        sibling_path(input, &format!("_{name}"))
    }
}

// `<dir>/<stem><suffix>.png`
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.png", stem.to_string_lossy());

    if let Some(parent) = input.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
