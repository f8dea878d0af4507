//! Pipeline constants and runtime configuration defaults

use crate::io::error::{Result, invalid_configuration};

// Fusion weights, must sum to one
/// Default weight of the arterial metric
pub const DEFAULT_ARTERIAL_WEIGHT: f32 = 0.4;
/// Default weight of the junction metric
pub const DEFAULT_JUNCTION_WEIGHT: f32 = 0.3;
/// Default weight of the zoning metric
pub const DEFAULT_ZONING_WEIGHT: f32 = 0.3;
/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// Arterial metric
/// Intensities at or below this value are road candidates
pub const DEFAULT_ROAD_THRESHOLD: u8 = 200;
/// Side length of the square erosion element
pub const DEFAULT_EROSION_SIZE: usize = 3;
/// Number of erosion passes over the road mask
pub const DEFAULT_EROSION_ITERATIONS: usize = 1;
/// Gaussian kernel size applied to the inverted distance field
pub const DEFAULT_ARTERIAL_BLUR: usize = 101;

// Junction metric
/// Window size of the structure tensor sum
pub const DEFAULT_HARRIS_BLOCK_SIZE: usize = 2;
/// Sobel aperture used for image derivatives
pub const DEFAULT_HARRIS_APERTURE: usize = 3;
/// Harris sensitivity constant `k`
pub const DEFAULT_HARRIS_SENSITIVITY: f32 = 0.04;
/// Fraction of the strongest response a pixel must exceed to count as a corner
pub const DEFAULT_RESPONSE_FRACTION: f32 = 0.005;
/// Gaussian kernel size spreading corner points into hotspots
pub const DEFAULT_JUNCTION_BLUR: usize = 151;

// Zoning metric
/// Box window used for local mean and mean of squares
pub const DEFAULT_ZONING_WINDOW: usize = 25;
/// Gaussian kernel size applied to the local standard deviation
pub const DEFAULT_ZONING_BLUR: usize = 51;

// Fusion and overlay
/// Gaussian kernel size applied after weighted fusion
pub const DEFAULT_FUSION_BLUR: usize = 121;
/// Opacity of the heat layer where the score is zero
pub const DEFAULT_ALPHA_FLOOR: f32 = 0.2;
/// Additional opacity at the maximum score
pub const DEFAULT_ALPHA_GAIN: f32 = 0.55;

/// Smallest accepted image width and height
pub const MIN_IMAGE_DIMENSION: u32 = 2;

// Output settings
/// Suffix added to overlay filenames
pub const OUTPUT_SUFFIX: &str = "_land_value";
/// Prefix of encoded overlays returned to web callers
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";
/// Width of the stage progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Relative weights of the three metrics in the fused score
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    /// Weight of the arterial (road proximity) field
    pub arterial: f32,
    /// Weight of the junction (corner density) field
    pub junction: f32,
    /// Weight of the zoning (texture variance) field
    pub zoning: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            arterial: DEFAULT_ARTERIAL_WEIGHT,
            junction: DEFAULT_JUNCTION_WEIGHT,
            zoning: DEFAULT_ZONING_WEIGHT,
        }
    }
}

impl Weights {
    /// Build a validated weight vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any weight is negative or not finite,
    /// or if the weights do not sum to 1.0
    pub fn new(arterial: f32, junction: f32, zoning: f32) -> Result<Self> {
        let weights = Self {
            arterial,
            junction,
            zoning,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Sum of the three weights in double precision
    pub fn sum(&self) -> f64 {
        f64::from(self.arterial) + f64::from(self.junction) + f64::from(self.zoning)
    }

    /// Check sign, finiteness and the unit sum
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first offending weight
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("weights.arterial", self.arterial),
            ("weights.junction", self.junction),
            ("weights.zoning", self.zoning),
        ] {
            if !value.is_finite() {
                return Err(invalid_configuration(parameter, &value, &"must be finite"));
            }
            if value < 0.0 {
                return Err(invalid_configuration(
                    parameter,
                    &value,
                    &"must be non-negative",
                ));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid_configuration(
                "weights",
                &format!("{}, {}, {}", self.arterial, self.junction, self.zoning),
                &format!("must sum to 1.0 (sum is {sum})"),
            ));
        }

        Ok(())
    }
}

/// Parameters of the road proximity metric
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArterialConfig {
    /// Intensities at or below this value are road candidates
    pub threshold: u8,
    /// Side length of the square erosion element (odd)
    pub erosion_size: usize,
    /// Number of erosion passes
    pub erosion_iterations: usize,
    /// Gaussian kernel size for the inverted distance field (odd)
    pub blur_size: usize,
}

impl Default for ArterialConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ROAD_THRESHOLD,
            erosion_size: DEFAULT_EROSION_SIZE,
            erosion_iterations: DEFAULT_EROSION_ITERATIONS,
            blur_size: DEFAULT_ARTERIAL_BLUR,
        }
    }
}

/// Parameters of the corner density metric
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JunctionConfig {
    /// Structure tensor window size
    pub block_size: usize,
    /// Sobel aperture (3 or 5)
    pub aperture: usize,
    /// Harris sensitivity constant `k`
    pub sensitivity: f32,
    /// Fraction of the per-image maximum response marking a corner
    pub response_fraction: f32,
    /// Gaussian kernel size for the corner mask (odd)
    pub blur_size: usize,
}

impl Default for JunctionConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_HARRIS_BLOCK_SIZE,
            aperture: DEFAULT_HARRIS_APERTURE,
            sensitivity: DEFAULT_HARRIS_SENSITIVITY,
            response_fraction: DEFAULT_RESPONSE_FRACTION,
            blur_size: DEFAULT_JUNCTION_BLUR,
        }
    }
}

/// Parameters of the texture variance metric
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoningConfig {
    /// Box window for local statistics (odd)
    pub window_size: usize,
    /// Gaussian kernel size for the standard deviation field (odd)
    pub blur_size: usize,
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_ZONING_WINDOW,
            blur_size: DEFAULT_ZONING_BLUR,
        }
    }
}

/// Opacity ramp of the heat layer
///
/// Opacity grows linearly from `alpha_floor` at score 0 to
/// `alpha_floor + alpha_gain` at score 255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Opacity at the lowest score
    pub alpha_floor: f32,
    /// Opacity added at the highest score
    pub alpha_gain: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            alpha_floor: DEFAULT_ALPHA_FLOOR,
            alpha_gain: DEFAULT_ALPHA_GAIN,
        }
    }
}

impl OverlayConfig {
    /// Opacity reached at the maximum score
    pub fn alpha_ceiling(&self) -> f32 {
        self.alpha_floor + self.alpha_gain
    }
}

/// How the three independent metrics are scheduled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Evaluate the metrics one after another on the calling thread
    Sequential,
    /// Evaluate the metrics concurrently when the `parallel` feature is enabled
    #[default]
    Parallel,
}

/// Complete pipeline configuration with documented defaults
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Fusion weights
    pub weights: Weights,
    /// Road proximity parameters
    pub arterial: ArterialConfig,
    /// Corner density parameters
    pub junction: JunctionConfig,
    /// Texture variance parameters
    pub zoning: ZoningConfig,
    /// Gaussian kernel size applied after fusion (odd)
    pub fusion_blur_size: usize,
    /// Heat layer opacity
    pub overlay: OverlayConfig,
    /// Metric scheduling
    pub execution: ExecutionMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            arterial: ArterialConfig::default(),
            junction: JunctionConfig::default(),
            zoning: ZoningConfig::default(),
            fusion_blur_size: DEFAULT_FUSION_BLUR,
            overlay: OverlayConfig::default(),
            execution: ExecutionMode::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with the given weights
    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Check every parameter before any pipeline stage runs
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - The weights are negative, not finite, or do not sum to 1.0
    /// - Any kernel or window size is even or zero
    /// - The Harris block size is zero or the aperture is not 3 or 5
    /// - The Harris sensitivity is not a positive finite number
    /// - The response fraction lies outside (0, 1]
    /// - The overlay opacity ramp leaves [0, 1]
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        validate_kernel_size("arterial.erosion_size", self.arterial.erosion_size)?;
        validate_kernel_size("arterial.blur_size", self.arterial.blur_size)?;
        validate_kernel_size("junction.blur_size", self.junction.blur_size)?;
        validate_kernel_size("zoning.window_size", self.zoning.window_size)?;
        validate_kernel_size("zoning.blur_size", self.zoning.blur_size)?;
        validate_kernel_size("fusion_blur_size", self.fusion_blur_size)?;

        if self.junction.block_size == 0 {
            return Err(invalid_configuration(
                "junction.block_size",
                &self.junction.block_size,
                &"must be positive",
            ));
        }
        if !matches!(self.junction.aperture, 3 | 5) {
            return Err(invalid_configuration(
                "junction.aperture",
                &self.junction.aperture,
                &"only Sobel apertures 3 and 5 are supported",
            ));
        }
        let sensitivity = self.junction.sensitivity;
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(invalid_configuration(
                "junction.sensitivity",
                &sensitivity,
                &"must be a positive finite number",
            ));
        }
        let fraction = self.junction.response_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(invalid_configuration(
                "junction.response_fraction",
                &fraction,
                &"must lie in (0, 1]",
            ));
        }

        let overlay = self.overlay;
        if !(0.0..=1.0).contains(&overlay.alpha_floor) {
            return Err(invalid_configuration(
                "overlay.alpha_floor",
                &overlay.alpha_floor,
                &"must lie in [0, 1]",
            ));
        }
        if !(overlay.alpha_gain >= 0.0 && overlay.alpha_ceiling() <= 1.0) {
            return Err(invalid_configuration(
                "overlay.alpha_gain",
                &overlay.alpha_gain,
                &"must be non-negative and keep the opacity ceiling at or below 1",
            ));
        }

        Ok(())
    }
}

/// Reject even or zero kernel sizes
///
/// # Errors
///
/// Returns `InvalidConfiguration` unless `size` is odd and positive
pub fn validate_kernel_size(parameter: &'static str, size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(invalid_configuration(
            parameter,
            &size,
            &"kernel sizes must be odd and positive",
        ));
    }
    Ok(())
}
