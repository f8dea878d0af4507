//! Grayscale conversion and input validation

use crate::io::configuration::MIN_IMAGE_DIMENSION;
use crate::io::error::{LandValueError, Result};
use crate::spatial::field::unit_from_gray;
use crate::spatial::{GrayField, ScalarField};
use image::{Rgb, RgbImage};

// BT.601 luma weights in 14-bit fixed point, summing to 1 << 14
const LUMA_RED: u32 = 4_899;
const LUMA_GREEN: u32 = 9_617;
const LUMA_BLUE: u32 = 1_868;
const LUMA_SHIFT: u32 = 14;

/// Grayscale views of the source image shared by all metrics
#[derive(Clone, Debug)]
pub struct Grayscale {
    /// 8-bit intensities
    pub levels: GrayField,
    /// Intensities scaled into [0, 1]
    pub unit: ScalarField,
}

impl Grayscale {
    /// Field dimensions (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.levels.dim()
    }
}

/// Rounded BT.601 luma of an RGB pixel
pub const fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let weighted = r as u32 * LUMA_RED + g as u32 * LUMA_GREEN + b as u32 * LUMA_BLUE;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Reject images too small to carry any spatial structure
///
/// # Errors
///
/// Returns `DegenerateImage` if either side is below the minimum dimension
pub fn check_dimensions(image: &RgbImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if width < MIN_IMAGE_DIMENSION || height < MIN_IMAGE_DIMENSION {
        return Err(LandValueError::DegenerateImage { width, height });
    }
    Ok(())
}

/// Convert a colour image into 8-bit and unit-range grayscale fields
///
/// # Errors
///
/// Returns `DegenerateImage` if the image is smaller than 2×2
pub fn preprocess(image: &RgbImage) -> Result<Grayscale> {
    check_dimensions(image)?;

    let (width, height) = image.dimensions();
    let mut levels = GrayField::zeros((height as usize, width as usize));
    for (x, y, pixel) in image.enumerate_pixels() {
        if let Some(level) = levels.get_mut((y as usize, x as usize)) {
            *level = luma(pixel);
        }
    }

    let unit = unit_from_gray(&levels);
    Ok(Grayscale { levels, unit })
}
