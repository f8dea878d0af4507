//! Heat map rendering and alpha compositing onto the source image

use crate::io::configuration::OverlayConfig;
use crate::io::error::{Result, ensure_dimensions};
use crate::pipeline::colormap::jet_table;
use crate::pipeline::fusion::SCORE_MAX;
use crate::spatial::ScalarField;
use image::{Rgb, RgbImage};

/// Opacity of the heat layer at a score in [0, 255]
///
/// Linear from `alpha_floor` at 0 to `alpha_floor + alpha_gain` at 255, clamped
/// to that interval.
pub fn alpha_for_score(score: f32, config: &OverlayConfig) -> f32 {
    let alpha = (score / SCORE_MAX).mul_add(config.alpha_gain, config.alpha_floor);
    alpha.clamp(config.alpha_floor, config.alpha_ceiling())
}

/// Truncate a score to its 8-bit colour map level
pub fn score_level(score: f32) -> u8 {
    if score.is_finite() {
        score.clamp(0.0, SCORE_MAX) as u8
    } else {
        0
    }
}

/// Colour-mapped score without compositing
pub fn heatmap(score: &ScalarField) -> RgbImage {
    let table = jet_table();
    let (rows, cols) = score.dim();
    let mut image = RgbImage::new(cols as u32, rows as u32);
    for ((row, col), &value) in score.indexed_iter() {
        if let Some(&color) = table.get(usize::from(score_level(value))) {
            image.put_pixel(col as u32, row as u32, color);
        }
    }
    image
}

/// Blend one channel: `heat * alpha + original * (1 - alpha)`, clamped and truncated
pub fn blend_channel(heat: u8, original: u8, alpha: f32) -> u8 {
    let mixed = f32::from(heat).mul_add(alpha, f32::from(original) * (1.0 - alpha));
    mixed.clamp(0.0, 255.0) as u8
}

/// Composite the colour-mapped score over the source image
///
/// Deterministic: the same inputs always produce the same bytes.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the score field and image sizes differ
pub fn render_overlay(
    source: &RgbImage,
    score: &ScalarField,
    config: &OverlayConfig,
) -> Result<RgbImage> {
    let expected = (source.height() as usize, source.width() as usize);
    ensure_dimensions("overlay", expected, score.dim())?;

    let table = jet_table();
    let mut output = RgbImage::new(source.width(), source.height());
    for ((row, col), &value) in score.indexed_iter() {
        let (x, y) = (col as u32, row as u32);
        let heat = table
            .get(usize::from(score_level(value)))
            .copied()
            .unwrap_or(Rgb([0, 0, 0]));
        let original = source.get_pixel(x, y);
        let alpha = alpha_for_score(value, config);

        let blended = Rgb([
            blend_channel(heat.0[0], original.0[0], alpha),
            blend_channel(heat.0[1], original.0[1], alpha),
            blend_channel(heat.0[2], original.0[2], alpha),
        ]);
        output.put_pixel(x, y, blended);
    }

    Ok(output)
}
