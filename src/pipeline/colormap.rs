//! Jet colour map: dark blue through cyan, yellow and red to dark red

use image::Rgb;

// One channel of the jet ramp: a trapezoid centred at `center` (in quarters)
fn jet_channel(t: f32, center: f32) -> u8 {
    let value = (1.5 - 4.0f32.mul_add(t, -center).abs()).clamp(0.0, 1.0);
    (value * 255.0).round() as u8
}

/// Jet colour of an 8-bit level
pub fn jet(level: u8) -> Rgb<u8> {
    let t = f32::from(level) / 255.0;
    Rgb([jet_channel(t, 3.0), jet_channel(t, 2.0), jet_channel(t, 1.0)])
}

/// Lookup table of [`jet`] for every level
pub fn jet_table() -> [Rgb<u8>; 256] {
    let mut table = [Rgb([0, 0, 0]); 256];
    for (level, entry) in (0..=u8::MAX).zip(table.iter_mut()) {
        *entry = jet(level);
    }
    table
}
