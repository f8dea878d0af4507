//! Tests for the jet colour map

#[cfg(test)]
mod tests {
    use image::Rgb;
    use landheat::pipeline::colormap::{jet, jet_table};

    // Tests the dark blue and dark red ends of the map
    // Verified by reversing the channel order
    #[test]
    fn test_jet_endpoints() {
        assert_eq!(jet(0), Rgb([0, 0, 128]));
        assert_eq!(jet(255), Rgb([128, 0, 0]));
    }

    // Tests the middle of the map is dominated by green
    // Verified by shifting the green centre
    #[test]
    fn test_jet_midpoint() {
        let Rgb([red, green, blue]) = jet(128);
        assert_eq!(green, 255);
        assert!(red > 100 && red < 160);
        assert!(blue > 100 && blue < 160);
    }

    // Tests low scores are blue and high scores are red
    // Verified by inverting the level
    #[test]
    fn test_jet_ordering() {
        let Rgb([red, _, blue]) = jet(40);
        assert!(blue > red);

        let Rgb([red, _, blue]) = jet(215);
        assert!(red > blue);
    }

    // Tests the lookup table agrees with the direct mapping
    // Verified by filling the table off by one level
    #[test]
    fn test_table_matches_jet() {
        let table = jet_table();
        for (level, color) in (0..=u8::MAX).zip(table) {
            assert_eq!(color, jet(level));
        }
    }
}
