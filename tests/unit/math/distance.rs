//! Tests for the exact Euclidean distance transform

#[cfg(test)]
mod tests {
    use landheat::math::distance::euclidean_distance_transform;
    use landheat::spatial::Mask;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force(mask: &Mask, row: usize, col: usize) -> f32 {
        let mut best = f32::INFINITY;
        for r in 0..mask.rows() {
            for c in 0..mask.cols() {
                if mask.contains(r, c) {
                    let dr = r as f32 - row as f32;
                    let dc = c as f32 - col as f32;
                    best = best.min(dr.hypot(dc));
                }
            }
        }
        best
    }

    // Tests a mask without features has no distance field
    // Verified by returning an all-infinite field
    #[test]
    fn test_empty_mask() {
        assert!(euclidean_distance_transform(&Mask::new(4, 6)).is_none());
    }

    // Tests distances from a single feature cell
    // Verified by returning squared distances
    #[test]
    fn test_single_feature() {
        let mut mask = Mask::new(5, 5);
        mask.set(2, 2, true);
        let distances = euclidean_distance_transform(&mask).unwrap();

        assert_eq!(distances[[2, 2]], 0.0);
        assert!((distances[[2, 4]] - 2.0).abs() < 1e-6);
        assert!((distances[[0, 0]] - 8.0_f32.sqrt()).abs() < 1e-6);
        assert!((distances[[4, 3]] - 5.0_f32.sqrt()).abs() < 1e-6);
    }

    // Tests a vertical line yields pure horizontal distances
    // Verified by skipping the row envelope pass
    #[test]
    fn test_vertical_line() {
        let mask = Mask::from_fn(6, 9, |_, col| col == 3);
        let distances = euclidean_distance_transform(&mask).unwrap();

        for row in 0..6 {
            for col in 0..9 {
                let expected = (col as f32 - 3.0).abs();
                assert!((distances[[row, col]] - expected).abs() < 1e-6);
            }
        }
    }

    // Tests the transform is exact against a brute-force search
    // Verified by replacing the envelope with nearest-in-row only
    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut mask = Mask::from_fn(13, 17, |_, _| rng.random_bool(0.08));
        mask.set(6, 8, true);

        let distances = euclidean_distance_transform(&mask).unwrap();
        for ((row, col), &distance) in distances.indexed_iter() {
            let expected = brute_force(&mask, row, col);
            assert!(
                (distance - expected).abs() < 1e-4,
                "({row}, {col}): {distance} vs {expected}"
            );
        }
    }
}
