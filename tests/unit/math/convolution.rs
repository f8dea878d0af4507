//! Tests for separable filters and reflect-101 borders

#[cfg(test)]
mod tests {
    use landheat::math::convolution::{
        box_blur, box_sum, correlate_axis, gaussian_blur, gaussian_kernel, gaussian_sigma,
        reflect_101, sobel, sobel_kernels,
    };
    use ndarray::{Array2, Axis, array};

    // Tests mirroring without repeating the edge sample
    // Verified by switching to reflect with edge repetition
    #[test]
    fn test_reflect_101_indices() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(0, 1), 0);
        assert_eq!(reflect_101(-7, 1), 0);
    }

    // Tests offsets wider than the lane keep bouncing between the ends
    // Verified by clamping instead of wrapping the period
    #[test]
    fn test_reflect_101_far_offsets() {
        assert_eq!(reflect_101(-13, 5), 3);
        assert_eq!(reflect_101(9, 5), 1);
        assert_eq!(reflect_101(16, 5), 0);
        assert_eq!(reflect_101(-50, 2), 0);
        assert_eq!(reflect_101(51, 2), 1);
    }

    // Tests sigma derived from kernel size
    // Verified by dropping the 0.8 offset
    #[test]
    fn test_gaussian_sigma() {
        assert!((gaussian_sigma(101) - 15.5).abs() < 1e-9);
        assert!((gaussian_sigma(3) - 0.8).abs() < 1e-9);
    }

    // Tests the kernel is normalized, symmetric and peaked at the centre
    // Verified by skipping the normalization division
    #[test]
    fn test_gaussian_kernel_shape() {
        let kernel = gaussian_kernel(51);
        assert_eq!(kernel.len(), 51);

        let total: f32 = kernel.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);

        for (left, right) in kernel.iter().zip(kernel.iter().rev()) {
            assert!((left - right).abs() < 1e-9);
        }
        let centre = kernel[25];
        assert!(kernel.iter().all(|&weight| weight <= centre));

        assert_eq!(gaussian_kernel(1), vec![1.0]);
    }

    // Tests a constant field survives Gaussian and box smoothing
    // Verified by zero padding the borders
    #[test]
    fn test_constant_field_is_preserved() {
        let field = Array2::from_elem((9, 14), 0.7_f32);

        let gaussian = gaussian_blur(&field, 31);
        assert!(gaussian.iter().all(|&value| (value - 0.7).abs() < 1e-5));

        let boxed = box_blur(&field, 5);
        assert!(boxed.iter().all(|&value| (value - 0.7).abs() < 1e-5));
    }

    // Tests the unnormalized box sum counts every window cell
    // Verified by using the averaging kernel in box_sum
    #[test]
    fn test_box_sum_of_ones() {
        let field = Array2::from_elem((4, 6), 1.0_f32);
        let summed = box_sum(&field, 3);
        assert!(summed.iter().all(|&value| (value - 9.0).abs() < f32::EPSILON));
    }

    // Tests an impulse spreads symmetrically while keeping its mass
    // Verified by correlating columns with the row kernel reversed
    #[test]
    fn test_impulse_response() {
        let mut field = Array2::zeros((21, 21));
        field[[10, 10]] = 1.0_f32;

        let blurred = gaussian_blur(&field, 7);
        let total: f32 = blurred.sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!((blurred[[10, 9]] - blurred[[10, 11]]).abs() < 1e-7);
        assert!((blurred[[9, 10]] - blurred[[10, 9]]).abs() < 1e-7);
        assert!(blurred[[10, 10]] > blurred[[10, 11]]);
    }

    // Tests even kernels anchor one sample before the centre
    // Verified by anchoring at zero
    #[test]
    fn test_even_kernel_anchor() {
        let field = array![[1.0_f32, 2.0, 3.0]];
        let output = correlate_axis(&field, &[1.0, 1.0], Axis(1));
        assert_eq!(output, array![[3.0_f32, 3.0, 5.0]]);
    }

    // Tests Sobel derivatives of a horizontal ramp
    // Verified by swapping the derivative and smoothing halves
    #[test]
    fn test_sobel_on_ramp() {
        let ramp = Array2::from_shape_fn((6, 7), |(_, col)| col as f32);
        let (dx, dy) = sobel(&ramp, 3).unwrap();

        assert!((dx[[3, 3]] - 8.0).abs() < 1e-5);
        assert!(dx[[3, 0]].abs() < 1e-5);
        assert!(dy.iter().all(|&value| value.abs() < 1e-5));
    }

    // Tests only apertures 3 and 5 are available
    // Verified by accepting any odd aperture
    #[test]
    fn test_sobel_apertures() {
        assert!(sobel_kernels(3).is_some());
        assert!(sobel_kernels(5).is_some());
        assert!(sobel_kernels(7).is_none());
        assert!(sobel(&Array2::zeros((3, 3)), 4).is_none());
    }
}
