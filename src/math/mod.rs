//! Numerical kernels shared by the metrics

/// Separable correlation, Gaussian, box and Sobel filters
pub mod convolution;
/// Exact Euclidean distance transform over binary masks
pub mod distance;
/// Min-max normalization with degenerate-range handling
pub mod normalize;
