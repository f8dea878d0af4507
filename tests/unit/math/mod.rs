mod convolution;
mod distance;
