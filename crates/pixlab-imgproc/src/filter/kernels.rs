/// Create the 1-D Sobel kernel pair.
///
/// Returns the smoothing taps and the derivative taps. The derivative kernel
/// is applied along the gradient direction and the smoothing kernel along the
/// other axis.
pub fn sobel_kernel_1d() -> ([f64; 3], [f64; 3]) {
    ([1.0, 2.0, 1.0], [-1.0, 0.0, 1.0])
}
