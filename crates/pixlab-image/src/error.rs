/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the image dimensions are zero.
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    ZeroImageDimensions(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image sizes do not match ({0}x{1} != {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel coordinate is outside the image bounds.
    #[error("Pixel index ({0}, {1}) out of bounds for image {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a row index is outside the image bounds.
    #[error("Row index {0} out of bounds for image of height {1}")]
    RowIndexOutOfBounds(usize, usize),

    /// Error when a column index is outside the image bounds.
    #[error("Column index {0} out of bounds for image of width {1}")]
    ColumnIndexOutOfBounds(usize, usize),

    /// Error when a scratch buffer has the wrong length.
    #[error("Buffer length {0} does not match the expected length {1}")]
    InvalidBufferLength(usize, usize),

    /// Error when a kernel length is not a positive odd number.
    #[error("Kernel length must be a positive odd number, got {0}")]
    InvalidKernelLength(usize),

    /// Error when the histogram parameters are invalid.
    #[error("Invalid histogram parameters (bins: {0}, intensity values: {1})")]
    InvalidHistogramBins(usize, usize),

    /// Error when a z-stack projection receives no input images.
    #[error("Z-stack projection requires at least one image")]
    EmptyZStack,

    /// Error when an operation requires a non-constant intensity range.
    #[error("Image has constant intensity")]
    ConstantIntensity,

    /// Error when a value cannot be represented in the target type.
    #[error("Failed to cast value to {0}")]
    CastError(String),
}
