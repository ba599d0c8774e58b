use pixlab_image::{Image, ImageError};
use rayon::prelude::*;

use super::convolution::{average_3, average_5, convolve_3, difference_3, moving_average_1d};
use crate::parallel::ExecutionStrategy;

/// A 1-D filter applied by the separable driver along one image axis.
///
/// The averaging and difference variants use the mirror border rule; the
/// generic 3-tap kernel replicates the edge samples instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel1d {
    /// Average of length 3 with mirror borders.
    Average3,
    /// Average of length 5 with mirror borders.
    Average5,
    /// Average of arbitrary odd length with mirror borders.
    Average(usize),
    /// Centered difference of length 3, zero at the borders.
    Difference3,
    /// Arbitrary 3-tap kernel with edge replication.
    Kernel3([f64; 3]),
}

impl Kernel1d {
    /// Apply the filter to a 1-D signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the input and output lengths differ, or if an
    /// `Average` length is not a positive odd number.
    pub fn apply(&self, vin: &[f64], vout: &mut [f64]) -> Result<(), ImageError> {
        match self {
            Kernel1d::Average3 => average_3(vin, vout),
            Kernel1d::Average5 => average_5(vin, vout),
            Kernel1d::Average(length) => moving_average_1d(vin, vout, *length),
            Kernel1d::Difference3 => difference_3(vin, vout),
            Kernel1d::Kernel3(kernel) => convolve_3(vin, vout, kernel),
        }
    }
}

/// Apply a separable 2-D filter to an image.
///
/// Every row of `src` is filtered with `row_kernel` into an intermediate
/// buffer, then every column of the intermediate buffer is filtered with
/// `col_kernel` into `dst`. For kernels whose 2-D composite is the outer
/// product of the two 1-D kernels this is numerically equivalent to the
/// direct 2-D convolution.
///
/// Uses [`ExecutionStrategy::Auto`]. For explicit control, use
/// [`separable_filter_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, same size as the source.
/// * `row_kernel` - The filter applied along every row.
/// * `col_kernel` - The filter applied along every column.
pub fn separable_filter(
    src: &Image<f64>,
    dst: &mut Image<f64>,
    row_kernel: Kernel1d,
    col_kernel: Kernel1d,
) -> Result<(), ImageError> {
    separable_filter_with_strategy(src, dst, row_kernel, col_kernel, ExecutionStrategy::Auto)
}

/// Apply a separable 2-D filter with execution strategy control.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size or a kernel is invalid.
pub fn separable_filter_with_strategy(
    src: &Image<f64>,
    dst: &mut Image<f64>,
    row_kernel: Kernel1d,
    col_kernel: Kernel1d,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if strategy.is_parallel(src.num_pixels()) {
        apply_parallel(src, dst, row_kernel, col_kernel)
    } else {
        apply_serial(src, dst, row_kernel, col_kernel)
    }
}

fn apply_serial(
    src: &Image<f64>,
    dst: &mut Image<f64>,
    row_kernel: Kernel1d,
    col_kernel: Kernel1d,
) -> Result<(), ImageError> {
    let rows = src.rows();
    let cols = src.cols();
    let mut temp = Image::from_size_val(src.size(), 0.0)?;

    let mut row_in = vec![0.0; cols];
    let mut row_out = vec![0.0; cols];
    for y in 0..rows {
        src.get_row(y, &mut row_in)?;
        row_kernel.apply(&row_in, &mut row_out)?;
        temp.put_row(y, &row_out)?;
    }

    let mut col_in = vec![0.0; rows];
    let mut col_out = vec![0.0; rows];
    for x in 0..cols {
        temp.get_col(x, &mut col_in)?;
        col_kernel.apply(&col_in, &mut col_out)?;
        dst.put_col(x, &col_out)?;
    }
    Ok(())
}

fn apply_parallel(
    src: &Image<f64>,
    dst: &mut Image<f64>,
    row_kernel: Kernel1d,
    col_kernel: Kernel1d,
) -> Result<(), ImageError> {
    let rows = src.rows();
    let cols = src.cols();
    let mut temp = Image::from_size_val(src.size(), 0.0)?;

    let src_data = src.as_slice();
    temp.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .try_for_each(|(y, row_out)| {
            let row_in = &src_data[y * cols..(y + 1) * cols];
            row_kernel.apply(row_in, row_out)
        })?;

    let temp_data = temp.as_slice();
    let filtered_cols = (0..cols)
        .into_par_iter()
        .map(|x| {
            let mut col_in = vec![0.0; rows];
            let mut col_out = vec![0.0; rows];
            for (y, val) in col_in.iter_mut().enumerate() {
                *val = temp_data[y * cols + x];
            }
            col_kernel.apply(&col_in, &mut col_out)?;
            Ok(col_out)
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    for (x, col) in filtered_cols.iter().enumerate() {
        dst.put_col(x, col)?;
    }
    Ok(())
}
