use pixlab_image::{Image, ImageError};
use rayon::prelude::*;

/// Map a pixel value to its histogram bin.
///
/// The bin is `round(pixel * bins / intensity_values)` clamped to
/// `[0, bins)`, so values outside the nominal intensity range land in the
/// first or last bin instead of indexing out of range.
pub(crate) fn bin_index(pixel: f64, num_bins: usize, num_intensity_values: usize) -> usize {
    let bin = (pixel * num_bins as f64 / num_intensity_values as f64).round();
    if bin <= 0.0 {
        0
    } else {
        (bin as usize).min(num_bins - 1)
    }
}

/// Compute the pixel intensity histogram of an image.
///
/// Each pixel is binned via `round(pixel * bins / intensity_values)`, clamped
/// to the valid bin range. The returned counts sum to `width * height`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `num_intensity_values` - The nominal number of intensity values (e.g. 256).
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins or intensity values is zero.
///
/// # Example
///
/// ```
/// use pixlab_image::{Image, ImageSize};
/// use pixlab_imgproc::histogram::histogram;
///
/// let image = Image::<f64>::new(
///     ImageSize {
///         width: 3,
///         height: 1,
///     },
///     vec![0.0, 128.0, 255.0],
/// )
/// .unwrap();
///
/// let hist = histogram(&image, 256, 256).unwrap();
/// assert_eq!(hist.iter().sum::<usize>(), 3);
/// ```
pub fn histogram(
    src: &Image<f64>,
    num_intensity_values: usize,
    num_bins: usize,
) -> Result<Vec<usize>, ImageError> {
    if num_bins == 0 || num_intensity_values == 0 {
        return Err(ImageError::InvalidHistogramBins(
            num_bins,
            num_intensity_values,
        ));
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_index(px, num_bins, num_intensity_values)] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (acc, val) in a.iter_mut().zip(b) {
                    *acc += val;
                }
                a
            },
        );

    Ok(counts)
}

/// Compute the cumulative pixel intensity histogram of an image.
///
/// Prefix sum of [`histogram`], seeded with the first bin; the last entry
/// equals the total pixel count.
///
/// # Errors
///
/// Returns an error if the number of bins or intensity values is zero.
pub fn cumulative_histogram(
    src: &Image<f64>,
    num_intensity_values: usize,
    num_bins: usize,
) -> Result<Vec<usize>, ImageError> {
    let hist = histogram(src, num_intensity_values, num_bins)?;

    let mut acc = vec![0usize; hist.len()];
    acc[0] = hist[0];
    for i in 1..hist.len() {
        acc[i] = acc[i - 1] + hist[i];
    }
    Ok(acc)
}
