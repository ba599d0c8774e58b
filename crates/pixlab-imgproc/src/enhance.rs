use num_traits::{Float, FromPrimitive};
use pixlab_image::{Image, ImageError};

use crate::histogram::{bin_index, cumulative_histogram};
use crate::parallel;

/// The nominal intensity range of the pointwise transforms.
const MAX_INTENSITY: f64 = 255.0;

/// The intensity cap applied by [`saturate`].
const SATURATION_CAP: f64 = 10_000.0;

fn check_same_size<T, U>(src: &Image<T>, dst: &Image<U>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

fn from_f64<T: FromPrimitive>(val: f64) -> Result<T, ImageError> {
    T::from_f64(val).ok_or_else(|| ImageError::CastError(std::any::type_name::<T>().to_string()))
}

/// Invert the contrast of an image.
///
/// Computes `dst(x, y) = 255 - src(x, y)`. Applying the transform twice
/// restores the input exactly.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn invert<T>(src: &Image<T>, dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Float + FromPrimitive + Send + Sync,
{
    check_same_size(src, dst)?;
    let max_val = from_f64::<T>(MAX_INTENSITY)?;

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = max_val - src_pixel;
    });

    Ok(())
}

/// Stretch the contrast of an image to the full `[0, 255]` range.
///
/// Computes the global minimum and maximum and maps
/// `dst(x, y) = 255 / (max - min) * (src(x, y) - min)`.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match, or if the
/// image has constant intensity (the stretch is undefined).
pub fn rescale<T>(src: &Image<T>, dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Float + FromPrimitive + Send + Sync,
{
    check_same_size(src, dst)?;

    let (min, max) = src.min_max();
    if max == min {
        return Err(ImageError::ConstantIntensity);
    }
    let alpha = from_f64::<T>(MAX_INTENSITY)? / (max - min);

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = alpha * (src_pixel - min);
    });

    Ok(())
}

/// Saturate an image and stretch the result to the full `[0, 255]` range.
///
/// Clamps every pixel to at most 10000, then applies [`rescale`].
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match, or if the
/// clamped image has constant intensity.
pub fn saturate<T>(src: &Image<T>, dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Float + FromPrimitive + Send + Sync,
{
    check_same_size(src, dst)?;
    let cap = from_f64::<T>(SATURATION_CAP)?;

    let mut clamped = Image::from_size_val(src.size(), T::zero())?;
    parallel::par_iter_rows_val(src, &mut clamped, |&src_pixel, dst_pixel| {
        *dst_pixel = src_pixel.min(cap);
    });

    rescale(&clamped, dst)
}

/// Equalize the histogram of an image.
///
/// Remaps every pixel through the normalized cumulative histogram computed
/// with 256 intensity values and 256 bins:
/// `dst(x, y) = cdf(bin(src(x, y))) * 255 / n` where `n` is the pixel count.
/// The normalization uses floating-point division.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn equalize(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    const NUM_INTENSITY_VALUES: usize = 256;
    const NUM_BINS: usize = 256;

    let cdf = cumulative_histogram(src, NUM_INTENSITY_VALUES, NUM_BINS)?;
    let scale = (NUM_INTENSITY_VALUES - 1) as f64 / src.num_pixels() as f64;

    for (dst_pixel, &src_pixel) in dst.as_slice_mut().iter_mut().zip(src.as_slice()) {
        let bin = bin_index(src_pixel, NUM_BINS, NUM_INTENSITY_VALUES);
        *dst_pixel = cdf[bin] as f64 * scale;
    }

    Ok(())
}
