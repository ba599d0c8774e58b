use pixlab_image::{Image, ImageError};

use super::separable_filter::{separable_filter, Kernel1d};
use super::kernels;
use crate::parallel;

fn check_same_size(src: &Image<f64>, dst: &Image<f64>) -> Result<(), ImageError> {
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

/// Detect vertical edges with the separable 3x3 edge detector.
///
/// Applies the centered difference along every row and the length-3 average
/// along every column; the composite kernel is the 3x3 vertical edge detector
/// normalized by 6.
pub fn detect_edge_vertical(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    separable_filter(src, dst, Kernel1d::Difference3, Kernel1d::Average3)
}

/// Detect horizontal edges with the separable 3x3 edge detector.
///
/// Applies the length-3 average along every row and the centered difference
/// along every column.
pub fn detect_edge_horizontal(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    separable_filter(src, dst, Kernel1d::Average3, Kernel1d::Difference3)
}

/// Detect vertical edges with the direct (non-separable) 3x3 convolution.
///
/// Reference implementation used to cross-validate the separable variant:
/// for every pixel the 3x3 mirror-extended neighborhood is summed literally
/// per the 2-D kernel and divided by 6.
pub fn detect_edge_vertical_direct(
    src: &Image<f64>,
    dst: &mut Image<f64>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    let mut arr = [[0.0f64; 3]; 3];
    for y in 0..src.rows() {
        for x in 0..src.cols() {
            src.get_neighborhood(x, y, &mut arr)?;
            let pixel = (arr[0][2] + arr[1][2] + arr[2][2] - arr[0][0] - arr[1][0] - arr[2][0]) / 6.0;
            dst.set_pixel(x, y, pixel)?;
        }
    }
    Ok(())
}

/// Detect horizontal edges with the direct (non-separable) 3x3 convolution.
pub fn detect_edge_horizontal_direct(
    src: &Image<f64>,
    dst: &mut Image<f64>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    let mut arr = [[0.0f64; 3]; 3];
    for y in 0..src.rows() {
        for x in 0..src.cols() {
            src.get_neighborhood(x, y, &mut arr)?;
            let pixel = (arr[2][0] + arr[2][1] + arr[2][2] - arr[0][0] - arr[0][1] - arr[0][2]) / 6.0;
            dst.set_pixel(x, y, pixel)?;
        }
    }
    Ok(())
}

/// Apply an LxL moving average with mirror borders, for any odd `length`.
///
/// Runs the general N-tap mirror average separably along rows and columns.
///
/// # Errors
///
/// Returns an error if `length` is even or zero, or the sizes differ.
pub fn moving_average(
    src: &Image<f64>,
    dst: &mut Image<f64>,
    length: usize,
) -> Result<(), ImageError> {
    separable_filter(
        src,
        dst,
        Kernel1d::Average(length),
        Kernel1d::Average(length),
    )
}

/// Apply the 5x5 moving average with mirror borders (separable).
pub fn moving_average5(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    moving_average(src, dst, 5)
}

/// Apply the 5x5 moving average with the direct (non-separable) convolution.
///
/// Reference implementation used to cross-validate the separable variant.
pub fn moving_average5_direct(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    let mut arr = [[0.0f64; 5]; 5];
    for y in 0..src.rows() {
        for x in 0..src.cols() {
            src.get_neighborhood(x, y, &mut arr)?;
            let mut sum = 0.0;
            for row in &arr {
                for val in row {
                    sum += val;
                }
            }
            dst.set_pixel(x, y, sum / 25.0)?;
        }
    }
    Ok(())
}

/// Compute the Sobel gradient magnitude.
///
/// The horizontal gradient applies the derivative taps along rows and the
/// smoothing taps along columns; the vertical gradient swaps the two. The
/// output is `sqrt(gx^2 + gy^2)` per pixel, with no normalization or
/// clamping; rescaling for display is the caller's concern.
pub fn sobel(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    let (smooth, deriv) = kernels::sobel_kernel_1d();

    let mut gx = Image::from_size_val(src.size(), 0.0)?;
    separable_filter(
        src,
        &mut gx,
        Kernel1d::Kernel3(deriv),
        Kernel1d::Kernel3(smooth),
    )?;

    let mut gy = Image::from_size_val(src.size(), 0.0)?;
    separable_filter(
        src,
        &mut gy,
        Kernel1d::Kernel3(smooth),
        Kernel1d::Kernel3(deriv),
    )?;

    parallel::par_iter_rows_val_two(&gx, &gy, dst, |&x, &y, out| {
        *out = (x * x + y * y).sqrt();
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pixlab_image::ImageSize;
    use rand::Rng;

    fn random_image(width: usize, height: usize) -> Result<Image<f64>, ImageError> {
        let mut rng = rand::rng();
        let data = (0..width * height)
            .map(|_| rng.random_range(0.0..255.0))
            .collect::<Vec<f64>>();
        Image::new(ImageSize { width, height }, data)
    }

    #[test]
    fn test_edge_vertical_separable_matches_direct() -> Result<(), ImageError> {
        let img = random_image(16, 12)?;
        let mut separable = Image::from_size_val(img.size(), 0.0)?;
        let mut direct = Image::from_size_val(img.size(), 0.0)?;

        detect_edge_vertical(&img, &mut separable)?;
        detect_edge_vertical_direct(&img, &mut direct)?;

        for (s, d) in separable.as_slice().iter().zip(direct.as_slice()) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_edge_horizontal_separable_matches_direct() -> Result<(), ImageError> {
        let img = random_image(11, 9)?;
        let mut separable = Image::from_size_val(img.size(), 0.0)?;
        let mut direct = Image::from_size_val(img.size(), 0.0)?;

        detect_edge_horizontal(&img, &mut separable)?;
        detect_edge_horizontal_direct(&img, &mut direct)?;

        for (s, d) in separable.as_slice().iter().zip(direct.as_slice()) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_moving_average5_separable_matches_direct() -> Result<(), ImageError> {
        // width and height larger than the kernel so interior and border
        // pixels are both exercised
        let img = random_image(13, 8)?;
        let mut separable = Image::from_size_val(img.size(), 0.0)?;
        let mut direct = Image::from_size_val(img.size(), 0.0)?;

        moving_average5(&img, &mut separable)?;
        moving_average5_direct(&img, &mut direct)?;

        for (s, d) in separable.as_slice().iter().zip(direct.as_slice()) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_cross_validation_at_corners() -> Result<(), ImageError> {
        // small image where every pixel is a border or corner pixel
        let img = random_image(3, 3)?;
        let mut separable = Image::from_size_val(img.size(), 0.0)?;
        let mut direct = Image::from_size_val(img.size(), 0.0)?;

        detect_edge_vertical(&img, &mut separable)?;
        detect_edge_vertical_direct(&img, &mut direct)?;
        for (s, d) in separable.as_slice().iter().zip(direct.as_slice()) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-9);
        }

        moving_average5(&img, &mut separable)?;
        moving_average5_direct(&img, &mut direct)?;
        for (s, d) in separable.as_slice().iter().zip(direct.as_slice()) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_edge_detector_on_vertical_step() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let img = Image::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            vec![
                0.0, 0.0, 10.0, 10.0,
                0.0, 0.0, 10.0, 10.0,
                0.0, 0.0, 10.0, 10.0,
            ],
        )?;

        let mut vertical = Image::from_size_val(img.size(), 0.0)?;
        detect_edge_vertical(&img, &mut vertical)?;
        // the step between columns 1 and 2 responds on both sides
        assert_abs_diff_eq!(vertical.get_pixel(1, 1)?, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertical.get_pixel(2, 1)?, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertical.get_pixel(0, 1)?, 0.0, epsilon = 1e-12);

        // no horizontal edges in a vertical step
        let mut horizontal = Image::from_size_val(img.size(), 0.0)?;
        detect_edge_horizontal(&img, &mut horizontal)?;
        for val in horizontal.as_slice() {
            assert_abs_diff_eq!(val, &0.0, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_moving_average_length_one_is_identity() -> Result<(), ImageError> {
        let img = random_image(6, 5)?;
        let mut dst = Image::from_size_val(img.size(), 0.0)?;
        moving_average(&img, &mut dst, 1)?;

        for (a, b) in dst.as_slice().iter().zip(img.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_moving_average_constant_image() -> Result<(), ImageError> {
        let img = Image::from_size_val(
            ImageSize {
                width: 9,
                height: 7,
            },
            42.0,
        )?;
        let mut dst = Image::from_size_val(img.size(), 0.0)?;
        moving_average(&img, &mut dst, 7)?;

        // the mirror border preserves constants exactly
        for val in dst.as_slice() {
            assert_abs_diff_eq!(val, &42.0, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_sobel_uniform_image_is_zero() -> Result<(), ImageError> {
        let img = Image::from_size_val(
            ImageSize {
                width: 8,
                height: 6,
            },
            77.0,
        )?;
        let mut dst = Image::from_size_val(img.size(), 0.0)?;
        sobel(&img, &mut dst)?;

        for val in dst.as_slice() {
            assert_abs_diff_eq!(val, &0.0, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_sobel_magnitude_is_nonnegative() -> Result<(), ImageError> {
        let img = random_image(10, 10)?;
        let mut dst = Image::from_size_val(img.size(), 0.0)?;
        sobel(&img, &mut dst)?;

        for val in dst.as_slice() {
            assert!(*val >= 0.0);
        }

        Ok(())
    }
}
