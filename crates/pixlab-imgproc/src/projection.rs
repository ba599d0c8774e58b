use num_traits::{Float, FromPrimitive};
use pixlab_image::{Image, ImageError};

fn check_stack<T>(stack: &[Image<T>], dst: &Image<T>) -> Result<(), ImageError> {
    let first = stack.first().ok_or(ImageError::EmptyZStack)?;
    for img in stack {
        if img.size() != first.size() {
            return Err(ImageError::InvalidImageSize(
                first.cols(),
                first.rows(),
                img.cols(),
                img.rows(),
            ));
        }
    }
    if dst.size() != first.size() {
        return Err(ImageError::InvalidImageSize(
            first.cols(),
            first.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Project a z-stack to its per-pixel maximum.
///
/// For every coordinate the output pixel is the maximum across all buffers
/// in the stack. The accumulator is seeded from the first buffer, so negative
/// sample values project correctly.
///
/// # Errors
///
/// Returns an error if the stack is empty or any buffer differs in size.
pub fn project_max<T>(stack: &[Image<T>], dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Copy + PartialOrd,
{
    check_stack(stack, dst)?;

    dst.as_slice_mut().copy_from_slice(stack[0].as_slice());
    for img in &stack[1..] {
        for (dst_pixel, &src_pixel) in dst.as_slice_mut().iter_mut().zip(img.as_slice()) {
            if src_pixel > *dst_pixel {
                *dst_pixel = src_pixel;
            }
        }
    }
    Ok(())
}

/// Project a z-stack to its per-pixel arithmetic mean.
///
/// # Errors
///
/// Returns an error if the stack is empty or any buffer differs in size.
pub fn project_mean<T>(stack: &[Image<T>], dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Float + FromPrimitive,
{
    check_stack(stack, dst)?;

    let count = T::from_usize(stack.len())
        .ok_or_else(|| ImageError::CastError(std::any::type_name::<T>().to_string()))?;

    for dst_pixel in dst.as_slice_mut() {
        *dst_pixel = T::zero();
    }
    for img in stack {
        for (dst_pixel, &src_pixel) in dst.as_slice_mut().iter_mut().zip(img.as_slice()) {
            *dst_pixel = *dst_pixel + src_pixel;
        }
    }
    for dst_pixel in dst.as_slice_mut() {
        *dst_pixel = *dst_pixel / count;
    }
    Ok(())
}
