use pixlab_image::{mirror_index, ImageError};

/// Apply a moving average of odd length to a 1-D signal with mirror borders.
///
/// Each output sample is the mean of the `length` input samples centered at
/// that index. Out-of-range taps are resolved with
/// [`mirror_index`], reflecting around the boundary
/// samples.
///
/// # Arguments
///
/// * `vin` - The input signal.
/// * `vout` - The output signal, same length as the input.
/// * `length` - The averaging window length, a positive odd number.
///
/// # Errors
///
/// Returns an error if `length` is even or zero, or if the input and output
/// lengths differ.
pub fn moving_average_1d(vin: &[f64], vout: &mut [f64], length: usize) -> Result<(), ImageError> {
    if length == 0 || length % 2 == 0 {
        return Err(ImageError::InvalidKernelLength(length));
    }
    if vin.len() != vout.len() {
        return Err(ImageError::InvalidBufferLength(vout.len(), vin.len()));
    }
    if vin.is_empty() {
        return Ok(());
    }

    let n = vin.len();
    let half = (length / 2) as isize;
    let norm = length as f64;
    for (k, out) in vout.iter_mut().enumerate() {
        let mut sum = 0.0;
        for j in -half..=half {
            sum += vin[mirror_index(k as isize + j, n)];
        }
        *out = sum / norm;
    }
    Ok(())
}

/// Apply a 1-D average filter of length 3 with mirror borders.
///
/// Boundary samples double-weight the reflected neighbor:
/// `out[0] = (in[0] + 2*in[1]) / 3`.
pub fn average_3(vin: &[f64], vout: &mut [f64]) -> Result<(), ImageError> {
    moving_average_1d(vin, vout, 3)
}

/// Apply a 1-D average filter of length 5 with mirror borders.
pub fn average_5(vin: &[f64], vout: &mut [f64]) -> Result<(), ImageError> {
    moving_average_1d(vin, vout, 5)
}

/// Apply a 1-D centered difference filter of length 3.
///
/// Interior samples are `(in[k+1] - in[k-1]) / 2`; the boundary outputs are
/// zero, which is what the mirror border reduces the centered difference to.
///
/// # Errors
///
/// Returns an error if the input and output lengths differ.
pub fn difference_3(vin: &[f64], vout: &mut [f64]) -> Result<(), ImageError> {
    if vin.len() != vout.len() {
        return Err(ImageError::InvalidBufferLength(vout.len(), vin.len()));
    }
    if vin.is_empty() {
        return Ok(());
    }

    let n = vin.len();
    vout[0] = 0.0;
    for k in 1..n.saturating_sub(1) {
        vout[k] = (vin[k + 1] - vin[k - 1]) / 2.0;
    }
    vout[n - 1] = 0.0;
    Ok(())
}

/// Convolve a 1-D signal with an arbitrary 3-tap kernel, replicating the edge
/// samples beyond the boundary.
///
/// This is a distinct border policy from the mirror rule used by the
/// averaging filters: the first and last samples are reused for out-of-range
/// taps (clamp-to-edge). It is the policy applied to generic kernels such as
/// the Sobel taps.
///
/// # Errors
///
/// Returns an error if the input and output lengths differ.
pub fn convolve_3(vin: &[f64], vout: &mut [f64], kernel: &[f64; 3]) -> Result<(), ImageError> {
    if vin.len() != vout.len() {
        return Err(ImageError::InvalidBufferLength(vout.len(), vin.len()));
    }
    if vin.is_empty() {
        return Ok(());
    }

    let n = vin.len();
    if n == 1 {
        vout[0] = (kernel[0] + kernel[1] + kernel[2]) * vin[0];
        return Ok(());
    }

    vout[0] = kernel[0] * vin[0] + kernel[1] * vin[0] + kernel[2] * vin[1];
    for k in 1..n - 1 {
        vout[k] = kernel[0] * vin[k - 1] + kernel[1] * vin[k] + kernel[2] * vin[k + 1];
    }
    vout[n - 1] = kernel[0] * vin[n - 2] + kernel[1] * vin[n - 1] + kernel[2] * vin[n - 1];
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_3_mirror_boundary() -> Result<(), ImageError> {
        let vin = [10.0, 20.0, 30.0];
        let mut vout = [0.0; 3];
        average_3(&vin, &mut vout)?;

        assert!((vout[0] - 50.0 / 3.0).abs() < 1e-12);
        assert!((vout[1] - 20.0).abs() < 1e-12);
        assert!((vout[2] - 70.0 / 3.0).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_difference_3_zero_at_boundary() -> Result<(), ImageError> {
        let vin = [10.0, 20.0, 30.0, 40.0];
        let mut vout = [0.0; 4];
        difference_3(&vin, &mut vout)?;

        assert_eq!(vout, [0.0, 10.0, 10.0, 0.0]);

        Ok(())
    }

    #[test]
    fn test_average_5_reduces_to_full_mean_at_center() -> Result<(), ImageError> {
        let vin = [10.0, 20.0, 30.0, 40.0, 50.0];
        let mut vout = [0.0; 5];
        average_5(&vin, &mut vout)?;

        // hand-computed mirror reflections at the borders
        assert!((vout[0] - 22.0).abs() < 1e-12);
        assert!((vout[1] - 24.0).abs() < 1e-12);
        assert!((vout[2] - 30.0).abs() < 1e-12);
        assert!((vout[3] - 36.0).abs() < 1e-12);
        assert!((vout[4] - 38.0).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_moving_average_length_one_is_identity() -> Result<(), ImageError> {
        let vin = [3.0, -1.0, 4.0];
        let mut vout = [0.0; 3];
        moving_average_1d(&vin, &mut vout, 1)?;
        assert_eq!(vout, vin);

        Ok(())
    }

    #[test]
    fn test_moving_average_matches_explicit_taps() -> Result<(), ImageError> {
        // general primitive must reproduce the length-3 special case
        let vin = [1.0, 5.0, 2.0, 8.0, 3.0, 9.0];
        let mut general = [0.0; 6];
        moving_average_1d(&vin, &mut general, 3)?;

        let mut expected = [0.0; 6];
        expected[0] = (vin[0] + 2.0 * vin[1]) / 3.0;
        for k in 1..5 {
            expected[k] = (vin[k - 1] + vin[k] + vin[k + 1]) / 3.0;
        }
        expected[5] = (vin[5] + 2.0 * vin[4]) / 3.0;

        for (g, e) in general.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_moving_average_rejects_even_length() {
        let vin = [1.0, 2.0];
        let mut vout = [0.0; 2];
        assert_eq!(
            moving_average_1d(&vin, &mut vout, 4),
            Err(ImageError::InvalidKernelLength(4))
        );
        assert_eq!(
            moving_average_1d(&vin, &mut vout, 0),
            Err(ImageError::InvalidKernelLength(0))
        );
    }

    #[test]
    fn test_convolve_3_identity_kernel() -> Result<(), ImageError> {
        let vin = [4.0, 7.0, 1.0, 9.0];
        let mut vout = [0.0; 4];
        convolve_3(&vin, &mut vout, &[0.0, 1.0, 0.0])?;
        assert_eq!(vout, vin);

        Ok(())
    }

    #[test]
    fn test_convolve_3_replicates_edges() -> Result<(), ImageError> {
        let vin = [10.0, 20.0, 30.0];
        let mut vout = [0.0; 3];
        convolve_3(&vin, &mut vout, &[1.0, 0.0, 0.0])?;
        // the left tap clamps to the first sample at the boundary
        assert_eq!(vout, [10.0, 10.0, 20.0]);

        convolve_3(&vin, &mut vout, &[0.0, 0.0, 1.0])?;
        assert_eq!(vout, [20.0, 30.0, 30.0]);

        Ok(())
    }

    #[test]
    fn test_length_mismatch() {
        let vin = [1.0, 2.0, 3.0];
        let mut vout = [0.0; 2];
        assert_eq!(
            average_3(&vin, &mut vout),
            Err(ImageError::InvalidBufferLength(2, 3))
        );
    }
}
