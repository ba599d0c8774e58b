use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixlab_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Resolve an out-of-range index by mirror reflection.
///
/// Indices are reflected around the boundary samples, so index `-1` maps to
/// `1` and index `len` maps to `len - 2`, folding repeatedly until the index
/// lands inside `[0, len)`. A sequence of length one maps every index to `0`.
///
/// # Examples
///
/// ```
/// use pixlab_image::mirror_index;
///
/// assert_eq!(mirror_index(-1, 5), 1);
/// assert_eq!(mirror_index(5, 5), 3);
/// assert_eq!(mirror_index(2, 5), 2);
/// ```
pub fn mirror_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let folded = index.rem_euclid(period);
    if folded >= len as isize {
        (period - folded) as usize
    } else {
        folded as usize
    }
}

/// A single-channel 2-D grid of samples with fixed dimensions.
///
/// Samples are stored in row-major order. Dimensions are fixed at
/// construction; all coordinate-based accessors are bounds-checked and fail
/// with an [`ImageError`] rather than reading or writing out of range. Cloning
/// the image duplicates the underlying pixel data.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data in row-major order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or if
    /// either dimension is zero, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixlab_image::{Image, ImageSize};
    ///
    /// let image = Image::<f64>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0.0; 10 * 20],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroImageDimensions(size.width, size.height));
        }
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height,
            ));
        }
        Ok(Self { size, data })
    }

    /// Create a new image with the given size, filled with a constant value.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the total number of pixels in the image.
    pub fn num_pixels(&self) -> usize {
        self.size.width * self.size.height
    }

    /// Get the pixel data as a slice in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable slice in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the pixel value at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the image bounds.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        self.check_coords(x, y)?;
        Ok(self.data[y * self.size.width + x])
    }

    /// Set the pixel value at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the image bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: T) -> Result<(), ImageError> {
        self.check_coords(x, y)?;
        self.data[y * self.size.width + x] = val;
        Ok(())
    }

    /// Copy the row at index `y` into the given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the row index is out of bounds or the buffer
    /// length does not match the image width.
    pub fn get_row(&self, y: usize, row: &mut [T]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if y >= self.size.height {
            return Err(ImageError::RowIndexOutOfBounds(y, self.size.height));
        }
        if row.len() != self.size.width {
            return Err(ImageError::InvalidBufferLength(row.len(), self.size.width));
        }
        let offset = y * self.size.width;
        row.copy_from_slice(&self.data[offset..offset + self.size.width]);
        Ok(())
    }

    /// Write the given buffer into the row at index `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the row index is out of bounds or the buffer
    /// length does not match the image width.
    pub fn put_row(&mut self, y: usize, row: &[T]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if y >= self.size.height {
            return Err(ImageError::RowIndexOutOfBounds(y, self.size.height));
        }
        if row.len() != self.size.width {
            return Err(ImageError::InvalidBufferLength(row.len(), self.size.width));
        }
        let offset = y * self.size.width;
        self.data[offset..offset + self.size.width].copy_from_slice(row);
        Ok(())
    }

    /// Copy the column at index `x` into the given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the column index is out of bounds or the buffer
    /// length does not match the image height.
    pub fn get_col(&self, x: usize, col: &mut [T]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if x >= self.size.width {
            return Err(ImageError::ColumnIndexOutOfBounds(x, self.size.width));
        }
        if col.len() != self.size.height {
            return Err(ImageError::InvalidBufferLength(col.len(), self.size.height));
        }
        for (y, val) in col.iter_mut().enumerate() {
            *val = self.data[y * self.size.width + x];
        }
        Ok(())
    }

    /// Write the given buffer into the column at index `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column index is out of bounds or the buffer
    /// length does not match the image height.
    pub fn put_col(&mut self, x: usize, col: &[T]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if x >= self.size.width {
            return Err(ImageError::ColumnIndexOutOfBounds(x, self.size.width));
        }
        if col.len() != self.size.height {
            return Err(ImageError::InvalidBufferLength(col.len(), self.size.height));
        }
        for (y, &val) in col.iter().enumerate() {
            self.data[y * self.size.width + x] = val;
        }
        Ok(())
    }

    /// Copy the KxK neighborhood centered at `(x, y)` into `out`.
    ///
    /// `out[j][i]` holds the sample at `(x + i - K/2, y + j - K/2)`.
    /// Coordinates outside the image are resolved with [`mirror_index`].
    ///
    /// # Errors
    ///
    /// Returns an error if `K` is not a positive odd number or the center
    /// coordinates are outside the image bounds.
    pub fn get_neighborhood<const K: usize>(
        &self,
        x: usize,
        y: usize,
        out: &mut [[T; K]; K],
    ) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if K == 0 || K % 2 == 0 {
            return Err(ImageError::InvalidKernelLength(K));
        }
        self.check_coords(x, y)?;
        let half = (K / 2) as isize;
        for (j, row) in out.iter_mut().enumerate() {
            let yy = mirror_index(y as isize + j as isize - half, self.size.height);
            let offset = yy * self.size.width;
            for (i, val) in row.iter_mut().enumerate() {
                let xx = mirror_index(x as isize + i as isize - half, self.size.width);
                *val = self.data[offset + xx];
            }
        }
        Ok(())
    }

    /// Get the minimum and maximum pixel values of the image.
    pub fn min_max(&self) -> (T, T)
    where
        T: Copy + PartialOrd,
    {
        // construction guarantees at least one pixel
        let mut min = self.data[0];
        let mut max = self.data[0];
        for &val in &self.data[1..] {
            if val < min {
                min = val;
            }
            if val > max {
                max = val;
            }
        }
        (min, max)
    }

    fn check_coords(&self, x: usize, y: usize) -> Result<(), ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(())
    }
}
