use datatrans_tensor::Tensor2;
use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

/// Flip a matrix horizontally, reversing the order of its columns.
///
/// # Arguments
///
/// * `src` - The input matrix with shape (H, W).
///
/// # Returns
///
/// The flipped matrix, in standard layout.
///
/// # Example
///
/// ```
/// use datatrans_tensor::Tensor2;
/// use datatrans_ops::flip::horizontal_flip;
///
/// let m = Tensor2::<i32>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let flipped = horizontal_flip(&m);
/// assert_eq!(flipped.as_slice(), &[3, 2, 1, 6, 5, 4]);
/// ```
pub fn horizontal_flip<T>(src: &Tensor2<T>) -> Tensor2<T>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.view().as_contiguous();
    if dst.cols() == 0 {
        return dst;
    }

    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .for_each(|row| row.reverse());

    dst
}

/// Flip a matrix vertically, reversing the order of its rows.
///
/// # Example
///
/// ```
/// use datatrans_tensor::Tensor2;
/// use datatrans_ops::flip::vertical_flip;
///
/// let m = Tensor2::<i32>::from_shape_vec([3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let flipped = vertical_flip(&m);
/// assert_eq!(flipped.as_slice(), &[5, 6, 3, 4, 1, 2]);
/// ```
pub fn vertical_flip<T>(src: &Tensor2<T>) -> Tensor2<T>
where
    T: Clone,
{
    let mut dst = src.view().as_contiguous();
    let (rows, cols) = (dst.rows(), dst.cols());
    let data = dst.as_slice_mut();

    for k in 0..rows / 2 {
        let j = rows - 1 - k;
        for c in 0..cols {
            data.swap(k * cols + c, j * cols + c);
        }
    }

    dst
}

/// Flip a convolution kernel along both axes.
///
/// The input is left untouched; the flipped copy is what turns a sliding weighted sum into
/// a true convolution.
///
/// # Example
///
/// ```
/// use datatrans_tensor::Tensor2;
/// use datatrans_ops::flip::flip_kernel;
///
/// let k = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(flip_kernel(&k).as_slice(), &[4, 3, 2, 1]);
/// ```
pub fn flip_kernel<T>(kernel: &Tensor2<T>) -> Tensor2<T>
where
    T: Clone,
{
    // reversing a row-major buffer reverses both axes at once
    let mut dst = kernel.view().as_contiguous();
    dst.as_slice_mut().reverse();
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use datatrans_tensor::TensorError;

    #[test]
    fn test_hflip() -> Result<(), TensorError> {
        let m = Tensor2::<u8>::from_shape_vec([3, 2], vec![0, 1, 2, 3, 4, 5])?;
        let flipped = horizontal_flip(&m);
        assert_eq!(flipped.shape, [3, 2]);
        assert_eq!(flipped.as_slice(), &[1, 0, 3, 2, 5, 4]);
        assert_eq!(horizontal_flip(&flipped), m);
        Ok(())
    }

    #[test]
    fn test_vflip() -> Result<(), TensorError> {
        let m = Tensor2::<u8>::from_shape_vec([3, 2], vec![0, 1, 2, 3, 4, 5])?;
        let flipped = vertical_flip(&m);
        assert_eq!(flipped.as_slice(), &[4, 5, 2, 3, 0, 1]);
        assert_eq!(vertical_flip(&flipped), m);
        Ok(())
    }

    #[test]
    fn test_flip_kernel_is_both_flips() -> Result<(), TensorError> {
        let k = Tensor2::<f32>::from_shape_fn([3, 4], |[r, c]| (r * 4 + c) as f32);
        let both = vertical_flip(&horizontal_flip(&k));
        assert_eq!(flip_kernel(&k), both);
        // the source kernel is left untouched
        assert_eq!(k.as_slice()[0], 0.0);
        Ok(())
    }

    #[test]
    fn test_flip_transposed_view() -> Result<(), TensorError> {
        let m = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4])?;
        let mut strided = m.clone();
        strided.strides = [1, 2];
        // logical [[1, 3], [2, 4]]
        assert_eq!(horizontal_flip(&strided).as_slice(), &[3, 1, 4, 2]);
        assert_eq!(flip_kernel(&strided).as_slice(), &[4, 2, 3, 1]);
        Ok(())
    }

    #[test]
    fn test_flip_empty() -> Result<(), TensorError> {
        let m = Tensor2::<u8>::from_shape_vec([2, 0], vec![])?;
        assert_eq!(horizontal_flip(&m).shape, [2, 0]);
        assert_eq!(vertical_flip(&m).shape, [2, 0]);
        Ok(())
    }
}
