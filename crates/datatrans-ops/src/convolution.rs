use std::ops::{Add, Mul};

use datatrans_tensor::Tensor2;
use num_traits::Zero;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::{error::OpsError, flip::flip_kernel, params::ConvolutionParams};

/// Shape of a valid (no padding) strided convolution.
///
/// Returns `[(Hi - Hk) / s + 1, (Wi - Wk) / s + 1]`, or `[0, 0]` when the kernel does not fit
/// in the input or the stride is 0.
///
/// # Example
///
/// ```
/// use datatrans_ops::convolution::convolution_output_shape;
///
/// assert_eq!(convolution_output_shape([3, 3], [2, 2], 1), [2, 2]);
/// assert_eq!(convolution_output_shape([3, 3], [1, 1], 2), [2, 2]);
/// assert_eq!(convolution_output_shape([3, 3], [4, 1], 1), [0, 0]);
/// ```
pub fn convolution_output_shape(input: [usize; 2], kernel: [usize; 2], stride: usize) -> [usize; 2] {
    if stride == 0 || kernel[0] > input[0] || kernel[1] > input[1] {
        return [0, 0];
    }
    [
        (input[0] - kernel[0]) / stride + 1,
        (input[1] - kernel[1]) / stride + 1,
    ]
}

/// Compute the 2D convolution of a matrix with a kernel.
///
/// The kernel is flipped along both axes before sliding, so this is a true convolution and
/// not a cross-correlation. Output cell `(r, c)` is the sum of the elementwise product of the
/// flipped kernel with the input window at rows `[r * stride, r * stride + Hk)` and columns
/// `[c * stride, c * stride + Wk)`.
///
/// # Arguments
///
/// * `src` - The input matrix with shape (Hi, Wi).
/// * `kernel` - The kernel with shape (Hk, Wk).
/// * `stride` - Step between successive kernel positions, along both axes.
///
/// # Returns
///
/// A new matrix with shape given by [`convolution_output_shape`]. A kernel larger than the
/// input yields an empty `[0, 0]` matrix.
///
/// # Errors
///
/// * [`OpsError::InvalidParameter`] if `stride` is 0.
/// * [`OpsError::EmptyInput`] if the kernel has no rows or no columns.
///
/// # Example
///
/// ```
/// use datatrans_tensor::Tensor2;
/// use datatrans_ops::convolution::convolution2d;
///
/// let src = Tensor2::<f32>::from_shape_fn([3, 3], |[r, c]| (r * 3 + c + 1) as f32);
/// let kernel = Tensor2::<f32>::from_shape_val([2, 2], 1.0);
///
/// let dst = convolution2d(&src, &kernel, 1).unwrap();
/// assert_eq!(dst.shape, [2, 2]);
/// assert_eq!(dst.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
/// ```
pub fn convolution2d<T>(
    src: &Tensor2<T>,
    kernel: &Tensor2<T>,
    stride: usize,
) -> Result<Tensor2<T>, OpsError>
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync,
{
    convolution2d_with(src, kernel, &ConvolutionParams { stride })
}

/// Same as [`convolution2d`], with the stride carried by a [`ConvolutionParams`].
pub fn convolution2d_with<T>(
    src: &Tensor2<T>,
    kernel: &Tensor2<T>,
    params: &ConvolutionParams,
) -> Result<Tensor2<T>, OpsError>
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync,
{
    params.validate()?;
    if kernel.rows() == 0 || kernel.cols() == 0 {
        return Err(OpsError::EmptyInput("convolution kernel"));
    }

    let stride = params.stride;
    let [out_rows, out_cols] = convolution_output_shape(src.shape, kernel.shape, stride);
    if out_rows == 0 || out_cols == 0 {
        log::debug!(
            "convolution2d: kernel {:?} does not fit in input {:?}",
            kernel.shape,
            src.shape
        );
        return Ok(Tensor2::zeros([0, 0]));
    }

    log::debug!(
        "convolution2d: input {:?} kernel {:?} stride {stride} -> [{out_rows}, {out_cols}]",
        src.shape,
        kernel.shape
    );

    let weights = flip_kernel(kernel);
    let kw = weights.cols();
    let weights = weights.as_slice();

    let [row_stride, col_stride] = src.strides;
    let data = src.as_slice();

    let mut dst = Tensor2::<T>::zeros([out_rows, out_cols]);

    dst.as_slice_mut()
        .par_chunks_exact_mut(out_cols)
        .enumerate()
        .for_each(|(r, dst_row)| {
            let row0 = r * stride;
            for (c, out) in dst_row.iter_mut().enumerate() {
                let col0 = c * stride;
                let mut acc = T::zero();
                for (ki, w_row) in weights.chunks_exact(kw).enumerate() {
                    let base = (row0 + ki) * row_stride;
                    for (kj, &w) in w_row.iter().enumerate() {
                        acc = acc + data[base + (col0 + kj) * col_stride] * w;
                    }
                }
                *out = acc;
            }
        });

    Ok(dst)
}

/// Convolve a matrix given as rows with a kernel given as rows.
///
/// Thin wrapper over [`convolution2d`] for callers holding nested vectors.
///
/// # Errors
///
/// * [`OpsError::ShapeMismatch`] if the rows of the input or of the kernel differ in length.
/// * Any error of [`convolution2d`].
///
/// # Example
///
/// ```
/// use datatrans_ops::convolution::convolution2d_rows;
///
/// let src = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
/// let dst = convolution2d_rows(&src, &[[1]], 2).unwrap();
/// assert_eq!(dst, vec![vec![1, 3], vec![7, 9]]);
/// ```
pub fn convolution2d_rows<T, R, K>(
    rows: &[R],
    kernel: &[K],
    stride: usize,
) -> Result<Vec<Vec<T>>, OpsError>
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync,
    R: AsRef<[T]>,
    K: AsRef<[T]>,
{
    let src = Tensor2::from_rows(rows)?;
    let kernel = Tensor2::from_rows(kernel)?;
    Ok(convolution2d(&src, &kernel, stride)?.to_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(rows: usize, cols: usize) -> Tensor2<f64> {
        Tensor2::from_shape_fn([rows, cols], |[r, c]| (r * cols + c + 1) as f64)
    }

    #[test]
    fn test_conv_ones_2x2() -> Result<(), OpsError> {
        let kernel = Tensor2::from_shape_val([2, 2], 1.0);
        let dst = convolution2d(&grid(3, 3), &kernel, 1)?;
        assert_eq!(dst.shape, [2, 2]);
        assert_eq!(dst.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
        Ok(())
    }

    #[test]
    fn test_conv_ones_1x1_stride_2() -> Result<(), OpsError> {
        let kernel = Tensor2::from_shape_val([1, 1], 1.0);
        let dst = convolution2d(&grid(3, 3), &kernel, 2)?;
        assert_eq!(dst.to_rows(), vec![vec![1.0, 3.0], vec![7.0, 9.0]]);
        Ok(())
    }

    #[test]
    fn test_conv_flipped_kernel() -> Result<(), OpsError> {
        let kernel = Tensor2::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        let dst = convolution2d(&grid(4, 4), &kernel, 1)?;
        let expected = [26.0, 36.0, 46.0, 66.0, 76.0, 86.0, 106.0, 116.0, 126.0];
        assert_eq!(dst.shape, [3, 3]);
        for (a, b) in dst.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(a, b);
        }
        Ok(())
    }

    #[test]
    fn test_conv_is_not_correlation() -> Result<(), OpsError> {
        let src = Tensor2::<i32>::from_shape_vec([1, 2], vec![1, 0])?;
        let kernel = Tensor2::<i32>::from_shape_vec([1, 2], vec![1, 2])?;
        // correlation would give 1 * 1 + 0 * 2 = 1
        assert_eq!(convolution2d(&src, &kernel, 1)?.as_slice(), &[2]);
        Ok(())
    }

    #[test]
    fn test_conv_same_size_kernel() -> Result<(), OpsError> {
        let src = grid(3, 2);
        let dst = convolution2d(&src, &src, 1)?;
        assert_eq!(dst.shape, [1, 1]);
        // flipped self-product: 1*6 + 2*5 + 3*4 + 4*3 + 5*2 + 6*1
        assert_relative_eq!(dst.as_slice()[0], 56.0);
        Ok(())
    }

    #[test]
    fn test_conv_output_shape_strided() -> Result<(), OpsError> {
        let kernel = Tensor2::from_shape_val([2, 3], 0.5);
        let dst = convolution2d(&grid(7, 9), &kernel, 3)?;
        assert_eq!(dst.shape, convolution_output_shape([7, 9], [2, 3], 3));
        assert_eq!(dst.shape, [2, 3]);
        Ok(())
    }

    #[test]
    fn test_conv_kernel_too_large() -> Result<(), OpsError> {
        let dst = convolution2d(&grid(2, 2), &grid(3, 1), 1)?;
        assert_eq!(dst.shape, [0, 0]);
        assert!(dst.is_empty());
        let dst = convolution2d(&grid(2, 2), &grid(1, 3), 1)?;
        assert_eq!(dst.shape, [0, 0]);
        Ok(())
    }

    #[test]
    fn test_conv_invalid() {
        let src = grid(3, 3);
        assert_eq!(
            convolution2d(&src, &grid(1, 1), 0),
            Err(OpsError::InvalidParameter {
                name: "stride",
                value: 0
            })
        );
        assert_eq!(
            convolution2d(&src, &grid(0, 2), 1),
            Err(OpsError::EmptyInput("convolution kernel"))
        );
    }

    #[test]
    fn test_conv_inputs_untouched() -> Result<(), OpsError> {
        let src = grid(4, 4);
        let kernel = grid(2, 2);
        let first = convolution2d(&src, &kernel, 1)?;
        let second = convolution2d(&src, &kernel, 1)?;
        assert_eq!(first, second);
        assert_eq!(src, grid(4, 4));
        assert_eq!(kernel, grid(2, 2));
        Ok(())
    }

    #[test]
    fn test_conv_strided_input() -> Result<(), OpsError> {
        let src = grid(3, 3);
        let mut transposed = src.clone();
        transposed.strides = [1, 3];
        let kernel = Tensor2::from_shape_val([2, 1], 1.0);
        // logical input is [[1, 4, 7], [2, 5, 8], [3, 6, 9]]
        let dst = convolution2d(&transposed, &kernel, 1)?;
        assert_eq!(dst.to_rows(), vec![vec![3.0, 9.0, 15.0], vec![5.0, 11.0, 17.0]]);
        Ok(())
    }

    #[test]
    fn test_conv_rows() -> Result<(), OpsError> {
        let src = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];
        let dst = convolution2d_rows(&src, &[vec![1, 1], vec![1, 1]], 1)?;
        assert_eq!(dst, vec![vec![12, 16], vec![24, 28]]);

        let ragged = convolution2d_rows(&[vec![1, 2], vec![3]], &[vec![1]], 1);
        assert!(matches!(ragged, Err(OpsError::ShapeMismatch { row: 1, .. })));

        let too_large = convolution2d_rows(&src, &[[1; 4]], 1)?;
        assert!(too_large.is_empty());
        Ok(())
    }
}
