use datatrans_tensor::Tensor2;

use crate::error::OpsError;

/// Transpose a matrix given as rows.
///
/// Row `i` of the result holds column `i` of the input, so an R×C input yields a C×R output.
///
/// # Arguments
///
/// * `rows` - The input matrix, one entry per row. All rows must have the same length.
///
/// # Returns
///
/// The transposed matrix as a fresh vector of rows.
///
/// # Errors
///
/// * [`OpsError::EmptyInput`] if there are no rows or the rows are empty.
/// * [`OpsError::ShapeMismatch`] if the rows differ in length.
///
/// # Example
///
/// ```
/// use datatrans_ops::transpose::transpose2d;
///
/// let t = transpose2d(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
/// assert_eq!(t, vec![vec![1, 3, 5], vec![2, 4, 6]]);
/// ```
pub fn transpose2d<T, R>(rows: &[R]) -> Result<Vec<Vec<T>>, OpsError>
where
    T: Clone,
    R: AsRef<[T]>,
{
    let src = Tensor2::from_rows(rows)?;
    Ok(transpose(&src)?.to_rows())
}

/// Transpose a 2D tensor into a new standard-layout tensor.
///
/// # Errors
///
/// [`OpsError::EmptyInput`] if either dimension is zero.
///
/// # Example
///
/// ```
/// use datatrans_tensor::Tensor2;
/// use datatrans_ops::transpose::transpose;
///
/// let m = Tensor2::<f32>::from_shape_vec([1, 3], vec![1.0, 2.0, 3.0]).unwrap();
/// let t = transpose(&m).unwrap();
/// assert_eq!(t.shape, [3, 1]);
/// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
/// ```
pub fn transpose<T>(src: &Tensor2<T>) -> Result<Tensor2<T>, OpsError>
where
    T: Clone,
{
    if src.rows() == 0 || src.cols() == 0 {
        return Err(OpsError::EmptyInput("transpose input"));
    }

    log::trace!("transpose {:?} -> [{}, {}]", src.shape, src.cols(), src.rows());

    Ok(src.permute_axes([1, 0]).as_contiguous())
}
