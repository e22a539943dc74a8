use thiserror::Error;

use crate::view::TensorView;

/// Error type for tensor creation and manipulation.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of data elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Rows handed to [`Tensor::from_rows`] do not all have the same length.
    #[error("Ragged rows: row {row} has {actual} elements, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1, and each dimension's stride is the product of all
/// dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use datatrans_tensor::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape([2, 3]), [3, 1]);
/// assert_eq!(get_strides_from_shape([2, 3, 4]), [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

// row-major multi-index of the `i`-th logical element
fn unravel_index<const N: usize>(shape: &[usize; N], i: usize) -> [usize; N] {
    let mut index = [0; N];
    let mut j = i;
    for k in (0..N).rev() {
        index[k] = j % shape[k];
        j /= shape[k];
    }
    index
}

/// A multi-dimensional array with owned data.
///
/// `Tensor` combines a contiguous buffer, the shape and the memory layout (strides) into a
/// single structure with compile-time dimensionality checking.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions
///
/// # Thread Safety
///
/// Tensors are `Send` and `Sync` whenever `T` is.
///
/// # Examples
///
/// ```rust
/// use datatrans_tensor::Tensor2;
///
/// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.strides, [2, 1]);
/// ```
pub struct Tensor<T, const N: usize> {
    /// The storage of the tensor.
    pub storage: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Get the data of the tensor as a slice, in memory order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Get the data of the tensor as a mutable slice, in memory order.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.storage
    }

    /// Returns an iterator over the elements of the tensor in memory order.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::Tensor1;
    ///
    /// let t = Tensor1::<i32>::from_shape_vec([3], vec![1, 2, 3]).unwrap();
    /// assert_eq!(t.iter().sum::<i32>(), 6);
    /// ```
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.iter()
    }

    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error
    /// is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::{Tensor2, TensorError};
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.shape, [2, 2]);
    ///
    /// let err = Tensor2::<u8>::from_shape_vec([2, 3], vec![1, 2, 3, 4]);
    /// assert_eq!(err.err(), Some(TensorError::invalid_shape(6, 4)));
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        let strides = get_strides_from_shape(shape);
        Ok(Self {
            storage: data,
            shape,
            strides,
        })
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error
    /// is returned.
    pub fn from_shape_slice(shape: [usize; N], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with the given shape, filled with `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::{Tensor1, Tensor2};
    ///
    /// let t = Tensor1::<u8>::from_shape_val([4], 0);
    /// assert_eq!(t.as_slice(), &[0, 0, 0, 0]);
    ///
    /// let t = Tensor2::<u8>::from_shape_val([2, 2], 1);
    /// assert_eq!(t.as_slice(), &[1, 1, 1, 1]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of the element to generate.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::{Tensor1, Tensor2};
    ///
    /// let t = Tensor1::<u8>::from_shape_fn([4], |[i]| i as u8);
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    ///
    /// let t = Tensor2::<u8>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8);
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Self
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel).map(|i| f(unravel_index(&shape, i))).collect();
        Self {
            storage: data,
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the tensor holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get the offset of the element at the given index, or `None` if any index is out of
    /// bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the offset of the element at the given index without checking dim sizes.
    pub fn get_iter_offset_unchecked(&self, index: [usize; N]) -> usize {
        let mut offset = 0;
        for (&idx, stride) in index.iter().zip(self.strides) {
            offset += idx * stride;
        }
        offset
    }

    /// Get the element at the given index without checking the dim sizes.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset falls outside the storage.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(*t.get_unchecked([0, 1]), 2);
    /// assert_eq!(*t.get_unchecked([1, 0]), 3);
    /// ```
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        &self.storage[self.get_iter_offset_unchecked(index)]
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get([1, 1]), Some(&4));
    /// assert!(t.get([2, 0]).is_none());
    /// ```
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|i| self.storage.get(i))
    }

    /// Permutes (reorders) the dimensions of the tensor.
    ///
    /// This is a zero-copy operation: only the shape and strides are reordered.
    /// `axes[i]` names the source dimension that becomes the i-th output dimension.
    ///
    /// # Panics
    ///
    /// Panics if any entry of `axes` is `>= N`.
    pub fn permute_axes(&self, axes: [usize; N]) -> TensorView<'_, T, N> {
        let mut new_shape = [0; N];
        let mut new_strides = [0; N];
        for (i, &axis) in axes.iter().enumerate() {
            new_shape[i] = self.shape[axis];
            new_strides[i] = self.strides[axis];
        }

        TensorView {
            storage: &self.storage,
            shape: new_shape,
            strides: new_strides,
        }
    }

    /// Return a view of the tensor with the same shape and strides.
    pub fn view(&self) -> TensorView<'_, T, N> {
        TensorView {
            storage: &self.storage,
            shape: self.shape,
            strides: self.strides,
        }
    }
}

impl<T> Tensor<T, 2> {
    /// Build a matrix from rows of equal length.
    ///
    /// An empty list of rows yields a `[0, 0]` tensor.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::RaggedRows`] naming the first row whose length differs from the
    /// first row's.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_tensor::{Tensor2, TensorError};
    ///
    /// let m = Tensor2::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(m.shape, [2, 3]);
    ///
    /// let ragged = Tensor2::from_rows(&[vec![1, 2], vec![3]]);
    /// assert!(matches!(ragged, Err(TensorError::RaggedRows { row: 1, .. })));
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, TensorError>
    where
        R: AsRef<[T]>,
        T: Clone,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(TensorError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Self::from_shape_vec([rows.len(), cols], data)
    }

    /// Copy the matrix out as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        let [rows, cols] = self.shape;
        (0..rows)
            .map(|r| (0..cols).map(|c| self.get_unchecked([r, c]).clone()).collect())
            .collect()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape[1]
    }
}

impl<T, const N: usize> Clone for Tensor<T, N>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
            strides: self.strides,
        }
    }
}

impl<T, const N: usize> std::fmt::Debug for Tensor<T, N>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("storage", &self.storage)
            .finish()
    }
}

/// Tensors compare equal when their shapes match and every logical element is equal,
/// regardless of strides.
impl<T, const N: usize> PartialEq for Tensor<T, N>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && (0..self.numel()).all(|i| {
                let index = unravel_index(&self.shape, i);
                self.get_unchecked(index) == other.get_unchecked(index)
            })
    }
}
