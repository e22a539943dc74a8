use crate::{get_strides_from_shape, Tensor};

/// A non-owning view into tensor data.
///
/// `TensorView` borrows the storage of a [`Tensor`] with its own shape and strides, which
/// makes axis permutation free. Converting back to an owned, row-major tensor
/// goes through [`TensorView::as_contiguous`].
///
/// # Examples
///
/// ```rust
/// use datatrans_tensor::Tensor2;
///
/// let tensor = Tensor2::<i32>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
///
/// // Permute creates a non-contiguous view
/// let view = tensor.permute_axes([1, 0]);
/// assert_eq!(view.shape, [3, 2]);
/// assert_eq!(*view.get_unchecked([2, 0]), 3);
///
/// // Convert to an owned contiguous tensor
/// let contiguous = view.as_contiguous();
/// assert_eq!(contiguous.as_slice(), &[1, 4, 2, 5, 3, 6]);
/// ```
pub struct TensorView<'a, T, const N: usize> {
    /// Reference to the storage held by another tensor.
    pub storage: &'a [T],

    /// The shape of the tensor view.
    pub shape: [usize; N],

    /// The strides for accessing elements in the view.
    pub strides: [usize; N],
}

impl<T, const N: usize> TensorView<'_, T, N> {
    /// Returns the number of elements visible through the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Gets the element at the given index using the view's strides.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset falls outside the borrowed storage.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.strides.iter())
            .fold(0, |acc, (&i, &s)| acc + i * s);
        &self.storage[offset]
    }

    /// Gets the element at the given index, or `None` if any index is out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        let mut offset = 0;
        for ((&idx, &dim_size), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        self.storage.get(offset)
    }

    /// Copies the visible elements, in row-major order of the view's shape, into a new
    /// standard-layout tensor.
    pub fn as_contiguous(&self) -> Tensor<T, N>
    where
        T: Clone,
    {
        let numel = self.numel();
        let mut data = Vec::with_capacity(numel);
        let mut index = [0; N];

        for _ in 0..numel {
            data.push(self.get_unchecked(index).clone());

            // increment index
            for dim in (0..N).rev() {
                index[dim] += 1;
                if index[dim] < self.shape[dim] {
                    break;
                }
                index[dim] = 0;
            }
        }

        Tensor {
            storage: data,
            shape: self.shape,
            strides: get_strides_from_shape(self.shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Tensor, Tensor1, Tensor2, TensorError};

    #[test]
    fn plain_view() -> Result<(), TensorError> {
        let t = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4])?;
        let view = t.view();
        assert_eq!(view.shape, [4]);
        assert_eq!(view.strides, [1]);
        assert_eq!(view.numel(), 4);
        assert_eq!(view.get([2]), Some(&3));
        assert!(view.get([4]).is_none());
        assert_eq!(view.as_contiguous().as_slice(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn permute_2d() -> Result<(), TensorError> {
        let t = Tensor2::<u8>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6])?;
        let view = t.permute_axes([1, 0]);
        assert_eq!(view.shape, [3, 2]);
        assert_eq!(view.strides, [1, 3]);
        let t2 = view.as_contiguous();
        assert_eq!(t2.shape, [3, 2]);
        assert_eq!(t2.strides, [2, 1]);
        assert_eq!(t2.as_slice(), &[1, 4, 2, 5, 3, 6]);
        Ok(())
    }

    #[test]
    fn permute_3d() -> Result<(), TensorError> {
        let t = Tensor::<u8, 3>::from_shape_fn([2, 1, 3], |[i, _, k]| (i * 3 + k) as u8);
        let t2 = t.permute_axes([2, 0, 1]).as_contiguous();
        assert_eq!(t2.shape, [3, 2, 1]);
        assert_eq!(t2.as_slice(), &[0, 3, 1, 4, 2, 5]);
        Ok(())
    }

    #[test]
    fn contiguous_empty() -> Result<(), TensorError> {
        let t = Tensor2::<u8>::from_shape_vec([0, 3], vec![])?;
        let t2 = t.permute_axes([1, 0]).as_contiguous();
        assert_eq!(t2.shape, [3, 0]);
        assert!(t2.is_empty());
        Ok(())
    }
}
