use datatrans_tensor::{Tensor, Tensor1};

use crate::{error::OpsError, params::WindowParams};

/// A one-dimensional, indexable sequence that windows can be cut from.
///
/// Implementors pick the container their windows come back in through [`Windowable::Window`],
/// so plain sequences yield `Vec<T>` windows while tensors yield tensors.
pub trait Windowable {
    /// Element type of the sequence.
    type Item: Clone;

    /// Container holding the elements of one window.
    type Window;

    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns true if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`. Callers guarantee `index < self.len()`.
    fn at(&self, index: usize) -> &Self::Item;

    /// Wrap the sampled elements of one window.
    fn make_window(items: Vec<Self::Item>) -> Self::Window;
}

impl<T: Clone> Windowable for [T] {
    type Item = T;
    type Window = Vec<T>;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn make_window(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: Clone, const N: usize> Windowable for [T; N] {
    type Item = T;
    type Window = Vec<T>;

    fn len(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn make_window(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: Clone> Windowable for Vec<T> {
    type Item = T;
    type Window = Vec<T>;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn make_window(items: Vec<T>) -> Vec<T> {
        items
    }
}

impl<T: Clone> Windowable for Tensor1<T> {
    type Item = T;
    type Window = Tensor1<T>;

    fn len(&self) -> usize {
        self.shape[0]
    }

    fn at(&self, index: usize) -> &T {
        self.get_unchecked([index])
    }

    fn make_window(items: Vec<T>) -> Tensor1<T> {
        Tensor {
            shape: [items.len()],
            strides: [1],
            storage: items,
        }
    }
}

/// Cut a one-dimensional sequence into (possibly overlapping, possibly strided) windows.
///
/// Window `k` starts at offset `k * shift` and holds the `size` elements at offsets
/// `start, start + stride, ..., start + (size - 1) * stride`. Only windows that fit entirely
/// inside the input are produced; if none fit the result is empty.
///
/// # Arguments
///
/// * `array` - The input sequence: a slice, array, `Vec` or [`Tensor1`].
/// * `size` - Number of elements per window.
/// * `shift` - Distance between the starts of consecutive windows.
/// * `stride` - Distance between elements inside a window.
///
/// # Returns
///
/// The windows in order, each in the container type of the input (see [`Windowable`]).
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `size`, `shift` or `stride` is 0.
///
/// # Example
///
/// ```
/// use datatrans_ops::window::window1d;
///
/// let data = vec![0, 1, 2, 3, 4];
/// assert_eq!(window1d(&data, 3, 1, 1).unwrap(), vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]);
/// assert_eq!(window1d(&data, 2, 2, 2).unwrap(), vec![vec![0, 2], vec![2, 4]]);
/// assert!(window1d(&data, 2, 1, 5).unwrap().is_empty());
/// ```
pub fn window1d<W>(
    array: &W,
    size: usize,
    shift: usize,
    stride: usize,
) -> Result<Vec<W::Window>, OpsError>
where
    W: Windowable + ?Sized,
{
    window1d_with(
        array,
        &WindowParams {
            size,
            shift,
            stride,
        },
    )
}

/// Same as [`window1d`], with the parameters carried by a [`WindowParams`].
pub fn window1d_with<W>(array: &W, params: &WindowParams) -> Result<Vec<W::Window>, OpsError>
where
    W: Windowable + ?Sized,
{
    params.validate()?;

    let len = array.len();
    let last_start = match params.span() {
        Some(span) if span < len => len - span,
        _ => {
            log::debug!("window1d: no window of {params:?} fits in {len} elements");
            return Ok(Vec::new());
        }
    };

    let windows: Vec<W::Window> = (0..last_start)
        .step_by(params.shift)
        .map(|start| {
            let items = (0..params.size)
                .map(|i| array.at(start + i * params.stride).clone())
                .collect();
            W::make_window(items)
        })
        .collect();

    log::trace!("window1d: {} windows from {len} elements", windows.len());

    Ok(windows)
}
