#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `datatrans-tensor` is the array library underneath the `datatrans` operations. It provides
//! an owned, row-major [`Tensor`] with compile-time dimensionality and a borrowed
//! [`TensorView`](view::TensorView) for strided, zero-copy reinterpretations such as
//! axis permutation.
//!
//! # Quick Start
//!
//! ```rust
//! use datatrans_tensor::{Tensor2, TensorError};
//!
//! let t = Tensor2::<f32>::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//! assert_eq!(t.get([1, 2]), Some(&6.0));
//!
//! // rows in, rows out
//! let m = Tensor2::from_rows(&[vec![1, 2], vec![3, 4]])?;
//! assert_eq!(m.to_rows(), vec![vec![1, 2], vec![3, 4]]);
//!
//! // transposed copy through a permuted view
//! let tt = m.permute_axes([1, 0]).as_contiguous();
//! assert_eq!(tt.as_slice(), &[1, 3, 2, 4]);
//! # Ok::<(), TensorError>(())
//! ```

/// Serde support for tensors.
///
/// Tensors serialize as `{ data, shape, strides }` when the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub mod serde;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

/// View module containing non-owning tensor view implementations.
///
/// This module provides [`view::TensorView`] for strided access into existing tensor data.
pub mod view;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};
pub use crate::view::TensorView;

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;
