#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! All operations are pure functions: inputs are borrowed, never mutated, and every call
//! returns a freshly allocated result or an [`OpsError`].
//!
//! ```rust
//! use datatrans_ops::{convolution2d, transpose2d, window1d, OpsError};
//! use datatrans_tensor::Tensor2;
//!
//! assert_eq!(transpose2d(&[[1, 2], [3, 4]])?, vec![vec![1, 3], vec![2, 4]]);
//!
//! let windows = window1d(&[0, 1, 2, 3, 4], 2, 1, 4)?;
//! assert_eq!(windows, vec![vec![0, 4]]);
//!
//! let src = Tensor2::<i32>::from_shape_fn([4, 4], |[r, c]| (r * 4 + c + 1) as i32);
//! let kernel = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 2, 3, 4])?;
//! let dst = convolution2d(&src, &kernel, 1)?;
//! assert_eq!(dst.to_rows()[0], vec![26, 36, 46]);
//! # Ok::<(), OpsError>(())
//! ```

/// 2D convolution with a flipped kernel.
pub mod convolution;

/// Error types for the array operations.
///
/// Defines [`OpsError`] for shape and parameter violations.
pub mod error;

/// Axis reversal of matrices.
pub mod flip;

/// Parameter structs for windowing and convolution.
pub mod params;

/// Matrix transposition.
pub mod transpose;

/// Sliding windows over one-dimensional sequences.
pub mod window;

pub use convolution::{convolution2d, convolution2d_rows, convolution2d_with};
pub use error::OpsError;
pub use params::{ConvolutionParams, WindowParams};
pub use transpose::{transpose, transpose2d};
pub use window::{window1d, window1d_with, Windowable};
