#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use datatrans_tensor as tensor;

#[doc(inline)]
pub use datatrans_ops as ops;
