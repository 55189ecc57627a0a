//! Structural kernels over tensors: padding, cross-correlation and its
//! transpose, max-pooling and flattening.
//!
//! All of them are composed from container operators and elementary nodes;
//! none writes a derivative by hand.

pub mod conv;
pub mod conv_transpose;
pub mod flatten;
pub mod pad;
pub mod pool;

pub use conv::{conv2d, conv2d_output_size};
pub use conv_transpose::{conv_transpose2d, conv_transpose2d_output_size};
pub use flatten::flatten;
pub use pad::pad2d;
pub use pool::max_pool2d;
