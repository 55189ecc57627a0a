//! Loss functions. Each reduces a prediction and a target to one root node;
//! the caller runs `backward` on it.

pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::{binary_cross_entropy, cross_entropy};
pub use mse::mse;
