//! Layers, models and losses built on the container operators.

pub mod layers;
pub mod losses;
pub mod module;
pub mod sequential;

pub use crate::ops::activation::Activation;
pub use layers::{Conv2d, Conv2dConfig, ConvTranspose2d, Flatten, Linear, LinearConfig, MaxPool2d};
pub use losses::{binary_cross_entropy, cross_entropy, mse};
pub use module::{Features, Layer};
pub use sequential::Sequential;
