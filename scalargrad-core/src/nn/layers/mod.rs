pub mod conv2d;
pub mod conv_transpose2d;
pub mod flatten;
pub mod linear;
pub mod pooling;

pub use conv2d::{Conv2d, Conv2dConfig};
pub use conv_transpose2d::ConvTranspose2d;
pub use flatten::Flatten;
pub use linear::{Linear, LinearConfig};
pub use pooling::MaxPool2d;
