//! Reverse-mode automatic differentiation over scalar nodes, with the
//! matrix/tensor operators, convolution kernels, layers and losses built on
//! top of it.
//!
//! Every value lives as a [`Node`] in a [`Graph`] arena and is addressed by a
//! copyable [`NodeId`]. Operators record new nodes together with their local
//! derivatives; [`Graph::backward`] then accumulates gradients into every
//! ancestor of a root.

pub mod autograd;
pub mod error;
pub mod kernels;
pub mod nn;
pub mod ops;
pub mod tensor;
pub mod utils;

pub use autograd::{
    Checkpoint, ExecutionMode, Fragment, Graph, GraphConfig, Node, NodeId, OpKind, Recorder, DEFAULT_GRAD_CLIP,
};
pub use error::ScalarGradError;
pub use ops::activation::Activation;
pub use tensor::{Container, Initializer, Matrix, Tensor};
