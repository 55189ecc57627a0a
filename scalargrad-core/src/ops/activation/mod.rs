//! Activation functions on scalar nodes.
//!
//! The pointwise activations live here; softmax couples the cells of a lane
//! and is built by the containers (see `Container::softmax`).

pub mod relu;
pub mod sigmoid;

pub use relu::{leaky_relu_op, relu_op, LEAKY_RELU_SLOPE};
pub use sigmoid::sigmoid_op;

use crate::autograd::{NodeId, Recorder};

/// Activation applied by a layer or a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Identity,
    Relu,
    LeakyRelu,
    Sigmoid,
    /// Normalizes each lane of a container; not defined on a single node.
    Softmax,
}

impl Activation {
    pub fn is_pointwise(self) -> bool {
        self != Activation::Softmax
    }

    /// Applies a pointwise activation to one node.
    ///
    /// Returns `None` for [`Activation::Softmax`].
    pub fn apply<R: Recorder>(self, recorder: &mut R, a: NodeId) -> Option<NodeId> {
        match self {
            Activation::Identity => Some(a),
            Activation::Relu => Some(relu_op(recorder, a)),
            Activation::LeakyRelu => Some(leaky_relu_op(recorder, a)),
            Activation::Sigmoid => Some(sigmoid_op(recorder, a)),
            Activation::Softmax => None,
        }
    }
}
