use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::tensor::{Matrix, Tensor};
use std::fmt::Debug;

/// Data flowing between layers: a matrix (usually a column vector) or a
/// rank-3 feature map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Features {
    Matrix(Matrix),
    Tensor(Tensor),
}

impl Features {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Features::Matrix(m) => m.shape().to_vec(),
            Features::Tensor(t) => t.shape().to_vec(),
        }
    }

    /// The wrapped matrix, or `ShapeMismatch` naming `operation`.
    pub fn into_matrix(self, operation: &str) -> Result<Matrix, ScalarGradError> {
        match self {
            Features::Matrix(m) => Ok(m),
            Features::Tensor(t) => Err(ScalarGradError::ShapeMismatch {
                expected: vec![t.numel(), 1],
                actual: t.shape().to_vec(),
                operation: format!("{} (expects a matrix)", operation),
            }),
        }
    }

    /// The wrapped tensor, or `ShapeMismatch` naming `operation`.
    pub fn into_tensor(self, operation: &str) -> Result<Tensor, ScalarGradError> {
        match self {
            Features::Tensor(t) => Ok(t),
            Features::Matrix(m) => {
                let [rows, cols] = m.shape();
                Err(ScalarGradError::ShapeMismatch {
                    expected: vec![rows, cols, 1],
                    actual: vec![rows, cols],
                    operation: format!("{} (expects a tensor)", operation),
                })
            }
        }
    }
}

impl From<Matrix> for Features {
    fn from(m: Matrix) -> Self {
        Features::Matrix(m)
    }
}

impl From<Tensor> for Features {
    fn from(t: Tensor) -> Self {
        Features::Tensor(t)
    }
}

/// The base trait for all network layers.
///
/// A layer holds handles to its parameters, which live in the [`Graph`] as
/// long-lived leaves. `forward` records the layer's computation on top of
/// them and must not create parameters of its own.
pub trait Layer: Debug + Send + Sync {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError>;

    /// Learnable parameters, in a stable order. Parameter-free layers return
    /// an empty vector.
    fn parameters(&self) -> Vec<NodeId>;

    fn name(&self) -> &'static str;

    /// Resets the gradient of every parameter.
    fn zero_grad(&self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        graph.zero_grad(self.parameters())
    }
}
