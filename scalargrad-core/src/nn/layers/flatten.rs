use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::kernels::flatten;
use crate::nn::module::{Features, Layer};

/// Turns a feature map into a column vector. Matrices pass through as a
/// column as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flatten;

impl Layer for Flatten {
    fn forward(&self, _graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        Ok(match input {
            Features::Tensor(t) => flatten(&t),
            Features::Matrix(m) => m.flatten(),
        }
        .into())
    }

    fn parameters(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "Flatten"
    }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
