use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::kernels::max_pool2d;
use crate::nn::module::{Features, Layer};

/// Non-overlapping max-pooling with a square window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPool2d {
    pub window: usize,
}

impl MaxPool2d {
    pub fn new(window: usize) -> Result<Self, ScalarGradError> {
        if window == 0 {
            return Err(ScalarGradError::ConfigurationError(
                "MaxPool2d window must be at least 1".to_string(),
            ));
        }
        Ok(MaxPool2d { window })
    }
}

impl Layer for MaxPool2d {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        let x = input.into_tensor("MaxPool2d")?;
        Ok(max_pool2d(graph, &x, self.window)?.into())
    }

    fn parameters(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "MaxPool2d"
    }
}

#[cfg(test)]
#[path = "pooling_test.rs"]
mod tests;
