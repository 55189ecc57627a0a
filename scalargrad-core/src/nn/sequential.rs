use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::nn::module::{Features, Layer};
use log::trace;

/// Layers applied one after another.
#[derive(Debug)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    /// # Errors
    /// `InvalidConstruction` for an empty layer list.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Result<Self, ScalarGradError> {
        if layers.is_empty() {
            return Err(ScalarGradError::InvalidConstruction(
                "a Sequential model needs at least one layer".to_string(),
            ));
        }
        Ok(Sequential { layers })
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Layer for Sequential {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        let mut current = input;
        for (i, layer) in self.layers.iter().enumerate() {
            current = layer.forward(graph, current)?;
            trace!("Sequential: layer {} ({}) -> {:?}", i, layer.name(), current.shape());
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<NodeId> {
        self.layers.iter().flat_map(|layer| layer.parameters()).collect()
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
