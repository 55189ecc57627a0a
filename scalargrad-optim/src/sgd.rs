use crate::{validate_learning_rate, Optimizer};
use log::debug;
use scalargrad_core::{Graph, NodeId, ScalarGradError};

/// Hyper-parameters of [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
}

impl SgdConfig {
    pub fn new(lr: f64) -> Result<Self, ScalarGradError> {
        validate_learning_rate(lr)?;
        Ok(SgdConfig { lr })
    }
}

/// Plain stochastic gradient descent: `v ← v − lr·g`.
#[derive(Debug, Clone)]
pub struct Sgd {
    params: Vec<NodeId>,
    config: SgdConfig,
}

impl Sgd {
    pub fn new(params: Vec<NodeId>, config: SgdConfig) -> Self {
        Sgd { params, config }
    }

    pub fn config(&self) -> SgdConfig {
        self.config
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        debug!("Sgd: updating {} parameters", self.params.len());
        let lr = self.config.lr;
        let mut states = vec![(); self.params.len()];
        graph.update_nodes(&self.params, &mut states, |node, _| {
            node.value -= lr * node.grad;
        })
    }

    fn parameters(&self) -> &[NodeId] {
        &self.params
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
