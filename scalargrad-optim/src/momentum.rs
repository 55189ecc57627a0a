use crate::{validate_learning_rate, validate_rate, Optimizer};
use log::debug;
use scalargrad_core::{Graph, NodeId, ScalarGradError};

/// Hyper-parameters of [`Momentum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumConfig {
    pub lr: f64,
    pub momentum: f64,
}

impl MomentumConfig {
    /// # Errors
    /// `ConfigurationError` for a non-positive learning rate or a momentum
    /// rate outside `[0, 1)`.
    pub fn new(lr: f64, momentum: f64) -> Result<Self, ScalarGradError> {
        validate_learning_rate(lr)?;
        validate_rate("momentum", momentum)?;
        Ok(MomentumConfig { lr, momentum })
    }
}

/// Gradient descent with momentum: `m ← μ·m + lr·g`, then `v ← v − m`.
#[derive(Debug, Clone)]
pub struct Momentum {
    params: Vec<NodeId>,
    velocities: Vec<f64>,
    config: MomentumConfig,
}

impl Momentum {
    pub fn new(params: Vec<NodeId>, config: MomentumConfig) -> Self {
        let velocities = vec![0.0; params.len()];
        Momentum {
            params,
            velocities,
            config,
        }
    }

    /// Current velocity of each parameter, in parameter order.
    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }
}

impl Optimizer for Momentum {
    fn step(&mut self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        debug!("Momentum: updating {} parameters", self.params.len());
        let MomentumConfig { lr, momentum } = self.config;
        graph.update_nodes(&self.params, &mut self.velocities, |node, velocity| {
            *velocity = momentum * *velocity + lr * node.grad;
            node.value -= *velocity;
        })
    }

    fn parameters(&self) -> &[NodeId] {
        &self.params
    }
}

#[cfg(test)]
#[path = "momentum_test.rs"]
mod tests;
