//! Parameter-update rules for ScalarGrad models.
//!
//! An optimizer holds the handles of the parameters it trains and rewrites
//! their `value` from their `grad` after a backward pass. Updates of distinct
//! parameters are independent and run on the rayon pool when the graph is in
//! parallel mode.

use scalargrad_core::{Graph, NodeId, ScalarGradError};

pub mod adam;
pub mod momentum;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use momentum::{Momentum, MomentumConfig};
pub use sgd::{Sgd, SgdConfig};

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Performs a single update of every parameter from its current gradient.
    ///
    /// Must run after `backward` has finished and before the gradients are
    /// reset.
    fn step(&mut self, graph: &mut Graph) -> Result<(), ScalarGradError>;

    fn parameters(&self) -> &[NodeId];

    /// Clears the gradient of every parameter, after [`step`](Self::step).
    fn zero_grad(&self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        let params = self.parameters();
        let mut states = vec![(); params.len()];
        graph.update_nodes(params, &mut states, |node, _| node.grad = 0.0)
    }
}

/// Rejects learning rates that are not finite and strictly positive.
pub(crate) fn validate_learning_rate(lr: f64) -> Result<(), ScalarGradError> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(ScalarGradError::ConfigurationError(format!(
            "learning rate must be finite and positive, got {}",
            lr
        )));
    }
    Ok(())
}

/// Rejects decay rates outside `[0, 1)`.
pub(crate) fn validate_rate(name: &str, rate: f64) -> Result<(), ScalarGradError> {
    if !(0.0..1.0).contains(&rate) {
        return Err(ScalarGradError::ConfigurationError(format!(
            "{} must be in [0, 1), got {}",
            name, rate
        )));
    }
    Ok(())
}
