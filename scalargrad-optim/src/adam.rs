use crate::{validate_learning_rate, validate_rate, Optimizer};
use log::debug;
use scalargrad_core::{Graph, NodeId, ScalarGradError};

/// Added to the denominator of the Adam update.
pub const ADAM_EPSILON: f64 = 1e-7;

/// Hyper-parameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    /// Symmetric bound applied to each gradient before it enters the moments.
    pub grad_clip: Option<f64>,
}

impl AdamConfig {
    /// Uses `epsilon = 1e-7` and no gradient clamp.
    ///
    /// # Errors
    /// `ConfigurationError` for a non-positive learning rate or betas
    /// outside `[0, 1)`.
    pub fn new(lr: f64, beta1: f64, beta2: f64) -> Result<Self, ScalarGradError> {
        validate_learning_rate(lr)?;
        validate_rate("beta1", beta1)?;
        validate_rate("beta2", beta2)?;
        Ok(AdamConfig {
            lr,
            beta1,
            beta2,
            epsilon: ADAM_EPSILON,
            grad_clip: None,
        })
    }

    pub fn with_grad_clip(mut self, bound: f64) -> Result<Self, ScalarGradError> {
        if !bound.is_finite() || bound <= 0.0 {
            return Err(ScalarGradError::ConfigurationError(format!(
                "gradient clip bound must be finite and positive, got {}",
                bound
            )));
        }
        self.grad_clip = Some(bound);
        Ok(self)
    }
}

/// Per-parameter moment estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub first: f64,
    pub second: f64,
}

/// Adam: bias-corrected first and second moment estimates of the gradient.
#[derive(Debug, Clone)]
pub struct Adam {
    params: Vec<NodeId>,
    moments: Vec<Moments>,
    config: AdamConfig,
    /// Step about to be taken, starting at 1.
    timestep: u64,
}

impl Adam {
    pub fn new(params: Vec<NodeId>, config: AdamConfig) -> Self {
        let moments = vec![Moments::default(); params.len()];
        Adam {
            params,
            moments,
            config,
            timestep: 1,
        }
    }

    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    pub fn moments(&self) -> &[Moments] {
        &self.moments
    }
}

impl Optimizer for Adam {
    fn step(&mut self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        debug!(
            "Adam: step {} over {} parameters",
            self.timestep,
            self.params.len()
        );
        let AdamConfig {
            lr,
            beta1,
            beta2,
            epsilon,
            grad_clip,
        } = self.config;
        let t = i32::try_from(self.timestep).unwrap_or(i32::MAX);
        let correction1 = 1.0 - beta1.powi(t);
        let correction2 = 1.0 - beta2.powi(t);

        graph.update_nodes(&self.params, &mut self.moments, |node, moments| {
            let grad = match grad_clip {
                Some(bound) => node.grad.clamp(-bound, bound),
                None => node.grad,
            };
            moments.first = beta1 * moments.first + (1.0 - beta1) * grad;
            moments.second = beta2 * moments.second + (1.0 - beta2) * grad * grad;
            let first_hat = moments.first / correction1;
            let second_hat = moments.second / correction2;
            node.value -= lr * first_hat / (second_hat.sqrt() + epsilon);
        })?;
        self.timestep += 1;
        Ok(())
    }

    fn parameters(&self) -> &[NodeId] {
        &self.params
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
