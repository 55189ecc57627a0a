use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::nn::module::{Features, Layer};
use crate::ops::activation::Activation;
use crate::tensor::{Initializer, Matrix};
use log::debug;
use rand::Rng;

/// Hyper-parameters of a [`Linear`] layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConfig {
    pub in_features: usize,
    pub out_features: usize,
    pub bias: bool,
    pub activation: Activation,
}

impl LinearConfig {
    pub fn new(in_features: usize, out_features: usize) -> Self {
        LinearConfig {
            in_features,
            out_features,
            bias: true,
            activation: Activation::Identity,
        }
    }

    pub fn with_bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

/// Fully connected layer: `y = activation(W·x + b)` on a column vector `x`.
#[derive(Debug, Clone)]
pub struct Linear {
    /// `out_features × in_features`, He-initialized.
    pub weights: Matrix,
    /// `out_features × 1`, zero-initialized.
    pub bias: Option<Matrix>,
    pub activation: Activation,
}

impl Linear {
    pub fn new(graph: &mut Graph, config: LinearConfig) -> Result<Self, ScalarGradError> {
        Self::new_with_rng(graph, config, &mut rand::thread_rng())
    }

    pub fn new_with_rng<G: Rng + ?Sized>(
        graph: &mut Graph,
        config: LinearConfig,
        rng: &mut G,
    ) -> Result<Self, ScalarGradError> {
        let shape = [config.out_features, config.in_features];
        let weights = Matrix::new_with_rng(graph, shape, Initializer::he_normal(), rng)?;
        let bias = if config.bias {
            Some(Matrix::new(graph, [config.out_features, 1], Initializer::Zeros)?)
        } else {
            None
        };
        debug!(
            "Linear: {} -> {} (bias: {}, activation: {:?})",
            config.in_features, config.out_features, config.bias, config.activation
        );
        Ok(Linear {
            weights,
            bias,
            activation: config.activation,
        })
    }

    pub fn in_features(&self) -> usize {
        self.weights.cols()
    }

    pub fn out_features(&self) -> usize {
        self.weights.rows()
    }
}

impl Layer for Linear {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        let x = input.into_matrix("Linear")?;
        if x.shape() != [self.in_features(), 1] {
            return Err(ScalarGradError::shape_mismatch(
                &[self.in_features(), 1],
                &x.shape(),
                "Linear (expects a column vector)",
            ));
        }
        let mut y = self.weights.matmul(graph, &x)?;
        if let Some(bias) = &self.bias {
            y = y.add(graph, bias)?;
        }
        Ok(y.activate(graph, self.activation)?.into())
    }

    fn parameters(&self) -> Vec<NodeId> {
        let mut params: Vec<NodeId> = self.weights.iter().collect();
        if let Some(bias) = &self.bias {
            params.extend(bias.iter());
        }
        params
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
