use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::kernels::conv2d;
use crate::nn::module::{Features, Layer};
use crate::ops::activation::Activation;
use crate::tensor::{Initializer, Matrix, Tensor};
use log::debug;
use rand::Rng;

/// Hyper-parameters of a [`Conv2d`] layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conv2dConfig {
    pub in_channels: usize,
    pub out_channels: usize,
    pub kernel_size: usize,
    pub stride: usize,
    pub padding: usize,
    pub bias: bool,
    pub activation: Activation,
}

impl Conv2dConfig {
    /// Stride 1, no padding, with bias, no activation.
    pub fn new(in_channels: usize, out_channels: usize, kernel_size: usize) -> Self {
        Conv2dConfig {
            in_channels,
            out_channels,
            kernel_size,
            stride: 1,
            padding: 0,
            bias: true,
            activation: Activation::Identity,
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ScalarGradError> {
        if self.stride == 0 {
            return Err(ScalarGradError::ConfigurationError(
                "Conv2d stride must be at least 1".to_string(),
            ));
        }
        if self.in_channels == 0 || self.out_channels == 0 || self.kernel_size == 0 {
            return Err(ScalarGradError::ConfigurationError(format!(
                "Conv2d needs positive channels and kernel size, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// 2-D cross-correlation layer.
///
/// Output channel `o` is `conv2d(input, kernels[o])`, plus `bias[o]` on
/// every cell when the layer has a bias.
#[derive(Debug, Clone)]
pub struct Conv2d {
    /// One `kernel_size × kernel_size × in_channels` tensor per output channel.
    pub kernels: Vec<Tensor>,
    /// `out_channels × 1`, zero-initialized.
    pub bias: Option<Matrix>,
    pub stride: usize,
    pub padding: usize,
    pub activation: Activation,
}

impl Conv2d {
    pub fn new(graph: &mut Graph, config: Conv2dConfig) -> Result<Self, ScalarGradError> {
        Self::new_with_rng(graph, config, &mut rand::thread_rng())
    }

    pub fn new_with_rng<G: Rng + ?Sized>(
        graph: &mut Graph,
        config: Conv2dConfig,
        rng: &mut G,
    ) -> Result<Self, ScalarGradError> {
        config.validate()?;
        let shape = [config.kernel_size, config.kernel_size, config.in_channels];
        let kernels = (0..config.out_channels)
            .map(|_| Tensor::new_with_rng(graph, shape, Initializer::uniform(), rng))
            .collect::<Result<Vec<_>, _>>()?;
        let bias = if config.bias {
            Some(Matrix::new(graph, [config.out_channels, 1], Initializer::Zeros)?)
        } else {
            None
        };
        debug!(
            "Conv2d: {} -> {} channels, kernel {}, stride {}, padding {}",
            config.in_channels, config.out_channels, config.kernel_size, config.stride, config.padding
        );
        Ok(Conv2d {
            kernels,
            bias,
            stride: config.stride,
            padding: config.padding,
            activation: config.activation,
        })
    }

    pub fn in_channels(&self) -> usize {
        self.kernels.first().map_or(0, Tensor::channels)
    }

    pub fn out_channels(&self) -> usize {
        self.kernels.len()
    }
}

impl Layer for Conv2d {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        let x = input.into_tensor("Conv2d")?;
        let maps = self
            .kernels
            .iter()
            .map(|kernel| conv2d(graph, &x, kernel, self.stride, self.padding))
            .collect::<Result<Vec<_>, _>>()?;
        let mut y = Tensor::from_channels(&maps)?;
        if let Some(bias) = &self.bias {
            y = y.add_channel_bias(graph, bias)?;
        }
        Ok(y.activate(graph, self.activation)?.into())
    }

    fn parameters(&self) -> Vec<NodeId> {
        let mut params: Vec<NodeId> = self.kernels.iter().flat_map(|k| k.iter()).collect();
        if let Some(bias) = &self.bias {
            params.extend(bias.iter());
        }
        params
    }

    fn name(&self) -> &'static str {
        "Conv2d"
    }
}

#[cfg(test)]
#[path = "conv2d_test.rs"]
mod tests;
