use super::conv2d::Conv2dConfig;
use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::kernels::conv_transpose2d;
use crate::nn::module::{Features, Layer};
use crate::ops::activation::Activation;
use crate::tensor::{Initializer, Matrix, Tensor};
use log::debug;
use rand::Rng;

/// Transposed 2-D convolution, the upsampling counterpart of
/// [`Conv2d`](super::Conv2d).
///
/// Takes the same [`Conv2dConfig`]. Output channel `o` is
/// `conv_transpose2d(input, kernels[o])`, so an `h × w` input grows to
/// `(h − 1)·stride − 2p + k` per side.
#[derive(Debug, Clone)]
pub struct ConvTranspose2d {
    pub kernels: Vec<Tensor>,
    pub bias: Option<Matrix>,
    pub stride: usize,
    pub padding: usize,
    pub activation: Activation,
}

impl ConvTranspose2d {
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
            "ConvTranspose2d: {} -> {} channels, kernel {}, stride {}, padding {}",
            config.in_channels, config.out_channels, config.kernel_size, config.stride, config.padding
        );
        Ok(ConvTranspose2d {
            kernels,
            bias,
            stride: config.stride,
            padding: config.padding,
            activation: config.activation,
        })
    }

    pub fn out_channels(&self) -> usize {
        self.kernels.len()
    }
}

impl Layer for ConvTranspose2d {
    fn forward(&self, graph: &mut Graph, input: Features) -> Result<Features, ScalarGradError> {
        let x = input.into_tensor("ConvTranspose2d")?;
        let maps = self
            .kernels
            .iter()
            .map(|kernel| conv_transpose2d(graph, &x, kernel, self.stride, self.padding))
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
        "ConvTranspose2d"
    }
}

#[cfg(test)]
#[path = "conv_transpose2d_test.rs"]
mod tests;
