use super::{validate_shape, Container, Matrix, Tensor};
use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Default half-width of [`Initializer::uniform`].
pub const DEFAULT_UNIFORM_BOUND: f64 = 0.25;

/// How the leaves of a new container are filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Initializer {
    Zeros,
    Ones,
    /// Normal with mean 0 and standard deviation `sqrt(2 / fan_in)`.
    ///
    /// `None` uses the container's own fan-in: the width of a matrix, the
    /// cell count of a tensor.
    HeNormal { fan_in: Option<usize> },
    /// Uniform over `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl Initializer {
    pub fn he_normal() -> Self {
        Initializer::HeNormal { fan_in: None }
    }

    /// Uniform over `[-0.25, 0.25)`.
    pub fn uniform() -> Self {
        Initializer::Uniform {
            low: -DEFAULT_UNIFORM_BOUND,
            high: DEFAULT_UNIFORM_BOUND,
        }
    }

    fn sample<G: Rng + ?Sized>(self, shape: &[usize], numel: usize, rng: &mut G) -> Result<Vec<f64>, ScalarGradError> {
        match self {
            Initializer::Zeros => Ok(vec![0.0; numel]),
            Initializer::Ones => Ok(vec![1.0; numel]),
            Initializer::HeNormal { fan_in } => {
                let fan_in = fan_in.unwrap_or_else(|| default_fan_in(shape));
                if fan_in == 0 {
                    return Err(ScalarGradError::InvalidConstruction(
                        "He initialization needs a positive fan-in".to_string(),
                    ));
                }
                let std_dev = (2.0 / fan_in as f64).sqrt();
                let normal = Normal::new(0.0, std_dev)
                    .map_err(|e| ScalarGradError::InvalidConstruction(e.to_string()))?;
                Ok((0..numel).map(|_| normal.sample(rng)).collect())
            }
            Initializer::Uniform { low, high } => {
                if !(low < high) || !low.is_finite() || !high.is_finite() {
                    return Err(ScalarGradError::InvalidConstruction(format!(
                        "uniform range [{}, {}) is empty or not finite",
                        low, high
                    )));
                }
                let uniform = Uniform::new(low, high);
                Ok((0..numel).map(|_| uniform.sample(rng)).collect())
            }
        }
    }
}

fn default_fan_in(shape: &[usize]) -> usize {
    match shape {
        [_, cols] => *cols,
        _ => shape.iter().product(),
    }
}

impl<const R: usize> Container<R> {
    /// Creates a container of fresh participating leaves, sampling from the
    /// thread-local generator.
    pub fn new(graph: &mut Graph, shape: [usize; R], init: Initializer) -> Result<Self, ScalarGradError> {
        Self::new_with_rng(graph, shape, init, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new) with an explicit generator, for reproducible runs.
    pub fn new_with_rng<G: Rng + ?Sized>(
        graph: &mut Graph,
        shape: [usize; R],
        init: Initializer,
        rng: &mut G,
    ) -> Result<Self, ScalarGradError> {
        validate_shape(&shape)?;
        let numel = shape.iter().product();
        let values = init.sample(&shape, numel, rng)?;
        Self::from_values(graph, shape, &values)
    }

    /// Wraps raw values as participating leaves.
    ///
    /// # Errors
    /// `InvalidConstruction` for an empty array, a zero dimension, or a length
    /// that does not match `shape`.
    pub fn from_values(graph: &mut Graph, shape: [usize; R], values: &[f64]) -> Result<Self, ScalarGradError> {
        Self::wrap_values(graph, shape, values, true)
    }

    /// Wraps raw values as frozen leaves, e.g. network inputs or targets.
    pub fn constants(graph: &mut Graph, shape: [usize; R], values: &[f64]) -> Result<Self, ScalarGradError> {
        Self::wrap_values(graph, shape, values, false)
    }

    fn wrap_values(
        graph: &mut Graph,
        shape: [usize; R],
        values: &[f64],
        requires_grad: bool,
    ) -> Result<Self, ScalarGradError> {
        if values.is_empty() {
            return Err(ScalarGradError::InvalidConstruction(
                "cannot build a container from an empty array".to_string(),
            ));
        }
        validate_shape(&shape)?;
        let numel: usize = shape.iter().product();
        if values.len() != numel {
            return Err(ScalarGradError::InvalidConstruction(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                numel,
                values.len()
            )));
        }
        let cells = values
            .iter()
            .map(|&v| {
                if requires_grad {
                    graph.leaf(v)
                } else {
                    graph.constant(v)
                }
            })
            .collect();
        Ok(Container { shape, cells })
    }
}

impl Matrix {
    /// Builds a matrix from equally long rows of raw values.
    pub fn from_rows(graph: &mut Graph, rows: &[Vec<f64>]) -> Result<Self, ScalarGradError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(ScalarGradError::shape_mismatch(&[width], &[row.len()], "Matrix::from_rows"));
        }
        let values: Vec<f64> = rows.iter().flatten().copied().collect();
        Matrix::from_values(graph, [rows.len(), width], &values)
    }

    /// A column vector of participating leaves.
    pub fn vector(graph: &mut Graph, values: &[f64]) -> Result<Self, ScalarGradError> {
        Matrix::from_values(graph, [values.len(), 1], values)
    }

    /// A column vector over existing nodes.
    pub fn column(cells: Vec<NodeId>) -> Result<Self, ScalarGradError> {
        Matrix::from_nodes([cells.len(), 1], cells)
    }
}

impl Tensor {
    /// Stacks equally shaped matrices as the channels of a tensor.
    pub fn from_channels(channels: &[Matrix]) -> Result<Self, ScalarGradError> {
        let first = channels.first().ok_or_else(|| {
            ScalarGradError::InvalidConstruction("a tensor needs at least one channel".to_string())
        })?;
        let [h, w] = first.shape();
        for channel in channels {
            first.check_same_shape(channel, "Tensor::from_channels")?;
        }
        let depth = channels.len();
        let mut cells = Vec::with_capacity(h * w * depth);
        for offset in 0..h * w {
            cells.extend(channels.iter().map(|channel| channel.cells[offset]));
        }
        Tensor::from_nodes([h, w, depth], cells)
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
