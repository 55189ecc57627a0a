use crate::autograd::NodeId;
use std::ops::Range;
use thiserror::Error;

/// Custom error type for the ScalarGrad engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ScalarGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Invalid slice {range:?} along axis {axis} of size {size}")]
    InvalidSlice {
        range: Range<usize>,
        size: usize,
        axis: usize,
    },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("Division by zero error")]
    DivisionByZero,

    #[error("Node {0} does not belong to this graph")]
    UnknownNode(NodeId),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ScalarGradError {
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        ScalarGradError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }
}
