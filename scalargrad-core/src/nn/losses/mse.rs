use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::tensor::Matrix;

/// Mean squared error between equally shaped matrices.
pub fn mse(graph: &mut Graph, pred: &Matrix, target: &Matrix) -> Result<NodeId, ScalarGradError> {
    let diff = pred.sub(graph, target)?;
    let squares: Vec<NodeId> = diff.iter().map(|d| graph.pow(d, 2.0)).collect();
    let total = graph.sum(&squares);
    Ok(graph.mul_const(total, 1.0 / pred.numel() as f64))
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
