use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::tensor::Matrix;

/// Categorical cross-entropy `−Σ tᵢ·log(pᵢ)`.
///
/// `pred` is expected to be a probability vector (softmax output).
/// Predictions of exactly zero go through the `log` substitution and stay
/// finite.
pub fn cross_entropy(graph: &mut Graph, pred: &Matrix, target: &Matrix) -> Result<NodeId, ScalarGradError> {
    pred.check_same_shape(target, "cross_entropy")?;
    let terms: Vec<NodeId> = pred
        .iter()
        .zip(target.iter())
        .map(|(p, t)| {
            let log_p = graph.log(p);
            graph.mul(t, log_p)
        })
        .collect();
    let total = graph.sum(&terms);
    Ok(graph.neg(total))
}

/// Binary cross-entropy, averaged over the cells:
/// `mean(−(t·log p + (1 − t)·log(1 − p)))`.
pub fn binary_cross_entropy(graph: &mut Graph, pred: &Matrix, target: &Matrix) -> Result<NodeId, ScalarGradError> {
    pred.check_same_shape(target, "binary_cross_entropy")?;
    let terms: Vec<NodeId> = pred
        .iter()
        .zip(target.iter())
        .map(|(p, t)| {
            let log_p = graph.log(p);
            let neg_p = graph.neg(p);
            let one_minus_p = graph.add_const(neg_p, 1.0);
            let log_q = graph.log(one_minus_p);
            let neg_t = graph.neg(t);
            let one_minus_t = graph.add_const(neg_t, 1.0);
            let positive = graph.mul(t, log_p);
            let negative = graph.mul(one_minus_t, log_q);
            graph.add(positive, negative)
        })
        .collect();
    let total = graph.sum(&terms);
    Ok(graph.mul_const(total, -1.0 / pred.numel() as f64))
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
