use crate::autograd::{NodeId, OpKind, Recorder};

/// `a^exponent` for a constant exponent, with `∂/∂a = k·a^(k−1)`.
pub fn pow_op<R: Recorder>(recorder: &mut R, a: NodeId, exponent: f64) -> NodeId {
    let base = recorder.value(a);
    let local_grad = exponent * base.powf(exponent - 1.0);
    recorder.record_op(OpKind::Pow, base.powf(exponent), [(a, local_grad)])
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
