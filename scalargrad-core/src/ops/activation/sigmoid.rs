use crate::autograd::{NodeId, OpKind, Recorder};

/// `1 / (1 + e^-a)`, with `∂/∂a = s·(1 − s)`.
pub fn sigmoid_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    let s = 1.0 / (1.0 + (-recorder.value(a)).exp());
    recorder.record_op(OpKind::Sigmoid, s, [(a, s * (1.0 - s))])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
