use crate::autograd::{NodeId, OpKind, Recorder};

/// `a * b`, with `∂/∂a = b` and `∂/∂b = a`.
pub fn mul_op<R: Recorder>(recorder: &mut R, a: NodeId, b: NodeId) -> NodeId {
    let (va, vb) = (recorder.value(a), recorder.value(b));
    recorder.record_op(OpKind::Mul, va * vb, [(a, vb), (b, va)])
}

/// `a * constant`, the constant being a non-participating leaf.
pub fn mul_const_op<R: Recorder>(recorder: &mut R, a: NodeId, constant: f64) -> NodeId {
    let c = recorder.constant(constant);
    mul_op(recorder, a, c)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
