use crate::autograd::{NodeId, OpKind, Recorder};

/// `a + b`. Both local derivatives are 1.
pub fn add_op<R: Recorder>(recorder: &mut R, a: NodeId, b: NodeId) -> NodeId {
    let value = recorder.value(a) + recorder.value(b);
    recorder.record_op(OpKind::Add, value, [(a, 1.0), (b, 1.0)])
}

/// n-ary sum in one node, every operand with local derivative 1.
///
/// Produces a flat node instead of a chain of binary additions, which keeps
/// matrix products and convolutions shallow. The sum of no operands is a
/// non-participating zero.
pub fn sum_op<R: Recorder>(recorder: &mut R, operands: &[NodeId]) -> NodeId {
    let value = operands.iter().map(|&id| recorder.value(id)).sum();
    recorder.record_op(OpKind::Add, value, operands.iter().map(|&id| (id, 1.0)))
}

/// `a + constant`, the constant being a non-participating leaf.
pub fn add_const_op<R: Recorder>(recorder: &mut R, a: NodeId, constant: f64) -> NodeId {
    let c = recorder.constant(constant);
    add_op(recorder, a, c)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
