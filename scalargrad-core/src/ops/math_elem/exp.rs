use crate::autograd::{NodeId, OpKind, Recorder};

/// `e^a`, whose local derivative is its own value.
pub fn exp_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    let value = recorder.value(a).exp();
    recorder.record_op(OpKind::Exp, value, [(a, value)])
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
