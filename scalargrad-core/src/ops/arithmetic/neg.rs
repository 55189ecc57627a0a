use super::mul_const_op;
use crate::autograd::{NodeId, Recorder};

/// `-a`.
pub fn neg_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    mul_const_op(recorder, a, -1.0)
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
