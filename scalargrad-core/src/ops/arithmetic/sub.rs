use super::{add_op, neg_op};
use crate::autograd::{NodeId, Recorder};

/// `a - b`, built as `a + (-b)`.
pub fn sub_op<R: Recorder>(recorder: &mut R, a: NodeId, b: NodeId) -> NodeId {
    let negated = neg_op(recorder, b);
    add_op(recorder, a, negated)
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
