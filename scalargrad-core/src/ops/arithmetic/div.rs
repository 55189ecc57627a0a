use super::{mul_op, pow_op};
use crate::autograd::{NodeId, Recorder};
use crate::error::ScalarGradError;

/// `a / b`, built as `a * b^-1`.
///
/// # Errors
/// `DivisionByZero` if `b` currently holds zero.
pub fn div_op<R: Recorder>(recorder: &mut R, a: NodeId, b: NodeId) -> Result<NodeId, ScalarGradError> {
    if recorder.value(b) == 0.0 {
        return Err(ScalarGradError::DivisionByZero);
    }
    let reciprocal = pow_op(recorder, b, -1.0);
    Ok(mul_op(recorder, a, reciprocal))
}

/// `a / constant`.
///
/// # Errors
/// `DivisionByZero` if `constant` is zero.
pub fn div_const_op<R: Recorder>(
    recorder: &mut R,
    a: NodeId,
    constant: f64,
) -> Result<NodeId, ScalarGradError> {
    let c = recorder.constant(constant);
    div_op(recorder, a, c)
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
