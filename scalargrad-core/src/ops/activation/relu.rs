use crate::autograd::{NodeId, OpKind, Recorder};

/// Slope of [`leaky_relu_op`] for negative inputs.
pub const LEAKY_RELU_SLOPE: f64 = 0.01;

/// `max(0, a)`. The derivative is taken as 0 at `a == 0`.
pub fn relu_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    let x = recorder.value(a);
    let (value, local_grad) = if x > 0.0 { (x, 1.0) } else { (0.0, 0.0) };
    recorder.record_op(OpKind::Relu, value, [(a, local_grad)])
}

/// `a` for `a >= 0`, `0.01·a` otherwise.
pub fn leaky_relu_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    let x = recorder.value(a);
    let (value, local_grad) = if x >= 0.0 {
        (x, 1.0)
    } else {
        (LEAKY_RELU_SLOPE * x, LEAKY_RELU_SLOPE)
    };
    recorder.record_op(OpKind::LeakyRelu, value, [(a, local_grad)])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
