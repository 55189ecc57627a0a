use crate::autograd::{NodeId, OpKind, Recorder};
use log::warn;

/// Stand-in for an input of exactly zero, so `log` stays finite.
pub const LOG_EPSILON: f64 = 1e-15;

/// Natural logarithm, with `∂/∂a = 1/a`.
///
/// An input of exactly zero is replaced by [`LOG_EPSILON`] in both the value
/// and the local derivative. Negative inputs follow `f64::ln` and yield NaN.
pub fn log_op<R: Recorder>(recorder: &mut R, a: NodeId) -> NodeId {
    let mut x = recorder.value(a);
    if x == 0.0 {
        warn!("log of zero at {}, substituting {:e}", a, LOG_EPSILON);
        x = LOG_EPSILON;
    }
    recorder.record_op(OpKind::Log, x.ln(), [(a, 1.0 / x)])
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
