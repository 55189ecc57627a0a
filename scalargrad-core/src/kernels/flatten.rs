use crate::tensor::{Matrix, Tensor};

/// Row-major linearization of `input` into an `n × 1` column vector.
///
/// The vector holds the tensor's own nodes; nothing is recorded.
pub fn flatten(input: &Tensor) -> Matrix {
    input.flatten()
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
