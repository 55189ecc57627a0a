use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::tensor::Tensor;

/// Surrounds the spatial dimensions with `padding` rings of zeros.
///
/// Border cells are fresh non-participating constants; interior cells are
/// the input's own nodes, so gradient reaches the input unchanged. A padding
/// of 0 returns the input as is.
pub fn pad2d(graph: &mut Graph, input: &Tensor, padding: usize) -> Result<Tensor, ScalarGradError> {
    if padding == 0 {
        return Ok(input.clone());
    }
    let [h, w, c] = input.shape();
    let (ph, pw) = (h + 2 * padding, w + 2 * padding);
    let interior = padding..padding + h;
    let interior_cols = padding..padding + w;

    let mut cells: Vec<NodeId> = Vec::with_capacity(ph * pw * c);
    for i in 0..ph {
        for j in 0..pw {
            if interior.contains(&i) && interior_cols.contains(&j) {
                let start = input.offset([i - padding, j - padding, 0])?;
                cells.extend_from_slice(&input.cells()[start..start + c]);
            } else {
                cells.extend((0..c).map(|_| graph.constant(0.0)));
            }
        }
    }
    Tensor::from_nodes([ph, pw, c], cells)
}

#[cfg(test)]
#[path = "pad_test.rs"]
mod tests;
