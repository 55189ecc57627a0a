use crate::autograd::Graph;
use crate::error::ScalarGradError;
use crate::tensor::reduction::argmax_node;
use crate::tensor::Tensor;

/// Non-overlapping max-pooling with a square `window`, per channel.
///
/// Each output cell is the winning input node of its window (the first one
/// on ties), so upstream gradient reaches only the winner. No nodes are
/// created.
///
/// # Errors
/// `InvalidConstruction` for a zero window, `ShapeMismatch` unless the
/// height and width are multiples of `window`.
pub fn max_pool2d(graph: &Graph, input: &Tensor, window: usize) -> Result<Tensor, ScalarGradError> {
    if window == 0 {
        return Err(ScalarGradError::InvalidConstruction(
            "max_pool2d window must be at least 1".to_string(),
        ));
    }
    let [h, w, c] = input.shape();
    if h % window != 0 || w % window != 0 {
        return Err(ScalarGradError::shape_mismatch(
            &[h - h % window, w - w % window],
            &[h, w],
            "max_pool2d (dimensions not divisible by window)",
        ));
    }

    let (oh, ow) = (h / window, w / window);
    let cells = input.cells();
    let mut pooled = Vec::with_capacity(oh * ow * c);
    for oi in 0..oh {
        for oj in 0..ow {
            for k in 0..c {
                let candidates = (0..window).flat_map(|di| {
                    (0..window).map(move |dj| {
                        let (i, j) = (oi * window + di, oj * window + dj);
                        cells[(i * w + j) * c + k]
                    })
                });
                let first = cells[((oi * window) * w + oj * window) * c + k];
                pooled.push(argmax_node(graph, candidates).unwrap_or(first));
            }
        }
    }
    Tensor::from_nodes([oh, ow, c], pooled)
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod tests;
