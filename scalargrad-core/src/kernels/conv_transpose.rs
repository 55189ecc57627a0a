use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::tensor::{Matrix, Tensor};

/// Spatial size of a transposed-convolution output:
/// `((h − 1)·stride − 2p + kh, (w − 1)·stride − 2p + kw)`.
///
/// `None` when the padding crops away the whole output, or for an empty
/// input.
pub fn conv_transpose2d_output_size(
    input: (usize, usize),
    kernel: (usize, usize),
    stride: usize,
    padding: usize,
) -> Option<(usize, usize)> {
    let side = |size: usize, k: usize| {
        let full = size.checked_sub(1)? * stride + k;
        full.checked_sub(2 * padding).filter(|&n| n > 0)
    };
    Some((side(input.0, kernel.0)?, side(input.1, kernel.1)?))
}

/// Transposed convolution of `input` with one `kernel`.
///
/// Every input position `(i, j)` scatters the kernel, weighted by its channel
/// vector and summed over channels, onto the output window starting at
/// `(i·stride, j·stride)`; `padding` then crops that many cells from each
/// border. Overlapping windows add up: each output cell is one n-ary sum over
/// every product that lands on it. Output rows are independent units of work.
///
/// # Errors
/// - `ShapeMismatch` if the channel counts differ or the padding leaves no
///   output.
/// - `InvalidConstruction` if `stride` is 0.
pub fn conv_transpose2d(
    graph: &mut Graph,
    input: &Tensor,
    kernel: &Tensor,
    stride: usize,
    padding: usize,
) -> Result<Matrix, ScalarGradError> {
    let [h, w, c] = input.shape();
    let [kh, kw, kc] = kernel.shape();
    if c != kc {
        return Err(ScalarGradError::shape_mismatch(
            &[kh, kw, c],
            &[kh, kw, kc],
            "conv_transpose2d (channels)",
        ));
    }
    if stride == 0 {
        return Err(ScalarGradError::InvalidConstruction(
            "conv_transpose2d stride must be at least 1".to_string(),
        ));
    }
    let (oh, ow) = conv_transpose2d_output_size((h, w), (kh, kw), stride, padding).ok_or_else(|| {
        ScalarGradError::shape_mismatch(&[kh, kw], &[h, w], "conv_transpose2d (padding exceeds output)")
    })?;

    // Input index and kernel offset of every source landing on output
    // coordinate `o` (in uncropped coordinates) along one axis.
    let sources = |o: usize, size: usize, k: usize| -> Vec<(usize, usize)> {
        (0..k)
            .filter(|&d| o >= d && (o - d) % stride == 0 && (o - d) / stride < size)
            .map(|d| ((o - d) / stride, d))
            .collect()
    };
    let (source, weights) = (input.cells(), kernel.cells());

    let cells = graph.build(oh, |f, oi| {
        let rows = sources(oi + padding, h, kh);
        Ok((0..ow)
            .map(|oj| {
                let cols = sources(oj + padding, w, kw);
                let mut products: Vec<NodeId> = Vec::with_capacity(rows.len() * cols.len() * c);
                for &(i, di) in &rows {
                    for &(j, dj) in &cols {
                        let start = (i * w + j) * c;
                        let kstart = (di * kw + dj) * c;
                        for k in 0..c {
                            products.push(f.mul(source[start + k], weights[kstart + k]));
                        }
                    }
                }
                f.sum(&products)
            })
            .collect())
    })?;
    Matrix::from_nodes([oh, ow], cells)
}

#[cfg(test)]
#[path = "conv_transpose_test.rs"]
mod tests;
