use super::pad::pad2d;
use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::tensor::{Matrix, Tensor};

/// Spatial size of a cross-correlation output:
/// `((h + 2p − kh) / stride + 1, (w + 2p − kw) / stride + 1)`.
///
/// `None` when the kernel does not fit in the padded input or `stride` is 0.
pub fn conv2d_output_size(
    input: (usize, usize),
    kernel: (usize, usize),
    stride: usize,
    padding: usize,
) -> Option<(usize, usize)> {
    let side = |size: usize, k: usize| {
        (size + 2 * padding)
            .checked_sub(k)?
            .checked_div(stride)
            .map(|steps| steps + 1)
    };
    Some((side(input.0, kernel.0)?, side(input.1, kernel.1)?))
}

/// Cross-correlates `input` with one `kernel` (not flipped).
///
/// Each output cell is a single n-ary sum over the products of the kernel
/// with the matching window of the padded input, across all channels.
/// Output rows are independent units of work.
///
/// # Errors
/// - `ShapeMismatch` if the channel counts differ or the kernel is larger
///   than the unpadded input.
/// - `InvalidConstruction` if `stride` is 0.
pub fn conv2d(
    graph: &mut Graph,
    input: &Tensor,
    kernel: &Tensor,
    stride: usize,
    padding: usize,
) -> Result<Matrix, ScalarGradError> {
    let [h, w, c] = input.shape();
    let [kh, kw, kc] = kernel.shape();
    if c != kc {
        return Err(ScalarGradError::shape_mismatch(&[kh, kw, c], &[kh, kw, kc], "conv2d (channels)"));
    }
    if h < kh || w < kw {
        return Err(ScalarGradError::shape_mismatch(&[kh, kw], &[h, w], "conv2d (kernel larger than input)"));
    }
    if stride == 0 {
        return Err(ScalarGradError::InvalidConstruction(
            "conv2d stride must be at least 1".to_string(),
        ));
    }

    let (oh, ow) = conv2d_output_size((h, w), (kh, kw), stride, padding).ok_or_else(|| {
        ScalarGradError::shape_mismatch(&[kh, kw], &[h, w], "conv2d (output size)")
    })?;
    let padded = pad2d(graph, input, padding)?;
    let pw = padded.width();
    let (source, weights) = (padded.cells(), kernel.cells());

    let cells = graph.build(oh, |f, oi| {
        Ok((0..ow)
            .map(|oj| {
                let mut products: Vec<NodeId> = Vec::with_capacity(kh * kw * c);
                for di in 0..kh {
                    let row = oi * stride + di;
                    for dj in 0..kw {
                        let start = (row * pw + oj * stride + dj) * c;
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
#[path = "conv_test.rs"]
mod tests;
