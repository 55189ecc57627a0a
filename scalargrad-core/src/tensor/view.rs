use super::{Container, Matrix, Tensor};
use crate::autograd::{Graph, Recorder};
use crate::error::ScalarGradError;
use std::ops::Range;

/// Accepts non-empty ranges inside `0..size`.
fn check_range(range: &Range<usize>, size: usize, axis: usize) -> Result<(), ScalarGradError> {
    if range.start >= range.end || range.end > size {
        return Err(ScalarGradError::InvalidSlice {
            range: range.clone(),
            size,
            axis,
        });
    }
    Ok(())
}

impl<const R: usize> Container<R> {
    /// The cells as an `n × 1` column vector, in row-major order.
    pub fn flatten(&self) -> Matrix {
        Container {
            shape: [self.cells.len(), 1],
            cells: self.cells.clone(),
        }
    }
}

impl Matrix {
    /// The sub-matrix covering `rows × cols`, sharing the original nodes.
    ///
    /// # Errors
    /// `InvalidSlice` for an empty, reversed, or out-of-range bound.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Matrix, ScalarGradError> {
        check_range(&rows, self.rows(), 0)?;
        check_range(&cols, self.cols(), 1)?;
        let width = self.cols();
        let cells = rows
            .clone()
            .flat_map(|i| cols.clone().map(move |j| i * width + j))
            .map(|offset| self.cells[offset])
            .collect();
        Ok(Container {
            shape: [rows.len(), cols.len()],
            cells,
        })
    }
}

impl Tensor {
    /// The spatial window `rows × cols` across every channel, sharing the
    /// original nodes.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Tensor, ScalarGradError> {
        check_range(&rows, self.height(), 0)?;
        check_range(&cols, self.width(), 1)?;
        let [_, w, c] = self.shape;
        let mut cells = Vec::with_capacity(rows.len() * cols.len() * c);
        for i in rows.clone() {
            let start = (i * w + cols.start) * c;
            let end = (i * w + cols.end) * c;
            cells.extend_from_slice(&self.cells[start..end]);
        }
        Ok(Container {
            shape: [rows.len(), cols.len(), c],
            cells,
        })
    }

    /// Stacks `other`'s channels after this tensor's.
    ///
    /// # Errors
    /// `ShapeMismatch` unless both tensors share height and width.
    pub fn concatenate(&self, other: &Tensor) -> Result<Tensor, ScalarGradError> {
        let [h, w, c1] = self.shape;
        let [h2, w2, c2] = other.shape;
        if (h, w) != (h2, w2) {
            return Err(ScalarGradError::shape_mismatch(
                &[h, w, c2],
                &other.shape,
                "concatenate (spatial dimensions)",
            ));
        }
        let mut cells = Vec::with_capacity(h * w * (c1 + c2));
        for position in 0..h * w {
            cells.extend_from_slice(&self.cells[position * c1..(position + 1) * c1]);
            cells.extend_from_slice(&other.cells[position * c2..(position + 1) * c2]);
        }
        Ok(Container {
            shape: [h, w, c1 + c2],
            cells,
        })
    }

    /// Channel `k` as an `h × w` matrix.
    pub fn channel(&self, k: usize) -> Result<Matrix, ScalarGradError> {
        let [h, w, c] = self.shape;
        if k >= c {
            return Err(ScalarGradError::IndexOutOfBounds {
                index: vec![0, 0, k],
                shape: self.shape.to_vec(),
            });
        }
        let cells = (0..h * w).map(|position| self.cells[position * c + k]).collect();
        Ok(Container { shape: [h, w], cells })
    }

    /// The channels at position `(i, j)` as a column vector.
    pub fn channel_vector(&self, i: usize, j: usize) -> Result<Matrix, ScalarGradError> {
        let start = self.offset([i, j, 0])?;
        let c = self.channels();
        Ok(Container {
            shape: [c, 1],
            cells: self.cells[start..start + c].to_vec(),
        })
    }

    /// Adds `bias[k]` to every cell of channel `k`.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `bias` is a `channels × 1` vector.
    pub fn add_channel_bias(&self, graph: &mut Graph, bias: &Matrix) -> Result<Tensor, ScalarGradError> {
        let c = self.channels();
        if bias.shape != [c, 1] {
            return Err(ScalarGradError::shape_mismatch(&[c, 1], &bias.shape, "add_channel_bias"));
        }
        let row_len = self.row_len();
        let cells = graph.build(self.height(), |f, row| {
            Ok((row * row_len..(row + 1) * row_len)
                .map(|offset| f.add(self.cells[offset], bias.cells[offset % c]))
                .collect())
        })?;
        Ok(Container {
            shape: self.shape,
            cells,
        })
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
