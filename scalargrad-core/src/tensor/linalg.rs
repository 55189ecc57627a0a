use super::{Container, Matrix};
use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;

impl Matrix {
    /// Matrix product `self[m×k] · other[k×n]`.
    ///
    /// Each output cell is one n-ary sum over the `k` products, so the graph
    /// stays two levels deep regardless of `k`. Output rows are independent
    /// units of work.
    pub fn matmul(&self, graph: &mut Graph, other: &Matrix) -> Result<Matrix, ScalarGradError> {
        let [m, k] = self.shape;
        let [k2, n] = other.shape;
        if k != k2 {
            return Err(ScalarGradError::shape_mismatch(
                &[k],
                &[k2],
                "matmul (inner dimensions)",
            ));
        }

        let cells = graph.build(m, |f, i| {
            Ok((0..n)
                .map(|j| {
                    let products: Vec<NodeId> = (0..k)
                        .map(|t| f.mul(self.cells[i * k + t], other.cells[t * n + j]))
                        .collect();
                    f.sum(&products)
                })
                .collect())
        })?;
        Ok(Container {
            shape: [m, n],
            cells,
        })
    }

    /// Swaps rows and columns. Only handles move; no nodes are created.
    pub fn transpose(&self) -> Matrix {
        let [rows, cols] = self.shape;
        let cells = (0..cols)
            .flat_map(|j| (0..rows).map(move |i| (i, j)))
            .map(|(i, j)| self.cells[i * cols + j])
            .collect();
        Container {
            shape: [cols, rows],
            cells,
        }
    }
}

#[cfg(test)]
#[path = "linalg_test.rs"]
mod tests;
