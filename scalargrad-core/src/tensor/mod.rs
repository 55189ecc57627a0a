//! Fixed-shape containers of scalar nodes.
//!
//! A [`Container`] is a dense, row-major array of [`NodeId`]s with a shape of
//! rank `R`. [`Matrix`] (rank 2) doubles as a column vector, [`Tensor`]
//! (rank 3) is laid out `(height, width, channels)` with the channel index
//! varying fastest.
//!
//! Containers never own nodes: the cells are handles into a
//! [`Graph`], and every operator takes the graph explicitly. Copying a
//! container copies handles, not nodes.

use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;

pub mod create;
mod elementwise;
mod linalg;
pub(crate) mod reduction;
mod view;

pub use create::Initializer;

/// A shape-checked array of scalar nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<const R: usize> {
    shape: [usize; R],
    cells: Vec<NodeId>,
}

/// Rank-2 container. A vector is a matrix with one column.
pub type Matrix = Container<2>;

/// Rank-3 container, shape `(height, width, channels)`.
pub type Tensor = Container<3>;

/// Rejects shapes with a zero component.
pub(crate) fn validate_shape(shape: &[usize]) -> Result<(), ScalarGradError> {
    if shape.is_empty() || shape.iter().any(|&dim| dim == 0) {
        return Err(ScalarGradError::InvalidConstruction(format!(
            "every dimension must be at least 1, got shape {:?}",
            shape
        )));
    }
    Ok(())
}

impl<const R: usize> Container<R> {
    /// Wraps existing node handles, checked against `shape`.
    ///
    /// # Errors
    /// `InvalidConstruction` for a zero dimension or a cell count that does
    /// not match the shape.
    pub fn from_nodes(shape: [usize; R], cells: Vec<NodeId>) -> Result<Self, ScalarGradError> {
        validate_shape(&shape)?;
        let numel: usize = shape.iter().product();
        if cells.len() != numel {
            return Err(ScalarGradError::InvalidConstruction(format!(
                "shape {:?} needs {} cells, got {}",
                shape,
                numel,
                cells.len()
            )));
        }
        Ok(Container { shape, cells })
    }

    pub fn shape(&self) -> [usize; R] {
        self.shape
    }

    pub fn numel(&self) -> usize {
        self.cells.len()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[NodeId] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.cells.iter().copied()
    }

    /// Row-major offset of `index`.
    pub fn offset(&self, index: [usize; R]) -> Result<usize, ScalarGradError> {
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return Err(ScalarGradError::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.shape.to_vec(),
                });
            }
            offset = offset * dim + i;
        }
        Ok(offset)
    }

    pub fn get(&self, index: [usize; R]) -> Result<NodeId, ScalarGradError> {
        Ok(self.cells[self.offset(index)?])
    }

    /// Replaces the handle stored at `index`.
    pub fn set(&mut self, index: [usize; R], node: NodeId) -> Result<(), ScalarGradError> {
        let offset = self.offset(index)?;
        self.cells[offset] = node;
        Ok(())
    }

    pub fn values(&self, graph: &Graph) -> Vec<f64> {
        self.iter().map(|id| graph.value(id)).collect()
    }

    pub fn grads(&self, graph: &Graph) -> Vec<f64> {
        self.iter().map(|id| graph.grad(id)).collect()
    }

    pub fn zero_grad(&self, graph: &mut Graph) -> Result<(), ScalarGradError> {
        graph.zero_grad(self.iter())
    }

    /// Marks every cell as participating or frozen. Cells must be leaves.
    pub fn set_requires_grad(&self, graph: &mut Graph, requires_grad: bool) -> Result<(), ScalarGradError> {
        for id in self.iter() {
            graph.set_requires_grad(id, requires_grad)?;
        }
        Ok(())
    }

    /// Fails with `ShapeMismatch` unless `other` has the same shape.
    pub(crate) fn check_same_shape(&self, other: &Self, operation: &str) -> Result<(), ScalarGradError> {
        if self.shape != other.shape {
            return Err(ScalarGradError::shape_mismatch(&self.shape, &other.shape, operation));
        }
        Ok(())
    }

    /// Cells per unit of the outermost axis.
    pub(crate) fn row_len(&self) -> usize {
        self.cells.len() / self.shape[0]
    }
}

impl Matrix {
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    pub fn is_vector(&self) -> bool {
        self.shape[1] == 1
    }
}

impl Tensor {
    pub fn height(&self) -> usize {
        self.shape[0]
    }

    pub fn width(&self) -> usize {
        self.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.shape[2]
    }
}

#[cfg(test)]
#[path = "container_test.rs"]
mod tests;
