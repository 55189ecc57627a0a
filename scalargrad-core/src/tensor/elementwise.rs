use super::Container;
use crate::autograd::{Fragment, Graph, NodeId, Recorder};
use crate::error::ScalarGradError;
use crate::ops::activation::Activation;

impl<const R: usize> Container<R> {
    /// Builds a same-shaped container whose cells are `f` of the matching
    /// input cells, one row per unit of work.
    fn map_cells<F>(&self, graph: &mut Graph, f: F) -> Result<Self, ScalarGradError>
    where
        F: Fn(&mut Fragment<'_>, usize) -> Result<NodeId, ScalarGradError> + Sync + Send,
    {
        let row_len = self.row_len();
        let cells = graph.build(self.shape[0], |fragment, row| {
            (row * row_len..(row + 1) * row_len)
                .map(|offset| f(fragment, offset))
                .collect()
        })?;
        Ok(Container {
            shape: self.shape,
            cells,
        })
    }

    /// Cell-wise sum of two equally shaped containers.
    pub fn add(&self, graph: &mut Graph, other: &Self) -> Result<Self, ScalarGradError> {
        self.check_same_shape(other, "add")?;
        self.map_cells(graph, |f, i| Ok(f.add(self.cells[i], other.cells[i])))
    }

    pub fn sub(&self, graph: &mut Graph, other: &Self) -> Result<Self, ScalarGradError> {
        self.check_same_shape(other, "sub")?;
        self.map_cells(graph, |f, i| Ok(f.sub(self.cells[i], other.cells[i])))
    }

    /// Cell-wise (Hadamard) product.
    pub fn mul_elementwise(&self, graph: &mut Graph, other: &Self) -> Result<Self, ScalarGradError> {
        self.check_same_shape(other, "mul_elementwise")?;
        self.map_cells(graph, |f, i| Ok(f.mul(self.cells[i], other.cells[i])))
    }

    /// Multiplies every cell by a constant.
    pub fn scale(&self, graph: &mut Graph, factor: f64) -> Result<Self, ScalarGradError> {
        self.map_cells(graph, |f, i| Ok(f.mul_const(self.cells[i], factor)))
    }

    /// Applies `activation` to every cell, or lane-wise for softmax.
    pub fn activate(&self, graph: &mut Graph, activation: Activation) -> Result<Self, ScalarGradError> {
        match activation {
            Activation::Identity => Ok(self.clone()),
            Activation::Softmax => self.softmax(graph),
            pointwise => self.map_cells(graph, |f, i| {
                pointwise.apply(f, self.cells[i]).ok_or_else(|| {
                    ScalarGradError::ConfigurationError(format!("{:?} is not pointwise", pointwise))
                })
            }),
        }
    }

    pub fn relu(&self, graph: &mut Graph) -> Result<Self, ScalarGradError> {
        self.activate(graph, Activation::Relu)
    }

    pub fn leaky_relu(&self, graph: &mut Graph) -> Result<Self, ScalarGradError> {
        self.activate(graph, Activation::LeakyRelu)
    }

    pub fn sigmoid(&self, graph: &mut Graph) -> Result<Self, ScalarGradError> {
        self.activate(graph, Activation::Sigmoid)
    }

    /// Offsets of the cells normalized together by [`softmax`](Self::softmax):
    /// the columns of a matrix, the channel vector at each position of a
    /// tensor.
    pub(crate) fn lanes(&self) -> Vec<Vec<usize>> {
        match self.shape.as_slice() {
            [rows, cols] => (0..*cols)
                .map(|j| (0..*rows).map(|i| i * cols + j).collect())
                .collect(),
            [h, w, c] => (0..h * w)
                .map(|position| (position * c..(position + 1) * c).collect())
                .collect(),
            _ => vec![(0..self.cells.len()).collect()],
        }
    }

    /// Softmax over each lane.
    ///
    /// The lane maximum is subtracted as a constant before exponentiating;
    /// the normalization is built from `sum`, `pow(·, -1)` and `mul`, so the
    /// gradient follows by composition.
    pub fn softmax(&self, graph: &mut Graph) -> Result<Self, ScalarGradError> {
        let lanes = self.lanes();
        let outputs = graph.build(lanes.len(), |f, lane| {
            let ids: Vec<NodeId> = lanes[lane].iter().map(|&offset| self.cells[offset]).collect();
            let max = ids
                .iter()
                .map(|&id| f.value(id))
                .fold(f64::NEG_INFINITY, f64::max);
            let exps: Vec<NodeId> = ids
                .iter()
                .map(|&id| {
                    let shifted = f.add_const(id, -max);
                    f.exp(shifted)
                })
                .collect();
            let total = f.sum(&exps);
            let inverse = f.pow(total, -1.0);
            Ok(exps.into_iter().map(|e| f.mul(e, inverse)).collect())
        })?;

        let mut cells = self.cells.clone();
        for (offset, id) in lanes.iter().flatten().zip(outputs) {
            cells[*offset] = id;
        }
        Ok(Container {
            shape: self.shape,
            cells,
        })
    }
}

#[cfg(test)]
#[path = "elementwise_test.rs"]
mod tests;
