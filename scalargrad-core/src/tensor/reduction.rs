use super::{Container, Matrix, Tensor};
use crate::autograd::{Graph, NodeId, Recorder};
use crate::error::ScalarGradError;

/// The first node holding the largest value.
///
/// Ties keep the earliest cell. Returns the node itself, so gradient reaches
/// the winner through its own edges and nothing else.
pub(crate) fn argmax_node<R: Recorder>(recorder: &R, ids: impl IntoIterator<Item = NodeId>) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for id in ids {
        let value = recorder.value(id);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((id, value)),
        }
    }
    best.map(|(id, _)| id)
}

impl<const R: usize> Container<R> {
    /// Sum of every cell as a single n-ary node.
    pub fn sum(&self, graph: &mut Graph) -> NodeId {
        graph.sum(&self.cells)
    }

    /// Arithmetic mean of every cell.
    pub fn mean(&self, graph: &mut Graph) -> NodeId {
        let total = self.sum(graph);
        graph.mul_const(total, 1.0 / self.numel() as f64)
    }

    /// The cell holding the largest value (first one on ties).
    pub fn max(&self, graph: &Graph) -> NodeId {
        // containers are never empty
        argmax_node(graph, self.iter()).unwrap_or(self.cells[0])
    }
}

impl Tensor {
    /// Sums the channels at each position into an `h × w` matrix.
    pub fn sum_along_channels(&self, graph: &mut Graph) -> Result<Matrix, ScalarGradError> {
        let [h, w, c] = self.shape;
        let cells = graph.build(h, |f, i| {
            Ok((0..w)
                .map(|j| {
                    let start = (i * w + j) * c;
                    f.sum(&self.cells[start..start + c])
                })
                .collect())
        })?;
        Ok(Container { shape: [h, w], cells })
    }

    /// The winning node across the channels at each position, as an `h × w`
    /// matrix. No nodes are created.
    pub fn max_along_channels(&self, graph: &Graph) -> Matrix {
        let [h, w, c] = self.shape;
        let cells = self
            .cells
            .chunks(c)
            .map(|lane| argmax_node(graph, lane.iter().copied()).unwrap_or(lane[0]))
            .collect();
        Container { shape: [h, w], cells }
    }
}

#[cfg(test)]
#[path = "reduction_test.rs"]
mod tests;
