use super::config::ExecutionMode;
use super::graph::Graph;
use super::node::{Node, NodeId};
use super::recorder::Recorder;
use crate::error::ScalarGradError;
use log::debug;
use rayon::prelude::*;

/// A private extension of a [`Graph`] used to build one independent unit of
/// work (an output row, a softmax lane, ...).
///
/// A fragment only reads the graph: new nodes go into its own buffer with
/// handles numbered from the graph's current length, as if they had been
/// appended. Fragments built side by side never see each other's nodes; the
/// graph merges them afterwards and relocates their handles.
#[derive(Debug)]
pub struct Fragment<'g> {
    graph: &'g Graph,
    base: usize,
    nodes: Vec<Node>,
}

impl<'g> Fragment<'g> {
    fn new(graph: &'g Graph) -> Self {
        Fragment {
            graph,
            base: graph.len(),
            nodes: Vec::new(),
        }
    }
}

impl Recorder for Fragment<'_> {
    fn node(&self, id: NodeId) -> &Node {
        if id.0 < self.base {
            &self.graph.nodes[id.0]
        } else {
            &self.nodes[id.0 - self.base]
        }
    }

    fn record(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.base + self.nodes.len() - 1)
    }
}

impl Graph {
    /// Builds `units` independent pieces of graph and returns their output
    /// handles, concatenated in unit order.
    ///
    /// `build` receives a fresh fragment and the unit index. In serial mode
    /// the units run one after another; in parallel mode they run on the rayon
    /// pool and are merged in unit order, so both modes produce the same
    /// arena.
    pub fn build<F>(&mut self, units: usize, build: F) -> Result<Vec<NodeId>, ScalarGradError>
    where
        F: Fn(&mut Fragment<'_>, usize) -> Result<Vec<NodeId>, ScalarGradError> + Sync + Send,
    {
        let mut outputs = Vec::new();
        match self.mode() {
            ExecutionMode::Serial => {
                for unit in 0..units {
                    let base = self.len();
                    let mut fragment = Fragment::new(self);
                    let unit_outputs = build(&mut fragment, unit)?;
                    let nodes = fragment.nodes;
                    outputs.extend(self.absorb(base, nodes, unit_outputs));
                }
            }
            ExecutionMode::Parallel => {
                let base = self.len();
                let built = {
                    let graph: &Graph = self;
                    (0..units)
                        .into_par_iter()
                        .map(|unit| {
                            let mut fragment = Fragment::new(graph);
                            let unit_outputs = build(&mut fragment, unit)?;
                            Ok((fragment.nodes, unit_outputs))
                        })
                        .collect::<Result<Vec<_>, ScalarGradError>>()?
                };
                debug!("Graph: merging {} parallel fragments", built.len());
                for (nodes, unit_outputs) in built {
                    outputs.extend(self.absorb(base, nodes, unit_outputs));
                }
            }
        }
        Ok(outputs)
    }

    /// Appends a fragment's nodes, shifting every handle that pointed into
    /// the fragment by the number of nodes merged since it was opened.
    fn absorb(&mut self, base: usize, nodes: Vec<Node>, outputs: Vec<NodeId>) -> Vec<NodeId> {
        let shift = self.nodes.len() - base;
        let relocate = |id: NodeId| {
            if id.0 >= base {
                NodeId(id.0 + shift)
            } else {
                id
            }
        };
        for mut node in nodes {
            for edge in &mut node.edges {
                edge.operand = relocate(edge.operand);
            }
            self.nodes.push(node);
        }
        outputs.into_iter().map(relocate).collect()
    }
}

#[cfg(test)]
#[path = "fragment_test.rs"]
mod tests;
