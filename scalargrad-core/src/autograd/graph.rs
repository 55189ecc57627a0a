use super::config::{ExecutionMode, GraphConfig};
use super::node::{accumulate, Node, NodeId};
use super::recorder::Recorder;
use crate::error::ScalarGradError;
use log::{debug, trace, warn};
use rayon::prelude::*;

/// Marker returned by [`Graph::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Arena owning every scalar node of a computation.
///
/// Nodes are appended by the operators and never removed individually; a
/// training loop creates its parameters, takes a [`Checkpoint`], and rewinds
/// to it after each optimizer step so the next forward pass starts from the
/// parameters alone.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    config: GraphConfig,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            nodes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn mode(&self) -> ExecutionMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: ExecutionMode) {
        self.config.mode = mode;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn try_node(&self, id: NodeId) -> Result<&Node, ScalarGradError> {
        self.nodes.get(id.0).ok_or(ScalarGradError::UnknownNode(id))
    }

    pub fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node, ScalarGradError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(ScalarGradError::UnknownNode(id))
    }

    pub fn grad(&self, id: NodeId) -> f64 {
        self.nodes[id.0].grad
    }

    /// Overwrites the value of a leaf, e.g. to feed the next sample through
    /// reused input nodes.
    ///
    /// # Errors
    /// `UnknownNode` for a foreign handle, `ConfigurationError` for a non-leaf:
    /// an operator output's value is fixed by its operands.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), ScalarGradError> {
        let node = self.try_node_mut(id)?;
        if !node.is_leaf() {
            return Err(ScalarGradError::ConfigurationError(format!(
                "cannot overwrite the value of operator output {}",
                id
            )));
        }
        node.value = value;
        Ok(())
    }

    /// Marks a leaf as participating (or not) in differentiation.
    ///
    /// Only affects nodes built afterwards: existing edges are fixed.
    pub fn set_requires_grad(&mut self, id: NodeId, requires_grad: bool) -> Result<(), ScalarGradError> {
        let node = self.try_node_mut(id)?;
        if !node.is_leaf() {
            return Err(ScalarGradError::ConfigurationError(format!(
                "requires_grad can only be changed on leaf nodes, {} is an operator output",
                id
            )));
        }
        node.requires_grad = requires_grad;
        Ok(())
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.nodes.len())
    }

    /// Drops every node created after `checkpoint`.
    ///
    /// Handles to dropped nodes become invalid; the checked accessors report
    /// them as `UnknownNode` until the arena grows past them again.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        if checkpoint.0 < self.nodes.len() {
            debug!(
                "Graph: rewinding from {} to {} nodes",
                self.nodes.len(),
                checkpoint.0
            );
            self.nodes.truncate(checkpoint.0);
        }
    }

    /// Resets the gradient of every node in `ids` to zero.
    pub fn zero_grad<I>(&mut self, ids: I) -> Result<(), ScalarGradError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        for id in ids {
            self.try_node_mut(id)?.grad = 0.0;
        }
        Ok(())
    }

    /// Returns the nodes reachable from `root` through gradient edges, ordered
    /// so that every node comes after all of its consumers.
    ///
    /// Iterative depth-first post-order, reversed. Shared operands are
    /// visited once.
    pub fn topological_sort(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        self.try_node(root)?;
        let mut visited = vec![false; self.nodes.len()];
        let mut post_order = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        visited[root.0] = true;

        while let Some(top) = stack.last_mut() {
            let (id, cursor) = *top;
            match self.nodes[id.0].edges.get(cursor) {
                Some(edge) => {
                    top.1 += 1;
                    let operand = edge.operand;
                    if !visited[operand.0] {
                        visited[operand.0] = true;
                        stack.push((operand, 0));
                    }
                }
                None => {
                    post_order.push(id);
                    stack.pop();
                }
            }
        }

        post_order.reverse();
        Ok(post_order)
    }

    /// Runs the backward pass from `root`.
    ///
    /// Sets `root.grad = 1`, then runs each reachable node's propagation once,
    /// in [`topological_sort`](Self::topological_sort) order, adding
    /// `grad * local_grad` into every operand. Gradients accumulate: call
    /// [`zero_grad`](Self::zero_grad) on long-lived nodes between iterations.
    pub fn backward(&mut self, root: NodeId) -> Result<(), ScalarGradError> {
        let order = self.topological_sort(root)?;
        if !self.nodes[root.0].requires_grad {
            warn!("backward() called on {} which does not require grad", root);
        }
        debug!("Graph: backward from {} over {} nodes", root, order.len());

        self.nodes[root.0].grad = 1.0;
        let clip = self.config.grad_clip();
        for id in order {
            self.propagate(id, clip);
        }
        Ok(())
    }

    fn propagate(&mut self, id: NodeId, clip: Option<f64>) {
        // Operands always precede their consumer in the arena.
        let (earlier, rest) = self.nodes.split_at_mut(id.0);
        let node = &rest[0];
        trace!(
            "propagate {} ({:?}) grad={} to {} operands",
            id,
            node.op,
            node.grad,
            node.edges.len()
        );
        for edge in &node.edges {
            accumulate(
                &mut earlier[edge.operand.0].grad,
                node.grad * edge.local_grad,
                clip,
            );
        }
    }

    /// Applies `update` to each node of `ids` together with its matching
    /// entry of `states`.
    ///
    /// Runs on the rayon pool in parallel mode. Every handle is checked
    /// before any node is touched, so a rejected call changes nothing.
    ///
    /// # Errors
    /// `ShapeMismatch` when `ids` and `states` differ in length,
    /// `UnknownNode` for a foreign handle, `ConfigurationError` for a
    /// repeated one.
    pub fn update_nodes<S, F>(
        &mut self,
        ids: &[NodeId],
        states: &mut [S],
        update: F,
    ) -> Result<(), ScalarGradError>
    where
        S: Send,
        F: Fn(&mut Node, &mut S) + Sync + Send,
    {
        if ids.len() != states.len() {
            return Err(ScalarGradError::shape_mismatch(
                &[ids.len()],
                &[states.len()],
                "update_nodes",
            ));
        }
        let mut seen = vec![false; self.nodes.len()];
        for &id in ids {
            match seen.get_mut(id.0) {
                None => return Err(ScalarGradError::UnknownNode(id)),
                Some(true) => {
                    return Err(ScalarGradError::ConfigurationError(format!(
                        "repeated handle {} in update_nodes",
                        id
                    )))
                }
                Some(flag) => *flag = true,
            }
        }

        match self.config.mode {
            ExecutionMode::Serial => {
                for (id, state) in ids.iter().zip(states.iter_mut()) {
                    update(&mut self.nodes[id.0], state);
                }
            }
            ExecutionMode::Parallel => {
                let mut slots: Vec<Option<&mut Node>> = self.nodes.iter_mut().map(Some).collect();
                let picked: Vec<&mut Node> = ids
                    .iter()
                    .filter_map(|id| slots[id.0].take())
                    .collect();
                picked
                    .into_par_iter()
                    .zip(states.par_iter_mut())
                    .for_each(|(node, state)| update(node, state));
            }
        }
        Ok(())
    }
}

impl Recorder for Graph {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn record(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
