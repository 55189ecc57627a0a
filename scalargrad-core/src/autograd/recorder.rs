use super::node::{Edge, Node, NodeId, OpKind};
use crate::error::ScalarGradError;
use crate::ops;

/// Anything new scalar nodes can be recorded into.
///
/// Implemented by [`Graph`](super::Graph) for direct construction and by
/// [`Fragment`](super::Fragment) for construction on worker threads. The
/// elementary operators in [`crate::ops`] are written against this trait, so
/// the same code builds a subgraph serially or in parallel.
pub trait Recorder {
    /// Returns the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this recorder (or by the graph a
    /// fragment reads from).
    fn node(&self, id: NodeId) -> &Node;

    /// Appends `node` and returns its handle.
    fn record(&mut self, node: Node) -> NodeId;

    fn value(&self, id: NodeId) -> f64 {
        self.node(id).value
    }

    fn requires_grad(&self, id: NodeId) -> bool {
        self.node(id).requires_grad
    }

    /// Creates a participating leaf.
    fn leaf(&mut self, value: f64) -> NodeId {
        self.record(Node::leaf(value, true))
    }

    /// Creates a leaf that never receives gradient.
    fn constant(&mut self, value: f64) -> NodeId {
        self.record(Node::leaf(value, false))
    }

    /// Records an operator output, keeping only the operands that participate.
    ///
    /// `operands` pairs each logical operand with the local derivative of the
    /// output with respect to it.
    fn record_op<I>(&mut self, op: OpKind, value: f64, operands: I) -> NodeId
    where
        Self: Sized,
        I: IntoIterator<Item = (NodeId, f64)>,
    {
        let edges: Vec<Edge> = operands
            .into_iter()
            .filter(|(operand, _)| self.node(*operand).requires_grad)
            .map(|(operand, local_grad)| Edge {
                operand,
                local_grad,
            })
            .collect();
        self.record(Node::from_op(op, value, edges))
    }

    fn add(&mut self, a: NodeId, b: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::add_op(self, a, b)
    }

    fn sum(&mut self, operands: &[NodeId]) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::sum_op(self, operands)
    }

    fn sub(&mut self, a: NodeId, b: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::sub_op(self, a, b)
    }

    fn neg(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::neg_op(self, a)
    }

    fn mul(&mut self, a: NodeId, b: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::mul_op(self, a, b)
    }

    fn add_const(&mut self, a: NodeId, constant: f64) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::add_const_op(self, a, constant)
    }

    fn mul_const(&mut self, a: NodeId, constant: f64) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::mul_const_op(self, a, constant)
    }

    fn pow(&mut self, a: NodeId, exponent: f64) -> NodeId
    where
        Self: Sized,
    {
        ops::arithmetic::pow_op(self, a, exponent)
    }

    fn div(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, ScalarGradError>
    where
        Self: Sized,
    {
        ops::arithmetic::div_op(self, a, b)
    }

    fn div_const(&mut self, a: NodeId, constant: f64) -> Result<NodeId, ScalarGradError>
    where
        Self: Sized,
    {
        ops::arithmetic::div_const_op(self, a, constant)
    }

    fn log(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::math_elem::log_op(self, a)
    }

    fn exp(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::math_elem::exp_op(self, a)
    }

    fn relu(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::activation::relu_op(self, a)
    }

    fn leaky_relu(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::activation::leaky_relu_op(self, a)
    }

    fn sigmoid(&mut self, a: NodeId) -> NodeId
    where
        Self: Sized,
    {
        ops::activation::sigmoid_op(self, a)
    }
}
