use std::fmt;

/// Handle of a scalar node inside a [`Graph`](super::Graph) arena.
///
/// Handles are plain indices: they are cheap to copy and only meaningful for
/// the graph that issued them. Operands always carry a smaller index than the
/// node that consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The elementary operator that produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Leaf,
    Add,
    Mul,
    Pow,
    Log,
    Exp,
    Relu,
    LeakyRelu,
    Sigmoid,
}

/// One gradient edge: the operand to push gradient into, and the local
/// derivative of the owning node with respect to that operand, evaluated at
/// the forward values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub(crate) operand: NodeId,
    pub(crate) local_grad: f64,
}

impl Edge {
    pub fn operand(&self) -> NodeId {
        self.operand
    }

    pub fn local_grad(&self) -> f64 {
        self.local_grad
    }
}

/// A differentiable scalar.
///
/// `value` and `grad` are public: optimizers and loss wrappers read and write
/// them directly. The edge list is fixed at construction and only holds
/// operands that participate in differentiation; a node without edges that
/// is not a participating leaf is itself non-participating, so dead branches
/// are never visited by the backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: f64,
    pub grad: f64,
    pub(crate) requires_grad: bool,
    pub(crate) op: OpKind,
    pub(crate) edges: Vec<Edge>,
}

impl Node {
    /// Creates a leaf node from a raw value.
    pub fn leaf(value: f64, requires_grad: bool) -> Self {
        Node {
            value,
            grad: 0.0,
            requires_grad,
            op: OpKind::Leaf,
            edges: Vec::new(),
        }
    }

    /// Creates an operator output. It participates iff at least one edge survived pruning.
    pub(crate) fn from_op(op: OpKind, value: f64, edges: Vec<Edge>) -> Self {
        Node {
            value,
            grad: 0.0,
            requires_grad: !edges.is_empty(),
            op,
            edges,
        }
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn op(&self) -> OpKind {
        self.op
    }

    pub fn is_leaf(&self) -> bool {
        self.op == OpKind::Leaf
    }

    /// Operands this node pushes gradient into, in operand order.
    pub fn operands(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().map(|edge| edge.operand)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Adds `contribution` to `target`, clamping both the contribution and the
/// running total to `[-bound, bound]` when clipping is enabled.
pub(crate) fn accumulate(target: &mut f64, contribution: f64, clip: Option<f64>) {
    match clip {
        Some(bound) => {
            *target = (*target + contribution.clamp(-bound, bound)).clamp(-bound, bound);
        }
        None => *target += contribution,
    }
}
