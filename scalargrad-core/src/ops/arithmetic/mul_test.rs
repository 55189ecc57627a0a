use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use approx::assert_relative_eq;

#[test]
fn test_mul_forward_and_backward() {
    let mut graph = Graph::new();
    let a = graph.leaf(3.0);
    let b = graph.leaf(-4.0);
    let c = mul_op(&mut graph, a, b);
    assert_relative_eq!(graph.value(c), -12.0);

    graph.backward(c).unwrap();
    assert_relative_eq!(graph.grad(a), -4.0);
    assert_relative_eq!(graph.grad(b), 3.0);
}

#[test]
fn test_square_fan_out() {
    // x is used twice by the same node: both contributions must land.
    let mut graph = Graph::new();
    let x = graph.leaf(1.7);
    let y = mul_op(&mut graph, x, x);
    graph.backward(y).unwrap();
    assert_relative_eq!(graph.grad(x), 2.0 * 1.7);
}

#[test]
fn test_mul_by_constant_keeps_only_participating_edge() {
    let mut graph = Graph::new();
    let a = graph.leaf(2.0);
    let b = graph.constant(5.0);
    let c = mul_op(&mut graph, a, b);
    let node = graph.node(c);
    assert_eq!(node.edges().len(), 1);
    assert_eq!(node.edges()[0].operand(), a);
    assert_relative_eq!(node.edges()[0].local_grad(), 5.0);

    graph.backward(c).unwrap();
    assert_relative_eq!(graph.grad(a), 5.0);
    assert_relative_eq!(graph.grad(b), 0.0);
}

#[test]
fn test_mul_const() {
    let mut graph = Graph::new();
    let a = graph.leaf(2.5);
    let c = mul_const_op(&mut graph, a, -2.0);
    assert_relative_eq!(graph.value(c), -5.0);
    graph.backward(c).unwrap();
    assert_relative_eq!(graph.grad(a), -2.0);
}

#[test]
fn test_mul_grad_check() {
    check_grad(
        |graph, inputs| Ok(mul_op(graph, inputs[0], inputs[1])),
        &[1.3, -0.7],
        1e-6,
        1e-4,
    )
    .unwrap();
}
