use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use approx::assert_relative_eq;

#[test]
fn test_relu_positive_and_negative() {
    let mut graph = Graph::new();
    let pos = graph.leaf(2.0);
    let neg = graph.leaf(-3.0);
    let a = relu_op(&mut graph, pos);
    let b = relu_op(&mut graph, neg);
    assert_relative_eq!(graph.value(a), 2.0);
    assert_relative_eq!(graph.value(b), 0.0);

    let total = graph.add(a, b);
    graph.backward(total).unwrap();
    assert_relative_eq!(graph.grad(pos), 1.0);
    assert_relative_eq!(graph.grad(neg), 0.0);
}

#[test]
fn test_relu_at_zero_has_zero_derivative() {
    let mut graph = Graph::new();
    let x = graph.leaf(0.0);
    let y = relu_op(&mut graph, x);
    graph.backward(y).unwrap();
    assert_relative_eq!(graph.value(y), 0.0);
    assert_relative_eq!(graph.grad(x), 0.0);
}

#[test]
fn test_leaky_relu() {
    let mut graph = Graph::new();
    let neg = graph.leaf(-2.0);
    let zero = graph.leaf(0.0);
    let a = leaky_relu_op(&mut graph, neg);
    let b = leaky_relu_op(&mut graph, zero);
    assert_relative_eq!(graph.value(a), -0.02);
    assert_relative_eq!(graph.value(b), 0.0);

    let total = graph.add(a, b);
    graph.backward(total).unwrap();
    assert_relative_eq!(graph.grad(neg), LEAKY_RELU_SLOPE);
    assert_relative_eq!(graph.grad(zero), 1.0);
}

#[test]
fn test_relu_grad_check() {
    check_grad(|graph, inputs| Ok(relu_op(graph, inputs[0])), &[1.3], 1e-6, 1e-4).unwrap();
    check_grad(|graph, inputs| Ok(relu_op(graph, inputs[0])), &[-0.9], 1e-6, 1e-4).unwrap();
}

#[test]
fn test_leaky_relu_grad_check() {
    check_grad(|graph, inputs| Ok(leaky_relu_op(graph, inputs[0])), &[1.3], 1e-6, 1e-4).unwrap();
    check_grad(|graph, inputs| Ok(leaky_relu_op(graph, inputs[0])), &[-0.9], 1e-6, 1e-4).unwrap();
}
