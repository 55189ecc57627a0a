use super::*;

#[test]
fn test_pad_shape_and_aliasing() {
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [2, 2, 1], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let padded = pad2d(&mut graph, &input, 1).unwrap();
    assert_eq!(padded.shape(), [4, 4, 1]);
    assert_eq!(
        padded.values(&graph),
        vec![
            0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 2.0, 0.0, //
            0.0, 3.0, 4.0, 0.0, //
            0.0, 0.0, 0.0, 0.0,
        ]
    );
    assert_eq!(padded.get([1, 1, 0]).unwrap(), input.get([0, 0, 0]).unwrap());
    assert_eq!(padded.get([2, 2, 0]).unwrap(), input.get([1, 1, 0]).unwrap());
    assert!(!graph.requires_grad(padded.get([0, 0, 0]).unwrap()));
}

#[test]
fn test_pad_zero_is_identity() {
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [1, 2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let before = graph.len();
    let padded = pad2d(&mut graph, &input, 0).unwrap();
    assert_eq!(padded, input);
    assert_eq!(graph.len(), before);
}

#[test]
fn test_pad_gradient_flows_to_interior() {
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [1, 1, 2], &[1.5, -2.0]).unwrap();
    let padded = pad2d(&mut graph, &input, 2).unwrap();
    assert_eq!(padded.shape(), [5, 5, 2]);
    let total = padded.sum(&mut graph);
    graph.backward(total).unwrap();
    assert_eq!(input.grads(&graph), vec![1.0, 1.0]);
}
