use super::*;
use crate::autograd::grad_check::check_grad;
use crate::autograd::GraphConfig;
use crate::tensor::Initializer;
use approx::assert_relative_eq;

#[test]
fn test_output_size_matches_formula() {
    assert_eq!(conv_transpose2d_output_size((2, 2), (2, 2), 1, 0), Some((3, 3)));
    assert_eq!(conv_transpose2d_output_size((4, 3), (3, 3), 2, 1), Some((7, 5)));
    assert_eq!(conv_transpose2d_output_size((1, 1), (2, 2), 1, 1), None);
    assert_eq!(conv_transpose2d_output_size((0, 2), (2, 2), 1, 0), None);
}

#[test]
fn test_overlapping_windows_accumulate() {
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [2, 2, 1], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let kernel = Tensor::new(&mut graph, [2, 2, 1], Initializer::Ones).unwrap();
    let out = conv_transpose2d(&mut graph, &input, &kernel, 1, 0).unwrap();
    assert_eq!(out.shape(), [3, 3]);
    assert_eq!(
        out.values(&graph),
        vec![1.0, 3.0, 2.0, 4.0, 10.0, 6.0, 3.0, 7.0, 4.0]
    );

    let total = out.sum(&mut graph);
    graph.backward(total).unwrap();
    // every input cell scatters the whole kernel, every kernel cell sees every input
    assert_eq!(input.grads(&graph), vec![4.0; 4]);
    assert_eq!(kernel.grads(&graph), vec![10.0; 4]);
}

#[test]
fn test_padding_crops_borders() {
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [2, 2, 1], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let kernel = Tensor::new(&mut graph, [2, 2, 1], Initializer::Ones).unwrap();
    let out = conv_transpose2d(&mut graph, &input, &kernel, 1, 1).unwrap();
    assert_eq!(out.shape(), [1, 1]);
    assert_eq!(out.values(&graph), vec![10.0]);
}

#[test]
fn test_stride_spreads_windows_and_sums_channels() {
    // stride 3 with a 2x2 kernel leaves a zero gap between windows
    let mut graph = Graph::new();
    let input = Tensor::from_values(&mut graph, [2, 2, 2], &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]).unwrap();
    let kernel = Tensor::new(&mut graph, [2, 2, 2], Initializer::Ones).unwrap();
    let out = conv_transpose2d(&mut graph, &input, &kernel, 3, 0).unwrap();
    assert_eq!(out.shape(), [5, 5]);
    assert_relative_eq!(graph.value(out.get([0, 0]).unwrap()), 2.0);
    assert_relative_eq!(graph.value(out.get([1, 4]).unwrap()), 4.0);
    assert_relative_eq!(graph.value(out.get([4, 3]).unwrap()), 8.0);
    assert_relative_eq!(graph.value(out.get([2, 2]).unwrap()), 0.0);
    assert!(!graph.requires_grad(out.get([2, 2]).unwrap()));

    let total = out.sum(&mut graph);
    graph.backward(total).unwrap();
    assert_eq!(input.grads(&graph), vec![4.0; 8]);
}

#[test]
fn test_conv_transpose_validation() {
    let mut graph = Graph::new();
    let input = Tensor::new(&mut graph, [2, 2, 2], Initializer::Zeros).unwrap();
    let wrong_channels = Tensor::new(&mut graph, [2, 2, 3], Initializer::Zeros).unwrap();
    let kernel = Tensor::new(&mut graph, [2, 2, 2], Initializer::Zeros).unwrap();

    assert!(matches!(
        conv_transpose2d(&mut graph, &input, &wrong_channels, 1, 0),
        Err(ScalarGradError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        conv_transpose2d(&mut graph, &input, &kernel, 0, 0),
        Err(ScalarGradError::InvalidConstruction(_))
    ));
    assert!(matches!(
        conv_transpose2d(&mut graph, &input, &kernel, 1, 2),
        Err(ScalarGradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_conv_transpose_grad_check() {
    let build = |graph: &mut Graph, inputs: &[NodeId]| -> Result<NodeId, ScalarGradError> {
        let image = Tensor::from_nodes([2, 3, 2], inputs[..12].to_vec())?;
        let kernel = Tensor::from_nodes([3, 3, 2], inputs[12..].to_vec())?;
        let out = conv_transpose2d(graph, &image, &kernel, 2, 1)?.sigmoid(graph)?;
        Ok(out.sum(graph))
    };
    let values: Vec<f64> = (0..30).map(|x| ((x * 5 % 13) as f64 - 6.0) * 0.1).collect();
    check_grad(build, &values, 1e-6, 1e-4).unwrap();
}

#[test]
fn test_parallel_conv_transpose_matches_serial() {
    let run = |config: GraphConfig| {
        let mut graph = Graph::with_config(config);
        let image_values: Vec<f64> = (0..27).map(|x| (x as f64 * 0.29).cos()).collect();
        let kernel_values: Vec<f64> = (0..27).map(|x| (x as f64 * 0.13).sin()).collect();
        let image = Tensor::from_values(&mut graph, [3, 3, 3], &image_values).unwrap();
        let kernel = Tensor::from_values(&mut graph, [3, 3, 3], &kernel_values).unwrap();
        let out = conv_transpose2d(&mut graph, &image, &kernel, 2, 1).unwrap();
        let total = out.sum(&mut graph);
        graph.backward(total).unwrap();
        (out.values(&graph), image.grads(&graph), kernel.grads(&graph), graph.len())
    };
    assert_eq!(run(GraphConfig::serial()), run(GraphConfig::parallel()));
}
