use scalargrad_core::kernels::{conv2d, max_pool2d, pad2d};
use scalargrad_core::utils::testing::{check_container_near, check_values_near};
use scalargrad_core::{Graph, GraphConfig, Matrix, ScalarGradError, Tensor};

mod common;

struct Outcome {
    output: Vec<f64>,
    input_grads: Vec<f64>,
    kernel_grads: Vec<f64>,
    nodes: usize,
}

fn pipeline(config: GraphConfig) -> Result<Outcome, ScalarGradError> {
    let mut graph = Graph::with_config(config);
    let image_values: Vec<f64> = (0..6 * 6 * 2).map(|i| ((i * 13 % 17) as f64 - 8.0) / 8.0).collect();
    let kernel_values: Vec<f64> = (0..3 * 3 * 2).map(|i| ((i * 5 % 7) as f64 - 3.0) / 4.0).collect();
    let image = Tensor::from_values(&mut graph, [6, 6, 2], &image_values)?;
    let kernel = Tensor::from_values(&mut graph, [3, 3, 2], &kernel_values)?;

    let map = conv2d(&mut graph, &image, &kernel, 1, 1)?;
    let stacked = Tensor::from_channels(&[map.clone(), map])?;
    let activated = stacked.leaky_relu(&mut graph)?;
    let pooled = max_pool2d(&graph, &activated, 2)?;
    let probs = pooled.softmax(&mut graph)?;
    let weights = Matrix::from_values(&mut graph, [1, 18], &[0.5; 18])?;
    let score = weights.matmul(&mut graph, &probs.flatten())?;
    let root = score.sum(&mut graph);
    graph.backward(root)?;

    Ok(Outcome {
        output: probs.values(&graph),
        input_grads: image.grads(&graph),
        kernel_grads: kernel.grads(&graph),
        nodes: graph.len(),
    })
}

#[test]
fn test_serial_and_parallel_pipelines_agree() -> Result<(), ScalarGradError> {
    let serial = pipeline(GraphConfig::serial())?;
    let parallel = pipeline(GraphConfig::parallel())?;
    assert_eq!(serial.nodes, parallel.nodes);
    assert_eq!(serial.output, parallel.output);
    assert_eq!(serial.input_grads, parallel.input_grads);
    assert_eq!(serial.kernel_grads, parallel.kernel_grads);
    Ok(())
}

#[test]
fn test_padding_then_conv_matches_padded_conv() -> Result<(), ScalarGradError> {
    for config in [GraphConfig::serial(), GraphConfig::parallel()] {
        let mut graph = Graph::with_config(config);
        let values: Vec<f64> = (0..5 * 5 * 3).map(|i| (i as f64 * 0.1).sin()).collect();
        let image = Tensor::from_values(&mut graph, [5, 5, 3], &values)?;
        let kernel = Tensor::from_values(&mut graph, [3, 3, 3], &[0.1; 27])?;

        let direct = conv2d(&mut graph, &image, &kernel, 1, 1)?;
        let padded = pad2d(&mut graph, &image, 1)?;
        let manual = conv2d(&mut graph, &padded, &kernel, 1, 0)?;
        check_container_near(&graph, &direct, [5, 5], &manual.values(&graph), 1e-12);
    }
    Ok(())
}

#[test]
fn test_clipped_gradients_stay_bounded() -> Result<(), ScalarGradError> {
    let config = GraphConfig::parallel().with_grad_clip(0.5)?;
    let mut graph = Graph::with_config(config);
    let image = Tensor::from_values(&mut graph, [4, 4, 1], &[3.0; 16])?;
    let kernel = Tensor::from_values(&mut graph, [2, 2, 1], &[2.0; 4])?;
    let out = conv2d(&mut graph, &image, &kernel, 1, 0)?;
    let root = out.sum(&mut graph);
    graph.backward(root)?;
    for g in kernel.grads(&graph).into_iter().chain(image.grads(&graph)) {
        assert!(g.abs() <= 0.5);
    }
    check_values_near(&kernel.grads(&graph), &[0.5; 4], 1e-12);
    Ok(())
}
