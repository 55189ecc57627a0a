use super::*;
use crate::nn::{Conv2d, Sequential};
use crate::autograd::Recorder;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_conv_transpose2d_upsamples() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let config = Conv2dConfig::new(2, 3, 3).with_stride(2).with_padding(1);
    let layer = ConvTranspose2d::new_with_rng(&mut graph, config, &mut StdRng::seed_from_u64(3))?;
    assert_eq!(layer.out_channels(), 3);
    assert_eq!(layer.parameters().len(), 3 * 18 + 3);

    let input = Tensor::new(&mut graph, [4, 4, 2], Initializer::Ones)?;
    let out = layer.forward(&mut graph, input.into())?.into_tensor("test")?;
    assert_eq!(out.shape(), [7, 7, 3]);
    Ok(())
}

#[test]
fn test_conv_transpose2d_bias_and_gradients() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let config = Conv2dConfig::new(1, 1, 2);
    let mut layer = ConvTranspose2d::new(&mut graph, config)?;
    layer.kernels[0] = Tensor::from_values(&mut graph, [2, 2, 1], &[1.0; 4])?;
    layer.bias = Some(Matrix::vector(&mut graph, &[0.5])?);

    let input = Tensor::constants(&mut graph, [2, 2, 1], &[1.0, 2.0, 3.0, 4.0])?;
    let out = layer.forward(&mut graph, input.into())?.into_tensor("test")?;
    assert_eq!(out.shape(), [3, 3, 1]);
    assert_relative_eq!(graph.value(out.get([1, 1, 0])?), 10.5);

    let total = out.sum(&mut graph);
    graph.backward(total)?;
    let bias = layer.bias.as_ref().unwrap();
    assert_relative_eq!(graph.grad(bias.get([0, 0])?), 9.0);
    assert_eq!(layer.kernels[0].grads(&graph), vec![10.0; 4]);
    Ok(())
}

#[test]
fn test_conv_transpose2d_invalid_config_and_input() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    assert!(matches!(
        ConvTranspose2d::new(&mut graph, Conv2dConfig::new(1, 1, 2).with_stride(0)),
        Err(ScalarGradError::ConfigurationError(_))
    ));
    let layer = ConvTranspose2d::new(&mut graph, Conv2dConfig::new(1, 1, 2))?;
    let matrix = Matrix::new(&mut graph, [2, 2], Initializer::Ones)?;
    assert!(layer.forward(&mut graph, matrix.into()).is_err());
    Ok(())
}

#[test]
fn test_encoder_decoder_restores_spatial_size() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(11);
    let model = Sequential::new(vec![
        Box::new(Conv2d::new_with_rng(
            &mut graph,
            Conv2dConfig::new(1, 2, 3).with_padding(1).with_stride(2),
            &mut rng,
        )?) as Box<dyn Layer>,
        Box::new(ConvTranspose2d::new_with_rng(
            &mut graph,
            Conv2dConfig::new(2, 1, 4).with_padding(1).with_stride(2),
            &mut rng,
        )?),
    ])?;
    let input = Tensor::new(&mut graph, [6, 6, 1], Initializer::Ones)?;
    let out = model.forward(&mut graph, input.into())?.into_tensor("test")?;
    assert_eq!(out.shape(), [6, 6, 1]);
    Ok(())
}
