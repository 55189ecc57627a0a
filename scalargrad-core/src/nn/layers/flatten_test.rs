use super::*;
use crate::tensor::{Matrix, Tensor};

#[test]
fn test_flatten_layer() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let t = Tensor::from_values(&mut graph, [1, 2, 2], &[1.0, 2.0, 3.0, 4.0])?;
    let out = Flatten.forward(&mut graph, t.clone().into())?.into_matrix("test")?;
    assert_eq!(out.shape(), [4, 1]);
    assert_eq!(out.cells(), t.cells());

    let m = Matrix::from_values(&mut graph, [2, 2], &[1.0, 2.0, 3.0, 4.0])?;
    let out = Flatten.forward(&mut graph, m.into())?.into_matrix("test")?;
    assert!(out.is_vector());
    Ok(())
}
