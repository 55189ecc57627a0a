use super::*;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_and_ones() {
    let mut graph = Graph::new();
    let z = Matrix::new(&mut graph, [2, 3], Initializer::Zeros).unwrap();
    let o = Tensor::new(&mut graph, [2, 2, 2], Initializer::Ones).unwrap();
    assert_eq!(z.values(&graph), vec![0.0; 6]);
    assert_eq!(o.values(&graph), vec![1.0; 8]);
    assert!(z.iter().all(|id| graph.requires_grad(id)));
}

#[test]
fn test_zero_dimension_rejected() {
    let mut graph = Graph::new();
    let result = Matrix::new(&mut graph, [0, 3], Initializer::Zeros);
    assert!(matches!(result, Err(ScalarGradError::InvalidConstruction(_))));
    assert!(graph.is_empty());
}

#[test]
fn test_from_values_checks_length() {
    let mut graph = Graph::new();
    assert!(matches!(
        Matrix::from_values(&mut graph, [2, 2], &[]),
        Err(ScalarGradError::InvalidConstruction(_))
    ));
    assert!(matches!(
        Matrix::from_values(&mut graph, [2, 2], &[1.0, 2.0, 3.0]),
        Err(ScalarGradError::InvalidConstruction(_))
    ));
    let m = Matrix::from_values(&mut graph, [2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_relative_eq!(graph.value(m.get([1, 0]).unwrap()), 3.0);
}

#[test]
fn test_constants_are_frozen() {
    let mut graph = Graph::new();
    let c = Matrix::constants(&mut graph, [1, 2], &[1.0, 2.0]).unwrap();
    assert!(c.iter().all(|id| !graph.requires_grad(id)));
}

#[test]
fn test_seeded_init_is_reproducible() {
    let mut graph = Graph::new();
    let a = Matrix::new_with_rng(&mut graph, [4, 5], Initializer::he_normal(), &mut StdRng::seed_from_u64(7)).unwrap();
    let b = Matrix::new_with_rng(&mut graph, [4, 5], Initializer::he_normal(), &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a.values(&graph), b.values(&graph));
    assert_ne!(a.cells(), b.cells());
}

#[test]
fn test_uniform_within_bounds() {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(3);
    let t = Tensor::new_with_rng(&mut graph, [3, 3, 2], Initializer::uniform(), &mut rng).unwrap();
    for v in t.values(&graph) {
        assert!((-DEFAULT_UNIFORM_BOUND..DEFAULT_UNIFORM_BOUND).contains(&v));
    }
    let bad = Initializer::Uniform { low: 1.0, high: 1.0 };
    assert!(Matrix::new_with_rng(&mut graph, [1, 1], bad, &mut rng).is_err());
}

#[test]
fn test_he_normal_spread_follows_fan_in() {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(11);
    let m = Matrix::new_with_rng(&mut graph, [200, 50], Initializer::he_normal(), &mut rng).unwrap();
    let values = m.values(&graph);
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    assert_relative_eq!(variance, 2.0 / 50.0, max_relative = 0.1);
    assert!(mean.abs() < 0.02);
}

#[test]
fn test_he_normal_zero_fan_in_rejected() {
    let mut graph = Graph::new();
    let init = Initializer::HeNormal { fan_in: Some(0) };
    assert!(matches!(
        Matrix::new(&mut graph, [2, 2], init),
        Err(ScalarGradError::InvalidConstruction(_))
    ));
}

#[test]
fn test_from_rows_and_vector() {
    let mut graph = Graph::new();
    let m = Matrix::from_rows(&mut graph, &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    assert_eq!(m.shape(), [3, 2]);
    assert_eq!(m.values(&graph), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert!(Matrix::from_rows(&mut graph, &[vec![1.0], vec![2.0, 3.0]]).is_err());

    let v = Matrix::vector(&mut graph, &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(v.shape(), [3, 1]);
    assert!(v.is_vector());
}

#[test]
fn test_from_channels_interleaves() {
    let mut graph = Graph::new();
    let red = Matrix::from_values(&mut graph, [1, 2], &[1.0, 2.0]).unwrap();
    let green = Matrix::from_values(&mut graph, [1, 2], &[10.0, 20.0]).unwrap();
    let t = Tensor::from_channels(&[red.clone(), green]).unwrap();
    assert_eq!(t.shape(), [1, 2, 2]);
    assert_eq!(t.values(&graph), vec![1.0, 10.0, 2.0, 20.0]);
    assert_eq!(t.get([0, 1, 0]).unwrap(), red.get([0, 1]).unwrap());

    let odd = Matrix::from_values(&mut graph, [2, 1], &[0.0, 0.0]).unwrap();
    assert!(matches!(
        Tensor::from_channels(&[red, odd]),
        Err(ScalarGradError::ShapeMismatch { .. })
    ));
    assert!(Tensor::from_channels(&[]).is_err());
}
