use crate::autograd::Graph;
use crate::tensor::Container;

/// Checks that a container has the expected shape and that its values are
/// within `tolerance` of `expected_values`.
///
/// Panics on the first difference.
pub fn check_container_near<const R: usize>(
    graph: &Graph,
    actual: &Container<R>,
    expected_shape: [usize; R],
    expected_values: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    check_values_near(&actual.values(graph), expected_values, tolerance);
}

/// Element-wise comparison of two value slices within `tolerance`.
pub fn check_values_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
