use super::config::GraphConfig;
use super::graph::Graph;
use super::node::NodeId;
use super::recorder::Recorder;
use crate::error::ScalarGradError;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Output+: {output_plus:?}, Output-: {output_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        output_plus: f64,
        output_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Graph error during gradient check: {0}")]
    GraphError(ScalarGradError),
}

impl From<ScalarGradError> for GradCheckError {
    fn from(err: ScalarGradError) -> Self {
        GradCheckError::GraphError(err)
    }
}

/// Checks the gradients computed by the backward pass against central
/// finite differences.
///
/// `build` receives a fresh graph holding one participating leaf per entry of
/// `inputs` and must return the scalar output. Each input is perturbed by
/// `±epsilon` in a new graph; a mismatch is reported when both the absolute
/// and the relative difference exceed `tolerance`.
pub fn check_grad<F>(build: F, inputs: &[f64], epsilon: f64, tolerance: f64) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    check_grad_with_config(GraphConfig::default(), build, inputs, epsilon, tolerance)
}

/// [`check_grad`] on graphs created with `config`.
pub fn check_grad_with_config<F>(
    config: GraphConfig,
    build: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    let evaluate = |values: &[f64]| -> Result<(Graph, Vec<NodeId>, NodeId), ScalarGradError> {
        let mut graph = Graph::with_config(config);
        let leaves: Vec<NodeId> = values.iter().map(|&v| graph.leaf(v)).collect();
        let output = build(&mut graph, &leaves)?;
        Ok((graph, leaves, output))
    };

    let (mut graph, leaves, output) = evaluate(inputs)?;
    graph.backward(output)?;
    let analytical: Vec<f64> = leaves.iter().map(|&id| graph.grad(id)).collect();

    for (i, &analytical_grad) in analytical.iter().enumerate() {
        let mut perturbed = inputs.to_vec();

        perturbed[i] = inputs[i] + epsilon;
        let (plus_graph, _, plus) = evaluate(&perturbed)?;
        let output_plus = plus_graph.value(plus);

        perturbed[i] = inputs[i] - epsilon;
        let (minus_graph, _, minus) = evaluate(&perturbed)?;
        let output_minus = minus_graph.value(minus);

        let numerical_grad = (output_plus - output_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                output_plus,
                output_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }

    Ok(())
}
