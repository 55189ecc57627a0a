use scalargrad_core::{Graph, NodeId, ScalarGradError};

/// Routes log output of the engine to the test harness when `RUST_LOG` is set.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Plain gradient descent on `params`, then gradient reset.
#[allow(dead_code)]
pub fn sgd_step(graph: &mut Graph, params: &[NodeId], lr: f64) -> Result<(), ScalarGradError> {
    for &id in params {
        let node = graph.try_node_mut(id)?;
        node.value -= lr * node.grad;
        node.grad = 0.0;
    }
    Ok(())
}
