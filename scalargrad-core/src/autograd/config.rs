use crate::error::ScalarGradError;

/// Recommended symmetric bound when gradient clipping is switched on.
pub const DEFAULT_GRAD_CLIP: f64 = 10.0;

/// How container kernels build their output cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One thread, cells built in order.
    #[default]
    Serial,
    /// Independent output rows/lanes are built on the rayon pool and merged in order.
    Parallel,
}

/// Settings carried by a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GraphConfig {
    pub mode: ExecutionMode,
    /// Set only through [`with_grad_clip`](Self::with_grad_clip), which
    /// validates the bound.
    grad_clip: Option<f64>,
}

impl GraphConfig {
    pub fn serial() -> Self {
        GraphConfig::default()
    }

    pub fn parallel() -> Self {
        GraphConfig {
            mode: ExecutionMode::Parallel,
            ..GraphConfig::default()
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Symmetric bound applied to every gradient accumulation, or `None` for no clipping.
    pub fn grad_clip(&self) -> Option<f64> {
        self.grad_clip
    }

    /// Enables gradient clipping to `[-bound, bound]`.
    ///
    /// # Errors
    /// Returns `ConfigurationError` unless `bound` is finite and strictly positive.
    pub fn with_grad_clip(mut self, bound: f64) -> Result<Self, ScalarGradError> {
        if !bound.is_finite() || bound <= 0.0 {
            return Err(ScalarGradError::ConfigurationError(format!(
                "gradient clip bound must be finite and positive, got {}",
                bound
            )));
        }
        self.grad_clip = Some(bound);
        Ok(self)
    }
}
