//! Scalar nodes, the arena that owns them, and the backward scheduler.

pub mod config;
pub mod fragment;
pub mod grad_check;
pub mod graph;
pub mod node;
pub mod recorder;

pub use config::{ExecutionMode, GraphConfig, DEFAULT_GRAD_CLIP};
pub use fragment::Fragment;
pub use graph::{Checkpoint, Graph};
pub use node::{Edge, Node, NodeId, OpKind};
pub use recorder::Recorder;
