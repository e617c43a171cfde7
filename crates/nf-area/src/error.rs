//! Error types for canvas operations.

use nf_controls::ControlError;
use nf_core::NfError;
use nf_graph::GraphError;
use thiserror::Error;

pub type AreaResult<T> = Result<T, AreaError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AreaError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error(transparent)]
    Core(#[from] NfError),
}
