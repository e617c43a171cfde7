//! Graph-specific error types.

use nf_core::{ConnectionId, NfError, NodeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Structural editing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The node id is not in the editor.
    UnknownNode { node: NodeId },

    /// The connection id is not in the editor.
    UnknownConnection { connection: ConnectionId },

    /// A node already has an input/output/control under this key.
    DuplicateKey {
        node: NodeId,
        what: &'static str,
        key: String,
    },

    /// A node has no input/output under this key.
    UnknownKey {
        node: NodeId,
        what: &'static str,
        key: String,
    },

    /// The input accepts a single connection and already has one.
    InputOccupied { node: NodeId, key: String },

    /// Stored state disagrees with itself (found by `NodeEditor::validate`).
    Inconsistent { what: String },

    /// Shared foundation error, such as running out of ids.
    Core(NfError),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownNode { node } => write!(f, "Node {} does not exist", node),
            GraphError::UnknownConnection { connection } => {
                write!(f, "Connection {} does not exist", connection)
            }
            GraphError::DuplicateKey { node, what, key } => {
                write!(f, "Node {} already has {} '{}'", node, what, key)
            }
            GraphError::UnknownKey { node, what, key } => {
                write!(f, "Node {} has no {} '{}'", node, what, key)
            }
            GraphError::InputOccupied { node, key } => {
                write!(
                    f,
                    "Input '{}' of node {} accepts one connection and is already connected",
                    key, node
                )
            }
            GraphError::Inconsistent { what } => write!(f, "Inconsistent graph: {}", what),
            GraphError::Core(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NfError> for GraphError {
    fn from(err: NfError) -> Self {
        GraphError::Core(err)
    }
}
