//! nf-graph: node/connection storage for nodeflow.
//!
//! Provides:
//! - Core graph data structures (Node, Input, Output, Socket, Connection)
//! - `NodeEditor`, which owns nodes, connections and the control arena
//! - Consistency checks used after structural edits
//!
//! # Example
//!
//! ```
//! use nf_controls::ProgressControl;
//! use nf_graph::{NodeDef, NodeEditor, Output, Socket};
//!
//! let socket = Socket::new("socket");
//! let mut editor = NodeEditor::new();
//! let a = editor
//!     .add_node(NodeDef::new("A").with_output("a", Output::new(socket)))
//!     .unwrap();
//! let progress = editor.add_control(a, "progress", ProgressControl::new(0.0)).unwrap();
//!
//! assert_eq!(editor.nodes().count(), 1);
//! assert_eq!(editor.control_owner(progress), Some(a));
//! ```

pub mod editor;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use editor::{NodeEditor, RemovedNode};
pub use error::{GraphError, GraphResult};
pub use graph::{Connection, Input, Node, NodeDef, Output, Socket};
