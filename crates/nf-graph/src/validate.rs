//! Graph validation logic.

use std::collections::{BTreeMap, HashSet};

use nf_controls::ControlArena;
use nf_core::{ConnectionId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Connection, Node};

/// Check that a new connection can be made between the given endpoints.
pub(crate) fn validate_connection(
    nodes: &BTreeMap<NodeId, Node>,
    connections: &BTreeMap<ConnectionId, Connection>,
    source: NodeId,
    source_output: &str,
    target: NodeId,
    target_input: &str,
) -> GraphResult<()> {
    let source_node = nodes
        .get(&source)
        .ok_or(GraphError::UnknownNode { node: source })?;
    let target_node = nodes
        .get(&target)
        .ok_or(GraphError::UnknownNode { node: target })?;

    if source_node.output(source_output).is_none() {
        return Err(GraphError::UnknownKey {
            node: source,
            what: "output",
            key: source_output.to_string(),
        });
    }

    let Some(input) = target_node.input(target_input) else {
        return Err(GraphError::UnknownKey {
            node: target,
            what: "input",
            key: target_input.to_string(),
        });
    };

    if !input.multiple_connections {
        let occupied = connections
            .values()
            .any(|c| c.target == target && c.target_input == target_input);
        if occupied {
            return Err(GraphError::InputOccupied {
                node: target,
                key: target_input.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate that nodes, connections and controls agree with each other.
pub(crate) fn validate_consistency(
    nodes: &BTreeMap<NodeId, Node>,
    connections: &BTreeMap<ConnectionId, Connection>,
    controls: &ControlArena,
) -> GraphResult<()> {
    // Every connection must point at existing nodes and keys
    for conn in connections.values() {
        let source = nodes.get(&conn.source).ok_or_else(|| GraphError::Inconsistent {
            what: format!("connection {} starts at missing node {}", conn.id, conn.source),
        })?;
        let target = nodes.get(&conn.target).ok_or_else(|| GraphError::Inconsistent {
            what: format!("connection {} ends at missing node {}", conn.id, conn.target),
        })?;
        if source.output(&conn.source_output).is_none() {
            return Err(GraphError::Inconsistent {
                what: format!(
                    "connection {} uses missing output '{}'",
                    conn.id, conn.source_output
                ),
            });
        }
        if target.input(&conn.target_input).is_none() {
            return Err(GraphError::Inconsistent {
                what: format!(
                    "connection {} uses missing input '{}'",
                    conn.id, conn.target_input
                ),
            });
        }
    }

    // Every control referenced by a node must be in the arena and owned by it
    let mut referenced = HashSet::new();
    for node in nodes.values() {
        for id in node.control_ids() {
            if !referenced.insert(id) {
                return Err(GraphError::Inconsistent {
                    what: format!("control {} is referenced twice", id),
                });
            }
            if controls.owner(id) != Some(node.id) {
                return Err(GraphError::Inconsistent {
                    what: format!("control {} is not owned by node {}", id, node.id),
                });
            }
        }
    }

    // And every control in the arena must be referenced by its owner
    for (id, _) in controls.iter() {
        if !referenced.contains(&id) {
            return Err(GraphError::Inconsistent {
                what: format!("control {} is orphaned", id),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Input, NodeDef, Output, Socket};

    fn two_nodes() -> BTreeMap<NodeId, Node> {
        let socket = Socket::new("s");
        let a = NodeId::from_index(0);
        let b = NodeId::from_index(1);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            a,
            Node::from_def(a, NodeDef::new("A").with_output("out", Output::new(socket.clone()))),
        );
        nodes.insert(
            b,
            Node::from_def(b, NodeDef::new("B").with_input("in", Input::new(socket))),
        );
        nodes
    }

    #[test]
    fn validate_empty_graph() {
        let nodes = BTreeMap::new();
        let connections = BTreeMap::new();
        assert!(validate_consistency(&nodes, &connections, &ControlArena::new()).is_ok());
    }

    #[test]
    fn connection_to_missing_key_is_rejected() {
        let nodes = two_nodes();
        let connections = BTreeMap::new();
        let a = NodeId::from_index(0);
        let b = NodeId::from_index(1);

        let result = validate_connection(&nodes, &connections, a, "nope", b, "in");
        assert!(matches!(result, Err(GraphError::UnknownKey { what: "output", .. })));

        let result = validate_connection(&nodes, &connections, a, "out", b, "nope");
        assert!(matches!(result, Err(GraphError::UnknownKey { what: "input", .. })));
    }

    #[test]
    fn dangling_connection_is_inconsistent() {
        let nodes = two_nodes();
        let mut connections = BTreeMap::new();
        let id = ConnectionId::from_index(0);
        connections.insert(
            id,
            Connection {
                id,
                source: NodeId::from_index(0),
                source_output: "out".into(),
                target: NodeId::from_index(9), // missing
                target_input: "in".into(),
            },
        );
        let result = validate_consistency(&nodes, &connections, &ControlArena::new());
        assert!(matches!(result, Err(GraphError::Inconsistent { .. })));
    }

    #[test]
    fn orphaned_control_is_inconsistent() {
        let nodes = two_nodes();
        let connections = BTreeMap::new();
        let mut controls = ControlArena::new();
        controls.insert(
            nf_core::ControlId::from_index(5),
            NodeId::from_index(0),
            "ghost",
            nf_controls::ProgressControl::unset().into(),
        );
        let result = validate_consistency(&nodes, &connections, &controls);
        assert!(matches!(result, Err(GraphError::Inconsistent { .. })));
    }
}
