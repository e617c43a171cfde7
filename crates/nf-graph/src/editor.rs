//! The node editor: owner of nodes, connections and controls.

use std::collections::BTreeMap;

use nf_controls::{Control, ControlArena, ControlStore};
use nf_core::{ConnectionId, ControlId, IdAllocator, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Connection, Input, Node, NodeDef, Output};
use crate::validate;

/// What went away with a removed node.
#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: Node,
    pub controls: Vec<ControlId>,
    pub connections: Vec<ConnectionId>,
}

/// Mutable store of the editor's graph.
///
/// Nodes and connections are kept in id order so iteration is deterministic.
/// Controls are stored in a [`ControlArena`] and referenced from nodes by id.
/// Nodes, controls and connections draw from one allocator, so an id never
/// names two objects.
#[derive(Debug, Default)]
pub struct NodeEditor {
    nodes: BTreeMap<NodeId, Node>,
    connections: BTreeMap<ConnectionId, Connection>,
    controls: ControlArena,
    ids: IdAllocator,
}

impl NodeEditor {
    /// Create a new empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, def: NodeDef) -> GraphResult<NodeId> {
        let id = self.ids.allocate()?;
        tracing::debug!(node = %id, label = %def.label, "node added");
        self.nodes.insert(id, Node::from_def(id, def));
        Ok(id)
    }

    /// Remove a node together with its controls and every connection
    /// touching it.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<RemovedNode> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(GraphError::UnknownNode { node: id })?;

        let connections: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.touches(id))
            .map(|c| c.id)
            .collect();
        for conn in &connections {
            self.connections.remove(conn);
        }

        let controls = self.controls.remove_owned_by(id);
        tracing::debug!(
            node = %id,
            controls = controls.len(),
            connections = connections.len(),
            "node removed"
        );

        Ok(RemovedNode {
            node,
            controls,
            connections,
        })
    }

    /// Add an input to an existing node.
    pub fn add_input(&mut self, node: NodeId, key: impl Into<String>, input: Input) -> GraphResult<()> {
        let key = key.into();
        let target = self.node_entry(node)?;
        if target.inputs.contains_key(&key) {
            return Err(GraphError::DuplicateKey {
                node,
                what: "input",
                key,
            });
        }
        target.inputs.insert(key, input);
        Ok(())
    }

    /// Add an output to an existing node.
    pub fn add_output(&mut self, node: NodeId, key: impl Into<String>, output: Output) -> GraphResult<()> {
        let key = key.into();
        let target = self.node_entry(node)?;
        if target.outputs.contains_key(&key) {
            return Err(GraphError::DuplicateKey {
                node,
                what: "output",
                key,
            });
        }
        target.outputs.insert(key, output);
        Ok(())
    }

    /// Attach a control to a node under `name` and return its id.
    ///
    /// Names are unique per node.
    pub fn add_control(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        control: impl Into<Control>,
    ) -> GraphResult<ControlId> {
        let name = name.into();
        if self.node_ref(node)?.controls.contains_key(&name) {
            return Err(GraphError::DuplicateKey {
                node,
                what: "control",
                key: name,
            });
        }

        let control = control.into();
        let kind = control.kind();
        let id = self.ids.allocate()?;
        self.controls.insert(id, node, name.clone(), control);
        self.node_entry(node)?.controls.insert(name.clone(), id);
        tracing::debug!(node = %node, control = %id, %kind, name = %name, "control attached");
        Ok(id)
    }

    /// Attach a control to an input; it is shown while the input is unconnected.
    pub fn set_input_control(
        &mut self,
        node: NodeId,
        key: &str,
        control: impl Into<Control>,
    ) -> GraphResult<ControlId> {
        let target = self.node_ref(node)?;
        let Some(input) = target.input(key) else {
            return Err(GraphError::UnknownKey {
                node,
                what: "input",
                key: key.to_string(),
            });
        };
        if input.control.is_some() {
            return Err(GraphError::DuplicateKey {
                node,
                what: "input control",
                key: key.to_string(),
            });
        }

        let id = self.ids.allocate()?;
        self.controls.insert(id, node, key, control.into());
        if let Some(input) = self.node_entry(node)?.inputs.get_mut(key) {
            input.control = Some(id);
        }
        Ok(id)
    }

    /// Connect `source.source_output` to `target.target_input`.
    pub fn add_connection(
        &mut self,
        source: NodeId,
        source_output: &str,
        target: NodeId,
        target_input: &str,
    ) -> GraphResult<ConnectionId> {
        validate::validate_connection(
            &self.nodes,
            &self.connections,
            source,
            source_output,
            target,
            target_input,
        )?;

        let id = self.ids.allocate()?;
        self.connections.insert(
            id,
            Connection {
                id,
                source,
                source_output: source_output.to_string(),
                target,
                target_input: target_input.to_string(),
            },
        );
        tracing::debug!(connection = %id, %source, %target, "connection added");
        Ok(id)
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> GraphResult<Connection> {
        self.connections
            .remove(&id)
            .ok_or(GraphError::UnknownConnection { connection: id })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Connections with either end on `node`.
    pub fn node_connections(&self, node: NodeId) -> Vec<&Connection> {
        self.connections.values().filter(|c| c.touches(node)).collect()
    }

    /// Whether anything is connected to `node.key`.
    pub fn is_input_connected(&self, node: NodeId, key: &str) -> bool {
        self.connections
            .values()
            .any(|c| c.target == node && c.target_input == key)
    }

    pub fn controls(&self) -> &ControlArena {
        &self.controls
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id)
    }

    pub fn control_owner(&self, id: ControlId) -> Option<NodeId> {
        self.controls.owner(id)
    }

    /// Check that nodes, connections and controls agree with each other.
    pub fn validate(&self) -> GraphResult<()> {
        validate::validate_consistency(&self.nodes, &self.connections, &self.controls)
    }

    /// Drop everything. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.controls.clear();
    }

    fn node_ref(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(&id).ok_or(GraphError::UnknownNode { node: id })
    }

    fn node_entry(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(GraphError::UnknownNode { node: id })
    }
}

impl ControlStore for NodeEditor {
    fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }
}
