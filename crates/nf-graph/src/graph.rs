//! Core graph data structures.

use std::collections::BTreeMap;

use nf_core::{ConnectionId, ControlId, NodeId};

/// Connection point type.
///
/// Sockets are compared by name only; no compatibility rules are applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Socket {
    pub name: String,
}

impl Socket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Input slot of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub socket: Socket,
    pub label: Option<String>,
    /// Whether more than one connection may end here.
    pub multiple_connections: bool,
    /// Control shown in place of the input while nothing is connected.
    pub control: Option<ControlId>,
}

impl Input {
    pub fn new(socket: Socket) -> Self {
        Self {
            socket,
            label: None,
            multiple_connections: false,
            control: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple_connections = multiple;
        self
    }
}

/// Output slot of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub socket: Socket,
    pub label: Option<String>,
}

impl Output {
    pub fn new(socket: Socket) -> Self {
        Self {
            socket,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Shape of a node before it is added to an editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDef {
    pub label: String,
    pub inputs: BTreeMap<String, Input>,
    pub outputs: BTreeMap<String, Output>,
}

impl NodeDef {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Add an input; a later input with the same key replaces the earlier one.
    pub fn with_input(mut self, key: impl Into<String>, input: Input) -> Self {
        self.inputs.insert(key.into(), input);
        self
    }

    /// Add an output; a later output with the same key replaces the earlier one.
    pub fn with_output(mut self, key: impl Into<String>, output: Output) -> Self {
        self.outputs.insert(key.into(), output);
        self
    }
}

/// A node stored in the editor.
///
/// Controls are referenced by id; the controls themselves live in the
/// editor's control arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub inputs: BTreeMap<String, Input>,
    pub outputs: BTreeMap<String, Output>,
    pub controls: BTreeMap<String, ControlId>,
}

impl Node {
    pub(crate) fn from_def(id: NodeId, def: NodeDef) -> Self {
        Self {
            id,
            label: def.label,
            inputs: def.inputs,
            outputs: def.outputs,
            controls: BTreeMap::new(),
        }
    }

    pub fn input(&self, key: &str) -> Option<&Input> {
        self.inputs.get(key)
    }

    pub fn output(&self, key: &str) -> Option<&Output> {
        self.outputs.get(key)
    }

    pub fn control(&self, name: &str) -> Option<ControlId> {
        self.controls.get(name).copied()
    }

    /// Every control id owned by this node, including input controls.
    pub fn control_ids(&self) -> Vec<ControlId> {
        self.controls
            .values()
            .copied()
            .chain(self.inputs.values().filter_map(|input| input.control))
            .collect()
    }

    /// Whether `id` is one of this node's controls.
    pub fn owns_control(&self, id: ControlId) -> bool {
        self.control_ids().contains(&id)
    }
}

/// A wire from an output of one node to an input of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: NodeId,
    pub source_output: String,
    pub target: NodeId,
    pub target_input: String,
}

impl Connection {
    /// Whether either end is attached to `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_def_builder() {
        let socket = Socket::new("socket");
        let def = NodeDef::new("A")
            .with_input("in", Input::new(socket.clone()).with_label("In"))
            .with_output("out", Output::new(socket));
        assert_eq!(def.label, "A");
        assert_eq!(def.inputs["in"].label.as_deref(), Some("In"));
        assert!(!def.inputs["in"].multiple_connections);
        assert!(def.outputs.contains_key("out"));
    }

    #[test]
    fn control_ids_include_input_controls() {
        let mut node = Node::from_def(NodeId::from_index(0), NodeDef::new("A"));
        let mut input = Input::new(Socket::new("s"));
        input.control = Some(ControlId::from_index(7));
        node.inputs.insert("x".into(), input);
        node.controls.insert("c".into(), ControlId::from_index(3));

        let ids = node.control_ids();
        assert_eq!(ids, vec![ControlId::from_index(3), ControlId::from_index(7)]);
        assert!(node.owns_control(ControlId::from_index(7)));
        assert!(!node.owns_control(ControlId::from_index(8)));
    }

    #[test]
    fn connection_touches() {
        let c = Connection {
            id: ConnectionId::from_index(0),
            source: NodeId::from_index(1),
            source_output: "o".into(),
            target: NodeId::from_index(2),
            target_input: "i".into(),
        };
        assert!(c.touches(NodeId::from_index(1)));
        assert!(c.touches(NodeId::from_index(2)));
        assert!(!c.touches(NodeId::from_index(3)));
    }
}
