//! Render plugin: keeps the last output of everything on the canvas.
//!
//! Nothing here watches for changes. Output is recomputed only by the
//! `render_*` calls and by [`RenderPlugin::update`]; between those calls the
//! stored views stay exactly as they were, even if the underlying state moved.

use std::collections::HashMap;

use nf_core::{ConnectionId, ControlId, Id, NodeId};
use nf_graph::{NodeEditor, RemovedNode};

use crate::registry::{ControlRegistry, Renderer};
use crate::view::View;
use crate::widgets;

/// Which kind of element an update signal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Node,
    Control,
    Connection,
}

#[derive(Debug, Default)]
pub struct RenderPlugin {
    registry: ControlRegistry,
    renderers: HashMap<ControlId, Renderer>,
    nodes: HashMap<NodeId, View>,
    controls: HashMap<ControlId, View>,
    connections: HashMap<ConnectionId, View>,
}

impl RenderPlugin {
    pub fn new(registry: ControlRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    /// Strategies registered here apply to controls rendered for the first
    /// time afterwards.
    pub fn registry_mut(&mut self) -> &mut ControlRegistry {
        &mut self.registry
    }

    /// Render a node frame, plus any of its controls not yet rendered.
    ///
    /// Returns `false` if the node does not exist.
    pub fn render_node(&mut self, editor: &NodeEditor, id: NodeId) -> bool {
        let Some(node) = editor.node(id) else {
            return false;
        };
        self.nodes.insert(id, widgets::node::render(editor, node));
        for control in node.control_ids() {
            if !self.controls.contains_key(&control) {
                self.render_control(editor, control);
            }
        }
        tracing::debug!(node = %id, "node rendered");
        true
    }

    /// Render a control from its current state.
    ///
    /// The renderer is resolved on first use and kept, so the strategy a
    /// control was first drawn with stays in effect.
    pub fn render_control(&mut self, editor: &NodeEditor, id: ControlId) -> bool {
        let Some(control) = editor.controls().get(id) else {
            return false;
        };
        let registry = &self.registry;
        let renderer = self
            .renderers
            .entry(id)
            .or_insert_with(|| registry.resolve(id, control));
        let view = renderer.render(editor);
        tracing::debug!(control = %id, kind = %renderer.kind(), "control rendered");
        self.controls.insert(id, view);
        true
    }

    pub fn render_connection(&mut self, editor: &NodeEditor, id: ConnectionId) -> bool {
        let Some(connection) = editor.connection(id) else {
            return false;
        };
        self.connections
            .insert(id, widgets::node::render_connection(connection));
        true
    }

    /// Recompute the output of exactly one element.
    ///
    /// Ids the editor does not know are ignored.
    pub fn update(&mut self, editor: &NodeEditor, kind: UpdateKind, id: Id) {
        let found = match kind {
            UpdateKind::Node => self.render_node(editor, id),
            UpdateKind::Control => self.render_control(editor, id),
            UpdateKind::Connection => self.render_connection(editor, id),
        };
        if !found {
            tracing::debug!(?kind, %id, "update for unknown id ignored");
        }
    }

    /// The node frame with each control slot filled from the control's own
    /// last output.
    pub fn node_view(&self, id: NodeId) -> Option<View> {
        let frame = self.nodes.get(&id)?;
        Some(frame.fill_slots(&|control| self.controls.get(&control).cloned()))
    }

    /// The node frame as last rendered, slots unfilled.
    pub fn node_frame(&self, id: NodeId) -> Option<&View> {
        self.nodes.get(&id)
    }

    pub fn control_view(&self, id: ControlId) -> Option<&View> {
        self.controls.get(&id)
    }

    pub fn connection_view(&self, id: ConnectionId) -> Option<&View> {
        self.connections.get(&id)
    }

    pub fn is_rendered(&self, kind: UpdateKind, id: Id) -> bool {
        match kind {
            UpdateKind::Node => self.nodes.contains_key(&id),
            UpdateKind::Control => self.controls.contains_key(&id),
            UpdateKind::Connection => self.connections.contains_key(&id),
        }
    }

    /// Drop the output of a removed node, its controls and its connections.
    pub fn forget_node(&mut self, removed: &RemovedNode) {
        self.nodes.remove(&removed.node.id);
        for control in &removed.controls {
            self.controls.remove(control);
            self.renderers.remove(control);
        }
        for connection in &removed.connections {
            self.connections.remove(connection);
        }
        tracing::debug!(node = %removed.node.id, "node output dropped");
    }

    pub fn forget_connection(&mut self, id: ConnectionId) {
        self.connections.remove(&id);
    }

    pub fn clear(&mut self) {
        self.renderers.clear();
        self.nodes.clear();
        self.controls.clear();
        self.connections.clear();
    }
}
