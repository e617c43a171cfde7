//! The canvas.

use std::collections::BTreeMap;

use nf_controls::{Control, ControlHost, ControlHostExt, ControlStore, EditOutcome};
use nf_core::{ConnectionId, ControlId, Id, NodeId, Real, ensure_finite};
use nf_graph::{Connection, GraphError, Input, Node, NodeDef, NodeEditor, Output, RemovedNode};
use nf_render::{ControlRegistry, Effect, Propagation, RenderPlugin, UiEvent, UpdateKind, View};

use crate::config::AreaConfig;
use crate::error::AreaResult;
use crate::geometry::{Point, Rect, Transform};

/// Where a pointer event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// On a control's rendered output.
    Control(ControlId),
    /// On a node frame, outside any control.
    Node(NodeId),
    /// On empty canvas.
    Canvas,
}

/// What the pointer is currently moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag {
    Node { node: NodeId, last: Point },
    Pan { last: Point },
}

/// A canvas holding a node editor and its rendered output.
///
/// Structural edits go through the area so the render plugin stays in step
/// with the graph. Control state is the exception: mutating a control never
/// re-renders it, callers signal with [`Area::update`] or
/// [`ControlHost::update_control`].
#[derive(Debug)]
pub struct Area {
    config: AreaConfig,
    editor: NodeEditor,
    plugin: RenderPlugin,
    positions: BTreeMap<NodeId, Point>,
    transform: Transform,
    drag: Option<Drag>,
}

impl Default for Area {
    fn default() -> Self {
        Self::with_parts(AreaConfig::default(), RenderPlugin::default())
    }
}

impl Area {
    /// Create an empty canvas with the classic control strategies.
    pub fn new(config: AreaConfig) -> AreaResult<Self> {
        Self::with_registry(config, ControlRegistry::classic())
    }

    pub fn with_registry(config: AreaConfig, registry: ControlRegistry) -> AreaResult<Self> {
        config.validate()?;
        Ok(Self::with_parts(config, RenderPlugin::new(registry)))
    }

    fn with_parts(config: AreaConfig, plugin: RenderPlugin) -> Self {
        Self {
            config,
            editor: NodeEditor::new(),
            plugin,
            positions: BTreeMap::new(),
            transform: Transform::default(),
            drag: None,
        }
    }

    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    pub fn editor(&self) -> &NodeEditor {
        &self.editor
    }

    pub fn plugin(&self) -> &RenderPlugin {
        &self.plugin
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    /// The node being dragged, if any.
    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.drag {
            Some(Drag::Node { node, .. }) => Some(node),
            _ => None,
        }
    }

    // ---- structure ----

    /// Add a node at the canvas origin and render it.
    pub fn add_node(&mut self, def: NodeDef) -> AreaResult<NodeId> {
        let id = self.editor.add_node(def)?;
        self.positions.insert(id, Point::default());
        self.plugin.render_node(&self.editor, id);
        Ok(id)
    }

    /// Remove a node with its controls and connections, and drop their
    /// output. Nodes on the other end of removed connections are redrawn.
    pub fn remove_node(&mut self, id: NodeId) -> AreaResult<RemovedNode> {
        let neighbours: Vec<NodeId> = self
            .editor
            .node_connections(id)
            .iter()
            .map(|c| if c.source == id { c.target } else { c.source })
            .filter(|&n| n != id)
            .collect();

        let removed = self.editor.remove_node(id)?;
        self.plugin.forget_node(&removed);
        self.positions.remove(&id);
        if self.dragged_node() == Some(id) {
            self.drag = None;
        }
        for node in neighbours {
            self.plugin.update(&self.editor, UpdateKind::Node, node);
        }
        Ok(removed)
    }

    pub fn add_input(&mut self, node: NodeId, key: &str, input: Input) -> AreaResult<()> {
        self.editor.add_input(node, key, input)?;
        self.plugin.update(&self.editor, UpdateKind::Node, node);
        Ok(())
    }

    pub fn add_output(&mut self, node: NodeId, key: &str, output: Output) -> AreaResult<()> {
        self.editor.add_output(node, key, output)?;
        self.plugin.update(&self.editor, UpdateKind::Node, node);
        Ok(())
    }

    /// Attach a control to a node. The control is rendered right away and
    /// the node frame gains a slot for it.
    pub fn add_control(
        &mut self,
        node: NodeId,
        name: &str,
        control: impl Into<Control>,
    ) -> AreaResult<ControlId> {
        let id = self.editor.add_control(node, name, control)?;
        self.plugin.update(&self.editor, UpdateKind::Node, node);
        Ok(id)
    }

    /// Attach a control to a node's input.
    pub fn set_input_control(
        &mut self,
        node: NodeId,
        key: &str,
        control: impl Into<Control>,
    ) -> AreaResult<ControlId> {
        let id = self.editor.set_input_control(node, key, control)?;
        self.plugin.update(&self.editor, UpdateKind::Node, node);
        Ok(id)
    }

    pub fn add_connection(
        &mut self,
        source: NodeId,
        source_output: &str,
        target: NodeId,
        target_input: &str,
    ) -> AreaResult<ConnectionId> {
        let id = self
            .editor
            .add_connection(source, source_output, target, target_input)?;
        self.plugin.render_connection(&self.editor, id);
        self.plugin.update(&self.editor, UpdateKind::Node, target);
        Ok(id)
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> AreaResult<Connection> {
        let connection = self.editor.remove_connection(id)?;
        self.plugin.forget_connection(id);
        self.plugin
            .update(&self.editor, UpdateKind::Node, connection.target);
        Ok(connection)
    }

    /// Move a node to `(x, y)` in canvas units.
    pub fn translate_node(&mut self, id: NodeId, x: Real, y: Real) -> AreaResult<()> {
        let x = ensure_finite(x, "node x")?;
        let y = ensure_finite(y, "node y")?;
        let Some(position) = self.positions.get_mut(&id) else {
            return Err(GraphError::UnknownNode { node: id }.into());
        };
        *position = Point::new(x, y);
        Ok(())
    }

    pub fn node_position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Estimated size of a node: fixed width, a title bar and one row per
    /// output, control and input.
    pub fn node_size(&self, node: &Node) -> (Real, Real) {
        let rows = node.outputs.len() + node.controls.len() + node.inputs.len();
        (
            self.config.node_width,
            self.config.header_height + rows as Real * self.config.row_height,
        )
    }

    /// Bounding rectangle of a node on the canvas.
    pub fn node_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.editor.node(id)?;
        let origin = self.node_position(id)?;
        let (width, height) = self.node_size(node);
        Some(Rect::from_origin_size(origin, width, height))
    }

    // ---- rendering ----

    /// Recompute the rendered output of one element.
    pub fn update(&mut self, kind: UpdateKind, id: Id) {
        self.plugin.update(&self.editor, kind, id);
    }

    /// The node as currently shown: frame plus each control's last output.
    pub fn node_view(&self, id: NodeId) -> Option<View> {
        self.plugin.node_view(id)
    }

    pub fn control_view(&self, id: ControlId) -> Option<&View> {
        self.plugin.control_view(id)
    }

    pub fn connection_view(&self, id: ConnectionId) -> Option<&View> {
        self.plugin.connection_view(id)
    }

    // ---- events ----

    /// Deliver a pointer or keyboard event.
    ///
    /// Events on a control go to the control's last rendered output first.
    /// The effects it asks for are applied through the control host. If the
    /// control does not contain the event, the canvas gets it with the
    /// control's node as target.
    pub fn dispatch(&mut self, target: Target, event: &UiEvent, at: Point) -> AreaResult<Propagation> {
        let at = finite_point(at)?;
        let node = match target {
            Target::Control(id) => {
                let outcome = self
                    .plugin
                    .control_view(id)
                    .map(|view| view.dispatch(event))
                    .unwrap_or_else(|| View::Empty.dispatch(event));
                for effect in outcome.effects {
                    self.apply(effect)?;
                }
                if outcome.propagation == Propagation::Stopped {
                    tracing::trace!(control = %id, ?event, "event contained by control");
                    return Ok(Propagation::Stopped);
                }
                self.editor.control_owner(id)
            }
            Target::Node(id) => Some(id).filter(|id| self.editor.node(*id).is_some()),
            Target::Canvas => None,
        };

        self.canvas_event(node, event, at);
        Ok(Propagation::Bubble)
    }

    pub fn pointer_down(&mut self, target: Target, at: Point) -> AreaResult<Propagation> {
        self.dispatch(target, &UiEvent::PointerDown, at)
    }

    pub fn double_click(&mut self, target: Target, at: Point) -> AreaResult<Propagation> {
        self.dispatch(target, &UiEvent::DoubleClick, at)
    }

    pub fn click(&mut self, target: Target) -> AreaResult<Propagation> {
        self.dispatch(target, &UiEvent::Click, Point::default())
    }

    /// Type `raw` into an input control.
    pub fn input(&mut self, control: ControlId, raw: &str) -> AreaResult<Propagation> {
        self.dispatch(
            Target::Control(control),
            &UiEvent::Input(raw.to_string()),
            Point::default(),
        )
    }

    /// Continue a drag: move the dragged node or pan the viewport.
    ///
    /// A non-finite pointer position is rejected and the drag left as it was.
    pub fn pointer_move(&mut self, at: Point) -> AreaResult<()> {
        let at = finite_point(at)?;
        let Some(drag) = self.drag else {
            return Ok(());
        };
        let dx = at.x - drag_last(&drag).x;
        let dy = at.y - drag_last(&drag).y;

        self.drag = Some(match drag {
            Drag::Node { node, .. } => {
                if let Some(position) = self.positions.get_mut(&node) {
                    position.x += dx / self.transform.k;
                    position.y += dy / self.transform.k;
                }
                Drag::Node { node, last: at }
            }
            Drag::Pan { .. } => {
                self.transform.x += dx;
                self.transform.y += dy;
                Drag::Pan { last: at }
            }
        });
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            tracing::trace!("drag finished");
        }
    }

    /// Zoom to scale `k`, clamped to the configured range, keeping the screen
    /// point `origin` in place.
    pub fn zoom(&mut self, k: Real, origin: Point) -> AreaResult<()> {
        let k = ensure_finite(k, "zoom scale")?;
        let k = k.clamp(self.config.min_zoom, self.config.max_zoom);
        self.transform.zoom_to(k, origin);
        tracing::debug!(k, "zoomed");
        Ok(())
    }

    /// Fit the viewport on `nodes`.
    ///
    /// The scale is `min(w / bw, h / bh) * fit_scale`, never above 1, and
    /// the bounding box is centred. Unknown ids are skipped; if none of the
    /// nodes exist the transform is left as it is.
    pub fn zoom_at(&mut self, nodes: &[NodeId]) {
        let Some(bounds) = nodes
            .iter()
            .filter_map(|&id| self.node_rect(id))
            .reduce(|a, b| a.union(&b))
        else {
            tracing::debug!("zoom_at with no known nodes ignored");
            return;
        };

        let (w, h) = (self.config.viewport_width, self.config.viewport_height);
        let scale = self.config.fit_scale;
        let k = (w / bounds.width() * scale)
            .min(h / bounds.height() * scale)
            .min(1.0);
        let center = bounds.center();
        self.transform = Transform {
            k,
            x: w / 2.0 - center.x * k,
            y: h / 2.0 - center.y * k,
        };
        tracing::debug!(k, x = self.transform.x, y = self.transform.y, "viewport fitted");
    }

    /// Tear the canvas down: every node, control, connection and rendered
    /// output is dropped.
    pub fn destroy(&mut self) {
        self.editor.clear();
        self.plugin.clear();
        self.positions.clear();
        self.transform = Transform::default();
        self.drag = None;
        tracing::info!("area destroyed");
    }

    fn apply(&mut self, effect: Effect) -> AreaResult<()> {
        match effect {
            Effect::InvokeAction(id) => self.trigger_action(id)?,
            Effect::ChangeValue(id, raw) => {
                // the field shows what was typed, so redraw it once the edit
                // has been stored
                if self.edit_input(id, &raw)? == EditOutcome::Applied {
                    self.update_control(id);
                }
            }
        }
        Ok(())
    }

    fn canvas_event(&mut self, node: Option<NodeId>, event: &UiEvent, at: Point) {
        match event {
            UiEvent::PointerDown => {
                self.drag = Some(match node {
                    Some(node) => Drag::Node { node, last: at },
                    None => Drag::Pan { last: at },
                });
                tracing::trace!(?node, "drag started");
            }
            UiEvent::DoubleClick => {
                let k = self.transform.k * (1.0 + self.config.zoom_step);
                let k = k.clamp(self.config.min_zoom, self.config.max_zoom);
                self.transform.zoom_to(k, at);
            }
            UiEvent::Click | UiEvent::Input(_) => {}
        }
    }
}

fn finite_point(at: Point) -> AreaResult<Point> {
    Ok(Point::new(
        ensure_finite(at.x, "pointer x")?,
        ensure_finite(at.y, "pointer y")?,
    ))
}

fn drag_last(drag: &Drag) -> Point {
    match *drag {
        Drag::Node { last, .. } | Drag::Pan { last } => last,
    }
}

impl ControlStore for Area {
    fn control(&self, id: ControlId) -> Option<&Control> {
        self.editor.control(id)
    }
}

impl ControlHost for Area {
    fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.editor.control_mut(id)
    }

    fn update_control(&mut self, id: ControlId) {
        self.plugin.update(&self.editor, UpdateKind::Control, id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use nf_controls::{ActionControl, ControlKind, CustomControl, InputControl, ProgressControl};
    use nf_core::testing::{Tolerances, nearly_equal};
    use nf_graph::Socket;
    use nf_render::{Binding, Element, EventKind};

    #[test]
    fn button_click_runs_action_once_without_dragging() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let button = area
            .add_control(
                a,
                "button",
                ActionControl::new("Go", move |_| {
                    counter.set(counter.get() + 1);
                    Ok(())
                }),
            )
            .unwrap();

        let at = Point::new(10.0, 10.0);
        assert_eq!(
            area.pointer_down(Target::Control(button), at).unwrap(),
            Propagation::Stopped
        );
        assert_eq!(area.drag(), None);
        area.double_click(Target::Control(button), at).unwrap();
        assert_eq!(area.transform(), Transform::default());

        area.click(Target::Control(button)).unwrap();
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn nested_custom_field_keeps_pointer_from_canvas() {
        let mut registry = ControlRegistry::classic();
        registry.register(ControlKind::Custom("slider".into()), |id, _| {
            Element::new("div")
                .on(EventKind::Click, Binding::InvokeAction { control: id })
                .child(Element::new("input").contain_pointer())
                .into()
        });
        let mut area = Area::with_registry(AreaConfig::default(), registry).unwrap();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let c = area.add_control(a, "slider", CustomControl::new("slider")).unwrap();

        let propagation = area.pointer_down(Target::Control(c), Point::new(1.0, 1.0)).unwrap();
        assert_eq!(propagation, Propagation::Stopped);
        assert_eq!(area.drag(), None);

        area.pointer_move(Point::new(40.0, 40.0)).unwrap();
        assert_eq!(area.node_position(a), Some(Point::default()));
    }

    #[test]
    fn pointer_down_on_progress_drags_its_node() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let p = area.add_control(a, "p", ProgressControl::new(0.0)).unwrap();

        let propagation = area.pointer_down(Target::Control(p), Point::new(0.0, 0.0)).unwrap();
        assert_eq!(propagation, Propagation::Bubble);
        assert_eq!(area.dragged_node(), Some(a));

        area.pointer_move(Point::new(30.0, 40.0)).unwrap();
        area.pointer_up();
        assert_eq!(area.node_position(a), Some(Point::new(30.0, 40.0)));
        assert_eq!(area.drag(), None);
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        area.pointer_down(Target::Node(a), Point::new(0.0, 0.0)).unwrap();

        assert!(area.pointer_move(Point::new(f64::NAN, 5.0)).is_err());
        assert!(area.pointer_move(Point::new(5.0, f64::INFINITY)).is_err());
        assert_eq!(area.node_position(a), Some(Point::default()));

        // the drag survives and continues from its last good point
        area.pointer_move(Point::new(8.0, 6.0)).unwrap();
        assert_eq!(area.node_position(a), Some(Point::new(8.0, 6.0)));
        area.pointer_up();

        assert!(area.double_click(Target::Canvas, Point::new(f64::NAN, 0.0)).is_err());
        assert!(area.pointer_down(Target::Canvas, Point::new(0.0, f64::NAN)).is_err());
        assert_eq!(area.transform(), Transform::default());
        assert_eq!(area.drag(), None);
    }

    #[test]
    fn canvas_drag_pans() {
        let mut area = Area::default();
        area.pointer_down(Target::Canvas, Point::new(5.0, 5.0)).unwrap();
        area.pointer_move(Point::new(15.0, 0.0)).unwrap();
        area.pointer_up();
        assert_eq!(area.transform().x, 10.0);
        assert_eq!(area.transform().y, -5.0);
    }

    #[test]
    fn double_click_on_canvas_zooms_in() {
        let mut area = Area::default();
        area.double_click(Target::Canvas, Point::new(0.0, 0.0)).unwrap();
        assert!(nearly_equal(area.transform().k, 1.2, Tolerances::default()));
    }

    #[test]
    fn typed_input_updates_field_and_runs_handler() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let p = area.add_control(a, "p", ProgressControl::new(0.0)).unwrap();
        let i = area
            .add_control(
                a,
                "i",
                InputControl::number(0.0).with_change(move |host, value| {
                    host.set_percent(p, value.as_number())?;
                    host.update_control(p);
                    Ok(())
                }),
            )
            .unwrap();

        area.input(i, "64").unwrap();
        assert_eq!(area.control_view(p).unwrap().text_content(), "64%");
        let field = area.control_view(i).unwrap().find_tag("input").unwrap();
        assert_eq!(field.get_attr("value"), Some("64"));

        // garbage is ignored
        area.input(i, "sixty").unwrap();
        assert_eq!(area.control_view(p).unwrap().text_content(), "64%");
    }

    #[test]
    fn readonly_input_ignores_typing() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let i = area
            .add_control(a, "i", InputControl::number(3.0).readonly(true))
            .unwrap();

        area.input(i, "9").unwrap();
        let value = area.control(i).unwrap().as_input().unwrap().value().as_number();
        assert_eq!(value, Some(3.0));
    }

    #[test]
    fn translate_rejects_nan_and_unknown_nodes() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        assert!(area.translate_node(a, f64::NAN, 0.0).is_err());
        assert!(area.translate_node(NodeId::from_index(99), 0.0, 0.0).is_err());
        area.translate_node(a, 12.0, -3.0).unwrap();
        assert_eq!(area.node_position(a), Some(Point::new(12.0, -3.0)));
    }

    #[test]
    fn connection_hides_input_control() {
        let socket = Socket::new("number");
        let mut area = Area::default();
        let a = area
            .add_node(NodeDef::new("A").with_output("out", Output::new(socket.clone())))
            .unwrap();
        let b = area
            .add_node(NodeDef::new("B").with_input("in", Input::new(socket)))
            .unwrap();
        area.set_input_control(b, "in", InputControl::number(0.0)).unwrap();
        assert!(area.node_view(b).unwrap().find_tag("input").is_some());

        let c = area.add_connection(a, "out", b, "in").unwrap();
        assert!(area.node_view(b).unwrap().find_tag("input").is_none());
        assert!(area.connection_view(c).is_some());

        area.remove_connection(c).unwrap();
        assert!(area.node_view(b).unwrap().find_tag("input").is_some());
        assert!(area.connection_view(c).is_none());
    }

    #[test]
    fn node_size_counts_rows() {
        let socket = Socket::new("s");
        let mut area = Area::default();
        let a = area
            .add_node(
                NodeDef::new("A")
                    .with_output("o", Output::new(socket.clone()))
                    .with_input("i", Input::new(socket)),
            )
            .unwrap();
        area.add_control(a, "p", ProgressControl::unset()).unwrap();

        let config = AreaConfig::default();
        let rect = area.node_rect(a).unwrap();
        assert_eq!(rect.width(), config.node_width);
        assert_eq!(rect.height(), config.header_height + 3.0 * config.row_height);
    }

    #[test]
    fn update_with_an_id_of_another_kind_is_ignored() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let p = area.add_control(a, "p", ProgressControl::new(10.0)).unwrap();
        assert_ne!(a, p);

        area.set_percent(p, Some(80.0)).unwrap();
        area.update(UpdateKind::Control, a);
        area.update(UpdateKind::Connection, p);
        assert_eq!(area.control_view(p).unwrap().text_content(), "10%");
        assert!(!area.plugin().is_rendered(UpdateKind::Control, a));

        area.update(UpdateKind::Control, p);
        assert_eq!(area.control_view(p).unwrap().text_content(), "80%");
    }

    #[test]
    fn destroy_clears_everything() {
        let mut area = Area::default();
        let a = area.add_node(NodeDef::new("A")).unwrap();
        let p = area.add_control(a, "p", ProgressControl::new(1.0)).unwrap();
        area.zoom(2.0, Point::default()).unwrap();

        area.destroy();
        assert!(area.node_view(a).is_none());
        assert!(area.control_view(p).is_none());
        assert!(area.control(p).is_none());
        assert_eq!(area.transform(), Transform::default());
    }
}
