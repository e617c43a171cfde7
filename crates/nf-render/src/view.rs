//! View tree produced by rendering, and event dispatch over it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use nf_core::ControlId;
use serde::Serialize;

/// Rendered output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum View {
    /// Nothing is drawn.
    Empty,
    Text { text: String },
    Element(Element),
    /// Placeholder filled with a control's own rendered output.
    Slot { control: ControlId },
}

/// Pointer/keyboard events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PointerDown,
    DoubleClick,
    Click,
    Input,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::DoubleClick => "dblclick",
            EventKind::Click => "click",
            EventKind::Input => "input",
        }
    }
}

/// What a listener does when its event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Binding {
    /// Keep the event away from the canvas.
    StopPropagation,
    /// Run the action of this control.
    InvokeAction { control: ControlId },
    /// Feed the event's text into this input control.
    ChangeValue { control: ControlId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Listener {
    pub event: EventKind,
    pub binding: Binding,
}

/// An element with attributes, listeners and children.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<View>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn on(mut self, event: EventKind, binding: Binding) -> Self {
        self.listeners.push(Listener { event, binding });
        self
    }

    /// Stop pointer-down and double-click from reaching the canvas.
    pub fn contain_pointer(self) -> Self {
        self.on(EventKind::PointerDown, Binding::StopPropagation)
            .on(EventKind::DoubleClick, Binding::StopPropagation)
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn listens_to(&self, event: EventKind) -> bool {
        self.listeners.iter().any(|l| l.event == event)
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

/// An event delivered to a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerDown,
    DoubleClick,
    Click,
    /// Text typed into a field.
    Input(String),
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::PointerDown => EventKind::PointerDown,
            UiEvent::DoubleClick => EventKind::DoubleClick,
            UiEvent::Click => EventKind::Click,
            UiEvent::Input(_) => EventKind::Input,
        }
    }
}

/// Work requested by a dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    InvokeAction(ControlId),
    ChangeValue(ControlId, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The event was contained by the control.
    Stopped,
    /// The event continues to the canvas.
    Bubble,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub effects: Vec<Effect>,
    pub propagation: Propagation,
}

impl EventOutcome {
    fn bubble() -> Self {
        Self {
            effects: Vec::new(),
            propagation: Propagation::Bubble,
        }
    }
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, View::Empty)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            View::Element(e) => Some(e),
            _ => None,
        }
    }

    /// First element (depth first, self included) matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        match self {
            View::Element(e) => {
                if pred(e) {
                    return Some(e);
                }
                e.children.iter().find_map(|c| c.find(pred))
            }
            _ => None,
        }
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|e| e.tag == tag)
    }

    pub fn find_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// Concatenated text of the whole subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text { text } => out.push_str(text),
            View::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            View::Empty | View::Slot { .. } => {}
        }
    }

    /// Ids of every slot in the subtree, in document order.
    pub fn slots(&self) -> Vec<ControlId> {
        let mut out = Vec::new();
        self.collect_slots(&mut out);
        out
    }

    fn collect_slots(&self, out: &mut Vec<ControlId>) {
        match self {
            View::Slot { control } => out.push(*control),
            View::Element(e) => e.children.iter().for_each(|c| c.collect_slots(out)),
            View::Empty | View::Text { .. } => {}
        }
    }

    /// Replace slots with the output `lookup` returns; missing ones become empty.
    pub fn fill_slots(&self, lookup: &dyn Fn(ControlId) -> Option<View>) -> View {
        match self {
            View::Slot { control } => lookup(*control).unwrap_or(View::Empty),
            View::Element(e) => View::Element(Element {
                tag: e.tag.clone(),
                attrs: e.attrs.clone(),
                listeners: e.listeners.clone(),
                children: e.children.iter().map(|c| c.fill_slots(lookup)).collect(),
            }),
            other => other.clone(),
        }
    }

    /// Deliver `event` to this view.
    ///
    /// The event targets the innermost listening element: starting at the
    /// root, it descends into the first child subtree that has a listener
    /// until none does. From there it bubbles up through the target's
    /// ancestors. Each level's bindings for the event produce effects, and a
    /// level with a `StopPropagation` binding ends the walk and keeps the
    /// event from the canvas. A view without listeners lets every event
    /// bubble.
    pub fn dispatch(&self, event: &UiEvent) -> EventOutcome {
        let mut path = Vec::new();
        let mut outcome = EventOutcome::bubble();
        if !self.listening_path(&mut path) {
            return outcome;
        }

        for element in path.iter().rev() {
            for listener in element.listeners.iter().filter(|l| l.event == event.kind()) {
                match listener.binding {
                    Binding::StopPropagation => outcome.propagation = Propagation::Stopped,
                    Binding::InvokeAction { control } => {
                        outcome.effects.push(Effect::InvokeAction(control))
                    }
                    Binding::ChangeValue { control } => {
                        if let UiEvent::Input(raw) = event {
                            outcome.effects.push(Effect::ChangeValue(control, raw.clone()));
                        }
                    }
                }
            }
            if outcome.propagation == Propagation::Stopped {
                break;
            }
        }
        outcome
    }

    /// Push the elements from here down to the innermost listening element.
    /// Leaves `path` untouched and returns `false` if nothing listens.
    fn listening_path<'a>(&'a self, path: &mut Vec<&'a Element>) -> bool {
        let View::Element(e) = self else {
            return false;
        };
        path.push(e);
        if e.children.iter().any(|c| c.listening_path(path)) || !e.listeners.is_empty() {
            return true;
        }
        path.pop();
        false
    }

    /// Serialize as HTML-like markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            View::Empty => {}
            View::Text { text } => out.push_str(&escape(text)),
            View::Slot { control } => {
                let _ = write!(out, "<!--control {control}-->");
            }
            View::Element(e) => {
                let _ = write!(out, "<{}", e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                for listener in &e.listeners {
                    let action = match listener.binding {
                        Binding::StopPropagation => "stop".to_string(),
                        Binding::InvokeAction { control } => format!("invoke:{control}"),
                        Binding::ChangeValue { control } => format!("change:{control}"),
                    };
                    let _ = write!(out, " data-on-{}=\"{}\"", listener.event.as_str(), action);
                }
                out.push('>');
                for child in &e.children {
                    child.write_markup(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> ControlId {
        ControlId::from_index(i)
    }

    #[test]
    fn dispatch_targets_first_listening_element() {
        let view: View = Element::new("div")
            .child(
                Element::new("button")
                    .contain_pointer()
                    .on(EventKind::Click, Binding::InvokeAction { control: id(1) }),
            )
            .into();

        let click = view.dispatch(&UiEvent::Click);
        assert_eq!(click.effects, vec![Effect::InvokeAction(id(1))]);
        assert_eq!(click.propagation, Propagation::Bubble);

        let down = view.dispatch(&UiEvent::PointerDown);
        assert!(down.effects.is_empty());
        assert_eq!(down.propagation, Propagation::Stopped);
    }

    #[test]
    fn nested_containment_stops_before_wrapper() {
        let view: View = Element::new("div")
            .on(EventKind::Click, Binding::InvokeAction { control: id(3) })
            .child(Element::new("span").child(View::text("label")))
            .child(Element::new("input").contain_pointer())
            .into();

        let down = view.dispatch(&UiEvent::PointerDown);
        assert_eq!(down.propagation, Propagation::Stopped);
        assert!(down.effects.is_empty());
        assert_eq!(view.dispatch(&UiEvent::DoubleClick).propagation, Propagation::Stopped);

        // click is not handled by the field, so it reaches the wrapper
        let click = view.dispatch(&UiEvent::Click);
        assert_eq!(click.effects, vec![Effect::InvokeAction(id(3))]);
        assert_eq!(click.propagation, Propagation::Bubble);
    }

    #[test]
    fn stop_at_inner_level_hides_outer_bindings() {
        let view: View = Element::new("div")
            .on(EventKind::Click, Binding::InvokeAction { control: id(1) })
            .child(
                Element::new("button")
                    .on(EventKind::Click, Binding::InvokeAction { control: id(2) })
                    .on(EventKind::Click, Binding::StopPropagation),
            )
            .into();

        let click = view.dispatch(&UiEvent::Click);
        assert_eq!(click.effects, vec![Effect::InvokeAction(id(2))]);
        assert_eq!(click.propagation, Propagation::Stopped);
    }

    #[test]
    fn view_without_listeners_bubbles() {
        let view: View = Element::new("div").child(View::text("x")).into();
        let outcome = view.dispatch(&UiEvent::PointerDown);
        assert_eq!(outcome.propagation, Propagation::Bubble);
        assert!(View::Empty.dispatch(&UiEvent::Click).effects.is_empty());
    }

    #[test]
    fn input_event_carries_text() {
        let view: View = Element::new("input")
            .on(EventKind::Input, Binding::ChangeValue { control: id(2) })
            .into();
        let outcome = view.dispatch(&UiEvent::Input("12".into()));
        assert_eq!(outcome.effects, vec![Effect::ChangeValue(id(2), "12".into())]);
    }

    #[test]
    fn fill_slots_resolves_and_drops_missing() {
        let view: View = Element::new("div")
            .child(View::Slot { control: id(1) })
            .child(View::Slot { control: id(2) })
            .into();
        assert_eq!(view.slots(), vec![id(1), id(2)]);

        let filled = view.fill_slots(&|c| (c == id(1)).then(|| View::text("one")));
        assert_eq!(filled.text_content(), "one");
        assert!(filled.slots().is_empty());
    }

    #[test]
    fn markup_escapes_and_lists_listeners() {
        let view: View = Element::new("button")
            .attr("label", "a\"b")
            .on(EventKind::Click, Binding::InvokeAction { control: id(0) })
            .child(View::text("<go>"))
            .into();
        assert_eq!(
            view.to_markup(),
            "<button label=\"a&quot;b\" data-on-click=\"invoke:0\">&lt;go&gt;</button>"
        );
        assert_eq!(View::Empty.to_markup(), "");
    }

    #[test]
    fn class_lookup() {
        let view: View = Element::new("div")
            .child(Element::new("span").class("a text"))
            .into();
        assert!(view.find_class("text").is_some());
        assert!(view.find_class("tex").is_none());
        assert_eq!(view.find_tag("span").unwrap().get_attr("class"), Some("a text"));
    }
}
