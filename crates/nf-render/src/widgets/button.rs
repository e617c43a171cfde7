//! Button strategy for action controls.

use nf_controls::Control;
use nf_core::ControlId;

use crate::view::{Binding, Element, EventKind, View};

/// Clickable element showing the label. Clicking runs the action; pointer
/// down and double click stay inside the button so the node is not dragged.
pub fn render(id: ControlId, control: &Control) -> View {
    let Some(action) = control.as_action() else {
        return View::Empty;
    };

    Element::new("button")
        .class("button")
        .attr("label", action.label())
        .contain_pointer()
        .on(EventKind::Click, Binding::InvokeAction { control: id })
        .child(View::text(action.label()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Effect, Propagation, UiEvent};
    use nf_controls::{ActionControl, ProgressControl};

    #[test]
    fn shows_label_and_contains_pointer() {
        let id = ControlId::from_index(4);
        let view = render(id, &ActionControl::new("Randomize", |_| Ok(())).into());

        let button = view.find_tag("button").unwrap();
        assert_eq!(button.get_attr("label"), Some("Randomize"));
        assert_eq!(view.text_content(), "Randomize");

        let click = view.dispatch(&UiEvent::Click);
        assert_eq!(click.effects, vec![Effect::InvokeAction(id)]);

        for event in [UiEvent::PointerDown, UiEvent::DoubleClick] {
            let outcome = view.dispatch(&event);
            assert_eq!(outcome.propagation, Propagation::Stopped);
            assert!(outcome.effects.is_empty());
        }
    }

    #[test]
    fn other_variants_render_empty() {
        let view = render(ControlId::from_index(0), &ProgressControl::new(1.0).into());
        assert!(view.is_empty());
    }
}
