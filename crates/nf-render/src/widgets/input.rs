//! Generic input field used for input controls.

use nf_controls::Control;
use nf_core::ControlId;

use crate::view::{Binding, Element, EventKind, View};

pub fn render(id: ControlId, control: &Control) -> View {
    let Some(input) = control.as_input() else {
        return View::Empty;
    };

    let mut field = Element::new("input")
        .attr("type", input.input_type().as_str())
        .attr("value", input.value().to_string())
        .contain_pointer();
    if input.is_readonly() {
        field = field.attr("readonly", "readonly");
    } else {
        field = field.on(EventKind::Input, Binding::ChangeValue { control: id });
    }

    field.into()
}
