//! Control variants and their tag.
//!
//! - **Action**: a labelled button that runs a handler when clicked
//! - **Progress**: a percentage shown as a radial indicator
//! - **Input**: a number or text field with an optional change handler
//! - **Custom**: a named kind whose rendering is supplied by the application

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ControlResult;
use crate::host::ControlHost;

/// Handler run when an action control is activated.
pub type ActionHandler = Rc<dyn Fn(&mut dyn ControlHost) -> ControlResult<()>>;

/// Handler run after an input control's value changed.
pub type ChangeHandler = Rc<dyn Fn(&mut dyn ControlHost, &InputValue) -> ControlResult<()>>;

/// Variant tag of a control, used for strategy dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ControlKind {
    Action,
    Progress,
    Input,
    Custom(String),
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Action => write!(f, "action"),
            ControlKind::Progress => write!(f, "progress"),
            ControlKind::Input => write!(f, "input"),
            ControlKind::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// A control embedded in a node.
#[derive(Debug, Clone)]
pub enum Control {
    Action(ActionControl),
    Progress(ProgressControl),
    Input(InputControl),
    Custom(CustomControl),
}

impl Control {
    /// Get the variant tag.
    pub fn kind(&self) -> ControlKind {
        match self {
            Control::Action(_) => ControlKind::Action,
            Control::Progress(_) => ControlKind::Progress,
            Control::Input(_) => ControlKind::Input,
            Control::Custom(custom) => ControlKind::Custom(custom.kind.clone()),
        }
    }

    pub fn as_action(&self) -> Option<&ActionControl> {
        match self {
            Control::Action(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_progress(&self) -> Option<&ProgressControl> {
        match self {
            Control::Progress(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_progress_mut(&mut self) -> Option<&mut ProgressControl> {
        match self {
            Control::Progress(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&InputControl> {
        match self {
            Control::Input(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut InputControl> {
        match self {
            Control::Input(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomControl> {
        match self {
            Control::Custom(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_custom_mut(&mut self) -> Option<&mut CustomControl> {
        match self {
            Control::Custom(c) => Some(c),
            _ => None,
        }
    }
}

impl From<ActionControl> for Control {
    fn from(c: ActionControl) -> Self {
        Control::Action(c)
    }
}

impl From<ProgressControl> for Control {
    fn from(c: ProgressControl) -> Self {
        Control::Progress(c)
    }
}

impl From<InputControl> for Control {
    fn from(c: InputControl) -> Self {
        Control::Input(c)
    }
}

impl From<CustomControl> for Control {
    fn from(c: CustomControl) -> Self {
        Control::Custom(c)
    }
}

/// Button-like control.
///
/// The label is fixed at construction. To show a different label, attach a
/// new control.
#[derive(Clone)]
pub struct ActionControl {
    label: String,
    action: ActionHandler,
}

impl ActionControl {
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut dyn ControlHost) -> ControlResult<()> + 'static,
    {
        Self {
            label: label.into(),
            action: Rc::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Shared handle to the action; cloning is cheap.
    pub fn action(&self) -> ActionHandler {
        Rc::clone(&self.action)
    }
}

impl fmt::Debug for ActionControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionControl")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Radial progress value.
///
/// `percent` is nominally within `[0, 100]` but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressControl {
    pub percent: Option<f64>,
}

impl ProgressControl {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: Some(percent),
        }
    }

    /// A progress control with no value yet; renders like 0.
    pub fn unset() -> Self {
        Self::default()
    }
}

/// Input field flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Number,
    Text,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Number => "number",
            InputType::Text => "text",
        }
    }
}

/// Current value of an input control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    pub fn input_type(&self) -> InputType {
        match self {
            InputValue::Number(_) => InputType::Number,
            InputValue::Text(_) => InputType::Text,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            InputValue::Number(v) => Some(*v),
            InputValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            InputValue::Text(s) => Some(s),
            InputValue::Number(_) => None,
        }
    }

    /// Parse raw user text into a value of the given flavour.
    ///
    /// Number fields only accept finite numbers.
    pub fn parse(input_type: InputType, raw: &str) -> Option<Self> {
        match input_type {
            InputType::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(InputValue::Number),
            InputType::Text => Some(InputValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(v) => f.write_str(&nf_core::format_real(*v)),
            InputValue::Text(s) => f.write_str(s),
        }
    }
}

/// Editable number or text field.
///
/// The value only changes through [`ControlHostExt::set_input_value`]
/// (programmatic) or [`ControlHostExt::edit_input`] (user edit); both run
/// the change handler.
///
/// [`ControlHostExt::set_input_value`]: crate::host::ControlHostExt::set_input_value
/// [`ControlHostExt::edit_input`]: crate::host::ControlHostExt::edit_input
#[derive(Clone)]
pub struct InputControl {
    value: InputValue,
    readonly: bool,
    on_change: Option<ChangeHandler>,
}

impl InputControl {
    pub fn number(initial: f64) -> Self {
        Self {
            value: InputValue::Number(initial),
            readonly: false,
            on_change: None,
        }
    }

    pub fn text(initial: impl Into<String>) -> Self {
        Self {
            value: InputValue::Text(initial.into()),
            readonly: false,
            on_change: None,
        }
    }

    /// Set the change handler.
    pub fn with_change<F>(mut self, change: F) -> Self
    where
        F: Fn(&mut dyn ControlHost, &InputValue) -> ControlResult<()> + 'static,
    {
        self.on_change = Some(Rc::new(change));
        self
    }

    /// Mark the field read-only: user edits are ignored.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn value(&self) -> &InputValue {
        &self.value
    }

    pub fn input_type(&self) -> InputType {
        self.value.input_type()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn change_handler(&self) -> Option<ChangeHandler> {
        self.on_change.clone()
    }

    pub(crate) fn store_value(&mut self, value: InputValue) {
        self.value = value;
    }
}

impl fmt::Debug for InputControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputControl")
            .field("value", &self.value)
            .field("readonly", &self.readonly)
            .field("has_change", &self.on_change.is_some())
            .finish()
    }
}

/// Control of an application-defined kind.
///
/// It renders only when a strategy for `kind` has been registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomControl {
    pub kind: String,
    pub props: BTreeMap<String, String>,
}

impl CustomControl {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use nf_core::format_real;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn shown_number_parses_back_to_itself(v in -1e12_f64..1e12_f64) {
            let shown = InputValue::Number(v).to_string();
            prop_assert_eq!(shown.clone(), format_real(v));
            prop_assert_eq!(InputValue::parse(InputType::Number, &shown), Some(InputValue::Number(v)));
        }

        #[test]
        fn text_is_taken_verbatim(raw in ".*") {
            prop_assert_eq!(InputValue::parse(InputType::Text, &raw), Some(InputValue::Text(raw.clone())));
        }
    }
}
