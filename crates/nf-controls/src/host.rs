//! Access to controls by id, and the operations handlers run through it.
//!
//! A [`ControlHost`] is whatever owns the control arena and the rendering
//! surface. Mutating a control through the host does not re-render it; the
//! caller decides when to call [`ControlHost::update_control`].

use nf_core::ControlId;

use crate::control::{Control, ControlKind, InputValue};
use crate::error::{ControlError, ControlResult};

/// Read access to controls by id.
pub trait ControlStore {
    fn control(&self, id: ControlId) -> Option<&Control>;
}

/// Read/write access to controls plus the update signal.
pub trait ControlHost: ControlStore {
    fn control_mut(&mut self, id: ControlId) -> Option<&mut Control>;

    /// Signal that `id` changed and its visual output must be recomputed.
    fn update_control(&mut self, id: ControlId);
}

/// Result of a user edit on an input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value was stored and the change handler ran.
    Applied,
    /// The input is read-only; nothing changed.
    ReadOnly,
    /// The text could not be parsed for this input; nothing changed.
    Rejected,
}

/// Control operations available on every host, including `dyn ControlHost`
/// inside handlers.
pub trait ControlHostExt {
    /// Store a new percent on a progress control. Does not signal an update.
    fn set_percent(&mut self, id: ControlId, percent: Option<f64>) -> ControlResult<()>;

    /// Store a new input value and run the input's change handler.
    fn set_input_value(&mut self, id: ControlId, value: InputValue) -> ControlResult<()>;

    /// Apply raw text typed by the user into an input.
    fn edit_input(&mut self, id: ControlId, raw: &str) -> ControlResult<EditOutcome>;

    /// Run an action control's handler once.
    fn trigger_action(&mut self, id: ControlId) -> ControlResult<()>;
}

impl<H: ControlHost> ControlHostExt for H {
    fn set_percent(&mut self, id: ControlId, percent: Option<f64>) -> ControlResult<()> {
        ops::set_percent(self, id, percent)
    }

    fn set_input_value(&mut self, id: ControlId, value: InputValue) -> ControlResult<()> {
        ops::set_input_value(self, id, value)
    }

    fn edit_input(&mut self, id: ControlId, raw: &str) -> ControlResult<EditOutcome> {
        ops::edit_input(self, id, raw)
    }

    fn trigger_action(&mut self, id: ControlId) -> ControlResult<()> {
        ops::trigger_action(self, id)
    }
}

impl ControlHostExt for dyn ControlHost + '_ {
    fn set_percent(&mut self, id: ControlId, percent: Option<f64>) -> ControlResult<()> {
        ops::set_percent(self, id, percent)
    }

    fn set_input_value(&mut self, id: ControlId, value: InputValue) -> ControlResult<()> {
        ops::set_input_value(self, id, value)
    }

    fn edit_input(&mut self, id: ControlId, raw: &str) -> ControlResult<EditOutcome> {
        ops::edit_input(self, id, raw)
    }

    fn trigger_action(&mut self, id: ControlId) -> ControlResult<()> {
        ops::trigger_action(self, id)
    }
}

mod ops {
    use super::*;

    fn lookup(host: &mut dyn ControlHost, id: ControlId) -> ControlResult<&mut Control> {
        host.control_mut(id).ok_or(ControlError::UnknownControl(id))
    }

    fn mismatch(id: ControlId, expected: ControlKind, found: ControlKind) -> ControlError {
        ControlError::KindMismatch {
            id,
            expected,
            found,
        }
    }

    pub(super) fn set_percent(
        host: &mut dyn ControlHost,
        id: ControlId,
        percent: Option<f64>,
    ) -> ControlResult<()> {
        let control = lookup(host, id)?;
        let found = control.kind();
        let Some(progress) = control.as_progress_mut() else {
            return Err(mismatch(id, ControlKind::Progress, found));
        };
        progress.percent = percent;
        Ok(())
    }

    pub(super) fn set_input_value(
        host: &mut dyn ControlHost,
        id: ControlId,
        value: InputValue,
    ) -> ControlResult<()> {
        let change = {
            let control = lookup(host, id)?;
            let found = control.kind();
            let Some(input) = control.as_input_mut() else {
                return Err(mismatch(id, ControlKind::Input, found));
            };
            if input.input_type() != value.input_type() {
                return Err(ControlError::InvalidValue {
                    id,
                    what: "value type does not match input type",
                });
            }
            input.store_value(value.clone());
            input.change_handler()
        };

        tracing::debug!(control = %id, value = %value, "input value set");
        match change {
            Some(change) => change(host, &value),
            None => Ok(()),
        }
    }

    pub(super) fn edit_input(
        host: &mut dyn ControlHost,
        id: ControlId,
        raw: &str,
    ) -> ControlResult<EditOutcome> {
        let (readonly, input_type) = {
            let control = lookup(host, id)?;
            match control.as_input() {
                Some(input) => (input.is_readonly(), input.input_type()),
                None => return Err(mismatch(id, ControlKind::Input, control.kind())),
            }
        };

        if readonly {
            tracing::debug!(control = %id, "ignoring edit of read-only input");
            return Ok(EditOutcome::ReadOnly);
        }

        match InputValue::parse(input_type, raw) {
            Some(value) => {
                set_input_value(host, id, value)?;
                Ok(EditOutcome::Applied)
            }
            None => {
                tracing::debug!(control = %id, raw, "ignoring unparsable edit");
                Ok(EditOutcome::Rejected)
            }
        }
    }

    pub(super) fn trigger_action(host: &mut dyn ControlHost, id: ControlId) -> ControlResult<()> {
        let action = {
            let control = lookup(host, id)?;
            match control.as_action() {
                Some(action) => action.action(),
                None => return Err(mismatch(id, ControlKind::Action, control.kind())),
            }
        };
        tracing::debug!(control = %id, "action triggered");
        action(host)
    }
}
