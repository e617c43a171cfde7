//! Error types for control operations.

use nf_core::ControlId;
use thiserror::Error;

use crate::control::ControlKind;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while addressing or driving controls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// No control with this id is attached anywhere.
    #[error("Unknown control: {0}")]
    UnknownControl(ControlId),

    /// The control exists but is not of the variant the operation needs.
    #[error("Control {id} is {found}, expected {expected}")]
    KindMismatch {
        id: ControlId,
        expected: ControlKind,
        found: ControlKind,
    },

    /// The value does not fit the control (e.g. text for a number input).
    #[error("Invalid value for control {id}: {what}")]
    InvalidValue { id: ControlId, what: &'static str },

    /// A handler reported a failure of its own.
    #[error("Handler failed: {what}")]
    Handler { what: String },
}
