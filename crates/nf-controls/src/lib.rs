//! Control model for nodeflow.
//!
//! A control is a small piece of mutable state embedded in a node: a button
//! with an action, a radial progress value, an editable input, or a custom
//! widget kind registered later by the application.
//!
//! # Architecture
//!
//! - Controls are a closed sum type ([`Control`]) tagged by [`ControlKind`]
//! - Controls live in an arena keyed by [`ControlId`](nf_core::ControlId)
//! - Handlers never hold references to controls; they receive a
//!   [`ControlHost`] and address other controls by id
//! - Nothing re-renders on its own: whoever mutates a control calls
//!   [`ControlHost::update_control`] afterwards

pub mod arena;
pub mod control;
pub mod error;
pub mod host;

pub use arena::{ArenaEntry, ControlArena};
pub use control::{
    ActionControl, ActionHandler, ChangeHandler, Control, ControlKind, CustomControl,
    InputControl, InputType, InputValue, ProgressControl,
};
pub use error::{ControlError, ControlResult};
pub use host::{ControlHost, ControlHostExt, ControlStore, EditOutcome};
