//! Built-in rendering strategies.
//!
//! Control strategies share the signature `fn(ControlId, &Control) -> View`
//! so they can sit in the registry next to application-supplied ones. Each
//! renders empty when handed a control of another variant.

pub mod button;
pub mod input;
pub mod node;
pub mod progress;
