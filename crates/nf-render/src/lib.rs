//! Rendering of nodes and controls into a toolkit-neutral view tree.
//!
//! # Architecture
//!
//! - [`View`] is the output: elements with attributes, listeners and children
//! - [`ControlRegistry`] maps a control's kind to a rendering strategy, in a
//!   fixed priority order (action, progress, input, then anything registered
//!   later); unmatched kinds render nothing
//! - [`RenderPlugin`] keeps the last output of every node, control and
//!   connection on the canvas and recomputes one only when told to via
//!   [`RenderPlugin::update`]
//!
//! Node views hold [`View::Slot`] placeholders for their controls, so
//! updating a control never rebuilds the node frame and vice versa.

pub mod plugin;
pub mod registry;
pub mod view;
pub mod widgets;

pub use plugin::{RenderPlugin, UpdateKind};
pub use registry::{ControlRegistry, Renderer, Strategy};
pub use view::{
    Binding, Effect, Element, EventKind, EventOutcome, Listener, Propagation, UiEvent, View,
};
