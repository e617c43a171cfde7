//! nf-area: the canvas that ties graph, controls and rendering together.
//!
//! [`Area`] owns a [`NodeEditor`](nf_graph::NodeEditor) and a
//! [`RenderPlugin`](nf_render::RenderPlugin), places nodes on a 2D canvas,
//! routes pointer events to controls or to the canvas, and forwards update
//! signals. It is also the [`ControlHost`](nf_controls::ControlHost) that
//! control handlers run against.

pub mod area;
pub mod config;
pub mod error;
pub mod geometry;

pub use area::{Area, Drag, Target};
pub use config::AreaConfig;
pub use error::{AreaError, AreaResult};
pub use geometry::{Point, Rect, Transform};
