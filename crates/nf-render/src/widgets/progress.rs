//! Radial progress indicator.
//!
//! Two concentric circles: a full background track and a foreground arc
//! whose visible length follows the percent. The arc is drawn with a dash
//! pattern one circumference long, shifted by [`dash_offset`].

use std::f64::consts::PI;

use nf_controls::Control;
use nf_core::{ControlId, format_real};

use crate::view::{Element, View};

/// Width and height of the indicator.
pub const SIZE: f64 = 120.0;

/// Half of the stroke width, kept inside the box.
pub const STROKE_INSET: f64 = 4.0;

pub const RADIUS: f64 = SIZE / 2.0 - STROKE_INSET;

pub const CIRCUMFERENCE: f64 = 2.0 * PI * RADIUS;

/// Fraction of the circle to fill. Missing and NaN count as zero; anything
/// else passes through unclamped.
pub fn fraction(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if !p.is_nan() => p / 100.0,
        _ => 0.0,
    }
}

/// Dash offset of the foreground arc: `C * (1 - percent / 100)`.
pub fn dash_offset(percent: Option<f64>) -> f64 {
    CIRCUMFERENCE * (1.0 - fraction(percent))
}

/// Centre label, e.g. `"42%"`.
pub fn label(percent: Option<f64>) -> String {
    format!("{}%", format_real(percent.unwrap_or(0.0)))
}

pub fn render(_id: ControlId, control: &Control) -> View {
    let Some(progress) = control.as_progress() else {
        return View::Empty;
    };

    let centre = format_real(SIZE / 2.0);
    let radius = format_real(RADIUS);
    let circle = |class: &str| {
        Element::new("circle")
            .class(class)
            .attr("r", radius.clone())
            .attr("cx", centre.clone())
            .attr("cy", centre.clone())
    };

    let svg = Element::new("svg")
        .class("radial")
        .attr("width", format_real(SIZE))
        .attr("viewBox", format!("0 0 {0} {0}", format_real(SIZE)))
        .child(circle("track"))
        .child(
            circle("bar")
                .attr("stroke-dasharray", format_real(CIRCUMFERENCE))
                .attr("stroke-dashoffset", format_real(dash_offset(progress.percent))),
        );

    Element::new("div")
        .class("radial-wrapper")
        .child(svg)
        .child(
            Element::new("span")
                .class("text")
                .child(View::text(label(progress.percent))),
        )
        .into()
}
