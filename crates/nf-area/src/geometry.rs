//! Canvas geometry: points, rectangles and the viewport transform.

use nf_core::Real;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: Real,
    pub top: Real,
    pub right: Real,
    pub bottom: Real,
}

impl Rect {
    pub fn from_origin_size(origin: Point, width: Real, height: Real) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + width,
            bottom: origin.y + height,
        }
    }

    pub fn width(&self) -> Real {
        self.right - self.left
    }

    pub fn height(&self) -> Real {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Viewport transform: `screen = canvas * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub k: Real,
    pub x: Real,
    pub y: Real,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Transform {
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Change the scale to `k` while keeping the screen point `origin`
    /// over the same canvas point.
    pub fn zoom_to(&mut self, k: Real, origin: Point) {
        let ratio = k / self.k;
        self.x = origin.x - (origin.x - self.x) * ratio;
        self.y = origin.y - (origin.y - self.y) * ratio;
        self.k = k;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn screen_canvas_roundtrip(
            k in 0.1_f64..4.0,
            x in -500.0_f64..500.0,
            y in -500.0_f64..500.0,
            px in -1000.0_f64..1000.0,
            py in -1000.0_f64..1000.0,
        ) {
            let t = Transform { k, x, y };
            let back = t.to_canvas(t.to_screen(Point::new(px, py)));
            prop_assert!((back.x - px).abs() < 1e-9);
            prop_assert!((back.y - py).abs() < 1e-9);
        }
    }
}
