//! Float comparison for tests, enabled by the `testing` feature.

use crate::numeric::Real;

/// Absolute and relative slack for [`nearly_equal`].
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_offsets_compare_within_tolerance() {
        let c = 2.0 * std::f64::consts::PI * 56.0;
        let tol = Tolerances::default();
        assert!(nearly_equal(c * (1.0 - 0.42), c * 0.58, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(c, c * 0.99, tol));
    }
}
