use crate::NfError;

/// Floating point type used for geometry and control values.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NfError::InvalidArg { what })
    }
}

/// Format a number the way it is shown to users: integral values without a
/// trailing fraction, everything else with the shortest round-trip digits.
pub fn format_real(v: Real) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{v}")
    }
}
