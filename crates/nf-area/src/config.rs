//! Canvas configuration.

use nf_core::{NfError, NfResult, Real};
use serde::Deserialize;

/// Viewport and layout settings for an [`Area`](crate::Area).
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Viewport width in screen pixels
    pub viewport_width: Real,
    /// Viewport height in screen pixels
    pub viewport_height: Real,
    /// Share of the viewport `zoom_at` fills with the node bounding box
    pub fit_scale: Real,
    /// Relative zoom change per double click
    pub zoom_step: Real,
    /// Estimated node width in canvas units
    pub node_width: Real,
    /// Estimated height of a node title bar
    pub header_height: Real,
    /// Estimated height of one output, control or input row
    pub row_height: Real,
    pub min_zoom: Real,
    pub max_zoom: Real,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            fit_scale: 0.9,
            zoom_step: 0.2,
            node_width: 180.0,
            header_height: 40.0,
            row_height: 36.0,
            min_zoom: 0.1,
            max_zoom: 4.0,
        }
    }
}

impl AreaConfig {
    /// Check that sizes are positive and the zoom range is ordered.
    pub fn validate(&self) -> NfResult<()> {
        let positive = [
            (self.viewport_width, "viewport_width must be positive"),
            (self.viewport_height, "viewport_height must be positive"),
            (self.fit_scale, "fit_scale must be positive"),
            (self.node_width, "node_width must be positive"),
            (self.header_height, "header_height must be positive"),
            (self.row_height, "row_height must be positive"),
            (self.min_zoom, "min_zoom must be positive"),
        ];
        for (value, what) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(NfError::InvalidArg { what });
            }
        }
        if !(self.zoom_step.is_finite() && self.zoom_step >= 0.0) {
            return Err(NfError::InvalidArg {
                what: "zoom_step must be non-negative",
            });
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(NfError::InvalidArg {
                what: "max_zoom must not be below min_zoom",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(AreaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let config = AreaConfig {
            viewport_width: 0.0,
            ..AreaConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AreaConfig {
            min_zoom: 2.0,
            max_zoom: 1.0,
            ..AreaConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AreaConfig {
            fit_scale: f64::NAN,
            ..AreaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: AreaConfig = serde_yaml::from_str("viewport_width: 1024\nfit_scale: 0.5\n").unwrap();
        assert_eq!(config.viewport_width, 1024.0);
        assert_eq!(config.fit_scale, 0.5);
        assert_eq!(config.node_width, AreaConfig::default().node_width);
    }
}
