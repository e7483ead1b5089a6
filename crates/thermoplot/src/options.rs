//! Diagram-wide defaults.

use serde::{Deserialize, Serialize};
use thermoplot_geom::{DEFAULT_MARKER_FRACTION, DEFAULT_SAMPLES};

use crate::DiagramError;

/// Defaults for new processes and arrows in a [`Diagram`](crate::Diagram).
///
/// Missing keys take their default, so a TOML table may set only what it
/// needs:
///
/// ```
/// use thermoplot::DiagramOptions;
///
/// let opts = DiagramOptions::from_toml_str("samples = 200").unwrap();
/// assert_eq!(opts.samples, 200);
/// assert!((opts.arrow_position - 0.54).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    /// Samples per process curve and connector joint.
    pub samples: usize,
    /// Fraction along the curve for arrows added with [`Diagram::arrow`](crate::Diagram::arrow).
    pub arrow_position: f64,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            arrow_position: DEFAULT_MARKER_FRACTION,
        }
    }
}

impl DiagramOptions {
    /// Parse and validate options from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, DiagramError> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), DiagramError> {
        if self.samples < 2 {
            return Err(DiagramError::InvalidOptions(format!(
                "samples must be at least 2, got {}",
                self.samples
            )));
        }
        if !(0.0..=1.0).contains(&self.arrow_position) {
            return Err(DiagramError::InvalidOptions(format!(
                "arrow_position must be within [0, 1], got {}",
                self.arrow_position
            )));
        }
        Ok(())
    }
}
