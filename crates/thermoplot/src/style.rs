//! Drawing metadata attached to curves.
//!
//! None of this affects geometry; the renderer reads it as-is.

use serde::{Deserialize, Serialize};
use thermoplot_geom::DEFAULT_MARKER_FRACTION;

/// Stroke pattern of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Alternating dashes and dots.
    DashDot,
    /// Dotted line.
    Dotted,
}

/// Stroke of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Color name or hex code, passed through to the renderer.
    pub color: String,
    /// Line width in renderer units.
    pub width: f64,
    /// Stroke pattern.
    pub line_style: LineStyle,
    /// Drawing order; higher is drawn on top.
    pub z_order: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "k".into(),
            width: 2.5,
            line_style: LineStyle::Solid,
            z_order: 1,
        }
    }
}

impl Style {
    /// Thin dashed black stroke used for guide lines.
    pub fn guide() -> Self {
        Self {
            color: "k".into(),
            width: 1.6,
            line_style: LineStyle::Dashed,
            z_order: 1,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the stroke pattern.
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Set the drawing order.
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }
}

/// Request for a direction arrow on a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowSpec {
    /// Fraction of the curve's arc length at which the arrow sits.
    pub position: f64,
    /// Point the arrow against the direction of travel.
    pub reverse: bool,
    /// Filled (`-|>`) or open (`->`) head.
    pub filled: bool,
    /// Head size; `None` lets the renderer pick its default.
    pub size: Option<f64>,
    /// Head length relative to the head size.
    pub head_length: f64,
    /// Head width relative to the head size.
    pub head_width: f64,
    /// Color name or hex code.
    pub color: String,
    /// Drawing order.
    pub z_order: i32,
}

impl Default for ArrowSpec {
    fn default() -> Self {
        Self::at(DEFAULT_MARKER_FRACTION)
    }
}

impl ArrowSpec {
    /// Default arrow at `position` along the curve.
    pub fn at(position: f64) -> Self {
        Self {
            position,
            reverse: false,
            filled: true,
            size: None,
            head_length: 0.6,
            head_width: 0.2,
            color: "black".into(),
            z_order: 3,
        }
    }

    /// Flip the arrow.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }
}

/// Request for a round marker at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotSpec {
    /// Marker size in renderer units.
    pub size: f64,
    /// Color name or hex code.
    pub color: String,
}

impl Default for DotSpec {
    fn default() -> Self {
        Self::sized(8.0)
    }
}

impl DotSpec {
    /// Black dot of `size`.
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            color: "black".into(),
        }
    }

    /// Default marker for a standalone state, smaller than an endpoint dot.
    pub fn state() -> Self {
        Self::sized(6.0)
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Style::default();
        assert_eq!(s.color, "k");
        assert_eq!(s.line_style, LineStyle::Solid);
        let a = ArrowSpec::default();
        assert!((a.position - 0.54).abs() < 1e-12);
        assert!(a.filled && !a.reverse);
        assert_eq!((a.head_length, a.head_width), (0.6, 0.2));
        assert_eq!(DotSpec::default().size, 8.0);
        assert_eq!(DotSpec::state().size, 6.0);
        assert_eq!(DotSpec::state().color, "black");
    }

    #[test]
    fn test_builders() {
        let s = Style::default()
            .with_color("tab:red")
            .with_width(1.0)
            .with_line_style(LineStyle::DashDot)
            .with_z_order(4);
        assert_eq!(s.color, "tab:red");
        assert_eq!(s.width, 1.0);
        assert_eq!(s.line_style, LineStyle::DashDot);
        assert_eq!(s.z_order, 4);
        assert!(ArrowSpec::at(0.3).reversed().reverse);
    }
}
