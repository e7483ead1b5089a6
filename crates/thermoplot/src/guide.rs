//! Projection lines from curve endpoints to the axes.

use serde::{Deserialize, Serialize};
use thermoplot_geom::{Curve, Point2};

use crate::style::Style;

/// Where a guide line runs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// Vertical drop to the x axis (`y = 0`).
    ToX,
    /// Horizontal run to the y axis (`x = 0`).
    ToY,
    /// Straight line to the origin.
    ToZero,
}

/// Which endpoint(s) of a curve get a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideAnchor {
    /// The start point only.
    Start,
    /// The end point only.
    End,
    /// Both endpoints.
    #[default]
    Both,
}

/// A guide line request on a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Target of the line.
    pub kind: GuideKind,
    /// Endpoint(s) it starts from.
    pub anchor: GuideAnchor,
    /// Stroke.
    pub style: Style,
}

impl Guide {
    /// Guide with the default dashed stroke.
    pub fn new(kind: GuideKind, anchor: GuideAnchor) -> Self {
        Self {
            kind,
            anchor,
            style: Style::guide(),
        }
    }

    /// Segments for this guide on `curve`, start first.
    pub fn segments(&self, curve: &Curve) -> Vec<GuideSegment> {
        let anchors = match self.anchor {
            GuideAnchor::Start => vec![curve.start()],
            GuideAnchor::End => vec![curve.end()],
            GuideAnchor::Both => vec![curve.start(), curve.end()],
        };
        anchors
            .into_iter()
            .map(|from| GuideSegment {
                from,
                to: project(from, self.kind),
                style: self.style.clone(),
            })
            .collect()
    }
}

/// A resolved guide line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideSegment {
    /// Point on the curve.
    pub from: Point2,
    /// Point on the axis (or the origin).
    pub to: Point2,
    /// Stroke.
    pub style: Style,
}

fn project(p: Point2, kind: GuideKind) -> Point2 {
    match kind {
        GuideKind::ToX => Point2::new(p.x, 0.0),
        GuideKind::ToY => Point2::new(0.0, p.y),
        GuideKind::ToZero => Point2::origin(),
    }
}
