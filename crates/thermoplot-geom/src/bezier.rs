//! Bezier joints between adjacent process curves.
//!
//! The default construction intersects the incoming leg's end tangent with
//! the outgoing leg's start tangent and uses the crossing as the single
//! control point of a quadratic curve, so the joint leaves and arrives
//! along both legs' tangents.
//!
//! With explicit control points a cubic curve is built instead. Those
//! control points are used as given: nothing ties them to the legs'
//! tangents, so the joint is not guaranteed to be tangent-continuous with
//! its neighbours.

use serde::{Deserialize, Serialize};
use thermoplot_math::{intersect_lines, Point2, Vec2};

use crate::curve::Curve;
use crate::process::{BezierControl, ProcessKind, DEFAULT_SAMPLES};
use crate::ProcessError;

/// How [`connect`] chooses the joint's control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConnectMode {
    /// Quadratic joint through the intersection of the two tangent lines.
    Intersection,
    /// Cubic joint with the two given control points.
    ControlPoints(Point2, Point2),
}

/// A quadratic or cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierJoint {
    /// First anchor.
    pub start: Point2,
    /// Last anchor.
    pub end: Point2,
    /// Control point(s).
    pub control: BezierControl,
}

impl BezierJoint {
    /// Quadratic segment `start → control → end`.
    pub fn quadratic(start: Point2, control: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            control: BezierControl::Quadratic(control),
        }
    }

    /// Cubic segment `start → c1 → c2 → end`.
    pub fn cubic(start: Point2, c1: Point2, c2: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            control: BezierControl::Cubic(c1, c2),
        }
    }

    /// Quadratic segment whose control point is the crossing of the line
    /// through `start` along `start_dir` and the line through `end` along
    /// `end_dir`.
    ///
    /// Fails with [`ProcessError::NoIntersection`] when the lines are
    /// parallel or a direction is zero.
    pub fn from_tangents(
        start: Point2,
        start_dir: Vec2,
        end: Point2,
        end_dir: Vec2,
    ) -> Result<Self, ProcessError> {
        let control =
            intersect_lines(start, start_dir, end, end_dir).ok_or(ProcessError::NoIntersection)?;
        Ok(Self::quadratic(start, control, end))
    }

    /// Evaluate the segment at `t ∈ [0, 1]`.
    pub fn evaluate(&self, t: f64) -> Point2 {
        let p0 = self.start.coords;
        let p3 = self.end.coords;
        let inv = 1.0 - t;
        let v = match self.control {
            // B(t) = (1-t)²·P0 + 2(1-t)t·C + t²·P2
            BezierControl::Quadratic(c) => {
                p0 * (inv * inv) + c.coords * (2.0 * inv * t) + p3 * (t * t)
            }
            // B(t) = (1-t)³·P0 + 3(1-t)²t·C1 + 3(1-t)t²·C2 + t³·P3
            BezierControl::Cubic(c1, c2) => {
                p0 * (inv * inv * inv)
                    + c1.coords * (3.0 * inv * inv * t)
                    + c2.coords * (3.0 * inv * t * t)
                    + p3 * (t * t * t)
            }
        };
        Point2::from(v)
    }

    /// Sample the segment at `count` evenly spaced parameters.
    pub fn sample(&self, count: usize) -> Result<Curve, ProcessError> {
        Curve::sample_parametric(
            ProcessKind::Bezier {
                control: self.control,
            },
            self.start,
            self.end,
            count,
            |t| self.evaluate(t),
        )
    }

    /// Build the joint from `incoming`'s end to `outgoing`'s start.
    pub fn between(
        incoming: &Curve,
        outgoing: &Curve,
        mode: ConnectMode,
    ) -> Result<Self, ProcessError> {
        let start = incoming.end();
        let end = outgoing.start();
        match mode {
            ConnectMode::Intersection => Self::from_tangents(
                start,
                incoming.end_tangent(),
                end,
                outgoing.start_tangent(),
            ),
            ConnectMode::ControlPoints(c1, c2) => Ok(Self::cubic(start, c1, c2, end)),
        }
    }
}

/// Join `incoming` to `outgoing` with a Bezier curve of [`DEFAULT_SAMPLES`] samples.
///
/// The joint starts exactly at `incoming.end()` and ends exactly at
/// `outgoing.start()`.
pub fn connect(
    incoming: &Curve,
    outgoing: &Curve,
    mode: ConnectMode,
) -> Result<Curve, ProcessError> {
    connect_with_samples(incoming, outgoing, mode, DEFAULT_SAMPLES)
}

/// Like [`connect`], with an explicit sample count.
pub fn connect_with_samples(
    incoming: &Curve,
    outgoing: &Curve,
    mode: ConnectMode,
    count: usize,
) -> Result<Curve, ProcessError> {
    let joint = BezierJoint::between(incoming, outgoing, mode)?;
    log::debug!("bezier joint {:?}", joint.control);
    joint.sample(count)
}
