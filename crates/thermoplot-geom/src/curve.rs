//! Sampled process curves.

use serde::Serialize;
use thermoplot_math::{linspace, Point2, Vec2};

use crate::process::ProcessKind;
use crate::ProcessError;

/// A finalized, sampled process curve.
///
/// Holds at least two samples. The first sample is the process's start
/// point and the last sample its end point, exactly. There are no mutators:
/// once produced, a curve never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    kind: ProcessKind,
    points: Vec<Point2>,
}

impl Curve {
    /// Build a curve from samples, pinning the endpoints and rejecting
    /// non-finite values.
    pub(crate) fn from_samples(
        kind: ProcessKind,
        mut points: Vec<Point2>,
        start: Point2,
        end: Point2,
    ) -> Result<Self, ProcessError> {
        if points.len() < 2 {
            return Err(ProcessError::InvalidParameter(format!(
                "a curve needs at least 2 samples, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ProcessError::DegenerateInput("curve has non-finite samples"));
        }
        let last = points.len() - 1;
        points[0] = start;
        points[last] = end;
        Ok(Self { kind, points })
    }

    /// Sample the graph `y = f(x)` for `x` evenly spaced from `start.x` to `end.x`.
    pub(crate) fn sample_graph(
        kind: ProcessKind,
        start: Point2,
        end: Point2,
        count: usize,
        f: impl Fn(f64) -> f64,
    ) -> Result<Self, ProcessError> {
        let points = linspace(start.x, end.x, count)
            .into_iter()
            .map(|x| Point2::new(x, f(x)))
            .collect();
        Self::from_samples(kind, points, start, end)
    }

    /// Sample a parametric curve at `t` evenly spaced in `[0, 1]`.
    ///
    /// `f(0)` and `f(1)` are expected to be `start` and `end`.
    pub(crate) fn sample_parametric(
        kind: ProcessKind,
        start: Point2,
        end: Point2,
        count: usize,
        f: impl Fn(f64) -> Point2,
    ) -> Result<Self, ProcessError> {
        let points = linspace(0.0, 1.0, count).into_iter().map(f).collect();
        Self::from_samples(kind, points, start, end)
    }

    /// The process this curve was resolved from.
    pub fn kind(&self) -> &ProcessKind {
        &self.kind
    }

    /// First sample (the start point).
    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    /// Last sample (the end point).
    pub fn end(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// All samples in order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Sample at index `n`, if any.
    pub fn point(&self, n: usize) -> Option<Point2> {
        self.points.get(n).copied()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a curve holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Direction between the first two samples.
    pub fn start_tangent(&self) -> Vec2 {
        self.points[1] - self.points[0]
    }

    /// Direction between the last two samples.
    pub fn end_tangent(&self) -> Vec2 {
        let n = self.points.len();
        self.points[n - 1] - self.points[n - 2]
    }

    /// Total chord length through all samples.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_graph_pins_endpoints() {
        let start = Point2::new(1.0, 1.0);
        let end = Point2::new(3.0, 9.0);
        let c = Curve::sample_graph(ProcessKind::Linear, start, end, 5, |x| x * x).unwrap();
        assert_eq!(c.len(), 5);
        assert_eq!(c.start(), start);
        assert_eq!(c.end(), end);
        assert!((c.points()[2].y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_samples() {
        let p = Point2::new(0.0, 0.0);
        let err = Curve::sample_graph(ProcessKind::Linear, p, p, 1, |_| 0.0).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let start = Point2::new(-1.0, -1.0);
        let end = Point2::new(1.0, 1.0);
        let err = Curve::sample_graph(ProcessKind::Isothermal, start, end, 3, |x| 1.0 / x)
            .unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_tangents_and_length() {
        let start = Point2::new(0.0, 0.0);
        let end = Point2::new(4.0, 3.0);
        let c = Curve::sample_parametric(ProcessKind::Linear, start, end, 3, |t| {
            Point2::new(4.0 * t, 3.0 * t)
        })
        .unwrap();
        assert!((c.start_tangent() - Vec2::new(2.0, 1.5)).norm() < 1e-12);
        assert!((c.end_tangent() - Vec2::new(2.0, 1.5)).norm() < 1e-12);
        assert!((c.length() - 5.0).abs() < 1e-12);
        assert_eq!(c.point(1), Some(Point2::new(2.0, 1.5)));
        assert_eq!(c.point(3), None);
    }
}
