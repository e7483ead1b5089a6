//! Arc-length resampling and marker placement.
//!
//! Process curves are sampled evenly in x (or in t), which bunches samples
//! where the curve is steep (an isotherm near small x). Resampling by chord
//! length spaces points evenly along the curve, so "54 % along" means the
//! same visual position regardless of the process type.

use serde::{Deserialize, Serialize};
use thermoplot_math::{linspace, Point2, Vec2};

use crate::curve::Curve;
use crate::ProcessError;

/// Default fraction along the curve at which direction markers are placed.
pub const DEFAULT_MARKER_FRACTION: f64 = 0.54;

/// Cumulative chord length at each point; starts at 0.
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut prev = match points.first() {
        Some(p) => *p,
        None => return lengths,
    };
    for p in points {
        total += (p - prev).norm();
        lengths.push(total);
        prev = *p;
    }
    lengths
}

/// Resample a curve to `count` points evenly spaced by arc length.
pub fn resample_by_arclength(curve: &Curve, count: usize) -> Vec<Point2> {
    resample_points(curve.points(), count)
}

/// Resample a polyline to `count` points evenly spaced by arc length.
///
/// `x(s)` and `y(s)` are reconstructed piecewise-linearly. The first and
/// last outputs are exactly the first and last inputs. A polyline of zero
/// length yields `count` copies of its first point.
pub fn resample_points(points: &[Point2], count: usize) -> Vec<Point2> {
    let first = match points.first() {
        Some(p) => *p,
        None => return Vec::new(),
    };
    if count == 0 {
        return Vec::new();
    }
    let cumulative = cumulative_lengths(points);
    let total = cumulative[cumulative.len() - 1];
    if count == 1 || total <= f64::EPSILON {
        return vec![first; count];
    }

    let last_index = points.len() - 1;
    let mut out: Vec<Point2> = linspace(0.0, total, count)
        .into_iter()
        .map(|s| {
            // First index whose cumulative length reaches `s`; the segment
            // ending there has non-zero length unless `s == 0`.
            let idx = cumulative
                .partition_point(|&len| len < s)
                .clamp(1, last_index);
            let len_before = cumulative[idx - 1];
            let len_after = cumulative[idx];
            let span = len_after - len_before;
            let frac = if span > 0.0 {
                (s - len_before) / span
            } else {
                0.0
            };
            points[idx - 1] + (points[idx] - points[idx - 1]) * frac
        })
        .collect();
    out[0] = first;
    out[count - 1] = points[last_index];
    out
}

/// Where to draw a direction marker on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    /// Marker anchor on the curve.
    pub position: Point2,
    /// Local direction of travel (not normalized).
    pub direction: Vec2,
}

/// Place a marker `fraction` of the way along `curve` by arc length.
///
/// The curve is resampled to its own sample count; the marker sits at index
/// `floor(count · fraction)` and points towards the next resampled point
/// (away from the previous one at the very end). `reverse` flips the
/// direction.
///
/// The index grid is the curve's own sample count, not a fixed 100 points,
/// so curves built with few samples place the marker on a coarser grid.
pub fn place_marker(
    curve: &Curve,
    fraction: f64,
    reverse: bool,
) -> Result<MarkerPlacement, ProcessError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ProcessError::InvalidParameter(format!(
            "marker fraction must be within [0, 1], got {fraction}"
        )));
    }
    let points = resample_by_arclength(curve, curve.len());
    let n = points.len();
    let index = ((n as f64 * fraction) as usize).min(n - 1);
    let position = points[index];
    let direction = if index < n - 1 {
        points[index + 1] - position
    } else {
        position - points[index - 1]
    };
    Ok(MarkerPlacement {
        position,
        direction: if reverse { -direction } else { direction },
    })
}
