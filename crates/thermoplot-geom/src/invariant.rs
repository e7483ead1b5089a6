//! Closed-form crossings of process invariants.
//!
//! A polytrope with exponent `n` through anchor `(x₀, y₀)` is the curve
//! `x^n · y = x₀^n · y₀`. Isotherms are `n = 1`, adiabats `n = γ`. Two
//! polytropes with different exponents cross exactly once in the positive
//! quadrant, which gives the state shared by, for example, the isotherm
//! and adiabat of a Carnot cycle.

use thermoplot_math::{Point2, Tolerance};

use crate::curve::Curve;
use crate::ProcessError;

/// The state on both `x^n_a · y = c_a` (through `anchor_a`) and
/// `x^n_b · y = c_b` (through `anchor_b`).
///
/// Eliminating `y` gives `x = (c_a / c_b)^(1 / (n_a − n_b))`, then
/// `y = c_b / x^n_b`.
pub fn polytrope_intersection(
    anchor_a: Point2,
    n_a: f64,
    anchor_b: Point2,
    n_b: f64,
) -> Result<Point2, ProcessError> {
    if !n_a.is_finite() || !n_b.is_finite() {
        return Err(ProcessError::InvalidParameter(format!(
            "polytrope exponents must be finite, got {n_a} and {n_b}"
        )));
    }
    for anchor in [anchor_a, anchor_b] {
        if !(anchor.x > 0.0 && anchor.y > 0.0) {
            return Err(ProcessError::InvalidParameter(format!(
                "anchor ({}, {}) must have positive coordinates",
                anchor.x, anchor.y
            )));
        }
    }
    if Tolerance::DEFAULT.is_zero(n_a - n_b) {
        return Err(ProcessError::NoIntersection);
    }

    let c_a = anchor_a.y * anchor_a.x.powf(n_a);
    let c_b = anchor_b.y * anchor_b.x.powf(n_b);
    let x = (c_a / c_b).powf(1.0 / (n_a - n_b));
    let y = c_b / x.powf(n_b);
    if x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0 {
        Ok(Point2::new(x, y))
    } else {
        Err(ProcessError::NoIntersection)
    }
}

/// The state where the adiabat through `adiabat_anchor` meets the
/// isotherm through `isotherm_anchor`.
///
/// `gamma = 1` makes both families isotherms, which fails with
/// [`ProcessError::NoIntersection`].
pub fn isotherm_adiabat_intersection(
    adiabat_anchor: Point2,
    isotherm_anchor: Point2,
    gamma: f64,
) -> Result<Point2, ProcessError> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(ProcessError::InvalidParameter(format!(
            "adiabatic index must be > 0, got {gamma}"
        )));
    }
    polytrope_intersection(adiabat_anchor, gamma, isotherm_anchor, 1.0)
}

/// [`isotherm_adiabat_intersection`] anchored at two resolved curves' end points.
pub fn curve_isotherm_adiabat_intersection(
    adiabat_leg: &Curve,
    isotherm_leg: &Curve,
    gamma: f64,
) -> Result<Point2, ProcessError> {
    isotherm_adiabat_intersection(adiabat_leg.end(), isotherm_leg.end(), gamma)
}
