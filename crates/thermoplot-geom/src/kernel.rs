//! Per-process end point resolution and curve sampling.
//!
//! Each process kind has a closed-form invariant. A partial end condition
//! fixes one end coordinate; the other follows from the invariant:
//!
//! | Kind | Invariant | Given y₂ | Given x₂ |
//! |---|---|---|---|
//! | isothermal | `x·y = k` | `x₂ = k/y₂` | `y₂ = k/x₂` |
//! | adiabatic | `x^γ·y = k` | `x₂ = (k/y₂)^(1/γ)` | `y₂ = k/x₂^γ` |
//! | power-law | `y ∝ x^n` | `x₂ = x₁·(y₂/y₁)^(1/n)` | `y₂ = y₁·(x₂/x₁)^n` |
//! | linear | none | `(x₁, y₂)` | `(x₂, y₁)` |

use thermoplot_math::{solve_2x2, solve_3x3, Point2, Tolerance};

use crate::bezier::BezierJoint;
use crate::curve::Curve;
use crate::process::{Axis, BezierControl, EndCondition, ProcessKind, ProcessSpec};
use crate::ProcessError;

/// Resolve `spec` starting from `start` into a sampled curve.
pub(crate) fn resolve_from(spec: &ProcessSpec, start: Point2) -> Result<Curve, ProcessError> {
    if spec.samples < 2 {
        return Err(ProcessError::InvalidParameter(format!(
            "sample count must be at least 2, got {}",
            spec.samples
        )));
    }
    let end = resolve_end(&spec.kind, start, spec.end)?;
    let curve = sample(&spec.kind, start, end, spec.samples)?;
    log::trace!(
        "resolved {} process ({:.6}, {:.6}) -> ({:.6}, {:.6})",
        spec.kind.name(),
        start.x,
        start.y,
        end.x,
        end.y
    );
    Ok(curve)
}

/// Resolve the end point of a process starting at `start`.
pub(crate) fn resolve_end(
    kind: &ProcessKind,
    start: Point2,
    end: Option<EndCondition>,
) -> Result<Point2, ProcessError> {
    validate_kind(kind)?;
    if !is_finite(start) {
        return Err(ProcessError::InvalidParameter(
            "start point is not finite".into(),
        ));
    }
    let end = end.ok_or(ProcessError::MissingEndPoint)?;
    match end {
        EndCondition::Point(p) if !is_finite(p) => {
            return Err(ProcessError::InvalidParameter("end point is not finite".into()));
        }
        EndCondition::Partial { value, .. } if !value.is_finite() => {
            return Err(ProcessError::InvalidParameter(format!(
                "end value {value} is not finite"
            )));
        }
        _ => {}
    }

    match *kind {
        ProcessKind::Linear => Ok(linear_end(start, end)),
        ProcessKind::Isothermal => isothermal_end(start, end),
        ProcessKind::Adiabatic { gamma } => adiabatic_end(start, end, gamma),
        ProcessKind::PowerLaw { exponent } => power_law_end(start, end, exponent),
        ProcessKind::Parabolic { .. } | ProcessKind::Bezier { .. } => match end {
            EndCondition::Point(p) => Ok(p),
            EndCondition::Partial { .. } => Err(ProcessError::InvalidParameter(format!(
                "{} process requires a full end point",
                kind.name()
            ))),
        },
    }
}

fn validate_kind(kind: &ProcessKind) -> Result<(), ProcessError> {
    match *kind {
        ProcessKind::Adiabatic { gamma } if !(gamma.is_finite() && gamma > 0.0) => Err(
            ProcessError::InvalidParameter(format!("adiabatic index must be > 0, got {gamma}")),
        ),
        ProcessKind::PowerLaw { exponent } if !exponent.is_finite() || exponent == 0.0 => {
            Err(ProcessError::InvalidParameter(format!(
                "power-law exponent must be finite and non-zero, got {exponent}"
            )))
        }
        ProcessKind::Parabolic { vertex } if !is_finite(vertex) => Err(
            ProcessError::InvalidParameter("parabola vertex is not finite".into()),
        ),
        ProcessKind::Bezier { control } => {
            let finite = match control {
                BezierControl::Quadratic(c) => is_finite(c),
                BezierControl::Cubic(c1, c2) => is_finite(c1) && is_finite(c2),
            };
            if finite {
                Ok(())
            } else {
                Err(ProcessError::InvalidParameter(
                    "bezier control point is not finite".into(),
                ))
            }
        }
        _ => Ok(()),
    }
}

fn is_finite(p: Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn finite_point(x: f64, y: f64, what: &'static str) -> Result<Point2, ProcessError> {
    if x.is_finite() && y.is_finite() {
        Ok(Point2::new(x, y))
    } else {
        Err(ProcessError::DegenerateInput(what))
    }
}

fn linear_end(start: Point2, end: EndCondition) -> Point2 {
    match end {
        EndCondition::Point(p) => p,
        EndCondition::Partial { value, hold } => match hold.axis() {
            Axis::X => Point2::new(value, start.y),
            Axis::Y => Point2::new(start.x, value),
        },
    }
}

fn isothermal_end(start: Point2, end: EndCondition) -> Result<Point2, ProcessError> {
    let tol = Tolerance::DEFAULT;
    if tol.is_zero(start.x) || tol.is_zero(start.y) {
        return Err(ProcessError::DegenerateInput(
            "isotherm anchor has a zero coordinate",
        ));
    }
    let k = start.x * start.y;
    match end {
        EndCondition::Point(p) => {
            if tol.relative_eq(p.x * p.y, k) {
                Ok(p)
            } else {
                Err(ProcessError::InvalidParameter(format!(
                    "end point ({}, {}) is not on the isotherm x·y = {k}",
                    p.x, p.y
                )))
            }
        }
        EndCondition::Partial { value, hold } => {
            if tol.is_zero(value) {
                return Err(ProcessError::DegenerateInput(
                    "isotherm end coordinate is zero",
                ));
            }
            match hold.axis() {
                Axis::Y => finite_point(k / value, value, "isotherm end is not finite"),
                Axis::X => finite_point(value, k / value, "isotherm end is not finite"),
            }
        }
    }
}

fn adiabatic_end(start: Point2, end: EndCondition, gamma: f64) -> Result<Point2, ProcessError> {
    if start.x <= 0.0 || start.y <= 0.0 {
        return Err(ProcessError::InvalidParameter(format!(
            "adiabat anchor ({}, {}) must have positive coordinates",
            start.x, start.y
        )));
    }
    let k = start.y * start.x.powf(gamma);
    match end {
        EndCondition::Point(p) => {
            if p.x <= 0.0 || p.y <= 0.0 {
                return Err(ProcessError::InvalidParameter(format!(
                    "adiabat end ({}, {}) must have positive coordinates",
                    p.x, p.y
                )));
            }
            if Tolerance::DEFAULT.relative_eq(p.y * p.x.powf(gamma), k) {
                Ok(p)
            } else {
                Err(ProcessError::InvalidParameter(format!(
                    "end point ({}, {}) is not on the adiabat x^{gamma}·y = {k}",
                    p.x, p.y
                )))
            }
        }
        EndCondition::Partial { value, hold } => {
            if value <= 0.0 {
                return Err(ProcessError::InvalidParameter(format!(
                    "adiabat end coordinate must be positive, got {value}"
                )));
            }
            match hold.axis() {
                Axis::Y => finite_point(
                    (k / value).powf(1.0 / gamma),
                    value,
                    "adiabat end is not finite",
                ),
                Axis::X => finite_point(value, k / value.powf(gamma), "adiabat end is not finite"),
            }
        }
    }
}

fn power_law_end(start: Point2, end: EndCondition, n: f64) -> Result<Point2, ProcessError> {
    if Tolerance::DEFAULT.is_zero(start.x) {
        return Err(ProcessError::DegenerateInput("power-law anchor has x = 0"));
    }
    match end {
        EndCondition::Point(p) => Ok(p),
        EndCondition::Partial { value, hold } => match hold.axis() {
            Axis::X => finite_point(
                value,
                start.y * (value / start.x).powf(n),
                "power-law end is not a real number",
            ),
            Axis::Y => {
                if Tolerance::DEFAULT.is_zero(start.y) {
                    return Err(ProcessError::DegenerateInput(
                        "power-law anchor has y = 0",
                    ));
                }
                finite_point(
                    start.x * (value / start.y).powf(1.0 / n),
                    value,
                    "power-law end is not a real number",
                )
            }
        },
    }
}

/// Sample a resolved process between `start` and `end`.
fn sample(
    kind: &ProcessKind,
    start: Point2,
    end: Point2,
    count: usize,
) -> Result<Curve, ProcessError> {
    match *kind {
        ProcessKind::Linear => {
            Curve::sample_parametric(*kind, start, end, count, |t| start + (end - start) * t)
        }
        ProcessKind::Isothermal => {
            if start.x.signum() != end.x.signum() {
                return Err(ProcessError::DegenerateInput("isotherm crosses x = 0"));
            }
            let k = start.x * start.y;
            Curve::sample_graph(*kind, start, end, count, |x| k / x)
        }
        ProcessKind::Adiabatic { gamma } => {
            let k = start.y * start.x.powf(gamma);
            Curve::sample_graph(*kind, start, end, count, |x| k / x.powf(gamma))
        }
        ProcessKind::PowerLaw { exponent } => {
            let [a, b] = solve_2x2(
                [[start.x.powf(exponent), 1.0], [end.x.powf(exponent), 1.0]],
                [start.y, end.y],
            )
            .ok_or(ProcessError::DegenerateInput(
                "power-law endpoints have equal x^n",
            ))?;
            Curve::sample_graph(*kind, start, end, count, |x| a * x.powf(exponent) + b)
        }
        ProcessKind::Parabolic { vertex } => {
            let [a, b, c] = parabola_coefficients(start, end, vertex)?;
            Curve::sample_graph(*kind, start, end, count, |x| a * x * x + b * x + c)
        }
        ProcessKind::Bezier { control } => BezierJoint {
            start,
            end,
            control,
        }
        .sample(count),
    }
}

/// Coefficients `[a, b, c]` of `y = a·x² + b·x + c` through three points.
fn parabola_coefficients(
    p1: Point2,
    p2: Point2,
    p0: Point2,
) -> Result<[f64; 3], ProcessError> {
    let tol = Tolerance::DEFAULT;
    if tol.is_zero(p1.x - p2.x) || tol.is_zero(p1.x - p0.x) || tol.is_zero(p2.x - p0.x) {
        return Err(ProcessError::DegenerateInput(
            "parabola needs three distinct x-coordinates",
        ));
    }
    let row = |p: Point2| [p.x * p.x, p.x, 1.0];
    solve_3x3([row(p1), row(p2), row(p0)], [p1.y, p2.y, p0.y]).ok_or(
        ProcessError::DegenerateInput("parabola needs three distinct x-coordinates"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::resolve;
    use approx::assert_relative_eq;

    #[test]
    fn test_isothermal_hold_pressure() {
        let c = resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to_pressure(2.0)).unwrap();
        assert_relative_eq!(c.end().x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(c.end().y, 2.0, epsilon = 1e-12);
        assert_eq!(c.len(), 100);
        assert_eq!(c.start(), Point2::new(2.0, 4.0));
    }

    #[test]
    fn test_isothermal_invariant_holds_along_curve() {
        let c = resolve(&ProcessSpec::isothermal().at(1.0, 10.0).to_volume(5.0)).unwrap();
        assert_relative_eq!(c.end().y, 2.0, epsilon = 1e-12);
        for p in c.points() {
            assert!((p.x * p.y - 10.0).abs() < 1e-9, "x·y = {}", p.x * p.y);
        }
    }

    #[test]
    fn test_isothermal_zero_anchor() {
        let err = resolve(&ProcessSpec::isothermal().at(0.0, 4.0).to_pressure(2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
        let err = resolve(&ProcessSpec::isothermal().at(2.0, 0.0).to_volume(1.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_isothermal_zero_held_value() {
        let err = resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to_pressure(0.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_isothermal_full_point_must_lie_on_isotherm() {
        assert!(resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to(8.0, 1.0)).is_ok());
        let err = resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to(8.0, 2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_adiabatic_full_point_must_lie_on_adiabat() {
        // γ = 2 from (1, 16): k = 16, so (4, 1) is on the adiabat and (4, 2) is not.
        let c = resolve(&ProcessSpec::adiabatic(2.0).at(1.0, 16.0).to(4.0, 1.0)).unwrap();
        assert_eq!(c.end(), Point2::new(4.0, 1.0));
        let err = resolve(&ProcessSpec::adiabatic(2.0).at(1.0, 16.0).to(4.0, 2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
        let err = resolve(&ProcessSpec::adiabatic(2.0).at(1.0, 16.0).to(-4.0, 1.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_isothermal_crossing_zero() {
        // k = 8, held pressure -2 gives x₂ = -4: the branch jumps across x = 0.
        let err = resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to_pressure(-2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_adiabatic_invariant_holds_along_curve() {
        let gamma = 5.0 / 3.0;
        let c = resolve(&ProcessSpec::adiabatic(gamma).at(1.0, 32.0).to_volume(8.0)).unwrap();
        // 32 / 8^(5/3) = 32 / 32 = 1
        assert_relative_eq!(c.end().y, 1.0, epsilon = 1e-9);
        let k = 32.0;
        for p in c.points() {
            assert!((p.x.powf(gamma) * p.y - k).abs() < 1e-9);
        }
    }

    #[test]
    fn test_adiabatic_hold_pressure() {
        let c = resolve(&ProcessSpec::adiabatic(2.0).at(1.0, 16.0).to_pressure(1.0)).unwrap();
        assert_relative_eq!(c.end().x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(c.end().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adiabatic_invalid_gamma() {
        for gamma in [0.0, -1.4, f64::NAN] {
            let err = resolve(&ProcessSpec::adiabatic(gamma).at(1.0, 1.0).to_volume(2.0))
                .unwrap_err();
            assert!(matches!(err, ProcessError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_adiabatic_non_physical_anchor() {
        let err = resolve(&ProcessSpec::adiabatic(1.4).at(-1.0, 1.0).to_volume(2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
        let err = resolve(&ProcessSpec::adiabatic(1.4).at(1.0, 1.0).to_volume(-2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_power_law_hold_x() {
        let c = resolve(&ProcessSpec::power_law(2.0).at(1.0, 1.0).to_x(2.0)).unwrap();
        assert_relative_eq!(c.end().x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.end().y, 4.0, epsilon = 1e-12);
        // The fit through both endpoints is y = x².
        for p in c.points() {
            assert!((p.y - p.x * p.x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_power_law_hold_y() {
        let c = resolve(&ProcessSpec::power_law(2.0).at(1.0, 1.0).to_y(9.0)).unwrap();
        assert_relative_eq!(c.end().x, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_power_law_with_offset() {
        // Explicit end point: y = A·x² + B through (1, 2) and (2, 5) gives A = 1, B = 1.
        let c = resolve(&ProcessSpec::power_law(2.0).at(1.0, 2.0).to(2.0, 5.0)).unwrap();
        for p in c.points() {
            assert!((p.y - (p.x * p.x + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_power_law_degenerate() {
        let err = resolve(&ProcessSpec::power_law(2.0).at(0.0, 1.0).to_x(2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));

        let err = resolve(&ProcessSpec::power_law(0.0).at(1.0, 1.0).to_x(2.0)).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));

        // Same x at both ends: singular fit.
        let err = resolve(&ProcessSpec::power_law(2.0).at(1.0, 1.0).to(1.0, 3.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));

        let err = resolve(&ProcessSpec::power_law(2.0).at(1.0, 0.0).to_y(4.0)).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_parabolic_passes_through_vertex() {
        // y = (x - 2)² + 1 through (0, 5), (4, 5) and vertex (2, 1)
        let spec = ProcessSpec::parabolic(Point2::new(2.0, 1.0))
            .at(0.0, 5.0)
            .to(4.0, 5.0)
            .with_samples(101);
        let c = resolve(&spec).unwrap();
        let mid = c.points()[50];
        assert_relative_eq!(mid.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 1.0, epsilon = 1e-9);
        assert_eq!(c.end(), Point2::new(4.0, 5.0));
    }

    #[test]
    fn test_parabolic_coincident_x() {
        let spec = ProcessSpec::parabolic(Point2::new(0.0, 1.0))
            .at(0.0, 5.0)
            .to(4.0, 5.0);
        let err = resolve(&spec).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_parabolic_requires_full_end() {
        let spec = ProcessSpec::parabolic(Point2::new(2.0, 1.0))
            .at(0.0, 5.0)
            .to_x(4.0);
        let err = resolve(&spec).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_linear_partial_end() {
        let isobar = resolve(&ProcessSpec::linear().at(1.0, 3.0).to_volume(4.0)).unwrap();
        assert_eq!(isobar.end(), Point2::new(4.0, 3.0));
        for p in isobar.points() {
            assert!((p.y - 3.0).abs() < 1e-12);
        }

        let isochore = resolve(&ProcessSpec::linear().at(1.0, 3.0).to_pressure(1.0)).unwrap();
        assert_eq!(isochore.end(), Point2::new(1.0, 1.0));
        for p in isochore.points() {
            assert!((p.x - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bezier_process() {
        let spec = ProcessSpec::bezier(BezierControl::Quadratic(Point2::new(1.0, 2.0)))
            .at(0.0, 0.0)
            .to(2.0, 0.0)
            .with_samples(3);
        let c = resolve(&spec).unwrap();
        // B(0.5) = 0.25·P0 + 0.5·C + 0.25·P2 = (1, 1)
        assert!((c.points()[1] - Point2::new(1.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sample_count_validated() {
        let err = resolve(&ProcessSpec::linear().at(0.0, 0.0).to(1.0, 1.0).with_samples(1))
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }

    #[test]
    fn test_non_finite_end_value() {
        let err = resolve(&ProcessSpec::isothermal().at(1.0, 1.0).to_pressure(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidParameter(_)));
    }
}
