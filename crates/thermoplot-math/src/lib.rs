#![warn(missing_docs)]

//! Math types for the thermoplot process geometry engine.
//!
//! Thin wrappers around nalgebra providing the state-plane types
//! (points, vectors), tolerance constants, evenly spaced parameter
//! ranges and the small dense solvers the process kernel needs.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

/// A point in the 2D state plane (x = volume, y = pressure by convention).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the 2D state plane.
pub type Vec2 = Vector2<f64>;

/// Tolerance constants for numeric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Absolute distance tolerance.
    pub linear: f64,
    /// Relative tolerance for comparing invariant constants.
    pub relative: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 absolute, 1e-9 relative).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        relative: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two scalars agree up to the relative tolerance.
    ///
    /// Values close to zero fall back to the absolute tolerance.
    pub fn relative_eq(&self, a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= (self.relative * scale).max(self.linear)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
///
/// The last value is exactly `end`. `count == 1` yields `[start]`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Solve the 2×2 system `m · [a, b]ᵀ = rhs`.
///
/// Returns `None` when the matrix is singular relative to its scale.
pub fn solve_2x2(m: [[f64; 2]; 2], rhs: [f64; 2]) -> Option<[f64; 2]> {
    let a = Matrix2::new(m[0][0], m[0][1], m[1][0], m[1][1]);
    let scale = a.amax();
    if scale == 0.0 || a.determinant().abs() <= 1e-12 * scale * scale {
        return None;
    }
    let x = a.lu().solve(&Vector2::new(rhs[0], rhs[1]))?;
    Some([x[0], x[1]])
}

/// Solve the 3×3 system `m · [a, b, c]ᵀ = rhs`.
///
/// Returns `None` when the matrix is singular relative to its scale.
pub fn solve_3x3(m: [[f64; 3]; 3], rhs: [f64; 3]) -> Option<[f64; 3]> {
    let a = Matrix3::new(
        m[0][0], m[0][1], m[0][2], //
        m[1][0], m[1][1], m[1][2], //
        m[2][0], m[2][1], m[2][2],
    );
    let scale = a.amax();
    if scale == 0.0 || a.determinant().abs() <= 1e-12 * scale.powi(3) {
        return None;
    }
    let x = a.lu().solve(&Vector3::new(rhs[0], rhs[1], rhs[2]))?;
    Some([x[0], x[1], x[2]])
}

/// Intersect two infinite lines, each given by a point and a direction.
///
/// Returns `None` if either direction has zero length or the lines are
/// parallel (equal slopes, including both vertical).
pub fn intersect_lines(p1: Point2, d1: Vec2, p2: Point2, d2: Vec2) -> Option<Point2> {
    let n1 = d1.norm();
    let n2 = d2.norm();
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }
    let cross = d1.perp(&d2);
    if cross.abs() <= 1e-12 * n1 * n2 {
        return None;
    }
    let t = (p2 - p1).perp(&d2) / cross;
    let hit = p1 + d1 * t;
    if hit.x.is_finite() && hit.y.is_finite() {
        Some(hit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(1.0, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[4], 2.0);
        assert!((v[2] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert_eq!(linspace(3.0, 7.0, 2), vec![3.0, 7.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let v = linspace(4.0, 2.0, 3);
        assert_eq!(v, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_solve_2x2() {
        // a + b = 3, 2a - b = 0  ->  a = 1, b = 2
        let x = solve_2x2([[1.0, 1.0], [2.0, -1.0]], [3.0, 0.0]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_2x2_singular() {
        assert!(solve_2x2([[1.0, 1.0], [2.0, 2.0]], [1.0, 2.0]).is_none());
        assert!(solve_2x2([[0.0, 0.0], [0.0, 0.0]], [0.0, 0.0]).is_none());
    }

    #[test]
    fn test_solve_3x3_parabola() {
        // y = x² through x = 0, 1, 2
        let m = [[0.0, 0.0, 1.0], [1.0, 1.0, 1.0], [4.0, 2.0, 1.0]];
        let x = solve_3x3(m, [0.0, 1.0, 4.0]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert!(x[1].abs() < 1e-12);
        assert!(x[2].abs() < 1e-12);
    }

    #[test]
    fn test_solve_3x3_repeated_row() {
        let m = [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [4.0, 2.0, 1.0]];
        assert!(solve_3x3(m, [1.0, 1.0, 4.0]).is_none());
    }

    #[test]
    fn test_intersect_perpendicular() {
        let hit = intersect_lines(
            Point2::new(2.0, 2.0),
            Vec2::new(1.0, 0.0),
            Point2::new(4.0, 5.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((hit.x - 4.0).abs() < 1e-12);
        assert!((hit.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersect_parallel() {
        let horizontal = intersect_lines(
            Point2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point2::new(5.0, 0.0),
            Vec2::new(1.0, 0.0),
        );
        assert!(horizontal.is_none());

        let vertical = intersect_lines(
            Point2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Point2::new(3.0, 1.0),
            Vec2::new(0.0, -2.0),
        );
        assert!(vertical.is_none());
    }

    #[test]
    fn test_intersect_zero_direction() {
        let hit = intersect_lines(
            Point2::new(0.0, 0.0),
            Vec2::zeros(),
            Point2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_tolerance_relative_eq() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.relative_eq(8.0, 8.0 + 1e-12));
        assert!(!tol.relative_eq(8.0, 8.001));
        assert!(tol.relative_eq(0.0, 1e-12));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(1.0, 2.0);
        assert!(tol.points_equal(&a, &Point2::new(1.0 + 1e-12, 2.0)));
        assert!(!tol.points_equal(&a, &Point2::new(1.001, 2.0)));
    }
}
