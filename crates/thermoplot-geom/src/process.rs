//! Process descriptions: kinds, end conditions and specs.

use serde::{Deserialize, Serialize};
use thermoplot_math::Point2;

use crate::curve::Curve;
use crate::kernel;
use crate::ProcessError;

/// Default number of samples per curve.
pub const DEFAULT_SAMPLES: usize = 100;

/// A coordinate axis of the state plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The horizontal axis (volume).
    X,
    /// The vertical axis (pressure).
    Y,
}

/// Which coordinate a partial end condition gives.
///
/// `Pressure` is the y coordinate and `Volume` the x coordinate; they are
/// spelled out because that is how thermodynamic processes are usually
/// specified ("expand isothermally to pressure 2").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hold {
    /// The end x is given.
    X,
    /// The end y is given.
    Y,
    /// The end pressure (y) is given.
    Pressure,
    /// The end volume (x) is given.
    Volume,
}

impl Hold {
    /// The axis whose end value is given.
    pub fn axis(self) -> Axis {
        match self {
            Hold::X | Hold::Volume => Axis::X,
            Hold::Y | Hold::Pressure => Axis::Y,
        }
    }
}

/// How a process ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EndCondition {
    /// Both end coordinates are given.
    Point(Point2),
    /// One end coordinate is given; the other is solved from the process invariant.
    Partial {
        /// The given coordinate value.
        value: f64,
        /// Which coordinate `value` is.
        hold: Hold,
    },
}

/// Control points of a Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BezierControl {
    /// One control point (quadratic curve).
    Quadratic(Point2),
    /// Two control points (cubic curve).
    Cubic(Point2, Point2),
}

/// The kind of a process, with its type-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProcessKind {
    /// Straight segment.
    Linear,
    /// `x · y = const`.
    Isothermal,
    /// `x^γ · y = const`.
    Adiabatic {
        /// Adiabatic index γ (> 0).
        gamma: f64,
    },
    /// `y = A · x^n + B` through both endpoints.
    PowerLaw {
        /// Exponent n (≠ 0).
        exponent: f64,
    },
    /// `y = a·x² + b·x + c` through start, end and `vertex`.
    Parabolic {
        /// Third point the parabola passes through.
        vertex: Point2,
    },
    /// Free-form Bezier from start to end.
    Bezier {
        /// Control points.
        control: BezierControl,
    },
}

impl ProcessKind {
    /// Short lowercase name, for messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProcessKind::Linear => "linear",
            ProcessKind::Isothermal => "isothermal",
            ProcessKind::Adiabatic { .. } => "adiabatic",
            ProcessKind::PowerLaw { .. } => "power-law",
            ProcessKind::Parabolic { .. } => "parabolic",
            ProcessKind::Bezier { .. } => "bezier",
        }
    }
}

/// A process to be resolved into a [`Curve`].
///
/// Built fluently: `ProcessSpec::adiabatic(1.4).at(1.0, 10.0).to_volume(3.0)`.
/// A spec without a start inherits the chain's tail when resolved through
/// [`ChainState::resolve`](crate::ChainState::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Process kind and parameters.
    pub kind: ProcessKind,
    /// Explicit start point, if any.
    pub start: Option<Point2>,
    /// End condition, if any.
    pub end: Option<EndCondition>,
    /// Number of samples in the resolved curve (≥ 2).
    pub samples: usize,
}

impl ProcessSpec {
    /// A spec of the given kind with no start, no end and default sampling.
    pub fn new(kind: ProcessKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
            samples: DEFAULT_SAMPLES,
        }
    }

    /// Linear process.
    pub fn linear() -> Self {
        Self::new(ProcessKind::Linear)
    }

    /// Isothermal process.
    pub fn isothermal() -> Self {
        Self::new(ProcessKind::Isothermal)
    }

    /// Adiabatic process with index `gamma`.
    pub fn adiabatic(gamma: f64) -> Self {
        Self::new(ProcessKind::Adiabatic { gamma })
    }

    /// Power-law process with exponent `n`.
    pub fn power_law(exponent: f64) -> Self {
        Self::new(ProcessKind::PowerLaw { exponent })
    }

    /// Parabolic process through `vertex`.
    pub fn parabolic(vertex: Point2) -> Self {
        Self::new(ProcessKind::Parabolic { vertex })
    }

    /// Free-form Bezier process.
    pub fn bezier(control: BezierControl) -> Self {
        Self::new(ProcessKind::Bezier { control })
    }

    /// Set an explicit start point.
    pub fn at(self, x: f64, y: f64) -> Self {
        self.starting_at(Point2::new(x, y))
    }

    /// Set an explicit start point.
    pub fn starting_at(mut self, start: Point2) -> Self {
        self.start = Some(start);
        self
    }

    /// End at the point `(x, y)`.
    pub fn to(self, x: f64, y: f64) -> Self {
        self.ending(EndCondition::Point(Point2::new(x, y)))
    }

    /// Set the end condition.
    pub fn ending(mut self, end: EndCondition) -> Self {
        self.end = Some(end);
        self
    }

    /// End where the given coordinate reaches `value`.
    pub fn to_hold(self, value: f64, hold: Hold) -> Self {
        self.ending(EndCondition::Partial { value, hold })
    }

    /// End at pressure (y) `value`.
    pub fn to_pressure(self, value: f64) -> Self {
        self.to_hold(value, Hold::Pressure)
    }

    /// End at volume (x) `value`.
    pub fn to_volume(self, value: f64) -> Self {
        self.to_hold(value, Hold::Volume)
    }

    /// End at x `value`.
    pub fn to_x(self, value: f64) -> Self {
        self.to_hold(value, Hold::X)
    }

    /// End at y `value`.
    pub fn to_y(self, value: f64) -> Self {
        self.to_hold(value, Hold::Y)
    }

    /// Use `samples` samples for the resolved curve.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Resolve the end point analytically without sampling the curve.
    ///
    /// Requires an explicit start.
    pub fn end_point(&self) -> Result<Point2, ProcessError> {
        let start = self.start.ok_or(ProcessError::MissingStartPoint)?;
        kernel::resolve_end(&self.kind, start, self.end)
    }

    /// Resolve into a curve. Requires an explicit start.
    pub fn resolve(&self) -> Result<Curve, ProcessError> {
        resolve(self)
    }
}

/// Resolve a spec with an explicit start point into a sampled curve.
///
/// Specs without a start fail with [`ProcessError::MissingStartPoint`];
/// use [`ChainState::resolve`](crate::ChainState::resolve) to inherit one.
pub fn resolve(spec: &ProcessSpec) -> Result<Curve, ProcessError> {
    let start = spec.start.ok_or(ProcessError::MissingStartPoint)?;
    kernel::resolve_from(spec, start)
}
