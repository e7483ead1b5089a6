#![warn(missing_docs)]

//! Process geometry engine for thermodynamic state diagrams.
//!
//! Turns process descriptions (isothermal, adiabatic, linear, power-law,
//! parabolic, Bezier) into sampled curves on the x/y state plane, resolving
//! the missing end coordinate from each process's invariant. Processes can
//! be chained so that one starts where the previous one ended, adjacent
//! curves can be spliced with tangent-matched Bezier joints, and curves can
//! be resampled by arc length for marker placement.
//!
//! # Example
//!
//! ```
//! use thermoplot_geom::{ChainState, ProcessSpec};
//!
//! let mut chain = ChainState::new();
//!
//! // Isotherm from (2, 4) down to pressure 2: the volume doubles.
//! let iso = chain
//!     .resolve(&ProcessSpec::isothermal().at(2.0, 4.0).to_pressure(2.0))
//!     .unwrap();
//! assert!((iso.end().x - 4.0).abs() < 1e-9);
//!
//! // The next process inherits (4, 2) as its start.
//! let cool = chain.resolve(&ProcessSpec::linear().to(4.0, 1.0)).unwrap();
//! assert_eq!(cool.start(), iso.end());
//! ```

mod bezier;
mod chain;
mod curve;
mod invariant;
mod kernel;
mod process;
mod resample;

pub use bezier::{connect, connect_with_samples, BezierJoint, ConnectMode};
pub use chain::ChainState;
pub use curve::Curve;
pub use invariant::{
    curve_isotherm_adiabat_intersection, isotherm_adiabat_intersection, polytrope_intersection,
};
pub use process::{
    resolve, Axis, BezierControl, EndCondition, Hold, ProcessKind, ProcessSpec, DEFAULT_SAMPLES,
};
pub use resample::{
    cumulative_lengths, place_marker, resample_by_arclength, resample_points, MarkerPlacement,
    DEFAULT_MARKER_FRACTION,
};

pub use thermoplot_math::{Point2, Vec2};

use thiserror::Error;

/// Errors from process resolution, connectors and invariant helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    /// The process has no explicit start and the chain has no tail yet.
    #[error("process has no start point and the chain is idle")]
    MissingStartPoint,

    /// The process has no end condition.
    #[error("process has no end condition")]
    MissingEndPoint,

    /// A division by zero, singular system or non-finite sample.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// Parallel connector tangents, or a degenerate invariant intersection.
    #[error("no intersection")]
    NoIntersection,

    /// A process parameter or anchor value outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
