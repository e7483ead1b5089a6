//! Sequential process chaining.

use serde::{Deserialize, Serialize};
use thermoplot_math::{Point2, Vec2};

use crate::curve::Curve;
use crate::kernel;
use crate::process::ProcessSpec;
use crate::ProcessError;

/// Tail of a process chain: where the next process starts by default.
///
/// One `ChainState` belongs to one diagram. It only remembers the last
/// finalized curve's end point and end tangent; curves themselves are owned
/// by the caller and are never touched after they are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ChainState {
    /// No curve recorded since the chain was created or detached.
    #[default]
    Idle,
    /// At least one curve recorded.
    Chaining {
        /// End point of the last recorded curve.
        tail: Point2,
        /// End tangent of the last recorded curve.
        tangent: Vec2,
    },
}

impl ChainState {
    /// A new, idle chain.
    pub fn new() -> Self {
        Self::Idle
    }

    /// The current tail point, if any.
    pub fn tail(&self) -> Option<Point2> {
        match self {
            ChainState::Idle => None,
            ChainState::Chaining { tail, .. } => Some(*tail),
        }
    }

    /// The tangent recorded with the tail, if any.
    pub fn tail_tangent(&self) -> Option<Vec2> {
        match self {
            ChainState::Idle => None,
            ChainState::Chaining { tangent, .. } => Some(*tangent),
        }
    }

    /// Whether a tail has been recorded.
    pub fn is_chaining(&self) -> bool {
        matches!(self, ChainState::Chaining { .. })
    }

    /// Record a new tail, replacing the previous one.
    pub fn record(&mut self, tail: Point2, tangent: Vec2) {
        log::debug!("chain tail -> ({:.6}, {:.6})", tail.x, tail.y);
        *self = ChainState::Chaining { tail, tangent };
    }

    /// Record `curve`'s end point and end tangent as the new tail.
    pub fn record_curve(&mut self, curve: &Curve) {
        self.record(curve.end(), curve.end_tangent());
    }

    /// Start a new, independent chain.
    ///
    /// Curves produced so far are unaffected; the next process needs an
    /// explicit start again.
    pub fn detach(&mut self) {
        if self.is_chaining() {
            log::debug!("chain detached");
        }
        *self = ChainState::Idle;
    }

    /// Resolve `spec`, inheriting the tail as its start if it has none,
    /// and record the resulting curve.
    ///
    /// On error the chain is left unchanged.
    pub fn resolve(&mut self, spec: &ProcessSpec) -> Result<Curve, ProcessError> {
        let start = spec
            .start
            .or_else(|| self.tail())
            .ok_or(ProcessError::MissingStartPoint)?;
        let curve = kernel::resolve_from(spec, start)?;
        self.record_curve(&curve);
        Ok(curve)
    }
}
