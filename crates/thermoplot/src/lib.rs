#![warn(missing_docs)]

//! Thermodynamic process diagrams.
//!
//! A [`Diagram`] is one drawing session: it owns a process chain, the
//! curves resolved so far and the drawing metadata attached to them
//! (style, arrows, dots, guide lines). Rendering is left to the caller, who reads
//! the curves and metadata back out, or serializes the whole diagram.
//!
//! # Example
//!
//! ```
//! use thermoplot::{Diagram, GuideAnchor, GuideKind, ProcessSpec};
//!
//! let mut diagram = Diagram::new();
//!
//! // Compress isothermally from (4, 1), then heat at constant volume.
//! let iso = diagram
//!     .process(ProcessSpec::isothermal().at(4.0, 1.0).to_volume(1.0))
//!     .unwrap();
//! let heat = diagram.process(ProcessSpec::linear().to_pressure(6.0)).unwrap();
//! assert_eq!(diagram.tail().unwrap().y, 6.0);
//!
//! diagram.arrow(iso).unwrap();
//! diagram.add_guide(heat, GuideKind::ToX, GuideAnchor::End).unwrap();
//! assert!(diagram.arrow_placement(iso).unwrap().is_some());
//! ```

mod guide;
mod options;
mod style;

pub use guide::{Guide, GuideAnchor, GuideKind, GuideSegment};
pub use options::DiagramOptions;
pub use style::{ArrowSpec, DotSpec, LineStyle, Style};

pub use thermoplot_geom;
pub use thermoplot_math;

pub use thermoplot_geom::{
    BezierControl, ChainState, ConnectMode, Curve, EndCondition, Hold, MarkerPlacement,
    Point2, ProcessError, ProcessKind, ProcessSpec, Vec2,
};

use serde::Serialize;
use thiserror::Error;

/// Errors from diagram operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// A process, connector or marker failed to resolve.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The curve id does not belong to this diagram.
    #[error("unknown curve {0:?}")]
    UnknownCurve(CurveId),

    /// The state id does not belong to this diagram.
    #[error("unknown state {0:?}")]
    UnknownState(StateId),

    /// The options document could not be parsed.
    #[error("invalid options document: {0}")]
    Options(#[from] toml::de::Error),

    /// The options parsed but hold unusable values.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Handle to a curve stored in a [`Diagram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CurveId(usize);

/// Handle to a state marker stored in a [`Diagram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StateId(usize);

/// A curve together with its drawing metadata.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramCurve {
    /// The resolved geometry.
    pub curve: Curve,
    /// Stroke.
    pub style: Style,
    /// Requested direction arrow, if any.
    pub arrow: Option<ArrowSpec>,
    /// Requested guide lines.
    pub guides: Vec<Guide>,
    /// Requested endpoint dots, if any.
    pub dots: Option<(GuideAnchor, DotSpec)>,
    /// Whether this curve is a connector joint rather than a chained process.
    pub connector: bool,
}

impl DiagramCurve {
    fn new(curve: Curve, connector: bool) -> Self {
        Self {
            curve,
            style: Style::default(),
            arrow: None,
            guides: Vec::new(),
            dots: None,
            connector,
        }
    }
}

/// A standalone state point and its marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramState {
    /// Location of the state.
    pub point: Point2,
    /// Requested marker, if any.
    pub dot: Option<DotSpec>,
}

/// One drawing session.
///
/// `L` is the layout payload for the renderer (plot limits, font size and
/// the like). The diagram stores it and hands it back; it never reads it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagram<L = ()> {
    layout: L,
    options: DiagramOptions,
    #[serde(skip)]
    chain: ChainState,
    curves: Vec<DiagramCurve>,
    states: Vec<DiagramState>,
}

impl Diagram<()> {
    /// An empty diagram without layout payload.
    pub fn new() -> Self {
        Self::with_layout(())
    }
}

impl Default for Diagram<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Diagram<L> {
    /// An empty diagram carrying `layout` for the renderer.
    pub fn with_layout(layout: L) -> Self {
        Self {
            layout,
            options: DiagramOptions::default(),
            chain: ChainState::new(),
            curves: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Replace the diagram defaults after checking them.
    pub fn with_options(mut self, options: DiagramOptions) -> Result<Self, DiagramError> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// The layout payload.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// The diagram defaults.
    pub fn options(&self) -> &DiagramOptions {
        &self.options
    }

    /// The process chain.
    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    /// Where the next process without an explicit start begins.
    pub fn tail(&self) -> Option<Point2> {
        self.chain.tail()
    }

    /// A new spec of `kind` using this diagram's sample count.
    pub fn spec(&self, kind: ProcessKind) -> ProcessSpec {
        ProcessSpec::new(kind).with_samples(self.options.samples)
    }

    /// Resolve `spec` against the chain and store the curve.
    ///
    /// A spec without a start begins at the current tail. On error nothing
    /// is stored and the chain is unchanged.
    pub fn process(&mut self, spec: ProcessSpec) -> Result<CurveId, DiagramError> {
        let curve = self.chain.resolve(&spec)?;
        Ok(self.push(DiagramCurve::new(curve, false)))
    }

    /// Join two stored curves with a Bezier joint and store it.
    ///
    /// Like any finalized curve the joint becomes the chain's tail, so the
    /// next process continues from the outgoing curve's start. On error
    /// nothing is stored and the chain is unchanged.
    pub fn connect(
        &mut self,
        incoming: CurveId,
        outgoing: CurveId,
        mode: ConnectMode,
    ) -> Result<CurveId, DiagramError> {
        let joint = thermoplot_geom::connect_with_samples(
            &self.get(incoming)?.curve,
            &self.get(outgoing)?.curve,
            mode,
            self.options.samples,
        )?;
        self.chain.record_curve(&joint);
        Ok(self.push(DiagramCurve::new(joint, true)))
    }

    /// Mark a standalone state. States do not affect the chain.
    pub fn state(&mut self, point: Point2) -> StateId {
        self.states.push(DiagramState { point, dot: None });
        StateId(self.states.len() - 1)
    }

    /// Request a marker on a stored state.
    pub fn set_state_dot(&mut self, id: StateId, dot: DotSpec) -> Result<(), DiagramError> {
        let state = self
            .states
            .get_mut(id.0)
            .ok_or(DiagramError::UnknownState(id))?;
        state.dot = Some(dot);
        Ok(())
    }

    /// Start a new, independent chain; stored curves are kept.
    pub fn detach(&mut self) {
        self.chain.detach();
    }

    /// A stored curve.
    pub fn curve(&self, id: CurveId) -> Option<&DiagramCurve> {
        self.curves.get(id.0)
    }

    /// All stored curves in creation order.
    pub fn curves(&self) -> &[DiagramCurve] {
        &self.curves
    }

    /// A stored state.
    pub fn state_point(&self, id: StateId) -> Option<Point2> {
        self.states.get(id.0).map(|s| s.point)
    }

    /// All stored states in creation order.
    pub fn states(&self) -> &[DiagramState] {
        &self.states
    }

    /// Set a curve's stroke.
    pub fn set_style(&mut self, id: CurveId, style: Style) -> Result<(), DiagramError> {
        self.get_mut(id)?.style = style;
        Ok(())
    }

    /// Request a direction arrow on a curve.
    pub fn set_arrow(&mut self, id: CurveId, arrow: ArrowSpec) -> Result<(), DiagramError> {
        if !(0.0..=1.0).contains(&arrow.position) {
            return Err(ProcessError::InvalidParameter(format!(
                "arrow position must be within [0, 1], got {}",
                arrow.position
            ))
            .into());
        }
        self.get_mut(id)?.arrow = Some(arrow);
        Ok(())
    }

    /// Request the default arrow at the diagram's arrow position.
    pub fn arrow(&mut self, id: CurveId) -> Result<(), DiagramError> {
        self.set_arrow(id, ArrowSpec::at(self.options.arrow_position))
    }

    /// Add a guide line from a curve's endpoint(s) to an axis or the origin.
    pub fn add_guide(
        &mut self,
        id: CurveId,
        kind: GuideKind,
        anchor: GuideAnchor,
    ) -> Result<(), DiagramError> {
        self.get_mut(id)?.guides.push(Guide::new(kind, anchor));
        Ok(())
    }

    /// Request dots on a curve's start, end or both.
    pub fn set_dots(
        &mut self,
        id: CurveId,
        anchor: GuideAnchor,
        dot: DotSpec,
    ) -> Result<(), DiagramError> {
        self.get_mut(id)?.dots = Some((anchor, dot));
        Ok(())
    }

    /// The points to mark on a curve with their markers, start first.
    pub fn dot_markers(&self, id: CurveId) -> Result<Vec<(Point2, DotSpec)>, DiagramError> {
        let entry = self.get(id)?;
        let Some((anchor, dot)) = &entry.dots else {
            return Ok(Vec::new());
        };
        let points = match anchor {
            GuideAnchor::Start => vec![entry.curve.start()],
            GuideAnchor::End => vec![entry.curve.end()],
            GuideAnchor::Both => vec![entry.curve.start(), entry.curve.end()],
        };
        Ok(points.into_iter().map(|p| (p, dot.clone())).collect())
    }

    /// Where the curve's arrow goes, if it requested one.
    pub fn arrow_placement(&self, id: CurveId) -> Result<Option<MarkerPlacement>, DiagramError> {
        let entry = self.get(id)?;
        match &entry.arrow {
            Some(arrow) => Ok(Some(thermoplot_geom::place_marker(
                &entry.curve,
                arrow.position,
                arrow.reverse,
            )?)),
            None => Ok(None),
        }
    }

    /// All guide line segments requested on a curve.
    pub fn guide_segments(&self, id: CurveId) -> Result<Vec<GuideSegment>, DiagramError> {
        let entry = self.get(id)?;
        Ok(entry
            .guides
            .iter()
            .flat_map(|g| g.segments(&entry.curve))
            .collect())
    }

    fn push(&mut self, entry: DiagramCurve) -> CurveId {
        self.curves.push(entry);
        let id = CurveId(self.curves.len() - 1);
        log::debug!("diagram stored curve {}", id.0);
        id
    }

    fn get(&self, id: CurveId) -> Result<&DiagramCurve, DiagramError> {
        self.curves.get(id.0).ok_or(DiagramError::UnknownCurve(id))
    }

    fn get_mut(&mut self, id: CurveId) -> Result<&mut DiagramCurve, DiagramError> {
        self.curves.get_mut(id.0).ok_or(DiagramError::UnknownCurve(id))
    }
}
