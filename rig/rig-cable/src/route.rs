//! Ordered cable route construction.

use hashbrown::HashMap;
use nalgebra::Vector3;
use rig_engine::{Extension, ParamContainer, ParamValue};
use rig_types::BodyId;
use tracing::{debug, info};

use crate::error::CableError;
use crate::fields;

/// Kind discriminator for a cable contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    /// Spooling drum the cable pays out from.
    Winch,
    /// Guide pulley the cable wraps around.
    Pulley,
    /// Ring the cable slides through.
    Ring,
    /// Terminal attachment on a body.
    AttachmentPoint,
}

impl PointKind {
    /// Raw discriminator written into the parameter store.
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::Winch => 0,
            Self::Pulley => 1,
            Self::Ring => 2,
            Self::AttachmentPoint => 3,
        }
    }

    /// Decode a raw discriminator.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Winch),
            1 => Some(Self::Pulley),
            2 => Some(Self::Ring),
            3 => Some(Self::AttachmentPoint),
            _ => None,
        }
    }
}

/// Kind-specific parameters of a cable contact point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointSpec {
    /// Spooling winch. Always the physical start of the cable.
    Winch,
    /// Guide pulley.
    Pulley {
        /// Invert the engine's automatic wrap-side deduction.
        ///
        /// The deduction can be geometrically ambiguous, typically for
        /// a pulley with a single upstream neighbor; this hint flips
        /// the guess.
        inverse_wrapping: bool,
    },
    /// Ring the cable passes through.
    Ring {
        /// Axis the ring opening is orthogonal to, in the body frame.
        primary_axis: Vector3<f64>,
    },
    /// Terminal attachment.
    AttachmentPoint {
        /// Offset from the body's center of mass, in the body frame.
        /// Needed when attaching anywhere but the center of mass.
        offset: Vector3<f64>,
    },
}

impl PointSpec {
    /// The kind discriminator for this point.
    #[must_use]
    pub fn kind(&self) -> PointKind {
        match self {
            Self::Winch => PointKind::Winch,
            Self::Pulley { .. } => PointKind::Pulley,
            Self::Ring { .. } => PointKind::Ring,
            Self::AttachmentPoint { .. } => PointKind::AttachmentPoint,
        }
    }
}

/// One contact point of the cable: a body plus kind-specific fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    /// The body the cable touches at this point.
    pub body: BodyId,
    /// Kind-specific parameters.
    pub spec: PointSpec,
}

impl RoutePoint {
    /// A winch point.
    #[must_use]
    pub fn winch(body: BodyId) -> Self {
        Self {
            body,
            spec: PointSpec::Winch,
        }
    }

    /// A pulley point.
    #[must_use]
    pub fn pulley(body: BodyId, inverse_wrapping: bool) -> Self {
        Self {
            body,
            spec: PointSpec::Pulley { inverse_wrapping },
        }
    }

    /// A ring point.
    #[must_use]
    pub fn ring(body: BodyId, primary_axis: Vector3<f64>) -> Self {
        Self {
            body,
            spec: PointSpec::Ring { primary_axis },
        }
    }

    /// A terminal attachment point.
    #[must_use]
    pub fn attachment(body: BodyId, offset: Vector3<f64>) -> Self {
        Self {
            body,
            spec: PointSpec::AttachmentPoint { offset },
        }
    }
}

/// Per-segment overrides of the engine's derived defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentOverride {
    /// Discretize the segment into flexible sections.
    pub flexible: bool,
    /// Minimum section length in meters.
    pub min_section_length: f64,
    /// Maximum section length in meters.
    pub max_section_length: f64,
    /// Collision geometry type selector, if overridden.
    pub collision_geometry: Option<u32>,
    /// Pin the segment length (no spooling through it), if overridden.
    pub fixed_length: Option<bool>,
}

impl SegmentOverride {
    /// A flexible segment with the given section length range.
    #[must_use]
    pub fn flexible(min_section_length: f64, max_section_length: f64) -> Self {
        Self {
            flexible: true,
            min_section_length,
            max_section_length,
            collision_geometry: None,
            fixed_length: None,
        }
    }

    /// Select a collision geometry type for the segment.
    #[must_use]
    pub fn with_collision_geometry(mut self, kind: u32) -> Self {
        self.collision_geometry = Some(kind);
        self
    }

    /// Pin or unpin the segment length.
    #[must_use]
    pub fn with_fixed_length(mut self, fixed: bool) -> Self {
        self.fixed_length = Some(fixed);
        self
    }
}

/// Global cable material parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CableParams {
    /// Axial stiffness in N/m.
    pub axial_stiffness: f64,
    /// Axial damping in N·s/m.
    pub axial_damping: f64,
    /// Max-tension threshold enabling the snap event, if any.
    pub breakage: Option<f64>,
    /// Collision geometry type selector for the whole cable.
    pub collision_geometry: Option<u32>,
}

impl Default for CableParams {
    fn default() -> Self {
        Self {
            axial_stiffness: 10_000.0,
            axial_damping: 100.0,
            breakage: None,
            collision_geometry: None,
        }
    }
}

impl CableParams {
    /// Create parameters with the given stiffness and damping.
    #[must_use]
    pub fn new(axial_stiffness: f64, axial_damping: f64) -> Self {
        Self {
            axial_stiffness,
            axial_damping,
            ..Self::default()
        }
    }

    /// Enable the breakage event above the given tension (N).
    #[must_use]
    pub fn with_breakage(mut self, max_tension: f64) -> Self {
        self.breakage = Some(max_tension);
        self
    }

    /// Select a collision geometry type for the whole cable.
    #[must_use]
    pub fn with_collision_geometry(mut self, kind: u32) -> Self {
        self.collision_geometry = Some(kind);
        self
    }
}

/// Builds a cable route definition and writes it into a cable
/// dynamics extension.
///
/// Points must be pushed in the physical order the cable touches
/// bodies: winch first, then guide points in geometric order, then the
/// final attachment. [`apply`](Self::apply) performs no ordering
/// check; see the crate docs for the hazard and
/// [`validate`](Self::validate) for the opt-in structural check.
///
/// # Example
///
/// ```
/// use rig_cable::{CableParams, RouteBuilder, RoutePoint, SegmentOverride};
/// use rig_types::BodyId;
/// use nalgebra::Vector3;
///
/// let route = RouteBuilder::new(CableParams::new(10_000.0, 2_000.0))
///     .with_point(RoutePoint::winch(BodyId::new(0)))
///     .with_point(RoutePoint::pulley(BodyId::new(1), true))
///     .with_point(RoutePoint::attachment(BodyId::new(2), Vector3::new(0.0, 0.0, -0.5)))
///     .override_segment(4, SegmentOverride::flexible(0.2, 1.0));
///
/// assert_eq!(route.segment_count(), 5);
/// route.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteBuilder {
    points: Vec<RoutePoint>,
    overrides: HashMap<usize, SegmentOverride>,
    params: CableParams,
}

impl RouteBuilder {
    /// Create a route with the given global parameters and no points.
    #[must_use]
    pub fn new(params: CableParams) -> Self {
        Self {
            points: Vec::new(),
            overrides: HashMap::new(),
            params,
        }
    }

    /// Append a contact point. Order is physical cable order.
    #[must_use]
    pub fn with_point(mut self, point: RoutePoint) -> Self {
        self.points.push(point);
        self
    }

    /// Override a derived segment's parameters.
    ///
    /// Segments alternate arc-on-point and span-between-points:
    /// index 0 is the arc on point 0, index 1 the span from point 0 to
    /// point 1, and so on. A later override of the same index replaces
    /// the earlier one.
    #[must_use]
    pub fn override_segment(mut self, index: usize, spec: SegmentOverride) -> Self {
        self.overrides.insert(index, spec);
        self
    }

    /// The contact points, in order.
    #[must_use]
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Number of segments the engine derives: 2N−1 for N points.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_mul(2).saturating_sub(1)
    }

    /// Opt-in structural check of the route.
    ///
    /// Rejects routes with fewer than two points, a winch anywhere but
    /// index 0, or an attachment anywhere but the last index. This
    /// does not prove the order matches the physical cable path (only
    /// geometry can), but it catches the cheap mistakes.
    pub fn validate(&self) -> crate::Result<()> {
        if self.points.len() < 2 {
            return Err(CableError::TooFewPoints {
                count: self.points.len(),
            });
        }

        let last = self.points.len() - 1;
        for (index, point) in self.points.iter().enumerate() {
            match point.spec.kind() {
                PointKind::Winch if index != 0 => {
                    return Err(CableError::WinchNotFirst { index });
                }
                PointKind::AttachmentPoint if index != last => {
                    return Err(CableError::AttachmentNotTerminal { index });
                }
                _ => {}
            }
        }

        let count = self.segment_count();
        for &index in self.overrides.keys() {
            if index >= count {
                return Err(CableError::SegmentIndexOutOfRange { index, count });
            }
        }

        Ok(())
    }

    /// Write the route into a cable dynamics extension.
    ///
    /// Point slots are allocated and written in strict order; the
    /// derived segment array is sized to 2N−1 and only overridden
    /// indices are touched, leaving the rest at engine defaults. Any
    /// array-resize rejection is fatal: no partial cable is left
    /// behind. A rejected pulley wrap hint is logged and the engine's
    /// own wrap deduction stands.
    pub fn apply(&self, extension: &mut Extension) -> crate::Result<()> {
        let extension_name = extension.name().to_owned();
        let definition = extension
            .parameters_mut()
            .container_mut(fields::DEFINITION)
            .ok_or(CableError::MissingDefinition {
                extension: extension_name,
            })?;

        // Point array allocation comes first: the whole cable cannot
        // exist without it.
        let requested = self.points.len();
        let points = definition
            .array_mut(fields::POINT_DEFINITIONS)
            .ok_or(CableError::PointArrayResize { requested })?;
        if !points.set_size(requested) {
            return Err(CableError::PointArrayResize { requested });
        }

        for (index, point) in self.points.iter().enumerate() {
            let Some(slot) = points.item_mut(index) else {
                return Err(CableError::PointArrayResize { requested });
            };
            write_point(slot, index, point);
        }

        let segment_count = self.segment_count();
        let segments = definition
            .array_mut(fields::SEGMENT_DEFINITIONS)
            .ok_or(CableError::SegmentArrayResize {
                requested: segment_count,
            })?;
        if !segments.set_size(segment_count) {
            return Err(CableError::SegmentArrayResize {
                requested: segment_count,
            });
        }

        let mut indices: Vec<usize> = self.overrides.keys().copied().collect();
        indices.sort_unstable();
        for index in indices {
            let slot = segments
                .item_mut(index)
                .ok_or(CableError::SegmentIndexOutOfRange {
                    index,
                    count: segment_count,
                })?;
            if let Some(spec) = self.overrides.get(&index) {
                write_segment(slot, spec);
            }
        }

        if let Some(params) = definition.container_mut(fields::PARAM_DEFINITION) {
            write_params(params, &self.params);
        }

        Ok(())
    }
}

fn write_point(slot: &mut ParamContainer, index: usize, point: &RoutePoint) {
    write_field(slot, fields::POINT_TYPE, ParamValue::Enum(point.spec.kind().raw()));
    write_field(slot, fields::BODY, ParamValue::Body(point.body));

    match &point.spec {
        PointSpec::Winch => {}
        PointSpec::Pulley { inverse_wrapping } => {
            if !slot.set_value(fields::INVERSE_WRAPPING, ParamValue::Bool(*inverse_wrapping)) {
                info!(
                    index,
                    "cannot set the inverse wrapping hint; engine wrap deduction stands"
                );
            }
        }
        PointSpec::Ring { primary_axis } => {
            write_field(
                slot,
                fields::RELATIVE_PRIMARY_AXIS,
                ParamValue::Vec3(*primary_axis),
            );
        }
        PointSpec::AttachmentPoint { offset } => {
            write_field(slot, fields::OFFSET, ParamValue::Vec3(*offset));
        }
    }
}

fn write_segment(slot: &mut ParamContainer, spec: &SegmentOverride) {
    write_field(slot, fields::FLEXIBLE, ParamValue::Bool(spec.flexible));
    write_field(
        slot,
        fields::MIN_SECTION_LENGTH,
        ParamValue::Real(spec.min_section_length),
    );
    write_field(
        slot,
        fields::MAX_SECTION_LENGTH,
        ParamValue::Real(spec.max_section_length),
    );
    if let Some(kind) = spec.collision_geometry {
        write_field(slot, fields::COLLISION_GEOMETRY_TYPE, ParamValue::UInt(kind));
    }
    if let Some(fixed) = spec.fixed_length {
        write_field(slot, fields::FIXED_LENGTH, ParamValue::Bool(fixed));
    }
}

fn write_params(container: &mut ParamContainer, params: &CableParams) {
    write_field(
        container,
        fields::AXIAL_STIFFNESS,
        ParamValue::Real(params.axial_stiffness),
    );
    write_field(
        container,
        fields::AXIAL_DAMPING,
        ParamValue::Real(params.axial_damping),
    );
    if let Some(kind) = params.collision_geometry {
        write_field(container, fields::COLLISION_GEOMETRY_TYPE, ParamValue::UInt(kind));
    }
    if let Some(max_tension) = params.breakage {
        write_field(container, fields::ENABLE_BREAKAGE, ParamValue::Bool(true));
        write_field(container, fields::MAX_TENSION, ParamValue::Real(max_tension));
    }
}

fn write_field(container: &mut ParamContainer, id: &str, value: ParamValue) {
    if !container.set_value(id, value) {
        debug!(field = id, "engine ignored cable field write");
    }
}
