//! Stable field identifiers for the engine's cable extension.
//!
//! These are the contract with the external engine: the identifiers
//! under which the cable definition is stored in the extension's
//! parameter container. They never change between releases.

/// Root container holding the whole cable definition.
pub const DEFINITION: &str = "definition";

/// Array of point definitions, ordered by physical cable contact.
pub const POINT_DEFINITIONS: &str = "pointDefinitions";

/// Array of derived segment definitions (2N−1 for N points).
pub const SEGMENT_DEFINITIONS: &str = "segmentDefinitions";

/// Container of global cable parameters.
pub const PARAM_DEFINITION: &str = "paramDefinition";

/// Point kind discriminator (see [`PointKind`](crate::PointKind)).
pub const POINT_TYPE: &str = "pointType";

/// Body the point rides on.
pub const BODY: &str = "body";

/// Attachment offset from the body's center of mass.
pub const OFFSET: &str = "offset";

/// Pulley wrap-inversion hint.
pub const INVERSE_WRAPPING: &str = "inverseWrapping";

/// Axis the ring opening is orthogonal to, in the body frame.
pub const RELATIVE_PRIMARY_AXIS: &str = "relativePrimaryAxis";

/// Whether a segment is discretized into flexible sections.
pub const FLEXIBLE: &str = "flexible";

/// Minimum discretized section length.
pub const MIN_SECTION_LENGTH: &str = "minSectionLength";

/// Maximum discretized section length.
pub const MAX_SECTION_LENGTH: &str = "maxSectionLength";

/// Collision geometry type selector for a segment or the whole cable.
pub const COLLISION_GEOMETRY_TYPE: &str = "collisionGeometryType";

/// Whether a segment keeps a fixed length (no spooling through it).
pub const FIXED_LENGTH: &str = "fixedLength";

/// Cable axial stiffness (N/m).
pub const AXIAL_STIFFNESS: &str = "axialStiffness";

/// Cable axial damping (N·s/m).
pub const AXIAL_DAMPING: &str = "axialDamping";

/// Enables the tension breakage (snap) event.
pub const ENABLE_BREAKAGE: &str = "enableBreakage";

/// Tension threshold for the breakage event (N).
pub const MAX_TENSION: &str = "maxTension";

/// Cable state output port on the dynamics extension / input port on
/// the graphics extension.
pub const CABLES_PORT: &str = "cables";
