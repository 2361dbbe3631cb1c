//! Factories for the engine's cable extensions.
//!
//! A cable dynamics extension always carries a definition: an empty
//! point array, the derived segment array, and default global
//! parameters. The route builder fills these in.

use nalgebra::Vector3;
use rig_engine::{Extension, ParamArray, ParamContainer, ParamValue};
use rig_types::BodyId;

use crate::fields;

/// Default minimum discretized section length, in meters.
pub const DEFAULT_MIN_SECTION_LENGTH: f64 = 0.1;

/// Default maximum discretized section length, in meters.
pub const DEFAULT_MAX_SECTION_LENGTH: f64 = 2.0;

/// Prototype for one point definition slot.
///
/// The slot carries the superset of all point-kind fields; the kind
/// discriminator decides which of them the engine reads.
fn point_prototype() -> ParamContainer {
    let mut point = ParamContainer::new();
    point.declare_value(fields::POINT_TYPE, ParamValue::Enum(0));
    point.declare_value(fields::BODY, ParamValue::Body(BodyId::new(0)));
    point.declare_value(fields::OFFSET, ParamValue::Vec3(Vector3::zeros()));
    point.declare_value(fields::INVERSE_WRAPPING, ParamValue::Bool(false));
    point.declare_value(
        fields::RELATIVE_PRIMARY_AXIS,
        ParamValue::Vec3(Vector3::x()),
    );
    point
}

/// Prototype for one derived segment definition slot.
fn segment_prototype() -> ParamContainer {
    let mut segment = ParamContainer::new();
    segment.declare_value(fields::FLEXIBLE, ParamValue::Bool(false));
    segment.declare_value(
        fields::MIN_SECTION_LENGTH,
        ParamValue::Real(DEFAULT_MIN_SECTION_LENGTH),
    );
    segment.declare_value(
        fields::MAX_SECTION_LENGTH,
        ParamValue::Real(DEFAULT_MAX_SECTION_LENGTH),
    );
    segment.declare_value(fields::COLLISION_GEOMETRY_TYPE, ParamValue::UInt(0));
    segment.declare_value(fields::FIXED_LENGTH, ParamValue::Bool(false));
    segment
}

/// Default global cable parameters.
fn param_prototype() -> ParamContainer {
    let mut params = ParamContainer::new();
    params.declare_value(fields::AXIAL_STIFFNESS, ParamValue::Real(0.0));
    params.declare_value(fields::AXIAL_DAMPING, ParamValue::Real(0.0));
    params.declare_value(fields::COLLISION_GEOMETRY_TYPE, ParamValue::UInt(0));
    params.declare_value(fields::ENABLE_BREAKAGE, ParamValue::Bool(false));
    params.declare_value(fields::MAX_TENSION, ParamValue::Real(f64::INFINITY));
    params
}

/// Create a cable dynamics extension with an empty definition.
#[must_use]
pub fn dynamics_extension(name: impl Into<String>) -> Extension {
    let mut definition = ParamContainer::new();
    definition.declare_array(
        fields::POINT_DEFINITIONS,
        ParamArray::new(point_prototype()),
    );
    definition.declare_array(
        fields::SEGMENT_DEFINITIONS,
        ParamArray::new(segment_prototype()),
    );
    definition.declare_container(fields::PARAM_DEFINITION, param_prototype());

    let mut parameters = ParamContainer::new();
    parameters.declare_container(fields::DEFINITION, definition);

    Extension::new(name)
        .with_parameters(parameters)
        .with_output(fields::CABLES_PORT)
}

/// Create a cable graphics extension.
///
/// Rendering is the engine's business; the extension exists only so
/// the dynamics output port has something to publish to.
#[must_use]
pub fn graphics_extension(name: impl Into<String>) -> Extension {
    Extension::new(name).with_input(fields::CABLES_PORT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamics_extension_always_has_a_definition() {
        let ext = dynamics_extension("My cable dynamics extension");
        let definition = ext.parameters().container(fields::DEFINITION).unwrap();

        assert_eq!(definition.array(fields::POINT_DEFINITIONS).unwrap().size(), 0);
        assert_eq!(
            definition.array(fields::SEGMENT_DEFINITIONS).unwrap().size(),
            0
        );
        let params = definition.container(fields::PARAM_DEFINITION).unwrap();
        assert_eq!(params.bool_value(fields::ENABLE_BREAKAGE), Some(false));
    }

    #[test]
    fn test_ports() {
        use rig_engine::PortDirection;

        let dynamics = dynamics_extension("dyn");
        let graphics = graphics_extension("gfx");
        assert!(dynamics.has_port(fields::CABLES_PORT, PortDirection::Output));
        assert!(graphics.has_port(fields::CABLES_PORT, PortDirection::Input));
    }
}
