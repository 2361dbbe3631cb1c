//! The full cable crane scene.
//!
//! Four mechanisms: the crane, a load resting on the ground, an
//! animated hook hovering above it, and the ground itself. One cable
//! runs from the crane's winch over both boom pulleys, through a ring
//! on the hook, and down to an attachment on top of the load.

use nalgebra::{Point3, Vector3};
use rig_cable::{dynamics_extension, CableParams, RouteBuilder, RoutePoint, SegmentOverride};
use rig_engine::{Connection, Mechanism, Scene};
use rig_types::{Assembly, Body, BodyId, MotionClass, ShapeAttachment, ShapePrimitive};
use tracing::warn;

#[cfg(feature = "graphics")]
use rig_cable::graphics_extension;

use crate::crane::Crane;
use crate::names;

/// Cable axial stiffness, N/m.
const AXIAL_STIFFNESS: f64 = 10_000.0;

/// Cable axial damping, N·s/m.
const AXIAL_DAMPING: f64 = 2_000.0;

/// Mass of the load box, kg.
const LOAD_MASS: f64 = 400.0;

/// Mass of the hook, kg.
const HOOK_MASS: f64 = 200.0;

/// The crane, its surroundings and the cable rigging between them.
#[derive(Debug, Clone, PartialEq)]
pub struct CableCraneScene {
    crane: Crane,
    load: Mechanism,
    hook: Mechanism,
    ground: Mechanism,
    connections: Vec<Connection>,
}

impl CableCraneScene {
    /// Build the whole scene and rig the cable.
    pub fn build() -> crate::Result<Self> {
        let crane = Crane::new()?;
        let mut scene = Self {
            crane,
            load: load_mechanism(),
            hook: hook_mechanism(),
            ground: ground_mechanism(),
            connections: Vec::new(),
        };
        scene.attach_cable()?;
        Ok(scene)
    }

    /// The crane.
    #[must_use]
    pub fn crane(&self) -> &Crane {
        &self.crane
    }

    /// The crane, mutably (to drive its motors).
    #[must_use]
    pub fn crane_mut(&mut self) -> &mut Crane {
        &mut self.crane
    }

    /// The load mechanism.
    #[must_use]
    pub fn load(&self) -> &Mechanism {
        &self.load
    }

    /// The hook mechanism.
    #[must_use]
    pub fn hook(&self) -> &Mechanism {
        &self.hook
    }

    /// The ground mechanism.
    #[must_use]
    pub fn ground(&self) -> &Mechanism {
        &self.ground
    }

    /// Snapshot the scene in the engine's own terms, ready to hand to
    /// an application. Later motor commands on this scene do not flow
    /// into snapshots already taken.
    #[must_use]
    pub fn description(&self) -> Scene {
        let mut scene = Scene::new();
        scene.add_mechanism(self.crane.mechanism().clone());
        scene.add_mechanism(self.load.clone());
        scene.add_mechanism(self.hook.clone());
        scene.add_mechanism(self.ground.clone());
        for connection in &self.connections {
            scene.add_connection(connection.clone());
        }
        scene
    }

    /// Build the cable route and attach the cable extension to the
    /// crane mechanism.
    ///
    /// The route runs winch, mid pulley, tip pulley, hook ring, load
    /// attachment, in the physical order the cable touches them. The two
    /// hanging segments past the tip pulley are made flexible so they
    /// drape; the final drop also collides as a cable.
    fn attach_cable(&mut self) -> crate::Result<()> {
        if self
            .crane
            .mechanism()
            .assembly_by_name(names::CRANE_ASSEMBLY)
            .is_none()
        {
            warn!("the crane assembly was not found in the crane mechanism; no cable rigged");
            return Ok(());
        }

        let winch = self.crane.body_id(names::WINCH)?;
        let mid_pulley = self.crane.body_id(names::MID_PULLEY)?;
        let tip_pulley = self.crane.body_id(names::TIP_PULLEY)?;
        let hook = body_in(&self.hook, names::HOOK_ASSEMBLY, names::HOOK)?;
        let load = body_in(&self.load, names::LOAD_ASSEMBLY, names::LOAD)?;

        let route = RouteBuilder::new(CableParams::new(AXIAL_STIFFNESS, AXIAL_DAMPING))
            .with_point(RoutePoint::winch(winch))
            // The wrap hint flips the wrap-side guess, which comes out
            // wrong here with the winch as the only upstream neighbor.
            .with_point(RoutePoint::pulley(mid_pulley, true))
            .with_point(RoutePoint::pulley(tip_pulley, false))
            .with_point(RoutePoint::ring(hook, Vector3::x()))
            // Attach on top of the load, not at its center of mass.
            .with_point(RoutePoint::attachment(load, Vector3::new(0.0, 0.0, -0.5)))
            .override_segment(5, SegmentOverride::flexible(0.2, 1.0))
            .override_segment(
                6,
                SegmentOverride::flexible(0.2, 3.0).with_collision_geometry(2),
            );
        route.validate()?;

        let mut dynamics = dynamics_extension(names::CABLE_DYNAMICS);
        route.apply(&mut dynamics)?;

        #[cfg(feature = "graphics")]
        {
            let graphics = graphics_extension(names::CABLE_GRAPHICS);
            let connection = Connection::create(
                &dynamics,
                rig_cable::fields::CABLES_PORT,
                &graphics,
                rig_cable::fields::CABLES_PORT,
            )?;
            self.connections.push(connection);
            self.crane.mechanism_mut().add_extension(graphics);
        }

        self.crane.mechanism_mut().add_extension(dynamics);
        Ok(())
    }
}

/// Look up a body in another mechanism's named assembly.
fn body_in(mechanism: &Mechanism, assembly: &str, body: &str) -> rig_types::Result<BodyId> {
    let assembly = mechanism
        .assembly_by_name(assembly)
        .ok_or_else(|| rig_types::RigError::body_not_found(body))?;
    Ok(assembly.find_body_by_name(body)?.id)
}

/// The static ground slab, top face at z = 0.
fn ground_mechanism() -> Mechanism {
    let mut assembly = Assembly::new(names::GROUND_ASSEMBLY);
    assembly.add_body(
        Body::new(
            names::GROUND,
            MotionClass::Static,
            Point3::new(0.0, 0.0, -0.1),
        )
        .with_shape(ShapeAttachment::new(ShapePrimitive::Box {
            extents: Vector3::new(100.0, 100.0, 0.2),
        })),
    );

    let mut mechanism = Mechanism::new(names::GROUND_MECHANISM);
    mechanism.add_assembly(assembly);
    mechanism
}

/// The load: a dynamic box resting on the ground under the boom tip.
fn load_mechanism() -> Mechanism {
    let mut assembly = Assembly::new(names::LOAD_ASSEMBLY);
    assembly.add_body(
        Body::new(
            names::LOAD,
            MotionClass::Dynamic,
            Point3::new(0.0, 28.0, 0.5),
        )
        .with_mass(LOAD_MASS)
        .with_shape(ShapeAttachment::new(ShapePrimitive::Box {
            extents: Vector3::new(1.0, 1.0, 1.0),
        })),
    );

    let mut mechanism = Mechanism::new(names::LOAD_MECHANISM);
    mechanism.add_assembly(assembly);
    mechanism
}

/// The hook: an animated box above the load that the cable rides
/// through. Animated so scripted motion can swing the cable around.
fn hook_mechanism() -> Mechanism {
    let mut assembly = Assembly::new(names::HOOK_ASSEMBLY);
    assembly.add_body(
        Body::new(
            names::HOOK,
            MotionClass::Animated,
            Point3::new(0.0, 28.0, 5.0),
        )
        .with_mass(HOOK_MASS)
        .with_shape(ShapeAttachment::new(ShapePrimitive::Box {
            extents: Vector3::new(1.0, 1.0, 1.0),
        })),
    );

    let mut mechanism = Mechanism::new(names::HOOK_MECHANISM);
    mechanism.add_assembly(assembly);
    mechanism
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rig_cable::{fields, PointKind};

    #[test]
    fn test_scene_builds_with_a_cable() {
        let scene = CableCraneScene::build().unwrap();
        let cable = scene
            .crane()
            .mechanism()
            .extension_by_name(names::CABLE_DYNAMICS)
            .unwrap();

        let definition = cable.parameters().container(fields::DEFINITION).unwrap();
        assert_eq!(
            definition.array(fields::POINT_DEFINITIONS).unwrap().size(),
            5
        );
        assert_eq!(
            definition.array(fields::SEGMENT_DEFINITIONS).unwrap().size(),
            9
        );
    }

    #[test]
    fn test_route_follows_the_physical_cable_path() {
        let scene = CableCraneScene::build().unwrap();
        let cable = scene
            .crane()
            .mechanism()
            .extension_by_name(names::CABLE_DYNAMICS)
            .unwrap();
        let points = cable
            .parameters()
            .container(fields::DEFINITION)
            .unwrap()
            .array(fields::POINT_DEFINITIONS)
            .unwrap();

        let winch = scene.crane().body_id(names::WINCH).unwrap();
        let hook = body_in(scene.hook(), names::HOOK_ASSEMBLY, names::HOOK).unwrap();
        let load = body_in(scene.load(), names::LOAD_ASSEMBLY, names::LOAD).unwrap();

        let first = points.item(0).unwrap();
        assert_eq!(
            first.enum_value(fields::POINT_TYPE),
            Some(PointKind::Winch.raw())
        );
        assert_eq!(first.body_value(fields::BODY), Some(winch));

        let ring = points.item(3).unwrap();
        assert_eq!(
            ring.enum_value(fields::POINT_TYPE),
            Some(PointKind::Ring.raw())
        );
        assert_eq!(ring.body_value(fields::BODY), Some(hook));

        let attachment = points.item(4).unwrap();
        assert_eq!(attachment.body_value(fields::BODY), Some(load));
        let offset = attachment.vec3_value(fields::OFFSET).unwrap();
        assert_relative_eq!(offset.z, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hanging_segments_are_flexible() {
        let scene = CableCraneScene::build().unwrap();
        let cable = scene
            .crane()
            .mechanism()
            .extension_by_name(names::CABLE_DYNAMICS)
            .unwrap();
        let segments = cable
            .parameters()
            .container(fields::DEFINITION)
            .unwrap()
            .array(fields::SEGMENT_DEFINITIONS)
            .unwrap();

        assert_eq!(segments.item(5).unwrap().bool_value(fields::FLEXIBLE), Some(true));
        assert_eq!(
            segments.item(5).unwrap().real_value(fields::MAX_SECTION_LENGTH),
            Some(1.0)
        );
        assert_eq!(segments.item(6).unwrap().bool_value(fields::FLEXIBLE), Some(true));
        // The arcs on the pulleys keep engine defaults.
        assert_eq!(segments.item(4).unwrap().bool_value(fields::FLEXIBLE), Some(false));
    }

    #[test]
    fn test_cable_material_parameters() {
        let scene = CableCraneScene::build().unwrap();
        let params = scene
            .crane()
            .mechanism()
            .extension_by_name(names::CABLE_DYNAMICS)
            .unwrap()
            .parameters()
            .container(fields::DEFINITION)
            .unwrap()
            .container(fields::PARAM_DEFINITION)
            .unwrap();

        assert_eq!(params.real_value(fields::AXIAL_STIFFNESS), Some(10_000.0));
        assert_eq!(params.real_value(fields::AXIAL_DAMPING), Some(2_000.0));
        assert_eq!(params.bool_value(fields::ENABLE_BREAKAGE), Some(false));
    }

    #[test]
    fn test_surrounding_bodies() {
        let scene = CableCraneScene::build().unwrap();

        let load_assembly = scene.load().assembly_by_name(names::LOAD_ASSEMBLY).unwrap();
        let load = load_assembly.find_body_by_name(names::LOAD).unwrap();
        assert_eq!(load.mass, 400.0);
        assert_eq!(load.motion, MotionClass::Dynamic);

        let hook_assembly = scene.hook().assembly_by_name(names::HOOK_ASSEMBLY).unwrap();
        let hook = hook_assembly.find_body_by_name(names::HOOK).unwrap();
        assert_eq!(hook.motion, MotionClass::Animated);
        assert_relative_eq!(hook.position.z, 5.0, epsilon = 1e-12);

        let ground_assembly = scene
            .ground()
            .assembly_by_name(names::GROUND_ASSEMBLY)
            .unwrap();
        let ground = ground_assembly.find_body_by_name(names::GROUND).unwrap();
        assert_eq!(ground.motion, MotionClass::Static);
    }

    #[test]
    fn test_missing_crane_assembly_skips_the_cable() {
        let crane = {
            let mut crane = Crane::new().unwrap();
            crane.mechanism_mut().assemblies_mut().clear();
            crane
        };
        let mut scene = CableCraneScene {
            crane,
            load: load_mechanism(),
            hook: hook_mechanism(),
            ground: ground_mechanism(),
            connections: Vec::new(),
        };

        scene.attach_cable().unwrap();
        assert!(scene
            .crane()
            .mechanism()
            .extension_by_name(names::CABLE_DYNAMICS)
            .is_none());
    }

    #[test]
    fn test_description_snapshots_all_mechanisms() {
        let scene = CableCraneScene::build().unwrap();
        let description = scene.description();

        assert_eq!(description.mechanisms().len(), 4);
        let crane = description
            .mechanisms()
            .iter()
            .find(|m| m.name() == names::CRANE_MECHANISM)
            .unwrap();
        assert!(crane.extension_by_name(names::CABLE_DYNAMICS).is_some());
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_graphics_connection() {
        let scene = CableCraneScene::build().unwrap();
        let description = scene.description();

        assert_eq!(description.connections().len(), 1);
        let link = &description.connections()[0];
        assert_eq!(link.from_extension, names::CABLE_DYNAMICS);
        assert_eq!(link.to_extension, names::CABLE_GRAPHICS);
    }
}
