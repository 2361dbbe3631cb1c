//! The crane: bodies, shapes and drive joints.
//!
//! The crane is a static base carrying a two-part extendable boom. The
//! lower boom hinges on the base to raise and lower the whole boom;
//! the upper boom slides along the lower boom to extend it. A
//! motorized winch on the base spools the cable, and two free pulleys
//! on the upper boom guide it out to the tip.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use rig_engine::Mechanism;
use rig_types::{
    Assembly, Body, BodyId, ControlMode, Joint, JointId, JointKind, MotionClass, RigError,
    ShapeAttachment, ShapePrimitive,
};
use tracing::warn;

use crate::names;

/// Downward tilt of the boom's tip section, in degrees.
const BOOM_DROOP_DEGREES: f64 = 10.0;

/// Margin kept below vertical at the top of the elevation range, in
/// degrees. Going fully vertical would let the boom fall over backward.
const ELEVATION_MARGIN_DEGREES: f64 = 5.0;

/// Elongation travel of the telescoping boom, in meters each way.
const ELONGATION_TRAVEL: f64 = 4.0;

/// The set of motorized drives, held as joint handles.
struct Drives {
    winch: JointId,
    elevation: JointId,
    elongation: JointId,
}

/// Velocity interface of the crane's three motorized drives.
///
/// Input mappers (like the keyboard) talk to this trait instead of to
/// the crane directly, so tests can substitute a recorder.
pub trait MotorControl {
    /// Drive the boom up (positive) or down (negative), rad/s.
    fn set_elevation_speed(&mut self, speed: f64);

    /// Extend (positive) or retract (negative) the boom, m/s.
    fn set_elongation_speed(&mut self, speed: f64);

    /// Spool cable out (positive) or in (negative), rad/s.
    fn set_winch_speed(&mut self, speed: f64);
}

/// The crane mechanism plus handles to its three motorized drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Crane {
    mechanism: Mechanism,
    winch_drive: JointId,
    elevation_drive: JointId,
    elongation_drive: JointId,
}

impl Crane {
    /// Build the crane: six bodies, two free pulley hinges and three
    /// motorized drives, all inside one assembly.
    pub fn new() -> rig_types::Result<Self> {
        let mut assembly = build_assembly();
        let drives = create_constraints(&mut assembly)?;

        let mut mechanism = Mechanism::new(names::CRANE_MECHANISM);
        mechanism.add_assembly(assembly);

        Ok(Self {
            mechanism,
            winch_drive: drives.winch,
            elevation_drive: drives.elevation,
            elongation_drive: drives.elongation,
        })
    }

    /// The crane mechanism.
    #[must_use]
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    /// The crane mechanism, mutably.
    #[must_use]
    pub fn mechanism_mut(&mut self) -> &mut Mechanism {
        &mut self.mechanism
    }

    /// Handle of the winch drive hinge.
    #[must_use]
    pub fn winch_drive(&self) -> JointId {
        self.winch_drive
    }

    /// Handle of the boom elevation hinge.
    #[must_use]
    pub fn elevation_drive(&self) -> JointId {
        self.elevation_drive
    }

    /// Handle of the boom elongation slider.
    #[must_use]
    pub fn elongation_drive(&self) -> JointId {
        self.elongation_drive
    }

    /// Look up a crane body's handle by name.
    pub fn body_id(&self, name: &str) -> rig_types::Result<BodyId> {
        let assembly = self
            .mechanism
            .assembly_by_name(names::CRANE_ASSEMBLY)
            .ok_or_else(|| RigError::body_not_found(name))?;
        Ok(assembly.find_body_by_name(name)?.id)
    }

    /// The crane assembly, if the mechanism still carries it.
    #[must_use]
    pub fn assembly(&self) -> Option<&Assembly> {
        self.mechanism.assembly_by_name(names::CRANE_ASSEMBLY)
    }

    /// The crane assembly, mutably.
    ///
    /// The mechanism should always carry the crane assembly; if it has
    /// somehow been removed, a fresh one is rebuilt and appended so the
    /// caller still gets a usable assembly. The mechanism may not
    /// behave properly after that.
    pub fn assembly_mut(&mut self) -> &mut Assembly {
        let assemblies = self.mechanism.assemblies_mut();
        let index = match assemblies
            .iter()
            .position(|a| a.name() == names::CRANE_ASSEMBLY)
        {
            Some(index) => index,
            None => {
                warn!("the crane mechanism lost its crane assembly; rebuilding it");
                assemblies.push(build_assembly());
                assemblies.len() - 1
            }
        };
        &mut assemblies[index]
    }

    fn apply_motor(&mut self, id: JointId, speed: f64) {
        match self.mechanism.joint_mut(id) {
            Some(joint) => {
                if let Err(err) = joint.set_motor_velocity(speed) {
                    warn!(joint = %id, %err, "dropping a motor command");
                }
            }
            None => warn!(joint = %id, "motor command for a joint the mechanism no longer has"),
        }
    }
}

impl MotorControl for Crane {
    fn set_elevation_speed(&mut self, speed: f64) {
        self.apply_motor(self.elevation_drive, speed);
    }

    fn set_elongation_speed(&mut self, speed: f64) {
        self.apply_motor(self.elongation_drive, speed);
    }

    fn set_winch_speed(&mut self, speed: f64) {
        self.apply_motor(self.winch_drive, speed);
    }
}

/// A box attached at a local offset, axis-aligned with the body.
fn block(extents: Vector3<f64>, at: Vector3<f64>) -> ShapeAttachment {
    ShapeAttachment::new(ShapePrimitive::Box { extents })
        .with_transform(Isometry3::translation(at.x, at.y, at.z))
}

/// A box attached at a local offset, pitched down by the boom droop.
fn drooped_block(extents: Vector3<f64>, at: Vector3<f64>) -> ShapeAttachment {
    let droop = BOOM_DROOP_DEGREES.to_radians();
    let rotation = UnitQuaternion::from_euler_angles(-droop, 0.0, 0.0);
    ShapeAttachment::new(ShapePrimitive::Box { extents })
        .with_transform(Isometry3::from_parts(
            Translation3::new(at.x, at.y, at.z),
            rotation,
        ))
}

/// A cylinder whose long axis runs along the body's X axis, offset
/// along that axis. Drums and their lips are all built this way.
fn spool(radius: f64, height: f64, x_offset: f64) -> ShapeAttachment {
    let rotation = UnitQuaternion::from_euler_angles(0.0, FRAC_PI_2, 0.0);
    ShapeAttachment::new(ShapePrimitive::Cylinder { radius, height }).with_transform(
        Isometry3::from_parts(Translation3::new(x_offset, 0.0, 0.0), rotation),
    )
}

/// The static pedestal: two uprights and a foot.
fn build_base() -> Body {
    Body::new(names::BASE, MotionClass::Static, Point3::new(0.0, 0.0, 6.0))
        .with_shape(block(
            Vector3::new(1.0, 4.0, 8.0),
            Vector3::new(1.5, 0.0, -2.0),
        ))
        .with_shape(block(
            Vector3::new(1.0, 4.0, 8.0),
            Vector3::new(-1.5, 0.0, -2.0),
        ))
        .with_shape(block(
            Vector3::new(2.0, 4.0, 1.0),
            Vector3::new(0.0, 0.0, -5.5),
        ))
}

/// The winch drum between the pedestal's uprights, with a lip on each
/// side to keep the cable on the drum.
fn build_winch() -> Body {
    let radius = 1.9;
    Body::new(
        names::WINCH,
        MotionClass::Dynamic,
        Point3::new(0.0, 0.0, 8.0),
    )
    .with_shape(spool(radius, 1.0, 0.0))
    .with_shape(spool(1.15 * radius, 0.35, 0.325))
    .with_shape(spool(1.15 * radius, 0.35, -0.325))
}

/// The lower boom: two side rails leaving room for the winch, and a
/// solid outer section.
fn build_lower_boom() -> Body {
    Body::new(
        names::LOWER_BOOM,
        MotionClass::Dynamic,
        Point3::new(0.0, 0.0, 8.0),
    )
    .with_shape(block(
        Vector3::new(0.4, 3.0, 2.0),
        Vector3::new(0.75, 0.5, 0.0),
    ))
    .with_shape(block(
        Vector3::new(0.4, 3.0, 2.0),
        Vector3::new(-0.75, 0.5, 0.0),
    ))
    .with_shape(block(
        Vector3::new(2.0, 7.0, 2.0),
        Vector3::new(0.0, 5.5, 0.0),
    ))
}

/// The telescoping upper boom.
///
/// Its local frame sits at the end of the lower boom, which keeps the
/// slider setup simple. The straight section carries side rails that
/// leave room for the mid pulley; past the mid pulley the boom tilts
/// down by the droop angle, with matching rails around the tip pulley.
fn build_upper_boom() -> Body {
    let droop = BOOM_DROOP_DEGREES.to_radians();
    let (sin, cos) = droop.sin_cos();
    let rail = Vector3::new(0.4, 2.0, 1.8);

    Body::new(
        names::UPPER_BOOM,
        MotionClass::Dynamic,
        Point3::new(0.0, 9.0, 8.0),
    )
    .with_shape(block(
        Vector3::new(1.8, 10.0, 1.8),
        Vector3::new(0.0, -1.0, 0.0),
    ))
    .with_shape(block(rail, Vector3::new(0.7, 5.0, 0.0)))
    .with_shape(block(rail, Vector3::new(-0.7, 5.0, 0.0)))
    .with_shape(drooped_block(rail, Vector3::new(0.7, 6.0 + cos, -sin)))
    .with_shape(drooped_block(rail, Vector3::new(-0.7, 6.0 + cos, -sin)))
    .with_shape(drooped_block(
        Vector3::new(1.8, 6.0, 1.8),
        Vector3::new(0.0, 6.0 + 5.0 * cos, -5.0 * sin),
    ))
    .with_shape(drooped_block(
        rail,
        Vector3::new(0.7, 6.0 + 9.0 * cos, -9.0 * sin),
    ))
    .with_shape(drooped_block(
        rail,
        Vector3::new(-0.7, 6.0 + 9.0 * cos, -9.0 * sin),
    ))
}

/// A guide pulley: a drum with a lip on each side.
fn build_pulley(name: &str, position: Point3<f64>, lip_radius: f64) -> Body {
    let radius = 1.0;
    Body::new(name, MotionClass::Dynamic, position)
        .with_shape(spool(radius, 0.8, 0.0))
        .with_shape(spool(lip_radius, 0.25, 0.275))
        .with_shape(spool(lip_radius, 0.25, -0.275))
}

/// World position of the tip pulley: ten meters past the mid pulley,
/// along the drooped tip section.
fn tip_pulley_position() -> Point3<f64> {
    let droop = BOOM_DROOP_DEGREES.to_radians();
    Point3::new(0.0, 15.0 + 10.0 * droop.cos(), 8.0 - 10.0 * droop.sin())
}

/// Assemble the six crane bodies.
///
/// Self-collision is disabled: the parts overlap intentionally, and
/// the joint limits make real contact impossible anyway.
fn build_assembly() -> Assembly {
    let mut assembly = Assembly::new(names::CRANE_ASSEMBLY);

    assembly.add_body(build_base());
    assembly.add_body(build_winch());
    assembly.add_body(build_lower_boom());
    assembly.add_body(build_upper_boom());
    assembly.add_body(build_pulley(
        names::MID_PULLEY,
        Point3::new(0.0, 15.0, 8.0),
        1.15,
    ));
    assembly.add_body(build_pulley(names::TIP_PULLEY, tip_pulley_position(), 1.2));

    assembly.disable_self_collision();
    assembly
}

/// Motorize a freshly created joint, starting at rest.
fn drive_joint(assembly: &mut Assembly, id: JointId) -> rig_types::Result<&mut Joint> {
    let joint = assembly
        .joint_mut(id)
        .ok_or(RigError::JointNotFound { joint: id.raw() })?;
    joint.set_control(ControlMode::Motorized);
    joint.set_motor_velocity(0.0)?;
    Ok(joint)
}

/// Wire up the crane's joints.
///
/// Every drive shares the same world X axis; negating it on the
/// elevation hinge makes a positive motor velocity boom up.
fn create_constraints(assembly: &mut Assembly) -> rig_types::Result<Drives> {
    let axis = Vector3::x();

    let base = assembly.find_body_by_name(names::BASE)?.id;
    let winch = assembly.find_body_by_name(names::WINCH)?;
    let (winch_body, winch_anchor) = (winch.id, winch.position);

    // The winch hinge is motorized to spool the cable in and out.
    let winch_drive = assembly.connect(base, winch_body, winch_anchor, axis, JointKind::Revolute);
    drive_joint(assembly, winch_drive)?;

    // The pulleys only guide the cable; their hinges stay free.
    let upper_boom = assembly.find_body_by_name(names::UPPER_BOOM)?;
    let (upper_body, upper_anchor) = (upper_boom.id, upper_boom.position);

    let mid_pulley = assembly.find_body_by_name(names::MID_PULLEY)?;
    let (mid_body, mid_anchor) = (mid_pulley.id, mid_pulley.position);
    assembly.connect(upper_body, mid_body, mid_anchor, axis, JointKind::Revolute);

    let tip_pulley = assembly.find_body_by_name(names::TIP_PULLEY)?;
    let (tip_body, tip_anchor) = (tip_pulley.id, tip_pulley.position);
    assembly.connect(upper_body, tip_body, tip_anchor, axis, JointKind::Revolute);

    // Boom up and down, anchored at the winch.
    let lower_boom = assembly.find_body_by_name(names::LOWER_BOOM)?.id;
    let elevation = assembly.connect(base, lower_boom, winch_anchor, -axis, JointKind::Revolute);
    let joint = drive_joint(assembly, elevation)?;
    joint.set_limits(
        0.0,
        FRAC_PI_2 - ELEVATION_MARGIN_DEGREES.to_radians(),
        true,
    );

    // Boom in and out.
    let elongation = assembly.connect(
        upper_body,
        lower_boom,
        upper_anchor,
        Vector3::y(),
        JointKind::Prismatic,
    );
    let joint = drive_joint(assembly, elongation)?;
    joint.set_limits(-ELONGATION_TRAVEL, ELONGATION_TRAVEL, true);

    Ok(Drives {
        winch: winch_drive,
        elevation,
        elongation,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crane_assembly(crane: &Crane) -> &Assembly {
        crane
            .mechanism()
            .assembly_by_name(names::CRANE_ASSEMBLY)
            .unwrap()
    }

    #[test]
    fn test_crane_has_all_parts() {
        let crane = Crane::new().unwrap();
        let assembly = crane_assembly(&crane);

        for name in [
            names::BASE,
            names::WINCH,
            names::LOWER_BOOM,
            names::UPPER_BOOM,
            names::MID_PULLEY,
            names::TIP_PULLEY,
        ] {
            assembly.find_body_by_name(name).unwrap();
        }

        assert_eq!(assembly.joints().len(), 5);
        assert!(!assembly.self_collision());
    }

    #[test]
    fn test_tip_pulley_follows_the_droop() {
        let crane = Crane::new().unwrap();
        let tip = crane_assembly(&crane)
            .find_body_by_name(names::TIP_PULLEY)
            .unwrap();

        let droop = BOOM_DROOP_DEGREES.to_radians();
        assert_relative_eq!(tip.position.y, 15.0 + 10.0 * droop.cos(), epsilon = 1e-12);
        assert_relative_eq!(tip.position.z, 8.0 - 10.0 * droop.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_drive_configuration() {
        let crane = Crane::new().unwrap();
        let mechanism = crane.mechanism();

        let winch = mechanism.joint(crane.winch_drive()).unwrap();
        assert_eq!(winch.control(), ControlMode::Motorized);
        assert_eq!(winch.motor_velocity(), 0.0);
        assert!(winch.limits().is_none());

        let elevation = mechanism.joint(crane.elevation_drive()).unwrap();
        assert_eq!(elevation.kind, JointKind::Revolute);
        // -X so a positive motor velocity booms up.
        assert_relative_eq!(elevation.axis.x, -1.0, epsilon = 1e-12);
        let limits = elevation.limits().unwrap();
        assert_eq!(limits.lower, 0.0);
        assert_relative_eq!(
            limits.upper,
            FRAC_PI_2 - 5.0_f64.to_radians(),
            epsilon = 1e-12
        );
        assert!(limits.active);

        let elongation = mechanism.joint(crane.elongation_drive()).unwrap();
        assert_eq!(elongation.kind, JointKind::Prismatic);
        let limits = elongation.limits().unwrap();
        assert_eq!((limits.lower, limits.upper), (-4.0, 4.0));
    }

    #[test]
    fn test_elevation_anchored_at_the_winch() {
        let crane = Crane::new().unwrap();
        let elevation = crane.mechanism().joint(crane.elevation_drive()).unwrap();
        assert_relative_eq!(elevation.anchor.z, 8.0, epsilon = 1e-12);
        assert_relative_eq!(elevation.anchor.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pulley_hinges_stay_free() {
        let crane = Crane::new().unwrap();
        let assembly = crane_assembly(&crane);

        let free = assembly
            .joints()
            .iter()
            .filter(|j| j.control() == ControlMode::Free)
            .count();
        assert_eq!(free, 2);
    }

    #[test]
    fn test_motor_setters_are_exact() {
        let mut crane = Crane::new().unwrap();

        crane.set_winch_speed(0.5);
        crane.set_elevation_speed(-0.1);
        crane.set_elongation_speed(1.0);

        let mechanism = crane.mechanism();
        assert_eq!(
            mechanism.joint(crane.winch_drive()).unwrap().motor_velocity(),
            0.5
        );
        assert_eq!(
            mechanism
                .joint(crane.elevation_drive())
                .unwrap()
                .motor_velocity(),
            -0.1
        );
        assert_eq!(
            mechanism
                .joint(crane.elongation_drive())
                .unwrap()
                .motor_velocity(),
            1.0
        );
    }

    #[test]
    fn test_assembly_mut_rebuilds_a_lost_assembly() {
        let mut crane = Crane::new().unwrap();
        crane.mechanism_mut().assemblies_mut().clear();

        let assembly = crane.assembly_mut();
        assert_eq!(assembly.name(), names::CRANE_ASSEMBLY);
        assembly.find_body_by_name(names::WINCH).unwrap();
    }

    #[test]
    fn test_body_id_lookup() {
        let crane = Crane::new().unwrap();
        crane.body_id(names::WINCH).unwrap();
        assert!(matches!(
            crane.body_id("Hook"),
            Err(RigError::BodyNotFound { .. })
        ));
    }
}
