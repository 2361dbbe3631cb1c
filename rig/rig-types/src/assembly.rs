//! Named collections of bodies and the joints among them.

use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::error::RigError;
use crate::joint::{Joint, JointId, JointKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named, ordered collection of bodies plus the joints connecting
/// them. This is the unit handed to the simulation engine.
///
/// Self-collision between an assembly's own bodies can be disabled;
/// this is needed when decorative shapes intentionally overlap and
/// joint limits already make real contact impossible.
///
/// # Example
///
/// ```
/// use rig_types::{Assembly, Body, JointKind, MotionClass};
/// use nalgebra::{Point3, Vector3};
///
/// let mut assembly = Assembly::new("CraneAssembly");
/// let base = assembly.add_body(Body::new("base", MotionClass::Static, Point3::origin()));
/// let winch = assembly.add_body(Body::new(
///     "Winch",
///     MotionClass::Dynamic,
///     Point3::new(0.0, 0.0, 8.0),
/// ));
/// let hinge = assembly.connect(
///     base,
///     winch,
///     Point3::new(0.0, 0.0, 8.0),
///     Vector3::x(),
///     JointKind::Revolute,
/// );
/// assert!(assembly.joint(hinge).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assembly {
    name: String,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    self_collision: bool,
}

impl Assembly {
    /// Create an empty assembly. Self-collision starts enabled.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
            joints: Vec::new(),
            self_collision: true,
        }
    }

    /// The assembly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a body and return its handle.
    ///
    /// Names are expected to be unique within the assembly; lookup
    /// returns the first match, so a duplicate shadows the later body.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = body.id;
        self.bodies.push(body);
        id
    }

    /// All bodies, in insertion order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// All joints, in insertion order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Look up a body by handle.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Look up a body by name.
    ///
    /// Lookup failure is a hard error at call sites that require the
    /// body: an assembly that lost a required part is unusable.
    pub fn find_body_by_name(&self, name: &str) -> crate::Result<&Body> {
        self.bodies
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| RigError::body_not_found(name))
    }

    /// Connect two bodies with a single-DOF joint and return its
    /// handle.
    ///
    /// The joint is appended to the assembly's constraint set;
    /// construction order determines nothing except debugging
    /// convenience. The DOF starts free with no limits.
    pub fn connect(
        &mut self,
        body_a: BodyId,
        body_b: BodyId,
        anchor: Point3<f64>,
        axis: Vector3<f64>,
        kind: JointKind,
    ) -> JointId {
        let joint = Joint::new(kind, body_a, body_b, anchor, axis);
        let id = joint.id;
        self.joints.push(joint);
        id
    }

    /// Look up a joint by handle.
    #[must_use]
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.iter().find(|j| j.id == id)
    }

    /// Look up a joint by handle, mutably.
    #[must_use]
    pub fn joint_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        self.joints.iter_mut().find(|j| j.id == id)
    }

    /// Disable collision between this assembly's own bodies.
    pub fn disable_self_collision(&mut self) {
        self.self_collision = false;
    }

    /// Whether bodies of this assembly collide with each other.
    #[must_use]
    pub fn self_collision(&self) -> bool {
        self.self_collision
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::body::MotionClass;
    use crate::joint::ControlMode;

    fn two_body_assembly() -> (Assembly, BodyId, BodyId) {
        let mut assembly = Assembly::new("test");
        let a = assembly.add_body(Body::new("a", MotionClass::Static, Point3::origin()));
        let b = assembly.add_body(Body::new(
            "b",
            MotionClass::Dynamic,
            Point3::new(0.0, 0.0, 8.0),
        ));
        (assembly, a, b)
    }

    #[test]
    fn test_find_body_by_name() {
        let (assembly, _, b) = two_body_assembly();
        let found = assembly.find_body_by_name("b").unwrap();
        assert_eq!(found.id, b);
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let (assembly, _, _) = two_body_assembly();
        let err = assembly.find_body_by_name("Winch").unwrap_err();
        assert_eq!(
            err,
            RigError::BodyNotFound {
                name: "Winch".into()
            }
        );
    }

    #[test]
    fn test_connect_appends_to_constraint_set() {
        let (mut assembly, a, b) = two_body_assembly();
        let id = assembly.connect(
            a,
            b,
            Point3::new(0.0, 0.0, 8.0),
            Vector3::x(),
            JointKind::Revolute,
        );

        assert_eq!(assembly.joints().len(), 1);
        let joint = assembly.joint(id).unwrap();
        assert_eq!(joint.control(), ControlMode::Free);
        assert_eq!(joint.body_a, a);
        assert_eq!(joint.body_b, b);
    }

    #[test]
    fn test_self_collision_toggle() {
        let (mut assembly, _, _) = two_body_assembly();
        assert!(assembly.self_collision());
        assembly.disable_self_collision();
        assert!(!assembly.self_collision());
    }
}
