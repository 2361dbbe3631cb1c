//! Joint description types.
//!
//! A joint connects exactly two bodies and restricts their relative
//! motion to one scalar degree of freedom: angular for revolute,
//! linear for prismatic. The DOF can be left free, locked, or driven
//! toward a desired velocity by a motor.

use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::body::BodyId;
use crate::error::RigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_JOINT_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointId(pub u64);

impl JointId {
    /// Create a joint ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a fresh, process-unique joint ID.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_JOINT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Joint({})", self.0)
    }
}

/// Kind of single-DOF joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointKind {
    /// Rotation around a single axis (hinge).
    Revolute,
    /// Translation along a single axis (slider).
    Prismatic,
}

impl std::fmt::Display for JointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revolute => write!(f, "revolute"),
            Self::Prismatic => write!(f, "prismatic"),
        }
    }
}

/// Control mode of a joint degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlMode {
    /// The DOF moves freely (guide pulleys).
    #[default]
    Free,
    /// The DOF is locked at its current configuration.
    Fixed,
    /// The DOF is driven toward a desired velocity.
    Motorized,
}

/// Position limits on a joint degree of freedom.
///
/// Units follow the joint kind: radians for revolute, meters for
/// prismatic. Active limits must bracket the joint's rest
/// configuration (zero), otherwise the chain cannot be reached from
/// its initial pose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DofLimits {
    /// Lower bound on the DOF coordinate.
    pub lower: f64,
    /// Upper bound on the DOF coordinate.
    pub upper: f64,
    /// Whether the engine enforces the bounds.
    pub active: bool,
}

impl DofLimits {
    /// Create limits.
    #[must_use]
    pub const fn new(lower: f64, upper: f64, active: bool) -> Self {
        Self {
            lower,
            upper,
            active,
        }
    }

    /// Whether active limits bracket the rest configuration (zero).
    #[must_use]
    pub fn brackets_rest(&self) -> bool {
        !self.active || (self.lower <= 0.0 && self.upper >= 0.0)
    }
}

/// A typed connection between two bodies with one scalar DOF.
///
/// The positive direction of the DOF follows the caller-chosen axis:
/// negating the axis at the call site flips which motor sign means
/// "up" or "out". There is no library default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Process-unique identifier, assigned at construction.
    pub id: JointId,
    /// Kind of DOF this joint exposes.
    pub kind: JointKind,
    /// First connected body.
    pub body_a: BodyId,
    /// Second connected body.
    pub body_b: BodyId,
    /// World-space attachment point.
    pub anchor: Point3<f64>,
    /// World-space DOF axis (normalized at construction).
    pub axis: Vector3<f64>,
    control: ControlMode,
    motor_velocity: f64,
    limits: Option<DofLimits>,
}

impl Joint {
    /// Create a joint between two bodies.
    ///
    /// The axis is normalized; a near-zero axis falls back to +Z.
    #[must_use]
    pub fn new(
        kind: JointKind,
        body_a: BodyId,
        body_b: BodyId,
        anchor: Point3<f64>,
        axis: Vector3<f64>,
    ) -> Self {
        let norm = axis.norm();
        let axis = if norm < 1e-10 { Vector3::z() } else { axis / norm };

        Self {
            id: JointId::fresh(),
            kind,
            body_a,
            body_b,
            anchor,
            axis,
            control: ControlMode::Free,
            motor_velocity: 0.0,
            limits: None,
        }
    }

    /// The control mode of the DOF.
    #[must_use]
    pub fn control(&self) -> ControlMode {
        self.control
    }

    /// Set the control mode of the DOF.
    pub fn set_control(&mut self, mode: ControlMode) {
        self.control = mode;
    }

    /// The position limits, if any have been set.
    #[must_use]
    pub fn limits(&self) -> Option<&DofLimits> {
        self.limits.as_ref()
    }

    /// Set position limits on the DOF.
    ///
    /// Active limits that do not bracket the rest configuration leave
    /// the chain unreachable from its initial pose; this is logged but
    /// not rejected, since the engine is the authority on limits.
    pub fn set_limits(&mut self, lower: f64, upper: f64, active: bool) {
        let limits = DofLimits::new(lower, upper, active);
        if !limits.brackets_rest() {
            warn!(
                joint = %self.id,
                lower,
                upper,
                "active limits do not bracket the rest configuration"
            );
        }
        self.limits = Some(limits);
    }

    /// The desired motor velocity.
    #[must_use]
    pub fn motor_velocity(&self) -> f64 {
        self.motor_velocity
    }

    /// Set the desired motor velocity.
    ///
    /// Only legal when the DOF is motorized; calling this on a free or
    /// fixed DOF is a programming error and returns
    /// [`RigError::NotMotorized`]. The value itself is not clamped or
    /// validated beyond what the engine does.
    pub fn set_motor_velocity(&mut self, velocity: f64) -> crate::Result<()> {
        if self.control != ControlMode::Motorized {
            return Err(RigError::NotMotorized { joint: self.id.0 });
        }
        self.motor_velocity = velocity;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn hinge() -> Joint {
        Joint::new(
            JointKind::Revolute,
            BodyId::new(0),
            BodyId::new(1),
            Point3::new(0.0, 0.0, 8.0),
            Vector3::x(),
        )
    }

    #[test]
    fn test_axis_normalized() {
        let joint = Joint::new(
            JointKind::Prismatic,
            BodyId::new(0),
            BodyId::new(1),
            Point3::origin(),
            Vector3::new(0.0, 2.0, 0.0),
        );
        assert_relative_eq!(joint.axis.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(joint.axis.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negated_axis_kept() {
        let joint = Joint::new(
            JointKind::Revolute,
            BodyId::new(0),
            BodyId::new(1),
            Point3::origin(),
            -Vector3::x(),
        );
        assert_relative_eq!(joint.axis.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_motor_requires_motorized_control() {
        let mut joint = hinge();
        assert!(matches!(
            joint.set_motor_velocity(1.0),
            Err(RigError::NotMotorized { .. })
        ));

        joint.set_control(ControlMode::Motorized);
        joint.set_motor_velocity(1.5).unwrap();
        assert_eq!(joint.motor_velocity(), 1.5);
    }

    #[test]
    fn test_motor_setter_is_exact() {
        let mut joint = hinge();
        joint.set_control(ControlMode::Motorized);

        for v in [-0.2, 0.0, 0.1, 123.456] {
            joint.set_motor_velocity(v).unwrap();
            assert_eq!(joint.motor_velocity(), v);
        }
    }

    #[test]
    fn test_limits_bracket_rest() {
        let mut joint = hinge();
        joint.set_limits(0.0, FRAC_PI_2, true);
        let limits = joint.limits().unwrap();
        assert!(limits.brackets_rest());

        let unreachable = DofLimits::new(0.5, 1.0, true);
        assert!(!unreachable.brackets_rest());

        let inactive = DofLimits::new(0.5, 1.0, false);
        assert!(inactive.brackets_rest());
    }
}
