//! Rigid body description types.
//!
//! A [`Body`] is a single rigid part: a named placement in the world
//! plus an ordered list of primitive collision shapes. Bodies have no
//! physical substance of their own; the shapes are what the engine
//! collides and renders.

use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::{Isometry3, Point3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a body.
///
/// Fresh identifiers are process-unique, so bodies from different
/// assemblies can be referenced from the same cable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    /// Create a body ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a fresh, process-unique body ID.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// How the engine is allowed to move a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionClass {
    /// Never moves; behaves as infinite mass (ground, crane base).
    Static,
    /// Moves under forces and constraints.
    Dynamic,
    /// Follows externally scripted motion; pushes dynamic bodies but
    /// is not pushed back.
    Animated,
}

/// A primitive collision shape.
///
/// These are the only primitives the rigging scenes use; anything more
/// elaborate is composed from several attachments on one body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapePrimitive {
    /// Box with full extents (not half-extents) on each axis.
    Box {
        /// Full side lengths along local X, Y, Z.
        extents: nalgebra::Vector3<f64>,
    },
    /// Cylinder whose long axis is the local Z axis.
    Cylinder {
        /// Cylinder radius in meters.
        radius: f64,
        /// Full height along the local Z axis.
        height: f64,
    },
    /// Infinite plane through the local origin, normal +Z.
    Plane,
}

/// A primitive shape attached to a body at a local offset.
///
/// Multiple attachments on one body are purely a union of volumes;
/// the pieces carry no individual meaning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeAttachment {
    /// The shape primitive.
    pub primitive: ShapePrimitive,
    /// Transform from the body frame to the shape frame.
    pub local_transform: Isometry3<f64>,
}

impl ShapeAttachment {
    /// Attach a primitive at the body origin.
    #[must_use]
    pub fn new(primitive: ShapePrimitive) -> Self {
        Self {
            primitive,
            local_transform: Isometry3::identity(),
        }
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, local_transform: Isometry3<f64>) -> Self {
        self.local_transform = local_transform;
        self
    }
}

/// A single rigid part of a mechanism.
///
/// # Example
///
/// ```
/// use rig_types::{Body, MotionClass, ShapeAttachment, ShapePrimitive};
/// use nalgebra::{Point3, Vector3};
///
/// let base = Body::new("base", MotionClass::Static, Point3::new(0.0, 0.0, 6.0))
///     .with_shape(ShapeAttachment::new(ShapePrimitive::Box {
///         extents: Vector3::new(2.0, 4.0, 1.0),
///     }));
/// assert_eq!(base.name, "base");
/// assert_eq!(base.shapes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// Process-unique identifier, assigned at construction.
    pub id: BodyId,
    /// Name, unique within the owning assembly.
    pub name: String,
    /// How the engine may move this body.
    pub motion: MotionClass,
    /// World-space position.
    pub position: Point3<f64>,
    /// World-space orientation.
    pub rotation: UnitQuaternion<f64>,
    /// Mass in kg. Ignored by the engine for static bodies.
    pub mass: f64,
    /// Ordered collision shape attachments.
    pub shapes: Vec<ShapeAttachment>,
}

impl Body {
    /// Default mass assigned when the caller does not specify one.
    pub const DEFAULT_MASS: f64 = 1.0;

    /// Create a body with no shapes at the given position.
    #[must_use]
    pub fn new(name: impl Into<String>, motion: MotionClass, position: Point3<f64>) -> Self {
        Self {
            id: BodyId::fresh(),
            name: name.into(),
            motion,
            position,
            rotation: UnitQuaternion::identity(),
            mass: Self::DEFAULT_MASS,
            shapes: Vec::new(),
        }
    }

    /// Set the mass.
    #[must_use]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the world-space orientation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Append a shape attachment.
    #[must_use]
    pub fn with_shape(mut self, shape: ShapeAttachment) -> Self {
        self.shapes.push(shape);
        self
    }

    /// The body's world transform.
    #[must_use]
    pub fn transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.position.coords.into(), self.rotation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, Vector3};

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Body::new("a", MotionClass::Dynamic, Point3::origin());
        let b = Body::new("b", MotionClass::Dynamic, Point3::origin());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_body_id_display() {
        let id = BodyId::new(7);
        assert_eq!(id.to_string(), "Body(7)");
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn test_shape_attachment_transform() {
        let shape = ShapeAttachment::new(ShapePrimitive::Box {
            extents: Vector3::new(1.0, 1.0, 1.0),
        })
        .with_transform(Translation3::new(0.0, 5.5, 0.0).into());

        assert_relative_eq!(shape.local_transform.translation.y, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_body_transform() {
        let body = Body::new("winch", MotionClass::Dynamic, Point3::new(0.0, 0.0, 8.0));
        let world = body.transform() * Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(world.z, 8.0, epsilon = 1e-12);
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_default_mass() {
        let body = Body::new("load", MotionClass::Dynamic, Point3::origin()).with_mass(400.0);
        assert_eq!(body.mass, 400.0);

        let plain = Body::new("x", MotionClass::Dynamic, Point3::origin());
        assert_eq!(plain.mass, Body::DEFAULT_MASS);
    }
}
