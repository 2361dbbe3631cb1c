//! Description types for multi-body rigging scenes.
//!
//! This crate provides the foundational types for describing a kinematic
//! chain to an external physics engine:
//!
//! - [`Body`] - A rigid part with placement, motion class and shapes
//! - [`Assembly`] - A named, ordered collection of bodies and joints
//! - [`Joint`] - A typed single-DOF connection between two bodies
//!
//! # Design Philosophy
//!
//! These types are **pure description**. They carry no dynamics, no
//! collision detection and no integration; the simulation engine that
//! consumes them is a collaborator, not part of this crate. The only
//! state mutated after construction is the desired velocity of a
//! motorized joint DOF.
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: forward
//! - Z: up
//! - Right-handed

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,       // Error docs added where non-obvious
)]

mod assembly;
mod body;
mod error;
mod joint;

pub use assembly::Assembly;
pub use body::{Body, BodyId, MotionClass, ShapeAttachment, ShapePrimitive};
pub use error::RigError;
pub use joint::{ControlMode, DofLimits, Joint, JointId, JointKind};

// Re-export math types for convenience
pub use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

/// Result type for rigging description operations.
pub type Result<T> = std::result::Result<T, RigError>;
