//! Cable route definition builder.
//!
//! A cable threads through a scene in a strict physical order: it
//! spools off a winch, passes over guide pulleys, may slide through a
//! ring, and ends at an attachment point. This crate builds that
//! ordered routing definition and writes it into the engine's cable
//! dynamics extension; the cable mechanics themselves run in the
//! engine.
//!
//! # Ordering hazard
//!
//! The point order handed to [`RouteBuilder`] must equal the physical
//! order in which the cable touches bodies. The engine performs no
//! structural check; a misordered route builds "successfully" and
//! produces a physically incoherent cable. [`RouteBuilder::validate`]
//! offers an opt-in structural check for callers that want to fail
//! fast instead.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod definition;
mod error;
pub mod fields;
mod route;

pub use definition::{dynamics_extension, graphics_extension};
pub use error::CableError;
pub use route::{
    CableParams, PointKind, PointSpec, RouteBuilder, RoutePoint, SegmentOverride,
};

/// Result type for cable routing operations.
pub type Result<T> = std::result::Result<T, CableError>;
