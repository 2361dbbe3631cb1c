//! Facade for the external simulation engine.
//!
//! The engine that actually integrates rigid-body dynamics and cable
//! mechanics is a collaborator; this crate models only the surface the
//! scene description is pushed into:
//!
//! - [`ParamContainer`] - the engine's hierarchical parameter store,
//!   accessed by stable field identifiers, with resizable array fields
//! - [`Extension`] - a named, parameterized engine object with data-flow
//!   ports
//! - [`Mechanism`] / [`Scene`] - the grouping units the engine simulates
//! - [`Application`] - module insertion and the host-driven update loop
//!
//! Configuration flows one way: the core writes descriptions into these
//! types and never reads simulation results back.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod app;
mod extension;
mod params;
mod scene;

pub use app::{Application, ModuleKind, SimulatorModule};
pub use extension::{Connection, ConnectionError, Extension, PortDirection};
pub use params::{ParamArray, ParamContainer, ParamField, ParamKind, ParamValue};
pub use scene::{Mechanism, Scene};
