//! Error type for crane and scene construction.

use rig_cable::CableError;
use rig_engine::ConnectionError;
use rig_types::RigError;
use thiserror::Error;

/// Errors that can occur while building the crane scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CraneError {
    /// A body or joint description error.
    #[error(transparent)]
    Rig(#[from] RigError),

    /// A cable route construction error.
    #[error(transparent)]
    Cable(#[from] CableError),

    /// A cable extension port connection error.
    #[error("cannot connect the cable extensions: {0}")]
    Connection(#[from] ConnectionError),
}
