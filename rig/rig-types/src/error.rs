//! Error types for rigging description operations.

use thiserror::Error;

/// Errors that can occur while describing a rigging scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// A body referenced by name does not exist in the assembly.
    ///
    /// Whether this is fatal depends on the call site: the chain cannot
    /// function without its required bodies, but some lookups have a
    /// degraded fallback.
    #[error("body not found: {name}")]
    BodyNotFound {
        /// Name of the missing body.
        name: String,
    },

    /// A joint handle does not resolve to a joint.
    #[error("joint not found: {joint}")]
    JointNotFound {
        /// Raw ID of the missing joint.
        joint: u64,
    },

    /// A motor command was issued to a DOF that is not motorized.
    #[error("joint {joint} is not motorized")]
    NotMotorized {
        /// Raw ID of the offending joint.
        joint: u64,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl RigError {
    /// Create a body-not-found error.
    #[must_use]
    pub fn body_not_found(name: impl Into<String>) -> Self {
        Self::BodyNotFound { name: name.into() }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RigError::body_not_found("Winch");
        assert!(err.to_string().contains("Winch"));

        let err = RigError::NotMotorized { joint: 3 };
        assert!(err.to_string().contains('3'));
    }
}
