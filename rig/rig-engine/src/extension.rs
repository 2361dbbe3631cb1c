//! Engine extensions and data-flow connections.
//!
//! An extension is a named engine object configured through its
//! parameter container. Extensions expose named input and output
//! ports; a [`Connection`] is a publish/subscribe link from one
//! extension's output to another's input, established once at scene
//! build time and never torn down.

use thiserror::Error;
use tracing::debug;

use crate::params::ParamContainer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of a port on an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PortDirection {
    /// Data flows out of the extension.
    Output,
    /// Data flows into the extension.
    Input,
}

/// A named, parameterized engine object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extension {
    name: String,
    parameters: ParamContainer,
    outputs: Vec<String>,
    inputs: Vec<String>,
}

impl Extension {
    /// Create an extension with an empty parameter container.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: ParamContainer::new(),
            outputs: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// Replace the parameter container (used by factories that ship a
    /// pre-populated definition).
    #[must_use]
    pub fn with_parameters(mut self, parameters: ParamContainer) -> Self {
        self.parameters = parameters;
        self
    }

    /// Declare an output port.
    #[must_use]
    pub fn with_output(mut self, id: impl Into<String>) -> Self {
        self.outputs.push(id.into());
        self
    }

    /// Declare an input port.
    #[must_use]
    pub fn with_input(mut self, id: impl Into<String>) -> Self {
        self.inputs.push(id.into());
        self
    }

    /// The extension name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the extension.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The parameter container.
    #[must_use]
    pub fn parameters(&self) -> &ParamContainer {
        &self.parameters
    }

    /// The parameter container, mutably.
    #[must_use]
    pub fn parameters_mut(&mut self) -> &mut ParamContainer {
        &mut self.parameters
    }

    /// Whether the extension has the named port in the given direction.
    #[must_use]
    pub fn has_port(&self, id: &str, direction: PortDirection) -> bool {
        match direction {
            PortDirection::Output => self.outputs.iter().any(|p| p == id),
            PortDirection::Input => self.inputs.iter().any(|p| p == id),
        }
    }
}

/// Errors establishing a data-flow connection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConnectionError {
    /// The source extension has no such output port.
    #[error("extension {extension} has no output port {port}")]
    MissingOutput {
        /// Source extension name.
        extension: String,
        /// Requested port identifier.
        port: String,
    },

    /// The sink extension has no such input port.
    #[error("extension {extension} has no input port {port}")]
    MissingInput {
        /// Sink extension name.
        extension: String,
        /// Requested port identifier.
        port: String,
    },
}

/// A publish/subscribe link between two extension ports.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    /// Name of the publishing extension.
    pub from_extension: String,
    /// Output port on the publisher.
    pub from_port: String,
    /// Name of the subscribing extension.
    pub to_extension: String,
    /// Input port on the subscriber.
    pub to_port: String,
}

impl Connection {
    /// Link an output port to an input port.
    pub fn create(
        from: &Extension,
        from_port: &str,
        to: &Extension,
        to_port: &str,
    ) -> Result<Self, ConnectionError> {
        if !from.has_port(from_port, PortDirection::Output) {
            return Err(ConnectionError::MissingOutput {
                extension: from.name().to_owned(),
                port: from_port.to_owned(),
            });
        }
        if !to.has_port(to_port, PortDirection::Input) {
            return Err(ConnectionError::MissingInput {
                extension: to.name().to_owned(),
                port: to_port.to_owned(),
            });
        }

        debug!(
            from = from.name(),
            to = to.name(),
            port = from_port,
            "connected extension ports"
        );

        Ok(Self {
            from_extension: from.name().to_owned(),
            from_port: from_port.to_owned(),
            to_extension: to.name().to_owned(),
            to_port: to_port.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_requires_ports() {
        let dynamics = Extension::new("cable dynamics").with_output("cables");
        let graphics = Extension::new("cable graphics").with_input("cables");

        let link = Connection::create(&dynamics, "cables", &graphics, "cables").unwrap();
        assert_eq!(link.from_extension, "cable dynamics");
        assert_eq!(link.to_port, "cables");

        let err = Connection::create(&graphics, "cables", &dynamics, "cables").unwrap_err();
        assert!(matches!(err, ConnectionError::MissingOutput { .. }));
    }

    #[test]
    fn test_rename() {
        let mut ext = Extension::new("anonymous");
        ext.set_name("My cable dynamics extension");
        assert_eq!(ext.name(), "My cable dynamics extension");
    }
}
