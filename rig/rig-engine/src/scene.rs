//! Mechanisms and scenes.

use rig_types::{Assembly, Joint, JointId};

use crate::extension::{Connection, Extension};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named grouping of assemblies and extensions, simulated by the engine
/// as one articulated object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mechanism {
    name: String,
    assemblies: Vec<Assembly>,
    extensions: Vec<Extension>,
}

impl Mechanism {
    /// Create an empty mechanism.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assemblies: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// The mechanism name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an assembly.
    pub fn add_assembly(&mut self, assembly: Assembly) {
        self.assemblies.push(assembly);
    }

    /// All assemblies, in insertion order.
    #[must_use]
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    /// All assemblies, mutably.
    #[must_use]
    pub fn assemblies_mut(&mut self) -> &mut Vec<Assembly> {
        &mut self.assemblies
    }

    /// Find the first assembly with the given name.
    #[must_use]
    pub fn assembly_by_name(&self, name: &str) -> Option<&Assembly> {
        self.assemblies.iter().find(|a| a.name() == name)
    }

    /// Find the first assembly with the given name, mutably.
    #[must_use]
    pub fn assembly_by_name_mut(&mut self, name: &str) -> Option<&mut Assembly> {
        self.assemblies.iter_mut().find(|a| a.name() == name)
    }

    /// Find a joint by handle across all assemblies.
    #[must_use]
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.assemblies.iter().find_map(|a| a.joint(id))
    }

    /// Find a joint by handle across all assemblies, mutably.
    #[must_use]
    pub fn joint_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        self.assemblies.iter_mut().find_map(|a| a.joint_mut(id))
    }

    /// Attach an extension to the mechanism.
    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// All attached extensions.
    #[must_use]
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Find an attached extension by name.
    #[must_use]
    pub fn extension_by_name(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.name() == name)
    }
}

/// Everything handed to the engine for one simulation: mechanisms plus
/// the data-flow connections among their extensions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    mechanisms: Vec<Mechanism>,
    connections: Vec<Connection>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mechanism.
    pub fn add_mechanism(&mut self, mechanism: Mechanism) {
        self.mechanisms.push(mechanism);
    }

    /// All mechanisms, in insertion order.
    #[must_use]
    pub fn mechanisms(&self) -> &[Mechanism] {
        &self.mechanisms
    }

    /// Record an established port connection.
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// All recorded connections.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use rig_types::{Body, ControlMode, JointKind, MotionClass};

    #[test]
    fn test_assembly_lookup_by_name() {
        let mut mechanism = Mechanism::new("CraneMechanism");
        mechanism.add_assembly(Assembly::new("CraneAssembly"));

        assert!(mechanism.assembly_by_name("CraneAssembly").is_some());
        assert!(mechanism.assembly_by_name("LoadAssembly").is_none());
    }

    #[test]
    fn test_joint_lookup_spans_assemblies() {
        let mut assembly = Assembly::new("CraneAssembly");
        let a = assembly.add_body(Body::new("base", MotionClass::Static, Point3::origin()));
        let b = assembly.add_body(Body::new("Winch", MotionClass::Dynamic, Point3::origin()));
        let id = assembly.connect(a, b, Point3::origin(), Vector3::x(), JointKind::Revolute);

        let mut mechanism = Mechanism::new("CraneMechanism");
        mechanism.add_assembly(Assembly::new("empty"));
        mechanism.add_assembly(assembly);

        let joint = mechanism.joint_mut(id).unwrap();
        joint.set_control(ControlMode::Motorized);
        joint.set_motor_velocity(0.5).unwrap();
        assert_eq!(mechanism.joint(id).unwrap().motor_velocity(), 0.5);
    }
}
