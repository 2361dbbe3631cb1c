//! Hierarchical parameter container.
//!
//! The engine exposes every configurable object through a generic
//! container of named fields. Fields hold scalar values, nested
//! containers, or arrays of containers. Array fields are resized
//! through the `"size"` pseudo-field (see [`ParamArray::set_size`]);
//! resizing clone-fills new entries from the array's prototype, which
//! is how the engine materializes derived entries with their defaults.
//!
//! Writes report success as a `bool` rather than an error: the engine
//! silently ignores identifiers it does not know, and callers decide
//! whether that is fatal, degraded, or irrelevant.

use nalgebra::Vector3;
use rig_types::BodyId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Unsigned integer.
    UInt(u32),
    /// Real number.
    Real(f64),
    /// 3-vector.
    Vec3(Vector3<f64>),
    /// Enumerated discriminator, stored as its raw value.
    Enum(u32),
    /// Reference to a rigid body.
    Body(BodyId),
}

/// The kind of a [`ParamValue`], used for type-checking writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Boolean flag.
    Bool,
    /// Unsigned integer.
    UInt,
    /// Real number.
    Real,
    /// 3-vector.
    Vec3,
    /// Enumerated discriminator.
    Enum,
    /// Body reference.
    Body,
}

impl ParamValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Bool(_) => ParamKind::Bool,
            Self::UInt(_) => ParamKind::UInt,
            Self::Real(_) => ParamKind::Real,
            Self::Vec3(_) => ParamKind::Vec3,
            Self::Enum(_) => ParamKind::Enum,
            Self::Body(_) => ParamKind::Body,
        }
    }
}

/// A field of a [`ParamContainer`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamField {
    /// A scalar value.
    Value(ParamValue),
    /// A nested container.
    Container(ParamContainer),
    /// An array of containers with a shared prototype.
    Array(ParamArray),
}

/// An ordered map of field identifiers to fields.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamContainer {
    fields: Vec<(String, ParamField)>,
}

impl ParamContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a scalar field with its default value.
    ///
    /// Declaration defines the container's schema; later writes through
    /// [`set_value`](Self::set_value) must match the declared kind.
    pub fn declare_value(&mut self, id: impl Into<String>, value: ParamValue) {
        self.fields.push((id.into(), ParamField::Value(value)));
    }

    /// Declare a nested container field.
    pub fn declare_container(&mut self, id: impl Into<String>, container: ParamContainer) {
        self.fields
            .push((id.into(), ParamField::Container(container)));
    }

    /// Declare an array field.
    pub fn declare_array(&mut self, id: impl Into<String>, array: ParamArray) {
        self.fields.push((id.into(), ParamField::Array(array)));
    }

    /// Write a scalar field.
    ///
    /// Returns `false` if the field does not exist, is not a scalar, or
    /// holds a different kind of value. The caller decides how severe
    /// a rejected write is.
    #[must_use = "a rejected write may need to be logged or escalated"]
    pub fn set_value(&mut self, id: &str, value: ParamValue) -> bool {
        match self.field_mut(id) {
            Some(ParamField::Value(existing)) if existing.kind() == value.kind() => {
                *existing = value;
                true
            }
            _ => false,
        }
    }

    /// Read a scalar field.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&ParamValue> {
        match self.field(id) {
            Some(ParamField::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Read a nested container field.
    #[must_use]
    pub fn container(&self, id: &str) -> Option<&ParamContainer> {
        match self.field(id) {
            Some(ParamField::Container(container)) => Some(container),
            _ => None,
        }
    }

    /// Read a nested container field, mutably.
    #[must_use]
    pub fn container_mut(&mut self, id: &str) -> Option<&mut ParamContainer> {
        match self.field_mut(id) {
            Some(ParamField::Container(container)) => Some(container),
            _ => None,
        }
    }

    /// Read an array field.
    #[must_use]
    pub fn array(&self, id: &str) -> Option<&ParamArray> {
        match self.field(id) {
            Some(ParamField::Array(array)) => Some(array),
            _ => None,
        }
    }

    /// Read an array field, mutably.
    #[must_use]
    pub fn array_mut(&mut self, id: &str) -> Option<&mut ParamArray> {
        match self.field_mut(id) {
            Some(ParamField::Array(array)) => Some(array),
            _ => None,
        }
    }

    /// Convenience accessor for a boolean field.
    #[must_use]
    pub fn bool_value(&self, id: &str) -> Option<bool> {
        match self.value(id) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Convenience accessor for a real field.
    #[must_use]
    pub fn real_value(&self, id: &str) -> Option<f64> {
        match self.value(id) {
            Some(ParamValue::Real(v)) => Some(*v),
            _ => None,
        }
    }

    /// Convenience accessor for an enum field.
    #[must_use]
    pub fn enum_value(&self, id: &str) -> Option<u32> {
        match self.value(id) {
            Some(ParamValue::Enum(v)) => Some(*v),
            _ => None,
        }
    }

    /// Convenience accessor for a vector field.
    #[must_use]
    pub fn vec3_value(&self, id: &str) -> Option<Vector3<f64>> {
        match self.value(id) {
            Some(ParamValue::Vec3(v)) => Some(*v),
            _ => None,
        }
    }

    /// Convenience accessor for a body reference field.
    #[must_use]
    pub fn body_value(&self, id: &str) -> Option<BodyId> {
        match self.value(id) {
            Some(ParamValue::Body(v)) => Some(*v),
            _ => None,
        }
    }

    fn field(&self, id: &str) -> Option<&ParamField> {
        self.fields
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, field)| field)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut ParamField> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == id)
            .map(|(_, field)| field)
    }
}

/// An array of containers sharing a prototype schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamArray {
    prototype: ParamContainer,
    items: Vec<ParamContainer>,
}

impl ParamArray {
    /// Create an empty array whose entries are clone-filled from the
    /// given prototype.
    #[must_use]
    pub fn new(prototype: ParamContainer) -> Self {
        Self {
            prototype,
            items: Vec::new(),
        }
    }

    /// Resize the array (the `"size"` pseudo-field).
    ///
    /// Growing clone-fills new entries from the prototype; shrinking
    /// truncates. Returns `false` if the engine rejects the resize.
    #[must_use = "a rejected resize leaves the array in its old state"]
    pub fn set_size(&mut self, size: usize) -> bool {
        self.items.resize(size, self.prototype.clone());
        true
    }

    /// The current number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Access an entry by index.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ParamContainer> {
        self.items.get(index)
    }

    /// Access an entry by index, mutably.
    #[must_use]
    pub fn item_mut(&mut self, index: usize) -> Option<&mut ParamContainer> {
        self.items.get_mut(index)
    }

    /// The prototype entries are clone-filled from.
    #[must_use]
    pub fn prototype(&self) -> &ParamContainer {
        &self.prototype
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample_container() -> ParamContainer {
        let mut c = ParamContainer::new();
        c.declare_value("flexible", ParamValue::Bool(false));
        c.declare_value("maxSectionLength", ParamValue::Real(2.0));
        c
    }

    #[test]
    fn test_set_value_known_field() {
        let mut c = sample_container();
        assert!(c.set_value("flexible", ParamValue::Bool(true)));
        assert_eq!(c.bool_value("flexible"), Some(true));
    }

    #[test]
    fn test_set_value_unknown_field_is_rejected() {
        let mut c = sample_container();
        assert!(!c.set_value("inverseWrapping", ParamValue::Bool(true)));
    }

    #[test]
    fn test_set_value_type_mismatch_is_rejected() {
        let mut c = sample_container();
        assert!(!c.set_value("flexible", ParamValue::Real(1.0)));
        assert_eq!(c.bool_value("flexible"), Some(false));
    }

    #[test]
    fn test_array_resize_clone_fills_prototype() {
        let mut array = ParamArray::new(sample_container());
        assert!(array.set_size(3));
        assert_eq!(array.size(), 3);

        assert!(array
            .item_mut(1)
            .unwrap()
            .set_value("flexible", ParamValue::Bool(true)));

        // Other entries keep prototype defaults.
        assert_eq!(array.item(0).unwrap().bool_value("flexible"), Some(false));
        assert_eq!(array.item(2).unwrap().bool_value("flexible"), Some(false));
        assert_eq!(array.item(1).unwrap().bool_value("flexible"), Some(true));
    }

    #[test]
    fn test_array_shrink_truncates() {
        let mut array = ParamArray::new(sample_container());
        assert!(array.set_size(5));
        assert!(array.set_size(2));
        assert_eq!(array.size(), 2);
        assert!(array.item(2).is_none());
    }

    #[test]
    fn test_nested_container_access() {
        let mut outer = ParamContainer::new();
        outer.declare_container("definition", sample_container());

        let definition = outer.container_mut("definition").unwrap();
        assert!(definition.set_value("maxSectionLength", ParamValue::Real(3.0)));
        assert_eq!(
            outer.container("definition").unwrap().real_value("maxSectionLength"),
            Some(3.0)
        );
    }
}
