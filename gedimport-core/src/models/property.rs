//! Host property bag.
//!
//! The host passes configuration in and out as a flat sequence of named
//! values. [`PropertyBag`] keeps that sequence in order and offers typed
//! lookups; shape problems surface as [`ProtocolError`]s.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// A loosely typed property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Text value
    String(String),
    /// Integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// Nested property sequence
    Sequence(Vec<Property>),
}

impl PropertyValue {
    /// Human-readable name of the value type, reported in [`ProtocolError::WrongType`]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the text if this is a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the nested properties if this is a sequence
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Property]> {
        match self {
            Self::Sequence(props) => Some(props),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(bag: PropertyBag) -> Self {
        Self::Sequence(bag.into_properties())
    }
}

/// A single named value as exchanged with the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value
    pub value: PropertyValue,
}

impl Property {
    /// Creates a new property
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered mapping of property names to values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    properties: Vec<Property>,
}

impl PropertyBag {
    /// Creates an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from a host property sequence.
    ///
    /// Every property is stored. When a name repeats, the later value
    /// replaces the earlier one in place and a [`ProtocolError::DuplicateProperty`]
    /// is returned alongside the bag.
    #[must_use]
    pub fn from_properties(properties: Vec<Property>) -> (Self, Vec<ProtocolError>) {
        let mut bag = Self::new();
        let mut problems = Vec::new();
        for property in properties {
            if bag.contains(&property.name) {
                problems.push(ProtocolError::DuplicateProperty(property.name.clone()));
            }
            bag.insert(property.name, property.value);
        }
        (bag, problems)
    }

    /// Returns the properties as a host sequence
    #[must_use]
    pub fn to_properties(&self) -> Vec<Property> {
        self.properties.clone()
    }

    /// Consumes the bag and returns the host sequence
    #[must_use]
    pub fn into_properties(self) -> Vec<Property> {
        self.properties
    }

    /// Returns the value stored under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Returns true if `name` is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the string stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::WrongType`] if the value is present but not a string.
    pub fn get_str(&self, name: &str) -> ProtocolResult<Option<&str>> {
        match self.get(name) {
            None => Ok(None),
            Some(PropertyValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(ProtocolError::WrongType {
                name: name.to_string(),
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// Inserts or replaces a value, keeping the original position on replace
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.properties.iter_mut().find(|p| p.name == name) {
            existing.value = value;
        } else {
            self.properties.push(Property { name, value });
        }
    }

    /// Removes and returns the value stored under `name`
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(index).value)
    }

    /// Iterates over the properties in order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Number of properties
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the bag is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<Property> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self::from_properties(iter.into_iter().collect()).0
    }
}
