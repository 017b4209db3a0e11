//! The finite attribute table used for direct and delegated reads.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An attribute that can be read from an object, or through one of its
/// references via [`Object::resolve_delegated_attribute`](crate::Object::resolve_delegated_attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    ObjectType,
    Name,
    Id,
    Parent,
    Group,
    Label,
    Description,
    /// Derived, not stored.
    Identifier,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Self::ObjectType,
        Self::Name,
        Self::Id,
        Self::Parent,
        Self::Group,
        Self::Label,
        Self::Description,
        Self::Identifier,
    ];

    /// The argument key backing this attribute.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectType => "object_type",
            Self::Name => "name",
            Self::Id => "id",
            Self::Parent => "parent",
            Self::Group => "group",
            Self::Label => "label",
            Self::Description => "description",
            Self::Identifier => "identifier",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ModelError::UnknownAttribute(s.to_string()))
    }
}

/// A weak, identifier-based reference an object can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Parent,
    Group,
}

impl Relation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Group => "group",
        }
    }
}

impl FromStr for Relation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Self::Parent),
            "group" => Ok(Self::Group),
            other => Err(ModelError::UnknownRelation(other.to_string())),
        }
    }
}
