//! The taxonomy of schema objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of schema object an entity represents.
///
/// `Object` is the abstract base; every concrete entity is constructed as
/// one of the other variants and keeps that type for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Object,
    Pod,
    Group,
    Field,
    Template,
    Page,
}

impl ObjectType {
    /// All known object types, base type first.
    pub const ALL: [ObjectType; 6] = [
        Self::Object,
        Self::Pod,
        Self::Group,
        Self::Field,
        Self::Template,
        Self::Page,
    ];

    /// Returns the canonical string tag stored in the `object_type` argument.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Pod => "pod",
            Self::Group => "group",
            Self::Field => "field",
            Self::Template => "template",
            Self::Page => "page",
        }
    }

    /// Whether objects of this type are owned by a parent and removed with it.
    #[must_use]
    pub const fn is_child_type(&self) -> bool {
        matches!(self, Self::Group | Self::Field)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownObjectType(s.to_string()))
    }
}
