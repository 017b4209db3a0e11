//! Find queries.
//!
//! A [`FindQuery`] is what callers build. Before running, it is normalized:
//! the limit is resolved, list filters are trimmed, deduplicated and sorted,
//! and the `parent`/`group` reference filters are folded into the per-argument
//! filters. The normalized form is what the find engine evaluates and what the
//! cache key is derived from, so two queries with the same content share a
//! cache entry regardless of the order they were built in.

use indexmap::IndexMap;
use podkit_model::{Object, ObjectRef};
use podkit_types::{arg_to_string, is_empty_like, to_positive_int};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Find results keyed by object name, in registry order.
pub type FindResult = IndexMap<String, ObjectRef>;

/// Filter on a `parent` or `group` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "filter", content = "value")]
pub enum RefFilter {
    /// No filter on this reference.
    #[default]
    Any,
    /// Only objects without this reference.
    Unset,
    /// Only objects referencing this identifier or id.
    Is(String),
    /// Only objects referencing one of these identifiers or ids.
    OneOf(Vec<String>),
}

impl RefFilter {
    /// A filter matching references to `object`.
    pub fn object(object: &Object) -> Self {
        Self::Is(object.identifier().unwrap_or_default())
    }

    /// Whether this filter names at least one non-empty reference.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Any | Self::Unset => false,
            Self::Is(value) => !value.trim().is_empty(),
            Self::OneOf(values) => values.iter().any(|v| !v.trim().is_empty()),
        }
    }

    fn to_arg_filter(&self) -> Option<ArgFilter> {
        match self {
            Self::Any => None,
            Self::Unset => Some(ArgFilter::Equals(Value::from(""))),
            Self::Is(value) => Some(ArgFilter::Equals(Value::from(value.as_str()))),
            Self::OneOf(values) => Some(ArgFilter::OneOf(
                values.iter().map(|v| Value::from(v.as_str())).collect(),
            )),
        }
    }
}

impl From<&str> for RefFilter {
    fn from(value: &str) -> Self {
        Self::Is(value.to_string())
    }
}

impl From<String> for RefFilter {
    fn from(value: String) -> Self {
        Self::Is(value)
    }
}

/// Filter on an arbitrary argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum ArgFilter {
    /// The argument must be unset or null.
    Null,
    /// The stringified argument must equal the trimmed, stringified value.
    Equals(Value),
    /// The stringified argument must be one of the values. Empty values are
    /// dropped; an empty set disables the filter.
    OneOf(Vec<Value>),
}

impl ArgFilter {
    /// Prepares the filter for evaluation, or `None` if it is a no-op.
    pub(crate) fn compile(&self) -> Option<CompiledFilter> {
        match self {
            Self::Null => Some(CompiledFilter::Null),
            Self::Equals(value) => Some(CompiledFilter::Equals(
                arg_to_string(Some(value)).trim().to_string(),
            )),
            Self::OneOf(values) => {
                let set = normalize_strings(values.iter().map(|v| arg_to_string(Some(v))));
                (!set.is_empty()).then_some(CompiledFilter::OneOf(set))
            }
        }
    }
}

/// An [`ArgFilter`] with its comparison values stringified up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CompiledFilter {
    Null,
    Equals(String),
    OneOf(Vec<String>),
}

impl CompiledFilter {
    /// Whether `object`'s `arg` passes. Compound argument values compare by
    /// their JSON rendering.
    pub(crate) fn matches(&self, object: &Object, arg: &str) -> bool {
        let value = object.get_arg(arg);
        match self {
            Self::Null => matches!(value, None | Some(Value::Null)),
            Self::Equals(expected) => arg_to_string(value.as_ref()) == *expected,
            Self::OneOf(set) => set.contains(&arg_to_string(value.as_ref())),
        }
    }
}

/// Trims, drops empty-like entries, deduplicates and sorts.
fn normalize_strings(values: impl IntoIterator<Item = String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !is_empty_like(&Value::from(v.as_str())))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A find query over schema objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindQuery {
    /// Accepted object types; empty accepts all.
    pub object_type: Vec<String>,
    /// Accepted names; empty accepts all.
    pub name: Vec<String>,
    /// Accepted ids, coerced to positive integers; empty accepts all.
    pub id: Vec<Value>,
    pub parent: RefFilter,
    pub group: RefFilter,
    /// Per-argument filters.
    pub args: BTreeMap<String, ArgFilter>,
    /// Required truthiness of the `internal` argument.
    pub internal: Option<bool>,
    /// Maximum result size; `None` or `0` uses the configured default.
    pub limit: Option<usize>,
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type.push(object_type.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name.push(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<Value>) -> Self {
        self.id.push(id.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<RefFilter>) -> Self {
        self.parent = parent.into();
        self
    }

    pub fn group(mut self, group: impl Into<RefFilter>) -> Self {
        self.group = group.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<String>, filter: ArgFilter) -> Self {
        self.args.insert(arg.into(), filter);
        self
    }

    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = Some(internal);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether the query names an object type or a parent. Queries that do
    /// neither return nothing.
    pub fn is_scoped(&self) -> bool {
        self.object_type.iter().any(|t| !t.trim().is_empty()) || self.parent.is_present()
    }

    /// Resolves defaults and folds reference filters into `args`.
    pub fn normalize(&self, default_limit: usize) -> NormalizedQuery {
        let mut args = self.args.clone();
        for (arg, filter) in [("parent", &self.parent), ("group", &self.group)] {
            if let Some(filter) = filter.to_arg_filter() {
                args.insert(arg.to_string(), filter);
            }
        }

        let id: BTreeSet<u64> = self
            .id
            .iter()
            .map(to_positive_int)
            .filter(|id| *id > 0)
            .collect();

        NormalizedQuery {
            object_type: normalize_strings(self.object_type.iter().cloned()),
            name: normalize_strings(self.name.iter().cloned()),
            id: id.into_iter().collect(),
            args,
            internal: self.internal,
            limit: self.limit.filter(|l| *l > 0).unwrap_or(default_limit),
        }
    }
}

/// A find query after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuery {
    pub object_type: Vec<String>,
    pub name: Vec<String>,
    pub id: Vec<u64>,
    pub args: BTreeMap<String, ArgFilter>,
    pub internal: Option<bool>,
    pub limit: usize,
}

impl NormalizedQuery {
    /// Canonical JSON of the query, used as the find cache key.
    pub fn cache_key(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
