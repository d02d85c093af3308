//! Typed access to semi-structured resource documents
//!
//! Objects come back from the API server as arbitrary JSON. Instead of
//! navigating them with chains of `get(..).and_then(..)` at every call site,
//! builders go through [`Resource`], whose accessors return `None` both when
//! a field is absent and when it has an unexpected type. Defaults are chosen
//! by the caller, never silently by the accessor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Look up a nested field by path
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// A single Kubernetes object as returned by the API server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Value);

impl Resource {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Consume the resource and return its top-level fields
    ///
    /// A non-object document yields an empty map.
    pub fn into_object(self) -> Map<String, Value> {
        match self.0 {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    pub fn path(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.0, path)
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.path(path).and_then(Value::as_str)
    }

    pub fn i64_at(&self, path: &[&str]) -> Option<i64> {
        self.path(path).and_then(Value::as_i64)
    }

    pub fn bool_at(&self, path: &[&str]) -> Option<bool> {
        self.path(path).and_then(Value::as_bool)
    }

    pub fn array_at(&self, path: &[&str]) -> Option<&[Value]> {
        self.path(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn object_at(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.path(path).and_then(Value::as_object)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_at(&["metadata", "name"])
    }

    pub fn namespace(&self) -> Option<&str> {
        self.str_at(&["metadata", "namespace"])
    }

    pub fn uid(&self) -> Option<&str> {
        self.str_at(&["metadata", "uid"])
    }

    /// Value of a single label, if present and a string
    pub fn label(&self, key: &str) -> Option<&str> {
        self.object_at(&["metadata", "labels"])
            .and_then(|labels| labels.get(key))
            .and_then(Value::as_str)
    }

    /// True if the label key is present, whatever its value
    pub fn has_label(&self, key: &str) -> bool {
        self.object_at(&["metadata", "labels"])
            .is_some_and(|labels| labels.contains_key(key))
    }

    /// All string-valued labels, sorted by key
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.object_at(&["metadata", "labels"])
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }
}
