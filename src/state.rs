use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a field participates in configuration and mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Declared by the host; always sent on create.
    Required,
    /// Declared by the host; sent on create only when non-empty.
    Optional,
    /// Assigned by the remote system; never sent in mutations.
    Computed,
}

/// Per-field schema for one resource type.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Local attribute name (snake_case).
    pub name: &'static str,
    /// GraphQL input key (camelCase).
    pub wire: &'static str,
    pub kind: FieldKind,
    /// Changing this field requires destroy and recreate; it never appears
    /// in an update payload.
    pub force_new: bool,
    /// An empty declared value clears the remote field with an explicit null.
    pub nullable: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            kind: FieldKind::Required,
            force_new: false,
            nullable: false,
        }
    }

    pub const fn optional(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            kind: FieldKind::Optional,
            force_new: false,
            nullable: false,
        }
    }

    pub const fn computed(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            kind: FieldKind::Computed,
            force_new: false,
            nullable: false,
        }
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Last-known authoritative state for one resource instance. Every tracked
/// nullable field is present as an explicit JSON null when cleared, keeping
/// null distinct from absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: String,
    pub attrs: BTreeMap<String, Value>,
}

impl ResourceState {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }
}

/// Declared attribute values supplied by the host at create time.
#[derive(Debug, Clone, Default)]
pub struct DeclaredConfig(BTreeMap<String, Value>);

impl DeclaredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Fields the host's change detection reports as differing from last-known
/// state, with their new declared values.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet(BTreeMap<String, Value>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}
