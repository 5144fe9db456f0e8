//! User edits layered over inferred or parsed structs.
//!
//! Keyed by field path (`<StructName>.<originalName>`), so the overrides
//! survive regenerating the schema from the same input.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ir::{FieldDefinition, Modifier};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditOverlay {
    entries: IndexMap<String, FieldOverride>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, path: &str, name: impl Into<String>) {
        self.entries.entry(path.to_string()).or_default().name = Some(name.into());
    }

    pub fn set_modifier(&mut self, path: &str, modifier: Modifier) {
        self.entries.entry(path.to_string()).or_default().modifier = Some(modifier);
    }

    /// Overridden name; an empty override counts as absent.
    pub fn name(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)
            .and_then(|o| o.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn modifier(&self, path: &str) -> Option<Modifier> {
        self.entries.get(path).and_then(|o| o.modifier)
    }

    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOverride)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Name to render for `field`: the override, else its stored name.
    pub fn effective_name<'a>(&'a self, field: &'a FieldDefinition) -> &'a str {
        self.name(&field.path).unwrap_or(&field.current_name)
    }

    pub fn effective_modifier(&self, field: &FieldDefinition) -> Modifier {
        self.modifier(&field.path).unwrap_or(field.modifier)
    }

    /// Fold another overlay into this one; its entries win field by field.
    pub fn extend(&mut self, other: EditOverlay) {
        for (path, o) in other.entries {
            let slot = self.entries.entry(path).or_default();
            if o.name.is_some() {
                slot.name = o.name;
            }
            if o.modifier.is_some() {
                slot.modifier = o.modifier;
            }
        }
    }
}
