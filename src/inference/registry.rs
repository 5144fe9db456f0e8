use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::debug;

use crate::ir::StructDefinition;
use crate::naming::type_name;

/// Fields whose name makes a good disambiguating suffix, in priority order.
const IDENTIFIER_FIELDS: &[&str] = &["id", "name", "type", "code", "title"];

/// Coarse value category, compared only under strict dedup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Kind { Bool, Integer, Float, String, Array, Object }

/// Sorted field names, plus per-field kinds when dedup is strict.
type Shape = Vec<(String, Option<Kind>)>;

#[derive(Debug)]
struct Entry {
    shape: Shape,
    definition: Option<StructDefinition>,  // None while fields are still being inferred
    dependencies: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    /// true when the name was just reserved and the caller must populate it
    pub is_new: bool,
}

/// Struct definitions discovered during one inference pass.
///
/// Lives for a single conversion: build one per call, never share it.
#[derive(Debug, Default)]
pub struct StructRegistry {
    entries: IndexMap<String, Entry>,
    strict: bool,
}

impl StructRegistry {
    pub fn new(strict_dedup: bool) -> Self {
        Self { entries: IndexMap::new(), strict: strict_dedup }
    }

    /// Pick the name for an object shape, reusing an existing struct when its
    /// shape is identical.
    ///
    /// Order of attempts: the proposed name, a descriptive name built from
    /// the object's key fields, then `Name1`, `Name2`, ... A name already
    /// holding an identical shape is reused at any step, so descriptive and
    /// numbered names are deduplicated as well as the proposed one and a
    /// repeated shape never gets a second numbered copy.
    pub fn register_or_reuse(&mut self, proposed: &str, object: &Map<String, Value>) -> Registration {
        let shape = self.shape_of(object);

        let key_fields = key_fields(object);
        let descriptive = (!key_fields.is_empty()).then(|| {
            let suffix: String = key_fields.iter().map(|k| type_name(k)).collect();
            format!("{proposed}{suffix}")
        });
        let numbered = (1u64..).map(|n| format!("{proposed}{n}"));
        let candidates = std::iter::once(proposed.to_string()).chain(descriptive).chain(numbered);

        for candidate in candidates {
            match self.entries.get(&candidate) {
                None => {
                    if candidate != proposed {
                        debug!(proposed, chosen = %candidate, "struct name collision resolved");
                    }
                    debug!(name = %candidate, "registered struct");
                    self.entries.insert(candidate.clone(), Entry {
                        shape,
                        definition: None,
                        dependencies: IndexSet::new(),
                    });
                    return Registration { name: candidate, is_new: true };
                }
                Some(entry) if entry.shape == shape => {
                    debug!(name = %candidate, "reusing struct for identical shape");
                    return Registration { name: candidate, is_new: false };
                }
                Some(_) => {}
            }
        }
        unreachable!("numbered candidates are unbounded")
    }

    /// Store the populated definition of a reserved struct and record which
    /// registered structs its fields reference.
    pub fn complete(&mut self, definition: StructDefinition) {
        let dependencies: IndexSet<String> = definition
            .fields
            .iter()
            .filter_map(|f| f.ty.referenced_struct())
            .filter(|name| self.entries.contains_key(*name))
            .map(str::to_string)
            .collect();
        match self.entries.get_mut(&definition.name) {
            Some(entry) => {
                entry.dependencies = dependencies;
                entry.definition = Some(definition);
            }
            None => {
                self.entries.insert(definition.name.clone(), Entry {
                    shape: Vec::new(),
                    definition: Some(definition),
                    dependencies,
                });
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StructDefinition> {
        self.entries.get(name).and_then(|e| e.definition.as_ref())
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn dependencies(&self, name: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(name)
            .into_iter()
            .flat_map(|e| e.dependencies.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry, yielding definitions in the given name order.
    pub fn take_in_order(mut self, order: &[String]) -> Vec<StructDefinition> {
        order
            .iter()
            .filter_map(|name| self.entries.get_mut(name).and_then(|e| e.definition.take()))
            .collect()
    }

    fn shape_of(&self, object: &Map<String, Value>) -> Shape {
        let mut shape: Shape = object
            .iter()
            .map(|(k, v)| (k.clone(), self.strict.then(|| kind_of(v))))
            .collect();
        shape.sort();
        shape
    }
}

fn kind_of(value: &Value) -> Kind {
    match value {
        Value::Null | Value::String(_) => Kind::String,
        Value::Bool(_) => Kind::Bool,
        Value::Number(n) if super::is_integral(n) => Kind::Integer,
        Value::Number(_) => Kind::Float,
        Value::Array(_) => Kind::Array,
        Value::Object(_) => Kind::Object,
    }
}

/// First identifier-like key present, else the first two keys.
fn key_fields(object: &Map<String, Value>) -> Vec<&str> {
    if let Some(id) = IDENTIFIER_FIELDS.iter().find(|f| object.contains_key(**f)) {
        return vec![*id];
    }
    object.keys().take(2).map(String::as_str).collect()
}
