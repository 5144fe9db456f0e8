//! JSON → Thrift schema inference.
//!
//! Walk one JSON document, map every value to a Thrift type, and register a
//! struct for every object shape on the way down. Arrays of objects are first
//! merged into a single representative object (see [`merge`]). Struct names
//! come from the field that holds the object and are deduplicated by the
//! per-call [`StructRegistry`]; [`order`] then sorts definitions so that
//! dependencies precede their users.
//!
//! Inference never fails for a well-formed `serde_json::Value`.
pub mod merge;
pub mod order;
pub mod registry;

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::ir::{FieldDefinition, StructDefinition, ThriftType};
use crate::naming::{item_type_name, type_name};

pub use merge::merge_objects;
pub use order::dependency_order;
pub use registry::{Registration, StructRegistry};

// ------------------------------- Options --------------------------------- //

pub const DEFAULT_ROOT_NAME: &str = "GeneratedStruct";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferOptions {
    /// name of the struct generated for an object (or merged array) root
    pub root_name: String,
    /// dedup shapes on field names *and* value kinds instead of names only
    pub strict_dedup: bool,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self { root_name: DEFAULT_ROOT_NAME.to_string(), strict_dedup: false }
    }
}

impl InferOptions {
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
}

// ------------------------------- Output ---------------------------------- //

/// What the document root turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Root {
    /// object root; the named struct is in `Schema::structs`
    Struct(String),
    /// array root, with its element type
    List(ThriftType),
    /// scalar root (null, bool, number, string)
    Scalar(ThriftType),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub structs: Vec<StructDefinition>,  // dependency order
    pub root: Root,
}

// ------------------------------ Inference -------------------------------- //

pub struct Inference {
    registry: StructRegistry,
}

impl Inference {
    pub fn new(strict_dedup: bool) -> Self {
        Self { registry: StructRegistry::new(strict_dedup) }
    }

    /// Thrift type of `value`, found under key `field_name` (empty for none).
    pub fn infer(&mut self, value: &Value, field_name: &str) -> ThriftType {
        match value {
            Value::Null => ThriftType::String,
            Value::Bool(_) => ThriftType::Bool,
            Value::Number(n) if is_integral(n) => ThriftType::I64,
            Value::Number(_) => ThriftType::Double,
            Value::String(_) => ThriftType::String,
            Value::Array(items) => self.infer_array(items, field_name),
            Value::Object(map) => ThriftType::Struct(self.infer_struct(map, &type_name(field_name))),
        }
    }

    fn infer_array(&mut self, items: &[Value], field_name: &str) -> ThriftType {
        let item = if items.iter().any(Value::is_object) {
            let merged = merge_objects(items);
            ThriftType::Struct(self.infer_struct(&merged, &item_type_name(field_name)))
        } else {
            match items.first() {
                // mixed scalar arrays take the first element's type
                Some(first) => self.infer(first, field_name),
                None => ThriftType::String,
            }
        };
        ThriftType::list_of(item)
    }

    /// Register `object` under `proposed` (or a deduplicated/disambiguated
    /// variant) and infer its fields if the name is new.
    pub fn infer_struct(&mut self, object: &Map<String, Value>, proposed: &str) -> String {
        let Registration { name, is_new } = self.registry.register_or_reuse(proposed, object);
        if is_new {
            let mut definition = StructDefinition::new(name.clone());
            for ((key, value), index) in object.iter().zip(1u32..) {
                let ty = self.infer(value, key);
                definition.fields.push(FieldDefinition::new(&name, index, key, ty));
            }
            self.registry.complete(definition);
        }
        name
    }

    pub fn registry(&self) -> &StructRegistry {
        &self.registry
    }

    /// Structs in dependency order.
    pub fn into_structs(self) -> Vec<StructDefinition> {
        let order = dependency_order(&self.registry);
        self.registry.take_in_order(&order)
    }
}

/// Infer the whole schema of one document with a fresh registry.
pub fn infer_schema(value: &Value, options: &InferOptions) -> Schema {
    let mut inference = Inference::new(options.strict_dedup);
    let root = match value {
        Value::Object(map) => Root::Struct(inference.infer_struct(map, &options.root_name)),
        Value::Array(items) if items.iter().any(Value::is_object) => {
            let merged = merge_objects(items);
            let name = inference.infer_struct(&merged, &options.root_name);
            Root::List(ThriftType::Struct(name))
        }
        Value::Array(items) => Root::List(match items.first() {
            Some(first) => inference.infer(first, ""),
            None => ThriftType::String,
        }),
        scalar => Root::Scalar(inference.infer(scalar, "")),
    };
    let structs = inference.into_structs();
    debug!(structs = structs.len(), root = ?root, "inferred schema");
    Schema { structs, root }
}

/// Integral numbers become `i64`, including floats with no fractional part
/// and integers beyond the 64-bit range.
pub(crate) fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

// ------------------------------- Tests ------------------------------------ //
