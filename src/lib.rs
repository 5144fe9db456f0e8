//! Infer Thrift IDL structs from example JSON.
//!
//! ```
//! use serde_json::json;
//!
//! let idl = json2thrift::convert(&json!({"id": 1, "name": "a", "tags": ["x", "y"]}));
//! assert_eq!(idl, "\
//! struct GeneratedStruct {
//!   1: optional i64 id;
//!   2: optional string name;
//!   3: optional list<string> tags;
//! }");
//! ```
//!
//! For interactive editing (renames, modifier changes, naming styles) load a
//! document into a [`Session`].
pub mod error;
pub mod host;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod naming;
pub mod overlay;
pub mod parse;
pub mod path_de;
pub mod render;
pub mod session;

pub use crate::error::{Error, Result};
pub use crate::inference::{infer_schema, InferOptions, Root, Schema};
pub use crate::ir::{FieldDefinition, Modifier, StructDefinition, ThriftType};
pub use crate::naming::{apply_naming_style, NamingStyle};
pub use crate::overlay::EditOverlay;
pub use crate::parse::parse_idl;
pub use crate::render::{generate_idl, render_schema};
pub use crate::session::Session;

use serde_json::Value;

/// Full pipeline with default options: root struct `GeneratedStruct`.
pub fn convert(value: &Value) -> String {
    convert_with(value, &InferOptions::default())
}

pub fn convert_with(value: &Value, options: &InferOptions) -> String {
    render_schema(&infer_schema(value, options), &EditOverlay::new())
}
