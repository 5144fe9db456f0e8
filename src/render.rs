//! Thrift IDL text output.
use std::fmt::Write as _;

use crate::inference::{Root, Schema};
use crate::ir::StructDefinition;
use crate::overlay::EditOverlay;

/// One struct block. Names and modifiers come from the overlay when it has
/// an entry for the field's path.
pub fn render_struct(def: &StructDefinition, overlay: &EditOverlay) -> String {
    let mut out = format!("struct {} {{\n", def.name);
    // fmt::Write on a String never returns Err
    for field in &def.fields {
        let modifier = overlay.effective_modifier(field);
        let name = overlay.effective_name(field);
        let _ = write!(out, "  {}: ", field.index);
        if let Some(keyword) = modifier.keyword() {
            out.push_str(keyword);
            out.push(' ');
        }
        let _ = writeln!(out, "{} {};", field.ty, name);
    }
    out.push('}');
    out
}

/// Structs joined by one blank line.
pub fn generate_idl(structs: &[StructDefinition], overlay: &EditOverlay) -> String {
    structs
        .iter()
        .map(|s| render_struct(s, overlay))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Whole document: the struct blocks plus a root-type comment for array and
/// scalar roots.
pub fn render_schema(schema: &Schema, overlay: &EditOverlay) -> String {
    let body = generate_idl(&schema.structs, overlay);
    match &schema.root {
        Root::Struct(_) => body,
        Root::List(item) if body.is_empty() => format!("// Root type: list<{item}>"),
        Root::List(item) => format!("{body}\n\n// Root type: list<{item}>"),
        Root::Scalar(ty) => format!("// Generated Thrift IDL\n\n// Root type: {ty}"),
    }
}
