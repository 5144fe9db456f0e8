//! Permissive re-parsing of rendered Thrift IDL.
//!
//! Only the subset this crate emits is understood: `struct Name {` headers,
//! a closing `}` line, and field lines `<index>: [modifier] <type> <name>;`.
//! Struct and field names are any non-space token, since JSON keys such as
//! `first-name` or `@type` are carried through unchanged.
//! Anything else is skipped, so hand-edited text yields whatever structs can
//! still be recognised.
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::ir::{field_path, FieldDefinition, Modifier, StructDefinition, ThriftType};
use crate::overlay::EditOverlay;

static STRUCT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^struct\s+(\S+?)\s*\{\s*(\})?").unwrap());
static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s*:\s*(?:(optional|required)\s+)?(\S(?:.*?\S)?)\s+(\S+?)\s*;").unwrap()
});

/// Parse struct definitions out of `text`, taking names and modifiers from
/// `overlay` for any path it has entries for.
pub fn parse_idl(text: &str, overlay: &EditOverlay) -> Vec<StructDefinition> {
    let mut structs = Vec::new();
    let mut current: Option<StructDefinition> = None;

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(caps) = STRUCT_HEADER.captures(trimmed) {
            if let Some(open) = current.take() {
                trace!(line = line_no + 1, name = %open.name, "struct left unclosed");
                structs.push(open);
            }
            let def = StructDefinition::new(&caps[1]);
            if caps.get(2).is_some() {
                structs.push(def);
            } else {
                current = Some(def);
            }
            continue;
        }
        let Some(def) = current.as_mut() else {
            continue;
        };
        if trimmed == "}" {
            if let Some(done) = current.take() {
                structs.push(done);
            }
        } else if trimmed.contains(':') {
            match parse_field(&def.name, trimmed, overlay) {
                Some(field) => def.fields.push(field),
                None => trace!(line = line_no + 1, text = trimmed, "skipped unrecognised field line"),
            }
        }
    }
    if let Some(open) = current {
        trace!(name = %open.name, "struct left unclosed at end of input");
        structs.push(open);
    }
    structs
}

fn parse_field(struct_name: &str, line: &str, overlay: &EditOverlay) -> Option<FieldDefinition> {
    let caps = FIELD_LINE.captures(line)?;
    let index = caps[1].parse::<u32>().ok()?;
    let modifier = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => Modifier::None,
    };
    let ty = caps[3].parse::<ThriftType>().ok()?;
    let name = &caps[4];
    let path = field_path(struct_name, name);
    Some(FieldDefinition {
        index,
        original_name: name.to_string(),
        current_name: overlay.name(&path).unwrap_or(name).to_string(),
        ty,
        modifier: overlay.modifier(&path).unwrap_or(modifier),
        path,
    })
}
