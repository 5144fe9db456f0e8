//! Editable schema state behind the tree view.
//!
//! A [`Session`] holds the structs from the last load plus an [`EditOverlay`]
//! that outlives loads. Stored structs stay exactly as inferred or parsed;
//! the overlay is applied when the IDL or the tree view is produced, so
//! [`Session::reset_changes`] always gets back to the loaded state.
//! Presentation code subscribes with [`Session::subscribe`] and is called
//! after every load and edit.
use serde_json::Value;
use tracing::trace;

use crate::host::{Host, Notice};
use crate::inference::{infer_schema, InferOptions};
use crate::ir::{Modifier, StructDefinition};
use crate::naming::{apply_naming_style, NamingStyle};
use crate::overlay::EditOverlay;
use crate::parse::parse_idl;
use crate::render::generate_idl;

/// Root struct name used by the editor (the one-shot converter uses
/// `GeneratedStruct`).
pub const SESSION_ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Loaded,
    Edited { path: String },
    Reset,
}

pub struct SessionEvent<'a> {
    pub change: &'a Change,
    /// structs with the overlay applied
    pub view: &'a [StructDefinition],
    pub idl: &'a str,
}

type Listener = Box<dyn FnMut(&SessionEvent<'_>)>;

pub struct Session {
    options: InferOptions,
    structs: Vec<StructDefinition>,
    overlay: EditOverlay,
    listeners: Vec<Listener>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(InferOptions::default().with_root_name(SESSION_ROOT_NAME))
    }

    pub fn with_options(options: InferOptions) -> Self {
        Self { options, structs: Vec::new(), overlay: EditOverlay::new(), listeners: Vec::new() }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Infer structs from a JSON document. Existing edits are kept.
    pub fn load_from_json(&mut self, value: &Value) -> &[StructDefinition] {
        self.structs = infer_schema(value, &self.options).structs;
        self.emit(Change::Loaded);
        &self.structs
    }

    /// Recover structs from previously generated (possibly hand-edited) IDL.
    pub fn load_from_text(&mut self, text: &str) -> &[StructDefinition] {
        self.structs = parse_idl(text, &EditOverlay::new());
        self.emit(Change::Loaded);
        &self.structs
    }

    /// Structs as loaded, without edits.
    pub fn structs(&self) -> &[StructDefinition] {
        &self.structs
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    /// Structs with every override applied to `current_name`/`modifier`.
    pub fn view(&self) -> Vec<StructDefinition> {
        self.structs
            .iter()
            .map(|s| StructDefinition {
                name: s.name.clone(),
                fields: s
                    .fields
                    .iter()
                    .map(|f| {
                        let mut f = f.clone();
                        f.current_name = self.overlay.effective_name(&f).to_string();
                        f.modifier = self.overlay.effective_modifier(&f);
                        f
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn idl(&self) -> String {
        generate_idl(&self.structs, &self.overlay)
    }

    pub fn set_name(&mut self, path: &str, name: impl Into<String>) {
        let name = name.into();
        trace!(path, name = %name, "rename field");
        self.overlay.set_name(path, name);
        self.emit(Change::Edited { path: path.to_string() });
    }

    pub fn set_modifier(&mut self, path: &str, modifier: Modifier) {
        trace!(path, %modifier, "change modifier");
        self.overlay.set_modifier(path, modifier);
        self.emit(Change::Edited { path: path.to_string() });
    }

    /// Rename one field to its original name in `style`. Returns the new
    /// name, or `None` if no loaded field has `path`.
    pub fn apply_naming_style(&mut self, path: &str, style: NamingStyle) -> Option<String> {
        let original = self
            .structs
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.path == path)
            .map(|f| f.original_name.clone())?;
        let name = apply_naming_style(&original, style);
        self.set_name(path, name.clone());
        Some(name)
    }

    /// Rename every loaded field to its original name in `style`.
    pub fn apply_naming_style_all(&mut self, style: NamingStyle) {
        let renames: Vec<(String, String)> = self
            .structs
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| (f.path.clone(), apply_naming_style(&f.original_name, style)))
            .collect();
        for (path, name) in &renames {
            self.overlay.set_name(path, name.as_str());
        }
        trace!(fields = renames.len(), %style, "applied naming style");
        self.emit(Change::Edited { path: String::from("*") });
    }

    /// Fold saved overrides into the current overlay.
    pub fn merge_overlay(&mut self, overlay: EditOverlay) {
        self.overlay.extend(overlay);
        self.emit(Change::Edited { path: String::from("*") });
    }

    pub fn reset_changes(&mut self) {
        self.overlay.reset_all();
        self.emit(Change::Reset);
    }

    /// Hand the current IDL to the host's clipboard and report the outcome.
    pub fn copy_idl(&self, host: &mut impl Host) -> bool {
        let text = self.idl();
        if text.trim().is_empty() {
            host.notify(Notice::error("nothing to copy"));
            return false;
        }
        let copied = host.copy_text(&text);
        if copied {
            host.notify(Notice::success("IDL copied"));
        } else {
            host.notify(Notice::error("could not copy IDL"));
        }
        copied
    }

    fn emit(&mut self, change: Change) {
        if self.listeners.is_empty() {
            return;
        }
        let view = self.view();
        let idl = self.idl();
        let event = SessionEvent { change: &change, view: &view, idl: &idl };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
