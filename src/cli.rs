//! CLI: convert JSON → Thrift IDL, or edit/inspect the inferred structs.
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use json2thrift::host::{Host, Notice, NoticeLevel};
use json2thrift::session::SESSION_ROOT_NAME;
use json2thrift::{
    convert_with, path_de, EditOverlay, Error, InferOptions, Modifier, NamingStyle, Session,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer Thrift IDL structs from example JSON, and rename/re-qualify their fields
#[derive(Parser, Debug)]
#[command(name = "json2thrift", version)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print Thrift IDL for each input document
    Convert(ConvertOut),
    /// load JSON or IDL, apply renames/modifiers, print the updated IDL
    Edit(EditOut),
    /// load JSON or IDL, apply edits, print the struct/field tree as JSON
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output becomes a document
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InferSettings {
    /// name of the struct generated for the document root
    #[arg(long)]
    root_name: Option<String>,

    /// only reuse a struct when field names *and* value kinds match
    #[arg(long, default_value_t = false)]
    strict_dedup: bool,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// output .thrift file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct EditSettings {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    infer_settings: InferSettings,

    /// load previously generated IDL instead of JSON
    #[arg(long, conflicts_with = "input")]
    thrift: Option<PathBuf>,

    /// JSON file of saved overrides ({"Root.id": {"name": "userId", "modifier": "required"}})
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// rename every field from its original name in this style
    #[arg(long, value_enum)]
    naming_style: Option<NamingStyle>,

    /// rename one field, e.g. --rename Root.id=userId (repeatable)
    #[arg(long = "rename", value_name = "PATH=NAME")]
    renames: Vec<String>,

    /// set a field modifier, e.g. --modifier Root.id=required (repeatable)
    #[arg(long = "modifier", value_name = "PATH=optional|required|none")]
    modifiers: Vec<String>,

    /// write the resulting overrides to this JSON file
    #[arg(long)]
    save_overrides: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct EditOut {
    #[command(flatten)]
    edit_settings: EditSettings,

    /// output .thrift file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    edit_settings: EditSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One JSON document and where it came from.
struct Document {
    source: String,
    value: Value,
}

/// Output side of the CLI: writes to a file or stdout, notices go to stderr.
struct StdioHost {
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> anyhow::Result<Vec<Document>> {
        if self.input.is_empty() {
            bail!("no input given (use --input <path|glob|->)");
        }
        let mut documents = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let text = read_source(&source)?;
            let source = source.to_string_lossy().to_string();
            let values = if self.ndjson {
                path_de::ndjson_with_path(&text, Some(source.as_str()))?
            } else {
                vec![path_de::from_str_with_path::<Value>(&text, Some(source.as_str()))?]
            };
            for value in values {
                let value = self.select(value, &source)?;
                match self.jq_expr.as_ref() {
                    None => documents.push(Document { source: source.clone(), value }),
                    Some(jq_expr) => {
                        let outputs = json2thrift::jq_exec::run_jaq(jq_expr, &value)
                            .with_context(|| format!("applying jq expression to {source}"))?;
                        documents.extend(outputs.into_iter().map(|value| Document { source: source.clone(), value }));
                    }
                }
            }
        }
        tracing::debug!(documents = documents.len(), "loaded input documents");
        Ok(documents)
    }

    fn select(&self, value: Value, source: &str) -> Result<Value, Error> {
        match self.json_pointer.as_deref() {
            None => Ok(value),
            Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| Error::Pointer {
                source_name: Some(source.to_string()),
                pointer: pointer.to_string(),
            }),
        }
    }
}

impl InferSettings {
    fn options(&self, default_root: &str) -> InferOptions {
        InferOptions {
            root_name: self.root_name.clone().unwrap_or_else(|| default_root.to_string()),
            strict_dedup: self.strict_dedup,
        }
    }
}

impl EditSettings {
    /// Build a session from the chosen source and apply every requested edit,
    /// in order: saved overrides, naming style, renames, modifiers.
    fn build_session(&self) -> anyhow::Result<Session> {
        let mut session = Session::with_options(self.infer_settings.options(SESSION_ROOT_NAME));

        if let Some(path) = self.overrides.as_ref() {
            let text = read_source(path)?;
            let name = path.to_string_lossy();
            let overlay: EditOverlay = path_de::from_str_with_path(&text, Some(&*name))?;
            session.merge_overlay(overlay);
        }

        match self.thrift.as_ref() {
            Some(path) => {
                session.load_from_text(&read_source(path)?);
            }
            None => {
                let mut documents = self.input_settings.load_documents()?;
                if documents.len() != 1 {
                    bail!("editing needs exactly one input document, got {}", documents.len());
                }
                let document = documents.remove(0);
                session.load_from_json(&document.value);
            }
        }

        if let Some(style) = self.naming_style {
            session.apply_naming_style_all(style);
        }
        for rename in &self.renames {
            let (path, name) = split_assignment(rename)?;
            session.set_name(path, name);
        }
        for assignment in &self.modifiers {
            let (path, modifier) = split_assignment(assignment)?;
            let modifier: Modifier = modifier
                .parse()
                .map_err(|message: String| Error::Override(format!("{assignment}: {message}")))?;
            session.set_modifier(path, modifier);
        }

        if let Some(path) = self.save_overrides.as_ref() {
            let text = serde_json::to_string_pretty(session.overlay())?;
            write_file(path, &text)?;
        }
        Ok(session)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Convert(target) => {
                let options = target.infer_settings.options(json2thrift::inference::DEFAULT_ROOT_NAME);
                let documents = target.input_settings.load_documents()?;

                // registries are per call, so documents convert independently
                let mut rendered: Vec<String> = documents
                    .par_iter()
                    .map(|doc| convert_with(&doc.value, &options))
                    .collect();

                let text = if rendered.len() == 1 {
                    rendered.remove(0)
                } else {
                    documents
                        .iter()
                        .zip(rendered)
                        .map(|(doc, idl)| format!("// Source: {}\n\n{idl}", doc.source))
                        .collect::<Vec<_>>()
                        .join("\n\n")
                };
                let mut host = StdioHost { out: target.out.clone() };
                if !host.copy_text(&text) {
                    bail!("failed to write output");
                }
                if let Some(out) = target.out.as_ref() {
                    host.notify(Notice::success(format!("wrote {}", out.display())));
                }
            }
            Command::Edit(target) => {
                let session = target.edit_settings.build_session()?;
                let mut host = StdioHost { out: target.out.clone() };
                if !session.copy_idl(&mut host) {
                    bail!("no IDL produced");
                }
            }
            Command::Tree(target) => {
                let session = target.edit_settings.build_session()?;
                let text = serde_json::to_string_pretty(&session.view())?;
                let mut host = StdioHost { out: target.out.clone() };
                if !host.copy_text(&text) {
                    bail!("failed to write output");
                }
            }
        }
        Ok(())
    }
}

impl Host for StdioHost {
    fn copy_text(&mut self, text: &str) -> bool {
        match self.out.as_ref() {
            None => {
                println!("{text}");
                true
            }
            Some(path) => match write_file(path, text) {
                Ok(()) => true,
                Err(error) => {
                    tracing::error!("{error:#}");
                    false
                }
            },
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            // stdout already shows the result
            NoticeLevel::Success if self.out.is_none() => {}
            NoticeLevel::Success => eprintln!("{} {}", "✓".green().bold(), notice.message),
            NoticeLevel::Error => eprintln!("{} {}", "error:".red().bold(), notice.message),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn split_assignment(raw: &str) -> Result<(&str, &str), Error> {
    match raw.split_once('=') {
        Some((path, value)) if !path.trim().is_empty() => Ok((path.trim(), value.trim())),
        _ => Err(Error::Override(format!("{raw} (expected PATH=VALUE)"))),
    }
}

fn read_source(path: &Path) -> Result<String, Error> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

fn write_file(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            // unreadable entries are skipped, like the shell would
            out.extend(glob::glob(pattern)?.filter_map(Result::ok));
            if out.len() == before {
                return Err(Error::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
