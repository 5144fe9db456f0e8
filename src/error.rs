use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON{}: at JSON path {path} → {message}", source_label(.source_name))]
    Json {
        source_name: Option<String>,
        path: String,
        message: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("jq filter failed: {0}")]
    Jq(String),

    #[error("invalid input pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),

    #[error("JSON pointer `{pointer}` selects nothing{}", source_label(.source_name))]
    Pointer {
        source_name: Option<String>,
        pointer: String,
    },

    #[error("invalid override `{0}`")]
    Override(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn source_label(source_name: &Option<String>) -> String {
    match source_name {
        Some(name) => format!(" in {name}"),
        None => String::new(),
    }
}
