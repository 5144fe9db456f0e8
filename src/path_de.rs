use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages. `source_name`
/// (usually a file path) is only used for the message.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, source_name: Option<&str>) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Json {
        source_name: source_name.map(str::to_string),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// One document per non-blank line (NDJSON).
pub fn ndjson_with_path(src: &str, source_name: Option<&str>) -> Result<Vec<serde_json::Value>> {
    let mut out = Vec::new();
    for line in src.lines().filter(|l| !l.trim().is_empty()) {
        out.push(from_str_with_path(line, source_name)?);
    }
    Ok(out)
}
