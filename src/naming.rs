//! Identifier transforms: field naming styles and struct type names.
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static UNDERSCORE_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([a-z])").unwrap());
static LEADING_UPPER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+_").unwrap());
static UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NamingStyle {
    #[default]
    #[value(name = "original")]
    Original,
    #[value(name = "camelCase")]
    CamelCase,
    #[value(name = "snake_case")]
    SnakeCase,
    #[value(name = "PascalCase")]
    PascalCase,
    #[value(name = "kebab-case")]
    KebabCase,
}

impl NamingStyle {
    pub const ALL: [NamingStyle; 5] = [
        NamingStyle::Original,
        NamingStyle::CamelCase,
        NamingStyle::SnakeCase,
        NamingStyle::PascalCase,
        NamingStyle::KebabCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NamingStyle::Original => "original",
            NamingStyle::CamelCase => "camelCase",
            NamingStyle::SnakeCase => "snake_case",
            NamingStyle::PascalCase => "PascalCase",
            NamingStyle::KebabCase => "kebab-case",
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamingStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown naming style `{s}`"))
    }
}

pub fn apply_naming_style(name: &str, style: NamingStyle) -> String {
    match style {
        NamingStyle::Original => name.to_string(),
        NamingStyle::CamelCase => camel_case(name),
        NamingStyle::SnakeCase => {
            let snake = UPPER.replace_all(name, "_$0").to_lowercase();
            match snake.strip_prefix('_') {
                Some(rest) => rest.to_string(),
                None => snake,
            }
        }
        NamingStyle::PascalCase => upper_first(&camel_case(name)),
        NamingStyle::KebabCase => name.replace('_', "-").to_lowercase(),
    }
}

fn camel_case(name: &str) -> String {
    let joined = UNDERSCORE_LOWER.replace_all(name, |caps: &Captures| caps[1].to_uppercase());
    LEADING_UPPER_RUN
        .replace(&joined, |caps: &Captures| caps[0].to_lowercase())
        .into_owned()
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Struct type name for a JSON key: every `_` segment gets an uppercase first
/// character and a lowercase tail. Empty keys become `Default`.
pub fn type_name(key: &str) -> String {
    if key.is_empty() {
        return "Default".to_string();
    }
    key.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Struct name for the merged element shape of an array field.
pub fn item_type_name(key: &str) -> String {
    if key.is_empty() {
        "ArrayItem".to_string()
    } else {
        format!("{}Item", type_name(key))
    }
}
