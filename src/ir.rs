// Strongly-typed Thrift IR. No serde_json::Value here.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Built-in Thrift scalars the parser accepts but inference never produces.
const OTHER_BUILTINS: &[&str] = &["i8", "i16", "i32", "byte", "binary"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThriftType {
    Bool,
    I64,
    Double,
    String,
    List(Box<ThriftType>),
    Struct(String),      // reference by name
    Builtin(String),     // i32, binary, set<..>, map<..> etc. (parse direction only)
}

impl ThriftType {
    pub fn list_of(item: ThriftType) -> Self {
        ThriftType::List(Box::new(item))
    }

    /// Struct referenced by this type, looking through any number of `list<..>` layers.
    pub fn referenced_struct(&self) -> Option<&str> {
        match self {
            ThriftType::Struct(name) => Some(name),
            ThriftType::List(item) => item.referenced_struct(),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ThriftType::List(_))
    }
}

impl fmt::Display for ThriftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThriftType::Bool => f.write_str("bool"),
            ThriftType::I64 => f.write_str("i64"),
            ThriftType::Double => f.write_str("double"),
            ThriftType::String => f.write_str("string"),
            ThriftType::List(item) => write!(f, "list<{item}>"),
            ThriftType::Struct(name) => f.write_str(name),
            ThriftType::Builtin(text) => f.write_str(text),
        }
    }
}

impl FromStr for ThriftType {
    type Err = std::convert::Infallible;

    /// Classifies a type string. Never fails: anything that is not a known
    /// built-in is a struct reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let ty = match s {
            "bool" => ThriftType::Bool,
            "i64" => ThriftType::I64,
            "double" => ThriftType::Double,
            "string" => ThriftType::String,
            _ if OTHER_BUILTINS.contains(&s) => ThriftType::Builtin(s.to_string()),
            _ => match s.strip_prefix("list<").and_then(|rest| rest.strip_suffix('>')) {
                Some(inner) => ThriftType::list_of(inner.parse()?),
                None if s.starts_with("set<") || s.starts_with("map<") => {
                    ThriftType::Builtin(s.to_string())
                }
                None => ThriftType::Struct(s.to_string()),
            },
        };
        Ok(ty)
    }
}

impl Serialize for ThriftType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    Optional,
    Required,
    None,
}

impl Modifier {
    /// Token as written in IDL; `None` has no token.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Modifier::Optional => Some("optional"),
            Modifier::Required => Some("required"),
            Modifier::None => None,
        }
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "optional" => Ok(Modifier::Optional),
            "required" => Ok(Modifier::Required),
            "" | "none" => Ok(Modifier::None),
            other => Err(format!("unknown field modifier `{other}` (expected optional, required or none)")),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("none"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub index: u32,              // 1-based, key enumeration order
    pub original_name: String,   // source key, never changes
    pub current_name: String,
    #[serde(rename = "type")]
    pub ty: ThriftType,
    pub modifier: Modifier,
    pub path: String,            // `<StructName>.<original_name>`
}

impl FieldDefinition {
    pub fn new(struct_name: &str, index: u32, original_name: &str, ty: ThriftType) -> Self {
        Self {
            index,
            original_name: original_name.to_string(),
            current_name: original_name.to_string(),
            ty,
            modifier: Modifier::default(),
            path: field_path(struct_name, original_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl StructDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new() }
    }

    pub fn field(&self, original_name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.original_name == original_name)
    }
}

pub fn field_path(struct_name: &str, field_name: &str) -> String {
    format!("{struct_name}.{field_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_strings_classify() {
        assert_eq!("i64".parse::<ThriftType>().unwrap(), ThriftType::I64);
        assert_eq!(
            "list<list<Item>>".parse::<ThriftType>().unwrap(),
            ThriftType::list_of(ThriftType::list_of(ThriftType::Struct("Item".into())))
        );
        assert_eq!("i32".parse::<ThriftType>().unwrap(), ThriftType::Builtin("i32".into()));
        assert_eq!(
            "map<string, i64>".parse::<ThriftType>().unwrap(),
            ThriftType::Builtin("map<string, i64>".into())
        );
        assert_eq!("list<Order>".parse::<ThriftType>().unwrap().to_string(), "list<Order>");
    }

    #[test]
    fn referenced_struct_looks_through_lists() {
        let ty = ThriftType::list_of(ThriftType::list_of(ThriftType::Struct("Leaf".into())));
        assert_eq!(ty.referenced_struct(), Some("Leaf"));
        assert_eq!(ThriftType::list_of(ThriftType::String).referenced_struct(), None);
        assert_eq!(ThriftType::Builtin("set<Leaf>".into()).referenced_struct(), None);
    }

    #[test]
    fn modifiers_parse() {
        assert_eq!("required".parse::<Modifier>(), Ok(Modifier::Required));
        assert_eq!("none".parse::<Modifier>(), Ok(Modifier::None));
        assert_eq!("".parse::<Modifier>(), Ok(Modifier::None));
        assert!("sometimes".parse::<Modifier>().is_err());
    }
}
