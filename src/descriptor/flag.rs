//! Flag declarations.

use serde::{Deserialize, Serialize};

/// The kind of value a flag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    String,
    Boolean,
    Number,
    Array,
}

impl std::fmt::Display for FlagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagKind::String => write!(f, "string"),
            FlagKind::Boolean => write!(f, "boolean"),
            FlagKind::Number => write!(f, "number"),
            FlagKind::Array => write!(f, "array"),
        }
    }
}

/// A parsed or default flag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FlagValue {
    /// Whether the value carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(values) => values.iter().all(|v| v.trim().is_empty()),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FlagValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Declaration of a flag.
///
/// `name` is the key the hydrated input uses; `flag_name` is the token typed
/// on the command line (`--flag-name`). Aliases of a single character become
/// short flags (`-r`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub name: String,
    #[serde(default)]
    pub flag_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: Option<FlagKind>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FlagValue>,
    #[serde(default)]
    pub allow_empty_value: bool,
}

impl FlagSpec {
    /// A flag with no type yet. Defining it on a descriptor fails.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag_name: String::new(),
            description: String::new(),
            kind: None,
            required: false,
            aliases: Vec::new(),
            default: None,
            allow_empty_value: false,
        }
    }

    fn typed(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::new(name)
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::typed(name, FlagKind::Boolean)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::typed(name, FlagKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::typed(name, FlagKind::Number)
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self::typed(name, FlagKind::Array)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Override the command-line token.
    pub fn flag_name(mut self, flag_name: impl Into<String>) -> Self {
        self.flag_name = flag_name.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<FlagValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty_value = true;
        self
    }

    /// The command-line token, falling back to the kebab-cased key.
    pub fn token(&self) -> String {
        if self.flag_name.is_empty() {
            super::kebab_case(&self.name)
        } else {
            self.flag_name.clone()
        }
    }

    /// Single-character aliases, usable as `-x`.
    pub fn short_aliases(&self) -> impl Iterator<Item = char> + '_ {
        self.aliases.iter().filter_map(|alias| {
            let mut chars = alias.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
    }

    /// Multi-character aliases, usable as `--alias`.
    pub fn long_aliases(&self) -> impl Iterator<Item = &str> + '_ {
        self.aliases
            .iter()
            .filter(|alias| alias.chars().count() > 1)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_defaults_to_kebab_case() {
        assert_eq!(FlagSpec::boolean("dryRun").token(), "dry-run");
        assert_eq!(FlagSpec::boolean("dryRun").flag_name("dry").token(), "dry");
    }

    #[test]
    fn aliases_split_by_length() {
        let flag = FlagSpec::boolean("resource").alias("r").alias("res");
        assert_eq!(flag.short_aliases().collect::<Vec<_>>(), vec!['r']);
        assert_eq!(flag.long_aliases().collect::<Vec<_>>(), vec!["res"]);
    }

    #[test]
    fn blank_flag_values() {
        assert!(FlagValue::from("").is_blank());
        assert!(FlagValue::List(vec![]).is_blank());
        assert!(!FlagValue::Bool(false).is_blank());
        assert!(!FlagValue::Number(f64::NAN).is_blank());
    }

    #[test]
    fn flag_value_accessors() {
        assert_eq!(FlagValue::from(true).as_bool(), Some(true));
        assert_eq!(FlagValue::from(3).as_number(), Some(3.0));
        assert_eq!(FlagValue::from("x").as_str(), Some("x"));
        assert_eq!(FlagValue::from("x").as_bool(), None);
    }

    #[test]
    fn untagged_default_deserializes() {
        let flag: FlagSpec =
            serde_json::from_str(r#"{"name": "port", "type": "number", "default": 3333}"#)
                .unwrap();
        assert_eq!(flag.default, Some(FlagValue::Number(3333.0)));
        assert_eq!(flag.kind, Some(FlagKind::Number));
    }
}
