//! Positional argument declarations.

use serde::{Deserialize, Serialize};

/// The kind of value a positional argument accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    /// A single string value.
    String,
    /// All remaining positional values. Must be the last argument.
    Spread,
}

/// A positional argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Value of a `string` argument.
    String(String),
    /// Values of a `spread` argument.
    Spread(Vec<String>),
}

impl ArgValue {
    /// Whether the value carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::String(s) => s.trim().is_empty(),
            Self::Spread(values) => values.is_empty(),
        }
    }

    /// The value as a single string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Spread(_) => None,
        }
    }

    /// The value as a list. A string value is a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::String(s) => std::slice::from_ref(s),
            Self::Spread(values) => values,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(values: Vec<String>) -> Self {
        Self::Spread(values)
    }
}

/// Declaration of a positional argument.
///
/// `name` is the key the hydrated [`CommandInput`](super::CommandInput) uses;
/// `argument_name` is what help output and errors show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default)]
    pub argument_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: Option<ArgumentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ArgValue>,
    #[serde(default)]
    pub allow_empty_value: bool,
}

impl ArgumentSpec {
    /// An argument with no type yet. Defining it on a descriptor fails.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument_name: String::new(),
            description: String::new(),
            kind: None,
            required: None,
            default: None,
            allow_empty_value: false,
        }
    }

    /// A single-valued string argument.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            kind: Some(ArgumentKind::String),
            ..Self::new(name)
        }
    }

    /// A spread argument collecting every remaining positional value.
    pub fn spread(name: impl Into<String>) -> Self {
        Self {
            kind: Some(ArgumentKind::Spread),
            ..Self::new(name)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Override the name shown in help output and errors.
    pub fn argument_name(mut self, argument_name: impl Into<String>) -> Self {
        self.argument_name = argument_name.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    pub fn default_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty_value = true;
        self
    }

    /// Whether the argument must be supplied.
    ///
    /// Unless set explicitly, string arguments without a default are required
    /// and spread arguments are not.
    pub fn is_required(&self) -> bool {
        self.required
            .unwrap_or(self.kind != Some(ArgumentKind::Spread) && self.default.is_none())
    }

    pub fn is_spread(&self) -> bool {
        self.kind == Some(ArgumentKind::Spread)
    }

    /// The name shown to users, falling back to the kebab-cased key.
    pub fn display_name(&self) -> String {
        if self.argument_name.is_empty() {
            super::kebab_case(&self.name)
        } else {
            self.argument_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_argument_is_required_by_default() {
        assert!(ArgumentSpec::string("name").is_required());
    }

    #[test]
    fn spread_argument_is_optional_by_default() {
        let arg = ArgumentSpec::spread("files");
        assert!(!arg.is_required());
        assert!(arg.is_spread());
    }

    #[test]
    fn default_value_makes_argument_optional() {
        let arg = ArgumentSpec::string("env").default_value("dev");
        assert!(!arg.is_required());
    }

    #[test]
    fn explicit_required_wins_over_default() {
        let arg = ArgumentSpec::spread("files").required();
        assert!(arg.is_required());
    }

    #[test]
    fn display_name_is_kebab_cased() {
        assert_eq!(ArgumentSpec::string("modelName").display_name(), "model-name");
        assert_eq!(
            ArgumentSpec::string("model_name")
                .argument_name("model")
                .display_name(),
            "model"
        );
    }

    #[test]
    fn blank_values() {
        assert!(ArgValue::from("  ").is_blank());
        assert!(ArgValue::Spread(vec![]).is_blank());
        assert!(!ArgValue::from("x").is_blank());
        assert!(!ArgValue::Spread(vec!["".into()]).is_blank());
    }

    #[test]
    fn deserializes_type_field() {
        let arg: ArgumentSpec =
            serde_json::from_str(r#"{"name": "files", "type": "spread"}"#).unwrap();
        assert_eq!(arg.kind, Some(ArgumentKind::Spread));

        let untyped: ArgumentSpec = serde_json::from_str(r#"{"name": "files"}"#).unwrap();
        assert_eq!(untyped.kind, None);
    }
}
