//! Parsed command-line input and its hydrated, name-keyed form.

use std::collections::BTreeMap;

use crate::error::{CliError, Result};

use super::{ArgValue, CommandDescriptor, FlagValue};

/// Output of an [`InputParser`](crate::parser::InputParser).
///
/// `args` is aligned positionally with the descriptor's arguments; `flags`
/// is keyed by flag token; `unknown_flags` lists undeclared flag names
/// without their dashes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub args: Vec<Option<ArgValue>>,
    pub flags: BTreeMap<String, FlagValue>,
    pub unknown_flags: Vec<String>,
}

impl ParsedInput {
    /// The value at a positional index, if supplied.
    pub fn arg(&self, index: usize) -> Option<&ArgValue> {
        self.args.get(index).and_then(Option::as_ref)
    }

    /// The value of a flag by token, if present.
    pub fn flag(&self, flag_name: &str) -> Option<&FlagValue> {
        self.flags.get(flag_name)
    }

    pub fn has_flag(&self, flag_name: &str) -> bool {
        self.flags.contains_key(flag_name)
    }
}

/// Validated input keyed by the field names declared on the descriptor.
///
/// Built once after validation; commands read their values from here when
/// they are constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandInput {
    args: BTreeMap<String, ArgValue>,
    flags: BTreeMap<String, FlagValue>,
}

impl CommandInput {
    /// Copy each declared argument and flag value into its named slot.
    pub fn hydrate(descriptor: &CommandDescriptor, parsed: &ParsedInput) -> Self {
        let args = descriptor
            .args()
            .iter()
            .enumerate()
            .filter_map(|(index, spec)| {
                parsed
                    .arg(index)
                    .map(|value| (spec.name.clone(), value.clone()))
            })
            .collect();

        let flags = descriptor
            .flags()
            .iter()
            .filter_map(|spec| {
                parsed
                    .flag(&spec.flag_name)
                    .map(|value| (spec.name.clone(), value.clone()))
            })
            .collect();

        Self { args, flags }
    }

    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    /// A string argument value.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.args.get(name).and_then(ArgValue::as_str)
    }

    /// A string argument that validation guarantees is present.
    pub fn require_string(&self, name: &str) -> Result<&str> {
        self.string(name).ok_or_else(|| CliError::MissingArgument {
            name: name.to_string(),
        })
    }

    /// Values of a spread argument; empty when none were given.
    pub fn spread(&self, name: &str) -> &[String] {
        self.args.get(name).map(ArgValue::as_slice).unwrap_or(&[])
    }

    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// A boolean flag; absent flags read as `false`.
    pub fn flag_bool(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(FlagValue::as_bool)
            .unwrap_or(false)
    }

    pub fn flag_str(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(FlagValue::as_str)
    }

    pub fn flag_number(&self, name: &str) -> Option<f64> {
        self.flags.get(name).and_then(FlagValue::as_number)
    }

    /// An array flag; absent flags read as empty.
    pub fn flag_list(&self, name: &str) -> &[String] {
        self.flags
            .get(name)
            .and_then(FlagValue::as_list)
            .unwrap_or(&[])
    }
}
