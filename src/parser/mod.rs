//! Turning raw argv tokens into [`ParsedInput`].
//!
//! The kernel only depends on the [`InputParser`] trait. [`ParserOptions`]
//! describe what a command accepts in the bucketed shape tokenizers expect:
//! positional argument kinds plus per-type flag buckets, an alias map, a
//! default map and the explicit list of known flags. Anything not in the
//! known list must come back in `unknown_flags`, never be dropped.
//!
//! [`ClapParser`] is the default implementation.

pub mod clap;

pub use self::clap::ClapParser;

use std::collections::BTreeMap;

use crate::descriptor::{
    ArgValue, ArgumentKind, CommandDescriptor, FlagKind, FlagSpec, FlagValue, ParsedInput,
};
use crate::error::Result;

/// Tokenizer contract consumed by the kernel.
pub trait InputParser {
    /// Parse `argv` (command name excluded) according to `options`.
    fn parse(&self, argv: &[String], options: &ParserOptions) -> Result<ParsedInput>;
}

/// Parser options for one positional argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentParserOption {
    pub name: String,
    pub kind: ArgumentKind,
    pub default: Option<ArgValue>,
}

/// Flag parser options, bucketed by value type and keyed by flag token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagsParserOptions {
    pub boolean: Vec<String>,
    pub string: Vec<String>,
    pub number: Vec<String>,
    pub array: Vec<String>,
    pub alias: BTreeMap<String, Vec<String>>,
    pub default: BTreeMap<String, FlagValue>,
    pub known: Vec<String>,
}

impl FlagsParserOptions {
    fn add(&mut self, spec: &FlagSpec) {
        let token = spec.token();
        if self.known.contains(&token) {
            return;
        }

        let bucket = match spec.kind {
            Some(FlagKind::Boolean) => &mut self.boolean,
            Some(FlagKind::Number) => &mut self.number,
            Some(FlagKind::Array) => &mut self.array,
            Some(FlagKind::String) | None => &mut self.string,
        };
        bucket.push(token.clone());

        if !spec.aliases.is_empty() {
            self.alias.insert(token.clone(), spec.aliases.clone());
        }
        if let Some(default) = &spec.default {
            self.default.insert(token.clone(), default.clone());
        }
        self.known.push(token);
    }

    /// The value type of a known flag.
    pub fn kind_of(&self, token: &str) -> Option<FlagKind> {
        let token = token.to_string();
        if self.boolean.contains(&token) {
            Some(FlagKind::Boolean)
        } else if self.number.contains(&token) {
            Some(FlagKind::Number)
        } else if self.array.contains(&token) {
            Some(FlagKind::Array)
        } else if self.string.contains(&token) {
            Some(FlagKind::String)
        } else {
            None
        }
    }

    /// Whether `--name` refers to a known flag or one of its long aliases.
    pub fn is_known_long(&self, name: &str) -> bool {
        self.long_owner(name).is_some()
    }

    /// Whether `-c` refers to a known flag.
    pub fn is_known_short(&self, c: char) -> bool {
        self.short_owner(c).is_some()
    }

    /// The flag `-c` selects.
    ///
    /// A single-character token always owns its letter. Otherwise the first
    /// known flag declaring `c` as an alias wins, so command flags take
    /// precedence over global flags merged after them.
    pub fn short_owner(&self, c: char) -> Option<&str> {
        let is_char = |s: &str| {
            let mut chars = s.chars();
            chars.next() == Some(c) && chars.next().is_none()
        };
        self.known
            .iter()
            .find(|token| is_char(token))
            .or_else(|| {
                self.known.iter().find(|token| {
                    self.alias
                        .get(*token)
                        .is_some_and(|aliases| aliases.iter().any(|a| is_char(a)))
                })
            })
            .map(String::as_str)
    }

    /// The flag `--name` selects, by token or long alias.
    pub fn long_owner(&self, name: &str) -> Option<&str> {
        self.known
            .iter()
            .find(|token| *token == name)
            .or_else(|| {
                self.known.iter().find(|token| {
                    self.alias.get(*token).is_some_and(|aliases| {
                        aliases.iter().any(|a| a.chars().count() > 1 && a == name)
                    })
                })
            })
            .map(String::as_str)
    }
}

/// Everything a parser needs to know about a command's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserOptions {
    pub arguments: Vec<ArgumentParserOption>,
    pub flags: FlagsParserOptions,
}

impl ParserOptions {
    /// Options for the arguments and flags a descriptor declares.
    pub fn for_command(descriptor: &CommandDescriptor) -> Self {
        let arguments = descriptor
            .args()
            .iter()
            .map(|spec| ArgumentParserOption {
                name: spec.name.clone(),
                kind: spec.kind.unwrap_or(ArgumentKind::String),
                default: spec.default.clone(),
            })
            .collect();

        let mut flags = FlagsParserOptions::default();
        for spec in descriptor.flags() {
            flags.add(spec);
        }

        Self { arguments, flags }
    }

    /// Merge additional flags. Flags already known keep their options.
    pub fn with_flags(mut self, specs: &[FlagSpec]) -> Self {
        for spec in specs {
            self.flags.add(spec);
        }
        self
    }

    pub fn has_spread(&self) -> bool {
        self.arguments
            .iter()
            .any(|arg| arg.kind == ArgumentKind::Spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ArgumentSpec;

    fn descriptor() -> CommandDescriptor {
        let mut d = CommandDescriptor::new("make:controller");
        d.define_argument(ArgumentSpec::string("name"))
            .unwrap()
            .define_flag(FlagSpec::boolean("resource").alias("r").default_value(false))
            .unwrap()
            .define_flag(FlagSpec::number("port"))
            .unwrap()
            .define_flag(FlagSpec::array("only").alias("methods"))
            .unwrap();
        d
    }

    #[test]
    fn buckets_flags_by_kind() {
        let options = ParserOptions::for_command(&descriptor());
        assert_eq!(options.flags.boolean, vec!["resource"]);
        assert_eq!(options.flags.number, vec!["port"]);
        assert_eq!(options.flags.array, vec!["only"]);
        assert_eq!(options.flags.known, vec!["resource", "port", "only"]);
        assert_eq!(options.flags.default["resource"], FlagValue::Bool(false));
        assert_eq!(options.flags.kind_of("port"), Some(FlagKind::Number));
        assert_eq!(options.flags.kind_of("nope"), None);
    }

    #[test]
    fn recognizes_aliases() {
        let options = ParserOptions::for_command(&descriptor());
        assert!(options.flags.is_known_short('r'));
        assert!(!options.flags.is_known_short('x'));
        assert!(options.flags.is_known_long("methods"));
        assert!(options.flags.is_known_long("resource"));
        assert!(!options.flags.is_known_long("r"));
    }

    #[test]
    fn shared_short_alias_belongs_to_the_command_flag() {
        let mut d = CommandDescriptor::new("serve");
        d.define_flag(FlagSpec::string("host").alias("h").alias("hostname"))
            .unwrap();
        let options = ParserOptions::for_command(&d).with_flags(&[
            FlagSpec::boolean("help").alias("h"),
            FlagSpec::boolean("verbose").alias("hostname"),
        ]);

        assert_eq!(options.flags.short_owner('h'), Some("host"));
        assert_eq!(options.flags.long_owner("hostname"), Some("host"));
        assert_eq!(options.flags.long_owner("help"), Some("help"));
        assert_eq!(options.flags.short_owner('x'), None);
    }

    #[test]
    fn merging_keeps_existing_flags() {
        let options = ParserOptions::for_command(&descriptor())
            .with_flags(&[FlagSpec::boolean("help"), FlagSpec::string("port")]);
        assert_eq!(options.flags.known.len(), 4);
        assert_eq!(options.flags.kind_of("port"), Some(FlagKind::Number));
        assert_eq!(options.flags.kind_of("help"), Some(FlagKind::Boolean));
    }

    #[test]
    fn arguments_keep_declaration_order() {
        let options = ParserOptions::for_command(&descriptor());
        assert_eq!(options.arguments.len(), 1);
        assert_eq!(options.arguments[0].name, "name");
        assert!(!options.has_spread());
    }
}
