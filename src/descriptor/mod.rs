//! Declarative command definitions.
//!
//! A [`CommandDescriptor`] names a command and declares its positional
//! arguments, flags and options. Descriptors are built incrementally; every
//! declaration rule is checked at the moment an argument or flag is defined,
//! so a bad definition fails before any input is parsed.
//!
//! # Example
//!
//! ```
//! use commandeer::descriptor::{ArgumentSpec, CommandDescriptor, FlagSpec};
//!
//! let mut descriptor = CommandDescriptor::new("make:controller")
//!     .with_description("Create a new HTTP controller")
//!     .with_alias("mc");
//! descriptor
//!     .define_argument(ArgumentSpec::string("name"))?
//!     .define_flag(FlagSpec::boolean("resource").default_value(false))?;
//!
//! assert_eq!(descriptor.namespace(), Some("make"));
//! # Ok::<(), commandeer::CliError>(())
//! ```

pub mod argument;
pub mod flag;
pub mod input;
pub mod validate;

pub use argument::{ArgValue, ArgumentKind, ArgumentSpec};
pub use flag::{FlagKind, FlagSpec, FlagValue};
pub use input::{CommandInput, ParsedInput};
pub use validate::validate;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Behavioural switches of a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOptions {
    /// Accept flags the command does not declare.
    #[serde(default)]
    pub allow_unknown_flags: bool,
    /// Keep the kernel running after the main command completes.
    #[serde(default)]
    pub stays_alive: bool,
}

/// Immutable definition of a command once registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    #[serde(rename = "name")]
    command_name: String,
    namespace: Option<String>,
    description: String,
    help: Vec<String>,
    aliases: Vec<String>,
    args: Vec<ArgumentSpec>,
    flags: Vec<FlagSpec>,
    options: CommandOptions,
}

impl CommandDescriptor {
    /// Start a descriptor. The namespace is the part before the first colon.
    pub fn new(command_name: impl Into<String>) -> Self {
        let command_name = command_name.into();
        let namespace = namespace_of(&command_name);
        Self {
            command_name,
            namespace,
            description: String::new(),
            help: Vec::new(),
            aliases: Vec::new(),
            args: Vec::new(),
            flags: Vec::new(),
            options: CommandOptions::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a line of long-form help text.
    pub fn with_help(mut self, line: impl Into<String>) -> Self {
        self.help.push(line.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Declare a positional argument.
    ///
    /// Fails when the argument has no type, follows a spread argument, or is
    /// required while the previous argument is optional.
    pub fn define_argument(&mut self, mut spec: ArgumentSpec) -> Result<&mut Self> {
        let display = spec.display_name();
        if spec.kind.is_none() {
            return Err(CliError::invalid_descriptor(
                &self.command_name,
                format!("argument \"{}\" must declare a type", display),
            ));
        }

        if let Some(last) = self.args.last() {
            if last.is_spread() {
                return Err(CliError::invalid_descriptor(
                    &self.command_name,
                    format!(
                        "cannot define argument \"{}\" after spread argument \"{}\"",
                        display, last.argument_name
                    ),
                ));
            }
            if spec.is_required() && !last.is_required() {
                return Err(CliError::invalid_descriptor(
                    &self.command_name,
                    format!(
                        "cannot define required argument \"{}\" after optional argument \"{}\"",
                        display, last.argument_name
                    ),
                ));
            }
        }

        spec.required = Some(spec.is_required());
        spec.argument_name = display;
        self.args.push(spec);
        Ok(self)
    }

    /// Declare a flag. Redefining a flag token replaces the earlier one.
    pub fn define_flag(&mut self, mut spec: FlagSpec) -> Result<&mut Self> {
        spec.flag_name = spec.token();
        if spec.kind.is_none() {
            return Err(CliError::invalid_descriptor(
                &self.command_name,
                format!("flag \"{}\" must declare a type", spec.flag_name),
            ));
        }

        match self
            .flags
            .iter_mut()
            .find(|existing| existing.flag_name == spec.flag_name)
        {
            Some(existing) => *existing = spec,
            None => self.flags.push(spec),
        }
        Ok(self)
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn help(&self) -> &[String] {
        &self.help
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn args(&self) -> &[ArgumentSpec] {
        &self.args
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    pub fn options(&self) -> CommandOptions {
        self.options
    }

    /// Look up a flag by its command-line token.
    pub fn flag(&self, flag_name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.flag_name == flag_name)
    }

    /// A copy of this descriptor that also declares the given global flags.
    ///
    /// Flags the command already declares keep the command's definition.
    pub fn with_global_flags(&self, global: &[FlagSpec]) -> CommandDescriptor {
        let mut combined = self.clone();
        for spec in global {
            let token = spec.token();
            if combined.flag(&token).is_none() {
                let mut spec = spec.clone();
                spec.flag_name = token;
                combined.flags.push(spec);
            }
        }
        combined
    }
}

/// Serialized shape of a descriptor, as found in command manifests.
///
/// Converting into a [`CommandDescriptor`] replays every declaration through
/// the builder so manifests obey the same rules as code.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub args: Vec<ArgumentSpec>,
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
    #[serde(default)]
    pub options: CommandOptions,
}

impl TryFrom<DescriptorManifest> for CommandDescriptor {
    type Error = CliError;

    fn try_from(manifest: DescriptorManifest) -> Result<Self> {
        let mut descriptor = CommandDescriptor::new(manifest.name)
            .with_description(manifest.description)
            .with_options(manifest.options);
        descriptor.help = manifest.help;
        for alias in manifest.aliases {
            descriptor = descriptor.with_alias(alias);
        }
        for arg in manifest.args {
            descriptor.define_argument(arg)?;
        }
        for flag in manifest.flags {
            descriptor.define_flag(flag)?;
        }
        Ok(descriptor)
    }
}

fn namespace_of(command_name: &str) -> Option<String> {
    match command_name.split_once(':') {
        Some((namespace, _)) if !namespace.is_empty() => Some(namespace.to_string()),
        _ => None,
    }
}

/// Convert `camelCase` and `snake_case` keys into `kebab-case` tokens.
pub(crate) fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c == '_' || c == ' ' {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else if c.is_uppercase() {
            if i > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
