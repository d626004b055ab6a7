//! Error types for kernel, registry and command operations.
//!
//! This module defines [`CliError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CliError` for conditions the kernel knows how to render
//! - Command code returns `anyhow::Result` and lands in `CliError::Other`
//! - Every message is a single line suitable for the terminal

use std::path::PathBuf;
use thiserror::Error;

use crate::hooks::HookPhase;

/// Core error type for command resolution and execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// No command (or alias) is registered under the requested name.
    #[error("Command \"{name}\" is not defined")]
    CommandNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// A command type was registered without a command name.
    #[error("Cannot register command \"{command}\". It does not declare a command name")]
    MissingCommandName { command: String },

    /// A required positional argument was not supplied.
    #[error("Missing required argument \"{name}\"")]
    MissingArgument { name: String },

    /// An argument was supplied with an empty value.
    #[error("Missing value for argument \"{name}\"")]
    MissingArgumentValue { name: String },

    /// A required flag was not supplied.
    #[error("Missing required option \"{flag}\"")]
    MissingFlag { flag: String },

    /// A flag was supplied with an empty value.
    #[error("Missing value for option \"{flag}\"")]
    MissingFlagValue { flag: String },

    /// A flag not declared by the command was supplied.
    #[error("Unknown flag \"{token}\". The mentioned flag is not accepted by the command")]
    UnknownFlag { token: String },

    /// A flag value could not be interpreted as the declared kind.
    #[error("Invalid value. The \"{flag}\" flag accepts a \"{expected}\" value")]
    InvalidFlag { flag: String, expected: String },

    /// A kernel operation was attempted in a state that does not allow it.
    #[error("Cannot {action} in \"{state}\" state")]
    InvalidState { state: String, action: String },

    /// The kernel has already terminated.
    #[error("The kernel has been terminated. Create a fresh instance to execute commands")]
    KernelTerminated,

    /// A second process-owning invocation was attempted.
    #[error("Cannot run multiple main commands from a single process")]
    MultipleMainCommands,

    /// A descriptor violates an argument or flag declaration rule.
    #[error("Invalid definition for command \"{command}\": {reason}")]
    InvalidDescriptor { command: String, reason: String },

    /// A discovered command module does not have the expected shape.
    #[error("Invalid command module {path}: {reason}")]
    InvalidCommandModule { path: PathBuf, reason: String },

    /// A hook callback failed, aborting the in-flight operation.
    #[error("{phase} hook failed: {source}")]
    HookFailed {
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },

    /// The argv tokenizer rejected the input.
    #[error("{message}")]
    Parse { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Whether the kernel renders this error as a compact one-line message.
    ///
    /// Unrecognized errors (IO failures and arbitrary command errors) are
    /// dumped with their full cause chain instead.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Other(_))
    }

    /// Suggestions attached to a not-found error.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::CommandNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Recover a `CliError` that travelled through `anyhow`.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<CliError>() {
            Ok(err) => err,
            Err(err) => Self::Other(err),
        }
    }

    pub(crate) fn invalid_state(state: impl ToString, action: &str) -> Self {
        Self::InvalidState {
            state: state.to_string(),
            action: action.to_string(),
        }
    }

    pub(crate) fn invalid_descriptor(command: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Render a flag token the way a user would type it.
    pub(crate) fn unknown_flag(name: &str) -> Self {
        let token = if name.chars().count() == 1 {
            format!("-{}", name)
        } else {
            format!("--{}", name)
        };
        Self::UnknownFlag { token }
    }
}

/// Result type alias for kernel operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_not_found_displays_name() {
        let err = CliError::CommandNotFound {
            name: "serv".into(),
            suggestions: vec!["serve".into()],
        };
        assert_eq!(err.to_string(), "Command \"serv\" is not defined");
        assert_eq!(err.suggestions(), ["serve".to_string()]);
    }

    #[test]
    fn unknown_flag_renders_short_and_long_tokens() {
        assert_eq!(
            CliError::unknown_flag("x").to_string(),
            "Unknown flag \"-x\". The mentioned flag is not accepted by the command"
        );
        assert!(CliError::unknown_flag("verbose")
            .to_string()
            .contains("\"--verbose\""));
    }

    #[test]
    fn invalid_flag_names_expected_kind() {
        let err = CliError::InvalidFlag {
            flag: "port".into(),
            expected: "numeric".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("port"));
        assert!(msg.contains("numeric"));
    }

    #[test]
    fn invalid_state_names_state_and_action() {
        let err = CliError::invalid_state("booted", "define flag");
        assert_eq!(err.to_string(), "Cannot define flag in \"booted\" state");
    }

    #[test]
    fn terminated_error_mentions_fresh_instance() {
        assert!(CliError::KernelTerminated
            .to_string()
            .contains("Create a fresh instance"));
    }

    #[test]
    fn hook_failure_displays_phase_and_cause() {
        let err = CliError::HookFailed {
            phase: HookPhase::Loading,
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.to_string(), "loading hook failed: boom");
    }

    #[test]
    fn recognized_kinds_exclude_io_and_other() {
        assert!(CliError::KernelTerminated.is_recognized());
        assert!(CliError::MissingArgument { name: "a".into() }.is_recognized());
        assert!(!CliError::Other(anyhow::anyhow!("x")).is_recognized());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!CliError::from(io).is_recognized());
    }

    #[test]
    fn from_anyhow_recovers_cli_errors() {
        let wrapped = anyhow::Error::new(CliError::MissingArgument { name: "name".into() });
        assert!(matches!(
            CliError::from_anyhow(wrapped),
            CliError::MissingArgument { .. }
        ));
        assert!(matches!(
            CliError::from_anyhow(anyhow::anyhow!("plain")),
            CliError::Other(_)
        ));
    }

    #[test]
    fn suggestions_empty_for_other_kinds() {
        assert!(CliError::KernelTerminated.suggestions().is_empty());
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CliError::MissingFlag {
                flag: "name".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
