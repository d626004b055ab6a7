//! Command sources.
//!
//! A [`Loader`] supplies descriptors at boot and later materializes a
//! [`CommandConstructor`] for a descriptor it owns. Two loaders ship with the
//! crate: [`ListLoader`] over an in-memory list and [`FsLoader`] discovering
//! command manifests on disk.

pub mod fs;
pub mod list;

pub use self::fs::FsLoader;
pub use self::list::ListLoader;

use std::fmt;
use std::sync::Arc;

use crate::command::{Command, CommandDefinition};
use crate::descriptor::{CommandDescriptor, CommandInput};
use crate::error::{CliError, Result};

/// Source of descriptors and runnable commands.
pub trait Loader {
    /// Descriptors of every command this loader provides.
    fn descriptors(&mut self) -> Result<Vec<CommandDescriptor>>;

    /// Materialize the command for a descriptor, or `None` when unknown.
    fn command(&self, descriptor: &CommandDescriptor) -> Result<Option<CommandConstructor>>;
}

/// Builds a command from its hydrated input.
pub type CommandFactory = Arc<dyn Fn(&CommandInput) -> anyhow::Result<Box<dyn Command>>>;

/// A descriptor paired with the factory that builds its command.
#[derive(Clone)]
pub struct CommandConstructor {
    descriptor: Arc<CommandDescriptor>,
    factory: CommandFactory,
}

impl fmt::Debug for CommandConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandConstructor")
            .field("command_name", &self.descriptor.command_name())
            .finish_non_exhaustive()
    }
}

impl CommandConstructor {
    /// Pair a descriptor with a factory closure.
    pub fn new<F>(descriptor: CommandDescriptor, factory: F) -> Result<Self>
    where
        F: Fn(&CommandInput) -> anyhow::Result<Box<dyn Command>> + 'static,
    {
        Self::from_parts("anonymous command", descriptor, Arc::new(factory))
    }

    /// Constructor for a type implementing [`CommandDefinition`].
    pub fn of<T: CommandDefinition>() -> Result<Self> {
        let factory: CommandFactory = Arc::new(
            |input: &CommandInput| -> anyhow::Result<Box<dyn Command>> {
                Ok(Box::new(T::from_input(input)?))
            },
        );
        Self::from_parts(std::any::type_name::<T>(), T::descriptor()?, factory)
    }

    pub(crate) fn from_parts(
        source: &str,
        descriptor: CommandDescriptor,
        factory: CommandFactory,
    ) -> Result<Self> {
        if descriptor.command_name().is_empty() {
            return Err(CliError::MissingCommandName {
                command: source.to_string(),
            });
        }
        Ok(Self {
            descriptor: Arc::new(descriptor),
            factory,
        })
    }

    pub fn descriptor(&self) -> &Arc<CommandDescriptor> {
        &self.descriptor
    }

    pub fn command_name(&self) -> &str {
        self.descriptor.command_name()
    }

    /// Build a fresh command from validated input.
    pub fn build(&self, input: &CommandInput) -> anyhow::Result<Box<dyn Command>> {
        (self.factory)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandContext;
    use serde_json::Value;

    struct Nameless;

    impl Command for Nameless {
        fn run(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    impl CommandDefinition for Nameless {
        fn descriptor() -> Result<CommandDescriptor> {
            Ok(CommandDescriptor::new(""))
        }

        fn from_input(_input: &CommandInput) -> anyhow::Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn nameless_type_is_rejected_with_its_type_name() {
        let err = CommandConstructor::of::<Nameless>().unwrap_err();
        match err {
            CliError::MissingCommandName { command } => assert!(command.ends_with("Nameless")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn closure_constructor_builds_commands() {
        let constructor = CommandConstructor::new(CommandDescriptor::new("noop"), |_| {
            Ok(Box::new(Nameless) as Box<dyn Command>)
        })
        .unwrap();
        assert_eq!(constructor.command_name(), "noop");
        assert!(constructor.build(&CommandInput::default()).is_ok());
        assert!(format!("{:?}", constructor).contains("noop"));
    }
}
