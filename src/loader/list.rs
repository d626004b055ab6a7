//! Loader over an in-memory list of commands.

use crate::command::CommandDefinition;
use crate::descriptor::CommandDescriptor;
use crate::error::Result;

use super::{CommandConstructor, Loader};

/// Serves a fixed list of constructors.
#[derive(Debug, Clone, Default)]
pub struct ListLoader {
    commands: Vec<CommandConstructor>,
}

impl ListLoader {
    pub fn new(commands: Vec<CommandConstructor>) -> Self {
        Self { commands }
    }

    /// Append a command type.
    pub fn with<T: CommandDefinition>(mut self) -> Result<Self> {
        self.commands.push(CommandConstructor::of::<T>()?);
        Ok(self)
    }

    pub fn push(&mut self, constructor: CommandConstructor) -> &mut Self {
        self.commands.push(constructor);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Loader for ListLoader {
    fn descriptors(&mut self) -> Result<Vec<CommandDescriptor>> {
        Ok(self
            .commands
            .iter()
            .map(|c| c.descriptor().as_ref().clone())
            .collect())
    }

    fn command(&self, descriptor: &CommandDescriptor) -> Result<Option<CommandConstructor>> {
        // Later entries shadow earlier ones with the same name
        Ok(self
            .commands
            .iter()
            .rev()
            .find(|c| c.command_name() == descriptor.command_name())
            .cloned())
    }
}
