//! Pluggable creation and running of command instances.

use crate::command::CommandInstance;
use crate::descriptor::{CommandDescriptor, ParsedInput};
use crate::error::Result;
use crate::loader::CommandConstructor;
use crate::ui::UserInterface;

use super::Runtime;

/// Creates command instances and drives their lifecycle.
///
/// Both methods have working defaults; override one to wrap or replace it.
pub trait CommandExecutor {
    fn create(
        &self,
        constructor: &CommandConstructor,
        hydrate_with: &CommandDescriptor,
        parsed: ParsedInput,
        is_main: bool,
    ) -> Result<CommandInstance> {
        CommandInstance::new(constructor, hydrate_with, parsed, is_main)
    }

    fn run(
        &self,
        command: &mut CommandInstance,
        runtime: Runtime<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        command.exec(runtime, ui)
    }
}

/// Executor using the default behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExecutor;

impl CommandExecutor for DefaultExecutor {}
