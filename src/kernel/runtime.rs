//! Read-only view of a booted kernel used while commands run.

use std::fmt;

use crate::command::CommandInstance;
use crate::descriptor::{validate, FlagSpec};
use crate::error::Result;
use crate::hooks::HookPipeline;
use crate::loader::CommandConstructor;
use crate::parser::{InputParser, ParserOptions};
use crate::registry::Registry;
use crate::ui::UserInterface;

use super::CommandExecutor;

/// Everything needed to resolve and execute commands, borrowed from a
/// [`Kernel`](super::Kernel).
#[derive(Clone, Copy)]
pub struct Runtime<'k> {
    registry: &'k Registry,
    hooks: &'k HookPipeline,
    parser: &'k dyn InputParser,
    executor: &'k dyn CommandExecutor,
    global_flags: &'k [FlagSpec],
    binary_name: &'k str,
}

impl fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("registry", self.registry)
            .field("hooks", self.hooks)
            .field("global_flags", &self.global_flags)
            .field("binary_name", &self.binary_name)
            .finish_non_exhaustive()
    }
}

impl<'k> Runtime<'k> {
    pub(crate) fn new(
        registry: &'k Registry,
        hooks: &'k HookPipeline,
        parser: &'k dyn InputParser,
        executor: &'k dyn CommandExecutor,
        global_flags: &'k [FlagSpec],
        binary_name: &'k str,
    ) -> Self {
        Self {
            registry,
            hooks,
            parser,
            executor,
            global_flags,
            binary_name,
        }
    }

    pub fn registry(&self) -> &'k Registry {
        self.registry
    }

    pub fn hooks(&self) -> &'k HookPipeline {
        self.hooks
    }

    pub fn parser(&self) -> &'k dyn InputParser {
        self.parser
    }

    pub fn executor(&self) -> &'k dyn CommandExecutor {
        self.executor
    }

    pub fn global_flags(&self) -> &'k [FlagSpec] {
        self.global_flags
    }

    pub fn binary_name(&self) -> &'k str {
        self.binary_name
    }

    /// Resolve a name or alias, running the resolution hooks.
    pub fn resolve(&self, name: &str) -> Result<CommandConstructor> {
        self.registry.resolve(name, self.hooks)
    }

    /// Resolve, parse, validate and run a command.
    ///
    /// Only the command's own flags are accepted. No main-command
    /// bookkeeping happens and every failure propagates.
    pub fn exec(
        self,
        name: &str,
        argv: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandInstance> {
        let constructor = self.resolve(name)?;
        let descriptor = constructor.descriptor();

        let parsed = self
            .parser
            .parse(argv, &ParserOptions::for_command(descriptor))?;
        validate(descriptor, &parsed)?;

        let mut command = self.executor.create(&constructor, descriptor, parsed, false)?;
        tracing::debug!(command = command.command_name(), id = %command.id(), "executing command");

        self.hooks.run_executing(&command, false)?;
        self.executor.run(&mut command, self, ui)?;
        self.hooks.run_executed(&command, false)?;
        Ok(command)
    }
}
