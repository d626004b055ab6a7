//! A live command bound to its input and outcome.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::descriptor::{CommandDescriptor, CommandInput, ParsedInput};
use crate::error::{CliError, Result};
use crate::kernel::Runtime;
use crate::loader::CommandConstructor;
use crate::ui::UserInterface;

use super::{Command, CommandContext};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a command instance, used to match termination requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable outcome of a command run.
#[derive(Debug, Default)]
pub(crate) struct CommandState {
    pub(crate) exit_code: Option<i32>,
    pub(crate) error: Option<anyhow::Error>,
    pub(crate) result: Option<Value>,
    pub(crate) termination_requested: bool,
}

/// A command materialized from a constructor and validated input.
pub struct CommandInstance {
    id: InstanceId,
    is_main: bool,
    descriptor: Arc<CommandDescriptor>,
    parsed: ParsedInput,
    input: CommandInput,
    command: Box<dyn Command>,
    state: CommandState,
}

impl fmt::Debug for CommandInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInstance")
            .field("id", &self.id)
            .field("command_name", &self.descriptor.command_name())
            .field("is_main", &self.is_main)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CommandInstance {
    /// Build the command, hydrating `parsed` against `hydrate_with`.
    ///
    /// `hydrate_with` is the constructor's descriptor, or that descriptor
    /// extended with global flags for a main command.
    pub fn new(
        constructor: &CommandConstructor,
        hydrate_with: &CommandDescriptor,
        parsed: ParsedInput,
        is_main: bool,
    ) -> Result<Self> {
        let input = CommandInput::hydrate(hydrate_with, &parsed);
        let command = constructor.build(&input).map_err(CliError::from_anyhow)?;
        Ok(Self {
            id: InstanceId::next(),
            is_main,
            descriptor: Arc::clone(constructor.descriptor()),
            parsed,
            input,
            command,
            state: CommandState::default(),
        })
    }

    /// Drive the lifecycle phases.
    ///
    /// Errors from `prepare`, `interact` and `run` are recorded, never
    /// returned. Only an error from `completed` propagates.
    pub fn exec(&mut self, runtime: Runtime<'_>, ui: &mut dyn UserInterface) -> Result<()> {
        let name = self.descriptor.command_name().to_string();
        let mut ctx = CommandContext::new(runtime, &mut *ui, &self.descriptor, &mut self.state);

        match run_phases(self.command.as_mut(), &mut ctx, &name) {
            Ok(value) => {
                if !value.is_null() {
                    ctx.state.result = Some(value);
                }
                ctx.state.exit_code.get_or_insert(0);
            }
            Err(err) => {
                tracing::debug!(command = %name, error = %err, "command failed");
                ctx.state.error = Some(err);
                ctx.state.exit_code.get_or_insert(1);
            }
        }

        tracing::trace!(command = %name, "completed");
        let handled = self
            .command
            .completed(&mut ctx)
            .map_err(CliError::from_anyhow)?;

        if !handled {
            if let Some(err) = &self.state.error {
                ui.fatal(err);
            }
        }
        Ok(())
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Whether this instance was created from process input.
    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    pub fn command_name(&self) -> &str {
        self.descriptor.command_name()
    }

    pub fn parsed(&self) -> &ParsedInput {
        &self.parsed
    }

    pub fn input(&self) -> &CommandInput {
        &self.input
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.state.exit_code
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.state.exit_code = Some(code);
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        self.state.error.as_ref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.state.result.as_ref()
    }

    /// Whether the command asked the kernel to terminate.
    pub fn termination_requested(&self) -> bool {
        self.state.termination_requested
    }
}

fn run_phases(
    command: &mut dyn Command,
    ctx: &mut CommandContext<'_>,
    name: &str,
) -> anyhow::Result<Value> {
    tracing::trace!(command = name, "prepare");
    command.prepare(ctx)?;
    tracing::trace!(command = name, "interact");
    command.interact(ctx)?;
    tracing::trace!(command = name, "run");
    command.run(ctx)
}
