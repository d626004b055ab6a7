//! What a running command can see and change.

use serde_json::Value;

use crate::descriptor::{CommandDescriptor, FlagSpec};
use crate::error::Result;
use crate::kernel::Runtime;
use crate::registry::Registry;
use crate::ui::{Prompt, PromptResult, UserInterface};

use super::instance::{CommandInstance, CommandState};

/// Handle passed to every lifecycle phase.
pub struct CommandContext<'a> {
    runtime: Runtime<'a>,
    ui: &'a mut dyn UserInterface,
    descriptor: &'a CommandDescriptor,
    pub(crate) state: &'a mut CommandState,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        runtime: Runtime<'a>,
        ui: &'a mut dyn UserInterface,
        descriptor: &'a CommandDescriptor,
        state: &'a mut CommandState,
    ) -> Self {
        Self {
            runtime,
            ui,
            descriptor,
            state,
        }
    }

    pub fn ui(&mut self) -> &mut dyn UserInterface {
        &mut *self.ui
    }

    pub fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.ui.prompt(prompt)
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        self.descriptor
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.state.exit_code
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.state.exit_code = Some(code);
    }

    /// The error recorded by an earlier phase, visible from `completed`.
    pub fn error(&self) -> Option<&anyhow::Error> {
        self.state.error.as_ref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.state.result.as_ref()
    }

    pub fn set_result(&mut self, result: Value) {
        self.state.result = Some(result);
    }

    /// Ask the kernel to terminate once this command finishes.
    ///
    /// Only honoured for the main command.
    pub fn terminate(&mut self) {
        self.state.termination_requested = true;
    }

    pub fn registry(&self) -> &Registry {
        self.runtime.registry()
    }

    pub fn global_flags(&self) -> &[FlagSpec] {
        self.runtime.global_flags()
    }

    pub fn binary_name(&self) -> &str {
        self.runtime.binary_name()
    }

    pub fn runtime(&self) -> Runtime<'a> {
        self.runtime
    }

    /// Run another command the way `Kernel::exec` does.
    ///
    /// Failures propagate to the caller instead of being rendered.
    pub fn exec(&mut self, name: &str, argv: &[String]) -> Result<CommandInstance> {
        let runtime = self.runtime;
        runtime.exec(name, argv, &mut *self.ui)
    }
}
