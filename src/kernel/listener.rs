//! Global option listeners.
//!
//! A listener is bound to a global flag and runs when that flag is present
//! in the parsed input, before the command itself is validated. Returning
//! [`ListenerOutcome::ShortCircuit`] stops further listeners and terminates
//! the kernel without running the command.

use crate::descriptor::{CommandDescriptor, FlagValue, ParsedInput};
use crate::registry::Registry;
use crate::ui::UserInterface;

use super::Runtime;

/// What the kernel does after a listener returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOutcome {
    Continue,
    ShortCircuit,
}

pub(crate) type OptionListener =
    Box<dyn Fn(&mut ListenerContext<'_>) -> anyhow::Result<ListenerOutcome>>;

/// Handle passed to an option listener.
pub struct ListenerContext<'a> {
    runtime: Runtime<'a>,
    ui: &'a mut dyn UserInterface,
    descriptor: &'a CommandDescriptor,
    parsed: &'a ParsedInput,
    exit_code: &'a mut Option<i32>,
}

impl<'a> ListenerContext<'a> {
    pub(crate) fn new(
        runtime: Runtime<'a>,
        ui: &'a mut dyn UserInterface,
        descriptor: &'a CommandDescriptor,
        parsed: &'a ParsedInput,
        exit_code: &'a mut Option<i32>,
    ) -> Self {
        Self {
            runtime,
            ui,
            descriptor,
            parsed,
            exit_code,
        }
    }

    pub fn ui(&mut self) -> &mut dyn UserInterface {
        &mut *self.ui
    }

    /// Descriptor of the command about to run.
    pub fn descriptor(&self) -> &'a CommandDescriptor {
        self.descriptor
    }

    pub fn parsed(&self) -> &ParsedInput {
        self.parsed
    }

    pub fn flag(&self, flag_name: &str) -> Option<&FlagValue> {
        self.parsed.flag(flag_name)
    }

    pub fn registry(&self) -> &Registry {
        self.runtime.registry()
    }

    pub fn runtime(&self) -> Runtime<'a> {
        self.runtime
    }

    /// Set the kernel's exit code.
    pub fn set_exit_code(&mut self, code: i32) {
        *self.exit_code = Some(code);
    }
}
