//! Runnable commands and their lifecycle.
//!
//! A command implements [`Command`]: optional `prepare`, `interact` and
//! `completed` phases around a required `run`. Types that carry their own
//! descriptor implement [`CommandDefinition`] as well, which lets loaders
//! build them from validated input.
//!
//! # Example
//!
//! ```
//! use commandeer::command::{Command, CommandContext, CommandDefinition};
//! use commandeer::descriptor::{ArgumentSpec, CommandDescriptor, CommandInput};
//! use serde_json::Value;
//!
//! struct Greet {
//!     name: String,
//! }
//!
//! impl Command for Greet {
//!     fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
//!         ctx.ui().success(&format!("Hello {}", self.name));
//!         Ok(Value::Null)
//!     }
//! }
//!
//! impl CommandDefinition for Greet {
//!     fn descriptor() -> commandeer::Result<CommandDescriptor> {
//!         let mut descriptor = CommandDescriptor::new("greet");
//!         descriptor.define_argument(ArgumentSpec::string("name"))?;
//!         Ok(descriptor)
//!     }
//!
//!     fn from_input(input: &CommandInput) -> anyhow::Result<Self> {
//!         Ok(Self {
//!             name: input.require_string("name")?.to_string(),
//!         })
//!     }
//! }
//! ```

pub mod context;
pub mod instance;

pub use context::CommandContext;
pub use instance::{CommandInstance, InstanceId};

use serde_json::Value;

use crate::descriptor::{CommandDescriptor, CommandInput};
use crate::error::Result;

/// Lifecycle of a runnable command.
///
/// Phases run in order: `prepare`, `interact`, `run`, then `completed`.
/// A failure in any of the first three is recorded on the instance and the
/// flow jumps to `completed`, which always runs.
pub trait Command {
    fn prepare(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn interact(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// The command body. A non-null return value becomes the result.
    fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value>;

    /// Final phase. Return `true` when a recorded error has already been
    /// reported, which suppresses the fatal dump.
    fn completed(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// A command type that declares its own descriptor.
pub trait CommandDefinition: Command + Sized + 'static {
    fn descriptor() -> Result<CommandDescriptor>;

    /// Build the command from validated, hydrated input.
    fn from_input(input: &CommandInput) -> anyhow::Result<Self>;
}
