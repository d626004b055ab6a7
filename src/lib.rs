//! Commandeer - a modular command-line kernel.
//!
//! Applications declare commands as independent units (name, aliases,
//! namespace, typed arguments and flags) and hand them to a [`Kernel`],
//! which resolves, validates and runs them through a fixed lifecycle.
//!
//! # Modules
//!
//! - [`command`] - The command lifecycle and runtime context
//! - [`commands`] - Built-in `list` and `help` commands
//! - [`descriptor`] - Command declarations and input validation
//! - [`error`] - Error types and result aliases
//! - [`hooks`] - Observer callbacks around resolution and execution
//! - [`kernel`] - The orchestrator and its state machine
//! - [`loader`] - Command sources (static lists, manifest directories)
//! - [`parser`] - Argv tokenizing
//! - [`registry`] - Name and alias resolution, listing, suggestions
//! - [`ui`] - Terminal output, prompts and help formatting
//!
//! # Example
//!
//! ```
//! use commandeer::command::{Command, CommandContext, CommandDefinition};
//! use commandeer::descriptor::{ArgumentSpec, CommandDescriptor, CommandInput};
//! use commandeer::ui::MockUI;
//! use commandeer::{Kernel, ListLoader};
//! use serde_json::Value;
//!
//! struct Greet {
//!     name: String,
//! }
//!
//! impl Command for Greet {
//!     fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
//!         ctx.ui().message(&format!("Hello {}", self.name));
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
//!
//! let mut kernel = Kernel::new();
//! kernel.add_loader(ListLoader::default().with::<Greet>()?)?;
//!
//! let mut ui = MockUI::new();
//! let code = kernel.handle(&["greet".to_string(), "world".to_string()], &mut ui)?;
//!
//! assert_eq!(code, 0);
//! assert!(ui.has_message("Hello world"));
//! # Ok::<(), commandeer::CliError>(())
//! ```

pub mod command;
pub mod commands;
pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod kernel;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod ui;

pub use command::{Command, CommandContext, CommandDefinition, CommandInstance};
pub use descriptor::{ArgumentSpec, CommandDescriptor, CommandInput, FlagSpec};
pub use error::{CliError, Result};
pub use hooks::{HookPhase, HookPipeline};
pub use kernel::{Kernel, KernelState, ListenerContext, ListenerOutcome};
pub use loader::{CommandConstructor, FsLoader, ListLoader, Loader};
pub use registry::Registry;
