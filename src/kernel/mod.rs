//! The orchestrator.
//!
//! A [`Kernel`] owns the registry, the hook pipeline and the global flags,
//! and moves through four states: idle, booted, running, terminated.
//! Configuration is only accepted while idle. [`Kernel::exec`] runs a
//! command programmatically; [`Kernel::handle`] runs the single main command
//! of a process and returns its exit code.
//!
//! # Example
//!
//! ```
//! use commandeer::{Kernel, ui::MockUI};
//!
//! let mut kernel = Kernel::new();
//! let mut ui = MockUI::new();
//!
//! // No arguments runs the default `list` command
//! let code = kernel.handle(&[], &mut ui)?;
//! assert_eq!(code, 0);
//! assert!(ui.has_message("list"));
//! # Ok::<(), commandeer::CliError>(())
//! ```

pub mod executor;
pub mod listener;
pub mod runtime;
pub mod state;

pub use executor::{CommandExecutor, DefaultExecutor};
pub use listener::{ListenerContext, ListenerOutcome};
pub use runtime::Runtime;
pub use state::KernelState;

use std::fmt;

use crate::command::{CommandInstance, InstanceId};
use crate::commands::ListCommand;
use crate::descriptor::{validate, CommandDescriptor, CommandOptions, FlagSpec};
use crate::error::{CliError, Result};
use crate::hooks::HookPipeline;
use crate::loader::{CommandConstructor, ListLoader, Loader};
use crate::parser::{ClapParser, InputParser, ParserOptions};
use crate::registry::Registry;
use crate::ui::UserInterface;

use listener::OptionListener;

const DEFAULT_BINARY_NAME: &str = "commandeer";

/// Top-level command dispatcher.
pub struct Kernel {
    state: KernelState,
    pending_loaders: Vec<Box<dyn Loader>>,
    registry: Registry,
    hooks: HookPipeline,
    parser: Box<dyn InputParser>,
    executor: Box<dyn CommandExecutor>,
    global_flags: Vec<FlagSpec>,
    binary_name: String,
    default_command: Option<CommandConstructor>,
    listeners: Vec<(String, OptionListener)>,
    exit_code: Option<i32>,
    main_id: Option<InstanceId>,
    main_command: Option<CommandInstance>,
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: Vec<_> = self.listeners.iter().map(|(flag, _)| flag).collect();
        f.debug_struct("Kernel")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("hooks", &self.hooks)
            .field("global_flags", &self.global_flags)
            .field("binary_name", &self.binary_name)
            .field("listeners", &listeners)
            .field("exit_code", &self.exit_code)
            .field("main_command", &self.main_command)
            .finish_non_exhaustive()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

enum MainOutcome {
    ShortCircuit,
    Ran,
}

impl Kernel {
    /// An idle kernel with `list` as default command and the clap parser.
    pub fn new() -> Self {
        Self {
            state: KernelState::Idle,
            pending_loaders: Vec::new(),
            registry: Registry::new(),
            hooks: HookPipeline::new(),
            parser: Box::new(ClapParser::new()),
            executor: Box::new(DefaultExecutor),
            global_flags: Vec::new(),
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            default_command: None,
            listeners: Vec::new(),
            exit_code: None,
            main_id: None,
            main_command: None,
        }
    }

    fn ensure_idle(&self, action: &str) -> Result<()> {
        if self.state == KernelState::Idle {
            Ok(())
        } else {
            Err(CliError::invalid_state(self.state, action))
        }
    }

    /// Declare a flag accepted by every main command.
    pub fn define_flag(&mut self, mut spec: FlagSpec) -> Result<&mut Self> {
        self.ensure_idle("define flag")?;
        spec.flag_name = spec.token();
        if spec.kind.is_none() {
            return Err(CliError::invalid_descriptor(
                "global",
                format!("flag \"{}\" must declare a type", spec.flag_name),
            ));
        }

        match self
            .global_flags
            .iter_mut()
            .find(|existing| existing.flag_name == spec.flag_name)
        {
            Some(existing) => *existing = spec,
            None => self.global_flags.push(spec),
        }
        Ok(self)
    }

    /// Register a loader. Loaders are ingested at boot in this order.
    pub fn add_loader(&mut self, loader: impl Loader + 'static) -> Result<&mut Self> {
        self.ensure_idle("add loader")?;
        self.pending_loaders.push(Box::new(loader));
        Ok(self)
    }

    /// Command run when no command name is given.
    pub fn set_default_command(&mut self, constructor: CommandConstructor) -> Result<&mut Self> {
        self.ensure_idle("set default command")?;
        self.default_command = Some(constructor);
        Ok(self)
    }

    pub fn set_executor(&mut self, executor: impl CommandExecutor + 'static) -> Result<&mut Self> {
        self.ensure_idle("set executor")?;
        self.executor = Box::new(executor);
        Ok(self)
    }

    pub fn set_parser(&mut self, parser: impl InputParser + 'static) -> Result<&mut Self> {
        self.ensure_idle("set parser")?;
        self.parser = Box::new(parser);
        Ok(self)
    }

    /// Bind a listener to a global flag.
    pub fn on<F>(&mut self, flag_name: &str, listener: F) -> Result<&mut Self>
    where
        F: Fn(&mut ListenerContext<'_>) -> anyhow::Result<ListenerOutcome> + 'static,
    {
        self.ensure_idle("register listener")?;
        self.listeners.push((flag_name.to_string(), Box::new(listener)));
        Ok(self)
    }

    /// Program name shown in usage lines.
    pub fn set_binary_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.ensure_idle("set binary name")?;
        self.binary_name = name.into();
        Ok(self)
    }

    /// Hooks can be registered in any state.
    pub fn hooks_mut(&mut self) -> &mut HookPipeline {
        &mut self.hooks
    }

    pub fn state(&self) -> KernelState {
        self.state
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.global_flags
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// The configured default command, if one was set explicitly.
    pub fn default_command(&self) -> Option<&CommandConstructor> {
        self.default_command.as_ref()
    }

    pub fn main_command(&self) -> Option<&CommandInstance> {
        self.main_command.as_ref()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    pub(crate) fn runtime(&self) -> Runtime<'_> {
        Runtime::new(
            &self.registry,
            &self.hooks,
            &*self.parser,
            &*self.executor,
            &self.global_flags,
            &self.binary_name,
        )
    }

    /// Load descriptors from every loader. A no-op unless idle.
    ///
    /// The default command is served by a loader placed before all others,
    /// so registered commands may replace it. Loaders are ingested into a
    /// fresh registry first: if any of them fails the kernel stays idle with
    /// its loaders and registry untouched, and `boot` may be retried.
    pub fn boot(&mut self) -> Result<()> {
        if self.state != KernelState::Idle {
            return Ok(());
        }

        let default_command = match self.default_command.clone() {
            Some(constructor) => constructor,
            None => CommandConstructor::of::<ListCommand>()?,
        };
        let default_loader: Box<dyn Loader> = Box::new(ListLoader::new(vec![default_command]));
        tracing::debug!(loaders = self.pending_loaders.len() + 1, "booting kernel");

        let mut staged = Registry::new();
        let mut pending = std::mem::take(&mut self.pending_loaders).into_iter();
        let ingested = std::iter::once(default_loader)
            .chain(pending.by_ref())
            .try_for_each(|loader| staged.add_loader(loader));

        if let Err(err) = ingested {
            tracing::debug!(error = %err, "boot failed, kernel stays idle");
            self.pending_loaders = staged
                .into_loaders()
                .into_iter()
                .skip(1)
                .chain(pending)
                .collect();
            return Err(err);
        }

        self.registry = staged;
        self.state = KernelState::Booted;
        Ok(())
    }

    /// Resolve a command, booting first if needed.
    pub fn find(&mut self, name: &str) -> Result<CommandConstructor> {
        self.boot()?;
        self.runtime().resolve(name)
    }

    /// Run a command outside of the main-command flow.
    ///
    /// Global flags are not accepted and failures are returned, not
    /// rendered. The kernel is never terminated on the command's behalf
    /// unless it is the tracked main command.
    pub fn exec(
        &mut self,
        name: &str,
        argv: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandInstance> {
        if self.state == KernelState::Terminated {
            return Err(CliError::KernelTerminated);
        }
        self.boot()?;

        let command = self.runtime().exec(name, argv, ui)?;
        if command.termination_requested() {
            self.terminate(Some(command.id()))?;
        }
        Ok(command)
    }

    /// Run the main command of the process and return the exit code.
    ///
    /// An empty argv or a first token starting with `-` runs the default
    /// command with the whole argv. Failures on this path are rendered
    /// through `ui` and turn into exit code 1.
    pub fn handle(&mut self, argv: &[String], ui: &mut dyn UserInterface) -> Result<i32> {
        match self.state {
            KernelState::Running => return Err(CliError::MultipleMainCommands),
            KernelState::Terminated => return Err(CliError::KernelTerminated),
            KernelState::Idle | KernelState::Booted => {}
        }

        self.boot()?;
        self.state = KernelState::Running;

        match self.run_main(argv, ui) {
            Ok(MainOutcome::ShortCircuit) => self.terminate(None)?,
            Ok(MainOutcome::Ran) => {
                let keep_alive = self
                    .main_command
                    .as_ref()
                    .map(|c| c.descriptor().options().stays_alive && !c.termination_requested())
                    .unwrap_or(false);
                if !keep_alive {
                    self.terminate(None)?;
                }
            }
            Err(err) => {
                self.exit_code = Some(1);
                render_error(&err, ui);
                self.terminate(None)?;
            }
        }

        Ok(self.current_exit_code())
    }

    fn run_main(&mut self, argv: &[String], ui: &mut dyn UserInterface) -> Result<MainOutcome> {
        let (name, rest) = match argv.split_first() {
            Some((first, rest)) if !first.starts_with('-') => (first.as_str(), rest),
            _ => (self.default_command_name(), argv),
        };
        let name = name.to_string();

        let Kernel {
            registry,
            hooks,
            parser,
            executor,
            global_flags,
            binary_name,
            listeners,
            exit_code,
            main_id,
            main_command,
            ..
        } = self;
        let runtime = Runtime::new(
            registry,
            hooks,
            &**parser,
            &**executor,
            global_flags,
            binary_name,
        );

        let constructor = runtime.resolve(&name)?;
        let descriptor = constructor.descriptor();
        let options = ParserOptions::for_command(descriptor).with_flags(global_flags);
        let parsed = parser.parse(rest, &options)?;

        validate(&global_descriptor(global_flags), &parsed)?;

        for (flag_name, listener) in listeners.iter() {
            if !parsed.has_flag(flag_name) {
                continue;
            }
            tracing::debug!(flag = %flag_name, "running option listener");
            let mut ctx =
                ListenerContext::new(runtime, &mut *ui, descriptor, &parsed, &mut *exit_code);
            let outcome = listener(&mut ctx).map_err(CliError::from_anyhow)?;
            if outcome == ListenerOutcome::ShortCircuit {
                tracing::debug!(flag = %flag_name, "listener short-circuited");
                return Ok(MainOutcome::ShortCircuit);
            }
        }

        let combined = descriptor.with_global_flags(global_flags);
        validate(&combined, &parsed)?;

        let command = executor.create(&constructor, &combined, parsed, true)?;
        *main_id = Some(command.id());
        let command = main_command.insert(command);
        tracing::debug!(
            command = command.command_name(),
            id = %command.id(),
            "executing main command"
        );

        hooks.run_executing(command, true)?;
        executor.run(command, runtime, ui)?;
        hooks.run_executed(command, true)?;
        Ok(MainOutcome::Ran)
    }

    fn default_command_name(&self) -> &str {
        self.default_command
            .as_ref()
            .map(CommandConstructor::command_name)
            .unwrap_or(ListCommand::NAME)
    }

    fn current_exit_code(&self) -> i32 {
        self.exit_code
            .or_else(|| self.main_command.as_ref().and_then(CommandInstance::exit_code))
            .unwrap_or(0)
    }

    /// Terminate the kernel.
    ///
    /// A no-op unless running. When a main command is tracked, only it (or
    /// `None`, meaning the main command) may terminate the kernel.
    pub fn terminate(&mut self, candidate: Option<InstanceId>) -> Result<()> {
        if self.state != KernelState::Running {
            return Ok(());
        }
        if let (Some(main), Some(candidate)) = (self.main_id, candidate) {
            if main != candidate {
                tracing::debug!(%candidate, "ignoring termination request from non-main command");
                return Ok(());
            }
        }

        self.hooks.run_terminating(self.main_command.as_ref())?;
        self.state = KernelState::Terminated;
        self.exit_code = Some(self.current_exit_code());
        tracing::debug!(exit_code = ?self.exit_code, "kernel terminated");
        Ok(())
    }
}

/// Descriptor declaring only the global flags, tolerant of everything else.
fn global_descriptor(global_flags: &[FlagSpec]) -> CommandDescriptor {
    CommandDescriptor::new("global")
        .with_options(CommandOptions {
            allow_unknown_flags: true,
            ..Default::default()
        })
        .with_global_flags(global_flags)
}

fn render_error(err: &CliError, ui: &mut dyn UserInterface) {
    match err {
        CliError::CommandNotFound { suggestions, .. } => {
            ui.error(&err.to_string());
            if !suggestions.is_empty() {
                ui.hint(&format!("Did you mean: {}", suggestions.join(", ")));
            }
        }
        CliError::Other(inner) => ui.fatal(inner),
        CliError::Io(_) => ui.fatal(&anyhow::anyhow!("{}", err)),
        _ => ui.error(&err.to_string()),
    }
}
