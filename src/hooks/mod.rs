//! Lifecycle hooks.
//!
//! Six phases can be observed: `finding`, `loading` and `loaded` while a
//! command is resolved, `executing` and `executed` around every run, and
//! `terminating` once when the kernel shuts down. Callbacks run in
//! registration order. The first failing callback aborts the operation in
//! progress and surfaces as [`CliError::HookFailed`].

use std::fmt;

use crate::command::CommandInstance;
use crate::descriptor::CommandDescriptor;
use crate::error::{CliError, Result};
use crate::loader::CommandConstructor;

/// A lifecycle point hooks can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Finding,
    Loading,
    Loaded,
    Executing,
    Executed,
    Terminating,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Finding => "finding",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Executing => "executing",
            Self::Executed => "executed",
            Self::Terminating => "terminating",
        };
        f.write_str(name)
    }
}

type FindingHook = Box<dyn Fn(&str) -> anyhow::Result<()>>;
type LoadingHook = Box<dyn Fn(&CommandDescriptor) -> anyhow::Result<()>>;
type LoadedHook = Box<dyn Fn(&CommandConstructor) -> anyhow::Result<()>>;
type ExecutionHook = Box<dyn Fn(&CommandInstance, bool) -> anyhow::Result<()>>;
type TerminatingHook = Box<dyn Fn(Option<&CommandInstance>) -> anyhow::Result<()>>;

/// Ordered callbacks for every [`HookPhase`].
#[derive(Default)]
pub struct HookPipeline {
    finding: Vec<FindingHook>,
    loading: Vec<LoadingHook>,
    loaded: Vec<LoadedHook>,
    executing: Vec<ExecutionHook>,
    executed: Vec<ExecutionHook>,
    terminating: Vec<TerminatingHook>,
}

impl fmt::Debug for HookPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookPipeline")
            .field("finding", &self.finding.len())
            .field("loading", &self.loading.len())
            .field("loaded", &self.loaded.len())
            .field("executing", &self.executing.len())
            .field("executed", &self.executed.len())
            .field("terminating", &self.terminating.len())
            .finish()
    }
}

impl HookPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the requested name before registry lookup.
    pub fn on_finding<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str) -> anyhow::Result<()> + 'static,
    {
        self.finding.push(Box::new(hook));
        self
    }

    /// Called with the resolved descriptor before its loader is asked for it.
    pub fn on_loading<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&CommandDescriptor) -> anyhow::Result<()> + 'static,
    {
        self.loading.push(Box::new(hook));
        self
    }

    /// Called with the constructor a loader produced.
    pub fn on_loaded<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&CommandConstructor) -> anyhow::Result<()> + 'static,
    {
        self.loaded.push(Box::new(hook));
        self
    }

    /// Called before a command runs. The flag tells main from nested runs.
    pub fn on_executing<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&CommandInstance, bool) -> anyhow::Result<()> + 'static,
    {
        self.executing.push(Box::new(hook));
        self
    }

    /// Called after a command's lifecycle finished, whatever its outcome.
    pub fn on_executed<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&CommandInstance, bool) -> anyhow::Result<()> + 'static,
    {
        self.executed.push(Box::new(hook));
        self
    }

    /// Called once when the kernel terminates, with the main command if any.
    pub fn on_terminating<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Option<&CommandInstance>) -> anyhow::Result<()> + 'static,
    {
        self.terminating.push(Box::new(hook));
        self
    }

    pub fn run_finding(&self, name: &str) -> Result<()> {
        run_all(HookPhase::Finding, &self.finding, |hook| hook(name))
    }

    pub fn run_loading(&self, descriptor: &CommandDescriptor) -> Result<()> {
        run_all(HookPhase::Loading, &self.loading, |hook| hook(descriptor))
    }

    pub fn run_loaded(&self, constructor: &CommandConstructor) -> Result<()> {
        run_all(HookPhase::Loaded, &self.loaded, |hook| hook(constructor))
    }

    pub fn run_executing(&self, command: &CommandInstance, is_main: bool) -> Result<()> {
        run_all(HookPhase::Executing, &self.executing, |hook| {
            hook(command, is_main)
        })
    }

    pub fn run_executed(&self, command: &CommandInstance, is_main: bool) -> Result<()> {
        run_all(HookPhase::Executed, &self.executed, |hook| {
            hook(command, is_main)
        })
    }

    pub fn run_terminating(&self, command: Option<&CommandInstance>) -> Result<()> {
        run_all(HookPhase::Terminating, &self.terminating, |hook| hook(command))
    }

    /// Number of callbacks registered for a phase.
    pub fn len(&self, phase: HookPhase) -> usize {
        match phase {
            HookPhase::Finding => self.finding.len(),
            HookPhase::Loading => self.loading.len(),
            HookPhase::Loaded => self.loaded.len(),
            HookPhase::Executing => self.executing.len(),
            HookPhase::Executed => self.executed.len(),
            HookPhase::Terminating => self.terminating.len(),
        }
    }
}

fn run_all<H, F>(phase: HookPhase, hooks: &[H], mut call: F) -> Result<()>
where
    F: FnMut(&H) -> anyhow::Result<()>,
{
    for hook in hooks {
        if let Err(source) = call(hook) {
            tracing::debug!(%phase, error = %source, "hook failed");
            return Err(CliError::HookFailed { phase, source });
        }
    }
    Ok(())
}
