//! Command discovery from manifest files on disk.
//!
//! Every `.json`, `.yml` or `.yaml` file below the root is a command module:
//!
//! ```yaml
//! handler: make-controller
//! command:
//!   name: make:controller
//!   description: Create a new HTTP controller
//!   args:
//!     - name: name
//!       type: string
//! ```
//!
//! `handler` names the factory (registered on the loader) that builds the
//! runnable command; `command` is the serialized descriptor. The file's
//! location never contributes to the command name.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::command::{Command, CommandDefinition};
use crate::descriptor::{CommandDescriptor, CommandInput, DescriptorManifest};
use crate::error::{CliError, Result};

use super::{CommandConstructor, CommandFactory, Loader};

const MODULE_EXTENSIONS: &[&str] = &["json", "yml", "yaml"];

#[derive(Debug, Deserialize)]
struct CommandModule {
    handler: Option<String>,
    command: Option<DescriptorManifest>,
}

/// Discovers command manifests under a root directory.
pub struct FsLoader {
    root: PathBuf,
    exclude: Vec<String>,
    handlers: HashMap<String, CommandFactory>,
    discovered: HashMap<String, CommandConstructor>,
}

impl fmt::Debug for FsLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<_> = self.handlers.keys().collect();
        handlers.sort();
        f.debug_struct("FsLoader")
            .field("root", &self.root)
            .field("exclude", &self.exclude)
            .field("handlers", &handlers)
            .field("discovered", &self.discovered.len())
            .finish()
    }
}

impl FsLoader {
    /// Discover modules under `root`. `commands.json` is excluded by default.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: vec!["commands.json".to_string()],
            handlers: HashMap::new(),
            discovered: HashMap::new(),
        }
    }

    /// Skip files with this exact file name.
    pub fn exclude(mut self, file_name: impl Into<String>) -> Self {
        self.exclude.push(file_name.into());
        self
    }

    /// Register a factory modules can name as their handler.
    pub fn handler<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&CommandInput) -> anyhow::Result<Box<dyn Command>> + 'static,
    {
        self.handlers.insert(key.into(), Arc::new(factory));
        self
    }

    /// Register a command type as a handler.
    pub fn handler_for<T: CommandDefinition>(self, key: impl Into<String>) -> Self {
        self.handler(
            key,
            |input: &CommandInput| -> anyhow::Result<Box<dyn Command>> {
                Ok(Box::new(T::from_input(input)?))
            },
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_module(&self, path: &Path) -> bool {
        let excluded = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.exclude.iter().any(|e| e == n))
            .unwrap_or(true);
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| MODULE_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        supported && !excluded
    }

    fn load_module(&self, path: &Path) -> Result<CommandConstructor> {
        let content = fs::read_to_string(path)?;
        let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
        let module: CommandModule = if is_json {
            serde_json::from_str(&content).map_err(|e| invalid_module(path, e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| invalid_module(path, e.to_string()))?
        };

        let handler = module
            .handler
            .ok_or_else(|| invalid_module(path, "missing \"handler\" export"))?;
        let factory = self
            .handlers
            .get(&handler)
            .cloned()
            .ok_or_else(|| invalid_module(path, format!("unknown handler \"{}\"", handler)))?;
        let manifest = module
            .command
            .ok_or_else(|| invalid_module(path, "missing \"command\" definition"))?;
        let descriptor =
            CommandDescriptor::try_from(manifest).map_err(|e| invalid_module(path, e.to_string()))?;

        CommandConstructor::from_parts(&path.display().to_string(), descriptor, factory)
    }
}

impl Loader for FsLoader {
    fn descriptors(&mut self) -> Result<Vec<CommandDescriptor>> {
        if !self.root.is_dir() {
            return Err(invalid_module(&self.root, "commands directory does not exist"));
        }

        let mut files = Vec::new();
        collect_files(&self.root, &mut files)?;
        files.sort();

        let mut discovered = HashMap::new();
        let mut descriptors = Vec::new();
        for path in files.iter().filter(|p| self.is_module(p)) {
            let constructor = self.load_module(path)?;
            tracing::debug!(
                path = %path.display(),
                command = constructor.command_name(),
                "discovered command"
            );
            descriptors.push(constructor.descriptor().as_ref().clone());
            discovered.insert(constructor.command_name().to_string(), constructor);
        }

        self.discovered = discovered;
        Ok(descriptors)
    }

    fn command(&self, descriptor: &CommandDescriptor) -> Result<Option<CommandConstructor>> {
        Ok(self.discovered.get(descriptor.command_name()).cloned())
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn invalid_module(path: &Path, reason: impl Into<String>) -> CliError {
    CliError::InvalidCommandModule {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
