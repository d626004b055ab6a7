//! Registry entries, alias table and resolution.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::descriptor::CommandDescriptor;
use crate::error::{CliError, Result};
use crate::hooks::HookPipeline;
use crate::loader::{CommandConstructor, Loader};

use super::suggest;

#[derive(Debug, Clone)]
struct RegistryEntry {
    descriptor: Arc<CommandDescriptor>,
    loader: usize,
}

/// Every known command, keyed by command name.
///
/// Registration is last-writer-wins for both command names and aliases.
/// After boot the registry is only read.
#[derive(Default)]
pub struct Registry {
    loaders: Vec<Box<dyn Loader>>,
    commands: HashMap<String, RegistryEntry>,
    aliases: HashMap<String, String>,
    namespaces: BTreeSet<String>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("loaders", &self.loaders.len())
            .field("commands", &self.command_names())
            .field("aliases", &self.aliases)
            .field("namespaces", &self.namespaces)
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a loader and register every descriptor it provides.
    ///
    /// A loader whose descriptors fail to load is still kept, without
    /// commands, so [`Registry::into_loaders`] can hand it back.
    pub fn add_loader(&mut self, loader: Box<dyn Loader>) -> Result<()> {
        let index = self.loaders.len();
        self.loaders.push(loader);
        let descriptors = self.loaders[index].descriptors()?;
        tracing::debug!(loader = index, commands = descriptors.len(), "ingesting loader");

        for descriptor in descriptors {
            self.register(descriptor, index)?;
        }
        Ok(())
    }

    /// Give up the registry, returning its loaders in ingestion order.
    pub fn into_loaders(self) -> Vec<Box<dyn Loader>> {
        self.loaders
    }

    /// Store a descriptor owned by the loader at `loader`.
    ///
    /// A previous entry with the same name is discarded together with the
    /// aliases it declared.
    fn register(&mut self, descriptor: CommandDescriptor, loader: usize) -> Result<()> {
        let name = descriptor.command_name().to_string();
        if name.is_empty() {
            return Err(CliError::MissingCommandName {
                command: format!("loader #{}", loader),
            });
        }

        if let Some(previous) = self.commands.remove(&name) {
            tracing::debug!(command = %name, "replacing previously registered command");
            for alias in previous.descriptor.aliases() {
                if self.aliases.get(alias) == Some(&name) {
                    self.aliases.remove(alias);
                }
            }
        }

        for alias in descriptor.aliases() {
            self.aliases.insert(alias.clone(), name.clone());
        }
        if let Some(namespace) = descriptor.namespace() {
            self.namespaces.insert(namespace.to_string());
        }

        self.commands.insert(
            name,
            RegistryEntry {
                descriptor: Arc::new(descriptor),
                loader,
            },
        );
        Ok(())
    }

    /// Resolve a command name or alias to a constructor.
    ///
    /// Aliases are dereferenced first, so an alias shadows a command of the
    /// same name. Runs the `finding`, `loading` and `loaded` hooks.
    pub fn resolve(&self, name: &str, hooks: &HookPipeline) -> Result<CommandConstructor> {
        let command_name = self.canonical_name(name);
        let entry = self
            .commands
            .get(command_name)
            .ok_or_else(|| self.not_found(name))?;
        tracing::debug!(requested = name, command = command_name, "resolving command");

        hooks.run_finding(command_name)?;
        hooks.run_loading(&entry.descriptor)?;

        let constructor = match self.loaders.get(entry.loader) {
            Some(loader) => loader.command(&entry.descriptor)?,
            None => None,
        }
        .ok_or_else(|| self.not_found(name))?;

        hooks.run_loaded(&constructor)?;
        Ok(constructor)
    }

    fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    fn not_found(&self, name: &str) -> CliError {
        CliError::CommandNotFound {
            name: name.to_string(),
            suggestions: self.suggest_commands(name),
        }
    }

    /// Whether a name or alias is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(self.canonical_name(name))
    }

    /// Descriptor for a name or alias.
    pub fn descriptor(&self, name: &str) -> Option<&Arc<CommandDescriptor>> {
        self.commands
            .get(self.canonical_name(name))
            .map(|entry| &entry.descriptor)
    }

    /// All descriptors, sorted by command name.
    pub fn commands(&self) -> Vec<&CommandDescriptor> {
        let mut descriptors: Vec<_> = self
            .commands
            .values()
            .map(|entry| entry.descriptor.as_ref())
            .collect();
        descriptors.sort_by(|a, b| a.command_name().cmp(b.command_name()));
        descriptors
    }

    /// Sorted command names.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands().into_iter().map(|d| d.command_name()).collect()
    }

    /// Descriptors in `namespace`, or those without a namespace for `None`.
    pub fn namespace_commands(&self, namespace: Option<&str>) -> Vec<&CommandDescriptor> {
        self.commands()
            .into_iter()
            .filter(|d| d.namespace() == namespace)
            .collect()
    }

    /// Known namespaces in alphabetical order.
    pub fn namespaces(&self) -> Vec<&str> {
        self.namespaces.iter().map(String::as_str).collect()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// The alias table, alias to command name.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Aliases currently pointing at `command_name`, sorted.
    pub fn command_aliases(&self, command_name: &str) -> Vec<&str> {
        let mut aliases: Vec<_> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == command_name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Suggestions for a mistyped command name.
    ///
    /// A keyword naming a namespace suggests every command in it.
    pub fn suggest_commands(&self, keyword: &str) -> Vec<String> {
        if self.namespaces.contains(keyword) {
            return self
                .namespace_commands(Some(keyword))
                .into_iter()
                .map(|d| d.command_name().to_string())
                .collect();
        }

        let candidates = self
            .commands
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str);
        suggest::rank(keyword, candidates)
    }

    /// Suggestions for a mistyped namespace.
    pub fn suggest_namespaces(&self, keyword: &str) -> Vec<String> {
        suggest::rank(keyword, self.namespaces.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandContext};
    use crate::hooks::HookPhase;
    use crate::loader::ListLoader;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Noop;

    impl Command for Noop {
        fn run(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    fn constructor(descriptor: CommandDescriptor) -> CommandConstructor {
        CommandConstructor::new(descriptor, |_| Ok(Box::new(Noop) as Box<dyn Command>)).unwrap()
    }

    fn loader(descriptors: Vec<CommandDescriptor>) -> Box<dyn Loader> {
        Box::new(ListLoader::new(
            descriptors.into_iter().map(constructor).collect(),
        ))
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_loader(loader(vec![
                CommandDescriptor::new("serve").with_description("Start the server"),
                CommandDescriptor::new("make:controller").with_alias("mc"),
                CommandDescriptor::new("make:model"),
                CommandDescriptor::new("db:seed"),
            ]))
            .unwrap();
        registry
    }

    #[test]
    fn resolves_by_name_and_alias() {
        let registry = registry();
        let hooks = HookPipeline::new();
        let by_name = registry.resolve("make:controller", &hooks).unwrap();
        let by_alias = registry.resolve("mc", &hooks).unwrap();
        assert_eq!(by_name.descriptor(), by_alias.descriptor());
    }

    #[test]
    fn alias_shadows_command_of_same_name() {
        let mut registry = registry();
        registry
            .add_loader(loader(vec![
                CommandDescriptor::new("build"),
                CommandDescriptor::new("compile").with_alias("build"),
            ]))
            .unwrap();
        let resolved = registry.resolve("build", &HookPipeline::new()).unwrap();
        assert_eq!(resolved.command_name(), "compile");
    }

    #[test]
    fn latest_alias_registration_wins() {
        let mut registry = registry();
        registry
            .add_loader(loader(vec![
                CommandDescriptor::new("make:command").with_alias("mc")
            ]))
            .unwrap();
        assert_eq!(registry.alias_target("mc"), Some("make:command"));
        let resolved = registry.resolve("mc", &HookPipeline::new()).unwrap();
        assert_eq!(resolved.command_name(), "make:command");
    }

    #[test]
    fn later_loader_replaces_command_entirely() {
        let mut registry = registry();
        registry
            .add_loader(loader(vec![
                CommandDescriptor::new("make:controller").with_description("v2")
            ]))
            .unwrap();

        let resolved = registry
            .resolve("make:controller", &HookPipeline::new())
            .unwrap();
        assert_eq!(resolved.descriptor().description(), "v2");
        assert!(registry.alias_target("mc").is_none());
        assert!(registry.command_aliases("make:controller").is_empty());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn not_found_carries_suggestions() {
        let err = registry()
            .resolve("make:controler", &HookPipeline::new())
            .unwrap_err();
        match err {
            CliError::CommandNotFound { name, suggestions } => {
                assert_eq!(name, "make:controler");
                assert_eq!(suggestions.first().map(String::as_str), Some("make:controller"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn namespace_keyword_suggests_its_commands() {
        assert_eq!(
            registry().suggest_commands("make"),
            vec!["make:controller", "make:model"]
        );
    }

    #[test]
    fn namespace_suggestions() {
        assert_eq!(registry().suggest_namespaces("mak"), vec!["make"]);
        assert!(registry().suggest_namespaces("zzz").is_empty());
    }

    #[test]
    fn lists_sorted_and_by_namespace() {
        let registry = registry();
        assert_eq!(
            registry.command_names(),
            vec!["db:seed", "make:controller", "make:model", "serve"]
        );

        let root: Vec<_> = registry
            .namespace_commands(None)
            .iter()
            .map(|d| d.command_name())
            .collect();
        assert_eq!(root, vec!["serve"]);

        let make: Vec<_> = registry
            .namespace_commands(Some("make"))
            .iter()
            .map(|d| d.command_name())
            .collect();
        assert_eq!(make, vec!["make:controller", "make:model"]);
        assert_eq!(registry.namespaces(), vec!["db", "make"]);
    }

    #[test]
    fn resolve_runs_hooks_in_phase_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = HookPipeline::new();
        let c = Rc::clone(&calls);
        hooks.on_finding(move |name| {
            c.borrow_mut().push(format!("finding:{}", name));
            Ok(())
        });
        let c = Rc::clone(&calls);
        hooks.on_loading(move |d| {
            c.borrow_mut().push(format!("loading:{}", d.command_name()));
            Ok(())
        });
        let c = Rc::clone(&calls);
        hooks.on_loaded(move |ctor| {
            c.borrow_mut().push(format!("loaded:{}", ctor.command_name()));
            Ok(())
        });

        registry().resolve("mc", &hooks).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![
                "finding:make:controller",
                "loading:make:controller",
                "loaded:make:controller"
            ]
        );
    }

    #[test]
    fn failing_hook_aborts_resolution() {
        let mut hooks = HookPipeline::new();
        hooks.on_loading(|_| anyhow::bail!("denied"));
        let err = registry().resolve("serve", &hooks).unwrap_err();
        assert!(matches!(
            err,
            CliError::HookFailed {
                phase: HookPhase::Loading,
                ..
            }
        ));
    }

    #[test]
    fn loader_returning_none_is_not_found() {
        struct Forgetful;

        impl Loader for Forgetful {
            fn descriptors(&mut self) -> Result<Vec<CommandDescriptor>> {
                Ok(vec![CommandDescriptor::new("ghost")])
            }

            fn command(&self, _: &CommandDescriptor) -> Result<Option<CommandConstructor>> {
                Ok(None)
            }
        }

        let mut registry = Registry::new();
        registry.add_loader(Box::new(Forgetful)).unwrap();
        assert!(registry.contains("ghost"));
        assert!(matches!(
            registry.resolve("ghost", &HookPipeline::new()),
            Err(CliError::CommandNotFound { .. })
        ));
    }
}
