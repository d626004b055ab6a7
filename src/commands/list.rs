//! The `list` command.
//!
//! Lists registered commands grouped by namespace. Root commands come
//! first, then each namespace alphabetically, then the global options.

use serde_json::Value;

use crate::command::{Command, CommandContext, CommandDefinition};
use crate::descriptor::{ArgumentSpec, CommandDescriptor, CommandInput, CommandOptions, FlagSpec};
use crate::error::Result;
use crate::registry::Registry;
use crate::ui::formatters::{align_rows, flag_description, flag_usage};
use crate::ui::Theme;

/// View the list of available commands.
#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    namespaces: Vec<String>,
    json: bool,
}

impl ListCommand {
    pub const NAME: &'static str = "list";
}

impl CommandDefinition for ListCommand {
    fn descriptor() -> Result<CommandDescriptor> {
        let mut descriptor = CommandDescriptor::new(Self::NAME)
            .with_description("View list of available commands")
            .with_help("The list command displays all the commands registered by the application.")
            .with_help("Pass one or more namespaces to only display the commands inside them.")
            .with_options(CommandOptions {
                allow_unknown_flags: true,
                ..Default::default()
            });
        descriptor
            .define_argument(
                ArgumentSpec::spread("namespaces").description("Filter list by namespace"),
            )?
            .define_flag(FlagSpec::boolean("json").description("Get list of commands as JSON"))?;
        Ok(descriptor)
    }

    fn from_input(input: &CommandInput) -> anyhow::Result<Self> {
        Ok(Self {
            namespaces: input.spread("namespaces").to_vec(),
            json: input.flag_bool("json"),
        })
    }
}

impl Command for ListCommand {
    fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
        let runtime = ctx.runtime();
        let registry = runtime.registry();

        for namespace in &self.namespaces {
            if !registry.has_namespace(namespace) {
                let ui = ctx.ui();
                ui.error(&format!("Namespace \"{}\" is not defined", namespace));
                let suggestions = registry.suggest_namespaces(namespace);
                if !suggestions.is_empty() {
                    ui.hint(&format!("Did you mean: {}", suggestions.join(", ")));
                }
                ctx.set_exit_code(1);
                return Ok(Value::Null);
            }
        }

        let groups = self.groups(registry);
        tracing::debug!(groups = groups.len(), "listing commands");

        if self.json {
            let descriptors: Vec<&CommandDescriptor> =
                groups.iter().flat_map(|(_, commands)| commands.iter().copied()).collect();
            let value = serde_json::to_value(&descriptors)?;
            ctx.ui().message(&serde_json::to_string_pretty(&value)?);
            return Ok(value);
        }

        let theme = ctx.ui().theme().clone();
        let mut lines = Vec::new();
        for (title, commands) in &groups {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(theme.format_heading(title));
            let rows: Vec<(String, String)> = commands
                .iter()
                .map(|d| (command_label(registry, d), d.description().to_string()))
                .collect();
            lines.extend(align_rows(&rows, &theme.command, 2));
        }

        if self.namespaces.is_empty() {
            lines.extend(options_section(&theme, runtime.global_flags()));
        }

        let ui = ctx.ui();
        for line in lines {
            ui.message(&line);
        }
        Ok(Value::Null)
    }
}

impl ListCommand {
    /// Selected groups as `(title, commands)` pairs, skipping empty ones.
    fn groups<'r>(&self, registry: &'r Registry) -> Vec<(String, Vec<&'r CommandDescriptor>)> {
        let mut groups = Vec::new();
        if self.namespaces.is_empty() {
            groups.push((
                "Available commands".to_string(),
                registry.namespace_commands(None),
            ));
            for namespace in registry.namespaces() {
                groups.push((
                    namespace.to_string(),
                    registry.namespace_commands(Some(namespace)),
                ));
            }
        } else {
            for namespace in &self.namespaces {
                groups.push((
                    namespace.clone(),
                    registry.namespace_commands(Some(namespace)),
                ));
            }
        }
        groups.retain(|(_, commands)| !commands.is_empty());
        groups
    }
}

fn command_label(registry: &Registry, descriptor: &CommandDescriptor) -> String {
    let aliases = registry.command_aliases(descriptor.command_name());
    if aliases.is_empty() {
        descriptor.command_name().to_string()
    } else {
        format!("{} ({})", descriptor.command_name(), aliases.join(", "))
    }
}

fn options_section(theme: &Theme, flags: &[FlagSpec]) -> Vec<String> {
    if flags.is_empty() {
        return Vec::new();
    }
    let rows: Vec<(String, String)> = flags
        .iter()
        .map(|f| (flag_usage(f), flag_description(f)))
        .collect();
    let mut lines = vec![String::new(), theme.format_heading("Options")];
    lines.extend(align_rows(&rows, &theme.option, 2));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{CommandConstructor, ListLoader};
    use crate::ui::MockUI;
    use crate::Kernel;

    struct Noop;

    impl Command for Noop {
        fn run(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    fn noop(descriptor: CommandDescriptor) -> CommandConstructor {
        CommandConstructor::new(descriptor, |_| Ok(Box::new(Noop) as Box<dyn Command>)).unwrap()
    }

    fn kernel() -> Kernel {
        let mut kernel = Kernel::new();
        kernel
            .add_loader(ListLoader::new(vec![
                noop(CommandDescriptor::new("serve").with_description("Start the server")),
                noop(
                    CommandDescriptor::new("make:controller")
                        .with_description("Create a new controller")
                        .with_alias("mc"),
                ),
                noop(CommandDescriptor::new("db:seed")),
            ]))
            .unwrap()
            .define_flag(FlagSpec::boolean("help").alias("h").description("Display help"))
            .unwrap();
        kernel
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lists_root_commands_then_namespaces() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        let code = kernel.handle(&argv(&["list"]), &mut ui).unwrap();

        assert_eq!(code, 0);
        let output = ui.output();
        let root = output.find("Available commands:").unwrap();
        let db = output.find("db:").unwrap();
        let make = output.find("make:").unwrap();
        assert!(root < db && db < make);
        assert!(output.contains("make:controller (mc)"));
        assert!(output.contains("Start the server"));
        assert!(output.contains("Options:"));
        assert!(output.contains("-h, --help"));
    }

    #[test]
    fn filters_by_namespace() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        let code = kernel.handle(&argv(&["list", "make"]), &mut ui).unwrap();

        assert_eq!(code, 0);
        assert!(ui.has_message("make:controller"));
        assert!(!ui.has_message("serve"));
        assert!(!ui.has_message("Options:"));
    }

    #[test]
    fn unknown_namespace_fails_with_suggestion() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        let code = kernel.handle(&argv(&["list", "mak"]), &mut ui).unwrap();

        assert_eq!(code, 1);
        assert!(ui.has_error("Namespace \"mak\" is not defined"));
        assert!(ui.has_hint("make"));
    }

    #[test]
    fn json_output_contains_selected_descriptors() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        kernel.handle(&argv(&["list", "make", "--json"]), &mut ui).unwrap();

        let value: Value = serde_json::from_str(&ui.output()).unwrap();
        let names: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["make:controller"]);
    }
}
