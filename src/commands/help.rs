//! The `help` command and the help screen renderer.

use serde_json::Value;

use crate::command::{Command, CommandContext, CommandDefinition};
use crate::descriptor::{ArgumentSpec, CommandDescriptor, CommandInput};
use crate::error::{CliError, Result};
use crate::kernel::Runtime;
use crate::ui::formatters::{
    align_rows, argument_description, command_usage, flag_description, flag_usage,
};
use crate::ui::UserInterface;

/// View help for a given command.
#[derive(Debug, Clone)]
pub struct HelpCommand {
    name: String,
}

impl HelpCommand {
    pub const NAME: &'static str = "help";
}

impl CommandDefinition for HelpCommand {
    fn descriptor() -> Result<CommandDescriptor> {
        let mut descriptor =
            CommandDescriptor::new(Self::NAME).with_description("View help for a given command");
        descriptor.define_argument(ArgumentSpec::string("name").description("Command name"))?;
        Ok(descriptor)
    }

    fn from_input(input: &CommandInput) -> anyhow::Result<Self> {
        Ok(Self {
            name: input.require_string("name")?.to_string(),
        })
    }
}

impl Command for HelpCommand {
    fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
        let runtime = ctx.runtime();
        match runtime.registry().descriptor(&self.name) {
            Some(descriptor) => render_help(descriptor, runtime, ctx.ui()),
            None => {
                let err = CliError::CommandNotFound {
                    name: self.name.clone(),
                    suggestions: runtime.registry().suggest_commands(&self.name),
                };
                super::report_not_found(ctx.ui(), &err);
                ctx.set_exit_code(1);
            }
        }
        Ok(Value::Null)
    }
}

/// Render the help screen of a command.
///
/// Sections without content are skipped. Global flags the command does not
/// redefine are listed under their own heading.
pub fn render_help(
    descriptor: &CommandDescriptor,
    runtime: Runtime<'_>,
    ui: &mut dyn UserInterface,
) {
    let theme = ui.theme().clone();
    let mut sections: Vec<Vec<String>> = Vec::new();

    if !descriptor.description().is_empty() {
        sections.push(vec![
            theme.format_heading("Description"),
            format!("  {}", descriptor.description()),
        ]);
    }

    sections.push(vec![
        theme.format_heading("Usage"),
        format!("  {}", command_usage(runtime.binary_name(), descriptor)),
    ]);

    if !descriptor.args().is_empty() {
        let rows: Vec<_> = descriptor
            .args()
            .iter()
            .map(|a| (a.display_name(), argument_description(a)))
            .collect();
        let mut section = vec![theme.format_heading("Arguments")];
        section.extend(align_rows(&rows, &theme.option, 2));
        sections.push(section);
    }

    if !descriptor.flags().is_empty() {
        let rows: Vec<_> = descriptor
            .flags()
            .iter()
            .map(|f| (flag_usage(f), flag_description(f)))
            .collect();
        let mut section = vec![theme.format_heading("Options")];
        section.extend(align_rows(&rows, &theme.option, 2));
        sections.push(section);
    }

    let globals: Vec<_> = runtime
        .global_flags()
        .iter()
        .filter(|f| descriptor.flag(&f.token()).is_none())
        .map(|f| (flag_usage(f), flag_description(f)))
        .collect();
    if !globals.is_empty() {
        let mut section = vec![theme.format_heading("Global options")];
        section.extend(align_rows(&globals, &theme.option, 2));
        sections.push(section);
    }

    if !descriptor.aliases().is_empty() {
        sections.push(vec![
            theme.format_heading("Aliases"),
            format!("  {}", descriptor.aliases().join(", ")),
        ]);
    }

    if !descriptor.help().is_empty() {
        let mut section = vec![theme.format_heading("Help")];
        section.extend(descriptor.help().iter().map(|line| format!("  {}", line)));
        sections.push(section);
    }

    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            ui.message("");
        }
        for line in section {
            ui.message(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FlagSpec;
    use crate::loader::ListLoader;
    use crate::ui::MockUI;
    use crate::Kernel;

    struct MakeController;

    impl Command for MakeController {
        fn run(&mut self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    impl CommandDefinition for MakeController {
        fn descriptor() -> Result<CommandDescriptor> {
            let mut descriptor = CommandDescriptor::new("make:controller")
                .with_description("Create a new HTTP controller")
                .with_help("Controllers are written to app/controllers")
                .with_alias("mc");
            descriptor
                .define_argument(ArgumentSpec::string("name").description("Controller name"))?
                .define_flag(FlagSpec::boolean("resource").alias("r").default_value(false))?;
            Ok(descriptor)
        }

        fn from_input(_input: &CommandInput) -> anyhow::Result<Self> {
            Ok(Self)
        }
    }

    fn kernel() -> Kernel {
        let mut kernel = Kernel::new();
        kernel
            .add_loader(
                ListLoader::default()
                    .with::<HelpCommand>()
                    .unwrap()
                    .with::<MakeController>()
                    .unwrap(),
            )
            .unwrap()
            .set_binary_name("ace")
            .unwrap()
            .define_flag(FlagSpec::boolean("help").alias("h"))
            .unwrap();
        kernel
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_every_section() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        let code = kernel.handle(&argv(&["help", "mc"]), &mut ui).unwrap();

        assert_eq!(code, 0);
        let output = ui.output();
        assert!(output.contains("Description:"));
        assert!(output.contains("  Create a new HTTP controller"));
        assert!(output.contains("ace make:controller [options] [--] <name>"));
        assert!(output.contains("Controller name"));
        assert!(output.contains("-r, --resource"));
        assert!(output.contains("Global options:"));
        assert!(output.contains("-h, --help"));
        assert!(output.contains("Aliases:"));
        assert!(output.contains("Controllers are written to app/controllers"));
    }

    #[test]
    fn unknown_command_suggests_and_fails() {
        let mut kernel = kernel();
        let mut ui = MockUI::new();
        let code = kernel
            .handle(&argv(&["help", "make:controler"]), &mut ui)
            .unwrap();

        assert_eq!(code, 1);
        assert!(ui.has_error("Command \"make:controler\" is not defined"));
        assert!(ui.has_hint("make:controller"));
    }
}
