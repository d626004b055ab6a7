//! Commandeer demo host.
//!
//! Registers a couple of application commands next to the built-in `list`
//! and `help`, wires a `--help` listener and hands argv to the kernel.

use std::process::ExitCode;

use commandeer::command::{Command, CommandContext, CommandDefinition};
use commandeer::commands::{render_help, HelpCommand};
use commandeer::descriptor::{ArgumentSpec, CommandDescriptor, CommandInput, FlagSpec};
use commandeer::ui::{TerminalUI, UserInterface};
use commandeer::{Kernel, ListLoader, ListenerOutcome};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `--debug` forces debug output, otherwise `RUST_LOG` applies with an
/// info default.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("commandeer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("commandeer=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

struct Serve {
    port: f64,
}

impl Command for Serve {
    fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
        ctx.ui()
            .success(&format!("Server ready on http://localhost:{}", self.port));
        Ok(json!({ "port": self.port }))
    }
}

impl CommandDefinition for Serve {
    fn descriptor() -> commandeer::Result<CommandDescriptor> {
        let mut descriptor = CommandDescriptor::new("serve")
            .with_description("Start the development HTTP server");
        descriptor.define_flag(
            FlagSpec::number("port")
                .alias("p")
                .description("Port to listen on")
                .default_value(3333.0),
        )?;
        Ok(descriptor)
    }

    fn from_input(input: &CommandInput) -> anyhow::Result<Self> {
        Ok(Self {
            port: input.flag_number("port").unwrap_or(3333.0),
        })
    }
}

struct MakeController {
    name: String,
    resource: bool,
}

impl Command for MakeController {
    fn run(&mut self, ctx: &mut CommandContext<'_>) -> anyhow::Result<Value> {
        let kind = if self.resource { "resourceful " } else { "" };
        ctx.ui().success(&format!(
            "Created {}controller app/controllers/{}_controller",
            kind,
            self.name.to_lowercase()
        ));
        Ok(json!({ "name": self.name, "resource": self.resource }))
    }
}

impl CommandDefinition for MakeController {
    fn descriptor() -> commandeer::Result<CommandDescriptor> {
        let mut descriptor = CommandDescriptor::new("make:controller")
            .with_description("Create a new HTTP controller class")
            .with_alias("mc");
        descriptor
            .define_argument(ArgumentSpec::string("name").description("Name of the controller"))?
            .define_flag(
                FlagSpec::boolean("resource")
                    .alias("r")
                    .description("Add resourceful methods")
                    .default_value(false),
            )?;
        Ok(descriptor)
    }

    fn from_input(input: &CommandInput) -> anyhow::Result<Self> {
        Ok(Self {
            name: input.require_string("name")?.to_string(),
            resource: input.flag_bool("resource"),
        })
    }
}

fn build_kernel() -> commandeer::Result<Kernel> {
    let mut kernel = Kernel::new();
    kernel
        .set_binary_name("commandeer")?
        .define_flag(
            FlagSpec::boolean("help")
                .alias("h")
                .description("Display help for the given command"),
        )?
        .define_flag(FlagSpec::boolean("debug").description("Enable debug logging"))?
        .add_loader(
            ListLoader::default()
                .with::<HelpCommand>()?
                .with::<Serve>()?
                .with::<MakeController>()?,
        )?
        .on("help", |ctx| {
            let runtime = ctx.runtime();
            let descriptor = ctx.descriptor();
            render_help(descriptor, runtime, ctx.ui());
            Ok(ListenerOutcome::ShortCircuit)
        })?;
    Ok(kernel)
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    init_tracing(argv.iter().any(|arg| arg == "--debug"));

    tracing::debug!(?argv, "commandeer starting");

    let mut ui = TerminalUI::new();
    let result = build_kernel().and_then(|mut kernel| kernel.handle(&argv, &mut ui));

    match result {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
