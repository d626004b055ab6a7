//! Built-in commands.
//!
//! `list` is the kernel's default command. `help` renders the help screen
//! of another command, and [`render_help`] is exposed for `--help` style
//! option listeners.

pub mod help;
pub mod list;

pub use help::{render_help, HelpCommand};
pub use list::ListCommand;

use crate::error::CliError;
use crate::ui::UserInterface;

/// Log a not-defined error with its suggestions.
fn report_not_found(ui: &mut dyn UserInterface, err: &CliError) {
    ui.error(&err.to_string());
    let suggestions = err.suggestions();
    if !suggestions.is_empty() {
        ui.hint(&format!("Did you mean: {}", suggestions.join(", ")));
    }
}
