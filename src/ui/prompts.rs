//! Interactive prompts rendered with dialoguer.
//!
//! Commands ask through [`super::UserInterface::prompt`], usually from their
//! `interact` phase. The default answers carried by a [`Prompt`] are plain
//! strings so that `MockUI` and the terminal agree on their meaning; the
//! helpers below turn them into what each dialoguer widget expects.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{CliError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Show `prompt` on `term` and wait for an answer.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    tracing::trace!(key = %prompt.key, "prompting");
    let theme = ColorfulTheme {
        prompt_prefix: style(String::new()),
        ..ColorfulTheme::default()
    };
    let question = prompt.question.as_str();
    let default = prompt.default.as_deref();

    let answer = match &prompt.prompt_type {
        PromptType::Confirm => Confirm::with_theme(&theme)
            .with_prompt(question)
            .default(default.map(parse_bool).unwrap_or(true))
            .interact_on(term)
            .map(PromptResult::Bool),
        PromptType::Input => {
            let mut input = Input::<String>::with_theme(&theme).with_prompt(question);
            if let Some(default) = default {
                input = input.default(default.to_string());
            }
            input.interact_on(term).map(PromptResult::String)
        }
        PromptType::Select { options } => Select::with_theme(&theme)
            .with_prompt(question)
            .items(&labels(options))
            .default(selected_index(options, default))
            .interact_on(term)
            .map(|index| PromptResult::String(value_at(options, index))),
        PromptType::MultiSelect { options } => MultiSelect::with_theme(&theme)
            .with_prompt(question)
            .items(&labels(options))
            .defaults(&checked(options, default))
            .interact_on(term)
            .map(|indexes| {
                PromptResult::Strings(indexes.into_iter().map(|i| value_at(options, i)).collect())
            }),
    };

    answer.map_err(|e| CliError::Io(e.into()))
}

fn labels(options: &[PromptOption]) -> Vec<&str> {
    options.iter().map(|o| o.label.as_str()).collect()
}

fn value_at(options: &[PromptOption], index: usize) -> String {
    options
        .get(index)
        .map(|o| o.value.clone())
        .unwrap_or_default()
}

/// Index of the option whose value matches `default`, else the first.
fn selected_index(options: &[PromptOption], default: Option<&str>) -> usize {
    default
        .and_then(|d| options.iter().position(|o| o.value == d))
        .unwrap_or(0)
}

/// Pre-checked state per option from a comma-separated default.
fn checked(options: &[PromptOption], default: Option<&str>) -> Vec<bool> {
    let values: Vec<&str> = default
        .map(|d| d.split(',').map(str::trim).collect())
        .unwrap_or_default();
    options
        .iter()
        .map(|o| values.contains(&o.value.as_str()))
        .collect()
}

/// Interpret a textual yes/no answer.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}
