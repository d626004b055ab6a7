//! Default parser built on clap's builder API.
//!
//! A `clap::Command` is assembled from the [`ParserOptions`] on every call.
//! Undeclared flag tokens are set aside before clap sees the argv so they
//! can be reported in `unknown_flags` instead of aborting the parse.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::descriptor::{ArgValue, ArgumentKind, FlagKind, FlagValue, ParsedInput};
use crate::error::{CliError, Result};

use super::{InputParser, ParserOptions};

const REST_ID: &str = "__rest";

/// [`InputParser`] backed by `clap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClapParser;

impl ClapParser {
    pub fn new() -> Self {
        Self
    }
}

impl InputParser for ClapParser {
    fn parse(&self, argv: &[String], options: &ParserOptions) -> Result<ParsedInput> {
        let (tokens, unknown_flags) = split_unknown(argv, options);
        tracing::trace!(?tokens, ?unknown_flags, "parsing argv");

        let matches = build_command(options)
            .try_get_matches_from(tokens)
            .map_err(|e| CliError::Parse {
                message: first_line(&e.to_string()),
            })?;

        let mut parsed = ParsedInput {
            unknown_flags,
            ..Default::default()
        };

        for (index, arg) in options.arguments.iter().enumerate() {
            let id = positional_id(index);
            let value = match arg.kind {
                ArgumentKind::String => {
                    matches.get_one::<String>(&id).cloned().map(ArgValue::String)
                }
                ArgumentKind::Spread => matches
                    .get_many::<String>(&id)
                    .map(|values| ArgValue::Spread(values.cloned().collect())),
            };
            parsed.args.push(value.or_else(|| arg.default.clone()));
        }

        for token in &options.flags.known {
            let id = flag_id(token);
            if matches.value_source(&id) != Some(ValueSource::CommandLine) {
                if let Some(default) = options.flags.default.get(token) {
                    parsed.flags.insert(token.clone(), default.clone());
                }
                continue;
            }
            let value = flag_value(&matches, &id, options.flags.kind_of(token));
            parsed.flags.insert(token.clone(), value);
        }

        Ok(parsed)
    }
}

fn flag_value(matches: &ArgMatches, id: &str, kind: Option<FlagKind>) -> FlagValue {
    match kind {
        Some(FlagKind::Boolean) => FlagValue::Bool(matches.get_flag(id)),
        Some(FlagKind::Array) => FlagValue::List(
            matches
                .get_many::<String>(id)
                .map(|values| values.filter(|v| !v.is_empty()).cloned().collect())
                .unwrap_or_default(),
        ),
        Some(FlagKind::Number) => {
            let raw = matches.get_one::<String>(id).cloned().unwrap_or_default();
            coerce_number(raw)
        }
        Some(FlagKind::String) | None => {
            FlagValue::Text(matches.get_one::<String>(id).cloned().unwrap_or_default())
        }
    }
}

/// Empty text stays text so validation can report a missing value.
fn coerce_number(raw: String) -> FlagValue {
    if raw.trim().is_empty() {
        return FlagValue::Text(raw);
    }
    FlagValue::Number(raw.trim().parse::<f64>().unwrap_or(f64::NAN))
}

fn build_command(options: &ParserOptions) -> Command {
    let mut command = Command::new("command")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .allow_negative_numbers(true)
        .args_override_self(true);

    for (index, arg) in options.arguments.iter().enumerate() {
        let positional = Arg::new(positional_id(index))
            .index(index + 1)
            .value_name(arg.name.clone());
        let positional = match arg.kind {
            ArgumentKind::String => positional.action(ArgAction::Set),
            ArgumentKind::Spread => positional.action(ArgAction::Append).num_args(1..),
        };
        command = command.arg(positional);
    }

    // Extra positional values are ignored rather than rejected.
    if !options.has_spread() {
        command = command.arg(
            Arg::new(REST_ID)
                .index(options.arguments.len() + 1)
                .action(ArgAction::Append)
                .num_args(1..)
                .hide(true),
        );
    }

    for token in &options.flags.known {
        let flag_options = &options.flags;
        let mut flag = Arg::new(flag_id(token)).long(token.clone());

        // A name shared by several flags is attached only to its owner.
        let owned = |owner: Option<&str>| owner == Some(token.as_str());
        let mut shorts = Vec::new();
        let aliases = flag_options.alias.get(token).into_iter().flatten();
        for name in std::iter::once(token).chain(aliases) {
            match single_char(name) {
                Some(c) if owned(flag_options.short_owner(c)) && !shorts.contains(&c) => {
                    shorts.push(c)
                }
                Some(_) => {}
                None if name != token && owned(flag_options.long_owner(name)) => {
                    flag = flag.alias(name.clone());
                }
                None => {}
            }
        }
        if let Some((first, rest)) = shorts.split_first() {
            flag = flag.short(*first);
            for c in rest {
                flag = flag.short_alias(*c);
            }
        }

        flag = match options.flags.kind_of(token) {
            Some(FlagKind::Boolean) => flag.action(ArgAction::SetTrue),
            Some(FlagKind::Array) => flag
                .action(ArgAction::Append)
                .num_args(0..=1)
                .default_missing_value(""),
            _ => flag
                .action(ArgAction::Set)
                .num_args(0..=1)
                .default_missing_value(""),
        };
        command = command.arg(flag);
    }

    command
}

/// Separate undeclared flag tokens from the argv clap will see.
fn split_unknown(argv: &[String], options: &ParserOptions) -> (Vec<String>, Vec<String>) {
    let mut tokens = Vec::with_capacity(argv.len());
    let mut unknown = Vec::new();
    let mut escaped = false;

    for token in argv {
        if escaped || token == "-" || is_number(token) {
            tokens.push(token.clone());
            continue;
        }
        if token == "--" {
            escaped = true;
            tokens.push(token.clone());
            continue;
        }

        if let Some(long) = token.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or(long);
            if options.flags.is_known_long(name) {
                tokens.push(token.clone());
            } else {
                unknown.push(name.to_string());
            }
            continue;
        }

        if let Some(short) = token.strip_prefix('-') {
            let (cluster, names) = split_cluster(short, options);
            if !cluster.is_empty() {
                tokens.push(format!("-{}", cluster));
            }
            unknown.extend(names);
            continue;
        }

        tokens.push(token.clone());
    }

    (tokens, unknown)
}

/// Split a short-flag cluster such as `-rx` into the part clap understands
/// and the undeclared letters.
///
/// A known letter that takes a value consumes the rest of the cluster, as
/// does the value attached to an unknown letter with `=`.
fn split_cluster(short: &str, options: &ParserOptions) -> (String, Vec<String>) {
    let mut cluster = String::new();
    let mut unknown = Vec::new();
    let mut chars = short.char_indices();

    while let Some((index, c)) = chars.next() {
        match options.flags.short_owner(c) {
            Some(owner) => {
                cluster.push(c);
                if options.flags.kind_of(owner) != Some(FlagKind::Boolean) {
                    cluster.push_str(&short[index + c.len_utf8()..]);
                    break;
                }
            }
            None => {
                unknown.push(c.to_string());
                if short[index + c.len_utf8()..].starts_with('=') {
                    break;
                }
            }
        }
    }

    (cluster, unknown)
}

fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn positional_id(index: usize) -> String {
    format!("arg:{}", index)
}

fn flag_id(token: &str) -> String {
    format!("flag:{}", token)
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or(message).trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
