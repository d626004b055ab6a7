//! Text layout for help screens and command listings.

use console::Style;

use crate::descriptor::{
    ArgValue, ArgumentSpec, CommandDescriptor, FlagKind, FlagSpec, FlagValue,
};

/// Usage token for an argument: `<name>`, `[<name>]`, `<name...>`.
pub fn argument_usage(spec: &ArgumentSpec) -> String {
    let name = if spec.is_spread() {
        format!("<{}...>", spec.display_name())
    } else {
        format!("<{}>", spec.display_name())
    };
    if spec.is_required() {
        name
    } else {
        format!("[{}]", name)
    }
}

/// Option column for a flag, e.g. `-r, --resource` or `--port[=PORT]`.
pub fn flag_usage(spec: &FlagSpec) -> String {
    let token = spec.token();
    let mut names: Vec<String> = spec.short_aliases().map(|c| format!("-{}", c)).collect();
    names.push(format!("--{}", token));
    names.extend(spec.long_aliases().map(|a| format!("--{}", a)));
    let mut usage = names.join(", ");

    match spec.kind {
        Some(FlagKind::Boolean) | None => {}
        Some(_) => {
            let value = token.to_uppercase().replace('-', "_");
            if spec.required {
                usage.push_str(&format!("={}", value));
            } else {
                usage.push_str(&format!("[={}]", value));
            }
        }
    }
    usage
}

/// Description column for a flag, with its default when it has one.
pub fn flag_description(spec: &FlagSpec) -> String {
    match &spec.default {
        Some(FlagValue::Bool(false)) | None => spec.description.clone(),
        Some(default) => {
            let default = format!("[default: {}]", flag_value_text(default));
            join_non_empty(&spec.description, &default)
        }
    }
}

/// Description column for an argument, with its default when it has one.
pub fn argument_description(spec: &ArgumentSpec) -> String {
    match &spec.default {
        Some(ArgValue::String(s)) => {
            join_non_empty(&spec.description, &format!("[default: {}]", s))
        }
        Some(ArgValue::Spread(v)) => {
            join_non_empty(&spec.description, &format!("[default: {}]", v.join(",")))
        }
        None => spec.description.clone(),
    }
}

/// Usage line: `<binary> <command> [options] [--] <args>`.
pub fn command_usage(binary: &str, descriptor: &CommandDescriptor) -> String {
    let mut parts = vec![binary.to_string(), descriptor.command_name().to_string()];
    if !descriptor.flags().is_empty() {
        parts.push("[options]".to_string());
    }
    if !descriptor.args().is_empty() {
        parts.push("[--]".to_string());
        parts.extend(descriptor.args().iter().map(argument_usage));
    }
    parts.join(" ")
}

/// Render two-column rows with the left column padded to a common width.
pub fn align_rows(rows: &[(String, String)], left_style: &Style, indent: usize) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(left, _)| console::measure_text_width(left))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(left, right)| {
            let padded = format!("{:width$}", left, width = width);
            let line = format!(
                "{}{}  {}",
                " ".repeat(indent),
                left_style.apply_to(padded),
                right
            );
            line.trim_end().to_string()
        })
        .collect()
}

fn flag_value_text(value: &FlagValue) -> String {
    match value {
        FlagValue::Bool(b) => b.to_string(),
        FlagValue::Number(n) => n.to_string(),
        FlagValue::Text(s) => s.clone(),
        FlagValue::List(v) => v.join(","),
    }
}

fn join_non_empty(description: &str, suffix: &str) -> String {
    if description.is_empty() {
        suffix.to_string()
    } else {
        format!("{} {}", description, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_usage_variants() {
        let mut d = CommandDescriptor::new("x");
        d.define_argument(ArgumentSpec::string("name"))
            .unwrap()
            .define_argument(ArgumentSpec::string("target").optional())
            .unwrap()
            .define_argument(ArgumentSpec::spread("rest"))
            .unwrap();
        let usages: Vec<_> = d.args().iter().map(argument_usage).collect();
        assert_eq!(usages, vec!["<name>", "[<target>]", "[<rest...>]"]);
    }

    #[test]
    fn required_spread_usage() {
        assert_eq!(
            argument_usage(&ArgumentSpec::spread("files").required()),
            "<files...>"
        );
    }

    #[test]
    fn flag_usage_variants() {
        assert_eq!(
            flag_usage(&FlagSpec::boolean("resource").alias("r")),
            "-r, --resource"
        );
        assert_eq!(flag_usage(&FlagSpec::number("port")), "--port[=PORT]");
        assert_eq!(
            flag_usage(&FlagSpec::string("dbName").required()),
            "--db-name=DB_NAME"
        );
    }

    #[test]
    fn flag_description_shows_defaults() {
        let port = FlagSpec::number("port").description("Port to bind").default_value(3333);
        assert_eq!(flag_description(&port), "Port to bind [default: 3333]");
        let resource = FlagSpec::boolean("resource").default_value(false);
        assert_eq!(flag_description(&resource), "");
    }

    #[test]
    fn command_usage_line() {
        let mut d = CommandDescriptor::new("make:controller");
        d.define_argument(ArgumentSpec::string("name"))
            .unwrap()
            .define_flag(FlagSpec::boolean("resource"))
            .unwrap();
        assert_eq!(
            command_usage("ace", &d),
            "ace make:controller [options] [--] <name>"
        );
        assert_eq!(command_usage("ace", &CommandDescriptor::new("serve")), "ace serve");
    }

    #[test]
    fn rows_align_on_widest_left_column() {
        let rows = vec![
            ("serve".to_string(), "Start".to_string()),
            ("make:controller".to_string(), "Create".to_string()),
            ("list".to_string(), String::new()),
        ];
        let lines = align_rows(&rows, &Style::new(), 2);
        assert_eq!(lines[0], "  serve            Start");
        assert_eq!(lines[1], "  make:controller  Create");
        assert_eq!(lines[2], "  list");
    }
}
