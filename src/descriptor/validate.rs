//! Validation of parsed input against a descriptor.
//!
//! Arguments are checked in declaration order, then undeclared flags, then
//! declared flags in declaration order. The first violation is returned.
//! Validation never mutates the descriptor or the input.

use crate::error::{CliError, Result};

use super::{CommandDescriptor, FlagKind, FlagValue, ParsedInput};

/// Check `input` against `descriptor`.
pub fn validate(descriptor: &CommandDescriptor, input: &ParsedInput) -> Result<()> {
    for (index, spec) in descriptor.args().iter().enumerate() {
        match input.arg(index) {
            None if spec.is_required() => {
                return Err(CliError::MissingArgument {
                    name: spec.display_name(),
                });
            }
            Some(value) if !spec.allow_empty_value && value.is_blank() => {
                return Err(CliError::MissingArgumentValue {
                    name: spec.display_name(),
                });
            }
            _ => {}
        }
    }

    if !descriptor.options().allow_unknown_flags {
        if let Some(first) = input.unknown_flags.first() {
            return Err(CliError::unknown_flag(first));
        }
    }

    for spec in descriptor.flags() {
        let token = spec.token();
        let Some(value) = input.flag(&token) else {
            if spec.required {
                return Err(CliError::MissingFlag { flag: token });
            }
            continue;
        };

        match spec.kind {
            Some(FlagKind::Boolean) => {}
            Some(FlagKind::Number) => match value {
                FlagValue::Number(n) if n.is_nan() => {
                    return Err(CliError::InvalidFlag {
                        flag: token,
                        expected: "numeric".to_string(),
                    });
                }
                FlagValue::Number(_) => {}
                v if v.is_blank() => {
                    if !spec.allow_empty_value {
                        return Err(CliError::MissingFlagValue { flag: token });
                    }
                }
                _ => {
                    return Err(CliError::InvalidFlag {
                        flag: token,
                        expected: "numeric".to_string(),
                    });
                }
            },
            _ => {
                if !spec.allow_empty_value && value.is_blank() {
                    return Err(CliError::MissingFlagValue { flag: token });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArgValue, ArgumentSpec, CommandOptions, FlagSpec};

    fn make_controller() -> CommandDescriptor {
        let mut d = CommandDescriptor::new("make:controller");
        d.define_argument(ArgumentSpec::string("name"))
            .unwrap()
            .define_flag(FlagSpec::boolean("resource").default_value(false))
            .unwrap()
            .define_flag(FlagSpec::number("port"))
            .unwrap()
            .define_flag(FlagSpec::string("model"))
            .unwrap();
        d
    }

    fn input_with_name(name: &str) -> ParsedInput {
        ParsedInput {
            args: vec![Some(ArgValue::from(name))],
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(validate(&make_controller(), &input_with_name("Home")).is_ok());
    }

    #[test]
    fn missing_required_argument() {
        let err = validate(&make_controller(), &ParsedInput::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { name } if name == "name"));
    }

    #[test]
    fn blank_argument_value() {
        let err = validate(&make_controller(), &input_with_name("   ")).unwrap_err();
        assert!(matches!(err, CliError::MissingArgumentValue { .. }));
    }

    #[test]
    fn blank_argument_allowed_when_declared() {
        let mut d = CommandDescriptor::new("echo");
        d.define_argument(ArgumentSpec::string("text").allow_empty())
            .unwrap();
        assert!(validate(&d, &input_with_name("")).is_ok());
    }

    #[test]
    fn required_spread_without_values() {
        let mut d = CommandDescriptor::new("copy");
        d.define_argument(ArgumentSpec::spread("files").required())
            .unwrap();
        let err = validate(&d, &ParsedInput::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { .. }));

        let empty = ParsedInput {
            args: vec![Some(ArgValue::Spread(vec![]))],
            ..Default::default()
        };
        let err = validate(&d, &empty).unwrap_err();
        assert!(matches!(err, CliError::MissingArgumentValue { .. }));
    }

    #[test]
    fn unknown_flag_reports_first_offender() {
        let mut input = input_with_name("Home");
        input.unknown_flags = vec!["x".into(), "verbose".into()];
        let err = validate(&make_controller(), &input).unwrap_err();
        assert!(matches!(err, CliError::UnknownFlag { token } if token == "-x"));
    }

    #[test]
    fn unknown_flags_allowed_by_option() {
        let d = make_controller().with_options(CommandOptions {
            allow_unknown_flags: true,
            ..Default::default()
        });
        let mut input = input_with_name("Home");
        input.unknown_flags = vec!["verbose".into()];
        assert!(validate(&d, &input).is_ok());
    }

    #[test]
    fn missing_required_flag() {
        let mut d = CommandDescriptor::new("deploy");
        d.define_flag(FlagSpec::string("target").required()).unwrap();
        let err = validate(&d, &ParsedInput::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingFlag { flag } if flag == "target"));
    }

    #[test]
    fn required_boolean_flag_present_as_false() {
        let mut d = CommandDescriptor::new("deploy");
        d.define_flag(FlagSpec::boolean("force").required()).unwrap();
        let mut input = ParsedInput::default();
        input.flags.insert("force".into(), FlagValue::Bool(false));
        assert!(validate(&d, &input).is_ok());
    }

    #[test]
    fn blank_string_flag_value() {
        let mut input = input_with_name("Home");
        input.flags.insert("model".into(), FlagValue::from(""));
        let err = validate(&make_controller(), &input).unwrap_err();
        assert!(matches!(err, CliError::MissingFlagValue { flag } if flag == "model"));
    }

    #[test]
    fn blank_array_flag_value() {
        let mut d = CommandDescriptor::new("build");
        d.define_flag(FlagSpec::array("target")).unwrap();
        let mut input = ParsedInput::default();
        input.flags.insert("target".into(), FlagValue::List(vec![]));
        assert!(matches!(
            validate(&d, &input),
            Err(CliError::MissingFlagValue { .. })
        ));
    }

    #[test]
    fn non_numeric_number_flag() {
        let mut input = input_with_name("Home");
        input.flags.insert("port".into(), FlagValue::Number(f64::NAN));
        let err = validate(&make_controller(), &input).unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidFlag { flag, expected } if flag == "port" && expected == "numeric"
        ));
    }

    #[test]
    fn empty_number_flag_is_missing_value() {
        let mut input = input_with_name("Home");
        input.flags.insert("port".into(), FlagValue::from(""));
        assert!(matches!(
            validate(&make_controller(), &input),
            Err(CliError::MissingFlagValue { .. })
        ));
    }

    #[test]
    fn validation_does_not_mutate() {
        let d = make_controller();
        let input = input_with_name("Home");
        let before = (d.clone(), input.clone());
        validate(&d, &input).unwrap();
        assert_eq!(before, (d, input));
    }
}
