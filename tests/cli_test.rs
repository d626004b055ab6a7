//! Integration tests for the demo binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;

fn commandeer() -> Command {
    let mut cmd = Command::new(cargo_bin("commandeer"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_no_args_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("make:controller (mc)"));
    Ok(())
}

#[test]
fn cli_unknown_leading_flag_runs_list() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .arg("-x")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"));
    Ok(())
}

#[test]
fn cli_list_filters_namespace() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["list", "make"])
        .assert()
        .success()
        .stdout(predicate::str::contains("make:controller"))
        .stdout(predicate::str::contains("serve").not());
    Ok(())
}

#[test]
fn cli_list_unknown_namespace_fails() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["list", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Namespace \"foo\" is not defined"));
    Ok(())
}

#[test]
fn cli_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = commandeer().args(["list", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert!(names.contains(&"serve"));
    assert!(names.contains(&"make:controller"));
    Ok(())
}

#[test]
fn cli_alias_runs_command() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["mc", "Home"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created controller app/controllers/home_controller",
        ));

    commandeer()
        .args(["mc", "Home", "-r"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resourceful controller"));
    Ok(())
}

#[test]
fn cli_number_flag_default_and_override() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .arg("serve")
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:3333"));

    commandeer()
        .args(["serve", "--port", "8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:8080"));
    Ok(())
}

#[test]
fn cli_invalid_number_fails() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["serve", "--port", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("accepts a \"numeric\" value"));
    Ok(())
}

#[test]
fn cli_unknown_flag_fails() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["serve", "-x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown flag \"-x\""));
    Ok(())
}

#[test]
fn cli_missing_argument_fails() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .arg("make:controller")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument \"name\""));
    Ok(())
}

#[test]
fn cli_unknown_command_suggests() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .arg("serv")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command \"serv\" is not defined"))
        .stderr(predicate::str::contains("Did you mean: serve"));
    Ok(())
}

#[test]
fn cli_help_flag_short_circuits() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["make:controller", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "commandeer make:controller [options] [--] <name>",
        ))
        .stdout(predicate::str::contains("Created").not());
    Ok(())
}

#[test]
fn cli_help_command() -> Result<(), Box<dyn std::error::Error>> {
    commandeer()
        .args(["help", "serve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-p, --port[=PORT]"))
        .stdout(predicate::str::contains("[default: 3333]"));
    Ok(())
}
