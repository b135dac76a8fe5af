#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = r#"
name = "Signup"

[[attributes]]
name = "email"
coerce = "downcase"
required = true

[[attributes]]
name = "born_on"
coerce = "to_date"

[[attributes]]
name = "plan"
default = "free"
"#;

fn attrform_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("attrform"));
    cmd.current_dir(temp.path()).env_remove("RUST_LOG");
    cmd
}

fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let schema = temp.path().join("signup.toml");
    fs::write(&schema, SCHEMA).unwrap();
    (temp, schema)
}

#[test]
fn build_reads_input_file() {
    let (temp, schema) = setup();
    let input = temp.path().join("input.json");
    fs::write(
        &input,
        r#"{"email": "Ada@Example.COM", "born_on": {"year": 1815, "month": 12, "day": 10}}"#,
    )
    .unwrap();

    attrform_cmd(&temp)
        .args(["build", "--compact"])
        .arg(&schema)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::eq(
            "{\"email\":\"ada@example.com\",\"born_on\":\"1815-12-10\",\"plan\":\"free\"}\n",
        ));
}

#[test]
fn build_reads_stdin() {
    let (temp, schema) = setup();

    attrform_cmd(&temp)
        .arg("build")
        .arg(&schema)
        .arg("-")
        .write_stdin(r#"{"email": "x@y.z", "plan": "pro"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"plan\": \"pro\""))
        .stdout(predicate::str::contains("\"born_on\": null"));
}

#[test]
fn build_fails_on_missing_required() {
    let (temp, schema) = setup();

    attrform_cmd(&temp)
        .arg("build")
        .arg(&schema)
        .write_stdin("{}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Signup: missing required attribute(s): email",
        ));
}

#[test]
fn build_fails_on_undeclared_keys() {
    let (temp, schema) = setup();

    attrform_cmd(&temp)
        .arg("build")
        .arg(&schema)
        .write_stdin(r#"{"email": "a@b.c", "nickname": "ada"}"#)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("undeclared attribute(s): nickname"));
}

#[test]
fn build_ignore_undeclared_drops_extra_keys() {
    let (temp, schema) = setup();

    attrform_cmd(&temp)
        .args(["build", "--ignore-undeclared", "--compact"])
        .arg(&schema)
        .write_stdin(r#"{"email": "a@b.c", "nickname": "ada"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("nickname").not())
        .stdout(predicate::str::contains("\"email\":\"a@b.c\""));
}

#[test]
fn build_reports_unreadable_schema() {
    let temp = TempDir::new().unwrap();

    attrform_cmd(&temp)
        .args(["build", "nope.toml"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load schema nope.toml"));
}

#[test]
fn names_lists_attributes_in_order() {
    let (temp, schema) = setup();

    attrform_cmd(&temp)
        .arg("names")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::eq("email\nborn_on\nplan\n"));
}

#[test]
fn config_shows_defaults() {
    let temp = TempDir::new().unwrap();

    attrform_cmd(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("undefined_attributes = \"raise\""))
        .stdout(predicate::str::contains("pretty = true"));
}

#[test]
fn config_dir_changes_date_format() {
    let (temp, schema) = setup();
    let conf = temp.path().join("conf");
    fs::create_dir_all(&conf).unwrap();
    fs::write(
        conf.join("attrform.toml"),
        "undefined_attributes = \"raise\"\ndate_format = \"%d/%m/%Y\"\npretty = false\n",
    )
    .unwrap();

    attrform_cmd(&temp)
        .arg("build")
        .arg(&schema)
        .arg("--config-dir")
        .arg(&conf)
        .write_stdin(r#"{"email": "a@b.c", "born_on": "10/12/1815"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"born_on\":\"10/12/1815\""));
}
