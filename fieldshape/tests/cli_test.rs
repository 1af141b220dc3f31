//! CLI tests for the fsh binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
pretty: false
profiles:
  public:
    fields: [id, name, email]
    transform:
      name: uppercase
    include-if:
      email: { field: role, equals: admin }
  signup:
    validate:
      name: [not-empty]
      password: [valid-password]
"#;

fn setup(record: &str) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("fieldshape.yml"), CONFIG).unwrap();
    fs::write(temp.path().join("record.json"), record).unwrap();
    temp
}

fn fsh(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fsh").unwrap();
    cmd.current_dir(temp.path()).arg("--config").arg("fieldshape.yml");
    cmd
}

#[test]
fn test_shape_with_profile() {
    let temp = setup(r#"{"id": 1, "name": "alice", "role": "user", "email": "e@x.com"}"#);

    fsh(&temp)
        .args(["shape", "record.json", "--profile", "public"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"id":1,"name":"ALICE","email":null}"#));
}

#[test]
fn test_shape_yaml_output() {
    let temp = setup(r#"{"id": 1, "name": "alice", "role": "admin", "email": "e@x.com"}"#);

    fsh(&temp)
        .args(["shape", "record.json", "-p", "public", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: ALICE"))
        .stdout(predicate::str::contains("email: e@x.com"));
}

#[test]
fn test_shape_reads_stdin() {
    let temp = setup("{}");

    fsh(&temp)
        .args(["shape", "-"])
        .write_stdin(r#"{"b": 2}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"b":2}"#));
}

#[test]
fn test_shape_unknown_profile_fails() {
    let temp = setup("{}");

    fsh(&temp)
        .args(["shape", "record.json", "--profile", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown profile 'missing'"));
}

#[test]
fn test_validate_reports_first_error() {
    let temp = setup(r#"{"name": "alice", "password": "Short1!"}"#);

    fsh(&temp)
        .args(["validate", "record.json", "--profile", "signup"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("'password'"))
        .stdout(predicate::str::contains("at least 8 characters"));
}

#[test]
fn test_validate_success() {
    let temp = setup(r#"{"name": "alice", "password": "Ab1!ab1!"}"#);

    fsh(&temp)
        .args(["validate", "record.json", "--profile", "signup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_encode_xml_bypasses_profiles() {
    let temp = setup(r#"{"id": 1, "name": "alice"}"#);

    fsh(&temp)
        .args(["encode", "record.json", "--format", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<record>"))
        .stdout(predicate::str::contains("<name>alice</name>"));
}

#[test]
fn test_profiles_lists_names() {
    let temp = setup("{}");

    fsh(&temp)
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("public"))
        .stdout(predicate::str::contains("signup"));
}

#[test]
fn test_non_object_input_fails() {
    let temp = setup("[1, 2, 3]");

    fsh(&temp)
        .args(["shape", "record.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not encode to a mapping"));
}
