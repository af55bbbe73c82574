//! Smoke tests to verify command wiring and a create/list/show round trip

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `formctl` isolated from the developer's environment: HOME and the working
/// directory point at `dir`, so no config file or `.env` leaks in.
fn formctl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("formctl").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("DATABASE_URL")
        .env_remove("FORMCTL_BIND")
        .env_remove("RUST_LOG");
    cmd
}

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("forms.db").display())
}

const SURVEY: &str = r#"{
    "title": "Survey",
    "fields": [
        {"label": "Country", "options": "US,CA,MX", "selectedOption": "US", "isRequired": true},
        {"label": "Newsletter", "options": "Yes,No", "selectedOption": "No", "isRequired": false}
    ]
}"#;

// === Help Tests ===

#[test]
fn test_top_level_help() {
    let dir = TempDir::new().unwrap();
    formctl(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("forms"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    formctl(dir.path())
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_forms_create_help() {
    let dir = TempDir::new().unwrap();
    formctl(dir.path())
        .args(["forms", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reads stdin"));
}

// === Round Trip Tests ===

#[test]
fn test_create_list_show_round_trip() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);
    let file = dir.path().join("survey.json");
    std::fs::write(&file, SURVEY).unwrap();

    formctl(dir.path())
        .args(["forms", "create", "--database-url", &url, "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Form created successfully. (id 1)"));

    formctl(dir.path())
        .args(["forms", "list", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Survey"));

    formctl(dir.path())
        .args(["forms", "show", "1", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Country *"))
        .stdout(predicate::str::contains("(x) US"))
        .stdout(predicate::str::contains("(x) No"));

    formctl(dir.path())
        .args(["forms", "show", "1", "--json", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""selectedOption": "US""#))
        .stdout(predicate::str::contains(r#""isRequired": true"#));
}

#[test]
fn test_create_from_stdin_uses_env_database_url() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    formctl(dir.path())
        .env("DATABASE_URL", &url)
        .args(["forms", "create", "--file", "-"])
        .write_stdin(SURVEY)
        .assert()
        .success();

    formctl(dir.path())
        .env("DATABASE_URL", &url)
        .args(["forms", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Survey""#))
        .stdout(predicate::str::contains(r#""createdAt""#));
}

#[test]
fn test_incomplete_definition_is_rejected() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    formctl(dir.path())
        .args(["forms", "create", "--database-url", &url, "--file", "-"])
        .write_stdin(r#"{"title": "", "fields": []}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Form title and at least one field are required.",
        ));

    formctl(dir.path())
        .args(["forms", "list", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("No forms yet."));
}

#[test]
fn test_show_unknown_form_fails() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);

    formctl(dir.path())
        .args(["forms", "show", "42", "--database-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("form 42 not found"));
}

#[test]
fn test_config_file_supplies_database_url() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);
    let config_dir = dir.path().join(".formctl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!("database_url = \"{url}\"\n"),
    )
    .unwrap();

    formctl(dir.path())
        .args(["forms", "create", "--file", "-"])
        .write_stdin(SURVEY)
        .assert()
        .success();

    assert!(dir.path().join("forms.db").exists());
}
