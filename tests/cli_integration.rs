//! Integration tests for the `htui` CLI.
//!
//! Each test gets a temp home directory, runs `htui` as a subprocess and
//! checks its output and the config file it leaves behind. None of them
//! reach a real server.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get the path to the built `htui` binary.
fn htui_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("htui");
    path
}

/// Run `htui` with `home` as both the home and config directory
fn htui(home: &Path, args: &[&str]) -> Output {
    Command::new(htui_bin())
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("HABITUI_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let output = htui(home.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for command in [
        "login", "list", "stats", "up", "down", "done", "delete", "edit", "party",
    ] {
        assert!(text.contains(command), "missing {command} in:\n{text}");
    }
}

#[test]
fn login_writes_config_and_keeps_other_tables() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    fs::write(
        &config,
        "# my settings\n[server]\ntimeout_secs = 5\n",
    )
    .unwrap();

    let output = htui(
        home.path(),
        &["login", "user-1", "key-1", "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("credentials saved to"));

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.starts_with("# my settings\n[server]\ntimeout_secs = 5\n"));
    let parsed: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(parsed["account"]["user_id"].as_str(), Some("user-1"));
    assert_eq!(parsed["account"]["api_key"].as_str(), Some("key-1"));
}

#[test]
fn login_uses_default_config_location() {
    let home = TempDir::new().unwrap();
    let output = htui(home.path(), &["login", "user-1", "key-1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let config = home.path().join(".config/habitui/config.toml");
    assert!(config.exists());
}

#[test]
fn missing_credentials_is_an_error() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    let output = htui(
        home.path(),
        &["list", "--config", config.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: no credentials found"));
}

#[test]
fn unreachable_server_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    fs::write(
        &config,
        r#"[account]
user_id = "user-1"
api_key = "key-1"

[server]
base_url = "http://127.0.0.1:9/api/v3"
timeout_secs = 2
"#,
    )
    .unwrap();

    let output = htui(
        home.path(),
        &["stats", "--config", config.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("error: "));
}

#[test]
fn bad_menu_name_is_rejected_by_the_parser() {
    let home = TempDir::new().unwrap();
    let output = htui(home.path(), &["list", "rewards"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid value"));
}
