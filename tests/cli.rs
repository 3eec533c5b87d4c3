use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn waycast_cmd() -> Command {
    Command::cargo_bin("waycast").expect("binary exists")
}

#[test]
fn waycast_help_prints_usage() {
    waycast_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Keystroke overlay for Wayland compositors",
        ));
}

#[test]
fn overlay_requires_wayland_env() {
    waycast_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAYLAND_DISPLAY not set"));
}

#[test]
fn duration_rejects_non_numeric_values() {
    waycast_cmd()
        .args(["--duration", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn init_config_writes_default_file_once() {
    let temp = TempDir::new().unwrap();

    waycast_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default config"));

    let config_path = temp.path().join("waycast").join("config.toml");
    let contents = std::fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("display_mode"));

    // A second run must refuse to overwrite
    waycast_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
