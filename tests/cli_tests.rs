//! CLI integration tests

use std::path::Path;
use std::process::Command;

/// Run the binary with config, data and runtime dirs inside `home`
fn notimic_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notimic"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_RUNTIME_DIR", home)
        .env_remove("NOTIMIC_RECORDINGS_DIR");
    cmd
}

#[test]
fn help_output() {
    let home = tempfile::tempdir().unwrap();
    let output = notimic_bin(home.path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["run", "start-pause", "stop", "kill", "status", "share", "config"] {
        assert!(stdout.contains(subcommand), "missing {} in help", subcommand);
    }
}

#[test]
fn run_help_lists_flags() {
    let home = tempfile::tempdir().unwrap();
    let output = notimic_bin(home.path())
        .args(["run", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--record"));
    assert!(stdout.contains("--no-notify"));
    assert!(stdout.contains("--recordings-dir"));
}

#[test]
fn version_output() {
    let home = tempfile::tempdir().unwrap();
    let output = notimic_bin(home.path())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notimic"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let home = tempfile::tempdir().unwrap();
    let output = notimic_bin(home.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notimic"));
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn config_set_get_list() {
    let home = tempfile::tempdir().unwrap();

    let set = notimic_bin(home.path())
        .args(["config", "set", "share_command", "nautilus"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let get = notimic_bin(home.path())
        .args(["config", "get", "share_command"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "nautilus");

    let list = notimic_bin(home.path())
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("recordings_dir"));
    assert!(stdout.contains("(not set)"));
    assert!(stdout.contains("nautilus"));
}

#[test]
fn config_init_twice_fails() {
    let home = tempfile::tempdir().unwrap();

    let first = notimic_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = notimic_bin(home.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(second.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}

#[test]
fn control_commands_without_service() {
    let home = tempfile::tempdir().unwrap();

    for subcommand in ["start-pause", "start", "pause", "stop", "kill", "status"] {
        let output = notimic_bin(home.path())
            .arg(subcommand)
            .output()
            .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1), "{}", subcommand);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("No service running"),
            "Expected not-running error for {}, got: {}",
            subcommand,
            stderr
        );
    }
}

#[test]
fn share_uses_configured_command() {
    let home = tempfile::tempdir().unwrap();

    let set = notimic_bin(home.path())
        .args(["config", "set", "share_command", "true"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let output = notimic_bin(home.path())
        .env("NOTIMIC_RECORDINGS_DIR", home.path().join("rec"))
        .args(["share", "1700000000000.flac"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1700000000000.flac"));
    assert!(stderr.contains("rec"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = notimic_bin(home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
