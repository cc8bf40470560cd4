//! Integration tests for the command-line binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempalert_setup::config::AlertConfig;
use tempfile::TempDir;

const OS_RELEASE: &str = r#"PRETTY_NAME="Raspbian GNU/Linux 12 (bookworm)"
NAME="Raspbian GNU/Linux"
VERSION_ID="12"
ID=raspbian
ID_LIKE=debian
"#;

const SENSOR_ID: &str = "28-000005e3c1a8";

/// A host tree with every file the wizard reads, and a `bin/` for fakes.
fn fake_host() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("etc")).unwrap();
    fs::write(root.join("etc/os-release"), OS_RELEASE).unwrap();

    fs::create_dir_all(root.join("boot")).unwrap();
    fs::write(root.join("boot/config.txt"), "dtparam=audio=on\n").unwrap();

    fs::create_dir_all(root.join("proc")).unwrap();
    fs::write(root.join("proc/modules"), "snd_bcm2835 24576 0 - Live 0x0\n").unwrap();

    let device = root.join("sys/bus/w1/devices").join(SENSOR_ID);
    fs::create_dir_all(&device).unwrap();
    fs::write(
        device.join("w1_slave"),
        "5e 01 4b 46 7f ff 0c 10 f6 : crc=f6 YES\n5e 01 4b 46 7f ff 0c 10 f6 t=21875\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("skills/temperature-alert")).unwrap();
    fs::write(
        root.join("skills/temperature-alert/SKILL.md"),
        "---\nname: temperature-alert\n---\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("home")).unwrap();
    fs::create_dir_all(root.join("bin")).unwrap();
    temp
}

/// Install shell scripts that record their invocation in `bin/calls.log`.
#[cfg(unix)]
fn install_fakes(root: &Path, names: &[&str]) {
    use std::os::unix::fs::PermissionsExt;

    let log = root.join("bin/calls.log");
    for name in names {
        let script = if *name == "sudo" {
            "#!/bin/sh\nexec \"$@\"\n".to_string()
        } else {
            format!("#!/bin/sh\necho \"{} $*\" >> '{}'\n", name, log.display())
        };
        let path = root.join("bin").join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

fn calls(root: &Path) -> String {
    fs::read_to_string(root.join("bin/calls.log")).unwrap_or_default()
}

/// The binary with a clean environment pointed at `root`.
fn tempalert(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("tempalert-setup"));
    cmd.env_clear()
        .env("PATH", root.join("bin"))
        .env("TEMPALERT_OS_RELEASE", root.join("etc/os-release"))
        .env("TEMPALERT_BOOT_CONFIG", root.join("boot/config.txt"))
        .env("TEMPALERT_W1_DEVICES", root.join("sys/bus/w1/devices"))
        .env("TEMPALERT_MODULES_FILE", root.join("proc/modules"))
        .env("TEMPALERT_SKILL_DIR", root.join("skills/temperature-alert"))
        .env("TEMPALERT_HOME", root.join("home"));
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tempalert-setup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("temperature-alert skill"))
        .stdout(predicate::str::contains("sensors"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tempalert-setup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tempalert-setup"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tempalert-setup"));
    Ok(())
}

#[test]
fn cli_sensors_json() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let mut cmd = tempalert(host.path());
    cmd.args(["sensors", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(SENSOR_ID))
        .stdout(predicate::str::contains("21.875"))
        .stdout(predicate::str::contains("\"i2c_devices\": null"));
    Ok(())
}

#[test]
fn cli_sensors_json_stdout_is_only_json() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let empty = host.path().join("empty");
    fs::create_dir_all(&empty)?;

    let mut cmd = tempalert(host.path());
    cmd.args(["sensors", "--json", "--w1-devices"]).arg(&empty);
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["sensors"], serde_json::json!([]));
    Ok(())
}

#[test]
fn cli_sensors_flag_overrides_env() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let empty = host.path().join("empty");
    fs::create_dir_all(&empty)?;

    let mut cmd = tempalert(host.path());
    cmd.args(["sensors", "--w1-devices"]).arg(&empty);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No DS18B20 sensors detected"));
    Ok(())
}

#[test]
fn cli_setup_unreadable_os_release_fails() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let mut cmd = tempalert(host.path());
    cmd.args(["setup", "--non-interactive", "--os-release"])
        .arg(host.path().join("missing"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot determine operating system"));
    Ok(())
}

#[test]
fn cli_setup_lists_all_missing_dependencies_before_changing_anything(
) -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let mut cmd = tempalert(host.path());
    cmd.arg("--non-interactive");
    cmd.assert().failure().code(1).stderr(predicate::str::contains(
        "Missing dependencies: python3, modprobe, one of: openclaw, clawdbot, npx",
    ));

    let boot = fs::read_to_string(host.path().join("boot/config.txt"))?;
    assert_eq!(boot, "dtparam=audio=on\n");
    Ok(())
}

#[test]
fn cli_status_without_agent_fails() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    let mut cmd = tempalert(host.path());
    cmd.arg("status");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("one of: openclaw, clawdbot, npx"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_status_forwards_to_agent() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    install_fakes(host.path(), &["openclaw"]);

    let mut cmd = tempalert(host.path());
    cmd.arg("status");
    cmd.assert().success();

    assert_eq!(calls(host.path()), "openclaw skill status\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_setup_non_interactive_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    install_fakes(host.path(), &["python3", "modprobe", "openclaw", "sudo"]);

    let mut cmd = tempalert(host.path());
    cmd.env("TEMPALERT_PROMPT_ENABLE_TELEGRAM", "no");
    cmd.args(["setup", "--non-interactive"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Setup complete"))
        .stdout(predicate::str::contains(SENSOR_ID));

    let config = fs::read_to_string(
        host.path()
            .join("home/.openclaw/skills/temperature-alert/config.yaml"),
    )?;
    assert!(!config.contains("notifications"));
    let parsed: AlertConfig = serde_yaml::from_str(&config)?;
    assert_eq!(parsed.config.sensor_id, SENSOR_ID);
    assert_eq!(parsed.config.high_threshold, 35.0);

    let boot = fs::read_to_string(host.path().join("boot/config.txt"))?;
    assert_eq!(boot, "dtparam=audio=on\ndtoverlay=w1-gpio\n");

    let log = calls(host.path());
    assert!(log.contains("modprobe w1-gpio"));
    assert!(log.contains("modprobe w1-therm"));
    assert!(log.contains(&format!(
        "openclaw skill install {}",
        host.path().join("skills/temperature-alert").display()
    )));
    assert!(log.contains("openclaw skill test temperature-alert --action read_sensor"));
    assert!(log.contains("openclaw skill enable temperature-alert"));
    assert!(!log.contains("test_notifications"));
    assert!(!log.contains("reboot"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_setup_rerun_keeps_boot_config_stable() -> Result<(), Box<dyn std::error::Error>> {
    let host = fake_host();
    install_fakes(host.path(), &["python3", "modprobe", "openclaw", "sudo"]);

    for _ in 0..2 {
        let mut cmd = tempalert(host.path());
        cmd.env("TEMPALERT_PROMPT_ENABLE_TELEGRAM", "no");
        cmd.args(["--non-interactive", "--skip-tests"]);
        cmd.assert().success();
    }

    let boot = fs::read_to_string(host.path().join("boot/config.txt"))?;
    assert_eq!(boot.matches("dtoverlay=w1-gpio").count(), 1);
    Ok(())
}
