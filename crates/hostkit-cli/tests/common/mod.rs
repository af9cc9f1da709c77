//! Shared E2E helpers for `hostkit` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::PathBuf;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(10);

const CONFIG_ENV_VARS: &[&str] = &[
    "HOSTKIT_DEBUG",
    "HOSTKIT_REFUND_WINDOW_DAYS",
    "HOSTKIT_FX_WINDOW_DAYS",
    "RUST_LOG",
];

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builds a `hostkit` command isolated from the user's config.
///
/// `HOME` and the project root both point at a fresh temp dir so neither
/// `~/.hostkit/config.toml` nor a stray `.hostkit/` is read. Keep the
/// returned guard alive for the test's duration.
pub fn hostkit_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let cmd = hostkit_cmd_in(&tmp);
    (cmd, tmp)
}

/// Like [`hostkit_cmd`], with a caller-prepared project root.
pub fn hostkit_cmd_in(root: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("hostkit");
    cmd.timeout(TIMEOUT);
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", root.path());
    cmd.arg("-C").arg(root.path());
    cmd
}

/// Writes `.hostkit/config.toml` under `root`.
pub fn write_project_config(root: &tempfile::TempDir, content: &str) {
    let dir = root.path().join(".hostkit");
    std::fs::create_dir_all(&dir).expect("create config dir");
    std::fs::write(dir.join("config.toml"), content).expect("write config");
}
