//! Tests for the `mochat-config` loader.
//!
//! These exercise default handling, file discovery, and environment
//! overrides. They mutate process-wide state (environment variables and
//! the current directory), so they are serialized.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use mochat_config::{load, DatabaseConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "MOCHAT_CONFIG",
    "MOCHAT__DATABASE__URL",
    "MOCHAT__DATABASE__MAX_CONNECTIONS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        let mut ctx = Self {
            vars: Vec::new(),
            original_dir: None,
        };
        for key in ENV_VARS_TO_RESET {
            ctx.remove_var(key);
        }
        ctx
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn loads_defaults_when_nothing_is_configured() {
    let _ctx = TestContext::new();

    let config = load().expect("defaults should load");
    let defaults = DatabaseConfig::default();

    assert_eq!(config.database.url, defaults.url);
    assert_eq!(config.database.max_connections, defaults.max_connections);
}

#[test]
#[serial]
fn environment_variables_override_defaults() {
    let mut ctx = TestContext::new();
    ctx.set_var("MOCHAT__DATABASE__URL", "sqlite://override.db");
    ctx.set_var("MOCHAT__DATABASE__MAX_CONNECTIONS", "3");

    let config = load().expect("environment overrides should load");

    assert_eq!(config.database.url, "sqlite://override.db");
    assert_eq!(config.database.max_connections, 3);
}

#[test]
#[serial]
fn explicit_config_file_is_honoured() {
    let mut ctx = TestContext::new();

    let dir = TempDir::new().expect("failed to create temp dir");
    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[database]\nurl = \"sqlite://from-file.db\"\nmax_connections = 5\n",
    )
    .expect("failed to write config file");

    ctx.set_var("MOCHAT_CONFIG", config_path.to_string_lossy());

    let config = load().expect("file-backed configuration should load");

    assert_eq!(config.database.url, "sqlite://from-file.db");
    assert_eq!(config.database.max_connections, 5);
}

#[test]
#[serial]
fn config_file_is_discovered_in_working_directory() {
    let mut ctx = TestContext::new();

    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(
        dir.path().join("mochat.toml"),
        "[database]\nurl = \"sqlite://discovered.db\"\n",
    )
    .expect("failed to write config file");

    ctx.set_current_dir(dir.path());

    let config = load().expect("discovered configuration should load");

    assert_eq!(config.database.url, "sqlite://discovered.db");
    // max_connections falls back to the default when the file omits it.
    assert_eq!(
        config.database.max_connections,
        DatabaseConfig::default().max_connections
    );
}

#[test]
#[serial]
fn environment_overrides_win_over_file_values() {
    let mut ctx = TestContext::new();

    let dir = TempDir::new().expect("failed to create temp dir");
    let config_path = dir.path().join("mochat.toml");
    fs::write(
        &config_path,
        "[database]\nurl = \"sqlite://from-file.db\"\n",
    )
    .expect("failed to write config file");

    ctx.set_var("MOCHAT_CONFIG", config_path.to_string_lossy());
    ctx.set_var("MOCHAT__DATABASE__URL", "sqlite://from-env.db");

    let config = load().expect("configuration should load");

    assert_eq!(config.database.url, "sqlite://from-env.db");
}
