use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "mochat.toml",
    "config/mochat.toml",
    "crates/config/mochat.toml",
    "../mochat.toml",
    "../config/mochat.toml",
    "../crates/config/mochat.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://mochat.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Load the application configuration by combining defaults, an optional
/// configuration file, and environment overrides.
///
/// ```
/// use mochat_config::load;
///
/// std::env::remove_var("MOCHAT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = DatabaseConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("database.url", defaults.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.max_connections),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("MOCHAT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("MOCHAT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via MOCHAT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
