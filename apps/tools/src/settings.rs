use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use data_model::DEFAULT_IMAGE_BASE;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub image_base_uri: String,
    pub seed_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_base_uri: DEFAULT_IMAGE_BASE.into(),
            seed_path: None,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `catalog.toml` (or `config_path`), then `APP__*` environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    build_settings(config_path, app_environment())
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("__")
        .separator("__")
}

fn build_settings(config_path: Option<&Path>, env: Environment) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let file = match config_path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    };

    let settings: Settings = Config::builder()
        .set_default("image_base_uri", defaults.image_base_uri)?
        .set_default("log_filter", defaults.log_filter)?
        .add_source(file)
        .add_source(env)
        .build()
        .context("failed to load catalog settings")?
        .try_deserialize()
        .context("invalid catalog settings")?;

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
