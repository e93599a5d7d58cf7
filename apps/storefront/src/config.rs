use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8082/api/v1".into(),
            request_timeout_secs: 30,
            token: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    token: Option<String>,
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.endpoint {
        settings.endpoint = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if file_cfg.token.is_some() {
        settings.token = file_cfg.token;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("STOREFRONT_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    for key in ["STOREFRONT_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(parsed) = lookup(key).and_then(|v| v.parse::<u64>().ok()) {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = lookup("STOREFRONT_TOKEN").filter(|v| !v.is_empty()) {
        settings.token = Some(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
