use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

pub const DEFAULT_CONFIG_PATH: &str = "collab.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub seed_path: Option<PathBuf>,
    pub assistant_api_key: Option<String>,
    pub auto_login: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            seed_path: None,
            assistant_api_key: None,
            auto_login: None,
        }
    }
}

/// Defaults, then the config file (if present), then environment overrides.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", config_path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config '{}'", config_path.display()))
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    if let Some(v) = file_cfg.get("seed_path") {
        settings.seed_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.get("assistant_api_key") {
        settings.assistant_api_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("auto_login") {
        settings.auto_login = Some(v.clone());
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("COLLAB_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__SEED_PATH") {
        settings.seed_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("GEMINI_API_KEY") {
        settings.assistant_api_key = Some(v);
    }
    if let Some(v) = env("APP__ASSISTANT_API_KEY") {
        settings.assistant_api_key = Some(v);
    }

    if let Some(v) = env("APP__AUTO_LOGIN") {
        settings.auto_login = Some(v).filter(|v| !v.trim().is_empty());
    }
}
