use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// File values first, then `API_BASE_URL`, then `APP__API_BASE_URL`.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = Some(v.clone());
            }
        }
    }

    if let Some(v) = env("API_BASE_URL") {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = Some(v);
    }

    settings
}

pub fn prepare_api_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let base_url = normalize_api_base_url(raw_base_url);
    if base_url.is_empty() {
        bail!("api base url is empty");
    }

    let parsed =
        Url::parse(&base_url).with_context(|| format!("invalid api base url '{base_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "api base url '{base_url}' must use http or https, not '{}'",
            parsed.scheme()
        );
    }

    Ok(base_url)
}

fn normalize_api_base_url(raw_base_url: &str) -> String {
    raw_base_url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
