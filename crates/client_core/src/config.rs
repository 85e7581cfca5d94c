use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SETTINGS_FILE: &str = "advisor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub debounce_ms: u64,
    pub suggestion_limit: usize,
    pub min_query_chars: usize,
    pub http_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            debounce_ms: 300,
            suggestion_limit: 5,
            min_query_chars: 2,
            http_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    debounce_ms: Option<u64>,
    suggestion_limit: Option<usize>,
    min_query_chars: Option<usize>,
    http_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    pub fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw).context("failed to parse settings file")?;
        if let Some(v) = file_cfg.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file_cfg.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = file_cfg.suggestion_limit {
            self.suggestion_limit = v;
        }
        if let Some(v) = file_cfg.min_query_chars {
            self.min_query_chars = v;
        }
        if let Some(v) = file_cfg.http_timeout_secs {
            self.http_timeout_secs = Some(v);
        }
        Ok(())
    }

    /// Applies environment overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ADVISOR_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = lookup("APP__DEBOUNCE_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.debounce_ms = parsed;
            }
        }
        if let Some(v) = lookup("APP__SUGGESTION_LIMIT") {
            if let Ok(parsed) = v.trim().parse::<usize>() {
                self.suggestion_limit = parsed;
            }
        }
        if let Some(v) = lookup("APP__HTTP_TIMEOUT_SECS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.http_timeout_secs = Some(parsed);
            }
        }
    }

    pub fn validate(mut self) -> anyhow::Result<Self> {
        self.api_base_url = normalize_base_url(&self.api_base_url)?;
        if self.suggestion_limit == 0 {
            bail!("suggestion_limit must be at least 1");
        }
        Ok(self)
    }
}

/// Defaults, then `path` (or `advisor.toml` when present), then the process
/// environment.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            settings.apply_file(&raw)?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_SETTINGS_FILE) {
                settings.apply_file(&raw)?;
            }
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    settings.validate()
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    }

    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid advisor API url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("advisor API url must start with http:// or https://: '{trimmed}'");
    }

    Ok(trimmed.to_string())
}
