use std::{fs, path::Path, time::Duration};

use client_core::{ControllerConfig, WalletSession, DEFAULT_MIN_BUSY, DEFAULT_MIN_BUSY_MS};
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "wallet.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub wallet_api_url: String,
    pub wallet_name: Option<String>,
    pub wallet_token: Option<String>,
    pub min_busy_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wallet_api_url: "http://127.0.0.1:28183".into(),
            wallet_name: None,
            wallet_token: None,
            min_busy_ms: DEFAULT_MIN_BUSY_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    wallet_api_url: Option<String>,
    wallet_name: Option<String>,
    wallet_token: Option<String>,
    min_busy_ms: Option<u64>,
}

impl Settings {
    /// Busy windows shorter than [`DEFAULT_MIN_BUSY`] are raised to it.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            min_busy: Duration::from_millis(self.min_busy_ms).max(DEFAULT_MIN_BUSY),
        }
    }

    pub fn session(&self) -> Option<WalletSession> {
        let session = WalletSession::new(
            self.wallet_name.clone()?,
            self.wallet_token.clone()?,
        );
        session.is_valid().then_some(session)
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string(Path::new(SETTINGS_FILE)).ok();
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub(crate) fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.wallet_api_url {
                    settings.wallet_api_url = v;
                }
                if file_cfg.wallet_name.is_some() {
                    settings.wallet_name = file_cfg.wallet_name;
                }
                if file_cfg.wallet_token.is_some() {
                    settings.wallet_token = file_cfg.wallet_token;
                }
                if let Some(v) = file_cfg.min_busy_ms {
                    settings.min_busy_ms = v;
                }
            }
            Err(err) => warn!("ignoring malformed {SETTINGS_FILE}: {err}"),
        }
    }

    if let Some(v) = env("WALLET_API_URL") {
        settings.wallet_api_url = v;
    }
    if let Some(v) = env("APP__WALLET_API_URL") {
        settings.wallet_api_url = v;
    }

    if let Some(v) = env("APP__WALLET_NAME") {
        settings.wallet_name = Some(v);
    }
    if let Some(v) = env("APP__WALLET_TOKEN") {
        settings.wallet_token = Some(v);
    }

    if let Some(v) = env("APP__MIN_BUSY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.min_busy_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__MIN_BUSY_MS"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
