//! Booknlife automation client
//!
//! Automates the Booknlife retail platform over its JSON API: login with
//! AES-encrypted credentials and reCAPTCHA solving, balance lookup, and
//! prepaid pin-code recharge. One [`client::BooknlifeClient`] wraps one
//! HTTP session (cookie jar + bearer token).

pub mod captcha;
pub mod client;
pub mod crypto;

use std::path::PathBuf;

use tracing::{error, info, warn};

pub use client::{BooknlifeClient, ClientError, PinEntry};

/// Client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// 2Captcha API key for CAPTCHA solving
    #[serde(default)]
    pub captcha_api_key: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Seconds between 2Captcha result polls
    #[serde(default = "default_captcha_poll")]
    pub captcha_poll_secs: u64,

    /// Maximum seconds to wait for a CAPTCHA solve
    #[serde(default = "default_captcha_max_solve")]
    pub captcha_max_solve_secs: u64,
}

fn default_http_timeout() -> u64 {
    120
}

fn default_captcha_poll() -> u64 {
    5
}

fn default_captcha_max_solve() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            captcha_api_key: String::new(),
            http_timeout_secs: default_http_timeout(),
            captcha_poll_secs: default_captcha_poll(),
            captcha_max_solve_secs: default_captcha_max_solve(),
        }
    }
}

/// Get log directory path
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("booknlife-client").join("logs"))
}

impl ClientConfig {
    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("booknlife-client").join("config.json"))
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str(&content) {
                        Ok(config) => {
                            info!("Loaded config from {:?}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file: {}", e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file: {}", e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    error!("Failed to create config directory: {}", e);
                    return;
                }
            }

            match serde_json::to_string_pretty(self) {
                Ok(content) => {
                    if let Err(e) = std::fs::write(&path, content) {
                        error!("Failed to save config: {}", e);
                    } else {
                        info!("Config saved to {:?}", path);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize config: {}", e);
                }
            }
        }
    }
}

/// Initialize logging (console plus optional daily rolling file)
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "booknlife-client.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.http_timeout_secs, 120);
        assert_eq!(config.captcha_poll_secs, 5);
        assert_eq!(config.captcha_max_solve_secs, 120);
        assert!(config.captcha_api_key.is_empty());
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "captchaApiKey": "abc123" }"#).unwrap();
        assert_eq!(config.captcha_api_key, "abc123");
        assert_eq!(config.http_timeout_secs, 120);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = ClientConfig {
            captcha_api_key: "key".into(),
            http_timeout_secs: 60,
            captcha_poll_secs: 3,
            captcha_max_solve_secs: 90,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.http_timeout_secs, 60);
        assert_eq!(back.captcha_poll_secs, 3);
    }
}
