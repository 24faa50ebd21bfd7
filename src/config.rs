//! Layered configuration: built-in defaults, then the TOML file, then
//! environment variables and command-line flags (clap resolves those two,
//! flags winning).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::paths::Paths;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RECONNECT_INITIAL_MS: u64 = 500;
const DEFAULT_RECONNECT_MAX_MS: u64 = 30_000;
const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    Tasks,
    Chat,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "taskdesk", version, about = "Terminal client for the taskdesk task and chat backend")]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Base URL of the REST API
    #[arg(long, env = "TASKDESK_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL of the notification socket (derived from --api-url when unset)
    #[arg(long, env = "TASKDESK_WS_URL", value_name = "URL")]
    pub ws_url: Option<String>,

    /// Where the bearer token is persisted between runs
    #[arg(long, env = "TASKDESK_TOKEN_FILE", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Screen shown after login
    #[arg(long, value_enum, default_value_t = StartScreen::Tasks)]
    pub screen: StartScreen,

    /// Log filter directive, e.g. `debug` or `taskdesk_tui=trace` (RUST_LOG wins when set)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Reconnect and delivery policy of the notification socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub reconnect_initial: Duration,
    pub reconnect_max: Duration,
    pub queue_capacity: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            reconnect_initial: Duration::from_millis(DEFAULT_RECONNECT_INITIAL_MS),
            reconnect_max: Duration::from_millis(DEFAULT_RECONNECT_MAX_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub ws_url: String,
    pub token_file: PathBuf,
    pub log_dir: PathBuf,
    pub request_timeout: Duration,
    pub notifications: NotificationSettings,
    pub start_screen: StartScreen,
    pub log_level: String,
}

/// On-disk shape of config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub ws_url: Option<String>,
    pub token_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub notifications: FileNotifications,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileNotifications {
    pub reconnect_initial_ms: Option<u64>,
    pub reconnect_max_ms: Option<u64>,
    pub queue_capacity: Option<usize>,
}

impl Config {
    /// Read the config file (if any) and merge it with the command line.
    /// An explicitly passed `--config` must exist; the default location may not.
    pub fn load(cli: &Cli, paths: &Paths) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => read_file_config(path)?,
            None => match read_file_config(&paths.config_file) {
                Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    FileConfig::default()
                }
                other => other?,
            },
        };
        Self::from_layers(file, cli, paths)
    }

    /// Pure merge of the layers. Later layers win.
    pub fn from_layers(file: FileConfig, cli: &Cli, paths: &Paths) -> Result<Self, ConfigError> {
        let api_url = cli
            .api_url
            .clone()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_url("api_url", &api_url, &["http://", "https://"])?;

        let ws_url = match cli.ws_url.clone().or(file.ws_url) {
            Some(url) => normalize_url("ws_url", &url, &["ws://", "wss://"])?,
            None => derive_ws_url(&api_url),
        };

        let defaults = NotificationSettings::default();
        let notifications = NotificationSettings {
            reconnect_initial: file
                .notifications
                .reconnect_initial_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.reconnect_initial),
            reconnect_max: file
                .notifications
                .reconnect_max_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.reconnect_max),
            queue_capacity: file
                .notifications
                .queue_capacity
                .unwrap_or(defaults.queue_capacity)
                .max(1),
        };

        Ok(Self {
            api_url,
            ws_url,
            token_file: cli
                .token_file
                .clone()
                .or(file.token_file)
                .unwrap_or_else(|| paths.token_file.clone()),
            log_dir: file.log_dir.unwrap_or_else(|| paths.log_dir.clone()),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            notifications,
            start_screen: cli.screen,
            log_level: cli.log_level.clone(),
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_url(key: &'static str, value: &str, schemes: &[&str]) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let valid = schemes
        .iter()
        .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));
    if !valid {
        return Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// `http://host` → `ws://host`, `https://host` → `wss://host`.
pub fn derive_ws_url(api_url: &str) -> String {
    if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_url.to_string()
    }
}
