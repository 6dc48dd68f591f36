//! Configuration loading for ragdesk.
//! Reads ragdesk.toml from the current directory or the path in the
//! RAGDESK_CONFIG env var. Every field has a default, so a missing file
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "RAGDESK_CONFIG";
pub const BACKEND_URL_ENV: &str = "RAGDESK_BACKEND_URL";
pub const UI_BIND_ENV: &str = "RAGDESK_UI_BIND";
pub const LAUNCHER_BIND_ENV: &str = "RAGDESK_LAUNCHER_BIND";

const DEFAULT_CONFIG_FILE: &str = "ragdesk.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

// ── Backend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means no timeout: a hung backend hangs the UI action.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String { "https://fa-rag-backend.devcustomprojects.com".to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: None }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ── UI process ────────────────────────────────────────────────────────────────

/// When staged chapter files are removed after an initialize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    /// Remove staged files whatever the outcome of the call.
    #[default]
    Always,
    /// Remove staged files only after the backend accepted them.
    OnSuccess,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_ui_bind")]
    pub bind: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default)]
    pub cleanup: CleanupPolicy,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_ui_bind()          -> String  { "0.0.0.0:8501".to_string() }
fn default_upload_dir()       -> PathBuf { PathBuf::from(".") }
fn default_max_upload_bytes() -> usize   { 50 * 1024 * 1024 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bind: default_ui_bind(),
            upload_dir: default_upload_dir(),
            cleanup: CleanupPolicy::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ── Launcher process ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Spawn once and never restart.
    #[default]
    Never,
    /// Restart after a non-zero exit or spawn failure, up to `max_restarts`.
    OnFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default = "default_launcher_bind")]
    pub bind: String,
    /// Program started as the UI child. Unset resolves to the `ragdesk-ui`
    /// binary next to the launcher executable.
    #[serde(default)]
    pub ui_command: Option<PathBuf>,
    #[serde(default)]
    pub ui_args: Vec<String>,
    /// Reported verbatim by `GET /streamlit`.
    #[serde(default = "default_public_ui_url")]
    pub public_ui_url: String,
    #[serde(default)]
    pub restart: RestartPolicy,
    #[serde(default = "default_max_restarts")]
    pub max_restarts: u32,
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

fn default_launcher_bind()    -> String { "127.0.0.1:8000".to_string() }
fn default_public_ui_url()    -> String { "http://localhost:8501".to_string() }
fn default_max_restarts()     -> u32    { 3 }
fn default_restart_delay_ms() -> u64    { 1000 }

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            bind: default_launcher_bind(),
            ui_command: None,
            ui_args: Vec::new(),
            public_ui_url: default_public_ui_url(),
            restart: RestartPolicy::default(),
            max_restarts: default_max_restarts(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

impl LauncherConfig {
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

mod tests;

impl Config {
    /// Load configuration from ragdesk.toml, then apply environment overrides.
    /// Checks RAGDESK_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else if explicit.is_some() {
            // An explicitly named file that is missing is a mistake, not a default.
            return Err(ConfigError::Read {
                path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        } else {
            tracing::debug!("{} not found, using defaults", DEFAULT_CONFIG_FILE);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `RAGDESK_*` overrides. The lookup is injected so tests do not
    /// have to mutate the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend.base_url = url;
        }
        if let Some(bind) = lookup(UI_BIND_ENV) {
            self.ui.bind = bind;
        }
        if let Some(bind) = lookup(LAUNCHER_BIND_ENV) {
            self.launcher.bind = bind;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("backend.base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "backend.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        parse_bind("ui.bind", &self.ui.bind)?;
        parse_bind("launcher.bind", &self.launcher.bind)?;
        if self.ui.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("ui.max_upload_bytes must be > 0".into()));
        }
        Ok(())
    }

    pub fn ui_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("ui.bind", &self.ui.bind)
    }

    pub fn launcher_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("launcher.bind", &self.launcher.bind)
    }
}

fn parse_bind(field: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::Invalid(format!("{field} must be a socket address like 0.0.0.0:8501, got '{value}'"))
    })
}
