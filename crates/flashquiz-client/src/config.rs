//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use flashquiz_core::theme::{Theme, ThemeOverrides};

/// Top-level flashquiz configuration.
///
/// Note: Custom Debug impl masks the password to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the flashquiz server, without the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Username used by commands that need a session.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Theme color overrides.
    #[serde(default)]
    pub theme: ThemeOverrides,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("theme", &self.theme)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            username: None,
            password: None,
            theme: ThemeOverrides::default(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The default theme with this config's overrides applied.
    pub fn theme(&self) -> Theme {
        Theme::default().with_overrides(&self.theme)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `flashquiz.toml` in the current directory
/// 2. `~/.config/flashquiz/config.toml`
///
/// Environment variable overrides: `FLASHQUIZ_BASE_URL`, `FLASHQUIZ_USERNAME`,
/// `FLASHQUIZ_PASSWORD`.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    if let Ok(url) = std::env::var("FLASHQUIZ_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(username) = std::env::var("FLASHQUIZ_USERNAME") {
        config.username = Some(username);
    }
    if let Ok(password) = std::env::var("FLASHQUIZ_PASSWORD") {
        config.password = Some(password);
    }

    Ok(config)
}

/// Parse a TOML config document and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<ClientConfig> {
    let mut config: ClientConfig = toml::from_str(content)?;
    config.base_url = resolve_env_vars(&config.base_url);
    config.username = config.username.as_deref().map(resolve_env_vars);
    config.password = config.password.as_deref().map(resolve_env_vars);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashquiz"))
}
