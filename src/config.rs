use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::constants::{assets, dashboard, server, upstream, DEFAULT_LOG_LEVEL};
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_client_dist_dir")]
    pub client_dist_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    /// No timeout when unset
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default = "default_dashboard_base_url")]
    pub dashboard_base_url: String,
    #[serde(default = "default_frame_ancestors")]
    pub frame_ancestors: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(assets::DEFAULT_PUBLIC_DIR)
}

fn default_client_dist_dir() -> PathBuf {
    PathBuf::from(assets::DEFAULT_CLIENT_DIST_DIR)
}

fn default_upstream_base_url() -> String {
    upstream::DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    upstream::DEFAULT_USER_AGENT.to_string()
}

fn default_dashboard_base_url() -> String {
    dashboard::DEFAULT_BASE_URL.to_string()
}

fn default_frame_ancestors() -> Vec<String> {
    dashboard::DEFAULT_FRAME_ANCESTORS.iter().map(|s| s.to_string()).collect()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            client_dist_dir: default_client_dist_dir(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            api_key: None,
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            assets: AssetsConfig::default(),
            upstream: UpstreamConfig::default(),
            dashboard_base_url: default_dashboard_base_url(),
            frame_ancestors: default_frame_ancestors(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` (or `CONFIG_PATH`), apply env overrides and validate.
    /// A missing file falls back to built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
        let path = Path::new(&config_path);

        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(content)?)
    }

    /// Env values win over the file. `lookup` is injected so tests don't touch
    /// the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { var: "PORT", value: port })?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(key) = lookup("COINGECKO_API_KEY").filter(|k| !k.is_empty()) {
            self.upstream.api_key = Some(key);
        }
        if let Some(base_url) = lookup("COINGECKO_BASE_URL") {
            self.upstream.base_url = base_url;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.upstream.base_url)
            .map_err(|source| ConfigError::InvalidUrl { field: "upstream.base_url", source })?;
        self.dashboard_url()?;

        let csp = self.content_security_policy();
        if axum::http::HeaderValue::from_str(&csp).is_err() {
            return Err(ConfigError::InvalidHeader { field: "frame_ancestors", value: csp });
        }
        Ok(())
    }

    pub fn dashboard_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.dashboard_base_url)
            .map_err(|source| ConfigError::InvalidUrl { field: "dashboard_base_url", source })
    }

    /// `frame-ancestors` directive restricting which parents may embed us
    pub fn content_security_policy(&self) -> String {
        format!("frame-ancestors {}", self.frame_ancestors.join(" "))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn openapi_path(&self) -> PathBuf {
        self.assets.public_dir.join(assets::OPENAPI_FILE)
    }

    pub fn well_known_dir(&self) -> PathBuf {
        self.assets.public_dir.join(assets::WELL_KNOWN_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.assets.client_dist_dir.join(assets::INDEX_FILE)
    }
}
