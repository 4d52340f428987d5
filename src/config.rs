use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::catalog::{ANILIBRIA_API_URL, ANILIBRIA_CDN_URL, CatalogConfig, KODIK_API_URL, PAGE_SIZE};

/// Optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "anigate.toml";

/// Environment prefix, e.g. `ANIGATE_SERVER__PORT`
pub const ENV_PREFIX: &str = "ANIGATE";

/// Legacy variable for the Kodik API key
pub const KODIK_API_KEY_VAR: &str = "KODIK_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub primary: PrimaryConfig,
    pub secondary: SecondaryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed origins; empty or `*` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// AniLibria settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    pub api_base: String,
    pub cdn_base: String,
    pub timeout_secs: u64,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            api_base: ANILIBRIA_API_URL.to_string(),
            cdn_base: ANILIBRIA_CDN_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Kodik settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecondaryConfig {
    pub enabled: bool,
    pub api_base: String,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub csrf_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: KODIK_API_URL.to_string(),
            api_key: None,
            bearer_token: None,
            csrf_token: None,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load from [`CONFIG_FILE`] and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Defaults, then the optional file at `path`, then `ANIGATE_*` variables
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let mut config: Self = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(key) = std::env::var(KODIK_API_KEY_VAR)
            && !key.trim().is_empty()
        {
            config.secondary.api_key = Some(key);
        }

        config.secondary.drop_blank_secrets();
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            cdn_base: self.primary.cdn_base.clone(),
            page_size: PAGE_SIZE,
        }
    }
}

impl PrimaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SecondaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn drop_blank_secrets(&mut self) {
        for secret in [&mut self.api_key, &mut self.bearer_token, &mut self.csrf_token] {
            if secret.as_deref().is_some_and(|value| value.trim().is_empty()) {
                *secret = None;
            }
        }
    }
}
