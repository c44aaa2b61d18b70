//! Configuration loading for the `anifetch` binary.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.anifetch/config.toml` (user)
//! 3. `/etc/anifetch/config.toml` (system)
//!
//! When no file exists the defaults are used. Every section and key is
//! optional.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::BatchConfig;
use crate::cache::CacheConfig;
use crate::providers::AniZipConfig;
use crate::providers::anizip::DEFAULT_BASE_URL;
use crate::{AnifetchError, Result};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub anizip: AniZipSection,
    #[serde(default)]
    pub nyaa: NyaaSection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub batch: BatchSection,
}

/// Mapping service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AniZipSection {
    /// Base URL (default: https://api.ani.zip).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AniZipSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Torrent index settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NyaaSection {
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for NyaaSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// Metadata cache settings. Unbounded and without expiry unless set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSection {
    #[serde(default)]
    pub max_entries: Option<u64>,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

/// Batch fetch settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchSection {
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    #[serde(default)]
    pub fail_fast: bool,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path that does not exist is an error; a missing user or
    /// system file is not.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AnifetchError::Configuration(format!("Failed to parse config: {e}")))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AnifetchError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            AnifetchError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(AnifetchError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".anifetch").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/anifetch/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn anizip_config(&self) -> AniZipConfig {
        AniZipConfig::new()
            .base_url(self.anizip.base_url.clone())
            .timeout(Duration::from_secs(self.anizip.timeout_secs))
    }

    pub fn nyaa_timeout(&self) -> Duration {
        Duration::from_secs(self.nyaa.timeout_secs)
    }

    pub fn cache_config(&self) -> CacheConfig {
        let mut config = CacheConfig::new();
        if let Some(n) = self.cache.max_entries {
            config = config.max_entries(n);
        }
        if let Some(secs) = self.cache.ttl_secs {
            config = config.ttl(Duration::from_secs(secs));
        }
        config
    }

    pub fn batch_config(&self) -> BatchConfig {
        let mut config = BatchConfig::new().fail_fast(self.batch.fail_fast);
        if let Some(n) = self.batch.max_concurrency {
            config = config.max_concurrency(n);
        }
        config
    }
}
