//! Application configuration for LinkEmbed.
//!
//! User config lives at `~/.linkembed/linkembed.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LinkEmbedError, Result};
use crate::types::{FilterConfig, ProviderId};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "linkembed.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".linkembed";

// ---------------------------------------------------------------------------
// Config structs (matching linkembed.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Filter-wide settings.
    #[serde(default)]
    pub filter: FilterSettings,

    /// Per-provider enable flags.
    #[serde(default)]
    pub providers: ProviderToggles,

    /// oEmbed lookup transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// `[filter]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Replace video embeds with click-to-load placeholders.
    #[serde(default)]
    pub lazyload: bool,
}

/// `[providers]` section. Every provider is on unless switched off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderToggles {
    #[serde(default = "default_true")]
    pub youtube: bool,
    #[serde(default = "default_true")]
    pub vimeo: bool,
    #[serde(default = "default_true")]
    pub slideshare: bool,
    #[serde(default = "default_true")]
    pub officemix: bool,
    #[serde(default = "default_true")]
    pub issuu: bool,
    #[serde(default = "default_true")]
    pub screenr: bool,
    #[serde(default = "default_true")]
    pub soundcloud: bool,
    #[serde(default = "default_true")]
    pub ted: bool,
    #[serde(default = "default_true")]
    pub pollev: bool,
}

impl Default for ProviderToggles {
    fn default() -> Self {
        Self {
            youtube: true,
            vimeo: true,
            slideshare: true,
            officemix: true,
            issuu: true,
            screenr: true,
            soundcloud: true,
            ted: true,
            pollev: true,
        }
    }
}

impl ProviderToggles {
    /// Whether the flag for `provider` is set.
    pub fn get(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::YouTube => self.youtube,
            ProviderId::Vimeo => self.vimeo,
            ProviderId::Slideshare => self.slideshare,
            ProviderId::OfficeMix => self.officemix,
            ProviderId::Issuu => self.issuu,
            ProviderId::Screenr => self.screenr,
            ProviderId::Soundcloud => self.soundcloud,
            ProviderId::Ted => self.ted,
            ProviderId::PollEv => self.pollev,
        }
    }
}

fn default_true() -> bool {
    true
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds allowed for establishing each connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Skip TLS certificate verification on oEmbed lookups.
    ///
    /// Off by default. Only enable for endpoints behind intercepting proxies
    /// or with broken chains; it exposes lookups to tampering.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            accept_invalid_certs: false,
        }
    }
}

fn default_connect_timeout() -> u64 {
    15
}

// ---------------------------------------------------------------------------
// Filter snapshot (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

impl From<&AppConfig> for FilterConfig {
    fn from(config: &AppConfig) -> Self {
        Self::with_providers(
            ProviderId::ALL
                .into_iter()
                .filter(|p| config.providers.get(*p)),
            config.filter.lazyload,
        )
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.linkembed/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LinkEmbedError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.linkembed/linkembed.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LinkEmbedError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        LinkEmbedError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LinkEmbedError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LinkEmbedError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LinkEmbedError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
