//! Configuration file loading with precedence handling.

use crate::model::ClientError;
use crate::resolver::ResolverSettings;
use crate::search::SearchSettings;
use crate::state::SuggestionSettings;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default EBI search domain for the identifiers.org registry.
pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://www.ebi.ac.uk/ebisearch/ws/rest/identifiers_registry";
/// Default resolver API.
pub const DEFAULT_RESOLVER_API_URL: &str = "https://resolver.api.identifiers.org";
/// Default base for resolvable URIs.
pub const DEFAULT_IDENTIFIERS_URL: &str = "http://identifiers.org";
/// Default registry web site.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.identifiers.org";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/idorg-bar/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Namespace search endpoint.
    #[serde(default)]
    pub search_endpoint: Option<String>,

    /// Resolver API base URL.
    #[serde(default)]
    pub resolver_api_url: Option<String>,

    /// Base URL of resolvable URIs.
    #[serde(default)]
    pub identifiers_url: Option<String>,

    /// Registry web site, used for namespace links.
    #[serde(default)]
    pub registry_url: Option<String>,

    /// Debounce delay in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Maximum number of suggestions shown.
    #[serde(default)]
    pub suggestion_page_size: Option<usize>,

    /// Number of hits requested from the search service.
    #[serde(default)]
    pub search_response_size: Option<usize>,

    /// Boost namespaces whose pattern matches a single query token.
    #[serde(default)]
    pub rescore_single_id: Option<bool>,

    /// HTTP request timeout in milliseconds.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. URLs stay
/// textual here and are validated when projected into component settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Namespace search endpoint.
    pub search_endpoint: String,
    /// Resolver API base URL.
    pub resolver_api_url: String,
    /// Base URL of resolvable URIs.
    pub identifiers_url: String,
    /// Registry web site.
    pub registry_url: String,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// Maximum number of suggestions shown.
    pub suggestion_page_size: usize,
    /// Number of hits requested from the search service.
    pub search_response_size: usize,
    /// Single-id rescoring toggle.
    pub rescore_single_id: bool,
    /// HTTP request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            resolver_api_url: DEFAULT_RESOLVER_API_URL.to_string(),
            identifiers_url: DEFAULT_IDENTIFIERS_URL.to_string(),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            debounce_ms: 600,
            suggestion_page_size: 25,
            search_response_size: 100,
            rescore_single_id: true,
            request_timeout_ms: 10_000,
            log_file_path: default_log_path(),
        }
    }
}

fn parse_url(text: &str) -> Result<Url, ClientError> {
    Url::parse(text).map_err(|e| ClientError::InvalidUrl {
        url: text.to_string(),
        reason: e.to_string(),
    })
}

impl ResolvedConfig {
    /// Settings for the suggestion controller.
    pub fn suggestion_settings(&self) -> SuggestionSettings {
        SuggestionSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            page_size: self.suggestion_page_size,
        }
    }

    /// Settings for the namespace search client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the search endpoint does not parse.
    pub fn search_settings(&self) -> Result<SearchSettings, ClientError> {
        Ok(SearchSettings {
            endpoint: parse_url(&self.search_endpoint)?,
            response_size: self.search_response_size,
            rescore_single_id: self.rescore_single_id,
            timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }

    /// Settings for the resolver client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if either URL does not parse.
    pub fn resolver_settings(&self) -> Result<ResolverSettings, ClientError> {
        Ok(ResolverSettings {
            api_url: parse_url(&self.resolver_api_url)?,
            identifiers_url: parse_url(&self.identifiers_url)?,
            timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/idorg-bar/idorg-bar.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("idorg-bar").join("idorg-bar.log")
    } else {
        PathBuf::from("idorg-bar.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/idorg-bar/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("idorg-bar").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `IDORG_BAR_CONFIG` environment variable
/// 3. Default path `~/.config/idorg-bar/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("IDORG_BAR_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `IDORG_SEARCH_ENDPOINT`: namespace search endpoint
/// - `IDORG_RESOLVER_API_URL`: resolver API base
/// - `IDORG_DEBOUNCE_MS`: debounce delay (ignored unless it parses as a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(endpoint) = std::env::var("IDORG_SEARCH_ENDPOINT") {
        config.search_endpoint = endpoint;
    }

    if let Ok(api_url) = std::env::var("IDORG_RESOLVER_API_URL") {
        config.resolver_api_url = api_url;
    }

    if let Some(debounce_ms) = std::env::var("IDORG_DEBOUNCE_MS")
        .ok()
        .and_then(|value| value.trim().parse().ok())
    {
        config.debounce_ms = debounce_ms;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        search_endpoint: config.search_endpoint.unwrap_or(defaults.search_endpoint),
        resolver_api_url: config.resolver_api_url.unwrap_or(defaults.resolver_api_url),
        identifiers_url: config.identifiers_url.unwrap_or(defaults.identifiers_url),
        registry_url: config.registry_url.unwrap_or(defaults.registry_url),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        suggestion_page_size: config
            .suggestion_page_size
            .unwrap_or(defaults.suggestion_page_size),
        search_response_size: config
            .search_response_size
            .unwrap_or(defaults.search_response_size),
        rescore_single_id: config
            .rescore_single_id
            .unwrap_or(defaults.rescore_single_id),
        request_timeout_ms: config
            .request_timeout_ms
            .unwrap_or(defaults.request_timeout_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// take effect.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    debounce_ms_override: Option<u64>,
    no_rescore: bool,
) -> ResolvedConfig {
    if let Some(debounce_ms) = debounce_ms_override {
        config.debounce_ms = debounce_ms;
    }

    if no_rescore {
        config.rescore_single_id = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_idorg_bar_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("idorg-bar.log"),
            "Default log path should end with 'idorg-bar.log', got: {:?}",
            path
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }
}
