//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and environment
//! variables, and merging configurations with proper precedence rules.
//! Precedence, lowest to highest: built-in defaults, XDG config, home
//! config, local config, `DS_*` environment variables.

use crate::error::SuggestError;
use crate::types::{CheckConfig, ProviderMode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that operators can
/// create to set defaults for the server and library.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// General default values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Availability-provider settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    /// Rate budget and batching settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<LimitsConfig>,

    /// Candidate generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

/// General default values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default provider mode: "simulated" or "live"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Price used for fallback results and priceless provider responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_price: Option<f64>,

    /// How many candidates are backfilled on a zero-result check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_count: Option<usize>,
}

/// Availability-provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Provider API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Availability endpoint base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-lookup timeout (as string, e.g., "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// Rate budget and batching settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LimitsConfig {
    /// Maximum external lookups per budget window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_api_calls: Option<u32>,

    /// Budget window length (as string, e.g., "1h", "30m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_interval: Option<String>,

    /// Concurrent lookups per batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Pause between batches (as string, e.g., "1s", "500ms")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_delay: Option<String>,

    /// Maximum results synthesized in simulated mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_limit: Option<usize>,
}

/// Candidate generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Extra prefixes appended to the built-in creative list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_prefixes: Option<Vec<String>>,

    /// Extra suffixes appended to the built-in creative list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_suffixes: Option<Vec<String>>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit debug logs for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SuggestError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SuggestError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SuggestError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            SuggestError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        // Validate the loaded configuration
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them
    /// according to precedence rules.
    pub fn discover_and_load(&self) -> Result<FileConfig, SuggestError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            warn!("multiple config files found, later entries take precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                warn!("  {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-suggest.toml", "./.domain-suggest.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".domain-suggest.toml", "domain-suggest.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-suggest").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lo), Some(hi)) => {
                    if hi.mode.is_some() {
                        lo.mode = hi.mode;
                    }
                    if hi.page_size.is_some() {
                        lo.page_size = hi.page_size;
                    }
                    if hi.default_price.is_some() {
                        lo.default_price = hi.default_price;
                    }
                    if hi.fallback_count.is_some() {
                        lo.fallback_count = hi.fallback_count;
                    }
                    Some(lo)
                }
                (lo, hi) => hi.or(lo),
            },
            provider: match (lower.provider, higher.provider) {
                (Some(mut lo), Some(hi)) => {
                    if hi.api_key.is_some() {
                        lo.api_key = hi.api_key;
                    }
                    if hi.base_url.is_some() {
                        lo.base_url = hi.base_url;
                    }
                    if hi.timeout.is_some() {
                        lo.timeout = hi.timeout;
                    }
                    Some(lo)
                }
                (lo, hi) => hi.or(lo),
            },
            limits: match (lower.limits, higher.limits) {
                (Some(mut lo), Some(hi)) => {
                    if hi.max_api_calls.is_some() {
                        lo.max_api_calls = hi.max_api_calls;
                    }
                    if hi.reset_interval.is_some() {
                        lo.reset_interval = hi.reset_interval;
                    }
                    if hi.batch_size.is_some() {
                        lo.batch_size = hi.batch_size;
                    }
                    if hi.batch_delay.is_some() {
                        lo.batch_delay = hi.batch_delay;
                    }
                    if hi.simulated_limit.is_some() {
                        lo.simulated_limit = hi.simulated_limit;
                    }
                    Some(lo)
                }
                (lo, hi) => hi.or(lo),
            },
            generation: match (lower.generation, higher.generation) {
                (Some(mut lo), Some(hi)) => {
                    if hi.extra_prefixes.is_some() {
                        lo.extra_prefixes = hi.extra_prefixes;
                    }
                    if hi.extra_suffixes.is_some() {
                        lo.extra_suffixes = hi.extra_suffixes;
                    }
                    Some(lo)
                }
                (lo, hi) => hi.or(lo),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), SuggestError> {
        if let Some(defaults) = &config.defaults {
            if let Some(mode) = &defaults.mode {
                if ProviderMode::parse(mode).is_none() {
                    return Err(SuggestError::config(format!(
                        "Invalid mode '{}'. Use 'simulated' or 'live'",
                        mode
                    )));
                }
            }

            if let Some(page_size) = defaults.page_size {
                if page_size == 0 || page_size > 100 {
                    return Err(SuggestError::config(
                        "page_size must be between 1 and 100",
                    ));
                }
            }

            if let Some(price) = defaults.default_price {
                if price < 0.0 {
                    return Err(SuggestError::config("default_price must be non-negative"));
                }
            }
        }

        if let Some(provider) = &config.provider {
            if let Some(timeout_str) = &provider.timeout {
                if parse_duration_string(timeout_str).is_none() {
                    return Err(SuggestError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }
        }

        if let Some(limits) = &config.limits {
            if let Some(batch_size) = limits.batch_size {
                if batch_size == 0 || batch_size > 20 {
                    return Err(SuggestError::config(
                        "batch_size must be between 1 and 20",
                    ));
                }
            }

            for (field, value) in [
                ("reset_interval", &limits.reset_interval),
                ("batch_delay", &limits.batch_delay),
            ] {
                if let Some(duration_str) = value {
                    if parse_duration_string(duration_str).is_none() {
                        return Err(SuggestError::config(format!(
                            "Invalid {} format '{}'. Use format like '500ms', '1s', '30m', '1h'",
                            field, duration_str
                        )));
                    }
                }
            }

            // A zero window would break the reset timer
            if let Some(interval) = limits.reset_interval.as_deref().and_then(parse_duration_string)
            {
                if interval.is_zero() {
                    return Err(SuggestError::config("reset_interval must be greater than zero"));
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors the file sections.
///
/// These are the values that can be set via DS_* environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub mode: Option<ProviderMode>,
    pub page_size: Option<usize>,
    pub max_api_calls: Option<u32>,
    pub reset_interval: Option<Duration>,
    pub batch_size: Option<usize>,
    pub config: Option<String>,
    pub port: Option<u16>,
}

/// Load configuration from environment variables.
///
/// Parses all DS_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // DS_API_KEY - provider API key
    if let Ok(key) = env::var("DS_API_KEY") {
        if !key.trim().is_empty() {
            env_config.api_key = Some(key);
            if verbose {
                debug!("using DS_API_KEY");
            }
        }
    }

    // DS_BASE_URL - provider endpoint
    if let Ok(url) = env::var("DS_BASE_URL") {
        if !url.trim().is_empty() {
            if verbose {
                debug!("using DS_BASE_URL={}", url);
            }
            env_config.base_url = Some(url);
        }
    }

    // DS_MODE - default provider mode
    if let Ok(val) = env::var("DS_MODE") {
        match ProviderMode::parse(&val) {
            Some(mode) => {
                env_config.mode = Some(mode);
                if verbose {
                    debug!("using DS_MODE={}", mode);
                }
            }
            None => warn!("invalid DS_MODE='{}', use 'simulated' or 'live'", val),
        }
    }

    // DS_PAGE_SIZE - results per page
    if let Ok(val) = env::var("DS_PAGE_SIZE") {
        match val.parse::<usize>() {
            Ok(page_size) if (1..=100).contains(&page_size) => {
                env_config.page_size = Some(page_size);
                if verbose {
                    debug!("using DS_PAGE_SIZE={}", page_size);
                }
            }
            _ => warn!("invalid DS_PAGE_SIZE='{}', must be 1-100", val),
        }
    }

    // DS_MAX_API_CALLS - lookup budget per window
    if let Ok(val) = env::var("DS_MAX_API_CALLS") {
        match val.parse::<u32>() {
            Ok(max) => {
                env_config.max_api_calls = Some(max);
                if verbose {
                    debug!("using DS_MAX_API_CALLS={}", max);
                }
            }
            _ => warn!("invalid DS_MAX_API_CALLS='{}', must be a non-negative integer", val),
        }
    }

    // DS_RESET_INTERVAL - budget window length
    if let Ok(val) = env::var("DS_RESET_INTERVAL") {
        match parse_duration_string(&val).filter(|interval| !interval.is_zero()) {
            Some(interval) => {
                env_config.reset_interval = Some(interval);
                if verbose {
                    debug!("using DS_RESET_INTERVAL={}", val);
                }
            }
            None => warn!(
                "invalid DS_RESET_INTERVAL='{}', use format like '30m', '1h'",
                val
            ),
        }
    }

    // DS_BATCH_SIZE - concurrent lookups per batch
    if let Ok(val) = env::var("DS_BATCH_SIZE") {
        match val.parse::<usize>() {
            Ok(batch) if (1..=20).contains(&batch) => {
                env_config.batch_size = Some(batch);
                if verbose {
                    debug!("using DS_BATCH_SIZE={}", batch);
                }
            }
            _ => warn!("invalid DS_BATCH_SIZE='{}', must be 1-20", val),
        }
    }

    // DS_CONFIG - explicit config file path
    if let Ok(config_path) = env::var("DS_CONFIG") {
        if !config_path.trim().is_empty() {
            env_config.config = Some(config_path.clone());
            if verbose {
                debug!("using DS_CONFIG={}", config_path);
            }
        }
    }

    // DS_PORT - server listen port
    if let Ok(val) = env::var("DS_PORT") {
        match val.parse::<u16>() {
            Ok(port) => {
                env_config.port = Some(port);
                if verbose {
                    debug!("using DS_PORT={}", port);
                }
            }
            _ => warn!("invalid DS_PORT='{}', must be a port number", val),
        }
    }

    env_config
}

/// Resolve the effective check configuration.
///
/// Starts from built-in defaults, applies file values, then environment
/// values. File contents are assumed validated by [`ConfigManager`].
pub fn build_check_config(file: &FileConfig, env: &EnvConfig) -> CheckConfig {
    let mut config = CheckConfig::default();

    if let Some(defaults) = &file.defaults {
        if let Some(mode) = defaults.mode.as_deref().and_then(ProviderMode::parse) {
            config.default_mode = mode;
        }
        if let Some(page_size) = defaults.page_size {
            config.page_size = page_size.clamp(1, 100);
        }
        if let Some(price) = defaults.default_price {
            config.default_price = price;
        }
        if let Some(count) = defaults.fallback_count {
            config.fallback_count = count;
        }
    }

    if let Some(provider) = &file.provider {
        if let Some(key) = &provider.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &provider.base_url {
            config.provider_base_url = url.clone();
        }
        if let Some(timeout) = provider.timeout.as_deref().and_then(parse_duration_string) {
            config.lookup_timeout = timeout;
        }
    }

    if let Some(limits) = &file.limits {
        if let Some(max) = limits.max_api_calls {
            config.max_api_calls = max;
        }
        if let Some(interval) = limits
            .reset_interval
            .as_deref()
            .and_then(parse_duration_string)
        {
            config.budget_window = interval;
        }
        if let Some(batch) = limits.batch_size {
            config.batch_size = batch.clamp(1, 20);
        }
        if let Some(delay) = limits.batch_delay.as_deref().and_then(parse_duration_string) {
            config.batch_delay = delay;
        }
        if let Some(limit) = limits.simulated_limit {
            config.simulated_limit = limit;
        }
    }

    if let Some(generation) = &file.generation {
        if let Some(prefixes) = &generation.extra_prefixes {
            config.extra_prefixes = prefixes.clone();
        }
        if let Some(suffixes) = &generation.extra_suffixes {
            config.extra_suffixes = suffixes.clone();
        }
    }

    // Environment variables win over file values
    if let Some(key) = &env.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(url) = &env.base_url {
        config.provider_base_url = url.clone();
    }
    if let Some(mode) = env.mode {
        config.default_mode = mode;
    }
    if let Some(page_size) = env.page_size {
        config.page_size = page_size;
    }
    if let Some(max) = env.max_api_calls {
        config.max_api_calls = max;
    }
    if let Some(interval) = env.reset_interval {
        config.budget_window = interval;
    }
    if let Some(batch) = env.batch_size {
        config.batch_size = batch;
    }

    config
}

/// Parse a duration string like "500ms", "5s", "30m", "1h" into a Duration.
///
/// A bare number is read as seconds.
pub fn parse_duration_string(value: &str) -> Option<Duration> {
    let value = value.trim().to_lowercase();

    if let Some(ms) = value.strip_suffix("ms") {
        return ms.parse::<u64>().ok().map(Duration::from_millis);
    }
    if let Some(hours) = value.strip_suffix('h') {
        return hours.parse::<u64>().ok().map(|h| Duration::from_secs(h * 3600));
    }
    if let Some(minutes) = value.strip_suffix('m') {
        return minutes.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60));
    }
    if let Some(seconds) = value.strip_suffix('s') {
        return seconds.parse::<u64>().ok().map(Duration::from_secs);
    }

    // Assume seconds if no unit
    value.parse::<u64>().ok().map(Duration::from_secs)
}
