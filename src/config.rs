use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub ephemeris: EphemerisSettings,
    pub geocode: GeocodeSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EphemerisSettings {
    pub endpoint: String,
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeSettings {
    pub endpoint: String,
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Pairwise score TTL; short because saved charts change more often
    /// than geocoded coordinates.
    #[serde(default = "default_score_ttl_secs")]
    pub score_ttl_secs: u64,
    #[serde(default = "default_geocode_ttl_secs")]
    pub geocode_ttl_secs: u64,
    #[serde(default = "default_geocode_capacity")]
    pub geocode_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_k")]
    pub default_k: usize,
    #[serde(default = "default_max_k")]
    pub max_k: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_sun_weight")]
    pub sun: u8,
    #[serde(default = "default_moon_weight")]
    pub moon: u8,
    #[serde(default = "default_rising_weight")]
    pub rising: u8,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            sun: default_sun_weight(),
            moon: default_moon_weight(),
            rising: default_rising_weight(),
        }
    }
}

impl WeightsConfig {
    /// Scores are capped at 100, so a weight triple summing past that
    /// would silently lose precision; reject it at load time instead.
    fn validate(&self) -> Result<(), ConfigError> {
        let total = self.sun as u16 + self.moon as u16 + self.rising as u16;
        if total > 100 {
            return Err(ConfigError::Message(format!(
                "scoring.weights must sum to at most 100, got {}",
                total
            )));
        }
        Ok(())
    }
}

fn default_sun_weight() -> u8 { 45 }
fn default_moon_weight() -> u8 { 35 }
fn default_rising_weight() -> u8 { 20 }
fn default_score_ttl_secs() -> u64 { 120 }
fn default_geocode_ttl_secs() -> u64 { 6 * 3600 }
fn default_geocode_capacity() -> u64 { 10_000 }
fn default_http_timeout_secs() -> u64 { 30 }
fn default_k() -> usize { 10 }
fn default_max_k() -> usize { 50 }
fn default_concurrency() -> usize { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with ASTRO_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ASTRO__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ASTRO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ASTRO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }
}
