//! Engine configuration: defaults, optional TOML file patch, environment
//! overrides, then validation. The quantity-discount tier table and the
//! annual discount constant are integrator-supplied here; the engine ships
//! no breakpoints of its own.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{DiscountSchedule, DiscountTier};

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub pricing: PricingConfig,
    pub gateway: GatewayConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    /// Display language forwarded on submission; copy itself is the host's.
    pub language: String,
}

#[derive(Clone, Debug)]
pub struct PricingConfig {
    pub tiers: Vec<DiscountTier>,
    pub annual_discount: Decimal,
}

impl PricingConfig {
    pub fn schedule(&self) -> DiscountSchedule {
        DiscountSchedule::new(self.tiers.clone())
    }
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub auth_token: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig { tiers: Vec::new(), annual_discount: Decimal::ZERO },
            gateway: GatewayConfig {
                endpoint: String::new(),
                timeout_secs: 20,
                auth_token: None,
            },
            storage: StorageConfig { url: "sqlite://packfit.db".to_string() },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    gateway: Option<GatewayPatch>,
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
    language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    tiers: Option<Vec<DiscountTier>>,
    annual_discount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct GatewayPatch {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    auth_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl EngineConfig {
    /// Load with the standard pipeline: defaults, file patch (explicit path,
    /// else `PACKFIT_CONFIG`, else `packfit.toml` when present), env
    /// overrides, validation.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(config_path) {
            let raw = fs::read_to_string(&path)
                .map_err(|source| ConfigError::ReadFile { path: path.clone(), source })?;
            let patch: ConfigPatch = toml::from_str(&raw)
                .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
            config.apply_patch(patch);
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(tiers) = pricing.tiers {
                self.pricing.tiers = tiers;
            }
            if let Some(annual) = pricing.annual_discount {
                self.pricing.annual_discount = annual;
            }
        }
        if let Some(gateway) = patch.gateway {
            if let Some(endpoint) = gateway.endpoint {
                self.gateway.endpoint = endpoint;
            }
            if let Some(timeout) = gateway.timeout_secs {
                self.gateway.timeout_secs = timeout;
            }
            if let Some(token) = gateway.auth_token {
                self.gateway.auth_token = Some(token.into());
            }
        }
        if let Some(storage) = patch.storage {
            if let Some(url) = storage.url {
                self.storage.url = url;
            }
        }
        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(endpoint) = read_env("PACKFIT_GATEWAY_ENDPOINT") {
            self.gateway.endpoint = endpoint;
        }
        if let Some(raw) = read_env("PACKFIT_GATEWAY_TIMEOUT_SECS") {
            self.gateway.timeout_secs = raw.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "PACKFIT_GATEWAY_TIMEOUT_SECS".to_string(),
                value: raw,
            })?;
        }
        if let Some(token) = read_env("PACKFIT_GATEWAY_AUTH_TOKEN") {
            self.gateway.auth_token = Some(token.into());
        }
        if let Some(url) = read_env("PACKFIT_STORAGE_URL") {
            self.storage.url = url;
        }
        if let Some(level) = read_env("PACKFIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(raw) = read_env("PACKFIT_LOG_FORMAT") {
            self.logging.format = raw.parse()?;
        }
        if let Some(language) = read_env("PACKFIT_LANGUAGE") {
            self.language = language;
        }
        if let Some(raw) = read_env("PACKFIT_ANNUAL_DISCOUNT") {
            self.pricing.annual_discount =
                Decimal::from_str(&raw).map_err(|_| ConfigError::InvalidEnvOverride {
                    key: "PACKFIT_ANNUAL_DISCOUNT".to_string(),
                    value: raw,
                })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let annual = self.pricing.annual_discount;
        if annual < Decimal::ZERO || annual >= Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "annual_discount must be in [0, 1), got {annual}"
            )));
        }

        let mut sorted = self.pricing.tiers.clone();
        sorted.sort_by_key(|tier| tier.min_count);
        let mut previous_rate = Decimal::ZERO;
        let mut previous_count = 0u32;
        for tier in &sorted {
            if tier.min_count == 0 {
                return Err(ConfigError::Validation(
                    "discount tier min_count must be at least 1".to_string(),
                ));
            }
            if tier.min_count == previous_count {
                return Err(ConfigError::Validation(format!(
                    "duplicate discount tier for min_count {}",
                    tier.min_count
                )));
            }
            if tier.rate < Decimal::ZERO || tier.rate >= Decimal::ONE {
                return Err(ConfigError::Validation(format!(
                    "discount rate must be in [0, 1), got {}",
                    tier.rate
                )));
            }
            if tier.rate < previous_rate {
                return Err(ConfigError::Validation(format!(
                    "discount rates must be non-decreasing in count (tier {} drops to {})",
                    tier.min_count, tier.rate
                )));
            }
            previous_rate = tier.rate;
            previous_count = tier.min_count;
        }

        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = read_env("PACKFIT_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from("packfit.toml");
    default.exists().then_some(default)
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
