use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use catalog::variant::SiteVariant;
use coverage::{MatchMode, SIMULATED_LATENCY};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_MERCHANT_WALLET: &str = "0x000000000000000000000000000000000000dEaD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Secret {0} missing from /run/secrets and the environment")]
    MissingSecret(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub variant: SiteVariant,
    pub check_delay: Duration,
    pub match_mode: MatchMode,
    pub baas_url: String,
    pub baas_anon_key: String,
    pub baas_service_key: String,
    pub signup_password: String,
    pub merchant_wallet: String,
    pub eth_usd_cents: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            variant: SiteVariant::default(),
            check_delay: SIMULATED_LATENCY,
            match_mode: MatchMode::default(),
            baas_url: "http://localhost:54321".to_string(),
            baas_anon_key: String::new(),
            baas_service_key: String::new(),
            signup_password: String::new(),
            merchant_wallet: DEFAULT_MERCHANT_WALLET.to_string(),
            eth_usd_cents: 300_000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let variant = SiteVariant::resolve(
            var("SITE_VARIANT").ok().as_deref(),
            var("SITE_HOST").ok().as_deref(),
        )
        .map_err(|e| ConfigError::Invalid {
            key: "SITE_VARIANT",
            message: e.to_string(),
        })?;
        info!("Serving site variant: {variant}");

        let strict_postal: bool = try_load("STRICT_POSTAL", "false")?;

        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            variant,
            check_delay: Duration::from_millis(try_load("CHECK_DELAY_MS", "800")?),
            match_mode: if strict_postal {
                MatchMode::LeadingPostal
            } else {
                MatchMode::Substring
            },
            baas_url: try_load("BAAS_URL", "http://localhost:54321")?,
            baas_anon_key: read_secret("BAAS_ANON_KEY")?,
            baas_service_key: read_secret("BAAS_SERVICE_KEY")?,
            signup_password: read_secret("SIGNUP_PASSWORD")?,
            merchant_wallet: try_load("MERCHANT_WALLET", DEFAULT_MERCHANT_WALLET)?,
            eth_usd_cents: try_load("ETH_USD_CENTS", "300000")?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        })
}

/// Docker secret first, plain environment variable second.
fn read_secret(secret_name: &'static str) -> Result<String, ConfigError> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .or_else(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            env::var(secret_name).map(|s| s.trim().to_string())
        })
        .map_err(|_| ConfigError::MissingSecret(secret_name))
}
