use std::path::PathBuf;

use tracing::warn;

use crate::error::ConfigError;
use crate::ordering::OrderingStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Base path or URL prepended to every card image link.
    pub img_source: String,
    pub ordering: OrderingStrategy,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => 8083,
        };

        let img_source = lookup("IMG_SOURCE").unwrap_or_else(|| {
            warn!("IMG_SOURCE not set, image links are served as-is");
            String::new()
        });

        let ordering = match lookup("ORDERING_STRATEGY") {
            Some(raw) => raw.parse()?,
            None => OrderingStrategy::default(),
        };

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "static".into()));

        Ok(Self {
            port,
            img_source,
            ordering,
            static_dir,
        })
    }
}

/// Boolean environment flag, read before the config (logging needs it first).
pub fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| flag_value(&v))
        .unwrap_or(false)
}

fn flag_value(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}
