use std::time::Duration;

use anyhow::{Context, Result};

use crate::export::pipeline::{DEFAULT_RASTER_SCALE, DEFAULT_SETTLE_DELAY};

pub const MIN_RASTER_SCALE: f32 = 0.5;
pub const MAX_RASTER_SCALE: f32 = 4.0;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Wait between staging the preview and measuring it.
    pub settle_delay: Duration,
    /// Raster pixels per preview pixel, clamped to `MIN_RASTER_SCALE..=MAX_RASTER_SCALE`.
    pub raster_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            raster_scale: DEFAULT_RASTER_SCALE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
            None => defaults.port,
        };
        let settle_delay = match lookup("SETTLE_DELAY_MS") {
            Some(v) => Duration::from_millis(
                v.parse::<u64>()
                    .context("SETTLE_DELAY_MS must be a whole number of milliseconds")?,
            ),
            None => defaults.settle_delay,
        };
        let raster_scale = match lookup("RASTER_SCALE") {
            Some(v) => {
                let scale = v
                    .parse::<f32>()
                    .context("RASTER_SCALE must be a number")?;
                if !scale.is_finite() {
                    anyhow::bail!("RASTER_SCALE must be finite, got '{v}'");
                }
                scale.clamp(MIN_RASTER_SCALE, MAX_RASTER_SCALE)
            }
            None => defaults.raster_scale,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            settle_delay,
            raster_scale,
        })
    }
}
