//! Layered settings shared by every service.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `configuration.{toml,yaml,json}` file, then `APP_`-prefixed environment
//! variables using `__` as the nesting separator (`APP_SERVER__PORT`).
//! A bare `PORT` variable overrides `server.port` for container platforms.

use crate::error::AppError;
use config::{Config as Cfg, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound for request bodies, in bytes.
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output.
    pub json: bool,
    /// OTLP collector endpoint. Span export is disabled when absent.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

/// Start a builder pre-loaded with the shared defaults and sources.
///
/// `list_keys` names settings whose environment values are comma-separated
/// lists. Services add their own defaults and overrides, then call
/// `build()` and deserialize into their settings type.
pub fn builder(list_keys: &[&str]) -> Result<ConfigBuilder<DefaultState>, AppError> {
    dotenvy::dotenv().ok();

    let mut environment = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true);
    // Without explicit keys every value containing a comma would be split.
    if !list_keys.is_empty() {
        environment = list_keys
            .iter()
            .fold(environment.list_separator(","), |env, key| {
                env.with_list_parse_key(key)
            });
    }

    let builder = Cfg::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.body_limit_bytes", 50 * 1024 * 1024)?
        .set_default("telemetry.log_level", "info")?
        .set_default("telemetry.json", true)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(environment)
        .set_override_option("server.port", std::env::var("PORT").ok())?;

    Ok(builder)
}

/// Read an environment variable, treating empty values as unset.
pub fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
