use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, non_empty_env, ServerSettings, TelemetrySettings};
use service_core::error::AppError;

pub const DEFAULT_RAZORPAY_API_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Storefront origins allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://vitalimes.com",
    "https://appconnect.cloud",
    "https://vitalimes-frontend-sbwube-c11f73-72-61-237-203.traefik.me",
];

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerSettings,
    pub telemetry: TelemetrySettings,
    pub razorpay: RazorpayConfig,
    pub payment: PaymentSettings,
    pub cors: CorsSettings,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RazorpayConfig {
    /// Public key id. Safe to hand to browsers for checkout.
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_base_url: String,
    /// Whole-request timeout for provider calls.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PaymentSettings {
    /// Prefix for generated receipts (`VTL-<millis>`).
    pub receipt_prefix: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration once at startup.
    ///
    /// Razorpay credentials come from `RAZORPAY_KEY_ID` / `RAZORPAY_KEY_SECRET`
    /// (or `APP_RAZORPAY__KEY_ID` / `APP_RAZORPAY__KEY_SECRET`). Missing
    /// credentials are a hard error.
    pub fn load() -> Result<Self, AppError> {
        let config: Config = core_config::builder(&["cors.allowed_origins"])?
            .set_default("service_name", "checkout-service")?
            .set_default("razorpay.key_id", "")?
            .set_default("razorpay.key_secret", "")?
            .set_default("razorpay.api_base_url", DEFAULT_RAZORPAY_API_BASE_URL)?
            .set_default("razorpay.timeout_secs", 30)?
            .set_default("razorpay.connect_timeout_secs", 10)?
            .set_default("payment.receipt_prefix", "VTL")?
            .set_default("cors.allowed_origins", DEFAULT_ALLOWED_ORIGINS.to_vec())?
            .set_override_option("razorpay.key_id", non_empty_env("RAZORPAY_KEY_ID"))?
            .set_override_option("razorpay.key_secret", non_empty_env("RAZORPAY_KEY_SECRET"))?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.razorpay.key_id.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "RAZORPAY_KEY_ID is required but not set"
            )));
        }
        if self.razorpay.key_secret.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "RAZORPAY_KEY_SECRET is required but not set"
            )));
        }
        if self.razorpay.timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "razorpay.timeout_secs must be greater than zero"
            )));
        }
        if self.razorpay.connect_timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "razorpay.connect_timeout_secs must be greater than zero"
            )));
        }
        if self.payment.receipt_prefix.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "payment.receipt_prefix must not be empty"
            )));
        }
        Ok(())
    }
}
