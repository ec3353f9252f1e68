use chrono::FixedOffset;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct BankConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    /// When set, spans are exported over OTLP in addition to JSON logs.
    pub otlp_endpoint: Option<String>,
    /// Offset from UTC used to decide which calendar day an operation belongs to.
    /// Stands in for the server's local time; set it to the host offset to match.
    pub utc_offset_minutes: i32,
}

impl BankConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let utc_offset_minutes = get_env("STATEMENT_UTC_OFFSET_MINUTES", Some("0"), is_prod)?
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "STATEMENT_UTC_OFFSET_MINUTES must be an integer: {}",
                    e
                ))
            })?;

        let config = BankConfig {
            common: common_config,
            service_name: get_env("SERVICE_NAME", Some("bank-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            utc_offset_minutes,
        };

        // Reject out-of-range offsets at startup rather than on the first statement query.
        config.statement_timezone()?;

        Ok(config)
    }

    /// Timezone in which statement dates are compared.
    pub fn statement_timezone(&self) -> Result<FixedOffset, AppError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "STATEMENT_UTC_OFFSET_MINUTES out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
