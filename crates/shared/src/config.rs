//! Application configuration management.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::money::{DISPLAY_SCALE, SETTLEMENT_TOLERANCE};

/// Environment variable prefix, e.g. `SPLITLEDGER__SETTLEMENT__TOLERANCE`.
const ENV_PREFIX: &str = "SPLITLEDGER";

/// Largest scale a `Decimal` can represent.
const MAX_DISPLAY_SCALE: u32 = 28;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement engine configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settlement engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Magnitude below which a running balance is considered settled.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Fractional digits kept in transfer amounts and displayed balances.
    #[serde(default = "default_display_scale")]
    pub display_scale: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            display_scale: default_display_scale(),
        }
    }
}

fn default_tolerance() -> Decimal {
    SETTLEMENT_TOLERANCE
}

fn default_display_scale() -> u32 {
    DISPLAY_SCALE
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "splitledger=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `SPLITLEDGER__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(environment())
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Loads configuration from an explicit file, still honouring environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed, or the result is invalid.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(environment())
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` describing the first invalid field.
    pub fn validate(&self) -> AppResult<()> {
        if self.settlement.tolerance <= Decimal::ZERO {
            return Err(AppError::Configuration(format!(
                "settlement.tolerance must be positive, got {}",
                self.settlement.tolerance
            )));
        }
        if self.settlement.display_scale > MAX_DISPLAY_SCALE {
            return Err(AppError::Configuration(format!(
                "settlement.display_scale must be at most {}, got {}",
                MAX_DISPLAY_SCALE,
                self.settlement.display_scale
            )));
        }
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.settlement.tolerance, dec!(0.01));
        assert_eq!(config.settlement.display_scale, 2);
        assert_eq!(config.logging.filter, "splitledger=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "SPLITLEDGER__SETTLEMENT__TOLERANCE",
                "SPLITLEDGER__SETTLEMENT__DISPLAY_SCALE",
                "SPLITLEDGER__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.tolerance, dec!(0.01));
                assert_eq!(config.settlement.display_scale, 2);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("SPLITLEDGER__SETTLEMENT__TOLERANCE", Some("0.05")),
                ("SPLITLEDGER__SETTLEMENT__DISPLAY_SCALE", Some("3")),
                ("SPLITLEDGER__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.tolerance, dec!(0.05));
                assert_eq!(config.settlement.display_scale, 3);
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        temp_env::with_var("SPLITLEDGER__SETTLEMENT__TOLERANCE", Some("0"), || {
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, AppError::Configuration(_)));
        });
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "splitledger-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[settlement]\ntolerance = \"0.001\"\n\n[logging]\nfilter = \"debug\"").unwrap();

        let config = temp_env::with_vars_unset(
            [
                "SPLITLEDGER__SETTLEMENT__TOLERANCE",
                "SPLITLEDGER__SETTLEMENT__DISPLAY_SCALE",
                "SPLITLEDGER__LOGGING__FILTER",
            ],
            || AppConfig::load_from(&path),
        );
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.settlement.tolerance, dec!(0.001));
        assert_eq!(config.settlement.display_scale, 2);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("splitledger-does-not-exist.toml");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(AppError::Configuration(_))
        ));
    }
}
