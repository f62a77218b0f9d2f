//! Quoting configuration.

use crate::error::{QuoterError, QuoterResult};
use serde::{Deserialize, Serialize};

/// Quoting parameters, fixed for the lifetime of a game.
///
/// Constructed once (from TOML or defaults), validated at game start,
/// then passed immutably to every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoterConfig {
    /// Minimum total spread; also the half-spread floor. Keeps every
    /// emitted market well-formed even at zero uncertainty.
    #[serde(default = "default_base_tick")]
    pub base_tick: f64,

    /// Futures half-spread per unit of settlement sigma.
    #[serde(default = "default_k_futures")]
    pub k_futures: f64,

    /// Option half-spread per unit of `sigma * phi(d)`.
    #[serde(default = "default_k_options")]
    pub k_options: f64,

    /// Mid shift per unit of net futures position.
    #[serde(default = "default_inventory_alpha_futures")]
    pub inventory_alpha_futures: f64,

    /// Mid shift per unit of delta-equivalent option exposure.
    #[serde(default = "default_inventory_alpha_options")]
    pub inventory_alpha_options: f64,

    /// Quote only strikes within this many sigmas of the forward mean.
    #[serde(default = "default_strike_sigma_window")]
    pub strike_sigma_window: f64,

    /// Maximum strike levels quoted per (underlying, expiry) group.
    #[serde(default = "default_max_option_quotes")]
    pub max_option_quotes: usize,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            base_tick: default_base_tick(),
            k_futures: default_k_futures(),
            k_options: default_k_options(),
            inventory_alpha_futures: default_inventory_alpha_futures(),
            inventory_alpha_options: default_inventory_alpha_options(),
            strike_sigma_window: default_strike_sigma_window(),
            max_option_quotes: default_max_option_quotes(),
        }
    }
}

impl QuoterConfig {
    /// Validate the configuration. Called once at game start; a failure
    /// here is the only fatal error in the engine.
    pub fn validate(&self) -> QuoterResult<()> {
        if !(self.base_tick.is_finite() && self.base_tick > 0.0) {
            return Err(QuoterError::InvalidConfig(format!(
                "base_tick must be positive, got {}",
                self.base_tick
            )));
        }
        for (name, value) in [
            ("k_futures", self.k_futures),
            ("k_options", self.k_options),
            ("inventory_alpha_futures", self.inventory_alpha_futures),
            ("inventory_alpha_options", self.inventory_alpha_options),
            ("strike_sigma_window", self.strike_sigma_window),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(QuoterError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn default_base_tick() -> f64 {
    0.1
}
fn default_k_futures() -> f64 {
    0.002
}
fn default_k_options() -> f64 {
    0.004
}
fn default_inventory_alpha_futures() -> f64 {
    0.1
}
fn default_inventory_alpha_options() -> f64 {
    0.1
}
fn default_strike_sigma_window() -> f64 {
    1.2
}
fn default_max_option_quotes() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuoterConfig::default();
        assert_eq!(config.base_tick, 0.1);
        assert_eq!(config.k_futures, 0.002);
        assert_eq!(config.k_options, 0.004);
        assert_eq!(config.inventory_alpha_futures, 0.1);
        assert_eq!(config.inventory_alpha_options, 0.1);
        assert_eq!(config.strike_sigma_window, 1.2);
        assert_eq!(config.max_option_quotes, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_defaults() {
        let toml_str = r#"
base_tick = 0.25
max_option_quotes = 4
"#;
        let config: QuoterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_tick, 0.25);
        assert_eq!(config.max_option_quotes, 4);
        // untouched fields fall back to defaults
        assert_eq!(config.k_futures, 0.002);
        assert_eq!(config.strike_sigma_window, 1.2);
    }

    #[test]
    fn test_validate_rejects_bad_tick() {
        let config = QuoterConfig {
            base_tick: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(QuoterError::InvalidConfig(_))
        ));

        let config = QuoterConfig {
            base_tick: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_coefficients() {
        let config = QuoterConfig {
            k_options: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
