//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use chrono::Duration;
use hostkit_types::Currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Effective configuration after merging all layers.
///
/// # Example
///
/// ```
/// use hostkit_runtime::config::HostkitConfig;
///
/// let config = HostkitConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.refund.collective_admin_window_days, 30);
/// assert_eq!(config.balance.fx_volatility_window_days, 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostkitConfig {
    /// Verbose logging.
    pub debug: bool,
    pub refund: RefundConfig,
    pub balance: BalanceConfig,
    pub fx: FxConfig,
}

impl HostkitConfig {
    /// Parses a TOML document. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Overlays one config file on `self`. Only keys present in the file
    /// override, so a file may set a value back to its default.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }
        if let Some(days) = layer.refund.collective_admin_window_days {
            self.refund.collective_admin_window_days = days;
        }
        if let Some(days) = layer.balance.fx_volatility_window_days {
            self.balance.fx_volatility_window_days = days;
        }
        self.fx.merge(&layer.fx);
    }

    /// Resolves the values the predicates read.
    #[must_use]
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            refund_window_days: self.refund.collective_admin_window_days,
            fx_volatility_window_days: self.balance.fx_volatility_window_days,
        }
    }
}

/// `[refund]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefundConfig {
    /// Days after which collective admins can no longer refund or reject.
    pub collective_admin_window_days: u32,
}

impl Default for RefundConfig {
    fn default() -> Self {
        Self {
            collective_admin_window_days: 30,
        }
    }
}

/// `[balance]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BalanceConfig {
    /// Trailing days scanned for the worst exchange rate.
    pub fx_volatility_window_days: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            fx_volatility_window_days: 5,
        }
    }
}

/// `[fx]` section: a static platform rate table.
///
/// Keys are `"FROM/TO"` currency codes; values multiply an amount in
/// `FROM` into `TO`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FxConfig {
    pub rates: BTreeMap<String, f64>,
}

impl FxConfig {
    fn merge(&mut self, other: &Self) {
        for (pair, rate) in &other.rates {
            self.rates.insert(pair.clone(), *rate);
        }
    }

    /// Parses every entry into `(from, to, rate)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRate`] for a malformed key, an unknown
    /// currency, or a rate that is not finite and positive.
    pub fn parsed_rates(&self) -> Result<Vec<(Currency, Currency, f64)>, ConfigError> {
        self.rates
            .iter()
            .map(|(key, &rate)| {
                let (from, to) = key
                    .split_once('/')
                    .ok_or_else(|| ConfigError::invalid_rate(key, "expected FROM/TO"))?;
                let from: Currency = from
                    .parse()
                    .map_err(|e| ConfigError::invalid_rate(key, format!("{e}")))?;
                let to: Currency = to
                    .parse()
                    .map_err(|e| ConfigError::invalid_rate(key, format!("{e}")))?;
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(ConfigError::invalid_rate(key, "rate must be positive"));
                }
                Ok((from, to, rate))
            })
            .collect()
    }
}

/// One config file as written. Absent keys stay `None`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub debug: Option<bool>,
    pub refund: RefundLayer,
    pub balance: BalanceLayer,
    pub fx: FxConfig,
}

impl ConfigLayer {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefundLayer {
    pub collective_admin_window_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BalanceLayer {
    pub fx_volatility_window_days: Option<u32>,
}

/// Values the predicates and the balance check depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSettings {
    pub refund_window_days: u32,
    pub fx_volatility_window_days: u32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        HostkitConfig::default().rule_settings()
    }
}

impl RuleSettings {
    #[must_use]
    pub fn refund_window(&self) -> Duration {
        Duration::days(i64::from(self.refund_window_days))
    }

    #[must_use]
    pub fn fx_volatility_window(&self) -> Duration {
        Duration::days(i64::from(self.fx_volatility_window_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = HostkitConfig::from_toml(
            r#"
[refund]
collective_admin_window_days = 14
"#,
        )
        .expect("parse");

        assert_eq!(config.refund.collective_admin_window_days, 14);
        assert_eq!(config.balance, BalanceConfig::default());
        assert!(config.fx.rates.is_empty());
    }

    #[test]
    fn merge_keeps_values_absent_from_layer() {
        let mut base = HostkitConfig::default();
        base.merge(
            &ConfigLayer::from_toml(
                r#"
debug = true
[balance]
fx_volatility_window_days = 10
[fx.rates]
"EUR/USD" = 1.1
"#,
            )
            .expect("parse"),
        );
        let overlay = ConfigLayer::from_toml(
            r#"
[refund]
collective_admin_window_days = 7
[fx.rates]
"EUR/USD" = 1.2
"GBP/USD" = 1.3
"#,
        )
        .expect("parse");

        base.merge(&overlay);

        assert!(base.debug);
        assert_eq!(base.balance.fx_volatility_window_days, 10);
        assert_eq!(base.refund.collective_admin_window_days, 7);
        assert_eq!(base.fx.rates.get("EUR/USD"), Some(&1.2));
        assert_eq!(base.fx.rates.len(), 2);
    }

    #[test]
    fn merge_can_restore_default_values() {
        let mut base = HostkitConfig::default();
        base.merge(
            &ConfigLayer::from_toml("debug = true\n[refund]\ncollective_admin_window_days = 7\n")
                .expect("parse"),
        );
        base.merge(
            &ConfigLayer::from_toml("debug = false\n[refund]\ncollective_admin_window_days = 30\n")
                .expect("parse"),
        );

        assert!(!base.debug);
        assert_eq!(base.refund.collective_admin_window_days, 30);
    }

    #[test]
    fn parsed_rates_validates_entries() {
        let mut fx = FxConfig::default();
        fx.rates.insert("eur/usd".into(), 1.1);
        assert_eq!(
            fx.parsed_rates().expect("valid"),
            vec![(Currency::Eur, Currency::Usd, 1.1)]
        );

        fx.rates.insert("EURUSD".into(), 1.1);
        assert!(matches!(
            fx.parsed_rates(),
            Err(ConfigError::InvalidRate { key, .. }) if key == "EURUSD"
        ));

        let mut fx = FxConfig::default();
        fx.rates.insert("EUR/USD".into(), 0.0);
        assert!(fx.parsed_rates().is_err());

        let mut fx = FxConfig::default();
        fx.rates.insert("EUR/XYZ".into(), 1.0);
        assert!(fx.parsed_rates().is_err());
    }

    #[test]
    fn rule_settings_durations() {
        let settings = HostkitConfig::default().rule_settings();
        assert_eq!(settings.refund_window(), Duration::days(30));
        assert_eq!(settings.fx_volatility_window(), Duration::days(5));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = HostkitConfig::default();
        config.fx.rates.insert("EUR/USD".into(), 1.1);
        let toml = config.to_toml().expect("serialize");
        assert_eq!(HostkitConfig::from_toml(&toml).expect("parse"), config);
    }
}
