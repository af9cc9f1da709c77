//! Layered configuration.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌────────────────────────────────────────────┐
//! │  1. Environment Variables (HOSTKIT_*)      │  Runtime override
//! ├────────────────────────────────────────────┤
//! │  2. Project Config (.hostkit/config.toml)  │  Project-specific
//! ├────────────────────────────────────────────┤
//! │  3. Global Config (~/.hostkit/config.toml) │  User defaults
//! ├────────────────────────────────────────────┤
//! │  4. Default Values (compile-time)          │  Fallback
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `HOSTKIT_DEBUG` | `debug` | bool |
//! | `HOSTKIT_REFUND_WINDOW_DAYS` | `refund.collective_admin_window_days` | u32 |
//! | `HOSTKIT_FX_WINDOW_DAYS` | `balance.fx_volatility_window_days` | u32 |
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [refund]
//! collective_admin_window_days = 30
//!
//! [balance]
//! fx_volatility_window_days = 5
//!
//! [fx.rates]
//! "EUR/USD" = 1.1
//! ```
//!
//! The predicates never read [`HostkitConfig`] directly; they take the
//! resolved [`RuleSettings`].

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{
    BalanceConfig, BalanceLayer, ConfigLayer, FxConfig, HostkitConfig, RefundConfig, RefundLayer,
    RuleSettings,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".hostkit")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".hostkit";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
