//! # nexus-config: Pricing Policy Loading
//!
//! Turns `pricing.toml` plus `NEXUS_*` environment variables into the
//! [`PricingPolicy`](nexus_core::PricingPolicy) and
//! [`ToolCatalog`](nexus_core::ToolCatalog) that nexus-core calculators
//! take as injected inputs.
//!
//! ```rust,no_run
//! use nexus_config::PricingConfig;
//!
//! let config = PricingConfig::load_or_default(None);
//! let policy = config.policy();
//! let catalog = config.catalog().unwrap_or_default();
//! # let _ = (policy, catalog);
//! ```

pub mod config;
pub mod error;

pub use config::{CreditSettings, DilutionSettings, LimitSettings, PricingConfig};
pub use error::{ConfigError, ConfigResult};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise `info` everywhere and `debug` for nexus crates.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nexus=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
