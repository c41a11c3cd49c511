//! # Pricing Configuration
//!
//! File and environment form of the pricing policy.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Load Order (later overrides earlier)                  │
//! │                                                                         │
//! │  1. Defaults            PricingPolicy::default(), standard catalog     │
//! │  2. Config file         pricing.toml (explicit path or platform dir)   │
//! │  3. Environment         NEXUS_* variables, bad values warned + skipped │
//! │  4. validate()          rejected policies never reach the calculators  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [credits]
//! total_content_credits = 1500
//! cost_per_credit_usd_micros = 10000   # US$ 0,01
//! usd_to_brl_bps = 60000               # 6.00 BRL per USD
//! auto_adjust_threshold = 5
//!
//! [limits]
//! daily_limit_min = 5
//! daily_limit_max = 150
//!
//! [dilution]
//! deduction_rate_bps = 250             # 2.5% per sale
//! example_sale_price_cents = 19700
//!
//! # Optional. When present, replaces the built-in tool catalog.
//! [[tools]]
//! id = "marketing_pack"
//! name = "Marketing Pack"
//! base_setup_fee = 99700
//! monthly_per_student = 490
//! diluted_markup = 3000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use nexus_core::{Money, PricingPolicy, Rate, ToolCatalog, ToolDefinition};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// `[credits]`: content mass and what one interaction costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSettings {
    #[serde(default = "default_total_content_credits")]
    pub total_content_credits: i64,

    /// Micro-USD per interaction.
    #[serde(default = "default_cost_per_credit_usd_micros")]
    pub cost_per_credit_usd_micros: i64,

    #[serde(default = "default_usd_to_brl_bps")]
    pub usd_to_brl_bps: u32,

    #[serde(default = "default_auto_adjust_threshold")]
    pub auto_adjust_threshold: i64,
}

fn default_total_content_credits() -> i64 {
    PricingPolicy::default().total_content_credits
}

fn default_cost_per_credit_usd_micros() -> i64 {
    PricingPolicy::default().cost_per_credit_usd_micros
}

fn default_usd_to_brl_bps() -> u32 {
    PricingPolicy::default().usd_to_brl.bps()
}

fn default_auto_adjust_threshold() -> i64 {
    PricingPolicy::default().auto_adjust_threshold
}

impl Default for CreditSettings {
    fn default() -> Self {
        CreditSettings {
            total_content_credits: default_total_content_credits(),
            cost_per_credit_usd_micros: default_cost_per_credit_usd_micros(),
            usd_to_brl_bps: default_usd_to_brl_bps(),
            auto_adjust_threshold: default_auto_adjust_threshold(),
        }
    }
}

/// `[limits]`: daily interaction slider bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    #[serde(default = "default_daily_limit_min")]
    pub daily_limit_min: i64,

    #[serde(default = "default_daily_limit_max")]
    pub daily_limit_max: i64,
}

fn default_daily_limit_min() -> i64 {
    PricingPolicy::default().daily_limit_min
}

fn default_daily_limit_max() -> i64 {
    PricingPolicy::default().daily_limit_max
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings {
            daily_limit_min: default_daily_limit_min(),
            daily_limit_max: default_daily_limit_max(),
        }
    }
}

/// `[dilution]`: per-sale deduction and the example sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilutionSettings {
    #[serde(default = "default_deduction_rate_bps")]
    pub deduction_rate_bps: u32,

    #[serde(default = "default_example_sale_price_cents")]
    pub example_sale_price_cents: i64,
}

fn default_deduction_rate_bps() -> u32 {
    PricingPolicy::default().deduction_rate.bps()
}

fn default_example_sale_price_cents() -> i64 {
    PricingPolicy::default().example_sale_price.cents()
}

impl Default for DilutionSettings {
    fn default() -> Self {
        DilutionSettings {
            deduction_rate_bps: default_deduction_rate_bps(),
            example_sale_price_cents: default_example_sale_price_cents(),
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub credits: CreditSettings,

    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub dilution: DilutionSettings,

    /// Replaces the standard catalog when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl PricingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Pricing config not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if anything fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config from TOML text. Missing sections take defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the resulting policy and, when given, the tool list.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dilution.example_sale_price_cents <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "dilution.example_sale_price_cents".into(),
                reason: "must be positive".into(),
            });
        }

        self.policy().validate()?;
        self.catalog()?;

        Ok(())
    }

    /// Applies `NEXUS_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and skipped.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("NEXUS_TOTAL_CONTENT_CREDITS") {
            match raw.trim().parse::<i64>() {
                Ok(v) => {
                    debug!(total_content_credits = v, "Overriding content credits from environment");
                    self.credits.total_content_credits = v;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid NEXUS_TOTAL_CONTENT_CREDITS"),
            }
        }

        // Decimal USD, e.g. "0.01"
        if let Some(raw) = lookup("NEXUS_COST_PER_CREDIT_USD") {
            match parse_decimal(&raw) {
                Some(usd) => {
                    let micros = (usd * 1_000_000.0).round() as i64;
                    debug!(micros, "Overriding cost per credit from environment");
                    self.credits.cost_per_credit_usd_micros = micros;
                }
                None => warn!(value = %raw, "Ignoring invalid NEXUS_COST_PER_CREDIT_USD"),
            }
        }

        // BRL per USD, e.g. "6.00"
        if let Some(raw) = lookup("NEXUS_USD_TO_BRL") {
            match parse_decimal(&raw) {
                Some(ratio) => {
                    let bps = Rate::from_ratio(ratio).bps();
                    debug!(bps, "Overriding exchange rate from environment");
                    self.credits.usd_to_brl_bps = bps;
                }
                None => warn!(value = %raw, "Ignoring invalid NEXUS_USD_TO_BRL"),
            }
        }

        // Percent, e.g. "2.5"
        if let Some(raw) = lookup("NEXUS_DEDUCTION_RATE") {
            match parse_decimal(&raw) {
                Some(pct) => {
                    let bps = Rate::from_percentage(pct).bps();
                    debug!(bps, "Overriding deduction rate from environment");
                    self.dilution.deduction_rate_bps = bps;
                }
                None => warn!(value = %raw, "Ignoring invalid NEXUS_DEDUCTION_RATE"),
            }
        }

        if let Some(raw) = lookup("NEXUS_AUTO_ADJUST_THRESHOLD") {
            match raw.trim().parse::<i64>() {
                Ok(v) => self.credits.auto_adjust_threshold = v,
                Err(_) => warn!(value = %raw, "Ignoring invalid NEXUS_AUTO_ADJUST_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("NEXUS_DAILY_LIMIT_MIN") {
            match raw.trim().parse::<i64>() {
                Ok(v) => self.limits.daily_limit_min = v,
                Err(_) => warn!(value = %raw, "Ignoring invalid NEXUS_DAILY_LIMIT_MIN"),
            }
        }

        if let Some(raw) = lookup("NEXUS_DAILY_LIMIT_MAX") {
            match raw.trim().parse::<i64>() {
                Ok(v) => self.limits.daily_limit_max = v,
                Err(_) => warn!(value = %raw, "Ignoring invalid NEXUS_DAILY_LIMIT_MAX"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nexus", "pricing")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }

    // =========================================================================
    // Core Objects
    // =========================================================================

    /// The policy the calculators take.
    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            total_content_credits: self.credits.total_content_credits,
            cost_per_credit_usd_micros: self.credits.cost_per_credit_usd_micros,
            usd_to_brl: Rate::from_bps(self.credits.usd_to_brl_bps),
            deduction_rate: Rate::from_bps(self.dilution.deduction_rate_bps),
            auto_adjust_threshold: self.credits.auto_adjust_threshold,
            daily_limit_min: self.limits.daily_limit_min,
            daily_limit_max: self.limits.daily_limit_max,
            example_sale_price: Money::from_cents(self.dilution.example_sale_price_cents),
        }
    }

    /// The configured tool list, or the standard catalog.
    pub fn catalog(&self) -> ConfigResult<ToolCatalog> {
        match &self.tools {
            Some(tools) => Ok(ToolCatalog::new(tools.clone())?),
            None => Ok(ToolCatalog::standard()),
        }
    }
}

/// Non-negative finite decimal with `.` or `,` as separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::ToolId;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> PricingConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = PricingConfig::default();
        config.apply_overrides_from(|key| env.get(key).cloned());
        config
    }

    #[test]
    fn test_default_config_matches_default_policy() {
        let config = PricingConfig::default();
        assert_eq!(config.policy(), PricingPolicy::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog().unwrap(), ToolCatalog::standard());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = PricingConfig::from_toml(
            r#"
            [limits]
            daily_limit_max = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.limits.daily_limit_max, 200);
        assert_eq!(config.limits.daily_limit_min, 5);
        assert_eq!(config.credits.total_content_credits, 1_500);
        assert_eq!(config.dilution.deduction_rate_bps, 250);
        assert!(config.tools.is_none());
    }

    #[test]
    fn test_full_toml_sections() {
        let config = PricingConfig::from_toml(
            r#"
            [credits]
            total_content_credits = 2000
            cost_per_credit_usd_micros = 12000
            usd_to_brl_bps = 55000
            auto_adjust_threshold = 3

            [dilution]
            deduction_rate_bps = 500
            example_sale_price_cents = 29700

            [[tools]]
            id = "marketing_pack"
            name = "Marketing Pack"
            base_setup_fee = 50000
            monthly_per_student = 0
            diluted_markup = 2000
            "#,
        )
        .unwrap();

        let policy = config.policy();
        assert_eq!(policy.total_content_credits, 2_000);
        assert_eq!(policy.usd_to_brl.bps(), 55_000);
        assert_eq!(policy.deduction_rate.bps(), 500);
        assert_eq!(policy.example_sale_price.cents(), 29_700);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(ToolId::MarketingPack).unwrap().base_setup_fee.cents(),
            50_000
        );
    }

    #[test]
    fn test_unknown_tool_id_fails_to_parse() {
        let result = PricingConfig::from_toml(
            r#"
            [[tools]]
            id = "teleport"
            name = "Teleport"
            base_setup_fee = 1
            monthly_per_student = 0
            diluted_markup = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PricingConfig::default();
        config.dilution.deduction_rate_bps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Policy(_))));

        let mut config = PricingConfig::default();
        config.limits.daily_limit_min = 200;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.dilution.example_sale_price_cents = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = PricingConfig::default();
        let tool = ToolCatalog::standard().tools()[0].clone();
        config.tools = Some(vec![tool.clone(), tool]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_tool_fees_fail_validation() {
        let config = PricingConfig::from_toml(
            r#"
            [[tools]]
            id = "marketing_pack"
            name = "Marketing Pack"
            base_setup_fee = -50000
            monthly_per_student = -490
            diluted_markup = 3000
            "#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::Policy(_))));
        assert!(config.catalog().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = overrides(&[
            ("NEXUS_TOTAL_CONTENT_CREDITS", "1800"),
            ("NEXUS_COST_PER_CREDIT_USD", "0.02"),
            ("NEXUS_USD_TO_BRL", "5,75"),
            ("NEXUS_DEDUCTION_RATE", "3"),
            ("NEXUS_AUTO_ADJUST_THRESHOLD", "10"),
            ("NEXUS_DAILY_LIMIT_MIN", "1"),
            ("NEXUS_DAILY_LIMIT_MAX", "300"),
        ]);

        assert_eq!(config.credits.total_content_credits, 1_800);
        assert_eq!(config.credits.cost_per_credit_usd_micros, 20_000);
        assert_eq!(config.credits.usd_to_brl_bps, 57_500);
        assert_eq!(config.dilution.deduction_rate_bps, 300);
        assert_eq!(config.credits.auto_adjust_threshold, 10);
        assert_eq!(config.limits.daily_limit_min, 1);
        assert_eq!(config.limits.daily_limit_max, 300);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = overrides(&[
            ("NEXUS_TOTAL_CONTENT_CREDITS", "lots"),
            ("NEXUS_USD_TO_BRL", "-6"),
            ("NEXUS_DEDUCTION_RATE", "NaN"),
        ]);
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("nexus-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("pricing.toml");

        let mut config = PricingConfig::default();
        config.limits.daily_limit_max = 120;
        config.save(Some(path.clone())).unwrap();

        let loaded = PricingConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("nexus-config-does-not-exist.toml");
        let config = PricingConfig::load_or_default(Some(path));
        assert_eq!(config.limits.daily_limit_min, PricingPolicy::default().daily_limit_min);
    }
}
