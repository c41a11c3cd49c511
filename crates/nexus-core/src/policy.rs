//! # Pricing Policy
//!
//! Every tunable constant the calculators use, gathered in one value that
//! callers inject. Defaults reproduce the production pricing.
//!
//! ## Default Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_content_credits        1500       "mass" of a course's content   │
//! │  cost_per_credit_usd_micros   10_000     US$ 0,01 per interaction       │
//! │  usd_to_brl                   60000 bps  R$ 6,00 per US$ (fixed)        │
//! │  deduction_rate               250 bps    2.5% of diluted fee per sale   │
//! │  auto_adjust_threshold        5          hysteresis on duration edits   │
//! │  daily_limit_min / max        5 / 150    slider bounds                  │
//! │  example_sale_price           R$ 197,00  cashflow example               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading from file or environment lives in `nexus-config`; this module
//! only holds the values and checks their consistency.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Rate;

/// Micro-dollars in one US dollar.
pub const MICROS_PER_USD: i64 = 1_000_000;

/// Tunable pricing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Interactions needed to cover a course's whole content.
    pub total_content_credits: i64,

    /// Cost of one AI interaction in millionths of a US dollar.
    pub cost_per_credit_usd_micros: i64,

    /// BRL per USD, as a ratio in basis points.
    pub usd_to_brl: Rate,

    /// Share of the diluted fee withheld from each sale.
    pub deduction_rate: Rate,

    /// Minimum gap between current and recommended daily limit before a
    /// duration change overrides the limit.
    pub auto_adjust_threshold: i64,

    /// Lowest daily limit the producer may pick.
    pub daily_limit_min: i64,

    /// Highest daily limit the producer may pick.
    pub daily_limit_max: i64,

    /// Sale price used by the single-sale cashflow example.
    pub example_sale_price: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            total_content_credits: 1_500,
            cost_per_credit_usd_micros: 10_000,
            usd_to_brl: Rate::from_bps(60_000),
            deduction_rate: Rate::from_bps(250),
            auto_adjust_threshold: 5,
            daily_limit_min: 5,
            daily_limit_max: 150,
            example_sale_price: Money::from_cents(19_700),
        }
    }
}

impl PricingPolicy {
    /// Checks that the values can drive the calculators.
    ///
    /// ## Rules
    /// - Content mass, exchange rate and deduction rate must be positive
    /// - Credit cost and hysteresis threshold must not be negative
    /// - `daily_limit_min` must be at least 1 and not above `daily_limit_max`
    pub fn validate(&self) -> CoreResult<()> {
        if self.total_content_credits <= 0 {
            return Err(invalid("total content credits must be positive"));
        }
        if self.cost_per_credit_usd_micros < 0 {
            return Err(invalid("cost per credit cannot be negative"));
        }
        if self.usd_to_brl.is_zero() {
            return Err(invalid("exchange rate must be positive"));
        }
        if self.deduction_rate.is_zero() {
            return Err(invalid("deduction rate must be positive"));
        }
        if self.auto_adjust_threshold < 0 {
            return Err(invalid("auto-adjust threshold cannot be negative"));
        }
        if self.daily_limit_min < 1 {
            return Err(invalid("daily limit minimum must be at least 1"));
        }
        if self.daily_limit_min > self.daily_limit_max {
            return Err(CoreError::InvalidPolicy {
                reason: format!(
                    "daily limit minimum {} exceeds maximum {}",
                    self.daily_limit_min, self.daily_limit_max
                ),
            });
        }
        Ok(())
    }

    /// Clamps a daily limit into the slider bounds.
    pub fn clamp_daily_limit(&self, limit: i64) -> i64 {
        // max/min instead of clamp: an unvalidated policy must not panic
        limit.max(self.daily_limit_min).min(self.daily_limit_max)
    }
}

fn invalid(reason: &str) -> CoreError {
    CoreError::InvalidPolicy {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = PricingPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.total_content_credits, 1_500);
        assert_eq!(policy.deduction_rate.bps(), 250);
    }

    #[test]
    fn test_policy_validation() {
        let mut policy = PricingPolicy::default();
        policy.deduction_rate = Rate::zero();
        assert!(policy.validate().is_err());

        let mut policy = PricingPolicy::default();
        policy.total_content_credits = 0;
        assert!(policy.validate().is_err());

        let mut policy = PricingPolicy::default();
        policy.daily_limit_min = 200;
        let err = policy.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid pricing policy: daily limit minimum 200 exceeds maximum 150"
        );
    }

    #[test]
    fn test_clamp_daily_limit() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.clamp_daily_limit(2), 5);
        assert_eq!(policy.clamp_daily_limit(50), 50);
        assert_eq!(policy.clamp_daily_limit(400), 150);
    }

    #[test]
    fn test_policy_json_shape() {
        let json = serde_json::to_value(PricingPolicy::default()).unwrap();
        assert_eq!(json["totalContentCredits"], 1_500);
        assert_eq!(json["deductionRate"], 250);
        assert_eq!(json["exampleSalePrice"], 19_700);
    }
}
