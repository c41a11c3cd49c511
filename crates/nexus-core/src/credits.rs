//! # Credit Allowance
//!
//! Derives how many AI interactions a student gets per day and what that
//! allowance costs the producer up front.
//!
//! ## The Content Mass Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A course needs `total_content_credits` interactions to be consumed     │
//! │  in full. Spread over the course duration:                              │
//! │                                                                         │
//! │     recommended = ceil(1500 / duration_days)                            │
//! │                                                                         │
//! │     15 days → 100/day     30 days → 50/day     60 days → 25/day        │
//! │                                                                         │
//! │  A daily limit below the recommendation leaves a deficit. The deficit  │
//! │  is reported as a percentage; trimming content is someone else's job.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Setup Cost
//! `limit × days` credits at US$ 0,01 each, converted at R$ 6,00:
//! 30/day for 30 days = 900 credits = US$ 9,00 = R$ 54,00.
//!
//! ## Usage
//! ```rust
//! use nexus_core::credits::CreditCalculator;
//! use nexus_core::policy::PricingPolicy;
//!
//! let calc = CreditCalculator::new(PricingPolicy::default());
//! assert_eq!(calc.recommended_limit(30), 50);
//! assert_eq!(calc.setup_cost(30, 30).cents(), 5_400);
//! assert_eq!(calc.deficit_percent(30, 50), 40);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{mul_div_round, Money};
use crate::policy::{PricingPolicy, MICROS_PER_USD};
use crate::types::BPS_PER_UNIT;

// =============================================================================
// Calculator
// =============================================================================

/// Pure credit math over an injected [`PricingPolicy`].
///
/// Every method clamps instead of failing: durations below 1 count as 1,
/// negative limits count as 0. These back live-typed form fields that
/// hold garbage between keystrokes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCalculator {
    policy: PricingPolicy,
}

impl CreditCalculator {
    pub fn new(policy: PricingPolicy) -> Self {
        CreditCalculator { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Daily limit that consumes the whole content mass within
    /// `duration_days`: `ceil(total / days)`.
    pub fn recommended_limit(&self, duration_days: i64) -> i64 {
        let days = duration_days.max(1);
        let total = self.policy.total_content_credits.max(0);
        total / days + i64::from(total % days != 0)
    }

    /// Credits purchased for a course: `limit × days`.
    ///
    /// May exceed the content mass when the producer is generous.
    pub fn total_credits(&self, daily_limit: i64, duration_days: i64) -> i64 {
        daily_limit.max(0).saturating_mul(duration_days.max(1))
    }

    /// BRL cost of the credits, rounded half up to the centavo.
    pub fn setup_cost(&self, daily_limit: i64, duration_days: i64) -> Money {
        let credits = self.total_credits(daily_limit, duration_days) as i128;
        let usd_micros = credits * self.policy.cost_per_credit_usd_micros as i128;
        // micros → US cents is /10_000, then the bps exchange rate is /10_000
        let denominator = (MICROS_PER_USD / 100) as i128 * BPS_PER_UNIT as i128;
        Money::from_cents(mul_div_round(
            usd_micros,
            self.policy.usd_to_brl.bps() as i128,
            denominator,
        ))
    }

    /// Share of the recommendation the limit falls short by, 0-100,
    /// rounded half up. Zero when the limit covers the recommendation.
    pub fn deficit_percent(&self, daily_limit: i64, recommended: i64) -> i64 {
        let limit = daily_limit.max(0);
        if recommended <= 0 || limit >= recommended {
            return 0;
        }
        let shortfall = (recommended - limit) as i128;
        let recommended = recommended as i128;
        ((shortfall * 200 + recommended) / (2 * recommended)) as i64
    }

    /// New daily limit after a duration change, if one is due.
    ///
    /// Returns the exact recommendation only when the current limit is
    /// more than `auto_adjust_threshold` away from it, so a producer's
    /// manual tweak survives small duration edits.
    pub fn auto_adjusted_limit(&self, current_limit: i64, duration_days: i64) -> Option<i64> {
        let recommended = self.recommended_limit(duration_days);
        let gap = current_limit.saturating_sub(recommended).unsigned_abs();
        if gap > self.policy.auto_adjust_threshold.max(0).unsigned_abs() {
            Some(recommended)
        } else {
            None
        }
    }

    /// Everything the credit card in the wizard displays, in one pass.
    pub fn assess(&self, daily_limit: i64, duration_days: i64) -> CreditAssessment {
        let recommended_limit = self.recommended_limit(duration_days);
        let deficit_percent = self.deficit_percent(daily_limit, recommended_limit);
        CreditAssessment {
            recommended_limit,
            total_credits: self.total_credits(daily_limit, duration_days),
            setup_cost: self.setup_cost(daily_limit, duration_days),
            deficit_percent,
            is_below_recommended: deficit_percent > 0,
        }
    }
}

/// Result of [`CreditCalculator::assess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditAssessment {
    pub recommended_limit: i64,
    pub total_credits: i64,
    pub setup_cost: Money,
    /// Percentage of practical modules the UI warns will be left out.
    pub deficit_percent: i64,
    pub is_below_recommended: bool,
}

// =============================================================================
// Editable Configuration
// =============================================================================

/// Per-course credit settings as edited in the product wizard.
///
/// ## Editing Rules
/// ```text
/// set_course_duration(days)
///      │
///      ├── days < 1 → treated as 1
///      ├── unchanged → nothing happens
///      └── changed → |limit - recommended| > threshold ?
///                       ├── yes → limit = recommended (exact, not clamped)
///                       └── no  → limit kept
///
/// set_daily_limit(limit) → clamped into [daily_limit_min, daily_limit_max]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditConfiguration {
    pub daily_limit: i64,
    pub course_duration_days: i64,
}

impl Default for CreditConfiguration {
    fn default() -> Self {
        CreditConfiguration {
            daily_limit: 30,
            course_duration_days: 30,
        }
    }
}

impl CreditConfiguration {
    pub fn new(daily_limit: i64, course_duration_days: i64) -> Self {
        CreditConfiguration {
            daily_limit: daily_limit.max(0),
            course_duration_days: course_duration_days.max(1),
        }
    }

    /// Changes the duration and applies the hysteresis auto-adjust.
    ///
    /// Returns true when the daily limit was overridden.
    pub fn set_course_duration(&mut self, duration_days: i64, calc: &CreditCalculator) -> bool {
        let days = duration_days.max(1);
        if days == self.course_duration_days {
            return false;
        }
        self.course_duration_days = days;

        match calc.auto_adjusted_limit(self.daily_limit, days) {
            Some(limit) => {
                self.daily_limit = limit;
                true
            }
            None => false,
        }
    }

    /// Manual limit change from the slider, clamped to its bounds.
    pub fn set_daily_limit(&mut self, daily_limit: i64, calc: &CreditCalculator) {
        self.daily_limit = calc.policy().clamp_daily_limit(daily_limit);
    }

    pub fn assess(&self, calc: &CreditCalculator) -> CreditAssessment {
        calc.assess(self.daily_limit, self.course_duration_days)
    }

    /// Allowance sentence producers paste into their sales page terms.
    pub fn terms_snippet(&self) -> String {
        format!(
            "O aluno terá direito a uma franquia diária de {} interações gratuitas \
             com o Mentor IA. O uso excedente poderá ser adquirido dentro da \
             plataforma via recarga de créditos.",
            self.daily_limit
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;

    fn calc() -> CreditCalculator {
        CreditCalculator::new(PricingPolicy::default())
    }

    #[test]
    fn test_recommended_limit() {
        let calc = calc();
        assert_eq!(calc.recommended_limit(15), 100);
        assert_eq!(calc.recommended_limit(30), 50);
        assert_eq!(calc.recommended_limit(60), 25);
        // ceil: 1500 / 7 = 214.28
        assert_eq!(calc.recommended_limit(7), 215);
        assert_eq!(calc.recommended_limit(1), 1_500);
        assert_eq!(calc.recommended_limit(3_000), 1);
    }

    #[test]
    fn test_recommended_limit_clamps_duration() {
        let calc = calc();
        assert_eq!(calc.recommended_limit(0), 1_500);
        assert_eq!(calc.recommended_limit(-10), 1_500);
    }

    #[test]
    fn test_recommended_limit_is_non_increasing() {
        let calc = calc();
        let mut previous = calc.recommended_limit(1);
        for days in 2..=400 {
            let current = calc.recommended_limit(days);
            assert!(current <= previous, "increased at {} days", days);
            previous = current;
        }
    }

    #[test]
    fn test_total_credits() {
        let calc = calc();
        assert_eq!(calc.total_credits(30, 30), 900);
        assert_eq!(calc.total_credits(100, 30), 3_000);
        assert_eq!(calc.total_credits(-5, 30), 0);
        assert_eq!(calc.total_credits(30, 0), 30);
    }

    #[test]
    fn test_setup_cost() {
        let calc = calc();
        // 900 credits × US$ 0,01 × 6,00 = R$ 54,00
        assert_eq!(calc.setup_cost(30, 30).cents(), 5_400);
        // 1500 credits → R$ 90,00
        assert_eq!(calc.setup_cost(50, 30).cents(), 9_000);
        assert!(calc.setup_cost(0, 30).is_zero());
    }

    #[test]
    fn test_setup_cost_follows_policy() {
        let policy = PricingPolicy {
            cost_per_credit_usd_micros: 5_000, // half a cent
            usd_to_brl: Rate::from_bps(54_500), // 5.45
            ..PricingPolicy::default()
        };
        let calc = CreditCalculator::new(policy);
        // 900 × 0.005 × 5.45 = 24.525 → R$ 24,53
        assert_eq!(calc.setup_cost(30, 30).cents(), 2_453);
    }

    #[test]
    fn test_deficit_percent() {
        let calc = calc();
        assert_eq!(calc.deficit_percent(30, 50), 40);
        assert_eq!(calc.deficit_percent(5, 100), 95);
        // 1/3 = 33.3 → 33, 2/3 = 66.7 → 67
        assert_eq!(calc.deficit_percent(2, 3), 33);
        assert_eq!(calc.deficit_percent(1, 3), 67);
        // 1/8 = 12.5 → 13 (half up)
        assert_eq!(calc.deficit_percent(7, 8), 13);
    }

    #[test]
    fn test_deficit_zero_when_sufficient() {
        let calc = calc();
        for days in [1, 7, 15, 30, 45, 60, 365] {
            let recommended = calc.recommended_limit(days);
            assert_eq!(calc.deficit_percent(recommended, recommended), 0);
            assert_eq!(calc.deficit_percent(recommended + 10, recommended), 0);
        }
        assert_eq!(calc.deficit_percent(10, 0), 0);
    }

    #[test]
    fn test_deficit_capped_for_negative_limit() {
        assert_eq!(calc().deficit_percent(-20, 50), 100);
    }

    #[test]
    fn test_auto_adjust_hysteresis() {
        let calc = calc();
        // recommended for 30 days is 50
        assert_eq!(calc.auto_adjusted_limit(50, 30), None);
        assert_eq!(calc.auto_adjusted_limit(45, 30), None);
        assert_eq!(calc.auto_adjusted_limit(55, 30), None);
        assert_eq!(calc.auto_adjusted_limit(44, 30), Some(50));
        assert_eq!(calc.auto_adjusted_limit(56, 30), Some(50));
    }

    #[test]
    fn test_auto_adjust_threshold_is_configurable() {
        let calc = CreditCalculator::new(PricingPolicy {
            auto_adjust_threshold: 0,
            ..PricingPolicy::default()
        });
        assert_eq!(calc.auto_adjusted_limit(49, 30), Some(50));
        assert_eq!(calc.auto_adjusted_limit(50, 30), None);
    }

    #[test]
    fn test_configuration_duration_change_overrides_far_limit() {
        let calc = calc();
        let mut config = CreditConfiguration::default();

        // 30 → 60 days: recommended 25, limit 30 is within 5 → kept
        assert!(!config.set_course_duration(60, &calc));
        assert_eq!(config.daily_limit, 30);

        // 60 → 15 days: recommended 100, far from 30 → overridden
        assert!(config.set_course_duration(15, &calc));
        assert_eq!(config.daily_limit, 100);
        assert_eq!(config.course_duration_days, 15);
    }

    #[test]
    fn test_configuration_auto_adjust_is_not_clamped() {
        let calc = calc();
        let mut config = CreditConfiguration::default();
        assert!(config.set_course_duration(5, &calc));
        assert_eq!(config.daily_limit, 300);
    }

    #[test]
    fn test_configuration_same_duration_is_noop() {
        let calc = calc();
        let mut config = CreditConfiguration::new(10, 30);
        assert!(!config.set_course_duration(30, &calc));
        assert_eq!(config.daily_limit, 10);
    }

    #[test]
    fn test_configuration_zero_duration_counts_as_one() {
        let calc = calc();
        let mut config = CreditConfiguration::default();
        assert!(config.set_course_duration(0, &calc));
        assert_eq!(config.course_duration_days, 1);
        assert_eq!(config.daily_limit, 1_500);
    }

    #[test]
    fn test_configuration_manual_limit_is_clamped() {
        let calc = calc();
        let mut config = CreditConfiguration::default();
        config.set_daily_limit(2, &calc);
        assert_eq!(config.daily_limit, 5);
        config.set_daily_limit(999, &calc);
        assert_eq!(config.daily_limit, 150);
        config.set_daily_limit(42, &calc);
        assert_eq!(config.daily_limit, 42);
    }

    #[test]
    fn test_huge_inputs_saturate() {
        let calc = calc();
        assert_eq!(calc.total_credits(5_000_000_000, 5_000_000_000), i64::MAX);
        assert_eq!(calc.setup_cost(5_000_000_000, 5_000_000_000).cents(), i64::MAX);
        assert_eq!(calc.total_credits(i64::MAX, i64::MAX), i64::MAX);
        assert!(calc.setup_cost(i64::MIN, i64::MIN).is_zero());

        assert_eq!(calc.auto_adjusted_limit(i64::MIN, 30), Some(50));
        assert_eq!(calc.auto_adjusted_limit(i64::MAX, 30), Some(50));
        assert_eq!(calc.recommended_limit(i64::MAX), 1);
        assert_eq!(calc.deficit_percent(i64::MIN, 50), 100);

        let assessment = calc.assess(9_999_999_999, 9_999_999_999);
        assert_eq!(assessment.total_credits, i64::MAX);
        assert!(!assessment.is_below_recommended);
    }

    #[test]
    fn test_extreme_policy_does_not_overflow() {
        let calc = CreditCalculator::new(PricingPolicy {
            total_content_credits: i64::MAX,
            cost_per_credit_usd_micros: i64::MAX,
            auto_adjust_threshold: i64::MAX,
            ..PricingPolicy::default()
        });
        assert_eq!(calc.recommended_limit(1), i64::MAX);
        assert_eq!(calc.recommended_limit(2), i64::MAX / 2 + 1);
        assert_eq!(calc.deficit_percent(1, i64::MAX), 100);
        assert_eq!(calc.auto_adjusted_limit(0, 1), None);
        assert_eq!(calc.setup_cost(i64::MAX, 1).cents(), i64::MAX);

        let mut config = CreditConfiguration::new(i64::MAX, i64::MAX);
        assert!(!config.set_course_duration(i64::MIN, &calc));
        assert_eq!(config.course_duration_days, 1);
    }

    #[test]
    fn test_terms_snippet_follows_limit() {
        let mut config = CreditConfiguration::default();
        assert_eq!(
            config.terms_snippet(),
            "O aluno terá direito a uma franquia diária de 30 interações gratuitas \
             com o Mentor IA. O uso excedente poderá ser adquirido dentro da \
             plataforma via recarga de créditos."
        );

        config.set_daily_limit(80, &calc());
        assert!(config.terms_snippet().contains("franquia diária de 80 interações"));
    }

    #[test]
    fn test_assessment() {
        let calc = calc();
        let assessment = CreditConfiguration::default().assess(&calc);
        assert_eq!(assessment.recommended_limit, 50);
        assert_eq!(assessment.total_credits, 900);
        assert_eq!(assessment.setup_cost.cents(), 5_400);
        assert_eq!(assessment.deficit_percent, 40);
        assert!(assessment.is_below_recommended);

        let covered = calc.assess(50, 30);
        assert_eq!(covered.deficit_percent, 0);
        assert!(!covered.is_below_recommended);
    }
}
