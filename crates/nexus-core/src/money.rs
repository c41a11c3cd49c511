//! # Money Module
//!
//! Provides the `Money` type for handling BRL amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Diluted fee in floating point:                                         │
//! │    997 × 1.30 = 1296.1000000000001                                      │
//! │    × 0.025    = 32.402500000000003 → display drift on every keystroke  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos + Basis Points                          │
//! │    99_700 × 13_000 / 10_000 = 129_610 centavos (exact)                  │
//! │    129_610 × 250 / 10_000   = 3_240 centavos (rounded once, half up)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nexus_core::money::Money;
//!
//! let price = Money::from_cents(19_700); // R$ 197,00
//! let fee = Money::from_reais_centavos(4, 90);
//!
//! assert_eq!((price - fee).cents(), 19_210);
//! assert_eq!(price.to_string(), "R$ 197,00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a Brazilian real).
///
/// ## Design Decisions
/// - **i64 (signed)**: net proceeds go negative when costs exceed the sale
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for the UI bridge
///
/// ## Where Money is Used
/// ```text
/// ToolDefinition.base_setup_fee ──► ToolCosts.setup_fee ──► diluted fee
///                                                              │
/// CreditCalculator.setup_cost ──────┐                          ▼
///                                   ├──► NetProceeds ◄── per-sale deduction
/// SaleScenario.sale_price ──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use nexus_core::money::Money;
    ///
    /// let fee = Money::from_cents(99_700); // R$ 997,00
    /// assert_eq!(fee.cents(), 99_700);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts only the reais part carries the sign:
    /// `from_reais_centavos(-5, 50)` is -R$ 5,50.
    #[inline]
    pub const fn from_reais_centavos(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Returns `rate` of this amount, rounded half up to the centavo.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`.
    /// Negative amounts round symmetrically (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use nexus_core::money::Money;
    /// use nexus_core::types::Rate;
    ///
    /// let diluted = Money::from_cents(129_610); // R$ 1.296,10
    /// let deduction = diluted.apply_rate(Rate::from_bps(250)); // 2.5%
    /// // 1296.10 × 2.5% = 32.4025 → R$ 32,40
    /// assert_eq!(deduction.cents(), 3_240);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        Money::from_cents(mul_div_round(self.0 as i128, rate.bps() as i128, 10_000))
    }

    /// Returns this amount increased by `markup` (e.g. 30% → ×1.30).
    ///
    /// ## Example
    /// ```rust
    /// use nexus_core::money::Money;
    /// use nexus_core::types::Rate;
    ///
    /// let setup = Money::from_cents(99_700);
    /// assert_eq!(setup.with_markup(Rate::from_bps(3_000)).cents(), 129_610);
    /// ```
    pub fn with_markup(&self, markup: Rate) -> Money {
        Money::from_cents(mul_div_round(
            self.0 as i128,
            10_000 + markup.bps() as i128,
            10_000,
        ))
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// `numerator * factor / denominator`, rounded half away from zero.
///
/// Shared by rate application and the credit cost conversion, which
/// divides by 10^8 instead of 10^4.
/// Saturates at the i64 bounds instead of overflowing.
pub(crate) fn mul_div_round(numerator: i128, factor: i128, denominator: i128) -> i64 {
    let product = numerator.saturating_mul(factor);
    let half = denominator / 2;
    let rounded = if product >= 0 {
        product.saturating_add(half) / denominator
    } else {
        product.saturating_sub(half) / denominator
    };
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================
// Arithmetic saturates at the i64 bounds.

/// Brazilian formatting: `R$ 1.296,10`, `-R$ 5,50`.
///
/// ## Note
/// This is for logs and the quote binary. The UI formats with its own
/// locale helpers.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let reais = self.reais().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, ch) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.centavos_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Summing fee columns across selected tools.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
