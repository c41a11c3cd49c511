//! # Shared Value Types
//!
//! Small value types used across the calculators.
//!
//! ## Why Basis Points?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1 basis point = 0.01% = 1/10000                                        │
//! │                                                                         │
//! │  Tool markup 30%        →  3000 bps                                     │
//! │  Per-sale deduction 2.5% →  250 bps                                     │
//! │  Exchange rate 6.00×    → 60000 bps  (a ratio is just a big rate)       │
//! │                                                                         │
//! │  Integer rates keep break-even exact: 10000 / 250 = 40                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: u32 = 10_000;

// =============================================================================
// Rate
// =============================================================================

/// A percentage or ratio represented in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (2.5 → 250 bps).
    ///
    /// Negative or non-finite input yields zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate::zero();
        }
        Rate((pct * 100.0).round() as u32)
    }

    /// Creates a rate from a plain ratio (6.00 → 60000 bps).
    pub fn from_ratio(ratio: f64) -> Self {
        Rate::from_percentage(ratio * 100.0)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
