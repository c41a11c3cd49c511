//! # nexus-core: Pricing and Credit Engine
//!
//! Everything the course wizard shows a producer about money: how many AI
//! credits a course consumes, what they cost, what the optional tools add,
//! and what is left of each sale. Pure calculations, no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nexus Course Wizard                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Wizard UI                                    │   │
//! │  │   Identity ──► Credits ──► Tools & Payment ──► Kit ──► Summary │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nexus-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐      │   │
//! │  │   │ credits  │  │ catalog  │  │ dilution │  │ cashflow │      │   │
//! │  │   │ limits   │  │ tools    │  │ payment  │  │ net/sale │      │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘      │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐      │   │
//! │  │   │  money   │  │  policy  │  │ document │  │   kit    │      │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FLOATS IN MONEY • INJECTED POLICY                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              nexus-config (policy file, env, logging)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in centavos, BRL formatting
//! - [`types`] - Basis-point [`Rate`]
//! - [`policy`] - Tunable constants as one injected value
//! - [`credits`] - Daily limits, credit totals, setup cost, deficit
//! - [`catalog`] / [`tools`] - Optional tools and their summed fees
//! - [`dilution`] / [`payment`] - Financing tool fees out of sales
//! - [`cashflow`] - Net proceeds of one sale
//! - [`document`] - CPF / CNPJ checks
//! - [`kit`] - Physical kit items
//! - [`validation`] - Submit-time form checks
//!
//! ## Example Usage
//!
//! ```rust
//! use nexus_core::credits::CreditCalculator;
//! use nexus_core::policy::PricingPolicy;
//!
//! let calc = CreditCalculator::new(PricingPolicy::default());
//!
//! // 30-day course → 1500 / 30 = 50 interactions per day
//! assert_eq!(calc.recommended_limit(30), 50);
//!
//! // 30/day for 30 days = 900 credits = R$ 54,00
//! assert_eq!(calc.setup_cost(30, 30).to_string(), "R$ 54,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cashflow;
pub mod catalog;
pub mod credits;
pub mod dilution;
pub mod document;
pub mod error;
pub mod kit;
pub mod money;
pub mod payment;
pub mod policy;
pub mod tools;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cashflow::{CashflowProjector, NetProceeds, SaleScenario};
pub use catalog::{ToolCatalog, ToolDefinition, ToolId};
pub use credits::{CreditAssessment, CreditCalculator, CreditConfiguration};
pub use dilution::{DilutionFinancer, DilutionQuote};
pub use document::DocumentKind;
pub use error::{CoreError, CoreResult, ValidationError};
pub use kit::{KitItem, KitItemForm, PhysicalKit};
pub use money::Money;
pub use payment::{FinancialModel, PaymentSelection, PaymentType};
pub use policy::PricingPolicy;
pub use tools::{ToolCostAggregator, ToolCosts};
pub use types::Rate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum characters in a kit item name.
pub const MAX_KIT_ITEM_NAME_LEN: usize = 120;

/// Maximum characters in a kit item description.
pub const MAX_KIT_ITEM_DESCRIPTION_LEN: usize = 500;

/// Maximum items in one physical kit.
pub const MAX_KIT_ITEMS: usize = 50;

/// Longest course accepted at submit, ten years.
pub const MAX_COURSE_DURATION_DAYS: i64 = 3_650;
