//! # Payment Selection
//!
//! Which tools a producer picked and how their setup fee is paid.
//!
//! ## Default Bias Toward Dilution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PaymentSelection::initialize(prior)                                    │
//! │                                                                         │
//! │  prior = None            → Diluted   (first render of a session)        │
//! │  prior = Some(Upfront)   → Upfront   (remount keeps the user's choice)  │
//! │  prior = Some(Diluted)   → Diluted                                      │
//! │                                                                         │
//! │  The financed option is the default, but a remount never silently      │
//! │  throws away an explicit "pay now".                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::catalog::ToolId;
use crate::credits::CreditConfiguration;
use crate::error::ValidationError;
use crate::policy::PricingPolicy;
use crate::types::Rate;

// =============================================================================
// Payment Type
// =============================================================================

/// How tool setup fees are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Pay the plain setup fee now.
    Upfront,
    /// Pay the marked-up fee through per-sale deductions.
    #[default]
    Diluted,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Upfront => write!(f, "upfront"),
            PaymentType::Diluted => write!(f, "diluted"),
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upfront" | "now" => Ok(PaymentType::Upfront),
            "diluted" | "financed" => Ok(PaymentType::Diluted),
            other => Err(ValidationError::InvalidFormat {
                field: "payment type".to_string(),
                reason: format!("unknown value '{}', expected upfront or diluted", other),
            }),
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Selected tools plus the payment type, as held by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSelection {
    selected_tools: BTreeSet<ToolId>,
    payment_type: PaymentType,
}

impl PaymentSelection {
    /// Starts a selection, defaulting to [`PaymentType::Diluted`] unless
    /// the caller carries a prior choice over.
    pub fn initialize(prior: Option<PaymentType>) -> Self {
        PaymentSelection {
            selected_tools: BTreeSet::new(),
            payment_type: prior.unwrap_or_default(),
        }
    }

    /// Rebuilds a selection from persisted tool id strings.
    ///
    /// Ids that no longer parse are dropped; duplicates collapse.
    pub fn from_persisted<S: AsRef<str>>(tool_ids: &[S], prior: Option<PaymentType>) -> Self {
        let mut selection = PaymentSelection::initialize(prior);
        selection.selected_tools = tool_ids
            .iter()
            .filter_map(|raw| raw.as_ref().parse::<ToolId>().ok())
            .collect();
        selection
    }

    pub fn selected_tools(&self) -> &BTreeSet<ToolId> {
        &self.selected_tools
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn is_selected(&self, id: ToolId) -> bool {
        self.selected_tools.contains(&id)
    }

    /// Flips a tool in or out. Returns whether it is selected afterwards.
    pub fn toggle_tool(&mut self, id: ToolId) -> bool {
        if self.selected_tools.remove(&id) {
            false
        } else {
            self.selected_tools.insert(id);
            true
        }
    }

    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
    }

    pub fn is_diluted(&self) -> bool {
        self.payment_type == PaymentType::Diluted
    }
}

// =============================================================================
// Financial Model
// =============================================================================

/// The financing terms saved with a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialModel {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,

    /// Upfront schools settle the setup fee at activation.
    pub setup_fee_paid: bool,

    /// Share withheld from each sale; only set for diluted schools.
    pub diluted_fee_percent: Option<Rate>,

    pub daily_credit_limit: i64,
}

impl FinancialModel {
    pub fn derive(
        selection: &PaymentSelection,
        credits: &CreditConfiguration,
        policy: &PricingPolicy,
    ) -> Self {
        let diluted = selection.is_diluted();
        FinancialModel {
            payment_type: selection.payment_type(),
            setup_fee_paid: !diluted,
            diluted_fee_percent: diluted.then_some(policy.deduction_rate),
            daily_credit_limit: credits.daily_limit,
        }
    }
}
