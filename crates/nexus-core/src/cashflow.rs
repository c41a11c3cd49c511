//! # Cashflow Projection
//!
//! What the producer receives from one sale once the platform's cuts are
//! taken.
//!
//! ## Single Sale Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale price                                       R$ 197,00             │
//! │  (-) Embedded AI + infra cost (always)            R$  54,00             │
//! │  (-) Tool dilution (diluted AND tools cost > 0)   R$  32,40             │
//! │  ─────────────────────────────────────────────────────────              │
//! │  = Received by producer                           R$ 110,60             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No input validation happens here; prices come in as integer centavos and
//! credit inputs are clamped by [`CreditCalculator`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::catalog::{ToolCatalog, ToolId};
use crate::credits::{CreditCalculator, CreditConfiguration};
use crate::dilution::DilutionFinancer;
use crate::money::Money;
use crate::payment::{PaymentSelection, PaymentType};
use crate::policy::PricingPolicy;
use crate::tools::ToolCostAggregator;

/// Inputs for one projected sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleScenario {
    pub sale_price: Money,
    pub daily_limit: i64,
    pub duration_days: i64,
    pub selected_tools: BTreeSet<ToolId>,
    pub payment_type: PaymentType,
}

impl SaleScenario {
    /// Scenario from the wizard's current state.
    pub fn from_wizard(
        sale_price: Money,
        credits: &CreditConfiguration,
        selection: &PaymentSelection,
    ) -> Self {
        SaleScenario {
            sale_price,
            daily_limit: credits.daily_limit,
            duration_days: credits.course_duration_days,
            selected_tools: selection.selected_tools().clone(),
            payment_type: selection.payment_type(),
        }
    }
}

/// Result of a single-sale projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NetProceeds {
    pub sale_price: Money,
    /// Credit setup cost, withheld whatever the payment type.
    pub embedded_cost: Money,
    pub dilution_deduction: Money,
    pub net_proceeds: Money,
    /// Only meaningful when `break_even_applies`.
    pub sales_to_break_even: i64,
    pub break_even_applies: bool,
    pub has_tools_cost: bool,
    /// Recurring tool fee per active student, shown beside the example.
    pub monthly_fee_per_student: Money,
}

/// Composes credit cost and dilution into per-sale proceeds.
#[derive(Debug, Clone, Copy)]
pub struct CashflowProjector<'a> {
    catalog: &'a ToolCatalog,
    policy: PricingPolicy,
}

impl<'a> CashflowProjector<'a> {
    pub fn new(catalog: &'a ToolCatalog, policy: PricingPolicy) -> Self {
        CashflowProjector { catalog, policy }
    }

    /// Projects one sale.
    ///
    /// ## Example
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use nexus_core::cashflow::{CashflowProjector, SaleScenario};
    /// use nexus_core::catalog::ToolCatalog;
    /// use nexus_core::money::Money;
    /// use nexus_core::payment::PaymentType;
    /// use nexus_core::policy::PricingPolicy;
    ///
    /// let catalog = ToolCatalog::standard();
    /// let projector = CashflowProjector::new(&catalog, PricingPolicy::default());
    ///
    /// let result = projector.project_single_sale(&SaleScenario {
    ///     sale_price: Money::from_cents(19_700),
    ///     daily_limit: 30,
    ///     duration_days: 30,
    ///     selected_tools: BTreeSet::new(),
    ///     payment_type: PaymentType::Diluted,
    /// });
    /// assert_eq!(result.embedded_cost.cents(), 5_400);
    /// assert_eq!(result.net_proceeds.cents(), 14_300);
    /// ```
    pub fn project_single_sale(&self, scenario: &SaleScenario) -> NetProceeds {
        let credits = CreditCalculator::new(self.policy);
        let financer = DilutionFinancer::new(self.catalog, &self.policy);
        let costs = ToolCostAggregator::new(self.catalog).aggregate(&scenario.selected_tools);

        let embedded_cost = credits.setup_cost(scenario.daily_limit, scenario.duration_days);

        let has_tools_cost = costs.has_setup_cost();
        let break_even_applies = has_tools_cost && scenario.payment_type == PaymentType::Diluted;
        let dilution_deduction = if break_even_applies {
            financer.per_sale_deduction(financer.diluted_setup_fee(&scenario.selected_tools))
        } else {
            Money::zero()
        };

        NetProceeds {
            sale_price: scenario.sale_price,
            embedded_cost,
            dilution_deduction,
            net_proceeds: scenario.sale_price - embedded_cost - dilution_deduction,
            sales_to_break_even: financer.sales_to_break_even(),
            break_even_applies,
            has_tools_cost,
            monthly_fee_per_student: costs.monthly_fee,
        }
    }

    /// Projection at the policy's example sale price.
    pub fn project_example(
        &self,
        credits: &CreditConfiguration,
        selection: &PaymentSelection,
    ) -> NetProceeds {
        let scenario = SaleScenario::from_wizard(self.policy.example_sale_price, credits, selection);
        self.project_single_sale(&scenario)
    }
}
