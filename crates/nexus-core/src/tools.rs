//! # Tool Cost Aggregation
//!
//! Sums the fees of the tools a producer selected.
//!
//! Unknown ids are filtered out, not looked up: a selection saved last
//! month may name a tool the catalog no longer sells.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::catalog::{ToolCatalog, ToolId};
use crate::money::Money;

/// Fee totals for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ToolCosts {
    /// One-time setup fees, paid up front.
    pub setup_fee: Money,
    /// Recurring fee per active student per month.
    pub monthly_fee: Money,
}

impl ToolCosts {
    /// True when there is a setup fee to pay or dilute.
    ///
    /// Callers gate the dilution line and the break-even figure on this,
    /// never on the break-even number itself.
    pub fn has_setup_cost(&self) -> bool {
        self.setup_fee.is_positive()
    }
}

impl std::ops::Add for ToolCosts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ToolCosts {
            setup_fee: self.setup_fee + other.setup_fee,
            monthly_fee: self.monthly_fee + other.monthly_fee,
        }
    }
}

/// Fee sums over an injected catalog.
#[derive(Debug, Clone, Copy)]
pub struct ToolCostAggregator<'a> {
    catalog: &'a ToolCatalog,
}

impl<'a> ToolCostAggregator<'a> {
    pub fn new(catalog: &'a ToolCatalog) -> Self {
        ToolCostAggregator { catalog }
    }

    pub fn total_setup_fee(&self, selected: &BTreeSet<ToolId>) -> Money {
        self.catalog.selected(selected).map(|t| t.base_setup_fee).sum()
    }

    pub fn total_monthly_fee(&self, selected: &BTreeSet<ToolId>) -> Money {
        self.catalog
            .selected(selected)
            .map(|t| t.monthly_per_student)
            .sum()
    }

    /// Both totals in one pass.
    ///
    /// ## Example
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use nexus_core::catalog::{ToolCatalog, ToolId};
    /// use nexus_core::tools::ToolCostAggregator;
    ///
    /// let catalog = ToolCatalog::standard();
    /// let selected: BTreeSet<ToolId> = [ToolId::MarketingPack, ToolId::CoachIa].into();
    ///
    /// let costs = ToolCostAggregator::new(&catalog).aggregate(&selected);
    /// assert_eq!(costs.setup_fee.cents(), 99_700);
    /// assert_eq!(costs.monthly_fee.cents(), 540);
    /// ```
    pub fn aggregate(&self, selected: &BTreeSet<ToolId>) -> ToolCosts {
        self.catalog
            .selected(selected)
            .fold(ToolCosts::default(), |acc, t| {
                acc + ToolCosts {
                    setup_fee: t.base_setup_fee,
                    monthly_fee: t.monthly_per_student,
                }
            })
    }
}
