//! # Tool Catalog
//!
//! The add-on tools a producer can switch on for a school, with their fees.
//!
//! ## Injected, Not Global
//! A catalog is an immutable value handed to the aggregators at
//! construction. Production uses [`ToolCatalog::standard`]; tests and the
//! config file can supply their own list.
//!
//! ## Built-in Tools
//! ```text
//! ┌──────────────────────┬────────────┬─────────────┬─────────┐
//! │ id                   │ setup      │ per student │ markup  │
//! ├──────────────────────┼────────────┼─────────────┼─────────┤
//! │ marketing_pack       │ R$ 997,00  │ R$ 4,90     │ 30%     │
//! │ diario_alimentar     │ R$ 300,00  │ R$ 0,80     │ 20%     │
//! │ jurista_ia           │ R$ 600,00  │ R$ 2,00     │ 25%     │
//! │ coach_ia             │ R$ 0,00    │ R$ 0,50     │ 0%      │
//! │ health_pack          │ R$ 497,00  │ R$ 2,90     │ 30%     │
//! └──────────────────────┴────────────┴─────────────┴─────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Rate;

// =============================================================================
// Tool Id
// =============================================================================

/// Every premium tool id the platform knows about.
///
/// Not all of them are sold through the catalog; selections referencing a
/// tool the catalog lacks are skipped during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    NexusAds,
    DiarioAlimentar,
    JuristaIa,
    CoachIa,
    Funnels,
    EmailMarketing,
    MarketingPack,
    HealthPack,
    FinancePack,
    CommunityPro,
}

impl ToolId {
    /// All ids, in declaration order.
    pub const ALL: [ToolId; 10] = [
        ToolId::NexusAds,
        ToolId::DiarioAlimentar,
        ToolId::JuristaIa,
        ToolId::CoachIa,
        ToolId::Funnels,
        ToolId::EmailMarketing,
        ToolId::MarketingPack,
        ToolId::HealthPack,
        ToolId::FinancePack,
        ToolId::CommunityPro,
    ];

    /// Wire name, as stored in persisted selections.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ToolId::NexusAds => "nexus_ads",
            ToolId::DiarioAlimentar => "diario_alimentar",
            ToolId::JuristaIa => "jurista_ia",
            ToolId::CoachIa => "coach_ia",
            ToolId::Funnels => "funnels",
            ToolId::EmailMarketing => "email_marketing",
            ToolId::MarketingPack => "marketing_pack",
            ToolId::HealthPack => "health_pack",
            ToolId::FinancePack => "finance_pack",
            ToolId::CommunityPro => "community_pro",
        }
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| CoreError::ToolNotFound(wanted.to_string()))
    }
}

// =============================================================================
// Tool Definition
// =============================================================================

/// A catalog entry.
///
/// Monetary fields are centavos, `diluted_markup` is basis points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToolDefinition {
    pub id: ToolId,

    /// Display name.
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// One-time activation fee.
    pub base_setup_fee: Money,

    /// Recurring fee per active student per month.
    pub monthly_per_student: Money,

    /// Extra charged on the setup fee when it is diluted into sales.
    pub diluted_markup: Rate,

    /// Course niches this tool suits (e.g. "Saúde", "Direito").
    #[serde(default)]
    pub recommended_niches: Vec<String>,
}

impl ToolDefinition {
    /// Setup fee with the dilution markup applied.
    pub fn diluted_setup_fee(&self) -> Money {
        self.base_setup_fee.with_markup(self.diluted_markup)
    }

    /// True when the tool can be activated without a setup fee.
    pub fn has_free_setup(&self) -> bool {
        self.base_setup_fee.is_zero()
    }

    fn suits_niche(&self, niche: &str) -> bool {
        let wanted = niche.trim().to_lowercase();
        !wanted.is_empty()
            && self
                .recommended_niches
                .iter()
                .any(|n| n.trim().to_lowercase() == wanted)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable list of sellable tools, unique by id, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Builds a catalog, rejecting duplicate ids and negative fees.
    pub fn new(tools: Vec<ToolDefinition>) -> CoreResult<Self> {
        let mut seen = BTreeSet::new();
        for tool in &tools {
            if !seen.insert(tool.id) {
                return Err(CoreError::DuplicateTool(tool.id.to_string()));
            }
            for (field, fee) in [
                ("base_setup_fee", tool.base_setup_fee),
                ("monthly_per_student", tool.monthly_per_student),
            ] {
                if fee.is_negative() {
                    return Err(ValidationError::OutOfRange {
                        field: format!("{}.{}", tool.id, field),
                        min: 0,
                        max: i64::MAX,
                    }
                    .into());
                }
            }
        }
        Ok(ToolCatalog { tools })
    }

    /// The tools sold on the platform today.
    pub fn standard() -> Self {
        ToolCatalog {
            tools: vec![
                tool(
                    ToolId::MarketingPack,
                    "Pack Marketing 360º",
                    "Pacote completo: Nexus Ads, funis, e-mail marketing e radar viral.",
                    99_700,
                    490,
                    3_000,
                    &["Marketing", "Vendas", "Negócios"],
                ),
                tool(
                    ToolId::DiarioAlimentar,
                    "Diário Alimentar IA",
                    "Análise de fotos de comida com calorias e macros automáticos.",
                    30_000,
                    80,
                    2_000,
                    &["Saúde", "Emagrecimento", "Nutrição"],
                ),
                tool(
                    ToolId::JuristaIa,
                    "Jurista IA",
                    "Assistente jurídico para análise de contratos e processos.",
                    60_000,
                    200,
                    2_500,
                    &["Direito", "Advocacia"],
                ),
                tool(
                    ToolId::CoachIa,
                    "Coach IA (Personalizado)",
                    "Um clone do produtor para tirar dúvidas 24h dos alunos.",
                    0,
                    50,
                    0,
                    &[],
                ),
                tool(
                    ToolId::HealthPack,
                    "Pack Saúde & Mente",
                    "Diário completo: sono, humor, espiritualidade e métricas físicas.",
                    49_700,
                    290,
                    3_000,
                    &[
                        "Saúde",
                        "Terapia",
                        "Emagrecimento",
                        "Espiritualidade",
                        "Bem-estar",
                        "Psicologia",
                    ],
                ),
            ],
        }
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn find(&self, id: ToolId) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Explicit lookup; a miss is an error here, unlike in aggregation.
    pub fn get(&self, id: ToolId) -> CoreResult<&ToolDefinition> {
        self.find(id)
            .ok_or_else(|| CoreError::ToolNotFound(id.to_string()))
    }

    /// Catalog entries whose id is in `selected`, in catalog order.
    /// Ids missing from the catalog are skipped.
    pub fn selected<'a>(
        &'a self,
        selected: &'a BTreeSet<ToolId>,
    ) -> impl Iterator<Item = &'a ToolDefinition> + 'a {
        self.tools.iter().filter(move |t| selected.contains(&t.id))
    }

    /// Tools recommended for a course niche (case-insensitive).
    pub fn recommended_for_niche(&self, niche: &str) -> Vec<&ToolDefinition> {
        self.tools.iter().filter(|t| t.suits_niche(niche)).collect()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        ToolCatalog::standard()
    }
}

fn tool(
    id: ToolId,
    name: &str,
    description: &str,
    setup_cents: i64,
    monthly_cents: i64,
    markup_bps: u32,
    niches: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        id,
        name: name.to_string(),
        description: description.to_string(),
        base_setup_fee: Money::from_cents(setup_cents),
        monthly_per_student: Money::from_cents(monthly_cents),
        diluted_markup: Rate::from_bps(markup_bps),
        recommended_niches: niches.iter().map(|n| n.to_string()).collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
