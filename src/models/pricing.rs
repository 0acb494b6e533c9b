use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ingredient::{Category, Unit};
use crate::error::PricingError;

// ---------------------------------------------------------------------------
// Quantity — Parsed measurement in a canonical unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Unit,
}

impl Quantity {
    pub const fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Resolve a free-text label. Unrecognized labels price labor at the
    /// neutral factor, which is the `easy` tier.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::debug!(label, "unknown difficulty; using neutral labor factor");
            Difficulty::Easy
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown difficulty '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// MarginTier
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MarginTier {
    Budget,
    #[default]
    Standard,
    Premium,
    Luxury,
}

impl MarginTier {
    pub const ALL: [MarginTier; 4] = [
        MarginTier::Budget,
        MarginTier::Standard,
        MarginTier::Premium,
        MarginTier::Luxury,
    ];

    /// Resolve a free-text label, falling back to `standard`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::debug!(label, "unknown margin tier; using standard");
            MarginTier::Standard
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarginTier::Budget => "budget",
            MarginTier::Standard => "standard",
            MarginTier::Premium => "premium",
            MarginTier::Luxury => "luxury",
        }
    }
}

impl fmt::Display for MarginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarginTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(MarginTier::Budget),
            "standard" => Ok(MarginTier::Standard),
            "premium" => Ok(MarginTier::Premium),
            "luxury" => Ok(MarginTier::Luxury),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown margin tier '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PricingOptions
// ---------------------------------------------------------------------------

/// Options for a single cost calculation.
///
/// `market_adjusted` switches the regional multiplier to the current market
/// snapshot and applies seasonal factors to ingredient prices. When `false`
/// only the reference tables are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingOptions {
    pub difficulty: Difficulty,
    pub region: String,
    pub margin_tier: MarginTier,
    pub servings: u32,
    pub market_adjusted: bool,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            region: "manila".to_string(),
            margin_tier: MarginTier::Standard,
            servings: 4,
            market_adjusted: false,
        }
    }
}

impl PricingOptions {
    /// Build options from the free-text labels supplied at the boundary.
    pub fn from_labels(difficulty: &str, region: &str, margin_tier: &str, servings: u32) -> Self {
        Self {
            difficulty: Difficulty::from_label(difficulty),
            region: region.trim().to_lowercase(),
            margin_tier: MarginTier::from_label(margin_tier),
            servings,
            market_adjusted: false,
        }
    }

    pub fn with_margin_tier(&self, margin_tier: MarginTier) -> Self {
        Self {
            margin_tier,
            ..self.clone()
        }
    }

    pub fn with_servings(&self, servings: u32) -> Self {
        Self {
            servings,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Cost components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCostLine {
    pub name: String,
    pub measure: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub unit: Unit,
    pub cost: f64,
    pub category: Category,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCost {
    pub total: f64,
    pub items: Vec<IngredientCostLine>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCost {
    pub minutes: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverheadBreakdown {
    pub utilities: f64,
    pub equipment: f64,
    pub rent: f64,
    pub packaging: f64,
    pub waste: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverheadCost {
    pub total: f64,
    pub breakdown: OverheadBreakdown,
}

// ---------------------------------------------------------------------------
// CostBreakdown — Full pricing result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub ingredient_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub base_cost: f64,
    pub selling_price: f64,
    pub cost_per_serving: f64,
    pub servings: u32,
    pub regional_multiplier: f64,
    pub profit_margin: f64,
    pub difficulty: Difficulty,
    pub region: String,
    pub margin_tier: MarginTier,
    pub per_ingredient: Vec<IngredientCostLine>,
    pub labor: LaborCost,
    pub overhead: OverheadBreakdown,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostEfficiencyRating {
    High,
    Medium,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitivenessRating {
    Budget,
    Standard,
    Premium,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitabilityRating {
    Low,
    Moderate,
    Good,
    Excellent,
}

/// A rating together with its advisory text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment<R> {
    pub rating: R,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnalysis {
    pub cost_efficiency: Assessment<CostEfficiencyRating>,
    pub competitiveness: Assessment<CompetitivenessRating>,
    pub profitability: Assessment<ProfitabilityRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecommendations {
    pub base: CostBreakdown,
    pub per_margin_tier: BTreeMap<MarginTier, CostBreakdown>,
    pub analysis: PricingAnalysis,
}

// ---------------------------------------------------------------------------
// PricingAnalytics — Aggregate over a set of recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDistribution {
    pub ingredient: f64,
    pub labor: f64,
    pub overhead: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnalytics {
    pub total_recipes: usize,
    pub average_cost: f64,
    pub median_cost: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    pub cost_range: f64,
    pub cost_distribution: CostDistribution,
    pub category_average: BTreeMap<String, f64>,
}
