//! Recipe cost estimation.
//!
//! Costs are recomputed on every call from the current catalog and, for
//! market-adjusted options, the current market snapshot. Nothing is cached.

use std::collections::BTreeMap;

use crate::catalog::IngredientCatalog;
use crate::config::{
    BASE_PREP_MINUTES, GRILL_FRY_MINUTES, MARINATE_MINUTES, MINUTES_PER_INGREDIENT,
    SIMMER_BOIL_MINUTES,
};
use crate::context::PricingContext;
use crate::error::{PricingError, Result};
use crate::market::seasonal;
use crate::models::{
    Assessment, CompetitivenessRating, CostBreakdown, CostDistribution, CostEfficiencyRating,
    Difficulty, IngredientCost, IngredientCostLine, LaborCost, MarginTier, OverheadBreakdown,
    OverheadCost, PricingAnalysis, PricingAnalytics, PricingOptions, PricingRecommendations,
    ProfitabilityRating, Recipe, SeasonalFactorEntry,
};
use crate::quantity::parse_quantity;

const UNCATEGORIZED: &str = "uncategorized";

// ---------------------------------------------------------------------------
// CostCalculator
// ---------------------------------------------------------------------------

/// Cost estimation for recipes against the shared catalog and region tables.
pub struct CostCalculator<'a> {
    ctx: &'a PricingContext,
}

impl<'a> CostCalculator<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }

    // -- Components --------------------------------------------------------

    /// Sum the cost of every usable ingredient slot, in slot order.
    ///
    /// Empty slots and slots with a blank measure are skipped.
    pub fn ingredient_cost(&self, recipe: &Recipe) -> IngredientCost {
        let catalog = self.ctx.catalog();
        self.ingredient_cost_with(recipe, &catalog, None)
    }

    /// Estimated preparation time and its cost at the configured hourly
    /// rate.
    ///
    /// Cooking keywords in the instructions are matched case-insensitively
    /// and add up independently.
    pub fn labor_cost(&self, recipe: &Recipe, difficulty: Difficulty) -> LaborCost {
        let instructions = recipe.instructions.to_lowercase();
        let mut minutes =
            BASE_PREP_MINUTES + MINUTES_PER_INGREDIENT * recipe.ingredient_count() as f64;

        if instructions.contains("grill") || instructions.contains("fry") {
            minutes += GRILL_FRY_MINUTES;
        }
        if instructions.contains("simmer") || instructions.contains("boil") {
            minutes += SIMMER_BOIL_MINUTES;
        }
        if instructions.contains("marinat") {
            minutes += MARINATE_MINUTES;
        }

        let minutes = minutes * self.ctx.config.difficulty.factor(difficulty);
        LaborCost {
            minutes,
            cost: minutes / 60.0 * self.ctx.config.labor_rate_per_hour,
        }
    }

    /// Fixed fractions of the ingredient cost.
    pub fn overhead_cost(&self, ingredient_cost: f64) -> OverheadCost {
        let f = &self.ctx.config.overhead;
        let breakdown = OverheadBreakdown {
            utilities: ingredient_cost * f.utilities,
            equipment: ingredient_cost * f.equipment,
            rent: ingredient_cost * f.rent,
            packaging: ingredient_cost * f.packaging,
            waste: ingredient_cost * f.waste,
        };
        OverheadCost {
            total: breakdown.utilities
                + breakdown.equipment
                + breakdown.rent
                + breakdown.packaging
                + breakdown.waste,
            breakdown,
        }
    }

    // -- Totals ------------------------------------------------------------

    /// Full pricing breakdown for one recipe.
    ///
    /// Returns `InvalidInput` when `options.servings` is zero.
    pub fn total_cost(&self, recipe: &Recipe, options: &PricingOptions) -> Result<CostBreakdown> {
        if options.servings == 0 {
            tracing::warn!(recipe = %recipe.name, "rejected cost request with zero servings");
            return Err(PricingError::InvalidInput(
                "servings must be at least 1".to_string(),
            ));
        }

        let catalog = self.ctx.catalog();
        let (ingredients, regional_multiplier) = if options.market_adjusted {
            let snapshot = self.ctx.snapshot();
            let multiplier = snapshot
                .regions
                .get(&options.region.trim().to_lowercase())
                .map(|profile| profile.multiplier)
                .unwrap_or_else(|| self.ctx.config.regional_multiplier(&options.region));
            let ingredients =
                self.ingredient_cost_with(recipe, &catalog, Some(&snapshot.seasonal_factors));
            (ingredients, multiplier)
        } else {
            let ingredients = self.ingredient_cost_with(recipe, &catalog, None);
            (ingredients, self.ctx.config.regional_multiplier(&options.region))
        };

        let labor = self.labor_cost(recipe, options.difficulty);
        let overhead = self.overhead_cost(ingredients.total);

        let base_cost = (ingredients.total + labor.cost + overhead.total) * regional_multiplier;
        let profit_margin = self.ctx.config.margins.fraction(options.margin_tier);
        let selling_price = base_cost * (1.0 + profit_margin);
        let cost_per_serving = selling_price / f64::from(options.servings);

        Ok(CostBreakdown {
            ingredient_cost: ingredients.total,
            labor_cost: labor.cost,
            overhead_cost: overhead.total,
            base_cost,
            selling_price,
            cost_per_serving,
            servings: options.servings,
            regional_multiplier,
            profit_margin,
            difficulty: options.difficulty,
            region: options.region.clone(),
            margin_tier: options.margin_tier,
            per_ingredient: ingredients.items,
            labor,
            overhead: overhead.breakdown,
        })
    }

    /// The base breakdown, one breakdown per margin tier, and a rating of
    /// the base result on three axes.
    pub fn recommendations(
        &self,
        recipe: &Recipe,
        options: &PricingOptions,
    ) -> Result<PricingRecommendations> {
        let base = self.total_cost(recipe, options)?;

        let mut per_margin_tier = BTreeMap::new();
        for tier in MarginTier::ALL {
            let breakdown = self.total_cost(recipe, &options.with_margin_tier(tier))?;
            per_margin_tier.insert(tier, breakdown);
        }

        let analysis = PricingAnalysis {
            cost_efficiency: analyze_cost_efficiency(&base),
            competitiveness: analyze_competitiveness(&base),
            profitability: analyze_profitability(&base),
        };

        Ok(PricingRecommendations {
            base,
            per_margin_tier,
            analysis,
        })
    }

    /// Aggregate cost-per-serving statistics over a set of recipes.
    ///
    /// Returns `InvalidInput` for an empty list.
    pub fn analytics(
        &self,
        recipes: &[Recipe],
        options: &PricingOptions,
    ) -> Result<PricingAnalytics> {
        if recipes.is_empty() {
            return Err(PricingError::InvalidInput(
                "analytics requires at least one recipe".to_string(),
            ));
        }

        let breakdowns = recipes
            .iter()
            .map(|r| self.total_cost(r, options))
            .collect::<Result<Vec<_>>>()?;

        let mut costs: Vec<f64> = breakdowns.iter().map(|b| b.cost_per_serving).collect();
        costs.sort_by(f64::total_cmp);
        let n = costs.len() as f64;

        let average_cost = costs.iter().sum::<f64>() / n;
        let mid = costs.len() / 2;
        let median_cost = if costs.len() % 2 == 0 {
            (costs[mid - 1] + costs[mid]) / 2.0
        } else {
            costs[mid]
        };
        let min_cost = costs[0];
        let max_cost = costs[costs.len() - 1];

        let mut shares = CostDistribution::default();
        for b in &breakdowns {
            let subtotal = b.ingredient_cost + b.labor_cost + b.overhead_cost;
            if subtotal > 0.0 {
                shares.ingredient += b.ingredient_cost / subtotal;
                shares.labor += b.labor_cost / subtotal;
                shares.overhead += b.overhead_cost / subtotal;
            }
        }
        let cost_distribution = CostDistribution {
            ingredient: shares.ingredient / n,
            labor: shares.labor / n,
            overhead: shares.overhead / n,
        };

        let mut by_category: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for (recipe, b) in recipes.iter().zip(&breakdowns) {
            let category = match recipe.category.trim() {
                "" => UNCATEGORIZED.to_string(),
                c => c.to_string(),
            };
            let slot = by_category.entry(category).or_insert((0.0, 0));
            slot.0 += b.cost_per_serving;
            slot.1 += 1;
        }
        let category_average = by_category
            .into_iter()
            .map(|(category, (sum, count))| (category, sum / count as f64))
            .collect();

        Ok(PricingAnalytics {
            total_recipes: recipes.len(),
            average_cost,
            median_cost,
            min_cost,
            max_cost,
            cost_range: max_cost - min_cost,
            cost_distribution,
            category_average,
        })
    }

    // -- Internals ---------------------------------------------------------

    fn ingredient_cost_with(
        &self,
        recipe: &Recipe,
        catalog: &IngredientCatalog,
        seasonal_factors: Option<&BTreeMap<String, SeasonalFactorEntry>>,
    ) -> IngredientCost {
        let mut cost = IngredientCost::default();

        for slot in recipe.ingredients() {
            let Some(quantity) = parse_quantity(&slot.measure) else {
                tracing::debug!(ingredient = %slot.name, "skipping ingredient without a measure");
                continue;
            };

            let entry = catalog.resolve(&slot.name);
            let unit_price = match seasonal_factors {
                Some(table) => {
                    entry.unit_price * seasonal::current_factor(table, &slot.name, entry.category)
                }
                None => entry.unit_price,
            };

            let line_cost = if entry.unit == quantity.unit {
                unit_price * quantity.amount
            } else {
                unit_price * quantity.amount * self.ctx.config.unit_mismatch_factor
            };

            cost.total += line_cost;
            cost.items.push(IngredientCostLine {
                name: slot.name.clone(),
                measure: slot.measure.clone(),
                quantity,
                unit_price,
                unit: entry.unit,
                cost: line_cost,
                category: entry.category,
            });
        }

        cost
    }
}

// ---------------------------------------------------------------------------
// Rating tables
// ---------------------------------------------------------------------------

fn analyze_cost_efficiency(b: &CostBreakdown) -> Assessment<CostEfficiencyRating> {
    let (ingredient_ratio, labor_ratio) = if b.base_cost > 0.0 {
        (b.ingredient_cost / b.base_cost, b.labor_cost / b.base_cost)
    } else {
        (0.0, 0.0)
    };

    let (rating, message) = if ingredient_ratio > 0.6 {
        (
            CostEfficiencyRating::High,
            "High ingredient cost - consider bulk purchasing",
        )
    } else if labor_ratio > 0.3 {
        (
            CostEfficiencyRating::Medium,
            "High labor cost - consider process optimization",
        )
    } else {
        (CostEfficiencyRating::Good, "Good cost efficiency")
    };
    Assessment {
        rating,
        message: message.to_string(),
    }
}

fn analyze_competitiveness(b: &CostBreakdown) -> Assessment<CompetitivenessRating> {
    let (rating, message) = match b.cost_per_serving {
        p if p < 50.0 => (CompetitivenessRating::Budget, "Budget-friendly pricing"),
        p if p < 100.0 => (CompetitivenessRating::Standard, "Standard market pricing"),
        p if p < 200.0 => (CompetitivenessRating::Premium, "Premium pricing"),
        _ => (CompetitivenessRating::Luxury, "Luxury pricing"),
    };
    Assessment {
        rating,
        message: message.to_string(),
    }
}

fn analyze_profitability(b: &CostBreakdown) -> Assessment<ProfitabilityRating> {
    let (rating, message) = match b.profit_margin {
        m if m < 0.2 => (
            ProfitabilityRating::Low,
            "Low profit margin - consider price adjustment",
        ),
        m if m < 0.35 => (ProfitabilityRating::Moderate, "Moderate profit margin"),
        m if m < 0.5 => (ProfitabilityRating::Good, "Good profit margin"),
        _ => (ProfitabilityRating::Excellent, "Excellent profit margin"),
    };
    Assessment {
        rating,
        message: message.to_string(),
    }
}
