//! Cost calculator tests, including the Sisig reference scenario.

mod common;

use approx::assert_relative_eq;
use recipe_pricing::error::PricingError;
use recipe_pricing::models::{
    CompetitivenessRating, CostEfficiencyRating, Difficulty, MarginTier, PricingOptions,
    ProfitabilityRating, Recipe,
};
use recipe_pricing::{FixedClock, PricingConfig, PricingSdk};

const EPS: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Sisig reference scenario
// ---------------------------------------------------------------------------

#[test]
fn sisig_ingredient_cost() {
    let sdk = common::seeded_sdk(1);
    let cost = sdk.costs().ingredient_cost(&common::sisig());

    assert_relative_eq!(cost.total, 175.135, epsilon = EPS);
    let names: Vec<&str> = cost.items.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        ["Pork Ears", "Pork Snout", "Onion", "Chili Peppers", "Calamansi", "Soy Sauce", "Egg"]
    );

    // kg price against a piece count is de-rated
    let onion = &cost.items[2];
    assert_relative_eq!(onion.cost, 16.0, epsilon = EPS);
    let egg = &cost.items[6];
    assert_relative_eq!(egg.cost, 8.0, epsilon = EPS);
}

#[test]
fn sisig_labor_cost() {
    let sdk = common::seeded_sdk(1);
    let labor = sdk.costs().labor_cost(&common::sisig(), Difficulty::Medium);

    assert_relative_eq!(labor.minutes, 57.2, epsilon = EPS);
    assert_relative_eq!(labor.cost, 143.0, epsilon = EPS);
}

#[test]
fn sisig_total_cost() {
    let sdk = common::seeded_sdk(1);
    let b = sdk
        .costs()
        .total_cost(&common::sisig(), &PricingOptions::default())
        .unwrap();

    assert_relative_eq!(b.ingredient_cost, 175.135, epsilon = EPS);
    assert_relative_eq!(b.labor_cost, 143.0, epsilon = EPS);
    assert_relative_eq!(b.overhead_cost, 49.0378, epsilon = EPS);
    assert_relative_eq!(b.base_cost, 367.1728, epsilon = EPS);
    assert_relative_eq!(b.selling_price, 495.68328, epsilon = EPS);
    assert_relative_eq!(b.cost_per_serving, 123.92082, epsilon = EPS);
    assert_eq!(b.servings, 4);
    assert_eq!(b.regional_multiplier, 1.0);
    assert_eq!(b.profit_margin, 0.35);
    assert_eq!(b.per_ingredient.len(), 7);
    assert_relative_eq!(b.overhead.waste, 17.5135, epsilon = EPS);
    assert_relative_eq!(b.overhead.rent, 14.0108, epsilon = EPS);
}

#[test]
fn total_cost_is_deterministic() {
    let sdk = common::seeded_sdk(1);
    let options = PricingOptions::default();

    let first = sdk.costs().total_cost(&common::sisig(), &options).unwrap();
    let second = sdk.costs().total_cost(&common::sisig(), &options).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn empty_recipe_has_no_ingredient_cost() {
    let sdk = common::seeded_sdk(1);
    let cost = sdk.costs().ingredient_cost(&Recipe::new("Nothing"));

    assert_eq!(cost.total, 0.0);
    assert!(cost.items.is_empty());
}

#[test]
fn cost_per_serving_decreases_with_servings() {
    let sdk = common::seeded_sdk(1);
    let recipe = common::sisig();
    let base = PricingOptions::default();

    let per_serving: Vec<f64> = (1..=12)
        .map(|s| {
            sdk.costs()
                .total_cost(&recipe, &base.with_servings(s))
                .unwrap()
                .cost_per_serving
        })
        .collect();
    assert!(per_serving.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn selling_price_increases_with_margin_tier() {
    let sdk = common::seeded_sdk(1);
    let recipe = common::sisig();
    let base = PricingOptions::default();

    let prices: Vec<f64> = MarginTier::ALL
        .iter()
        .map(|t| {
            sdk.costs()
                .total_cost(&recipe, &base.with_margin_tier(*t))
                .unwrap()
                .selling_price
        })
        .collect();
    assert!(prices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn zero_servings_is_rejected() {
    let sdk = common::seeded_sdk(1);
    let err = sdk
        .costs()
        .total_cost(&common::sisig(), &PricingOptions::default().with_servings(0))
        .unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn slot_with_blank_measure_is_skipped() {
    let sdk = common::seeded_sdk(1);
    let recipe = Recipe::new("Plain").ingredient("Salt", "").ingredient("Rice", "1 kg");
    let cost = sdk.costs().ingredient_cost(&recipe);

    assert_eq!(cost.items.len(), 1);
    assert_relative_eq!(cost.total, 50.0, epsilon = EPS);
}

// ---------------------------------------------------------------------------
// Labor keywords and labels
// ---------------------------------------------------------------------------

#[test]
fn cooking_keywords_add_minutes_case_insensitively() {
    let sdk = common::seeded_sdk(1);
    let recipe = Recipe::new("Inihaw")
        .instructions("Marinate the chicken overnight, then GRILL it and Simmer the sauce.")
        .ingredient("Chicken Thighs", "1 kg");
    let labor = sdk.costs().labor_cost(&recipe, Difficulty::Easy);

    // 30 base + 2 per ingredient + 15 grill + 20 simmer + 10 marinate
    assert_relative_eq!(labor.minutes, 77.0, epsilon = EPS);
    assert_relative_eq!(labor.cost, 192.5, epsilon = EPS);
}

#[test]
fn boil_and_fry_each_count_once() {
    let sdk = common::seeded_sdk(1);
    let recipe =
        Recipe::new("Pancit").instructions("Boil the noodles, fry the garlic, boil again.");
    let labor = sdk.costs().labor_cost(&recipe, Difficulty::Easy);

    assert_relative_eq!(labor.minutes, 65.0, epsilon = EPS);
}

#[test]
fn unknown_labels_fall_back() {
    let options = PricingOptions::from_labels("legendary", "Atlantis", "platinum", 2);
    assert_eq!(options.difficulty, Difficulty::Easy);
    assert_eq!(options.margin_tier, MarginTier::Standard);

    let sdk = common::seeded_sdk(1);
    let b = sdk.costs().total_cost(&common::sisig(), &options).unwrap();
    assert_eq!(b.regional_multiplier, 1.0);
    assert_eq!(b.profit_margin, 0.35);
}

#[test]
fn known_region_applies_multiplier() {
    let sdk = common::seeded_sdk(1);
    let options = PricingOptions::from_labels("medium", "Cebu", "standard", 4);
    let b = sdk.costs().total_cost(&common::sisig(), &options).unwrap();

    assert_eq!(b.regional_multiplier, 0.95);
    assert_relative_eq!(b.base_cost, 367.1728 * 0.95, epsilon = EPS);
}

// ---------------------------------------------------------------------------
// Market adjustment and configuration
// ---------------------------------------------------------------------------

#[test]
fn market_adjusted_applies_summer_factors() {
    let sdk = common::seeded_sdk(1);
    let options = PricingOptions {
        market_adjusted: true,
        ..PricingOptions::default()
    };
    let b = sdk.costs().total_cost(&common::sisig(), &options).unwrap();

    // pork x1.05, vegetables x1.2, calamansi/soy sauce/egg unadjusted
    assert_relative_eq!(b.ingredient_cost, 191.635, epsilon = EPS);
    assert_eq!(b.regional_multiplier, 1.0);
}

#[test]
fn market_adjusted_uses_drifted_region_after_refresh() {
    let sdk = common::seeded_sdk(9);
    let snapshot = sdk.market().refresh().unwrap();
    let options = PricingOptions {
        region: "baguio".to_string(),
        market_adjusted: true,
        ..PricingOptions::default()
    };
    let b = sdk.costs().total_cost(&common::sisig(), &options).unwrap();

    assert_eq!(b.regional_multiplier, snapshot.regions["baguio"].multiplier);
}

#[test]
fn configured_mismatch_factor_and_labor_rate_are_used() {
    let config = PricingConfig {
        unit_mismatch_factor: 0.5,
        ..PricingConfig::default()
    };
    let sdk = PricingSdk::builder()
        .config(config)
        .labor_rate(300.0)
        .clock(FixedClock(common::fixed_now()))
        .seed(1)
        .build()
        .unwrap();

    let recipe = Recipe::new("Onions").ingredient("Onion", "2 pieces");
    assert_relative_eq!(sdk.costs().ingredient_cost(&recipe).total, 80.0, epsilon = EPS);

    let labor = sdk.costs().labor_cost(&recipe, Difficulty::Easy);
    assert_relative_eq!(labor.cost, 160.0, epsilon = EPS);
}

// ---------------------------------------------------------------------------
// recommendations
// ---------------------------------------------------------------------------

#[test]
fn sisig_recommendations() {
    let sdk = common::seeded_sdk(1);
    let rec = sdk
        .costs()
        .recommendations(&common::sisig(), &PricingOptions::default())
        .unwrap();

    assert_eq!(rec.per_margin_tier.len(), 4);
    assert_eq!(rec.per_margin_tier[&MarginTier::Standard], rec.base);
    assert!(
        rec.per_margin_tier[&MarginTier::Budget].selling_price
            < rec.per_margin_tier[&MarginTier::Luxury].selling_price
    );

    // labor is 39% of base cost, ingredients 48%
    assert_eq!(rec.analysis.cost_efficiency.rating, CostEfficiencyRating::Medium);
    assert_eq!(
        rec.analysis.cost_efficiency.message,
        "High labor cost - consider process optimization"
    );
    assert_eq!(rec.analysis.competitiveness.rating, CompetitivenessRating::Premium);
    assert_eq!(rec.analysis.profitability.rating, ProfitabilityRating::Good);
}

#[test]
fn luxury_tier_rates_excellent_profitability() {
    let sdk = common::seeded_sdk(1);
    let options = PricingOptions::default().with_margin_tier(MarginTier::Luxury);
    let rec = sdk.costs().recommendations(&common::sisig(), &options).unwrap();
    assert_eq!(rec.analysis.profitability.rating, ProfitabilityRating::Excellent);
}

// ---------------------------------------------------------------------------
// analytics
// ---------------------------------------------------------------------------

#[test]
fn analytics_over_three_recipes() {
    let sdk = common::seeded_sdk(1);
    let tinola = Recipe::new("Tinola")
        .category("Chicken")
        .ingredient("Chicken Thighs", "1 kg");
    let rice = Recipe::new("Plain Rice").ingredient("Rice", "1 kg");
    let recipes = [common::sisig(), tinola, rice];

    let a = sdk
        .costs()
        .analytics(&recipes, &PricingOptions::default())
        .unwrap();

    assert_eq!(a.total_recipes, 3);
    assert_relative_eq!(a.min_cost, 56.7, epsilon = EPS);
    assert_relative_eq!(a.median_cost, 121.5, epsilon = EPS);
    assert_relative_eq!(a.max_cost, 123.92082, epsilon = EPS);
    assert_relative_eq!(a.cost_range, 123.92082 - 56.7, epsilon = EPS);
    assert_relative_eq!(a.average_cost, (56.7 + 121.5 + 123.92082) / 3.0, epsilon = EPS);

    let d = a.cost_distribution;
    assert_relative_eq!(d.ingredient + d.labor + d.overhead, 1.0, epsilon = EPS);

    assert_eq!(a.category_average.len(), 3);
    assert_relative_eq!(a.category_average["Chicken"], 121.5, epsilon = EPS);
    assert_relative_eq!(a.category_average["uncategorized"], 56.7, epsilon = EPS);
}

#[test]
fn analytics_of_empty_list_is_rejected() {
    let sdk = common::seeded_sdk(1);
    let err = sdk
        .costs()
        .analytics(&[], &PricingOptions::default())
        .unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}
