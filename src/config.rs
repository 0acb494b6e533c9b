use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::models::{Category, Difficulty, IngredientPriceEntry, MarginTier, Season, Unit};

pub const MAX_INGREDIENT_SLOTS: usize = 10;

pub const LABOR_RATE_PER_HOUR: f64 = 150.0;
pub const BASE_PREP_MINUTES: f64 = 30.0;
pub const MINUTES_PER_INGREDIENT: f64 = 2.0;
pub const GRILL_FRY_MINUTES: f64 = 15.0;
pub const SIMMER_BOIL_MINUTES: f64 = 20.0;
pub const MARINATE_MINUTES: f64 = 10.0;

/// Applied to `unit_price * amount` when the catalog unit and the parsed
/// measurement unit disagree. Unvalidated heuristic; pending product review.
pub const UNIT_MISMATCH_FACTOR: f64 = 0.1;

pub const DEFAULT_REGIONAL_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.35;

pub const TREND_WINDOW_DAYS: usize = 30;
pub const MAX_TREND_WINDOW_DAYS: usize = 3650;
pub const FORECAST_MIN_POINTS: usize = 7;
pub const TREND_THRESHOLD: f64 = 0.05;
pub const DAILY_VARIATION: f64 = 0.05;
pub const REGION_DRIFT: f64 = 0.05;
pub const MIN_DAILY_VOLUME: u32 = 500;
pub const DAILY_VOLUME_SPAN: u32 = 1000;
pub const MIN_FORECAST_CONFIDENCE: f64 = 0.6;

pub const HIGH_VOLATILITY: f64 = 0.15;
pub const ALERT_MIN_CONFIDENCE: f64 = 0.7;
pub const ALERT_CHANGE_THRESHOLD: f64 = 0.10;

pub const DEFAULT_ENTRY: IngredientPriceEntry =
    IngredientPriceEntry::new(100.0, Unit::Kg, Category::Other);

/// Seed catalog in priority order. Ties in the fuzzy tier go to the
/// earlier entry.
pub fn ingredient_prices() -> Vec<(&'static str, IngredientPriceEntry)> {
    use Category::*;
    use Unit::*;
    let e = IngredientPriceEntry::new;
    vec![
        // Proteins
        ("pork belly", e(280.0, Kg, Protein)),
        ("pork ears", e(180.0, Kg, Protein)),
        ("pork snout", e(160.0, Kg, Protein)),
        ("chicken thighs", e(200.0, Kg, Protein)),
        ("chicken breast", e(220.0, Kg, Protein)),
        ("beef", e(450.0, Kg, Protein)),
        ("fish", e(300.0, Kg, Protein)),
        ("shrimp", e(600.0, Kg, Protein)),
        ("egg", e(8.0, Piece, Protein)),
        // Vegetables
        ("onion", e(80.0, Kg, Vegetable)),
        ("garlic", e(200.0, Kg, Vegetable)),
        ("tomato", e(60.0, Kg, Vegetable)),
        ("potato", e(50.0, Kg, Vegetable)),
        ("carrot", e(40.0, Kg, Vegetable)),
        ("bell pepper", e(120.0, Kg, Vegetable)),
        ("chili peppers", e(150.0, Kg, Vegetable)),
        ("cabbage", e(30.0, Kg, Vegetable)),
        ("eggplant", e(40.0, Kg, Vegetable)),
        ("okra", e(50.0, Kg, Vegetable)),
        ("string beans", e(60.0, Kg, Vegetable)),
        // Staples
        ("rice", e(50.0, Kg, Staple)),
        ("noodles", e(25.0, Pack, Staple)),
        ("bread", e(15.0, Piece, Staple)),
        // Condiments & seasonings
        ("soy sauce", e(45.0, Bottle, Condiment)),
        ("vinegar", e(25.0, Bottle, Condiment)),
        ("fish sauce", e(35.0, Bottle, Condiment)),
        ("oyster sauce", e(55.0, Bottle, Condiment)),
        ("salt", e(15.0, Pack, Condiment)),
        ("pepper", e(80.0, Pack, Condiment)),
        ("bay leaf", e(20.0, Pack, Condiment)),
        ("calamansi", e(40.0, Kg, Condiment)),
        ("lemon", e(60.0, Kg, Condiment)),
        // Oils & fats
        ("cooking oil", e(120.0, Liter, Oil)),
        ("coconut oil", e(100.0, Liter, Oil)),
        ("butter", e(200.0, Pack, Oil)),
        // Dairy
        ("milk", e(80.0, Liter, Dairy)),
        ("cheese", e(300.0, Kg, Dairy)),
        // Spices & herbs
        ("ginger", e(120.0, Kg, Spice)),
        ("turmeric", e(200.0, Kg, Spice)),
        ("cumin", e(300.0, Kg, Spice)),
        ("paprika", e(400.0, Kg, Spice)),
        ("cinnamon", e(500.0, Kg, Spice)),
        ("star anise", e(600.0, Kg, Spice)),
        // Coconut products
        ("coconut milk", e(60.0, Can, Coconut)),
        ("coconut cream", e(70.0, Can, Coconut)),
        ("desiccated coconut", e(80.0, Pack, Coconut)),
    ]
}

/// Keyword heuristics tried when neither the exact nor the fuzzy tier
/// resolves a name. First keyword found in the name wins.
pub const CATEGORY_HEURISTICS: &[(&[&str], IngredientPriceEntry)] = &[
    (
        &["pork", "pig"],
        IngredientPriceEntry::new(200.0, Unit::Kg, Category::Protein),
    ),
    (
        &["chicken"],
        IngredientPriceEntry::new(200.0, Unit::Kg, Category::Protein),
    ),
    (
        &["beef"],
        IngredientPriceEntry::new(450.0, Unit::Kg, Category::Protein),
    ),
    (
        &["fish", "salmon", "tuna"],
        IngredientPriceEntry::new(300.0, Unit::Kg, Category::Protein),
    ),
    (
        &["vegetable", "veggie"],
        IngredientPriceEntry::new(50.0, Unit::Kg, Category::Vegetable),
    ),
];

pub fn regional_multipliers() -> Vec<(&'static str, f64)> {
    vec![
        ("manila", 1.0),
        ("cebu", 0.95),
        ("davao", 0.90),
        ("iloilo", 0.92),
        ("baguio", 1.05),
        ("general", 0.95),
    ]
}

/// Ingredients with a simulated daily price series, and their base price.
pub fn tracked_ingredients() -> Vec<(&'static str, f64)> {
    vec![
        ("rice", 50.0),
        ("pork belly", 280.0),
        ("chicken thighs", 200.0),
        ("onion", 80.0),
        ("garlic", 200.0),
        ("tomato", 60.0),
    ]
}

/// Per-season price factors for one seasonal group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalProfile {
    pub peak: f64,
    pub low: f64,
    pub spring: f64,
    pub summer: f64,
    pub autumn: f64,
    pub winter: f64,
}

impl SeasonalProfile {
    pub fn factor(&self, season: Season) -> f64 {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
            Season::Winter => self.winter,
        }
    }
}

pub fn seasonal_profiles() -> Vec<(&'static str, SeasonalProfile)> {
    let p = |peak, low, spring, summer, autumn, winter| SeasonalProfile {
        peak,
        low,
        spring,
        summer,
        autumn,
        winter,
    };
    vec![
        ("rice", p(1.2, 0.8, 1.0, 1.1, 0.9, 1.0)),
        ("vegetables", p(1.3, 0.7, 0.8, 1.2, 1.0, 1.3)),
        ("fish", p(1.4, 0.6, 1.0, 1.3, 1.1, 0.8)),
        ("pork", p(1.1, 0.9, 1.0, 1.05, 1.0, 1.1)),
        ("chicken", p(1.15, 0.85, 1.0, 1.1, 1.0, 1.05)),
    ]
}

// ---------------------------------------------------------------------------
// PricingConfig — Tunable constants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadFactors {
    pub utilities: f64,
    pub equipment: f64,
    pub rent: f64,
    pub packaging: f64,
    pub waste: f64,
}

impl Default for OverheadFactors {
    fn default() -> Self {
        Self {
            utilities: 0.05,
            equipment: 0.03,
            rent: 0.08,
            packaging: 0.02,
            waste: 0.10,
        }
    }
}

impl OverheadFactors {
    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("utilities", self.utilities),
            ("equipment", self.equipment),
            ("rent", self.rent),
            ("packaging", self.packaging),
            ("waste", self.waste),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyFactors {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub expert: f64,
}

impl Default for DifficultyFactors {
    fn default() -> Self {
        Self {
            easy: 1.0,
            medium: 1.3,
            hard: 1.6,
            expert: 2.0,
        }
    }
}

impl DifficultyFactors {
    pub fn factor(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginFractions {
    pub budget: f64,
    pub standard: f64,
    pub premium: f64,
    pub luxury: f64,
}

impl Default for MarginFractions {
    fn default() -> Self {
        Self {
            budget: 0.20,
            standard: DEFAULT_MARGIN_FRACTION,
            premium: 0.50,
            luxury: 0.70,
        }
    }
}

impl MarginFractions {
    pub fn fraction(&self, tier: MarginTier) -> f64 {
        match tier {
            MarginTier::Budget => self.budget,
            MarginTier::Standard => self.standard,
            MarginTier::Premium => self.premium,
            MarginTier::Luxury => self.luxury,
        }
    }
}

/// Tunable constants for cost calculation and market simulation.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub labor_rate_per_hour: f64,
    pub overhead: OverheadFactors,
    pub difficulty: DifficultyFactors,
    pub margins: MarginFractions,
    /// Reference regional multipliers, in the order regions are simulated.
    pub regions: Vec<(String, f64)>,
    /// Ingredients with a simulated price series and their base price.
    pub tracked_ingredients: Vec<(String, f64)>,
    pub unit_mismatch_factor: f64,
    pub trend_window_days: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            labor_rate_per_hour: LABOR_RATE_PER_HOUR,
            overhead: OverheadFactors::default(),
            difficulty: DifficultyFactors::default(),
            margins: MarginFractions::default(),
            regions: regional_multipliers()
                .into_iter()
                .map(|(name, m)| (name.to_string(), m))
                .collect(),
            tracked_ingredients: tracked_ingredients()
                .into_iter()
                .map(|(name, price)| (name.to_string(), price))
                .collect(),
            unit_mismatch_factor: UNIT_MISMATCH_FACTOR,
            trend_window_days: TREND_WINDOW_DAYS,
        }
    }
}

impl PricingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: PricingConfig = serde_json::from_str(json)?;
        config.normalize_names();
        config.validate()?;
        Ok(config)
    }

    /// Trim and lowercase region and tracked ingredient names so they line up
    /// with the lowercased keys every lookup uses.
    pub fn normalize_names(&mut self) {
        for (name, _) in self
            .regions
            .iter_mut()
            .chain(self.tracked_ingredients.iter_mut())
        {
            *name = name.trim().to_lowercase();
        }
    }

    /// Reference multiplier for a region, `1.0` when the region is unknown.
    pub fn regional_multiplier(&self, region: &str) -> f64 {
        let key = region.trim().to_lowercase();
        self.regions
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, m)| *m)
            .unwrap_or(DEFAULT_REGIONAL_MULTIPLIER)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.labor_rate_per_hour.is_finite() && self.labor_rate_per_hour > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "labor_rate_per_hour must be positive, got {}",
                self.labor_rate_per_hour
            )));
        }
        if self.trend_window_days == 0 || self.trend_window_days > MAX_TREND_WINDOW_DAYS {
            return Err(PricingError::InvalidInput(format!(
                "trend_window_days must be between 1 and {}, got {}",
                MAX_TREND_WINDOW_DAYS, self.trend_window_days
            )));
        }

        let mut named: Vec<(String, f64)> = self
            .overhead
            .values()
            .iter()
            .map(|(n, v)| (format!("overhead.{}", n), *v))
            .collect();
        named.extend(
            Difficulty::ALL
                .iter()
                .map(|d| (format!("difficulty.{}", d), self.difficulty.factor(*d))),
        );
        named.extend(
            MarginTier::ALL
                .iter()
                .map(|t| (format!("margins.{}", t), self.margins.fraction(*t))),
        );
        named.extend(
            self.regions
                .iter()
                .map(|(r, m)| (format!("regions.{}", r), *m)),
        );
        named.extend(
            self.tracked_ingredients
                .iter()
                .map(|(name, price)| (format!("tracked_ingredients.{}", name), *price)),
        );
        named.push((
            "unit_mismatch_factor".to_string(),
            self.unit_mismatch_factor,
        ));

        if let Some((name, value)) = named
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
        {
            return Err(PricingError::InvalidInput(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
        Ok(())
    }
}
