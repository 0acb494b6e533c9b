use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

// ---------------------------------------------------------------------------
// Unit — Canonical purchase/measurement unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Liter,
    Piece,
    Bottle,
    Pack,
    Can,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Liter => "liter",
            Unit::Piece => "piece",
            Unit::Bottle => "bottle",
            Unit::Pack => "pack",
            Unit::Can => "can",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(Unit::Kg),
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(Unit::Liter),
            "piece" | "pieces" | "pc" | "pcs" => Ok(Unit::Piece),
            "bottle" | "bottles" => Ok(Unit::Bottle),
            "pack" | "packs" => Ok(Unit::Pack),
            "can" | "cans" => Ok(Unit::Can),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown unit '{}'",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Category — Ingredient grouping used for catalog listing and seasonality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Protein,
    Vegetable,
    Staple,
    Condiment,
    Oil,
    Dairy,
    Spice,
    Coconut,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Vegetable => "vegetable",
            Category::Staple => "staple",
            Category::Condiment => "condiment",
            Category::Oil => "oil",
            Category::Dairy => "dairy",
            Category::Spice => "spice",
            Category::Coconut => "coconut",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IngredientPriceEntry — Catalog reference price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPriceEntry {
    pub unit_price: f64,
    pub unit: Unit,
    pub category: Category,
}

impl IngredientPriceEntry {
    pub const fn new(unit_price: f64, unit: Unit, category: Category) -> Self {
        Self {
            unit_price,
            unit,
            category,
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogItem — Named entry as listed or exported
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    #[serde(flatten)]
    pub entry: IngredientPriceEntry,
}

// ---------------------------------------------------------------------------
// MatchTier / Resolution — Which fallback tier resolved a name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Fuzzy,
    Category,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub entry: IngredientPriceEntry,
    pub tier: MatchTier,
    /// Catalog key or heuristic keyword that matched, if any.
    pub matched: Option<String>,
}
