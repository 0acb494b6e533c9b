use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MAX_INGREDIENT_SLOTS;
use crate::error::{PricingError, Result};

// ---------------------------------------------------------------------------
// IngredientSlot — One (name, measure) position of a recipe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSlot {
    pub name: String,
    pub measure: String,
}

impl IngredientSlot {
    pub fn new(name: &str, measure: &str) -> Self {
        Self {
            name: name.to_string(),
            measure: measure.to_string(),
        }
    }

    /// A slot whose name is blank or whitespace-only carries no ingredient.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Recipe — Input record for the cost calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub slots: [IngredientSlot; MAX_INGREDIENT_SLOTS],
}

impl Recipe {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Place an ingredient in the first empty slot.
    ///
    /// A recipe holds at most ten ingredients; anything past that is
    /// dropped, the same way the flat record format cannot carry it.
    pub fn ingredient(mut self, name: &str, measure: &str) -> Self {
        match self.slots.iter_mut().find(|s| s.is_empty()) {
            Some(slot) => *slot = IngredientSlot::new(name, measure),
            None => tracing::warn!(
                recipe = %self.name,
                ingredient = name,
                "all ingredient slots are filled; ingredient ignored"
            ),
        }
        self
    }

    /// Iterate over the non-empty slots in slot order.
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientSlot> {
        self.slots.iter().filter(|s| !s.is_empty())
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients().count()
    }

    /// Build a recipe from the flat meal record used at the HTTP boundary
    /// (`strMeal`, `strCategory`, `strInstructions`, `strIngredient1..10`,
    /// `strMeasure1..10`). Unknown fields are ignored and missing ones are
    /// treated as empty.
    pub fn from_meal_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            PricingError::InvalidInput("Recipe record must be a JSON object".to_string())
        })?;

        let text = |key: &str| -> String {
            obj.get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_default()
        };

        let mut recipe = Recipe {
            name: text("strMeal"),
            category: text("strCategory"),
            instructions: text("strInstructions"),
            ..Recipe::default()
        };

        for (i, slot) in recipe.slots.iter_mut().enumerate() {
            slot.name = text(&format!("strIngredient{}", i + 1));
            slot.measure = text(&format!("strMeasure{}", i + 1));
        }

        Ok(recipe)
    }

    /// Parse a flat meal record from a JSON string.
    pub fn from_meal_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_meal_json(&value)
    }
}
