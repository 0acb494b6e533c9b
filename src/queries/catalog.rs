//! Ingredient catalog queries and price updates.

use crate::context::PricingContext;
use crate::error::{PricingError, Result};
use crate::models::{Category, CatalogItem, IngredientPriceEntry, Resolution, Unit};

/// Read and update access to the shared ingredient catalog.
pub struct CatalogQuery<'a> {
    ctx: &'a PricingContext,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }

    /// All entries in priority order.
    pub fn list(&self) -> Vec<CatalogItem> {
        self.ctx.catalog().items()
    }

    pub fn count(&self) -> usize {
        self.ctx.catalog().len()
    }

    /// Exact, case-insensitive lookup. No fallback tiers.
    pub fn get(&self, name: &str) -> Option<IngredientPriceEntry> {
        self.ctx.catalog().get(name).copied()
    }

    /// Exact lookup that treats a missing name as an error.
    pub fn require(&self, name: &str) -> Result<IngredientPriceEntry> {
        self.get(name).ok_or_else(|| {
            PricingError::NotFound(format!("Ingredient '{}' is not in the catalog", name))
        })
    }

    /// Resolve a free-text name through every fallback tier.
    pub fn resolve(&self, name: &str) -> IngredientPriceEntry {
        self.ctx.catalog().resolve(name)
    }

    pub fn resolve_detailed(&self, name: &str) -> Resolution {
        self.ctx.catalog().resolve_detailed(name)
    }

    pub fn by_category(&self, category: Category) -> Vec<CatalogItem> {
        self.ctx.catalog().by_category(category)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.ctx.catalog().categories()
    }

    /// Replace the price and unit of an ingredient, adding it when new.
    ///
    /// Readers see either the old catalog or the updated one, never a mix.
    pub fn update_price(&self, name: &str, price: f64, unit: Unit) -> Result<IngredientPriceEntry> {
        let result = self.ctx.update_catalog(|catalog| catalog.update(name, price, unit));
        match &result {
            Ok(entry) => tracing::info!(
                ingredient = name,
                price = entry.unit_price,
                unit = %entry.unit,
                category = %entry.category,
                "ingredient price updated"
            ),
            Err(e) => {
                tracing::warn!(ingredient = name, error = %e, "ingredient price update rejected")
            }
        }
        result
    }

    /// Serialize the current catalog as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        self.ctx.catalog().to_json_string()
    }
}
