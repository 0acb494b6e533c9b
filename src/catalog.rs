//! Ingredient reference prices and name resolution.
//!
//! The catalog is an ordered list of `(name, entry)` pairs. Resolution never
//! fails: a free-text name is matched exactly, then by substring, then by a
//! small set of category keywords, and finally falls back to a default
//! entry.

use std::collections::HashMap;

use crate::config::{self, CATEGORY_HEURISTICS, DEFAULT_ENTRY};
use crate::error::{PricingError, Result};
use crate::models::{Category, CatalogItem, IngredientPriceEntry, MatchTier, Resolution, Unit};

/// Ingredient name to reference price mapping.
///
/// Entry order is the resolution priority: fuzzy ties go to the earlier
/// entry and new entries are appended at the end.
#[derive(Debug, Clone)]
pub struct IngredientCatalog {
    entries: Vec<(String, IngredientPriceEntry)>,
    index: HashMap<String, usize>,
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::from_entries(config::ingredient_prices())
    }
}

impl IngredientCatalog {
    /// An empty catalog. Every name resolves through the heuristic tiers.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a catalog from `(name, entry)` pairs, keeping their order.
    /// A repeated name replaces the earlier entry in place.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, IngredientPriceEntry)>,
        S: AsRef<str>,
    {
        let mut catalog = Self::empty();
        for (name, entry) in entries {
            catalog.insert(&normalize(name.as_ref()), entry);
        }
        catalog
    }

    /// Load a catalog from a JSON array of
    /// `{"name", "unitPrice", "unit", "category"}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        for item in &items {
            if normalize(&item.name).is_empty() {
                return Err(PricingError::InvalidInput(
                    "Catalog entry with a blank name".to_string(),
                ));
            }
            let price = item.entry.unit_price;
            if !(price.is_finite() && price >= 0.0) {
                return Err(PricingError::InvalidInput(format!(
                    "Catalog entry '{}' has invalid price {}",
                    item.name, price
                )));
            }
        }
        Ok(Self::from_entries(
            items.into_iter().map(|item| (item.name, item.entry)),
        ))
    }

    /// Serialize the catalog, in priority order, as a JSON array.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items())?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, entry)` in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientPriceEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.iter()
            .map(|(name, entry)| CatalogItem {
                name: name.to_string(),
                entry: *entry,
            })
            .collect()
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&IngredientPriceEntry> {
        self.index
            .get(&normalize(name))
            .map(|&i| &self.entries[i].1)
    }

    /// Resolve a free-text name to a usable entry.
    pub fn resolve(&self, name: &str) -> IngredientPriceEntry {
        self.resolve_detailed(name).entry
    }

    /// Resolve a free-text name and report which tier produced the entry.
    pub fn resolve_detailed(&self, name: &str) -> Resolution {
        let key = normalize(name);

        if let Some(&i) = self.index.get(&key) {
            return Resolution {
                entry: self.entries[i].1,
                tier: MatchTier::Exact,
                matched: Some(self.entries[i].0.clone()),
            };
        }

        if !key.is_empty() {
            if let Some((matched, entry)) = self.fuzzy_match(&key) {
                tracing::debug!(ingredient = %key, matched, "fuzzy catalog match");
                return Resolution {
                    entry: *entry,
                    tier: MatchTier::Fuzzy,
                    matched: Some(matched.to_string()),
                };
            }

            for (keywords, entry) in CATEGORY_HEURISTICS {
                if let Some(keyword) = keywords.iter().copied().find(|k| key.contains(k)) {
                    tracing::debug!(ingredient = %key, keyword, "category heuristic price");
                    return Resolution {
                        entry: *entry,
                        tier: MatchTier::Category,
                        matched: Some(keyword.to_string()),
                    };
                }
            }
        }

        tracing::debug!(ingredient = %key, "no catalog match; using default price");
        Resolution {
            entry: DEFAULT_ENTRY,
            tier: MatchTier::Default,
            matched: None,
        }
    }

    /// Substring match in either direction.
    ///
    /// Among catalog names contained in the input the longest wins, so
    /// "red bell pepper" resolves to `bell pepper` rather than `pepper`.
    /// Failing that, the first catalog name that contains the input wins.
    fn fuzzy_match(&self, key: &str) -> Option<(&str, &IngredientPriceEntry)> {
        let mut best: Option<&(String, IngredientPriceEntry)> = None;
        for candidate in self.entries.iter().filter(|(name, _)| key.contains(name.as_str())) {
            if best.map_or(true, |(name, _)| candidate.0.len() > name.len()) {
                best = Some(candidate);
            }
        }

        best.or_else(|| self.entries.iter().find(|(name, _)| name.contains(key)))
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Replace the entry for `name` with a new price and unit.
    ///
    /// The prior category is kept when the name already exists; new names
    /// are appended with category `other`. Non-positive or non-finite prices
    /// are rejected.
    pub fn update(&mut self, name: &str, price: f64, unit: Unit) -> Result<IngredientPriceEntry> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(PricingError::InvalidInput(
                "Ingredient name must not be blank".to_string(),
            ));
        }
        if !(price.is_finite() && price > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "Price for '{}' must be a positive number, got {}",
                key, price
            )));
        }

        let category = self.get(&key).map(|e| e.category).unwrap_or(Category::Other);
        let entry = IngredientPriceEntry::new(price, unit, category);
        self.insert(&key, entry);
        Ok(entry)
    }

    /// Entries of one category, in priority order.
    pub fn by_category(&self, category: Category) -> Vec<CatalogItem> {
        self.items()
            .into_iter()
            .filter(|item| item.entry.category == category)
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for (_, entry) in &self.entries {
            if !seen.contains(&entry.category) {
                seen.push(entry.category);
            }
        }
        seen
    }

    fn insert(&mut self, key: &str, entry: IngredientPriceEntry) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 = entry,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), entry));
            }
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
