//! Access to the published market snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::DEFAULT_REGIONAL_MULTIPLIER;
use crate::context::PricingContext;
use crate::error::{PricingError, Result};
use crate::market::seasonal;
use crate::models::{
    Category, LatestPrice, MarketSnapshot, MarketSummary, SeasonalFactorEntry, TrendSeries,
};
use crate::queries::insights;

// ---------------------------------------------------------------------------
// MarketQuery
// ---------------------------------------------------------------------------

/// Snapshot reads and refreshes.
///
/// Every method reads one snapshot; values from two calls may come from
/// different refreshes.
pub struct MarketQuery<'a> {
    ctx: &'a PricingContext,
}

impl<'a> MarketQuery<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }

    pub fn snapshot(&self) -> Arc<MarketSnapshot> {
        self.ctx.snapshot()
    }

    /// Simulate and publish a new snapshot. On failure the previous
    /// snapshot stays published.
    pub fn refresh(&self) -> Result<Arc<MarketSnapshot>> {
        self.ctx.refresh_market()
    }

    /// Drifted multiplier for a region, `1.0` when the snapshot has none.
    pub fn regional_multiplier(&self, region: &str) -> f64 {
        self.ctx
            .snapshot()
            .regions
            .get(&region.trim().to_lowercase())
            .map(|profile| profile.multiplier)
            .unwrap_or(DEFAULT_REGIONAL_MULTIPLIER)
    }

    /// Current seasonal factor for an ingredient, `1.0` when it has no
    /// seasonal group.
    pub fn seasonal_factor(&self, ingredient: &str, category: Category) -> f64 {
        seasonal::current_factor(&self.ctx.snapshot().seasonal_factors, ingredient, category)
    }

    pub fn seasonal_factors(&self) -> BTreeMap<String, SeasonalFactorEntry> {
        self.ctx.snapshot().seasonal_factors.clone()
    }

    /// Price series for one tracked ingredient.
    pub fn series(&self, ingredient: &str) -> Result<TrendSeries> {
        self.ctx
            .snapshot()
            .trends
            .get(&ingredient.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| {
                PricingError::NotFound(format!("No price series for ingredient '{}'", ingredient))
            })
    }

    /// Latest simulated price of every tracked ingredient.
    pub fn latest_prices(&self) -> Vec<LatestPrice> {
        self.ctx
            .snapshot()
            .trends
            .iter()
            .filter_map(|(ingredient, series)| {
                series.latest().map(|point| LatestPrice {
                    ingredient: ingredient.clone(),
                    date: point.date,
                    price: point.price,
                    trend: series.trend,
                })
            })
            .collect()
    }

    pub fn summary(&self) -> MarketSummary {
        let snapshot = self.ctx.snapshot();
        MarketSummary {
            last_updated: snapshot.last_updated,
            regions: snapshot.regions.len(),
            ingredients_tracked: snapshot.trends.len(),
            alerts: insights::price_alerts(&snapshot.trends).len(),
            overall_trend: insights::overall_trend(&snapshot.trends),
        }
    }
}
