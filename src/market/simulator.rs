//! Market snapshot simulator.
//!
//! Generates a complete [`MarketSnapshot`]: regional multipliers drifted
//! around their reference values, a daily price series for every tracked
//! ingredient, and the seasonal factor table for the current month. No
//! external market data is consulted; every number comes from the injected
//! random source.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::prelude::*;
use std::collections::BTreeMap;

use crate::config::{
    PricingConfig, DAILY_VARIATION, DAILY_VOLUME_SPAN, MIN_DAILY_VOLUME, REGION_DRIFT,
};
use crate::error::{PricingError, Result};
use crate::market::seasonal;
use crate::market::stats::round_cents;
use crate::models::{DailyPricePoint, MarketSnapshot, RegionFactors, RegionProfile, TrendSeries};

/// Builds market snapshots from the reference tables of a [`PricingConfig`].
pub struct MarketSimulator<'a> {
    config: &'a PricingConfig,
}

impl<'a> MarketSimulator<'a> {
    pub fn new(config: &'a PricingConfig) -> Self {
        Self { config }
    }

    /// Simulate a full snapshot dated `now`.
    ///
    /// The snapshot is built completely before it is returned; callers
    /// publish it as a unit.
    pub fn simulate<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> Result<MarketSnapshot> {
        let regions = self.simulate_regions(rng, now);

        let today = now.date_naive();
        let mut trends = BTreeMap::new();
        for (ingredient, base_price) in &self.config.tracked_ingredients {
            let points = self.simulate_series(rng, *base_price, today)?;
            trends.insert(ingredient.clone(), TrendSeries::from_points(points));
        }

        let snapshot = MarketSnapshot {
            regions,
            trends,
            seasonal_factors: seasonal::seasonal_table(now),
            last_updated: now,
        };
        ensure_finite(&snapshot)?;

        tracing::debug!(
            regions = snapshot.regions.len(),
            trends = snapshot.trends.len(),
            "simulated market snapshot"
        );
        Ok(snapshot)
    }

    /// Perturb each reference multiplier by a uniform offset.
    fn simulate_regions<R: Rng>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, RegionProfile> {
        self.config
            .regions
            .iter()
            .map(|(region, base)| {
                let drift = rng.gen_range(-REGION_DRIFT..=REGION_DRIFT);
                (region.clone(), region_profile(*base, base + drift, now))
            })
            .collect()
    }

    /// A window of daily prices ending today, each independently varied
    /// around `base_price`.
    fn simulate_series<R: Rng>(
        &self,
        rng: &mut R,
        base_price: f64,
        today: NaiveDate,
    ) -> Result<Vec<DailyPricePoint>> {
        let days = u64::try_from(self.config.trend_window_days).map_err(|_| {
            PricingError::Simulation(format!(
                "trend window of {} days is out of range",
                self.config.trend_window_days
            ))
        })?;
        let mut points = Vec::with_capacity(self.config.trend_window_days);

        for back in (0..days).rev() {
            let date = today.checked_sub_days(Days::new(back)).ok_or_else(|| {
                PricingError::Simulation(format!(
                    "date {} minus {} days is out of range",
                    today, back
                ))
            })?;
            let variation = rng.gen_range(-DAILY_VARIATION..=DAILY_VARIATION);
            let volume = MIN_DAILY_VOLUME + rng.gen_range(0..DAILY_VOLUME_SPAN);
            points.push(DailyPricePoint {
                date,
                price: round_cents(base_price * (1.0 + variation)),
                volume,
            });
        }

        Ok(points)
    }
}

/// Snapshot published before the first refresh: reference multipliers,
/// no price series.
pub fn initial_snapshot(config: &PricingConfig, now: DateTime<Utc>) -> MarketSnapshot {
    let regions = config
        .regions
        .iter()
        .map(|(region, base)| (region.clone(), region_profile(*base, *base, now)))
        .collect();

    MarketSnapshot {
        regions,
        trends: BTreeMap::new(),
        seasonal_factors: seasonal::seasonal_table(now),
        last_updated: now,
    }
}

/// Factors follow the reference multiplier, not the drifted one.
fn region_profile(base: f64, multiplier: f64, now: DateTime<Utc>) -> RegionProfile {
    let above = base > 1.0;
    RegionProfile {
        multiplier,
        last_update: now,
        factors: RegionFactors {
            transportation: if above { 1.1 } else { 0.9 },
            demand: if above { 1.05 } else { 0.95 },
            supply: if above { 0.95 } else { 1.05 },
        },
    }
}

fn ensure_finite(snapshot: &MarketSnapshot) -> Result<()> {
    let bad_region = snapshot
        .regions
        .iter()
        .find(|(_, profile)| !profile.multiplier.is_finite());
    if let Some((region, profile)) = bad_region {
        return Err(PricingError::Simulation(format!(
            "region '{}' has non-finite multiplier {}",
            region, profile.multiplier
        )));
    }

    for (ingredient, series) in &snapshot.trends {
        let bad_price = series.daily_prices.iter().any(|p| !p.price.is_finite());
        if !series.volatility.is_finite() || bad_price {
            return Err(PricingError::Simulation(format!(
                "price series for '{}' is not finite",
                ingredient
            )));
        }
    }
    Ok(())
}
