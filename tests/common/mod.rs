//! Shared test fixtures for the pricing SDK integration tests.
//!
//! Provides a seeded SDK on a fixed mid-July clock, the Sisig reference
//! recipe, and helpers for building price series by hand.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use recipe_pricing::error::{PricingError, Result};
use recipe_pricing::models::{DailyPricePoint, Forecast, Recipe, TrendLabel, TrendSeries};
use recipe_pricing::{Clock, FixedClock, PricingSdk};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 2024-07-15 08:00 UTC, a summer date.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    fixed_now().date_naive()
}

/// An SDK with a seeded random source and the fixed clock.
pub fn seeded_sdk(seed: u64) -> PricingSdk {
    PricingSdk::builder()
        .seed(seed)
        .clock(FixedClock(fixed_now()))
        .build()
        .unwrap()
}

/// Sisig with seven ingredients and no cooking keywords in the
/// instructions.
pub fn sisig() -> Recipe {
    Recipe::new("Sisig")
        .category("Pork")
        .instructions("Chop everything finely and serve on a sizzling plate.")
        .ingredient("Pork Ears", "300g")
        .ingredient("Pork Snout", "200g")
        .ingredient("Onion", "2 pieces")
        .ingredient("Chili Peppers", "3 pieces")
        .ingredient("Calamansi", "5 pieces")
        .ingredient("Soy Sauce", "2 tbsp")
        .ingredient("Egg", "1 piece")
}

/// Daily points for consecutive dates ending on [`today`].
pub fn points(prices: &[f64]) -> Vec<DailyPricePoint> {
    let start = today()
        .checked_sub_days(Days::new(prices.len().saturating_sub(1) as u64))
        .unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| DailyPricePoint {
            date: start.checked_add_days(Days::new(i as u64)).unwrap(),
            price,
            volume: 1000,
        })
        .collect()
}

/// A series with a hand-picked trend, volatility and forecast, bypassing
/// the derived statistics.
pub fn series_with(
    latest: f64,
    trend: TrendLabel,
    volatility: f64,
    forecast: Option<Forecast>,
) -> TrendSeries {
    TrendSeries {
        daily_prices: points(&[latest; 10]),
        trend,
        volatility,
        forecast,
    }
}

/// Answers the first `ok_calls` calls, then fails.
pub struct FlakyClock {
    ok_calls: usize,
    calls: AtomicUsize,
}

impl FlakyClock {
    pub fn new(ok_calls: usize) -> Self {
        Self {
            ok_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Clock for FlakyClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.ok_calls {
            Ok(fixed_now())
        } else {
            Err(PricingError::Simulation("clock unavailable".to_string()))
        }
    }
}
