use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// DailyPricePoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: u32,
}

// ---------------------------------------------------------------------------
// TrendLabel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Rising => "rising",
            TrendLabel::Falling => "falling",
            TrendLabel::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Forecast / TrendSeries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_week: f64,
    pub next_month: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub daily_prices: Vec<DailyPricePoint>,
    pub trend: TrendLabel,
    pub volatility: f64,
    pub forecast: Option<Forecast>,
}

impl TrendSeries {
    /// Build a series and derive its trend, volatility and forecast.
    pub fn from_points(daily_prices: Vec<DailyPricePoint>) -> Self {
        let trend = crate::market::stats::trend_label(&daily_prices);
        let volatility = crate::market::stats::volatility(&daily_prices);
        let forecast = crate::market::stats::forecast(&daily_prices);
        Self {
            daily_prices,
            trend,
            volatility,
            forecast,
        }
    }

    pub fn latest(&self) -> Option<&DailyPricePoint> {
        self.daily_prices.last()
    }
}

// ---------------------------------------------------------------------------
// RegionProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionFactors {
    pub transportation: f64,
    pub demand: f64,
    pub supply: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProfile {
    pub multiplier: f64,
    pub last_update: DateTime<Utc>,
    pub factors: RegionFactors,
}

// ---------------------------------------------------------------------------
// Season / SeasonalFactorEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season for a calendar month (1 = January).
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactorEntry {
    pub current: f64,
    pub peak: f64,
    pub low: f64,
}

// ---------------------------------------------------------------------------
// MarketSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub regions: BTreeMap<String, RegionProfile>,
    pub trends: BTreeMap<String, TrendSeries>,
    pub seasonal_factors: BTreeMap<String, SeasonalFactorEntry>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub last_updated: DateTime<Utc>,
    pub regions: usize,
    pub ingredients_tracked: usize,
    pub alerts: usize,
    pub overall_trend: TrendLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestPrice {
    pub ingredient: String,
    pub date: NaiveDate,
    pub price: f64,
    pub trend: TrendLabel,
}

// ---------------------------------------------------------------------------
// Insights / PriceAlert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub overall_trend: TrendLabel,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PriceIncrease,
    PriceDecrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub ingredient: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub change: f64,
    pub change_percent: i64,
    pub forecast: f64,
    pub confidence: f64,
    pub recommendation: String,
}
