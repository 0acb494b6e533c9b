//! Advisory text and price alerts derived from market trend data.
//!
//! The free functions work on any trend table; [`InsightEngine`] applies
//! them to the currently published snapshot.

use std::collections::BTreeMap;

use crate::config::{ALERT_CHANGE_THRESHOLD, ALERT_MIN_CONFIDENCE, HIGH_VOLATILITY};
use crate::context::PricingContext;
use crate::models::{AlertKind, MarketInsights, PriceAlert, TrendLabel, TrendSeries};

// ---------------------------------------------------------------------------
// InsightEngine
// ---------------------------------------------------------------------------

pub struct InsightEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> InsightEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }

    /// Insights for the named ingredients against the current snapshot.
    pub fn insights<S: AsRef<str>>(&self, ingredients: &[S]) -> MarketInsights {
        market_insights(&self.ctx.snapshot().trends, ingredients)
    }

    /// Alerts for the current snapshot.
    pub fn price_alerts(&self) -> Vec<PriceAlert> {
        price_alerts(&self.ctx.snapshot().trends)
    }
}

// ---------------------------------------------------------------------------
// Pure functions
// ---------------------------------------------------------------------------

/// Per-ingredient warnings and opportunities plus an overall trend.
///
/// Names are matched case-insensitively and names without a series are
/// ignored. The overall trend is a vote over every series in `trends`, not
/// only the named ones; a tie stays `Stable`.
pub fn market_insights<S: AsRef<str>>(
    trends: &BTreeMap<String, TrendSeries>,
    ingredients: &[S],
) -> MarketInsights {
    let mut insights = MarketInsights::default();

    for name in ingredients {
        let name = name.as_ref();
        let Some(series) = trends.get(&name.trim().to_lowercase()) else {
            continue;
        };

        match series.trend {
            TrendLabel::Rising => insights
                .warnings
                .push(format!("{} prices are rising - consider bulk purchasing", name)),
            TrendLabel::Falling => insights
                .opportunities
                .push(format!("{} prices are falling - good time to buy", name)),
            TrendLabel::Stable => {}
        }

        if series.volatility > HIGH_VOLATILITY {
            insights
                .warnings
                .push(format!("{} has high price volatility - monitor closely", name));
        }
    }

    insights.overall_trend = overall_trend(trends);
    match insights.overall_trend {
        TrendLabel::Rising => insights
            .recommendations
            .push("Consider increasing prices to maintain margins".to_string()),
        TrendLabel::Falling => insights
            .recommendations
            .push("Market prices are favorable - consider promotional pricing".to_string()),
        TrendLabel::Stable => {}
    }

    insights
}

/// Majority of rising versus falling series.
pub fn overall_trend(trends: &BTreeMap<String, TrendSeries>) -> TrendLabel {
    let rising = trends.values().filter(|s| s.trend == TrendLabel::Rising).count();
    let falling = trends.values().filter(|s| s.trend == TrendLabel::Falling).count();
    if rising > falling {
        TrendLabel::Rising
    } else if falling > rising {
        TrendLabel::Falling
    } else {
        TrendLabel::Stable
    }
}

/// Alerts for confident forecasts that move more than 10% away from the
/// latest price.
pub fn price_alerts(trends: &BTreeMap<String, TrendSeries>) -> Vec<PriceAlert> {
    let mut alerts = Vec::new();

    for (ingredient, series) in trends {
        let Some(forecast) = series.forecast else {
            continue;
        };
        if forecast.confidence <= ALERT_MIN_CONFIDENCE {
            continue;
        }
        let Some(latest) = series.latest().map(|p| p.price).filter(|p| *p > 0.0) else {
            continue;
        };

        let change = (forecast.next_week - latest) / latest;
        if change.abs() <= ALERT_CHANGE_THRESHOLD {
            continue;
        }

        let (kind, recommendation) = if change > 0.0 {
            (AlertKind::PriceIncrease, "Consider bulk purchasing")
        } else {
            (AlertKind::PriceDecrease, "Good time to buy")
        };
        alerts.push(PriceAlert {
            ingredient: ingredient.clone(),
            kind,
            change,
            change_percent: (change * 100.0).round() as i64,
            forecast: forecast.next_week,
            confidence: forecast.confidence,
            recommendation: recommendation.to_string(),
        });
    }

    alerts
}
