//! Statistics derived from a daily price series.

use crate::config::{FORECAST_MIN_POINTS, MIN_FORECAST_CONFIDENCE, TREND_THRESHOLD};
use crate::models::{DailyPricePoint, Forecast, TrendLabel};

const WEEK_NUDGE: f64 = 0.02;
const MONTH_NUDGE: f64 = 0.05;

/// Classify the net change between the first and the last point.
///
/// Series shorter than two points, or starting at a non-positive price,
/// are `Stable`.
pub fn trend_label(points: &[DailyPricePoint]) -> TrendLabel {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return TrendLabel::Stable;
    };
    if points.len() < 2 || first.price <= 0.0 {
        return TrendLabel::Stable;
    }

    let change = (last.price - first.price) / first.price;
    if change > TREND_THRESHOLD {
        TrendLabel::Rising
    } else if change < -TREND_THRESHOLD {
        TrendLabel::Falling
    } else {
        TrendLabel::Stable
    }
}

/// Coefficient of variation: population standard deviation over mean.
pub fn volatility(points: &[DailyPricePoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mean = points.iter().map(|p| p.price).sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = points
        .iter()
        .map(|p| (p.price - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt() / mean
}

/// Short-horizon forecast from the most recent price.
///
/// `None` when the series has fewer than seven points.
pub fn forecast(points: &[DailyPricePoint]) -> Option<Forecast> {
    if points.len() < FORECAST_MIN_POINTS {
        return None;
    }
    let window = &points[points.len() - FORECAST_MIN_POINTS..];
    let last = window.last()?.price;

    // A stable series carries no weekly nudge but is still discounted for the month.
    let (week_factor, month_factor) = match trend_label(points) {
        TrendLabel::Rising => (1.0 + WEEK_NUDGE, 1.0 + MONTH_NUDGE),
        TrendLabel::Falling => (1.0 - WEEK_NUDGE, 1.0 - MONTH_NUDGE),
        TrendLabel::Stable => (1.0, 1.0 - MONTH_NUDGE),
    };
    let next_week = last * week_factor;
    let next_month = next_week * month_factor;

    Some(Forecast {
        next_week: round_cents(next_week),
        next_month: round_cents(next_month),
        confidence: (1.0 - volatility(points)).clamp(MIN_FORECAST_CONFIDENCE, 1.0),
    })
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
