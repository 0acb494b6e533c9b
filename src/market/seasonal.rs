//! Seasonal price factors.
//!
//! Each seasonal group (rice, vegetables, fish, pork, chicken) has a peak,
//! a low and one factor per season. The `current` factor is the one for the
//! season of the snapshot date.

use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

use crate::config;
use crate::models::{Category, Season, SeasonalFactorEntry};

/// Name keywords for the protein and staple groups, tried in order.
const GROUP_KEYWORDS: &[(&[&str], &str)] = &[
    (&["rice"], "rice"),
    (&["fish", "salmon", "tuna", "tilapia", "bangus"], "fish"),
    (&["pork", "pig"], "pork"),
    (&["chicken"], "chicken"),
];

/// Seasonal factor table for the season containing `now`.
pub fn seasonal_table(now: DateTime<Utc>) -> BTreeMap<String, SeasonalFactorEntry> {
    let season = Season::from_month(now.month());
    config::seasonal_profiles()
        .into_iter()
        .map(|(group, profile)| {
            let entry = SeasonalFactorEntry {
                current: profile.factor(season),
                peak: profile.peak,
                low: profile.low,
            };
            (group.to_string(), entry)
        })
        .collect()
}

/// Seasonal group of an ingredient, if it has one.
///
/// Condiments, oils and other pantry items never map to a group, so
/// "fish sauce" is not priced like fresh fish.
pub fn seasonal_group(name: &str, category: Category) -> Option<&'static str> {
    match category {
        Category::Vegetable => Some("vegetables"),
        Category::Protein | Category::Staple => {
            let key = name.trim().to_lowercase();
            GROUP_KEYWORDS
                .iter()
                .find(|(keywords, _)| keywords.iter().any(|k| key.contains(k)))
                .map(|(_, group)| *group)
        }
        _ => None,
    }
}

/// Current factor for an ingredient, `1.0` when it has no group or the
/// table has no entry for its group.
pub fn current_factor(
    table: &BTreeMap<String, SeasonalFactorEntry>,
    name: &str,
    category: Category,
) -> f64 {
    seasonal_group(name, category)
        .and_then(|group| table.get(group))
        .map(|entry| entry.current)
        .unwrap_or(1.0)
}
