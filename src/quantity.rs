//! Free-text measurement parsing.
//!
//! Turns a recipe measure such as `"500g"`, `"2 cups"` or `"3 pieces"` into a
//! [`Quantity`] in one of the canonical units. Masses are normalized to
//! kilograms and volumes to liters. Cup and spoon conversions are kitchen
//! approximations, not exact unit-of-measure arithmetic.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{Quantity, Unit};

const LITERS_PER_CUP: f64 = 0.24;
const LITERS_PER_TBSP: f64 = 0.015;
const LITERS_PER_TSP: f64 = 0.005;
const MILLI_PER_UNIT: f64 = 1000.0;

/// Scales a parsed amount into a canonical unit.
#[derive(Debug, Clone, Copy)]
struct Conversion {
    unit: Unit,
    multiply: f64,
    divide: f64,
}

impl Conversion {
    const fn times(unit: Unit, multiply: f64) -> Self {
        Self {
            unit,
            multiply,
            divide: 1.0,
        }
    }

    const fn per(unit: Unit, divide: f64) -> Self {
        Self {
            unit,
            multiply: 1.0,
            divide,
        }
    }

    fn apply(&self, amount: f64) -> Quantity {
        Quantity::new(amount * self.multiply / self.divide, self.unit)
    }
}

static NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)(?:\s*/\s*(\d+(?:\.\d+)?))?").ok());

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[a-z]+").ok());

/// Substrings tried when no word of the measure is a known unit. Longer
/// names come first so `milliliter` is not read as `liter` and `kilogram`
/// is not read as `gram`.
const UNIT_SUBSTRINGS: &[(&str, Conversion)] = &[
    ("kilogram", Conversion::times(Unit::Kg, 1.0)),
    ("milliliter", Conversion::per(Unit::Liter, MILLI_PER_UNIT)),
    ("millilitre", Conversion::per(Unit::Liter, MILLI_PER_UNIT)),
    ("tablespoon", Conversion::times(Unit::Liter, LITERS_PER_TBSP)),
    ("teaspoon", Conversion::times(Unit::Liter, LITERS_PER_TSP)),
    ("liter", Conversion::times(Unit::Liter, 1.0)),
    ("litre", Conversion::times(Unit::Liter, 1.0)),
    ("gram", Conversion::per(Unit::Kg, MILLI_PER_UNIT)),
    ("bottle", Conversion::times(Unit::Bottle, 1.0)),
    ("piece", Conversion::times(Unit::Piece, 1.0)),
    ("pack", Conversion::times(Unit::Pack, 1.0)),
    ("cup", Conversion::times(Unit::Liter, LITERS_PER_CUP)),
    ("can", Conversion::times(Unit::Can, 1.0)),
];

const PIECES: Conversion = Conversion::times(Unit::Piece, 1.0);

/// Parse a measure into an amount and canonical unit.
///
/// Returns `None` only for blank input. A measure without a number yields
/// an amount of `0`, and a measure without a recognizable unit is counted
/// in pieces.
///
/// ```
/// use recipe_pricing::quantity::parse_quantity;
/// use recipe_pricing::models::Unit;
///
/// let q = parse_quantity("500g").unwrap();
/// assert_eq!(q.unit, Unit::Kg);
/// assert!((q.amount - 0.5).abs() < 1e-12);
/// ```
pub fn parse_quantity(measure: &str) -> Option<Quantity> {
    let text = measure.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let amount = parse_amount(&text);
    Some(detect_unit(&text).apply(amount))
}

/// First numeric token of the measure. A simple fraction (`1/2`) counts as
/// one token; a zero denominator gives `0`.
fn parse_amount(text: &str) -> f64 {
    let Some(caps) = NUMBER.as_ref().and_then(|re| re.captures(text)) else {
        return 0.0;
    };

    let numerator: f64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);

    match caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()) {
        Some(denominator) if denominator > 0.0 => numerator / denominator,
        Some(_) => 0.0,
        None => numerator,
    }
}

/// Whole words are matched first so short abbreviations (`g`, `l`, `ml`)
/// only count when they stand alone or follow the number directly.
fn detect_unit(text: &str) -> Conversion {
    let by_word = WORD
        .as_ref()
        .and_then(|re| re.find_iter(text).find_map(|w| unit_for_word(w.as_str())));
    if let Some(found) = by_word {
        return found;
    }

    UNIT_SUBSTRINGS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, conversion)| *conversion)
        .unwrap_or(PIECES)
}

fn unit_for_word(word: &str) -> Option<Conversion> {
    let found = match word {
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => {
            Conversion::times(Unit::Kg, 1.0)
        }
        "g" | "gm" | "gms" | "gr" | "gram" | "grams" => Conversion::per(Unit::Kg, MILLI_PER_UNIT),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            Conversion::per(Unit::Liter, MILLI_PER_UNIT)
        }
        "l" | "liter" | "liters" | "litre" | "litres" => Conversion::times(Unit::Liter, 1.0),
        "cup" | "cups" => Conversion::times(Unit::Liter, LITERS_PER_CUP),
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => {
            Conversion::times(Unit::Liter, LITERS_PER_TBSP)
        }
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => {
            Conversion::times(Unit::Liter, LITERS_PER_TSP)
        }
        "pc" | "pcs" | "piece" | "pieces" => PIECES,
        "bottle" | "bottles" => Conversion::times(Unit::Bottle, 1.0),
        "pack" | "packs" => Conversion::times(Unit::Pack, 1.0),
        "can" | "cans" => Conversion::times(Unit::Can, 1.0),
        _ => return None,
    };
    Some(found)
}
