//! Quantity parsing, unit canonicalization and metric/imperial conversion.
//!
//! Every unit that leaves [`normalize_unit`] is either one of the canonical
//! tokens below or the caller's own token, unchanged:
//!
//! - volume: `cups`, `tbsp`, `tsp`, `fl oz`, `ml`, `l`
//! - weight: `g`, `kg`, `oz`, `lbs`
//! - neutral: `unit`
//!
//! Conversion factors follow North American kitchen measure
//! (1 cup = 250 ml, 1 tbsp = 15 ml, 1 tsp = 5 ml).

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{ConvertedQuantity, Ingredient, UnitSystem};

const ML_PER_CUP: f64 = 250.0;
const ML_PER_TBSP: f64 = 15.0;
const ML_PER_TSP: f64 = 5.0;
const ML_PER_FL_OZ: f64 = 29.5735;
const G_PER_OZ: f64 = 28.3495;
const G_PER_LB: f64 = 453.592;

/// Quantities that are meaningful to a cook but have no numeric value.
const NON_NUMERIC_QUANTITIES: &[&str] = &[
    "to taste",
    "a pinch",
    "pinch",
    "a dash",
    "dash",
    "as needed",
    "as required",
    "some",
    "a few",
    "a handful",
    "handful",
];

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)$").unwrap());

static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap());

static MIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)$").unwrap());

static VULGAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s*)?([\x{00BC}-\x{00BE}\x{2150}-\x{215E}])$").unwrap()
});

/// Base unit a physical quantity is reduced to before re-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUnit {
    Ml,
    G,
}

impl BaseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUnit::Ml => "ml",
            BaseUnit::G => "g",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBase {
    pub value: f64,
    pub base_unit: BaseUnit,
}

fn vulgar_fraction_value(c: char) -> Option<f64> {
    let value = match c {
        '¼' => 0.25,
        '½' => 0.5,
        '¾' => 0.75,
        '⅐' => 1.0 / 7.0,
        '⅑' => 1.0 / 9.0,
        '⅒' => 0.1,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅕' => 0.2,
        '⅖' => 0.4,
        '⅗' => 0.6,
        '⅘' => 0.8,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 0.125,
        '⅜' => 0.375,
        '⅝' => 0.625,
        '⅞' => 0.875,
        _ => return None,
    };
    Some(value)
}

/// Parses `"2"`, `"2.5"`, `"1/2"`, `"1 1/2"` and `"1½"` into a number.
///
/// `None` means "do not attempt numeric conversion": it is returned for empty
/// input, placeholders such as `"to taste"`, and anything else unrecognized.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if NON_NUMERIC_QUANTITIES.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }

    if DECIMAL_RE.is_match(trimmed) {
        return trimmed.parse().ok();
    }

    if let Some(caps) = FRACTION_RE.captures(trimmed) {
        return fraction(&caps[1], &caps[2]);
    }

    if let Some(caps) = MIXED_RE.captures(trimmed) {
        let whole: f64 = caps[1].parse().ok()?;
        return fraction(&caps[2], &caps[3]).map(|frac| whole + frac);
    }

    if let Some(caps) = VULGAR_RE.captures(trimmed) {
        let whole = match caps.get(1) {
            Some(m) => m.as_str().parse::<f64>().ok()?,
            None => 0.0,
        };
        let frac = caps[2].chars().next().and_then(vulgar_fraction_value)?;
        return Some(whole + frac);
    }

    None
}

fn fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Maps a unit spelling onto the canonical vocabulary. Unknown tokens are
/// returned as given (trimmed).
pub fn normalize_unit(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let canonical = match collapsed.as_str() {
        "cup" | "cups" | "c" => "cups",
        "tablespoon" | "tablespoons" | "tbsp" | "tbsps" | "tbs" | "tbl" | "tbls" => "tbsp",
        "teaspoon" | "teaspoons" | "tsp" | "tsps" => "tsp",
        "fl oz" | "fl. oz" | "fl. oz." | "floz" | "fluid ounce" | "fluid ounces" => "fl oz",
        "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => "ml",
        "l" | "liter" | "liters" | "litre" | "litres" => "l",
        "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => "g",
        "kg" | "kgs" | "kilogram" | "kilograms" | "kilo" | "kilos" => "kg",
        "oz" | "ounce" | "ounces" => "oz",
        "lb" | "lbs" | "pound" | "pounds" => "lbs",
        "unit" | "units" | "piece" | "pieces" | "pc" | "pcs" => "unit",
        _ => return raw.trim().to_string(),
    };
    canonical.to_string()
}

/// Unit system of a canonical unit token.
pub fn unit_system(unit: &str) -> UnitSystem {
    match unit {
        "ml" | "l" | "g" | "kg" => UnitSystem::Metric,
        "cups" | "tbsp" | "tsp" | "fl oz" | "oz" | "lbs" => UnitSystem::Imperial,
        _ => UnitSystem::Neutral,
    }
}

fn metric_factor(unit: &str) -> Option<(f64, BaseUnit)> {
    let factor = match unit {
        "ml" => (1.0, BaseUnit::Ml),
        "l" => (1000.0, BaseUnit::Ml),
        "cups" => (ML_PER_CUP, BaseUnit::Ml),
        "tbsp" => (ML_PER_TBSP, BaseUnit::Ml),
        "tsp" => (ML_PER_TSP, BaseUnit::Ml),
        "fl oz" => (ML_PER_FL_OZ, BaseUnit::Ml),
        "g" => (1.0, BaseUnit::G),
        "kg" => (1000.0, BaseUnit::G),
        "oz" => (G_PER_OZ, BaseUnit::G),
        "lbs" => (G_PER_LB, BaseUnit::G),
        _ => return None,
    };
    Some(factor)
}

/// Reduces a quantity to millilitres (volume) or grams (weight).
///
/// Returns `None` for unparsable quantities and for neutral or unknown units.
pub fn convert_to_metric_base(quantity: &str, unit: &str) -> Option<MetricBase> {
    let (factor, base_unit) = metric_factor(&normalize_unit(unit))?;
    let value = parse_quantity(quantity)?;
    Some(MetricBase {
        value: value * factor,
        base_unit,
    })
}

/// Re-expresses an ingredient in `target` for display.
///
/// `None` means "keep the original": the ingredient is already in the target
/// system, its unit is neutral, or its quantity is not numeric.
pub fn convert_ingredient(
    ingredient: &Ingredient,
    target: UnitSystem,
) -> Option<ConvertedQuantity> {
    let unit = normalize_unit(&ingredient.unit);
    let current = unit_system(&unit);
    if current == UnitSystem::Neutral || target == UnitSystem::Neutral || current == target {
        return None;
    }

    let base = convert_to_metric_base(&ingredient.quantity, &unit)?;
    let (value, unit) = match target {
        UnitSystem::Metric => best_metric(base),
        UnitSystem::Imperial => best_imperial(base),
        UnitSystem::Neutral => return None,
    };

    Some(ConvertedQuantity {
        quantity: format_quantity(value),
        unit: unit.to_string(),
    })
}

fn best_metric(base: MetricBase) -> (f64, &'static str) {
    match base.base_unit {
        BaseUnit::Ml if base.value >= 1000.0 => (base.value / 1000.0, "l"),
        BaseUnit::Ml => (base.value, "ml"),
        BaseUnit::G if base.value >= 1000.0 => (base.value / 1000.0, "kg"),
        BaseUnit::G => (base.value, "g"),
    }
}

fn best_imperial(base: MetricBase) -> (f64, &'static str) {
    match base.base_unit {
        BaseUnit::Ml => [("cups", ML_PER_CUP), ("tbsp", ML_PER_TBSP), ("tsp", ML_PER_TSP)]
            .into_iter()
            .map(|(unit, factor)| (base.value / factor, unit))
            .find(|(value, _)| *value >= 1.0)
            .unwrap_or((base.value / ML_PER_FL_OZ, "fl oz")),
        BaseUnit::G if base.value >= G_PER_LB => (base.value / G_PER_LB, "lbs"),
        BaseUnit::G => (base.value / G_PER_OZ, "oz"),
    }
}

/// Display form: two decimals at most, trailing zeros dropped, and values
/// within 0.01 of an integer snapped to it.
pub fn format_quantity(value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() < 0.01 {
        return format!("{}", nearest as i64);
    }

    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
