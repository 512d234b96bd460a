//! Splits a free-text ingredient line into quantity, unit and name.
//!
//! The unit slot holds exactly one word, so multi-word spellings such as
//! "fluid ounces" are read as unit "fluid" and name "ounces ...". Structured
//! sources almost always use the abbreviated form (`fl oz`).

use regex::Regex;
use std::sync::LazyLock;

use super::units::normalize_unit;
use crate::model::Ingredient;

/// Digits plus the Unicode vulgar fractions.
const QUANTITY_START: &str = r"[\d\x{00BC}-\x{00BE}\x{2150}-\x{215E}]";
const QUANTITY_BODY: &str = r"[\d\s/.\x{00BC}-\x{00BE}\x{2150}-\x{215E}]";

static INGREDIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*({QUANTITY_START}{QUANTITY_BODY}*?)\s+(\p{{L}}+)\s+(.+?)\s*$"
    ))
    .unwrap()
});

// OCR output keeps abbreviation periods ("5 Tbs. butter").
static LENIENT_INGREDIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*({QUANTITY_START}{QUANTITY_BODY}*?)\s+(\p{{L}}+)\.?\s+(.+?)\s*$"
    ))
    .unwrap()
});

static QUANTITY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*({QUANTITY_START}{QUANTITY_BODY}*?)\s+(\D.*?)\s*$"
    ))
    .unwrap()
});

/// Parses `QUANTITY UNIT NAME`; anything else becomes the name alone.
pub fn parse_ingredient_text(line: &str) -> Ingredient {
    match INGREDIENT_RE.captures(line) {
        Some(caps) => Ingredient {
            quantity: caps[1].trim().to_string(),
            unit: normalize_unit(&caps[2]),
            name: caps[3].to_string(),
        },
        None => Ingredient {
            name: line.trim().to_string(),
            ..Default::default()
        },
    }
}

/// Variant for OCR text: tolerates a trailing period on the unit, and keeps
/// the quantity of unit-less lines such as "2 eggs".
pub fn parse_ingredient_text_lenient(line: &str) -> Ingredient {
    if let Some(caps) = LENIENT_INGREDIENT_RE.captures(line) {
        return Ingredient {
            quantity: caps[1].trim().to_string(),
            unit: normalize_unit(&caps[2]),
            name: caps[3].to_string(),
        };
    }

    if let Some(caps) = QUANTITY_NAME_RE.captures(line) {
        return Ingredient {
            quantity: caps[1].trim().to_string(),
            unit: String::new(),
            name: caps[2].to_string(),
        };
    }

    Ingredient {
        name: line.trim().to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_unit_name() {
        assert_eq!(
            parse_ingredient_text("2 cups flour"),
            Ingredient::new("2", "cups", "flour")
        );
        assert_eq!(
            parse_ingredient_text("1 1/2 Tablespoons olive oil"),
            Ingredient::new("1 1/2", "tbsp", "olive oil")
        );
        assert_eq!(
            parse_ingredient_text("  1.5 kg potatoes, peeled "),
            Ingredient::new("1.5", "kg", "potatoes, peeled")
        );
        assert_eq!(
            parse_ingredient_text("½ cup milk"),
            Ingredient::new("½", "cups", "milk")
        );
    }

    #[test]
    fn test_unknown_unit_word_passes_through() {
        assert_eq!(
            parse_ingredient_text("3 large eggs"),
            Ingredient::new("3", "large", "eggs")
        );
    }

    #[test]
    fn test_unmatched_line_becomes_name() {
        assert_eq!(
            parse_ingredient_text("salt to taste"),
            Ingredient::new("", "", "salt to taste")
        );
        assert_eq!(parse_ingredient_text("2 eggs"), Ingredient::new("", "", "2 eggs"));
    }

    #[test]
    fn test_multi_word_unit_is_not_recognized() {
        let ingredient = parse_ingredient_text("4 fluid ounces cream");
        assert_eq!(ingredient.unit, "fluid");
        assert_eq!(ingredient.name, "ounces cream");
    }

    #[test]
    fn test_strict_parser_rejects_unit_period() {
        let ingredient = parse_ingredient_text("5 Tbs. butter");
        assert_eq!(ingredient.quantity, "");
        assert_eq!(ingredient.name, "5 Tbs. butter");
    }

    #[test]
    fn test_lenient_parser_accepts_unit_period() {
        assert_eq!(
            parse_ingredient_text_lenient("5 Tbs. butter"),
            Ingredient::new("5", "tbsp", "butter")
        );
        assert_eq!(
            parse_ingredient_text_lenient("2 cups flour"),
            Ingredient::new("2", "cups", "flour")
        );
    }

    #[test]
    fn test_lenient_parser_keeps_unitless_quantity() {
        assert_eq!(
            parse_ingredient_text_lenient("2 eggs"),
            Ingredient::new("2", "", "eggs")
        );
        assert_eq!(
            parse_ingredient_text_lenient("pinch of salt"),
            Ingredient::new("", "", "pinch of salt")
        );
    }
}
