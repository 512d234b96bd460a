//! Shared normalizers used by every extraction path.

pub mod category;
pub mod duration;
pub mod ingredient;
pub mod units;

pub use category::{map_category, map_first_category};
pub use duration::{derive_additional_time, parse_time};
pub use ingredient::{parse_ingredient_text, parse_ingredient_text_lenient};
pub use units::{
    convert_ingredient, convert_to_metric_base, normalize_unit, parse_quantity, unit_system,
    MetricBase,
};

use regex::Regex;
use std::sync::LazyLock;

static FIRST_INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// First integer found in a yield such as `"Serves 4-6"`; 0 when there is none.
pub fn parse_servings(value: &str) -> u32 {
    FIRST_INTEGER_RE
        .find(value)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_servings() {
        assert_eq!(parse_servings("4"), 4);
        assert_eq!(parse_servings("Serves 4-6"), 4);
        assert_eq!(parse_servings("24 cookies"), 24);
        assert_eq!(parse_servings("a crowd"), 0);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Mix \n\t well  "), "Mix well");
    }
}
