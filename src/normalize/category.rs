use crate::model::DEFAULT_CATEGORY;

/// Synonyms folded onto the controlled category vocabulary. Keys are
/// lowercase and trimmed.
const CATEGORY_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "Main Course",
        &[
            "main",
            "mains",
            "main course",
            "main courses",
            "main dish",
            "main dishes",
            "entree",
            "entrees",
            "entrée",
            "entrées",
            "dinner",
        ],
    ),
    (
        "Appetizer",
        &[
            "appetizer",
            "appetizers",
            "appetiser",
            "appetisers",
            "starter",
            "starters",
            "hors d'oeuvre",
            "hors d'oeuvres",
        ],
    ),
    (
        "Side Dish",
        &["side", "sides", "side dish", "side dishes"],
    ),
    ("Dessert", &["dessert", "desserts", "sweets"]),
    ("Breakfast", &["breakfast", "brunch"]),
    ("Lunch", &["lunch"]),
    ("Soup", &["soup", "soups"]),
    ("Salad", &["salad", "salads"]),
    ("Snack", &["snack", "snacks"]),
    (
        "Beverage",
        &["drink", "drinks", "beverage", "beverages", "cocktail", "cocktails"],
    ),
    ("Bread", &["bread", "breads"]),
    ("Sauce", &["sauce", "sauces", "condiment", "condiments"]),
    ("Other", &["other"]),
];

/// Maps an external category onto the controlled vocabulary.
///
/// Empty input yields `"Other"`. Unknown categories are kept with their first
/// character upper-cased so site-specific values stay usable.
pub fn map_category(raw: Option<&str>) -> String {
    let trimmed = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return DEFAULT_CATEGORY.to_string(),
    };

    let key = trimmed.to_lowercase();
    CATEGORY_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&key.as_str()))
        .map(|(category, _)| category.to_string())
        .unwrap_or_else(|| capitalize_first(trimmed))
}

/// Sources often list several categories; only the first one is mapped.
pub fn map_first_category<S: AsRef<str>>(values: &[S]) -> String {
    map_category(values.first().map(AsRef::as_ref))
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms() {
        assert_eq!(map_category(Some("Mains")), "Main Course");
        assert_eq!(map_category(Some("  entrée ")), "Main Course");
        assert_eq!(map_category(Some("Starters")), "Appetizer");
        assert_eq!(map_category(Some("drink")), "Beverage");
        assert_eq!(map_category(Some("DESSERTS")), "Dessert");
    }

    #[test]
    fn test_unknown_category_is_preserved() {
        assert_eq!(
            map_category(Some("totally-novel-category")),
            "Totally-novel-category"
        );
        assert_eq!(map_category(Some("özel yemek")), "Özel yemek");
    }

    #[test]
    fn test_empty_category_is_other() {
        assert_eq!(map_category(None), "Other");
        assert_eq!(map_category(Some("")), "Other");
        assert_eq!(map_category(Some("   ")), "Other");
    }

    #[test]
    fn test_first_of_many() {
        assert_eq!(map_first_category(&["Starter", "Dinner"]), "Appetizer");
        let empty: [&str; 0] = [];
        assert_eq!(map_first_category(&empty), "Other");
    }
}
