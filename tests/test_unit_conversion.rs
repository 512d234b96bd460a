use recipe_importer::normalize::{convert_ingredient, convert_to_metric_base};
use recipe_importer::{Ingredient, Recipe, UnitSystem};

fn recipe_with(ingredients: Vec<Ingredient>) -> Recipe {
    Recipe {
        title: "Test".to_string(),
        ingredients,
        ..Default::default()
    }
}

#[test]
fn test_recipe_display_in_metric() {
    let recipe = recipe_with(vec![
        Ingredient::new("2", "cups", "milk"),
        Ingredient::new("1", "lbs", "potatoes"),
        Ingredient::new("3", "", "eggs"),
        Ingredient::new("to taste", "", "salt"),
    ]);

    let metric = recipe.display_in(UnitSystem::Metric);

    assert_eq!(metric.ingredients[0], Ingredient::new("500", "ml", "milk"));
    assert_eq!(metric.ingredients[1], Ingredient::new("453.59", "g", "potatoes"));
    assert_eq!(metric.ingredients[2], recipe.ingredients[2]);
    assert_eq!(metric.ingredients[3], recipe.ingredients[3]);
    // Original untouched
    assert_eq!(recipe.ingredients[0].unit, "cups");
}

#[test]
fn test_recipe_display_in_imperial() {
    let recipe = recipe_with(vec![
        Ingredient::new("1.5", "l", "stock"),
        Ingredient::new("15", "ml", "vinegar"),
        Ingredient::new("1", "kg", "flour"),
    ]);

    let imperial = recipe.display_in(UnitSystem::Imperial);

    assert_eq!(imperial.ingredients[0], Ingredient::new("6", "cups", "stock"));
    assert_eq!(imperial.ingredients[1], Ingredient::new("1", "tbsp", "vinegar"));
    assert_eq!(imperial.ingredients[2], Ingredient::new("2.2", "lbs", "flour"));
}

#[test]
fn test_conversion_skips_unknowns() {
    let pinch = Ingredient::new("1", "pinch", "nutmeg");
    assert!(convert_ingredient(&pinch, UnitSystem::Metric).is_none());
    assert!(convert_to_metric_base("a few", "cups").is_none());
}
