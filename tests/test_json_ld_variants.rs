use recipe_importer::{parse_html, parse_json_ld, Ingredient};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
        json_ld
    )
}

const URL: &str = "https://example.com/recipe";

#[test]
fn test_case_insensitive_type() {
    let html = create_recipe_html(r#"{"@type": "recipe", "name": "Lowercase"}"#);
    assert_eq!(parse_json_ld(&html, URL).unwrap().title, "Lowercase");
}

#[test]
fn test_non_recipe_document() {
    let html = create_recipe_html(r#"{"@type": "Article", "name": "News"}"#);
    assert!(parse_json_ld(&html, URL).is_none());
}

#[test]
fn test_missing_ingredients_is_partial_record() {
    let html = create_recipe_html(
        r#"{"@type": "Recipe", "name": "Mystery Dish", "recipeInstructions": ["Improvise."]}"#,
    );
    let recipe = parse_json_ld(&html, URL).unwrap();
    assert_eq!(recipe.title, "Mystery Dish");
    assert!(recipe.ingredients.is_empty());
    assert_eq!(recipe.instructions, vec!["Improvise."]);
}

#[test]
fn test_no_instructions() {
    let html = create_recipe_html(
        r#"{"@type": "Recipe", "name": "Assembly Only", "recipeIngredient": ["1 cup berries"]}"#,
    );
    let recipe = parse_json_ld(&html, URL).unwrap();
    assert!(recipe.instructions.is_empty());
    assert_eq!(recipe.ingredients, vec![Ingredient::new("1", "cups", "berries")]);
}

#[test]
fn test_unexpected_field_shapes_are_ignored() {
    let html = create_recipe_html(
        r#"{
            "@type": "Recipe",
            "name": "Odd Shapes",
            "image": 42,
            "recipeYield": {"value": 3},
            "recipeCategory": {"name": "Dessert"},
            "keywords": null,
            "prepTime": 15,
            "recipeInstructions": {"@type": "ItemList", "itemListElement": [{"text": "Stir."}]}
        }"#,
    );
    let recipe = parse_json_ld(&html, URL).unwrap();
    assert_eq!(recipe.title, "Odd Shapes");
    assert_eq!(recipe.image_url, "");
    assert_eq!(recipe.servings, 0);
    assert_eq!(recipe.category, "Other");
    assert!(recipe.tags.is_empty());
    assert_eq!(recipe.prep_time, 0);
    assert_eq!(recipe.instructions, vec!["Stir."]);
}

#[test]
fn test_ingredient_objects_and_vulgar_fractions() {
    let html = create_recipe_html(
        r#"{
            "@type": "Recipe",
            "name": "Scones",
            "recipeIngredient": [
                {"name": "cups flour", "amount": "2"},
                "1½ tsp baking powder",
                "½ cup cream"
            ]
        }"#,
    );
    let recipe = parse_json_ld(&html, URL).unwrap();
    assert_eq!(
        recipe.ingredients,
        vec![
            Ingredient::new("2", "cups", "flour"),
            Ingredient::new("1½", "tsp", "baking powder"),
            Ingredient::new("½", "cups", "cream"),
        ]
    );
}

#[test]
fn test_german_recipe() {
    let html = create_recipe_html(
        r#"{
            "@type": "Recipe",
            "name": "Kartoffelsalat",
            "recipeCategory": "Beilage",
            "recipeIngredient": ["500 g Kartoffeln", "1 EL Senf"],
            "totalTime": "P0DT1H0M"
        }"#,
    );
    let recipe = parse_json_ld(&html, URL).unwrap();
    assert_eq!(recipe.category, "Beilage");
    assert_eq!(recipe.ingredients[0], Ingredient::new("500", "g", "Kartoffeln"));
    assert_eq!(recipe.ingredients[1], Ingredient::new("1", "EL", "Senf"));
    assert_eq!(recipe.additional_time, 60);
}

#[test]
fn test_html_fallback_never_fails() {
    let recipe = parse_html("", URL);
    assert_eq!(recipe.title, "");
    assert_eq!(recipe.source_url, URL);
}
