use crate::error::ImportError;
use crate::model::{Recipe, UNTITLED_RECIPE};
use crate::text_to_recipe::parse_recipe_from_text;
use log::info;

/// Parse extracted recipe text
///
/// The parser itself never fails; a result that only carries the
/// placeholder title is reported as [`ImportError::NoRecipeFound`].
pub fn process(text: &str) -> Result<Recipe, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::InvalidInput(
            "Recipe text cannot be empty".to_string(),
        ));
    }

    let recipe = parse_recipe_from_text(text);
    if recipe.title == UNTITLED_RECIPE {
        return Err(ImportError::NoRecipeFound);
    }

    info!(
        "Parsed recipe '{}' with {} ingredients and {} steps",
        recipe.title,
        recipe.ingredients.len(),
        recipe.instructions.len()
    );
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(matches!(process("  \n "), Err(ImportError::InvalidInput(_))));
    }

    #[test]
    fn test_placeholder_title_is_failure() {
        assert!(matches!(process("12\n--\n"), Err(ImportError::NoRecipeFound)));
    }

    #[test]
    fn test_titled_text() {
        let recipe = process("Oat Cookies\nIngredients\n2 cups oats").unwrap();
        assert_eq!(recipe.title, "Oat Cookies");
        assert_eq!(recipe.ingredients.len(), 1);
    }
}
