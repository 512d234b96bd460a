//! Recipe import and normalization.
//!
//! Web pages, pasted text and OCR'd documents all end up in the same
//! [`Recipe`] shape, ready for a person to review before it is saved.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), recipe_importer::ImportError> {
//! let recipe = recipe_importer::fetch_recipe("https://example.com/banana-bread").await?;
//! println!("{} ({} ingredients)", recipe.title, recipe.ingredients.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod images_to_text;
pub mod model;
pub mod normalize;
pub mod pipelines;
pub mod text_to_recipe;
pub mod url_to_text;

use std::time::Duration;

pub use builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::{load_config, ImportConfig};
pub use error::ImportError;
pub use images_to_text::{GoogleVisionBackend, OcrBackend, PlainTextBackend};
pub use model::{ConvertedQuantity, Ingredient, Recipe, UnitSystem};
pub use text_to_recipe::parse_recipe_from_text;
pub use url_to_text::html::extractors::{parse_html, parse_json_ld};

/// Import a recipe from a URL with the default 10 second timeout.
pub async fn fetch_recipe(url: &str) -> Result<Recipe, ImportError> {
    fetch_recipe_with_timeout(url, None).await
}

/// Import a recipe from a URL.
///
/// # Arguments
/// * `url` - The page to import
/// * `timeout` - Fetch timeout; `None` uses the configured default
pub async fn fetch_recipe_with_timeout(
    url: &str,
    timeout: Option<Duration>,
) -> Result<Recipe, ImportError> {
    let mut builder = RecipeImporter::builder().url(url);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().await
}

/// Parse recipe text that was already extracted from a document.
///
/// Fails with [`ImportError::NoRecipeFound`] when no title could be found.
pub fn parse_recipe_text(text: &str) -> Result<Recipe, ImportError> {
    pipelines::text::process(text)
}
