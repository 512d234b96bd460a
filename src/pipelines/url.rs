use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::Recipe;
use crate::url_to_text::fetchers::{validate_url, RequestFetcher};
use crate::url_to_text::html::extractors::{
    Extractor, HtmlFallbackExtractor, JsonLdExtractor, ParsingContext,
};
use log::{debug, info};

/// Import a recipe from a web page
///
/// This pipeline:
/// 1. Validates the URL (http/https only) before any network access
/// 2. Fetches the HTML with the configured timeout
/// 3. Tries the JSON-LD extractor, then the HTML fallback extractor
/// 4. Rejects the result if it has no title
///
/// # Arguments
/// * `url` - The page to import
/// * `config` - Timeout and user agent for the fetch
///
/// # Returns
/// * `Ok(Recipe)` - The extracted recipe, possibly with empty fields
/// * `Err(ImportError)` - Invalid URL, transport failure or no recipe found
pub async fn process(url: &str, config: &ImportConfig) -> Result<Recipe, ImportError> {
    let source_url = url.trim();
    let parsed = validate_url(source_url)?;

    let fetcher = RequestFetcher::new(Some(config.timeout_duration()), Some(&config.user_agent))?;
    let html = fetcher.fetch(&parsed).await?;

    extract_recipe(&html, source_url)
}

/// Runs the extractors over an already fetched page.
///
/// The first extractor that recognizes the page wins; extraction then fails
/// only if that recipe has no title.
pub fn extract_recipe(html: &str, source_url: &str) -> Result<Recipe, ImportError> {
    let context = ParsingContext::new(source_url, html);

    let extractors: Vec<Box<dyn Extractor>> = vec![
        Box::new(JsonLdExtractor),
        Box::new(HtmlFallbackExtractor::default()),
    ];

    let recipe = extractors.iter().find_map(|extractor| {
        let recipe = extractor.parse(&context)?;
        debug!("Extractor {} matched {}", extractor.name(), source_url);
        Some(recipe)
    });

    match recipe {
        Some(recipe) if !recipe.title.trim().is_empty() => {
            info!("Extracted recipe '{}' from {}", recipe.title, source_url);
            Ok(recipe)
        }
        _ => Err(ImportError::NoRecipeFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_preferred_over_markup() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">{"@type": "Recipe", "name": "Structured"}</script>
            </head><body><h1>Page Heading</h1></body></html>
        "#;
        let recipe = extract_recipe(html, "https://example.com/r").unwrap();
        assert_eq!(recipe.title, "Structured");
    }

    #[test]
    fn test_fallback_used_without_json_ld() {
        let html = "<html><body><h1>Lentil Soup</h1></body></html>";
        let recipe = extract_recipe(html, "https://example.com/soup").unwrap();
        assert_eq!(recipe.title, "Lentil Soup");
        assert_eq!(recipe.source_url, "https://example.com/soup");
    }

    #[test]
    fn test_untitled_page_is_extraction_failure() {
        let html = "<html><body><p>Just a blog post.</p></body></html>";
        let err = extract_recipe(html, "https://example.com/post").unwrap_err();
        assert!(matches!(err, ImportError::NoRecipeFound));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_fetch() {
        let err = process("not a url", &ImportConfig::default()).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidUrl(_)));
    }
}
