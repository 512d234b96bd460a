use super::{element_text, resolve_url, Extractor, ParsingContext};
use crate::model::{Recipe, DEFAULT_CATEGORY};
use crate::normalize::parse_ingredient_text;
use log::debug;
use scraper::{Html, Selector};

/// Longest element text accepted as a field value; anything larger is a
/// page wrapper that happened to match.
const MAX_FIELD_TEXT: usize = 5000;

/// Recipe fields the fallback extractor can recover from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Image,
    Ingredients,
    Instructions,
}

/// A single guess at where a field lives in the DOM. Returns `None` when the
/// guess does not match, so the next strategy for the field is tried.
pub trait FieldStrategy: Send + Sync {
    fn extract(&self, document: &Html) -> Option<Vec<String>>;
}

/// Text content of every element matching a CSS selector.
pub struct SelectorText {
    pub css: &'static str,
}

/// One attribute (`src`, `content`, ...) of every element matching a selector.
pub struct SelectorAttr {
    pub css: &'static str,
    pub attr: &'static str,
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("HtmlFallbackExtractor: Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

impl FieldStrategy for SelectorText {
    fn extract(&self, document: &Html) -> Option<Vec<String>> {
        let selector = parse_selector(self.css)?;
        let values = document
            .select(&selector)
            .map(|element| element_text(&element))
            .filter(|text| !text.is_empty() && text.len() <= MAX_FIELD_TEXT)
            .collect();
        non_empty(values)
    }
}

impl FieldStrategy for SelectorAttr {
    fn extract(&self, document: &Html) -> Option<Vec<String>> {
        let selector = parse_selector(self.css)?;
        let values = document
            .select(&selector)
            .filter_map(|element| element.value().attr(self.attr))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        non_empty(values)
    }
}

fn text(css: &'static str) -> Box<dyn FieldStrategy> {
    Box::new(SelectorText { css })
}

fn attr(css: &'static str, attr: &'static str) -> Box<dyn FieldStrategy> {
    Box::new(SelectorAttr { css, attr })
}

/// Recovers a recipe from conventional markup when a page carries no
/// structured data.
///
/// Each field has an ordered cascade of strategies; the first one that
/// matches wins. Microdata comes first, then the class names used by the
/// common WordPress recipe plugins, then generic page metadata.
pub struct HtmlFallbackExtractor {
    strategies: Vec<(Field, Box<dyn FieldStrategy>)>,
}

impl Default for HtmlFallbackExtractor {
    fn default() -> Self {
        let strategies = vec![
            (Field::Title, text("h1[itemprop='name']")),
            (Field::Title, text("[itemtype*='Recipe'] [itemprop='name']")),
            (Field::Title, text(".wprm-recipe-name")),
            (Field::Title, text(".tasty-recipes-title")),
            (Field::Title, text(".recipe-title")),
            (Field::Title, text(".recipe-name")),
            (Field::Title, attr("meta[property='og:title']", "content")),
            (Field::Title, text("h1")),
            (Field::Description, text("[itemtype*='Recipe'] [itemprop='description']")),
            (Field::Description, text(".wprm-recipe-summary")),
            (Field::Description, text(".tasty-recipes-description")),
            (Field::Description, text(".recipe-summary")),
            (Field::Description, text(".recipe-description")),
            (Field::Description, attr("meta[name='description']", "content")),
            (Field::Description, attr("meta[property='og:description']", "content")),
            (Field::Image, attr("img[itemprop='image']", "src")),
            (Field::Image, attr("[itemprop='image']", "content")),
            (Field::Image, attr(".wprm-recipe-image img", "src")),
            (Field::Image, attr(".recipe-image img", "src")),
            (Field::Image, attr("meta[property='og:image']", "content")),
            (Field::Ingredients, text("[itemprop='recipeIngredient']")),
            (Field::Ingredients, text("[itemprop='ingredients']")),
            (Field::Ingredients, text(".wprm-recipe-ingredient")),
            (Field::Ingredients, text(".tasty-recipes-ingredients li")),
            (Field::Ingredients, text(".recipe-ingredients li")),
            (Field::Ingredients, text(".ingredients li")),
            (Field::Instructions, text("[itemprop='recipeInstructions'] li")),
            (Field::Instructions, text("[itemprop='recipeInstructions']")),
            (Field::Instructions, text(".wprm-recipe-instruction-text")),
            (Field::Instructions, text(".tasty-recipes-instructions li")),
            (Field::Instructions, text(".recipe-instructions li")),
            (Field::Instructions, text(".instructions li")),
            (Field::Instructions, text(".directions li")),
            (Field::Instructions, text(".recipe-instructions p")),
        ];
        Self { strategies }
    }
}

impl HtmlFallbackExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a strategy that is tried before the built-in ones for `field`.
    pub fn with_strategy(mut self, field: Field, strategy: Box<dyn FieldStrategy>) -> Self {
        self.strategies.insert(0, (field, strategy));
        self
    }

    fn find(&self, document: &Html, field: Field) -> Vec<String> {
        self.strategies
            .iter()
            .filter(|(candidate, _)| *candidate == field)
            .find_map(|(_, strategy)| strategy.extract(document))
            .unwrap_or_default()
    }

    fn find_first(&self, document: &Html, field: Field) -> String {
        self.find(document, field)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Always produces a record; an empty title means nothing was found.
    pub fn extract(&self, context: &ParsingContext) -> Recipe {
        let document = &context.document;

        let image_url = resolve_url(&context.url, &self.find_first(document, Field::Image));
        let ingredients = self
            .find(document, Field::Ingredients)
            .iter()
            .map(|line| parse_ingredient_text(line))
            .filter(|ingredient| ingredient.is_valid())
            .collect();

        Recipe {
            title: self.find_first(document, Field::Title),
            description: self.find_first(document, Field::Description),
            category: DEFAULT_CATEGORY.to_string(),
            image_url,
            source_url: context.url.clone(),
            ingredients,
            instructions: self.find(document, Field::Instructions),
            ..Default::default()
        }
    }
}

impl Extractor for HtmlFallbackExtractor {
    fn name(&self) -> &'static str {
        "html_fallback"
    }

    fn parse(&self, context: &ParsingContext) -> Option<Recipe> {
        debug!("HtmlFallbackExtractor: Starting parse for URL: {}", context.url);
        Some(self.extract(context))
    }
}

/// Selector-based extraction for pages without a JSON-LD recipe.
pub fn parse_html(html: &str, source_url: &str) -> Recipe {
    HtmlFallbackExtractor::default().extract(&ParsingContext::new(source_url, html))
}
