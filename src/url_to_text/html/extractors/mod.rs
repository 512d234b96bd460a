use crate::model::Recipe;
use scraper::{ElementRef, Html};
use url::Url;

mod html_fallback;
mod json_ld;

pub use html_fallback::{
    parse_html, Field, FieldStrategy, HtmlFallbackExtractor, SelectorAttr, SelectorText,
};
pub use json_ld::{parse_json_ld, JsonLdExtractor};

pub struct ParsingContext {
    /// Page the document was fetched from; also the recipe's source URL
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// One way of turning a page into a recipe. `None` means "not found here",
/// so the next extractor in line gets a chance.
pub trait Extractor {
    fn name(&self) -> &'static str;
    fn parse(&self, context: &ParsingContext) -> Option<Recipe>;
}

/// Resolves a possibly relative or protocol-relative reference against the
/// page URL. Returns an empty string when no absolute http(s) URL results.
pub(crate) fn resolve_url(base: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() {
        return String::new();
    }

    let resolved = match Url::parse(reference) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(base).ok().and_then(|base| base.join(reference).ok())
        }
        Err(_) => None,
    };

    resolved
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
        .unwrap_or_default()
}

/// Whitespace-collapsed text content of an element.
pub(crate) fn element_text(element: &ElementRef) -> String {
    let text = element.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
