use super::{resolve_url, Extractor, ParsingContext};
use crate::model::Recipe;
use crate::normalize::{
    collapse_whitespace, derive_additional_time, map_first_category, parse_ingredient_text,
    parse_servings, parse_time,
};
use html_escape::decode_html_entities;
use log::{debug, info};
use regex::Regex;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

pub struct JsonLdExtractor;

/// Finds the first Schema.org `Recipe` in the page's JSON-LD blocks.
///
/// `source_url` becomes the recipe's `sourceUrl` whenever the structured data
/// carries no `url` of its own.
pub fn parse_json_ld(html: &str, source_url: &str) -> Option<Recipe> {
    JsonLdExtractor.parse(&ParsingContext::new(source_url, html))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonLdRecipe {
    name: Option<TextValue>,
    description: Option<TextValue>,
    url: Option<TextValue>,
    image: Option<ImageType>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<OneOrMany>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<OneOrMany>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TextValue>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TextValue>,
    #[serde(rename = "totalTime")]
    total_time: Option<TextValue>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<InstructionNode>,
    keywords: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    #[serde(alias = "@value")]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    String(String),
    Number(f64),
    Object(TextObject),
    Other(Value),
}

impl TextValue {
    fn into_text(self) -> Option<String> {
        match self {
            TextValue::String(s) => Some(s),
            TextValue::Number(n) => Some(n.to_string()),
            TextValue::Object(obj) => Some(obj.text),
            TextValue::Other(_) => None,
        }
    }

    /// Durations are only read from text; a bare number carries no unit.
    fn into_duration_text(self) -> Option<String> {
        match self {
            TextValue::Number(_) => None,
            value => value.into_text(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    String(String),
    Multiple(Vec<String>),
    Other(Value),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::String(s) => vec![s],
            OneOrMany::Multiple(v) => v,
            OneOrMany::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
    #[serde(rename = "@id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    // potentially a mix of strings and objects
    Multiple(Vec<ImageType>),
    Other(Value),
}

impl ImageType {
    fn first_url(self) -> Option<String> {
        let url = match self {
            ImageType::String(s) => Some(s),
            ImageType::Object(obj) => obj.url.or(obj.id),
            ImageType::Multiple(images) => images.into_iter().find_map(ImageType::first_url),
            ImageType::Other(_) => None,
        };
        url.filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(f64),
    Multiple(Vec<RecipeYield>),
    Other(Value),
}

impl RecipeYield {
    fn servings(&self) -> u32 {
        match self {
            RecipeYield::String(s) => parse_servings(s),
            RecipeYield::Number(n) if *n >= 0.0 => *n as u32,
            RecipeYield::Multiple(values) => values
                .iter()
                .map(RecipeYield::servings)
                .find(|servings| *servings > 0)
                .unwrap_or(0),
            _ => 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientEntry {
    Line(String),
    Object(IngredientObject),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Multiple(Vec<IngredientEntry>),
    Single(String),
    Other(Value),
}

impl RecipeIngredients {
    fn into_lines(self) -> Vec<String> {
        let entries = match self {
            RecipeIngredients::Multiple(entries) => entries,
            RecipeIngredients::Single(line) => vec![IngredientEntry::Line(line)],
            RecipeIngredients::Other(_) => Vec::new(),
        };

        entries
            .into_iter()
            .filter_map(|entry| match entry {
                IngredientEntry::Line(line) => Some(line),
                IngredientEntry::Object(obj) => {
                    let amount = obj.amount.and_then(TextValue::into_text).unwrap_or_default();
                    Some(format!("{} {}", amount.trim(), obj.name))
                }
                IngredientEntry::Other(_) => None,
            })
            .map(|line| clean_text(&line))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Box<InstructionNode>,
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

/// `recipeInstructions` as sites actually publish it: a string, a list of
/// strings, `HowToStep` objects, or `HowToSection`s nesting any of these.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionNode {
    Text(String),
    // Must precede Step: a step object matches any map
    Section(HowToSection),
    Step(HowToStep),
    List(Vec<InstructionNode>),
    Other(Value),
}

impl InstructionNode {
    fn collect_steps(self, steps: &mut Vec<String>) {
        match self {
            InstructionNode::Text(text) => steps.extend(split_steps(&text)),
            InstructionNode::Section(section) => section.item_list_element.collect_steps(steps),
            InstructionNode::Step(step) => {
                // Prefer text over name
                if let Some(text) = step.text.or(step.name).or(step.description) {
                    steps.extend(split_steps(&text));
                }
            }
            InstructionNode::List(nodes) => {
                for node in nodes {
                    node.collect_steps(steps);
                }
            }
            InstructionNode::Other(_) => {}
        }
    }
}

static BLOCK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*(?:br\s*/?|/p|/li|/div)\s*>").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").unwrap());

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Decoded, tag-free, single-line text.
fn clean_text(text: &str) -> String {
    let decoded = decode_html_symbols(text);
    collapse_whitespace(&TAG_RE.replace_all(&decoded, " "))
}

/// One step per line of a plain-text instruction block.
fn split_steps(text: &str) -> Vec<String> {
    let decoded = decode_html_symbols(text);
    let with_breaks = BLOCK_TAG_RE.replace_all(&decoded, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, " ");
    stripped
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// First recipe node: `@graph` members, then top-level array members, then
/// the document itself.
fn find_recipe(value: &Value) -> Option<&Value> {
    if let Some(found) = value
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find_map(find_recipe))
    {
        return Some(found);
    }

    if let Some(items) = value.as_array() {
        return items.iter().find_map(find_recipe);
    }

    is_recipe_type(value).then_some(value)
}

/// Blocks that fail to parse get one retry after light cleanup.
fn parse_script(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<Value>(raw.trim()).or_else(|_| serde_json::from_str(&sanitize_json(raw)))
}

fn sanitize_json(json_str: &str) -> String {
    let without_wrappers = json_str
        .replace("<![CDATA[", "")
        .replace("]]>", "")
        .replace("<!--", "")
        .replace("-->", "");

    // Raw control characters are invalid inside JSON strings
    let without_controls: String = without_wrappers
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    TRAILING_COMMA_RE
        .replace_all(without_controls.trim(), "$1")
        .into_owned()
}

impl JsonLdExtractor {
    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe, url: &str) -> Recipe {
        let time = |value: Option<TextValue>| {
            let text = value.and_then(TextValue::into_duration_text);
            (text.is_some(), parse_time(text.as_deref()))
        };
        let (_, prep_time) = time(json_ld_recipe.prep_time);
        let (_, cook_time) = time(json_ld_recipe.cook_time);
        let (has_total, total_time) = time(json_ld_recipe.total_time);
        let additional_time = if has_total {
            derive_additional_time(total_time, prep_time, cook_time)
        } else {
            0
        };

        // Cuisine stands in when the page declares no category
        let categories = json_ld_recipe
            .recipe_category
            .map(OneOrMany::into_vec)
            .filter(|v| !v.is_empty())
            .or_else(|| json_ld_recipe.recipe_cuisine.map(OneOrMany::into_vec))
            .unwrap_or_default()
            .into_iter()
            .map(|c| clean_text(&c))
            .collect::<Vec<_>>();

        let source_url = json_ld_recipe
            .url
            .and_then(TextValue::into_text)
            .map(|own| resolve_url(url, &own))
            .filter(|own| !own.is_empty())
            .unwrap_or_else(|| url.to_string());

        let image_url = json_ld_recipe
            .image
            .and_then(ImageType::first_url)
            .map(|img| resolve_url(url, &decode_html_symbols(&img)))
            .unwrap_or_default();

        let ingredients = json_ld_recipe
            .recipe_ingredient
            .map(RecipeIngredients::into_lines)
            .unwrap_or_default()
            .iter()
            .map(|line| parse_ingredient_text(line))
            .filter(|ingredient| ingredient.is_valid())
            .collect();

        let mut instructions = Vec::new();
        if let Some(node) = json_ld_recipe.recipe_instructions {
            node.collect_steps(&mut instructions);
        }

        let keywords = match json_ld_recipe.keywords {
            Some(OneOrMany::String(keywords)) => {
                keywords.split(',').map(String::from).collect()
            }
            Some(other) => other.into_vec(),
            None => Vec::new(),
        };
        let tags = keywords
            .iter()
            .map(|keyword| clean_text(keyword))
            .filter(|tag| !tag.is_empty())
            .collect();

        Recipe {
            title: json_ld_recipe
                .name
                .and_then(TextValue::into_text)
                .map(|name| clean_text(&name))
                .unwrap_or_default(),
            description: json_ld_recipe
                .description
                .and_then(TextValue::into_text)
                .map(|desc| clean_text(&desc))
                .unwrap_or_default(),
            category: map_first_category(&categories[..]),
            prep_time,
            cook_time,
            additional_time,
            servings: json_ld_recipe
                .recipe_yield
                .map(|y| y.servings())
                .unwrap_or(0),
            image_url,
            source_url,
            ingredients,
            instructions,
            tags,
        }
    }
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn parse(&self, context: &ParsingContext) -> Option<Recipe> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;

        let recipe = context
            .document
            .select(&selector)
            .enumerate()
            .filter_map(|(index, script)| {
                let raw_json = script.text().collect::<String>();
                match parse_script(&raw_json) {
                    Ok(json_ld) => Some(json_ld),
                    Err(e) => {
                        debug!("JsonLdExtractor: Skipping malformed block {}: {}", index, e);
                        None
                    }
                }
            })
            .find_map(|json_ld| {
                let node = find_recipe(&json_ld)?;
                match JsonLdRecipe::deserialize(node) {
                    Ok(recipe) => Some(self.convert_to_recipe(recipe, &context.url)),
                    Err(e) => {
                        debug!("JsonLdExtractor: Recipe node did not deserialize: {}", e);
                        None
                    }
                }
            });

        match &recipe {
            Some(found) => info!("JsonLdExtractor: Found recipe '{}'", found.title),
            None => debug!("JsonLdExtractor: No valid recipe found in any JSON-LD script"),
        }
        recipe
    }
}
