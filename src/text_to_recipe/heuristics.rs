//! Line classifiers for OCR and PDF text.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::{parse_servings, parse_time};

static INGREDIENTS_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:ingredients?|ingredient list|what you(?:'ll)? need|you will need)\s*:?\s*$")
        .unwrap()
});

static INSTRUCTIONS_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:instructions?|directions?|method|preparation|steps?|how to make(?: it)?)\s*:?\s*$",
    )
    .unwrap()
});

// "Notes: ..." and "Source: example.com" end the instructions too
static TERMINATOR_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:notes?|tips?|nutrition(?:\s+\w+)*|source)\s*(?::.*)?$").unwrap()
});

static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:prep(?:aration)?|cook(?:ing)?|bake|total)\s*time|serves|servings|yields?|makes)\b",
    )
    .unwrap()
});

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[•\-*·◦▪▫+«»]+|\d+\)|\d+\.(?:\s|$))\s*").unwrap()
});

static TITLE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:recipe|title)\s*:\s*").unwrap());

const DURATION: &str = r"(\d+(?:\.\d+)?\s*(?:hours?|hrs?|h|minutes?|mins?|m)\b(?:\s*(?:and\s*)?\d+\s*(?:minutes?|mins?|m)\b)?)";

static PREP_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bprep(?:aration)?\s*time\s*:?\s*{DURATION}")).unwrap()
});

static COOK_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:cook(?:ing)?|bake)\s*time\s*:?\s*{DURATION}")).unwrap()
});

static TOTAL_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\btotal\s*time\s*:?\s*{DURATION}")).unwrap()
});

static SERVINGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:serves|servings|yields?|makes)\s*:?\s*(\d+)").unwrap()
});

pub fn is_ingredients_heading(line: &str) -> bool {
    INGREDIENTS_HEADING_RE.is_match(line)
}

pub fn is_instructions_heading(line: &str) -> bool {
    INSTRUCTIONS_HEADING_RE.is_match(line)
}

pub fn is_terminator_heading(line: &str) -> bool {
    TERMINATOR_HEADING_RE.is_match(line)
}

pub fn is_section_heading(line: &str) -> bool {
    is_ingredients_heading(line) || is_instructions_heading(line) || is_terminator_heading(line)
}

/// Time or yield lines such as "Prep time: 10 min" or "Serves 4".
pub fn is_metadata_line(line: &str) -> bool {
    METADATA_RE.is_match(line)
}

/// OCR garbage: only one- or two-letter fragments, or mostly symbols.
pub fn is_noise(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.iter().all(|word| word.chars().count() <= 2) {
        return true;
    }

    let visible = line.chars().filter(|c| !c.is_whitespace()).count();
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    letters * 2 < visible
}

pub fn has_list_marker(line: &str) -> bool {
    LIST_MARKER_RE.is_match(line)
}

pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER_RE.find(line) {
        Some(marker) => line[marker.end()..].trim(),
        None => line.trim(),
    }
}

pub fn strip_title_prefix(line: &str) -> &str {
    match TITLE_PREFIX_RE.find(line) {
        Some(prefix) => line[prefix.end()..].trim(),
        None => line.trim(),
    }
}

/// Labelled times found anywhere in the text, in minutes: (prep, cook, total).
/// A missing total is `None` so no additional time gets derived from it.
pub fn labelled_times(text: &str) -> (u32, u32, Option<u32>) {
    let find = |re: &Regex| {
        re.captures(text)
            .map(|caps| parse_time(caps.get(1).map(|m| m.as_str())))
    };
    (
        find(&PREP_TIME_RE).unwrap_or(0),
        find(&COOK_TIME_RE).unwrap_or(0),
        find(&TOTAL_TIME_RE),
    )
}

pub fn labelled_servings(text: &str) -> u32 {
    SERVINGS_RE
        .captures(text)
        .map(|caps| parse_servings(&caps[1]))
        .unwrap_or(0)
}
