//! Turns raw OCR or PDF text into a [`Recipe`].
//!
//! There is no markup to anchor on, so the text is segmented line by line:
//! headings split it into sections, list markers and blank lines split the
//! instructions into steps. Unparsable input never fails; it degrades to
//! empty fields and the [`UNTITLED_RECIPE`] title.

mod heuristics;

use heuristics::{
    has_list_marker, is_ingredients_heading, is_instructions_heading, is_metadata_line, is_noise,
    is_section_heading, is_terminator_heading, labelled_servings, labelled_times,
    strip_list_marker, strip_title_prefix,
};
use log::debug;

use crate::model::{Ingredient, Recipe, DEFAULT_CATEGORY, UNTITLED_RECIPE};
use crate::normalize::{collapse_whitespace, derive_additional_time, parse_ingredient_text_lenient};

struct Sections {
    /// Index of the "Ingredients" heading, if any
    ingredients: Option<usize>,
    /// Index of the first instructions heading after the ingredients heading
    instructions: Option<usize>,
}

impl Sections {
    fn locate(lines: &[&str]) -> Self {
        let ingredients = lines.iter().position(|line| is_ingredients_heading(line));
        let search_from = ingredients.map_or(0, |i| i + 1);
        let instructions = lines[search_from..]
            .iter()
            .position(|line| is_instructions_heading(line))
            .map(|offset| offset + search_from);
        Self {
            ingredients,
            instructions,
        }
    }
}

/// Builds a recipe from extracted text.
pub fn parse_recipe_from_text(text: &str) -> Recipe {
    let lines: Vec<&str> = text.lines().collect();
    let sections = Sections::locate(&lines);
    debug!(
        "Text parser: {} lines, ingredients heading at {:?}, instructions heading at {:?}",
        lines.len(),
        sections.ingredients,
        sections.instructions
    );

    let title = find_title(&lines);
    let title_index = title.as_ref().map(|(index, _)| *index);

    let (prep_time, cook_time, total_time) = labelled_times(text);
    let additional_time = total_time
        .map(|total| derive_additional_time(total, prep_time, cook_time))
        .unwrap_or(0);

    Recipe {
        title: title
            .map(|(_, title)| title)
            .unwrap_or_else(|| UNTITLED_RECIPE.to_string()),
        description: find_description(&lines, title_index, &sections),
        category: DEFAULT_CATEGORY.to_string(),
        prep_time,
        cook_time,
        additional_time,
        servings: labelled_servings(text),
        ingredients: find_ingredients(&lines, title_index, &sections),
        instructions: find_instructions(&lines, &sections),
        ..Default::default()
    }
}

fn find_title(lines: &[&str]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(index, line)| {
        let line = line.trim();
        let meaningful = line.chars().count() >= 3
            && line.chars().any(char::is_alphabetic)
            && !is_noise(line)
            && !is_section_heading(line)
            && !is_metadata_line(line);
        if !meaningful {
            return None;
        }

        let title = collapse_whitespace(strip_title_prefix(line));
        (!title.is_empty()).then_some((index, title))
    })
}

fn find_description(lines: &[&str], title: Option<usize>, sections: &Sections) -> String {
    let (Some(title), Some(ingredients)) = (title, sections.ingredients) else {
        return String::new();
    };
    if title >= ingredients {
        return String::new();
    }

    let parts: Vec<String> = lines[title + 1..ingredients]
        .iter()
        .map(|line| collapse_whitespace(line))
        .filter(|line| !line.is_empty() && !is_metadata_line(line))
        .collect();
    parts.join(" ")
}

fn find_ingredients(lines: &[&str], title: Option<usize>, sections: &Sections) -> Vec<Ingredient> {
    let candidates: Vec<(usize, &str)> = match sections.ingredients {
        Some(heading) => lines
            .iter()
            .enumerate()
            .skip(heading + 1)
            .take_while(|(_, line)| !is_instructions_heading(line) && !is_terminator_heading(line))
            .map(|(index, line)| (index, *line))
            .collect(),
        // Without a heading everything ahead of the instructions is a candidate
        None => {
            let end = sections.instructions.unwrap_or(lines.len());
            lines[..end]
                .iter()
                .enumerate()
                .filter(|(index, line)| {
                    Some(*index) != title && !is_section_heading(line) && !is_metadata_line(line)
                })
                .map(|(index, line)| (index, *line))
                .collect()
        }
    };

    candidates
        .into_iter()
        .map(|(_, line)| collapse_whitespace(strip_list_marker(line)))
        .filter(|line| !line.is_empty())
        .map(|line| parse_ingredient_text_lenient(&line))
        .filter(Ingredient::is_valid)
        .collect()
}

fn find_instructions(lines: &[&str], sections: &Sections) -> Vec<String> {
    let Some(heading) = sections.instructions else {
        return Vec::new();
    };

    let mut steps: Vec<String> = Vec::new();
    let mut current = String::new();
    // Set by a blank line or a list marker, cleared by the next line with content
    let mut step_pending = false;

    for line in &lines[heading + 1..] {
        if is_terminator_heading(line) {
            break;
        }
        if line.trim().is_empty() {
            step_pending = true;
            continue;
        }

        step_pending |= has_list_marker(line);

        // A marker alone on its line ("1.") opens the step that follows it
        let content = collapse_whitespace(strip_list_marker(line));
        if content.is_empty() {
            continue;
        }

        if step_pending && !current.is_empty() {
            steps.push(std::mem::take(&mut current));
        }
        step_pending = false;
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&content);
    }

    if !current.is_empty() {
        steps.push(current);
    }
    steps
}
