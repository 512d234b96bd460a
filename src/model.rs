use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::normalize::units;

/// Title used by the text parser when no meaningful line could be found.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Category used when a source provides none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A recipe as produced by the import pipelines, before it is persisted.
///
/// Field names serialize exactly as the storage and UI layers expect them
/// (`prepTime`, `imageUrl`, ...). Partial records are valid: only a missing
/// title is treated as an extraction failure by the pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub category: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub additional_time: u32,
    pub servings: u32,
    pub image_url: String,
    pub source_url: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            title: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            prep_time: 0,
            cook_time: 0,
            additional_time: 0,
            servings: 0,
            image_url: String::new(),
            source_url: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl Recipe {
    /// Returns a copy with every ingredient re-expressed in `system` where a
    /// conversion applies. The receiver keeps its original units.
    pub fn display_in(&self, system: UnitSystem) -> Recipe {
        Recipe {
            ingredients: self
                .ingredients
                .iter()
                .map(|ingredient| ingredient.display_in(system))
                .collect(),
            ..self.clone()
        }
    }
}

/// One ingredient line. `quantity` stays textual ("to taste", "1 1/2").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(
        quantity: impl Into<String>,
        unit: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Ingredient {
            quantity: quantity.into(),
            unit: unit.into(),
            name: name.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Presentation copy in the requested unit system; falls back to a plain
    /// clone when no conversion applies.
    pub fn display_in(&self, system: UnitSystem) -> Ingredient {
        match units::convert_ingredient(self, system) {
            Some(converted) => Ingredient {
                quantity: converted.quantity,
                unit: converted.unit,
                name: self.name.clone(),
            },
            None => self.clone(),
        }
    }
}

/// Quantity and unit after a display conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedQuantity {
    pub quantity: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
    /// Countable items and unrecognized units; never converted.
    Neutral,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            "neutral" => Ok(UnitSystem::Neutral),
            other => Err(format!("unknown unit system: {other}")),
        }
    }
}
