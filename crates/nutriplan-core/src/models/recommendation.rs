// ABOUTME: Structured recommendation record with meal and activity lists
// ABOUTME: Items accept either a bare name or a detailed object when decoded from model output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// A nutritional or duration value given either as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    /// Plain number, unit implied by the field
    Number(f64),
    /// Free text such as "1 cup" or "30 min"
    Text(String),
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One recommended dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MealItemRepr")]
pub struct MealItem {
    /// Dish name
    pub name: String,
    /// Serving size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Measure>,
    /// Energy in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<Measure>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<Measure>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<Measure>,
    /// Fats in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<Measure>,
}

impl MealItem {
    /// Create an item carrying only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            calories: None,
            protein: None,
            carbs: None,
            fats: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MealItemRepr {
    Name(String),
    Detailed {
        #[serde(alias = "item", alias = "dish")]
        name: String,
        #[serde(default)]
        quantity: Option<Measure>,
        #[serde(default)]
        calories: Option<Measure>,
        #[serde(default)]
        protein: Option<Measure>,
        #[serde(default)]
        carbs: Option<Measure>,
        #[serde(default)]
        fats: Option<Measure>,
    },
}

impl From<MealItemRepr> for MealItem {
    fn from(repr: MealItemRepr) -> Self {
        match repr {
            MealItemRepr::Name(name) => Self::named(name),
            MealItemRepr::Detailed {
                name,
                quantity,
                calories,
                protein,
                carbs,
                fats,
            } => Self {
                name,
                quantity,
                calories,
                protein,
                carbs,
                fats,
            },
        }
    }
}

/// One recommended yoga pose or workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActivityItemRepr")]
pub struct ActivityItem {
    /// Activity name
    pub name: String,
    /// Session length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Measure>,
    /// Estimated energy expenditure in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<Measure>,
}

impl ActivityItem {
    /// Create an item carrying only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            calories_burned: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityItemRepr {
    Name(String),
    Detailed {
        #[serde(alias = "activity", alias = "exercise")]
        name: String,
        #[serde(default)]
        duration: Option<Measure>,
        #[serde(default)]
        calories_burned: Option<Measure>,
    },
}

impl From<ActivityItemRepr> for ActivityItem {
    fn from(repr: ActivityItemRepr) -> Self {
        match repr {
            ActivityItemRepr::Name(name) => Self::named(name),
            ActivityItemRepr::Detailed {
                name,
                duration,
                calories_burned,
            } => Self {
                name,
                duration,
                calories_burned,
            },
        }
    }
}

/// Complete meal and activity recommendation for one profile
///
/// `breakfast`, `lunch`, `dinner` and `workouts` are required when decoding;
/// `yoga` is optional and defaults to empty. All five keys are always
/// serialized so renderers never meet a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Breakfast dishes
    pub breakfast: Vec<MealItem>,
    /// Lunch dishes
    pub lunch: Vec<MealItem>,
    /// Dinner dishes
    pub dinner: Vec<MealItem>,
    /// Yoga poses
    #[serde(default)]
    pub yoga: Vec<ActivityItem>,
    /// Workouts
    pub workouts: Vec<ActivityItem>,
}

impl RecommendationRecord {
    /// Top-level keys every decoded record must carry
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["breakfast", "lunch", "dinner", "workouts"];

    /// Top-level keys a decoded record may carry
    pub const OPTIONAL_FIELDS: [&'static str; 1] = ["yoga"];

    /// Record with every list empty
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
            yoga: Vec::new(),
            workouts: Vec::new(),
        }
    }

    /// Whether every list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breakfast.is_empty()
            && self.lunch.is_empty()
            && self.dinner.is_empty()
            && self.yoga.is_empty()
            && self.workouts.is_empty()
    }
}

impl Default for RecommendationRecord {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_decode_from_names_and_objects() {
        let record: RecommendationRecord = serde_json::from_value(serde_json::json!({
            "breakfast": ["Oats", {"name": "Idli", "quantity": "3 pieces", "calories": 180}],
            "lunch": [{"item": "Dal", "protein": 9.5}],
            "dinner": ["Salad"],
            "workouts": [{"activity": "Walking", "duration": "30 min", "calories_burned": 150}]
        }))
        .unwrap();

        assert_eq!(record.breakfast[0], MealItem::named("Oats"));
        assert_eq!(record.breakfast[1].quantity, Some(Measure::Text("3 pieces".to_owned())));
        assert_eq!(record.breakfast[1].calories, Some(Measure::Number(180.0)));
        assert_eq!(record.lunch[0].name, "Dal");
        assert!(record.yoga.is_empty());
        assert_eq!(record.workouts[0].name, "Walking");
    }

    #[test]
    fn test_empty_record_serializes_every_key() {
        let value = serde_json::to_value(RecommendationRecord::empty()).unwrap();
        for key in RecommendationRecord::REQUIRED_FIELDS
            .iter()
            .chain(RecommendationRecord::OPTIONAL_FIELDS.iter())
        {
            assert_eq!(value[key], serde_json::json!([]), "missing {key}");
        }
    }
}
