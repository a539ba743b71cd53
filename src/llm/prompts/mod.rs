// ABOUTME: Prompt construction for recommendation requests
// ABOUTME: Embeds the validated profile ahead of format instructions loaded at compile time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Prompts
//!
//! The format instructions live in a markdown file next to this module and
//! are compiled in, so wording can be edited without touching code.

use nutriplan_core::models::UserProfile;

/// Role, rules and JSON shape the model must follow
pub const RECOMMENDATION_FORMAT_PROMPT: &str = include_str!("recommendation_format.md");

/// Get the format instructions
#[must_use]
pub const fn get_recommendation_format_prompt() -> &'static str {
    RECOMMENDATION_FORMAT_PROMPT
}

/// Build the single prompt string sent for a validated profile
#[must_use]
pub fn build_recommendation_prompt(profile: &UserProfile) -> String {
    let profile_block = format!(
        "\nUser Profile:\n\
         - Age: {}\n\
         - Gender: {}\n\
         - Weight: {} kg\n\
         - Height: {} m\n\
         - BMI: {:.1}\n\
         - Diet preference: {}\n\
         - Health condition: {}\n\
         - Allergies: {}\n\
         - Region: {}\n\
         - Preferred food type: {}\n",
        profile.age,
        or_unspecified(&profile.gender),
        profile.weight_kg,
        profile.height_m,
        profile.bmi(),
        or_unspecified(&profile.diet_preference),
        or_unspecified(&profile.health_condition),
        or_unspecified(&profile.allergies),
        or_unspecified(&profile.region),
        or_unspecified(&profile.food_type),
    );

    format!("{RECOMMENDATION_FORMAT_PROMPT}{profile_block}")
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        "not specified"
    } else {
        value
    }
}
