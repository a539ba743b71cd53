// ABOUTME: Input validation for profile submissions before any cache or model access
// ABOUTME: Range-checks age, weight, and height and builds the normalized UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::constants::limits::{
    AGE_MAX, AGE_MIN, HEIGHT_MAX_M, HEIGHT_MIN_M, WEIGHT_MAX_KG, WEIGHT_MIN_KG,
};
use nutriplan_core::errors::PipelineError;
use nutriplan_core::models::{ProfileSubmission, UserProfile};

/// Check a submission and return one advisory message per rejected field
///
/// An empty list means the submission is usable. Unparseable numbers and
/// out-of-range numbers are both rejected; only the wording differs.
#[must_use]
pub fn validate(submission: &ProfileSubmission) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(message) = parse_age(&submission.age) {
        errors.push(message);
    }
    if let Err(message) = parse_weight(&submission.weight) {
        errors.push(message);
    }
    if let Err(message) = parse_height(&submission.height) {
        errors.push(message);
    }

    errors
}

/// Validate a submission and build the normalized profile
///
/// # Errors
///
/// Returns `PipelineError::Validation` carrying every advisory message when
/// any field is rejected.
pub fn normalize(submission: &ProfileSubmission) -> Result<UserProfile, PipelineError> {
    match (
        parse_age(&submission.age),
        parse_weight(&submission.weight),
        parse_height(&submission.height),
    ) {
        (Ok(age), Ok(weight_kg), Ok(height_m)) => Ok(UserProfile {
            age,
            gender: submission.gender.trim().to_owned(),
            weight_kg,
            height_m,
            diet_preference: submission.veg_or_nonveg.trim().to_owned(),
            health_condition: submission.disease.trim().to_owned(),
            allergies: submission.allergies.trim().to_owned(),
            region: submission.region.trim().to_owned(),
            food_type: submission.foodtype.trim().to_owned(),
        }),
        _ => Err(PipelineError::Validation {
            messages: validate(submission),
        }),
    }
}

fn parse_age(raw: &str) -> Result<u8, String> {
    let age: i64 = raw
        .trim()
        .parse()
        .map_err(|_| "Invalid age".to_owned())?;
    u8::try_from(age)
        .ok()
        .filter(|age| (AGE_MIN..=AGE_MAX).contains(age))
        .ok_or_else(|| format!("Age must be between {AGE_MIN} and {AGE_MAX}"))
}

fn parse_weight(raw: &str) -> Result<f64, String> {
    parse_real(raw, "weight").and_then(|weight| {
        if (WEIGHT_MIN_KG..=WEIGHT_MAX_KG).contains(&weight) {
            Ok(weight)
        } else {
            Err(format!(
                "Weight must be between {WEIGHT_MIN_KG} and {WEIGHT_MAX_KG} kg"
            ))
        }
    })
}

fn parse_height(raw: &str) -> Result<f64, String> {
    parse_real(raw, "height").and_then(|height| {
        if (HEIGHT_MIN_M..=HEIGHT_MAX_M).contains(&height) {
            Ok(height)
        } else {
            Err(format!(
                "Height must be between {HEIGHT_MIN_M:.1} and {HEIGHT_MAX_M:.1} m"
            ))
        }
    })
}

fn parse_real(raw: &str, field: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("Invalid {field}"))
}
