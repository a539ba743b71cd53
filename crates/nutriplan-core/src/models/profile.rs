// ABOUTME: User profile models for diet and workout recommendations
// ABOUTME: ProfileSubmission is raw text from the client; UserProfile is the validated form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Raw profile fields as submitted by a client, all text
///
/// Missing fields deserialize to the empty string so that an incomplete
/// submission is rejected by validation rather than by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSubmission {
    /// Age in years
    pub age: String,
    /// Gender, free text
    pub gender: String,
    /// Body weight in kilograms
    pub weight: String,
    /// Height in meters
    pub height: String,
    /// Diet preference such as "vegetarian" or "non-vegetarian"
    pub veg_or_nonveg: String,
    /// Health condition, free text
    pub disease: String,
    /// Region, free text
    pub region: String,
    /// Allergies, free text
    pub allergies: String,
    /// Preferred food type, free text
    pub foodtype: String,
}

impl ProfileSubmission {
    /// Build a submission from arbitrary key/value pairs
    ///
    /// Unknown keys are ignored and later duplicates win, so the result does
    /// not depend on the order fields were submitted in beyond that rule.
    #[must_use]
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in fields {
            let slot = match key.as_ref() {
                "age" => &mut submission.age,
                "gender" => &mut submission.gender,
                "weight" => &mut submission.weight,
                "height" => &mut submission.height,
                "veg_or_nonveg" => &mut submission.veg_or_nonveg,
                "disease" => &mut submission.disease,
                "region" => &mut submission.region,
                "allergies" => &mut submission.allergies,
                "foodtype" => &mut submission.foodtype,
                _ => continue,
            };
            *slot = value.into();
        }
        submission
    }
}

/// Validated and normalized user profile
///
/// Only built by the input validator; numeric fields are range-checked and
/// free-text fields are whitespace-trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years, 1 to 120
    pub age: u8,
    /// Gender
    pub gender: String,
    /// Body weight in kilograms, 1 to 500
    pub weight_kg: f64,
    /// Height in meters, 0.5 to 3.0
    pub height_m: f64,
    /// Diet preference
    pub diet_preference: String,
    /// Health condition
    pub health_condition: String,
    /// Allergies
    pub allergies: String,
    /// Region
    pub region: String,
    /// Preferred food type
    pub food_type: String,
}

impl UserProfile {
    /// Body mass index derived from weight and height
    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_m * self.height_m)
    }
}
