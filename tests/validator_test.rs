// ABOUTME: Integration tests for profile submission validation and normalization
// ABOUTME: Covers range boundaries, unparseable input, missing fields and trimming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use nutriplan_server::errors::PipelineError;
use nutriplan_server::models::ProfileSubmission;
use nutriplan_server::recommendations::validator::{normalize, validate};

fn with_numbers(age: &str, weight: &str, height: &str) -> ProfileSubmission {
    let mut submission = common::sample_submission();
    submission.age = age.to_owned();
    submission.weight = weight.to_owned();
    submission.height = height.to_owned();
    submission
}

#[test]
fn test_valid_submission_has_no_errors() {
    assert!(validate(&common::sample_submission()).is_empty());
}

#[test]
fn test_inclusive_boundaries_are_accepted() {
    assert!(validate(&with_numbers("1", "1", "0.5")).is_empty());
    assert!(validate(&with_numbers("120", "500", "3.0")).is_empty());
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let cases = [
        ("0", "70", "1.7"),
        ("121", "70", "1.7"),
        ("200", "70", "1.7"),
        ("-5", "70", "1.7"),
        ("30", "0.99", "1.7"),
        ("30", "500.01", "1.7"),
        ("30", "70", "0.49"),
        ("30", "70", "3.01"),
    ];
    for (age, weight, height) in cases {
        assert_eq!(
            validate(&with_numbers(age, weight, height)).len(),
            1,
            "expected one error for age={age} weight={weight} height={height}"
        );
    }
}

#[test]
fn test_unparseable_values_are_reported() {
    let errors = validate(&with_numbers("thirty", "heavy", "tall"));
    assert_eq!(errors, vec!["Invalid age", "Invalid weight", "Invalid height"]);
}

#[test]
fn test_fractional_age_is_invalid() {
    assert_eq!(validate(&with_numbers("30.5", "70", "1.7")), vec!["Invalid age"]);
}

#[test]
fn test_missing_fields_fail_validation() {
    let errors = validate(&ProfileSubmission::default());
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_normalize_builds_typed_profile() {
    let profile = normalize(&common::sample_submission()).unwrap();
    assert_eq!(profile.age, 29);
    assert!((profile.weight_kg - 72.5).abs() < f64::EPSILON);
    assert!((profile.height_m - 1.78).abs() < f64::EPSILON);
    assert_eq!(profile.diet_preference, "vegetarian");
    assert_eq!(profile.food_type, "Indian");
}

#[test]
fn test_normalize_reports_every_message() {
    let error = normalize(&with_numbers("200", "70", "9")).unwrap_err();
    match error {
        PipelineError::Validation { messages } => {
            assert_eq!(
                messages,
                vec![
                    "Age must be between 1 and 120",
                    "Height must be between 0.5 and 3.0 m"
                ]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
