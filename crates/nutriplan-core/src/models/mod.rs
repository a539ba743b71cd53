// ABOUTME: Data models shared by the recommendation pipeline and its HTTP surface
// ABOUTME: Profile submissions, normalized profiles, and structured recommendation records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Inbound profile submission and the validated profile built from it
pub mod profile;

/// Structured meal and activity recommendation
pub mod recommendation;

pub use profile::{ProfileSubmission, UserProfile};
pub use recommendation::{ActivityItem, MealItem, Measure, RecommendationRecord};
