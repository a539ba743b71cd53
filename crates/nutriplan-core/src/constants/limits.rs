// ABOUTME: Plausibility ranges applied to profile submissions before any expensive call
// ABOUTME: Bounds are inclusive on both ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Minimum accepted age in years
pub const AGE_MIN: u8 = 1;

/// Maximum accepted age in years
pub const AGE_MAX: u8 = 120;

/// Minimum accepted body weight in kilograms
pub const WEIGHT_MIN_KG: f64 = 1.0;

/// Maximum accepted body weight in kilograms
pub const WEIGHT_MAX_KG: f64 = 500.0;

/// Minimum accepted height in meters
pub const HEIGHT_MIN_M: f64 = 0.5;

/// Maximum accepted height in meters
pub const HEIGHT_MAX_M: f64 = 3.0;

/// Upper bound on retries before falling back
pub const MAX_GENERATION_RETRIES: u32 = 5;

/// Largest accepted request body; profile submissions are a few hundred bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
