// ABOUTME: Deterministic cache keys derived from a normalized user profile
// ABOUTME: Canonical (sorted-key) JSON of the profile hashed with SHA-256
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::errors::AppResult;
use nutriplan_core::models::UserProfile;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a normalized profile, used as the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already computed hex digest
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Hex digest
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a profile
///
/// The profile is serialized to a JSON object whose keys are re-ordered
/// lexicographically before hashing, so the digest depends only on field
/// names and values.
///
/// # Errors
///
/// Returns an error if the profile cannot be serialized to JSON.
pub fn fingerprint(profile: &UserProfile) -> AppResult<Fingerprint> {
    let fields: BTreeMap<String, serde_json::Value> =
        serde_json::from_value(serde_json::to_value(profile)?)?;
    let canonical = serde_json::to_vec(&fields)?;

    let digest = Sha256::digest(&canonical);
    Ok(Fingerprint(hex::encode(digest)))
}
