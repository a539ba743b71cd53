// ABOUTME: Static fallback recommendation served whenever the pipeline cannot produce one
// ABOUTME: Compiled-in JSON asset with an optional on-disk override; degrades to an empty record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::errors::AssetLoadError;
use nutriplan_core::models::RecommendationRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Fallback record compiled into the binary
const PACKAGED_FALLBACK: &str = include_str!("../../assets/fallback_recommendation.json");

/// Read-only holder of the fallback record
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards.
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    record: RecommendationRecord,
    source: Option<PathBuf>,
    degraded: bool,
}

impl FallbackProvider {
    /// Provider over the record compiled into the binary
    ///
    /// Independent of the working directory.
    #[must_use]
    pub fn packaged() -> Self {
        match Self::parse_packaged() {
            Ok(record) => Self::from_record(record),
            Err(e) => {
                warn!(error = %e, "Packaged fallback asset is malformed, serving empty recommendation");
                Self {
                    record: RecommendationRecord::empty(),
                    source: None,
                    degraded: true,
                }
            }
        }
    }

    fn parse_packaged() -> Result<RecommendationRecord, serde_json::Error> {
        serde_json::from_str(PACKAGED_FALLBACK)
    }

    /// Load the fallback asset, substituting the empty-shaped record on failure
    ///
    /// A load failure is logged here, once, at warn level.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(provider) => {
                info!(path = %path.display(), "Loaded fallback recommendation asset");
                provider
            }
            Err(e) => {
                warn!(error = %e, "Fallback asset unavailable, serving empty recommendation");
                Self {
                    record: RecommendationRecord::empty(),
                    source: Some(path.to_path_buf()),
                    degraded: true,
                }
            }
        }
    }

    /// Load the fallback asset, reporting failures to the caller
    ///
    /// # Errors
    ///
    /// Returns `AssetLoadError::Io` if the file cannot be read and
    /// `AssetLoadError::Malformed` if it does not decode as a record.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, AssetLoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AssetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record = serde_json::from_slice(&bytes).map_err(|source| AssetLoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            record,
            source: Some(path.to_path_buf()),
            degraded: false,
        })
    }

    /// Provider over an in-memory record
    #[must_use]
    pub const fn from_record(record: RecommendationRecord) -> Self {
        Self {
            record,
            source: None,
            degraded: false,
        }
    }

    /// The fallback record
    #[must_use]
    pub const fn get_fallback(&self) -> &RecommendationRecord {
        &self.record
    }

    /// Whether the asset failed to load and the empty record is served
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Asset path, when loaded from disk
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::from_record(RecommendationRecord::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packaged_asset_decodes() {
        let record = FallbackProvider::parse_packaged().unwrap();
        assert!(!record.breakfast.is_empty());
        assert!(!record.workouts.is_empty());
    }
}
