// ABOUTME: Cache-related constants for recommendation cache capacity
// ABOUTME: Capacity is a hard ceiling; eviction is oldest-insertion-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum number of cached recommendations
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;
