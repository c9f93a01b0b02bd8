//! Memoized allocation output.
//!
//! Allocation depends only on item content, pacing and configuration,
//! never on the queried date. Rendering a week or many students at once
//! repeats the same allocation, so results can be shared.
//!
//! Entries are keyed by an immutable content fingerprint and never
//! mutated in place: changed content yields a new key.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::EngineConfig;
use crate::models::{DayChunk, StudentCurriculum};

/// Read-mostly cache of allocation results.
///
/// Each key is computed at most once; concurrent readers share the
/// result through an `Arc`.
#[derive(Debug, Default)]
pub struct AllocationCache {
    entries: RwLock<HashMap<u64, Arc<[DayChunk]>>>,
}

impl AllocationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached chunks for `key`, computing them on first use.
    pub fn get_or_compute<F>(&self, key: u64, compute: F) -> Arc<[DayChunk]>
    where
        F: FnOnce() -> Vec<DayChunk>,
    {
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!(key, "allocation cache hit");
            return Arc::clone(hit);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            entries
                .entry(key)
                .or_insert_with(|| Arc::from(compute())),
        )
    }

    /// Number of cached allocations.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fingerprint of everything allocation depends on.
///
/// Covers item identity and content, the effective (resolved) pacing of
/// each item, and the overflow tolerance. Dates and calendar settings
/// are excluded.
pub fn allocation_fingerprint(curriculum: &StudentCurriculum, config: &EngineConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.overflow_tolerance.to_bits().hash(&mut hasher);
    curriculum.items.len().hash(&mut hasher);
    for item in &curriculum.items {
        item.id.hash(&mut hasher);
        item.title.hash(&mut hasher);
        item.sections.hash(&mut hasher);
        curriculum
            .effective_pacing(item)
            .resolve(config)
            .key()
            .hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurriculumItem, Pacing, Section};
    use chrono::NaiveDate;

    fn curriculum(words: u32) -> StudentCurriculum {
        StudentCurriculum::new("c1", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()).with_item(
            CurriculumItem::new("wb1")
                .with_pacing(Pacing::words(20.0))
                .with_section(Section::new("s1", words)),
        )
    }

    #[test]
    fn test_computes_once_per_key() {
        let cache = AllocationCache::new();
        let mut calls = 0;
        let a = cache.get_or_compute(1, || {
            calls += 1;
            Vec::new()
        });
        let b = cache.get_or_compute(1, || {
            calls += 1;
            Vec::new()
        });
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let config = EngineConfig::default();
        let base = allocation_fingerprint(&curriculum(10), &config);
        assert_eq!(base, allocation_fingerprint(&curriculum(10), &config));
        assert_ne!(base, allocation_fingerprint(&curriculum(11), &config));
    }

    #[test]
    fn test_fingerprint_ignores_calendar() {
        let config = EngineConfig::default();
        let c = curriculum(10);
        let moved = c.rescheduled(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(
            allocation_fingerprint(&c, &config),
            allocation_fingerprint(&moved, &config)
        );
    }

    #[test]
    fn test_fingerprint_tracks_pacing() {
        let config = EngineConfig::default();
        let mut c = curriculum(10);
        let base = allocation_fingerprint(&c, &config);
        c.items[0].pacing = Pacing::words(30.0);
        assert_ne!(base, allocation_fingerprint(&c, &config));
    }
}
