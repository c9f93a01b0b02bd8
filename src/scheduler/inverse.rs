//! Inverse solver: progress checkpoint to start date.
//!
//! # Algorithm
//!
//! 1. Find the chunk whose progress range contains the target progress
//!    (binary search within the item's chunks).
//! 2. Advance the anchor date to the first study day at or after it.
//!    Non-study weekdays consume the lookahead window; break days are
//!    skipped without consuming it.
//! 3. Walk backward from the adjusted anchor counting study days until
//!    the target chunk's global ordinal is reached. That date is the
//!    new start date.
//!
//! Any failure (progress out of range, no study day near the anchor,
//! backward walk past its cap) returns the current start date unchanged.
//!
//! Step 2 uses the same study-day rule as the forward lookup, so
//! `schedule_for(rescheduled, adjusted_anchor)` always returns the
//! target chunk.

use chrono::NaiveDate;

use crate::models::StudentCurriculum;

use super::CurriculumScheduler;

impl CurriculumScheduler {
    /// Start date that places `target_progress` of the first item on
    /// (or after) `anchor_date`.
    pub fn resolve_start_date(
        &self,
        curriculum: &StudentCurriculum,
        target_progress: u32,
        anchor_date: NaiveDate,
    ) -> NaiveDate {
        self.resolve_start_date_for_item(curriculum, 0, target_progress, anchor_date)
    }

    /// Start date that places `target_progress` of item `item_index` on
    /// (or after) `anchor_date`.
    pub fn resolve_start_date_for_item(
        &self,
        curriculum: &StudentCurriculum,
        item_index: usize,
        target_progress: u32,
        anchor_date: NaiveDate,
    ) -> NaiveDate {
        let unchanged = curriculum.start_date;
        let config = self.config();
        let chunks = self.chunks(curriculum);

        let item_start = chunks.partition_point(|c| c.item_index < item_index);
        let item_end = chunks.partition_point(|c| c.item_index <= item_index);
        let item_chunks = &chunks[item_start..item_end];
        let local = item_chunks.partition_point(|c| c.progress_end < target_progress);
        if !item_chunks
            .get(local)
            .is_some_and(|c| c.contains_progress(target_progress))
        {
            tracing::debug!(
                curriculum_id = %curriculum.id,
                item_index,
                target_progress,
                "progress outside item content, keeping start date"
            );
            return unchanged;
        }
        let Ok(required_days) = u32::try_from(item_start + local + 1) else {
            return unchanged;
        };

        let calendar = &curriculum.calendar;
        let Some(anchor) = calendar.next_study_day(
            anchor_date,
            config.anchor_lookahead_days,
            config.max_forward_scan_days,
        ) else {
            tracing::debug!(
                curriculum_id = %curriculum.id,
                %anchor_date,
                "no study day near anchor, keeping start date"
            );
            return unchanged;
        };

        match calendar.start_for_ordinal(anchor, required_days, config.max_backward_days) {
            Some(start) => start,
            None => {
                tracing::debug!(
                    curriculum_id = %curriculum.id,
                    required_days,
                    %anchor,
                    "start date not found within search window, keeping start date"
                );
                unchanged
            }
        }
    }
}
