//! Calendar scheduling of allocated content.
//!
//! Maps calendar dates to study-day ordinals and looks up the matching
//! day chunk, and solves the inverse: the start date that places a given
//! progress checkpoint on an anchor date.
//!
//! # Operations
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | `schedule_for` | curriculum, date | `Option<ScheduleItem>` |
//! | `schedule_week` | curriculum, week offset | `WeekSchedule` |
//! | `resolve_start_date` | curriculum, progress, anchor | start date |
//!
//! All operations are total: out-of-range queries yield `None` or the
//! unchanged start date, never an error.
//!
//! # Complexity
//! Forward lookup is O(d) in the number of calendar days between the
//! start date and the queried date, plus one allocation (cacheable).

mod cache;
mod forward;
mod inverse;

pub use cache::{allocation_fingerprint, AllocationCache};

use std::sync::Arc;

use crate::allocator::Allocator;
use crate::config::EngineConfig;
use crate::models::{DayChunk, StudentCurriculum};

/// Date-aware scheduler over allocated curriculum content.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_curriculum::models::{CurriculumItem, Pacing, Section, StudentCurriculum, StudyDays};
/// use u_curriculum::scheduler::CurriculumScheduler;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let curriculum = StudentCurriculum::new("c1", monday)
///     .with_study_days(StudyDays::from_days(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]))
///     .with_item(
///         CurriculumItem::new("wb1")
///             .with_pacing(Pacing::words(20.0))
///             .with_section(Section::new("s1", 60)),
///     );
///
/// let scheduler = CurriculumScheduler::new();
/// let wednesday = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
/// let item = scheduler.schedule_for(&curriculum, wednesday, monday).unwrap();
/// assert_eq!(item.day_index, 2);
/// assert_eq!((item.chunk.progress_start, item.chunk.progress_end), (21, 40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurriculumScheduler {
    allocator: Allocator,
    cache: Option<Arc<AllocationCache>>,
}

impl CurriculumScheduler {
    /// Creates a scheduler with the default configuration and no cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.allocator = self.allocator.with_config(config);
        self
    }

    /// Shares an allocation cache with this scheduler.
    pub fn with_cache(mut self, cache: Arc<AllocationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Engine configuration in use.
    pub fn config(&self) -> &EngineConfig {
        self.allocator.config()
    }

    /// Full ordered day-chunk sequence of a curriculum.
    pub fn chunks(&self, curriculum: &StudentCurriculum) -> Arc<[DayChunk]> {
        match &self.cache {
            Some(cache) => {
                let key = allocation_fingerprint(curriculum, self.config());
                cache.get_or_compute(key, || self.allocator.allocate_curriculum(curriculum))
            }
            None => Arc::from(self.allocator.allocate_curriculum(curriculum)),
        }
    }

    /// Number of study days the curriculum's content occupies.
    pub fn total_study_days(&self, curriculum: &StudentCurriculum) -> usize {
        self.chunks(curriculum).len()
    }

    /// Date of the last scheduled study day.
    ///
    /// Returns `None` for a curriculum without content, or when the last
    /// day lies beyond the configured forward scan window.
    pub fn completion_date(&self, curriculum: &StudentCurriculum) -> Option<chrono::NaiveDate> {
        let days = u32::try_from(self.total_study_days(curriculum)).ok()?;
        curriculum.calendar.nth_study_day(
            curriculum.start_date,
            days,
            self.config().max_forward_scan_days,
        )
    }
}
