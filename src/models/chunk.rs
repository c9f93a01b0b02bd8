//! Allocation and schedule output models.
//!
//! A [`DayChunk`] is one study day's worth of content, independent of
//! dates. A [`ScheduleItem`] is a chunk placed on a calendar date.
//! Both are derived on every query and never persisted by this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's worth of allocated content.
///
/// Progress positions are 1-based word positions within the owning item.
/// Chunk `k + 1` starts at `progress_end + 1` of chunk `k`. A chunk made
/// only of empty sections has `progress_end == progress_start - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayChunk {
    /// Position of the owning item within the curriculum (0-indexed).
    pub item_index: usize,
    /// Owning item ID.
    pub item_id: String,
    /// Owning item title.
    pub item_title: String,
    /// First word position (inclusive).
    pub progress_start: u32,
    /// Last word position (inclusive).
    pub progress_end: u32,
    /// Display title: a unit name or `"first ~ last"`.
    pub title: String,
    /// Chapter label: a single major unit or `"first~last"`.
    pub major_unit: String,
    /// Sub-chapter label: a single minor unit or `"first~last"`,
    /// suffixed with `" (partial)"` when a section was cut.
    pub minor_unit_label: String,
    /// Whether the chunk covers more than one section.
    pub is_multi_section: bool,
    /// Whether the chunk holds only part of at least one section.
    pub is_partial: bool,
    /// Words in this chunk.
    pub word_count: u32,
    /// IDs of the sections touched by this chunk, in order.
    pub section_ids: Vec<String>,
}

impl DayChunk {
    /// Whether a progress position falls within this chunk.
    #[inline]
    pub fn contains_progress(&self, progress: u32) -> bool {
        progress >= self.progress_start && progress <= self.progress_end
    }
}

/// Position of a scheduled date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Date is before today.
    Completed,
    /// Date is today.
    Today,
    /// Date is after today.
    Upcoming,
}

impl ScheduleStatus {
    /// Classifies `date` against `today`.
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        match date.cmp(&today) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Today,
            std::cmp::Ordering::Greater => Self::Upcoming,
        }
    }
}

/// A day chunk placed on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Scheduled calendar date.
    pub date: NaiveDate,
    /// 1-based study-day ordinal.
    pub day_index: u32,
    /// Relative position to today.
    pub status: ScheduleStatus,
    /// Allocated content.
    pub chunk: DayChunk,
}

/// One date of a week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Calendar date.
    pub date: NaiveDate,
    /// Scheduled content, if any.
    pub item: Option<ScheduleItem>,
}

/// Seven consecutive dates, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Monday..Sunday.
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    /// Scheduled items of the week, skipping empty dates.
    pub fn scheduled(&self) -> impl Iterator<Item = &ScheduleItem> {
        self.days.iter().filter_map(|d| d.item.as_ref())
    }
}
