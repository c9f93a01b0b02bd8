//! Forward lookup: calendar date to scheduled content.
//!
//! # Algorithm
//!
//! 1. Reject dates before the start date.
//! 2. Reject non-study weekdays and dates inside breaks.
//! 3. Count study days from the start date to the date (inclusive).
//! 4. Return the chunk at that ordinal, if the content reaches it.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{
    DayChunk, DaySchedule, ScheduleItem, ScheduleStatus, StudentCurriculum, WeekSchedule,
};

use super::CurriculumScheduler;

impl CurriculumScheduler {
    /// Content scheduled on `date`, with status relative to `today`.
    ///
    /// Returns `None` when nothing is scheduled: before the start date,
    /// on a non-study day, or past the end of the content.
    pub fn schedule_for(
        &self,
        curriculum: &StudentCurriculum,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Option<ScheduleItem> {
        if date < curriculum.start_date || !curriculum.calendar.is_study_day(date) {
            return None;
        }
        let chunks = self.chunks(curriculum);
        place_chunk(curriculum, &chunks, date, today)
    }

    /// Schedules for the seven days of one week.
    ///
    /// The week is Monday-based: offset 0 is the week containing `today`,
    /// -1 the previous week, 1 the next.
    pub fn schedule_week(
        &self,
        curriculum: &StudentCurriculum,
        week_offset: i32,
        today: NaiveDate,
    ) -> WeekSchedule {
        let week_start = week_monday(today, week_offset);
        let chunks = self.chunks(curriculum);

        let days = week_start
            .iter_days()
            .take(7)
            .map(|date| DaySchedule {
                date,
                item: place_chunk(curriculum, &chunks, date, today),
            })
            .collect();

        WeekSchedule { week_start, days }
    }
}

fn place_chunk(
    curriculum: &StudentCurriculum,
    chunks: &[DayChunk],
    date: NaiveDate,
    today: NaiveDate,
) -> Option<ScheduleItem> {
    let day_index = curriculum
        .calendar
        .study_day_index(curriculum.start_date, date)?;
    let chunk = chunks.get((day_index as usize).checked_sub(1)?)?;
    Some(ScheduleItem {
        date,
        day_index,
        status: ScheduleStatus::classify(date, today),
        chunk: chunk.clone(),
    })
}

/// Monday of the week `week_offset` weeks away from `today`'s week.
fn week_monday(today: NaiveDate, week_offset: i32) -> NaiveDate {
    let monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let shift = Days::new(u64::from(week_offset.unsigned_abs()) * 7);
    let shifted = if week_offset >= 0 {
        monday.checked_add_days(shift)
    } else {
        monday.checked_sub_days(shift)
    };
    shifted.unwrap_or(monday)
}
