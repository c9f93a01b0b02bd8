//! Count-mode allocation.
//!
//! # Algorithm
//!
//! Sections are consumed in order into the current day. For each
//! section's remaining words:
//! 1. If the day total stays within `target * tolerance`, the whole
//!    remainder joins the current day.
//! 2. Else, if the day has no space left, the day is closed and the
//!    same remainder is retried on a fresh day.
//! 3. Else, exactly the remaining space is cut from the section and the
//!    day is closed; the leftover continues on the next day.
//!
//! Empty sections join the current day (or the last closed day, when
//! they trail the content) without consuming space.
//!
//! # Complexity
//! O(n + d) where n = sections, d = emitted days.

use crate::models::Section;

use super::Slice;

/// Words and slices of the day being filled.
#[derive(Debug, Default)]
struct DayState<'a> {
    slices: Vec<Slice<'a>>,
    words: u32,
}

impl<'a> DayState<'a> {
    fn push(&mut self, slice: Slice<'a>) {
        self.words = self.words.saturating_add(slice.words);
        self.slices.push(slice);
    }

    /// Closes the day and starts a fresh one.
    fn flush(&mut self, days: &mut Vec<Vec<Slice<'a>>>) {
        self.words = 0;
        days.push(std::mem::take(&mut self.slices));
    }
}

/// Partitions sections into days of about `target` words.
///
/// `target` must be at least 1 and `tolerance` at least 1.0.
pub(super) fn allocate_by_words(
    sections: &[Section],
    target: u32,
    tolerance: f64,
) -> Vec<Vec<Slice<'_>>> {
    let limit = f64::from(target) * tolerance;
    let mut days = Vec::new();
    let mut day = DayState::default();

    for section in sections {
        if section.word_count == 0 {
            day.slices.push(Slice::whole(section));
            continue;
        }

        let mut remaining = section.word_count;
        while remaining > 0 {
            if f64::from(day.words) + f64::from(remaining) <= limit {
                day.push(Slice::part(section, remaining));
                remaining = 0;
                continue;
            }

            let space = target.saturating_sub(day.words);
            if space == 0 {
                day.flush(&mut days);
                continue;
            }

            // remaining > space here, since day.words + remaining > limit >= target
            day.push(Slice::part(section, space));
            remaining -= space;
            day.flush(&mut days);
        }
    }

    if day.words > 0 || days.is_empty() {
        if !day.slices.is_empty() {
            days.push(day.slices);
        }
    } else if let Some(last) = days.last_mut() {
        last.extend(day.slices);
    }

    days
}
