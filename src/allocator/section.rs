//! Section-mode allocation.
//!
//! # Algorithm
//!
//! 1. Group consecutive sections sharing `(major_unit, minor_unit)` into
//!    unit groups.
//! 2. Emit one day per `groups_per_day` consecutive unit groups.
//!
//! A unit group is never split across two days.
//!
//! # Complexity
//! O(n) where n = number of sections.

use crate::models::Section;

use super::Slice;

/// Consecutive runs of sections with identical chapter labels.
pub(crate) fn unit_groups(sections: &[Section]) -> Vec<&[Section]> {
    sections.chunk_by(|a, b| a.same_unit(b)).collect()
}

/// Partitions sections into days of `groups_per_day` unit groups each.
pub(super) fn allocate_by_groups(
    sections: &[Section],
    groups_per_day: usize,
) -> Vec<Vec<Slice<'_>>> {
    let groups = unit_groups(sections);
    groups
        .chunks(groups_per_day.max(1))
        .map(|day| {
            day.iter()
                .copied()
                .flat_map(|group| group.iter().map(Slice::whole))
                .collect()
        })
        .collect()
}
