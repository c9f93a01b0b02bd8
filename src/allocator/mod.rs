//! Content allocation: sections to day chunks.
//!
//! Partitions a curriculum item's ordered sections into an ordered list
//! of [`DayChunk`]s under one of two pacing policies. Allocation is a
//! pure function of (sections, pacing, config); no dates are involved.
//!
//! # Policies
//!
//! | Policy | Unit of pacing | Splits sections? |
//! |--------|----------------|------------------|
//! | Section | Unit groups per day | Never |
//! | Count | Words per day (with overflow tolerance) | When a section overflows the day |
//!
//! # Progress
//! Each chunk carries a 1-based word range. Ranges of one item are
//! contiguous and cover `[1, total_words]` exactly. Positions saturate at
//! `u32::MAX`.

mod count;
mod section;

use crate::config::EngineConfig;
use crate::models::{CurriculumItem, DayChunk, Pacing, ResolvedPacing, Section, StudentCurriculum};

/// A whole section or a cut part of one, assigned to a day.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slice<'a> {
    pub(crate) section: &'a Section,
    pub(crate) words: u32,
    pub(crate) partial: bool,
}

impl<'a> Slice<'a> {
    fn whole(section: &'a Section) -> Self {
        Self {
            section,
            words: section.word_count,
            partial: false,
        }
    }

    fn part(section: &'a Section, words: u32) -> Self {
        Self {
            section,
            words,
            partial: words < section.word_count,
        }
    }
}

/// Identity of the item a chunk belongs to.
#[derive(Debug, Clone, Copy, Default)]
struct ItemRef<'a> {
    index: usize,
    id: &'a str,
    title: &'a str,
}

/// Allocates content into day chunks.
///
/// # Example
///
/// ```
/// use u_curriculum::allocator::Allocator;
/// use u_curriculum::models::{Pacing, Section};
///
/// let sections = vec![Section::new("s1", 15), Section::new("s2", 15)];
/// let chunks = Allocator::new().allocate(&sections, &Pacing::words(20.0));
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!((chunks[0].progress_start, chunks[0].progress_end), (1, 20));
/// assert_eq!((chunks[1].progress_start, chunks[1].progress_end), (21, 30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: EngineConfig,
}

impl Allocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Engine configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Allocates a bare section list (no owning item).
    pub fn allocate(&self, sections: &[Section], pacing: &Pacing) -> Vec<DayChunk> {
        self.allocate_resolved(sections, pacing.resolve(&self.config), ItemRef::default())
    }

    /// Allocates one item of a curriculum with the given pacing.
    pub fn allocate_item(
        &self,
        item_index: usize,
        item: &CurriculumItem,
        pacing: &Pacing,
    ) -> Vec<DayChunk> {
        let item_ref = ItemRef {
            index: item_index,
            id: &item.id,
            title: &item.title,
        };
        self.allocate_resolved(&item.sections, pacing.resolve(&self.config), item_ref)
    }

    /// Allocates every item of a curriculum, concatenated in item order.
    ///
    /// Global setting overrides are applied to each item's pacing.
    pub fn allocate_curriculum(&self, curriculum: &StudentCurriculum) -> Vec<DayChunk> {
        curriculum
            .items
            .iter()
            .enumerate()
            .flat_map(|(idx, item)| {
                self.allocate_item(idx, item, &curriculum.effective_pacing(item))
            })
            .collect()
    }

    fn allocate_resolved(
        &self,
        sections: &[Section],
        pacing: ResolvedPacing,
        item_ref: ItemRef<'_>,
    ) -> Vec<DayChunk> {
        let days = match pacing {
            ResolvedPacing::UnitGroups(groups) => section::allocate_by_groups(sections, groups),
            ResolvedPacing::Words(amount) => {
                let target = amount.round().max(1.0) as u32;
                let tolerance = self.config.overflow_tolerance.max(1.0);
                count::allocate_by_words(sections, target, tolerance)
            }
        };

        let mut cursor = 1u32;
        days.iter()
            .map(|slices| {
                let chunk = build_chunk(slices, cursor, item_ref);
                cursor = cursor.saturating_add(chunk.word_count);
                chunk
            })
            .collect()
    }
}

/// Allocates sections with the default configuration.
pub fn allocate(sections: &[Section], pacing: &Pacing) -> Vec<DayChunk> {
    Allocator::new().allocate(sections, pacing)
}

fn build_chunk(slices: &[Slice<'_>], cursor: u32, item_ref: ItemRef<'_>) -> DayChunk {
    let word_count = slices
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.words));
    let is_partial = slices.iter().any(|s| s.partial);

    // Runs of identical (major, minor) labels within the chunk
    let mut runs: Vec<&Section> = Vec::new();
    let mut section_ids: Vec<String> = Vec::new();
    for slice in slices {
        if runs.last().map_or(true, |last| !last.same_unit(slice.section)) {
            runs.push(slice.section);
        }
        if section_ids.last() != Some(&slice.section.id) {
            section_ids.push(slice.section.id.clone());
        }
    }

    let (title, major_unit, mut minor_unit_label) = match (runs.first(), runs.last()) {
        (Some(first), Some(last)) if runs.len() > 1 => (
            span(&first.unit_name, &last.unit_name, " ~ "),
            span(&first.major_unit, &last.major_unit, "~"),
            format!("{}~{}", first.minor_unit, last.minor_unit),
        ),
        (Some(only), _) => (
            only.unit_name.clone(),
            only.major_unit.clone(),
            only.minor_unit.clone(),
        ),
        _ => (String::new(), String::new(), String::new()),
    };
    if is_partial {
        minor_unit_label.push_str(" (partial)");
    }

    DayChunk {
        item_index: item_ref.index,
        item_id: item_ref.id.to_string(),
        item_title: item_ref.title.to_string(),
        progress_start: cursor,
        progress_end: cursor.saturating_sub(1).saturating_add(word_count),
        title,
        major_unit,
        minor_unit_label,
        is_multi_section: section_ids.len() > 1,
        is_partial,
        word_count,
        section_ids,
    }
}

fn span(first: &str, last: &str, sep: &str) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{first}{sep}{last}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyAmountType, SettingOverrides, StudyDays};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sec(id: &str, major: &str, minor: &str, name: &str, words: u32) -> Section {
        Section::new(id, words).with_units(major, minor).with_name(name)
    }

    fn random_sections(rng: &mut StdRng) -> Vec<Section> {
        let n = rng.random_range(1..40);
        let mut minor = 0;
        (0..n)
            .map(|i| {
                // ~1/3 of sections continue the previous unit group
                if i == 0 || rng.random_range(0..3) != 0 {
                    minor += 1;
                }
                Section::new(format!("s{i}"), rng.random_range(0..60))
                    .with_units(format!("{}", minor / 4), format!("{minor}"))
                    .with_name(format!("Unit {minor}"))
            })
            .collect()
    }

    fn assert_contiguous(chunks: &[DayChunk], total: u32) {
        let mut expected_start = 1;
        for c in chunks {
            assert_eq!(c.progress_start, expected_start);
            assert_eq!(c.progress_end + 1, c.progress_start + c.word_count);
            expected_start = c.progress_end + 1;
        }
        assert_eq!(expected_start - 1, total);
    }

    #[test]
    fn test_count_mode_example() {
        let chunks = allocate(&[Section::new("s1", 10)], &Pacing::words(20.0));
        assert_eq!(chunks.len(), 1);
        assert_eq!((chunks[0].progress_start, chunks[0].progress_end), (1, 10));
        assert!(!chunks[0].is_partial);
    }

    #[test]
    fn test_count_mode_partial_label() {
        let sections = vec![
            sec("s1", "1", "A", "Family", 15),
            sec("s2", "1", "B", "Food", 15),
        ];
        let chunks = allocate(&sections, &Pacing::words(20.0));
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].title, "Family ~ Food");
        assert_eq!(chunks[0].major_unit, "1");
        assert_eq!(chunks[0].minor_unit_label, "A~B (partial)");
        assert!(chunks[0].is_multi_section);
        assert!(chunks[0].is_partial);
        assert_eq!(chunks[0].section_ids, vec!["s1", "s2"]);

        assert_eq!(chunks[1].title, "Food");
        assert_eq!(chunks[1].minor_unit_label, "B (partial)");
        assert!(!chunks[1].is_multi_section);
        assert_eq!((chunks[1].progress_start, chunks[1].progress_end), (21, 30));
    }

    #[test]
    fn test_section_mode_labels() {
        let sections = vec![
            sec("s1", "1", "A", "Greetings", 10),
            sec("s2", "1", "A", "Greetings", 8),
            sec("s3", "1", "B", "Numbers", 12),
            sec("s4", "2", "A", "Colors", 9),
        ];
        let chunks = allocate(&sections, &Pacing::sections(2.0));
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].title, "Greetings ~ Numbers");
        assert_eq!(chunks[0].minor_unit_label, "A~B");
        assert_eq!(chunks[0].major_unit, "1");
        assert_eq!(chunks[0].word_count, 30);
        assert_eq!((chunks[0].progress_start, chunks[0].progress_end), (1, 30));
        assert!(!chunks[0].is_partial);

        assert_eq!(chunks[1].title, "Colors");
        assert_eq!(chunks[1].minor_unit_label, "A");
        assert_eq!((chunks[1].progress_start, chunks[1].progress_end), (31, 39));
    }

    #[test]
    fn test_section_mode_multi_row_group_is_single_unit() {
        let sections = vec![
            sec("s1", "1", "A", "Greetings", 10),
            sec("s2", "1", "A", "Greetings", 8),
        ];
        let chunks = allocate(&sections, &Pacing::sections(1.0));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "Greetings");
        assert_eq!(chunks[0].minor_unit_label, "A");
        assert!(chunks[0].is_multi_section);
    }

    #[test]
    fn test_major_unit_span() {
        let sections = vec![sec("s1", "1", "A", "x", 5), sec("s2", "2", "A", "y", 5)];
        let chunks = allocate(&sections, &Pacing::sections(2.0));
        assert_eq!(chunks[0].major_unit, "1~2");
    }

    #[test]
    fn test_section_mode_defends_count_scale_amount() {
        let sections: Vec<Section> = (0..10)
            .map(|i| sec(&format!("s{i}"), "1", &i.to_string(), "n", 5))
            .collect();
        let chunks = allocate(&sections, &Pacing::sections(20.0));
        assert_eq!(chunks.len(), 10);
    }

    #[test]
    fn test_missing_amount_defaults() {
        let sections: Vec<Section> = (0..3).map(|i| Section::new(format!("s{i}"), 20)).collect();

        let count = allocate(&sections, &Pacing::default_for(DailyAmountType::Count));
        assert_eq!(count.len(), 3);

        let by_groups = allocate(
            &[sec("a", "1", "A", "a", 5), sec("b", "1", "B", "b", 5)],
            &Pacing::default_for(DailyAmountType::Section),
        );
        assert_eq!(by_groups.len(), 2);
    }

    #[test]
    fn test_amount_larger_than_content() {
        let sections: Vec<Section> = (0..5).map(|i| Section::new(format!("s{i}"), 10)).collect();
        let chunks = allocate(&sections, &Pacing::words(1000.0));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].progress_end, 50);
    }

    #[test]
    fn test_empty_sections_yield_no_chunks() {
        assert!(allocate(&[], &Pacing::words(20.0)).is_empty());
        assert!(allocate(&[], &Pacing::sections(1.0)).is_empty());
    }

    #[test]
    fn test_zero_word_section_terminates() {
        let sections = vec![Section::new("e", 0), Section::new("s", 5)];
        let chunks = allocate(&sections, &Pacing::words(20.0));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section_ids, vec!["e", "s"]);
        assert_eq!((chunks[0].progress_start, chunks[0].progress_end), (1, 5));
    }

    #[test]
    fn test_allocate_curriculum_concatenates_items() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let curriculum = StudentCurriculum::new("c1", start)
            .with_study_days(StudyDays::weekdays())
            .with_item(
                CurriculumItem::new("wb1")
                    .with_title("Book One")
                    .with_pacing(Pacing::words(10.0))
                    .with_section(Section::new("a", 20)),
            )
            .with_item(
                CurriculumItem::new("wb2")
                    .with_title("Book Two")
                    .with_pacing(Pacing::words(10.0))
                    .with_section(Section::new("b", 10)),
            );

        let chunks = Allocator::new().allocate_curriculum(&curriculum);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].item_id, "wb1");
        assert_eq!(chunks[1].item_title, "Book One");
        assert_eq!(chunks[2].item_index, 1);
        // Progress restarts per item
        assert_eq!((chunks[2].progress_start, chunks[2].progress_end), (1, 10));
    }

    #[test]
    fn test_allocate_curriculum_applies_overrides() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let curriculum = StudentCurriculum::new("c1", start)
            .with_item(
                CurriculumItem::new("wb1")
                    .with_pacing(Pacing::words(10.0))
                    .with_section(Section::new("a", 40)),
            )
            .with_overrides(SettingOverrides {
                amount_type: None,
                daily_amount: Some(20.0),
            });
        assert_eq!(Allocator::new().allocate_curriculum(&curriculum).len(), 2);
    }

    #[test]
    fn test_random_progress_contiguity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let sections = random_sections(&mut rng);
            let total = crate::models::total_words(&sections);
            for pacing in [
                Pacing::sections(0.5),
                Pacing::sections(1.0),
                Pacing::sections(2.0),
                Pacing::words(rng.random_range(1..50) as f64),
            ] {
                assert_contiguous(&allocate(&sections, &pacing), total);
            }
        }
    }

    #[test]
    fn test_random_section_mode_never_splits_groups() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let sections = random_sections(&mut rng);
            let chunks = allocate(&sections, &Pacing::sections(2.0));
            for group in section::unit_groups(&sections) {
                let holders: Vec<_> = chunks
                    .iter()
                    .filter(|c| group.iter().any(|s| c.section_ids.contains(&s.id)))
                    .collect();
                assert_eq!(holders.len(), 1);
                assert!(group.iter().all(|s| holders[0].section_ids.contains(&s.id)));
            }
        }
    }

    #[test]
    fn test_section_mode_monotonic_in_amount() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let sections = random_sections(&mut rng);
            let half = allocate(&sections, &Pacing::sections(0.5)).len();
            let one = allocate(&sections, &Pacing::sections(1.0)).len();
            let two = allocate(&sections, &Pacing::sections(2.0)).len();
            assert!(two <= one && one <= half);
        }
    }

    #[test]
    fn test_oversized_word_counts_do_not_overflow() {
        let json = r#"[{"id": "a", "word_count": 99999999999}, {"id": "b", "word_count": 10}]"#;
        let sections: Vec<Section> = serde_json::from_str(json).unwrap();
        let chunks = allocate(&sections, &Pacing::words(1.0e9));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].progress_end, crate::models::MAX_SECTION_WORDS + 10);

        // Built directly, bypassing the deserializer cap
        let sections = vec![Section::new("a", u32::MAX), Section::new("b", 10)];
        let chunks = allocate(&sections, &Pacing::words(1.0e9));
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].section_ids, vec!["a", "b"]);
        assert_eq!(chunks[3].progress_end, u32::MAX);
        assert!(chunks.windows(2).all(|w| w[0].progress_end < w[1].progress_start));
    }

    #[test]
    fn test_count_mode_monotonic_in_amount() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let sections = random_sections(&mut rng);
            let mut amount = rng.random_range(1..10) as f64;
            let mut prev = allocate(&sections, &Pacing::words(amount)).len();
            for _ in 0..4 {
                amount *= 2.0;
                let next = allocate(&sections, &Pacing::words(amount)).len();
                assert!(next <= prev, "amount {amount}: {next} > {prev}");
                prev = next;
            }
        }
    }

    #[test]
    fn test_count_mode_monotonic_examples() {
        let sections: Vec<Section> = [12, 7, 30, 5, 18, 22, 9]
            .iter()
            .enumerate()
            .map(|(i, &w)| Section::new(format!("s{i}"), w))
            .collect();
        let counts: Vec<usize> = [10.0, 20.0, 40.0, 80.0, 200.0]
            .iter()
            .map(|&a| allocate(&sections, &Pacing::words(a)).len())
            .collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");
        assert_eq!(*counts.last().unwrap(), 1);
    }
}
