//! Section model.
//!
//! A section is the smallest indivisible block of content in a curriculum
//! item (e.g., one lesson of a wordbook). Sections carry chapter labels
//! used for grouping and display, and a word count used for pacing.

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on a deserialized section's word count. Larger upstream
/// values are clamped to it.
pub const MAX_SECTION_WORDS: u32 = 1_000_000;

/// One indivisible unit of content.
///
/// Sections of one item form an ordered sequence; the order determines
/// progress positions and must not change once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Chapter label.
    #[serde(default)]
    pub major_unit: String,
    /// Sub-chapter label.
    #[serde(default)]
    pub minor_unit: String,
    /// Display name.
    #[serde(default)]
    pub unit_name: String,
    /// Number of atomic content entries (words). Negative upstream values
    /// become 0; values above [`MAX_SECTION_WORDS`] are clamped to it.
    #[serde(default, deserialize_with = "lenient_word_count")]
    pub word_count: u32,
}

impl Section {
    /// Creates a section with empty labels.
    pub fn new(id: impl Into<String>, word_count: u32) -> Self {
        Self {
            id: id.into(),
            major_unit: String::new(),
            minor_unit: String::new(),
            unit_name: String::new(),
            word_count,
        }
    }

    /// Sets the chapter and sub-chapter labels.
    pub fn with_units(mut self, major: impl Into<String>, minor: impl Into<String>) -> Self {
        self.major_unit = major.into();
        self.minor_unit = minor.into();
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.unit_name = name.into();
        self
    }

    /// Whether two sections belong to the same unit group.
    #[inline]
    pub fn same_unit(&self, other: &Self) -> bool {
        self.major_unit == other.major_unit && self.minor_unit == other.minor_unit
    }
}

/// Total word count of a section slice, saturating at `u32::MAX`.
pub fn total_words(sections: &[Section]) -> u32 {
    sections
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.word_count))
}

fn lenient_word_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
    if raw < 0 {
        tracing::warn!(word_count = raw, "negative section word count, using 0");
        return Ok(0);
    }
    match u32::try_from(raw) {
        Ok(words) if words <= MAX_SECTION_WORDS => Ok(words),
        _ => {
            tracing::warn!(
                word_count = raw,
                max = MAX_SECTION_WORDS,
                "oversized section word count, clamping"
            );
            Ok(MAX_SECTION_WORDS)
        }
    }
}
