//! Curriculum item model.
//!
//! A curriculum item is one pacing-configured block of a curriculum,
//! typically one wordbook. It is constructed once at the data-access
//! boundary and passed to the engine as a complete value.

use serde::{Deserialize, Serialize};

use super::{total_words, DailyAmountType, Pacing, Section};

/// One pacing-configured block within a curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumItem {
    /// Unique item identifier.
    pub id: String,
    /// Display title (e.g., wordbook name).
    #[serde(default)]
    pub title: String,
    /// Content kind (e.g., "wordbook").
    #[serde(default)]
    pub item_type: String,
    /// Ordered content sections.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Pacing configuration.
    pub pacing: Pacing,
}

impl CurriculumItem {
    /// Creates an item with no sections and default section pacing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            item_type: String::new(),
            sections: Vec::new(),
            pacing: Pacing::default_for(DailyAmountType::Section),
        }
    }

    /// Sets the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the content kind.
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }

    /// Sets the pacing configuration.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Appends a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Replaces all sections.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Total word count across all sections.
    pub fn total_words(&self) -> u32 {
        total_words(&self.sections)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
