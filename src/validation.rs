//! Configuration-time validation of curricula.
//!
//! The engine itself never fails: it substitutes safe defaults for
//! malformed data. This module reports those defects up front, when a
//! curriculum is created or edited. Detects:
//! - Duplicate item and section IDs
//! - Items without sections or without any words
//! - Section-mode amounts outside {0.5, 1, 2}
//! - Missing or non-positive count-mode amounts
//! - Inverted break intervals
//! - An empty study-day set

use std::collections::HashSet;

use crate::models::{DailyAmountType, Pacing, SectionAmount, StudentCurriculum};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items, or two sections of one item, share the same ID.
    DuplicateId,
    /// An item has no sections.
    EmptyItem,
    /// An item has sections but no words.
    ZeroContent,
    /// A section-mode amount outside the valid set.
    InvalidSectionAmount,
    /// A count-mode amount that is missing or not positive.
    InvalidCountAmount,
    /// A break whose end precedes its start.
    InvertedBreak,
    /// No study weekdays are configured.
    NoStudyDays,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a curriculum before it is stored.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. No duplicate section IDs within an item
/// 3. Every item has sections, and at least one word
/// 4. Every effective pacing amount is valid for its policy
/// 5. No break ends before it starts
/// 6. At least one study weekday
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_curriculum(curriculum: &StudentCurriculum) -> ValidationResult {
    let mut errors = Vec::new();

    let mut item_ids = HashSet::new();
    for item in &curriculum.items {
        if !item_ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id),
            ));
        }

        let mut section_ids = HashSet::new();
        for section in &item.sections {
            if !section_ids.insert(section.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate section ID in item '{}': {}", item.id, section.id),
                ));
            }
        }

        if item.sections.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyItem,
                format!("Item '{}' has no sections", item.id),
            ));
        } else if item.total_words() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroContent,
                format!("Item '{}' has no words", item.id),
            ));
        }

        if let Some(err) = check_pacing(&item.id, &curriculum.effective_pacing(item)) {
            errors.push(err);
        }
    }

    for b in &curriculum.calendar.breaks {
        if b.is_inverted() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedBreak,
                format!("Break ends ({}) before it starts ({})", b.end_date, b.start_date),
            ));
        }
    }

    if curriculum.calendar.study_days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoStudyDays,
            format!("Curriculum '{}' has no study days", curriculum.id),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pacing(item_id: &str, pacing: &Pacing) -> Option<ValidationError> {
    match (pacing.amount_type, pacing.daily_amount) {
        (DailyAmountType::Section, Some(amount)) => {
            SectionAmount::try_from(amount).err().map(|e| {
                ValidationError::new(
                    ValidationErrorKind::InvalidSectionAmount,
                    format!("Item '{item_id}': {e}"),
                )
            })
        }
        (DailyAmountType::Section, None) => Some(ValidationError::new(
            ValidationErrorKind::InvalidSectionAmount,
            format!("Item '{item_id}' has no section-mode amount"),
        )),
        (DailyAmountType::Count, Some(amount)) if amount.is_finite() && amount >= 1.0 => None,
        (DailyAmountType::Count, amount) => Some(ValidationError::new(
            ValidationErrorKind::InvalidCountAmount,
            format!("Item '{item_id}' has invalid count-mode amount: {amount:?}"),
        )),
    }
}
