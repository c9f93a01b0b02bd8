//! Engine tuning parameters.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration. Values are checked by [`EngineConfig::validate`] when
//! loaded through [`EngineConfig::from_json_str`].

use serde::{Deserialize, Serialize};

use crate::error::{CurriculumError, Result};
use crate::models::SectionAmount;

/// Tunable constants of the allocator and the calendar scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Count mode: a section stays whole if the day total stays within
    /// `daily_amount * overflow_tolerance`.
    pub overflow_tolerance: f64,
    /// Section-mode amount used when an item's amount is missing or
    /// implausible. Must be one of 0.5, 1 or 2.
    pub default_section_amount: f64,
    /// Words per day when a count-mode amount is missing or non-positive.
    pub default_count_amount: f64,
    /// Weekday steps the inverse solver may advance an anchor date.
    pub anchor_lookahead_days: u32,
    /// Backward-walk cap of the inverse solver (calendar days).
    pub max_backward_days: u32,
    /// Forward-scan cap for anchor adjustment through breaks (calendar days).
    pub max_forward_scan_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overflow_tolerance: 1.3,
            default_section_amount: 1.0,
            default_count_amount: 20.0,
            anchor_lookahead_days: 7,
            max_backward_days: 5 * 365 + 1,
            max_forward_scan_days: 5 * 365 + 1,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count-mode overflow tolerance.
    pub fn with_overflow_tolerance(mut self, tolerance: f64) -> Self {
        self.overflow_tolerance = tolerance;
        self
    }

    /// Sets the section-mode fallback amount.
    pub fn with_default_section_amount(mut self, amount: f64) -> Self {
        self.default_section_amount = amount;
        self
    }

    /// Sets the count-mode fallback amount.
    pub fn with_default_count_amount(mut self, amount: f64) -> Self {
        self.default_count_amount = amount;
        self
    }

    /// Sets the anchor lookahead window.
    pub fn with_anchor_lookahead_days(mut self, days: u32) -> Self {
        self.anchor_lookahead_days = days;
        self
    }

    /// Sets the backward search cap of the inverse solver.
    pub fn with_max_backward_days(mut self, days: u32) -> Self {
        self.max_backward_days = days;
        self
    }

    /// Sets the forward-scan cap used when an anchor falls in a break.
    pub fn with_max_forward_scan_days(mut self, days: u32) -> Self {
        self.max_forward_scan_days = days;
        self
    }

    /// Parses a JSON configuration and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the allocator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.overflow_tolerance.is_finite() || self.overflow_tolerance < 1.0 {
            return Err(CurriculumError::InvalidConfig(format!(
                "overflow_tolerance must be >= 1.0, got {}",
                self.overflow_tolerance
            )));
        }
        if SectionAmount::try_from(self.default_section_amount).is_err() {
            return Err(CurriculumError::InvalidConfig(format!(
                "default_section_amount must be 0.5, 1 or 2, got {}",
                self.default_section_amount
            )));
        }
        if !(self.default_count_amount.is_finite() && self.default_count_amount >= 1.0) {
            return Err(CurriculumError::InvalidConfig(format!(
                "default_count_amount must be >= 1, got {}",
                self.default_count_amount
            )));
        }
        if self.max_backward_days == 0 {
            return Err(CurriculumError::InvalidConfig(
                "max_backward_days must be positive".into(),
            ));
        }
        Ok(())
    }
}
