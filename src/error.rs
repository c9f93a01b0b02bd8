//! Error types for strict parsing and configuration loading.
//!
//! Schedule queries never return these: they degrade to absent results
//! or safe defaults. Errors surface only where a caller explicitly asks
//! for strict validation (configuration time, data-access boundary).

use thiserror::Error;

/// Errors raised by strict parsers and configuration loaders.
#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("Invalid weekday code: {0}")]
    InvalidWeekday(String),

    #[error("Invalid section-mode daily amount: {0} (expected 0.5, 1 or 2)")]
    InvalidSectionAmount(f64),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CurriculumError>;
