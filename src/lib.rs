//! Curriculum pacing engine.
//!
//! Assigns day-by-day learning content to students enrolled in a
//! multi-item curriculum and answers two questions:
//! - What content, if any, is due on calendar date D?
//! - Which start date puts progress checkpoint P on anchor date A?
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Section`, `CurriculumItem`, `Pacing`,
//!   `StudentCurriculum`, `StudyCalendar`, `DayChunk`, `ScheduleItem`
//! - **`allocator`**: Sections to day chunks (section and count pacing)
//! - **`scheduler`**: Calendar lookup, week view, inverse start-date solver
//! - **`validation`**: Configuration-time checks (pacing domain, breaks, IDs)
//! - **`config`**: Engine tuning parameters
//!
//! # Architecture
//!
//! The engine is a pure function of a curriculum snapshot and a date.
//! Persistence, rendering and "today" are supplied by the caller;
//! nothing is cached unless an [`scheduler::AllocationCache`] is attached.

pub mod allocator;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::EngineConfig;
pub use error::{CurriculumError, Result};
