//! Curriculum domain models.
//!
//! Provides the input snapshot (curriculum, items, sections, calendar)
//! and the derived outputs (day chunks, schedule items) of the engine.
//!
//! # Domain Mappings
//!
//! | u-curriculum | Wordbook product | Textbook course |
//! |--------------|------------------|-----------------|
//! | Section | Word list lesson | Lesson |
//! | Unit group | Sub-chapter | Topic |
//! | CurriculumItem | Wordbook | Textbook |
//! | DayChunk | Daily word set | Daily reading |

mod calendar;
mod chunk;
mod curriculum;
mod item;
mod pacing;
mod section;

pub use calendar::{BreakPeriod, StudyCalendar, StudyDays};
pub use chunk::{DayChunk, DaySchedule, ScheduleItem, ScheduleStatus, WeekSchedule};
pub use curriculum::{SettingOverrides, StudentCurriculum};
pub use item::CurriculumItem;
pub use pacing::{DailyAmountType, Pacing, ResolvedPacing, SectionAmount};
pub use section::{total_words, Section, MAX_SECTION_WORDS};
