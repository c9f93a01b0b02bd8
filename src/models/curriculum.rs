//! Student curriculum model.
//!
//! A student's enrollment: ordered curriculum items, a start date and a
//! study calendar. This is the snapshot every schedule query runs against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CurriculumItem, DailyAmountType, Pacing, StudyCalendar, StudyDays};

/// Global pacing override applied to every item of a curriculum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingOverrides {
    /// Replaces each item's pacing policy.
    #[serde(default)]
    pub amount_type: Option<DailyAmountType>,
    /// Replaces each item's pacing amount.
    #[serde(default)]
    pub daily_amount: Option<f64>,
}

impl SettingOverrides {
    /// Applies the override to an item's pacing.
    ///
    /// When only the policy is overridden and it differs from the item's,
    /// the item's amount belongs to the other scale and is dropped.
    pub fn apply(&self, pacing: Pacing) -> Pacing {
        let amount_type = self.amount_type.unwrap_or(pacing.amount_type);
        let daily_amount = match self.daily_amount {
            Some(amount) => Some(amount),
            None if amount_type == pacing.amount_type => pacing.daily_amount,
            None => None,
        };
        Pacing {
            amount_type,
            daily_amount,
        }
    }
}

/// A student's curriculum enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentCurriculum {
    /// Unique curriculum identifier.
    pub id: String,
    /// Ordered curriculum items.
    #[serde(default)]
    pub items: Vec<CurriculumItem>,
    /// First eligible study day (inclusive).
    pub start_date: NaiveDate,
    /// Study weekdays and breaks.
    #[serde(flatten)]
    pub calendar: StudyCalendar,
    /// Global pacing override.
    #[serde(default)]
    pub setting_overrides: Option<SettingOverrides>,
}

impl StudentCurriculum {
    /// Creates a curriculum with no items and no study days.
    pub fn new(id: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            start_date,
            calendar: StudyCalendar::default(),
            setting_overrides: None,
        }
    }

    /// Adds a curriculum item.
    pub fn with_item(mut self, item: CurriculumItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sets the study weekdays.
    pub fn with_study_days(mut self, study_days: StudyDays) -> Self {
        self.calendar.study_days = study_days;
        self
    }

    /// Adds a break (inclusive bounds).
    pub fn with_break(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.calendar = self.calendar.with_break(start_date, end_date);
        self
    }

    /// Sets the global pacing override.
    pub fn with_overrides(mut self, overrides: SettingOverrides) -> Self {
        self.setting_overrides = Some(overrides);
        self
    }

    /// Returns a copy re-scheduled to a new start date.
    pub fn rescheduled(&self, start_date: NaiveDate) -> Self {
        Self {
            start_date,
            ..self.clone()
        }
    }

    /// Pacing in effect for an item, after global overrides.
    pub fn effective_pacing(&self, item: &CurriculumItem) -> Pacing {
        match &self.setting_overrides {
            Some(overrides) => overrides.apply(item.pacing),
            None => item.pacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_override_amount_only() {
        let overrides = SettingOverrides {
            amount_type: None,
            daily_amount: Some(30.0),
        };
        assert_eq!(overrides.apply(Pacing::words(20.0)), Pacing::words(30.0));
    }

    #[test]
    fn test_override_type_drops_foreign_amount() {
        let overrides = SettingOverrides {
            amount_type: Some(DailyAmountType::Section),
            daily_amount: None,
        };
        let p = overrides.apply(Pacing::words(20.0));
        assert_eq!(p.amount_type, DailyAmountType::Section);
        assert_eq!(p.daily_amount, None);

        // Same policy keeps the item's amount
        assert_eq!(overrides.apply(Pacing::sections(2.0)), Pacing::sections(2.0));
    }

    #[test]
    fn test_effective_pacing() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let item = CurriculumItem::new("wb").with_pacing(Pacing::sections(1.0));
        let plain = StudentCurriculum::new("c1", start).with_item(item.clone());
        assert_eq!(plain.effective_pacing(&item), Pacing::sections(1.0));

        let overridden = plain.clone().with_overrides(SettingOverrides {
            amount_type: Some(DailyAmountType::Count),
            daily_amount: Some(25.0),
        });
        assert_eq!(overridden.effective_pacing(&item), Pacing::words(25.0));
    }

    #[test]
    fn test_deserialize_flat_shape() {
        let json = r#"{
            "id": "c1",
            "start_date": "2024-07-01",
            "study_days": "['mon', 'wed', 'fri']",
            "breaks": [{"start_date": "2024-07-10", "end_date": "2024-07-12"}],
            "items": [{
                "id": "wb1",
                "title": "Core",
                "sections": [{"id": "s1", "word_count": 10}],
                "pacing": {"amount_type": "count", "daily_amount": 20}
            }]
        }"#;
        let c: StudentCurriculum = serde_json::from_str(json).unwrap();
        assert_eq!(c.start_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert!(c.calendar.study_days.contains(Weekday::Wed));
        assert!(!c.calendar.study_days.contains(Weekday::Tue));
        assert_eq!(c.calendar.breaks.len(), 1);
        assert_eq!(c.items[0].total_words(), 10);
        assert_eq!(c.setting_overrides, None);
    }

    #[test]
    fn test_deserialize_without_study_days() {
        let c: StudentCurriculum =
            serde_json::from_str(r#"{"id": "c", "start_date": "2024-07-01"}"#).unwrap();
        assert!(c.calendar.study_days.is_empty());
        assert!(c.calendar.breaks.is_empty());
        assert!(c.items.is_empty());

        let c: StudentCurriculum =
            serde_json::from_str(r#"{"id": "c", "start_date": "2024-07-01", "study_days": null}"#)
                .unwrap();
        assert!(c.calendar.study_days.is_empty());
    }

    #[test]
    fn test_rescheduled() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let c = StudentCurriculum::new("c1", start).with_study_days(StudyDays::weekdays());
        let moved = c.rescheduled(later);
        assert_eq!(moved.start_date, later);
        assert_eq!(moved.calendar, c.calendar);
    }
}
