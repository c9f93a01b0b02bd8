//! Pacing configuration.
//!
//! Two policies decide how much content lands on one study day:
//! - **Section**: a number of unit groups per day (valid: 0.5, 1, 2).
//! - **Count**: a target number of words per day, with overflow tolerance.
//!
//! Raw pacing values arrive from storage and may be missing or
//! implausible. [`Pacing::resolve`] turns them into a [`ResolvedPacing`]
//! that the allocator can always run with.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::CurriculumError;

/// Pacing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyAmountType {
    /// Unit groups per day.
    Section,
    /// Words per day.
    Count,
}

/// Raw pacing configuration as stored for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    /// Pacing policy.
    pub amount_type: DailyAmountType,
    /// Pacing quantity. `None` = use the policy default.
    #[serde(default)]
    pub daily_amount: Option<f64>,
}

/// The valid domain of section-mode amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionAmount {
    /// Half a unit group per day. Unit groups are never split, so this
    /// schedules one group per day.
    Half,
    /// One unit group per day.
    One,
    /// Two unit groups per day.
    Two,
}

/// Pacing after defaults and sanity checks are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedPacing {
    /// Number of unit groups per day (always >= 1).
    UnitGroups(usize),
    /// Target words per day (always > 0).
    Words(f64),
}

impl Pacing {
    /// Section-mode pacing.
    pub fn sections(amount: f64) -> Self {
        Self {
            amount_type: DailyAmountType::Section,
            daily_amount: Some(amount),
        }
    }

    /// Count-mode pacing.
    pub fn words(amount: f64) -> Self {
        Self {
            amount_type: DailyAmountType::Count,
            daily_amount: Some(amount),
        }
    }

    /// Pacing with no amount (policy default applies).
    pub fn default_for(amount_type: DailyAmountType) -> Self {
        Self {
            amount_type,
            daily_amount: None,
        }
    }

    /// Applies defaults and clamps implausible values.
    ///
    /// Never fails: a missing or non-positive amount becomes the policy
    /// default, and a section-mode amount outside {0.5, 1, 2} becomes
    /// the section default.
    pub fn resolve(&self, config: &EngineConfig) -> ResolvedPacing {
        let amount = self.daily_amount.filter(|a| a.is_finite() && *a > 0.0);
        match self.amount_type {
            DailyAmountType::Section => {
                let section_amount = match amount {
                    Some(a) => SectionAmount::try_from(a).ok().or_else(|| {
                        tracing::warn!(
                            daily_amount = a,
                            "implausible section-mode amount, using default"
                        );
                        None
                    }),
                    None => {
                        tracing::warn!("missing section-mode amount, using default");
                        None
                    }
                };
                let groups = match section_amount {
                    Some(sa) => sa.groups_per_day(),
                    None => SectionAmount::try_from(config.default_section_amount)
                        .map_or(1, SectionAmount::groups_per_day),
                };
                ResolvedPacing::UnitGroups(groups)
            }
            DailyAmountType::Count => match amount {
                Some(a) => ResolvedPacing::Words(a),
                None => {
                    tracing::warn!(
                        daily_amount = ?self.daily_amount,
                        "missing or non-positive count-mode amount, using default"
                    );
                    ResolvedPacing::Words(config.default_count_amount)
                }
            },
        }
    }
}

impl SectionAmount {
    /// Numeric value of this amount.
    pub fn value(self) -> f64 {
        match self {
            Self::Half => 0.5,
            Self::One => 1.0,
            Self::Two => 2.0,
        }
    }

    /// Whole unit groups scheduled per day.
    pub fn groups_per_day(self) -> usize {
        match self {
            Self::Half | Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<f64> for SectionAmount {
    type Error = CurriculumError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.5 {
            Ok(Self::Half)
        } else if value == 1.0 {
            Ok(Self::One)
        } else if value == 2.0 {
            Ok(Self::Two)
        } else {
            Err(CurriculumError::InvalidSectionAmount(value))
        }
    }
}

impl ResolvedPacing {
    /// Fingerprint-friendly representation.
    pub(crate) fn key(&self) -> (u8, u64) {
        match self {
            Self::UnitGroups(n) => (0, *n as u64),
            Self::Words(w) => (1, w.to_bits()),
        }
    }
}
