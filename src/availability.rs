//! Weekly availability templates.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A contiguous availability window within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// A week of availability windows.
///
/// Seven slots, Sunday-first, matching the wire format of the scheduling
/// API. An empty slot means the day is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyTemplate(pub [Vec<TimeRange>; 7]);

impl WeeklyTemplate {
    /// The system default: Monday through Friday, 09:00–17:00.
    pub fn default_working_week() -> Self {
        let working_day = vec![TimeRange::new(
            NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(17, 0, 0).expect("valid time"),
        )];
        Self([
            Vec::new(),
            working_day.clone(),
            working_day.clone(),
            working_day.clone(),
            working_day.clone(),
            working_day,
            Vec::new(),
        ])
    }

    /// Number of days with at least one availability window.
    pub fn available_days(&self) -> usize {
        self.0.iter().filter(|day| !day.is_empty()).count()
    }
}
