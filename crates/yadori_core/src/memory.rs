//! Memory data model (`MemoryState`). The hot/warm/cold consolidation
//! pipeline itself lives in `yadori_memory`, which depends on this crate —
//! keeping the value type here and the orchestration logic one layer up
//! avoids a core → memory → core cycle.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub const HOT_CAPACITY: usize = 10;
pub const WARM_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotEntry {
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_id: String,
    pub entries: usize,
    pub summary: String,
    pub avg_mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month_id: String,
    pub weeks: u32,
    pub summary: String,
    pub avg_mood: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryState {
    pub hot: VecDeque<HotEntry>,
    pub warm: VecDeque<WeeklySummary>,
    pub cold: Vec<MonthlySummary>,
    pub notes: Vec<String>,
}

impl MemoryState {
    pub fn total_size(&self) -> usize {
        self.hot.len() + self.warm.len() + self.cold.len() + self.notes.len()
    }

    /// Hot entries recorded on `date` (a `YYYY-MM-DD` string), for diary
    /// lookup by date. Fails on a date string that doesn't parse.
    pub fn hot_entries_on(&self, date: &str) -> CoreResult<Vec<&HotEntry>> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidTimestamp(date.to_string()))?;
        Ok(self.hot.iter().filter(|e| e.timestamp.date_naive() == date).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, mood: u8) -> HotEntry {
        HotEntry {
            timestamp: DateTime::parse_from_rfc3339(&format!("2026-02-{day:02}T12:00:00Z"))
                .unwrap()
                .with_timezone(&Utc),
            summary: "entry".to_string(),
            mood,
        }
    }

    #[test]
    fn finds_entries_on_a_given_date() {
        let mut state = MemoryState::default();
        state.hot.push_back(entry(1, 10));
        state.hot.push_back(entry(1, 20));
        state.hot.push_back(entry(2, 30));

        let found = state.hot_entries_on("2026-02-01").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].mood, 10);
    }

    #[test]
    fn rejects_an_unparseable_date() {
        let state = MemoryState::default();
        let err = state.hot_entries_on("not-a-date").unwrap_err();
        assert_eq!(err, CoreError::InvalidTimestamp("not-a-date".to_string()));
    }
}
