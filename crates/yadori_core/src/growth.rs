//! Day→stage map + milestones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Newborn,
    Infant,
    Child,
    Adolescent,
    Mature,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Newborn => "newborn",
            Stage::Infant => "infant",
            Stage::Child => "child",
            Stage::Adolescent => "adolescent",
            Stage::Mature => "mature",
        }
    }
}

pub fn compute_stage(growth_day: u64) -> Stage {
    if growth_day < 7 {
        Stage::Newborn
    } else if growth_day < 21 {
        Stage::Infant
    } else if growth_day < 60 {
        Stage::Child
    } else if growth_day < 120 {
        Stage::Adolescent
    } else {
        Stage::Mature
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub label: String,
    pub achieved_day: u64,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthState {
    pub stage: Option<Stage>,
    pub milestones: Vec<Milestone>,
}

impl GrowthState {
    pub fn new() -> Self {
        Self {
            stage: Some(Stage::Newborn),
            milestones: Vec::new(),
        }
    }

    pub fn has_milestone(&self, id: &str) -> bool {
        self.milestones.iter().any(|m| m.id == id)
    }

    /// Appends a milestone if `id` has never been recorded. Returns the new
    /// milestone when it was actually appended.
    pub fn record_milestone(
        &mut self,
        id: &str,
        label: &str,
        day: u64,
        now: DateTime<Utc>,
    ) -> Option<Milestone> {
        if self.has_milestone(id) {
            return None;
        }
        let milestone = Milestone {
            id: id.to_string(),
            label: label.to_string(),
            achieved_day: day,
            achieved_at: now,
        };
        tracing::info!(id, day, "milestone achieved");
        self.milestones.push(milestone.clone());
        Some(milestone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_boundaries() {
        assert_eq!(compute_stage(0), Stage::Newborn);
        assert_eq!(compute_stage(6), Stage::Newborn);
        assert_eq!(compute_stage(7), Stage::Infant);
        assert_eq!(compute_stage(20), Stage::Infant);
        assert_eq!(compute_stage(21), Stage::Child);
        assert_eq!(compute_stage(59), Stage::Child);
        assert_eq!(compute_stage(60), Stage::Adolescent);
        assert_eq!(compute_stage(119), Stage::Adolescent);
        assert_eq!(compute_stage(120), Stage::Mature);
    }

    #[test]
    fn milestone_appended_at_most_once() {
        let mut growth = GrowthState::new();
        let now = Utc::now();
        assert!(growth.record_milestone("first_breath", "First Breath", 0, now).is_some());
        assert!(growth.record_milestone("first_breath", "First Breath", 0, now).is_none());
        assert_eq!(growth.milestones.len(), 1);
    }
}
