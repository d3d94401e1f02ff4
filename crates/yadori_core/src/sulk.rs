//! Four-state sulk machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genesis::Temperament;
use crate::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    fn recovery_threshold(self) -> u32 {
        match self {
            Severity::Mild => 3,
            Severity::Moderate => 4,
            Severity::Severe => 5,
            Severity::None => 0,
        }
    }

    fn step_down(self) -> Severity {
        match self {
            Severity::Severe => Severity::Moderate,
            Severity::Moderate => Severity::Mild,
            Severity::Mild => Severity::None,
            Severity::None => Severity::None,
        }
    }

    fn from_score(score: i32) -> Severity {
        if score >= 4 {
            Severity::Severe
        } else if score >= 3 {
            Severity::Moderate
        } else if score >= 1 {
            Severity::Mild
        } else {
            Severity::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SulkState {
    pub is_sulking: bool,
    pub severity: Severity,
    pub recovery_interactions: u32,
    pub sulking_since: Option<DateTime<Utc>>,
}

impl Default for SulkState {
    fn default() -> Self {
        Self {
            is_sulking: false,
            severity: Severity::None,
            recovery_interactions: 0,
            sulking_since: None,
        }
    }
}

fn sulk_score(status: &Status, temperament: Temperament) -> i32 {
    let mut score = 0;
    if status.comfort < 20 {
        score += 2;
    }
    if status.mood < 30 {
        score += 2;
    }
    score += match temperament {
        Temperament::CuriousCautious => 1,
        Temperament::CalmObservant => -1,
        Temperament::BoldImpulsive | Temperament::RestlessExploratory => 0,
    };
    score.max(0)
}

fn onset(severity: Severity, now: DateTime<Utc>) -> SulkState {
    tracing::debug!(?severity, "sulk onset");
    SulkState {
        is_sulking: true,
        severity,
        recovery_interactions: 0,
        sulking_since: Some(now),
    }
}

/// Heartbeat path: onset only, never escalates or recovers an already
/// sulking entity (recovery happens only on interaction).
pub fn process_sulk_heartbeat(
    sulk: &SulkState,
    status: &Status,
    temperament: Temperament,
    minutes_since_last_interaction: u32,
    now: DateTime<Utc>,
) -> SulkState {
    if sulk.is_sulking {
        return sulk.clone();
    }

    let score = sulk_score(status, temperament);
    let low_comfort_mood = status.comfort < 20 && status.mood < 30;
    let prolonged_absence = minutes_since_last_interaction > 720 && status.comfort < 40;

    if low_comfort_mood || prolonged_absence {
        let severity = Severity::from_score(score).max(Severity::Mild);
        onset(severity, now)
    } else {
        sulk.clone()
    }
}

/// Interaction path: steps severity down one rank once `comfort >= 40` and
/// the recovery-interaction threshold for the current severity is reached.
pub fn process_sulk_interaction(sulk: &SulkState, comfort: u8) -> SulkState {
    if !sulk.is_sulking {
        return sulk.clone();
    }

    let mut next = sulk.clone();
    next.recovery_interactions += 1;

    if comfort >= 40 && next.recovery_interactions >= sulk.severity.recovery_threshold() {
        let new_severity = sulk.severity.step_down();
        next.recovery_interactions = 0;
        next.severity = new_severity;
        if new_severity == Severity::None {
            tracing::debug!("sulk recovered");
            next.is_sulking = false;
            next.sulking_since = None;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_law_with_sufficient_comfort() {
        let now = Utc::now();
        let mut sulk = SulkState {
            is_sulking: true,
            severity: Severity::Mild,
            recovery_interactions: 0,
            sulking_since: Some(now),
        };
        for _ in 0..3 {
            sulk = process_sulk_interaction(&sulk, 40);
        }
        assert_eq!(sulk.severity, Severity::None);
        assert!(!sulk.is_sulking);
    }

    #[test]
    fn recovery_law_blocked_by_low_comfort() {
        let now = Utc::now();
        let mut sulk = SulkState {
            is_sulking: true,
            severity: Severity::Mild,
            recovery_interactions: 0,
            sulking_since: Some(now),
        };
        for _ in 0..3 {
            sulk = process_sulk_interaction(&sulk, 20);
        }
        assert!(sulk.is_sulking);
    }
}
