use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusDelta {
    pub mood: i16,
    pub energy: i16,
    pub curiosity: i16,
    pub comfort: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub mood: u8,
    pub energy: u8,
    pub curiosity: u8,
    pub comfort: u8,
    pub language_level: u8,
    pub perception_level: u8,
    pub growth_day: u64,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            mood: 50,
            energy: 50,
            curiosity: 70,
            comfort: 50,
            language_level: 0,
            perception_level: 0,
            growth_day: 0,
            last_interaction: None,
        }
    }
}

impl Status {
    /// Clamps all four scalar fields to `[0, 100]`. The single place bounds
    /// are enforced, per the mood delta application contract.
    pub fn clamp(&mut self) {
        self.mood = self.mood.min(100);
        self.energy = self.energy.min(100);
        self.curiosity = self.curiosity.min(100);
        self.comfort = self.comfort.min(100);
    }

    pub fn apply_delta(&self, delta: StatusDelta) -> Status {
        let mut next = self.clone();
        next.mood = clamp_u8(self.mood as i32 + delta.mood as i32);
        next.energy = clamp_u8(self.energy as i32 + delta.energy as i32);
        next.curiosity = clamp_u8(self.curiosity as i32 + delta.curiosity as i32);
        next.comfort = clamp_u8(self.comfort as i32 + delta.comfort as i32);
        next
    }

    /// Minutes since `last_interaction`, or the configured "never" sentinel
    /// when no interaction has ever happened.
    pub fn minutes_since_last_interaction(&self, now: DateTime<Utc>, sentinel: u32) -> u32 {
        match self.last_interaction {
            Some(at) => {
                let minutes = (now - at).num_minutes();
                if minutes < 0 {
                    0
                } else {
                    minutes as u32
                }
            }
            None => sentinel,
        }
    }
}
