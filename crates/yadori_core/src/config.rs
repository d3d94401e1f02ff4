//! Tunables left as open questions, collected in one place so a
//! collaborator can retune the engine without touching evaluator code.

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Stand-in for `minutes_since_last_interaction` when `last_interaction`
    /// is the "never" sentinel. Any "large enough" value works; this is the
    /// reference value noted in the design notes.
    pub never_interaction_minutes: u32,
    /// Comfort starts decaying once absence exceeds this many minutes.
    pub comfort_decay_threshold_minutes: u32,
    /// Per-hour comfort decay magnitude once past the threshold.
    pub comfort_decay_per_hour: i16,
    /// Cap on the natural-decay comfort delta per tick.
    pub comfort_decay_cap: i16,
    /// Fraction of the gap to stage-target that Form drifts per heartbeat.
    pub form_drift_rate: f32,
    /// Hours represented by one heartbeat, used for day conversion sanity
    /// checks (growth_day itself is derived directly from elapsed time).
    pub heartbeat_hours: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            never_interaction_minutes: 999,
            comfort_decay_threshold_minutes: 360,
            comfort_decay_per_hour: 2,
            comfort_decay_cap: 30,
            form_drift_rate: 0.08,
            heartbeat_hours: 0.5,
        }
    }
}

impl EngineConfig {
    /// Overrides the "never" sentinel from `YADORI_NEVER_SENTINEL_MINUTES`,
    /// if set and parseable; otherwise keeps the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("YADORI_NEVER_SENTINEL_MINUTES") {
            if let Ok(value) = raw.parse() {
                config.never_interaction_minutes = value;
            } else {
                tracing::warn!(raw, "ignoring unparsable YADORI_NEVER_SENTINEL_MINUTES");
            }
        }
        config
    }
}
