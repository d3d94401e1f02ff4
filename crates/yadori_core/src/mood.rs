//! Pure mood evaluators.

use crate::config::EngineConfig;
use crate::genesis::Temperament;
use crate::status::StatusDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionContext {
    pub minutes_since_last_interaction: u32,
    pub user_initiated: bool,
    pub message_length: u32,
}

fn temperament_scale(temperament: Temperament, mut delta: StatusDelta) -> StatusDelta {
    match temperament {
        Temperament::CuriousCautious => {
            delta.curiosity = (delta.curiosity as f32 * 1.2) as i16;
            delta.comfort = (delta.comfort as f32 * 1.2) as i16;
        }
        Temperament::BoldImpulsive => {
            delta.mood = (delta.mood as f32 * 1.3) as i16;
            delta.energy = (delta.energy as f32 * 1.2) as i16;
        }
        Temperament::CalmObservant => {
            delta.mood = (delta.mood as f32 * 0.7) as i16;
            delta.comfort = (delta.comfort as f32 * 0.6) as i16;
        }
        Temperament::RestlessExploratory => {
            delta.curiosity = (delta.curiosity as f32 * 1.5) as i16;
        }
    }
    delta
}

/// Assembles a base delta from interaction context, then scales it per
/// dimension by the temperament matrix.
pub fn compute_interaction_effect(
    ctx: InteractionContext,
    temperament: Temperament,
) -> StatusDelta {
    let mut delta = StatusDelta::default();

    if ctx.user_initiated {
        delta.mood += 5;
        delta.comfort += 5;
    } else {
        delta.comfort += 2;
    }

    delta.energy += 2;
    delta.curiosity += 1 + (ctx.message_length / 50).min(10) as i16;

    if ctx.minutes_since_last_interaction > 360 {
        let over = ctx.minutes_since_last_interaction - 360;
        delta.comfort -= ((over / 60) as i16).min(20);
    }

    temperament_scale(temperament, delta)
}

/// Non-positive comfort delta, monotone non-decreasing in magnitude as
/// `minutes_absent` grows. Other dimensions drift modestly toward neutral.
pub fn compute_natural_decay(minutes_absent: u32, config: &EngineConfig) -> StatusDelta {
    let comfort = if minutes_absent <= config.comfort_decay_threshold_minutes {
        0
    } else {
        let over_hours = (minutes_absent - config.comfort_decay_threshold_minutes) / 60;
        -((over_hours as i16) * config.comfort_decay_per_hour).min(config.comfort_decay_cap)
    };
    StatusDelta {
        mood: 0,
        energy: 0,
        curiosity: 0,
        comfort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_is_monotone_non_decreasing_in_magnitude() {
        let config = EngineConfig::default();
        let mut prev = 0i16;
        for minutes in (0..=3000).step_by(60) {
            let delta = compute_natural_decay(minutes, &config);
            assert!(delta.comfort <= 0);
            assert!(-delta.comfort >= -prev);
            prev = delta.comfort;
        }
    }

    #[test]
    fn bold_impulsive_amplifies_mood_and_energy() {
        let ctx = InteractionContext {
            minutes_since_last_interaction: 10,
            user_initiated: true,
            message_length: 20,
        };
        let base = compute_interaction_effect(ctx, Temperament::CalmObservant);
        let bold = compute_interaction_effect(ctx, Temperament::BoldImpulsive);
        assert!(bold.mood > base.mood);
        assert!(bold.energy >= base.energy);
    }
}
