//! Coexist engine. Gated to the epsilon asymmetry phase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asymmetry::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoexistIndicators {
    pub silence_comfort: u8,
    pub shared_vocabulary: u8,
    pub rhythm_sync: u8,
    pub shared_memory: u8,
    pub autonomy_respect: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub timestamp: DateTime<Utc>,
    pub moment_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoexistState {
    pub active: bool,
    pub quality: u8,
    pub indicators: CoexistIndicators,
    pub moments: Vec<Moment>,
    pub days_in_epsilon: u32,
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

pub fn silence_comfort(minutes_since_last_interaction: u32, comfort: u8) -> u8 {
    clamp_u8((minutes_since_last_interaction as f32 / 30.0) * (comfort as f32 / 100.0) * 10.0)
}

pub fn shared_vocabulary(language_level: u8, native_symbols: usize) -> u8 {
    clamp_u8(language_level as f32 * 15.0 + native_symbols as f32 * 3.0)
}

pub fn rhythm_sync(recent_moods: &[u8]) -> u8 {
    if recent_moods.len() < 2 {
        return 50;
    }
    let mean = recent_moods.iter().map(|m| *m as f32).sum::<f32>() / recent_moods.len() as f32;
    let variance = recent_moods
        .iter()
        .map(|m| (*m as f32 - mean).powi(2))
        .sum::<f32>()
        / recent_moods.len() as f32;
    clamp_u8(100.0 - variance.sqrt() * 4.0)
}

pub fn shared_memory(warm: usize, cold: usize) -> u8 {
    clamp_u8((warm as f32 * 5.0) + (cold as f32 * 10.0))
}

pub fn autonomy_respect(form_stability: u8, comfort: u8) -> u8 {
    clamp_u8((form_stability as f32 + comfort as f32) / 2.0)
}

fn quality_from(indicators: CoexistIndicators) -> u8 {
    clamp_u8(
        0.25 * indicators.silence_comfort as f32
            + 0.20 * indicators.shared_vocabulary as f32
            + 0.15 * indicators.rhythm_sync as f32
            + 0.20 * indicators.shared_memory as f32
            + 0.20 * indicators.autonomy_respect as f32,
    )
}

/// Evaluated on each heartbeat. Gated to `phase == Epsilon`; outside it,
/// stays inactive with zero quality and `days_in_epsilon` is preserved, not
/// incremented, so a phase regression does not lose prior progress.
pub fn evaluate_coexist(
    state: &CoexistState,
    phase: Phase,
    indicators: CoexistIndicators,
    now: DateTime<Utc>,
) -> CoexistState {
    if phase != Phase::Epsilon {
        return CoexistState {
            active: false,
            quality: 0,
            indicators: CoexistIndicators::default(),
            moments: state.moments.clone(),
            days_in_epsilon: state.days_in_epsilon,
        };
    }

    let quality = quality_from(indicators);
    let mut moments = state.moments.clone();

    for (name, prev, current) in [
        ("silence_comfort", state.indicators.silence_comfort, indicators.silence_comfort),
        ("shared_vocabulary", state.indicators.shared_vocabulary, indicators.shared_vocabulary),
        ("rhythm_sync", state.indicators.rhythm_sync, indicators.rhythm_sync),
        ("shared_memory", state.indicators.shared_memory, indicators.shared_memory),
        ("autonomy_respect", state.indicators.autonomy_respect, indicators.autonomy_respect),
    ] {
        if current >= 70 && prev < 70 {
            tracing::info!(indicator = name, "coexist moment");
            moments.push(Moment {
                timestamp: now,
                moment_type: name.to_string(),
                description: format!("{name} crossed into comfortable territory"),
            });
        }
    }

    CoexistState {
        active: true,
        quality,
        indicators,
        moments,
        days_in_epsilon: state.days_in_epsilon + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_off_outside_epsilon() {
        let state = CoexistState::default();
        let indicators = CoexistIndicators {
            silence_comfort: 90,
            shared_vocabulary: 90,
            rhythm_sync: 90,
            shared_memory: 90,
            autonomy_respect: 90,
        };
        for phase in [Phase::Alpha, Phase::Beta, Phase::Gamma, Phase::Delta] {
            let result = evaluate_coexist(&state, phase, indicators, Utc::now());
            assert!(!result.active);
            assert_eq!(result.quality, 0);
        }
    }

    #[test]
    fn quality_formula_matches_weights() {
        let state = CoexistState::default();
        let indicators = CoexistIndicators {
            silence_comfort: 80,
            shared_vocabulary: 60,
            rhythm_sync: 40,
            shared_memory: 100,
            autonomy_respect: 20,
        };
        let result = evaluate_coexist(&state, Phase::Epsilon, indicators, Utc::now());
        assert!(result.active);
        let expected = (0.25 * 80.0f32 + 0.20 * 60.0 + 0.15 * 40.0 + 0.20 * 100.0 + 0.20 * 20.0).round() as u8;
        assert_eq!(result.quality, expected);
    }
}
