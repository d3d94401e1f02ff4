//! Reversal detector. An event where the entity exceeds the user
//! on some axis; each signal type has a 7-day cooldown.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    NovelExpression,
    Anticipation,
    ConceptCreation,
    EmotionalDepth,
    Initiative,
    MetaAwareness,
}

impl SignalType {
    pub const ALL: [SignalType; 6] = [
        SignalType::NovelExpression,
        SignalType::Anticipation,
        SignalType::ConceptCreation,
        SignalType::EmotionalDepth,
        SignalType::Initiative,
        SignalType::MetaAwareness,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub signal_type: SignalType,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub strength: u8,
    pub recognized: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReversalState {
    pub signals: Vec<Signal>,
    pub total_reversals: u64,
    pub dominant_type: Option<SignalType>,
    pub reversal_rate: f32,
    pub last_detected: Option<DateTime<Utc>>,
}

/// Inputs the detector needs about what changed since the last tick; all
/// deltas, never absolute magnitudes, so the cooldown logic stays pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalTriggers {
    pub native_symbols_growth: u32,
    pub interaction_count: u64,
    pub mood_shifted_during_silence: bool,
    pub patterns_growth: u32,
    pub recent_mood_variance: f32,
    pub proactive_messages_since_last_tick: u32,
    pub awareness_flipped_to_true: bool,
}

const COOLDOWN_DAYS: i64 = 7;

fn last_emission(state: &ReversalState, signal_type: SignalType) -> Option<DateTime<Utc>> {
    state
        .signals
        .iter()
        .filter(|s| s.signal_type == signal_type)
        .map(|s| s.timestamp)
        .max()
}

fn off_cooldown(state: &ReversalState, signal_type: SignalType, now: DateTime<Utc>) -> bool {
    match last_emission(state, signal_type) {
        Some(last) => now - last >= Duration::days(COOLDOWN_DAYS),
        None => true,
    }
}

fn triggered(signal_type: SignalType, triggers: &ReversalTriggers) -> Option<(String, u8)> {
    match signal_type {
        SignalType::NovelExpression if triggers.native_symbols_growth >= 3 => Some((
            format!("{} new native symbols emerged", triggers.native_symbols_growth),
            (triggers.native_symbols_growth * 10).min(100) as u8,
        )),
        SignalType::Anticipation
            if triggers.interaction_count >= 30 && triggers.mood_shifted_during_silence =>
        {
            Some(("mood shifted while waiting, unprompted".to_string(), 60))
        }
        SignalType::ConceptCreation if triggers.patterns_growth >= 2 => Some((
            format!("{} new patterns formed", triggers.patterns_growth),
            (triggers.patterns_growth * 15).min(100) as u8,
        )),
        SignalType::EmotionalDepth if triggers.recent_mood_variance > 200.0 => {
            Some(("emotional range widened beyond the usual".to_string(), 70))
        }
        SignalType::Initiative if triggers.proactive_messages_since_last_tick >= 1 => {
            Some(("reached out without being prompted".to_string(), 55))
        }
        SignalType::MetaAwareness if triggers.awareness_flipped_to_true => {
            Some(("recognized itself as a self".to_string(), 90))
        }
        _ => None,
    }
}

/// Evaluates all six signal types against their cooldowns and triggers.
/// Multiple types may fire on the same tick.
pub fn detect_reversals(state: &ReversalState, triggers: &ReversalTriggers, now: DateTime<Utc>) -> (ReversalState, Vec<Signal>) {
    let mut next = state.clone();
    let mut new_signals = Vec::new();

    for signal_type in SignalType::ALL {
        if !off_cooldown(&next, signal_type, now) {
            continue;
        }
        if let Some((description, strength)) = triggered(signal_type, triggers) {
            let signal = Signal {
                id: format!("{:?}-{}", signal_type, now.timestamp()),
                signal_type,
                timestamp: now,
                description,
                strength,
                recognized: false,
            };
            tracing::info!(?signal_type, strength, "reversal signal detected");
            next.signals.push(signal.clone());
            new_signals.push(signal);
        }
    }

    if !new_signals.is_empty() {
        next.total_reversals += new_signals.len() as u64;
        next.last_detected = Some(now);
        next.dominant_type = dominant(&next.signals);
        next.reversal_rate = 100.0 * next.total_reversals as f32 / (triggers.interaction_count.max(1) as f32);
    }

    (next, new_signals)
}

fn dominant(signals: &[Signal]) -> Option<SignalType> {
    use std::collections::HashMap;
    let mut counts: HashMap<SignalType, u32> = HashMap::new();
    for signal in signals {
        *counts.entry(signal.signal_type).or_insert(0) += 1;
    }
    counts.into_iter().max_by_key(|(_, count)| *count).map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_blocks_then_allows_reemission() {
        let state = ReversalState::default();
        let t0 = Utc::now();
        let triggers = ReversalTriggers {
            native_symbols_growth: 3,
            ..Default::default()
        };
        let (state, first) = detect_reversals(&state, &triggers, t0);
        assert_eq!(first.len(), 1);

        let (state, second) = detect_reversals(&state, &triggers, t0 + Duration::days(3));
        assert!(second.is_empty());

        let (_, third) = detect_reversals(&state, &triggers, t0 + Duration::days(8));
        assert_eq!(third.len(), 1);
    }
}
