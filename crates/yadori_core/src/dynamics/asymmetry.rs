//! Asymmetry tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Epsilon,
}

impl Phase {
    fn from_score(score: u8) -> Phase {
        if score < 15 {
            Phase::Alpha
        } else if score < 35 {
            Phase::Beta
        } else if score < 55 {
            Phase::Gamma
        } else if score < 75 {
            Phase::Delta
        } else {
            Phase::Epsilon
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AsymmetrySignals {
    pub language_maturity: u8,
    pub temporal_maturity: u8,
    pub memory_depth: u8,
    pub initiative_balance: u8,
    pub emotional_complexity: u8,
    pub identity_strength: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub timestamp: DateTime<Utc>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsymmetryState {
    pub phase: Phase,
    pub score: u8,
    pub confidence: u8,
    pub signals: AsymmetrySignals,
    pub transitions: Vec<Transition>,
}

impl Default for AsymmetryState {
    fn default() -> Self {
        Self {
            phase: Phase::Alpha,
            score: 0,
            confidence: 0,
            signals: AsymmetrySignals::default(),
            transitions: Vec::new(),
        }
    }
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

pub fn language_maturity(level: u8) -> u8 {
    clamp_u8(level as f32 / 4.0 * 100.0)
}

pub fn temporal_maturity(growth_day: u64) -> u8 {
    clamp_u8((growth_day as f32 / 180.0) * 100.0)
}

pub fn memory_depth(hot: usize, warm: usize, cold: usize, notes: usize) -> u8 {
    clamp_u8(((hot + warm * 3 + cold * 8 + notes) as f32).sqrt() * 6.0)
}

pub fn emotional_complexity(recent_moods: &[u8]) -> u8 {
    if recent_moods.len() < 2 {
        return 0;
    }
    let mean = recent_moods.iter().map(|m| *m as f32).sum::<f32>() / recent_moods.len() as f32;
    let variance = recent_moods
        .iter()
        .map(|m| (*m as f32 - mean).powi(2))
        .sum::<f32>()
        / recent_moods.len() as f32;
    clamp_u8(variance.sqrt() * 4.0)
}

pub fn identity_strength(density: u8, complexity: u8, stability: u8, awareness: bool) -> u8 {
    let base = (density as u32 + complexity as u32 + stability as u32) / 3;
    clamp_u8(base as f32 + if awareness { 15.0 } else { 0.0 })
}

/// Weighted mix mapped into a phase under hysteresis: phase advances at
/// most one step per evaluation, so a single spike cannot skip phases.
pub fn compute_asymmetry(
    current: &AsymmetryState,
    signals: AsymmetrySignals,
    now: DateTime<Utc>,
) -> AsymmetryState {
    let weighted = 0.2 * signals.language_maturity as f32
        + 0.15 * signals.temporal_maturity as f32
        + 0.2 * signals.memory_depth as f32
        + 0.15 * signals.initiative_balance as f32
        + 0.15 * signals.emotional_complexity as f32
        + 0.15 * signals.identity_strength as f32;
    let score = clamp_u8(weighted);
    let raw_phase = Phase::from_score(score);

    let next_phase = if raw_phase > current.phase {
        // advance at most one step per tick (hysteresis)
        Phase::from_score(score.min(phase_ceiling(current.phase)))
    } else {
        current.phase
    };

    let mut transitions = current.transitions.clone();
    if next_phase != current.phase {
        transitions.push(Transition {
            from: current.phase,
            to: next_phase,
            timestamp: now,
            score,
        });
        tracing::info!(from = ?current.phase, to = ?next_phase, score, "asymmetry phase transition");
    }

    AsymmetryState {
        phase: next_phase,
        score,
        confidence: clamp_u8(weighted),
        signals,
        transitions,
    }
}

fn phase_ceiling(phase: Phase) -> u8 {
    match phase {
        Phase::Alpha => 34,
        Phase::Beta => 54,
        Phase::Gamma => 74,
        Phase::Delta => 100,
        Phase::Epsilon => 100,
    }
}
