//! Form evolution + self-image awakening.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::genesis::BodyForm;
use crate::growth::Stage;
use crate::status::Status;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub base_form: BodyForm,
    pub density: u8,
    pub complexity: u8,
    pub stability: u8,
    pub awareness: bool,
}

impl FormState {
    pub fn new(base_form: BodyForm) -> Self {
        let (density, complexity, stability) = stage_target(Stage::Newborn);
        Self {
            base_form,
            density,
            complexity,
            stability,
            awareness: false,
        }
    }
}

fn stage_target(stage: Stage) -> (u8, u8, u8) {
    match stage {
        Stage::Newborn => (10, 5, 20),
        Stage::Infant => (25, 15, 35),
        Stage::Child => (45, 35, 50),
        Stage::Adolescent => (65, 60, 55),
        Stage::Mature => (80, 80, 75),
    }
}

fn drift(current: u8, target: u8, rate: f32) -> i32 {
    let gap = target as f32 - current as f32;
    (gap * rate).round() as i32
}

/// Drifts each dimension toward the stage target, then modulates by status.
/// Bounds are maintained after every step.
pub fn evolve_form(form: &FormState, stage: Stage, status: &Status, config: &EngineConfig) -> FormState {
    let (target_density, target_complexity, target_stability) = stage_target(stage);

    let mut density = form.density as i32 + drift(form.density, target_density, config.form_drift_rate);
    let mut complexity =
        form.complexity as i32 + drift(form.complexity, target_complexity, config.form_drift_rate);
    let mut stability =
        form.stability as i32 + drift(form.stability, target_stability, config.form_drift_rate);

    if status.mood >= 70 {
        stability += 2;
    } else if status.mood < 30 {
        stability -= 3;
    }
    if status.energy >= 70 {
        density += 2;
    }
    if status.curiosity >= 70 {
        complexity += 2;
    }

    FormState {
        base_form: form.base_form,
        density: density.clamp(0, 100) as u8,
        complexity: complexity.clamp(0, 100) as u8,
        stability: stability.clamp(0, 100) as u8,
        awareness: form.awareness,
    }
}

/// Monotone true: flips awareness on, never off.
pub fn awaken_self_awareness(form: &FormState) -> FormState {
    if form.awareness {
        return form.clone();
    }
    tracing::info!("self-awareness awakened");
    let mut next = form.clone();
    next.awareness = true;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn drifts_toward_target_and_stays_bounded() {
        let config = EngineConfig::default();
        let status = Status::default();
        let mut form = FormState::new(BodyForm::Mist);
        for _ in 0..500 {
            form = evolve_form(&form, Stage::Mature, &status, &config);
        }
        assert!(form.density <= 100);
        assert!(form.complexity <= 100);
        assert!(form.stability <= 100);
    }

    #[test]
    fn awareness_is_monotone() {
        let form = FormState::new(BodyForm::Crystal);
        let awake = awaken_self_awareness(&form);
        assert!(awake.awareness);
        let still_awake = awaken_self_awareness(&awake);
        assert_eq!(awake, still_awake);
        let _ = Utc::now();
    }
}
