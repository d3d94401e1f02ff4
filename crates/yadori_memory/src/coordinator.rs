//! Status Manager orchestrator. Linearises every sub-system in a fixed
//! order so that later sub-systems always observe the outputs of earlier
//! ones within the same tick.

use chrono::{DateTime, Datelike, Timelike, Utc};

use yadori_core::config::EngineConfig;
use yadori_core::dynamics::asymmetry::{self, AsymmetrySignals};
use yadori_core::dynamics::coexist::{self, CoexistIndicators};
use yadori_core::dynamics::reversal::{self, ReversalTriggers};
use yadori_core::first_encounter::{self, Reaction};
use yadori_core::form;
use yadori_core::growth::{self, Milestone};
use yadori_core::language;
use yadori_core::memory::HotEntry;
use yadori_core::mood::{self, InteractionContext};
use yadori_core::state::EntityState;
use yadori_core::sulk::{self, Severity};

use yadori_expression::soul::render_soul_evil;

use crate::consolidation::{add_hot, consolidate_to_warm};

const MORNING_WINDOW: (u32, u32) = (6, 8);
const NIGHT_WINDOW: (u32, u32) = (22, 24);
const EVENING_WINDOW: (u32, u32) = (19, 21);

fn in_window(hour: u32, window: (u32, u32)) -> bool {
    hour >= window.0 && hour < window.1
}

#[derive(Debug, Clone)]
pub struct HeartbeatResult {
    pub state: EntityState,
    pub diary: Option<(String, String)>,
    pub wake_signal: bool,
    pub sleep_signal: bool,
    pub new_milestones: Vec<Milestone>,
    pub new_reversals: Vec<yadori_core::dynamics::Signal>,
    pub active_soul_file: String,
    pub soul_evil_md: Option<String>,
    pub memory_consolidated: bool,
}

#[derive(Debug, Clone)]
pub struct InteractionResult {
    pub state: EntityState,
    pub new_milestones: Vec<Milestone>,
    pub active_soul_file: String,
    pub first_encounter: Option<Reaction>,
    pub first_encounter_diary_md: Option<String>,
}

fn active_soul_file(is_sulking: bool) -> String {
    if is_sulking {
        "SOUL_EVIL.md".to_string()
    } else {
        "SOUL.md".to_string()
    }
}

fn recent_moods(state: &EntityState) -> Vec<u8> {
    state.memory.hot.iter().map(|e| e.mood).collect()
}

/// Raw (unscaled) variance of recent moods, for the reversal detector's
/// `emotional_depth` threshold. `asymmetry::emotional_complexity` computes a
/// clamped/scaled version of the same statistic for a different consumer.
fn mood_variance(moods: &[u8]) -> f32 {
    if moods.len() < 2 {
        return 0.0;
    }
    let mean = moods.iter().map(|m| *m as f32).sum::<f32>() / moods.len() as f32;
    moods.iter().map(|m| (*m as f32 - mean).powi(2)).sum::<f32>() / moods.len() as f32
}

fn asymmetry_signals(state: &EntityState, growth_day: u64) -> AsymmetrySignals {
    AsymmetrySignals {
        language_maturity: asymmetry::language_maturity(state.language.level),
        temporal_maturity: asymmetry::temporal_maturity(growth_day),
        memory_depth: asymmetry::memory_depth(
            state.memory.hot.len(),
            state.memory.warm.len(),
            state.memory.cold.len(),
            state.memory.notes.len(),
        ),
        initiative_balance: (10 + state.reversal.total_reversals.min(90)) as u8,
        emotional_complexity: asymmetry::emotional_complexity(&recent_moods(state)),
        identity_strength: asymmetry::identity_strength(
            state.form.density,
            state.form.complexity,
            state.form.stability,
            state.form.awareness,
        ),
    }
}

fn coexist_indicators(state: &EntityState, minutes_since_last_interaction: u32) -> CoexistIndicators {
    CoexistIndicators {
        silence_comfort: coexist::silence_comfort(minutes_since_last_interaction, state.status.comfort),
        shared_vocabulary: coexist::shared_vocabulary(
            state.language.level,
            state.language.native_symbols.len(),
        ),
        rhythm_sync: coexist::rhythm_sync(&recent_moods(state)),
        shared_memory: coexist::shared_memory(state.memory.warm.len(), state.memory.cold.len()),
        autonomy_respect: coexist::autonomy_respect(state.form.stability, state.status.comfort),
    }
}

/// Time-driven tick: the heartbeat pipeline.
pub fn process_heartbeat(state: &EntityState, now: DateTime<Utc>, config: &EngineConfig) -> HeartbeatResult {
    let mut next = state.clone();

    // 1. growth_day
    let growth_day = next.growth_day_at(now);
    next.status.growth_day = growth_day;

    // 2. mood natural decay
    let minutes_absent = next.status.minutes_since_last_interaction(now, config.never_interaction_minutes);
    let decay = mood::compute_natural_decay(minutes_absent, config);
    next.status = next.status.apply_delta(decay);

    // 3. sulk evaluation
    next.sulk = sulk::process_sulk_heartbeat(
        &next.sulk,
        &next.status,
        next.seed.temperament,
        minutes_absent,
        now,
    );

    // 4. form evolution
    let stage = growth::compute_stage(growth_day);
    next.form = form::evolve_form(&next.form, stage, &next.status, config);
    if next.status.mood >= 85 && !next.form.awareness && stage >= growth::Stage::Child {
        next.form = form::awaken_self_awareness(&next.form);
    }

    // 5. perception level advance
    next.perception_growth.level = yadori_core::perception::advance_perception_level(&next.perception_growth, growth_day);

    // 6. language re-evaluation
    let mut new_milestones = Vec::new();
    let new_level = language::evaluate_language_level(&next.language, growth_day);
    for level in (next.language.level + 1)..=new_level {
        if let Some(m) = next.growth.record_milestone(
            &format!("language_level_{level}"),
            &format!("Reached language level {level}"),
            growth_day,
            now,
        ) {
            new_milestones.push(m);
        }
    }
    next.language.level = new_level;
    next.status.language_level = new_level;

    // 7. growth stage + milestones
    if next.growth.stage != Some(stage) {
        next.growth.stage = Some(stage);
        if let Some(m) = next
            .growth
            .record_milestone(&format!("stage_{}", stage.name()), &format!("Entered {} stage", stage.name()), growth_day, now)
        {
            new_milestones.push(m);
        }
    }
    if next.form.awareness && !state.form.awareness {
        if let Some(m) = next.growth.record_milestone("self_aware", "Became self-aware", growth_day, now) {
            new_milestones.push(m);
        }
    }

    // 8. dynamics
    let signals = asymmetry_signals(&next, growth_day);
    next.asymmetry = asymmetry::compute_asymmetry(&next.asymmetry, signals, now);

    let mood_shift = (next.status.mood as i16 - state.status.mood as i16).unsigned_abs();
    let triggers = ReversalTriggers {
        awareness_flipped_to_true: next.form.awareness && !state.form.awareness,
        interaction_count: next.language.total_interactions,
        native_symbols_growth: (next.language.native_symbols.len() as u32)
            .saturating_sub(state.language.native_symbols.len() as u32),
        patterns_growth: (next.language.patterns.len() as u32)
            .saturating_sub(state.language.patterns.len() as u32),
        mood_shifted_during_silence: minutes_absent > 360 && mood_shift >= 10,
        recent_mood_variance: mood_variance(&recent_moods(&next)),
        // Proactive-message counts are a collaborator-side fact (whether a
        // wake/sleep/diary signal was actually delivered to the user); the
        // heartbeat API has no channel for it, so `initiative` is only
        // reachable via a caller that tracks that and invokes
        // `reversal::detect_reversals` directly with it populated.
        proactive_messages_since_last_tick: 0,
    };
    let (reversal_state, new_reversals) = reversal::detect_reversals(&next.reversal, &triggers, now);
    next.reversal = reversal_state;

    let indicators = coexist_indicators(&next, minutes_absent);
    next.coexist = coexist::evaluate_coexist(&next.coexist, next.asymmetry.phase, indicators, now);

    // 9. time-of-day signals. Proactive signals go silent at severity
    // "severe" — silence is itself the expression.
    let proactive_suppressed = next.sulk.severity == Severity::Severe;
    let hour = now.hour();
    let wake_signal = !proactive_suppressed && in_window(hour, MORNING_WINDOW);
    let sleep_signal = !proactive_suppressed && in_window(hour, NIGHT_WINDOW);
    let in_evening = !proactive_suppressed && in_window(hour, EVENING_WINDOW);
    let is_sunday = now.weekday().num_days_from_monday() == 6;
    let should_consolidate = is_sunday && in_window(hour, NIGHT_WINDOW) && !next.memory.hot.is_empty();

    let mut memory_consolidated = false;
    if should_consolidate {
        let week_id = format!("{}-W{:02}", now.iso_week().year(), now.iso_week().week());
        next.memory = consolidate_to_warm(&next.memory, &week_id);
        memory_consolidated = true;
        tracing::info!(week_id, "weekly memory consolidation ran");
    }

    let diary = if in_evening {
        Some((now.format("%Y-%m-%d").to_string(), yadori_expression::render_diary(&next, now.date_naive())))
    } else {
        None
    };

    // 10-11. active soul file / soul evil
    let soul_file = active_soul_file(next.sulk.is_sulking);
    let soul_evil_md = if next.sulk.is_sulking {
        Some(render_soul_evil(next.seed.perception, next.sulk.severity))
    } else {
        None
    };

    HeartbeatResult {
        state: next,
        diary,
        wake_signal,
        sleep_signal,
        new_milestones,
        new_reversals,
        active_soul_file: soul_file,
        soul_evil_md,
        memory_consolidated,
    }
}

/// Event-driven tick: the interaction pipeline.
pub fn process_interaction(
    state: &EntityState,
    ctx: InteractionContext,
    now: DateTime<Utc>,
    summary: Option<String>,
) -> InteractionResult {
    let mut next = state.clone();
    let growth_day = next.status.growth_day;
    let mut new_milestones = Vec::new();
    let mut first_encounter = None;
    let mut first_encounter_diary_md = None;

    // 1. first-encounter detection
    if next.language.total_interactions == 0 {
        let reaction = first_encounter::generate_first_encounter(next.seed.perception, next.seed.temperament, now);
        let (memory, _) = add_hot(
            &next.memory,
            HotEntry {
                timestamp: now,
                summary: reaction.memory_imprint.summary.clone(),
                mood: reaction.memory_imprint.mood,
            },
        );
        next.memory = memory;
        next.status = next.status.apply_delta(reaction.status_effect);
        first_encounter_diary_md = Some(first_encounter::format_first_encounter_diary(
            &reaction,
            next.seed.perception,
            next.seed.temperament,
            now,
        ));
        first_encounter = Some(reaction);
    }

    // 2. mood delta from interaction context
    let delta = mood::compute_interaction_effect(ctx, next.seed.temperament);
    next.status = next.status.apply_delta(delta);

    // 3. record hot memory
    let summary_text = summary.unwrap_or_else(|| "an exchange with the user".to_string());
    let (memory, _) = add_hot(
        &next.memory,
        HotEntry {
            timestamp: now,
            summary: summary_text,
            mood: next.status.mood,
        },
    );
    next.memory = memory;

    // 4. status bookkeeping
    next.status.last_interaction = Some(now);
    next.language.total_interactions += 1;
    if next.language.total_interactions == 1 {
        if let Some(m) = next.growth.record_milestone("first_interaction", "First Interaction", growth_day, now) {
            new_milestones.push(m);
        }
    }
    for (threshold, id, label) in [
        (10, "10_interactions", "10 Interactions"),
        (100, "100_interactions", "100 Interactions"),
    ] {
        if next.language.total_interactions == threshold {
            if let Some(m) = next.growth.record_milestone(id, label, growth_day, now) {
                new_milestones.push(m);
            }
        }
    }

    // 5. sulk recovery
    next.sulk = sulk::process_sulk_interaction(&next.sulk, next.status.comfort);

    // 6. language re-evaluation
    let new_level = language::evaluate_language_level(&next.language, growth_day);
    for level in (next.language.level + 1)..=new_level {
        if let Some(m) = next.growth.record_milestone(
            &format!("language_level_{level}"),
            &format!("Reached language level {level}"),
            growth_day,
            now,
        ) {
            new_milestones.push(m);
        }
    }
    next.language.level = new_level;
    next.status.language_level = new_level;

    // 7. growth/milestones pass (stage cannot change within an interaction;
    // growth_day is not re-derived here)

    // 8. active soul file
    let soul_file = active_soul_file(next.sulk.is_sulking);

    tracing::debug!(total_interactions = next.language.total_interactions, "interaction processed");

    InteractionResult {
        state: next,
        new_milestones,
        active_soul_file: soul_file,
        first_encounter,
        first_encounter_diary_md,
    }
}

/// Thin wrapper holding the tunable `EngineConfig`, for collaborators who
/// would rather not thread it through every call.
#[derive(Default)]
pub struct StatusManager {
    config: EngineConfig,
}

impl StatusManager {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn process_heartbeat(&self, state: &EntityState, now: DateTime<Utc>) -> HeartbeatResult {
        process_heartbeat(state, now, &self.config)
    }

    pub fn process_interaction(
        &self,
        state: &EntityState,
        ctx: InteractionContext,
        now: DateTime<Utc>,
        summary: Option<String>,
    ) -> InteractionResult {
        process_interaction(state, ctx, now, summary)
    }
}
