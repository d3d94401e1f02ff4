//! End-to-end scenarios driving `process_heartbeat`/`process_interaction`
//! through the full pipeline on a fresh `EntityState`.

use chrono::{TimeZone, Utc};

use yadori_core::config::EngineConfig;
use yadori_core::genesis::{create_fixed_seed, BodyForm, Cognition, Expression, HardwareBody, Species, Temperament};
use yadori_core::growth::Stage;
use yadori_core::mood::InteractionContext;
use yadori_core::state::EntityState;
use yadori_memory::coordinator::{process_heartbeat, process_interaction};

fn hardware() -> HardwareBody {
    HardwareBody {
        platform: "linux".to_string(),
        arch: "x86_64".to_string(),
        memory_gb: 16,
        cpu_model: "generic".to_string(),
        storage_gb: 512,
    }
}

fn fresh_entity(now: chrono::DateTime<Utc>) -> EntityState {
    let seed = create_fixed_seed(
        Species::Geometric,
        Expression::Verbal,
        Cognition::Analytical,
        Temperament::CuriousCautious,
        BodyForm::Crystal,
        [50, 50, 50, 50, 50],
        hardware(),
        now,
    );
    EntityState::new(seed, now)
}

#[test]
fn birth_at_genesis_then_heartbeat_at_same_moment() {
    let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let entity = fresh_entity(now);
    let config = EngineConfig::default();

    let result = process_heartbeat(&entity, now, &config);

    assert_eq!(result.state.status.growth_day, 0);
    assert_eq!(result.state.growth.stage, Some(Stage::Newborn));
    assert!(result.state.growth.has_milestone("first_breath"));
    assert!(!result.wake_signal);
    assert!(!result.sleep_signal);
    assert!(result.diary.is_none());
}

#[test]
fn first_interaction_produces_first_encounter() {
    let birth = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let entity = fresh_entity(birth);
    let now = Utc.with_ymd_and_hms(2026, 2, 20, 14, 0, 0).unwrap();

    let ctx = InteractionContext {
        minutes_since_last_interaction: 30,
        user_initiated: true,
        message_length: 50,
    };
    let result = process_interaction(&entity, ctx, now, None);

    let reaction = result.first_encounter.expect("expected a first encounter");
    assert!(!reaction.expression.is_empty());
    assert_eq!(result.state.language.total_interactions, 1);
    assert!(result.state.memory.hot[0].summary.starts_with("[FIRST ENCOUNTER]"));
}

#[test]
fn second_interaction_has_no_first_encounter() {
    let birth = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let entity = fresh_entity(birth);
    let now = Utc.with_ymd_and_hms(2026, 2, 20, 14, 0, 0).unwrap();
    let ctx = InteractionContext {
        minutes_since_last_interaction: 30,
        user_initiated: true,
        message_length: 50,
    };

    let first = process_interaction(&entity, ctx, now, None);
    let second = process_interaction(&first.state, ctx, now, None);

    assert!(second.first_encounter.is_none());
    assert!(second.first_encounter_diary_md.is_none());
    assert_eq!(second.state.language.total_interactions, 2);
}

#[test]
fn low_comfort_and_mood_triggers_sulk() {
    let birth = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let mut entity = fresh_entity(birth);
    entity.status.comfort = 10;
    entity.status.mood = 15;
    let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
    let config = EngineConfig::default();

    let result = process_heartbeat(&entity, now, &config);

    assert!(result.state.sulk.is_sulking);
    assert_eq!(result.active_soul_file, "SOUL_EVIL.md");
    let soul_evil = result.soul_evil_md.expect("sulking must render SOUL_EVIL");
    assert!(soul_evil.contains("Severity:"));
    assert!(soul_evil.contains("geometric"));
}

#[test]
fn severe_sulk_suppresses_wake_sleep_and_diary_signals() {
    let birth = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let mut entity = fresh_entity(birth);
    entity.status.comfort = 0;
    entity.status.mood = 0;
    entity.sulk.is_sulking = true;
    entity.sulk.severity = yadori_core::sulk::Severity::Severe;
    entity.sulk.sulking_since = Some(birth);
    // 7am falls in the morning window and 8pm in the evening window; a
    // non-suppressed heartbeat here would set wake_signal/diary.
    let morning = Utc.with_ymd_and_hms(2026, 2, 2, 7, 0, 0).unwrap();
    let config = EngineConfig::default();

    let result = process_heartbeat(&entity, morning, &config);

    assert_eq!(result.state.sulk.severity, yadori_core::sulk::Severity::Severe);
    assert!(!result.wake_signal);
    assert!(!result.sleep_signal);
    assert!(result.diary.is_none());
}

#[test]
fn language_advances_after_thirty_interactions_and_a_week() {
    let birth = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut entity = fresh_entity(birth);
    entity.language.total_interactions = 30;

    let heartbeat_time = Utc.with_ymd_and_hms(2026, 1, 9, 6, 0, 0).unwrap();
    let config = EngineConfig::default();
    let result = process_heartbeat(&entity, heartbeat_time, &config);

    assert_eq!(result.state.language.level, 1);
    assert_eq!(result.state.status.language_level, 1);
    assert!(result
        .new_milestones
        .iter()
        .any(|m| m.id == "language_level_1"));
}

#[test]
fn sunday_night_heartbeat_consolidates_hot_memory() {
    use yadori_core::memory::HotEntry;

    let birth = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut entity = fresh_entity(birth);
    entity.memory.hot.push_back(HotEntry {
        timestamp: birth,
        summary: "a quiet moment".to_string(),
        mood: 60,
    });
    entity.memory.hot.push_back(HotEntry {
        timestamp: birth,
        summary: "a restless moment".to_string(),
        mood: 40,
    });

    // 2026-01-04 is a Sunday.
    let sunday_night = Utc.with_ymd_and_hms(2026, 1, 4, 23, 0, 0).unwrap();
    let config = EngineConfig::default();
    let result = process_heartbeat(&entity, sunday_night, &config);

    assert!(result.memory_consolidated);
    assert!(result.state.memory.hot.is_empty());
    assert_eq!(result.state.memory.warm.len(), 1);
    assert_eq!(result.state.memory.warm[0].entries, 2);
    assert_eq!(result.state.memory.warm[0].avg_mood, 50);
}
