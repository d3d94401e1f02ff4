//! Diary rendering: mood trend, growth stage, latest milestone.

use chrono::NaiveDate;
use yadori_core::state::EntityState;

fn mood_trend(state: &EntityState) -> String {
    if state.memory.hot.is_empty() {
        return "quiet today, nothing new settled into memory".to_string();
    }
    let moods: Vec<u8> = state.memory.hot.iter().map(|e| e.mood).collect();
    let first = *moods.first().unwrap();
    let last = *moods.last().unwrap();
    match last.cmp(&first) {
        std::cmp::Ordering::Greater => format!("mood lifted over the day, from {first} to {last}"),
        std::cmp::Ordering::Less => format!("mood settled lower over the day, from {first} to {last}"),
        std::cmp::Ordering::Equal => format!("mood held steady around {last}"),
    }
}

/// Renders a markdown diary entry for `date`, combining the day's mood
/// trend, active milestones, and current growth stage.
pub fn render_diary(state: &EntityState, date: NaiveDate) -> String {
    let stage = state.growth.stage.map(|s| s.name()).unwrap_or("newborn");
    let mut out = format!("# Diary — {date}\n\n{}.\n\n", mood_trend(state));
    out.push_str(&format!("Still {stage}.\n"));
    if let Some(latest) = state.growth.milestones.last() {
        out.push_str(&format!("Today carries the memory of reaching \"{}\".\n", latest.label));
    }
    out
}
