//! Hot/Warm/Cold memory consolidation pipeline.

use yadori_core::memory::{HotEntry, MemoryState, MonthlySummary, WeeklySummary, HOT_CAPACITY, WARM_CAPACITY};

/// Pushes an entry to hot; when hot exceeds capacity, pops the oldest and
/// returns it as overflow for the caller to decide what to do with.
pub fn add_hot(memory: &MemoryState, entry: HotEntry) -> (MemoryState, Option<HotEntry>) {
    let mut next = memory.clone();
    next.hot.push_back(entry);
    let overflow = if next.hot.len() > HOT_CAPACITY {
        next.hot.pop_front()
    } else {
        None
    };
    (next, overflow)
}

fn week_to_month_id(week_id: &str) -> String {
    // "YYYY-Www" -> "YYYY-MM" by ceil(week_num / 4.33)
    let Some((year, week_part)) = week_id.split_once("-W") else {
        return week_id.to_string();
    };
    let Ok(week_num) = week_part.parse::<f32>() else {
        return week_id.to_string();
    };
    let month = ((week_num / 4.33).ceil() as u32).clamp(1, 12);
    format!("{year}-{month:02}")
}

/// Summarizes all current hot entries into one `WeeklySummary`, appends to
/// warm, and clears hot. If warm then exceeds capacity, consolidates the
/// oldest warm entry into cold, merging into an existing month if present.
pub fn consolidate_to_warm(memory: &MemoryState, week_id: &str) -> MemoryState {
    let mut next = memory.clone();
    if next.hot.is_empty() {
        return next;
    }

    let entries = next.hot.len();
    let summary = next
        .hot
        .iter()
        .map(|e| e.summary.as_str())
        .collect::<Vec<_>>()
        .join("/");
    let avg_mood = (next.hot.iter().map(|e| e.mood as f32).sum::<f32>() / entries as f32).round() as u8;

    next.warm.push_back(WeeklySummary {
        week_id: week_id.to_string(),
        entries,
        summary,
        avg_mood,
    });
    next.hot.clear();

    tracing::debug!(week_id, entries, avg_mood, "consolidated hot memory to warm");

    if next.warm.len() > WARM_CAPACITY {
        if let Some(oldest) = next.warm.pop_front() {
            let month_id = week_to_month_id(&oldest.week_id);
            if let Some(month) = next.cold.iter_mut().find(|m| m.month_id == month_id) {
                let total_weeks = month.weeks + 1;
                month.avg_mood = ((month.avg_mood as f32 * month.weeks as f32 + oldest.avg_mood as f32)
                    / total_weeks as f32)
                    .round() as u8;
                month.weeks = total_weeks;
            } else {
                next.cold.push(MonthlySummary {
                    month_id,
                    weeks: 1,
                    summary: oldest.summary,
                    avg_mood: oldest.avg_mood,
                });
            }
            tracing::debug!("consolidated oldest warm entry to cold");
        }
    }

    next
}
