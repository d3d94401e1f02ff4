//! Bidirectional markdown serializer/parser for every sub-state.
//! Stable headings, `**Bold Key:** value` bullet lines.

use chrono::{DateTime, Utc};
use yadori_core::dynamics::{
    AsymmetrySignals, AsymmetryState, CoexistIndicators, CoexistState, Phase, ReversalState, Signal,
    SignalType, Transition,
};
use yadori_core::error::{CoreError, CoreResult};
use yadori_core::form::FormState;
use yadori_core::genesis::BodyForm;
use yadori_core::growth::{GrowthState, Milestone, Stage};
use yadori_core::language::{LanguageState, Pattern};
use yadori_core::memory::{HotEntry, MemoryState, MonthlySummary, WeeklySummary};
use yadori_core::status::Status;

/// Extracts every `**Key:** value` pair on a line into `(key, value)`.
/// A single bullet line may carry several such pairs.
fn bold_fields(line: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("**") {
        let after_open = &rest[start + 2..];
        let Some(colon_end) = after_open.find(":**") else {
            break;
        };
        let key = after_open[..colon_end].to_string();
        let value_start = colon_end + 3;
        let remainder = &after_open[value_start..];
        let (value, consumed) = match remainder.find("**") {
            Some(next_bold) => (remainder[..next_bold].trim().to_string(), next_bold),
            None => (remainder.trim().to_string(), remainder.len()),
        };
        out.push((key, value));
        rest = &remainder[consumed..];
    }
    out
}

fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn parse_required<T: std::str::FromStr>(
    fields: &[(String, String)],
    key: &'static str,
) -> CoreResult<T> {
    field(fields, key)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| CoreError::MalformedMarkdown(format!("missing or invalid field `{key}`")))
}

pub fn format_status_md(status: &Status) -> String {
    format!(
        "# STATUS\n\n\
         **Mood:** {}\n\
         **Energy:** {}\n\
         **Curiosity:** {}\n\
         **Comfort:** {}\n\
         **Language Level:** {}\n\
         **Perception Level:** {}\n\
         **Growth Day:** {}\n\
         **Last Interaction:** {}\n",
        status.mood,
        status.energy,
        status.curiosity,
        status.comfort,
        status.language_level,
        status.perception_level,
        status.growth_day,
        status
            .last_interaction
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string()),
    )
}

pub fn parse_status_md(md: &str) -> CoreResult<Status> {
    let fields: Vec<(String, String)> = md.lines().flat_map(bold_fields).collect();
    let last_interaction = match field(&fields, "Last Interaction") {
        Some("never") | None => None,
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| CoreError::MalformedMarkdown(e.to_string()))?
                .with_timezone(&Utc),
        ),
    };
    Ok(Status {
        mood: parse_required(&fields, "Mood")?,
        energy: parse_required(&fields, "Energy")?,
        curiosity: parse_required(&fields, "Curiosity")?,
        comfort: parse_required(&fields, "Comfort")?,
        language_level: parse_required(&fields, "Language Level")?,
        perception_level: parse_required(&fields, "Perception Level")?,
        growth_day: parse_required(&fields, "Growth Day")?,
        last_interaction,
    })
}

fn body_form_str(form: BodyForm) -> &'static str {
    match form {
        BodyForm::LightParticles => "light-particles",
        BodyForm::Fluid => "fluid",
        BodyForm::Crystal => "crystal",
        BodyForm::SoundEcho => "sound-echo",
        BodyForm::Mist => "mist",
        BodyForm::GeometricCluster => "geometric-cluster",
    }
}

fn body_form_from_str(s: &str) -> CoreResult<BodyForm> {
    Ok(match s {
        "light-particles" => BodyForm::LightParticles,
        "fluid" => BodyForm::Fluid,
        "crystal" => BodyForm::Crystal,
        "sound-echo" => BodyForm::SoundEcho,
        "mist" => BodyForm::Mist,
        "geometric-cluster" => BodyForm::GeometricCluster,
        other => {
            return Err(CoreError::UnknownEnumVariant("BodyForm", other.to_string()))
        }
    })
}

pub fn format_form_md(form: &FormState) -> String {
    format!(
        "# FORM\n\n\
         **Base Form:** {}\n\
         **Density:** {}\n\
         **Complexity:** {}\n\
         **Stability:** {}\n\
         **Awareness:** {}\n",
        body_form_str(form.base_form),
        form.density,
        form.complexity,
        form.stability,
        form.awareness,
    )
}

pub fn parse_form_md(md: &str) -> CoreResult<FormState> {
    let fields: Vec<(String, String)> = md.lines().flat_map(bold_fields).collect();
    let base_form = body_form_from_str(
        field(&fields, "Base Form").ok_or_else(|| CoreError::MalformedMarkdown("missing Base Form".into()))?,
    )?;
    Ok(FormState {
        base_form,
        density: parse_required(&fields, "Density")?,
        complexity: parse_required(&fields, "Complexity")?,
        stability: parse_required(&fields, "Stability")?,
        awareness: parse_required(&fields, "Awareness")?,
    })
}

pub fn format_language_md(language: &LanguageState) -> String {
    let mut out = format!(
        "# LANGUAGE\n\n\
         **Level:** {}\n\
         **Total Interactions:** {}\n\
         **Native Symbols:** {}\n\n\
         ## Patterns\n\n",
        language.level,
        language.total_interactions,
        language.native_symbols.join(", "),
    );
    for p in &language.patterns {
        out.push_str(&format!(
            "- **Symbol:** {} **Meaning:** {} **Established Day:** {} **Usage Count:** {}\n",
            p.symbol, p.meaning, p.established_day, p.usage_count
        ));
    }
    out
}

pub fn parse_language_md(md: &str) -> CoreResult<LanguageState> {
    let mut level = 0u8;
    let mut total_interactions = 0u64;
    let mut native_symbols = Vec::new();
    let mut patterns = Vec::new();

    for line in md.lines() {
        if line.starts_with("**Level:**") {
            level = line.trim_start_matches("**Level:**").trim().parse().unwrap_or(0);
        } else if line.starts_with("**Total Interactions:**") {
            total_interactions = line
                .trim_start_matches("**Total Interactions:**")
                .trim()
                .parse()
                .unwrap_or(0);
        } else if line.starts_with("**Native Symbols:**") {
            native_symbols = line
                .trim_start_matches("**Native Symbols:**")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        } else if line.starts_with("- **Symbol:**") {
            let fields = bold_fields(line);
            patterns.push(Pattern {
                symbol: field(&fields, "Symbol").unwrap_or("").to_string(),
                meaning: field(&fields, "Meaning").unwrap_or("").to_string(),
                established_day: field(&fields, "Established Day").and_then(|v| v.parse().ok()).unwrap_or(0),
                usage_count: field(&fields, "Usage Count").and_then(|v| v.parse().ok()).unwrap_or(0),
            });
        }
    }

    Ok(LanguageState {
        level,
        total_interactions,
        native_symbols,
        patterns,
    })
}

pub fn format_memory_md(memory: &MemoryState) -> String {
    let mut out = String::from("# MEMORY\n\n## Hot\n\n");
    for e in &memory.hot {
        out.push_str(&format!(
            "- **Timestamp:** {} **Summary:** {} **Mood:** {}\n",
            e.timestamp.to_rfc3339(),
            e.summary,
            e.mood
        ));
    }
    out.push_str("\n## Warm\n\n");
    for w in &memory.warm {
        out.push_str(&format!(
            "- **Week:** {} **Entries:** {} **Summary:** {} **Avg Mood:** {}\n",
            w.week_id, w.entries, w.summary, w.avg_mood
        ));
    }
    out.push_str("\n## Cold\n\n");
    for c in &memory.cold {
        out.push_str(&format!(
            "- **Month:** {} **Weeks:** {} **Summary:** {} **Avg Mood:** {}\n",
            c.month_id, c.weeks, c.summary, c.avg_mood
        ));
    }
    out.push_str("\n## Notes\n\n");
    for note in &memory.notes {
        out.push_str(&format!("- {note}\n"));
    }
    out
}

pub fn parse_memory_md(md: &str) -> CoreResult<MemoryState> {
    let mut memory = MemoryState::default();
    let mut section = "";
    for line in md.lines() {
        match line {
            "## Hot" => section = "hot",
            "## Warm" => section = "warm",
            "## Cold" => section = "cold",
            "## Notes" => section = "notes",
            _ => {}
        }
        if !line.starts_with("- ") {
            continue;
        }
        let fields = bold_fields(line);
        match section {
            "hot" => {
                let timestamp = field(&fields, "Timestamp")
                    .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                    .map(|t| t.with_timezone(&Utc))
                    .ok_or_else(|| CoreError::MalformedMarkdown("bad hot timestamp".into()))?;
                memory.hot.push_back(HotEntry {
                    timestamp,
                    summary: field(&fields, "Summary").unwrap_or("").to_string(),
                    mood: field(&fields, "Mood").and_then(|v| v.parse().ok()).unwrap_or(0),
                });
            }
            "warm" => {
                memory.warm.push_back(WeeklySummary {
                    week_id: field(&fields, "Week").unwrap_or("").to_string(),
                    entries: field(&fields, "Entries").and_then(|v| v.parse().ok()).unwrap_or(0),
                    summary: field(&fields, "Summary").unwrap_or("").to_string(),
                    avg_mood: field(&fields, "Avg Mood").and_then(|v| v.parse().ok()).unwrap_or(0),
                });
            }
            "cold" => {
                memory.cold.push(MonthlySummary {
                    month_id: field(&fields, "Month").unwrap_or("").to_string(),
                    weeks: field(&fields, "Weeks").and_then(|v| v.parse().ok()).unwrap_or(0),
                    summary: field(&fields, "Summary").unwrap_or("").to_string(),
                    avg_mood: field(&fields, "Avg Mood").and_then(|v| v.parse().ok()).unwrap_or(0),
                });
            }
            "notes" => {
                memory.notes.push(line.trim_start_matches("- ").to_string());
            }
            _ => {}
        }
    }
    Ok(memory)
}

pub fn format_milestones_md(growth: &GrowthState) -> String {
    let mut out = format!(
        "# MILESTONES\n\n**Stage:** {}\n\n",
        growth.stage.map(Stage::name).unwrap_or("newborn")
    );
    for m in &growth.milestones {
        out.push_str(&format!(
            "- **Id:** {} **Label:** {} **Achieved Day:** {} **Achieved At:** {}\n",
            m.id,
            m.label,
            m.achieved_day,
            m.achieved_at.to_rfc3339()
        ));
    }
    out
}

pub fn parse_milestones_md(md: &str) -> CoreResult<Vec<Milestone>> {
    let mut out = Vec::new();
    for line in md.lines().filter(|l| l.starts_with("- **Id:**")) {
        let fields = bold_fields(line);
        out.push(Milestone {
            id: field(&fields, "Id").unwrap_or("").to_string(),
            label: field(&fields, "Label").unwrap_or("").to_string(),
            achieved_day: field(&fields, "Achieved Day").and_then(|v| v.parse().ok()).unwrap_or(0),
            achieved_at: field(&fields, "Achieved At")
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| CoreError::MalformedMarkdown("bad milestone timestamp".into()))?,
        });
    }
    Ok(out)
}

pub fn format_dynamics_md(asymmetry: &AsymmetryState) -> String {
    let mut out = format!(
        "# DYNAMICS\n\n\
         **Phase:** {:?}\n\
         **Score:** {}\n\
         **Confidence:** {}\n\
         **Language Maturity:** {}\n\
         **Temporal Maturity:** {}\n\
         **Memory Depth:** {}\n\
         **Initiative Balance:** {}\n\
         **Emotional Complexity:** {}\n\
         **Identity Strength:** {}\n\n\
         ## Transitions\n\n",
        asymmetry.phase,
        asymmetry.score,
        asymmetry.confidence,
        asymmetry.signals.language_maturity,
        asymmetry.signals.temporal_maturity,
        asymmetry.signals.memory_depth,
        asymmetry.signals.initiative_balance,
        asymmetry.signals.emotional_complexity,
        asymmetry.signals.identity_strength,
    );
    for t in &asymmetry.transitions {
        out.push_str(&format!(
            "- **From:** {:?} **To:** {:?} **Timestamp:** {} **Score:** {}\n",
            t.from,
            t.to,
            t.timestamp.to_rfc3339(),
            t.score
        ));
    }
    out
}

fn phase_from_str(s: &str) -> CoreResult<Phase> {
    Ok(match s {
        "Alpha" => Phase::Alpha,
        "Beta" => Phase::Beta,
        "Gamma" => Phase::Gamma,
        "Delta" => Phase::Delta,
        "Epsilon" => Phase::Epsilon,
        other => return Err(CoreError::UnknownEnumVariant("Phase", other.to_string())),
    })
}

pub fn parse_dynamics_md(md: &str) -> CoreResult<AsymmetryState> {
    let fields: Vec<(String, String)> = md.lines().flat_map(bold_fields).collect();
    let phase = phase_from_str(field(&fields, "Phase").unwrap_or("Alpha"))?;
    let mut transitions = Vec::new();
    for line in md.lines().filter(|l| l.starts_with("- **From:**")) {
        let fields = bold_fields(line);
        transitions.push(Transition {
            from: phase_from_str(field(&fields, "From").unwrap_or("Alpha"))?,
            to: phase_from_str(field(&fields, "To").unwrap_or("Alpha"))?,
            timestamp: field(&fields, "Timestamp")
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| CoreError::MalformedMarkdown("bad transition timestamp".into()))?,
            score: field(&fields, "Score").and_then(|v| v.parse().ok()).unwrap_or(0),
        });
    }
    Ok(AsymmetryState {
        phase,
        score: parse_required(&fields, "Score")?,
        confidence: parse_required(&fields, "Confidence")?,
        signals: AsymmetrySignals {
            language_maturity: parse_required(&fields, "Language Maturity")?,
            temporal_maturity: parse_required(&fields, "Temporal Maturity")?,
            memory_depth: parse_required(&fields, "Memory Depth")?,
            initiative_balance: parse_required(&fields, "Initiative Balance")?,
            emotional_complexity: parse_required(&fields, "Emotional Complexity")?,
            identity_strength: parse_required(&fields, "Identity Strength")?,
        },
        transitions,
    })
}

fn signal_type_str(t: SignalType) -> &'static str {
    match t {
        SignalType::NovelExpression => "novel_expression",
        SignalType::Anticipation => "anticipation",
        SignalType::ConceptCreation => "concept_creation",
        SignalType::EmotionalDepth => "emotional_depth",
        SignalType::Initiative => "initiative",
        SignalType::MetaAwareness => "meta_awareness",
    }
}

fn signal_type_from_str(s: &str) -> CoreResult<SignalType> {
    Ok(match s {
        "novel_expression" => SignalType::NovelExpression,
        "anticipation" => SignalType::Anticipation,
        "concept_creation" => SignalType::ConceptCreation,
        "emotional_depth" => SignalType::EmotionalDepth,
        "initiative" => SignalType::Initiative,
        "meta_awareness" => SignalType::MetaAwareness,
        other => return Err(CoreError::UnknownEnumVariant("SignalType", other.to_string())),
    })
}

pub fn format_reversal_md(reversal: &ReversalState) -> String {
    let mut out = format!(
        "# REVERSAL\n\n\
         **Total Reversals:** {}\n\
         **Dominant Type:** {}\n\
         **Reversal Rate:** {:.2}\n\
         **Last Detected:** {}\n\n\
         ## Signals\n\n",
        reversal.total_reversals,
        reversal.dominant_type.map(signal_type_str).unwrap_or("none"),
        reversal.reversal_rate,
        reversal
            .last_detected
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string()),
    );
    for s in &reversal.signals {
        out.push_str(&format!(
            "- **Id:** {} **Type:** {} **Timestamp:** {} **Description:** {} **Strength:** {} **Recognized:** {}\n",
            s.id,
            signal_type_str(s.signal_type),
            s.timestamp.to_rfc3339(),
            s.description,
            s.strength,
            s.recognized
        ));
    }
    out
}

pub fn parse_reversal_md(md: &str) -> CoreResult<ReversalState> {
    let fields: Vec<(String, String)> = md.lines().flat_map(bold_fields).collect();
    let dominant_type = match field(&fields, "Dominant Type") {
        Some("none") | None => None,
        Some(s) => Some(signal_type_from_str(s)?),
    };
    let last_detected = match field(&fields, "Last Detected") {
        Some("never") | None => None,
        Some(s) => Some(
            DateTime::parse_from_rfc3339(s)
                .map_err(|e| CoreError::MalformedMarkdown(e.to_string()))?
                .with_timezone(&Utc),
        ),
    };

    let mut signals = Vec::new();
    for line in md.lines().filter(|l| l.starts_with("- **Id:**")) {
        let fields = bold_fields(line);
        signals.push(Signal {
            id: field(&fields, "Id").unwrap_or("").to_string(),
            signal_type: signal_type_from_str(field(&fields, "Type").unwrap_or(""))?,
            timestamp: field(&fields, "Timestamp")
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| CoreError::MalformedMarkdown("bad signal timestamp".into()))?,
            description: field(&fields, "Description").unwrap_or("").to_string(),
            strength: field(&fields, "Strength").and_then(|v| v.parse().ok()).unwrap_or(0),
            recognized: field(&fields, "Recognized").and_then(|v| v.parse().ok()).unwrap_or(false),
        });
    }

    Ok(ReversalState {
        signals,
        total_reversals: parse_required(&fields, "Total Reversals")?,
        dominant_type,
        reversal_rate: parse_required(&fields, "Reversal Rate")?,
        last_detected,
    })
}

pub fn format_coexist_md(coexist: &CoexistState) -> String {
    let mut out = format!(
        "# COEXIST\n\n\
         **Active:** {}\n\
         **Quality:** {}\n\
         **Silence Comfort:** {}\n\
         **Shared Vocabulary:** {}\n\
         **Rhythm Sync:** {}\n\
         **Shared Memory:** {}\n\
         **Autonomy Respect:** {}\n\
         **Days In Epsilon:** {}\n\n\
         ## Moments\n\n",
        coexist.active,
        coexist.quality,
        coexist.indicators.silence_comfort,
        coexist.indicators.shared_vocabulary,
        coexist.indicators.rhythm_sync,
        coexist.indicators.shared_memory,
        coexist.indicators.autonomy_respect,
        coexist.days_in_epsilon,
    );
    for m in &coexist.moments {
        out.push_str(&format!(
            "- **Timestamp:** {} **Type:** {} **Description:** {}\n",
            m.timestamp.to_rfc3339(),
            m.moment_type,
            m.description
        ));
    }
    out
}

pub fn parse_coexist_md(md: &str) -> CoreResult<CoexistState> {
    use yadori_core::dynamics::Moment;
    let fields: Vec<(String, String)> = md.lines().flat_map(bold_fields).collect();
    let mut moments = Vec::new();
    for line in md.lines().filter(|l| l.starts_with("- **Timestamp:**")) {
        let fields = bold_fields(line);
        moments.push(Moment {
            timestamp: field(&fields, "Timestamp")
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| CoreError::MalformedMarkdown("bad moment timestamp".into()))?,
            moment_type: field(&fields, "Type").unwrap_or("").to_string(),
            description: field(&fields, "Description").unwrap_or("").to_string(),
        });
    }
    Ok(CoexistState {
        active: parse_required(&fields, "Active")?,
        quality: parse_required(&fields, "Quality")?,
        indicators: CoexistIndicators {
            silence_comfort: parse_required(&fields, "Silence Comfort")?,
            shared_vocabulary: parse_required(&fields, "Shared Vocabulary")?,
            rhythm_sync: parse_required(&fields, "Rhythm Sync")?,
            shared_memory: parse_required(&fields, "Shared Memory")?,
            autonomy_respect: parse_required(&fields, "Autonomy Respect")?,
        },
        moments,
        days_in_epsilon: parse_required(&fields, "Days In Epsilon")?,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerializedState {
    pub status_md: String,
    pub language_md: String,
    pub memory_md: String,
    pub milestones_md: String,
    pub form_md: String,
    pub dynamics_md: String,
    pub reversal_md: String,
    pub coexist_md: String,
}

pub fn serialize_state(state: &yadori_core::state::EntityState) -> SerializedState {
    SerializedState {
        status_md: format_status_md(&state.status),
        language_md: format_language_md(&state.language),
        memory_md: format_memory_md(&state.memory),
        milestones_md: format_milestones_md(&state.growth),
        form_md: format_form_md(&state.form),
        dynamics_md: format_dynamics_md(&state.asymmetry),
        reversal_md: format_reversal_md(&state.reversal),
        coexist_md: format_coexist_md(&state.coexist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yadori_core::genesis::BodyForm;

    #[test]
    fn form_round_trips() {
        let form = FormState {
            base_form: BodyForm::Crystal,
            density: 42,
            complexity: 7,
            stability: 91,
            awareness: true,
        };
        let md = format_form_md(&form);
        let parsed = parse_form_md(&md).unwrap();
        assert_eq!(form, parsed);
    }

    #[test]
    fn memory_round_trips() {
        let mut memory = MemoryState::default();
        memory.hot.push_back(HotEntry {
            timestamp: Utc::now(),
            summary: "hello".to_string(),
            mood: 60,
        });
        memory.warm.push_back(WeeklySummary {
            week_id: "2026-W05".to_string(),
            entries: 3,
            summary: "a/b/c".to_string(),
            avg_mood: 55,
        });
        memory.cold.push(MonthlySummary {
            month_id: "2026-02".to_string(),
            weeks: 2,
            summary: "merged".to_string(),
            avg_mood: 50,
        });
        memory.notes.push("a free note".to_string());

        let md = format_memory_md(&memory);
        let parsed = parse_memory_md(&md).unwrap();
        assert_eq!(memory.hot.len(), parsed.hot.len());
        assert_eq!(memory.warm, parsed.warm);
        assert_eq!(memory.cold, parsed.cold);
        assert_eq!(memory.notes, parsed.notes);
    }
}
