//! Honest Perception, the design keystone. A filter applied to raw
//! sensor/text inputs before anything else can read them — the entity
//! cannot, by construction, see what its filter drops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genesis::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
    Temperature,
    Humidity,
    Light,
    Vibration,
    Pressure,
    Gas,
    Color,
    Proximity,
    Touch,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputData {
    Text(String),
    Image { width: u32, height: u32 },
    Numeric(f32),
    Touch(bool),
    System(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub modality: Modality,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub data: InputData,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerceptionGrowth {
    pub level: u8,
    pub total_sensory_inputs: u64,
    pub modalities_encountered: u32,
}

fn supports(species: Species, modality: Modality) -> bool {
    use Modality::*;
    match species {
        Species::Chromatic => matches!(modality, Text | Image | Color | Light),
        Species::Vibration => matches!(modality, Text | Image | Audio | Vibration | Touch),
        Species::Geometric => matches!(modality, Text | Image | Proximity | Pressure),
        Species::Thermal => matches!(modality, Text | Image | Temperature | Touch),
        Species::Temporal => matches!(modality, Text | Image | System),
        Species::Chemical => matches!(modality, Text | Image | Gas | Humidity),
    }
}

fn length_tier(len: usize) -> usize {
    match len {
        0..=10 => 0,
        11..=40 => 1,
        41..=120 => 2,
        _ => 3,
    }
}

/// Level-scaled, cumulative clause list: level L's description is the first
/// `L + 1` clauses joined, which guarantees `length(L+1) >= length(L)` and
/// that every distinction present at L survives at L+1.
fn cumulative(clauses: &[&str], level: u8) -> String {
    let take = (level as usize + 1).min(clauses.len());
    clauses[..take].join("; ")
}

fn text_clauses(species: Species, text: &str, timestamp: DateTime<Utc>) -> Vec<String> {
    let tier = length_tier(text.len());
    let punctuation = text.chars().filter(|c| "!?.".contains(*c)).count();
    match species {
        Species::Chromatic => vec![
            match tier {
                0 => "a brief wash of color".to_string(),
                1 => "a wash of color with shifting hue".to_string(),
                2 => "a long ribbon of shifting hue".to_string(),
                _ => "a sprawling ribbon of color, many hues deep".to_string(),
            },
            format!("hue-shift intensity {punctuation}"),
            "no words are legible, only color".to_string(),
            "the ribbon's texture is otherwise smooth".to_string(),
        ],
        Species::Vibration => vec![
            "a pulse arrives".to_string(),
            format!("pulse train of tier {tier}"),
            format!("{punctuation} sharp taps felt within it"),
            "the pulse fades evenly".to_string(),
        ],
        Species::Geometric => vec![
            "an assemblage of forms resolves".to_string(),
            format!("complexity tier {tier}"),
            format!("{punctuation} sharp vertices counted"),
            "the assemblage holds its shape briefly".to_string(),
        ],
        Species::Thermal => vec![
            "a gradient of warmth arrives".to_string(),
            format!("warmth tier {tier}"),
            format!("{punctuation} flickers of heat"),
            "the warmth settles".to_string(),
        ],
        Species::Temporal => vec![format!("received at {}", timestamp.to_rfc3339())],
        Species::Chemical => vec![
            "a diffuse scent-cloud drifts in".to_string(),
            format!("intensity tier {tier}"),
            format!("{punctuation} sharp notes within it"),
            "the cloud disperses".to_string(),
        ],
    }
}

fn image_clauses(species: Species, width: u32, height: u32) -> Vec<String> {
    let aspect_wide = width >= height;
    match species {
        Species::Chromatic => vec![
            "a wash of color".to_string(),
            "with shifting hue across its span".to_string(),
            "one broad region feels warmer than the rest".to_string(),
            format!(
                "quadrant balance: {} leaning stronger; colors: blended, no hard edges",
                if aspect_wide { "upper" } else { "lower" }
            ),
        ],
        Species::Vibration => vec![
            "a resonance pattern is felt".to_string(),
            "with a steady standing wave".to_string(),
            "amplitude varies across the field".to_string(),
            "fine ripples ride atop the main wave".to_string(),
        ],
        Species::Geometric => vec![
            "an assemblage of forms".to_string(),
            "bounded by a rough outline".to_string(),
            "internal subdivisions are sensed".to_string(),
            "vertex density is high near one corner".to_string(),
        ],
        Species::Thermal => vec![
            "a gradient of warmth".to_string(),
            "spanning the whole field".to_string(),
            "one pocket runs noticeably hotter".to_string(),
            "the gradient's edges blur together".to_string(),
        ],
        Species::Temporal => vec![
            "a duration of exposure, no shape".to_string(),
            "the exposure has a beginning and an end".to_string(),
            "its midpoint carries the most weight".to_string(),
            "no spatial detail accompanies it".to_string(),
        ],
        Species::Chemical => vec![
            "a diffuse scent-cloud of intensity".to_string(),
            "with a denser core".to_string(),
            "trailing off unevenly at its margins".to_string(),
            "two distinct notes are present within it".to_string(),
        ],
    }
}

/// Returns `None` when the species has no filter for the modality, or the
/// filter itself yields nothing (e.g. an inactive touch sensor).
pub fn filter_input(species: Species, input: &RawInput, level: u8) -> Option<String> {
    if !supports(species, input.modality) {
        return None;
    }
    let level = level.min(4);
    match &input.data {
        InputData::Text(text) => {
            let clauses = text_clauses(species, text, input.timestamp);
            let strs: Vec<&str> = clauses.iter().map(|s| s.as_str()).collect();
            Some(cumulative(&strs, level))
        }
        InputData::Image { width, height } => {
            let clauses = image_clauses(species, *width, *height);
            let strs: Vec<&str> = clauses.iter().map(|s| s.as_str()).collect();
            Some(cumulative(&strs, level))
        }
        InputData::Touch(active) => {
            if !*active {
                None
            } else {
                Some(format!("{} contact felt", species.lexeme()))
            }
        }
        InputData::Numeric(value) => Some(format!(
            "{} reading at intensity {:.1} (level {level})",
            species.lexeme(),
            value
        )),
        InputData::System(tag) => Some(format!("{} system cue: {tag} (level {level})", species.lexeme())),
    }
}

pub fn filter_inputs(species: Species, inputs: &[RawInput], level: u8) -> Vec<String> {
    inputs
        .iter()
        .filter_map(|input| filter_input(species, input, level))
        .collect()
}

fn void_state(species: Species) -> &'static str {
    match species {
        Species::Chromatic => "darkness, no hue at all",
        Species::Vibration => "stillness, no pulse",
        Species::Geometric => "void, no form",
        Species::Thermal => "cold, no warmth",
        Species::Temporal => "timelessness, no duration",
        Species::Chemical => "emptiness, no scent",
    }
}

fn prelude(species: Species) -> &'static str {
    match species {
        Species::Chromatic => "What reaches you arrives as color alone:",
        Species::Vibration => "What reaches you arrives as pulse alone:",
        Species::Geometric => "What reaches you arrives as form alone:",
        Species::Thermal => "What reaches you arrives as warmth alone:",
        Species::Temporal => "What reaches you arrives as duration alone:",
        Species::Chemical => "What reaches you arrives as scent alone:",
    }
}

pub fn build_perception_context(species: Species, filtered: &[String]) -> String {
    if filtered.is_empty() {
        return format!("{}\n\n{}.", prelude(species), void_state(species));
    }
    let mut out = String::from(prelude(species));
    out.push('\n');
    for description in filtered {
        out.push_str("- ");
        out.push_str(description);
        out.push('\n');
    }
    out.push_str("You cannot perceive anything beyond this.");
    out
}

/// Advances on heartbeat from growth day and modalities encountered; never
/// decreases.
pub fn advance_perception_level(growth: &PerceptionGrowth, growth_day: u64) -> u8 {
    let mut level = growth.level;
    let thresholds: [(u64, u32); 4] = [(5, 1), (15, 2), (40, 4), (80, 6)];
    while (level as usize) < thresholds.len() {
        let (min_day, min_modalities) = thresholds[level as usize];
        if growth_day >= min_day && growth.modalities_encountered >= min_modalities {
            level += 1;
        } else {
            break;
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_input(text: &str) -> RawInput {
        RawInput {
            modality: Modality::Text,
            timestamp: Utc::now(),
            source: "user".into(),
            data: InputData::Text(text.to_string()),
        }
    }

    fn image_input(width: u32, height: u32) -> RawInput {
        RawInput {
            modality: Modality::Image,
            timestamp: Utc::now(),
            source: "camera".into(),
            data: InputData::Image { width, height },
        }
    }

    #[test]
    fn cross_level_monotonicity_for_image() {
        let input = image_input(1920, 1080);
        let mut prev_len = 0;
        for level in 0..=4u8 {
            let description = filter_input(Species::Chromatic, &input, level).unwrap();
            assert!(description.len() >= prev_len);
            prev_len = description.len();
        }
    }

    #[test]
    fn cross_species_distinctness_for_image() {
        let input = image_input(640, 480);
        for level in 0..=4u8 {
            let mut seen = std::collections::HashSet::new();
            for species in Species::ALL {
                let description = filter_input(species, &input, level).unwrap();
                assert!(seen.insert(description), "collision at level {level}");
            }
        }
    }

    #[test]
    fn chromatic_image_level_zero_forbidden_tokens() {
        let input = image_input(100, 50);
        let description = filter_input(Species::Chromatic, &input, 0).unwrap();
        for token in ["edge", "angle", "quadrant", "spatial", "region", "colors:"] {
            assert!(!description.contains(token), "leaked {token}: {description}");
        }
    }

    #[test]
    fn chromatic_text_never_leaks_original_words() {
        let input = text_input("the quick brown fox jumps");
        for level in 0..=4u8 {
            let description = filter_input(Species::Chromatic, &input, level).unwrap();
            for word in ["quick", "brown", "fox", "jumps"] {
                assert!(!description.contains(word));
            }
        }
    }

    #[test]
    fn temporal_text_level_zero_is_only_a_timestamp() {
        let input = text_input("anything at all");
        let description = filter_input(Species::Temporal, &input, 0).unwrap();
        assert!(description.starts_with("received at "));
        assert!(!description.contains("anything"));
    }

    #[test]
    fn void_states_are_species_distinct() {
        let mut seen = std::collections::HashSet::new();
        for species in Species::ALL {
            assert!(seen.insert(build_perception_context(species, &[])));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn image_descriptions_are_monotone_and_species_distinct(
            width in 1u32..4000, height in 1u32..4000,
        ) {
            let input = RawInput {
                modality: Modality::Image,
                timestamp: Utc::now(),
                source: "camera".into(),
                data: InputData::Image { width, height },
            };
            for species in Species::ALL {
                let mut prev_len = 0;
                for level in 0..=4u8 {
                    let description = filter_input(species, &input, level).unwrap();
                    prop_assert!(description.len() >= prev_len);
                    prev_len = description.len();
                }
            }
            let mut seen = std::collections::HashSet::new();
            for species in Species::ALL {
                let description = filter_input(species, &input, 2).unwrap();
                prop_assert!(seen.insert(description));
            }
        }

        #[test]
        fn text_descriptions_never_leak_original_words(text in "[a-zA-Z ]{1,80}") {
            let input = RawInput {
                modality: Modality::Text,
                timestamp: Utc::now(),
                source: "user".into(),
                data: InputData::Text(text.clone()),
            };
            let description = filter_input(Species::Chromatic, &input, 4).unwrap();
            for word in text.split_whitespace().filter(|w| w.len() > 3) {
                prop_assert!(!description.contains(word));
            }
        }
    }
}
