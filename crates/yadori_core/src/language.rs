//! Language acquisition.

use serde::{Deserialize, Serialize};

use crate::genesis::Species;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub symbol: String,
    pub meaning: String,
    pub established_day: u64,
    pub usage_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageState {
    pub level: u8,
    pub total_interactions: u64,
    pub native_symbols: Vec<String>,
    pub patterns: Vec<Pattern>,
}

impl LanguageState {
    pub fn new(species: Species) -> Self {
        Self {
            level: 0,
            total_interactions: 0,
            native_symbols: native_symbols_for(species).iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

/// Six glyphs per species, drawn from a fixed table at genesis. Disjoint
/// across species so first-encounter expressions built from them are
/// automatically species-distinct.
pub fn native_symbols_for(species: Species) -> [&'static str; 6] {
    match species {
        Species::Chromatic => ["◈", "◇", "⬖", "⬗", "⬘", "⬙"],
        Species::Vibration => ["≈", "∿", "⌇", "〰", "⥉", "⥈"],
        Species::Geometric => ["△", "▢", "◎", "◬", "⬡", "⬠"],
        Species::Thermal => ["⚶", "⚷", "⚸", "♨", "⛭", "⛯"],
        Species::Temporal => ["☉", "☾", "⏣", "⏥", "⏦", "⌛"],
        Species::Chemical => ["⚗", "⚛", "⚚", "⚙", "⚜", "⚝"],
    }
}

const LEVEL_REQUIREMENTS: [(u64, u64); 4] = [(7, 30), (21, 100), (45, 250), (90, 500)];

/// Monotone step function: never decreases, requires both a minimum day and
/// a minimum interaction count to reach each new level.
pub fn evaluate_language_level(language: &LanguageState, growth_day: u64) -> u8 {
    let mut level = language.level;
    while (level as usize) < LEVEL_REQUIREMENTS.len() {
        let (min_day, min_interactions) = LEVEL_REQUIREMENTS[level as usize];
        if growth_day >= min_day && language.total_interactions >= min_interactions {
            level += 1;
        } else {
            break;
        }
    }
    level
}

/// Creates a new pattern or bumps `usage_count` for an existing symbol.
pub fn establish_pattern(language: &mut LanguageState, symbol: &str, meaning: &str, day: u64) {
    if let Some(existing) = language.patterns.iter_mut().find(|p| p.symbol == symbol) {
        existing.usage_count += 1;
    } else {
        language.patterns.push(Pattern {
            symbol: symbol.to_string(),
            meaning: meaning.to_string(),
            established_day: day,
            usage_count: 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_never_decreases_and_respects_both_gates() {
        let mut language = LanguageState::new(Species::Chromatic);
        assert_eq!(evaluate_language_level(&language, 100), 0); // no interactions yet
        language.total_interactions = 30;
        assert_eq!(evaluate_language_level(&language, 3), 0); // day gate not met
        assert_eq!(evaluate_language_level(&language, 7), 1);
    }

    #[test]
    fn native_symbols_are_distinct_across_species() {
        let mut all = Vec::new();
        for species in Species::ALL {
            all.extend(native_symbols_for(species));
        }
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn level_is_monotone_across_a_growing_timeline(
            steps in proptest::collection::vec((0u64..20, 0u64..60), 0..40)
        ) {
            let mut language = LanguageState::new(Species::Geometric);
            let mut day = 0u64;
            let mut prev_level = 0u8;
            for (day_step, interaction_step) in steps {
                day += day_step;
                language.total_interactions += interaction_step;
                let level = evaluate_language_level(&language, day);
                prop_assert!(level >= prev_level);
                language.level = level;
                prev_level = level;
            }
        }
    }
}
