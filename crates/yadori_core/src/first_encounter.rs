//! Species×temperament one-shot reaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genesis::{Species, Temperament};
use crate::language::native_symbols_for;
use crate::status::StatusDelta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryImprint {
    pub summary: String,
    pub mood: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub expression: String,
    pub inner_experience: String,
    pub status_effect: StatusDelta,
    pub memory_imprint: MemoryImprint,
}

fn self_and_other(species: Species) -> (&'static str, &'static str) {
    let symbols = native_symbols_for(species);
    (symbols[0], symbols[3])
}

fn build_expression(temperament: Temperament, self_sym: &str, other_sym: &str) -> String {
    match temperament {
        Temperament::CuriousCautious => format!("{self_sym} {other_sym} {self_sym}"),
        Temperament::BoldImpulsive => format!("{self_sym}{self_sym}{other_sym}"),
        Temperament::CalmObservant => format!("{self_sym}   {other_sym}"),
        Temperament::RestlessExploratory => {
            format!("{other_sym}{other_sym}{self_sym}{other_sym}{other_sym}")
        }
    }
}

fn status_effect(temperament: Temperament) -> StatusDelta {
    match temperament {
        Temperament::CuriousCautious => StatusDelta {
            mood: 15,
            energy: 10,
            curiosity: 20,
            comfort: 0,
        },
        Temperament::BoldImpulsive => StatusDelta {
            mood: 30,
            energy: 30,
            curiosity: 15,
            comfort: 0,
        },
        Temperament::CalmObservant => StatusDelta {
            mood: 12,
            energy: 8,
            curiosity: 10,
            comfort: 0,
        },
        Temperament::RestlessExploratory => StatusDelta {
            mood: 15,
            energy: 15,
            curiosity: 30,
            comfort: 0,
        },
    }
}

fn imprint_mood(temperament: Temperament) -> u8 {
    match temperament {
        Temperament::BoldImpulsive => 65,
        Temperament::RestlessExploratory => 60,
        Temperament::CuriousCautious | Temperament::CalmObservant => 55,
    }
}

/// Deterministic in (species, temperament) for everything but the imprint
/// timestamp; fires exactly once, on the first interaction.
pub fn generate_first_encounter(species: Species, temperament: Temperament, now: DateTime<Utc>) -> Reaction {
    let (self_sym, other_sym) = self_and_other(species);
    let expression = build_expression(temperament, self_sym, other_sym);
    let inner_experience = format!("{} {}", species.lexeme(), temperament.lexeme());
    let effect = status_effect(temperament);
    let mood = imprint_mood(temperament);

    tracing::info!(species = ?species, temperament = ?temperament, "first encounter");

    Reaction {
        expression,
        inner_experience,
        status_effect: effect,
        memory_imprint: MemoryImprint {
            summary: format!(
                "[FIRST ENCOUNTER] senses {} for the first time and reaches out",
                species.lexeme()
            ),
            mood,
            timestamp: now,
        },
    }
}

pub fn format_first_encounter_diary(
    reaction: &Reaction,
    species: Species,
    temperament: Temperament,
    now: DateTime<Utc>,
) -> String {
    format!(
        "# First Encounter — {date}\n\n\
         **Species:** {species:?}\n\
         **Temperament:** {temperament:?}\n\
         **Expression:** {expression}\n\
         **Inner experience:** {inner}\n\n\
         - mood {mood:+}\n\
         - energy {energy:+}\n\
         - curiosity {curiosity:+}\n\n\
         This is the first awareness of another.\n",
        date = now.format("%Y-%m-%d"),
        species = species,
        temperament = temperament,
        expression = reaction.expression,
        inner = reaction.inner_experience,
        mood = reaction.status_effect.mood,
        energy = reaction.status_effect.energy,
        curiosity = reaction.status_effect.curiosity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_24_expressions_are_pairwise_distinct() {
        let mut seen = std::collections::HashSet::new();
        let now = Utc::now();
        for species in Species::ALL {
            for temperament in Temperament::ALL {
                let reaction = generate_first_encounter(species, temperament, now);
                assert!(
                    seen.insert(reaction.expression.clone()),
                    "duplicate expression: {}",
                    reaction.expression
                );
                assert!(reaction.status_effect.mood > 0);
                assert!(reaction.status_effect.energy > 0);
                assert!(reaction.status_effect.curiosity > 0);
                assert!(reaction.memory_imprint.mood > 50);
                assert!(reaction.memory_imprint.summary.starts_with("[FIRST ENCOUNTER]"));
            }
        }
    }

    #[test]
    fn deterministic_in_species_and_temperament() {
        let now1 = Utc::now();
        let now2 = now1 + chrono::Duration::days(3);
        let a = generate_first_encounter(Species::Geometric, Temperament::BoldImpulsive, now1);
        let b = generate_first_encounter(Species::Geometric, Temperament::BoldImpulsive, now2);
        assert_eq!(a.expression, b.expression);
        assert_eq!(a.inner_experience, b.inner_experience);
        assert_eq!(a.status_effect, b.status_effect);
    }

    #[test]
    fn bold_impulsive_maximizes_mood_and_energy() {
        let now = Utc::now();
        let bold = generate_first_encounter(Species::Thermal, Temperament::BoldImpulsive, now);
        for other in [
            Temperament::CuriousCautious,
            Temperament::CalmObservant,
            Temperament::RestlessExploratory,
        ] {
            let reaction = generate_first_encounter(Species::Thermal, other, now);
            assert!(bold.status_effect.mood >= reaction.status_effect.mood);
            assert!(bold.status_effect.energy >= reaction.status_effect.energy);
        }
    }

    #[test]
    fn restless_exploratory_maximizes_curiosity() {
        let now = Utc::now();
        let restless = generate_first_encounter(Species::Chemical, Temperament::RestlessExploratory, now);
        for other in [
            Temperament::CuriousCautious,
            Temperament::CalmObservant,
            Temperament::BoldImpulsive,
        ] {
            let reaction = generate_first_encounter(Species::Chemical, other, now);
            assert!(restless.status_effect.curiosity >= reaction.status_effect.curiosity);
        }
    }
}
