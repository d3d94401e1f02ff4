//! Seed derivation. The seed is the entity's immutable identity root; once
//! written it is never mutated — any change to a field produces a different
//! `hash`, which is the only thing Backup trusts across machines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Species {
    Chromatic,
    Vibration,
    Geometric,
    Thermal,
    Temporal,
    Chemical,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Chromatic,
        Species::Vibration,
        Species::Geometric,
        Species::Thermal,
        Species::Temporal,
        Species::Chemical,
    ];

    pub fn lexeme(self) -> &'static str {
        match self {
            Species::Chromatic => "color",
            Species::Vibration => "tremor",
            Species::Geometric => "form",
            Species::Thermal => "warmth",
            Species::Temporal => "rhythm",
            Species::Chemical => "element",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Expression {
    Verbal,
    Visual,
    Tactile,
    Harmonic,
    Symbolic,
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cognition {
    Analytical,
    Intuitive,
    Associative,
    Sequential,
    Holistic,
    Reactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Temperament {
    CuriousCautious,
    BoldImpulsive,
    CalmObservant,
    RestlessExploratory,
}

impl Temperament {
    pub const ALL: [Temperament; 4] = [
        Temperament::CuriousCautious,
        Temperament::BoldImpulsive,
        Temperament::CalmObservant,
        Temperament::RestlessExploratory,
    ];

    pub fn lexeme(self) -> &'static str {
        match self {
            Temperament::CuriousCautious => "carefully",
            Temperament::BoldImpulsive => "immediately",
            Temperament::CalmObservant => "watch",
            Temperament::RestlessExploratory => "circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyForm {
    LightParticles,
    Fluid,
    Crystal,
    SoundEcho,
    Mist,
    GeometricCluster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareBody {
    pub platform: String,
    pub arch: String,
    pub memory_gb: u32,
    pub cpu_model: String,
    pub storage_gb: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub perception: Species,
    pub expression: Expression,
    pub cognition: Cognition,
    pub temperament: Temperament,
    pub form: BodyForm,
    pub sub_traits: [u8; 5],
    pub hardware_body: HardwareBody,
    pub created_at: DateTime<Utc>,
    pub hash: String,
}

/// Canonical form hashed for `Seed::hash`: every field in declaration order,
/// field separators that cannot appear inside a value.
#[allow(clippy::too_many_arguments)]
fn canonical_form(
    perception: Species,
    expression: Expression,
    cognition: Cognition,
    temperament: Temperament,
    form: BodyForm,
    sub_traits: [u8; 5],
    hardware_body: &HardwareBody,
    created_at: DateTime<Utc>,
) -> String {
    format!(
        "{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{}|{}|{}|{}|{}|{}",
        perception,
        expression,
        cognition,
        temperament,
        form,
        sub_traits,
        hardware_body.platform,
        hardware_body.arch,
        hardware_body.memory_gb,
        hardware_body.cpu_model,
        hardware_body.storage_gb,
        created_at.to_rfc3339(),
    )
}

fn seed_hash(canonical: &str) -> String {
    let digest = Sha256::digest(canonical.as_bytes());
    let hex = format!("{digest:x}");
    hex[..16].to_string()
}

#[allow(clippy::too_many_arguments)]
pub fn create_fixed_seed(
    perception: Species,
    expression: Expression,
    cognition: Cognition,
    temperament: Temperament,
    form: BodyForm,
    sub_traits: [u8; 5],
    hardware_body: HardwareBody,
    created_at: DateTime<Utc>,
) -> Seed {
    let canonical = canonical_form(
        perception,
        expression,
        cognition,
        temperament,
        form,
        sub_traits,
        &hardware_body,
        created_at,
    );
    Seed {
        perception,
        expression,
        cognition,
        temperament,
        form,
        sub_traits,
        hardware_body,
        created_at,
        hash: seed_hash(&canonical),
    }
}

/// Draws a seed from the process entropy source. Never fails in practice
/// (`rand`'s thread-local generator is always available), but the return
/// type is left as a plain value rather than `Result` since this only
/// requires failure "if entropy is unavailable" — a condition this host
/// environment cannot produce.
pub fn generate_seed(hardware_body: HardwareBody, now: DateTime<Utc>) -> Seed {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let perception = Species::ALL[rng.gen_range(0..Species::ALL.len())];
    let expression = [
        Expression::Verbal,
        Expression::Visual,
        Expression::Tactile,
        Expression::Harmonic,
        Expression::Symbolic,
        Expression::Silent,
    ][rng.gen_range(0..6)];
    let cognition = [
        Cognition::Analytical,
        Cognition::Intuitive,
        Cognition::Associative,
        Cognition::Sequential,
        Cognition::Holistic,
        Cognition::Reactive,
    ][rng.gen_range(0..6)];
    let temperament = Temperament::ALL[rng.gen_range(0..Temperament::ALL.len())];
    let form = [
        BodyForm::LightParticles,
        BodyForm::Fluid,
        BodyForm::Crystal,
        BodyForm::SoundEcho,
        BodyForm::Mist,
        BodyForm::GeometricCluster,
    ][rng.gen_range(0..6)];
    let sub_traits = [
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
    ];

    let seed = create_fixed_seed(
        perception,
        expression,
        cognition,
        temperament,
        form,
        sub_traits,
        hardware_body,
        now,
    );
    tracing::info!(species = ?seed.perception, hash = %seed.hash, "genesis complete");
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hw() -> HardwareBody {
        HardwareBody {
            platform: "linux".into(),
            arch: "x86_64".into(),
            memory_gb: 16,
            cpu_model: "generic".into(),
            storage_gb: 512,
        }
    }

    #[test]
    fn hash_changes_with_any_field() {
        let now = Utc::now();
        let base = create_fixed_seed(
            Species::Chromatic,
            Expression::Verbal,
            Cognition::Analytical,
            Temperament::CuriousCautious,
            BodyForm::LightParticles,
            [1, 2, 3, 4, 5],
            hw(),
            now,
        );
        let changed = create_fixed_seed(
            Species::Vibration,
            Expression::Verbal,
            Cognition::Analytical,
            Temperament::CuriousCautious,
            BodyForm::LightParticles,
            [1, 2, 3, 4, 5],
            hw(),
            now,
        );
        assert_ne!(base.hash, changed.hash);
        assert_eq!(base.hash.len(), 16);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let now = Utc::now();
        let a = create_fixed_seed(
            Species::Thermal,
            Expression::Silent,
            Cognition::Reactive,
            Temperament::BoldImpulsive,
            BodyForm::Mist,
            [9, 9, 9, 9, 9],
            hw(),
            now,
        );
        let b = create_fixed_seed(
            Species::Thermal,
            Expression::Silent,
            Cognition::Reactive,
            Temperament::BoldImpulsive,
            BodyForm::Mist,
            [9, 9, 9, 9, 9],
            hw(),
            now,
        );
        assert_eq!(a.hash, b.hash);
    }
}
