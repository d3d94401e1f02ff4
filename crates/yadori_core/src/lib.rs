//! Pure, deterministic data model and per-subsystem evaluators for a single
//! digital entity: Genesis, Status/Mood, Sulk, Language, Growth, Form,
//! Perception, First-Encounter, and Dynamics (Asymmetry/Reversal/Coexist).
//!
//! Nothing here performs I/O, spawns tasks, or holds a lock — every public
//! function is a plain transformation from owned values to a new owned
//! value. Orchestration across subsystems (the heartbeat/interaction event
//! pipelines, memory consolidation, backup) lives one layer up, in
//! `yadori_memory`.

pub mod config;
pub mod dynamics;
pub mod error;
pub mod first_encounter;
pub mod form;
pub mod genesis;
pub mod growth;
pub mod language;
pub mod memory;
pub mod mood;
pub mod perception;
pub mod state;
pub mod status;
pub mod sulk;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::genesis::{BodyForm, Cognition, Expression, HardwareBody, Seed, Species, Temperament};
    pub use crate::state::EntityState;
    pub use crate::status::{Status, StatusDelta};
}
