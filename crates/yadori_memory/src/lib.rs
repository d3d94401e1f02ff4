//! Top-level orchestration for a single entity: the hot/warm/cold memory
//! consolidation pipeline, the Status Manager event pipelines
//! (`process_heartbeat`/`process_interaction`), and Backup/Restore.

pub mod backup;
pub mod consolidation;
pub mod coordinator;
pub mod error;

pub use coordinator::{process_heartbeat, process_interaction, HeartbeatResult, InteractionResult, StatusManager};
