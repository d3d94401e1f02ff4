//! Human-readable rendering: diary text, SOUL_EVIL markdown, and the
//! bidirectional markdown serializer/parser for every sub-state.

pub mod diary;
pub mod markdown;
pub mod soul;

pub use diary::render_diary;
pub use markdown::{serialize_state, SerializedState};
pub use soul::render_soul_evil;
