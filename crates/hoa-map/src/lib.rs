//! Pattern library and auto-mapping generator.
//!
//! Given the header row of an uploaded file and a target entity type,
//! this crate proposes a canonical target field for every column. The
//! operator-facing mapping editor may then override any proposal before
//! validation and import.

pub mod engine;
pub mod patterns;
pub mod utils;

pub use engine::{MappingEngine, MatchSource, Proposal, generate_mapping};
pub use patterns::{Recognizer, recognizers_for};
pub use utils::normalize_header;
