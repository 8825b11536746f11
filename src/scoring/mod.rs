//! Heuristic scoring of long-form listing text.

pub mod analysis;
pub mod scorer;
pub mod scorer_tables;
mod scorer_types;

pub use scorer::ContentScorer;
pub use scorer_types::{Category, FieldKind, InappropriateContentResult, ScorerConfig, Signal};
