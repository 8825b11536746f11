//! market-guard: content moderation for a French-language marketplace.
//!
//! Two engines share one normalization primitive:
//!
//! - [`moderation`]: dictionary moderation of chat messages and short fields,
//!   with obfuscation-resistant matching, context and quote heuristics, a
//!   single severity/action verdict and span-preserving censoring.
//! - [`scoring`]: a heuristic score for long-form listing text.
//!
//! [`ContentGuard`] wires both into the chat pre-send and listing
//! pre-publish hooks. Every verdict-producing call is infallible and fails
//! open; only configuration loading returns errors.

pub mod config;
pub mod guard;
pub mod moderation;
pub mod scoring;
pub mod telemetry;

pub use config::EngineConfig;
pub use guard::{ContentGuard, ListingDraft, ListingReview};
pub use moderation::{
    Action, CensorEngine, Dictionary, ForbiddenWordEntry, MessageValidator, ModerationEngine,
    ModerationError, ModerationVerdict, Severity, ValidationOptions, ValidationResult,
};
pub use scoring::{Category, ContentScorer, FieldKind, InappropriateContentResult, ScorerConfig};
