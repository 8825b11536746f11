//! Dictionary moderation for short user messages.
//!
//! Normalizes text, matches it against a forbidden-word dictionary, applies
//! context and quote heuristics, resolves one severity and action, and masks
//! offending spans on request.

pub mod censor;
pub mod context;
pub mod default_dictionary;
pub mod dictionary;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod resolver;
pub mod validator;
mod validator_types;

pub use censor::{CensorEngine, CensorOutcome, MASK_CHAR};
pub use context::{has_context_exception, QuoteDetector};
pub use dictionary::{Action, Dictionary, ForbiddenWordEntry, Severity};
pub use error::{ModerationError, ERROR_BUDGET};
pub use normalizer::{NormalizedText, Normalizer};
pub use resolver::{ModerationEngine, ModerationVerdict};
pub use validator::{MessageValidator, ValidationOptions, ValidationResult};
