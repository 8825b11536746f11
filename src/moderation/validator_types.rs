//! Options and result records for the message validator.

use serde::{Deserialize, Serialize};

use super::resolver::ModerationVerdict;

/// Default upper bound on a chat message, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 2000;

/// Per-call validation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Accept empty (or whitespace-only) messages
    pub allow_empty: bool,
    /// Maximum length in characters of the trimmed message, `None` for
    /// unbounded
    pub max_length: Option<usize>,
    /// Minimum length in characters of the trimmed message
    pub min_length: usize,
    /// Mask instead of rejecting when a message would be blocked
    pub censor_instead_of_block: bool,
    /// Legacy mode: let low-severity matches through
    pub allow_low_severity_words: bool,
    /// Legacy mode: let suspected quotes/reports through
    pub allow_quoted_words: bool,
    /// Follow the resolver's recommended action (default) instead of the
    /// legacy allow/block rules
    pub respect_recommended_actions: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            allow_empty: false,
            max_length: Some(DEFAULT_MAX_LENGTH),
            min_length: 1,
            censor_instead_of_block: false,
            allow_low_severity_words: false,
            allow_quoted_words: false,
            respect_recommended_actions: true,
        }
    }
}

impl ValidationOptions {
    /// Options for the legacy allow/block rules.
    pub fn legacy() -> Self {
        Self {
            respect_recommended_actions: false,
            ..Self::default()
        }
    }

    pub fn censoring(mut self) -> Self {
        self.censor_instead_of_block = true;
        self
    }
}

/// Validator outcome for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Text to deliver: the original, or its masked copy
    pub censored_text: String,
    pub original_text: String,
    /// Human-readable reasons, empty when valid
    pub violations: Vec<String>,
    pub should_notify_moderator: bool,
    pub warning_text: Option<String>,
    /// Moderation verdict behind this result
    pub verdict: ModerationVerdict,
}

impl ValidationResult {
    pub(crate) fn accepted(text: &str, verdict: ModerationVerdict) -> Self {
        Self {
            is_valid: true,
            censored_text: text.to_string(),
            original_text: text.to_string(),
            violations: Vec::new(),
            should_notify_moderator: false,
            warning_text: None,
            verdict,
        }
    }

    pub(crate) fn rejected(text: &str, reasons: Vec<String>, verdict: ModerationVerdict) -> Self {
        Self {
            is_valid: false,
            violations: reasons,
            ..Self::accepted(text, verdict)
        }
    }

    /// True when the delivered text differs from what was submitted.
    pub fn was_censored(&self) -> bool {
        self.censored_text != self.original_text
    }
}
