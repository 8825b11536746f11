//! Message validator.
//!
//! Orchestrates length policy, dictionary moderation and censoring into a
//! single [`ValidationResult`] for the chat pre-send hook.

use tracing::{debug, warn};

use super::censor::CensorEngine;
use super::dictionary::{Action, Dictionary, Severity};
use super::resolver::{ModerationEngine, ModerationVerdict};
pub use super::validator_types::{ValidationOptions, ValidationResult, DEFAULT_MAX_LENGTH};

const EMPTY_REASON: &str = "Le message ne peut pas être vide.";
const WARNING_TEXT: &str =
    "Attention : votre message contient un langage inapproprié. Merci de rester courtois.";
const QUOTE_REASON: &str = "Votre message semble citer des propos inappropriés. \
     Pour signaler un comportement abusif, utilisez la fonction de signalement.";
const GENERIC_REASON: &str = "Votre message contient des termes inappropriés.";

/// Validates chat messages against the dictionary and a per-call policy.
#[derive(Debug, Clone)]
pub struct MessageValidator {
    engine: ModerationEngine,
    censor: CensorEngine,
}

impl MessageValidator {
    pub fn new(engine: ModerationEngine) -> Self {
        let censor = CensorEngine::from_engine(&engine);
        Self { engine, censor }
    }

    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        Self::new(ModerationEngine::new(dictionary))
    }

    /// Validator over the canonical dictionary.
    pub fn canonical() -> Self {
        Self::new(ModerationEngine::canonical())
    }

    pub fn engine(&self) -> &ModerationEngine {
        &self.engine
    }

    pub fn censor(&self) -> &CensorEngine {
        &self.censor
    }

    /// Validate one message.
    pub fn validate(&self, text: &str, options: &ValidationOptions) -> ValidationResult {
        if let Some(reason) = length_violation(text, options) {
            debug!(reason, "message rejected on length");
            return ValidationResult::rejected(text, vec![reason], ModerationVerdict::clean());
        }

        let verdict = self.engine.analyze(text);
        if !verdict.has_forbidden_content {
            return ValidationResult::accepted(text, verdict);
        }

        if options.respect_recommended_actions {
            self.apply_action(text, verdict, options)
        } else {
            self.apply_legacy(text, verdict, options)
        }
    }

    fn apply_action(
        &self,
        text: &str,
        verdict: ModerationVerdict,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let action = match verdict.recommended_action {
            Some(Action::Block) if options.censor_instead_of_block => {
                return self.censor_or_reject(text, verdict);
            }
            Some(action) => action,
            None => return ValidationResult::accepted(text, verdict),
        };

        match action {
            Action::Block => {
                let reason = forbidden_terms_reason(&verdict.matched_terms);
                ValidationResult::rejected(text, vec![reason], verdict)
            }
            Action::Warn => ValidationResult {
                warning_text: Some(WARNING_TEXT.to_string()),
                ..ValidationResult::accepted(text, verdict)
            },
            Action::Censor => ValidationResult {
                censored_text: self.censor.censor(text),
                ..ValidationResult::accepted(text, verdict)
            },
            Action::NotifyMod => ValidationResult {
                censored_text: self.censor.censor(text),
                should_notify_moderator: true,
                ..ValidationResult::accepted(text, verdict)
            },
        }
    }

    fn apply_legacy(
        &self,
        text: &str,
        verdict: ModerationVerdict,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let notify = verdict.notify_moderator;
        let quoted = verdict.possible_quote_or_report && options.allow_quoted_words;
        let low = verdict.severity == Some(Severity::Low) && options.allow_low_severity_words;
        if quoted || low {
            return ValidationResult {
                should_notify_moderator: notify,
                ..ValidationResult::accepted(text, verdict)
            };
        }

        if options.censor_instead_of_block {
            if verdict.recommended_action == Some(Action::Block) {
                return self.censor_or_reject(text, verdict);
            }
            return ValidationResult {
                censored_text: self.censor.censor(text),
                should_notify_moderator: notify,
                ..ValidationResult::accepted(text, verdict)
            };
        }

        let mut reasons = Vec::new();
        if verdict.possible_quote_or_report {
            reasons.push(QUOTE_REASON.to_string());
        }
        if verdict.severity == Some(Severity::High) {
            reasons.push(forbidden_terms_reason(&verdict.matched_terms));
        } else if reasons.is_empty() {
            reasons.push(GENERIC_REASON.to_string());
        }
        ValidationResult {
            should_notify_moderator: notify,
            ..ValidationResult::rejected(text, reasons, verdict)
        }
    }

    /// Mask a message that would otherwise be blocked. If nothing could be
    /// located to mask, the message is rejected instead of delivered as is.
    fn censor_or_reject(&self, text: &str, verdict: ModerationVerdict) -> ValidationResult {
        let outcome = self.censor.censor_detailed(text);
        let notify = verdict.notify_moderator;
        if !outcome.modified() {
            warn!(
                terms = verdict.matched_terms.len(),
                "blocked message could not be masked, rejecting"
            );
            let reason = forbidden_terms_reason(&verdict.matched_terms);
            return ValidationResult {
                should_notify_moderator: notify,
                ..ValidationResult::rejected(text, vec![reason], verdict)
            };
        }
        ValidationResult {
            censored_text: outcome.text,
            should_notify_moderator: notify,
            ..ValidationResult::accepted(text, verdict)
        }
    }
}

impl Default for MessageValidator {
    fn default() -> Self {
        Self::canonical()
    }
}

fn length_violation(text: &str, options: &ValidationOptions) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (!options.allow_empty).then(|| EMPTY_REASON.to_string());
    }
    // Both bounds count the trimmed message.
    let len = trimmed.chars().count();
    if len < options.min_length {
        return Some(format!(
            "Le message doit contenir au moins {} caractère(s).",
            options.min_length
        ));
    }
    match options.max_length {
        Some(max) if len > max => Some(format!(
            "Le message ne peut pas dépasser {} caractères.",
            max
        )),
        _ => None,
    }
}

fn forbidden_terms_reason(terms: &[String]) -> String {
    format!("Votre message contient des termes interdits : {}.", terms.join(", "))
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
