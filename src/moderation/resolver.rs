//! Severity and action resolution.
//!
//! Runs every dictionary entry against a message, applies the context,
//! quote and short-message suppressions, and folds the surviving matches
//! into a single verdict.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::{has_context_exception, QuoteDetector};
use super::dictionary::{Action, Dictionary, ForbiddenWordEntry, Severity};
use super::error::{ErrorBudget, ModerationError};
use super::matcher::{compile_dictionary, CompiledEntry, MatchInput};
use super::normalizer::Normalizer;

/// Messages shorter than this (in chars) ignore low-severity warn entries.
pub const SHORT_MESSAGE_CHARS: usize = 20;

/// Outcome of running the dictionary over one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub has_forbidden_content: bool,
    /// Display terms of matched entries, in dictionary order, no duplicates.
    pub matched_terms: Vec<String>,
    /// Highest severity among matched entries.
    pub severity: Option<Severity>,
    pub possible_quote_or_report: bool,
    /// Highest-priority action among matched entries.
    pub recommended_action: Option<Action>,
    /// Some matched entry asked for moderator review, even when a
    /// higher-priority action won.
    #[serde(default)]
    pub notify_moderator: bool,
}

impl ModerationVerdict {
    /// The "no violation" verdict.
    pub fn clean() -> Self {
        Self::default()
    }

    fn record(&mut self, entry: &ForbiddenWordEntry) {
        self.has_forbidden_content = true;
        let term = entry.display_term();
        if !self.matched_terms.iter().any(|t| t == term) {
            self.matched_terms.push(term.to_string());
        }
        self.severity = self.severity.max(Some(entry.severity));
        let action = entry.effective_action();
        self.notify_moderator |= action == Action::NotifyMod;
        if self
            .recommended_action
            .map_or(true, |current| action.priority() > current.priority())
        {
            self.recommended_action = Some(action);
        }
    }
}

/// Dictionary moderation engine. Cheap to clone; the compiled dictionary is
/// shared.
#[derive(Debug, Clone)]
pub struct ModerationEngine {
    normalizer: Normalizer,
    quotes: QuoteDetector,
    entries: Arc<Vec<CompiledEntry>>,
}

impl ModerationEngine {
    pub fn new(dictionary: &Dictionary) -> Self {
        Self::with_parts(dictionary, Normalizer::new(), QuoteDetector::new())
    }

    pub fn with_parts(dictionary: &Dictionary, normalizer: Normalizer, quotes: QuoteDetector) -> Self {
        let entries = Arc::new(compile_dictionary(dictionary, &normalizer));
        Self {
            normalizer,
            quotes,
            entries,
        }
    }

    /// Engine over the canonical dictionary.
    pub fn canonical() -> Self {
        Self::new(&Dictionary::canonical())
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn quote_detector(&self) -> &QuoteDetector {
        &self.quotes
    }

    pub(crate) fn entries(&self) -> &[CompiledEntry] {
        &self.entries
    }

    /// Analyze a message. Fails open: any error yields the clean verdict.
    pub fn analyze(&self, text: &str) -> ModerationVerdict {
        let verdict = match self.try_analyze(text) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "moderation failed open, message passed unmoderated");
                metrics::counter!("moderation_fail_open_total").increment(1);
                ModerationVerdict::clean()
            }
        };
        let action = verdict.recommended_action.map_or("none", Action::as_str);
        metrics::counter!("moderation_verdicts_total", "action" => action).increment(1);
        debug!(
            matched = verdict.matched_terms.len(),
            action,
            quote = verdict.possible_quote_or_report,
            "message analyzed"
        );
        verdict
    }

    /// Analyze a message, surfacing `ErrorOverload` instead of failing open.
    pub fn try_analyze(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let input = MatchInput::new(text, &self.normalizer);
        let quote = self.quotes.detect(text);
        let short = text.trim().chars().count() < SHORT_MESSAGE_CHARS;
        let mut budget = ErrorBudget::new();

        let mut verdict = ModerationVerdict {
            possible_quote_or_report: quote,
            ..ModerationVerdict::default()
        };

        for compiled in self.entries.iter() {
            if !entry_matches(compiled, &input, &mut budget)? {
                continue;
            }
            let entry = &compiled.entry;
            if has_context_exception(
                input.lower(),
                input.normalized().as_str(),
                &entry.context_exceptions,
                &self.normalizer,
            ) {
                debug!(entry = %entry.display_term(), "match suppressed by context exception");
                continue;
            }
            if quote && entry.severity == Severity::Low {
                continue;
            }
            if short
                && entry.severity == Severity::Low
                && matches!(entry.action, None | Some(Action::Warn))
            {
                continue;
            }
            verdict.record(entry);
        }

        Ok(verdict)
    }
}

/// Main word first, then aliases; the first hit wins.
fn entry_matches(
    compiled: &CompiledEntry,
    input: &MatchInput<'_>,
    budget: &mut ErrorBudget,
) -> Result<bool, ModerationError> {
    for pattern in compiled.patterns() {
        let hit = match pattern.is_match(input) {
            Ok(hit) => hit,
            Err(err) => {
                budget.record(&err)?;
                pattern.contains_fallback(input)
            }
        };
        if hit {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
