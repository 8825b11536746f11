//! Error taxonomy for the moderation engine.
//!
//! None of these ever reach an end user. Verdict-producing calls log them and
//! fall back to a "no violation" default; only loaders return them.

use thiserror::Error;

/// Number of recoverable errors tolerated during one resolution before the
/// engine gives up and lets the message through.
pub const ERROR_BUDGET: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModerationError {
    #[error("Pattern failed to compile: {pattern}: {reason}")]
    PatternCompilation { pattern: String, reason: String },

    #[error("Pattern is empty after normalization: {0:?}")]
    EmptyPattern(String),

    #[error("Normalization stage '{stage}' failed: {reason}")]
    NormalizationStep { stage: &'static str, reason: String },

    #[error("Too many errors during one resolution: {count}")]
    ErrorOverload { count: usize },

    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModerationError {
    pub(crate) fn compilation(pattern: &str, err: &regex::Error) -> Self {
        Self::PatternCompilation {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Per-invocation error counter.
///
/// Each recoverable error is recorded; once the budget is exhausted the caller
/// receives `ErrorOverload` and must abort the resolution.
#[derive(Debug, Default)]
pub struct ErrorBudget {
    count: usize,
}

impl ErrorBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Returns `Err(ErrorOverload)` once the budget is spent.
    pub fn record(&mut self, err: &ModerationError) -> Result<(), ModerationError> {
        self.count += 1;
        metrics::counter!("moderation_pattern_errors_total").increment(1);
        tracing::warn!(error = %err, errors = self.count, "moderation error recorded");
        if self.count >= ERROR_BUDGET {
            return Err(ModerationError::ErrorOverload { count: self.count });
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
