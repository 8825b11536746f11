//! Context heuristics: allow-phrase exceptions and quote/report detection.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::error::ModerationError;
use super::normalizer::Normalizer;

/// Phrases that read as someone reporting or citing words rather than
/// using them.
pub const REPORTING_PATTERNS: &[&str] = &[
    r"\bm['’]\s?a\s+(?:dit|écrit|ecrit|traité|traite|insulté|insulte|envoyé|envoye|appelé|appele)\b",
    r"\bm['’]\s?ont\s+(?:dit|traité|traite|insulté|insulte)\b",
    r"\b(?:il|elle|ils|elles|on)\s+(?:m['’]\s?)?a(?:vait)?\s+(?:dit|écrit|ecrit)\b",
    r"\bje\s+(?:vous\s+)?(?:signale|rapporte|cite)\b",
    r"\bsignaler?\s+(?:un|ce|cet|cette|le|la)\b",
    r"\bselon\s+(?:lui|elle|eux|elles)\b",
    r"\b(?:en\s+)?citant\b",
];

/// Quotation-mark pairs: straight, curly, guillemets and low-9.
const QUOTE_PAIR_PATTERNS: &[&str] = &[
    r#""[^"]+""#,
    r"“[^”]+”",
    r"«[^»]+»",
    r"„[^“”]+[“”]",
];

/// True when any allow-phrase appears in the text.
///
/// Deliberately coarse: untokenized substring tests on the lowercase raw text
/// and on the normalized text.
pub fn has_context_exception(
    lower_text: &str,
    normalized_text: &str,
    phrases: &[String],
    normalizer: &Normalizer,
) -> bool {
    phrases.iter().any(|phrase| {
        let lower = phrase.to_lowercase();
        if !lower.is_empty() && lower_text.contains(&lower) {
            return true;
        }
        let normalized = normalizer.normalize(phrase);
        !normalized.is_empty() && normalized_text.contains(&normalized)
    })
}

/// Detects messages that read as a citation or a report of someone else's
/// words.
#[derive(Debug, Clone)]
pub struct QuoteDetector {
    patterns: Vec<Regex>,
}

impl QuoteDetector {
    pub fn new() -> Self {
        let sources: Vec<&str> = QUOTE_PAIR_PATTERNS
            .iter()
            .chain(REPORTING_PATTERNS.iter())
            .copied()
            .collect();
        Self::with_patterns(&sources)
    }

    /// Build from explicit pattern sources. Sources that fail to compile are
    /// logged and left out; the remaining ones still apply.
    pub fn with_patterns(sources: &[&str]) -> Self {
        let patterns = sources
            .iter()
            .filter_map(|source| match compile(source) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!(error = %err, "reporting pattern skipped");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// True when the raw text looks like a quotation or a report.
    pub fn detect(&self, raw: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(raw))
    }
}

impl Default for QuoteDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(source: &str) -> Result<Regex, ModerationError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ModerationError::compilation(source, &e))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
