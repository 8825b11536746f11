//! Span-preserving censor.
//!
//! Produces a copy of a message with every matched span replaced by mask
//! characters, one mask per source character, so layout and length survive.
//!
//! Literal entries are located three ways: a boundary-anchored regex, a
//! "flexible" regex allowing one separator between letters (`p.u.t.e`), and a
//! containment pass over the normalized text whose hits are mapped back onto
//! the source through the normalizer's index map. Aliases get the same
//! containment pass in substring mode, mirroring how the resolver matches
//! them. Regex entries are masked directly.

use std::ops::Range;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::context::{has_context_exception, QuoteDetector};
use super::dictionary::{Dictionary, ForbiddenWordEntry, Severity};
use super::error::ModerationError;
use super::matcher::{boundary_regex, is_word_or_plural, plural_suffixes};
use super::normalizer::{NormalizedText, Normalizer};
use super::resolver::ModerationEngine;

pub const MASK_CHAR: char = '*';

/// Masked text plus the source byte spans that were masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensorOutcome {
    pub text: String,
    pub masked_spans: Vec<Range<usize>>,
}

impl CensorOutcome {
    pub fn modified(&self) -> bool {
        !self.masked_spans.is_empty()
    }
}

/// Compiled masking strategy for one entry.
#[derive(Debug, Clone)]
struct MaskPlan {
    entry: ForbiddenWordEntry,
    regexes: Vec<Regex>,
    /// Normalized main word for the index-mapped containment pass.
    normalized_word: Option<String>,
    /// Normalized aliases, matched as substrings of the normalized text.
    normalized_aliases: Vec<String>,
}

impl MaskPlan {
    fn build(entry: &ForbiddenWordEntry, normalizer: &Normalizer) -> Self {
        let mut regexes = Vec::new();
        let mut keep = |result: Result<Regex, ModerationError>| match result {
            Ok(re) => regexes.push(re),
            Err(err) => warn!(entry = %entry.display_term(), error = %err, "censor pattern skipped"),
        };

        if entry.is_regex {
            keep(compile(&entry.word));
            return Self {
                entry: entry.clone(),
                regexes,
                normalized_word: None,
                normalized_aliases: Vec::new(),
            };
        }

        let main = normalizer.normalize(&entry.word);
        if !main.is_empty() {
            if entry.whole_word_only {
                keep(boundary_regex(&main));
            } else {
                keep(compile(&regex::escape(&main)));
            }
            if let Some(source) = flexible_source(&main, entry.whole_word_only) {
                keep(compile(&source));
            }
        }
        let mut normalized_aliases = Vec::new();
        for alias in &entry.aliases {
            let alias = normalizer.normalize(alias);
            if alias.is_empty() {
                continue;
            }
            keep(compile(&regex::escape(&alias).replace(' ', r"\s+")));
            if let Some(source) = flexible_source(&alias, false) {
                keep(compile(&source));
            }
            normalized_aliases.push(alias);
        }

        Self {
            entry: entry.clone(),
            regexes,
            normalized_word: (!main.is_empty()).then_some(main),
            normalized_aliases,
        }
    }
}

/// Censor engine over a compiled dictionary.
#[derive(Debug, Clone)]
pub struct CensorEngine {
    normalizer: Normalizer,
    quotes: QuoteDetector,
    plans: Arc<Vec<MaskPlan>>,
    mask: char,
}

impl CensorEngine {
    pub fn new(dictionary: &Dictionary) -> Self {
        Self::with_parts(dictionary, Normalizer::new(), QuoteDetector::new())
    }

    pub fn with_parts(dictionary: &Dictionary, normalizer: Normalizer, quotes: QuoteDetector) -> Self {
        let plans = dictionary
            .entries()
            .iter()
            .map(|entry| MaskPlan::build(entry, &normalizer))
            .collect();
        Self {
            normalizer,
            quotes,
            plans: Arc::new(plans),
            mask: MASK_CHAR,
        }
    }

    /// Share the dictionary, normalizer and quote detector of an engine.
    pub fn from_engine(engine: &ModerationEngine) -> Self {
        let normalizer = engine.normalizer().clone();
        let plans = engine
            .entries()
            .iter()
            .map(|compiled| MaskPlan::build(&compiled.entry, &normalizer))
            .collect();
        Self {
            normalizer,
            quotes: engine.quote_detector().clone(),
            plans: Arc::new(plans),
            mask: MASK_CHAR,
        }
    }

    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    /// Masked copy of `text`.
    pub fn censor(&self, text: &str) -> String {
        self.censor_detailed(text).text
    }

    pub fn censor_detailed(&self, text: &str) -> CensorOutcome {
        let normalized = self.normalizer.normalize_mapped(text);
        let lower = text.to_lowercase();
        let quote = self.quotes.detect(text);
        let mut spans: Vec<Range<usize>> = Vec::new();

        for plan in self.plans.iter() {
            let entry = &plan.entry;
            if quote && entry.severity == Severity::Low {
                continue;
            }
            if has_context_exception(
                &lower,
                normalized.as_str(),
                &entry.context_exceptions,
                &self.normalizer,
            ) {
                continue;
            }
            for re in &plan.regexes {
                spans.extend(re.find_iter(text).map(|m| m.range()));
            }
            if let Some(word) = &plan.normalized_word {
                spans.extend(normalized_hits(&normalized, word, entry.whole_word_only));
            }
            for alias in &plan.normalized_aliases {
                spans.extend(normalized_hits(&normalized, alias, false));
            }
        }

        let masked_spans = merge_spans(spans);
        if !masked_spans.is_empty() {
            debug!(spans = masked_spans.len(), "message censored");
        }
        CensorOutcome {
            text: apply_mask(text, &masked_spans, self.mask),
            masked_spans,
        }
    }
}

fn compile(source: &str) -> Result<Regex, ModerationError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ModerationError::compilation(source, &e))
}

/// One optional non-space separator between letters: `p.u.t.e`.
/// Multi-word and single-letter words have no flexible form.
fn flexible_source(word: &str, whole_word: bool) -> Option<String> {
    if word.contains(' ') || word.chars().count() < 2 {
        return None;
    }
    let body = word
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect::<Vec<_>>()
        .join(r"[^\p{L}\p{N}\s]?");
    Some(if whole_word {
        format!(r"\b{}(?:{})?\b", body, plural_suffixes(word).join("|"))
    } else {
        body
    })
}

/// Occurrences of `word` in the normalized text, as source byte spans.
fn normalized_hits(normalized: &NormalizedText, word: &str, whole_word: bool) -> Vec<Range<usize>> {
    let text = normalized.as_str();
    let mut hits = Vec::new();
    for (start, _) in text.match_indices(word) {
        let mut end = start + word.len();
        if whole_word {
            if start > 0 && !text[..start].ends_with(' ') {
                continue;
            }
            let token_end = text[end..].find(' ').map_or(text.len(), |i| end + i);
            if !is_word_or_plural(&text[start..token_end], word) {
                continue;
            }
            end = token_end;
        }
        if let Some(span) = normalized.source_span(start, end) {
            hits.push(span);
        }
    }
    hits
}

fn merge_spans(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.retain(|s| s.start < s.end);
    spans.sort_by_key(|s| (s.start, s.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

fn apply_mask(text: &str, spans: &[Range<usize>], mask: char) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut spans = spans.iter().peekable();
    for (i, c) in text.char_indices() {
        while spans.peek().is_some_and(|s| s.end <= i) {
            spans.next();
        }
        let masked = spans.peek().is_some_and(|s| s.start <= i && i < s.end);
        out.push(if masked { mask } else { c });
    }
    out
}

#[cfg(test)]
#[path = "censor_tests.rs"]
mod tests;
