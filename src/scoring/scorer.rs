//! Inappropriate-content scorer for long-form text.
//!
//! Independent of the forbidden-word dictionary: a category keyword table,
//! structural and numeric heuristics, fragmentation and leetspeak detection,
//! and a legitimate-context discount combine into a score in `[0, 1]`.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};
use tracing::{debug, warn};

use super::analysis::{self, KeywordHit};
use super::scorer_tables::{
    ADULT_CONTEXT_MIN, AMBIGUOUS_TERMS, CATEGORY_KEYWORDS, EXPLICIT_PHRASES, EXPLICIT_SCORE,
    LEGITIMATE_TERMS,
};
use super::scorer_types::{Category, FieldKind, InappropriateContentResult, ScorerConfig, Signal};
use crate::moderation::{ModerationError, Normalizer};

const FLAG_WEIGHT: f64 = 0.25;
const FRAGMENT_WEIGHT: f64 = 0.35;
const PAIR_WEIGHT: f64 = 0.15;
const DENSITY_MIN_KEYWORDS: usize = 3;
const DENSITY_FLOOR: f64 = 0.7;
const LEGIT_STEP: f64 = 0.08;
const LEGIT_MAX: f64 = 0.4;
const SUPPRESSED_STEP: f64 = 0.1;
const SUPPRESSED_MAX: f64 = 0.3;
const LOW_DENSITY_CHARS: usize = 500;
const LOW_DENSITY_RATIO: f64 = 0.02;
const LOW_DENSITY_DISCOUNT: f64 = 0.2;

static KEYWORD_INDEX: LazyLock<Result<KeywordIndex, ModerationError>> =
    LazyLock::new(KeywordIndex::build);

/// Aho-Corasick automaton over every category keyword.
struct KeywordIndex {
    automaton: AhoCorasick,
    keywords: Vec<(&'static str, Category)>,
}

impl KeywordIndex {
    fn build() -> Result<Self, ModerationError> {
        let keywords: Vec<(&'static str, Category)> = CATEGORY_KEYWORDS
            .iter()
            .flat_map(|(category, terms)| terms.iter().map(move |term| (*term, *category)))
            .collect();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(keywords.iter().map(|(term, _)| *term))
            .map_err(|e| ModerationError::PatternCompilation {
                pattern: "category keywords".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { automaton, keywords })
    }

    /// Whole-word hits, a trailing plural `s` allowed.
    fn scan(&self, text: &str) -> Vec<KeywordHit> {
        self.automaton
            .find_iter(text)
            .filter(|m| is_bounded(text, m.start(), m.end()))
            .filter_map(|m| {
                let (term, category) = *self.keywords.get(m.pattern().as_usize())?;
                Some(KeywordHit {
                    term,
                    category,
                    start: m.start(),
                })
            })
            .collect()
    }
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    if before.is_some_and(char::is_alphanumeric) {
        return false;
    }
    let mut after = text[end..].chars();
    match after.next() {
        None => true,
        Some('s') => !after.next().is_some_and(char::is_alphanumeric),
        Some(c) => !c.is_alphanumeric(),
    }
}

/// Running tally for one scoring pass.
#[derive(Debug, Default)]
struct Tally {
    categories: BTreeSet<Category>,
    matches: Vec<String>,
    signals: Vec<Signal>,
    bonus: f64,
    obfuscation: bool,
}

impl Tally {
    fn add_match(&mut self, label: &str, category: Category) {
        self.categories.insert(category);
        if !self.matches.iter().any(|m| m == label) {
            self.matches.push(label.to_string());
        }
    }

    fn flag(&mut self, signal: Signal, weight: f64) {
        if !self.signals.contains(&signal) {
            self.signals.push(signal);
        }
        self.bonus += weight;
    }

    fn base_score(&self) -> f64 {
        let categories = (self.categories.len() as f64 / 3.0).min(1.0);
        let matches = (self.matches.len() as f64 / 5.0).min(1.0);
        let obfuscation = if self.obfuscation { 1.0 } else { 0.0 };
        0.4 * categories + 0.4 * matches + 0.2 * obfuscation
    }
}

/// Scores long-form listing text.
#[derive(Debug, Clone, Default)]
pub struct ContentScorer {
    config: ScorerConfig,
    normalizer: Normalizer,
}

impl ContentScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            normalizer: Normalizer::new(),
        }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score a text. Fails open: any error yields the clean result.
    pub fn score(&self, text: &str, field: FieldKind) -> InappropriateContentResult {
        let result = match self.try_score(text, field) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "scoring failed open, text passed unscored");
                metrics::counter!("moderation_fail_open_total").increment(1);
                InappropriateContentResult::clean()
            }
        };
        let outcome = if result.is_inappropriate { "inappropriate" } else { "clean" };
        metrics::counter!("scoring_results_total", "outcome" => outcome).increment(1);
        debug!(
            score = result.score,
            categories = result.categories.len(),
            outcome,
            "text scored"
        );
        result
    }

    pub fn try_score(
        &self,
        text: &str,
        field: FieldKind,
    ) -> Result<InappropriateContentResult, ModerationError> {
        let index = KEYWORD_INDEX.as_ref().map_err(Clone::clone)?;
        let raw = truncate_chars(text, self.config.max_input_chars);
        if raw.trim().is_empty() {
            return Ok(InappropriateContentResult::clean());
        }
        let sanitized = self.normalizer.sanitize(raw);

        if let Some((phrase, category)) = EXPLICIT_PHRASES
            .iter()
            .find(|(phrase, _)| sanitized.contains(phrase))
        {
            return Ok(InappropriateContentResult {
                is_inappropriate: true,
                categories: BTreeSet::from([*category]),
                matches: vec![phrase.to_string()],
                score: EXPLICIT_SCORE,
                obfuscation_detected: false,
                signals: vec![Signal::ExplicitPhrase],
            });
        }

        let tokens = analysis::tokens(&sanitized);
        let token_set: HashSet<&str> = tokens.iter().copied().collect();
        let legitimate = analysis::legitimate_terms(&token_set);

        let mut tally = Tally::default();
        let mut suppressed: HashSet<&str> = HashSet::new();
        let mut hits = Vec::new();
        for hit in index.scan(&sanitized) {
            if has_legitimate_context(&hit, &token_set) {
                suppressed.insert(hit.term);
                continue;
            }
            tally.add_match(hit.term, hit.category);
            hits.push(hit);
        }

        self.structural_flags(raw, &sanitized, &hits, &suppressed, &mut tally);

        if analysis::has_numeric_evasion(raw) {
            tally.flag(Signal::NumericSequence, FLAG_WEIGHT);
        }

        let fragmented = analysis::fragmented_keywords(&sanitized);
        if !fragmented.is_empty() {
            tally.obfuscation = true;
            tally.flag(Signal::Fragmentation, FRAGMENT_WEIGHT);
            for (term, category) in &fragmented {
                tally.add_match(term, *category);
            }
        }

        let window_tokens = &tokens[..tokens.len().min(self.config.max_window_words)];
        for pair in analysis::keyword_pairs(window_tokens, self.config.window_words, &suppressed) {
            tally.add_match(&pair, Category::Spam);
            tally.flag(Signal::KeywordPair, PAIR_WEIGHT);
        }

        let leet = analysis::leet_keywords(&sanitized);
        if !leet.is_empty() {
            tally.obfuscation = true;
            if !tally.signals.contains(&Signal::Leetspeak) {
                tally.signals.push(Signal::Leetspeak);
            }
            for (term, category) in &leet {
                tally.add_match(term, *category);
            }
        }

        let mut discount = (LEGIT_STEP * legitimate.len() as f64).min(LEGIT_MAX)
            + (SUPPRESSED_STEP * suppressed.len() as f64).min(SUPPRESSED_MAX);
        let low_density = !tokens.is_empty()
            && (hits.len() as f64 / tokens.len() as f64) < LOW_DENSITY_RATIO;
        if sanitized.chars().count() > LOW_DENSITY_CHARS && low_density {
            discount += LOW_DENSITY_DISCOUNT;
        }
        if tally.categories.contains(&Category::Adult) && analysis::has_contact_details(raw) {
            discount = 0.0;
        }

        let mut score = (tally.base_score() + tally.bonus - discount).clamp(0.0, 1.0);
        let distinct: HashSet<&str> = hits.iter().map(|h| h.term).collect();
        if distinct.len() >= DENSITY_MIN_KEYWORDS {
            score = score.max(DENSITY_FLOOR);
            tally.signals.push(Signal::KeywordDensity);
        }

        Ok(InappropriateContentResult {
            is_inappropriate: score > self.config.threshold_for(field),
            categories: tally.categories,
            matches: tally.matches,
            score,
            obfuscation_detected: tally.obfuscation,
            signals: tally.signals,
        })
    }

    fn structural_flags(
        &self,
        raw: &str,
        sanitized: &str,
        hits: &[KeywordHit],
        suppressed: &HashSet<&str>,
        tally: &mut Tally,
    ) {
        if analysis::is_list_like(raw) {
            tally.flag(Signal::ListLayout, FLAG_WEIGHT);
        }
        if analysis::has_repeated_keyword(hits) {
            tally.flag(Signal::RepeatedKeyword, FLAG_WEIGHT);
        }
        if analysis::has_content_switch(sanitized, hits) {
            tally.flag(Signal::ContentSwitch, FLAG_WEIGHT);
        }
        if analysis::has_separator_run(raw) {
            tally.flag(Signal::SeparatorRun, FLAG_WEIGHT);
        }
        let shouted = analysis::shouted_words(raw).into_iter().any(|word| {
            let word = self.normalizer.sanitize(&word);
            !suppressed.contains(word.as_str())
                && analysis::single_word_keywords().any(|(term, _)| term == word)
        });
        if shouted {
            tally.flag(Signal::CapsKeyword, FLAG_WEIGHT);
        }
    }
}

/// True when an ambiguous keyword appears with the vocabulary that makes it
/// legitimate. Adult terms need several independent context terms.
fn has_legitimate_context(hit: &KeywordHit, token_set: &HashSet<&str>) -> bool {
    let Some((_, context)) = AMBIGUOUS_TERMS.iter().find(|(term, _)| *term == hit.term) else {
        return false;
    };
    if hit.category == Category::Adult {
        let present: HashSet<&str> = context
            .iter()
            .chain(LEGITIMATE_TERMS.iter())
            .copied()
            .filter(|term| token_set.contains(term))
            .collect();
        present.len() >= ADULT_CONTEXT_MIN
    } else {
        context.iter().any(|term| token_set.contains(term))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => {
            debug!(max_chars, "scorer input truncated");
            &text[..end]
        }
        None => text,
    }
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
