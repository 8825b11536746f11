//! Pattern matcher for dictionary entries.
//!
//! Regex entries are tested case-insensitively against both the raw and the
//! normalized text (the raw pass keeps e-mail and phone patterns working,
//! since normalization rewrites `@` and digits).
//!
//! Literal entries are normalized like the message, then tried as
//! (a) a token sequence allowing a plural suffix, (b) a word-boundary regex
//! over raw and normalized text. Substring containment is used when whole-word
//! mode is off, and as the degraded path when a pattern cannot be evaluated.

use regex::{Regex, RegexBuilder};

use super::dictionary::{Dictionary, ForbiddenWordEntry};
use super::error::ModerationError;
use super::normalizer::{NormalizedText, Normalizer};

/// Stem endings that take an `x` plural (`bateau`, `jeu`, `genou`).
const X_PLURAL_ENDINGS: &[&str] = &["au", "eu", "ou"];

/// Shortest stem that accepts the feminine plural `es`.
const FEMININE_PLURAL_MIN_CHARS: usize = 4;

/// Suffixes accepted after `word`.
///
/// `s` always; `x` only after `-au`/`-eu`/`-ou`; `es` only after stems of at
/// least four characters not already ending in `e`, so short entries such as
/// `con` never reach ordinary words like `cones`.
pub(crate) fn plural_suffixes(word: &str) -> Vec<&'static str> {
    let mut suffixes = vec!["s"];
    if X_PLURAL_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
        suffixes.push("x");
    }
    if word.chars().count() >= FEMININE_PLURAL_MIN_CHARS && !word.ends_with('e') {
        suffixes.push("es");
    }
    suffixes
}

/// A message prepared once for matching against every entry.
#[derive(Debug, Clone)]
pub struct MatchInput<'a> {
    raw: &'a str,
    lower: String,
    normalized: NormalizedText,
    tokens: Vec<String>,
}

impl<'a> MatchInput<'a> {
    pub fn new(raw: &'a str, normalizer: &Normalizer) -> Self {
        let normalized = normalizer.normalize_mapped(raw);
        let tokens = normalized.tokens().into_iter().map(str::to_string).collect();
        Self {
            raw,
            lower: raw.to_lowercase(),
            normalized,
            tokens,
        }
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn normalized(&self) -> &NormalizedText {
        &self.normalized
    }
}

/// A dictionary pattern with its regexes compiled up front.
///
/// Compile failures are kept and reported on every evaluation so the
/// per-call error budget sees them.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    Regex {
        source: String,
        compiled: Result<Regex, ModerationError>,
    },
    Literal {
        source: String,
        normalized: String,
        tokens: Vec<String>,
        whole_word: bool,
        boundary: Result<Regex, ModerationError>,
    },
}

impl CompiledPattern {
    pub fn regex(source: &str) -> Self {
        let compiled = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ModerationError::compilation(source, &e));
        Self::Regex {
            source: source.to_string(),
            compiled,
        }
    }

    pub fn literal(source: &str, whole_word: bool, normalizer: &Normalizer) -> Self {
        let normalized = normalizer.normalize(source);
        let tokens = normalized.split(' ').map(str::to_string).collect();
        let boundary = if normalized.is_empty() {
            Err(ModerationError::EmptyPattern(source.to_string()))
        } else {
            boundary_regex(&normalized)
        };
        Self::Literal {
            source: source.to_string(),
            normalized,
            tokens,
            whole_word,
            boundary,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Regex { source, .. } | Self::Literal { source, .. } => source,
        }
    }

    /// Test the pattern against a prepared message.
    ///
    /// `Err` means the pattern could not be evaluated; callers record the
    /// error and use [`CompiledPattern::contains_fallback`] instead.
    pub fn is_match(&self, input: &MatchInput<'_>) -> Result<bool, ModerationError> {
        match self {
            Self::Regex { compiled, .. } => {
                let re = compiled.as_ref().map_err(Clone::clone)?;
                Ok(re.is_match(input.raw) || re.is_match(input.normalized.as_str()))
            }
            Self::Literal {
                source,
                normalized,
                tokens,
                whole_word,
                boundary,
            } => {
                if normalized.is_empty() {
                    return Err(ModerationError::EmptyPattern(source.clone()));
                }
                if !whole_word {
                    return Ok(self.contains_fallback(input));
                }
                if token_sequence_match(tokens, &input.tokens) {
                    return Ok(true);
                }
                let re = boundary.as_ref().map_err(Clone::clone)?;
                Ok(re.is_match(input.raw) || re.is_match(input.normalized.as_str()))
            }
        }
    }

    /// Plain substring containment, the degraded form of every pattern.
    pub fn contains_fallback(&self, input: &MatchInput<'_>) -> bool {
        match self {
            Self::Regex { source, .. } => input.lower.contains(&source.to_lowercase()),
            Self::Literal {
                source, normalized, ..
            } => {
                (!normalized.is_empty() && input.normalized.as_str().contains(normalized.as_str()))
                    || input.lower.contains(&source.to_lowercase())
            }
        }
    }
}

/// `\b<word>(<plural>)?\b`, case-insensitive, inner spaces matching any run
/// of whitespace. The plural suffixes follow the last word.
pub(crate) fn boundary_regex(normalized: &str) -> Result<Regex, ModerationError> {
    let body = normalized
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let last = normalized.rsplit(' ').next().unwrap_or(normalized);
    let source = format!(r"\b{}(?:{})?\b", body, plural_suffixes(last).join("|"));
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ModerationError::compilation(&source, &e))
}

/// True when `token` is `word` or `word` followed by a plural suffix.
pub(crate) fn is_word_or_plural(token: &str, word: &str) -> bool {
    token == word
        || token
            .strip_prefix(word)
            .is_some_and(|rest| plural_suffixes(word).contains(&rest))
}

fn token_sequence_match(pattern: &[String], tokens: &[String]) -> bool {
    let n = pattern.len();
    if n == 0 || tokens.len() < n {
        return false;
    }
    tokens.windows(n).any(|window| {
        window[..n - 1] == pattern[..n - 1] && is_word_or_plural(&window[n - 1], &pattern[n - 1])
    })
}

/// A dictionary entry with its main word and aliases compiled.
#[derive(Debug, Clone)]
pub struct CompiledEntry {
    pub entry: ForbiddenWordEntry,
    pub main: CompiledPattern,
    pub aliases: Vec<CompiledPattern>,
}

impl CompiledEntry {
    pub fn compile(entry: &ForbiddenWordEntry, normalizer: &Normalizer) -> Self {
        let main = if entry.is_regex {
            CompiledPattern::regex(&entry.word)
        } else {
            CompiledPattern::literal(&entry.word, entry.whole_word_only, normalizer)
        };
        // Aliases are spelling variants: substring mode, never whole-word.
        let aliases = entry
            .aliases
            .iter()
            .map(|alias| CompiledPattern::literal(alias, false, normalizer))
            .collect();
        Self {
            entry: entry.clone(),
            main,
            aliases,
        }
    }

    /// Every pattern of the entry, main word first.
    pub fn patterns(&self) -> impl Iterator<Item = &CompiledPattern> {
        std::iter::once(&self.main).chain(self.aliases.iter())
    }
}

/// Compile every entry of a dictionary.
pub fn compile_dictionary(dictionary: &Dictionary, normalizer: &Normalizer) -> Vec<CompiledEntry> {
    let compiled: Vec<CompiledEntry> = dictionary
        .entries()
        .iter()
        .map(|entry| CompiledEntry::compile(entry, normalizer))
        .collect();
    for ce in &compiled {
        for pattern in ce.patterns() {
            if let CompiledPattern::Regex { compiled: Err(err), .. } = pattern {
                tracing::warn!(entry = %ce.entry.display_term(), error = %err, "dictionary pattern will use substring fallback");
            }
        }
    }
    compiled
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
