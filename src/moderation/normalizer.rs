//! Obfuscation-resistant text normalizer.
//!
//! Canonicalizes raw text before dictionary matching: case folding,
//! compatibility decomposition with diacritic stripping, homoglyph and
//! leetspeak substitution, symbol stripping and whitespace collapse.
//!
//! Every output character keeps the byte range of the source character it was
//! derived from, so spans found in normalized text can be mapped back onto the
//! original message for exact masking.
//!
//! Each stage is fallible on its own. A failing stage is logged and skipped,
//! and the pipeline continues from the previous stage's output.

use std::collections::HashMap;
use std::ops::Range;

use tracing::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::error::ModerationError;

/// Homoglyph and leetspeak substitutions applied character by character.
///
/// Literal substitution only: no entry is ever interpreted as a regex.
pub const DEFAULT_SUBSTITUTIONS: &[(char, char)] = &[
    ('@', 'a'),
    ('4', 'a'),
    ('\u{0430}', 'a'), // Cyrillic a
    ('0', 'o'),
    ('\u{043E}', 'o'), // Cyrillic o
    ('1', 'i'),
    ('3', 'e'),
    ('€', 'e'),
    ('\u{0435}', 'e'), // Cyrillic ie
    ('$', 's'),
    ('5', 's'),
    ('+', 't'),
    ('7', 't'),
    ('\u{0440}', 'p'), // Cyrillic er
    ('\u{0441}', 'c'), // Cyrillic es
];

/// Decomposition may not grow the text beyond this factor (plus slack).
const MAX_EXPANSION: usize = 3;
const EXPANSION_SLACK: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
struct MappedChar {
    ch: char,
    origin: Range<usize>,
}

type Stage = fn(&Normalizer, &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError>;

const PIPELINE: [(&str, Stage); 5] = [
    ("lowercase", Normalizer::lowercase as Stage),
    ("decompose", Normalizer::decompose as Stage),
    ("substitute", Normalizer::substitute as Stage),
    ("strip_symbols", Normalizer::strip_symbols as Stage),
    ("collapse_whitespace", Normalizer::collapse_whitespace as Stage),
];

const SANITIZE_PIPELINE: [(&str, Stage); 3] = [
    ("lowercase", Normalizer::lowercase as Stage),
    ("decompose", Normalizer::decompose as Stage),
    ("collapse_whitespace", Normalizer::collapse_whitespace as Stage),
];

/// Normalized text together with its source index map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    /// Source byte range for every char of `text`, in order.
    origins: Vec<Range<usize>>,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whitespace-separated tokens of the normalized text.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split(' ').filter(|t| !t.is_empty()).collect()
    }

    /// Map the normalized byte range `start..end` back onto the source text.
    ///
    /// Returns the byte range in the source that produced those characters,
    /// or `None` if the range is empty or not on char boundaries.
    pub fn source_span(&self, start: usize, end: usize) -> Option<Range<usize>> {
        if start >= end
            || end > self.text.len()
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return None;
        }
        let first = self.text[..start].chars().count();
        let last = first + self.text[start..end].chars().count() - 1;
        let head = self.origins.get(first)?;
        let tail = self.origins.get(last)?;
        Some(head.start..tail.end)
    }

    fn from_chars(chars: Vec<MappedChar>, source_len: usize) -> Result<Self, ModerationError> {
        let mut text = String::with_capacity(chars.len());
        let mut origins = Vec::with_capacity(chars.len());
        let mut last_start = 0;
        for mc in chars {
            if mc.origin.end > source_len || mc.origin.start < last_start {
                return Err(ModerationError::NormalizationStep {
                    stage: "index_map",
                    reason: format!("origin {:?} out of order or out of bounds", mc.origin),
                });
            }
            last_start = mc.origin.start;
            text.push(mc.ch);
            origins.push(mc.origin);
        }
        Ok(Self { text, origins })
    }

    /// Last-resort form: lowercase and trim, nothing else.
    fn fallback(raw: &str) -> Self {
        let offset = raw.len() - raw.trim_start().len();
        let mut text = String::with_capacity(raw.len());
        let mut origins = Vec::with_capacity(raw.len());
        for (i, c) in raw.trim().char_indices() {
            let origin = offset + i..offset + i + c.len_utf8();
            for lc in c.to_lowercase() {
                text.push(lc);
                origins.push(origin.clone());
            }
        }
        Self { text, origins }
    }
}

/// Canonicalizes text for dictionary matching.
#[derive(Debug, Clone)]
pub struct Normalizer {
    substitutions: HashMap<char, char>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_substitutions(DEFAULT_SUBSTITUTIONS)
    }

    pub fn with_substitutions(pairs: &[(char, char)]) -> Self {
        Self {
            substitutions: pairs.iter().copied().collect(),
        }
    }

    /// The (source, target) substitution pairs in effect.
    pub fn substitutions(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.substitutions.iter().map(|(s, t)| (*s, *t))
    }

    /// Normalize `raw`. Never fails.
    pub fn normalize(&self, raw: &str) -> String {
        self.normalize_mapped(raw).into_string()
    }

    /// Normalize `raw`, keeping the source index map.
    pub fn normalize_mapped(&self, raw: &str) -> NormalizedText {
        self.run(raw, &PIPELINE)
    }

    /// Light canonicalization shared with the long-form scorer: lowercase,
    /// diacritics and invisible characters removed, whitespace collapsed.
    /// Punctuation and digits are kept.
    pub fn sanitize(&self, raw: &str) -> String {
        self.run(raw, &SANITIZE_PIPELINE).into_string()
    }

    fn run(&self, raw: &str, stages: &[(&'static str, Stage)]) -> NormalizedText {
        let mut chars: Vec<MappedChar> = raw
            .char_indices()
            .map(|(i, ch)| MappedChar {
                ch,
                origin: i..i + ch.len_utf8(),
            })
            .collect();

        for (name, stage) in stages {
            match stage(self, &chars) {
                Ok(next) => chars = next,
                Err(err) => warn!(stage = *name, error = %err, "normalization stage skipped"),
            }
        }

        NormalizedText::from_chars(chars, raw.len()).unwrap_or_else(|err| {
            warn!(error = %err, "normalization failed, using lowercase fallback");
            NormalizedText::fallback(raw)
        })
    }

    fn lowercase(&self, chars: &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError> {
        let mut out = Vec::with_capacity(chars.len());
        for mc in chars {
            for ch in mc.ch.to_lowercase() {
                out.push(MappedChar { ch, origin: mc.origin.clone() });
            }
        }
        Ok(out)
    }

    /// Compatibility decomposition; combining marks and invisible characters
    /// are dropped.
    fn decompose(&self, chars: &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError> {
        let limit = chars.len() * MAX_EXPANSION + EXPANSION_SLACK;
        let mut out = Vec::with_capacity(chars.len());
        for mc in chars {
            if is_invisible(mc.ch) {
                continue;
            }
            for d in std::iter::once(mc.ch).nfkd() {
                if is_combining_mark(d) || is_invisible(d) {
                    continue;
                }
                for ch in d.to_lowercase() {
                    out.push(MappedChar { ch, origin: mc.origin.clone() });
                }
            }
            if out.len() > limit {
                return Err(ModerationError::NormalizationStep {
                    stage: "decompose",
                    reason: format!("expansion exceeded {} chars", limit),
                });
            }
        }
        Ok(out)
    }

    fn substitute(&self, chars: &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError> {
        Ok(chars
            .iter()
            .map(|mc| MappedChar {
                ch: self.substitutions.get(&mc.ch).copied().unwrap_or(mc.ch),
                origin: mc.origin.clone(),
            })
            .collect())
    }

    fn strip_symbols(&self, chars: &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError> {
        Ok(chars
            .iter()
            .filter(|mc| !is_invisible(mc.ch))
            .map(|mc| MappedChar {
                ch: if mc.ch.is_alphanumeric() { mc.ch } else { ' ' },
                origin: mc.origin.clone(),
            })
            .collect())
    }

    fn collapse_whitespace(&self, chars: &[MappedChar]) -> Result<Vec<MappedChar>, ModerationError> {
        let mut out: Vec<MappedChar> = Vec::with_capacity(chars.len());
        for mc in chars {
            if mc.ch.is_whitespace() {
                if out.last().map_or(true, |prev| prev.ch == ' ') {
                    continue;
                }
                out.push(MappedChar { ch: ' ', origin: mc.origin.clone() });
            } else {
                out.push(mc.clone());
            }
        }
        if out.last().is_some_and(|mc| mc.ch == ' ') {
            out.pop();
        }
        Ok(out)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-width and invisible characters used to split words without a
/// visible gap.
pub(crate) fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' // soft hyphen
            | '\u{034F}' // combining grapheme joiner
            | '\u{061C}' // Arabic letter mark
            | '\u{180E}' // Mongolian vowel separator
            | '\u{200B}' // zero-width space
            | '\u{200C}' // zero-width non-joiner
            | '\u{200D}' // zero-width joiner
            | '\u{200E}' // LTR mark
            | '\u{200F}' // RTL mark
            | '\u{2060}' // word joiner
            | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
