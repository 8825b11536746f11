//! Text analysis primitives for the long-form scorer.
//!
//! Each check is independent and cheap. Regexes are compiled once; one that
//! fails to compile is logged and its check reports nothing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::scorer_tables::{
    CATEGORY_KEYWORDS, CONTACT_DIGITS_MIN, CONTACT_VERBS, EMAIL_PROVIDERS, FRAGMENT_MIN_LEN,
    FRAGMENT_SEPARATORS, LEET_MAP, LEGITIMATE_TERMS, SALE_VERBS,
};
use super::scorer_types::Category;

/// One keyword occurrence in sanitized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit {
    pub term: &'static str,
    pub category: Category,
    /// Byte offset in the sanitized text
    pub start: usize,
}

const LIST_MIN_LINES: usize = 4;
const LIST_SHORT_LINE_CHARS: usize = 30;
const LIST_SHORT_RATIO: f64 = 0.7;
const REPEAT_MIN: usize = 3;
const SWITCH_MIN_LEGIT: usize = 2;
const SWITCH_MIN_HITS: usize = 2;
const CAPS_MIN_LEN: usize = 3;
const DIGITS_MAX: usize = 15;
const LONG_RUNS_MIN: usize = 2;

static SEPARATOR_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"[-_=*#~.]{5,}"));
static LONG_DIGIT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\d{5,}"));
static MASKED_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"\d{2}(?:[\s.\-]?(?:\d{2}|[xX*#]{2})){2,}"));
static DELIMITED_GROUPS: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"\b\d{2}(?:[\s.\-/]\d{2}){3,}\b"));
static PHONE_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?:(?:\+|\b00)33[\s.\-]*|\b0)[1-9](?:[\s.\-]*\d{2}){4}\b"));
static EMAIL_ADDRESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"[\w.+\-]+@[\w\-]+\.[\w.\-]+"));

static FRAGMENT_PATTERNS: LazyLock<Vec<(&'static str, Category, Regex)>> = LazyLock::new(|| {
    single_word_keywords()
        .filter(|(term, _)| term.chars().count() >= FRAGMENT_MIN_LEN)
        .filter_map(|(term, category)| {
            let separator = format!("{}{{1,3}}", FRAGMENT_SEPARATORS);
            let body = term
                .chars()
                .map(|c| regex::escape(&c.to_string()))
                .collect::<Vec<_>>()
                .join(separator.as_str());
            compile(&format!(r"\b{}\b", body)).map(|re| (term, category, re))
        })
        .collect()
});

fn compile(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern = source, error = %err, "analysis pattern disabled");
            None
        }
    }
}

fn matches(re: &LazyLock<Option<Regex>>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// Category keywords without inner spaces.
pub fn single_word_keywords() -> impl Iterator<Item = (&'static str, Category)> {
    CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(category, terms)| terms.iter().map(move |term| (*term, *category)))
        .filter(|(term, _)| term.chars().all(char::is_alphanumeric))
}

/// Alphanumeric runs of the text.
pub fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Distinct professional terms present among the tokens.
pub fn legitimate_terms<'a>(token_set: &HashSet<&'a str>) -> Vec<&'static str> {
    LEGITIMATE_TERMS
        .iter()
        .copied()
        .filter(|term| token_set.contains(term))
        .collect()
}

/// Mostly short lines: an enumeration rather than prose.
pub fn is_list_like(raw: &str) -> bool {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.len() < LIST_MIN_LINES {
        return false;
    }
    let short = lines
        .iter()
        .filter(|l| l.chars().count() <= LIST_SHORT_LINE_CHARS)
        .count();
    short as f64 / lines.len() as f64 >= LIST_SHORT_RATIO
}

/// One keyword repeated at least three times.
pub fn has_repeated_keyword(hits: &[KeywordHit]) -> bool {
    let mut seen: Vec<(&str, usize)> = Vec::new();
    for hit in hits {
        match seen.iter_mut().find(|(term, _)| *term == hit.term) {
            Some((_, count)) => *count += 1,
            None => seen.push((hit.term, 1)),
        }
    }
    seen.iter().any(|(_, count)| *count >= REPEAT_MIN)
}

/// Professional first half, suspicious second half.
pub fn has_content_switch(sanitized: &str, hits: &[KeywordHit]) -> bool {
    let mut mid = sanitized.len() / 2;
    while !sanitized.is_char_boundary(mid) {
        mid -= 1;
    }
    let (first, _) = sanitized.split_at(mid);
    let first_tokens: HashSet<&str> = tokens(first).into_iter().collect();
    let legit = legitimate_terms(&first_tokens).len();
    let early = hits.iter().filter(|h| h.start < mid).count();
    let late = hits.len() - early;
    legit >= SWITCH_MIN_LEGIT && early == 0 && late >= SWITCH_MIN_HITS
}

pub fn has_separator_run(raw: &str) -> bool {
    matches(&SEPARATOR_RUN, raw)
}

/// Upper-case words of the raw text, lowercased, at least three letters long.
pub fn shouted_words(raw: &str) -> Vec<String> {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|w| {
            w.chars().count() >= CAPS_MIN_LEN
                && w.chars().all(char::is_alphabetic)
                && w.chars().all(char::is_uppercase)
        })
        .map(str::to_lowercase)
        .collect()
}

/// Digit patterns typical of phone-number evasion.
pub fn has_numeric_evasion(raw: &str) -> bool {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if digits > DIGITS_MAX {
        return true;
    }
    let long_runs = LONG_DIGIT_RUN
        .as_ref()
        .map_or(0, |re| re.find_iter(raw).count());
    if long_runs >= LONG_RUNS_MIN {
        return true;
    }
    let masked = MASKED_NUMBER.as_ref().is_some_and(|re| {
        re.find_iter(raw)
            .any(|m| m.as_str().contains(['x', 'X', '*', '#']))
    });
    masked || matches(&DELIMITED_GROUPS, raw)
}

/// Phone number or e-mail address present.
pub fn has_contact_details(raw: &str) -> bool {
    matches(&PHONE_NUMBER, raw) || matches(&EMAIL_ADDRESS, raw)
}

/// Keywords spelled with separators between their letters (`c.o.c.a.i.n.e`).
pub fn fragmented_keywords(sanitized: &str) -> Vec<(&'static str, Category)> {
    FRAGMENT_PATTERNS
        .iter()
        .filter(|(_, _, re)| re.is_match(sanitized))
        .map(|(term, category, _)| (*term, *category))
        .collect()
}

/// Keywords written with leetspeak digits or symbols (`c0ca1ne`).
pub fn leet_keywords(sanitized: &str) -> Vec<(&'static str, Category)> {
    let leet = |c: char| LEET_MAP.iter().find(|(from, _)| *from == c).map(|(_, to)| *to);
    let mut found: Vec<(&'static str, Category)> = Vec::new();
    for chunk in sanitized.split_whitespace() {
        let word = chunk.trim_matches(|c: char| !c.is_alphanumeric() && leet(c).is_none());
        if !word.chars().any(|c| leet(c).is_some()) || !word.chars().any(char::is_alphabetic) {
            continue;
        }
        let decoded: String = word.chars().map(|c| leet(c).unwrap_or(c)).collect();
        if let Some(hit) = single_word_keywords().find(|(term, _)| *term == decoded) {
            if !found.contains(&hit) {
                found.push(hit);
            }
        }
    }
    found
}

/// Sale verbs near a substance name and contact verbs near an e-mail
/// provider or long digit run, within `window` words. Returns pair labels.
pub fn keyword_pairs(tokens: &[&str], window: usize, skip: &HashSet<&str>) -> Vec<String> {
    let substances: HashSet<&str> = single_word_keywords()
        .filter(|(term, category)| *category == Category::Drugs && !skip.contains(term))
        .map(|(term, _)| term)
        .collect();
    let reach = window.saturating_sub(1);
    let mut pairs: Vec<String> = Vec::new();

    for (i, verb) in tokens.iter().enumerate() {
        let sale = SALE_VERBS.contains(verb);
        let contact = CONTACT_VERBS.contains(verb);
        if !sale && !contact {
            continue;
        }
        let lo = i.saturating_sub(reach);
        let hi = (i + reach + 1).min(tokens.len());
        for other in &tokens[lo..hi] {
            let object = if sale && substances.contains(other) {
                Some(*other)
            } else if contact && EMAIL_PROVIDERS.contains(other) {
                Some(*other)
            } else if contact
                && other.len() >= CONTACT_DIGITS_MIN
                && other.chars().all(|c| c.is_ascii_digit())
            {
                Some("numero")
            } else {
                None
            };
            if let Some(object) = object {
                let label = format!("{}/{}", verb, object);
                if !pairs.contains(&label) {
                    pairs.push(label);
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
