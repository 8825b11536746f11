//! Tests for context exceptions and quote/report detection.

use super::*;

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

fn exception(text: &str, list: &[&str]) -> bool {
    let normalizer = Normalizer::new();
    let lower = text.to_lowercase();
    let normalized = normalizer.normalize(text);
    has_context_exception(&lower, &normalized, &phrases(list), &normalizer)
}

#[test]
fn test_exception_substring_in_lowercase_text() {
    assert!(exception("Vends BITE D'AMARRAGE inox, très bon état", &["bite d'amarrage"]));
    assert!(exception("recette du chili con carne", &["con carne"]));
}

#[test]
fn test_exception_survives_typographic_apostrophe() {
    assert!(exception("Bite d’amarrage à vendre", &["bite d'amarrage"]));
}

#[test]
fn test_no_exception_when_phrase_absent() {
    assert!(!exception("quelle bite", &["bite d'amarrage"]));
    assert!(!exception("quelle bite", &[]));
}

#[test]
fn test_quote_pairs_detected() {
    let detector = QuoteDetector::new();
    assert!(detector.detect(r#"il a écrit "connard" dans le chat"#));
    assert!(detector.detect("il m’a répondu « sale con »"));
    assert!(detector.detect("“espèce d'idiot” c'est ce qu'il a mis"));
}

#[test]
fn test_reporting_phrases_detected() {
    let detector = QuoteDetector::new();
    assert!(detector.detect("Il m'a dit que j'étais débile"));
    assert!(detector.detect("le vendeur m'a insulté"));
    assert!(detector.detect("Je signale cet utilisateur"));
    assert!(detector.detect("selon elle je suis un crétin"));
    assert!(detector.detect("elle a dit merde"));
}

#[test]
fn test_plain_messages_not_quotes() {
    let detector = QuoteDetector::new();
    assert!(!detector.detect("merci beaucoup"));
    assert!(!detector.detect("c'est l'heure du rendez-vous, j'arrive"));
    assert!(!detector.detect("tu es un idiot"));
}

#[test]
fn test_malformed_pattern_skipped() {
    let detector = QuoteDetector::with_patterns(&["([unclosed", r"\bje signale\b"]);
    assert_eq!(detector.pattern_count(), 1);
    assert!(detector.detect("je signale un abus"));
    assert!(!detector.detect("bonjour"));
}

#[test]
fn test_default_patterns_all_compile() {
    let detector = QuoteDetector::new();
    assert_eq!(
        detector.pattern_count(),
        QUOTE_PAIR_PATTERNS.len() + REPORTING_PATTERNS.len()
    );
}
