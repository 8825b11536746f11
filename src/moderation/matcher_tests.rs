//! Tests for the pattern matcher.

use super::*;

fn matches(pattern: &CompiledPattern, text: &str) -> bool {
    let normalizer = Normalizer::new();
    let input = MatchInput::new(text, &normalizer);
    pattern.is_match(&input).unwrap()
}

fn literal(word: &str, whole_word: bool) -> CompiledPattern {
    CompiledPattern::literal(word, whole_word, &Normalizer::new())
}

#[test]
fn test_whole_word_short_token() {
    let pd = literal("pd", true);
    assert!(matches(&pd, "pd"));
    assert!(matches(&pd, "PD"));
    assert!(matches(&pd, "t'es qu'un pd"));
    assert!(!matches(&pd, "pédiatre"));
    assert!(!matches(&pd, "pendant"));
    assert!(!matches(&pd, "le pdf est joint"));
}

#[test]
fn test_plural_suffixes() {
    let connard = literal("connard", true);
    assert!(matches(&connard, "bande de connards"));
    assert!(!matches(&connard, "connardise"));

    let batard = literal("bâtard", true);
    assert!(matches(&batard, "des batards"));
}

#[test]
fn test_obfuscated_literal() {
    let connard = literal("connard", true);
    assert!(matches(&connard, "tu es un peu c0nn@rd non?"));
    assert!(matches(&connard, "CÖNNÄRD"));
    assert!(matches(&connard, "conn\u{200B}ard"));
}

#[test]
fn test_multi_word_literal() {
    let ntm = literal("nique ta mère", true);
    assert!(matches(&ntm, "NIQUE TA MERE"));
    assert!(matches(&ntm, "nique   ta mère !"));
    assert!(!matches(&ntm, "nique la mère"));
}

#[test]
fn test_substring_mode() {
    let gmail = literal("gmail", false);
    assert!(matches(&gmail, "écris sur monadressegmail point com"));
    assert!(matches(&gmail, "GMAIL"));
    assert!(!matches(&gmail, "g-m-a-i-l"));
}

#[test]
fn test_regex_case_insensitive_on_raw_text() {
    let email = CompiledPattern::regex(r"\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b");
    assert!(matches(&email, "Écrivez à Jean.Dupont@Example.FR"));
    assert!(!matches(&email, "rendez-vous à 14h"));

    let phone = CompiledPattern::regex(r"\b0[1-9](?:[\s.\-]*\d{2}){4}\b");
    assert!(matches(&phone, "appelle le 06 12 34 56 78"));
    assert!(matches(&phone, "06.12.34.56.78"));
}

#[test]
fn test_regex_runs_on_normalized_text_too() {
    let re = CompiledPattern::regex(r"\bsalope\b");
    assert!(matches(&re, "s@l0pe"));
}

#[test]
fn test_malformed_regex_reports_error_and_falls_back() {
    let normalizer = Normalizer::new();
    let broken = CompiledPattern::regex("([abc");
    let input = MatchInput::new("texte avec ([abc dedans", &normalizer);
    let err = broken.is_match(&input).unwrap_err();
    assert!(matches!(err, ModerationError::PatternCompilation { .. }));
    assert!(broken.contains_fallback(&input));

    let clean = MatchInput::new("rien ici", &normalizer);
    assert!(!broken.contains_fallback(&clean));
}

#[test]
fn test_empty_literal_is_an_error() {
    let normalizer = Normalizer::new();
    let empty = CompiledPattern::literal("...", true, &normalizer);
    let input = MatchInput::new("bonjour...", &normalizer);
    assert!(matches!(empty.is_match(&input), Err(ModerationError::EmptyPattern(_))));
}

#[test]
fn test_is_word_or_plural() {
    assert!(is_word_or_plural("con", "con"));
    assert!(is_word_or_plural("cons", "con"));
    assert!(!is_word_or_plural("conte", "con"));
    assert!(!is_word_or_plural("co", "con"));
    assert!(!is_word_or_plural("cones", "con"));
    assert!(!is_word_or_plural("conx", "con"));
    assert!(is_word_or_plural("idiotes", "idiot"));
    assert!(is_word_or_plural("tuyaux", "tuyau"));
    assert!(!is_word_or_plural("connardx", "connard"));
    assert!(!is_word_or_plural("merdees", "merde"));
}

#[test]
fn test_boundary_regex_uses_word_specific_suffixes() {
    let con = boundary_regex("con").unwrap();
    assert!(con.is_match("bande de cons"));
    assert!(!con.is_match("des cones de glace"));

    let ntm = boundary_regex("nique ta mere").unwrap();
    assert!(ntm.is_match("nique  ta mere"));
    assert!(!ntm.is_match("nique ta merees"));
}

#[test]
fn test_compiled_entry_aliases_use_substring_mode() {
    let normalizer = Normalizer::new();
    let entry = ForbiddenWordEntry::new("putain", crate::moderation::Severity::Low).aliases(&["ptn"]);
    let compiled = CompiledEntry::compile(&entry, &normalizer);
    assert_eq!(compiled.patterns().count(), 2);

    let input = MatchInput::new("ptnnn c'est long", &normalizer);
    assert!(!compiled.main.is_match(&input).unwrap());
    assert!(compiled.aliases[0].is_match(&input).unwrap());
}
