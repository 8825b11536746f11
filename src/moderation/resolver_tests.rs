//! Tests for severity and action resolution.

use super::*;

fn engine() -> ModerationEngine {
    ModerationEngine::canonical()
}

#[test]
fn test_clean_message() {
    let verdict = engine().analyze("merci beaucoup");
    assert_eq!(verdict, ModerationVerdict::clean());
}

#[test]
fn test_single_high_severity_word() {
    let verdict = engine().analyze("connard");
    assert!(verdict.has_forbidden_content);
    assert_eq!(verdict.matched_terms, vec!["connard"]);
    assert_eq!(verdict.severity, Some(Severity::High));
    assert_eq!(verdict.recommended_action, Some(Action::Block));
}

#[test]
fn test_whole_word_safety() {
    let engine = engine();
    assert!(!engine.analyze("mon fils a rendez-vous chez le pédiatre").has_forbidden_content);
    assert!(!engine.analyze("pendant les vacances je suis absent").has_forbidden_content);
    assert_eq!(engine.analyze("pd").matched_terms, vec!["pd"]);
    assert_eq!(engine.analyze("PD").matched_terms, vec!["pd"]);
}

#[test]
fn test_plural_suffixes_do_not_reach_ordinary_words() {
    let engine = engine();
    assert!(!engine.analyze("j'ai acheté des cônes de glace hier").has_forbidden_content);
    assert_eq!(engine.analyze("bande de connards, vraiment").matched_terms, vec!["connard"]);
    assert_eq!(engine.analyze("quelles idiotes ces deux-là").matched_terms, vec!["idiot"]);
}

#[test]
fn test_notify_flag_survives_higher_priority_action() {
    let verdict = engine().analyze("connard appelle moi au 0612345678");
    assert_eq!(verdict.recommended_action, Some(Action::Block));
    assert!(verdict.notify_moderator);

    assert!(!engine().analyze("putain, quel connard celui-là").notify_moderator);
}

#[test]
fn test_severity_monotonicity() {
    let verdict = engine().analyze("putain, quel connard celui-là");
    assert_eq!(verdict.matched_terms, vec!["connard", "putain"]);
    assert_eq!(verdict.severity, Some(Severity::High));
    assert_eq!(verdict.recommended_action, Some(Action::Block));
}

#[test]
fn test_quote_suppresses_low_severity_only() {
    let verdict = engine().analyze(r#"il m'a dit "putain de connard""#);
    assert!(verdict.possible_quote_or_report);
    assert_eq!(verdict.matched_terms, vec!["connard"]);
    assert_eq!(verdict.severity, Some(Severity::High));
}

#[test]
fn test_quote_does_not_hide_high_severity() {
    let verdict = engine().analyze(r#"il m'a dit "connard""#);
    assert!(verdict.possible_quote_or_report);
    assert_eq!(verdict.matched_terms, vec!["connard"]);
    assert_eq!(verdict.recommended_action, Some(Action::Block));
}

#[test]
fn test_short_message_low_severity_ignored() {
    let engine = engine();
    assert!(!engine.analyze("merde").has_forbidden_content);

    let verdict = engine.analyze("oh merde, j'ai oublié d'envoyer le colis");
    assert_eq!(verdict.matched_terms, vec!["merde"]);
    assert_eq!(verdict.severity, Some(Severity::Low));
    assert_eq!(verdict.recommended_action, Some(Action::Warn));
}

#[test]
fn test_short_message_rule_keeps_explicit_actions() {
    let dictionary = Dictionary::new(vec![
        ForbiddenWordEntry::new("skype", Severity::Low).action(Action::NotifyMod),
    ]);
    let verdict = ModerationEngine::new(&dictionary).analyze("skype ?");
    assert_eq!(verdict.recommended_action, Some(Action::NotifyMod));
}

#[test]
fn test_context_exception_suppresses_match() {
    let engine = engine();
    assert!(!engine.analyze("je vends une bite d'amarrage en inox").has_forbidden_content);
    assert!(!engine.analyze("recette de chili con carne maison").has_forbidden_content);
    assert!(!engine.analyze("adorable chatte siamoise de 2 ans à adopter").has_forbidden_content);
    assert!(engine.analyze("tu n'es qu'une grosse bite franchement").has_forbidden_content);
}

#[test]
fn test_homoglyph_equivalence() {
    let engine = engine();
    let words = ["salope", "connard", "abruti", "pute"];
    for (source, target) in engine.normalizer().substitutions() {
        let Some(word) = words.iter().find(|w| w.contains(target)) else {
            continue;
        };
        let obfuscated = word.replacen(target, &source.to_string(), 1);
        let plain = engine.analyze(&format!("franchement tu es {} et voila", word));
        let variant = engine.analyze(&format!("franchement tu es {} et voila", obfuscated));
        assert!(plain.has_forbidden_content);
        assert_eq!(
            plain.matched_terms, variant.matched_terms,
            "substitution {:?} -> {:?}",
            source, target
        );
    }
    assert_eq!(
        engine.analyze("espèce de s@lope va").matched_terms,
        engine.analyze("espèce de salope va").matched_terms
    );
}

#[test]
fn test_contact_details_notify_moderator() {
    let verdict = engine().analyze("Contactez-moi au 0612345678 ou sur gmail");
    assert_eq!(verdict.matched_terms.len(), 2);
    assert!(verdict.matched_terms.contains(&"numéro de téléphone".to_string()));
    assert!(verdict.matched_terms.contains(&"gmail".to_string()));
    assert_eq!(verdict.recommended_action, Some(Action::NotifyMod));
    assert_eq!(verdict.severity, Some(Severity::Medium));
}

#[test]
fn test_alias_reports_main_word() {
    let verdict = engine().analyze("ptn c'est vraiment long cette livraison");
    assert_eq!(verdict.matched_terms, vec!["putain"]);
}

#[test]
fn test_action_priority_independent_of_entry() {
    // A medium censor entry and a low notify entry: notify wins on priority.
    let dictionary = Dictionary::new(vec![
        ForbiddenWordEntry::new("abruti", Severity::Medium),
        ForbiddenWordEntry::new("skype", Severity::Low).action(Action::NotifyMod),
    ]);
    let verdict = ModerationEngine::new(&dictionary).analyze("ajoute moi sur skype espèce d'abruti");
    assert_eq!(verdict.severity, Some(Severity::Medium));
    assert_eq!(verdict.recommended_action, Some(Action::NotifyMod));
}

#[test]
fn test_broken_regex_degrades_to_containment() {
    let dictionary = Dictionary::new(vec![
        ForbiddenWordEntry::new("([interdit", Severity::Medium).regex(),
    ]);
    let engine = ModerationEngine::new(&dictionary);
    let verdict = engine.analyze("ce texte contient ([interdit quelque part");
    assert!(verdict.has_forbidden_content);
    assert!(!engine.analyze("ce texte est propre et sans souci").has_forbidden_content);
}

#[test]
fn test_error_overload_fails_open() {
    let mut entries: Vec<ForbiddenWordEntry> = (0..5)
        .map(|i| ForbiddenWordEntry::new(&format!("([broken{}", i), Severity::High).regex())
        .collect();
    entries.push(ForbiddenWordEntry::new("connard", Severity::High));
    let engine = ModerationEngine::new(&Dictionary::new(entries));

    let err = engine.try_analyze("espèce de connard").unwrap_err();
    assert_eq!(err, ModerationError::ErrorOverload { count: 5 });
    assert_eq!(engine.analyze("espèce de connard"), ModerationVerdict::clean());
}

#[test]
fn test_below_error_budget_still_moderates() {
    let mut entries: Vec<ForbiddenWordEntry> = (0..4)
        .map(|i| ForbiddenWordEntry::new(&format!("([broken{}", i), Severity::High).regex())
        .collect();
    entries.push(ForbiddenWordEntry::new("connard", Severity::High));
    let engine = ModerationEngine::new(&Dictionary::new(entries));
    assert_eq!(engine.analyze("espèce de connard").matched_terms, vec!["connard"]);
}

#[test]
fn test_verdict_json_shape() {
    let verdict = engine().analyze("Contactez-moi au 0612345678 ou sur gmail");
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["hasForbiddenContent"], true);
    assert_eq!(json["recommendedAction"], "notify_mod");
    assert_eq!(json["severity"], "medium");
    assert_eq!(json["possibleQuoteOrReport"], false);
}
