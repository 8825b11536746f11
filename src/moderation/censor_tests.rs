//! Tests for the censor engine.

use super::*;

fn censor() -> CensorEngine {
    CensorEngine::new(&Dictionary::canonical())
}

#[test]
fn test_obfuscated_word_masked_in_place() {
    let out = censor().censor("tu es un peu c0nn@rd non?");
    assert_eq!(out, "tu es un peu ******* non?");
}

#[test]
fn test_contact_details_masked() {
    let out = censor().censor("Contactez-moi au 0612345678 ou sur gmail");
    assert_eq!(out, "Contactez-moi au ********** ou sur *****");
}

#[test]
fn test_length_preserved_in_chars() {
    let engine = censor();
    for text in [
        "espèce d'enculé va",
        "quel bâtard ce type",
        "t'es qu'une s\u{200B}alope",
        "ｃｏｎｎａｒｄ",
    ] {
        let out = engine.censor(text);
        assert_eq!(out.chars().count(), text.chars().count(), "{:?}", text);
        assert_ne!(out, text, "{:?} should be masked", text);
    }
}

#[test]
fn test_censor_is_idempotent() {
    let engine = censor();
    for text in [
        "tu es un peu c0nn@rd non?",
        "putain de connard, appelle le 06 12 34 56 78",
        "merci pour la commande",
        "salopes et connards",
    ] {
        let once = engine.censor(text);
        assert_eq!(engine.censor(&once), once, "{:?}", text);
    }
}

#[test]
fn test_separated_letters_masked() {
    let engine = censor();
    assert_eq!(engine.censor("espèce de c.o.n.n.a.r.d"), "espèce de *************");
    assert_eq!(engine.censor("p-u-t-e"), "*******");
}

#[test]
fn test_no_over_masking_inside_words() {
    let engine = censor();
    for text in [
        "on a eu une dispute hier",
        "le concombre est frais",
        "mon fils a rendez-vous chez le pédiatre",
        "Contactez le service client",
    ] {
        assert_eq!(engine.censor(text), text);
    }
}

#[test]
fn test_plural_form_masked() {
    assert_eq!(censor().censor("bande de connards"), "bande de ********");
}

#[test]
fn test_context_exception_not_masked() {
    let text = "vends bite d'amarrage en inox";
    assert_eq!(censor().censor(text), text);
}

#[test]
fn test_quoted_low_severity_not_masked() {
    let out = censor().censor(r#"il m'a dit "putain de connard""#);
    assert_eq!(out, r#"il m'a dit "putain de *******""#);
}

#[test]
fn test_aliases_masked() {
    assert_eq!(censor().censor("ntm sérieux"), "*** sérieux");
}

#[test]
fn test_obfuscated_aliases_masked_through_index_map() {
    assert_eq!(censor().censor("un vrai k0nnard"), "un vrai *******");
    assert_eq!(censor().censor("nik ta mère !"), "*********** !");
    assert_eq!(censor().censor("WH4TS APP moi"), "********* moi");
}

#[test]
fn test_short_entry_plural_not_masked_inside_words() {
    let text = "des cônes de glace";
    assert_eq!(censor().censor(text), text);
}

#[test]
fn test_spans_reported() {
    let outcome = censor().censor_detailed("quel connard");
    assert!(outcome.modified());
    assert_eq!(outcome.masked_spans, vec![5..12]);

    let clean = censor().censor_detailed("bonjour");
    assert!(!clean.modified());
    assert_eq!(clean.text, "bonjour");
}

#[test]
fn test_custom_mask_character() {
    let out = censor().with_mask('#').censor("quel connard");
    assert_eq!(out, "quel #######");
}

#[test]
fn test_broken_regex_entry_skipped() {
    let dictionary = Dictionary::new(vec![
        ForbiddenWordEntry::new("([oops", Severity::High).regex(),
        ForbiddenWordEntry::new("abruti", Severity::Medium),
    ]);
    let out = CensorEngine::new(&dictionary).censor("quel abruti");
    assert_eq!(out, "quel ******");
}

#[test]
fn test_from_engine_shares_dictionary() {
    let engine = ModerationEngine::canonical();
    let censor = CensorEngine::from_engine(&engine);
    assert_eq!(censor.censor("quel connard"), "quel *******");
}

#[test]
fn test_merge_spans_coalesces_overlaps() {
    assert_eq!(merge_spans(vec![4..8, 0..2, 6..10, 10..12, 3..3]), vec![0..2, 4..12]);
}
