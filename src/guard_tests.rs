//! Tests for the caller hooks.

use super::*;

fn draft(title: &str, description: &str, intro: Option<&str>) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        description: description.to_string(),
        intro: intro.map(str::to_string),
    }
}

#[test]
fn test_chat_hook_uses_configured_options() {
    let config = EngineConfig::from_toml_str("[validation]\ncensorInsteadOfBlock = true").unwrap();
    let guard = ContentGuard::from_config(config).unwrap();
    let result = guard.check_chat_message("tu es un peu c0nn@rd non?");
    assert!(result.is_valid);
    assert_eq!(result.censored_text, "tu es un peu ******* non?");

    let strict = guard.check_chat_message_with("tu es un peu c0nn@rd non?", &ValidationOptions::default());
    assert!(!strict.is_valid);
}

#[test]
fn test_clean_listing_publishable() {
    let review = ContentGuard::default().review_listing(&draft(
        "Vélo de course en aluminium",
        "Vélo entretenu régulièrement, pneus neufs, facture disponible. Remise en main propre.",
        Some("Cycliste passionné depuis dix ans."),
    ));
    assert!(review.publishable);
    assert!(!review.notify_moderator);
    assert!(review.intro.is_some());
}

#[test]
fn test_insulting_title_blocks_listing() {
    let review = ContentGuard::default().review_listing(&draft(
        "Vends vélo, acheteurs connards s'abstenir",
        "Vélo en bon état.",
        None,
    ));
    assert!(!review.publishable);
    assert!(!review.title.is_valid);
}

#[test]
fn test_title_censor_option_ignored_for_listings() {
    let config = EngineConfig::from_toml_str("[validation]\ncensorInsteadOfBlock = true").unwrap();
    let guard = ContentGuard::from_config(config).unwrap();
    let review = guard.review_listing(&draft("Quel connard ce vendeur", "Rien à signaler.", None));
    assert!(!review.publishable);
}

#[test]
fn test_inappropriate_description_flags_moderator() {
    let review = ContentGuard::default().review_listing(&draft(
        "Petites annonces",
        "Propose des services sexuels, discrétion assurée.",
        None,
    ));
    assert!(!review.publishable);
    assert!(review.notify_moderator);
    assert_eq!(review.description.score, 0.9);
}

#[test]
fn test_intro_scored_with_higher_bar() {
    let review = ContentGuard::default().review_listing(&draft(
        "Annonce",
        "Objet en bon état.",
        Some("Vends cannabis, livraison rapide"),
    ));
    let intro = review.intro.unwrap();
    assert!(intro.score > 0.3);
    assert!(!intro.is_inappropriate);
    assert!(review.publishable);
}

#[test]
fn test_contact_details_in_title_notify() {
    let review = ContentGuard::default().review_listing(&draft(
        "Canapé cuir, écrivez sur gmail",
        "Canapé trois places.",
        None,
    ));
    assert!(review.publishable);
    assert!(review.notify_moderator);
    assert_eq!(review.title.censored_text, "Canapé cuir, écrivez sur *****");
}

#[test]
fn test_from_config_rejects_invalid() {
    let config = EngineConfig {
        scorer: ScorerConfig {
            threshold: -1.0,
            ..ScorerConfig::default()
        },
        ..EngineConfig::default()
    };
    assert!(ContentGuard::from_config(config).is_err());
}

#[test]
fn test_review_json_shape() {
    let review = ContentGuard::default().review_listing(&draft("Table basse", "Table en chêne massif.", None));
    let json = serde_json::to_value(&review).unwrap();
    assert_eq!(json["publishable"], true);
    assert_eq!(json["notifyModerator"], false);
    assert!(json["intro"].is_null());
    assert_eq!(json["title"]["isValid"], true);
}
