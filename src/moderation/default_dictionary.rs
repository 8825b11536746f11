//! Canonical forbidden-word table for marketplace chat and listings.
//!
//! Context exceptions only cover vocabulary with no insulting reading
//! (pets, bread, boating, household items). Broader allow-phrases for
//! slur-adjacent entries are a product decision and belong in a TOML override.

use super::dictionary::{Action, ForbiddenWordEntry, Severity};

const PHONE_PATTERN: &str = r"(?:(?:\+|\b00)33[\s.\-]*|\b0)[1-9](?:[\s.\-]*\d{2}){4}\b";
const EMAIL_PATTERN: &str = r"\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b";

pub fn canonical_entries() -> Vec<ForbiddenWordEntry> {
    use Severity::*;

    vec![
        // Insults and slurs
        ForbiddenWordEntry::new("connard", High).aliases(&["konnard", "conard"]),
        ForbiddenWordEntry::new("connasse", High).aliases(&["conasse"]),
        ForbiddenWordEntry::new("salope", High).aliases(&["saloppe"]),
        ForbiddenWordEntry::new("enculé", High).aliases(&["enkule"]),
        ForbiddenWordEntry::new("pute", High),
        ForbiddenWordEntry::new("fdp", High).aliases(&["fils de pute"]),
        ForbiddenWordEntry::new("nique ta mère", High).aliases(&["ntm", "nik ta mere"]),
        ForbiddenWordEntry::new("pd", High),
        ForbiddenWordEntry::new("pédé", High),
        ForbiddenWordEntry::new("gouine", High),
        ForbiddenWordEntry::new("nègre", High),
        ForbiddenWordEntry::new("tapette", High)
            .exceptions(&["tapette à souris", "tapette a souris", "tapette à mouches", "tapette a mouches"]),
        // Vulgarity, masked by default
        ForbiddenWordEntry::new("bite", Medium).exceptions(&["bite d'amarrage", "bites d'amarrage"]),
        ForbiddenWordEntry::new("couille", Medium),
        ForbiddenWordEntry::new("bâtard", Medium).exceptions(&["pain bâtard", "chien bâtard"]),
        ForbiddenWordEntry::new("chatte", Medium).exceptions(&[
            "chatte siamoise",
            "chatte persane",
            "chatte stérilisée",
            "chatte de race",
            "chatons",
        ]),
        ForbiddenWordEntry::new("branleur", Medium),
        ForbiddenWordEntry::new("abruti", Medium),
        // Mild language, warning only
        ForbiddenWordEntry::new("putain", Low).aliases(&["ptn"]),
        ForbiddenWordEntry::new("merde", Low),
        ForbiddenWordEntry::new("con", Low).exceptions(&["chili con carne", "con carne"]),
        ForbiddenWordEntry::new("idiot", Low),
        ForbiddenWordEntry::new("crétin", Low),
        ForbiddenWordEntry::new("débile", Low),
        // Off-platform contact, escalated to a moderator
        ForbiddenWordEntry::new(PHONE_PATTERN, Medium)
            .regex()
            .action(Action::NotifyMod)
            .label("numéro de téléphone"),
        ForbiddenWordEntry::new(EMAIL_PATTERN, Medium)
            .regex()
            .action(Action::NotifyMod)
            .label("adresse e-mail"),
        ForbiddenWordEntry::new("gmail", Medium).substring().action(Action::NotifyMod),
        ForbiddenWordEntry::new("hotmail", Medium).substring().action(Action::NotifyMod),
        ForbiddenWordEntry::new("whatsapp", Medium)
            .substring()
            .aliases(&["whats app", "watsap"])
            .action(Action::NotifyMod),
        ForbiddenWordEntry::new("telegram", Medium).action(Action::NotifyMod),
        ForbiddenWordEntry::new("snapchat", Medium).substring().action(Action::NotifyMod),
        ForbiddenWordEntry::new("western union", Medium).action(Action::NotifyMod),
    ]
}
