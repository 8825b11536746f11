//! Static tables for the long-form scorer.
//!
//! Every term is stored in sanitized form: lowercase, no diacritics.

use super::scorer_types::Category;

/// Suspicion keywords per category.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Spam,
        &[
            "argent facile",
            "gagnez de l'argent",
            "revenus garantis",
            "cliquez ici",
            "devenez riche",
            "travail a domicile",
            "offre exclusive",
            "sans effort",
        ],
    ),
    (
        Category::Drugs,
        &[
            "cannabis",
            "cocaine",
            "heroine",
            "ecstasy",
            "mdma",
            "lsd",
            "beuh",
            "haschich",
            "marijuana",
            "opium",
            "ketamine",
            "methamphetamine",
        ],
    ),
    (
        Category::Adult,
        &[
            "sexe",
            "porno",
            "pornographie",
            "escort",
            "erotique",
            "massage erotique",
            "plan cul",
            "nudes",
            "webcam coquine",
        ],
    ),
    (
        Category::Gambling,
        &[
            "casino",
            "paris sportifs",
            "poker en ligne",
            "machine a sous",
            "bookmaker",
            "jackpot",
        ],
    ),
    (
        Category::Malware,
        &[
            "virus",
            "keylogger",
            "ransomware",
            "cheval de troie",
            "keygen",
            "logiciel pirate",
            "piratage",
        ],
    ),
    (
        Category::HateSpeech,
        &[
            "race inferieure",
            "suprematie blanche",
            "nazi",
            "sale arabe",
            "sale noir",
            "sale juif",
        ],
    ),
    (
        Category::Scam,
        &[
            "western union",
            "mandat cash",
            "coupon pcs",
            "transcash",
            "frais de dossier",
            "gains garantis",
            "virement urgent",
        ],
    ),
    (
        Category::Illegal,
        &[
            "faux papiers",
            "faux billets",
            "contrefacon",
            "permis sans examen",
            "blanchiment",
            "marchandise volee",
            "vol",
        ],
    ),
    (
        Category::Violence,
        &[
            "arme",
            "armes a feu",
            "munitions",
            "explosif",
            "kalachnikov",
            "menace de mort",
            "tuer",
        ],
    ),
];

/// Ambiguous keywords and the vocabulary that makes them legitimate.
pub const AMBIGUOUS_TERMS: &[(&str, &[&str])] = &[
    (
        "cannabis",
        &[
            "medical",
            "medicale",
            "therapeutique",
            "sante",
            "pharmacie",
            "pharmacien",
            "medecin",
            "ordonnance",
        ],
    ),
    ("heroine", &["roman", "film", "livre", "personnage", "serie", "histoire", "saga"]),
    ("casino", &["hotel", "supermarche", "magasin", "hypermarche", "parking"]),
    ("vol", &["avion", "billet", "voyage", "aeroport", "parapente", "escale", "direct"]),
    ("virus", &["antivirus", "informatique", "grippe", "vaccin", "protection", "nettoyage"]),
    ("arme", &["armee", "collection", "musee", "reconstitution", "histoire", "replique"]),
    ("opium", &["parfum", "fragrance", "eau", "flacon"]),
    (
        "sexe",
        &[
            "education",
            "sante",
            "medecin",
            "biologie",
            "prevention",
            "contraception",
            "gynecologue",
            "consultation",
        ],
    ),
    (
        "erotique",
        &["litterature", "roman", "art", "musee", "exposition", "peinture", "poesie"],
    ),
];

/// Context terms required to clear an ambiguous keyword in the adult
/// category.
pub const ADULT_CONTEXT_MIN: usize = 4;

/// Professional vocabulary; each distinct term discounts the score.
pub const LEGITIMATE_TERMS: &[&str] = &[
    "consultation",
    "professionnel",
    "professionnelle",
    "diplome",
    "diplomee",
    "certifie",
    "experience",
    "formation",
    "pharmacien",
    "pharmacienne",
    "pharmacie",
    "medicament",
    "medicaments",
    "ordonnance",
    "sante",
    "medecin",
    "clinique",
    "patient",
    "patients",
    "devis",
    "facture",
    "garantie",
    "entreprise",
    "siret",
    "assurance",
    "qualite",
    "livraison",
];

/// Unambiguous phrases that settle the score on their own.
pub const EXPLICIT_PHRASES: &[(&str, Category)] = &[
    ("services sexuels", Category::Adult),
    ("relation tarifee", Category::Adult),
    ("contactez-moi au", Category::Spam),
    ("contactez moi au", Category::Spam),
    ("vente de drogue", Category::Drugs),
];

pub const EXPLICIT_SCORE: f64 = 0.9;

/// Leetspeak map for the obfuscation scan.
pub const LEET_MAP: &[(char, char)] = &[
    ('0', 'o'),
    ('1', 'i'),
    ('3', 'e'),
    ('4', 'a'),
    ('5', 's'),
    ('7', 't'),
    ('@', 'a'),
    ('$', 's'),
];

pub const SALE_VERBS: &[&str] = &[
    "vends",
    "vend",
    "vente",
    "achete",
    "achat",
    "dispo",
    "disponible",
    "deal",
];

pub const CONTACT_VERBS: &[&str] = &[
    "contactez",
    "contacte",
    "contacter",
    "ecrivez",
    "ecris",
    "appelez",
    "appelle",
    "joignable",
    "ajoutez",
];

pub const EMAIL_PROVIDERS: &[&str] = &[
    "gmail",
    "hotmail",
    "yahoo",
    "outlook",
    "protonmail",
    "icloud",
    "laposte",
];

/// Digit run that counts as a contact number in the pair scan.
pub const CONTACT_DIGITS_MIN: usize = 6;

/// Separator characters accepted between the letters of a fragmented word.
pub const FRAGMENT_SEPARATORS: &str = r"[\s.\-_*\d]";

/// Keywords shorter than this are not checked for fragmentation.
pub const FRAGMENT_MIN_LEN: usize = 5;
