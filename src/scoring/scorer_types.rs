//! Data records for the long-form scorer.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Content categories tracked by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Spam,
    Drugs,
    Adult,
    Gambling,
    Malware,
    HateSpeech,
    Scam,
    Illegal,
    Violence,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Drugs => "drugs",
            Self::Adult => "adult",
            Self::Gambling => "gambling",
            Self::Malware => "malware",
            Self::HateSpeech => "hateSpeech",
            Self::Scam => "scam",
            Self::Illegal => "illegal",
            Self::Violence => "violence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic signals that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ExplicitPhrase,
    ListLayout,
    RepeatedKeyword,
    ContentSwitch,
    SeparatorRun,
    CapsKeyword,
    NumericSequence,
    Fragmentation,
    Leetspeak,
    KeywordDensity,
    KeywordPair,
}

/// Which listing field is being scored. Intro blurbs are short, so they get a
/// higher bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    #[default]
    Description,
    Intro,
}

/// Scorer tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScorerConfig {
    /// Score above which text is inappropriate
    pub threshold: f64,
    /// Threshold for `FieldKind::Intro`
    pub intro_threshold: f64,
    /// Input is truncated to this many chars before analysis
    pub max_input_chars: usize,
    /// Width of the keyword-pair window, in words
    pub window_words: usize,
    /// Words considered by the keyword-pair scan
    pub max_window_words: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            intro_threshold: 0.5,
            max_input_chars: 20_000,
            window_words: 5,
            max_window_words: 4_000,
        }
    }
}

impl ScorerConfig {
    pub fn threshold_for(&self, field: FieldKind) -> f64 {
        match field {
            FieldKind::Intro => self.intro_threshold,
            FieldKind::Title | FieldKind::Description => self.threshold,
        }
    }
}

/// Scorer outcome for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InappropriateContentResult {
    pub is_inappropriate: bool,
    pub categories: BTreeSet<Category>,
    /// Labels of the keywords, phrases and pairs that matched
    pub matches: Vec<String>,
    /// In `[0, 1]`
    pub score: f64,
    pub obfuscation_detected: bool,
    pub signals: Vec<Signal>,
}

impl InappropriateContentResult {
    pub fn clean() -> Self {
        Self::default()
    }
}
