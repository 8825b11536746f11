//! Forbidden-word dictionary.
//!
//! Entries are immutable once loaded. A dictionary is built once per process
//! (the canonical table, or one loaded from TOML) and shared by every engine.

use serde::{Deserialize, Serialize};

use super::default_dictionary;
use super::error::ModerationError;

/// Ordinal ranking of how serious a matched term is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Severity {
    /// Action applied when an entry does not name one.
    pub fn default_action(self) -> Action {
        match self {
            Severity::High => Action::Block,
            Severity::Medium => Action::Censor,
            Severity::Low => Action::Warn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy outcome for a matched entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Block,
    Warn,
    Censor,
    NotifyMod,
}

impl Action {
    /// Resolution priority: block > notify_mod > warn > censor.
    pub fn priority(self) -> u8 {
        match self {
            Action::Block => 3,
            Action::NotifyMod => 2,
            Action::Warn => 1,
            Action::Censor => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Block => "block",
            Action::Warn => "warn",
            Action::Censor => "censor",
            Action::NotifyMod => "notify_mod",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// One banned term, its variants, its allow-phrases and its handling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWordEntry {
    /// Literal word or regex source.
    pub word: String,
    pub severity: Severity,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub context_exceptions: Vec<String>,
    #[serde(default)]
    pub is_regex: bool,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default = "default_true")]
    pub whole_word_only: bool,
    /// Reported in matched terms instead of `word` when set.
    #[serde(default)]
    pub label: Option<String>,
}

impl ForbiddenWordEntry {
    pub fn new(word: &str, severity: Severity) -> Self {
        Self {
            word: word.to_string(),
            severity,
            aliases: Vec::new(),
            context_exceptions: Vec::new(),
            is_regex: false,
            action: None,
            whole_word_only: true,
            label: None,
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn exceptions(mut self, phrases: &[&str]) -> Self {
        self.context_exceptions = phrases.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn regex(mut self) -> Self {
        self.is_regex = true;
        self
    }

    pub fn substring(mut self) -> Self {
        self.whole_word_only = false;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Declared action, or the one derived from severity.
    pub fn effective_action(&self) -> Action {
        self.action.unwrap_or_else(|| self.severity.default_action())
    }

    /// Name reported in a verdict's matched terms.
    pub fn display_term(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.word)
    }
}

/// Ordered list of forbidden-word entries.
///
/// Order never changes a verdict, only how early a scan can stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Vec<ForbiddenWordEntry>,
}

#[derive(Deserialize)]
struct DictionaryDocument {
    #[serde(default, rename = "dictionary")]
    entries: Vec<ForbiddenWordEntry>,
}

impl Dictionary {
    pub fn new(entries: Vec<ForbiddenWordEntry>) -> Self {
        Self { entries }
    }

    /// The unified marketplace table.
    pub fn canonical() -> Self {
        Self::new(default_dictionary::canonical_entries())
    }

    /// Parse a dictionary from a TOML document of `[[dictionary]]` tables, the
    /// same layout as the dictionary section of an engine config.
    pub fn from_toml_str(source: &str) -> Result<Self, ModerationError> {
        let doc: DictionaryDocument = toml::from_str(source)
            .map_err(|e| ModerationError::InvalidDictionary(e.to_string()))?;
        let dictionary = Self::new(doc.entries);
        dictionary.validate()?;
        Ok(dictionary)
    }

    /// Reject entries that could never match anything.
    pub fn validate(&self) -> Result<(), ModerationError> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.word.trim().is_empty() {
                return Err(ModerationError::InvalidDictionary(format!(
                    "entry {} has an empty word",
                    i
                )));
            }
            if entry.aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(ModerationError::InvalidDictionary(format!(
                    "entry '{}' has an empty alias",
                    entry.word
                )));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[ForbiddenWordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "dictionary_tests.rs"]
mod tests;
