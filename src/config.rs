//! Engine configuration document.
//!
//! A TOML document with three optional sections:
//!
//! ```toml
//! [validation]
//! censorInsteadOfBlock = true
//!
//! [scorer]
//! threshold = 0.35
//!
//! [[dictionary]]
//! word = "arnaque"
//! severity = "medium"
//! ```
//!
//! `[[dictionary]]` entries replace the canonical table when present. Reading
//! the file is left to the host.

use serde::{Deserialize, Serialize};

use crate::moderation::{Dictionary, ForbiddenWordEntry, ModerationError, ValidationOptions};
use crate::scoring::ScorerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Replacement dictionary; `None` keeps the canonical table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Vec<ForbiddenWordEntry>>,
    /// Default options for chat validation
    pub validation: ValidationOptions,
    pub scorer: ScorerConfig,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ModerationError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ModerationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the replacement dictionary.
    ///
    /// # Errors
    /// `InvalidConfig` for out-of-range tuning, `InvalidDictionary` for a bad
    /// replacement table.
    pub fn validate(&self) -> Result<(), ModerationError> {
        let scorer = &self.scorer;
        for (name, value) in [
            ("scorer.threshold", scorer.threshold),
            ("scorer.introThreshold", scorer.intro_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModerationError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if scorer.window_words == 0 || scorer.max_input_chars == 0 {
            return Err(ModerationError::InvalidConfig(
                "scorer.windowWords and scorer.maxInputChars must be > 0".to_string(),
            ));
        }

        let validation = &self.validation;
        if let Some(max) = validation.max_length {
            if max < validation.min_length {
                return Err(ModerationError::InvalidConfig(format!(
                    "validation.maxLength ({}) is below validation.minLength ({})",
                    max, validation.min_length
                )));
            }
        }

        if let Some(entries) = &self.dictionary {
            Dictionary::new(entries.clone()).validate()?;
        }
        Ok(())
    }

    /// The dictionary in effect.
    pub fn dictionary(&self) -> Dictionary {
        match &self.dictionary {
            Some(entries) => Dictionary::new(entries.clone()),
            None => Dictionary::canonical(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
