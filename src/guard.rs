//! Caller hooks: chat pre-send and listing pre-publish.
//!
//! `ContentGuard` is built once and shared; every method is a pure function
//! of its input and the immutable tables built at construction.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::moderation::{
    Dictionary, MessageValidator, ModerationEngine, ModerationError, ValidationOptions,
    ValidationResult,
};
use crate::scoring::{ContentScorer, FieldKind, InappropriateContentResult, ScorerConfig};

/// Listing fields submitted for publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub intro: Option<String>,
}

/// Pre-publish decision for a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReview {
    pub publishable: bool,
    pub title: ValidationResult,
    pub description: InappropriateContentResult,
    pub intro: Option<InappropriateContentResult>,
    /// Hand the listing to a human moderator
    pub notify_moderator: bool,
}

#[derive(Debug, Clone)]
pub struct ContentGuard {
    validator: MessageValidator,
    scorer: ContentScorer,
    options: ValidationOptions,
}

impl ContentGuard {
    pub fn new(dictionary: &Dictionary, options: ValidationOptions, scorer: ScorerConfig) -> Self {
        Self {
            validator: MessageValidator::new(ModerationEngine::new(dictionary)),
            scorer: ContentScorer::new(scorer),
            options,
        }
    }

    /// Build from a configuration document.
    pub fn from_config(config: EngineConfig) -> Result<Self, ModerationError> {
        config.validate()?;
        let dictionary = config.dictionary();
        info!(
            entries = dictionary.len(),
            custom = config.dictionary.is_some(),
            "content guard ready"
        );
        Ok(Self::new(&dictionary, config.validation, config.scorer))
    }

    pub fn validator(&self) -> &MessageValidator {
        &self.validator
    }

    pub fn scorer(&self) -> &ContentScorer {
        &self.scorer
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Chat pre-send hook with the configured options.
    pub fn check_chat_message(&self, text: &str) -> ValidationResult {
        self.validator.validate(text, &self.options)
    }

    pub fn check_chat_message_with(&self, text: &str, options: &ValidationOptions) -> ValidationResult {
        self.validator.validate(text, options)
    }

    /// Listing pre-publish hook.
    ///
    /// The title goes through the chat validator; description and intro are
    /// scored. A title that only passed after censoring, or a moderator flag,
    /// keeps the listing publishable but raises `notify_moderator`.
    pub fn review_listing(&self, draft: &ListingDraft) -> ListingReview {
        let title_options = ValidationOptions {
            censor_instead_of_block: false,
            ..self.options.clone()
        };
        let title = self.validator.validate(&draft.title, &title_options);
        let description = self.scorer.score(&draft.description, FieldKind::Description);
        let intro = draft
            .intro
            .as_deref()
            .map(|intro| self.scorer.score(intro, FieldKind::Intro));

        let intro_flagged = intro.as_ref().is_some_and(|r| r.is_inappropriate);
        let publishable = title.is_valid && !description.is_inappropriate && !intro_flagged;
        let notify_moderator = title.should_notify_moderator
            || title.was_censored()
            || description.is_inappropriate
            || intro_flagged;

        info!(publishable, notify_moderator, "listing reviewed");
        ListingReview {
            publishable,
            title,
            description,
            intro,
            notify_moderator,
        }
    }
}

impl Default for ContentGuard {
    fn default() -> Self {
        Self::new(
            &Dictionary::canonical(),
            ValidationOptions::default(),
            ScorerConfig::default(),
        )
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
