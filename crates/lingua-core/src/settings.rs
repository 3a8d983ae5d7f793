//! Settings domain types and validation.
//!
//! Settings are plain serde types loaded from JSON. Every field has a
//! default, so a partial (or empty) document is valid input.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{LanguageTable, SummaryStyle};

/// Message shown when a call that had to download a model completes.
pub const DEFAULT_COMPLETION_MESSAGE: &str =
    "Your text is ready. The on-device AI model finished downloading.";

/// Detector candidates below this confidence are treated as undetermined.
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f64 = 0.0;

/// What to do with a plain translation whose source and target match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameLanguagePolicy {
    /// Return the input unchanged without touching the engine.
    #[default]
    PassThrough,
    /// Forward to the translator like any other pair.
    Translate,
}

/// Processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Translation and summarization language lists.
    pub languages: LanguageTable,

    /// Presentation options passed to every summarizer.
    pub summary_style: SummaryStyle,

    /// Handling of `source == target` plain translations.
    pub same_language_policy: SameLanguagePolicy,

    /// Notification text shown after a download; `None` uses the default.
    pub completion_message: Option<String>,

    /// Minimum detector confidence (0.0 - 1.0); `None` uses the default.
    pub min_detection_confidence: Option<f64>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            completion_message: Some(DEFAULT_COMPLETION_MESSAGE.to_string()),
            min_detection_confidence: Some(DEFAULT_MIN_DETECTION_CONFIDENCE),
            ..Self::default()
        }
    }

    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        tracing::debug!(path = %path.display(), "Loading settings");
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Get the effective completion message (with default fallback).
    #[must_use]
    pub fn effective_completion_message(&self) -> &str {
        self.completion_message
            .as_deref()
            .unwrap_or(DEFAULT_COMPLETION_MESSAGE)
    }

    /// Get the effective detection threshold (with default fallback).
    #[must_use]
    pub fn effective_min_detection_confidence(&self) -> f64 {
        self.min_detection_confidence
            .unwrap_or(DEFAULT_MIN_DETECTION_CONFIDENCE)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("At least one summarization language is required")]
    EmptySummarizationLanguages,

    #[error("Fallback language '{0}' must also be a translation language")]
    FallbackNotTranslatable(String),

    #[error("Detection confidence must be between 0.0 and 1.0, got {0}")]
    InvalidConfidence(f64),

    #[error("Completion message cannot be empty")]
    EmptyCompletionMessage,

    #[error("Invalid settings document: {0}")]
    Parse(String),

    #[error("Failed to read settings from {path}: {message}")]
    Io { path: String, message: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let languages = &settings.languages;
    let fallback = languages
        .fallback()
        .ok_or(SettingsError::EmptySummarizationLanguages)?;

    // Bridging translates to and from the fallback
    if !languages.is_translation_language(fallback) {
        return Err(SettingsError::FallbackNotTranslatable(fallback.to_string()));
    }

    if let Some(confidence) = settings.min_detection_confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(SettingsError::InvalidConfidence(confidence));
        }
    }

    if settings
        .completion_message
        .as_ref()
        .is_some_and(|m| m.trim().is_empty())
    {
        return Err(SettingsError::EmptyCompletionMessage);
    }

    Ok(())
}
