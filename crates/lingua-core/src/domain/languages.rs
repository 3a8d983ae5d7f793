//! Supported language tables.

use serde::{Deserialize, Serialize};

use super::capability::LanguageCode;

/// Languages the translation engine is expected to handle, in display order.
pub const DEFAULT_TRANSLATION_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "pl", "ru", "uk", "tr", "ar", "hi", "bn", "ja", "ko",
    "zh", "zh-hant", "vi", "th", "id", "sv", "da", "fi", "no", "cs", "el", "he", "hu", "ro",
];

/// Languages the summarization engine accepts. The first entry is the
/// fallback language used for bridging.
pub const DEFAULT_SUMMARIZATION_LANGUAGES: &[&str] = &["en", "es", "ja"];

/// Ordered language lists for translation and summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageTable {
    translation: Vec<LanguageCode>,
    summarization: Vec<LanguageCode>,
}

impl LanguageTable {
    /// Build a table from ordered code lists.
    pub fn new<T, S>(translation: T, summarization: S) -> Self
    where
        T: IntoIterator,
        T::Item: Into<LanguageCode>,
        S: IntoIterator,
        S::Item: Into<LanguageCode>,
    {
        Self {
            translation: translation.into_iter().map(Into::into).collect(),
            summarization: summarization.into_iter().map(Into::into).collect(),
        }
    }

    /// Translation languages, in order.
    #[must_use]
    pub fn translation_languages(&self) -> &[LanguageCode] {
        &self.translation
    }

    /// Summarization languages, in order.
    #[must_use]
    pub fn summarization_languages(&self) -> &[LanguageCode] {
        &self.summarization
    }

    /// The bridging language: first entry of the summarization list.
    ///
    /// `None` only for a table that failed settings validation.
    #[must_use]
    pub fn fallback(&self) -> Option<&LanguageCode> {
        self.summarization.first()
    }

    /// Whether the summarizer accepts `code` directly.
    #[must_use]
    pub fn is_summarizer_language(&self, code: &LanguageCode) -> bool {
        self.summarization.contains(code)
    }

    /// Whether the translator is expected to handle `code`.
    #[must_use]
    pub fn is_translation_language(&self, code: &LanguageCode) -> bool {
        self.translation.contains(code)
    }

    /// Whether `code` appears in either list.
    #[must_use]
    pub fn is_known(&self, code: &LanguageCode) -> bool {
        self.is_translation_language(code) || self.is_summarizer_language(code)
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSLATION_LANGUAGES.iter().copied(),
            DEFAULT_SUMMARIZATION_LANGUAGES.iter().copied(),
        )
    }
}
