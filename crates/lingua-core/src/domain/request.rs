//! Processing request types.

use serde::{Deserialize, Serialize};

use super::capability::{LanguageCode, LanguagePair};

/// What to do with a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    /// Language the text is written in.
    pub source_language: LanguageCode,
    /// Language the result should be written in.
    pub target_language: LanguageCode,
    /// Summarize instead of translating verbatim.
    #[serde(default)]
    pub summarize: bool,
    /// Extra context handed to the summarizer for this request only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ProcessOptions {
    /// Plain translation options.
    pub fn translate(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source_language: source.into(),
            target_language: target.into(),
            summarize: false,
            context: None,
        }
    }

    /// Summarization options.
    pub fn summarize(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            summarize: true,
            ..Self::translate(source, target)
        }
    }

    /// Attach summarizer context, e.g. the page title.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// `source -> target` as a pair.
    #[must_use]
    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair::new(self.source_language.clone(), self.target_language.clone())
    }

    /// Source and target are the same language.
    #[must_use]
    pub fn is_same_language(&self) -> bool {
        self.source_language == self.target_language
    }
}

/// Text plus processing options, as sent by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// The selected text.
    pub text: String,
    /// Processing options.
    #[serde(flatten)]
    pub options: ProcessOptions,
}

impl ProcessRequest {
    /// Create a request.
    pub fn new(text: impl Into<String>, options: ProcessOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}
