//! Summarizer and language detector parameters.

use serde::{Deserialize, Serialize};

use super::capability::LanguageCode;

/// Shape of the summary the engine produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryKind {
    /// Bulleted key points.
    #[default]
    KeyPoints,
    /// Short prose overview.
    Tldr,
    /// Intriguing teaser.
    Teaser,
    /// Single headline.
    Headline,
}

/// Output markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    /// Markdown output.
    #[default]
    Markdown,
    /// Plain text output.
    PlainText,
}

/// Relative summary length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    /// Shortest output.
    Short,
    /// Default length.
    #[default]
    Medium,
    /// Longest output.
    Long,
}

/// Presentation options for summaries, configured once in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryStyle {
    /// Shape of the summary.
    pub kind: SummaryKind,
    /// Output markup.
    pub format: SummaryFormat,
    /// Relative length.
    pub length: SummaryLength,
    /// Context shared by every summary produced by an instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

/// Parameters used to check and create a summarizer instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizerParams {
    /// Languages the input text may be written in.
    pub expected_input_languages: Vec<LanguageCode>,
    /// Language the summary is written in.
    pub output_language: LanguageCode,
    /// Presentation options.
    #[serde(flatten)]
    pub style: SummaryStyle,
}

impl SummarizerParams {
    /// Parameters for summarizing `input` into `output`.
    pub fn new(input: LanguageCode, output: LanguageCode, style: SummaryStyle) -> Self {
        Self {
            expected_input_languages: vec![input],
            output_language: output,
            style,
        }
    }
}

/// Per-call summarize options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummarizeOptions {
    /// Extra context for this call only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// One language guess from the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionCandidate {
    /// Detected language.
    pub detected_language: LanguageCode,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f64,
}

impl DetectionCandidate {
    /// Create a candidate.
    pub fn new(language: impl Into<LanguageCode>, confidence: f64) -> Self {
        Self {
            detected_language: language.into(),
            confidence,
        }
    }
}
