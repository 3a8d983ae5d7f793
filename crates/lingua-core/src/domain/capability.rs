//! Capability identifiers: language codes, language pairs, and the
//! requirement union that names exactly one on-device capability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A language code such as `en`, `es` or `zh-Hant`.
///
/// Codes are trimmed and lowercased on construction so that `"EN "` and
/// `"en"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Code returned when a language could not be determined.
    pub const UNDETERMINED: &'static str = "und";

    /// Create a normalized language code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    /// The `und` code.
    #[must_use]
    pub fn undetermined() -> Self {
        Self(Self::UNDETERMINED.to_string())
    }

    /// Check whether this is the `und` code.
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        self.0 == Self::UNDETERMINED
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LanguageCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

/// Source and target language of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    /// Language the input text is written in.
    pub source: LanguageCode,
    /// Language the output should be written in.
    pub target: LanguageCode,
}

impl LanguagePair {
    /// Create a language pair.
    pub fn new(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Identifies exactly one on-device capability to check or download.
///
/// Serialized with a `kind` tag:
///
/// ```json
/// { "kind": "translation", "source": "en", "target": "es" }
/// { "kind": "summarization" }
/// { "kind": "language-detection" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CapabilityRequirement {
    /// Translation for one language pair.
    Translation(LanguagePair),
    /// Summarization.
    Summarization,
    /// Language detection.
    LanguageDetection,
}

impl CapabilityRequirement {
    /// Translation requirement for `source -> target`.
    pub fn translation(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self::Translation(LanguagePair::new(source, target))
    }

    /// Stable key used in logs and event payloads (e.g. `translation:en->es`).
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Translation(pair) => format!("translation:{pair}"),
            Self::Summarization => "summarization".to_string(),
            Self::LanguageDetection => "language-detection".to_string(),
        }
    }

    /// Human-readable engine name, used in "not supported" messages.
    #[must_use]
    pub const fn engine_name(&self) -> &'static str {
        match self {
            Self::Translation(_) => "Translator",
            Self::Summarization => "Summarizer",
            Self::LanguageDetection => "Language Detector",
        }
    }
}

impl fmt::Display for CapabilityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
