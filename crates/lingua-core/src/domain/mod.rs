//! Domain types for on-device AI processing.
//!
//! Pure data types: capabilities, model status, language tables and request
//! shapes. No I/O.

mod capability;
mod languages;
mod request;
mod status;
mod summarizer;

pub use capability::{CapabilityRequirement, LanguageCode, LanguagePair};
pub use languages::{
    DEFAULT_SUMMARIZATION_LANGUAGES, DEFAULT_TRANSLATION_LANGUAGES, LanguageTable,
};
pub use request::{ProcessOptions, ProcessRequest};
pub use status::{ModelState, ModelStatus};
pub use summarizer::{
    DetectionCandidate, SummarizeOptions, SummarizerParams, SummaryFormat, SummaryKind,
    SummaryLength, SummaryStyle,
};
