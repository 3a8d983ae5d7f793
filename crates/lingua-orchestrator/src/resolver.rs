//! Language bridging for summarization.
//!
//! The summarizer accepts fewer languages than the translator. When the
//! source or target of a request falls outside the summarizer's set, the
//! text is translated to and/or from a single fallback language, the first
//! entry of the summarizer list. There is never more than one hop each way.

use indexmap::IndexSet;
use lingua_core::{
    CapabilityRequirement, LanguageCode, LanguagePair, LanguageTable, ProcessError,
    ProcessOptions, ProcessResult, SettingsError, SummarizerParams, SummaryStyle,
};

/// Which of the four bridging shapes a plan takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCase {
    /// Source and target are both summarizer languages.
    Direct,
    /// Source is translated to the fallback first.
    PreTranslate,
    /// The summary is translated from the fallback afterwards.
    PostTranslate,
    /// Both hops.
    PreAndPostTranslate,
}

/// Steps needed to summarize `source` text into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePlan {
    /// Bridging shape.
    pub case: BridgeCase,
    /// Translation applied to the input before summarizing.
    pub pre_translation: Option<LanguagePair>,
    /// Language handed to the summarizer.
    pub summary_input: LanguageCode,
    /// Language the summarizer writes.
    pub summary_output: LanguageCode,
    /// Translation applied to the summary.
    pub post_translation: Option<LanguagePair>,
}

impl BridgePlan {
    /// Distinct capabilities the plan touches, in execution order.
    pub fn requirements(&self) -> Vec<CapabilityRequirement> {
        let mut requirements = IndexSet::new();
        if let Some(pair) = &self.pre_translation {
            requirements.insert(CapabilityRequirement::Translation(pair.clone()));
        }
        requirements.insert(CapabilityRequirement::Summarization);
        if let Some(pair) = &self.post_translation {
            requirements.insert(CapabilityRequirement::Translation(pair.clone()));
        }
        requirements.into_iter().collect()
    }

    /// Number of bridging translations (0 - 2).
    pub fn translation_count(&self) -> usize {
        usize::from(self.pre_translation.is_some()) + usize::from(self.post_translation.is_some())
    }

    /// Summarizer parameters for this plan.
    pub fn summarizer_params(&self, style: &SummaryStyle) -> SummarizerParams {
        SummarizerParams::new(
            self.summary_input.clone(),
            self.summary_output.clone(),
            style.clone(),
        )
    }
}

/// Computes bridging plans against a language table.
#[derive(Debug, Clone)]
pub struct LanguageCapabilityResolver {
    table: LanguageTable,
    fallback: LanguageCode,
}

impl LanguageCapabilityResolver {
    /// Create a resolver. The summarization list must not be empty.
    pub fn new(table: LanguageTable) -> Result<Self, SettingsError> {
        let fallback = table
            .fallback()
            .cloned()
            .ok_or(SettingsError::EmptySummarizationLanguages)?;
        Ok(Self { table, fallback })
    }

    /// The language table.
    pub const fn table(&self) -> &LanguageTable {
        &self.table
    }

    /// The bridging language.
    pub const fn fallback_language(&self) -> &LanguageCode {
        &self.fallback
    }

    /// Whether the summarizer accepts `code` directly.
    pub fn is_summarizer_language(&self, code: &LanguageCode) -> bool {
        self.table.is_summarizer_language(code)
    }

    /// Reject language codes that appear in neither list.
    pub fn validate_options(&self, options: &ProcessOptions) -> ProcessResult<()> {
        for code in [&options.source_language, &options.target_language] {
            if !self.table.is_known(code) {
                return Err(ProcessError::invalid_request(format!(
                    "Unsupported language: {code}"
                )));
            }
        }
        Ok(())
    }

    /// Plan the bridging needed to summarize `source` text into `target`.
    pub fn plan_summarization(&self, source: &LanguageCode, target: &LanguageCode) -> BridgePlan {
        let fallback = &self.fallback;
        let source_supported = self.is_summarizer_language(source);
        let target_supported = self.is_summarizer_language(target);

        let (case, pre_translation, summary_input) = if source_supported {
            (BridgeCase::Direct, None, source.clone())
        } else {
            (
                BridgeCase::PreTranslate,
                Some(LanguagePair::new(source.clone(), fallback.clone())),
                fallback.clone(),
            )
        };

        let (case, post_translation, summary_output) = match (target_supported, case) {
            (true, case) => (case, None, target.clone()),
            (false, BridgeCase::Direct) => (
                BridgeCase::PostTranslate,
                Some(LanguagePair::new(fallback.clone(), target.clone())),
                fallback.clone(),
            ),
            (false, _) => (
                BridgeCase::PreAndPostTranslate,
                Some(LanguagePair::new(fallback.clone(), target.clone())),
                fallback.clone(),
            ),
        };

        let plan = BridgePlan {
            case,
            pre_translation,
            summary_input,
            summary_output,
            post_translation,
        };
        tracing::debug!(
            source = %source,
            target = %target,
            case = ?plan.case,
            "Resolved summarization bridge"
        );
        plan
    }
}
