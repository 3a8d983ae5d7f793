//! Model lifecycle status.

use serde::{Deserialize, Serialize};

/// Availability state of a capability's on-device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    /// The capability cannot be used.
    Unavailable,
    /// The model can be downloaded on demand.
    Downloadable,
    /// The model is being downloaded.
    Downloading,
    /// The model is ready.
    Available,
}

impl ModelState {
    /// String representation used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Downloadable => "downloadable",
            Self::Downloading => "downloading",
            Self::Available => "available",
        }
    }
}

/// Status of a capability's model.
///
/// Fields are private so the invariants hold for every value:
/// `download_progress` is only present while `Downloading`, `Available`
/// never carries an error message and `Unavailable` always does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawModelStatus")]
pub struct ModelStatus {
    state: ModelState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_progress: Option<u8>,
}

impl ModelStatus {
    /// The model is ready.
    #[must_use]
    pub const fn available() -> Self {
        Self {
            state: ModelState::Available,
            error_message: None,
            download_progress: None,
        }
    }

    /// The model can be downloaded.
    #[must_use]
    pub const fn downloadable() -> Self {
        Self {
            state: ModelState::Downloadable,
            error_message: None,
            download_progress: None,
        }
    }

    /// A download has started; no progress is known yet.
    #[must_use]
    pub const fn download_started() -> Self {
        Self {
            state: ModelState::Downloading,
            error_message: None,
            download_progress: None,
        }
    }

    /// The model is downloading; `progress` is clamped to `0..=100`.
    #[must_use]
    pub fn downloading(progress: u8) -> Self {
        Self {
            state: ModelState::Downloading,
            error_message: None,
            download_progress: Some(progress.min(100)),
        }
    }

    /// The capability cannot be used.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable,
            error_message: Some(message.into()),
            download_progress: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ModelState {
        self.state
    }

    /// Error message, set only when `Unavailable`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Download progress in percent, set only when `Downloading`.
    #[must_use]
    pub const fn download_progress(&self) -> Option<u8> {
        self.download_progress
    }

    /// Whether the model is ready.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state == ModelState::Available
    }

    /// Terminal states end a download sequence.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.state, ModelState::Available | ModelState::Unavailable)
    }
}

/// Unchecked wire form of `ModelStatus`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModelStatus {
    state: ModelState,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    download_progress: Option<u8>,
}

impl TryFrom<RawModelStatus> for ModelStatus {
    type Error = String;

    fn try_from(raw: RawModelStatus) -> Result<Self, Self::Error> {
        let state = raw.state.as_str();
        match (raw.state, raw.error_message, raw.download_progress) {
            (_, Some(_), _) if raw.state != ModelState::Unavailable => {
                Err(format!("errorMessage is not allowed when {state}"))
            }
            (_, _, Some(_)) if raw.state != ModelState::Downloading => {
                Err(format!("downloadProgress is not allowed when {state}"))
            }
            (ModelState::Unavailable, None, _) => {
                Err("errorMessage is required when unavailable".to_string())
            }
            (ModelState::Unavailable, Some(message), _) => Ok(Self::unavailable(message)),
            (ModelState::Downloading, _, Some(progress)) if progress > 100 => {
                Err(format!("downloadProgress {progress} is above 100"))
            }
            (ModelState::Downloading, _, Some(progress)) => Ok(Self::downloading(progress)),
            (ModelState::Downloading, _, None) => Ok(Self::download_started()),
            (ModelState::Downloadable, ..) => Ok(Self::downloadable()),
            (ModelState::Available, ..) => Ok(Self::available()),
        }
    }
}
