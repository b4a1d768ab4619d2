use birdwatch_classifier::{ApiError, PredictionLabel, ServiceInfo};

/// Where the upload/predict cycle currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    FileChosen,
    Submitting,
    Resolved(PredictionLabel),
    Failed,
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }

    pub fn label(&self) -> Option<&PredictionLabel> {
        match self {
            WorkflowState::Resolved(label) => Some(label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NoFileSelected,
    UploadFailed,
    FileUnreadable,
    ActionFailed,
}

/// Blocking alert. Input other than dismissal is ignored while one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Checking,
    Online(String),
    Offline,
}

pub enum AppAsyncEvent {
    PredictionFinished {
        generation: u64,
        file_name: String,
        result: Result<PredictionLabel, ApiError>,
    },
    ServiceChecked {
        result: Result<ServiceInfo, ApiError>,
    },
}

/// What the result banner shows, derived from workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBanner {
    pub label: PredictionLabel,
    pub positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}
