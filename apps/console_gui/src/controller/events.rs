//! Backend-to-UI events and error modeling for the console controller.

use client_core::{ClientError, HealthProbe};
use shared::{
    domain::{CampaignId, ReviewAction, RowId},
    protocol::{
        CampaignDetail, CampaignSummary, CreatedCampaign, ManualReplyResult, ModelSettings,
        ReviewRow,
    },
};

pub enum UiEvent {
    Error(UiError),
    HealthChecked(HealthProbe),
    CampaignsLoaded(Vec<CampaignSummary>),
    CampaignsLoadFailed,
    CampaignCreated(CreatedCampaign),
    CampaignCreateFailed(CreateFailure),
    DashboardLoaded {
        campaign_id: CampaignId,
        detail: CampaignDetail,
    },
    DashboardLoadFailed,
    LaunchSettled {
        campaign_id: CampaignId,
    },
    ReviewQueueLoaded {
        campaign_id: CampaignId,
        rows: Vec<ReviewRow>,
    },
    ReviewQueueLoadFailed,
    ReviewDecided {
        campaign_id: CampaignId,
        row_id: RowId,
        action: ReviewAction,
    },
    ReviewDecisionFailed {
        campaign_id: CampaignId,
        row_id: RowId,
        message: String,
    },
    ModelsLoaded(ModelSettings),
    ModelsLoadFailed,
    ModelSelected {
        model: String,
    },
    ModelSelectFailed {
        message: String,
    },
    ReplyCandidatesLoaded {
        campaign_id: CampaignId,
        detail: CampaignDetail,
    },
    ReplyCandidatesLoadFailed,
    ManualReplyProcessed(ManualReplyResult),
    ManualReplyFailed {
        message: String,
    },
}

/// Why a campaign submission did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateFailure {
    /// The service answered with a non-success status.
    Rejected { detail: Option<String> },
    /// No response reached the console.
    Unreachable,
    /// The staged file could not be read before submission.
    LocalFile(String),
}

impl CreateFailure {
    pub fn from_client_error(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) => Self::Unreachable,
            ClientError::Upload { source, .. } => Self::LocalFile(source.to_string()),
            ClientError::Service(rejection) => Self::Rejected {
                detail: rejection.detail.clone(),
            },
            ClientError::Refused(reason) => Self::Rejected {
                detail: Some(reason.clone()),
            },
            ClientError::Decode(_) | ClientError::Url(_) => Self::Rejected { detail: None },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }
}
