//! Backend commands queued from UI to backend worker.

use std::{path::PathBuf, time::Duration};

use shared::domain::{CampaignId, ReviewAction, RowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    CheckHealth,
    LoadCampaigns,
    CreateCampaign {
        name: String,
        master_prompt: String,
        file_path: PathBuf,
    },
    RefreshDashboard {
        campaign_id: CampaignId,
    },
    LaunchCampaign {
        campaign_id: CampaignId,
        refresh_after: Duration,
    },
    LoadReviewQueue {
        campaign_id: CampaignId,
    },
    DecideReview {
        campaign_id: CampaignId,
        row_id: RowId,
        action: ReviewAction,
    },
    LoadModels,
    SelectModel {
        model: String,
    },
    LoadReplyCandidates {
        campaign_id: CampaignId,
    },
    SubmitManualReply {
        row_id: RowId,
        reply_text: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckHealth => "check_health",
            Self::LoadCampaigns => "load_campaigns",
            Self::CreateCampaign { .. } => "create_campaign",
            Self::RefreshDashboard { .. } => "refresh_dashboard",
            Self::LaunchCampaign { .. } => "launch_campaign",
            Self::LoadReviewQueue { .. } => "load_review_queue",
            Self::DecideReview { .. } => "decide_review",
            Self::LoadModels => "load_models",
            Self::SelectModel { .. } => "select_model",
            Self::LoadReplyCandidates { .. } => "load_reply_candidates",
            Self::SubmitManualReply { .. } => "submit_manual_reply",
        }
    }
}
