use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CampaignId, ReviewAction, RowId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub id: CampaignId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignListResponse {
    #[serde(default)]
    pub campaigns: Vec<CampaignSummary>,
}

/// Body returned by `POST /campaigns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCampaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CampaignId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CampaignId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Counters as reported by the service. Absent counters stay `None` so the
/// dashboard can tell "missing" apart from a real zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pending: Option<u64>,
    #[serde(default)]
    pub sent: Option<u64>,
    #[serde(default)]
    pub replied: Option<u64>,
    #[serde(default)]
    pub review: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub row_index: i64,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub message_status: Option<String>,
    #[serde(default)]
    pub outbound_message: Option<String>,
}

/// Body returned by `GET /campaigns/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignDetail {
    #[serde(default)]
    pub campaign: CampaignHeader,
    #[serde(default)]
    pub stats: Option<CampaignStats>,
    #[serde(default)]
    pub rows: Option<Vec<RowRecord>>,
}

/// A row flagged by the service for a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub id: RowId,
    pub row_index: i64,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub outbound_message: Option<String>,
    #[serde(default)]
    pub reply_text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub suggested_update: Option<Value>,
    #[serde(default)]
    pub row_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecisionRequest {
    pub action: ReviewAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_update: Option<Value>,
}

/// Body of `GET /settings/models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub current_model: String,
    #[serde(default)]
    pub available_models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelUpdateRequest {
    pub model: String,
}

/// Body of `POST /settings/models`. An unknown model is refused with a
/// success status and an `error` field instead of `current_model`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub current_model: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualReplyRequest {
    pub data_row_id: RowId,
    pub reply_text: String,
}

/// Classification returned by `POST /webhooks/manual-reply`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualReplyResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default)]
    pub suggested_update: Option<Value>,
}
