use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CampaignId, ReviewAction, RowId},
    error::{ErrorBody, ServiceRejection},
    protocol::{
        CampaignDetail, CampaignListResponse, CampaignSummary, CreatedCampaign, ManualReplyRequest,
        ManualReplyResult, ModelSettings, ModelUpdateRequest, ModelUpdateResponse,
        ReviewDecisionRequest, ReviewRow,
    },
};
use tracing::debug;
use url::Url;

pub mod error;
pub use error::{ClientError, Result};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a single liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthProbe {
    Online,
    /// The service answered with a non-success status code.
    Error(u16),
    /// No response was received.
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Upload {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { filename, bytes })
    }
}

/// Everything the service needs to create a campaign.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub name: String,
    pub master_prompt: String,
    pub user_email: String,
    pub file: UploadFile,
}

/// Operations the console performs against the remote campaign service.
#[async_trait]
pub trait CampaignService: Send + Sync {
    async fn probe_health(&self) -> HealthProbe;
    async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>>;
    async fn create_campaign(&self, draft: CampaignDraft) -> Result<CreatedCampaign>;
    async fn campaign_detail(&self, campaign_id: CampaignId) -> Result<CampaignDetail>;
    async fn launch_campaign(&self, campaign_id: CampaignId) -> Result<()>;
    async fn review_queue(&self, campaign_id: CampaignId) -> Result<Vec<ReviewRow>>;
    async fn review_row(
        &self,
        campaign_id: CampaignId,
        row_id: RowId,
        action: ReviewAction,
    ) -> Result<()>;
    async fn model_settings(&self) -> Result<ModelSettings>;
    /// Returns the model the service reports as active after the switch.
    async fn select_model(&self, model: &str) -> Result<String>;
    async fn submit_manual_reply(
        &self,
        row_id: RowId,
        reply_text: &str,
    ) -> Result<ManualReplyResult>;
}

pub struct HttpCampaignClient {
    http: Client,
    base_url: Url,
}

impl HttpCampaignClient {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(mut base_url: Url, timeout: Duration) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok());
        Err(ServiceRejection::new(status.as_u16(), body).into())
    }
}

#[async_trait]
impl CampaignService for HttpCampaignClient {
    async fn probe_health(&self) -> HealthProbe {
        let url = match self.endpoint("health") {
            Ok(url) => url,
            Err(_) => return HealthProbe::Offline,
        };
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => HealthProbe::Online,
            Ok(response) => HealthProbe::Error(response.status().as_u16()),
            Err(err) => {
                debug!(error = %err, "health probe received no response");
                HealthProbe::Offline
            }
        }
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignSummary>> {
        let response = self.http.get(self.endpoint("campaigns")?).send().await?;
        let body: CampaignListResponse = Self::read_json(response).await?;
        Ok(body.campaigns)
    }

    async fn create_campaign(&self, draft: CampaignDraft) -> Result<CreatedCampaign> {
        debug!(
            name = %draft.name,
            filename = %draft.file.filename,
            size_bytes = draft.file.bytes.len(),
            "submitting campaign"
        );
        let form = multipart::Form::new()
            .text("name", draft.name)
            .text("master_prompt", draft.master_prompt)
            .text("user_email", draft.user_email)
            .part(
                "file",
                multipart::Part::bytes(draft.file.bytes).file_name(draft.file.filename),
            );
        let response = self
            .http
            .post(self.endpoint("campaigns")?)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn campaign_detail(&self, campaign_id: CampaignId) -> Result<CampaignDetail> {
        let response = self
            .http
            .get(self.endpoint(&format!("campaigns/{campaign_id}"))?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn launch_campaign(&self, campaign_id: CampaignId) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&format!("campaigns/{campaign_id}/launch"))?)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn review_queue(&self, campaign_id: CampaignId) -> Result<Vec<ReviewRow>> {
        let response = self
            .http
            .get(self.endpoint(&format!("campaigns/{campaign_id}/reviews"))?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn review_row(
        &self,
        campaign_id: CampaignId,
        row_id: RowId,
        action: ReviewAction,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(&format!("campaigns/{campaign_id}/rows/{row_id}/review"))?)
            .json(&ReviewDecisionRequest {
                action,
                manual_update: None,
            })
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn model_settings(&self) -> Result<ModelSettings> {
        let response = self.http.get(self.endpoint("settings/models")?).send().await?;
        Self::read_json(response).await
    }

    async fn select_model(&self, model: &str) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint("settings/models")?)
            .json(&ModelUpdateRequest {
                model: model.to_string(),
            })
            .send()
            .await?;
        let body: ModelUpdateResponse = Self::read_json(response).await?;
        if let Some(reason) = body.error {
            return Err(ClientError::Refused(reason));
        }
        Ok(body.current_model.unwrap_or_else(|| model.to_string()))
    }

    async fn submit_manual_reply(
        &self,
        row_id: RowId,
        reply_text: &str,
    ) -> Result<ManualReplyResult> {
        debug!(%row_id, chars = reply_text.chars().count(), "submitting manual reply");
        let response = self
            .http
            .post(self.endpoint("webhooks/manual-reply")?)
            .json(&ManualReplyRequest {
                data_row_id: row_id,
                reply_text: reply_text.to_string(),
            })
            .send()
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
