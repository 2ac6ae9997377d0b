//! Manual reply entry: paste a recipient's reply against a sent row and let
//! the service classify it, as an inbound webhook would.

use shared::{
    domain::{CampaignId, RowId},
    protocol::{CampaignDetail, ManualReplyResult, RowRecord},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        dashboard::{contact_label, PLACEHOLDER_DASH},
        notifier::NotificationKind,
    },
};

pub const PROCESS_LABEL: &str = "Process Reply";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const REPLY_REQUIRED_MESSAGE: &str = "Please enter a reply.";
pub const REPLY_PROCESSED_MESSAGE: &str = "Reply processed!";
pub const NO_SENT_ROWS_MESSAGE: &str = "No sent messages to reply to yet. Launch a campaign first.";

const SENT_STATUS: &str = "sent";

/// A row whose outbound message went out and can receive a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCandidate {
    pub row_id: RowId,
    pub label: String,
    pub outbound_message: String,
}

impl ReplyCandidate {
    pub fn project(row: &RowRecord) -> Option<Self> {
        let row_id = row.id?;
        if row.message_status.as_deref() != Some(SENT_STATUS) {
            return None;
        }
        Some(Self {
            row_id,
            label: format!(
                "Row {} - {}",
                row.row_index,
                contact_label(row.contact_phone.as_deref(), row.contact_email.as_deref())
            ),
            outbound_message: row
                .outbound_message
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyOutcomeView {
    pub intent: String,
    pub confidence: String,
    pub needs_review: bool,
    pub suggested_update: String,
}

impl ReplyOutcomeView {
    pub fn project(result: &ManualReplyResult) -> Self {
        Self {
            intent: result
                .intent
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
            confidence: result
                .confidence
                .map(|value| format!("{value:.2}"))
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
            needs_review: result.needs_review,
            suggested_update: result
                .suggested_update
                .as_ref()
                .and_then(|value| serde_json::to_string_pretty(value).ok())
                .unwrap_or_else(|| "{}".to_string()),
        }
    }

    pub fn review_note(&self) -> &'static str {
        if self.needs_review {
            "Low confidence: row flagged for review."
        } else {
            "Row updated automatically."
        }
    }
}

#[derive(Debug, Default)]
pub struct ManualReplyController {
    campaign_id: Option<CampaignId>,
    candidates: Option<Vec<ReplyCandidate>>,
    loads_in_flight: usize,
    selected_row: Option<RowId>,
    pub reply_text: String,
    processing: bool,
    outcome: Option<ReplyOutcomeView>,
}

impl ManualReplyController {
    /// Switching campaigns drops the rows, selection and result of the previous one.
    pub fn load(&mut self, campaign_id: Option<CampaignId>) -> Option<BackendCommand> {
        let campaign_id = campaign_id?;
        if self.campaign_id != Some(campaign_id) {
            self.candidates = None;
            self.selected_row = None;
            self.outcome = None;
        }
        self.campaign_id = Some(campaign_id);
        self.loads_in_flight += 1;
        Some(BackendCommand::LoadReplyCandidates { campaign_id })
    }

    /// Keeps the selected row when it is still a candidate, otherwise picks the first one.
    pub fn apply_loaded(&mut self, campaign_id: CampaignId, detail: &CampaignDetail) {
        self.finish_load();
        if self.campaign_id != Some(campaign_id) {
            tracing::debug!(%campaign_id, "discarding reply candidates for deselected campaign");
            return;
        }
        let candidates: Vec<ReplyCandidate> = detail
            .rows
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(ReplyCandidate::project)
            .collect();
        let still_listed = self
            .selected_row
            .is_some_and(|row_id| candidates.iter().any(|c| c.row_id == row_id));
        if !still_listed {
            self.selected_row = candidates.first().map(|c| c.row_id);
        }
        self.candidates = Some(candidates);
    }

    pub fn apply_failed(&mut self) {
        self.finish_load();
    }

    fn finish_load(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }

    pub fn select_row(&mut self, row_id: RowId) -> bool {
        let known = self
            .candidates
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|c| c.row_id == row_id);
        if known && self.selected_row != Some(row_id) {
            self.selected_row = Some(row_id);
            self.outcome = None;
        }
        known
    }

    /// `Err` carries the message to show when the reply is blank. Without a
    /// selected row, or while a reply is processing, nothing happens.
    pub fn submit(&mut self) -> Result<Option<BackendCommand>, &'static str> {
        if self.processing {
            return Ok(None);
        }
        let Some(row_id) = self.selected_row else {
            return Ok(None);
        };
        if self.reply_text.trim().is_empty() {
            return Err(REPLY_REQUIRED_MESSAGE);
        }
        self.processing = true;
        self.outcome = None;
        Ok(Some(BackendCommand::SubmitManualReply {
            row_id,
            reply_text: self.reply_text.clone(),
        }))
    }

    pub fn finish(&mut self, outcome: Result<ManualReplyResult, String>) -> (String, NotificationKind) {
        self.processing = false;
        match outcome {
            Ok(result) => {
                self.outcome = Some(ReplyOutcomeView::project(&result));
                (REPLY_PROCESSED_MESSAGE.to_string(), NotificationKind::Success)
            }
            Err(message) => (message, NotificationKind::Error),
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.processing = false;
    }

    pub fn button_enabled(&self) -> bool {
        !self.processing && self.selected_row.is_some()
    }

    pub fn button_label(&self) -> &'static str {
        if self.processing {
            PROCESSING_LABEL
        } else {
            PROCESS_LABEL
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn campaign_id(&self) -> Option<CampaignId> {
        self.campaign_id
    }

    pub fn candidates(&self) -> Option<&[ReplyCandidate]> {
        self.candidates.as_deref()
    }

    pub fn selected(&self) -> Option<&ReplyCandidate> {
        let row_id = self.selected_row?;
        self.candidates
            .as_deref()?
            .iter()
            .find(|c| c.row_id == row_id)
    }

    pub fn outcome(&self) -> Option<&ReplyOutcomeView> {
        self.outcome.as_ref()
    }
}
