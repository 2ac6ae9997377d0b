//! Review queue: rows the service flagged for a human approve/reject decision.

use std::collections::HashSet;

use shared::{
    domain::{CampaignId, Channel, ReviewAction, RowId},
    protocol::ReviewRow,
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::dashboard::{channel_label, contact_label, PLACEHOLDER_DASH},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRowView {
    pub row_id: RowId,
    pub row_index: i64,
    pub channel: String,
    pub contact: String,
    pub original_data: String,
    pub outbound_message: String,
    pub reply_text: String,
    pub confidence: String,
    pub suggested_update: String,
}

impl ReviewRowView {
    pub fn project(row: &ReviewRow) -> Self {
        Self {
            row_id: row.id,
            row_index: row.row_index,
            channel: channel_label(&Channel::from_wire(row.channel.as_deref())),
            contact: contact_label(row.contact_phone.as_deref(), row.contact_email.as_deref()),
            original_data: pretty_or_dash(row.row_data.as_ref()),
            outbound_message: text_or_dash(row.outbound_message.as_deref()),
            reply_text: text_or_dash(row.reply_text.as_deref()),
            confidence: row
                .confidence
                .map(|value| format!("{value:.2}"))
                .unwrap_or_else(|| PLACEHOLDER_DASH.to_string()),
            suggested_update: pretty_or_dash(row.suggested_update.as_ref()),
        }
    }
}

fn pretty_or_dash(value: Option<&serde_json::Value>) -> String {
    value
        .and_then(|value| serde_json::to_string_pretty(value).ok())
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
}

fn text_or_dash(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER_DASH.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct ReviewQueueController {
    campaign_id: Option<CampaignId>,
    rows: Option<Vec<ReviewRowView>>,
    loads_in_flight: usize,
    deciding: HashSet<RowId>,
}

impl ReviewQueueController {
    /// Switching campaigns drops the queue shown for the previous one.
    pub fn load(&mut self, campaign_id: Option<CampaignId>) -> Option<BackendCommand> {
        let campaign_id = campaign_id?;
        if self.campaign_id != Some(campaign_id) {
            self.rows = None;
            self.deciding.clear();
        }
        self.campaign_id = Some(campaign_id);
        self.loads_in_flight += 1;
        Some(BackendCommand::LoadReviewQueue { campaign_id })
    }

    /// Responses for a campaign that is no longer selected are discarded.
    pub fn apply_loaded(&mut self, campaign_id: CampaignId, rows: &[ReviewRow]) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        if self.campaign_id != Some(campaign_id) {
            tracing::debug!(%campaign_id, "discarding review queue for deselected campaign");
            return;
        }
        self.rows = Some(rows.iter().map(ReviewRowView::project).collect());
    }

    pub fn apply_failed(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }

    pub fn decide(&mut self, row_id: RowId, action: ReviewAction) -> Option<BackendCommand> {
        let campaign_id = self.campaign_id?;
        if !self.deciding.insert(row_id) {
            return None;
        }
        Some(BackendCommand::DecideReview {
            campaign_id,
            row_id,
            action,
        })
    }

    /// Clears the busy marker and reloads the queue if that campaign is still selected.
    pub fn finish_decision(
        &mut self,
        campaign_id: CampaignId,
        row_id: RowId,
    ) -> Option<BackendCommand> {
        self.deciding.remove(&row_id);
        if self.campaign_id != Some(campaign_id) {
            return None;
        }
        self.load(Some(campaign_id))
    }

    /// Clears the busy marker of a decision that never reached the service.
    pub(crate) fn abandon_decision(&mut self, row_id: RowId) {
        self.deciding.remove(&row_id);
    }

    pub fn is_deciding(&self, row_id: RowId) -> bool {
        self.deciding.contains(&row_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn campaign_id(&self) -> Option<CampaignId> {
        self.campaign_id
    }

    pub fn rows(&self) -> Option<&[ReviewRowView]> {
        self.rows.as_deref()
    }

    pub fn summary(&self) -> Option<String> {
        let rows = self.rows.as_ref()?;
        Some(if rows.is_empty() {
            "No rows need review!".to_string()
        } else {
            format!("{} row(s) need your attention.", rows.len())
        })
    }
}
