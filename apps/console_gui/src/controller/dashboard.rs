//! Per-campaign dashboard: stats, lifecycle-gated launch control and row table.
//!
//! Everything visible is a pure projection of the latest detail snapshot. A
//! refresh never patches the previous view; it replaces it.

use shared::{
    domain::{CampaignId, CampaignStage, Channel},
    protocol::{CampaignDetail, CampaignStats, RowRecord},
};

use crate::backend_bridge::commands::BackendCommand;

pub const REFRESH_LABEL: &str = "Refresh";
pub const REFRESHING_LABEL: &str = "Refreshing...";
pub const LAUNCH_LABEL: &str = "Launch Campaign";
pub const RUNNING_LABEL: &str = "Running...";
pub const LAUNCHING_LABEL: &str = "Launching...";
pub const PLACEHOLDER_DASH: &str = "\u{2014}";
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsView {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub replied: u64,
    pub review: u64,
}

impl StatsView {
    pub fn project(stats: Option<&CampaignStats>) -> Self {
        let Some(stats) = stats else {
            return Self::default();
        };
        Self {
            total: stats.total.unwrap_or(0),
            pending: stats.pending.unwrap_or(0),
            sent: stats.sent.unwrap_or(0),
            replied: stats.replied.unwrap_or(0),
            review: stats.review.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchGate {
    Launchable(CampaignId),
    Running,
    Launching,
}

impl LaunchGate {
    /// Unrecognized stages fall into `Running`, which keeps the control disabled.
    pub fn for_stage(campaign_id: CampaignId, stage: &CampaignStage) -> Self {
        if stage.is_launchable() {
            Self::Launchable(campaign_id)
        } else {
            Self::Running
        }
    }

    pub fn enabled(self) -> bool {
        matches!(self, Self::Launchable(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Launchable(_) => LAUNCH_LABEL,
            Self::Running => RUNNING_LABEL,
            Self::Launching => LAUNCHING_LABEL,
        }
    }

    pub fn target(self) -> Option<CampaignId> {
        match self {
            Self::Launchable(campaign_id) => Some(campaign_id),
            Self::Running | Self::Launching => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row_index: i64,
    pub channel: String,
    pub contact: String,
    pub status: String,
    pub status_class: String,
    pub preview: String,
}

impl RowView {
    pub fn project(row: &RowRecord) -> Self {
        let status = row.message_status.clone().unwrap_or_default();
        Self {
            row_index: row.row_index,
            channel: channel_label(&Channel::from_wire(row.channel.as_deref())),
            contact: contact_label(row.contact_phone.as_deref(), row.contact_email.as_deref()),
            status_class: format!("status-{status}"),
            status,
            preview: message_preview(row.outbound_message.as_deref()),
        }
    }
}

pub fn channel_label(channel: &Channel) -> String {
    match channel {
        Channel::Whatsapp => "\u{1F4F1} WhatsApp".to_string(),
        Channel::Email => "\u{1F4E7} Email".to_string(),
        Channel::Unrecognized(raw) if raw.trim().is_empty() => "\u{2022} Unknown".to_string(),
        Channel::Unrecognized(raw) => format!("\u{2022} {raw}"),
    }
}

pub fn contact_label(phone: Option<&str>, email: Option<&str>) -> String {
    [phone, email]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or(PLACEHOLDER_DASH)
        .to_string()
}

pub fn message_preview(message: Option<&str>) -> String {
    match message {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        }
        _ => PLACEHOLDER_DASH.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub campaign_id: CampaignId,
    pub campaign_name: Option<String>,
    pub stats: StatsView,
    pub launch: LaunchGate,
    pub rows: Vec<RowView>,
}

impl DashboardView {
    pub fn project(campaign_id: CampaignId, detail: &CampaignDetail) -> Self {
        let stage = CampaignStage::from_wire(detail.campaign.status.as_deref());
        Self {
            campaign_id,
            campaign_name: detail.campaign.name.clone(),
            stats: StatsView::project(detail.stats.as_ref()),
            launch: LaunchGate::for_stage(campaign_id, &stage),
            rows: detail
                .rows
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(RowView::project)
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardController {
    view: Option<DashboardView>,
    refreshes_in_flight: usize,
}

impl DashboardController {
    pub fn refresh(&mut self, campaign_id: Option<CampaignId>) -> Option<BackendCommand> {
        let campaign_id = campaign_id?;
        self.refreshes_in_flight += 1;
        Some(BackendCommand::RefreshDashboard { campaign_id })
    }

    /// Applied as current even if another campaign was selected in the meantime.
    pub fn apply_loaded(&mut self, campaign_id: CampaignId, detail: &CampaignDetail) {
        self.finish_refresh();
        self.view = Some(DashboardView::project(campaign_id, detail));
    }

    /// A failed refresh leaves the previous content on screen.
    pub fn apply_failed(&mut self) {
        self.finish_refresh();
    }

    fn finish_refresh(&mut self) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshes_in_flight > 0
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.is_refreshing() {
            REFRESHING_LABEL
        } else {
            REFRESH_LABEL
        }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn launch_gate(&self) -> Option<LaunchGate> {
        self.view.as_ref().map(|view| view.launch)
    }

    pub(crate) fn mark_launching(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.launch = LaunchGate::Launching;
        }
    }

    /// Re-enables the launch control of a launch that was never sent.
    pub(crate) fn restore_launch(&mut self, campaign_id: CampaignId) {
        if let Some(view) = self.view.as_mut() {
            if view.campaign_id == campaign_id && view.launch == LaunchGate::Launching {
                view.launch = LaunchGate::Launchable(campaign_id);
            }
        }
    }
}
