//! Known campaigns and the selection controls fed from them.

use shared::{domain::CampaignId, protocol::CampaignSummary};

use crate::backend_bridge::commands::BackendCommand;

pub const SELECT_PLACEHOLDER: &str = "Select a campaign...";
pub const NO_CAMPAIGNS_PLACEHOLDER: &str = "No campaigns available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Option<CampaignId>,
    pub label: String,
    pub enabled: bool,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: None,
            label: label.to_string(),
            enabled: false,
        }
    }
}

/// Option set for one selection control, rebuilt from scratch on every reload.
pub fn campaign_options(campaigns: &[CampaignSummary]) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(campaigns.len() + 1);
    options.push(SelectOption::placeholder(SELECT_PLACEHOLDER));
    if campaigns.is_empty() {
        options.push(SelectOption::placeholder(NO_CAMPAIGNS_PLACEHOLDER));
    } else {
        options.extend(campaigns.iter().map(|campaign| SelectOption {
            value: Some(campaign.id),
            label: format!("{} (ID: {})", campaign.name, campaign.id),
            enabled: true,
        }));
    }
    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    Dashboard,
    Review,
    Reply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionControl {
    options: Vec<SelectOption>,
    selected: Option<CampaignId>,
}

impl SelectionControl {
    fn new() -> Self {
        Self {
            options: vec![SelectOption::placeholder(SELECT_PLACEHOLDER)],
            selected: None,
        }
    }

    fn rebuild(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.selected = None;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<CampaignId> {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.value.is_some() && option.value == self.selected)
            .map(|option| option.label.as_str())
            .unwrap_or(SELECT_PLACEHOLDER)
    }

    /// Accepts only ids that are present as enabled options.
    fn select(&mut self, campaign_id: CampaignId) -> bool {
        let known = self
            .options
            .iter()
            .any(|option| option.enabled && option.value == Some(campaign_id));
        if known {
            self.selected = Some(campaign_id);
        }
        known
    }
}

#[derive(Debug)]
pub struct CampaignRegistry {
    dashboard: SelectionControl,
    review: SelectionControl,
    reply: SelectionControl,
    reloads_in_flight: usize,
}

impl CampaignRegistry {
    pub fn new() -> Self {
        Self {
            dashboard: SelectionControl::new(),
            review: SelectionControl::new(),
            reply: SelectionControl::new(),
            reloads_in_flight: 0,
        }
    }

    pub fn reload(&mut self) -> BackendCommand {
        self.reloads_in_flight += 1;
        BackendCommand::LoadCampaigns
    }

    /// Full replacement of every control; the latest response to arrive wins.
    pub fn apply(&mut self, campaigns: &[CampaignSummary]) {
        self.reloads_in_flight = self.reloads_in_flight.saturating_sub(1);
        let options = campaign_options(campaigns);
        self.dashboard.rebuild(options.clone());
        self.review.rebuild(options.clone());
        self.reply.rebuild(options);
    }

    /// Failed reloads leave the controls untouched.
    pub fn apply_failed(&mut self) {
        self.reloads_in_flight = self.reloads_in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.reloads_in_flight > 0
    }

    pub fn control(&self, target: SelectionTarget) -> &SelectionControl {
        match target {
            SelectionTarget::Dashboard => &self.dashboard,
            SelectionTarget::Review => &self.review,
            SelectionTarget::Reply => &self.reply,
        }
    }

    pub fn select(&mut self, target: SelectionTarget, campaign_id: CampaignId) -> bool {
        match target {
            SelectionTarget::Dashboard => self.dashboard.select(campaign_id),
            SelectionTarget::Review => self.review.select(campaign_id),
            SelectionTarget::Reply => self.reply.select(campaign_id),
        }
    }
}

impl Default for CampaignRegistry {
    fn default() -> Self {
        Self::new()
    }
}
