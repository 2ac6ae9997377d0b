//! Launch command plus the single deferred dashboard check that follows it.

use std::time::Duration;

use shared::domain::CampaignId;

use crate::{backend_bridge::commands::BackendCommand, controller::dashboard::DashboardController};

pub const DEFAULT_LAUNCH_REFRESH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct LaunchCoordinator {
    refresh_delay: Duration,
}

impl LaunchCoordinator {
    pub fn new(refresh_delay: Duration) -> Self {
        Self { refresh_delay }
    }

    /// Only a launchable campaign currently on the dashboard can be launched.
    /// The control flips to "Launching..." before the service confirms anything.
    pub fn launch(
        &self,
        dashboard: &mut DashboardController,
        campaign_id: CampaignId,
    ) -> Option<BackendCommand> {
        let target = dashboard.launch_gate()?.target()?;
        if target != campaign_id {
            return None;
        }
        dashboard.mark_launching();
        Some(BackendCommand::LaunchCampaign {
            campaign_id,
            refresh_after: self.refresh_delay,
        })
    }

    /// The launch command never left the console; the control becomes usable again.
    pub fn abandon(&self, dashboard: &mut DashboardController, campaign_id: CampaignId) {
        dashboard.restore_launch(campaign_id);
    }

    /// The deferred check fired: refresh the campaign that was launched.
    pub fn settled(
        &self,
        dashboard: &mut DashboardController,
        campaign_id: CampaignId,
    ) -> Option<BackendCommand> {
        dashboard.refresh(Some(campaign_id))
    }
}

impl Default for LaunchCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_LAUNCH_REFRESH_DELAY)
    }
}
