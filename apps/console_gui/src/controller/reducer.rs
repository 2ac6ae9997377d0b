//! Console-wide state transitions.
//!
//! UI actions and backend events both land here. Each piece of visible state
//! has exactly one owning component; cross-component effects are explicit
//! calls made from this module. Backend work is queued in an outbox that the
//! app shell drains once per frame.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use shared::domain::{CampaignId, ReviewAction, RowId};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        creator::{CampaignCreator, CampaignForm},
        dashboard::DashboardController,
        events::{UiError, UiErrorContext, UiEvent},
        file_stager::{FileStager, StagedFile},
        health::HealthMonitor,
        launch::{LaunchCoordinator, DEFAULT_LAUNCH_REFRESH_DELAY},
        manual_reply::ManualReplyController,
        models::ModelSelector,
        notifier::{NotificationKind, Notifier, DEFAULT_NOTIFICATION_TTL},
        orchestration::DispatchFailure,
        registry::{CampaignRegistry, SelectionTarget},
        review::ReviewQueueController,
    },
    preferences::{PreferenceStore, ThemePreference},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Create,
    Dashboard,
    Review,
    Reply,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Create, Page::Dashboard, Page::Review, Page::Reply];

    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "Create Campaign",
            Self::Dashboard => "Dashboard",
            Self::Review => "Review Queue",
            Self::Reply => "Manual Reply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub notification_ttl: Duration,
    pub launch_refresh_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            launch_refresh_delay: DEFAULT_LAUNCH_REFRESH_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

pub struct ConsoleController {
    page: Page,
    health: HealthMonitor,
    notifier: Notifier,
    stager: FileStager,
    registry: CampaignRegistry,
    creator: CampaignCreator,
    dashboard: DashboardController,
    launcher: LaunchCoordinator,
    review: ReviewQueueController,
    models: ModelSelector,
    reply: ManualReplyController,
    theme: ThemePreference,
    preferences: Box<dyn PreferenceStore>,
    status_banner: Option<StatusBanner>,
    outbox: Vec<BackendCommand>,
}

impl ConsoleController {
    pub fn new(settings: ControllerSettings, preferences: Box<dyn PreferenceStore>) -> Self {
        let theme = ThemePreference::load(preferences.as_ref());
        Self {
            page: Page::default(),
            health: HealthMonitor::new(),
            notifier: Notifier::new(settings.notification_ttl),
            stager: FileStager::default(),
            registry: CampaignRegistry::new(),
            creator: CampaignCreator::default(),
            dashboard: DashboardController::default(),
            launcher: LaunchCoordinator::new(settings.launch_refresh_delay),
            review: ReviewQueueController::default(),
            models: ModelSelector::default(),
            reply: ManualReplyController::default(),
            theme,
            preferences,
            status_banner: None,
            outbox: Vec::new(),
        }
    }

    /// Issues the one-shot health probe, the initial campaign list load and
    /// the model settings load.
    pub fn startup(&mut self) {
        let cmd = self.health.start();
        self.push(cmd);
        let cmd = self.registry.reload();
        self.outbox.push(cmd);
        let cmd = self.models.load();
        self.push(cmd);
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        if matches!(page, Page::Dashboard | Page::Review | Page::Reply) {
            let cmd = self.registry.reload();
            self.outbox.push(cmd);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.store(self.preferences.as_mut()) {
            tracing::warn!(error = %err, "failed to persist theme preference");
        }
    }

    /// Stages a file picked by browse or drop. An unreadable path leaves the
    /// previous selection in place.
    pub fn stage_path(&mut self, path: &Path, now: Instant) {
        match StagedFile::from_path(path) {
            Ok(file) => self.stager.set_file(Some(file)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to stage file");
                self.notifier.show(
                    format!("Could not read the selected file: {err}"),
                    NotificationKind::Error,
                    now,
                );
            }
        }
    }

    pub fn clear_staged_file(&mut self) {
        self.stager.clear();
    }

    pub fn form_mut(&mut self) -> &mut CampaignForm {
        &mut self.creator.form
    }

    pub fn submit_create(&mut self) {
        if let Some(cmd) = self.creator.submit(&self.stager) {
            self.outbox.push(cmd);
        }
    }

    /// Choosing a dashboard campaign loads its detail straight away.
    pub fn select_dashboard(&mut self, campaign_id: CampaignId) {
        if self.registry.select(SelectionTarget::Dashboard, campaign_id) {
            let cmd = self.dashboard.refresh(Some(campaign_id));
            self.push(cmd);
        }
    }

    pub fn refresh_dashboard(&mut self) {
        let selected = self.registry.control(SelectionTarget::Dashboard).selected();
        let cmd = self.dashboard.refresh(selected);
        self.push(cmd);
    }

    /// Launches the campaign currently shown on the dashboard.
    pub fn launch(&mut self) {
        let Some(campaign_id) = self.dashboard.view().map(|view| view.campaign_id) else {
            return;
        };
        let cmd = self.launcher.launch(&mut self.dashboard, campaign_id);
        self.push(cmd);
    }

    pub fn select_review(&mut self, campaign_id: CampaignId) {
        if self.registry.select(SelectionTarget::Review, campaign_id) {
            let cmd = self.review.load(Some(campaign_id));
            self.push(cmd);
        }
    }

    pub fn refresh_review(&mut self) {
        let selected = self.registry.control(SelectionTarget::Review).selected();
        let cmd = self.review.load(selected);
        self.push(cmd);
    }

    pub fn decide_review(&mut self, row_id: RowId, action: ReviewAction) {
        let cmd = self.review.decide(row_id, action);
        self.push(cmd);
    }

    pub fn reload_models(&mut self) {
        let cmd = self.models.load();
        self.push(cmd);
    }

    pub fn select_model(&mut self, model: &str) {
        let cmd = self.models.select(model);
        self.push(cmd);
    }

    /// Choosing a reply campaign loads its sent rows straight away.
    pub fn select_reply(&mut self, campaign_id: CampaignId) {
        if self.registry.select(SelectionTarget::Reply, campaign_id) {
            let cmd = self.reply.load(Some(campaign_id));
            self.push(cmd);
        }
    }

    pub fn refresh_reply(&mut self) {
        let selected = self.registry.control(SelectionTarget::Reply).selected();
        let cmd = self.reply.load(selected);
        self.push(cmd);
    }

    pub fn select_reply_row(&mut self, row_id: RowId) {
        self.reply.select_row(row_id);
    }

    pub fn reply_text_mut(&mut self) -> &mut String {
        &mut self.reply.reply_text
    }

    pub fn submit_manual_reply(&mut self, now: Instant) {
        match self.reply.submit() {
            Ok(cmd) => self.push(cmd),
            Err(message) => self.notifier.show(message, NotificationKind::Error, now),
        }
    }

    pub fn handle_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Error(err) => self.report_error(&err),
            UiEvent::HealthChecked(probe) => self.health.apply(probe),
            UiEvent::CampaignsLoaded(campaigns) => self.registry.apply(&campaigns),
            UiEvent::CampaignsLoadFailed => self.registry.apply_failed(),
            UiEvent::CampaignCreated(created) => {
                let report = self.creator.finish(Ok(created));
                self.notifier.show(report.message, report.kind, now);
                if report.succeeded {
                    self.stager.clear();
                    let cmd = self.registry.reload();
                    self.outbox.push(cmd);
                }
            }
            UiEvent::CampaignCreateFailed(failure) => {
                let report = self.creator.finish(Err(failure));
                self.notifier.show(report.message, report.kind, now);
            }
            UiEvent::DashboardLoaded {
                campaign_id,
                detail,
            } => self.dashboard.apply_loaded(campaign_id, &detail),
            UiEvent::DashboardLoadFailed => self.dashboard.apply_failed(),
            UiEvent::LaunchSettled { campaign_id } => {
                let cmd = self.launcher.settled(&mut self.dashboard, campaign_id);
                self.push(cmd);
            }
            UiEvent::ReviewQueueLoaded { campaign_id, rows } => {
                self.review.apply_loaded(campaign_id, &rows)
            }
            UiEvent::ReviewQueueLoadFailed => self.review.apply_failed(),
            UiEvent::ReviewDecided {
                campaign_id,
                row_id,
                action,
            } => {
                self.notifier.show(
                    format!("Row {row_id} {}.", action.label()),
                    NotificationKind::Success,
                    now,
                );
                let cmd = self.review.finish_decision(campaign_id, row_id);
                self.push(cmd);
            }
            UiEvent::ReviewDecisionFailed {
                campaign_id,
                row_id,
                message,
            } => {
                self.notifier.show(message, NotificationKind::Error, now);
                let cmd = self.review.finish_decision(campaign_id, row_id);
                self.push(cmd);
            }
            UiEvent::ModelsLoaded(settings) => self.models.apply_loaded(settings),
            UiEvent::ModelsLoadFailed => self.models.apply_load_failed(),
            UiEvent::ModelSelected { model } => {
                let (message, kind) = self.models.finish_select(Ok(model));
                self.notifier.show(message, kind, now);
            }
            UiEvent::ModelSelectFailed { message } => {
                let (message, kind) = self.models.finish_select(Err(message));
                self.notifier.show(message, kind, now);
            }
            UiEvent::ReplyCandidatesLoaded {
                campaign_id,
                detail,
            } => self.reply.apply_loaded(campaign_id, &detail),
            UiEvent::ReplyCandidatesLoadFailed => self.reply.apply_failed(),
            UiEvent::ManualReplyProcessed(result) => {
                let (message, kind) = self.reply.finish(Ok(result));
                self.notifier.show(message, kind, now);
            }
            UiEvent::ManualReplyFailed { message } => {
                let (message, kind) = self.reply.finish(Err(message));
                self.notifier.show(message, kind, now);
            }
        }
    }

    fn report_error(&mut self, err: &UiError) {
        tracing::error!(context = ?err.context(), "{}", err.message());
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: format!("{} error: {}", err.label(), err.message()),
        });
    }

    /// Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.expire(now)
    }

    pub fn take_commands(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Surfaces a command that could not be handed to the backend worker and
    /// releases whatever busy state its issuer set up for it.
    pub fn record_dispatch_failure(&mut self, failure: DispatchFailure) {
        let DispatchFailure { command, message } = failure;
        match command {
            BackendCommand::CheckHealth => self.health.abandon(),
            BackendCommand::LoadCampaigns => self.registry.apply_failed(),
            BackendCommand::CreateCampaign { .. } => self.creator.cancel(),
            BackendCommand::RefreshDashboard { .. } => self.dashboard.apply_failed(),
            BackendCommand::LaunchCampaign { campaign_id, .. } => {
                self.launcher.abandon(&mut self.dashboard, campaign_id)
            }
            BackendCommand::LoadReviewQueue { .. } => self.review.apply_failed(),
            BackendCommand::DecideReview { row_id, .. } => self.review.abandon_decision(row_id),
            BackendCommand::LoadModels => self.models.cancel_load(),
            BackendCommand::SelectModel { .. } => self.models.cancel_select(),
            BackendCommand::LoadReplyCandidates { .. } => self.reply.apply_failed(),
            BackendCommand::SubmitManualReply { .. } => self.reply.cancel(),
        }
        self.report_error(&UiError::from_message(UiErrorContext::CommandQueue, message));
    }

    pub fn dismiss_status_banner(&mut self) {
        self.status_banner = None;
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    fn push(&mut self, cmd: Option<BackendCommand>) {
        if let Some(cmd) = cmd {
            self.outbox.push(cmd);
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn stager(&self) -> &FileStager {
        &self.stager
    }

    pub fn registry(&self) -> &CampaignRegistry {
        &self.registry
    }

    pub fn creator(&self) -> &CampaignCreator {
        &self.creator
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn review(&self) -> &ReviewQueueController {
        &self.review
    }

    pub fn models(&self) -> &ModelSelector {
        &self.models
    }

    pub fn reply(&self) -> &ManualReplyController {
        &self.reply
    }

    pub fn status_banner(&self) -> Option<&StatusBanner> {
        self.status_banner.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
