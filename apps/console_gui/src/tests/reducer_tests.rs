use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use client_core::HealthProbe;
use crossbeam_channel::bounded;
use shared::protocol::{
    CampaignDetail, CampaignHeader, CampaignStats, CampaignSummary, CreatedCampaign,
    ManualReplyResult, ModelSettings, ReviewRow, RowRecord,
};

use super::*;
use crate::{
    controller::{
        creator::{CREATE_LABEL, CREATING_LABEL},
        dashboard::{LaunchGate, PLACEHOLDER_DASH, REFRESH_LABEL},
        events::CreateFailure,
        file_stager::FILE_PROMPT,
        health::Connectivity,
        manual_reply::{PROCESS_LABEL, REPLY_PROCESSED_MESSAGE, REPLY_REQUIRED_MESSAGE},
        orchestration::dispatch_backend_command,
        registry::SELECT_PLACEHOLDER,
    },
    preferences::PreferenceError,
};

#[derive(Clone, Default)]
struct SharedMemoryStore(Arc<Mutex<HashMap<String, String>>>);

impl PreferenceStore for SharedMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.0.lock().expect("store lock").get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.0
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn controller() -> ConsoleController {
    ConsoleController::new(
        ControllerSettings::default(),
        Box::new(SharedMemoryStore::default()),
    )
}

fn fall_promo() -> CampaignSummary {
    CampaignSummary {
        id: CampaignId(1),
        name: "Fall Promo".to_string(),
        status: Some("draft".to_string()),
        created_at: None,
    }
}

fn draft_detail() -> CampaignDetail {
    CampaignDetail {
        campaign: CampaignHeader {
            id: Some(CampaignId(1)),
            name: Some("Fall Promo".to_string()),
            status: Some("draft".to_string()),
        },
        stats: Some(CampaignStats {
            total: Some(10),
            pending: Some(10),
            sent: Some(0),
            replied: Some(0),
            review: Some(0),
        }),
        rows: Some(vec![RowRecord {
            row_index: 0,
            channel: Some("email".to_string()),
            contact_email: Some("a@b.com".to_string()),
            message_status: Some("pending".to_string()),
            outbound_message: None,
            ..RowRecord::default()
        }]),
    }
}

fn staged(controller: &mut ConsoleController) {
    controller.stager.set_file(Some(StagedFile {
        path: PathBuf::from("/data/leads.csv"),
        name: "leads.csv".to_string(),
        size_bytes: 1536,
    }));
}

#[test]
fn startup_probes_health_once_and_loads_campaigns() {
    let mut controller = controller();
    controller.startup();
    assert_eq!(
        controller.take_commands(),
        vec![
            BackendCommand::CheckHealth,
            BackendCommand::LoadCampaigns,
            BackendCommand::LoadModels
        ]
    );
    assert_eq!(controller.health().indicator(), Connectivity::Checking);

    controller.startup();
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);

    let now = Instant::now();
    controller.handle_event(UiEvent::HealthChecked(HealthProbe::Error(503)), now);
    assert_eq!(controller.health().indicator(), Connectivity::Error);
    assert_eq!(controller.health().indicator().label(), "Backend Error");
}

#[test]
fn fall_promo_dashboard_scenario() {
    let mut controller = controller();
    let now = Instant::now();
    controller.startup();
    controller.take_commands();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);

    controller.navigate(Page::Dashboard);
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);

    controller.select_dashboard(CampaignId(1));
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::RefreshDashboard {
            campaign_id: CampaignId(1)
        }]
    );
    assert!(controller.dashboard().is_refreshing());

    controller.handle_event(
        UiEvent::DashboardLoaded {
            campaign_id: CampaignId(1),
            detail: draft_detail(),
        },
        now,
    );

    let view = controller.dashboard().view().expect("dashboard view");
    assert_eq!(view.stats.total, 10);
    assert_eq!(view.stats.pending, 10);
    assert!(view.launch.enabled());
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].contact, "a@b.com");
    assert_eq!(view.rows[0].preview, PLACEHOLDER_DASH);
    assert!(!controller.dashboard().is_refreshing());
}

#[test]
fn launch_then_settled_refreshes_once() {
    let mut controller = controller();
    let now = Instant::now();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.select_dashboard(CampaignId(1));
    controller.handle_event(
        UiEvent::DashboardLoaded {
            campaign_id: CampaignId(1),
            detail: draft_detail(),
        },
        now,
    );
    controller.take_commands();

    controller.launch();
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::LaunchCampaign {
            campaign_id: CampaignId(1),
            refresh_after: DEFAULT_LAUNCH_REFRESH_DELAY,
        }]
    );
    assert_eq!(controller.dashboard().launch_gate(), Some(LaunchGate::Launching));

    controller.launch();
    assert!(controller.take_commands().is_empty());

    controller.handle_event(
        UiEvent::LaunchSettled {
            campaign_id: CampaignId(1),
        },
        now,
    );
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::RefreshDashboard {
            campaign_id: CampaignId(1)
        }]
    );

    let mut running = draft_detail();
    running.campaign.status = Some("running".to_string());
    controller.handle_event(
        UiEvent::DashboardLoaded {
            campaign_id: CampaignId(1),
            detail: running,
        },
        now,
    );
    assert_eq!(controller.dashboard().launch_gate(), Some(LaunchGate::Running));
}

#[test]
fn launch_without_dashboard_content_does_nothing() {
    let mut controller = controller();
    controller.launch();
    assert!(controller.take_commands().is_empty());
}

#[test]
fn successful_creation_resets_form_and_reloads_registry_once() {
    let mut controller = controller();
    let now = Instant::now();
    controller.form_mut().name = "Fall Promo".to_string();
    controller.form_mut().master_prompt = "Introduce the fall lineup".to_string();
    staged(&mut controller);

    controller.submit_create();
    let commands = controller.take_commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], BackendCommand::CreateCampaign { .. }));
    assert_eq!(controller.creator().button_label(), CREATING_LABEL);

    controller.submit_create();
    assert!(controller.take_commands().is_empty());

    controller.handle_event(
        UiEvent::CampaignCreated(CreatedCampaign {
            id: Some(CampaignId(2)),
            name: Some("Fall Promo".to_string()),
            status: Some("draft".to_string()),
        }),
        now,
    );

    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);
    let notification = controller.notifier().visible().expect("notification");
    assert_eq!(notification.message, "Campaign \"Fall Promo\" successfully created!");
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(controller.stager().current_file().is_none());
    assert_eq!(controller.stager().description(), FILE_PROMPT);
    assert!(controller.creator().form.name.is_empty());
    assert!(controller.creator().form.master_prompt.is_empty());
    assert!(controller.creator().button_enabled());
}

#[test]
fn failed_creation_keeps_inputs_and_shows_detail() {
    let mut controller = controller();
    let now = Instant::now();
    controller.form_mut().name = "Fall Promo".to_string();
    staged(&mut controller);
    controller.submit_create();
    controller.take_commands();

    controller.handle_event(
        UiEvent::CampaignCreateFailed(CreateFailure::Rejected {
            detail: Some("Unsupported file type. Use CSV or XLSX.".to_string()),
        }),
        now,
    );

    assert!(controller.take_commands().is_empty());
    let notification = controller.notifier().visible().expect("notification");
    assert_eq!(notification.message, "Unsupported file type. Use CSV or XLSX.");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(controller.creator().button_label(), CREATE_LABEL);
    assert!(controller.creator().button_enabled());
    assert_eq!(controller.creator().form.name, "Fall Promo");
    assert!(controller.stager().current_file().is_some());
}

#[test]
fn submit_without_file_is_silent() {
    let mut controller = controller();
    controller.form_mut().name = "Fall Promo".to_string();
    controller.submit_create();
    assert!(controller.take_commands().is_empty());
    assert!(controller.notifier().visible().is_none());
}

#[test]
fn staging_a_missing_path_keeps_previous_file() {
    let mut controller = controller();
    let now = Instant::now();
    staged(&mut controller);
    controller.stage_path(std::path::Path::new("/definitely/not/here.csv"), now);
    assert_eq!(
        controller.stager().current_file().map(|file| file.name.as_str()),
        Some("leads.csv")
    );
    let notification = controller.notifier().visible().expect("notification");
    assert!(notification
        .message
        .starts_with("Could not read the selected file"));
}

#[test]
fn notifications_expire_after_ttl_and_restart_on_replace() {
    let mut controller = ConsoleController::new(
        ControllerSettings {
            notification_ttl: Duration::from_secs(5),
            ..ControllerSettings::default()
        },
        Box::new(SharedMemoryStore::default()),
    );
    let start = Instant::now();
    controller.handle_event(UiEvent::CampaignCreateFailed(CreateFailure::Unreachable), start);
    controller.handle_event(
        UiEvent::CampaignCreateFailed(CreateFailure::Rejected { detail: None }),
        start + Duration::from_secs(3),
    );

    assert!(!controller.tick(start + Duration::from_secs(6)));
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some("Failed to create campaign.")
    );
    assert!(controller.tick(start + Duration::from_secs(8)));
    assert!(controller.notifier().visible().is_none());
}

#[test]
fn navigation_reloads_only_for_campaign_pages() {
    let mut controller = controller();
    controller.navigate(Page::Create);
    assert!(controller.take_commands().is_empty());
    controller.navigate(Page::Review);
    assert_eq!(controller.page(), Page::Review);
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);
    controller.navigate(Page::Reply);
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);
}

#[test]
fn registry_reload_resets_both_selections() {
    let mut controller = controller();
    let now = Instant::now();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.select_dashboard(CampaignId(1));
    controller.select_review(CampaignId(1));

    controller.navigate(Page::Dashboard);
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    for target in [SelectionTarget::Dashboard, SelectionTarget::Review] {
        let control = controller.registry().control(target);
        assert_eq!(control.selected(), None);
        assert_eq!(control.selected_label(), SELECT_PLACEHOLDER);
    }
}

#[test]
fn theme_toggle_persists_across_restart() {
    let store = SharedMemoryStore::default();
    let mut controller =
        ConsoleController::new(ControllerSettings::default(), Box::new(store.clone()));
    assert_eq!(controller.theme(), ThemePreference::Light);

    controller.toggle_theme();
    assert_eq!(controller.theme(), ThemePreference::Dark);

    let restarted = ConsoleController::new(ControllerSettings::default(), Box::new(store));
    assert_eq!(restarted.theme(), ThemePreference::Dark);
}

#[test]
fn review_decision_notifies_and_reloads_queue() {
    let mut controller = controller();
    let now = Instant::now();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.select_review(CampaignId(1));
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::LoadReviewQueue {
            campaign_id: CampaignId(1)
        }]
    );
    controller.handle_event(
        UiEvent::ReviewQueueLoaded {
            campaign_id: CampaignId(1),
            rows: vec![ReviewRow {
                id: RowId(5),
                row_index: 4,
                channel: Some("whatsapp".to_string()),
                contact_phone: Some("+15550100".to_string()),
                contact_email: None,
                outbound_message: Some("Hi".to_string()),
                reply_text: Some("Wrong number".to_string()),
                confidence: Some(0.3),
                suggested_update: None,
                row_data: None,
            }],
        },
        now,
    );
    assert_eq!(controller.review().rows().map(<[_]>::len), Some(1));

    controller.decide_review(RowId(5), ReviewAction::Approve);
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::DecideReview {
            campaign_id: CampaignId(1),
            row_id: RowId(5),
            action: ReviewAction::Approve,
        }]
    );

    controller.handle_event(
        UiEvent::ReviewDecided {
            campaign_id: CampaignId(1),
            row_id: RowId(5),
            action: ReviewAction::Approve,
        },
        now,
    );
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some("Row 5 approved.")
    );
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::LoadReviewQueue {
            campaign_id: CampaignId(1)
        }]
    );
}

#[test]
fn backend_errors_and_queue_failures_populate_status_banner() {
    let mut controller = controller();
    controller.handle_event(
        UiEvent::Error(UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime: connection refused",
        )),
        Instant::now(),
    );
    let banner = controller.status_banner().expect("banner");
    assert_eq!(banner.severity, StatusBannerSeverity::Error);
    assert!(banner.message.starts_with("Transport error:"));

    controller.dismiss_status_banner();
    assert!(controller.status_banner().is_none());

    let (tx, rx) = bounded(1);
    drop(rx);
    let failure = dispatch_backend_command(&tx, BackendCommand::LoadCampaigns)
        .expect_err("disconnected queue");
    controller.record_dispatch_failure(failure);
    let banner = controller.status_banner().expect("dispatch banner");
    assert_eq!(banner.severity, StatusBannerSeverity::Error);
    assert!(banner
        .message
        .starts_with("Transport error: Backend command processor disconnected"));
}

#[test]
fn undelivered_commands_release_busy_controls() {
    let mut controller = controller();
    let now = Instant::now();
    controller.startup();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.select_dashboard(CampaignId(1));
    controller.handle_event(
        UiEvent::DashboardLoaded {
            campaign_id: CampaignId(1),
            detail: draft_detail(),
        },
        now,
    );
    controller.handle_event(
        UiEvent::ModelsLoaded(ModelSettings {
            current_model: "gemini-2.0-flash".to_string(),
            available_models: vec!["gemini-2.0-flash".to_string(), "gemini-2.5-pro".to_string()],
        }),
        now,
    );
    controller.take_commands();

    staged(&mut controller);
    controller.submit_create();
    controller.refresh_dashboard();
    controller.launch();
    controller.select_model("gemini-2.5-pro");
    controller.select_review(CampaignId(1));
    controller.decide_review(RowId(5), ReviewAction::Reject);
    controller.select_reply(CampaignId(1));
    assert!(!controller.creator().button_enabled());
    assert!(controller.dashboard().is_refreshing());
    assert_eq!(controller.dashboard().launch_gate(), Some(LaunchGate::Launching));
    assert!(controller.models().is_switching());
    assert!(controller.review().is_loading());
    assert!(controller.review().is_deciding(RowId(5)));
    assert!(controller.reply().is_loading());

    let (tx, rx) = bounded(1);
    drop(rx);
    for cmd in controller.take_commands() {
        let failure = dispatch_backend_command(&tx, cmd).expect_err("disconnected queue");
        controller.record_dispatch_failure(failure);
    }

    assert!(controller.creator().button_enabled());
    assert_eq!(controller.creator().button_label(), CREATE_LABEL);
    assert!(!controller.dashboard().is_refreshing());
    assert_eq!(controller.dashboard().refresh_label(), REFRESH_LABEL);
    assert_eq!(
        controller.dashboard().launch_gate(),
        Some(LaunchGate::Launchable(CampaignId(1)))
    );
    assert!(!controller.models().is_switching());
    assert_eq!(controller.models().selected_label(), "gemini-2.0-flash");
    assert!(!controller.review().is_deciding(RowId(5)));
    assert!(!controller.review().is_loading());
    assert!(!controller.reply().is_loading());
    assert!(controller.status_banner().is_some());
}

#[test]
fn undelivered_startup_requests_settle_indicators() {
    let mut controller = controller();
    controller.startup();
    let (tx, rx) = bounded(1);
    drop(rx);
    for cmd in controller.take_commands() {
        let failure = dispatch_backend_command(&tx, cmd).expect_err("disconnected queue");
        controller.record_dispatch_failure(failure);
    }
    assert_eq!(controller.health().indicator(), Connectivity::Offline);
    assert!(!controller.registry().is_loading());
    assert!(controller.models().can_retry());

    controller.reload_models();
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadModels]);
}

#[test]
fn creation_without_reported_name_still_succeeds() {
    let mut controller = controller();
    let now = Instant::now();
    controller.form_mut().name = "Winter".to_string();
    staged(&mut controller);
    controller.submit_create();
    controller.take_commands();

    controller.handle_event(
        UiEvent::CampaignCreated(CreatedCampaign {
            id: Some(CampaignId(3)),
            name: None,
            status: None,
        }),
        now,
    );
    assert_eq!(controller.take_commands(), vec![BackendCommand::LoadCampaigns]);
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some("Campaign \"Winter\" successfully created!")
    );
    assert!(controller.stager().current_file().is_none());
}

#[test]
fn model_switch_notifies_outcome() {
    let mut controller = controller();
    let now = Instant::now();
    controller.startup();
    controller.take_commands();
    controller.handle_event(
        UiEvent::ModelsLoaded(ModelSettings {
            current_model: "gemini-2.0-flash".to_string(),
            available_models: vec!["gemini-2.0-flash".to_string(), "gemini-2.5-pro".to_string()],
        }),
        now,
    );

    controller.select_model("gemini-2.5-pro");
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::SelectModel {
            model: "gemini-2.5-pro".to_string()
        }]
    );
    controller.handle_event(
        UiEvent::ModelSelectFailed {
            message: "Model 'gemini-2.5-pro' is not available".to_string(),
        },
        now,
    );
    let notification = controller.notifier().visible().expect("notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(controller.models().current(), Some("gemini-2.0-flash"));

    controller.select_model("gemini-2.5-pro");
    controller.handle_event(
        UiEvent::ModelSelected {
            model: "gemini-2.5-pro".to_string(),
        },
        now,
    );
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some("Model set to gemini-2.5-pro")
    );
    assert_eq!(controller.models().current(), Some("gemini-2.5-pro"));
}

#[test]
fn manual_reply_flow() {
    let mut controller = controller();
    let now = Instant::now();
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.navigate(Page::Reply);
    controller.handle_event(UiEvent::CampaignsLoaded(vec![fall_promo()]), now);
    controller.take_commands();

    controller.select_reply(CampaignId(1));
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::LoadReplyCandidates {
            campaign_id: CampaignId(1)
        }]
    );
    let mut detail = draft_detail();
    detail.rows = Some(vec![RowRecord {
        id: Some(RowId(21)),
        row_index: 0,
        contact_email: Some("a@b.com".to_string()),
        message_status: Some("sent".to_string()),
        outbound_message: Some("Hi Ada".to_string()),
        ..RowRecord::default()
    }]);
    controller.handle_event(
        UiEvent::ReplyCandidatesLoaded {
            campaign_id: CampaignId(1),
            detail,
        },
        now,
    );
    assert_eq!(
        controller.reply().selected().map(|c| c.row_id),
        Some(RowId(21))
    );

    controller.submit_manual_reply(now);
    assert!(controller.take_commands().is_empty());
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some(REPLY_REQUIRED_MESSAGE)
    );

    *controller.reply_text_mut() = "Unsubscribe me".to_string();
    controller.submit_manual_reply(now);
    assert_eq!(
        controller.take_commands(),
        vec![BackendCommand::SubmitManualReply {
            row_id: RowId(21),
            reply_text: "Unsubscribe me".to_string(),
        }]
    );
    assert!(!controller.reply().button_enabled());

    controller.handle_event(
        UiEvent::ManualReplyProcessed(ManualReplyResult {
            intent: Some("opt_out".to_string()),
            confidence: Some(0.95),
            needs_review: false,
            ..ManualReplyResult::default()
        }),
        now,
    );
    assert_eq!(
        controller.notifier().visible().map(|n| n.message.as_str()),
        Some(REPLY_PROCESSED_MESSAGE)
    );
    assert_eq!(controller.reply().button_label(), PROCESS_LABEL);
    let outcome = controller.reply().outcome().expect("outcome");
    assert_eq!(outcome.intent, "opt_out");
    assert_eq!(outcome.confidence, "0.95");
}
