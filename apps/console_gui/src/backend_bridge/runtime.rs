//! Runtime bridge between UI command queue and the remote campaign service.
//!
//! Every command runs as its own task and reports back with at most one
//! [`UiEvent`].

use std::{sync::Arc, thread};

use client_core::{CampaignDraft, CampaignService, ClientError, HttpCampaignClient, UploadFile};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    config::ConsoleConfig,
    controller::{
        creator::CONNECTION_FAILED_MESSAGE,
        events::{CreateFailure, UiError, UiErrorContext, UiEvent},
    },
};

const REVIEW_FAILED_MESSAGE: &str = "Failed to record review decision.";
const MODEL_SWITCH_FAILED_MESSAGE: &str = "Failed to switch model.";
const REPLY_FAILED_MESSAGE: &str = "Failed to process reply.";

#[derive(Clone)]
pub struct BackendContext {
    service: Arc<dyn CampaignService>,
    user_email: String,
}

impl BackendContext {
    pub fn new(service: Arc<dyn CampaignService>, user_email: impl Into<String>) -> Self {
        Self {
            service,
            user_email: user_email.into(),
        }
    }
}

pub async fn run_command(ctx: &BackendContext, cmd: BackendCommand) -> Option<UiEvent> {
    match cmd {
        BackendCommand::CheckHealth => Some(UiEvent::HealthChecked(ctx.service.probe_health().await)),
        BackendCommand::LoadCampaigns => match ctx.service.list_campaigns().await {
            Ok(campaigns) => Some(UiEvent::CampaignsLoaded(campaigns)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load campaigns");
                Some(UiEvent::CampaignsLoadFailed)
            }
        },
        BackendCommand::CreateCampaign {
            name,
            master_prompt,
            file_path,
        } => {
            let outcome = async {
                let file = UploadFile::read(&file_path).await?;
                ctx.service
                    .create_campaign(CampaignDraft {
                        name,
                        master_prompt,
                        user_email: ctx.user_email.clone(),
                        file,
                    })
                    .await
            }
            .await;
            match outcome {
                Ok(created) => {
                    tracing::info!(
                        campaign_id = ?created.id,
                        campaign = created.name.as_deref().unwrap_or_default(),
                        "campaign created"
                    );
                    Some(UiEvent::CampaignCreated(created))
                }
                Err(err) => {
                    tracing::warn!(error = %err, path = %file_path.display(), "campaign creation failed");
                    Some(UiEvent::CampaignCreateFailed(CreateFailure::from_client_error(
                        &err,
                    )))
                }
            }
        }
        BackendCommand::RefreshDashboard { campaign_id } => {
            match ctx.service.campaign_detail(campaign_id).await {
                Ok(detail) => Some(UiEvent::DashboardLoaded {
                    campaign_id,
                    detail,
                }),
                Err(err) => {
                    tracing::warn!(%campaign_id, error = %err, "failed to refresh dashboard");
                    Some(UiEvent::DashboardLoadFailed)
                }
            }
        }
        BackendCommand::LaunchCampaign {
            campaign_id,
            refresh_after,
        } => {
            if let Err(err) = ctx.service.launch_campaign(campaign_id).await {
                tracing::warn!(%campaign_id, error = %err, "failed to launch campaign");
            }
            tokio::time::sleep(refresh_after).await;
            Some(UiEvent::LaunchSettled { campaign_id })
        }
        BackendCommand::LoadReviewQueue { campaign_id } => {
            match ctx.service.review_queue(campaign_id).await {
                Ok(rows) => Some(UiEvent::ReviewQueueLoaded { campaign_id, rows }),
                Err(err) => {
                    tracing::warn!(%campaign_id, error = %err, "failed to load review queue");
                    Some(UiEvent::ReviewQueueLoadFailed)
                }
            }
        }
        BackendCommand::DecideReview {
            campaign_id,
            row_id,
            action,
        } => match ctx.service.review_row(campaign_id, row_id, action).await {
            Ok(()) => Some(UiEvent::ReviewDecided {
                campaign_id,
                row_id,
                action,
            }),
            Err(err) => {
                tracing::warn!(%campaign_id, %row_id, error = %err, "review decision failed");
                Some(UiEvent::ReviewDecisionFailed {
                    campaign_id,
                    row_id,
                    message: failure_message(&err, REVIEW_FAILED_MESSAGE),
                })
            }
        },
        BackendCommand::LoadModels => match ctx.service.model_settings().await {
            Ok(settings) => Some(UiEvent::ModelsLoaded(settings)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load model settings");
                Some(UiEvent::ModelsLoadFailed)
            }
        },
        BackendCommand::SelectModel { model } => match ctx.service.select_model(&model).await {
            Ok(active) => {
                tracing::info!(model = %active, "active model switched");
                Some(UiEvent::ModelSelected { model: active })
            }
            Err(err) => {
                tracing::warn!(%model, error = %err, "model switch failed");
                Some(UiEvent::ModelSelectFailed {
                    message: failure_message(&err, MODEL_SWITCH_FAILED_MESSAGE),
                })
            }
        },
        BackendCommand::LoadReplyCandidates { campaign_id } => {
            match ctx.service.campaign_detail(campaign_id).await {
                Ok(detail) => Some(UiEvent::ReplyCandidatesLoaded {
                    campaign_id,
                    detail,
                }),
                Err(err) => {
                    tracing::warn!(%campaign_id, error = %err, "failed to load reply candidates");
                    Some(UiEvent::ReplyCandidatesLoadFailed)
                }
            }
        }
        BackendCommand::SubmitManualReply { row_id, reply_text } => {
            match ctx.service.submit_manual_reply(row_id, &reply_text).await {
                Ok(result) => {
                    tracing::info!(
                        %row_id,
                        intent = result.intent.as_deref().unwrap_or_default(),
                        needs_review = result.needs_review,
                        "manual reply processed"
                    );
                    Some(UiEvent::ManualReplyProcessed(result))
                }
                Err(err) => {
                    tracing::warn!(%row_id, error = %err, "manual reply failed");
                    Some(UiEvent::ManualReplyFailed {
                        message: failure_message(&err, REPLY_FAILED_MESSAGE),
                    })
                }
            }
        }
    }
}

/// Message for a user-initiated request: connectivity first, then the
/// service's own detail, then `fallback`.
fn failure_message(err: &ClientError, fallback: &str) -> String {
    if err.is_transport() {
        return CONNECTION_FAILED_MESSAGE.to_string();
    }
    err.service_detail().unwrap_or(fallback).to_string()
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: ConsoleConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match HttpCampaignClient::with_timeout(
            config.api_base.clone(),
            config.request_timeout,
        ) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build http client: {err}"),
                )));
                tracing::error!("failed to build campaign service client: {err}");
                return;
            }
        };
        tracing::info!(api_base = %client.base_url(), "backend worker ready");
        let ctx = BackendContext::new(Arc::new(client), config.user_email);

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                execute(&ctx, cmd, &ui_tx);
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

fn execute(ctx: &BackendContext, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    let ctx = ctx.clone();
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        let name = cmd.name();
        if let Some(event) = run_command(&ctx, cmd).await {
            if ui_tx.try_send(event).is_err() {
                tracing::warn!(command = name, "dropping backend result; ui event queue unavailable");
            }
        }
    });
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
