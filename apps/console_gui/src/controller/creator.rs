//! Campaign creation form and its submit control.

use shared::protocol::CreatedCampaign;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::CreateFailure, file_stager::FileStager, notifier::NotificationKind},
};

pub const CREATE_LABEL: &str = "Create Campaign";
pub const CREATING_LABEL: &str = "Creating...";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create campaign.";
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection error. Ensure backend is running.";
pub const CREATED_MESSAGE: &str = "Campaign successfully created!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub name: String,
    pub master_prompt: String,
}

/// What the console must do once a submission finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub message: String,
    pub kind: NotificationKind,
    pub succeeded: bool,
}

#[derive(Debug, Default)]
pub struct CampaignCreator {
    pub form: CampaignForm,
    busy: bool,
}

impl CampaignCreator {
    pub fn button_enabled(&self) -> bool {
        !self.busy
    }

    pub fn button_label(&self) -> &'static str {
        if self.busy {
            CREATING_LABEL
        } else {
            CREATE_LABEL
        }
    }

    /// Without a staged file this is a silent no-op. While a submission is in
    /// flight the control is disabled and repeated clicks are ignored.
    pub fn submit(&mut self, stager: &FileStager) -> Option<BackendCommand> {
        if self.busy {
            return None;
        }
        let file = stager.current_file()?;
        self.busy = true;
        Some(BackendCommand::CreateCampaign {
            name: self.form.name.clone(),
            master_prompt: self.form.master_prompt.clone(),
            file_path: file.path.clone(),
        })
    }

    /// Restores the control for a submission that never reached the backend.
    pub(crate) fn cancel(&mut self) {
        self.busy = false;
    }

    /// Always restores the control, whatever the outcome.
    pub fn finish(&mut self, outcome: Result<CreatedCampaign, CreateFailure>) -> CreationReport {
        self.busy = false;
        match outcome {
            Ok(created) => {
                let form = std::mem::take(&mut self.form);
                let name = created
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .or_else(|| Some(form.name).filter(|name| !name.trim().is_empty()));
                CreationReport {
                    message: match name {
                        Some(name) => format!("Campaign \"{name}\" successfully created!"),
                        None => CREATED_MESSAGE.to_string(),
                    },
                    kind: NotificationKind::Success,
                    succeeded: true,
                }
            }
            Err(failure) => CreationReport {
                message: match failure {
                    CreateFailure::Rejected { detail: Some(detail) } => detail,
                    CreateFailure::Rejected { detail: None } => CREATE_FAILED_MESSAGE.to_string(),
                    CreateFailure::Unreachable => CONNECTION_FAILED_MESSAGE.to_string(),
                    CreateFailure::LocalFile(reason) => {
                        format!("Could not read the selected file: {reason}")
                    }
                },
                kind: NotificationKind::Error,
                succeeded: false,
            },
        }
    }
}
