//! Active AI model, as reported and switched through the service settings.

use shared::protocol::ModelSettings;

use crate::{backend_bridge::commands::BackendCommand, controller::notifier::NotificationKind};

pub const MODELS_LOADING_LABEL: &str = "Loading models...";
pub const MODELS_UNAVAILABLE_LABEL: &str = "Cannot load models";

#[derive(Debug, Default)]
pub struct ModelSelector {
    current: Option<String>,
    available: Vec<String>,
    loading: bool,
    load_failed: bool,
    switching_to: Option<String>,
}

impl ModelSelector {
    pub fn load(&mut self) -> Option<BackendCommand> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(BackendCommand::LoadModels)
    }

    pub fn apply_loaded(&mut self, settings: ModelSettings) {
        self.loading = false;
        self.load_failed = false;
        self.current = Some(settings.current_model);
        self.available = settings.available_models;
    }

    /// The previous model list, if any, stays selectable.
    pub fn apply_load_failed(&mut self) {
        self.loading = false;
        self.load_failed = true;
    }

    /// Ignored while a switch is in flight, for the active model, and for
    /// models the service did not offer.
    pub fn select(&mut self, model: &str) -> Option<BackendCommand> {
        if self.switching_to.is_some()
            || self.current.as_deref() == Some(model)
            || !self.available.iter().any(|offered| offered == model)
        {
            return None;
        }
        self.switching_to = Some(model.to_string());
        Some(BackendCommand::SelectModel {
            model: model.to_string(),
        })
    }

    pub fn finish_select(&mut self, outcome: Result<String, String>) -> (String, NotificationKind) {
        self.switching_to = None;
        match outcome {
            Ok(model) => {
                let message = format!("Model set to {model}");
                self.current = Some(model);
                (message, NotificationKind::Success)
            }
            Err(message) => (message, NotificationKind::Error),
        }
    }

    pub(crate) fn cancel_select(&mut self) {
        self.switching_to = None;
    }

    pub(crate) fn cancel_load(&mut self) {
        self.apply_load_failed();
    }

    pub fn is_switching(&self) -> bool {
        self.switching_to.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_retry(&self) -> bool {
        self.load_failed && !self.loading
    }

    pub fn enabled(&self) -> bool {
        !self.is_switching() && !self.available.is_empty()
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Text for the closed selector: the pending model while switching.
    pub fn selected_label(&self) -> &str {
        if let Some(model) = self.switching_to.as_deref().or(self.current.as_deref()) {
            return model;
        }
        if self.load_failed {
            MODELS_UNAVAILABLE_LABEL
        } else {
            MODELS_LOADING_LABEL
        }
    }
}
