use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CampaignId);
id_newtype!(RowId);

/// Lifecycle stage reported by the campaign service.
///
/// Only `draft` and `completed` are launchable. Every other value, including
/// values this client has never seen, is treated as in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStage {
    Draft,
    Running,
    Completed,
    Other(String),
}

impl CampaignStage {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("draft") => Self::Draft,
            Some("running") => Self::Running,
            Some("completed") => Self::Completed,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }

    pub fn is_launchable(&self) -> bool {
        matches!(self, Self::Draft | Self::Completed)
    }
}

/// Delivery channel of a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Email,
    Whatsapp,
    Unrecognized(String),
}

impl Channel {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("email") => Self::Email,
            Some("whatsapp") => Self::Whatsapp,
            Some(other) => Self::Unrecognized(other.to_string()),
            None => Self::Unrecognized(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
        }
    }
}
