//! One-shot connectivity indicator for the campaign service.

use client_core::HealthProbe;

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Checking,
    Online,
    Error,
    Offline,
}

impl Connectivity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking backend...",
            Self::Online => "Backend Connected",
            Self::Error => "Backend Error",
            Self::Offline => "Backend Offline",
        }
    }
}

impl From<HealthProbe> for Connectivity {
    fn from(probe: HealthProbe) -> Self {
        match probe {
            HealthProbe::Online => Self::Online,
            HealthProbe::Error(_) => Self::Error,
            HealthProbe::Offline => Self::Offline,
        }
    }
}

#[derive(Debug)]
pub struct HealthMonitor {
    indicator: Connectivity,
    probe_issued: bool,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self {
            indicator: Connectivity::Checking,
            probe_issued: false,
        }
    }

    /// The probe runs once per process; later calls are no-ops.
    pub fn start(&mut self) -> Option<BackendCommand> {
        if self.probe_issued {
            return None;
        }
        self.probe_issued = true;
        Some(BackendCommand::CheckHealth)
    }

    pub fn apply(&mut self, probe: HealthProbe) {
        self.indicator = probe.into();
    }

    /// The probe could not be handed to the backend, so no answer will come.
    pub(crate) fn abandon(&mut self) {
        if self.indicator == Connectivity::Checking {
            self.indicator = Connectivity::Offline;
        }
    }

    pub fn indicator(&self) -> Connectivity {
        self.indicator
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_issued_once() {
        let mut monitor = HealthMonitor::new();
        assert!(matches!(monitor.start(), Some(BackendCommand::CheckHealth)));
        assert!(monitor.start().is_none());
    }

    #[test]
    fn outcomes_map_to_disjoint_states() {
        let mut monitor = HealthMonitor::new();
        assert_eq!(monitor.indicator(), Connectivity::Checking);

        monitor.apply(HealthProbe::Online);
        assert_eq!(monitor.indicator().label(), "Backend Connected");
        monitor.apply(HealthProbe::Error(500));
        assert_eq!(monitor.indicator().label(), "Backend Error");
        monitor.apply(HealthProbe::Offline);
        assert_eq!(monitor.indicator().label(), "Backend Offline");
    }
}
