//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// A command that could not be queued, handed back with the status line to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub command: BackendCommand,
    pub message: String,
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchFailure> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(command)) => {
            tracing::warn!(command = cmd_name, "ui command queue is full");
            Err(DispatchFailure {
                command,
                message: "UI command queue is full; please retry".to_string(),
            })
        }
        Err(TrySendError::Disconnected(command)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(DispatchFailure {
                command,
                message:
                    "Backend command processor disconnected (possible startup/runtime failure); restart the console"
                        .to_string(),
            })
        }
    }
}
