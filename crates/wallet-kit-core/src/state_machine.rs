use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: ConnectionStatus,
    pub to: ConnectionStatus,
    pub reason: &'static str,
}

pub fn is_allowed(from: ConnectionStatus, to: ConnectionStatus) -> bool {
    use ConnectionStatus::*;
    matches!(
        (from, to),
        (Disconnected, Connecting)
            | (Disconnected, Reconnecting)
            | (Connecting, Connected)
            | (Connecting, Disconnected)
            | (Reconnecting, Connected)
            | (Reconnecting, Disconnected)
            | (Connected, Connected)
            | (Connected, Disconnected)
    )
}

pub fn transition(
    from: ConnectionStatus,
    to: ConnectionStatus,
    reason: &'static str,
) -> Result<StatusTransition, ActionError> {
    if !is_allowed(from, to) {
        return Err(ActionError::InvalidTransition { from, to });
    }
    Ok(StatusTransition { from, to, reason })
}
