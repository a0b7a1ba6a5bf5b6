use alloy::primitives::Address;
use thiserror::Error;

use crate::ports::PortError;
use crate::state_machine::ConnectionStatus;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("connector not found: {0}")]
    ConnectorNotFound(String),
    #[error("connector already connected: {0}")]
    ConnectorAlreadyConnected(String),
    #[error("connector not connected: {0}")]
    ConnectorNotConnected(String),
    #[error("chain not configured: {0}")]
    ChainNotConfigured(u64),
    #[error("no transport configured for chain {0}")]
    TransportNotConfigured(u64),
    #[error("account {account} not found on connector {connector}")]
    AccountNotFound { account: Address, connector: String },
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ConnectionStatus,
        to: ConnectionStatus,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("state lock poisoned: {0}")]
    StateLock(String),
    #[error(transparent)]
    Port(#[from] PortError),
}
