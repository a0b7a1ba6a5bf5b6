use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;

use crate::domain::ConnectorInfo;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectResult {
    pub accounts: Vec<Address>,
    pub chain_id: u64,
}

/// A wallet the config can connect to.
pub trait ConnectorPort: Send + Sync {
    fn info(&self) -> &ConnectorInfo;
    fn connect(&self, chain_id: Option<u64>) -> Result<ConnectResult, PortError>;
    fn disconnect(&self) -> Result<(), PortError>;
    fn accounts(&self) -> Result<Vec<Address>, PortError>;
    fn chain_id(&self) -> Result<u64, PortError>;
    /// Whether a silent reconnect would succeed without prompting the user.
    fn is_authorized(&self) -> Result<bool, PortError>;
    fn switch_chain(&self, chain_id: u64) -> Result<u64, PortError>;
    /// EIP-191 `personal_sign` over `message`.
    fn sign_message(&self, account: Address, message: &[u8]) -> Result<Bytes, PortError>;
    fn sign_typed_data(&self, account: Address, typed_data: &TypedData)
        -> Result<Bytes, PortError>;
}

/// Read access to one chain's JSON-RPC node.
pub trait TransportPort: Send + Sync {
    fn chain_id(&self) -> Result<u64, PortError>;
    fn block_number(&self) -> Result<u64, PortError>;
    fn balance(&self, address: Address) -> Result<U256, PortError>;
}
