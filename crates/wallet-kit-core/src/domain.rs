use alloy::primitives::{utils::format_units, Address, U256};
use serde::{Deserialize, Serialize};

use crate::state_machine::ConnectionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    pub rpc_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectorKind {
    Mock,
    Eip1193,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorInfo {
    pub id: String,
    pub name: String,
    /// Unique per connector instance; two connectors may share an `id`.
    pub uid: String,
    pub kind: ConnectorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub connector: ConnectorInfo,
    pub accounts: Vec<Address>,
    pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub address: Option<Address>,
    pub addresses: Vec<Address>,
    pub chain_id: Option<u64>,
    pub connector: Option<ConnectorInfo>,
    pub status: ConnectionStatus,
}

impl AccountSnapshot {
    pub fn disconnected() -> Self {
        Self {
            address: None,
            addresses: Vec::new(),
            chain_id: None,
            connector: None,
            status: ConnectionStatus::Disconnected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub value: U256,
    pub decimals: u8,
    pub symbol: String,
    pub formatted: String,
}

impl Balance {
    pub fn new(value: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            value,
            decimals,
            symbol: symbol.into(),
            formatted: format_amount(value, decimals),
        }
    }
}

/// Decimal rendering without trailing fractional zeros: `1.5`, `0`, `10`.
pub fn format_amount(value: U256, decimals: u8) -> String {
    let raw = match format_units(value, decimals) {
        Ok(s) => s,
        Err(_) => return value.to_string(),
    };
    if !raw.contains('.') {
        return raw;
    }
    raw.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorEventKind {
    Connect,
    AccountsChanged,
    ChainChanged,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorEvent {
    pub sequence: u64,
    pub kind: ConnectorEventKind,
    pub value: String,
}
