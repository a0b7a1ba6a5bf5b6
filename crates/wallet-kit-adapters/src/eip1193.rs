//! Connector that forwards EIP-1193 requests to a wallet proxy over HTTP.

use std::collections::VecDeque;
use std::sync::Mutex;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{hex, Address, Bytes};
use serde_json::{json, Value};
use tracing::{debug, warn};

use wallet_kit_core::{
    ConnectResult, ConnectorEvent, ConnectorEventKind, ConnectorInfo, ConnectorKind,
    ConnectorPort, PortError,
};

use crate::rpc::{format_quantity, parse_address_list, parse_bytes, parse_u64_quantity};
use crate::{AdapterConfig, JsonRpcClient, EVENT_LOG_CAPACITY};

#[derive(Debug)]
pub struct Eip1193Connector {
    info: ConnectorInfo,
    mode: ProviderMode,
    state: Mutex<ProviderState>,
}

#[derive(Debug)]
enum ProviderMode {
    Disabled(String),
    Proxy(JsonRpcClient),
}

#[derive(Debug, Default)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: Option<u64>,
    event_seq: u64,
    events: VecDeque<ConnectorEvent>,
}

impl Eip1193Connector {
    pub fn with_config(config: &AdapterConfig) -> Self {
        let mode = match config.eip1193_proxy_url.as_deref() {
            Some(url) => match JsonRpcClient::new(url, config.rpc_timeout()) {
                Ok(client) => ProviderMode::Proxy(client),
                Err(e) => ProviderMode::Disabled(format!(
                    "failed to initialize EIP-1193 proxy client: {e}"
                )),
            },
            None if config.strict_runtime_required() => ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            ),
            None => ProviderMode::Disabled("EIP-1193 proxy URL not configured".to_owned()),
        };

        Self {
            info: ConnectorInfo {
                id: "injected".to_owned(),
                name: "Injected (EIP-1193 proxy)".to_owned(),
                uid: "injected".to_owned(),
                kind: ConnectorKind::Eip1193,
            },
            mode,
            state: Mutex::new(ProviderState::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, ProviderMode::Proxy(_))
    }

    pub fn drain_events(&self) -> Result<Vec<ConnectorEvent>, PortError> {
        let mut g = self.lock()?;
        Ok(g.events.drain(..).collect())
    }

    fn request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        match &self.mode {
            ProviderMode::Proxy(client) => client.call(method, params),
            ProviderMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    fn update_accounts(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if g.accounts != accounts {
            let value = serde_json::to_string(&accounts).unwrap_or_else(|_| "[]".to_owned());
            g.accounts = accounts;
            g.record(ConnectorEventKind::AccountsChanged, value);
        }
        Ok(())
    }

    fn update_chain(&self, chain_id: u64) -> Result<(), PortError> {
        let mut g = self.lock()?;
        if g.chain_id != Some(chain_id) {
            g.chain_id = Some(chain_id);
            g.record(ConnectorEventKind::ChainChanged, chain_id.to_string());
        }
        Ok(())
    }
}

impl ProviderState {
    fn record(&mut self, kind: ConnectorEventKind, value: String) {
        self.event_seq = self.event_seq.saturating_add(1);
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(ConnectorEvent {
            sequence: self.event_seq,
            kind,
            value,
        });
    }
}

impl ConnectorPort for Eip1193Connector {
    fn info(&self) -> &ConnectorInfo {
        &self.info
    }

    fn connect(&self, chain_id: Option<u64>) -> Result<ConnectResult, PortError> {
        let accounts = parse_address_list(&self.request("eth_requestAccounts", json!([]))?)?;
        self.update_accounts(accounts.clone())?;

        let mut current = self.chain_id()?;
        if let Some(target) = chain_id.filter(|id| *id != current) {
            current = self.switch_chain(target)?;
        }
        self.lock()?.record(ConnectorEventKind::Connect, current.to_string());
        Ok(ConnectResult {
            accounts,
            chain_id: current,
        })
    }

    fn disconnect(&self) -> Result<(), PortError> {
        // Revocation is optional for wallets; local state is cleared regardless.
        if let Err(e) = self.request(
            "wallet_revokePermissions",
            json!([{ "eth_accounts": {} }]),
        ) {
            debug!(error = %e, "wallet_revokePermissions failed");
        }
        let mut g = self.lock()?;
        g.accounts.clear();
        g.record(ConnectorEventKind::Disconnect, String::new());
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Address>, PortError> {
        let accounts = parse_address_list(&self.request("eth_accounts", json!([]))?)?;
        self.update_accounts(accounts.clone())?;
        Ok(accounts)
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        let chain_id = parse_u64_quantity(&self.request("eth_chainId", json!([]))?)?;
        self.update_chain(chain_id)?;
        Ok(chain_id)
    }

    fn is_authorized(&self) -> Result<bool, PortError> {
        if !self.is_enabled() {
            return Ok(false);
        }
        Ok(!self.accounts()?.is_empty())
    }

    fn switch_chain(&self, chain_id: u64) -> Result<u64, PortError> {
        self.request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": format_quantity(chain_id) }]),
        )?;
        self.update_chain(chain_id)?;
        Ok(chain_id)
    }

    fn sign_message(&self, account: Address, message: &[u8]) -> Result<Bytes, PortError> {
        let result = self.request(
            "personal_sign",
            json!([hex::encode_prefixed(message), account.to_string()]),
        )?;
        parse_bytes(&result)
    }

    fn sign_typed_data(
        &self,
        account: Address,
        typed_data: &TypedData,
    ) -> Result<Bytes, PortError> {
        let payload = serde_json::to_string(typed_data)
            .map_err(|e| PortError::Validation(format!("typed data serialize failed: {e}")))?;
        let result = self.request("eth_signTypedData_v4", json!([account.to_string(), payload]));
        match result {
            Ok(value) => parse_bytes(&value),
            Err(e) => {
                warn!(error = %e, "eth_signTypedData_v4 failed");
                Err(e)
            }
        }
    }
}
