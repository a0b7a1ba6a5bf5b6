use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use wallet_kit_core::{
    ConnectResult, ConnectorEvent, ConnectorEventKind, ConnectorInfo, ConnectorKind,
    ConnectorPort, PortError,
};

use crate::EVENT_LOG_CAPACITY;

/// Failure switches for exercising error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MockFeatures {
    pub connect_error: bool,
    pub switch_chain_error: bool,
    pub sign_message_error: bool,
    /// Reports itself authorized so `reconnect` restores it silently.
    pub reconnect: bool,
}

/// In-process wallet backed by local private keys.
pub struct MockConnector {
    info: ConnectorInfo,
    signers: Vec<PrivateKeySigner>,
    features: MockFeatures,
    state: Mutex<MockState>,
}

#[derive(Debug)]
struct MockState {
    connected: bool,
    chain_id: u64,
    event_seq: u64,
    events: VecDeque<ConnectorEvent>,
}

impl fmt::Debug for MockConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockConnector")
            .field("info", &self.info)
            .field("accounts", &self.addresses())
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

impl MockConnector {
    pub fn new(signers: Vec<PrivateKeySigner>, chain_id: u64) -> Self {
        Self {
            info: ConnectorInfo {
                id: "mock".to_owned(),
                name: "Mock Connector".to_owned(),
                uid: "mock".to_owned(),
                kind: ConnectorKind::Mock,
            },
            signers,
            features: MockFeatures::default(),
            state: Mutex::new(MockState {
                connected: false,
                chain_id,
                event_seq: 0,
                events: VecDeque::new(),
            }),
        }
    }

    pub fn from_private_keys(keys: &[&str], chain_id: u64) -> Result<Self, PortError> {
        let signers = keys
            .iter()
            .map(|k| {
                k.parse::<PrivateKeySigner>()
                    .map_err(|e| PortError::Validation(format!("invalid private key: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(signers, chain_id))
    }

    pub fn with_features(mut self, features: MockFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.info.uid = uid.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(|s| s.address()).collect()
    }

    pub fn is_connected(&self) -> Result<bool, PortError> {
        Ok(self.lock()?.connected)
    }

    pub fn drain_events(&self) -> Result<Vec<ConnectorEvent>, PortError> {
        let mut g = self.lock()?;
        Ok(g.events.drain(..).collect())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("mock connector lock poisoned: {e}")))
    }

    fn signer_for(&self, account: Address) -> Result<&PrivateKeySigner, PortError> {
        self.signers
            .iter()
            .find(|s| s.address() == account)
            .ok_or_else(|| PortError::NotFound(format!("no key for account {account}")))
    }

    fn ensure_connected(&self) -> Result<(), PortError> {
        if !self.lock()?.connected {
            return Err(PortError::Policy("mock connector is not connected".to_owned()));
        }
        Ok(())
    }
}

impl MockState {
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

impl ConnectorPort for MockConnector {
    fn info(&self) -> &ConnectorInfo {
        &self.info
    }

    fn connect(&self, chain_id: Option<u64>) -> Result<ConnectResult, PortError> {
        if self.features.connect_error {
            return Err(PortError::Rejected("Failed to connect.".to_owned()));
        }
        let accounts = self.addresses();
        if accounts.is_empty() {
            return Err(PortError::Validation("mock connector has no accounts".to_owned()));
        }

        let mut g = self.lock()?;
        g.connected = true;
        if let Some(id) = chain_id {
            g.chain_id = id;
        }
        let chain_id = g.chain_id;
        g.record(ConnectorEventKind::Connect, chain_id.to_string());
        Ok(ConnectResult { accounts, chain_id })
    }

    fn disconnect(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        g.connected = false;
        g.record(ConnectorEventKind::Disconnect, String::new());
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Address>, PortError> {
        self.ensure_connected()?;
        Ok(self.addresses())
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        Ok(self.lock()?.chain_id)
    }

    fn is_authorized(&self) -> Result<bool, PortError> {
        Ok(self.features.reconnect && !self.signers.is_empty())
    }

    fn switch_chain(&self, chain_id: u64) -> Result<u64, PortError> {
        if self.features.switch_chain_error {
            return Err(PortError::Rejected("Failed to switch chain.".to_owned()));
        }
        let mut g = self.lock()?;
        if g.chain_id != chain_id {
            g.chain_id = chain_id;
            g.record(ConnectorEventKind::ChainChanged, chain_id.to_string());
        }
        Ok(chain_id)
    }

    fn sign_message(&self, account: Address, message: &[u8]) -> Result<Bytes, PortError> {
        if self.features.sign_message_error {
            return Err(PortError::Rejected("Failed to sign message.".to_owned()));
        }
        self.ensure_connected()?;
        let signature = self
            .signer_for(account)?
            .sign_message_sync(message)
            .map_err(|e| PortError::Validation(format!("sign message failed: {e}")))?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    fn sign_typed_data(
        &self,
        account: Address,
        typed_data: &TypedData,
    ) -> Result<Bytes, PortError> {
        if self.features.sign_message_error {
            return Err(PortError::Rejected("Failed to sign typed data.".to_owned()));
        }
        self.ensure_connected()?;
        let signature = self
            .signer_for(account)?
            .sign_dynamic_typed_data_sync(typed_data)
            .map_err(|e| PortError::Validation(format!("sign typed data failed: {e}")))?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}
