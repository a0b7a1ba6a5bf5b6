use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{Address, U256};
use serde_json::json;

use wallet_kit_core::{Chain, PortError, TransportPort};

use crate::rpc::{parse_quantity, parse_u64_quantity};
use crate::{AdapterConfig, JsonRpcClient};

/// Reads a chain through its JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    rpc: JsonRpcClient,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, config: &AdapterConfig) -> Result<Self, PortError> {
        Ok(Self {
            rpc: JsonRpcClient::new(url, config.rpc_timeout())?,
        })
    }

    pub fn for_chain(chain: &Chain, config: &AdapterConfig) -> Result<Self, PortError> {
        Self::new(chain.rpc_url.clone(), config)
    }

    pub fn url(&self) -> &str {
        self.rpc.url()
    }
}

impl TransportPort for HttpTransport {
    fn chain_id(&self) -> Result<u64, PortError> {
        parse_u64_quantity(&self.rpc.call("eth_chainId", json!([]))?)
    }

    fn block_number(&self) -> Result<u64, PortError> {
        parse_u64_quantity(&self.rpc.call("eth_blockNumber", json!([]))?)
    }

    fn balance(&self, address: Address) -> Result<U256, PortError> {
        parse_quantity(
            &self
                .rpc
                .call("eth_getBalance", json!([address.to_string(), "latest"]))?,
        )
    }
}

/// In-memory chain with settable balances and a block counter.
#[derive(Debug)]
pub struct DeterministicTransport {
    chain_id: u64,
    state: Mutex<DeterministicState>,
}

#[derive(Debug)]
struct DeterministicState {
    block_number: u64,
    /// Blocks added after every `block_number` read.
    auto_mine: u64,
    default_balance: U256,
    balances: HashMap<Address, U256>,
}

impl DeterministicTransport {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            state: Mutex::new(DeterministicState {
                block_number: 1,
                auto_mine: 0,
                default_balance: U256::ZERO,
                balances: HashMap::new(),
            }),
        }
    }

    pub fn with_block_number(self, block_number: u64) -> Self {
        self.update(|s| s.block_number = block_number)
    }

    pub fn with_auto_mine(self, blocks: u64) -> Self {
        self.update(|s| s.auto_mine = blocks)
    }

    pub fn with_default_balance(self, balance: U256) -> Self {
        self.update(|s| s.default_balance = balance)
    }

    fn update<F: FnOnce(&mut DeterministicState)>(self, f: F) -> Self {
        if let Ok(mut g) = self.state.lock() {
            f(&mut g);
        }
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DeterministicState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("transport lock poisoned: {e}")))
    }

    pub fn set_balance(&self, address: Address, balance: U256) -> Result<(), PortError> {
        self.lock()?.balances.insert(address, balance);
        Ok(())
    }

    /// Advances the chain by `blocks`, returning the new head.
    pub fn mine(&self, blocks: u64) -> Result<u64, PortError> {
        let mut g = self.lock()?;
        g.block_number = g.block_number.saturating_add(blocks);
        Ok(g.block_number)
    }
}

impl TransportPort for DeterministicTransport {
    fn chain_id(&self) -> Result<u64, PortError> {
        Ok(self.chain_id)
    }

    fn block_number(&self) -> Result<u64, PortError> {
        let mut g = self.lock()?;
        let current = g.block_number;
        g.block_number = current.saturating_add(g.auto_mine);
        Ok(current)
    }

    fn balance(&self, address: Address) -> Result<U256, PortError> {
        let g = self.lock()?;
        Ok(g.balances.get(&address).copied().unwrap_or(g.default_balance))
    }
}
