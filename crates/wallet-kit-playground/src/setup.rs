//! Builds the playground's [`Config`] from environment variables.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::U256;
use thiserror::Error;
use tracing::{debug, info};

use wallet_kit_adapters::{
    AdapterConfig, ConfigError, DeterministicTransport, Eip1193Connector, HttpTransport,
    MockConnector,
};
use wallet_kit_core::chains::{mainnet, optimism, sepolia};
use wallet_kit_core::{ActionError, Chain, Config, ConnectorPort, PortError, TransportPort};
use wallet_kit_test::{account_signer, test_env, FixtureError};

pub const ANVIL_VAR: &str = "WALLET_KIT_PLAYGROUND_ANVIL";
pub const OFFLINE_VAR: &str = "WALLET_KIT_PLAYGROUND_OFFLINE";

/// Accounts per mock wallet; the ten test accounts split into two wallets.
const MOCK_WALLET_SIZE: usize = 5;
const OFFLINE_BALANCE_ETHER: u64 = 10_000;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Adapter(#[from] ConfigError),
    #[error("invalid value for {var}: {value:?} (expected 1/0, true/false)")]
    Flag { var: &'static str, value: String },
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaygroundSettings {
    /// Use the local anvil chains instead of public endpoints.
    pub anvil: bool,
    /// Serve reads from in-memory chains; no network access.
    pub offline: bool,
    pub adapters: AdapterConfig,
}

impl PlaygroundSettings {
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            anvil: parse_flag(ANVIL_VAR, lookup(ANVIL_VAR))?,
            offline: parse_flag(OFFLINE_VAR, lookup(OFFLINE_VAR))?,
            adapters: AdapterConfig::from_lookup(&lookup)?,
        })
    }
}

fn parse_flag(var: &'static str, raw: Option<String>) -> Result<bool, SetupError> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(SetupError::Flag { var, value: raw }),
    }
}

pub fn chains(settings: &PlaygroundSettings) -> Vec<Chain> {
    if settings.anvil {
        wallet_kit_test::chains::test_chains(test_env())
    } else {
        vec![mainnet(), optimism(), sepolia()]
    }
}

fn transport_for(
    chain: &Chain,
    settings: &PlaygroundSettings,
) -> Result<Arc<dyn TransportPort>, SetupError> {
    if settings.offline {
        let balance = U256::from(OFFLINE_BALANCE_ETHER) * U256::from(10u64).pow(U256::from(18u64));
        let transport = DeterministicTransport::new(chain.id)
            .with_block_number(test_env().fork_block_number)
            .with_auto_mine(1)
            .with_default_balance(balance);
        return Ok(Arc::new(transport));
    }
    Ok(Arc::new(HttpTransport::for_chain(chain, &settings.adapters)?))
}

fn mock_wallets(chain_id: u64) -> Result<Vec<Arc<dyn ConnectorPort>>, SetupError> {
    let mut wallets: Vec<Arc<dyn ConnectorPort>> = Vec::new();
    for (n, start) in (0..wallet_kit_test::ACCOUNTS.len())
        .step_by(MOCK_WALLET_SIZE)
        .enumerate()
    {
        let signers = (start..start + MOCK_WALLET_SIZE)
            .map(account_signer)
            .collect::<Result<Vec<_>, _>>()?;
        let connector = MockConnector::new(signers, chain_id)
            .with_uid(format!("mock-{}", n + 1))
            .with_name(format!("Mock Connector {}", n + 1));
        wallets.push(Arc::new(connector));
    }
    Ok(wallets)
}

pub fn build_config(settings: &PlaygroundSettings) -> Result<Config, SetupError> {
    let chains = chains(settings);

    let mut transports = HashMap::new();
    for chain in &chains {
        transports.insert(chain.id, transport_for(chain, settings)?);
        debug!(chain_id = chain.id, rpc = %chain.rpc_url, "configured transport");
    }

    let mut connectors: Vec<Arc<dyn ConnectorPort>> = Vec::new();
    if !settings.adapters.strict_runtime_required() {
        let chain_id = chains.first().map(|c| c.id).unwrap_or_default();
        connectors.extend(mock_wallets(chain_id)?);
    }
    if settings.adapters.eip1193_proxy_url.is_some() || settings.adapters.strict_runtime_required()
    {
        connectors.push(Arc::new(Eip1193Connector::with_config(&settings.adapters)));
    }

    info!(
        chains = chains.len(),
        connectors = connectors.len(),
        "playground config ready"
    );
    Ok(Config::new(chains, connectors, transports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_kit_adapters::RuntimeProfile;
    use wallet_kit_core::chains::{OPTIMISM_CHAIN_ID, SEPOLIA_CHAIN_ID};
    use wallet_kit_core::{actions, ConnectorKind};

    fn offline() -> PlaygroundSettings {
        PlaygroundSettings {
            offline: true,
            ..PlaygroundSettings::default()
        }
    }

    #[test]
    fn flags_parse_from_lookup() {
        let settings = PlaygroundSettings::from_lookup(|var| match var {
            ANVIL_VAR => Some("1".to_owned()),
            OFFLINE_VAR => Some("true".to_owned()),
            _ => None,
        })
        .expect("settings");
        assert!(settings.anvil);
        assert!(settings.offline);
        assert_eq!(settings.adapters, AdapterConfig::default());

        let err = PlaygroundSettings::from_lookup(|var| {
            (var == ANVIL_VAR).then(|| "maybe".to_owned())
        })
        .expect_err("bad flag");
        assert!(matches!(err, SetupError::Flag { var: ANVIL_VAR, .. }));
    }

    #[test]
    fn default_chains_and_mock_wallets() {
        let config = build_config(&offline()).expect("config");
        let ids: Vec<_> = config.chains().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, OPTIMISM_CHAIN_ID, SEPOLIA_CHAIN_ID]);

        let connectors = actions::connectors(&config);
        assert_eq!(connectors.len(), 2);
        assert!(connectors.iter().all(|c| c.kind == ConnectorKind::Mock));

        let conn = actions::connect(&config, "mock-2", None).expect("connect");
        assert_eq!(conn.accounts, wallet_kit_test::ACCOUNTS[5..].to_vec());
    }

    #[test]
    fn anvil_chains_route_to_local_ports() {
        let settings = PlaygroundSettings {
            anvil: true,
            ..offline()
        };
        let chains = chains(&settings);
        assert_eq!(chains.len(), 3);
        assert!(chains
            .iter()
            .all(|c| c.rpc_url.starts_with("http://127.0.0.1:")));
    }

    #[test]
    fn offline_reads_advance_blocks() {
        let config = build_config(&offline()).expect("config");
        let first = actions::get_block_number(&config, None).expect("block");
        let second = actions::get_block_number(&config, None).expect("block");
        assert_eq!(second, first + 1);

        let balance = actions::get_balance(&config, wallet_kit_test::ACCOUNTS[0], None)
            .expect("balance");
        assert_eq!(balance.formatted, "10000");
    }

    #[test]
    fn production_profile_drops_mock_wallets() {
        let settings = PlaygroundSettings {
            adapters: AdapterConfig {
                runtime_profile: RuntimeProfile::Production,
                ..AdapterConfig::default()
            },
            ..offline()
        };
        let config = build_config(&settings).expect("config");
        let connectors = actions::connectors(&config);
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].kind, ConnectorKind::Eip1193);
    }
}
