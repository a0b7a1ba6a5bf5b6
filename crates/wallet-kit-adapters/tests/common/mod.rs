#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::U256;

use wallet_kit_adapters::{DeterministicTransport, MockConnector, MockFeatures};
use wallet_kit_core::chains::{mainnet, optimism, MAINNET_CHAIN_ID, OPTIMISM_CHAIN_ID};
use wallet_kit_core::{Config, ConnectorPort, TransportPort};
use wallet_kit_test::{account_signer, ACCOUNTS};

pub const PRIMARY: &str = "mock-primary";
pub const SECONDARY: &str = "mock-secondary";

pub struct Harness {
    pub config: Arc<Config>,
    pub primary: Arc<MockConnector>,
    pub secondary: Arc<MockConnector>,
    pub mainnet: Arc<DeterministicTransport>,
    pub optimism: Arc<DeterministicTransport>,
}

pub fn one_ether() -> U256 {
    U256::from(10u64).pow(U256::from(18u64))
}

pub fn mock(uid: &str, indices: &[usize], features: MockFeatures) -> MockConnector {
    let signers = indices
        .iter()
        .map(|i| account_signer(*i).expect("fixture signer"))
        .collect();
    MockConnector::new(signers, MAINNET_CHAIN_ID)
        .with_uid(uid)
        .with_name(uid)
        .with_features(features)
}

pub fn harness() -> Harness {
    harness_with(MockFeatures::default(), MockFeatures::default())
}

pub fn harness_with(primary: MockFeatures, secondary: MockFeatures) -> Harness {
    let primary = Arc::new(mock(PRIMARY, &[0, 1], primary));
    let secondary = Arc::new(mock(SECONDARY, &[2], secondary));
    let mainnet_transport = Arc::new(
        DeterministicTransport::new(MAINNET_CHAIN_ID)
            .with_block_number(16_280_770)
            .with_default_balance(one_ether() * U256::from(10_000u64)),
    );
    let optimism_transport = Arc::new(DeterministicTransport::new(OPTIMISM_CHAIN_ID));

    let mut transports: HashMap<u64, Arc<dyn TransportPort>> = HashMap::new();
    transports.insert(MAINNET_CHAIN_ID, mainnet_transport.clone());
    transports.insert(OPTIMISM_CHAIN_ID, optimism_transport.clone());

    let connectors: Vec<Arc<dyn ConnectorPort>> =
        vec![primary.clone() as Arc<dyn ConnectorPort>, secondary.clone()];
    let config = Config::new(vec![mainnet(), optimism()], connectors, transports)
        .expect("valid config");

    Harness {
        config: Arc::new(config),
        primary,
        secondary,
        mainnet: mainnet_transport,
        optimism: optimism_transport,
    }
}

pub fn account(index: usize) -> alloy::primitives::Address {
    ACCOUNTS[index]
}
