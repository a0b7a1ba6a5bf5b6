//! Forked test chains served by the anvil proxy.

use wallet_kit_core::chains::{self, ether};
use wallet_kit_core::Chain;

use crate::TestEnv;

pub const MAINNET_PORT: u16 = 8545;
pub const MAINNET2_PORT: u16 = 8546;
pub const OPTIMISM_PORT: u16 = 8547;

/// Second mainnet fork with its own id, for chain-switch tests.
pub const MAINNET2_CHAIN_ID: u64 = 456;

pub fn mainnet(env: &TestEnv) -> Chain {
    Chain {
        rpc_url: env.anvil_rpc_url(MAINNET_PORT),
        ..chains::mainnet()
    }
}

pub fn mainnet2(env: &TestEnv) -> Chain {
    Chain {
        id: MAINNET2_CHAIN_ID,
        name: "Ethereum (mainnet2)".to_owned(),
        native_currency: ether(),
        rpc_url: env.anvil_rpc_url(MAINNET2_PORT),
    }
}

pub fn optimism(env: &TestEnv) -> Chain {
    Chain {
        rpc_url: env.anvil_rpc_url(OPTIMISM_PORT),
        ..chains::optimism()
    }
}

pub fn test_chains(env: &TestEnv) -> Vec<Chain> {
    vec![mainnet(env), mainnet2(env), optimism(env)]
}
