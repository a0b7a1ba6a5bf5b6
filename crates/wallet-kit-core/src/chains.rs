use crate::domain::{Chain, NativeCurrency};

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const OPTIMISM_CHAIN_ID: u64 = 10;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

pub fn ether() -> NativeCurrency {
    NativeCurrency {
        name: "Ether".to_owned(),
        symbol: "ETH".to_owned(),
        decimals: 18,
    }
}

pub fn mainnet() -> Chain {
    Chain {
        id: MAINNET_CHAIN_ID,
        name: "Ethereum".to_owned(),
        native_currency: ether(),
        rpc_url: "https://cloudflare-eth.com".to_owned(),
    }
}

pub fn optimism() -> Chain {
    Chain {
        id: OPTIMISM_CHAIN_ID,
        name: "OP Mainnet".to_owned(),
        native_currency: ether(),
        rpc_url: "https://mainnet.optimism.io".to_owned(),
    }
}

pub fn sepolia() -> Chain {
    Chain {
        id: SEPOLIA_CHAIN_ID,
        name: "Sepolia".to_owned(),
        native_currency: NativeCurrency {
            name: "Sepolia Ether".to_owned(),
            symbol: "ETH".to_owned(),
            decimals: 18,
        },
        rpc_url: "https://rpc.sepolia.org".to_owned(),
    }
}
