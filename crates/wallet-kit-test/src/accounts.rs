use alloy::primitives::{address, Address};
use alloy::signers::local::PrivateKeySigner;

use crate::FixtureError;

/// Pre-funded accounts of the local test network, as written in the test suites.
///
/// The list mixes checksummed and lower-case spellings; only the hex shape is
/// guaranteed, not EIP-55 casing.
pub const ACCOUNT_LITERALS: [&str; 10] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34aaf54267db7d7c367839aaf71a00a2c6a65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    "0x976EA74026E726554dB657fA54763abd0C3a0aa9",
    "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955",
    "0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f",
    "0xa0Ee7A142d267C1f36714E4a8F75612F20a79720",
];

pub const ACCOUNTS: [Address; 10] = [
    address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("70997970c51812dc3a010c7d01b50e0d17dc79c8"),
    address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
    address!("15d34aaf54267db7d7c367839aaf71a00a2c6a65"),
    address!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
    address!("976EA74026E726554dB657fA54763abd0C3a0aa9"),
    address!("14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
    address!("23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f"),
    address!("a0Ee7A142d267C1f36714E4a8F75612F20a79720"),
];

/// Dev private keys of the "test test ... junk" mnemonic, index-aligned with [`ACCOUNTS`].
pub const ACCOUNT_KEYS: [&str; 10] = [
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    "0x7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
    "0x47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
    "0x8b3a350cf5c34c9194ca85829a2df0ec3153be0318b5e2d3348e872092edffba",
    "0x92db14e403b83dfe3df233f83dfa3a0d7096f21ca9b0d6d6b8d88b2b4ec1564e",
    "0x4bbbf85ce3377467afe5d46f804f221813b2bb87f24d81f60f1fcdbf7cbf4356",
    "0xdbda1821b80551c9d65939329250298aa3472ba22feea921c0cf5d620ea67b97",
    "0x2a871d0798f97d79848a013d4936a73bf4cc922c825d33c1cf7073dff6d409c6",
];

/// Address of the deployed `WagmiMintExample` ERC-721 on mainnet.
pub const WAGMI_MINT_EXAMPLE_ADDRESS: Address =
    address!("FBA3912Ca04dd458c843e2EE08967fC04f3579c2");

/// `0x` followed by exactly 40 hex digits.
pub fn is_hex_address(raw: &str) -> bool {
    match raw.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Checks every literal is a well-formed 20-byte address matching [`ACCOUNTS`].
pub fn validate_account_literals() -> Result<(), FixtureError> {
    for (literal, expected) in ACCOUNT_LITERALS.iter().zip(ACCOUNTS.iter()) {
        if !is_hex_address(literal) {
            return Err(FixtureError::InvalidAddress((*literal).to_owned()));
        }
        let parsed: Address = literal
            .parse()
            .map_err(|e| FixtureError::InvalidAddress(format!("{literal}: {e}")))?;
        if parsed != *expected {
            return Err(FixtureError::InvalidAddress(format!(
                "{literal} does not match compiled account {expected}"
            )));
        }
    }
    Ok(())
}

pub fn account_signer(index: usize) -> Result<PrivateKeySigner, FixtureError> {
    let key = ACCOUNT_KEYS
        .get(index)
        .ok_or(FixtureError::AccountIndex(index))?;
    key.parse()
        .map_err(|e| FixtureError::InvalidKey(format!("account {index}: {e}")))
}

pub fn account_signers() -> Result<Vec<PrivateKeySigner>, FixtureError> {
    (0..ACCOUNT_KEYS.len()).map(account_signer).collect()
}
